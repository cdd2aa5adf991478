use serde::{Deserialize, Serialize};

use super::round2;
use crate::{
    record::Record,
    tally::{Mean, Tally},
};

pub const DEFAULT_MIN_YEAR: i64 = 2015;
pub const DEFAULT_MIN_POSITIVE_REVIEWS: i64 = 1000;
pub const DEFAULT_TOP_N: usize = 10;

/// Which records qualify for the genre ranking and how many genres to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreFilter {
    pub min_year: i64,
    pub min_positive_reviews: i64,
    pub top_n: usize,
}

impl Default for GenreFilter {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            min_positive_reviews: DEFAULT_MIN_POSITIVE_REVIEWS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl GenreFilter {
    /// Returns the recommendations count of a qualifying record.
    fn contribution(&self, record: &Record) -> Option<i64> {
        let year = record.release_year()?;
        let positive = record.positive_reviews()?;
        let recommendations = record.recommendations()?;
        (year >= self.min_year
            && !record.genres().is_empty()
            && positive >= self.min_positive_reviews)
            .then_some(recommendations)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreAverage {
    pub genre: String,
    pub average_recommendations: f64,
}

/// Average recommendations per genre over the qualifying records.
///
/// A record adds its full recommendations count to every genre it lists.
/// Genres are ranked by descending average (ties by name), the first `top_n`
/// are kept, and that selection is returned in alphabetical order.
pub fn top_genres_by_recommendations(records: &[Record], filter: &GenreFilter) -> Vec<GenreAverage> {
    let mut ranked = genre_averages(records, filter);
    ranked.sort_by(|a, b| {
        b.average_recommendations
            .total_cmp(&a.average_recommendations)
            .then_with(|| a.genre.cmp(&b.genre))
    });
    ranked.truncate(filter.top_n);
    ranked.sort_by(|a, b| a.genre.cmp(&b.genre));
    ranked
}

/// Unranked per-genre averages, alphabetical by genre.
pub fn genre_averages(records: &[Record], filter: &GenreFilter) -> Vec<GenreAverage> {
    let mut tally: Tally<String, Mean> = Tally::new();
    for record in records {
        let Some(recommendations) = filter.contribution(record) else {
            continue;
        };
        for genre in record.genres() {
            let genre = genre.trim();
            if genre.is_empty() {
                continue;
            }
            tally.add(genre.to_string(), Mean::sample(recommendations as f64));
        }
    }
    tally
        .iter()
        .filter_map(|(genre, mean)| {
            mean.value().map(|average| GenreAverage {
                genre: genre.clone(),
                average_recommendations: round2(average),
            })
        })
        .collect()
}
