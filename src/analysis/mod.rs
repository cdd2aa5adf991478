//! Aggregations over a loaded record sequence.
//!
//! Every function here takes `&[Record]`, keeps its accumulators local and
//! never fails: empty or degenerate input yields an empty/zero result. The
//! three analyses can run on separate threads against the same slice.

pub mod genres;
pub mod pricing;
pub mod release_years;

pub use genres::{GenreAverage, GenreFilter, top_genres_by_recommendations};
pub use pricing::{FreePaidSplit, free_vs_paid};
pub use release_years::{
    PeakYears, YearHistogram, peak_release_years, release_year_counts, year_histogram,
};

use serde::Serialize;

use crate::record::Record;

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Results of all three analyses for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub record_count: usize,
    pub free_vs_paid: FreePaidSplit,
    pub release_years: YearHistogram,
    pub top_genres: Vec<GenreAverage>,
}

impl AnalysisSummary {
    /// Runs the three analyses concurrently over the same records.
    pub fn compute(records: &[Record], filter: &GenreFilter) -> Self {
        std::thread::scope(|scope| {
            let pricing = scope.spawn(|| free_vs_paid(records));
            let years = scope.spawn(|| year_histogram(records));
            let genres = top_genres_by_recommendations(records, filter);
            Self {
                record_count: records.len(),
                free_vs_paid: join_analysis(pricing),
                release_years: join_analysis(years),
                top_genres: genres,
            }
        })
    }
}

fn join_analysis<T>(handle: std::thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}
