mod common;

use std::collections::BTreeMap;

use proptest::prelude::*;
use steam_insights::{
    analysis::{
        AnalysisSummary, GenreAverage, GenreFilter, free_vs_paid, peak_release_years,
        release_year_counts, top_genres_by_recommendations, year_histogram,
    },
    data::Value,
    loader::{LoadOptions, load_dataset},
    record::Record,
};

use common::{GameRow, SAMPLE_FILE, TestWorkspace, fixture_path, games_csv};

fn fixture_records() -> Vec<Record> {
    load_dataset(&fixture_path(SAMPLE_FILE), &LoadOptions::default())
        .expect("load fixture")
        .records
}

fn genre_names(ranking: &[GenreAverage]) -> Vec<&str> {
    ranking.iter().map(|entry| entry.genre.as_str()).collect()
}

#[test]
fn fixture_free_vs_paid() {
    let split = free_vs_paid(&fixture_records());
    assert_eq!(split.free_count, 4);
    assert_eq!(split.paid_count, 6);
    assert_eq!(split.free_percent, 40.0);
    assert_eq!(split.paid_percent, 60.0);
}

#[test]
fn fixture_release_years() {
    let histogram = year_histogram(&fixture_records());
    assert_eq!(
        histogram.all_counts,
        BTreeMap::from([(2000, 1), (2012, 1), (2013, 1), (2015, 1), (2016, 2), (2020, 3)])
    );
    assert_eq!(histogram.peak_years, vec![2020]);
    assert_eq!(histogram.peak_count, 3);
    assert_eq!(histogram.total(), 9);
}

#[test]
fn fixture_genre_ranking_with_default_filter() {
    let ranking = top_genres_by_recommendations(&fixture_records(), &GenreFilter::default());
    let expected = [
        ("Action", 150000.0),
        ("Adventure", 1000.0),
        ("Casual", 1000.0),
        ("Indie", 225000.0),
        ("RPG", 325000.0),
        ("Simulation", 300000.0),
    ];
    assert_eq!(ranking.len(), expected.len());
    for (entry, (genre, average)) in ranking.iter().zip(expected) {
        assert_eq!(entry.genre, genre);
        assert_eq!(entry.average_recommendations, average);
    }
}

#[test]
fn fixture_top_n_selects_by_rank_then_sorts_by_name() {
    let records = fixture_records();
    let top3 = top_genres_by_recommendations(
        &records,
        &GenreFilter {
            top_n: 3,
            ..GenreFilter::default()
        },
    );
    assert_eq!(genre_names(&top3), vec!["Indie", "RPG", "Simulation"]);

    // Adventure and Casual tie at 1000; the name tie-break keeps Adventure.
    let top5 = top_genres_by_recommendations(
        &records,
        &GenreFilter {
            top_n: 5,
            ..GenreFilter::default()
        },
    );
    assert_eq!(
        genre_names(&top5),
        vec!["Action", "Adventure", "Indie", "RPG", "Simulation"]
    );
}

#[test]
fn stricter_filters_shrink_the_ranking() {
    let records = fixture_records();
    let ranking = top_genres_by_recommendations(
        &records,
        &GenreFilter {
            min_year: 2020,
            min_positive_reviews: 300000,
            top_n: 10,
        },
    );
    assert_eq!(genre_names(&ranking), vec!["RPG"]);
    assert_eq!(ranking[0].average_recommendations, 450000.0);
}

#[test]
fn two_record_genre_scenario() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "two.csv",
        games_csv(&[
            GameRow {
                name: "First",
                release_date: "Mar 3, 2019",
                price: "9.99",
                positive: "2000",
                recommendations: "100",
                genres: "Action",
            },
            GameRow {
                name: "Second",
                release_date: "Apr 4, 2020",
                price: "0",
                positive: "3000",
                recommendations: "200",
                genres: "Action,Indie",
            },
        ]),
    );
    let dataset = load_dataset(&path, &LoadOptions::default()).expect("load");
    let ranking = top_genres_by_recommendations(dataset.records(), &GenreFilter::default());
    assert_eq!(
        ranking,
        vec![
            GenreAverage {
                genre: "Action".into(),
                average_recommendations: 150.0,
            },
            GenreAverage {
                genre: "Indie".into(),
                average_recommendations: 200.0,
            },
        ]
    );
}

#[test]
fn header_only_source_yields_empty_results() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("empty.csv", games_csv(&[]));
    let dataset = load_dataset(&path, &LoadOptions::default()).expect("load");
    let summary = AnalysisSummary::compute(dataset.records(), &GenreFilter::default());
    assert_eq!(summary.record_count, 0);
    assert_eq!(summary.free_vs_paid.free_percent, 0.0);
    assert_eq!(summary.free_vs_paid.paid_percent, 0.0);
    assert!(summary.release_years.peak_years.is_empty());
    assert_eq!(summary.release_years.peak_count, 0);
    assert!(summary.top_genres.is_empty());
}

#[test]
fn concurrent_summary_matches_sequential_calls() {
    let records = fixture_records();
    let filter = GenreFilter::default();
    let summary = AnalysisSummary::compute(&records, &filter);
    assert_eq!(summary.free_vs_paid, free_vs_paid(&records));
    assert_eq!(summary.release_years, year_histogram(&records));
    assert_eq!(
        summary.top_genres,
        top_genres_by_recommendations(&records, &filter)
    );
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        prop::option::of(prop_oneof![Just(0.0), 0.01f64..100.0]),
        prop::option::of(2010i64..2024),
        prop::collection::vec(prop::sample::select(vec!["Action", "Indie", "RPG", "Casual"]), 0..3),
        0i64..3000,
        0i64..5000,
    )
        .prop_map(|(price, year, genres, positive, recommendations)| {
            let mut fields = vec![
                (
                    "genres",
                    Value::List(genres.into_iter().map(String::from).collect()),
                ),
                ("positive", Value::Integer(positive)),
                ("recommendations", Value::Integer(recommendations)),
                ("release_date", year.map_or(Value::Null, Value::Integer)),
            ];
            if let Some(price) = price {
                fields.push(("price", Value::Float(price)));
            }
            Record::from_fields(fields)
        })
}

proptest! {
    #[test]
    fn percentages_reproduce_from_counts(records in prop::collection::vec(record_strategy(), 0..40)) {
        let split = free_vs_paid(&records);
        let priced = records.iter().filter(|r| r.price().is_some()).count();
        prop_assert_eq!(split.total(), priced);
        if priced > 0 {
            let free = split.free_count as f64 / priced as f64 * 100.0;
            let paid = split.paid_count as f64 / priced as f64 * 100.0;
            prop_assert!((split.free_percent - free).abs() <= 0.01);
            prop_assert!((split.paid_percent - paid).abs() <= 0.01);
        } else {
            prop_assert_eq!(split.free_percent, 0.0);
            prop_assert_eq!(split.paid_percent, 0.0);
        }
    }

    #[test]
    fn histogram_and_peak_are_consistent(records in prop::collection::vec(record_strategy(), 0..40)) {
        let counts = release_year_counts(&records);
        let dated = records.iter().filter(|r| r.release_year().is_some()).count();
        prop_assert_eq!(counts.values().sum::<usize>(), dated);

        let peak = peak_release_years(&records);
        if counts.is_empty() {
            prop_assert!(peak.years.is_empty());
            prop_assert_eq!(peak.count, 0);
        } else {
            let max = counts.values().copied().max().unwrap_or(0);
            prop_assert!(!peak.years.is_empty());
            prop_assert_eq!(peak.count, max);
            prop_assert!(peak.years.windows(2).all(|pair| pair[0] < pair[1]));
            for year in &peak.years {
                prop_assert_eq!(counts.get(year).copied(), Some(max));
            }
            let argmax = counts.iter().filter(|(_, n)| **n == max).count();
            prop_assert_eq!(argmax, peak.years.len());
        }
    }

    #[test]
    fn genre_ranking_respects_limits_and_means(
        records in prop::collection::vec(record_strategy(), 0..40),
        top_n in 0usize..5,
    ) {
        let filter = GenreFilter { top_n, ..GenreFilter::default() };
        let ranking = top_genres_by_recommendations(&records, &filter);
        prop_assert!(ranking.len() <= top_n);
        prop_assert!(ranking.windows(2).all(|pair| pair[0].genre <= pair[1].genre));

        for entry in &ranking {
            let contributions = records
                .iter()
                .filter(|r| {
                    r.release_year().is_some_and(|y| y >= filter.min_year)
                        && r.positive_reviews().is_some_and(|p| p >= filter.min_positive_reviews)
                        && r.recommendations().is_some()
                        && r.genres().iter().any(|g| g.trim() == entry.genre)
                })
                .flat_map(|r| {
                    let times = r.genres().iter().filter(|g| g.trim() == entry.genre).count();
                    std::iter::repeat_n(r.recommendations().unwrap_or(0) as f64, times)
                })
                .collect::<Vec<_>>();
            prop_assert!(!contributions.is_empty());
            let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
            prop_assert!((entry.average_recommendations - mean).abs() <= 0.01);
        }
    }
}
