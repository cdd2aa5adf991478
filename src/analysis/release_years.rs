use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{record::Record, tally::Tally};

/// Years sharing the highest release count, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeakYears {
    pub years: Vec<i64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearHistogram {
    pub all_counts: BTreeMap<i64, usize>,
    pub peak_years: Vec<i64>,
    pub peak_count: usize,
}

impl YearHistogram {
    pub fn from_counts(all_counts: BTreeMap<i64, usize>) -> Self {
        let peak = peak_of(&all_counts);
        Self {
            all_counts,
            peak_years: peak.years,
            peak_count: peak.count,
        }
    }

    pub fn peak(&self) -> PeakYears {
        PeakYears {
            years: self.peak_years.clone(),
            count: self.peak_count,
        }
    }

    pub fn total(&self) -> usize {
        self.all_counts.values().sum()
    }
}

/// Number of records per release year; records without a year are skipped.
pub fn release_year_counts(records: &[Record]) -> BTreeMap<i64, usize> {
    let mut tally: Tally<i64, usize> = Tally::new();
    for year in records.iter().filter_map(Record::release_year) {
        tally.add(year, 1);
    }
    tally.into_map()
}

pub fn peak_release_years(records: &[Record]) -> PeakYears {
    peak_of(&release_year_counts(records))
}

pub fn year_histogram(records: &[Record]) -> YearHistogram {
    YearHistogram::from_counts(release_year_counts(records))
}

fn peak_of(counts: &BTreeMap<i64, usize>) -> PeakYears {
    let count = counts.values().copied().max().unwrap_or(0);
    if count == 0 {
        return PeakYears::default();
    }
    // BTreeMap iteration already yields ascending years.
    let years = counts
        .iter()
        .filter(|(_, n)| **n == count)
        .map(|(year, _)| *year)
        .collect();
    PeakYears { years, count }
}
