use serde::{Deserialize, Serialize};

use super::round2;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FreePaidSplit {
    pub free_percent: f64,
    pub paid_percent: f64,
    pub free_count: usize,
    pub paid_count: usize,
}

impl FreePaidSplit {
    pub fn total(&self) -> usize {
        self.free_count + self.paid_count
    }
}

/// Share of free (price exactly `0.0`) and paid listings.
///
/// Records without a price field are left out of both counts and of the
/// denominator. Each percentage is rounded independently, so the pair may not
/// add up to exactly 100.
pub fn free_vs_paid(records: &[Record]) -> FreePaidSplit {
    let (free_count, paid_count) = records
        .iter()
        .filter_map(Record::price)
        .fold((0usize, 0usize), |(free, paid), price| {
            if price == 0.0 {
                (free + 1, paid)
            } else {
                (free, paid + 1)
            }
        });
    let total = free_count + paid_count;
    if total == 0 {
        return FreePaidSplit::default();
    }
    let percent = |count: usize| round2(count as f64 / total as f64 * 100.0);
    FreePaidSplit {
        free_percent: percent(free_count),
        paid_percent: percent(paid_count),
        free_count,
        paid_count,
    }
}
