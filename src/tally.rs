use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Keyed accumulator: adding to an unseen key starts from `V::default()`.
///
/// Keys iterate in ascending order, which keeps every report built from a
/// tally deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally<K, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V: Default> Tally<K, V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, key: K, amount: V)
    where
        V: AddAssign,
    {
        *self.entries.entry(key).or_default() += amount;
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn into_map(self) -> BTreeMap<K, V> {
        self.entries
    }
}

impl<K: Ord, V: Default> Default for Tally<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Running sum and sample count for an arithmetic mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mean {
    pub sum: f64,
    pub count: usize,
}

impl Mean {
    pub fn sample(value: f64) -> Self {
        Self {
            sum: value,
            count: 1,
        }
    }

    pub fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl AddAssign for Mean {
    fn add_assign(&mut self, other: Mean) {
        self.sum += other.sum;
        self.count += other.count;
    }
}
