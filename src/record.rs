//! Normalized records and the header layout that produces them.
//!
//! A [`HeaderLayout`] is resolved once from the raw header row: every raw
//! header is mapped to its canonical key and [`Coercion`]. Blank keys are
//! dropped. When several headers share a canonical key the key keeps the
//! position of its first occurrence but reads its value from the last such
//! column.

use std::collections::{BTreeMap, HashMap};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::data::{Coercion, Value, normalize_column_name};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSlot {
    pub key: String,
    /// Zero-based column in the source row.
    pub column: usize,
    pub coercion: Coercion,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaderLayout {
    pub slots: Vec<FieldSlot>,
}

impl HeaderLayout {
    pub fn resolve(headers: &[String]) -> Self {
        let mut slots: Vec<FieldSlot> = Vec::with_capacity(headers.len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (column, raw) in headers.iter().enumerate() {
            let key = normalize_column_name(raw);
            if key.is_empty() {
                warn!("Dropping blank header in column {}", column + 1);
                continue;
            }
            if let Some(&position) = positions.get(&key) {
                let slot = &mut slots[position];
                warn!(
                    "Header '{}' in column {} duplicates '{}' from column {}; the later column wins",
                    raw.trim(),
                    column + 1,
                    key,
                    slot.column + 1
                );
                slot.column = column;
                continue;
            }
            positions.insert(key.clone(), slots.len());
            slots.push(FieldSlot {
                coercion: Coercion::for_key(&key),
                key,
                column,
            });
        }
        Self { slots }
    }

    pub fn keys(&self) -> Vec<String> {
        self.slots.iter().map(|slot| slot.key.clone()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.iter().any(|slot| slot.key == key)
    }

    /// Builds one record; missing trailing cells fall back, extra cells are ignored.
    pub fn normalize_row(&self, raw: &[String]) -> Record {
        self.normalize_row_with(raw, |_| {})
    }

    /// Like [`HeaderLayout::normalize_row`], calling `on_fallback` for every
    /// non-blank cell that could not be interpreted.
    pub fn normalize_row_with<F>(&self, raw: &[String], mut on_fallback: F) -> Record
    where
        F: FnMut(&FieldSlot),
    {
        let fields = self
            .slots
            .iter()
            .map(|slot| {
                let cell = raw.get(slot.column).map(String::as_str);
                let value = match cell.and_then(|text| slot.coercion.try_coerce(text)) {
                    Some(value) => value,
                    None => {
                        if cell.is_some_and(|text| !text.trim().is_empty()) {
                            on_fallback(slot);
                        }
                        slot.coercion.fallback()
                    }
                };
                (slot.key.clone(), value)
            })
            .collect();
        Record { fields }
    }
}

/// One normalized row of the dataset. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn release_year(&self) -> Option<i64> {
        self.get("release_date").and_then(Value::as_integer)
    }

    pub fn price(&self) -> Option<f64> {
        self.get("price").and_then(Value::as_float)
    }

    pub fn genres(&self) -> &[String] {
        self.get("genres").and_then(Value::as_list).unwrap_or(&[])
    }

    pub fn positive_reviews(&self) -> Option<i64> {
        self.get("positive").and_then(Value::as_integer)
    }

    pub fn recommendations(&self) -> Option<i64> {
        self.get("recommendations").and_then(Value::as_integer)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_text)
    }
}

/// The ordered record sequence of one source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub layout: HeaderLayout,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn field_keys(&self) -> Vec<String> {
        self.layout.keys()
    }
}
