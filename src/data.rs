use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date layout used by the storefront export, e.g. `Jan 4, 2018`.
pub const RELEASE_DATE_FORMAT: &str = "%b %d, %Y";

const COUNTER_FIELDS: &[&str] = &[
    "estimated_owners",
    "peak_ccu",
    "dlc_count",
    "reviews",
    "positive",
    "negative",
    "achievements",
    "recommendations",
    "average_playtime_forever",
    "average_playtime_two_weeks",
    "median_playtime_forever",
    "median_playtime_two_weeks",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    List(Vec<String>),
    Text(String),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 {
                    format!("{f:.1}")
                } else {
                    f.to_string()
                }
            }
            Value::Boolean(b) => b.to_string(),
            Value::List(items) => items.join(", "),
            Value::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Derives the canonical field key for a raw column header.
///
/// `" Peak CCU "` becomes `peak_ccu`, `"Avg. playtime-forever"` becomes
/// `avg_playtime_forever`.
pub fn normalize_column_name(name: &str) -> String {
    name.trim()
        .replace(' ', "_")
        .replace('.', "")
        .replace('-', "_")
        .to_lowercase()
}

/// How the text of a single cell turns into a typed [`Value`].
///
/// Every strategy is total: [`Coercion::apply`] never fails and falls back to
/// [`Coercion::fallback`] whenever the text cannot be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Coercion {
    ReleaseYear,
    Decimal,
    DigitCounter,
    PlatformFlag,
    CommaList,
    Passthrough,
}

impl Coercion {
    pub fn for_key(key: &str) -> Self {
        match key {
            "release_date" => Coercion::ReleaseYear,
            "price" => Coercion::Decimal,
            "windows" | "mac" | "linux" => Coercion::PlatformFlag,
            "genres" | "categories" | "tags" => Coercion::CommaList,
            other if COUNTER_FIELDS.contains(&other) => Coercion::DigitCounter,
            _ => Coercion::Passthrough,
        }
    }

    pub fn fallback(self) -> Value {
        match self {
            Coercion::ReleaseYear | Coercion::Passthrough => Value::Null,
            Coercion::Decimal => Value::Float(0.0),
            Coercion::DigitCounter => Value::Integer(0),
            Coercion::PlatformFlag => Value::Boolean(false),
            Coercion::CommaList => Value::List(Vec::new()),
        }
    }

    /// Interprets `raw`, returning `None` when the strategy has to fall back.
    pub fn try_coerce(self, raw: &str) -> Option<Value> {
        match self {
            Coercion::ReleaseYear => parse_release_year(raw).map(Value::Integer),
            Coercion::Decimal => raw.trim().parse::<f64>().ok().map(Value::Float),
            Coercion::DigitCounter => parse_digit_counter(raw).map(Value::Integer),
            Coercion::PlatformFlag => Some(Value::Boolean(raw.eq_ignore_ascii_case("true"))),
            Coercion::CommaList => Some(Value::List(split_list(raw))),
            Coercion::Passthrough => Some(Value::Text(raw.trim().to_string())),
        }
    }

    /// Coerces a cell; `None` means the row had no cell for this column.
    pub fn apply(self, raw: Option<&str>) -> Value {
        raw.and_then(|value| self.try_coerce(value))
            .unwrap_or_else(|| self.fallback())
    }
}

/// Storefront dates look like `Jan 4, 2018`; the year must have four digits.
pub fn parse_release_year(value: &str) -> Option<i64> {
    let value = value.trim();
    let (_, year) = value.rsplit_once(", ")?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, RELEASE_DATE_FORMAT)
        .ok()
        .map(|date| i64::from(date.year()))
}

/// Keeps only ASCII digits; blank input counts as zero.
pub fn parse_digit_counter(value: &str) -> Option<i64> {
    let digits = value
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    if digits.is_empty() {
        return Some(0);
    }
    digits
        .parse::<u64>()
        .ok()
        .and_then(|parsed| i64::try_from(parsed).ok())
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
