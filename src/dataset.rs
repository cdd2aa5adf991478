use std::path::{Path, PathBuf};

use log::warn;

use crate::config::AnalyzerConfig;

/// Which bundled file an analysis run reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSelection {
    Full,
    Sample(u8),
}

impl DatasetSelection {
    /// Interprets a `--sample` value. Sample numbers outside
    /// `1..=sample_count` and unrecognized values fall back to the full dataset.
    pub fn parse(value: &str, sample_count: u8) -> Self {
        let trimmed = value.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return match trimmed.parse::<u8>() {
                Ok(number) if (1..=sample_count).contains(&number) => {
                    DatasetSelection::Sample(number)
                }
                _ => {
                    warn!(
                        "Sample id '{trimmed}' is outside 1-{sample_count}; analyzing the full dataset"
                    );
                    DatasetSelection::Full
                }
            };
        }
        if !trimmed.eq_ignore_ascii_case("full") {
            warn!("Unrecognized sample id '{trimmed}'; analyzing the full dataset");
        }
        DatasetSelection::Full
    }

    pub fn label(&self) -> String {
        match self {
            DatasetSelection::Full => "Full dataset".to_string(),
            DatasetSelection::Sample(n) => format!("Sample {n:02}"),
        }
    }

    pub fn file_prefix(&self) -> String {
        match self {
            DatasetSelection::Full => "full".to_string(),
            DatasetSelection::Sample(n) => format!("sample_{n:02}"),
        }
    }

    pub fn path(&self, config: &AnalyzerConfig) -> PathBuf {
        match self {
            DatasetSelection::Full => config.full_dataset_path(),
            DatasetSelection::Sample(n) => config.sample_path(*n),
        }
    }
}

/// A resolved input file plus the names its reports are published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub path: PathBuf,
    pub label: String,
    pub prefix: String,
}

impl DataSource {
    pub fn from_selection(selection: DatasetSelection, config: &AnalyzerConfig) -> Self {
        Self {
            path: selection.path(config),
            label: selection.label(),
            prefix: selection.file_prefix(),
        }
    }

    /// An arbitrary file; reports are named after its file stem.
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        let prefix = stem
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        Self {
            path: path.to_path_buf(),
            label: format!("File {stem}"),
            prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_samples_in_range() {
        assert_eq!(DatasetSelection::parse("1", 10), DatasetSelection::Sample(1));
        assert_eq!(DatasetSelection::parse("10", 10), DatasetSelection::Sample(10));
        assert_eq!(DatasetSelection::parse(" 07 ", 10), DatasetSelection::Sample(7));
    }

    #[test]
    fn parse_falls_back_to_full() {
        assert_eq!(DatasetSelection::parse("full", 10), DatasetSelection::Full);
        assert_eq!(DatasetSelection::parse("FULL", 10), DatasetSelection::Full);
        assert_eq!(DatasetSelection::parse("0", 10), DatasetSelection::Full);
        assert_eq!(DatasetSelection::parse("11", 10), DatasetSelection::Full);
        assert_eq!(DatasetSelection::parse("99999", 10), DatasetSelection::Full);
        assert_eq!(DatasetSelection::parse("abc", 10), DatasetSelection::Full);
        assert_eq!(DatasetSelection::parse("", 10), DatasetSelection::Full);
    }

    #[test]
    fn labels_and_prefixes_use_two_digits() {
        let sample = DatasetSelection::Sample(3);
        assert_eq!(sample.label(), "Sample 03");
        assert_eq!(sample.file_prefix(), "sample_03");
        assert_eq!(DatasetSelection::Full.file_prefix(), "full");
    }

    #[test]
    fn custom_paths_get_sanitized_prefixes() {
        let source = DataSource::from_path(Path::new("/tmp/My Games-2024.csv"));
        assert_eq!(source.prefix, "my_games_2024");
        assert_eq!(source.label, "File My Games-2024");
    }

    #[test]
    fn selection_resolves_against_config() {
        let config = AnalyzerConfig::default();
        let source = DataSource::from_selection(DatasetSelection::Sample(2), &config);
        assert_eq!(
            source.path,
            Path::new("data/samples/steam_games_sample_02.csv")
        );
        assert_eq!(source.prefix, "sample_02");
    }
}
