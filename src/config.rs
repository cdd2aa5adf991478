//! Analyzer settings, loadable from a YAML file.
//!
//! Every field has a default matching the conventional repository layout:
//!
//! ```yaml
//! data_dir: data
//! full_dataset: dataset/steam_games.csv
//! sample_template: samples/steam_games_sample_{NN}.csv
//! sample_count: 10
//! output_dir: plots
//! genre_filter:
//!   min_year: 2015
//!   min_positive_reviews: 1000
//!   top_n: 10
//! ```
//!
//! Relative paths resolve against `data_dir`; absolute paths are used as-is.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::GenreFilter;

pub const SAMPLE_NUMBER_PLACEHOLDER: &str = "{NN}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub data_dir: PathBuf,
    pub full_dataset: PathBuf,
    pub sample_template: String,
    pub sample_count: u8,
    pub output_dir: PathBuf,
    pub genre_filter: GenreFilter,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            full_dataset: PathBuf::from("dataset/steam_games.csv"),
            sample_template: format!("samples/steam_games_sample_{SAMPLE_NUMBER_PLACEHOLDER}.csv"),
            sample_count: 10,
            output_dir: PathBuf::from("plots"),
            genre_filter: GenreFilter::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("Opening config file {path:?}"))?;
        serde_yaml::from_str(&raw).with_context(|| format!("Parsing config file {path:?}"))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = self.to_yaml()?;
        fs::write(path, serialized).with_context(|| format!("Writing config file {path:?}"))
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn full_dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.full_dataset)
    }

    /// Path of sample `number`, with `{NN}` replaced by its two-digit form.
    pub fn sample_path(&self, number: u8) -> PathBuf {
        let file = self
            .sample_template
            .replace(SAMPLE_NUMBER_PLACEHOLDER, &format!("{number:02}"));
        self.data_dir.join(file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output_dir)
    }
}
