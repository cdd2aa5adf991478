use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Analyze Steam storefront listings: pricing, release years and genre recommendations",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run all analyses on a dataset, print the narrative and write chart files
    Analyze(AnalyzeArgs),
    /// Show the first normalized records of a dataset in a formatted table
    Preview(PreviewArgs),
    /// Print the number of releases per year, marking the peak year(s)
    Years(YearsArgs),
    /// Print the effective configuration as YAML, optionally saving it
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Dataset to analyze: a sample number (1-10 by default) or `full`
    #[arg(short = 's', long = "sample", alias = "s", default_value = "full")]
    pub sample: String,
    /// Analyze this CSV file instead of a bundled dataset
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// YAML configuration file with paths and genre filter defaults
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Root directory containing the dataset and samples
    #[arg(long = "data-dir")]
    pub data_dir: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Directory for chart files (relative paths resolve against the data dir)
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,
    /// Only games released in this year or later count toward genre averages
    #[arg(long = "min-year")]
    pub min_year: Option<i64>,
    /// Minimum positive reviews for a game to count toward genre averages
    #[arg(long = "min-positive-reviews")]
    pub min_positive_reviews: Option<i64>,
    /// Number of genres kept in the ranking
    #[arg(long = "top")]
    pub top: Option<usize>,
    /// Print the narrative only; do not write chart files
    #[arg(long = "no-report")]
    pub no_report: bool,
    /// Also print the full summary as JSON
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Number of records to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Restrict the table to these canonical field keys
    #[arg(short = 'C', long = "columns", value_delimiter = ',')]
    pub columns: Vec<String>,
}

#[derive(Debug, Args)]
pub struct YearsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Configuration file to start from
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Write the effective configuration to this path
    #[arg(short = 'w', long = "write")]
    pub write: Option<PathBuf>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
