//! Console narrative and chart files for the three analyses.
//!
//! [`ReportWriter`] owns the output directory. It is built by the caller and
//! must be initialized with [`ReportWriter::init`] before any chart is
//! written; nothing here touches the filesystem implicitly.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;

use crate::{
    analysis::{FreePaidSplit, GenreAverage, GenreFilter, YearHistogram},
    chart::{self, Bar},
    dataset::DataSource,
    table::{self, Align},
};

#[derive(Debug)]
pub struct ReportWriter {
    output_dir: PathBuf,
    bar_width: usize,
    initialized: bool,
}

#[derive(Serialize)]
struct ChartData<'a, T: Serialize> {
    title: &'a str,
    dataset: &'a str,
    source: &'a Path,
    result: &'a T,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            bar_width: chart::DEFAULT_BAR_WIDTH,
            initialized: false,
        }
    }

    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width.max(1);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory if needed.
    pub fn init(&mut self) -> Result<()> {
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Creating output directory {:?}", self.output_dir))?;
        self.initialized = true;
        debug!("Report output directory ready at {:?}", self.output_dir);
        Ok(())
    }

    pub fn write_free_vs_paid(
        &self,
        source: &DataSource,
        split: &FreePaidSplit,
    ) -> Result<Vec<PathBuf>> {
        let title = format!("Free vs. paid games - {}", source.label);
        let bars = vec![
            Bar::new("Free", split.free_percent, format!("{:.2}%", split.free_percent)),
            Bar::new("Paid", split.paid_percent, format!("{:.2}%", split.paid_percent)),
        ];
        self.write_chart(&format!("q1_{}_free_paid", source.prefix), &title, source, &bars, split)
    }

    /// Skips the chart when no record has a release year.
    pub fn write_release_years(
        &self,
        source: &DataSource,
        histogram: &YearHistogram,
    ) -> Result<Vec<PathBuf>> {
        if histogram.all_counts.is_empty() {
            info!("No release years to chart for {}", source.label);
            return Ok(Vec::new());
        }
        let title = format!("Games released per year - {}", source.label);
        let bars = histogram
            .all_counts
            .iter()
            .map(|(year, count)| {
                Bar::new(year.to_string(), *count as f64, count.to_string())
                    .highlighted(histogram.peak_years.contains(year))
            })
            .collect::<Vec<_>>();
        self.write_chart(
            &format!("q2_{}_new_games_year", source.prefix),
            &title,
            source,
            &bars,
            histogram,
        )
    }

    /// Skips the chart when no genre qualified.
    pub fn write_top_genres(
        &self,
        source: &DataSource,
        ranking: &[GenreAverage],
        filter: &GenreFilter,
    ) -> Result<Vec<PathBuf>> {
        if ranking.is_empty() {
            info!("No genre data to chart for {}", source.label);
            return Ok(Vec::new());
        }
        let title = format!(
            "Top {} genres by average recommendations (filtered) - {}",
            ranking.len(),
            source.label
        );
        let highest = highest_average(ranking);
        let bars = ranking
            .iter()
            .map(|entry| {
                Bar::new(
                    entry.genre.clone(),
                    entry.average_recommendations,
                    format!("{:.2}", entry.average_recommendations),
                )
                .highlighted(entry.average_recommendations == highest)
            })
            .collect::<Vec<_>>();
        self.write_chart(
            &format!(
                "q3_{}_top_{}_genre_recommendations",
                source.prefix, filter.top_n
            ),
            &title,
            source,
            &bars,
            &ranking,
        )
    }

    fn write_chart<T: Serialize>(
        &self,
        stem: &str,
        title: &str,
        source: &DataSource,
        bars: &[Bar],
        result: &T,
    ) -> Result<Vec<PathBuf>> {
        if !self.initialized {
            bail!("Report writer for {:?} was not initialized", self.output_dir);
        }
        let text_path = self.output_dir.join(format!("{stem}.txt"));
        fs::write(&text_path, chart::render_bar_chart(title, bars, self.bar_width))
            .with_context(|| format!("Writing chart {text_path:?}"))?;

        let json_path = self.output_dir.join(format!("{stem}.json"));
        let data = ChartData {
            title,
            dataset: &source.label,
            source: &source.path,
            result,
        };
        let serialized = serde_json::to_string_pretty(&data)?;
        fs::write(&json_path, serialized)
            .with_context(|| format!("Writing chart data {json_path:?}"))?;

        info!("Chart saved to {:?}", text_path);
        Ok(vec![text_path, json_path])
    }
}

fn highest_average(ranking: &[GenreAverage]) -> f64 {
    ranking
        .iter()
        .map(|entry| entry.average_recommendations)
        .fold(0.0_f64, f64::max)
}

fn section(output: &mut String, heading: &str) {
    let rule = "-".repeat(heading.chars().count());
    let _ = writeln!(output, "{rule}\n{heading}\n{rule}");
}

pub fn narrate_free_vs_paid(split: &FreePaidSplit) -> String {
    let mut output = String::new();
    section(&mut output, "Free vs. paid games");
    let headers = vec!["type".to_string(), "games".to_string(), "percent".to_string()];
    let rows = vec![
        vec![
            "Free".to_string(),
            split.free_count.to_string(),
            format!("{:.2}%", split.free_percent),
        ],
        vec![
            "Paid".to_string(),
            split.paid_count.to_string(),
            format!("{:.2}%", split.paid_percent),
        ],
    ];
    output.push_str(&table::render_table(
        &headers,
        &rows,
        &[Align::Left, Align::Right, Align::Right],
    ));
    if split.total() == 0 {
        let _ = writeln!(output, "\nNo priced listings were found.");
    } else {
        let _ = writeln!(
            output,
            "\nAbout {:.2}% of the listings are free (free-to-play titles, demos or temporary giveaways) \
             and {:.2}% are paid.",
            split.free_percent, split.paid_percent
        );
    }
    output
}

pub fn narrate_release_years(histogram: &YearHistogram) -> String {
    let mut output = String::new();
    section(&mut output, "Year with the most new games");
    if histogram.peak_years.is_empty() {
        let _ = writeln!(
            output,
            "The peak release year could not be determined (no parseable release dates)."
        );
        return output;
    }
    let years = histogram.peak_years.iter().join(", ");
    let _ = writeln!(
        output,
        "Peak release year(s): {years} with {} game(s) each, out of {} dated release(s) across {} year(s).",
        histogram.peak_count,
        histogram.total(),
        histogram.all_counts.len()
    );
    output
}

pub fn narrate_top_genres(ranking: &[GenreAverage], filter: &GenreFilter) -> String {
    let mut output = String::new();
    section(
        &mut output,
        &format!("Top {} genres by average recommendations", filter.top_n),
    );
    let _ = writeln!(
        output,
        "Games released in {} or later with at least {} positive reviews.\n",
        filter.min_year, filter.min_positive_reviews
    );
    if ranking.is_empty() {
        let _ = writeln!(
            output,
            "No genre met the filter criteria (too little data or filters too strict)."
        );
        return output;
    }
    let headers = vec!["genre".to_string(), "average recommendations".to_string()];
    let rows = ranking
        .iter()
        .map(|entry| {
            vec![
                entry.genre.clone(),
                format!("{:.2}", entry.average_recommendations),
            ]
        })
        .collect::<Vec<_>>();
    output.push_str(&table::render_table(
        &headers,
        &rows,
        &[Align::Left, Align::Right],
    ));

    let highest = highest_average(ranking);
    let leaders = ranking
        .iter()
        .filter(|entry| entry.average_recommendations == highest)
        .map(|entry| entry.genre.as_str())
        .join(", ");
    let _ = writeln!(
        output,
        "\n{leaders} lead(s) with an average of {highest:.2} recommendations."
    );
    output
}
