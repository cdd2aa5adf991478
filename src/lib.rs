pub mod analysis;
pub mod chart;
pub mod cli;
pub mod config;
pub mod data;
pub mod dataset;
pub mod error;
pub mod io_utils;
pub mod loader;
pub mod record;
pub mod report;
pub mod table;
pub mod tally;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    analysis::{AnalysisSummary, GenreFilter},
    cli::{Cli, Commands, SourceArgs},
    config::AnalyzerConfig,
    dataset::{DataSource, DatasetSelection},
    loader::LoadOptions,
    record::Dataset,
    report::ReportWriter,
    table::Align,
};

pub use crate::error::LoadError;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("steam_insights", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => handle_analyze(&args),
        Commands::Preview(args) => handle_preview(&args),
        Commands::Years(args) => handle_years(&args),
        Commands::Config(args) => handle_config(&args),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => {
            AnalyzerConfig::load(path).with_context(|| format!("Loading configuration from {path:?}"))
        }
        None => Ok(AnalyzerConfig::default()),
    }
}

fn resolve_source(args: &SourceArgs) -> Result<(AnalyzerConfig, DataSource)> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    let source = match &args.input {
        Some(path) => DataSource::from_path(path),
        None => {
            let selection = DatasetSelection::parse(&args.sample, config.sample_count);
            DataSource::from_selection(selection, &config)
        }
    };
    Ok((config, source))
}

fn load_source(args: &SourceArgs, source: &DataSource) -> Result<Dataset> {
    let options = LoadOptions {
        delimiter: args.delimiter,
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
    };
    info!("Loading data from {:?}", source.path);
    loader::load_dataset(&source.path, &options).with_context(|| match args.input {
        Some(_) => format!("Analysis of {} aborted", source.label),
        None => format!(
            "Analysis of {} aborted; check the data directory or pass --input",
            source.label
        ),
    })
}

fn handle_analyze(args: &cli::AnalyzeArgs) -> Result<()> {
    let (mut config, source) = resolve_source(&args.source)?;
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    let filter = GenreFilter {
        min_year: args.min_year.unwrap_or(config.genre_filter.min_year),
        min_positive_reviews: args
            .min_positive_reviews
            .unwrap_or(config.genre_filter.min_positive_reviews),
        top_n: args.top.unwrap_or(config.genre_filter.top_n),
    };
    debug!("Genre filter: {:?}", filter);

    println!("\n--- Running analysis for: {} ---", source.label);
    let dataset = load_source(&args.source, &source)?;
    println!("Loaded {} game(s).\n", dataset.len());

    let summary = AnalysisSummary::compute(dataset.records(), &filter);
    println!("{}", report::narrate_free_vs_paid(&summary.free_vs_paid));
    println!("{}", report::narrate_release_years(&summary.release_years));
    println!("{}", report::narrate_top_genres(&summary.top_genres, &filter));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    if args.no_report {
        return Ok(());
    }
    let mut writer = ReportWriter::new(config.output_path());
    writer.init()?;
    let mut written = Vec::new();
    written.extend(writer.write_free_vs_paid(&source, &summary.free_vs_paid)?);
    written.extend(writer.write_release_years(&source, &summary.release_years)?);
    written.extend(writer.write_top_genres(&source, &summary.top_genres, &filter)?);
    info!(
        "Wrote {} chart file(s) to {:?}",
        written.len(),
        writer.output_dir()
    );
    Ok(())
}

fn handle_preview(args: &cli::PreviewArgs) -> Result<()> {
    let (_, source) = resolve_source(&args.source)?;
    let dataset = load_source(&args.source, &source)?;
    let requested = args
        .columns
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(data::normalize_column_name)
        .collect::<Vec<_>>();
    let headers = if requested.is_empty() {
        dataset.field_keys()
    } else {
        if let Some(missing) = requested.iter().find(|key| !dataset.layout.contains(key)) {
            anyhow::bail!("Field '{missing}' not found in {:?}", source.path);
        }
        requested
    };
    let rows = dataset
        .records()
        .iter()
        .take(args.rows)
        .map(|record| {
            headers
                .iter()
                .map(|key| record.get(key).map(data::Value::as_display).unwrap_or_default())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows, &[]);
    info!("Displayed {} record(s) from {:?}", rows.len(), source.path);
    Ok(())
}

fn handle_years(args: &cli::YearsArgs) -> Result<()> {
    let (_, source) = resolve_source(&args.source)?;
    let dataset = load_source(&args.source, &source)?;
    let histogram = analysis::year_histogram(dataset.records());
    let headers = vec!["year".to_string(), "games".to_string(), "peak".to_string()];
    let rows = histogram
        .all_counts
        .iter()
        .map(|(year, count)| {
            let peak = if histogram.peak_years.contains(year) { "*" } else { "" };
            vec![year.to_string(), count.to_string(), peak.to_string()]
        })
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows, &[Align::Right, Align::Right, Align::Left]);
    info!(
        "Counted {} dated release(s) across {} year(s)",
        histogram.total(),
        histogram.all_counts.len()
    );
    Ok(())
}

fn handle_config(args: &cli::ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_yaml()?);
    if let Some(path) = &args.write {
        config.save(path)?;
        info!("Configuration written to {:?}", path);
    }
    Ok(())
}
