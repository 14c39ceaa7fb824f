// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the filmviz charts for a JSON film list.
//!
//! ```bash
//! filmviz_demo data/films.json --out target/charts -v
//! ```
//!
//! Writes one SVG per chart. The bar chart is written twice: as built, and with the pointer
//! hovering its first bar so the tooltip and highlight are visible.

mod svg;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use filmviz_charts::{
    BarChartSpec, ChartConfig, ChartError, ChartScene, HeuristicTextMeasurer,
    HistogramChartSpec, ScatterChartSpec,
};
use filmviz_core::{CategoryField, DataError, Field, Mark, Record};
use filmviz_stats::{
    average_classic_rating, histogram_bins, median, most_reviewed, most_viewed,
    partition_by_rated_status, summarize,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Render filmviz charts to SVG.
#[derive(Parser)]
#[command(name = "filmviz_demo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON array of film records
    #[arg(default_value = "filmviz_demo/data/films.json")]
    input: PathBuf,

    /// Directory the SVG files are written to
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Field binned by the histogram
    #[arg(long, default_value = "runtime")]
    histogram_field: Field,

    /// Log aggregation and chart details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid film list: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn load(path: &Path) -> Result<Vec<Record>, DemoError> {
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn log_statistics(records: &[Record]) -> Result<(), DemoError> {
    let ratings = summarize(records, Field::Rating)?;
    tracing::info!(
        films = records.len(),
        rated = ratings.count,
        average = ratings.average_value,
        lowest = ratings.min_record.title.as_deref().unwrap_or(&ratings.min_record.id),
        highest = ratings.max_record.title.as_deref().unwrap_or(&ratings.max_record.id),
        "ratings"
    );
    match average_classic_rating(records) {
        Ok(v) => tracing::info!(average = v, "classic ratings"),
        Err(e) => tracing::warn!(error = %e, "classic ratings"),
    }
    match median(records, Field::Runtime) {
        Ok(v) => tracing::info!(median = v, "runtime"),
        Err(e) => tracing::warn!(error = %e, "runtime"),
    }

    let split = partition_by_rated_status(records);
    tracing::info!(
        rated = split.rated.count,
        unrated = split.unrated.count,
        unrated_average_watches = ?split.unrated.average_watch_count,
        "rated status"
    );
    for (label, top) in [
        ("most viewed", most_viewed(records)),
        ("most reviewed", most_reviewed(records)),
    ] {
        let titles: Vec<&str> = top
            .iter()
            .map(|r| r.title.as_deref().unwrap_or(&r.id))
            .collect();
        tracing::info!(?titles, "{label}");
    }
    Ok(())
}

fn write_svg(dir: &Path, name: &str, marks: &[Mark], scene: &ChartScene) -> Result<(), DemoError> {
    let path = dir.join(name);
    let text = svg::to_svg_string(marks, scene.layout().view);
    std::fs::write(&path, text).map_err(|source| DemoError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote chart");
    Ok(())
}

fn run(cli: &Cli) -> Result<(), DemoError> {
    let records = load(&cli.input)?;
    log_statistics(&records)?;
    std::fs::create_dir_all(&cli.out).map_err(|source| DemoError::Io {
        path: cli.out.clone(),
        source,
    })?;

    let bins = histogram_bins(&records, cli.histogram_field)?;
    for bin in &bins {
        tracing::debug!(label = %bin.label, count = bin.count, "bin");
    }

    let top = most_viewed(&records);
    let bar = BarChartSpec::new(CategoryField::Title, Field::WatchCount)
        .with_config(
            ChartConfig::default()
                .with_chart_title("Most watched")
                .with_axis_title("Film"),
        )
        .build(&top)?;
    // Each chart starts where the previous one's ids end.
    let histogram = HistogramChartSpec::new(cli.histogram_field)
        .with_config(ChartConfig::default().with_id_base(bar.id_range().end))
        .build(&records)?;
    let scatter = ScatterChartSpec::new(Field::Rating, Field::WatchCount)
        .with_config(ChartConfig::default().with_id_base(histogram.id_range().end))
        .build(&records)?;

    write_svg(&cli.out, "most_watched.svg", bar.marks(), &bar)?;
    write_svg(&cli.out, "histogram.svg", histogram.marks(), &histogram)?;
    write_svg(&cli.out, "rating_vs_watches.svg", scatter.marks(), &scatter)?;

    // Hover the tallest bar.
    let target = bar
        .marks()
        .iter()
        .filter(|m| bar.binding(m.id).is_some())
        .filter_map(Mark::bounds)
        .min_by(|a, b| a.x0.total_cmp(&b.x0));
    let mut chart = bar.bind();
    if let Some(bounds) = target {
        chart.pointer_at(bounds.center());
    }
    let hovered = chart.marks(&HeuristicTextMeasurer);
    write_svg(&cli.out, "most_watched_hover.svg", &hovered, chart.scene())?;
    chart.dispose();

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
