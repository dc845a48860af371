//! Stages and orchestration for the weather anomaly explorer.
//!
//! A run loads the dataset, prints its summary, runs the guarded plot
//! pipeline and finally draws the weather type pie chart.

use clap::Args;
use log::info;
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use wxa_charts::{Renderer, SvgRenderer};
use wxa_core::loader::DEFAULT_DATASET;

pub mod pipeline;
pub mod plots;
pub mod stages;

pub use pipeline::{PipelineOutcome, PlotStep, StepError};

/// Directory figures are written to unless told otherwise
pub const DEFAULT_OUTPUT_DIR: &str = "figures";

#[derive(Args, Debug, Clone, PartialEq)]
pub struct Options {
    /// Weather anomaly CSV file to explore
    #[arg(short = 'i', long, default_value = DEFAULT_DATASET)]
    pub input: PathBuf,

    /// Directory the SVG figures are written to (created if missing)
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            input: PathBuf::from(DEFAULT_DATASET),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// What a whole run did
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub rows: usize,
    pub columns: usize,
    pub outcome: PipelineOutcome,
    /// Pipeline figures plus the pie chart
    pub figures_rendered: usize,
}

/// Run every stage, writing figures as SVG files and reports to stdout
pub fn run(options: &Options) -> anyhow::Result<RunReport> {
    let mut renderer = SvgRenderer::new(&options.output_dir)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(&options.input, &mut renderer, &mut out)
}

/// Run every stage against an explicit renderer and console
pub fn run_with(
    input: &Path,
    renderer: &mut dyn Renderer,
    out: &mut dyn Write,
) -> anyhow::Result<RunReport> {
    let mut table = stages::load_table(input)?;
    stages::summarize(&table, out)?;
    let outcome = stages::run_guarded_pipeline(&mut table, renderer, out)?;
    stages::create_pie_chart(&table, &outcome, renderer, out)?;

    let report = RunReport {
        rows: table.row_count(),
        columns: table.column_count(),
        figures_rendered: outcome.figures_rendered + 1,
        outcome,
    };
    info!(
        "Run finished: {} figures, pipeline {}",
        report.figures_rendered,
        if report.outcome.succeeded() { "succeeded" } else { "failed" }
    );
    Ok(report)
}
