//! The guarded plot pipeline.
//!
//! Steps run in order against one table. The first value error stops the
//! run and is recorded in the returned [`PipelineOutcome`]; any other error
//! is returned to the caller.

use crate::plots;
use anyhow::Context;
use log::{info, warn};
use std::{fmt, io::Write};
use thiserror::Error;
use wxa_charts::{Figure, Renderer};
use wxa_core::{ObservationTable, SortedView, TableError};

/// One step of the guarded block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotStep {
    CoerceMaxTemp,
    MaxTempHistogram,
    MaxMinScatter,
    AnomalyTimeSeries,
    GeoScatter,
    CorrelationHeatmap,
}

impl PlotStep {
    /// Every step, in run order
    pub const SEQUENCE: [PlotStep; 6] = [
        PlotStep::CoerceMaxTemp,
        PlotStep::MaxTempHistogram,
        PlotStep::MaxMinScatter,
        PlotStep::AnomalyTimeSeries,
        PlotStep::GeoScatter,
        PlotStep::CorrelationHeatmap,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlotStep::CoerceMaxTemp => "coerce max_temp",
            PlotStep::MaxTempHistogram => "max_temp histogram",
            PlotStep::MaxMinScatter => "max/min scatter",
            PlotStep::AnomalyTimeSeries => "degrees from mean time series",
            PlotStep::GeoScatter => "geo scatter",
            PlotStep::CorrelationHeatmap => "correlation heatmap",
        }
    }

    /// Run the step, returning the figure it produces, if any
    pub fn run(self, table: &mut ObservationTable) -> Result<Option<Figure>, StepError> {
        let figure = match self {
            PlotStep::CoerceMaxTemp => {
                table.coerce_numeric(plots::MAX_TEMP)?;
                return Ok(None);
            }
            PlotStep::MaxTempHistogram => plots::max_temp_histogram(table)?,
            PlotStep::MaxMinScatter => plots::max_min_scatter(table)?,
            PlotStep::AnomalyTimeSeries => {
                table.coerce_dates(plots::DATE)?;
                let view = SortedView::by_date(table, plots::DATE)?;
                plots::anomaly_time_series(table, &view)?
            }
            PlotStep::GeoScatter => plots::geo_scatter(table)?,
            PlotStep::CorrelationHeatmap => plots::correlation_heatmap(table),
        };
        Ok(Some(figure))
    }
}

impl fmt::Display for PlotStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a step stopped
#[derive(Error, Debug)]
pub enum StepError {
    /// Bad cell content; the guard recovers from these
    #[error(transparent)]
    Value(TableError),

    /// Anything else ends the run
    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

impl From<TableError> for StepError {
    fn from(err: TableError) -> Self {
        if err.is_value_error() {
            StepError::Value(err)
        } else {
            StepError::Fatal(err.into())
        }
    }
}

/// What the guarded block did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutcome {
    /// Steps that finished, in order
    pub completed: Vec<PlotStep>,
    pub figures_rendered: usize,
    pub failed_step: Option<PlotStep>,
    /// Message of the value error that stopped the block
    pub error: Option<String>,
}

impl PipelineOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Render a figure and report where it went
pub fn present(
    figure: &Figure,
    renderer: &mut dyn Renderer,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let location = renderer
        .render(figure)
        .with_context(|| format!("Failed to render '{}'", figure.title))?;
    writeln!(out, "Rendered figure: {}", location)?;
    Ok(())
}

/// Run `steps` in order, halting on the first value error.
///
/// Each figure is rendered as soon as its step produces it, so figures from
/// steps before a failure stay rendered.
pub fn run_steps(
    steps: &[PlotStep],
    table: &mut ObservationTable,
    renderer: &mut dyn Renderer,
    out: &mut dyn Write,
) -> anyhow::Result<PipelineOutcome> {
    let mut outcome = PipelineOutcome::default();
    for &step in steps {
        info!("Running step: {}", step);
        match step.run(table) {
            Ok(figure) => {
                if let Some(figure) = figure {
                    present(&figure, renderer, out)?;
                    outcome.figures_rendered += 1;
                }
                outcome.completed.push(step);
            }
            Err(StepError::Value(err)) => {
                warn!("Step '{}' failed: {}", step, err);
                outcome.failed_step = Some(step);
                outcome.error = Some(err.to_string());
                break;
            }
            Err(StepError::Fatal(err)) => {
                return Err(err.context(format!("Step '{}' failed", step)));
            }
        }
    }
    Ok(outcome)
}
