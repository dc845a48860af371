//! The named stages of a run.

use crate::{
    pipeline::{present, run_steps, PipelineOutcome, PlotStep},
    plots,
};
use anyhow::Context;
use log::info;
use std::{io::Write, path::Path};
use wxa_charts::Renderer;
use wxa_core::{loader::load_csv, ObservationTable};
use wxa_data::{describe::describe, manifest::manifest};

pub const MAX_TEMP_HINT: &str = "Please check the 'max_temp' column for non-numeric values.";
pub const PIE_NOTE: &str = "Note: The pie chart was created despite the exception.";

pub fn load_table(path: &Path) -> anyhow::Result<ObservationTable> {
    info!("Loading dataset {}", path.display());
    load_csv(path).with_context(|| format!("Failed to load dataset {}", path.display()))
}

/// Print descriptive statistics and the column manifest
pub fn summarize(table: &ObservationTable, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "Summary Statistics:")?;
    writeln!(out, "{}", describe(table))?;
    writeln!(out, "Info:")?;
    writeln!(out, "{}", manifest(table))?;
    Ok(())
}

/// Coerce `max_temp` and draw the five pipeline figures.
///
/// A value error ends the block early; it is printed with a hint and kept
/// in the outcome.
pub fn run_guarded_pipeline(
    table: &mut ObservationTable,
    renderer: &mut dyn Renderer,
    out: &mut dyn Write,
) -> anyhow::Result<PipelineOutcome> {
    let outcome = run_steps(&PlotStep::SEQUENCE, table, renderer, out)?;
    if let Some(error) = &outcome.error {
        writeln!(out, "Error: {}", error)?;
        writeln!(out, "{}", MAX_TEMP_HINT)?;
    }
    Ok(outcome)
}

/// Draw the weather type pie, whatever happened before
pub fn create_pie_chart(
    table: &ObservationTable,
    outcome: &PipelineOutcome,
    renderer: &mut dyn Renderer,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let figure = plots::weather_type_pie(table).context("Failed to build the weather type pie")?;
    present(&figure, renderer, out)?;
    if !outcome.succeeded() {
        writeln!(out, "{}", PIE_NOTE)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxa_charts::MemoryRenderer;
    use wxa_core::loader::from_reader;

    #[test]
    fn test_summarize_prints_both_reports() {
        let table = from_reader("max_temp,type\n1.0,rain\n3.0,snow\n".as_bytes()).unwrap();
        let mut out = Vec::new();
        summarize(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let stats = text.find("Summary Statistics:").unwrap();
        let info = text.find("Info:").unwrap();
        assert!(stats < info);
        assert!(text.contains("2 rows, 2 columns"));
        assert!(text.contains("mean"));
    }

    #[test]
    fn test_guarded_pipeline_prints_hint() {
        let mut table = from_reader("max_temp,type\nwarm,rain\n".as_bytes()).unwrap();
        let mut out = Vec::new();
        let outcome =
            run_guarded_pipeline(&mut table, &mut MemoryRenderer::new(), &mut out).unwrap();
        assert!(!outcome.succeeded());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error: Unable to parse string \"warm\""));
        assert!(text.contains(MAX_TEMP_HINT));
    }

    #[test]
    fn test_pie_note_only_after_failure() {
        let table = from_reader("type\nrain\nrain\nsnow\n".as_bytes()).unwrap();
        let mut renderer = MemoryRenderer::new();

        let mut out = Vec::new();
        create_pie_chart(&table, &PipelineOutcome::default(), &mut renderer, &mut out).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains(PIE_NOTE));

        let failed = PipelineOutcome {
            error: Some("bad value".to_string()),
            ..PipelineOutcome::default()
        };
        let mut out = Vec::new();
        create_pie_chart(&table, &failed, &mut renderer, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains(PIE_NOTE));
        assert_eq!(renderer.figures().len(), 2);
    }

    #[test]
    fn test_pie_without_type_column_fails() {
        let table = from_reader("max_temp\n1.0\n".as_bytes()).unwrap();
        let result = create_pie_chart(
            &table,
            &PipelineOutcome::default(),
            &mut MemoryRenderer::new(),
            &mut Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_table(Path::new("does-not-exist.csv")).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.csv"));
    }
}
