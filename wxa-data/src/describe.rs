//! Descriptive statistics for numeric columns.
//!
//! Only columns typed `int64`/`float64` at load time are described; other
//! columns are skipped without notice. Missing cells are excluded from every
//! statistic.

use std::fmt;
use wxa_core::ObservationTable;

/// Row labels of the statistics report, in print order
pub const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Statistics of one numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); NaN below two values
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Describe a column's values, ignoring missing and NaN cells
    pub fn from_values(name: impl Into<String>, values: &[Option<f64>]) -> Self {
        let mut sorted: Vec<f64> = values.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = if count == 0 {
            f64::NAN
        } else {
            sorted.iter().sum::<f64>() / count as f64
        };
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };

        ColumnStats {
            name: name.into(),
            count,
            mean,
            std,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Values in [`STAT_LABELS`] order
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Quantile of already sorted values by linear interpolation between the
/// closest ranks. NaN when there are no values.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// The statistics report: one entry per numeric column, in table order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub columns: Vec<ColumnStats>,
}

#[cfg(test)]
impl Summary {
    fn get(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Describe every numeric column of the table
pub fn describe(table: &ObservationTable) -> Summary {
    let columns = table
        .numeric_columns()
        .filter_map(|column| {
            column
                .numeric_values()
                .map(|values| ColumnStats::from_values(column.name.clone(), &values))
        })
        .collect();
    Summary { columns }
}

fn format_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", v)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "(no numeric columns)");
        }

        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| c.values().iter().map(|&v| format_stat(v)).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(c, values)| {
                values
                    .iter()
                    .map(String::len)
                    .chain(std::iter::once(c.name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let label_width = STAT_LABELS.iter().map(|l| l.len()).max().unwrap_or(0);

        write!(f, "{:label_width$}", "")?;
        for (c, &width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", c.name)?;
        }
        writeln!(f)?;

        for (row, label) in STAT_LABELS.iter().enumerate() {
            write!(f, "{:<label_width$}", label)?;
            for (values, &width) in cells.iter().zip(&widths) {
                write!(f, "  {:>width$}", values[row])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
