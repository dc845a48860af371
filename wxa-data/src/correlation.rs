//! Pairwise Pearson correlation over the numeric columns of a table.

use log::debug;
use wxa_core::ObservationTable;

/// Square matrix of correlation coefficients, labelled by column name.
///
/// Row `i` and column `i` both refer to `labels[i]`. An entry is NaN when
/// the pair has fewer than two complete observations or either side has no
/// variance over them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of numeric columns of the table
    pub fn from_table(table: &ObservationTable) -> Self {
        let columns: Vec<(String, Vec<Option<f64>>)> = table
            .numeric_columns()
            .filter_map(|c| c.numeric_values().map(|v| (c.name.clone(), v)))
            .collect();
        debug!("Correlating {} numeric columns", columns.len());
        Self::from_columns(&columns)
    }

    /// Correlate named value columns of equal length
    pub fn from_columns(columns: &[(String, Vec<Option<f64>>)]) -> Self {
        let values = columns
            .iter()
            .enumerate()
            .map(|(i, (_, xs))| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(j, (_, ys))| {
                        if i == j {
                            self_correlation(xs)
                        } else {
                            pearson(xs, ys)
                        }
                    })
                    .collect()
            })
            .collect();
        CorrelationMatrix {
            labels: columns.iter().map(|(name, _)| name.clone()).collect(),
            values,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn is_square(&self) -> bool {
        self.values.iter().all(|row| row.len() == self.values.len())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        let n = self.size();
        let values = (0..n)
            .map(|i| (0..n).map(|j| self.values[j][i]).collect())
            .collect();
        CorrelationMatrix {
            labels: self.labels.clone(),
            values,
        }
    }

    /// Entry-wise comparison where NaN equals NaN
    pub fn same_values(&self, other: &Self) -> bool {
        self.labels == other.labels
            && self.values.len() == other.values.len()
            && self.values.iter().zip(&other.values).all(|(a, b)| {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
            })
    }
}

/// 1.0 when the column varies, NaN otherwise
fn self_correlation(xs: &[Option<f64>]) -> f64 {
    let present: Vec<f64> = xs.iter().flatten().copied().collect();
    if present.len() < 2 {
        return f64::NAN;
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    if present.iter().any(|v| *v != mean) {
        1.0
    } else {
        f64::NAN
    }
}

/// Pearson correlation over the rows where both values are present
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}
