/// Row-order views over an observation table
use crate::{
    error::{Result, TableError},
    table::ObservationTable,
};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// A permutation of table rows, ordered ascending by a date column.
///
/// The table itself is never reordered. Rows with a missing date come last
/// and rows with equal dates keep their relative order.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SortedView {
    rows: Vec<usize>,
}

impl SortedView {
    /// Sort all rows of `table` by the date column `name`.
    ///
    /// The column must already hold dates (see
    /// [`ObservationTable::coerce_dates`]).
    pub fn by_date(table: &ObservationTable, name: &str) -> Result<Self> {
        let identity = SortedView {
            rows: (0..table.row_count()).collect(),
        };
        identity.sorted_by_date(table, name)
    }

    /// Re-sort this view's rows by the date column `name`
    pub fn sorted_by_date(&self, table: &ObservationTable, name: &str) -> Result<Self> {
        let column = table.column(name)?;
        let dates = column.dates().ok_or_else(|| TableError::NotADate {
            column: name.to_string(),
            row: 0,
            value: column.dtype().to_string(),
        })?;
        let mut rows = self.rows.clone();
        rows.sort_by(|&a, &b| compare_dates(dates[a], dates[b]));
        Ok(SortedView { rows })
    }

    /// Row indices of the underlying table, in view order
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reorder a column's values into view order
    pub fn gather<T: Clone>(&self, values: &[T]) -> Vec<T> {
        self.rows.iter().map(|&i| values[i].clone()).collect()
    }
}

fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
