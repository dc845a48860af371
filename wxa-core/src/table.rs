/// The in-memory observation table and its typed columns
use crate::error::{Result, TableError};
use chrono::NaiveDate;
use std::fmt;

/// Inferred storage type of a column
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum DType {
    /// Whole numbers with no missing cells
    Int64,
    /// Numbers, possibly with missing cells
    Float64,
    /// `true`/`false` with no missing cells
    Bool,
    /// Free text
    Object,
    /// Calendar dates (only produced by date coercion)
    DateTime,
}

impl DType {
    /// Whether descriptive statistics and correlations include this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Int64 | DType::Float64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Bool => "bool",
            DType::Object => "object",
            DType::DateTime => "datetime64",
        };
        f.write_str(name)
    }
}

/// Column values. `None` marks a missing cell.
#[derive(Debug, PartialEq, Clone)]
pub enum ColumnData {
    Int(Vec<i64>),
    Float(Vec<Option<f64>>),
    Bool(Vec<bool>),
    Text(Vec<Option<String>>),
    Date(Vec<Option<NaiveDate>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column of the observation table
#[derive(Debug, PartialEq, Clone)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Column {
            name: name.into(),
            data,
        }
    }

    pub fn dtype(&self) -> DType {
        match self.data {
            ColumnData::Int(_) => DType::Int64,
            ColumnData::Float(_) => DType::Float64,
            ColumnData::Bool(_) => DType::Bool,
            ColumnData::Text(_) => DType::Object,
            ColumnData::Date(_) => DType::DateTime,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of cells that are not missing
    pub fn non_null_count(&self) -> usize {
        match &self.data {
            ColumnData::Int(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Float(v) => v.iter().filter(|x| x.is_some()).count(),
            ColumnData::Text(v) => v.iter().filter(|x| x.is_some()).count(),
            ColumnData::Date(v) => v.iter().filter(|x| x.is_some()).count(),
        }
    }

    /// Values of a column already typed numeric at load time.
    ///
    /// Returns `None` for every other type; nothing is parsed here.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        match &self.data {
            ColumnData::Int(v) => Some(v.iter().map(|&x| Some(x as f64)).collect()),
            ColumnData::Float(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Read every cell as a number, parsing text where needed.
    ///
    /// Booleans read as 1/0. Text that does not parse, and dates, are a
    /// [`TableError::NotNumeric`] value error naming the first bad cell.
    pub fn to_f64_values(&self) -> Result<Vec<Option<f64>>> {
        match &self.data {
            ColumnData::Int(_) | ColumnData::Float(_) => Ok(self.numeric_values().unwrap_or_default()),
            ColumnData::Bool(v) => Ok(v.iter().map(|&b| Some(if b { 1.0 } else { 0.0 })).collect()),
            ColumnData::Text(v) => v
                .iter()
                .enumerate()
                .map(|(row, cell)| match cell {
                    None => Ok(None),
                    Some(s) => wxa_utils::numbers::parse_number(s)
                        .map(|x| if x.is_nan() { None } else { Some(x) })
                        .ok_or_else(|| self.not_numeric(row, s)),
                })
                .collect(),
            ColumnData::Date(v) => match v.iter().enumerate().find_map(|(row, d)| d.map(|d| (row, d))) {
                Some((row, date)) => Err(self.not_numeric(row, &date.to_string())),
                None => Ok(vec![None; v.len()]),
            },
        }
    }

    /// Render every cell as text, `None` for missing cells
    pub fn display_values(&self) -> Vec<Option<String>> {
        match &self.data {
            ColumnData::Int(v) => v.iter().map(|x| Some(x.to_string())).collect(),
            ColumnData::Float(v) => v.iter().map(|x| x.map(|x| x.to_string())).collect(),
            ColumnData::Bool(v) => v.iter().map(|x| Some(x.to_string())).collect(),
            ColumnData::Text(v) => v.clone(),
            ColumnData::Date(v) => v.iter().map(|x| x.map(|d| d.to_string())).collect(),
        }
    }

    /// Dates of a column that went through date coercion
    pub fn dates(&self) -> Option<&[Option<NaiveDate>]> {
        match &self.data {
            ColumnData::Date(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    fn not_numeric(&self, row: usize, value: &str) -> TableError {
        TableError::NotNumeric {
            column: self.name.clone(),
            row,
            value: value.to_string(),
        }
    }
}

/// The dataset: equally long named columns in header order
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ObservationTable {
    columns: Vec<Column>,
    rows: usize,
}

impl ObservationTable {
    /// Build a table, checking every column has the same length
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(TableError::RaggedColumn {
                name: bad.name.clone(),
                expected: rows,
                found: bad.len(),
            });
        }
        Ok(ObservationTable { columns, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Columns typed numeric at load time (or by numeric coercion)
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.dtype().is_numeric())
    }

    /// Overwrite the data of an existing column, keeping its position
    pub(crate) fn replace_data(&mut self, name: &str, data: ColumnData) -> Result<()> {
        if data.len() != self.rows {
            return Err(TableError::RaggedColumn {
                name: name.to_string(),
                expected: self.rows,
                found: data.len(),
            });
        }
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))?;
        column.data = data;
        Ok(())
    }
}
