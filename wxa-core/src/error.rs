/// Error types for the observation table
use thiserror::Error;

/// Main error type for table operations
#[derive(Error, Debug)]
pub enum TableError {
    /// The input file could not be opened
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// The header row is missing or empty
    #[error("CSV input has no header row")]
    EmptyHeader,

    /// Columns passed to the table differ in length
    #[error("Column '{name}' has {found} rows, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Column not found in the table
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A cell could not be read as a number
    #[error("Unable to parse string \"{value}\" as a number in column '{column}' at row {row}")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// A cell could not be read as a calendar date
    #[error("Unable to parse string \"{value}\" as a date in column '{column}' at row {row}")]
    NotADate {
        column: String,
        row: usize,
        value: String,
    },
}

impl TableError {
    /// Whether this is a value error, i.e. bad cell content rather than a
    /// structural or I/O problem.
    pub fn is_value_error(&self) -> bool {
        matches!(self, TableError::NotNumeric { .. } | TableError::NotADate { .. })
    }
}

/// Type alias for Results using TableError
pub type Result<T> = std::result::Result<T, TableError>;
