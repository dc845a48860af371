//! Core types for the weather anomaly explorer.
//!
//! An [`ObservationTable`](table::ObservationTable) is loaded once from CSV,
//! typed by inference over the raw text, and then read by every later stage.
//! Only two in-place coercions (numeric and date) ever change it.

pub mod coerce;
pub mod error;
pub mod loader;
pub mod table;
pub mod view;

pub use error::{Result, TableError};
pub use table::{Column, ColumnData, DType, ObservationTable};
pub use view::SortedView;
