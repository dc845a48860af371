//! In-place column coercions.
//!
//! Both coercions overwrite the named column and keep its position. They are
//! all-or-nothing: on the first bad cell the column is left untouched and a
//! value error is returned.

use crate::{
    error::{Result, TableError},
    table::{ColumnData, DType, ObservationTable},
};
use chrono::NaiveDate;
use log::debug;
use wxa_utils::dates::parse_date;

impl ObservationTable {
    /// Coerce a column to numbers.
    ///
    /// Numeric and bool columns are left as they are; anything else becomes
    /// `float64`. Missing cells stay missing.
    pub fn coerce_numeric(&mut self, name: &str) -> Result<()> {
        let column = self.column(name)?;
        if column.dtype().is_numeric() || column.dtype() == DType::Bool {
            return Ok(());
        }
        let values = column.to_f64_values()?;
        debug!("Coerced '{}' from {} to float64", name, column.dtype());
        self.replace_data(name, ColumnData::Float(values))
    }

    /// Coerce a column to calendar dates.
    ///
    /// Text and integers (e.g. `20140101`) are parsed with the supported
    /// layouts; see [`wxa_utils::dates::parse_date`].
    pub fn coerce_dates(&mut self, name: &str) -> Result<()> {
        let column = self.column(name)?;
        if column.dates().is_some() {
            return Ok(());
        }
        let dates = column
            .display_values()
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                None => Ok(None),
                Some(s) => parse_date(s).map(Some).ok_or_else(|| TableError::NotADate {
                    column: name.to_string(),
                    row,
                    value: s.clone(),
                }),
            })
            .collect::<Result<Vec<Option<NaiveDate>>>>()?;
        debug!("Coerced '{}' from {} to datetime64", name, column.dtype());
        self.replace_data(name, ColumnData::Date(dates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, DType};

    fn table(name: &str, values: &[&str]) -> ObservationTable {
        let cells = values
            .iter()
            .map(|s| if s.is_empty() { None } else { Some(s.to_string()) })
            .collect();
        ObservationTable::new(vec![Column::new(name, ColumnData::Text(cells))]).unwrap()
    }

    #[test]
    fn test_coerce_numeric_text() {
        let mut t = table("max_temp", &["21.5", "", "-3"]);
        t.coerce_numeric("max_temp").unwrap();
        let column = t.column("max_temp").unwrap();
        assert_eq!(column.dtype(), DType::Float64);
        assert_eq!(column.data, ColumnData::Float(vec![Some(21.5), None, Some(-3.0)]));
    }

    #[test]
    fn test_coerce_numeric_failure_leaves_column() {
        let mut t = table("max_temp", &["21.5", "N/A"]);
        let err = t.coerce_numeric("max_temp").unwrap_err();
        assert!(err.is_value_error());
        assert!(err.to_string().contains("\"N/A\""));
        assert_eq!(t.column("max_temp").unwrap().dtype(), DType::Object);
    }

    #[test]
    fn test_coerce_numeric_keeps_numeric_columns() {
        let mut t = ObservationTable::new(vec![Column::new("n", ColumnData::Int(vec![1, 2]))]).unwrap();
        t.coerce_numeric("n").unwrap();
        assert_eq!(t.column("n").unwrap().data, ColumnData::Int(vec![1, 2]));
    }

    #[test]
    fn test_coerce_numeric_keeps_bool_columns() {
        let mut t =
            ObservationTable::new(vec![Column::new("flag", ColumnData::Bool(vec![true, false]))]).unwrap();
        t.coerce_numeric("flag").unwrap();
        assert_eq!(t.column("flag").unwrap().dtype(), DType::Bool);
    }

    #[test]
    fn test_coerce_missing_column() {
        let mut t = table("max_temp", &["1"]);
        assert!(matches!(
            t.coerce_numeric("min_temp"),
            Err(TableError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_coerce_dates() {
        let mut t = table("date_str", &["2014-01-02", "", "2013-12-31"]);
        t.coerce_dates("date_str").unwrap();
        let column = t.column("date_str").unwrap();
        assert_eq!(column.dtype(), DType::DateTime);
        assert_eq!(
            column.dates().unwrap(),
            &[
                NaiveDate::from_ymd_opt(2014, 1, 2),
                None,
                NaiveDate::from_ymd_opt(2013, 12, 31)
            ]
        );
    }

    #[test]
    fn test_coerce_dates_from_integers() {
        let mut t =
            ObservationTable::new(vec![Column::new("date_str", ColumnData::Int(vec![20140102]))]).unwrap();
        t.coerce_dates("date_str").unwrap();
        assert_eq!(
            t.column("date_str").unwrap().dates().unwrap(),
            &[NaiveDate::from_ymd_opt(2014, 1, 2)]
        );
    }

    #[test]
    fn test_coerce_dates_value_error() {
        let mut t = table("date_str", &["2014-01-02", "someday"]);
        let err = t.coerce_dates("date_str").unwrap_err();
        assert!(matches!(err, TableError::NotADate { row: 1, .. }));
    }
}
