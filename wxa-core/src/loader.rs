//! CSV loading with per-column type inference.
//!
//! Every column is read as raw text first and then typed as a whole:
//!
//! - `int64` when every cell parses as an integer and none is empty,
//! - `float64` when every non-empty cell parses as a number,
//! - `bool` when every cell is `true`/`false` and none is empty,
//! - `object` otherwise.
//!
//! Only the empty cell counts as missing. Tokens like `N/A` stay text, so a
//! column holding one is not numeric.

use crate::{
    error::{Result, TableError},
    table::{Column, ColumnData, ObservationTable},
};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::Read,
    path::Path,
};
use wxa_utils::numbers::{parse_bool, parse_integer, parse_number};

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATASET: &str = "weather-anomalies.csv";

/// Load the observation table from a CSV file with a header row
pub fn load_csv(path: impl AsRef<Path>) -> Result<ObservationTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let table = from_reader(file)?;
    info!(
        "Loaded {} rows x {} columns from {}",
        table.row_count(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}

/// Parse CSV text (header row first) into an observation table
pub fn from_reader<R: Read>(reader: R) -> Result<ObservationTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = dedupe_headers(rdr.headers()?.iter());
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(TableError::EmptyHeader);
    }

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result?;
        for (cells, value) in raw.iter_mut().zip(record.iter()) {
            cells.push(value.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| {
            let column = Column::new(name, infer_column(&cells));
            debug!("Column '{}' inferred as {}", column.name, column.dtype());
            column
        })
        .collect();
    ObservationTable::new(columns)
}

/// Suffix repeated header names with `.1`, `.2`, ... in order of appearance.
///
/// A suffixed name never collides with another header, original or renamed.
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let headers: Vec<&str> = headers.collect();
    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<&str, usize> = HashMap::new();
    headers
        .iter()
        .map(|&name| {
            let unique = if taken.contains(name) {
                let suffix = next_suffix.entry(name).or_insert(1);
                loop {
                    let candidate = format!("{}.{}", name, suffix);
                    *suffix += 1;
                    if !taken.contains(&candidate) && !headers.contains(&candidate.as_str()) {
                        break candidate;
                    }
                }
            } else {
                name.to_string()
            };
            taken.insert(unique.clone());
            unique
        })
        .collect()
}

/// Pick the narrowest type that holds every cell of a raw column
pub fn infer_column(cells: &[String]) -> ColumnData {
    let has_missing = cells.iter().any(|c| c.is_empty());

    if !has_missing {
        if let Some(ints) = cells.iter().map(|c| parse_integer(c)).collect::<Option<Vec<_>>>() {
            return ColumnData::Int(ints);
        }
    }

    let floats = cells
        .iter()
        .map(|c| {
            if c.is_empty() {
                Some(None)
            } else {
                parse_number(c).map(|x| if x.is_nan() { None } else { Some(x) })
            }
        })
        .collect::<Option<Vec<_>>>();
    if let Some(floats) = floats {
        return ColumnData::Float(floats);
    }

    if !has_missing {
        if let Some(bools) = cells.iter().map(|c| parse_bool(c)).collect::<Option<Vec<_>>>() {
            return ColumnData::Bool(bools);
        }
    }

    ColumnData::Text(
        cells
            .iter()
            .map(|c| if c.is_empty() { None } else { Some(c.clone()) })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DType;
    use std::io::Write;

    const WEATHER_CSV: &str = r#"date_str,degrees_from_mean,id,latitude,longitude,max_temp,min_temp,station_name,type
2014-01-01,20.7,USW00093830,33.8,-118.3,21.1,5.0,LONG BEACH,weird_heat
2014-01-02,-18.2,USC00041912,37.1,-119.5,-3.2,-15.1,DUDLEY,weird_cold
2014-01-03,17.9,USW00023174,33.9,-118.4,23.9,,LOS ANGELES,weird_heat
"#;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_reader_shape_matches_input() {
        let table = from_reader(WEATHER_CSV.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.column_names(),
            vec![
                "date_str",
                "degrees_from_mean",
                "id",
                "latitude",
                "longitude",
                "max_temp",
                "min_temp",
                "station_name",
                "type"
            ]
        );
    }

    #[test]
    fn test_from_reader_infers_types() {
        let table = from_reader(WEATHER_CSV.as_bytes()).unwrap();
        let dtype = |name: &str| table.column(name).unwrap().dtype();
        assert_eq!(dtype("date_str"), DType::Object);
        assert_eq!(dtype("max_temp"), DType::Float64);
        assert_eq!(dtype("min_temp"), DType::Float64);
        assert_eq!(dtype("type"), DType::Object);
        assert_eq!(table.column("min_temp").unwrap().non_null_count(), 2);
    }

    #[test]
    fn test_infer_column() {
        assert_eq!(infer_column(&cells(&["1", "2"])), ColumnData::Int(vec![1, 2]));
        assert_eq!(
            infer_column(&cells(&["1", ""])),
            ColumnData::Float(vec![Some(1.0), None])
        );
        assert_eq!(
            infer_column(&cells(&["true", "FALSE"])),
            ColumnData::Bool(vec![true, false])
        );
        assert_eq!(
            infer_column(&cells(&["12.5", "N/A"])),
            ColumnData::Text(vec![Some("12.5".to_string()), Some("N/A".to_string())])
        );
        assert_eq!(infer_column(&cells(&["", ""])), ColumnData::Float(vec![None, None]));
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let table = from_reader("a,b,a,a\n1,2,3,4\n".as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b", "a.1", "a.2"]);
    }

    #[test]
    fn test_suffixed_headers_skip_existing_names() {
        let table = from_reader("a,a.1,a\n1,2,3\n".as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.1", "a.2"]);

        let table = from_reader("a,a,a.1\n1,2,3\n".as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.2", "a.1"]);
        assert_eq!(table.column("a.1").unwrap().data, ColumnData::Int(vec![3]));
    }

    #[test]
    fn test_ragged_rows_fail_to_parse() {
        let result = from_reader("a,b\n1,2\n3\n".as_bytes());
        assert!(matches!(result, Err(TableError::CsvParse(_))));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert!(matches!(from_reader("".as_bytes()), Err(TableError::EmptyHeader)));
    }

    #[test]
    fn test_load_csv_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(WEATHER_CSV.as_bytes()).unwrap();
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = load_csv("definitely/not/here.csv");
        assert!(matches!(result, Err(TableError::Io { .. })));
    }
}
