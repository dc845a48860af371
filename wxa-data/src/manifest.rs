//! The column manifest: name, non-null count and inferred type per column.

use std::{collections::BTreeMap, fmt};
use wxa_core::{DType, ObservationTable};

/// One column of the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub position: usize,
    pub name: String,
    pub non_null: usize,
    pub dtype: DType,
}

/// Column metadata for a whole table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnManifest {
    pub rows: usize,
    pub entries: Vec<ManifestEntry>,
}

impl ColumnManifest {
    /// How many columns have each type
    pub fn dtype_counts(&self) -> BTreeMap<DType, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.dtype).or_insert(0) += 1;
        }
        counts
    }
}

/// Build the manifest of a table
pub fn manifest(table: &ObservationTable) -> ColumnManifest {
    ColumnManifest {
        rows: table.row_count(),
        entries: table
            .columns()
            .iter()
            .enumerate()
            .map(|(position, column)| ManifestEntry {
                position,
                name: column.name.clone(),
                non_null: column.non_null_count(),
                dtype: column.dtype(),
            })
            .collect(),
    }
}

impl fmt::Display for ColumnManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Observation table: {} rows, {} columns",
            self.rows,
            self.entries.len()
        )?;

        let name_width = self
            .entries
            .iter()
            .map(|e| e.name.len())
            .chain(std::iter::once("Column".len()))
            .max()
            .unwrap_or(0);
        let counts: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{} non-null", e.non_null))
            .collect();
        let count_width = counts
            .iter()
            .map(String::len)
            .chain(std::iter::once("Non-Null Count".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            " {:>3}  {:<name_width$}  {:<count_width$}  Dtype",
            "#", "Column", "Non-Null Count"
        )?;
        writeln!(
            f,
            " {:>3}  {:<name_width$}  {:<count_width$}  -----",
            "---", "------", "--------------"
        )?;
        for (entry, count) in self.entries.iter().zip(&counts) {
            writeln!(
                f,
                " {:>3}  {:<name_width$}  {:<count_width$}  {}",
                entry.position, entry.name, count, entry.dtype
            )?;
        }

        let tally: Vec<String> = self
            .dtype_counts()
            .iter()
            .map(|(dtype, n)| format!("{}({})", dtype, n))
            .collect();
        writeln!(f, "dtypes: {}", tally.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxa_core::{Column, ColumnData};

    fn table() -> ObservationTable {
        ObservationTable::new(vec![
            Column::new(
                "date_str",
                ColumnData::Text(vec![Some("2014-01-01".into()), None]),
            ),
            Column::new("max_temp", ColumnData::Float(vec![Some(1.0), Some(2.0)])),
            Column::new("min_temp", ColumnData::Float(vec![None, Some(2.0)])),
        ])
        .unwrap()
    }

    #[test]
    fn test_manifest_entries() {
        let m = manifest(&table());
        assert_eq!(m.rows, 2);
        assert_eq!(
            m.entries[0],
            ManifestEntry {
                position: 0,
                name: "date_str".to_string(),
                non_null: 1,
                dtype: DType::Object,
            }
        );
        assert_eq!(m.entries[1].non_null, 2);
        assert_eq!(m.dtype_counts().get(&DType::Float64), Some(&2));
    }

    #[test]
    fn test_manifest_display() {
        let text = manifest(&table()).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Observation table: 2 rows, 3 columns");
        assert!(lines[1].contains("Non-Null Count"));
        assert!(lines[3].contains("date_str"));
        assert!(lines[3].contains("1 non-null"));
        assert!(lines[3].ends_with("object"));
        assert_eq!(lines.last(), Some(&"dtypes: float64(2), object(1)"));
    }
}
