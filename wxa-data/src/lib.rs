//! Statistics over observation tables.
//!
//! This crate turns a loaded table into the numbers the reports and charts
//! need: descriptive statistics, the column manifest, the correlation matrix,
//! value distributions and histogram bins.

pub mod correlation;
pub mod describe;
pub mod manifest;

/// Frequency distribution of the distinct values of a column.
pub mod distribution {
    use std::collections::HashMap;
    use wxa_core::Column;

    /// Distinct values with their counts, most frequent first.
    ///
    /// Values with equal counts keep the order they first appear in.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Distribution {
        entries: Vec<(String, usize)>,
    }

    impl Distribution {
        pub fn entries(&self) -> &[(String, usize)] {
            &self.entries
        }

        /// Number of non-missing values counted
        pub fn total(&self) -> usize {
            self.entries.iter().map(|(_, n)| n).sum()
        }

        pub fn count(&self, value: &str) -> Option<usize> {
            self.entries
                .iter()
                .find(|(label, _)| label == value)
                .map(|(_, n)| *n)
        }

        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }

        /// Share of each entry in percent, in entry order
        pub fn percentages(&self) -> Vec<f64> {
            let total = self.total();
            if total == 0 {
                return Vec::new();
            }
            self.entries
                .iter()
                .map(|(_, n)| *n as f64 * 100.0 / total as f64)
                .collect()
        }
    }

    /// Count the distinct non-missing values of a column
    pub fn value_counts(column: &Column) -> Distribution {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();
        for value in column.display_values().into_iter().flatten() {
            match index.get(&value) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(value.clone(), entries.len());
                    entries.push((value, 1));
                }
            }
        }
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Distribution { entries }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use wxa_core::ColumnData;

        fn type_column(values: &[Option<&str>]) -> Column {
            Column::new(
                "type",
                ColumnData::Text(values.iter().map(|v| v.map(String::from)).collect()),
            )
        }

        #[test]
        fn test_value_counts() {
            let column = type_column(&[Some("rain"), Some("rain"), Some("snow")]);
            let distribution = value_counts(&column);
            assert_eq!(
                distribution.entries(),
                &[("rain".to_string(), 2), ("snow".to_string(), 1)]
            );
            assert_eq!(distribution.count("rain"), Some(2));
            assert_eq!(distribution.count("hail"), None);
            let total: f64 = distribution.percentages().iter().sum();
            assert!((total - 100.0).abs() < 1e-9);
        }

        #[test]
        fn test_value_counts_ties_and_missing() {
            let column = type_column(&[Some("snow"), None, Some("rain"), Some("hail"), Some("rain")]);
            let distribution = value_counts(&column);
            let labels: Vec<&str> = distribution.entries().iter().map(|(l, _)| l.as_str()).collect();
            assert_eq!(labels, vec!["rain", "snow", "hail"]);
            assert_eq!(distribution.total(), 4);
        }

        #[test]
        fn test_empty_distribution() {
            let distribution = value_counts(&type_column(&[None]));
            assert!(distribution.is_empty());
            assert!(distribution.percentages().is_empty());
        }
    }
}

/// Fixed-width histogram binning.
pub mod binning {
    /// One histogram bin covering `[lower, upper)`; the last bin is closed
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Bin {
        pub lower: f64,
        pub upper: f64,
        pub count: usize,
    }

    /// Split the finite `values` into `bins` equal-width bins over their range.
    ///
    /// A single distinct value is centred in `[v - 0.5, v + 0.5]`; no values
    /// at all gives empty bins over `[0, 1]`.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
        if bins == 0 {
            return Vec::new();
        }
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let (lo, hi) = match finite.iter().copied().fold(None, |acc: Option<(f64, f64)>, v| {
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        }) {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(range) => range,
        };

        let width = (hi - lo) / bins as f64;
        let mut result: Vec<Bin> = (0..bins)
            .map(|i| Bin {
                lower: lo + width * i as f64,
                upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();
        for v in finite {
            let i = (((v - lo) / width) as usize).min(bins - 1);
            result[i].count += 1;
        }
        result
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_histogram_counts_every_value() {
            let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
            let bins = histogram(&values, 20);
            assert_eq!(bins.len(), 20);
            assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
            assert_eq!(bins[0].lower, 0.0);
            assert_eq!(bins[19].upper, 10.0);
            // the maximum lands in the closed last bin
            assert_eq!(bins[19].count, 1);
            assert_eq!(bins[0].count, 1);
        }

        #[test]
        fn test_histogram_single_value() {
            let bins = histogram(&[3.0, 3.0, f64::NAN], 4);
            assert_eq!(bins[0].lower, 2.5);
            assert_eq!(bins[3].upper, 3.5);
            assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        }

        #[test]
        fn test_histogram_no_values() {
            let bins = histogram(&[], 5);
            assert_eq!(bins.len(), 5);
            assert!(bins.iter().all(|b| b.count == 0));
            assert!(histogram(&[1.0], 0).is_empty());
        }
    }
}
