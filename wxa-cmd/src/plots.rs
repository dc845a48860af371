//! Figure builders for the weather anomaly charts.
//!
//! Each builder reads the columns it plots and returns a [`Figure`]. Cells
//! that cannot be read as numbers are value errors; rows where a plotted
//! coordinate is missing are skipped.

use chrono::NaiveDate;
use wxa_charts::{
    figure::{LARGE_SIZE, SQUARE_SIZE, STANDARD_SIZE, WIDE_SIZE},
    Axes, Figure, FigureKind,
};
use wxa_core::{ObservationTable, Result, SortedView};
use wxa_data::{binning::histogram, correlation::CorrelationMatrix, distribution::value_counts};

pub const MAX_TEMP: &str = "max_temp";
pub const MIN_TEMP: &str = "min_temp";
pub const DATE: &str = "date_str";
pub const DEGREES_FROM_MEAN: &str = "degrees_from_mean";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const WEATHER_TYPE: &str = "type";

pub const HISTOGRAM_BINS: usize = 20;
pub const SCATTER_ALPHA: f64 = 0.7;
pub const GEO_ALPHA: f64 = 0.5;
pub const DATE_LABEL_ROTATION: f64 = 45.0;
pub const HEATMAP_DECIMALS: usize = 2;
pub const PIE_START_ANGLE: f64 = 140.0;
pub const PIE_DECIMALS: usize = 1;

fn numbers(table: &ObservationTable, name: &str) -> Result<Vec<Option<f64>>> {
    table.column(name)?.to_f64_values()
}

/// Rows where every column has a value
fn complete_pairs(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<(f64, f64)> {
    xs.iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect()
}

pub fn max_temp_histogram(table: &ObservationTable) -> Result<Figure> {
    let values: Vec<f64> = numbers(table, MAX_TEMP)?.into_iter().flatten().collect();
    Ok(Figure::new(
        "max-temp-histogram",
        "Distribution of Max Temperature",
        STANDARD_SIZE,
        FigureKind::Histogram {
            axes: Axes::new("Max Temperature", "Frequency"),
            bins: histogram(&values, HISTOGRAM_BINS),
        },
    ))
}

pub fn max_min_scatter(table: &ObservationTable) -> Result<Figure> {
    let points = complete_pairs(&numbers(table, MAX_TEMP)?, &numbers(table, MIN_TEMP)?);
    Ok(Figure::new(
        "max-vs-min-temp",
        "Max Temperature vs Min Temperature",
        STANDARD_SIZE,
        FigureKind::Scatter {
            axes: Axes::new("Max Temperature", "Min Temperature"),
            points,
            alpha: SCATTER_ALPHA,
        },
    ))
}

/// Line of `degrees_from_mean` in view order.
///
/// The date column must already hold dates and `view` must be sorted on it.
pub fn anomaly_time_series(table: &ObservationTable, view: &SortedView) -> Result<Figure> {
    let date_column = table.column(DATE)?;
    let degrees = view.gather(&numbers(table, DEGREES_FROM_MEAN)?);
    let dates: Vec<Option<NaiveDate>> = match date_column.dates() {
        Some(dates) => view.gather(dates),
        None => vec![None; view.len()],
    };
    let points = dates
        .into_iter()
        .zip(degrees)
        .filter_map(|(d, v)| Some((d?, v?)))
        .collect();
    Ok(Figure::new(
        "degrees-from-mean",
        "Degrees from Mean Over Time",
        WIDE_SIZE,
        FigureKind::TimeSeries {
            axes: Axes::new("Date", "Degrees from Mean"),
            points,
            x_label_rotation: DATE_LABEL_ROTATION,
        },
    ))
}

pub fn geo_scatter(table: &ObservationTable) -> Result<Figure> {
    let longitudes = numbers(table, LONGITUDE)?;
    let latitudes = numbers(table, LATITUDE)?;
    let temps = numbers(table, MAX_TEMP)?;
    let points = longitudes
        .iter()
        .zip(&latitudes)
        .zip(&temps)
        .filter_map(|((x, y), t)| Some(((*x)?, (*y)?, (*t)?)))
        .collect();
    Ok(Figure::new(
        "geo-max-temp",
        "Latitude vs Longitude Colored by Max Temperature",
        STANDARD_SIZE,
        FigureKind::ColorScatter {
            axes: Axes::new("Longitude", "Latitude"),
            points,
            alpha: GEO_ALPHA,
            color_label: "Max Temperature".to_string(),
        },
    ))
}

pub fn correlation_heatmap(table: &ObservationTable) -> Figure {
    Figure::new(
        "correlation-matrix",
        "Correlation Matrix",
        LARGE_SIZE,
        FigureKind::Heatmap {
            matrix: CorrelationMatrix::from_table(table).transpose(),
            decimals: HEATMAP_DECIMALS,
        },
    )
}

pub fn weather_type_pie(table: &ObservationTable) -> Result<Figure> {
    Ok(Figure::new(
        "weather-types",
        "Distribution of Weather Types",
        SQUARE_SIZE,
        FigureKind::Pie {
            distribution: value_counts(table.column(WEATHER_TYPE)?),
            start_angle: PIE_START_ANGLE,
            decimals: PIE_DECIMALS,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxa_core::loader::from_reader;

    const CSV: &str = "\
date_str,max_temp,min_temp,degrees_from_mean,latitude,longitude,type
2014-01-03,20.5,10.1,3.2,33.8,-118.3,rain
2014-01-01,25.0,,-1.5,37.1,-119.5,rain
2014-01-02,18.0,9.5,2.0,40.0,-120.0,snow
";

    fn table() -> ObservationTable {
        from_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_histogram_has_twenty_bins() {
        let figure = max_temp_histogram(&table()).unwrap();
        match figure.kind {
            FigureKind::Histogram { bins, .. } => {
                assert_eq!(bins.len(), HISTOGRAM_BINS);
                assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
            }
            other => panic!("unexpected figure {:?}", other),
        }
    }

    #[test]
    fn test_scatter_skips_missing_rows() {
        let figure = max_min_scatter(&table()).unwrap();
        assert_eq!(figure.title, "Max Temperature vs Min Temperature");
        match figure.kind {
            FigureKind::Scatter { points, alpha, .. } => {
                assert_eq!(points, vec![(20.5, 10.1), (18.0, 9.5)]);
                assert_eq!(alpha, 0.7);
            }
            other => panic!("unexpected figure {:?}", other),
        }
    }

    #[test]
    fn test_time_series_follows_date_order() {
        let mut table = table();
        table.coerce_dates(DATE).unwrap();
        let view = SortedView::by_date(&table, DATE).unwrap();
        let figure = anomaly_time_series(&table, &view).unwrap();
        match figure.kind {
            FigureKind::TimeSeries {
                points,
                x_label_rotation,
                ..
            } => {
                let values: Vec<f64> = points.iter().map(|p| p.1).collect();
                assert_eq!(values, vec![-1.5, 2.0, 3.2]);
                assert!(points.windows(2).all(|w| w[0].0 <= w[1].0));
                assert_eq!(x_label_rotation, 45.0);
            }
            other => panic!("unexpected figure {:?}", other),
        }
    }

    #[test]
    fn test_text_in_plotted_column_is_value_error() {
        let table = from_reader(
            "max_temp,min_temp\n1.0,cold\n2.0,3.0\n".as_bytes(),
        )
        .unwrap();
        let err = max_min_scatter(&table).unwrap_err();
        assert!(err.is_value_error());
        assert!(err.to_string().contains("\"cold\""));
    }

    #[test]
    fn test_geo_scatter_and_heatmap() {
        let table = table();
        match geo_scatter(&table).unwrap().kind {
            FigureKind::ColorScatter { points, color_label, .. } => {
                assert_eq!(points.len(), 3);
                assert_eq!(points[0], (-118.3, 33.8, 20.5));
                assert_eq!(color_label, "Max Temperature");
            }
            other => panic!("unexpected figure {:?}", other),
        }
        match correlation_heatmap(&table).kind {
            FigureKind::Heatmap { matrix, decimals } => {
                assert_eq!(matrix.size(), 5);
                assert!(matrix.is_square());
                assert_eq!(decimals, 2);
            }
            other => panic!("unexpected figure {:?}", other),
        }
    }

    #[test]
    fn test_pie_requires_type_column() {
        let figure = weather_type_pie(&table()).unwrap();
        match figure.kind {
            FigureKind::Pie {
                distribution,
                start_angle,
                ..
            } => {
                assert_eq!(distribution.count("rain"), Some(2));
                assert_eq!(distribution.count("snow"), Some(1));
                assert_eq!(start_angle, 140.0);
            }
            other => panic!("unexpected figure {:?}", other),
        }

        let untyped = from_reader("max_temp\n1.0\n".as_bytes()).unwrap();
        assert!(!weather_type_pie(&untyped).unwrap_err().is_value_error());
    }
}
