//! Drawing figures onto a plotters drawing area.

use crate::{
    colormap::{coolwarm, palette_color, Normalize},
    figure::{Axes, Figure, FigureKind},
};
use anyhow::Result;
use chrono::NaiveDate;
use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::ops::Range;
use wxa_data::{binning::Bin, correlation::CorrelationMatrix, distribution::Distribution};
use wxa_utils::dates::{date_to_day_number, day_number_to_date, format_date};

const FONT: &str = "sans-serif";
const TITLE_SIZE: i32 = 24;
const BAR_FILL: RGBColor = RGBColor(31, 119, 180);
const COLORBAR_WIDTH: i32 = 120;
const COLORBAR_STEPS: usize = 64;

/// Draw `figure` onto `root`, filling the whole area
pub fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let title = figure.title.as_str();
    match &figure.kind {
        FigureKind::Histogram { axes, bins } => draw_histogram(root, title, axes, bins),
        FigureKind::Scatter {
            axes,
            points,
            alpha,
        } => draw_scatter(root, title, axes, points, *alpha),
        FigureKind::TimeSeries {
            axes,
            points,
            x_label_rotation,
        } => draw_time_series(root, title, axes, points, *x_label_rotation),
        FigureKind::ColorScatter {
            axes,
            points,
            alpha,
            color_label,
        } => draw_color_scatter(root, title, axes, points, *alpha, color_label),
        FigureKind::Heatmap { matrix, decimals } => draw_heatmap(root, title, matrix, *decimals),
        FigureKind::Pie {
            distribution,
            start_angle,
            decimals,
        } => draw_pie(root, title, distribution, *start_angle, *decimals),
    }
}

/// Range of the finite values with 5% padding on both sides
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad)..(hi + pad)
}

/// plotters rotates text by quarter turns only; pick the closest one to a
/// counter-clockwise angle.
fn label_transform(degrees: f64) -> FontTransform {
    let d = degrees.rem_euclid(360.0);
    if d == 0.0 {
        FontTransform::None
    } else if d <= 135.0 {
        FontTransform::Rotate270
    } else if d <= 225.0 {
        FontTransform::Rotate180
    } else {
        FontTransform::Rotate90
    }
}

fn heat_color(v: f64) -> RGBColor {
    if v.is_finite() {
        coolwarm((v + 1.0) / 2.0)
    } else {
        WHITE
    }
}

fn draw_histogram<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    axes: &Axes,
    bins: &[Bin],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let x_range = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => first.lower..last.upper,
        _ => 0.0..1.0,
    };
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
    let y_top = (max_count as f64 * 1.05).max(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, TITLE_SIZE).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, 0.0..y_top)?;
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(axes.x_label.as_str()).y_desc(axes.y_label.as_str());
        if !axes.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], BAR_FILL.filled())
    }))?;
    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], BLACK.stroke_width(1))
    }))?;
    Ok(())
}

fn draw_scatter<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    axes: &Axes,
    points: &[(f64, f64)],
    alpha: f64,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, TITLE_SIZE).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            padded_range(points.iter().map(|p| p.0)),
            padded_range(points.iter().map(|p| p.1)),
        )?;
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(axes.x_label.as_str()).y_desc(axes.y_label.as_str());
        if !axes.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    let style = BAR_FILL.mix(alpha).filled();
    chart.draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 3, style)))?;
    Ok(())
}

fn draw_time_series<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    axes: &Axes,
    points: &[(NaiveDate, f64)],
    x_label_rotation: f64,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let series: Vec<(i32, f64)> = points
        .iter()
        .map(|(date, v)| (date_to_day_number(date), *v))
        .collect();
    let first = series.iter().map(|p| p.0).min();
    let last = series.iter().map(|p| p.0).max();
    let x_range = match (first, last) {
        (Some(first), Some(last)) if last > first => first..last,
        (Some(first), _) => first..first + 1,
        _ => 0..1,
    };

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, TITLE_SIZE).into_font())
        .margin(10)
        .x_label_area_size(90)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, padded_range(series.iter().map(|p| p.1)))?;

    let date_label = |day: &i32| {
        day_number_to_date(*day)
            .map(|d| format_date(&d))
            .unwrap_or_default()
    };
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(axes.x_label.as_str())
            .y_desc(axes.y_label.as_str())
            .x_labels(10)
            .x_label_formatter(&date_label)
            .x_label_style(
                (FONT, 12)
                    .into_font()
                    .transform(label_transform(x_label_rotation)),
            );
        if !axes.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    chart.draw_series(LineSeries::new(series, &BAR_FILL))?;
    Ok(())
}

fn draw_color_scatter<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    axes: &Axes,
    points: &[(f64, f64, f64)],
    alpha: f64,
    color_label: &str,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (width, _) = root.dim_in_pixel();
    let (main, bar) = root.split_horizontally(width as i32 - COLORBAR_WIDTH);
    let norm = Normalize::from_values(points.iter().map(|p| p.2));

    let mut chart = ChartBuilder::on(&main)
        .caption(title, (FONT, TITLE_SIZE).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            padded_range(points.iter().map(|p| p.0)),
            padded_range(points.iter().map(|p| p.1)),
        )?;
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(axes.x_label.as_str()).y_desc(axes.y_label.as_str());
        if !axes.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }
    chart.draw_series(points.iter().map(|&(x, y, c)| {
        Circle::new((x, y), 4, coolwarm(norm.apply(c)).mix(alpha).filled())
    }))?;

    // color bar
    let (low, high) = if norm.max > norm.min {
        (norm.min, norm.max)
    } else {
        (norm.min - 0.5, norm.max + 0.5)
    };
    let mut bar_chart = ChartBuilder::on(&bar)
        .margin(10)
        .margin_top(60)
        .margin_bottom(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, low..high)?;
    bar_chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(color_label)
        .draw()?;
    let step = (high - low) / COLORBAR_STEPS as f64;
    bar_chart.draw_series((0..COLORBAR_STEPS).map(|i| {
        let from = low + step * i as f64;
        let t = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
        Rectangle::new([(0.0, from), (1.0, from + step)], coolwarm(t).filled())
    }))?;
    Ok(())
}

fn draw_heatmap<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    matrix: &CorrelationMatrix,
    decimals: usize,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = matrix.size() as i32;
    if n == 0 {
        let area = root.titled(title, (FONT, TITLE_SIZE).into_font())?;
        area.draw_text(
            "no numeric columns",
            &TextStyle::from((FONT, 16).into_font()),
            (20, 20),
        )?;
        return Ok(());
    }

    // one segment per matrix entry; rows are drawn top-down, so row `r`
    // sits in segment `n - 1 - r`
    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, TITLE_SIZE).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(140)
        .build_cartesian_2d((0..n - 1).into_segmented(), (0..n - 1).into_segmented())?;

    let labels = matrix.labels();
    let column_label = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    let row_label = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(i) => labels
            .get((n - 1 - *i) as usize)
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n as usize + 1)
        .y_labels(n as usize + 1)
        .x_label_formatter(&column_label)
        .y_label_formatter(&row_label)
        .draw()?;

    let cells: Vec<(i32, i32, f64)> = matrix
        .rows()
        .iter()
        .zip(0i32..)
        .flat_map(|(row, r)| {
            row.iter()
                .zip(0i32..)
                .map(move |(v, c)| (c, n - 1 - r, *v))
        })
        .collect();
    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
            ],
            heat_color(v).filled(),
        )
    }))?;

    let annotation =
        TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(cells.iter().filter(|c| c.2.is_finite()).map(|&(x, y, v)| {
        EmptyElement::at((SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)))
            + Text::new(format!("{:.*}", decimals, v), (0, 0), annotation.clone())
    }))?;
    Ok(())
}

fn draw_pie<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    distribution: &Distribution,
    start_angle: f64,
    decimals: usize,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = root.titled(title, (FONT, TITLE_SIZE).into_font())?;
    if distribution.is_empty() {
        return Ok(());
    }

    // the slice geometry is in pixels, so the pie keeps an equal aspect
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = w.min(h) as f64 * 0.32;
    // plotters lays slices clockwise from a screen angle; feeding them in
    // reverse from the negated angle gives counter-clockwise slices that
    // start `start_angle` degrees above the +x axis
    let entries: Vec<(&(String, usize), f64)> = distribution
        .entries()
        .iter()
        .zip(distribution.percentages())
        .rev()
        .collect();
    let count = entries.len();
    let sizes: Vec<f64> = entries.iter().map(|((_, n), _)| *n as f64).collect();
    let colors: Vec<RGBColor> = (0..count).rev().map(palette_color).collect();
    let labels: Vec<String> = entries
        .iter()
        .map(|((label, _), pct)| format!("{} ({:.*}%)", label, decimals, pct))
        .collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-start_angle);
    pie.label_style((FONT, 16).into_font().color(&BLACK));
    area.draw(&pie)?;
    Ok(())
}
