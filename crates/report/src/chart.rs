//! Actual vs. predicted line chart as SVG

use std::fmt::Display;

use chrono::NaiveDate;
use plotters::prelude::*;

use crate::error::{ReportError, Result};
use crate::pipeline::ForecastReport;

const ACTUAL_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Chart options
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: String,
    /// Defaults to the target column name when `None`
    pub y_label: Option<String>,
    /// Draw the forecast interval bounds as thin lines
    pub show_intervals: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Actual and Predicted Values".to_string(),
            width: 1000,
            height: 600,
            x_label: "time".to_string(),
            y_label: None,
            show_intervals: false,
        }
    }
}

fn chart_error<E: Display>(err: E) -> ReportError {
    ReportError::Chart(err.to_string())
}

/// Vertical range covering every drawn value, padded by 5%.
fn y_bounds(report: &ForecastReport, with_intervals: bool) -> (f64, f64) {
    let mut values: Vec<f64> = report.history.iter().map(|(_, v)| *v).collect();
    for p in &report.forecast {
        values.push(p.value);
        if with_intervals {
            values.push(p.lower);
            values.push(p.upper);
        }
    }

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad, hi + pad)
}

/// Plot the observed target in grey and its forecast as a dashed red line.
///
/// The x axis is the period index; ticks are labelled with `YYYY-MM`.
pub fn render_svg(report: &ForecastReport, options: &ChartOptions) -> Result<String> {
    if report.history.is_empty() {
        return Err(ReportError::Chart("no observations to plot".to_string()));
    }

    let dates: Vec<NaiveDate> = report
        .history
        .iter()
        .map(|(d, _)| *d)
        .chain(report.forecast.iter().map(|p| p.date))
        .collect();
    let n = report.history.len();
    let offset = |i: usize| (n + i) as f64;

    let actual: Vec<(f64, f64)> = report
        .history
        .iter()
        .enumerate()
        .map(|(i, (_, v))| (i as f64, *v))
        .collect();
    let predicted: Vec<(f64, f64)> = report
        .forecast
        .iter()
        .enumerate()
        .map(|(i, p)| (offset(i), p.value))
        .collect();

    let (y_min, y_max) = y_bounds(report, options.show_intervals);
    let x_max = dates.len().saturating_sub(1).max(1) as f64;
    let y_label = options.y_label.as_deref().unwrap_or(&report.target);

    let tick_label = |x: &f64| {
        let i = x.round();
        if i < 0.0 || (x - i).abs() > 1e-9 {
            return String::new();
        }
        dates
            .get(i as usize)
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_default()
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)
            .map_err(chart_error)?;

        chart
            .configure_mesh()
            .x_desc(options.x_label.as_str())
            .y_desc(y_label)
            .x_label_formatter(&tick_label)
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(LineSeries::new(actual, ACTUAL_COLOR.stroke_width(2)))
            .map_err(chart_error)?
            .label("Actual")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ACTUAL_COLOR.stroke_width(2)));

        chart
            .draw_series(DashedLineSeries::new(predicted, 6, 4, RED.stroke_width(2)))
            .map_err(chart_error)?
            .label("Predicted")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        if options.show_intervals {
            let level = (report.interval_level * 100.0).round();
            let lower: Vec<(f64, f64)> = report
                .forecast
                .iter()
                .enumerate()
                .map(|(i, p)| (offset(i), p.lower))
                .collect();
            let upper: Vec<(f64, f64)> = report
                .forecast
                .iter()
                .enumerate()
                .map(|(i, p)| (offset(i), p.upper))
                .collect();

            chart
                .draw_series(LineSeries::new(lower, RED.mix(0.35).stroke_width(1)))
                .map_err(chart_error)?
                .label(format!("{}% interval", level))
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.35).stroke_width(1))
                });
            chart
                .draw_series(LineSeries::new(upper, RED.mix(0.35).stroke_width(1)))
                .map_err(chart_error)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }

    Ok(svg)
}
