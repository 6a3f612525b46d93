//! Line chart of job counts per year.
//!
//! The series always follows the natural order of the aggregates; sorting
//! the table never reorders the chart.

use serde::Serialize;

use crate::aggregate::YearAggregate;

/// One `(year, total jobs)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub year: i32,
    pub total_jobs: u64,
}

/// A point mapped into plot coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub year: i32,
    pub total_jobs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: &'static str,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub const LABEL: &'static str = "Total Jobs";

    #[must_use]
    pub fn from_aggregates(aggregates: &[YearAggregate]) -> Self {
        let points = aggregates
            .iter()
            .map(|a| ChartPoint { year: a.year, total_jobs: a.total_jobs })
            .collect();
        Self { label: Self::LABEL, points }
    }

    #[must_use]
    pub fn max_value(&self) -> u64 {
        self.points.iter().map(|p| p.total_jobs).max().unwrap_or(0)
    }

    /// Map the series into a `width` x `height` plot area inset by `padding`.
    ///
    /// Years are spaced evenly as categories; the value axis runs from zero
    /// at the bottom to the series maximum at the top.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn project(&self, width: f64, height: f64, padding: f64) -> Vec<PlotPoint> {
        let inner_w = (width - 2.0 * padding).max(0.0);
        let inner_h = (height - 2.0 * padding).max(0.0);
        let max = self.max_value();
        let steps = self.points.len().saturating_sub(1);

        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let x = if steps == 0 { padding + inner_w / 2.0 } else { padding + inner_w * i as f64 / steps as f64 };
                let ratio = if max == 0 { 0.0 } else { p.total_jobs as f64 / max as f64 };
                let y = padding + inner_h * (1.0 - ratio);
                PlotPoint { x, y, year: p.year, total_jobs: p.total_jobs }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "chart_test.rs"]
mod tests;
