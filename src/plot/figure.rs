use std::ops::Range;

use super::style::{LineStyle, Rgb, ScatterStyle};

/// Relative padding added around the data on each axis.
const AXIS_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesKind {
    Line(LineStyle),
    Scatter(ScatterStyle),
}

/// One line or scatter dataset on a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub points: Vec<(f64, f64)>,
    pub label: Option<String>,
    pub kind: SeriesKind,
}

impl Series {
    pub fn color(&self) -> Option<Rgb> {
        match &self.kind {
            SeriesKind::Line(s) => s.color,
            SeriesKind::Scatter(s) => s.color,
        }
    }

    pub fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }

    /// Runs of consecutive finite points. A non-finite point breaks the line.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut out = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            if x.is_finite() && y.is_finite() {
                current.push((x, y));
            } else if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
        out
    }
}

/// An open figure: labels plus the series added so far.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figure {
    pub x_label: String,
    pub y_label: String,
    pub title: Option<String>,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn new(x_label: &str, y_label: &str, title: Option<&str>) -> Self {
        Figure {
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            title: title.filter(|t| !t.is_empty()).map(str::to_string),
            series: Vec::new(),
        }
    }

    pub fn labelled_count(&self) -> usize {
        self.series.iter().filter(|s| s.label.is_some()).count()
    }

    /// Axis ranges covering every finite point with a small margin.
    ///
    /// Empty figures get `0..1` on both axes.
    pub fn axis_ranges(&self) -> (Range<f64>, Range<f64>) {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for (x, y) in self.series.iter().flat_map(|s| s.finite_points()) {
            bounds = Some(match bounds {
                None => (x, x, y, y),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            });
        }
        match bounds {
            None => (0.0..1.0, 0.0..1.0),
            Some((x0, x1, y0, y1)) => (pad_range(x0, x1), pad_range(y0, y1)),
        }
    }
}

fn pad_range(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    let padding = if span < 1e-12 { 0.5 } else { span * AXIS_MARGIN };
    (min - padding)..(max + padding)
}
