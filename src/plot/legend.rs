use std::ops::Range;

use plotters::chart::SeriesLabelPosition;
use serde::{Deserialize, Serialize};

use super::figure::Figure;

/// Where the legend box goes inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    /// Corner overlapping the fewest data points.
    #[default]
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    UpperCenter,
    LowerCenter,
    CenterLeft,
    CenterRight,
    Center,
}

/// Legend settings for `save`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptions {
    pub position: LegendPosition,
    /// Draw a background and border around the legend.
    pub frame: bool,
    /// Font size in points; defaults to the configured base size.
    pub font_size: Option<f64>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            position: LegendPosition::Best,
            frame: true,
            font_size: None,
        }
    }
}

/// Corners tried by [`LegendPosition::Best`], in tie-break order.
const BEST_CANDIDATES: [LegendPosition; 4] = [
    LegendPosition::UpperRight,
    LegendPosition::UpperLeft,
    LegendPosition::LowerLeft,
    LegendPosition::LowerRight,
];

/// Approximate legend footprint as a fraction of the plot area.
const LEGEND_WIDTH_FRACTION: f64 = 0.3;
const LEGEND_ROW_FRACTION: f64 = 0.07;

impl LegendPosition {
    /// Resolve `Best` against the figure data; other positions pass through.
    pub fn resolve(self, figure: &Figure, x: &Range<f64>, y: &Range<f64>) -> LegendPosition {
        if self != LegendPosition::Best {
            return self;
        }
        let rows = figure.labelled_count().max(1) as f64;
        let w = LEGEND_WIDTH_FRACTION;
        let h = (rows * LEGEND_ROW_FRACTION + 0.03).min(0.9);

        let normalized: Vec<(f64, f64)> = figure
            .series
            .iter()
            .flat_map(|s| s.finite_points())
            .map(|(px, py)| {
                (
                    (px - x.start) / (x.end - x.start),
                    (py - y.start) / (y.end - y.start),
                )
            })
            .collect();

        let mut best = BEST_CANDIDATES[0];
        let mut best_count = usize::MAX;
        for candidate in BEST_CANDIDATES {
            let (left, bottom) = match candidate {
                LegendPosition::UpperRight => (1.0 - w, 1.0 - h),
                LegendPosition::UpperLeft => (0.0, 1.0 - h),
                LegendPosition::LowerLeft => (0.0, 0.0),
                _ => (1.0 - w, 0.0),
            };
            let count = normalized
                .iter()
                .filter(|(nx, ny)| {
                    *nx >= left && *nx <= left + w && *ny >= bottom && *ny <= bottom + h
                })
                .count();
            if count < best_count {
                best = candidate;
                best_count = count;
            }
        }
        best
    }

    pub(crate) fn to_series_label_position(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::Best | LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
            LegendPosition::UpperCenter => SeriesLabelPosition::UpperMiddle,
            LegendPosition::LowerCenter => SeriesLabelPosition::LowerMiddle,
            LegendPosition::CenterLeft => SeriesLabelPosition::MiddleLeft,
            LegendPosition::CenterRight => SeriesLabelPosition::MiddleRight,
            LegendPosition::Center => SeriesLabelPosition::MiddleMiddle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::figure::{Series, SeriesKind};
    use crate::plot::style::ScatterStyle;

    fn figure_with(points: Vec<(f64, f64)>) -> Figure {
        let mut fig = Figure::new("x", "y", None);
        fig.series.push(Series {
            points,
            label: Some("data".into()),
            kind: SeriesKind::Scatter(ScatterStyle::default()),
        });
        fig
    }

    #[test]
    fn explicit_position_passes_through() {
        let fig = figure_with(vec![(0.9, 0.9)]);
        let pos = LegendPosition::LowerLeft.resolve(&fig, &(0.0..1.0), &(0.0..1.0));
        assert_eq!(pos, LegendPosition::LowerLeft);
    }

    #[test]
    fn best_prefers_upper_right_when_empty() {
        let fig = figure_with(vec![]);
        let pos = LegendPosition::Best.resolve(&fig, &(0.0..1.0), &(0.0..1.0));
        assert_eq!(pos, LegendPosition::UpperRight);
    }

    #[test]
    fn best_avoids_crowded_corner() {
        // Rising line: upper-right and lower-left are occupied.
        let points = (0..=20).map(|i| (i as f64 / 20.0, i as f64 / 20.0)).collect();
        let fig = figure_with(points);
        let pos = LegendPosition::Best.resolve(&fig, &(0.0..1.0), &(0.0..1.0));
        assert_eq!(pos, LegendPosition::UpperLeft);
    }

    #[test]
    fn best_falls_through_to_lower_right() {
        let mut points = vec![];
        for i in 0..10 {
            let t = i as f64 / 10.0 * 0.25;
            points.push((t, 0.98));
            points.push((1.0 - t, 0.98));
            points.push((t, 0.02));
        }
        let fig = figure_with(points);
        let pos = LegendPosition::Best.resolve(&fig, &(0.0..1.0), &(0.0..1.0));
        assert_eq!(pos, LegendPosition::LowerRight);
    }
}
