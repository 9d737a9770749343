use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Stroke pattern for lines and grid.
///
/// Accepts the usual shorthand (`-`, `--`, `:`, `-.`) when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dash {
    #[default]
    #[serde(alias = "-")]
    Solid,
    #[serde(alias = "--")]
    Dashed,
    #[serde(alias = ":")]
    Dotted,
    #[serde(alias = "-.")]
    DashDot,
}

impl Dash {
    /// Dash length and gap, in multiples of the line width.
    pub fn pattern(self) -> Option<(f64, f64)> {
        match self {
            Dash::Solid => None,
            Dash::Dashed => Some((3.7, 1.6)),
            Dash::Dotted => Some((1.0, 1.65)),
            Dash::DashDot => Some((6.4, 2.6)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    #[default]
    #[serde(alias = "o")]
    Circle,
    #[serde(alias = "^")]
    Triangle,
    #[serde(alias = "x")]
    Cross,
}

/// An `[r, g, b]` colour as stored in configuration.
pub type Rgb = [u8; 3];

pub(crate) fn to_rgb_color(c: Rgb) -> RGBColor {
    RGBColor(c[0], c[1], c[2])
}

// ---------------------------------------------------------------------------
// Line series
// ---------------------------------------------------------------------------

/// Resolved style of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    /// Width in points.
    pub width: f64,
    pub dash: Dash,
    /// `None` picks a colour from the figure palette.
    pub color: Option<Rgb>,
    /// Marker drawn at every data point.
    pub marker: Option<Marker>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 1.5,
            dash: Dash::Solid,
            color: None,
            marker: None,
        }
    }
}

/// Per-call overrides for [`LineStyle`]; unset fields keep the default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOverrides {
    pub width: Option<f64>,
    pub dash: Option<Dash>,
    pub color: Option<Rgb>,
    pub marker: Option<Marker>,
}

impl LineOverrides {
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn dash(mut self, dash: Dash) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }
}

impl LineStyle {
    pub fn merged(&self, overrides: Option<&LineOverrides>) -> LineStyle {
        let Some(o) = overrides else {
            return *self;
        };
        LineStyle {
            width: o.width.unwrap_or(self.width),
            dash: o.dash.unwrap_or(self.dash),
            color: o.color.or(self.color),
            marker: o.marker.or(self.marker),
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter series
// ---------------------------------------------------------------------------

/// Resolved style of a scatter series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterStyle {
    /// Marker area in square points.
    pub size: f64,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    pub color: Option<Rgb>,
    pub marker: Marker,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        Self {
            size: 20.0,
            alpha: 0.7,
            color: None,
            marker: Marker::Circle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterOverrides {
    pub size: Option<f64>,
    pub alpha: Option<f64>,
    pub color: Option<Rgb>,
    pub marker: Option<Marker>,
}

impl ScatterOverrides {
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }
}

impl ScatterStyle {
    pub fn merged(&self, overrides: Option<&ScatterOverrides>) -> ScatterStyle {
        let Some(o) = overrides else {
            return *self;
        };
        ScatterStyle {
            size: o.size.unwrap_or(self.size),
            alpha: o.alpha.unwrap_or(self.alpha),
            color: o.color.or(self.color),
            marker: o.marker.unwrap_or(self.marker),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_overrides_merge_over_defaults() {
        let base = LineStyle::default();
        assert_eq!(base.merged(None), base);

        let merged = base.merged(Some(&LineOverrides::default().dash(Dash::Dotted)));
        assert_eq!(merged.width, 1.5);
        assert_eq!(merged.dash, Dash::Dotted);

        let merged = base.merged(Some(&LineOverrides::default().width(3.0).color([255, 0, 0])));
        assert_eq!(merged.width, 3.0);
        assert_eq!(merged.dash, Dash::Solid);
        assert_eq!(merged.color, Some([255, 0, 0]));
    }

    #[test]
    fn scatter_overrides_merge_over_defaults() {
        let merged = ScatterStyle::default().merged(Some(&ScatterOverrides::default().size(50.0)));
        assert_eq!(merged.size, 50.0);
        assert_eq!(merged.alpha, 0.7);
        assert_eq!(merged.marker, Marker::Circle);
    }

    #[test]
    fn dash_shorthand() {
        let d: Dash = serde_json::from_str(r#""-.""#).unwrap();
        assert_eq!(d, Dash::DashDot);
        let d: Dash = serde_json::from_str(r#""dotted""#).unwrap();
        assert_eq!(d, Dash::Dotted);
        assert_eq!(Dash::Solid.pattern(), None);
    }
}
