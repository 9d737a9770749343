use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::style::{Dash, LineStyle, ScatterStyle};

// ---------------------------------------------------------------------------
// PlotterConfig – styling for one plotting session
// ---------------------------------------------------------------------------

/// Styling and output settings owned by a single [`GraphPlotter`].
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```json
/// { "base_dir": "out/graphs", "font": { "base_size": 14 } }
/// ```
///
/// [`GraphPlotter`]: super::GraphPlotter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfig {
    /// Root directory for saved figures.
    pub base_dir: PathBuf,
    /// Figure width and height in inches.
    pub fig_size: (f64, f64),
    pub grid: GridStyle,
    pub font: FontConfig,
    /// Defaults for `add_plot`.
    pub line: LineStyle,
    /// Defaults for `add_scatter`.
    pub scatter: ScatterStyle,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("graphs"),
            fig_size: (10.0, 6.0),
            grid: GridStyle::default(),
            font: FontConfig::default(),
            line: LineStyle::default(),
            scatter: ScatterStyle::default(),
        }
    }
}

impl PlotterConfig {
    /// Default styling rooted at `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Output size in pixels at `dpi`.
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let (w, h) = self.fig_size;
        (
            (w * dpi as f64).round().max(1.0) as u32,
            (h * dpi as f64).round().max(1.0) as u32,
        )
    }
}

// ---------------------------------------------------------------------------
// Grid and fonts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub visible: bool,
    pub dash: Dash,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Line width in points.
    pub width: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            visible: true,
            dash: Dash::Dashed,
            alpha: 0.6,
            width: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Family name handed to the font resolver (`serif`, `sans-serif`, or a
    /// concrete family such as `Liberation Serif`).
    pub family: String,
    /// Base size in points.
    pub base_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "serif".to_string(),
            base_size: 12.0,
        }
    }
}

impl FontConfig {
    pub fn title_size(&self) -> f64 {
        self.base_size + 2.0
    }

    pub fn label_size(&self) -> f64 {
        self.base_size
    }
}
