//! Figure building and rendering.
//!
//! [`GraphPlotter`] owns one [`PlotterConfig`] and at most one open
//! [`Figure`]. Series are collected in memory and only drawn when the figure
//! is saved, so a failed save can be retried with different options.

pub mod config;
pub mod figure;
pub mod legend;
pub mod plotter;
pub mod render;
pub mod style;

pub use config::{FontConfig, GridStyle, PlotterConfig};
pub use figure::{Figure, Series, SeriesKind};
pub use legend::{LegendOptions, LegendPosition};
pub use plotter::{GraphPlotter, SaveOptions};
pub use style::{Dash, LineOverrides, LineStyle, Marker, ScatterOverrides, ScatterStyle};
