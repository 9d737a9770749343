//! Helpers for exploratory data analysis: whitespace text tables rendered as
//! styled tables, and a plotter that keeps figures consistent and files
//! organised.

pub mod app;
pub mod color;
pub mod data;
pub mod error;
pub mod plot;
pub mod state;
pub mod ui;

pub use data::format::{format_value, style_file, StyledTable};
pub use data::loader::{load_table, parse_table};
pub use data::model::{Column, Table};
pub use error::{Error, Result};
pub use plot::{GraphPlotter, PlotterConfig, SaveOptions};
