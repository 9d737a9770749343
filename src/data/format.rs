use std::fmt::{self, Write as _};
use std::path::Path;

use plotters::style::RGBColor;

use crate::color::{self, HeatScale};
use crate::error::{Error, Result};

use super::loader::load_table;
use super::model::Table;

/// Decimal places shown for every numeric cell.
pub const DECIMALS: usize = 3;

/// CSS applied to HTML renderings of a styled table.
const TABLE_CSS: &str = "\
caption { font-size: 33px; font-weight: bold; color: #fb00ff; }
th { background-color: #00c8d6; color: #1F3864; font-weight: bold; text-align: center; }
td { text-align: center; }
tr { font-size: 25px; }";

/// Render one cell: three decimals, `inf` for positive infinity.
pub fn format_value(x: f64) -> String {
    if x == f64::INFINITY {
        "inf".to_string()
    } else if x == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if x.is_nan() {
        "nan".to_string()
    } else {
        format!("{x:.prec$}", prec = DECIMALS)
    }
}

/// Load `path` and style it, optionally in heat-map mode.
pub fn style_file(path: &Path, gradient: bool) -> Result<StyledTable> {
    Ok(load_table(path)?.style().with_gradient(gradient))
}

// ---------------------------------------------------------------------------
// StyledTable – presentation wrapper
// ---------------------------------------------------------------------------

/// A table plus its caption and optional heat-map colouring.
#[derive(Debug, Clone)]
pub struct StyledTable {
    table: Table,
    caption: String,
    heat: Option<HeatScale>,
}

impl Table {
    /// Wrap the table for display with a caption naming its source file.
    pub fn style(self) -> StyledTable {
        let caption = format!("Experimental data from file: {}", self.source());
        StyledTable {
            table: self,
            caption,
            heat: None,
        }
    }
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    /// Background and text colour in heat-map mode.
    pub colors: Option<(RGBColor, RGBColor)>,
}

impl StyledTable {
    /// Enable or disable heat-map colouring.
    ///
    /// All columns share one scale spanning the finite minimum and maximum
    /// of the whole table.
    pub fn with_gradient(mut self, enabled: bool) -> Self {
        self.heat = if enabled {
            let (min, max) = self.table.value_range().unwrap_or((0.0, 0.0));
            Some(HeatScale::new(min, max))
        } else {
            None
        };
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn heat_scale(&self) -> Option<HeatScale> {
        self.heat
    }

    /// The rendered cell at (`row`, `col`).
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        let value = *self.table.columns().get(col)?.values.get(row)?;
        let colors = self.heat.and_then(|scale| {
            let bg = scale.color_for(value)?;
            Some((bg, HeatScale::text_color_for(bg)))
        });
        Some(Cell {
            text: format_value(value),
            colors,
        })
    }

    /// Formatted text of every cell of column `name`.
    pub fn formatted_column(&self, name: &str) -> Option<Vec<String>> {
        let column = self.table.column(name)?;
        Some(column.values.iter().map(|&v| format_value(v)).collect())
    }

    /// Standalone HTML rendering with embedded styles.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = writeln!(html, "<style>\n{TABLE_CSS}\n</style>");
        let _ = writeln!(html, "<table>");
        let _ = writeln!(html, "  <caption>{}</caption>", escape_html(&self.caption));

        html.push_str("  <thead>\n    <tr><th></th>");
        for name in self.table.column_names() {
            let _ = write!(html, "<th>{}</th>", escape_html(name));
        }
        html.push_str("</tr>\n  </thead>\n  <tbody>\n");

        for row in 0..self.table.n_rows() {
            let _ = write!(html, "    <tr><th>{row}</th>");
            for col in 0..self.table.n_cols() {
                let Some(cell) = self.cell(row, col) else {
                    continue;
                };
                match cell.colors {
                    Some((bg, fg)) => {
                        let _ = write!(
                            html,
                            "<td style=\"background-color: {}; color: {}\">{}</td>",
                            color::to_hex(bg),
                            color::to_hex(fg),
                            cell.text
                        );
                    }
                    None => {
                        let _ = write!(html, "<td>{}</td>", cell.text);
                    }
                }
            }
            html.push_str("</tr>\n");
        }
        html.push_str("  </tbody>\n</table>\n");
        html
    }

    /// Write [`Self::to_html`] to `path`, creating parent directories.
    pub fn write_html(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            crate::error::ensure_dir(parent)?;
        }
        std::fs::write(path, self.to_html()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Table saved: {}", path.display());
        Ok(())
    }

    /// Open an interactive window showing the table. Blocks until closed.
    /// Without a display this returns [`Error::Viewer`].
    pub fn show(&self) -> Result<()> {
        crate::app::show_table(self.clone())
    }
}

impl fmt::Display for StyledTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.table.column_names();
        let index_width = self.table.n_rows().saturating_sub(1).to_string().len();

        let widths: Vec<usize> = self
            .table
            .columns()
            .iter()
            .map(|c| {
                c.values
                    .iter()
                    .map(|&v| format_value(v).len())
                    .chain(std::iter::once(c.name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        writeln!(f, "{}", self.caption)?;
        write!(f, "{:index_width$}", "")?;
        for (name, &w) in names.iter().zip(&widths) {
            write!(f, "  {name:>w$}")?;
        }
        writeln!(f)?;

        for row in 0..self.table.n_rows() {
            write!(f, "{row:>index_width$}")?;
            for (col, &w) in widths.iter().enumerate() {
                let text = self.cell(row, col).map(|c| c.text).unwrap_or_default();
                write!(f, "  {text:>w$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
