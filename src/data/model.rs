use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Column – one named numeric column
// ---------------------------------------------------------------------------

/// A named column of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    /// Minimum and maximum over the finite values of the column.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        finite_range(self.values.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Table – the complete parsed dataset
// ---------------------------------------------------------------------------

/// Ordered numeric columns parsed from a whitespace-delimited text file.
///
/// All columns have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
    /// Name of the file the table was read from (used for captions).
    source: String,
}

impl Table {
    /// Build a table from a header and row-major data.
    ///
    /// Rows must all have `header.len()` fields; the loader guarantees this
    /// and reports the offending line otherwise.
    pub(crate) fn from_rows(header: Vec<String>, rows: Vec<Vec<f64>>, source: String) -> Self {
        let n_rows = rows.len();
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column {
                name,
                values: Vec::with_capacity(n_rows),
            })
            .collect();

        for row in rows {
            debug_assert_eq!(row.len(), columns.len());
            for (col, value) in columns.iter_mut().zip(row) {
                col.values.push(value);
            }
        }

        Table {
            columns,
            n_rows,
            source,
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name. Returns the first match for duplicated names.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Values of row `i` in column order.
    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        if i >= self.n_rows {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[i]).collect())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Minimum and maximum over every finite cell of every column.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        finite_range(self.columns.iter().flat_map(|c| c.values.iter().copied()))
    }

    /// Export the table as CSV with formatted cells.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            crate::error::ensure_dir(parent)?;
        }
        let write_err = |e: csv::Error| Error::Write {
            path: path.to_path_buf(),
            source: e.into(),
        };

        let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
        writer.write_record(self.column_names()).map_err(write_err)?;
        for i in 0..self.n_rows {
            let record: Vec<String> = self
                .columns
                .iter()
                .map(|c| super::format::format_value(c.values[i]))
                .collect();
            writer.write_record(&record).map_err(write_err)?;
        }
        writer.flush().map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Wrote {} rows to {}", self.n_rows, path.display());
        Ok(())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} values)", self.name, self.values.len())
    }
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["x".into(), "y".into()],
            vec![vec![0.0, -2.0], vec![1.0, f64::INFINITY], vec![2.0, 5.5]],
            "sample.txt".into(),
        )
    }

    #[test]
    fn rows_are_transposed_into_columns() {
        let t = sample();
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.n_cols(), 2);
        assert_eq!(t.column("x").unwrap().values, vec![0.0, 1.0, 2.0]);
        assert_eq!(t.row(2), Some(vec![2.0, 5.5]));
        assert_eq!(t.row(3), None);
    }

    #[test]
    fn value_range_ignores_infinity() {
        let t = sample();
        assert_eq!(t.value_range(), Some((-2.0, 5.5)));
        assert_eq!(t.column("y").unwrap().finite_range(), Some((-2.0, 5.5)));
    }

    #[test]
    fn value_range_of_empty_table_is_none() {
        let t = Table::from_rows(vec!["a".into()], vec![], "empty.txt".into());
        assert!(t.is_empty());
        assert_eq!(t.value_range(), None);
    }
}
