use std::path::Path;

use crate::error::{Error, Result};

use super::model::Table;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a whitespace-delimited table from a UTF-8 text file.
///
/// Layout:
///
/// ```text
/// x      y
/// 0      0.0
/// 1      1.25
/// 2      inf
/// ```
///
/// The first non-blank line holds the column names, every following
/// non-blank line one row of floats. Blank lines are skipped.
pub fn load_table(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let table = parse_table(&text, &source)?;
    log::debug!(
        "Loaded {} rows x {} columns from {}",
        table.n_rows(),
        table.n_cols(),
        path.display()
    );
    Ok(table)
}

/// Parse table text already in memory. `source` is used for captions.
pub fn parse_table(text: &str, source: &str) -> Result<Table> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header_line) = lines
        .next()
        .ok_or_else(|| Error::parse(0, "no header line"))?;
    let header: Vec<String> = header_line.split_whitespace().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (line_no, line) in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != header.len() {
            return Err(Error::parse(
                line_no,
                format!(
                    "expected {} fields to match the header but found {}",
                    header.len(),
                    fields.len()
                ),
            ));
        }

        let row = fields
            .iter()
            .map(|tok| {
                parse_value(tok)
                    .ok_or_else(|| Error::parse(line_no, format!("'{tok}' is not a number")))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok(Table::from_rows(header, rows, source.to_string()))
}

// ---------------------------------------------------------------------------
// Token parsing
// ---------------------------------------------------------------------------

/// Parse one data token. Accepts any float literal, including the
/// `inf` / `infinity` sentinels with an optional sign.
pub fn parse_value(tok: &str) -> Option<f64> {
    if is_infinity_token(tok) {
        return Some(if tok.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    tok.parse::<f64>().ok()
}

fn is_infinity_token(tok: &str) -> bool {
    let unsigned = tok.strip_prefix(['+', '-']).unwrap_or(tok);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
