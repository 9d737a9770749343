// tests/table_formatting.rs

use std::fs;

use panda_plot::{format_value, load_table, style_file, Error};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write input file");
    path
}

#[test]
fn scenario_with_infinity_row() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(&temp, "xy.txt", "x y\n0 0\n1 1\n2 inf");

    let styled = style_file(&path, false).unwrap();
    assert_eq!(styled.table().n_rows(), 3);
    assert_eq!(
        styled.formatted_column("y").unwrap(),
        vec!["0.000", "1.000", "inf"]
    );
    assert_eq!(styled.caption(), "Experimental data from file: xy.txt");
}

#[test]
fn values_round_to_three_decimals() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(&temp, "r.txt", "a b\n1.23456 -0.0004\n2.9999 100\n");

    let table = load_table(&path).unwrap();
    for col in table.columns() {
        for &v in &col.values {
            let text = format_value(v);
            let parsed: f64 = text.parse().unwrap();
            assert!((parsed - v).abs() <= 0.0005 + 1e-12, "{v} -> {text}");
            assert_eq!(text.split('.').nth(1).map(str::len), Some(3));
        }
    }
    assert_eq!(format_value(table.column("a").unwrap().values[0]), "1.235");
}

#[test]
fn row_with_wrong_field_count_is_rejected() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    for body in ["1 2\n", "1 2 3 4\n"] {
        let path = write_file(&temp, "bad.txt", &format!("a b c\n0 0 0\n{body}"));
        match load_table(&path) {
            Err(Error::Parse { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("expected 3"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}

#[test]
fn missing_file_is_a_read_error() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let err = load_table(&temp.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}

#[test]
fn html_and_csv_exports_land_in_nested_directories() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(&temp, "data.txt", "x y\n0 0.5\n1 inf\n");

    let styled = style_file(&path, true).unwrap();
    let html_path = temp.path().join("out/tables/data.html");
    styled.write_html(&html_path).unwrap();
    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("<caption>Experimental data from file: data.txt</caption>"));
    assert!(html.contains("background-color: #"));

    let csv_path = temp.path().join("out/csv/data.csv");
    styled.table().write_csv(&csv_path).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv, "x,y\n0.000,0.500\n1.000,inf\n");
}
