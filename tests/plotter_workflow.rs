// tests/plotter_workflow.rs

use panda_plot::plot::{Dash, LegendOptions, LegendPosition, LineOverrides, ScatterOverrides};
use panda_plot::{Error, GraphPlotter, PlotterConfig, SaveOptions};
use tempfile::TempDir;

fn plotter(temp: &TempDir) -> GraphPlotter {
    let config = PlotterConfig::with_base_dir(temp.path().join("graphs"));
    GraphPlotter::new(config).expect("Failed to create plotter")
}

/// Small figures keep the tests fast.
const TEST_DPI: u32 = 40;

#[test]
fn calls_before_create_figure_are_usage_errors() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let mut p = plotter(&temp);

    let err = p.add_plot(&[1.0], &[1.0], None, None).unwrap_err();
    assert!(matches!(err, Error::NoActiveFigure { .. }));
    assert!(err.to_string().contains("create_figure"));

    let err = p.save(&SaveOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NoActiveFigure { operation: "save" }));
}

#[test]
fn save_creates_nested_directories_and_resets_state() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let mut p = plotter(&temp);

    let x: Vec<f64> = (0..50).map(|i| i as f64 * 0.2).collect();
    let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();

    p.create_figure("t, s", "U, V", Some("Sine"));
    p.add_plot(&x, &y, Some("sin"), None).unwrap();
    p.add_scatter(&x, &y, Some("samples"), Some(&ScatterOverrides::default().size(40.0)))
        .unwrap();

    let saved = p
        .save(&SaveOptions::new("runs/2024/a", "sine.png").dpi(TEST_DPI))
        .unwrap();

    assert_eq!(saved, temp.path().join("graphs/runs/2024/a/sine.png"));
    assert!(saved.is_file());
    let (w, h) = image::image_dimensions(&saved).unwrap();
    assert!(w > 0 && w <= 400 && h > 0 && h <= 240, "{w}x{h}");

    assert!(!p.is_open());
    assert!(matches!(
        p.add_plot(&x, &y, None, None),
        Err(Error::NoActiveFigure { .. })
    ));

    p.create_figure("a", "b", None);
    assert!(p.current_figure().unwrap().series.is_empty());
}

#[test]
fn svg_output_with_styled_lines_and_explicit_legend() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let mut p = plotter(&temp);

    p.create_figure("x", "y", None);
    p.add_plot(
        &[0.0, 1.0, 2.0, 3.0],
        &[0.0, 1.0, f64::NAN, 3.0],
        Some("dashed"),
        Some(&LineOverrides::default().dash(Dash::Dashed).width(2.0)),
    )
    .unwrap();

    let legend = LegendOptions {
        position: LegendPosition::LowerRight,
        frame: false,
        font_size: Some(9.0),
    };
    let saved = p
        .save(
            &SaveOptions::new("", "lines.svg")
                .dpi(TEST_DPI)
                .legend_options(legend),
        )
        .unwrap();

    let svg = std::fs::read_to_string(&saved).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("dashed"));
}

#[test]
fn blocked_subdirectory_is_a_create_dir_error() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let mut p = plotter(&temp);
    let blocker = temp.path().join("graphs/blocker");
    std::fs::write(&blocker, "not a directory").expect("Failed to write blocker file");

    p.create_figure("x", "y", None);
    p.add_plot(&[0.0, 1.0], &[1.0, 2.0], None, None).unwrap();
    let err = p
        .save(&SaveOptions::new("blocker/sub", "a.png").dpi(TEST_DPI))
        .unwrap_err();

    let expected = blocker.join("sub");
    match &err {
        Error::CreateDir { path, .. } => assert_eq!(path, &expected),
        other => panic!("expected CreateDir, got {other:?}"),
    }
    assert!(err.to_string().contains(&expected.display().to_string()));
    assert!(p.is_open());
}

#[test]
fn save_without_legend_or_series() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let mut p = plotter(&temp);

    p.create_figure("x", "y", Some("empty"));
    let saved = p
        .save(&SaveOptions::new("empty", "blank.bmp").dpi(TEST_DPI).legend(false))
        .unwrap();
    assert!(saved.is_file());
}

#[test]
fn config_loads_from_json_file() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let cfg_path = temp.path().join("plot.json");
    std::fs::write(
        &cfg_path,
        format!(
            r#"{{ "base_dir": {:?}, "fig_size": [4.0, 3.0], "grid": {{ "visible": false }} }}"#,
            temp.path().join("out").display().to_string()
        ),
    )
    .unwrap();

    let config = PlotterConfig::from_json_file(&cfg_path).unwrap();
    assert_eq!(config.fig_size, (4.0, 3.0));
    assert!(!config.grid.visible);

    let p = GraphPlotter::new(config).unwrap();
    assert!(temp.path().join("out").is_dir());
    assert_eq!(p.config().font.base_size, 12.0);
}
