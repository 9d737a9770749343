use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use panda_plot::{load_table, GraphPlotter, PlotterConfig, SaveOptions};

/// Render a whitespace data file: print it, write an HTML table, and plot
/// every column against the first.
fn main() -> Result<()> {
    env_logger::init();

    let Some(input) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: panda-plot <data.txt>");
    };
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input path has no file name")?
        .to_string();

    let table = load_table(&input).with_context(|| format!("loading {}", input.display()))?;
    let styled = table.clone().style().with_gradient(true);
    println!("{styled}");

    let config = PlotterConfig::default();
    let html_path = config.base_dir.join("tables").join(format!("{stem}.html"));
    styled
        .write_html(&html_path)
        .context("writing HTML table")?;

    if table.n_cols() < 2 {
        log::warn!("Need at least two columns to plot, found {}", table.n_cols());
        return Ok(());
    }

    let mut plotter = GraphPlotter::new(config).context("preparing output directory")?;
    let columns = table.columns();
    let x = &columns[0];

    plotter.create_figure(&x.name, "value", Some(stem.as_str()));
    for y in &columns[1..] {
        plotter.add_plot(&x.values, &y.values, Some(y.name.as_str()), None)?;
        plotter.add_scatter(&x.values, &y.values, None, None)?;
    }

    let saved = plotter
        .save(&SaveOptions::new(stem.as_str(), format!("{stem}.png")))
        .context("saving figure")?;
    println!("Plot saved: {}", saved.display());
    Ok(())
}
