use std::path::{Path, PathBuf};

use crate::error::{ensure_dir, Error, Result};
use crate::state::Session;

use super::config::PlotterConfig;
use super::figure::{Figure, Series, SeriesKind};
use super::legend::LegendOptions;
use super::render;
use super::style::{LineOverrides, ScatterOverrides};

// ---------------------------------------------------------------------------
// Save options
// ---------------------------------------------------------------------------

/// Arguments for [`GraphPlotter::save`].
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOptions {
    /// Directory below the plotter's base directory. May be nested.
    pub subdir: PathBuf,
    /// File name; the extension selects the image format.
    pub filename: String,
    pub dpi: u32,
    /// Draw a legend for labelled series.
    pub legend: bool,
    /// Legend overrides; `None` means best placement with a frame.
    pub legend_options: Option<LegendOptions>,
    /// Open a viewer window on the saved image (blocks until closed).
    /// Needs a display; without one the failure is only logged.
    pub show: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            subdir: PathBuf::new(),
            filename: "plot.png".to_string(),
            dpi: 300,
            legend: true,
            legend_options: None,
            show: false,
        }
    }
}

impl SaveOptions {
    pub fn new(subdir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            subdir: subdir.into(),
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn legend_options(mut self, options: LegendOptions) -> Self {
        self.legend_options = Some(options);
        self
    }

    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }
}

// ---------------------------------------------------------------------------
// GraphPlotter
// ---------------------------------------------------------------------------

/// Builds one figure at a time with consistent styling and saves it under
/// a base directory.
///
/// ```rust,ignore
/// let mut plotter = GraphPlotter::new(PlotterConfig::default())?;
/// plotter.create_figure("t, s", "U, V", Some("Discharge"));
/// plotter.add_plot(&t, &u, Some("measured"), None)?;
/// plotter.add_scatter(&t_ref, &u_ref, Some("reference"), None)?;
/// let path = plotter.save(&SaveOptions::new("discharge", "curve.png"))?;
/// ```
#[derive(Debug)]
pub struct GraphPlotter {
    config: PlotterConfig,
    session: Session,
}

impl GraphPlotter {
    /// Create the plotter and its base directory.
    pub fn new(config: PlotterConfig) -> Result<Self> {
        ensure_dir(&config.base_dir)?;
        log::debug!("Plotter ready, base directory {}", config.base_dir.display());
        Ok(Self {
            config,
            session: Session::Idle,
        })
    }

    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    pub fn base_dir(&self) -> &Path {
        &self.config.base_dir
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    /// The open figure, if any.
    pub fn current_figure(&self) -> Option<&Figure> {
        self.session.figure("current_figure").ok()
    }

    /// Open a new figure. An open, unsaved figure is discarded.
    pub fn create_figure(&mut self, x_label: &str, y_label: &str, title: Option<&str>) {
        if let Some(previous) = self.session.open(Figure::new(x_label, y_label, title)) {
            log::debug!(
                "Discarding unsaved figure with {} series",
                previous.series.len()
            );
        }
    }

    /// Add a line series to the open figure.
    pub fn add_plot(
        &mut self,
        x: &[f64],
        y: &[f64],
        label: Option<&str>,
        overrides: Option<&LineOverrides>,
    ) -> Result<()> {
        let style = self.config.line.merged(overrides);
        self.push_series("add_plot", x, y, label, SeriesKind::Line(style))
    }

    /// Add a scatter series (unconnected markers) to the open figure.
    pub fn add_scatter(
        &mut self,
        x: &[f64],
        y: &[f64],
        label: Option<&str>,
        overrides: Option<&ScatterOverrides>,
    ) -> Result<()> {
        let style = self.config.scatter.merged(overrides);
        self.push_series("add_scatter", x, y, label, SeriesKind::Scatter(style))
    }

    fn push_series(
        &mut self,
        operation: &'static str,
        x: &[f64],
        y: &[f64],
        label: Option<&str>,
        kind: SeriesKind,
    ) -> Result<()> {
        let figure = self.session.figure_mut(operation)?;
        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        let skipped = x
            .iter()
            .zip(y)
            .filter(|(a, b)| !a.is_finite() || !b.is_finite())
            .count();
        if skipped > 0 {
            log::warn!("{operation}: {skipped} non-finite points will not be drawn");
        }

        figure.series.push(Series {
            points: x.iter().copied().zip(y.iter().copied()).collect(),
            label: label.map(str::to_string),
            kind,
        });
        Ok(())
    }

    /// Write the open figure to `<base_dir>/<subdir>/<filename>` and return
    /// to idle. On failure the figure stays open.
    ///
    /// Once the file is written the call succeeds; a viewer requested with
    /// [`SaveOptions::show`] that cannot open is logged as a warning.
    pub fn save(&mut self, options: &SaveOptions) -> Result<PathBuf> {
        self.save_with(options, crate::app::show_image)
    }

    fn save_with<V>(&mut self, options: &SaveOptions, viewer: V) -> Result<PathBuf>
    where
        V: FnOnce(&Path) -> Result<()>,
    {
        let figure = self.session.figure("save")?;

        let save_dir = self.config.base_dir.join(&options.subdir);
        let path = save_dir.join(&options.filename);
        if options.dpi == 0 {
            return Err(Error::render(&path, "dpi must be greater than zero"));
        }
        ensure_dir(&save_dir)?;
        render::check_format(&path)?;

        let legend = options
            .legend
            .then(|| options.legend_options.unwrap_or_default());
        render::render_figure(figure, &self.config, &path, options.dpi, legend.as_ref())?;

        self.session.close();
        log::info!("Plot saved: {}", path.display());

        if options.show {
            if let Err(e) = viewer(&path) {
                log::warn!("Could not display {}: {e}", path.display());
            }
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::style::{Dash, LineStyle};

    fn plotter(dir: &Path) -> GraphPlotter {
        GraphPlotter::new(PlotterConfig::with_base_dir(dir.join("graphs"))).unwrap()
    }

    #[test]
    fn new_creates_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let p = plotter(tmp.path());
        assert!(p.base_dir().is_dir());
        assert!(!p.is_open());
    }

    #[test]
    fn series_require_an_open_figure() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = plotter(tmp.path());
        assert!(matches!(
            p.add_plot(&[0.0], &[1.0], None, None),
            Err(Error::NoActiveFigure { operation: "add_plot" })
        ));
        assert!(matches!(
            p.add_scatter(&[0.0], &[1.0], None, None),
            Err(Error::NoActiveFigure { operation: "add_scatter" })
        ));
        assert!(matches!(
            p.save(&SaveOptions::default()),
            Err(Error::NoActiveFigure { operation: "save" })
        ));
    }

    #[test]
    fn overrides_merge_into_series_style() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = plotter(tmp.path());
        p.create_figure("x", "y", Some("title"));
        p.add_plot(&[0.0, 1.0], &[0.0, 1.0], Some("a"), None).unwrap();
        p.add_plot(
            &[0.0, 1.0],
            &[1.0, 0.0],
            None,
            Some(&LineOverrides::default().dash(Dash::Dashed)),
        )
        .unwrap();

        let fig = p.current_figure().unwrap();
        assert_eq!(fig.series.len(), 2);
        assert_eq!(fig.series[0].kind, SeriesKind::Line(LineStyle::default()));
        assert_eq!(fig.series[0].label.as_deref(), Some("a"));
        match &fig.series[1].kind {
            SeriesKind::Line(style) => {
                assert_eq!(style.width, 1.5);
                assert_eq!(style.dash, Dash::Dashed);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = plotter(tmp.path());
        p.create_figure("x", "y", None);
        assert!(matches!(
            p.add_scatter(&[0.0, 1.0], &[0.0], None, None),
            Err(Error::LengthMismatch { x: 2, y: 1 })
        ));
        assert!(p.current_figure().unwrap().series.is_empty());
    }

    #[test]
    fn create_figure_discards_unsaved_figure() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = plotter(tmp.path());
        p.create_figure("a", "b", None);
        p.add_plot(&[0.0], &[0.0], None, None).unwrap();
        p.create_figure("c", "d", None);
        let fig = p.current_figure().unwrap();
        assert_eq!(fig.x_label, "c");
        assert!(fig.series.is_empty());
    }

    #[test]
    fn unsupported_extension_keeps_figure_open() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = plotter(tmp.path());
        p.create_figure("x", "y", None);
        let err = p.save(&SaveOptions::new("out", "plot.pdf")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
        assert!(p.is_open());
        assert!(p.base_dir().join("out").is_dir());
    }

    #[test]
    fn zero_dpi_is_rejected_before_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = plotter(tmp.path());
        p.create_figure("x", "y", None);
        let err = p.save(&SaveOptions::new("zero", "plot.png").dpi(0)).unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
        assert!(err.to_string().contains("dpi"));
        assert!(p.is_open());
        assert!(!p.base_dir().join("zero").exists());
    }

    #[test]
    fn viewer_failure_keeps_the_saved_path() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = plotter(tmp.path());
        p.create_figure("x", "y", None);
        p.add_plot(&[0.0, 1.0], &[0.0, 1.0], Some("a"), None).unwrap();

        let mut shown = None;
        let saved = p
            .save_with(&SaveOptions::new("view", "plot.png").dpi(30).show(true), |path| {
                shown = Some(path.to_path_buf());
                Err(Error::Viewer("no display".to_string()))
            })
            .unwrap();

        assert_eq!(shown.as_deref(), Some(saved.as_path()));
        assert!(saved.is_file());
        assert!(!p.is_open());
    }

    #[test]
    fn viewer_is_skipped_unless_requested() {
        let tmp = tempfile::tempdir().unwrap();
        let mut p = plotter(tmp.path());
        p.create_figure("x", "y", None);
        let saved = p
            .save_with(&SaveOptions::new("", "plot.bmp").dpi(30), |_| {
                panic!("viewer must not open")
            })
            .unwrap();
        assert!(saved.is_file());
    }
}
