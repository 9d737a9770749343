// Figure rendering with plotters.
//
// Raster formats are drawn into an RGB buffer, cropped to their content and
// encoded with `image`; SVG goes straight through the SVG backend.

use std::error::Error as StdError;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::chart::ChartBuilder;
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, Cross, DynElement, IntoDynElement, PathElement, TriangleMarker};
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::colors::{BLACK, TRANSPARENT, WHITE};
use plotters::style::{Color, RGBColor, ShapeStyle};

use crate::color;
use crate::error::{Error, Result};

use super::config::PlotterConfig;
use super::figure::{Figure, SeriesKind};
use super::legend::LegendOptions;
use super::style::{to_rgb_color, Dash, Marker};

/// Number of labelled ticks requested per axis. Dashed grid lines use the
/// same key points.
const TICK_HINT: usize = 10;
const GRID_COLOR: RGBColor = RGBColor(0xb0, 0xb0, 0xb0);
/// Space between axis labels and tick labels, in points.
const LABEL_PAD_PT: f64 = 10.0;
const CHART_MARGIN_PT: f64 = 8.0;
const LEGEND_LINE_PT: f64 = 20.0;
const LEGEND_MARGIN_PT: f64 = 5.0;
const LINE_MARKER_PT: f64 = 3.0;
/// Padding kept around the content when cropping raster output.
const TIGHT_PAD_INCHES: f64 = 0.1;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputFormat {
    Raster(ImageFormat),
    Svg,
}

fn output_format(path: &Path) -> Result<OutputFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "png" => Ok(OutputFormat::Raster(ImageFormat::Png)),
        "jpg" | "jpeg" => Ok(OutputFormat::Raster(ImageFormat::Jpeg)),
        "bmp" => Ok(OutputFormat::Raster(ImageFormat::Bmp)),
        "svg" => Ok(OutputFormat::Svg),
        _ => Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Fail early on extensions no backend can write.
pub(crate) fn check_format(path: &Path) -> Result<()> {
    output_format(path).map(|_| ())
}

/// Point-to-pixel conversion for one output resolution.
struct RenderStyle<'a> {
    config: &'a PlotterConfig,
    dpi: u32,
}

impl RenderStyle<'_> {
    fn px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    fn stroke(&self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }

    /// Dash and gap lengths in pixels for a line `width` points wide.
    fn dash(&self, dash: Dash, width: f64) -> Option<(i32, i32)> {
        dash.pattern().map(|(on, off)| {
            (
                self.stroke(on * width) as i32,
                self.stroke(off * width) as i32,
            )
        })
    }
}

/// Render `figure` to `path` at `dpi`. The format follows the extension.
pub(crate) fn render_figure(
    figure: &Figure,
    config: &PlotterConfig,
    path: &Path,
    dpi: u32,
    legend: Option<&LegendOptions>,
) -> Result<()> {
    let format = output_format(path)?;
    let (width, height) = config.pixel_size(dpi);
    let style = RenderStyle { config, dpi };

    match format {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, (width, height)).into_drawing_area();
            draw_figure(&root, figure, &style, legend).map_err(|e| Error::render(path, e))?;
            root.present().map_err(|e| Error::render(path, e))?;
        }
        OutputFormat::Raster(image_format) => {
            let mut buffer = vec![0u8; width as usize * height as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
                    .into_drawing_area();
                draw_figure(&root, figure, &style, legend).map_err(|e| Error::render(path, e))?;
                root.present().map_err(|e| Error::render(path, e))?;
            }

            let image = RgbImage::from_raw(width, height, buffer)
                .ok_or_else(|| Error::render(path, "pixel buffer does not match figure size"))?;
            let pad = (TIGHT_PAD_INCHES * dpi as f64).round() as u32;
            let cropped = crop_to_content(&image, BACKGROUND, pad);

            cropped
                .save_with_format(path, image_format)
                .map_err(|e| match e {
                    image::ImageError::IoError(source) => Error::Write {
                        path: path.to_path_buf(),
                        source,
                    },
                    other => Error::render(path, other),
                })?;
        }
    }
    Ok(())
}

fn draw_figure<DB>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    style: &RenderStyle<'_>,
    legend: Option<&LegendOptions>,
) -> std::result::Result<(), Box<dyn StdError>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let config = style.config;
    let family = config.font.family.as_str();
    let label_px = style.px(config.font.label_size());
    let (x_range, y_range) = figure.axis_ranges();

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(style.px(CHART_MARGIN_PT) as i32)
        .x_label_area_size((label_px * 2.5 + style.px(LABEL_PAD_PT)) as i32)
        .y_label_area_size((label_px * 4.5 + style.px(LABEL_PAD_PT)) as i32);
    if let Some(title) = &figure.title {
        builder.caption(title, (family, style.px(config.font.title_size())));
    }
    let mut chart = builder.build_cartesian_2d(x_range.clone(), y_range.clone())?;

    // Grid
    let grid = &config.grid;
    let grid_style = GRID_COLOR
        .mix(grid.alpha)
        .stroke_width(style.stroke(grid.width));
    let grid_dash = style.dash(grid.dash, grid.width);

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .x_labels(TICK_HINT)
            .y_labels(TICK_HINT)
            .label_style((family, label_px))
            .axis_desc_style((family, label_px))
            .light_line_style(TRANSPARENT)
            .bold_line_style(grid_style);
        if !grid.visible || grid_dash.is_some() {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    if let (true, Some((on, off))) = (grid.visible, grid_dash) {
        for x in RangedCoordf64::from(x_range.clone()).key_points(TICK_HINT) {
            chart.draw_series(DashedLineSeries::new(
                vec![(x, y_range.start), (x, y_range.end)],
                on,
                off,
                grid_style,
            ))?;
        }
        for y in RangedCoordf64::from(y_range.clone()).key_points(TICK_HINT) {
            chart.draw_series(DashedLineSeries::new(
                vec![(x_range.start, y), (x_range.end, y)],
                on,
                off,
                grid_style,
            ))?;
        }
    }

    // Series
    let palette = color::generate_palette(figure.series.len());
    let legend_line = style.px(LEGEND_LINE_PT) as i32;

    for (idx, series) in figure.series.iter().enumerate() {
        let series_color = series.color().map(to_rgb_color).unwrap_or(palette[idx]);

        match &series.kind {
            SeriesKind::Line(line) => {
                let shape = series_color.stroke_width(style.stroke(line.width));
                let dash = style.dash(line.dash, line.width);

                for segment in series.segments() {
                    match dash {
                        None => {
                            chart.draw_series(LineSeries::new(segment, shape))?;
                        }
                        Some((on, off)) => {
                            chart.draw_series(DashedLineSeries::new(segment, on, off, shape))?;
                        }
                    }
                }

                if let Some(marker) = line.marker {
                    let size = style.px(LINE_MARKER_PT).round() as i32;
                    let fill = series_color.filled();
                    chart.draw_series(
                        series
                            .finite_points()
                            .map(|p| marker_element::<DB, _>(marker, p, size, fill)),
                    )?;
                }

                // Legend entry rides on an empty series so broken lines get one entry.
                if let Some(label) = &series.label {
                    chart
                        .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), shape))?
                        .label(label.as_str())
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + legend_line, y)], shape)
                        });
                }
            }
            SeriesKind::Scatter(scatter) => {
                let fill = series_color.mix(scatter.alpha).filled();
                let radius = style.px(scatter.size.max(0.0).sqrt() / 2.0).round().max(1.0) as i32;
                let marker = scatter.marker;

                let anno = chart.draw_series(
                    series
                        .finite_points()
                        .map(|p| marker_element::<DB, _>(marker, p, radius, fill)),
                )?;
                if let Some(label) = &series.label {
                    anno.label(label.as_str()).legend(move |(x, y)| {
                        marker_element::<DB, _>(marker, (x + legend_line / 2, y), radius, fill)
                    });
                }
            }
        }
    }

    // Legend
    if let Some(opts) = legend.filter(|_| figure.labelled_count() > 0) {
        let position = opts
            .position
            .resolve(figure, &x_range, &y_range)
            .to_series_label_position();
        let font_px = style.px(opts.font_size.unwrap_or(config.font.label_size()));

        let mut labels = chart.configure_series_labels();
        labels
            .position(position)
            .label_font((family, font_px))
            .margin(style.px(LEGEND_MARGIN_PT) as i32)
            .legend_area_size(legend_line + legend_line / 4);
        if opts.frame {
            labels
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3));
        } else {
            labels
                .background_style(TRANSPARENT)
                .border_style(TRANSPARENT);
        }
        labels.draw()?;
    }

    Ok(())
}

fn marker_element<DB, C>(
    marker: Marker,
    at: C,
    size: i32,
    style: ShapeStyle,
) -> DynElement<'static, DB, C>
where
    DB: DrawingBackend,
    C: Clone + 'static,
{
    match marker {
        Marker::Circle => Circle::new(at, size, style).into_dyn(),
        Marker::Triangle => TriangleMarker::new(at, size, style).into_dyn(),
        Marker::Cross => Cross::new(at, size, style).into_dyn(),
    }
}

// ---------------------------------------------------------------------------
// Tight bounding box
// ---------------------------------------------------------------------------

/// Bounds `(x, y, width, height)` of every pixel that differs from
/// `background`, or `None` for a blank image.
pub fn content_bounds(image: &RgbImage, background: Rgb<u8>) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in image.enumerate_pixels() {
        if *px == background {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crop to the content bounds plus `pad` pixels, clamped to the image.
pub fn crop_to_content(image: &RgbImage, background: Rgb<u8>, pad: u32) -> RgbImage {
    let Some((x, y, w, h)) = content_bounds(image, background) else {
        return image.clone();
    };
    let left = x.saturating_sub(pad);
    let top = y.saturating_sub(pad);
    let right = (x + w).saturating_add(pad).min(image.width());
    let bottom = (y + h).saturating_add(pad).min(image.height());
    image::imageops::crop_imm(image, left, top, right - left, bottom - top).to_image()
}
