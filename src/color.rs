use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            RGBColor(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Heat scale: value → background colour
// ---------------------------------------------------------------------------

/// Sequential light-to-dark purple ramp used for table heat maps.
const PURPLES: [(u8, u8, u8); 9] = [
    (0xfc, 0xfb, 0xfd),
    (0xef, 0xed, 0xf5),
    (0xda, 0xda, 0xeb),
    (0xbc, 0xbd, 0xdc),
    (0x9e, 0x9a, 0xc8),
    (0x80, 0x7d, 0xba),
    (0x6a, 0x51, 0xa3),
    (0x54, 0x27, 0x8f),
    (0x3f, 0x00, 0x7d),
];

/// Relative luminance below which cell text switches to white.
const DARK_LUMINANCE: f32 = 0.408;

/// Maps numeric values in `[min, max]` onto the purple ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatScale {
    pub min: f64,
    pub max: f64,
}

impl HeatScale {
    pub fn new(min: f64, max: f64) -> Self {
        HeatScale { min, max }
    }

    /// Position of `value` on the scale in `[0, 1]`.
    ///
    /// Infinities clamp to the ends; NaN has no position. A degenerate
    /// range maps everything to 0.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return Some(if value > self.max { 1.0 } else { 0.0 });
        }
        Some(((value - self.min) / span).clamp(0.0, 1.0))
    }

    /// Background colour for `value`.
    pub fn color_for(&self, value: f64) -> Option<RGBColor> {
        self.normalize(value).map(|t| sample_ramp(t as f32))
    }

    /// Black or white text, whichever reads on top of `background`.
    pub fn text_color_for(background: RGBColor) -> RGBColor {
        let lin: LinSrgb = Srgb::new(background.0, background.1, background.2)
            .into_format::<f32>()
            .into_linear();
        let luminance = 0.2126 * lin.red + 0.7152 * lin.green + 0.0722 * lin.blue;
        if luminance < DARK_LUMINANCE {
            RGBColor(0xf1, 0xf1, 0xf1)
        } else {
            RGBColor(0, 0, 0)
        }
    }
}

fn sample_ramp(t: f32) -> RGBColor {
    let last = PURPLES.len() - 1;
    let pos = t.clamp(0.0, 1.0) * last as f32;
    let i = (pos.floor() as usize).min(last - 1);
    let frac = pos - i as f32;

    let to_linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = to_linear(PURPLES[i]).mix(to_linear(PURPLES[i + 1]), frac);
    let out: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    RGBColor(out.red, out.green, out.blue)
}

/// `#rrggbb` notation for HTML output.
pub fn to_hex(color: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}
