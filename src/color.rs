use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::ClassLabel;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: class label → Color32
// ---------------------------------------------------------------------------

/// Maps each class of the dataset to a distinct colour.
#[derive(Debug, Clone)]
pub struct ClassColorMap {
    mapping: BTreeMap<ClassLabel, Color32>,
    default_color: Color32,
}

impl ClassColorMap {
    pub fn new(classes: &BTreeSet<ClassLabel>) -> Self {
        let palette = generate_palette(classes.len());
        let mapping = classes.iter().copied().zip(palette).collect();

        ClassColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a class.
    pub fn color_for(&self, class: ClassLabel) -> Color32 {
        self.mapping
            .get(&class)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Sequential "Blues" gradient for table cells
// ---------------------------------------------------------------------------

const BLUES_LOW: (f32, f32, f32) = (0.969, 0.984, 1.0);
const BLUES_HIGH: (f32, f32, f32) = (0.031, 0.188, 0.420);

/// Cell background for a value at position `t` in its column range
/// (`0.0` = column minimum, `1.0` = maximum).
pub fn blues(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let t = t as f32;
    let low: LinSrgb = Srgb::new(BLUES_LOW.0, BLUES_LOW.1, BLUES_LOW.2).into_linear();
    let high: LinSrgb = Srgb::new(BLUES_HIGH.0, BLUES_HIGH.1, BLUES_HIGH.2).into_linear();
    let rgb: Srgb = low.mix(high, t).into_color();
    to_color32(rgb)
}

/// Readable text colour on top of [`blues`]`(t)`.
pub fn blues_text(t: f64) -> Color32 {
    if t > 0.5 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}
