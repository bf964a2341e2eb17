use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Mix, Srgb};

use crate::chart::spec::ColorScale;

// ---------------------------------------------------------------------------
// Spec color → Color32
// ---------------------------------------------------------------------------

/// Parse a `#rrggbb` string or one of the few named colors chart specs use.
/// Unparseable input falls back to `fallback`.
pub fn parse_color(spec: &str, fallback: Color32) -> Color32 {
    match spec.trim() {
        "white" => Color32::WHITE,
        "black" => Color32::BLACK,
        hex => match Srgb::<u8>::from_str(hex) {
            Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
            Err(e) => {
                log::warn!("unreadable color {hex:?}: {e}");
                fallback
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Continuous color scale sampling
// ---------------------------------------------------------------------------

/// Color of `value` on a continuous scale whose stops are evenly spaced.
pub fn sample_scale(scale: &ColorScale, value: f64) -> Color32 {
    let stops: Vec<Srgb<f32>> = scale
        .stops
        .iter()
        .filter_map(|s| Srgb::<u8>::from_str(s.trim()).ok())
        .map(|c| c.into_format::<f32>())
        .collect();

    match stops.as_slice() {
        [] => Color32::GRAY,
        [only] => to_color32(*only),
        _ => {
            let t = scale.fraction(value) * (stops.len() - 1) as f32;
            let lower = (t.floor() as usize).min(stops.len() - 2);
            let mixed = stops[lower].mix(stops[lower + 1], t - lower as f32);
            to_color32(mixed)
        }
    }
}

fn to_color32(c: Srgb<f32>) -> Color32 {
    let rgb: Srgb<u8> = c.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}
