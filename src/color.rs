use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::features::SalaryBand;

// ---------------------------------------------------------------------------
// Chart palettes
// ---------------------------------------------------------------------------

/// `n` visually distinct colours with evenly spaced hues, starting at `hue_offset`.
pub fn generate_palette(n: usize, hue_offset: f32, saturation: f32, lightness: f32) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = hue_offset + (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Pastel colour per salary band, stable across filter changes.
pub fn band_color(band: SalaryBand) -> Color32 {
    let palette = generate_palette(SalaryBand::ALL.len(), 20.0, 0.65, 0.7);
    SalaryBand::ALL
        .iter()
        .position(|b| *b == band)
        .and_then(|i| palette.get(i).copied())
        .unwrap_or(Color32::GRAY)
}

/// Red-to-blue ramp for the company chart, indexed by bar position.
pub fn company_colors(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.5 } else { i as f32 / (n - 1) as f32 };
            let rgb: Srgb = Hsl::new(t * 220.0, 0.6, 0.55).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_band_has_its_own_color() {
        let colors: std::collections::HashSet<_> = SalaryBand::ALL.into_iter().map(band_color).collect();
        assert_eq!(colors.len(), SalaryBand::ALL.len());
    }

    #[test]
    fn company_ramp_length() {
        assert!(company_colors(0).is_empty());
        assert_eq!(company_colors(7).len(), 7);
    }
}
