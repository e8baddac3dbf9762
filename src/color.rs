use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Colour used when a chart draws a single series.
pub const SERIES_COLOR: Color32 = Color32::from_rgb(54, 162, 235);

/// Generates `n` visually distinct colours using evenly spaced hues. Used by
/// the pie/doughnut/polar-area families, which need one colour per slice.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Translucent fill for a slice or bar, keeping the palette hue.
pub fn with_fill_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_hues() {
        assert!(generate_palette(0).is_empty());
        let palette = generate_palette(9);
        assert_eq!(palette.len(), 9);
        for pair in palette.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
