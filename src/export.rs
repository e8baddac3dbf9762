use std::path::PathBuf;

use anyhow::{Context, Result};
use eframe::egui::{ColorImage, Rect};
use thiserror::Error;

use crate::selection::ChartKind;

// ---------------------------------------------------------------------------
// PNG export of the rendered chart
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Export requires a successfully rendered chart; the caller must not
    /// silently ignore this.
    #[error("no chart has been rendered yet")]
    NoChart,
}

/// Deterministic export name derived from the chart kind, so different
/// configurations never collide by accident: `bar-chart.png`,
/// `polarArea-chart.png`, ...
pub fn file_name(kind: ChartKind) -> String {
    format!("{}-chart.png", kind.as_str())
}

/// Crop a viewport screenshot to the chart rect and encode it as PNG bytes.
pub fn encode_chart_png(
    screenshot: &ColorImage,
    chart_rect: Rect,
    pixels_per_point: f32,
) -> Result<Vec<u8>> {
    let region = screenshot.region(&chart_rect, Some(pixels_per_point));
    let [width, height] = region.size;

    let rgba: Vec<u8> = region.pixels.iter().flat_map(|p| p.to_array()).collect();
    let img = image::RgbaImage::from_raw(width as u32, height as u32, rgba)
        .context("screenshot region has inconsistent dimensions")?;

    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .context("encoding PNG")?;
    Ok(bytes)
}

/// Ask the user for a destination (pre-filled with [`file_name`]) and write
/// the encoded image there. `Ok(None)` means the dialog was cancelled.
pub fn save_png(bytes: &[u8], kind: ChartKind) -> Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export chart")
        .set_file_name(file_name(kind))
        .add_filter("PNG image", &["png"])
        .save_file()
    else {
        return Ok(None);
    };

    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, Color32};

    #[test]
    fn file_names_follow_the_kind() {
        assert_eq!(file_name(ChartKind::Bar), "bar-chart.png");
        assert_eq!(file_name(ChartKind::PolarArea), "polarArea-chart.png");
        assert_eq!(file_name(ChartKind::HorizontalBar), "horizontalBar-chart.png");
    }

    #[test]
    fn encodes_the_chart_region() {
        let screenshot = ColorImage::new([100, 80], Color32::WHITE);
        let rect = Rect::from_min_max(pos2(10.0, 10.0), pos2(50.0, 40.0));

        let bytes = encode_chart_png(&screenshot, rect, 1.0).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 40);
        assert_eq!(decoded.height(), 30);
    }
}
