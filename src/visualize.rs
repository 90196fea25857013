//! Rendering of pipeline grids for inspection.

use image::{buffer::ConvertBuffer, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::definitions::HasBlack;

use crate::grid::{self, Grid};

/// Black columns inserted between adjacent panels.
pub const PANEL_GAP: u32 = 4;

/// Lays grids out left to right in one grayscale strip.
///
/// Each panel is min-max normalised on its own so magnitudes, markers and
/// intensities are all visible at full contrast; a constant grid renders
/// black. Panels of different heights are top-aligned.
///
/// # Examples
///
/// ```rust,no_run
/// use canny_edge::{canny_stepwise, load_grayscale, side_by_side, CannyParams};
///
/// let raw = load_grayscale("input.png").unwrap();
/// let stages = canny_stepwise(&raw, &CannyParams::new(1.0, 20.0, 40.0)).unwrap();
/// side_by_side(&stages.sequence()).save("stages.png").unwrap();
/// ```
pub fn side_by_side(grids: &[&Grid]) -> GrayImage {
    let height = grids.iter().map(|g| g.height()).max().unwrap_or(0);
    let width = grids.iter().map(|g| g.width()).sum::<u32>()
        + PANEL_GAP * (grids.len() as u32).saturating_sub(1);

    let mut canvas = ImageBuffer::from_pixel(width, height, Luma::<u8>::black());
    let mut left = 0;
    for g in grids {
        let panel = normalize(g);
        for (x, y, pixel) in panel.enumerate_pixels() {
            canvas.put_pixel(left + x, y, *pixel);
        }
        left += g.width() + PANEL_GAP;
    }
    canvas
}

/// Min-max normalises a grid into `0..=255`.
pub fn normalize(g: &Grid) -> GrayImage {
    let (min, max) = g
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;

    ImageBuffer::from_fn(g.width(), g.height(), |x, y| {
        let v = g.get_pixel(x, y)[0];
        if !(range > 0.0) || !v.is_finite() {
            return Luma([0u8]);
        }
        Luma([grid::quantize_u8((v - min) / range * 255.0)])
    })
}

/// Paints every pixel of `edges` equal to `strong` red on top of `image`.
///
/// Edge pixels outside the image bounds are ignored.
pub fn overlay_edges(image: &GrayImage, edges: &Grid, strong: f32) -> RgbImage {
    let mut canvas: RgbImage = image.convert();
    let red = Rgb([255u8, 0, 0]);

    for (x, y, pixel) in edges.enumerate_pixels() {
        if pixel[0] == strong && x < canvas.width() && y < canvas.height() {
            canvas.put_pixel(x, y, red);
        }
    }
    canvas
}
