//! Noise suppression ahead of gradient computation.
//!
//! Input cells are clamped and rounded into `0..=255` first, so both filters
//! operate on 8-bit data and the denoised grid carries 8-bit precision
//! promoted back to `f32`.

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::filter::gaussian_blur_f32;

use crate::error::{CannyError, Result};
use crate::grid::{self, Grid};

/// Window diameter of the edge-preserving filter.
pub const BILATERAL_DIAMETER: u32 = 9;
/// Intensity sigma of the edge-preserving filter.
pub const BILATERAL_SIGMA_COLOR: f32 = 75.0;
/// Spatial sigma of the edge-preserving filter.
pub const BILATERAL_SIGMA_SPACE: f32 = 75.0;

/// Filter family used by [`denoise`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Smoothing {
    /// Edge-preserving bilateral filter with fixed constants
    /// ([`BILATERAL_DIAMETER`], [`BILATERAL_SIGMA_COLOR`],
    /// [`BILATERAL_SIGMA_SPACE`]). The smoothing strength is validated but
    /// has no effect in this mode.
    #[default]
    Bilateral,
    /// Isotropic Gaussian blur whose standard deviation is the smoothing
    /// strength.
    Gaussian,
}

/// Denoises a raw intensity grid.
///
/// The output has the same dimensions as the input and is deterministic for
/// a given input and parameters.
///
/// # Arguments
///
/// * `raw` - Raw intensities, nominally in `0..=255`
/// * `sigma` - Smoothing strength; only [`Smoothing::Gaussian`] uses it
/// * `smoothing` - Filter family to apply
///
/// # Returns
///
/// The denoised grid, holding whole numbers in `0..=255`.
///
/// # Algorithm
///
/// 1. Reject empty or non-finite input and an invalid `sigma`
/// 2. Clamp and round every cell into an 8-bit image
/// 3. Run the bilateral filter or a Gaussian blur over that image
/// 4. Promote the filtered bytes back to `f32`
///
/// # Errors
///
/// - [`CannyError::EmptyGrid`] for a grid without rows or columns
/// - [`CannyError::NonFinite`] if any cell is NaN or infinite
/// - [`CannyError::InvalidSigma`] unless `sigma` is finite and positive
pub fn denoise(raw: &Grid, sigma: f32, smoothing: Smoothing) -> Result<Grid> {
    validate_input(raw)?;
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CannyError::InvalidSigma(sigma));
    }

    debug!(
        "denoise {}x{} with {:?}, sigma {}",
        raw.height(),
        raw.width(),
        smoothing,
        sigma
    );

    let quantized = grid::to_luma8(raw);
    let filtered = match smoothing {
        Smoothing::Bilateral => bilateral_filter(
            &quantized,
            BILATERAL_DIAMETER,
            BILATERAL_SIGMA_COLOR,
            BILATERAL_SIGMA_SPACE,
        ),
        Smoothing::Gaussian => gaussian_blur_f32(&quantized, sigma),
    };
    Ok(grid::from_luma8(&filtered))
}

fn validate_input(raw: &Grid) -> Result<()> {
    let (rows, cols) = grid::dims(raw);
    if rows == 0 || cols == 0 {
        return Err(CannyError::EmptyGrid { rows, cols });
    }
    if let Some(index) = raw.as_raw().iter().position(|v| !v.is_finite()) {
        return Err(CannyError::NonFinite {
            row: index / cols,
            col: index % cols,
        });
    }
    Ok(())
}

/// Bilateral filter over a circular window of the given diameter.
///
/// Each output pixel is a weighted mean of its window, where the weight of a
/// sample is `exp(-d²/2σs²) · exp(-Δ²/2σc²)` for spatial distance `d` and
/// intensity difference `Δ`. Samples outside the image are mirrored without
/// repeating the border pixel (`dcb|abcd|cba`).
pub fn bilateral_filter(
    image: &GrayImage,
    diameter: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> GrayImage {
    let (width, height) = image.dimensions();
    let radius = (diameter / 2) as i64;
    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let space_coeff = -0.5 / (sigma_space * sigma_space);

    // Precomputed (dx, dy, spatial weight) for the circular window.
    let mut window = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let dist2 = (dx * dx + dy * dy) as f32;
            if dist2.sqrt() > radius as f32 {
                continue;
            }
            window.push((dx, dy, (dist2 * space_coeff).exp()));
        }
    }

    // Intensity weights only depend on |Δ| ∈ 0..=255.
    let color_weights: Vec<f32> = (0..256)
        .map(|delta| ((delta * delta) as f32 * color_coeff).exp())
        .collect();

    ImageBuffer::from_fn(width, height, |x, y| {
        let center = image.get_pixel(x, y)[0];
        let mut sum = 0.0f32;
        let mut weight_sum = 0.0f32;

        for &(dx, dy, space_weight) in &window {
            let sx = reflect_101(x as i64 + dx, width);
            let sy = reflect_101(y as i64 + dy, height);
            let sample = image.get_pixel(sx, sy)[0];
            let weight = space_weight * color_weights[center.abs_diff(sample) as usize];
            sum += sample as f32 * weight;
            weight_sum += weight;
        }

        Luma([grid::quantize_u8(sum / weight_sum)])
    })
}

/// Mirrors an out-of-range coordinate back into `0..len` without repeating
/// the edge sample.
fn reflect_101(mut i: i64, len: u32) -> u32 {
    let last = len as i64 - 1;
    if last <= 0 {
        return 0;
    }
    while i < 0 || i > last {
        i = if i < 0 { -i } else { 2 * last - i };
    }
    i as u32
}
