//! Sobel gradient magnitude and direction.
//!
//! Both kernels are applied as a true convolution (the kernel is mirrored
//! before being slid over the grid), with the border replicated by one cell.
//! Mirroring flips the sign of both responses, which rotates every direction
//! by π and leaves magnitudes and quantized orientations unchanged.

use image::{ImageBuffer, Luma};

use crate::grid::{self, Grid};

type Kernel3 = [[f32; 3]; 3];

/// Horizontal kernel `Kx`.
pub const KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
/// Vertical kernel `Ky`.
pub const KERNEL_Y: Kernel3 = [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]];

/// Co-indexed gradient magnitude and direction grids.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    /// `hypot(Ix, Iy)`, always ≥ 0.
    pub magnitude: Grid,
    /// `atan2(Iy, Ix)` in radians, range `[-π, π]`.
    pub direction: Grid,
}

/// Convolves `grid` with [`KERNEL_X`] and [`KERNEL_Y`] and returns the
/// per-pixel magnitude and direction. Output dimensions match the input.
///
/// # Arguments
///
/// * `grid` - Denoised intensities
///
/// # Returns
///
/// A [`GradientField`] whose grids are co-indexed with `grid`. An empty grid
/// yields empty outputs.
///
/// # Algorithm
///
/// 1. Compute `Ix` and `Iy` at every pixel, replicating the border cell for
///    samples outside the grid
/// 2. Magnitude is `hypot(Ix, Iy)`
/// 3. Direction is `atan2(Iy, Ix)` in radians
pub fn sobel_gradients(grid: &Grid) -> GradientField {
    let (width, height) = grid.dimensions();
    let mut ix = grid::filled(height as usize, width as usize, 0.0);
    let mut iy = ix.clone();

    if width > 0 && height > 0 {
        grid::for_each_row_mut(&mut ix, |row, out| {
            for (col, value) in out.iter_mut().enumerate() {
                *value = convolve_at(grid, &KERNEL_X, row, col);
            }
        });
        grid::for_each_row_mut(&mut iy, |row, out| {
            for (col, value) in out.iter_mut().enumerate() {
                *value = convolve_at(grid, &KERNEL_Y, row, col);
            }
        });
    }

    let magnitude = ImageBuffer::from_fn(width, height, |x, y| {
        Luma([ix.get_pixel(x, y)[0].hypot(iy.get_pixel(x, y)[0])])
    });
    let direction = ImageBuffer::from_fn(width, height, |x, y| {
        Luma([iy.get_pixel(x, y)[0].atan2(ix.get_pixel(x, y)[0])])
    });

    debug!("sobel gradients {}x{} ok", height, width);
    GradientField {
        magnitude,
        direction,
    }
}

/// Kernel response at one pixel. Samples outside the grid replicate the
/// nearest edge cell.
fn convolve_at(grid: &Grid, kernel: &Kernel3, row: usize, col: usize) -> f32 {
    let (rows, cols) = grid::dims(grid);
    let mut sum = 0.0;

    for (ki, kernel_row) in kernel.iter().enumerate() {
        // Convolution pairs kernel row `ki` with image row `row + 1 - ki`.
        let r = (row + 1).saturating_sub(ki).min(rows - 1);
        for (kj, weight) in kernel_row.iter().enumerate() {
            let c = (col + 1).saturating_sub(kj).min(cols - 1);
            sum += weight * grid::at(grid, r, c);
        }
    }
    sum
}
