//! Non-maximum suppression along the quantized gradient direction.

use crate::angle::quantize_radians;
use crate::error::{CannyError, Result};
use crate::grid::{self, Grid};

/// Thins edges to single-pixel width.
///
/// Every pixel's direction is quantized to one of four orientations and its
/// magnitude is compared with the two neighbours along that orientation. The
/// magnitude is kept unchanged when it is `>=` both neighbours and replaced
/// by zero otherwise.
///
/// A pixel whose comparison neighbour falls outside the grid is suppressed:
/// with no data on the far side it cannot be confirmed as a maximum. Each
/// output cell depends only on the inputs, so the result does not depend on
/// scan order.
///
/// # Arguments
///
/// * `magnitude` - Gradient magnitudes
/// * `direction` - Gradient directions in radians, same shape as `magnitude`
///
/// # Returns
///
/// A new grid where every non-zero cell equals its input magnitude.
///
/// # Edge Direction Quantization
///
/// - Horizontal: compare with left and right neighbours
/// - 45°: compare with upper-right and lower-left neighbours
/// - Vertical: compare with upper and lower neighbours
/// - 135°: compare with upper-left and lower-right neighbours
///
/// # Errors
///
/// [`CannyError::DimensionMismatch`] when the two grids differ in shape.
pub fn non_maximum_suppression(magnitude: &Grid, direction: &Grid) -> Result<Grid> {
    let shape = grid::dims(magnitude);
    if grid::dims(direction) != shape {
        return Err(CannyError::DimensionMismatch {
            left: shape,
            right: grid::dims(direction),
        });
    }

    let mut out = grid::filled(shape.0, shape.1, 0.0);
    grid::for_each_row_mut(&mut out, |row, values| {
        for (col, value) in values.iter_mut().enumerate() {
            *value = suppress_at(magnitude, direction, row, col);
        }
    });

    debug!(
        "non-maximum suppression kept {} of {} pixels",
        out.iter().filter(|&&v| v != 0.0).count(),
        out.len()
    );
    Ok(out)
}

fn suppress_at(magnitude: &Grid, direction: &Grid, row: usize, col: usize) -> f32 {
    let orientation = quantize_radians(grid::at(direction, row, col));
    let [first, second] = orientation.neighbor_offsets();

    let (Some(a), Some(b)) = (
        grid::neighbor(magnitude, row, col, first),
        grid::neighbor(magnitude, row, col, second),
    ) else {
        return 0.0;
    };

    let value = grid::at(magnitude, row, col);
    if value >= a && value >= b {
        value
    } else {
        0.0
    }
}
