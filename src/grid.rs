//! Row-major numeric grids shared by every pipeline stage.
//!
//! A [`Grid`] is a plain `f32` luma buffer from the `image` crate. The buffer
//! addresses pixels as `(x, y)`; the helpers here use `(row, col)` so that
//! `row == y` and `col == x`.

use image::{GrayImage, ImageBuffer, Luma};

use crate::error::{CannyError, Result};

/// Single-channel `f32` grid. Intensities, magnitudes, directions and class
/// markers all live in this one numeric domain.
pub type Grid = ImageBuffer<Luma<f32>, Vec<f32>>;

/// All eight neighbour offsets as `(d_row, d_col)`, in scan order.
pub const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns `(rows, cols)` of a grid.
#[inline]
pub fn dims(grid: &Grid) -> (usize, usize) {
    (grid.height() as usize, grid.width() as usize)
}

/// Creates a grid of the given shape filled with `value`.
pub fn filled(rows: usize, cols: usize, value: f32) -> Grid {
    ImageBuffer::from_pixel(cols as u32, rows as u32, Luma([value]))
}

/// Builds a grid from a row-major buffer.
pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Grid> {
    let len = data.len();
    if rows.checked_mul(cols) != Some(len) {
        return Err(CannyError::BufferSize { rows, cols, len });
    }
    ImageBuffer::from_raw(cols as u32, rows as u32, data)
        .ok_or(CannyError::BufferSize { rows, cols, len })
}

/// Builds a grid from nested rows, rejecting empty or ragged input.
pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Grid> {
    let expected = rows.first().map_or(0, |r| r.as_ref().len());
    if rows.is_empty() || expected == 0 {
        return Err(CannyError::EmptyGrid {
            rows: rows.len(),
            cols: expected,
        });
    }

    let mut data = Vec::with_capacity(rows.len() * expected);
    for (row, values) in rows.iter().enumerate() {
        let values = values.as_ref();
        if values.len() != expected {
            return Err(CannyError::RaggedRows {
                row,
                expected,
                found: values.len(),
            });
        }
        data.extend_from_slice(values);
    }
    from_vec(rows.len(), expected, data)
}

/// Copies a grid back out into nested rows.
pub fn to_rows(grid: &Grid) -> Vec<Vec<f32>> {
    let (_, cols) = dims(grid);
    if cols == 0 {
        return Vec::new();
    }
    grid.as_raw().chunks(cols).map(<[f32]>::to_vec).collect()
}

/// Promotes an 8-bit grayscale image to a grid without rescaling.
pub fn from_luma8(image: &GrayImage) -> Grid {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        Luma([image.get_pixel(x, y)[0] as f32])
    })
}

/// Rounds and clamps every cell into `0..=255`.
pub fn to_luma8(grid: &Grid) -> GrayImage {
    ImageBuffer::from_fn(grid.width(), grid.height(), |x, y| {
        Luma([quantize_u8(grid.get_pixel(x, y)[0])])
    })
}

#[inline]
pub(crate) fn quantize_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Reads the cell at `(row, col)`. Panics when out of bounds.
#[inline]
pub fn at(grid: &Grid, row: usize, col: usize) -> f32 {
    grid.get_pixel(col as u32, row as u32)[0]
}

/// Writes the cell at `(row, col)`. Panics when out of bounds.
#[inline]
pub fn set(grid: &mut Grid, row: usize, col: usize, value: f32) {
    grid.put_pixel(col as u32, row as u32, Luma([value]));
}

/// Resolves `(row + d_row, col + d_col)` to an in-bounds position, or `None`
/// when the neighbour does not exist.
#[inline]
pub fn offset(
    (rows, cols): (usize, usize),
    row: usize,
    col: usize,
    (d_row, d_col): (isize, isize),
) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(d_row)?;
    let c = col.checked_add_signed(d_col)?;
    (r < rows && c < cols).then_some((r, c))
}

/// Reads the neighbour at the given offset, or `None` when it lies outside
/// the grid.
#[inline]
pub fn neighbor(grid: &Grid, row: usize, col: usize, delta: (isize, isize)) -> Option<f32> {
    offset(dims(grid), row, col, delta).map(|(r, c)| at(grid, r, c))
}

/// Applies `f(row, row_values)` to every output row. Rows are independent, so
/// with the `parallel` feature they are processed on the rayon pool.
pub(crate) fn for_each_row_mut<F>(grid: &mut Grid, f: F)
where
    F: Fn(usize, &mut [f32]) + Send + Sync,
{
    let cols = grid.width() as usize;
    if cols == 0 {
        return;
    }
    let buffer: &mut [f32] = grid;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        buffer
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(row, values)| f(row, values));
    }

    #[cfg(not(feature = "parallel"))]
    buffer
        .chunks_mut(cols)
        .enumerate()
        .for_each(|(row, values)| f(row, values));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_is_row_major() {
        let grid = from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(dims(&grid), (2, 3));
        assert_eq!(at(&grid, 0, 2), 3.0);
        assert_eq!(at(&grid, 1, 0), 4.0);
        assert_eq!(
            to_rows(&grid),
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]
        );
    }

    #[test]
    fn test_from_rows_rejects_malformed_input() {
        let empty: [Vec<f32>; 0] = [];
        assert!(matches!(
            from_rows(&empty),
            Err(CannyError::EmptyGrid { rows: 0, .. })
        ));
        assert!(matches!(
            from_rows(&[Vec::<f32>::new()]),
            Err(CannyError::EmptyGrid { rows: 1, cols: 0 })
        ));
        assert!(matches!(
            from_rows(&[vec![1.0, 2.0], vec![3.0]]),
            Err(CannyError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(from_vec(2, 2, vec![0.0; 4]).is_ok());
        assert!(matches!(
            from_vec(2, 2, vec![0.0; 3]),
            Err(CannyError::BufferSize { len: 3, .. })
        ));
    }

    #[test]
    fn test_neighbor_outside_bounds_is_absent() {
        let grid = from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(neighbor(&grid, 0, 0, (-1, 0)), None);
        assert_eq!(neighbor(&grid, 0, 0, (0, -1)), None);
        assert_eq!(neighbor(&grid, 1, 1, (1, 1)), None);
        assert_eq!(neighbor(&grid, 0, 0, (1, 1)), Some(4.0));
        assert_eq!(neighbor(&grid, 1, 1, (-1, 0)), Some(2.0));
    }

    #[test]
    fn test_luma_round_trip_clamps() {
        let grid = from_rows(&[vec![-3.0, 12.4, 300.0]]).unwrap();
        let image = to_luma8(&grid);
        assert_eq!(image.as_raw(), &vec![0u8, 12, 255]);
        assert_eq!(to_rows(&from_luma8(&image)), vec![vec![0.0, 12.0, 255.0]]);
    }

    #[test]
    fn test_for_each_row_mut_visits_rows_in_place() {
        let mut grid = filled(3, 2, 0.0);
        for_each_row_mut(&mut grid, |row, values| {
            for v in values.iter_mut() {
                *v = row as f32;
            }
        });
        assert_eq!(
            to_rows(&grid),
            vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]]
        );
    }
}
