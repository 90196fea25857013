//! Image file access for the pipeline's input and output grids.

use std::path::Path;

use crate::error::Result;
use crate::grid::{self, Grid};

/// Decodes an image file of any supported format, reduces it to 8-bit luma
/// and promotes it to a grid of intensities in `0..=255`.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let image = image::open(path.as_ref())?.to_luma8();
    debug!(
        "loaded {} as {}x{} grayscale",
        path.as_ref().display(),
        image.height(),
        image.width()
    );
    Ok(grid::from_luma8(&image))
}

/// Writes a grid as an 8-bit grayscale image, clamping values into `0..=255`.
/// The format follows the file extension.
pub fn save_grid<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    grid::to_luma8(grid).save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CannyError;
    use crate::grid::{from_rows, to_rows};

    #[test]
    fn test_png_round_trip() {
        let path = std::env::temp_dir().join(format!("canny_edge_io_{}.png", std::process::id()));
        let grid = from_rows(&[vec![0.0, 50.0, 255.0], vec![255.0, 50.0, 0.0]]).unwrap();
        save_grid(&grid, &path).unwrap();
        let loaded = load_grayscale(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(to_rows(&loaded), to_rows(&grid));
    }

    #[test]
    fn test_missing_file_is_an_image_error() {
        let result = load_grayscale("/definitely/not/here.png");
        assert!(matches!(result, Err(CannyError::Image(_))));
    }
}
