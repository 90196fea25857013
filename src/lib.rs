//! # Canny Edge Detection Library
//!
//! This crate turns a grayscale intensity grid into a binary edge map through the
//! classic five Canny stages, each exposed as its own function so every
//! intermediate grid can be inspected:
//!
//! 1. Noise suppression ([`denoise`])
//! 2. Sobel gradient magnitude and direction ([`sobel_gradients`])
//! 3. Non-maximum suppression ([`non_maximum_suppression`])
//! 4. Double thresholding ([`double_threshold`])
//! 5. Hysteresis edge tracking ([`track_edges`])
//!
//! ## Features
//!
//! - Edge-preserving bilateral or Gaussian noise suppression
//! - Replicate-border Sobel gradients
//! - Four-orientation non-maximum suppression with explicit border handling
//! - Single-pass hysteresis tracking, plus an opt-in connected variant
//! - Fast and stepwise pipelines
//! - Side-by-side rendering of intermediate grids
//! - Optional debug logging (enable with `logger` feature)
//! - Optional row-parallel stages (enable with `parallel` feature)
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use canny_edge::{canny, load_grayscale, save_grid, CannyParams};
//!
//! let raw = load_grayscale("example.png").unwrap();
//! let edges = canny(&raw, &CannyParams::new(1.0, 20.0, 40.0)).unwrap();
//! save_grid(&edges, "edges_output.png").unwrap();
//! ```
//!
//! ## Stepwise Usage
//!
//! ```rust,no_run
//! use canny_edge::{canny_stepwise, load_grayscale, side_by_side, CannyParams};
//!
//! let raw = load_grayscale("example.png").unwrap();
//! let stages = canny_stepwise(&raw, &CannyParams::new(1.0, 20.0, 40.0)).unwrap();
//!
//! // raw, denoised, magnitude, suppressed, classified, tracked
//! side_by_side(&stages.sequence()).save("stages.png").unwrap();
//! ```
//!
//! ## Hysteresis Caveat
//!
//! [`track_edges`] makes a single row-major pass and mutates the grid as it
//! goes. A chain of weak pixels only survives when the scan reaches its strong
//! anchor first; chains that lead up to a strong pixel from the left or from
//! above are mostly dropped. Use [`TrackingMode::Connected`] for textbook
//! connected-component hysteresis.
//!
//! ## Optional Features
//!
//! ### Logger Feature
//!
//! ```toml
//! [dependencies]
//! canny-edge = { version = "0.1.0", features = ["logger"] }
//! log = "0.4"
//! env_logger = "0.11"
//! ```
//!
//! ```rust,no_run
//! use canny_edge::{canny, load_grayscale, CannyParams};
//!
//! // Initialize logger to see debug output
//! env_logger::init();
//!
//! let raw = load_grayscale("example.png").unwrap();
//! let edges = canny(&raw, &CannyParams::default()).unwrap();
//! // With logger feature, you'll see debug messages like:
//! // DEBUG canny_edge::smoothing: denoise 480x640 with Bilateral, sigma 1
//! // DEBUG canny_edge::threshold: double threshold (20, 40): 5123 strong, 2210 weak
//! ```

// Conditional logging macros
#[cfg(feature = "logger")]
macro_rules! debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(feature = "logger"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

pub mod angle;
pub mod error;
pub mod gradient;
pub mod grid;
pub mod io;
pub mod pipeline;
pub mod smoothing;
pub mod suppression;
pub mod threshold;
pub mod tracking;
pub mod visualize;

pub use angle::{quantize_degrees, quantize_radians, Orientation};
pub use error::{CannyError, Result};
pub use gradient::{sobel_gradients, GradientField};
pub use grid::Grid;
pub use io::{load_grayscale, save_grid};
pub use pipeline::{canny, canny_stepwise, run, CannyOutput, CannyParams, Mode, Stages};
pub use smoothing::{denoise, Smoothing};
pub use suppression::non_maximum_suppression;
pub use threshold::{double_threshold, double_threshold_in_place, EdgeMarkers};
pub use tracking::{track, track_edges, track_edges_connected, TrackingMode};
pub use visualize::{overlay_edges, side_by_side};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{from_rows, to_rows};

    const W: f32 = threshold::DEFAULT_WEAK;
    const S: f32 = threshold::DEFAULT_STRONG;

    #[test]
    fn test_debug_macro_no_panic() {
        debug!("Starting test");
        debug!("Processing data: {}", 42);
    }

    #[test]
    #[cfg(feature = "logger")]
    fn test_logger_feature_enabled() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
        log::info!("running the fast pipeline with debug records");

        let edges = canny(&grid::filled(8, 8, 30.0), &CannyParams::default()).unwrap();
        assert!(edges.iter().all(|&v| v == 0.0));
    }

    #[test]
    #[cfg(not(feature = "logger"))]
    fn test_logger_feature_disabled() {
        let edges = canny(&grid::filled(8, 8, 30.0), &CannyParams::default()).unwrap();
        assert!(edges.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_zero_grid_through_every_stage() {
        let raw = from_rows(&vec![vec![0.0; 3]; 3]).unwrap();
        let denoised = denoise(&raw, 1.0, Smoothing::Bilateral).unwrap();
        let field = sobel_gradients(&denoised);
        let suppressed = non_maximum_suppression(&field.magnitude, &field.direction).unwrap();
        let (mut classified, weak) =
            double_threshold(&suppressed, 10.0, 20.0, EdgeMarkers::default());
        let snapshot = classified.clone();
        track_edges(&mut classified, weak, S);

        for g in [&denoised, &field.magnitude, &suppressed, &snapshot, &classified] {
            assert_eq!(to_rows(g), vec![vec![0.0; 3]; 3]);
        }
    }

    #[test]
    fn test_strong_centre_promotes_orthogonal_neighbours() {
        let mut grid = from_rows(&[
            vec![0.0, W, 0.0],
            vec![W, S, W],
            vec![0.0, W, 0.0],
        ])
        .unwrap();
        track_edges(&mut grid, W, S);
        assert_eq!(
            to_rows(&grid),
            vec![vec![0.0, S, 0.0], vec![S, S, S], vec![0.0, S, 0.0]]
        );
    }

    #[test]
    fn test_corner_weak_pixel_without_strong_neighbour() {
        let mut grid = from_rows(&[
            vec![W, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .unwrap();
        track_edges(&mut grid, W, S);
        assert_eq!(to_rows(&grid), vec![vec![0.0; 3]; 3]);
    }

    #[test]
    fn test_weak_run_left_of_strong_is_only_partly_promoted() {
        // Scanned left to right: the two leftmost weak pixels are visited
        // before their right neighbour has been promoted.
        let mut grid = from_rows(&[vec![W, W, W, S]]).unwrap();
        track_edges(&mut grid, W, S);
        assert_eq!(to_rows(&grid), vec![vec![0.0, 0.0, S, S]]);

        let mut grid = from_rows(&[vec![W, W, W, S]]).unwrap();
        track_edges_connected(&mut grid, W, S);
        assert_eq!(to_rows(&grid), vec![vec![S, S, S, S]]);
    }

    #[test]
    fn test_tracking_is_idempotent_on_binary_grid() {
        let rows = vec![vec![S, 0.0, 0.0], vec![0.0, S, S], vec![0.0, 0.0, 0.0]];
        let mut grid = from_rows(&rows).unwrap();
        track_edges(&mut grid, W, S);
        assert_eq!(to_rows(&grid), rows);
        track_edges(&mut grid, W, S);
        assert_eq!(to_rows(&grid), rows);
    }
}
