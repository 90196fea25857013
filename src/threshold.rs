//! Double thresholding into zero, weak and strong pixel classes.

use crate::grid::{self, Grid};

/// Value of a pixel that is not an edge.
pub const ZERO: f32 = 0.0;
/// Default marker of a weak edge pixel.
pub const DEFAULT_WEAK: f32 = 50.0;
/// Default marker of a strong edge pixel.
pub const DEFAULT_STRONG: f32 = 255.0;

/// Numeric markers written into classified grids.
///
/// Markers share the numeric domain of magnitudes, so a classified grid
/// cannot be told apart from a magnitude grid that happens to hold the same
/// values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeMarkers {
    pub weak: f32,
    pub strong: f32,
}

impl Default for EdgeMarkers {
    fn default() -> Self {
        Self {
            weak: DEFAULT_WEAK,
            strong: DEFAULT_STRONG,
        }
    }
}

impl EdgeMarkers {
    /// Markers must be finite, non-zero and distinct from each other.
    pub fn is_valid(&self) -> bool {
        self.weak.is_finite()
            && self.strong.is_finite()
            && self.weak != ZERO
            && self.strong != ZERO
            && self.weak != self.strong
    }
}

/// Classifies a single magnitude against the pair `(low, high)`.
///
/// - `m > high` → strong
/// - `low <= m <= high` → weak
/// - `m < low` → zero
///
/// `low > high` is not rejected: the weak band is then empty. Values matching
/// none of the rules (NaN) are classified as zero.
#[inline]
pub fn classify(magnitude: f32, low: f32, high: f32, markers: EdgeMarkers) -> f32 {
    if magnitude > high {
        markers.strong
    } else if magnitude >= low {
        markers.weak
    } else {
        ZERO
    }
}

/// Classifies every pixel of `grid` in place and returns the weak marker.
pub fn double_threshold_in_place(
    grid: &mut Grid,
    low: f32,
    high: f32,
    markers: EdgeMarkers,
) -> f32 {
    grid::for_each_row_mut(grid, |_, values| {
        for value in values.iter_mut() {
            *value = classify(*value, low, high, markers);
        }
    });

    debug!(
        "double threshold ({}, {}): {} strong, {} weak",
        low,
        high,
        grid.iter().filter(|&&v| v == markers.strong).count(),
        grid.iter().filter(|&&v| v == markers.weak).count()
    );
    markers.weak
}

/// Classifies a copy of `grid`, returning the classified grid and the weak
/// marker.
pub fn double_threshold(grid: &Grid, low: f32, high: f32, markers: EdgeMarkers) -> (Grid, f32) {
    let mut classified = grid.clone();
    let weak = double_threshold_in_place(&mut classified, low, high, markers);
    (classified, weak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{dims, filled, from_rows, to_rows};

    const M: EdgeMarkers = EdgeMarkers {
        weak: DEFAULT_WEAK,
        strong: DEFAULT_STRONG,
    };

    #[test]
    fn test_band_boundaries() {
        assert_eq!(classify(9.99, 10.0, 20.0, M), ZERO);
        assert_eq!(classify(10.0, 10.0, 20.0, M), DEFAULT_WEAK);
        assert_eq!(classify(15.0, 10.0, 20.0, M), DEFAULT_WEAK);
        assert_eq!(classify(20.0, 10.0, 20.0, M), DEFAULT_WEAK);
        assert_eq!(classify(20.01, 10.0, 20.0, M), DEFAULT_STRONG);
    }

    #[test]
    fn test_inverted_thresholds_have_empty_weak_band() {
        // low > high: nothing can satisfy low <= m <= high.
        for m in [0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0] {
            assert_ne!(classify(m, 20.0, 10.0, M), DEFAULT_WEAK, "m = {m}");
        }
        assert_eq!(classify(15.0, 20.0, 10.0, M), DEFAULT_STRONG);
        assert_eq!(classify(5.0, 20.0, 10.0, M), ZERO);
    }

    #[test]
    fn test_nan_is_zero() {
        assert_eq!(classify(f32::NAN, 10.0, 20.0, M), ZERO);
    }

    #[test]
    fn test_grid_classification() {
        let grid = from_rows(&[vec![0.0, 10.0, 19.0], vec![20.0, 21.0, 300.0]]).unwrap();
        let (classified, weak) = double_threshold(&grid, 10.0, 20.0, M);
        assert_eq!(weak, DEFAULT_WEAK);
        assert_eq!(dims(&classified), (2, 3));
        assert_eq!(
            to_rows(&classified),
            vec![vec![0.0, 50.0, 50.0], vec![50.0, 255.0, 255.0]]
        );
        // Input untouched by the copying variant.
        assert_eq!(to_rows(&grid)[1][2], 300.0);
    }

    #[test]
    fn test_custom_markers_are_returned() {
        let markers = EdgeMarkers {
            weak: 1.0,
            strong: 2.0,
        };
        let mut grid = from_rows(&[vec![5.0, 15.0, 25.0]]).unwrap();
        let weak = double_threshold_in_place(&mut grid, 10.0, 20.0, markers);
        assert_eq!(weak, 1.0);
        assert_eq!(to_rows(&grid), vec![vec![0.0, 1.0, 2.0]]);
    }

    #[test]
    fn test_all_zero_stays_zero() {
        let (classified, _) = double_threshold(&filled(3, 3, 0.0), 10.0, 20.0, M);
        assert_eq!(to_rows(&classified), vec![vec![0.0; 3]; 3]);
    }

    #[test]
    fn test_marker_validation() {
        assert!(EdgeMarkers::default().is_valid());
        assert!(!EdgeMarkers {
            weak: 0.0,
            strong: 255.0
        }
        .is_valid());
        assert!(!EdgeMarkers {
            weak: 9.0,
            strong: 9.0
        }
        .is_valid());
        assert!(!EdgeMarkers {
            weak: f32::NAN,
            strong: 255.0
        }
        .is_valid());
    }
}
