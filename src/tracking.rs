//! Hysteresis edge tracking over a classified grid.
//!
//! The default tracker is a **single forward sweep** in row-major order that
//! mutates the grid as it goes. A weak pixel becomes strong when any
//! in-bounds neighbour is strong *at the moment it is visited*, and is
//! dropped otherwise. Promotions therefore only propagate along the scan
//! direction: a run of weak pixels whose strong anchor lies to its right (or
//! below) is dropped except for the pixel touching the anchor. This is not a
//! connected-component fill.
//!
//! [`TrackingMode::Connected`] is an explicit deviation that propagates
//! through every 8-connected chain of weak pixels.

use crate::grid::{self, Grid, NEIGHBORS_8};
use crate::threshold::ZERO;

/// Which hysteresis rule to apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackingMode {
    /// Order-dependent single forward sweep ([`track_edges`]).
    #[default]
    SinglePass,
    /// Full 8-connected propagation from strong seeds
    /// ([`track_edges_connected`]). Output differs from [`track_edges`].
    Connected,
}

/// Runs the tracker selected by `mode` in place.
pub fn track(grid: &mut Grid, weak: f32, strong: f32, mode: TrackingMode) {
    match mode {
        TrackingMode::SinglePass => track_edges(grid, weak, strong),
        TrackingMode::Connected => track_edges_connected(grid, weak, strong),
    }
}

/// Single-pass, order-dependent hysteresis. See the module docs.
///
/// Neighbours outside the grid are skipped. Cells that are neither `weak` nor
/// `strong` are left untouched, so a classified grid comes out holding only
/// zero and `strong`.
///
/// # Arguments
///
/// * `grid` - Classified grid, rewritten in place
/// * `weak` - Marker of weak candidates
/// * `strong` - Marker of confirmed edges
///
/// # Algorithm
///
/// 1. Visit cells row by row, left to right
/// 2. For a `weak` cell, look at its eight neighbours as they are *now*
/// 3. Write `strong` if any of them is `strong`, zero otherwise
pub fn track_edges(grid: &mut Grid, weak: f32, strong: f32) {
    let shape = grid::dims(grid);
    let (rows, cols) = shape;

    for row in 0..rows {
        for col in 0..cols {
            if grid::at(grid, row, col) != weak {
                continue;
            }
            let touches_strong = NEIGHBORS_8.iter().any(|&delta| {
                grid::offset(shape, row, col, delta)
                    .is_some_and(|(r, c)| grid::at(grid, r, c) == strong)
            });
            grid::set(grid, row, col, if touches_strong { strong } else { ZERO });
        }
    }

    debug!(
        "single-pass tracking left {} strong pixels",
        grid.iter().filter(|&&v| v == strong).count()
    );
}

/// Connected-component hysteresis: every weak pixel linked to a strong pixel
/// through a chain of 8-connected weak pixels becomes strong, the remaining
/// weak pixels are dropped. Uses an explicit stack, so long chains cannot
/// overflow the call stack.
pub fn track_edges_connected(grid: &mut Grid, weak: f32, strong: f32) {
    let shape = grid::dims(grid);
    let (rows, cols) = shape;
    let mut stack = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            if grid::at(grid, row, col) == strong {
                stack.push((row, col));
            }
        }
    }

    while let Some((row, col)) = stack.pop() {
        for &delta in &NEIGHBORS_8 {
            if let Some((r, c)) = grid::offset(shape, row, col, delta) {
                if grid::at(grid, r, c) == weak {
                    grid::set(grid, r, c, strong);
                    stack.push((r, c));
                }
            }
        }
    }

    for value in grid.iter_mut() {
        if *value == weak {
            *value = ZERO;
        }
    }
    debug!(
        "connected tracking left {} strong pixels",
        grid.iter().filter(|&&v| v == strong).count()
    );
}
