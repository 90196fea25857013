//! The five-stage Canny pipeline in fast and stepwise form.
//!
//! Fast mode hands each stage's output straight to the next and lets
//! thresholding and tracking mutate that grid in place; only the final edge
//! grid survives. Stepwise mode copies the grid before every mutating stage,
//! so all intermediates remain available afterwards.

use crate::error::{CannyError, Result};
use crate::gradient::{sobel_gradients, GradientField};
use crate::grid::Grid;
use crate::smoothing::{denoise, Smoothing};
use crate::suppression::non_maximum_suppression;
use crate::threshold::{double_threshold_in_place, EdgeMarkers};
use crate::tracking::{track, TrackingMode};

/// Explicit parameters of a pipeline run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CannyParams {
    /// Smoothing strength. Used by [`Smoothing::Gaussian`]; validated but
    /// otherwise unused by [`Smoothing::Bilateral`].
    pub sigma: f32,
    /// Low threshold `t`.
    pub low_threshold: f32,
    /// High threshold `T`. Not required to exceed `t`.
    pub high_threshold: f32,
    pub smoothing: Smoothing,
    pub markers: EdgeMarkers,
    pub tracking: TrackingMode,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            low_threshold: 20.0,
            high_threshold: 40.0,
            smoothing: Smoothing::default(),
            markers: EdgeMarkers::default(),
            tracking: TrackingMode::default(),
        }
    }
}

impl CannyParams {
    /// Parameters with the given smoothing strength and thresholds and
    /// defaults for everything else.
    pub fn new(sigma: f32, low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            sigma,
            low_threshold,
            high_threshold,
            ..Self::default()
        }
    }

    /// Checks the parts of the configuration the stages cannot recover from.
    /// The threshold ordering is deliberately left to the caller.
    pub fn validate(&self) -> Result<()> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(CannyError::InvalidSigma(self.sigma));
        }
        if !self.markers.is_valid() {
            return Err(CannyError::InvalidMarkers {
                weak: self.markers.weak,
                strong: self.markers.strong,
            });
        }
        Ok(())
    }
}

/// Execution mode of [`run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Keep only the final edge grid.
    #[default]
    Fast,
    /// Keep every intermediate grid.
    Stepwise,
}

/// Every intermediate produced by a stepwise run.
#[derive(Clone, Debug, PartialEq)]
pub struct Stages {
    pub raw: Grid,
    pub denoised: Grid,
    pub gradient: GradientField,
    pub suppressed: Grid,
    pub classified: Grid,
    /// Weak marker written into `classified`.
    pub weak: f32,
    pub tracked: Grid,
}

impl Stages {
    /// The six grids in pipeline order: raw, denoised, magnitude,
    /// suppressed, classified, tracked.
    pub fn sequence(&self) -> [&Grid; 6] {
        [
            &self.raw,
            &self.denoised,
            &self.gradient.magnitude,
            &self.suppressed,
            &self.classified,
            &self.tracked,
        ]
    }
}

/// Result of [`run`].
#[derive(Clone, Debug, PartialEq)]
pub enum CannyOutput {
    Final(Grid),
    Stepwise(Box<Stages>),
}

impl CannyOutput {
    /// The final edge grid, holding only zero and the strong marker.
    pub fn final_grid(&self) -> &Grid {
        match self {
            CannyOutput::Final(grid) => grid,
            CannyOutput::Stepwise(stages) => &stages.tracked,
        }
    }

    /// Ordered grids for display: just the edge grid in fast mode, all six
    /// in stepwise mode.
    pub fn grids(&self) -> Vec<&Grid> {
        match self {
            CannyOutput::Final(grid) => vec![grid],
            CannyOutput::Stepwise(stages) => stages.sequence().to_vec(),
        }
    }
}

/// Runs the pipeline in the requested mode.
pub fn run(raw: &Grid, params: &CannyParams, mode: Mode) -> Result<CannyOutput> {
    match mode {
        Mode::Fast => canny(raw, params).map(CannyOutput::Final),
        Mode::Stepwise => canny_stepwise(raw, params).map(|s| CannyOutput::Stepwise(Box::new(s))),
    }
}

/// Fast mode: returns only the final edge grid.
///
/// # Errors
///
/// Invalid parameters or an empty or non-finite input grid.
pub fn canny(raw: &Grid, params: &CannyParams) -> Result<Grid> {
    params.validate()?;
    debug!("canny fast mode on {}x{}", raw.height(), raw.width());

    let denoised = denoise(raw, params.sigma, params.smoothing)?;
    let GradientField {
        magnitude,
        direction,
    } = sobel_gradients(&denoised);
    let mut edges = non_maximum_suppression(&magnitude, &direction)?;
    let weak = double_threshold_in_place(
        &mut edges,
        params.low_threshold,
        params.high_threshold,
        params.markers,
    );
    track(&mut edges, weak, params.markers.strong, params.tracking);
    Ok(edges)
}

/// Stepwise mode: copies the grid before each mutating stage and returns
/// every intermediate.
///
/// # Errors
///
/// Same as [`canny`].
pub fn canny_stepwise(raw: &Grid, params: &CannyParams) -> Result<Stages> {
    params.validate()?;
    debug!("canny stepwise mode on {}x{}", raw.height(), raw.width());

    let denoised = denoise(raw, params.sigma, params.smoothing)?;
    let gradient = sobel_gradients(&denoised);

    let suppressed = non_maximum_suppression(&gradient.magnitude, &gradient.direction)?;

    let mut classified = suppressed.clone();
    let weak = double_threshold_in_place(
        &mut classified,
        params.low_threshold,
        params.high_threshold,
        params.markers,
    );

    let mut tracked = classified.clone();
    track(&mut tracked, weak, params.markers.strong, params.tracking);

    Ok(Stages {
        raw: raw.clone(),
        denoised,
        gradient,
        suppressed,
        classified,
        weak,
        tracked,
    })
}
