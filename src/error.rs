use thiserror::Error;

/// Errors reported by the edge detection pipeline and its collaborators.
///
/// Out-of-range neighbours and inverted thresholds are deliberately not
/// represented here: both degrade to "no edge" instead of failing.
#[derive(Debug, Error)]
pub enum CannyError {
    /// The grid has zero rows or zero columns.
    #[error("grid is empty ({rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    /// Nested rows do not all share the width of the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A flat buffer does not match the requested dimensions.
    #[error("buffer of {len} values cannot hold a {rows}x{cols} grid")]
    BufferSize { rows: usize, cols: usize, len: usize },

    /// A cell holds NaN or an infinity.
    #[error("non-finite value at ({row}, {col})")]
    NonFinite { row: usize, col: usize },

    /// The smoothing strength must be a finite value above zero.
    #[error("smoothing strength must be finite and > 0, got {0}")]
    InvalidSigma(f32),

    /// Two grids that must be co-indexed have different shapes.
    #[error("grid dimensions differ: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Weak and strong markers must be distinct, finite and non-zero.
    #[error("invalid edge markers: weak={weak}, strong={strong}")]
    InvalidMarkers { weak: f32, strong: f32 },

    /// Decoding or encoding an image file failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// A file outside the image codecs, such as a log file, could not be
    /// opened.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CannyError>;
