//! Quantization of gradient directions into four undirected orientations.

/// Undirected line orientation used to pick the two comparison neighbours
/// during non-maximum suppression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// 0°: compare with left and right.
    Horizontal,
    /// 45°: compare with upper-right and lower-left.
    Diagonal45,
    /// 90°: compare with up and down.
    Vertical,
    /// 135°: compare with upper-left and lower-right.
    Diagonal135,
}

impl Orientation {
    /// Bucket centre in degrees.
    pub const fn degrees(self) -> u16 {
        match self {
            Orientation::Horizontal => 0,
            Orientation::Diagonal45 => 45,
            Orientation::Vertical => 90,
            Orientation::Diagonal135 => 135,
        }
    }

    /// The two neighbour offsets `(d_row, d_col)` along this orientation.
    /// Rows grow downwards, so "up" is `d_row = -1`.
    pub const fn neighbor_offsets(self) -> [(isize, isize); 2] {
        match self {
            Orientation::Horizontal => [(0, -1), (0, 1)],
            Orientation::Diagonal45 => [(-1, 1), (1, -1)],
            Orientation::Vertical => [(-1, 0), (1, 0)],
            Orientation::Diagonal135 => [(-1, -1), (1, 1)],
        }
    }
}

/// Quantizes an angle in degrees to the nearest of 0°, 45°, 90° or 135°.
///
/// The full circle is first folded into `[0, 180)` so that opposite
/// directions share a bucket. Each bucket spans 45° centred on its value and
/// the 0° bucket wraps across the 180°/0° seam. NaN lands in the 0° bucket.
pub fn quantize_degrees(degrees: f32) -> Orientation {
    let folded = degrees.rem_euclid(180.0);
    if (22.5..67.5).contains(&folded) {
        Orientation::Diagonal45
    } else if (67.5..112.5).contains(&folded) {
        Orientation::Vertical
    } else if (112.5..157.5).contains(&folded) {
        Orientation::Diagonal135
    } else {
        Orientation::Horizontal
    }
}

/// Quantizes an angle in radians, e.g. the output of `atan2`.
#[inline]
pub fn quantize_radians(radians: f32) -> Orientation {
    quantize_degrees(radians.to_degrees())
}
