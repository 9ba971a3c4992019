//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A linear ring's first and last coordinates differ.
    #[error("points of ring do not form a closed line")]
    RingNotClosed,

    /// A linear ring has too few coordinates.
    #[error("invalid number of points in ring (found {0}, must be 0 or >= 4)")]
    RingTooFewPoints(usize),

    /// A DE-9IM pattern string is not 9 characters of `012TF*`.
    #[error("invalid intersection pattern: {0}")]
    InvalidPattern(String),
}
