use serde::{Deserialize, Serialize};

/// Topological dimension of a point set, as used in DE-9IM matrix cells.
///
/// The ordering `Empty < P < L < A` matches the numeric values -1, 0, 1, 2.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// The empty set, value -1, matrix symbol `F`.
    Empty,
    /// Zero-dimensional (points).
    P,
    /// One-dimensional (lines).
    L,
    /// Two-dimensional (areas).
    A,
}

impl Dimension {
    /// Numeric dimension value, -1 for the empty set.
    pub fn value(&self) -> i32 {
        match self {
            Dimension::Empty => -1,
            Dimension::P => 0,
            Dimension::L => 1,
            Dimension::A => 2,
        }
    }

    /// The DE-9IM matrix symbol for this cell value.
    pub fn symbol(&self) -> char {
        match self {
            Dimension::Empty => 'F',
            Dimension::P => '0',
            Dimension::L => '1',
            Dimension::A => '2',
        }
    }
}
