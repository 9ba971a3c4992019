use serde::{Deserialize, Serialize};

/// A single coordinate tuple with an optional third ordinate.
///
/// Equality is exact floating-point equality over all present ordinates.
/// Topological algorithms compare coordinates in two dimensions only; use
/// [`Coord::equals_2d`] for that.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    /// Easting ordinate.
    pub x: f64,
    /// Northing ordinate.
    pub y: f64,
    /// Optional elevation ordinate, carried through codecs but ignored by
    /// every topological operation.
    pub z: Option<f64>,
}

impl Coord {
    /// Creates a 2D coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a coordinate with an elevation ordinate.
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Planar equality, ignoring z.
    pub fn equals_2d(&self, other: &Coord) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Planar euclidean distance to `other`.
    pub fn distance(&self, other: &Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint of `self` and `other`, with no elevation.
    pub fn mid(&self, other: &Coord) -> Coord {
        Coord::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// True when both planar ordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Coord {
    fn from(value: (f64, f64)) -> Self {
        Coord::new(value.0, value.1)
    }
}
