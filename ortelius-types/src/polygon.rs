use crate::ring::signed_area;
use crate::{LinearRing, UNSET_SRID};
use serde::{Deserialize, Serialize};

/// An area bounded by one exterior ring and any number of interior rings
/// (holes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    /// The outer boundary.
    pub exterior: LinearRing,
    /// Holes cut out of the area enclosed by the exterior.
    pub interiors: Vec<LinearRing>,
    /// Spatial reference identifier.
    pub srid: i32,
}

impl Polygon {
    /// Creates a polygon from pre-validated rings.
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Self {
            exterior,
            interiors,
            srid: UNSET_SRID,
        }
    }

    /// Creates the empty polygon.
    pub fn empty() -> Self {
        Self::new(LinearRing::empty(), vec![])
    }

    /// True when the exterior ring is empty.
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    /// All rings, exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// Unsigned area of the polygon, holes subtracted.
    pub fn area(&self) -> f64 {
        let outer = signed_area(&self.exterior.coords).abs();
        let holes: f64 = self
            .interiors
            .iter()
            .map(|ring| signed_area(&ring.coords).abs())
            .sum();
        outer - holes
    }

    /// Total boundary length over all rings.
    pub fn perimeter(&self) -> f64 {
        self.rings().map(|ring| ring.length()).sum()
    }
}

impl From<LinearRing> for Polygon {
    fn from(value: LinearRing) -> Self {
        Polygon::new(value, vec![])
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.exterior == other.exterior && self.interiors == other.interiors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coord;

    fn ring(coords: &[(f64, f64)]) -> LinearRing {
        LinearRing::new(coords.iter().map(|&(x, y)| Coord::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn area_subtracts_holes() {
        let exterior = ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
        let hole = ring(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)]);
        let polygon = Polygon::new(exterior, vec![hole]);
        assert_eq!(polygon.area(), 96.0);
        assert_eq!(polygon.perimeter(), 48.0);
    }
}
