//! Orientation of point triplets.

use crate::Coord;
use serde::{Deserialize, Serialize};

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Determines orientation of a triplet of points.
    pub fn triplet(p: &Coord, q: &Coord, r: &Coord) -> Self {
        let det = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
        if det > 0.0 {
            Self::Clockwise
        } else if det < 0.0 {
            Self::Counterclockwise
        } else {
            Self::Collinear
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triplet_orientations() {
        let p = Coord::new(0.0, 0.0);
        let q = Coord::new(1.0, 0.0);
        assert_eq!(
            Orientation::triplet(&p, &q, &Coord::new(1.0, 1.0)),
            Orientation::Counterclockwise
        );
        assert_eq!(
            Orientation::triplet(&p, &q, &Coord::new(1.0, -1.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            Orientation::triplet(&p, &q, &Coord::new(2.0, 0.0)),
            Orientation::Collinear
        );
    }
}
