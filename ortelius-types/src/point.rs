use crate::{Coord, UNSET_SRID};
use serde::{Deserialize, Serialize};

/// A single location, or the empty point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    /// The point's coordinate, `None` for the empty point.
    pub coord: Option<Coord>,
    /// Spatial reference identifier.
    pub srid: i32,
}

impl Point {
    /// Creates a point at the given coordinate.
    pub fn new(coord: Coord) -> Self {
        Self {
            coord: Some(coord),
            srid: UNSET_SRID,
        }
    }

    /// Creates the empty point.
    pub fn empty() -> Self {
        Self {
            coord: None,
            srid: UNSET_SRID,
        }
    }

    /// True when the point has no coordinate.
    pub fn is_empty(&self) -> bool {
        self.coord.is_none()
    }
}

impl From<Coord> for Point {
    fn from(value: Coord) -> Self {
        Point::new(value)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}
