use crate::{Coord, GeometryError, UNSET_SRID};
use serde::{Deserialize, Serialize};

/// An ordered sequence of coordinates interpreted as connected straight
/// segments.
///
/// No structural validation happens at construction; a line with fewer than
/// two points is representable and is reported by the validity checker
/// instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineString {
    /// Vertices of the line.
    pub coords: Vec<Coord>,
    /// Spatial reference identifier.
    pub srid: i32,
}

impl LineString {
    /// Creates a line from its vertices.
    pub fn new(coords: Vec<Coord>) -> Self {
        Self {
            coords,
            srid: UNSET_SRID,
        }
    }

    /// Creates the empty line.
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// True when the line has no vertices.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// True when the first and last vertices coincide in the plane. The
    /// empty line is not closed.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => false,
        }
    }

    /// Planar length of the line.
    pub fn length(&self) -> f64 {
        self.coords
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }
}

impl PartialEq for LineString {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

/// A closed [`LineString`] with at least four points, usable as a polygon
/// ring.
///
/// Closure and the minimum point count are the only construction-time
/// checks the model performs anywhere; they keep rings well-formed enough
/// for ring-based algorithms to run, while full topological validity stays
/// an on-demand check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRing {
    /// Vertices of the ring; first and last are equal.
    pub coords: Vec<Coord>,
    /// Spatial reference identifier.
    pub srid: i32,
}

impl LinearRing {
    /// Creates a ring from its vertices.
    ///
    /// Fails when the sequence is non-empty but has fewer than four points,
    /// or when the first and last points differ in the plane.
    pub fn new(coords: Vec<Coord>) -> Result<Self, GeometryError> {
        if !coords.is_empty() {
            if coords.len() < 4 {
                return Err(GeometryError::RingTooFewPoints(coords.len()));
            }
            let first = &coords[0];
            let last = &coords[coords.len() - 1];
            if !first.equals_2d(last) {
                return Err(GeometryError::RingNotClosed);
            }
        }
        Ok(Self {
            coords,
            srid: UNSET_SRID,
        })
    }

    /// Creates the empty ring.
    pub fn empty() -> Self {
        Self {
            coords: vec![],
            srid: UNSET_SRID,
        }
    }

    /// True when the ring has no vertices.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Ring perimeter.
    pub fn length(&self) -> f64 {
        self.coords
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    /// The ring reinterpreted as a closed line.
    pub fn to_line_string(&self) -> LineString {
        LineString {
            coords: self.coords.clone(),
            srid: self.srid,
        }
    }
}

impl PartialEq for LinearRing {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}
