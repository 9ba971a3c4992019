use crate::{LineString, Point, Polygon, UNSET_SRID};
use serde::{Deserialize, Serialize};

/// A homogeneous collection of points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiPoint {
    /// Member points.
    pub points: Vec<Point>,
    /// Spatial reference identifier.
    pub srid: i32,
}

impl MultiPoint {
    /// Creates a multipoint from its members.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            srid: UNSET_SRID,
        }
    }

    /// True when there are no members or all members are empty.
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(|p| p.is_empty())
    }
}

impl PartialEq for MultiPoint {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

/// A homogeneous collection of lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiLineString {
    /// Member lines.
    pub lines: Vec<LineString>,
    /// Spatial reference identifier.
    pub srid: i32,
}

impl MultiLineString {
    /// Creates a multilinestring from its members.
    pub fn new(lines: Vec<LineString>) -> Self {
        Self {
            lines,
            srid: UNSET_SRID,
        }
    }

    /// True when there are no members or all members are empty.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// True when every non-empty member line is closed.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.lines.iter().filter(|l| !l.is_empty()).all(LineString::is_closed)
    }
}

impl PartialEq for MultiLineString {
    fn eq(&self, other: &Self) -> bool {
        self.lines == other.lines
    }
}

/// A homogeneous collection of polygons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiPolygon {
    /// Member polygons.
    pub polygons: Vec<Polygon>,
    /// Spatial reference identifier.
    pub srid: i32,
}

impl MultiPolygon {
    /// Creates a multipolygon from its members.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self {
            polygons,
            srid: UNSET_SRID,
        }
    }

    /// True when there are no members or all members are empty.
    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(Polygon::is_empty)
    }

    /// Combined area of all members.
    pub fn area(&self) -> f64 {
        self.polygons.iter().map(Polygon::area).sum()
    }
}

impl PartialEq for MultiPolygon {
    fn eq(&self, other: &Self) -> bool {
        self.polygons == other.polygons
    }
}
