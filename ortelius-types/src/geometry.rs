use crate::envelope::Envelope;
use crate::{
    Coord, Dimension, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use serde::{Deserialize, Serialize};

/// Value of the SRID field meaning "no reference system assigned".
pub const UNSET_SRID: i32 = -1;

/// Tag identifying a geometry variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    /// Single location.
    Point,
    /// Poly-line.
    LineString,
    /// Closed poly-line usable as a polygon ring.
    LinearRing,
    /// Area with optional holes.
    Polygon,
    /// Collection of points.
    MultiPoint,
    /// Collection of lines.
    MultiLineString,
    /// Collection of polygons.
    MultiPolygon,
    /// Heterogeneous collection.
    GeometryCollection,
}

impl GeometryType {
    /// Numeric type code of the flat call surface. A linear ring reports
    /// the line code, as the original library's host bindings did.
    pub fn id(&self) -> i32 {
        match self {
            GeometryType::Point => 1,
            GeometryType::LineString | GeometryType::LinearRing => 2,
            GeometryType::Polygon => 3,
            GeometryType::MultiPoint => 4,
            GeometryType::MultiLineString => 5,
            GeometryType::MultiPolygon => 6,
            GeometryType::GeometryCollection => 7,
        }
    }

    /// Human-readable variant name.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::LinearRing => "LinearRing",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

/// Any geometry variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Single location.
    Point(Point),
    /// Poly-line.
    LineString(LineString),
    /// Closed poly-line.
    LinearRing(LinearRing),
    /// Area with optional holes.
    Polygon(Polygon),
    /// Collection of points.
    MultiPoint(MultiPoint),
    /// Collection of lines.
    MultiLineString(MultiLineString),
    /// Collection of polygons.
    MultiPolygon(MultiPolygon),
    /// Heterogeneous collection.
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// The variant tag.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::LinearRing(_) => GeometryType::LinearRing,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// True when the geometry holds no coordinates at any level.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::LinearRing(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// Topological dimension of the variant. Collections report the
    /// maximum over members, or [`Dimension::Empty`] with no members.
    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::P,
            Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => {
                Dimension::L
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::A,
            Geometry::GeometryCollection(g) => g
                .geometries
                .iter()
                .map(Geometry::dimension)
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }

    /// Dimension of the geometry's boundary.
    ///
    /// Points have no boundary; an open line's boundary is its endpoints;
    /// a closed line has none; an area's boundary is its rings.
    pub fn boundary_dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Empty,
            Geometry::LinearRing(_) => Dimension::Empty,
            Geometry::LineString(g) => {
                if g.is_closed() {
                    Dimension::Empty
                } else {
                    Dimension::P
                }
            }
            Geometry::MultiLineString(g) => {
                if g.is_closed() {
                    Dimension::Empty
                } else {
                    Dimension::P
                }
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::L,
            Geometry::GeometryCollection(g) => g
                .geometries
                .iter()
                .map(Geometry::boundary_dimension)
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }

    /// Total number of coordinates over all levels.
    pub fn num_points(&self) -> usize {
        match self {
            Geometry::Point(g) => usize::from(!g.is_empty()),
            Geometry::LineString(g) => g.coords.len(),
            Geometry::LinearRing(g) => g.coords.len(),
            Geometry::Polygon(g) => g.rings().map(|ring| ring.coords.len()).sum(),
            Geometry::MultiPoint(g) => g.points.iter().filter(|p| !p.is_empty()).count(),
            Geometry::MultiLineString(g) => g.lines.iter().map(|line| line.coords.len()).sum(),
            Geometry::MultiPolygon(g) => g
                .polygons
                .iter()
                .map(|polygon| polygon.rings().map(|ring| ring.coords.len()).sum::<usize>())
                .sum(),
            Geometry::GeometryCollection(g) => {
                g.geometries.iter().map(Geometry::num_points).sum()
            }
        }
    }

    /// Number of members for collection variants, 1 for atomic variants.
    pub fn num_geometries(&self) -> usize {
        match self {
            Geometry::MultiPoint(g) => g.points.len(),
            Geometry::MultiLineString(g) => g.lines.len(),
            Geometry::MultiPolygon(g) => g.polygons.len(),
            Geometry::GeometryCollection(g) => g.geometries.len(),
            _ => 1,
        }
    }

    /// The nth member of a collection variant, as a standalone geometry.
    /// `None` for atomic variants or an out-of-range index.
    pub fn geometry_n(&self, n: usize) -> Option<Geometry> {
        match self {
            Geometry::MultiPoint(g) => g.points.get(n).cloned().map(Geometry::Point),
            Geometry::MultiLineString(g) => g.lines.get(n).cloned().map(Geometry::LineString),
            Geometry::MultiPolygon(g) => g.polygons.get(n).cloned().map(Geometry::Polygon),
            Geometry::GeometryCollection(g) => g.geometries.get(n).cloned(),
            _ => None,
        }
    }

    /// All coordinates in traversal order.
    pub fn coords(&self) -> Vec<Coord> {
        let mut out = Vec::with_capacity(self.num_points());
        self.push_coords(&mut out);
        out
    }

    fn push_coords(&self, out: &mut Vec<Coord>) {
        match self {
            Geometry::Point(g) => out.extend(g.coord),
            Geometry::LineString(g) => out.extend_from_slice(&g.coords),
            Geometry::LinearRing(g) => out.extend_from_slice(&g.coords),
            Geometry::Polygon(g) => {
                for ring in g.rings() {
                    out.extend_from_slice(&ring.coords);
                }
            }
            Geometry::MultiPoint(g) => out.extend(g.points.iter().filter_map(|p| p.coord)),
            Geometry::MultiLineString(g) => {
                for line in &g.lines {
                    out.extend_from_slice(&line.coords);
                }
            }
            Geometry::MultiPolygon(g) => {
                for polygon in &g.polygons {
                    for ring in polygon.rings() {
                        out.extend_from_slice(&ring.coords);
                    }
                }
            }
            Geometry::GeometryCollection(g) => {
                for member in &g.geometries {
                    member.push_coords(out);
                }
            }
        }
    }

    /// Planar bounding box over all coordinates.
    pub fn envelope(&self) -> Envelope {
        let mut envelope = Envelope::new();
        for coord in self.coords() {
            envelope.expand_to_include(&coord);
        }
        envelope
    }

    /// Area of polygonal content, zero for everything else.
    pub fn area(&self) -> f64 {
        match self {
            Geometry::Polygon(g) => g.area(),
            Geometry::MultiPolygon(g) => g.area(),
            Geometry::GeometryCollection(g) => g.geometries.iter().map(Geometry::area).sum(),
            _ => 0.0,
        }
    }

    /// Length of lineal content, perimeter of polygonal content.
    pub fn length(&self) -> f64 {
        match self {
            Geometry::LineString(g) => g.length(),
            Geometry::LinearRing(g) => g.length(),
            Geometry::Polygon(g) => g.perimeter(),
            Geometry::MultiLineString(g) => g.lines.iter().map(LineString::length).sum(),
            Geometry::MultiPolygon(g) => g.polygons.iter().map(Polygon::perimeter).sum(),
            Geometry::GeometryCollection(g) => g.geometries.iter().map(Geometry::length).sum(),
            _ => 0.0,
        }
    }

    /// The spatial reference identifier.
    pub fn srid(&self) -> i32 {
        match self {
            Geometry::Point(g) => g.srid,
            Geometry::LineString(g) => g.srid,
            Geometry::LinearRing(g) => g.srid,
            Geometry::Polygon(g) => g.srid,
            Geometry::MultiPoint(g) => g.srid,
            Geometry::MultiLineString(g) => g.srid,
            Geometry::MultiPolygon(g) => g.srid,
            Geometry::GeometryCollection(g) => g.srid,
        }
    }

    /// Rewrites the spatial reference identifier, leaving topology
    /// untouched. This is the model's only in-place mutation.
    pub fn set_srid(&mut self, srid: i32) {
        match self {
            Geometry::Point(g) => g.srid = srid,
            Geometry::LineString(g) => g.srid = srid,
            Geometry::LinearRing(g) => g.srid = srid,
            Geometry::Polygon(g) => g.srid = srid,
            Geometry::MultiPoint(g) => g.srid = srid,
            Geometry::MultiLineString(g) => g.srid = srid,
            Geometry::MultiPolygon(g) => g.srid = srid,
            Geometry::GeometryCollection(g) => g.srid = srid,
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Geometry::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Geometry::LineString(value)
    }
}

impl From<LinearRing> for Geometry {
    fn from(value: LinearRing) -> Self {
        Geometry::LinearRing(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Geometry::Polygon(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Geometry::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Geometry::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Geometry::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::GeometryCollection(value)
    }
}
