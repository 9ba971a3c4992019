//! Boolean set operations between two geometries.
//!
//! Areal operand pairs go through ring noding and selective edge stitching
//! in [`area`]; every other dimension pairing works piecewise over noded
//! linework and point sets in [`linework`]. Geometry collections are not
//! accepted as operands.

mod area;
mod linework;

use crate::error::OrteliusError;
use ortelius_types::{
    Coord, Dimension, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};

/// The four boolean set operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverlayOp {
    /// Points common to both operands.
    Intersection,
    /// Points of either operand.
    Union,
    /// Points of the first operand not in the second.
    Difference,
    /// Points of exactly one operand.
    SymDifference,
}

/// Computes a boolean overlay of two geometries.
///
/// The result is the most specific type that fits: an atomic geometry for a
/// single component, a multi geometry for several of one dimension, a
/// collection for mixed dimensions, and a typed empty geometry when nothing
/// is left.
pub fn overlay(a: &Geometry, b: &Geometry, op: OverlayOp) -> Result<Geometry, OrteliusError> {
    if op == OverlayOp::SymDifference {
        let left = overlay(a, b, OverlayOp::Difference)?;
        let right = overlay(b, a, OverlayOp::Difference)?;
        return overlay(&left, &right, OverlayOp::Union);
    }
    if a.is_empty() || b.is_empty() {
        return Ok(empty_case(a, b, op));
    }
    if matches!(a, Geometry::GeometryCollection(_))
        || matches!(b, Geometry::GeometryCollection(_))
    {
        return Err(OrteliusError::Overlay(
            "geometry collection operands are not supported".into(),
        ));
    }
    if a.dimension() == Dimension::A && b.dimension() == Dimension::A {
        area::overlay_areal(a, b, op)
    } else {
        linework::overlay_mixed(a, b, op)
    }
}

/// Unions a sequence of geometries pairwise.
pub(crate) fn union_all(geometries: Vec<Geometry>) -> Result<Geometry, OrteliusError> {
    let mut members = geometries.into_iter();
    let Some(mut acc) = members.next() else {
        return Ok(empty_result(Dimension::A));
    };
    for member in members {
        acc = overlay(&acc, &member, OverlayOp::Union)?;
    }
    Ok(acc)
}

fn empty_case(a: &Geometry, b: &Geometry, op: OverlayOp) -> Geometry {
    match op {
        OverlayOp::Intersection => empty_result(a.dimension().min(b.dimension())),
        OverlayOp::Union | OverlayOp::SymDifference => {
            if a.is_empty() {
                b.clone()
            } else {
                a.clone()
            }
        }
        OverlayOp::Difference => {
            if a.is_empty() {
                empty_result(a.dimension())
            } else {
                a.clone()
            }
        }
    }
}

/// The conventional empty geometry for a result dimension.
pub(crate) fn empty_result(dimension: Dimension) -> Geometry {
    match dimension {
        Dimension::Empty => Geometry::GeometryCollection(GeometryCollection::empty()),
        Dimension::P => Geometry::Point(Point::empty()),
        Dimension::L => Geometry::LineString(LineString::empty()),
        Dimension::A => Geometry::Polygon(Polygon::empty()),
    }
}

/// Packs result components into the most specific geometry type, falling
/// back to the typed empty geometry of `fallback` when all are empty.
fn assemble(
    points: Vec<Coord>,
    lines: Vec<LineString>,
    polygons: Vec<Polygon>,
    fallback: Dimension,
) -> Geometry {
    let kinds =
        usize::from(!points.is_empty()) + usize::from(!lines.is_empty()) + usize::from(!polygons.is_empty());
    match kinds {
        0 => empty_result(fallback),
        1 => {
            if !polygons.is_empty() {
                pack_polygons(polygons)
            } else if !lines.is_empty() {
                pack_lines(lines)
            } else {
                pack_points(points)
            }
        }
        _ => {
            let mut members: Vec<Geometry> = Vec::new();
            for coord in points {
                members.push(Geometry::Point(Point::new(coord)));
            }
            for line in lines {
                members.push(Geometry::LineString(line));
            }
            for polygon in polygons {
                members.push(Geometry::Polygon(polygon));
            }
            Geometry::GeometryCollection(GeometryCollection::new(members))
        }
    }
}

fn pack_points(mut points: Vec<Coord>) -> Geometry {
    if points.len() == 1 {
        let Some(coord) = points.pop() else {
            return empty_result(Dimension::P);
        };
        Geometry::Point(Point::new(coord))
    } else {
        Geometry::MultiPoint(MultiPoint::new(points.into_iter().map(Point::new).collect()))
    }
}

fn pack_lines(mut lines: Vec<LineString>) -> Geometry {
    if lines.len() == 1 {
        let Some(line) = lines.pop() else {
            return empty_result(Dimension::L);
        };
        Geometry::LineString(line)
    } else {
        Geometry::MultiLineString(MultiLineString::new(lines))
    }
}

fn pack_polygons(mut polygons: Vec<Polygon>) -> Geometry {
    if polygons.len() == 1 {
        let Some(polygon) = polygons.pop() else {
            return empty_result(Dimension::A);
        };
        Geometry::Polygon(polygon)
    } else {
        Geometry::MultiPolygon(MultiPolygon::new(polygons))
    }
}
