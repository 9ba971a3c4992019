//! Flattening of geometries into homogeneous parts.
//!
//! The engine algorithms work on point sets, line sets and polygon sets.
//! These helpers strip the variant structure, descending into collections
//! with an explicit stack so deeply nested input cannot exhaust the call
//! stack.

use ortelius_types::{Coord, Geometry, LineString, Polygon};

/// Coordinates of all puntal content, empties skipped.
pub(crate) fn puntal_coords(geometry: &Geometry) -> Vec<Coord> {
    let mut out = Vec::new();
    let mut stack = vec![geometry];
    while let Some(g) = stack.pop() {
        match g {
            Geometry::Point(p) => out.extend(p.coord),
            Geometry::MultiPoint(m) => out.extend(m.points.iter().filter_map(|p| p.coord)),
            Geometry::GeometryCollection(c) => stack.extend(c.geometries.iter()),
            _ => {}
        }
    }
    out
}

/// All lineal content as plain lines; rings come back as closed lines.
pub(crate) fn lineal_parts(geometry: &Geometry) -> Vec<LineString> {
    let mut out = Vec::new();
    let mut stack = vec![geometry];
    while let Some(g) = stack.pop() {
        match g {
            Geometry::LineString(line) if !line.is_empty() => out.push(line.clone()),
            Geometry::LinearRing(ring) if !ring.is_empty() => out.push(ring.to_line_string()),
            Geometry::MultiLineString(m) => {
                out.extend(m.lines.iter().filter(|l| !l.is_empty()).cloned());
            }
            Geometry::GeometryCollection(c) => stack.extend(c.geometries.iter()),
            _ => {}
        }
    }
    out
}

/// All polygonal content, empties skipped.
pub(crate) fn areal_parts(geometry: &Geometry) -> Vec<&Polygon> {
    let mut out = Vec::new();
    let mut stack = vec![geometry];
    while let Some(g) = stack.pop() {
        match g {
            Geometry::Polygon(p) if !p.is_empty() => out.push(p),
            Geometry::MultiPolygon(m) => out.extend(m.polygons.iter().filter(|p| !p.is_empty())),
            Geometry::GeometryCollection(c) => stack.extend(c.geometries.iter()),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortelius_types::{GeometryCollection, LinearRing, MultiPoint, Point};

    #[test]
    fn collections_are_flattened() {
        let inner = GeometryCollection::new(vec![
            Geometry::Point(Point::new(Coord::new(1.0, 2.0))),
            Geometry::Point(Point::empty()),
        ]);
        let outer = Geometry::GeometryCollection(GeometryCollection::new(vec![
            Geometry::GeometryCollection(inner),
            Geometry::MultiPoint(MultiPoint::new(vec![Point::new(Coord::new(3.0, 4.0))])),
        ]));
        let coords = puntal_coords(&outer);
        assert_eq!(coords.len(), 2);
    }

    #[test]
    fn rings_become_closed_lines() {
        let ring = LinearRing::new(vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(1.0, 1.0),
            Coord::new(0.0, 0.0),
        ])
        .unwrap();
        let lines = lineal_parts(&Geometry::LinearRing(ring));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_closed());
    }
}
