//! Topological boundaries under the Mod-2 rule.

use crate::noding::push_unique;
use crate::{parts, OrteliusError};
use ortelius_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, Point,
};

/// Endpoints at which an odd number of line terminations meet.
///
/// Every non-degenerate line contributes both of its endpoints; a closed
/// line therefore contributes its closure point twice and ends up with no
/// boundary at all.
pub(crate) fn lineal_boundary_points(lines: &[LineString]) -> Vec<Coord> {
    let mut counts: Vec<(Coord, usize)> = Vec::new();
    for line in lines {
        if line.coords.len() < 2 {
            continue;
        }
        for endpoint in [line.coords[0], line.coords[line.coords.len() - 1]] {
            match counts.iter_mut().find(|(c, _)| c.equals_2d(&endpoint)) {
                Some((_, n)) => *n += 1,
                None => counts.push((endpoint, 1)),
            }
        }
    }
    counts
        .into_iter()
        .filter(|(_, n)| n % 2 == 1)
        .map(|(c, _)| c)
        .collect()
}

/// Computes the boundary of a geometry.
///
/// Puntal geometries have an empty boundary, lineal ones a point set of
/// odd-degree endpoints, polygonal ones their rings. The boundary of a
/// collection is the union of its members' boundaries; the Mod-2 rule
/// applies within each member, not across members.
pub fn boundary(geometry: &Geometry) -> Result<Geometry, OrteliusError> {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {
            Ok(Geometry::GeometryCollection(GeometryCollection::empty()))
        }
        Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => {
            let lines = parts::lineal_parts(geometry);
            let points = lineal_boundary_points(&lines)
                .into_iter()
                .map(Point::new)
                .collect();
            Ok(Geometry::MultiPoint(MultiPoint::new(points)))
        }
        Geometry::Polygon(polygon) => {
            if polygon.is_empty() {
                Ok(Geometry::MultiLineString(MultiLineString::new(vec![])))
            } else if polygon.interiors.is_empty() {
                Ok(Geometry::LinearRing(polygon.exterior.clone()))
            } else {
                let rings = polygon.rings().map(|ring| ring.to_line_string()).collect();
                Ok(Geometry::MultiLineString(MultiLineString::new(rings)))
            }
        }
        Geometry::MultiPolygon(multi) => {
            let mut rings = Vec::new();
            for polygon in &multi.polygons {
                rings.extend(polygon.rings().map(|ring| ring.to_line_string()));
            }
            Ok(Geometry::MultiLineString(MultiLineString::new(rings)))
        }
        Geometry::GeometryCollection(_) => {
            let mut coords = Vec::new();
            let mut lines = Vec::new();
            accumulate_boundary(geometry, &mut coords, &mut lines)?;
            let points: Vec<Point> = coords.into_iter().map(Point::new).collect();
            Ok(match (points.is_empty(), lines.is_empty()) {
                (true, true) => Geometry::GeometryCollection(GeometryCollection::empty()),
                (false, true) => Geometry::MultiPoint(MultiPoint::new(points)),
                (true, false) => Geometry::MultiLineString(MultiLineString::new(lines)),
                (false, false) => Geometry::GeometryCollection(GeometryCollection::new(vec![
                    Geometry::MultiPoint(MultiPoint::new(points)),
                    Geometry::MultiLineString(MultiLineString::new(lines)),
                ])),
            })
        }
    }
}

/// Collects the boundaries of every leaf geometry under `geometry`,
/// deduplicating boundary points so the result is a set union.
fn accumulate_boundary(
    geometry: &Geometry,
    coords: &mut Vec<Coord>,
    lines: &mut Vec<LineString>,
) -> Result<(), OrteliusError> {
    if let Geometry::GeometryCollection(collection) = geometry {
        for member in &collection.geometries {
            accumulate_boundary(member, coords, lines)?;
        }
        return Ok(());
    }
    match boundary(geometry)? {
        Geometry::MultiPoint(multi) => {
            for point in multi.points {
                if let Some(coord) = point.coord {
                    push_unique(coords, coord);
                }
            }
        }
        Geometry::LinearRing(ring) => lines.push(ring.to_line_string()),
        Geometry::MultiLineString(multi) => lines.extend(multi.lines),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ortelius_types::{LinearRing, Polygon};

    fn line(coords: &[(f64, f64)]) -> LineString {
        LineString::new(coords.iter().map(|&(x, y)| Coord::new(x, y)).collect())
    }

    #[test]
    fn open_line_boundary_is_its_endpoints() {
        let lines = vec![line(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)])];
        let boundary = lineal_boundary_points(&lines);
        assert_eq!(boundary.len(), 2);
    }

    #[test]
    fn shared_endpoint_of_two_lines_is_not_boundary() {
        let lines = vec![
            line(&[(0.0, 0.0), (5.0, 0.0)]),
            line(&[(5.0, 0.0), (10.0, 0.0)]),
        ];
        let boundary = lineal_boundary_points(&lines);
        assert_eq!(boundary.len(), 2);
        assert!(!boundary.iter().any(|c| c.equals_2d(&Coord::new(5.0, 0.0))));
    }

    #[test]
    fn three_way_junction_is_boundary() {
        let lines = vec![
            line(&[(0.0, 0.0), (5.0, 0.0)]),
            line(&[(5.0, 0.0), (10.0, 0.0)]),
            line(&[(5.0, 0.0), (5.0, 5.0)]),
        ];
        let boundary = lineal_boundary_points(&lines);
        assert!(boundary.iter().any(|c| c.equals_2d(&Coord::new(5.0, 0.0))));
    }

    #[test]
    fn empty_collection_boundary_is_empty() {
        let collection = Geometry::GeometryCollection(GeometryCollection::empty());
        assert_matches!(
            boundary(&collection),
            Ok(Geometry::GeometryCollection(inner)) if inner.geometries.is_empty()
        );
    }

    #[test]
    fn collection_boundary_keeps_shared_member_endpoints() {
        let collection = Geometry::GeometryCollection(GeometryCollection::new(vec![
            Geometry::LineString(line(&[(0.0, 0.0), (5.0, 0.0)])),
            Geometry::LineString(line(&[(5.0, 0.0), (10.0, 0.0)])),
        ]));
        let points = match boundary(&collection) {
            Ok(Geometry::MultiPoint(multi)) => multi.points,
            other => panic!("expected a multipoint boundary, got {other:?}"),
        };
        assert_eq!(points.len(), 3);
        let shared = Coord::new(5.0, 0.0);
        assert!(points
            .iter()
            .any(|p| p.coord.is_some_and(|c| c.equals_2d(&shared))));
    }

    #[test]
    fn mixed_collection_boundary_pairs_endpoints_with_rings() {
        let ring = LinearRing::new(vec![
            Coord::new(0.0, 0.0),
            Coord::new(0.0, 1.0),
            Coord::new(1.0, 1.0),
            Coord::new(1.0, 0.0),
            Coord::new(0.0, 0.0),
        ])
        .unwrap();
        let collection = Geometry::GeometryCollection(GeometryCollection::new(vec![
            Geometry::Point(Point::new(Coord::new(7.0, 7.0))),
            Geometry::LineString(line(&[(2.0, 2.0), (3.0, 2.0)])),
            Geometry::Polygon(Polygon::new(ring, vec![])),
        ]));
        let members = match boundary(&collection) {
            Ok(Geometry::GeometryCollection(inner)) => inner.geometries,
            other => panic!("expected a mixed boundary, got {other:?}"),
        };
        assert_eq!(members.len(), 2);
        assert_matches!(members[0], Geometry::MultiPoint(ref multi) if multi.points.len() == 2);
        assert_matches!(members[1], Geometry::MultiLineString(ref multi) if multi.lines.len() == 1);
    }
}
