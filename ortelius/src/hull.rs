//! Convex hull construction.

use ortelius_types::{
    Coord, Geometry, GeometryCollection, LineString, LinearRing, Point, Polygon,
};

use crate::error::OrteliusError;

/// Computes the convex hull of a geometry.
///
/// The output degrades with the extent of the input: an empty geometry
/// hulls to an empty collection, a single distinct coordinate to a point,
/// a collinear coordinate set to the line between its two extremes, and
/// everything else to a polygon. Hull rings are emitted clockwise starting
/// from the lexicographically least vertex, with collinear intermediate
/// vertices dropped, so hulling an already convex polygon reproduces its
/// ring.
pub fn convex_hull(geometry: &Geometry) -> Result<Geometry, OrteliusError> {
    let mut coords = geometry.coords();
    coords.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    coords.dedup_by(|a, b| a.equals_2d(b));

    match coords.len() {
        0 => return Ok(Geometry::GeometryCollection(GeometryCollection::empty())),
        1 => return Ok(Geometry::Point(Point::new(coords[0]))),
        2 => return Ok(Geometry::LineString(LineString::new(coords))),
        _ => {}
    }

    let hull = monotone_chain(&coords);
    if hull.len() == 2 {
        // every input coordinate sits on the line between the extremes
        return Ok(Geometry::LineString(LineString::new(hull)));
    }

    let mut ring = hull;
    ring.push(ring[0]);
    ring.reverse();
    let ring = LinearRing::new(ring)?;
    Ok(Geometry::Polygon(Polygon::new(ring, vec![])))
}

/// Andrew's monotone chain over lexicographically sorted distinct
/// coordinates. Returns the hull cycle counterclockwise, starting at the
/// least coordinate, without the closing repetition.
fn monotone_chain(sorted: &[Coord]) -> Vec<Coord> {
    let mut lower: Vec<Coord> = Vec::new();
    for coord in sorted {
        while lower.len() >= 2 && !turns_left(&lower[lower.len() - 2], &lower[lower.len() - 1], coord)
        {
            lower.pop();
        }
        lower.push(*coord);
    }

    let mut upper: Vec<Coord> = Vec::new();
    for coord in sorted.iter().rev() {
        while upper.len() >= 2 && !turns_left(&upper[upper.len() - 2], &upper[upper.len() - 1], coord)
        {
            upper.pop();
        }
        upper.push(*coord);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// True when the path `a -> b -> c` makes a strict left turn. Collinear
/// triples report false so interior collinear vertices get dropped.
fn turns_left(a: &Coord, b: &Coord, c: &Coord) -> bool {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortelius_io::wkt;

    fn hull_wkt(input: &str) -> String {
        let geometry = wkt::parse(input).unwrap();
        wkt::write(&convex_hull(&geometry).unwrap())
    }

    #[test]
    fn convex_polygon_reproduces_its_ring() {
        assert_eq!(
            hull_wkt("POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))"),
            "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))"
        );
    }

    #[test]
    fn concave_vertices_are_dropped() {
        assert_eq!(
            hull_wkt("POLYGON ((0 0, 0 10, 4 5, 10 10, 10 0, 0 0))"),
            "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))"
        );
    }

    #[test]
    fn point_cloud_hull() {
        assert_eq!(
            hull_wkt("MULTIPOINT (0 0, 10 0, 5 5, 10 10, 0 10, 5 2)"),
            "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))"
        );
    }

    #[test]
    fn collinear_input_hulls_to_a_line() {
        assert_eq!(
            hull_wkt("MULTIPOINT (0 0, 4 4, 2 2, 9 9)"),
            "LINESTRING (0 0, 9 9)"
        );
    }

    #[test]
    fn single_coordinate_hulls_to_a_point() {
        assert_eq!(hull_wkt("MULTIPOINT (3 4, 3 4)"), "POINT (3 4)");
    }

    #[test]
    fn empty_input_hulls_to_an_empty_collection() {
        assert_eq!(hull_wkt("POLYGON EMPTY"), "GEOMETRYCOLLECTION EMPTY");
    }

    #[test]
    fn hull_is_idempotent() {
        let source = wkt::parse("MULTIPOINT (0 0, 10 0, 3 8, 10 10, 0 10, 7 1)").unwrap();
        let once = convex_hull(&source).unwrap();
        let twice = convex_hull(&once).unwrap();
        assert_eq!(wkt::write(&once), wkt::write(&twice));
    }

    #[test]
    fn line_hull_closes_into_a_polygon() {
        assert_eq!(
            hull_wkt("LINESTRING (0 0, 10 0, 10 10)"),
            "POLYGON ((0 0, 10 10, 10 0, 0 0))"
        );
    }
}
