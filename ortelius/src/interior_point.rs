//! Representative points guaranteed to lie on the geometry.

use crate::centroid::centroid;
use crate::parts;
use ortelius_types::envelope::Envelope;
use ortelius_types::{Coord, Dimension, Geometry, Polygon};

/// Computes a point guaranteed to lie on the geometry: strictly inside for
/// areal input, on the linework for lineal input, one of the members for
/// puntal input.
///
/// The highest-dimensional content present decides which rule applies.
/// Returns `None` for empty input.
pub fn interior_point(geometry: &Geometry) -> Option<Coord> {
    match geometry.dimension() {
        Dimension::A => areal_interior(geometry),
        Dimension::L => lineal_interior(geometry),
        Dimension::P => puntal_interior(geometry),
        Dimension::Empty => None,
    }
}

/// Interior coordinate of a single polygon. Probe point for interior
/// containment tests.
pub(crate) fn polygon_interior_coord(polygon: &Polygon) -> Option<Coord> {
    widest_interval(polygon).map(|(coord, _)| coord)
}

fn areal_interior(geometry: &Geometry) -> Option<Coord> {
    let mut best: Option<(Coord, f64)> = None;
    for polygon in parts::areal_parts(geometry) {
        if let Some((candidate, width)) = widest_interval(polygon) {
            if best.map(|(_, w)| width > w).unwrap_or(true) {
                best = Some((candidate, width));
            }
        }
    }
    best.map(|(coord, _)| coord)
}

/// Midpoint of the widest horizontal slice of the polygon interior.
///
/// The scan line is placed midway between the vertex ordinates bracketing
/// the envelope center, so it never passes through a vertex and every
/// crossing it finds is a clean one.
fn widest_interval(polygon: &Polygon) -> Option<(Coord, f64)> {
    if polygon.is_empty() {
        return None;
    }
    let scan_y = scan_line_y(polygon);
    let mut crossings: Vec<f64> = Vec::new();
    for ring in polygon.rings() {
        for pair in ring.coords.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if (a.y < scan_y) != (b.y < scan_y) {
                crossings.push(a.x + (scan_y - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
    }
    crossings.sort_by(f64::total_cmp);
    let mut best: Option<(Coord, f64)> = None;
    for pair in crossings.chunks_exact(2) {
        let width = pair[1] - pair[0];
        if best.map(|(_, w)| width > w).unwrap_or(true) {
            best = Some((Coord::new((pair[0] + pair[1]) / 2.0, scan_y), width));
        }
    }
    // a polygon collapsed to a horizontal line yields no crossings
    best.or_else(|| polygon.exterior.coords.first().map(|c| (*c, 0.0)))
}

fn scan_line_y(polygon: &Polygon) -> f64 {
    let mut envelope = Envelope::new();
    for coord in &polygon.exterior.coords {
        envelope.expand_to_include(coord);
    }
    let center_y = (envelope.min_y + envelope.max_y) / 2.0;
    let mut lo_y = envelope.min_y;
    let mut hi_y = envelope.max_y;
    for ring in polygon.rings() {
        for coord in &ring.coords {
            if coord.y <= center_y {
                if coord.y > lo_y {
                    lo_y = coord.y;
                }
            } else if coord.y < hi_y {
                hi_y = coord.y;
            }
        }
    }
    (lo_y + hi_y) / 2.0
}

fn lineal_interior(geometry: &Geometry) -> Option<Coord> {
    let reference = centroid(geometry)?;
    let lines = parts::lineal_parts(geometry);
    let mut best: Option<(Coord, f64)> = None;
    // vertices shared by two segments first, endpoints only as a fallback
    for line in &lines {
        if line.coords.len() > 2 {
            for coord in &line.coords[1..line.coords.len() - 1] {
                consider(&mut best, coord, &reference);
            }
        }
    }
    if best.is_none() {
        for line in &lines {
            for coord in &line.coords {
                consider(&mut best, coord, &reference);
            }
        }
    }
    best.map(|(coord, _)| coord)
}

fn puntal_interior(geometry: &Geometry) -> Option<Coord> {
    let reference = centroid(geometry)?;
    let mut best: Option<(Coord, f64)> = None;
    for coord in parts::puntal_coords(geometry) {
        consider(&mut best, &coord, &reference);
    }
    best.map(|(coord, _)| coord)
}

fn consider(best: &mut Option<(Coord, f64)>, candidate: &Coord, reference: &Coord) {
    let distance = candidate.distance(reference);
    if best.map(|(_, d)| distance < d).unwrap_or(true) {
        *best = Some((*candidate, distance));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::locate_in_polygon;
    use ortelius_io::wkt;
    use ortelius_types::Location;

    fn interior_of(text: &str) -> Coord {
        let geometry = wkt::parse(text).unwrap();
        interior_point(&geometry).unwrap()
    }

    #[test]
    fn square_interior_point_is_its_center() {
        let p = interior_of("POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))");
        assert_eq!((p.x, p.y), (5.0, 5.0));
    }

    #[test]
    fn interior_point_avoids_a_central_hole() {
        let text = "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0), (4 4, 4 6, 6 6, 6 4, 4 4))";
        let p = interior_of(text);
        assert_eq!((p.x, p.y), (2.0, 5.0));
        let Geometry::Polygon(polygon) = wkt::parse(text).unwrap() else {
            panic!("expected a polygon");
        };
        assert_eq!(locate_in_polygon(&p, &polygon), Location::Interior);
    }

    #[test]
    fn scan_line_dodges_vertex_ordinates() {
        // the diamond's widest row passes exactly through two vertices;
        // the scan line must settle between vertex ordinates instead
        let p = interior_of("POLYGON ((0 5, 5 10, 10 5, 5 0, 0 5))");
        assert_eq!((p.x, p.y), (5.0, 7.5));
    }

    #[test]
    fn widest_member_of_a_multipolygon_wins() {
        let p = interior_of(
            "MULTIPOLYGON (((0 0, 0 2, 2 2, 2 0, 0 0)), \
             ((10 10, 10 30, 30 30, 30 10, 10 10)))",
        );
        assert_eq!((p.x, p.y), (20.0, 20.0));
    }

    #[test]
    fn line_interior_point_prefers_shared_vertices() {
        let p = interior_of("LINESTRING (0 0, 10 0, 10 10)");
        assert_eq!((p.x, p.y), (10.0, 0.0));
        // a bare segment has only endpoints to offer
        let p = interior_of("LINESTRING (0 0, 10 0)");
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn point_nearest_the_centroid_wins() {
        let p = interior_of("MULTIPOINT ((0 0), (10 0), (9 1))");
        assert_eq!((p.x, p.y), (9.0, 1.0));
    }

    #[test]
    fn areal_content_outranks_the_rest() {
        let p = interior_of(
            "GEOMETRYCOLLECTION (POLYGON ((0 0, 0 2, 2 2, 2 0, 0 0)), \
             LINESTRING (50 50, 60 50))",
        );
        assert_eq!((p.x, p.y), (1.0, 1.0));
    }

    #[test]
    fn empty_input_has_no_interior_point() {
        let geometry = wkt::parse("GEOMETRYCOLLECTION EMPTY").unwrap();
        assert_eq!(interior_point(&geometry), None);
        let geometry = wkt::parse("POLYGON EMPTY").unwrap();
        assert_eq!(interior_point(&geometry), None);
    }
}
