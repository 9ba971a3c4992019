//! Buffering by capsule decomposition.
//!
//! The buffer of a geometry is assembled from primitive shapes, a disc per
//! isolated coordinate and a capsule per segment, merged through the
//! overlay engine. Negative distances erode polygonal input by subtracting
//! the capsules of its rings instead.

use std::f64::consts::{FRAC_PI_2, PI};

use ortelius_types::{Coord, Geometry, LinearRing, Polygon};

use crate::error::OrteliusError;
use crate::overlay::{self, OverlayOp};
use crate::parts;

/// Computes the region within `distance` of a geometry.
///
/// Circular arcs are approximated with `quadrant_segments` straight
/// segments per quarter circle; the approximation is inscribed, so the
/// result never reaches beyond the true distance. A zero distance keeps
/// polygonal content unchanged and reduces everything else to an empty
/// polygon; a negative distance erodes polygonal content and empties
/// everything else.
pub fn buffer(
    geometry: &Geometry,
    distance: f64,
    quadrant_segments: i32,
) -> Result<Geometry, OrteliusError> {
    if quadrant_segments <= 0 {
        return Err(OrteliusError::InvalidArgument(format!(
            "quadrant segments must be positive, got {quadrant_segments}"
        )));
    }
    if !distance.is_finite() {
        return Err(OrteliusError::InvalidArgument(format!(
            "buffer distance must be finite, got {distance}"
        )));
    }
    if geometry.is_empty() {
        return Ok(Geometry::Polygon(Polygon::empty()));
    }
    if distance == 0.0 {
        return polygonal_content(geometry);
    }
    if distance < 0.0 {
        return erode(geometry, -distance, quadrant_segments as usize);
    }
    dilate(geometry, distance, quadrant_segments as usize)
}

/// The polygonal content of a geometry, unchanged.
fn polygonal_content(geometry: &Geometry) -> Result<Geometry, OrteliusError> {
    let polygons = parts::areal_parts(geometry);
    if polygons.is_empty() {
        return Ok(Geometry::Polygon(Polygon::empty()));
    }
    if !matches!(geometry, Geometry::GeometryCollection(_)) {
        return Ok(geometry.clone());
    }
    overlay::union_all(
        polygons
            .into_iter()
            .map(|polygon| Geometry::Polygon(polygon.clone()))
            .collect(),
    )
}

/// Expands a geometry by `distance`: the union of the geometry's polygonal
/// content with a disc around every isolated coordinate and a capsule
/// around every segment.
fn dilate(
    geometry: &Geometry,
    distance: f64,
    quadrant_segments: usize,
) -> Result<Geometry, OrteliusError> {
    let mut pieces: Vec<Geometry> = Vec::new();
    for coord in parts::puntal_coords(geometry) {
        pieces.push(disc(&coord, distance, quadrant_segments)?);
    }
    for line in parts::lineal_parts(geometry) {
        let before = pieces.len();
        for pair in line.coords.windows(2) {
            if pair[0].equals_2d(&pair[1]) {
                continue;
            }
            pieces.push(capsule(&pair[0], &pair[1], distance, quadrant_segments)?);
        }
        if pieces.len() == before {
            // a line collapsed onto a single spot still buffers to a disc
            if let Some(first) = line.coords.first() {
                pieces.push(disc(first, distance, quadrant_segments)?);
            }
        }
    }
    for polygon in parts::areal_parts(geometry) {
        pieces.push(Geometry::Polygon(polygon.clone()));
        ring_capsules(polygon, distance, quadrant_segments, &mut pieces)?;
    }
    overlay::union_all(pieces)
}

/// Shrinks polygonal content by `distance`: the difference between the
/// polygons and the capsules of their rings, which removes every interior
/// point closer than `distance` to the boundary.
fn erode(
    geometry: &Geometry,
    distance: f64,
    quadrant_segments: usize,
) -> Result<Geometry, OrteliusError> {
    let polygons = parts::areal_parts(geometry);
    if polygons.is_empty() {
        return Ok(Geometry::Polygon(Polygon::empty()));
    }
    let mut capsules: Vec<Geometry> = Vec::new();
    for &polygon in &polygons {
        ring_capsules(polygon, distance, quadrant_segments, &mut capsules)?;
    }
    let content = polygonal_content(geometry)?;
    let rim = overlay::union_all(capsules)?;
    overlay::overlay(&content, &rim, OverlayOp::Difference)
}

/// Capsules of `radius` around every ring segment of `polygon`.
fn ring_capsules(
    polygon: &Polygon,
    radius: f64,
    quadrant_segments: usize,
    out: &mut Vec<Geometry>,
) -> Result<(), OrteliusError> {
    for ring in polygon.rings() {
        for pair in ring.coords.windows(2) {
            if pair[0].equals_2d(&pair[1]) {
                continue;
            }
            out.push(capsule(&pair[0], &pair[1], radius, quadrant_segments)?);
        }
    }
    Ok(())
}

/// A regular polygon inscribed in the circle of `radius` around `center`,
/// with four times `quadrant_segments` vertices.
fn disc(
    center: &Coord,
    radius: f64,
    quadrant_segments: usize,
) -> Result<Geometry, OrteliusError> {
    let steps = quadrant_segments * 4;
    let mut ring = Vec::with_capacity(steps + 1);
    for i in 0..steps {
        let angle = -(i as f64) * 2.0 * PI / steps as f64;
        ring.push(Coord::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }
    let first = ring[0];
    ring.push(first);
    let ring = LinearRing::new(ring)?;
    Ok(Geometry::Polygon(Polygon::new(ring, vec![])))
}

/// A rounded rectangle covering all points within `radius` of the segment
/// from `a` to `b`: two offset sides joined by semicircular caps.
///
/// The side corners come from the exact unit normal rather than from the
/// arc angles, so capsules of axis aligned segments keep exact rectangle
/// corners and erosion of axis aligned polygons stays exact.
fn capsule(
    a: &Coord,
    b: &Coord,
    radius: f64,
    quadrant_segments: usize,
) -> Result<Geometry, OrteliusError> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length = (dx * dx + dy * dy).sqrt();
    let offset_x = -dy / length * radius;
    let offset_y = dx / length * radius;
    let heading = dy.atan2(dx);

    let cap_steps = quadrant_segments * 2;
    let mut ring = Vec::with_capacity(2 * cap_steps + 3);
    ring.push(Coord::new(b.x + offset_x, b.y + offset_y));
    arc(&mut ring, b, radius, heading + FRAC_PI_2, cap_steps);
    ring.push(Coord::new(b.x - offset_x, b.y - offset_y));
    ring.push(Coord::new(a.x - offset_x, a.y - offset_y));
    arc(&mut ring, a, radius, heading - FRAC_PI_2, cap_steps);
    ring.push(Coord::new(a.x + offset_x, a.y + offset_y));
    let first = ring[0];
    ring.push(first);
    let ring = LinearRing::new(ring)?;
    Ok(Geometry::Polygon(Polygon::new(ring, vec![])))
}

/// Appends the interior vertices of a semicircular arc around `center`,
/// sweeping clockwise from `start_angle` over `steps` segments. The end
/// vertices are pushed by the caller.
fn arc(ring: &mut Vec<Coord>, center: &Coord, radius: f64, start_angle: f64, steps: usize) {
    for i in 1..steps {
        let angle = start_angle - (i as f64) * PI / steps as f64;
        ring.push(Coord::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use ortelius_io::wkt;

    const SQUARE: &str = "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))";

    #[test]
    fn rejects_nonpositive_quadrant_segments() {
        let point = wkt::parse("POINT (0 0)").unwrap();
        assert_matches!(
            buffer(&point, 1.0, 0),
            Err(OrteliusError::InvalidArgument(_))
        );
    }

    #[test]
    fn rejects_nonfinite_distance() {
        let point = wkt::parse("POINT (0 0)").unwrap();
        assert_matches!(
            buffer(&point, f64::NAN, 8),
            Err(OrteliusError::InvalidArgument(_))
        );
    }

    #[test]
    fn point_buffer_is_a_disc() {
        let point = wkt::parse("POINT (0 0)").unwrap();
        let disc = buffer(&point, 10.0, 8).unwrap();
        let Geometry::Polygon(polygon) = &disc else {
            panic!("expected a polygon, got {disc:?}");
        };
        assert_eq!(polygon.exterior.coords.len(), 33);
        let area = disc.area();
        assert!(area > 310.0 && area < PI * 100.0, "area {area}");
    }

    #[test]
    fn empty_input_buffers_to_an_empty_polygon() {
        let empty = wkt::parse("LINESTRING EMPTY").unwrap();
        assert_eq!(wkt::write(&buffer(&empty, 5.0, 8).unwrap()), "POLYGON EMPTY");
    }

    #[test]
    fn zero_distance_keeps_polygons() {
        let square = wkt::parse(SQUARE).unwrap();
        assert_eq!(wkt::write(&buffer(&square, 0.0, 8).unwrap()), SQUARE);
    }

    #[test]
    fn zero_distance_empties_lines() {
        let line = wkt::parse("LINESTRING (0 0, 10 0)").unwrap();
        assert_eq!(wkt::write(&buffer(&line, 0.0, 8).unwrap()), "POLYGON EMPTY");
    }

    #[test]
    fn line_buffer_covers_a_strip() {
        let line = wkt::parse("LINESTRING (0 0, 10 0)").unwrap();
        let strip = buffer(&line, 2.0, 4).unwrap();
        assert_matches!(strip, Geometry::Polygon(_));
        let area = strip.area();
        // 10 by 4 core plus two inscribed semicircular caps
        assert!(area > 51.0 && area < 53.0, "area {area}");
    }

    #[test]
    fn degenerate_line_buffers_to_a_disc() {
        let line = wkt::parse("LINESTRING (3 3, 3 3)").unwrap();
        let disc = buffer(&line, 1.0, 6).unwrap();
        let Geometry::Polygon(polygon) = &disc else {
            panic!("expected a polygon, got {disc:?}");
        };
        assert_eq!(polygon.exterior.coords.len(), 25);
    }

    #[test]
    fn polygon_buffer_contains_the_polygon() {
        let square = wkt::parse(SQUARE).unwrap();
        let buffered = buffer(&square, 100.0, 30).unwrap();
        let back = overlay::overlay(&square, &buffered, OverlayOp::Intersection).unwrap();
        assert_eq!(wkt::write(&back), SQUARE);
    }

    #[test]
    fn negative_distance_erodes_the_boundary() {
        let square = wkt::parse(SQUARE).unwrap();
        let eroded = buffer(&square, -2.0, 4).unwrap();
        assert_abs_diff_eq!(eroded.area(), 36.0, epsilon = 1e-9);
    }

    #[test]
    fn negative_distance_swallows_small_polygons() {
        let square = wkt::parse(SQUARE).unwrap();
        assert_eq!(
            wkt::write(&buffer(&square, -6.0, 4).unwrap()),
            "POLYGON EMPTY"
        );
    }

    #[test]
    fn negative_distance_empties_lines() {
        let line = wkt::parse("LINESTRING (0 0, 10 0)").unwrap();
        assert_eq!(wkt::write(&buffer(&line, -1.0, 8).unwrap()), "POLYGON EMPTY");
    }

    #[test]
    fn disjoint_points_buffer_to_separate_discs() {
        let points = wkt::parse("MULTIPOINT (0 0, 40 0)").unwrap();
        let buffered = buffer(&points, 5.0, 8).unwrap();
        let Geometry::MultiPolygon(multi) = &buffered else {
            panic!("expected two discs, got {buffered:?}");
        };
        assert_eq!(multi.polygons.len(), 2);
    }
}
