//! Weighted centroid of a geometry.

use ortelius_types::ring::is_ccw;
use ortelius_types::{Coord, Geometry, Polygon};

/// Computes the centroid of a geometry.
///
/// The highest-dimensional content present decides the weighting: polygons
/// contribute signed triangle areas, lines contribute length-weighted
/// segment midpoints, points contribute equally. Lower-dimensional parts of
/// a mixed collection only matter when everything above them has zero
/// measure, so a polygon collapsed to a sliver of zero area still gets a
/// centroid from its outline. Returns `None` for empty input.
pub fn centroid(geometry: &Geometry) -> Option<Coord> {
    let mut sums = Sums::new();
    sums.add_geometry(geometry);
    sums.finish()
}

/// Running sums for the three weighting regimes.
struct Sums {
    /// Triangulation base, the first vertex of the last shell seen.
    base: Option<Coord>,
    /// Twice the signed area accumulated so far.
    area_sum_2: f64,
    /// Sum of `sign * area2 * (vertex sum)` per triangle, three times the
    /// area-weighted centroid numerator.
    triangle_sum_x: f64,
    triangle_sum_y: f64,
    length: f64,
    line_sum_x: f64,
    line_sum_y: f64,
    point_count: usize,
    point_sum_x: f64,
    point_sum_y: f64,
}

impl Sums {
    fn new() -> Self {
        Sums {
            base: None,
            area_sum_2: 0.0,
            triangle_sum_x: 0.0,
            triangle_sum_y: 0.0,
            length: 0.0,
            line_sum_x: 0.0,
            line_sum_y: 0.0,
            point_count: 0,
            point_sum_x: 0.0,
            point_sum_y: 0.0,
        }
    }

    fn add_geometry(&mut self, geometry: &Geometry) {
        match geometry {
            Geometry::Point(point) => {
                if let Some(coord) = point.coord {
                    self.add_point(&coord);
                }
            }
            Geometry::MultiPoint(multi) => {
                for point in &multi.points {
                    if let Some(coord) = point.coord {
                        self.add_point(&coord);
                    }
                }
            }
            Geometry::LineString(line) => self.add_segments(&line.coords),
            Geometry::LinearRing(ring) => self.add_segments(&ring.coords),
            Geometry::MultiLineString(multi) => {
                for line in &multi.lines {
                    self.add_segments(&line.coords);
                }
            }
            Geometry::Polygon(polygon) => self.add_polygon(polygon),
            Geometry::MultiPolygon(multi) => {
                for polygon in &multi.polygons {
                    self.add_polygon(polygon);
                }
            }
            Geometry::GeometryCollection(collection) => {
                for member in &collection.geometries {
                    self.add_geometry(member);
                }
            }
        }
    }

    fn add_polygon(&mut self, polygon: &Polygon) {
        self.add_shell(&polygon.exterior.coords);
        for hole in &polygon.interiors {
            self.add_hole(&hole.coords);
        }
    }

    fn add_shell(&mut self, coords: &[Coord]) {
        if let Some(first) = coords.first() {
            self.base = Some(*first);
        }
        let positive = !is_ccw(coords);
        for pair in coords.windows(2) {
            self.add_triangle(&pair[0], &pair[1], positive);
        }
        self.add_segments(coords);
    }

    fn add_hole(&mut self, coords: &[Coord]) {
        let positive = is_ccw(coords);
        for pair in coords.windows(2) {
            self.add_triangle(&pair[0], &pair[1], positive);
        }
        self.add_segments(coords);
    }

    /// Signed triangle `(base, a, b)`; the signs cancel so that only the
    /// enclosed region contributes, no matter where the base sits.
    fn add_triangle(&mut self, a: &Coord, b: &Coord, positive: bool) {
        let Some(base) = self.base else {
            return;
        };
        let sign = if positive { 1.0 } else { -1.0 };
        let area_2 = (a.x - base.x) * (b.y - base.y) - (b.x - base.x) * (a.y - base.y);
        self.triangle_sum_x += sign * area_2 * (base.x + a.x + b.x);
        self.triangle_sum_y += sign * area_2 * (base.y + a.y + b.y);
        self.area_sum_2 += sign * area_2;
    }

    fn add_segments(&mut self, coords: &[Coord]) {
        let mut line_length = 0.0;
        for pair in coords.windows(2) {
            let segment_length = pair[0].distance(&pair[1]);
            if segment_length == 0.0 {
                continue;
            }
            line_length += segment_length;
            let mid = pair[0].mid(&pair[1]);
            self.line_sum_x += segment_length * mid.x;
            self.line_sum_y += segment_length * mid.y;
        }
        self.length += line_length;
        if line_length == 0.0 {
            // degenerate line, count it as a point
            if let Some(first) = coords.first() {
                self.add_point(first);
            }
        }
    }

    fn add_point(&mut self, coord: &Coord) {
        self.point_count += 1;
        self.point_sum_x += coord.x;
        self.point_sum_y += coord.y;
    }

    fn finish(&self) -> Option<Coord> {
        if self.area_sum_2.abs() > 0.0 {
            Some(Coord::new(
                self.triangle_sum_x / 3.0 / self.area_sum_2,
                self.triangle_sum_y / 3.0 / self.area_sum_2,
            ))
        } else if self.length > 0.0 {
            Some(Coord::new(
                self.line_sum_x / self.length,
                self.line_sum_y / self.length,
            ))
        } else if self.point_count > 0 {
            let count = self.point_count as f64;
            Some(Coord::new(
                self.point_sum_x / count,
                self.point_sum_y / count,
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ortelius_io::wkt;

    fn centroid_of(text: &str) -> Coord {
        let geometry = wkt::parse(text).unwrap();
        centroid(&geometry).unwrap()
    }

    #[test]
    fn square_centroid_is_its_center() {
        let c = centroid_of("POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))");
        assert_abs_diff_eq!(c.x, 5.0);
        assert_abs_diff_eq!(c.y, 5.0);
    }

    #[test]
    fn ring_orientation_does_not_matter() {
        let cw = centroid_of("POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))");
        let ccw = centroid_of("POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0))");
        assert_abs_diff_eq!(cw.x, ccw.x);
        assert_abs_diff_eq!(cw.y, ccw.y);
    }

    #[test]
    fn hole_shifts_the_centroid_away() {
        // hole in the right half pulls the centroid left
        let c = centroid_of(
            "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0), (6 4, 6 6, 8 6, 8 4, 6 4))",
        );
        assert!(c.x < 5.0);
        assert_abs_diff_eq!(c.y, 5.0);
    }

    #[test]
    fn line_centroid_weighs_by_length() {
        // two collinear pieces, the longer one dominates
        let c = centroid_of("MULTILINESTRING ((0 0, 8 0), (8 0, 10 0))");
        assert_abs_diff_eq!(c.x, 5.0);
        assert_abs_diff_eq!(c.y, 0.0);
        let bent = centroid_of("LINESTRING (0 0, 10 0, 10 10)");
        assert_abs_diff_eq!(bent.x, 7.5);
        assert_abs_diff_eq!(bent.y, 2.5);
    }

    #[test]
    fn point_centroid_is_the_mean() {
        let c = centroid_of("MULTIPOINT ((0 0), (10 0), (10 10), (0 10))");
        assert_abs_diff_eq!(c.x, 5.0);
        assert_abs_diff_eq!(c.y, 5.0);
    }

    #[test]
    fn area_dominates_lines_and_points() {
        let c = centroid_of(
            "GEOMETRYCOLLECTION (POLYGON ((0 0, 0 2, 2 2, 2 0, 0 0)), \
             LINESTRING (50 50, 60 50), POINT (100 100))",
        );
        assert_abs_diff_eq!(c.x, 1.0);
        assert_abs_diff_eq!(c.y, 1.0);
    }

    #[test]
    fn empty_geometry_has_no_centroid() {
        let geometry = wkt::parse("POLYGON EMPTY").unwrap();
        assert_eq!(centroid(&geometry), None);
        let geometry = wkt::parse("GEOMETRYCOLLECTION EMPTY").unwrap();
        assert_eq!(centroid(&geometry), None);
    }

    #[test]
    fn multipolygon_weighs_member_areas() {
        // 2x2 square at origin and 2x2 square centered at (10, 0)
        let c = centroid_of(
            "MULTIPOLYGON (((-1 -1, -1 1, 1 1, 1 -1, -1 -1)), \
             ((9 -1, 9 1, 11 1, 11 -1, 9 -1)))",
        );
        assert_abs_diff_eq!(c.x, 5.0);
        assert_abs_diff_eq!(c.y, 0.0);
    }
}
