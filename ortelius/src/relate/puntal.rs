//! Matrix rows for puntal first operands.

use crate::boundary::lineal_boundary_points;
use crate::locate::{locate_areal, locate_lineal, locate_puntal};
use crate::parts;
use ortelius_types::{Dimension, Geometry, IntersectionMatrix, Location};

/// Point set against point set, by coordinate membership.
pub(super) fn puntal_puntal(a: &Geometry, b: &Geometry) -> IntersectionMatrix {
    use Location::*;
    let pa = parts::puntal_coords(a);
    let pb = parts::puntal_coords(b);
    let mut matrix = IntersectionMatrix::new();
    for p in &pa {
        match locate_puntal(p, &pb) {
            Interior => matrix.set_at_least(Interior, Interior, Dimension::P),
            _ => matrix.set_at_least(Interior, Exterior, Dimension::P),
        }
    }
    for q in &pb {
        if locate_puntal(q, &pa) == Exterior {
            matrix.set_at_least(Exterior, Interior, Dimension::P);
        }
    }
    matrix.set(Exterior, Exterior, Dimension::A);
    matrix
}

/// Point set against line set.
pub(super) fn puntal_lineal(a: &Geometry, b: &Geometry) -> IntersectionMatrix {
    use Location::*;
    let points = parts::puntal_coords(a);
    let lines = parts::lineal_parts(b);
    let boundary = lineal_boundary_points(&lines);
    let mut matrix = IntersectionMatrix::new();
    for p in &points {
        match locate_lineal(p, &lines, &boundary) {
            Interior => matrix.set_at_least(Interior, Interior, Dimension::P),
            Boundary => matrix.set_at_least(Interior, Boundary, Dimension::P),
            Exterior => matrix.set_at_least(Interior, Exterior, Dimension::P),
        }
    }
    // a finite point set never covers a 1-dimensional interior
    matrix.set(Exterior, Interior, Dimension::L);
    if boundary.iter().any(|bp| locate_puntal(bp, &points) == Exterior) {
        matrix.set(Exterior, Boundary, Dimension::P);
    }
    matrix.set(Exterior, Exterior, Dimension::A);
    matrix
}

/// Point set against polygon set.
pub(super) fn puntal_areal(a: &Geometry, b: &Geometry) -> IntersectionMatrix {
    use Location::*;
    let points = parts::puntal_coords(a);
    let polygons = parts::areal_parts(b);
    let mut matrix = IntersectionMatrix::new();
    for p in &points {
        match locate_areal(p, &polygons) {
            Interior => matrix.set_at_least(Interior, Interior, Dimension::P),
            Boundary => matrix.set_at_least(Interior, Boundary, Dimension::P),
            Exterior => matrix.set_at_least(Interior, Exterior, Dimension::P),
        }
    }
    matrix.set(Exterior, Interior, Dimension::A);
    matrix.set(Exterior, Boundary, Dimension::L);
    matrix.set(Exterior, Exterior, Dimension::A);
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortelius_io::wkt;

    fn matrix_of(a: &str, b: &str) -> String {
        let ga = wkt::parse(a).unwrap();
        let gb = wkt::parse(b).unwrap();
        crate::relate::relate(&ga, &gb).unwrap().to_string()
    }

    #[test]
    fn identical_points_are_equal() {
        let matrix = matrix_of("POINT (1 2)", "POINT (1 2)");
        assert_eq!(matrix, "0FFFFFFF2");
        let ga = wkt::parse("POINT (1 2)").unwrap();
        let m = crate::relate::relate(&ga, &ga).unwrap();
        assert!(m.is_equals(Dimension::P, Dimension::P));
    }

    #[test]
    fn point_on_polygon_boundary() {
        let square = "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))";
        assert_eq!(matrix_of("POINT (0 5)", square), "F0FFFF212");
        assert_eq!(matrix_of("POINT (5 5)", square), "0FFFFF212");
        assert_eq!(matrix_of("POINT (15 5)", square), "FF0FFF212");
    }

    #[test]
    fn point_at_line_endpoint_meets_its_boundary() {
        let matrix = matrix_of("POINT (0 0)", "LINESTRING (0 0, 10 0)");
        assert_eq!(matrix, "F0FFFF102");
    }

    #[test]
    fn multipoint_covering_both_line_endpoints() {
        let matrix = matrix_of("MULTIPOINT ((0 0), (10 0))", "LINESTRING (0 0, 10 0)");
        assert_eq!(matrix, "F0FFFF1F2");
    }
}
