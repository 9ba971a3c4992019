//! Matrix computation for two areal operands.

use crate::interior_point::polygon_interior_coord;
use crate::locate::locate_areal;
use crate::noding::{push_unique, segments_of_polygons, split_segment};
use crate::parts;
use ortelius_types::{Coord, Dimension, Geometry, IntersectionMatrix, Location, Polygon};

/// Polygon set against polygon set.
///
/// Boundary pieces classified against the other operand drive most of the
/// matrix. The interior/interior cell needs one extra probe per polygon for
/// the cases where the boundaries never leave each other.
pub(super) fn areal_areal(a: &Geometry, b: &Geometry) -> IntersectionMatrix {
    use Location::*;
    let a_polygons = parts::areal_parts(a);
    let b_polygons = parts::areal_parts(b);
    let a_segments = segments_of_polygons(&a_polygons);
    let b_segments = segments_of_polygons(&b_polygons);
    let mut cutters = a_segments.clone();
    cutters.extend_from_slice(&b_segments);

    let mut matrix = IntersectionMatrix::new();
    let mut a_edge_interior = false;
    let mut a_edge_exterior = false;
    let mut a_vertices: Vec<Coord> = Vec::new();
    for (start, end) in &a_segments {
        let chain = split_segment(*start, *end, &cutters);
        for pair in chain.windows(2) {
            match locate_areal(&pair[0].mid(&pair[1]), &b_polygons) {
                Interior => {
                    matrix.set_at_least(Boundary, Interior, Dimension::L);
                    a_edge_interior = true;
                }
                Boundary => matrix.set_at_least(Boundary, Boundary, Dimension::L),
                Exterior => {
                    matrix.set_at_least(Boundary, Exterior, Dimension::L);
                    a_edge_exterior = true;
                }
            }
        }
        for point in chain {
            push_unique(&mut a_vertices, point);
        }
    }
    let mut b_edge_interior = false;
    let mut b_edge_exterior = false;
    for (start, end) in &b_segments {
        for pair in split_segment(*start, *end, &cutters).windows(2) {
            match locate_areal(&pair[0].mid(&pair[1]), &a_polygons) {
                Interior => {
                    matrix.set_at_least(Interior, Boundary, Dimension::L);
                    b_edge_interior = true;
                }
                Boundary => {}
                Exterior => {
                    matrix.set_at_least(Exterior, Boundary, Dimension::L);
                    b_edge_exterior = true;
                }
            }
        }
    }
    // isolated boundary contacts; shared arcs were already recorded at
    // dimension L above
    for vertex in &a_vertices {
        if locate_areal(vertex, &b_polygons) == Boundary {
            matrix.set_at_least(Boundary, Boundary, Dimension::P);
        }
    }
    if a_edge_interior
        || b_edge_interior
        || interior_probe_hits(&a_polygons, &b_polygons)
        || interior_probe_hits(&b_polygons, &a_polygons)
    {
        matrix.set(Interior, Interior, Dimension::A);
    }
    if a_edge_exterior || b_edge_interior {
        matrix.set(Interior, Exterior, Dimension::A);
    }
    if b_edge_exterior || a_edge_interior {
        matrix.set(Exterior, Interior, Dimension::A);
    }
    matrix.set(Exterior, Exterior, Dimension::A);
    matrix
}

/// True when some polygon's representative interior point falls inside the
/// other operand. Catches containment where every boundary edge lies on the
/// other boundary, which leaves no edge evidence.
fn interior_probe_hits(polygons: &[&Polygon], other: &[&Polygon]) -> bool {
    polygons.iter().any(|polygon| {
        polygon_interior_coord(polygon)
            .map(|probe| locate_areal(&probe, other) == Location::Interior)
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortelius_io::wkt;

    fn matrix(a: &str, b: &str) -> IntersectionMatrix {
        let ga = wkt::parse(a).unwrap();
        let gb = wkt::parse(b).unwrap();
        crate::relate::relate(&ga, &gb).unwrap()
    }

    const SQUARE: &str = "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))";

    #[test]
    fn identical_polygons_are_equal() {
        let m = matrix(SQUARE, "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))");
        assert_eq!(m.to_string(), "2FFF1FFF2");
        assert!(m.is_equals(Dimension::A, Dimension::A));
    }

    #[test]
    fn disjoint_polygons() {
        let m = matrix(SQUARE, "POLYGON ((20 20, 20 30, 30 30, 30 20, 20 20))");
        assert_eq!(m.to_string(), "FF2FF1212");
        assert!(m.is_disjoint());
    }

    #[test]
    fn polygons_sharing_an_edge_touch() {
        let m = matrix(SQUARE, "POLYGON ((10 0, 10 10, 20 10, 20 0, 10 0))");
        assert_eq!(m.to_string(), "FF2F11212");
        assert!(m.is_touches(Dimension::A, Dimension::A));
    }

    #[test]
    fn polygons_sharing_a_corner_touch() {
        let m = matrix(SQUARE, "POLYGON ((10 10, 10 20, 20 20, 20 10, 10 10))");
        assert_eq!(m.to_string(), "FF2F01212");
        assert!(m.is_touches(Dimension::A, Dimension::A));
    }

    #[test]
    fn strict_containment() {
        let m = matrix(SQUARE, "POLYGON ((2 2, 2 8, 8 8, 8 2, 2 2))");
        assert_eq!(m.to_string(), "212FF1FF2");
        assert!(m.is_contains());
        let back = matrix("POLYGON ((2 2, 2 8, 8 8, 8 2, 2 2))", SQUARE);
        assert!(back.is_within());
    }

    #[test]
    fn overlapping_polygons() {
        let m = matrix(SQUARE, "POLYGON ((5 5, 5 15, 15 15, 15 5, 5 5))");
        assert_eq!(m.to_string(), "212101212");
        assert!(m.is_overlaps(Dimension::A, Dimension::A));
    }

    #[test]
    fn polygon_inside_a_hole_is_disjoint() {
        let donut =
            "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0), (2 2, 8 2, 8 8, 2 8, 2 2))";
        let m = matrix(donut, "POLYGON ((4 4, 4 6, 6 6, 6 4, 4 4))");
        assert_eq!(m.to_string(), "FF2FF1212");
        assert!(m.is_disjoint());
    }
}
