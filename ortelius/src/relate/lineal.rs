//! Matrix rows for lineal first operands.

use crate::boundary::lineal_boundary_points;
use crate::locate::{locate_areal, locate_lineal};
use crate::noding::{node_chain, push_unique, segments_of_lines, segments_of_polygons, split_segment};
use crate::parts;
use ortelius_types::{Coord, Dimension, Geometry, IntersectionMatrix, Location};

/// Line set against line set.
///
/// Collinear overlap shows up as 1-dimensional interior intersection;
/// crossings and endpoint contacts as point events at noded vertices.
pub(super) fn lineal_lineal(a: &Geometry, b: &Geometry) -> IntersectionMatrix {
    use Location::*;
    let a_lines = parts::lineal_parts(a);
    let b_lines = parts::lineal_parts(b);
    let a_boundary = lineal_boundary_points(&a_lines);
    let b_boundary = lineal_boundary_points(&b_lines);
    let a_segments = segments_of_lines(&a_lines);
    let b_segments = segments_of_lines(&b_lines);
    let mut cutters = a_segments.clone();
    cutters.extend_from_slice(&b_segments);

    let mut matrix = IntersectionMatrix::new();
    let mut a_vertices: Vec<Coord> = Vec::new();
    for line in &a_lines {
        for (start, end) in node_chain(&line.coords, &cutters) {
            match locate_lineal(&start.mid(&end), &b_lines, &b_boundary) {
                Exterior => matrix.set_at_least(Interior, Exterior, Dimension::L),
                _ => matrix.set_at_least(Interior, Interior, Dimension::L),
            }
            push_unique(&mut a_vertices, start);
            push_unique(&mut a_vertices, end);
        }
    }
    let mut b_vertices: Vec<Coord> = Vec::new();
    for line in &b_lines {
        for (start, end) in node_chain(&line.coords, &cutters) {
            if locate_lineal(&start.mid(&end), &a_lines, &a_boundary) == Exterior {
                matrix.set_at_least(Exterior, Interior, Dimension::L);
            }
            push_unique(&mut b_vertices, start);
            push_unique(&mut b_vertices, end);
        }
    }
    for vertex in &a_vertices {
        let row = if a_boundary.iter().any(|p| p.equals_2d(vertex)) {
            Boundary
        } else {
            Interior
        };
        match locate_lineal(vertex, &b_lines, &b_boundary) {
            Exterior => {
                if row == Boundary {
                    matrix.set_at_least(Boundary, Exterior, Dimension::P);
                }
            }
            column => matrix.set_at_least(row, column, Dimension::P),
        }
    }
    for vertex in &b_vertices {
        let column = if b_boundary.iter().any(|p| p.equals_2d(vertex)) {
            Boundary
        } else {
            Interior
        };
        match locate_lineal(vertex, &a_lines, &a_boundary) {
            Exterior => {
                if column == Boundary {
                    matrix.set_at_least(Exterior, Boundary, Dimension::P);
                }
            }
            row => matrix.set_at_least(row, column, Dimension::P),
        }
    }
    matrix.set(Exterior, Exterior, Dimension::A);
    matrix
}

/// Line set against polygon set.
pub(super) fn lineal_areal(a: &Geometry, b: &Geometry) -> IntersectionMatrix {
    use Location::*;
    let a_lines = parts::lineal_parts(a);
    let polygons = parts::areal_parts(b);
    let a_boundary = lineal_boundary_points(&a_lines);
    let a_segments = segments_of_lines(&a_lines);
    let ring_segments = segments_of_polygons(&polygons);
    let mut cutters = a_segments.clone();
    cutters.extend_from_slice(&ring_segments);

    let mut matrix = IntersectionMatrix::new();
    let mut vertices: Vec<Coord> = Vec::new();
    for line in &a_lines {
        for (start, end) in node_chain(&line.coords, &cutters) {
            match locate_areal(&start.mid(&end), &polygons) {
                Interior => matrix.set_at_least(Interior, Interior, Dimension::L),
                Boundary => matrix.set_at_least(Interior, Boundary, Dimension::L),
                Exterior => matrix.set_at_least(Interior, Exterior, Dimension::L),
            }
            push_unique(&mut vertices, start);
            push_unique(&mut vertices, end);
        }
    }
    for vertex in &vertices {
        let location = locate_areal(vertex, &polygons);
        if a_boundary.iter().any(|p| p.equals_2d(vertex)) {
            matrix.set_at_least(Boundary, location, Dimension::P);
        } else if location == Boundary {
            // an interior vertex resting on a ring is a point contact even
            // when both adjacent pieces run outside
            matrix.set_at_least(Interior, Boundary, Dimension::P);
        }
    }
    matrix.set(Exterior, Interior, Dimension::A);
    if !rings_covered_by_lines(&ring_segments, &cutters, &a_lines, &a_boundary) {
        matrix.set(Exterior, Boundary, Dimension::L);
    }
    matrix.set(Exterior, Exterior, Dimension::A);
    matrix
}

/// True when every ring segment of the polygons lies along the lines. Only
/// then does the polygons' boundary avoid the lines' exterior.
fn rings_covered_by_lines(
    ring_segments: &[(Coord, Coord)],
    cutters: &[(Coord, Coord)],
    lines: &[ortelius_types::LineString],
    line_boundary: &[Coord],
) -> bool {
    for (start, end) in ring_segments {
        for sub in split_segment(*start, *end, cutters).windows(2) {
            let mid = sub[0].mid(&sub[1]);
            if locate_lineal(&mid, lines, line_boundary) == Location::Exterior {
                return false;
            }
        }
    }
    true
}
