//! Overlay for operand pairs that are not both areal.
//!
//! Any such result is made of content from the lower-dimensional operand,
//! so the engine nodes that operand's pieces against the other and keeps
//! the pieces the operation selects. Kept edges are merged back into the
//! longest unambiguous chains before packing.

use std::collections::VecDeque;

use super::OverlayOp;
use crate::boundary::lineal_boundary_points;
use crate::error::OrteliusError;
use crate::locate::{locate_areal, locate_lineal, locate_puntal};
use crate::noding::{node_chain, push_unique, segments_of_lines, segments_of_polygons};
use crate::parts;
use ortelius_types::segment::Segment;
use ortelius_types::{
    Coord, Dimension, Geometry, GeometryCollection, LineString, Location, Point, Polygon,
};

/// One operand flattened into homogeneous parts, with its lineal boundary
/// precomputed so repeated point location stays cheap.
struct Side<'g> {
    dimension: Dimension,
    polygons: Vec<&'g Polygon>,
    lines: Vec<LineString>,
    line_boundary: Vec<Coord>,
    points: Vec<Coord>,
}

impl<'g> Side<'g> {
    fn of(geometry: &'g Geometry) -> Self {
        let dimension = geometry.dimension();
        let polygons = match dimension {
            Dimension::A => parts::areal_parts(geometry),
            _ => Vec::new(),
        };
        let lines = match dimension {
            Dimension::L => parts::lineal_parts(geometry),
            _ => Vec::new(),
        };
        let line_boundary = lineal_boundary_points(&lines);
        let points = match dimension {
            Dimension::P => parts::puntal_coords(geometry),
            _ => Vec::new(),
        };
        Side {
            dimension,
            polygons,
            lines,
            line_boundary,
            points,
        }
    }

    fn locate(&self, p: &Coord) -> Location {
        match self.dimension {
            Dimension::A => locate_areal(p, &self.polygons),
            Dimension::L => locate_lineal(p, &self.lines, &self.line_boundary),
            _ => locate_puntal(p, &self.points),
        }
    }

    fn cutters(&self) -> Vec<(Coord, Coord)> {
        match self.dimension {
            Dimension::A => segments_of_polygons(&self.polygons),
            Dimension::L => segments_of_lines(&self.lines),
            _ => Vec::new(),
        }
    }
}

pub(super) fn overlay_mixed(
    a: &Geometry,
    b: &Geometry,
    op: OverlayOp,
) -> Result<Geometry, OrteliusError> {
    let side_a = Side::of(a);
    let side_b = Side::of(b);
    match op {
        OverlayOp::Intersection => Ok(intersection(&side_a, &side_b)),
        OverlayOp::Union => Ok(union_mixed(a, b, &side_a, &side_b)),
        OverlayOp::Difference => Ok(difference(a, &side_a, &side_b)),
        // the caller decomposes a symmetric difference into differences
        OverlayOp::SymDifference => unreachable!(),
    }
}

fn intersection(side_a: &Side<'_>, side_b: &Side<'_>) -> Geometry {
    let fallback = side_a.dimension.min(side_b.dimension);
    let (low, high) = if side_b.dimension < side_a.dimension {
        (side_b, side_a)
    } else {
        (side_a, side_b)
    };
    if low.dimension == Dimension::P {
        let mut points = Vec::new();
        for p in &low.points {
            if high.locate(p) != Location::Exterior {
                push_unique(&mut points, *p);
            }
        }
        return super::assemble(points, Vec::new(), Vec::new(), fallback);
    }
    let (kept, points) = lineal_pieces(low, high, |location| location != Location::Exterior);
    super::assemble(points, chain_edges(&kept), Vec::new(), fallback)
}

fn difference(a: &Geometry, side_a: &Side<'_>, side_b: &Side<'_>) -> Geometry {
    if side_a.dimension > side_b.dimension {
        // removing a lower-dimensional set leaves no gap of positive measure
        return a.clone();
    }
    if side_a.dimension == Dimension::P {
        let mut points = Vec::new();
        for p in &side_a.points {
            if side_b.locate(p) == Location::Exterior {
                push_unique(&mut points, *p);
            }
        }
        return super::assemble(points, Vec::new(), Vec::new(), Dimension::P);
    }
    let (kept, _) = lineal_pieces(side_a, side_b, |location| location == Location::Exterior);
    super::assemble(Vec::new(), chain_edges(&kept), Vec::new(), Dimension::L)
}

fn union_mixed(a: &Geometry, b: &Geometry, side_a: &Side<'_>, side_b: &Side<'_>) -> Geometry {
    if side_a.dimension == side_b.dimension {
        if side_a.dimension == Dimension::P {
            let mut points = Vec::new();
            for p in side_a.points.iter().chain(side_b.points.iter()) {
                push_unique(&mut points, *p);
            }
            return super::assemble(points, Vec::new(), Vec::new(), Dimension::P);
        }
        // all of a, plus the parts of b running off a
        let a_cutters = side_a.cutters();
        let b_cutters = side_b.cutters();
        let mut edges = Vec::new();
        for line in &side_a.lines {
            for (start, end) in node_chain(&line.coords, &b_cutters) {
                push_unique_edge(&mut edges, start, end);
            }
        }
        for line in &side_b.lines {
            for (start, end) in node_chain(&line.coords, &a_cutters) {
                if side_a.locate(&start.mid(&end)) == Location::Exterior {
                    push_unique_edge(&mut edges, start, end);
                }
            }
        }
        return super::assemble(Vec::new(), chain_edges(&edges), Vec::new(), Dimension::L);
    }
    let (high, low_side, high_side) = if side_a.dimension < side_b.dimension {
        (b, side_a, side_b)
    } else {
        (a, side_b, side_a)
    };
    if low_side.dimension == Dimension::P {
        let mut points = Vec::new();
        for p in &low_side.points {
            if high_side.locate(p) == Location::Exterior {
                push_unique(&mut points, *p);
            }
        }
        with_higher(high, points, Vec::new())
    } else {
        let (kept, _) = lineal_pieces(low_side, high_side, |location| {
            location == Location::Exterior
        });
        with_higher(high, Vec::new(), chain_edges(&kept))
    }
}

/// Nodes `low`'s lines against `high` and splits the pieces into those the
/// predicate keeps and isolated contact vertices not covered by any kept
/// piece.
fn lineal_pieces(
    low: &Side<'_>,
    high: &Side<'_>,
    keep: impl Fn(Location) -> bool,
) -> (Vec<(Coord, Coord)>, Vec<Coord>) {
    let cutters = high.cutters();
    let mut kept = Vec::new();
    let mut vertices = Vec::new();
    for line in &low.lines {
        for (start, end) in node_chain(&line.coords, &cutters) {
            if keep(high.locate(&start.mid(&end))) {
                kept.push((start, end));
            }
            push_unique(&mut vertices, start);
            push_unique(&mut vertices, end);
        }
    }
    let mut points = Vec::new();
    for vertex in vertices {
        if !keep(high.locate(&vertex)) {
            continue;
        }
        let covered = kept
            .iter()
            .any(|(start, end)| Segment(start, end).contains_point(&vertex));
        if !covered {
            points.push(vertex);
        }
    }
    (kept, points)
}

/// The higher-dimensional operand plus lower-dimensional leftovers, or just
/// the operand when nothing is left over.
fn with_higher(high: &Geometry, points: Vec<Coord>, lines: Vec<LineString>) -> Geometry {
    if points.is_empty() && lines.is_empty() {
        return high.clone();
    }
    let mut members = Vec::new();
    for coord in points {
        members.push(Geometry::Point(Point::new(coord)));
    }
    for line in lines {
        members.push(Geometry::LineString(line));
    }
    members.push(high.clone());
    Geometry::GeometryCollection(GeometryCollection::new(members))
}

fn push_unique_edge(edges: &mut Vec<(Coord, Coord)>, start: Coord, end: Coord) {
    let duplicate = edges.iter().any(|(s, e)| {
        (s.equals_2d(&start) && e.equals_2d(&end)) || (s.equals_2d(&end) && e.equals_2d(&start))
    });
    if !duplicate {
        edges.push((start, end));
    }
}

/// Merges undirected edges into polylines, joining only at vertices where
/// exactly two edges meet so junctions and endpoints stay visible.
pub(super) fn chain_edges(edges: &[(Coord, Coord)]) -> Vec<LineString> {
    let mut degrees: Vec<(Coord, usize)> = Vec::new();
    for (start, end) in edges {
        for coord in [start, end] {
            match degrees.iter_mut().find(|(v, _)| v.equals_2d(coord)) {
                Some((_, n)) => *n += 1,
                None => degrees.push((*coord, 1)),
            }
        }
    }
    let mut used = vec![false; edges.len()];
    let mut out = Vec::new();
    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let (start, end) = edges[first];
        let mut chain = VecDeque::from([start, end]);
        let mut back = end;
        while !back.equals_2d(&start) {
            match take_continuation(edges, &mut used, &degrees, &back) {
                Some(next) => {
                    chain.push_back(next);
                    back = next;
                }
                None => break,
            }
        }
        let mut front = start;
        while let Some(next) = take_continuation(edges, &mut used, &degrees, &front) {
            chain.push_front(next);
            front = next;
        }
        out.push(LineString::new(chain.into_iter().collect()));
    }
    out
}

/// Consumes the single unused edge continuing past `at`, if `at` is an
/// unambiguous pass-through vertex.
fn take_continuation(
    edges: &[(Coord, Coord)],
    used: &mut [bool],
    degrees: &[(Coord, usize)],
    at: &Coord,
) -> Option<Coord> {
    let degree = degrees
        .iter()
        .find(|(v, _)| v.equals_2d(at))
        .map(|(_, n)| *n)
        .unwrap_or(0);
    if degree != 2 {
        return None;
    }
    for (index, (start, end)) in edges.iter().enumerate() {
        if used[index] {
            continue;
        }
        if start.equals_2d(at) {
            used[index] = true;
            return Some(*end);
        }
        if end.equals_2d(at) {
            used[index] = true;
            return Some(*start);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortelius_io::wkt;

    const SQUARE: &str = "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))";

    fn run(a: &str, b: &str, op: OverlayOp) -> Geometry {
        let ga = wkt::parse(a).unwrap();
        let gb = wkt::parse(b).unwrap();
        crate::overlay::overlay(&ga, &gb, op).unwrap()
    }

    #[test]
    fn point_against_polygon() {
        let result = run("POINT (5 5)", SQUARE, OverlayOp::Intersection);
        assert_eq!(wkt::write(&result), "POINT (5 5)");
        let result = run("POINT (15 5)", SQUARE, OverlayOp::Intersection);
        assert_eq!(wkt::write(&result), "POINT EMPTY");
        let result = run("POINT (0 5)", SQUARE, OverlayOp::Difference);
        assert_eq!(wkt::write(&result), "POINT EMPTY");
    }

    #[test]
    fn crossing_lines_intersect_in_a_point() {
        let result = run(
            "LINESTRING (0 0, 10 10)",
            "LINESTRING (0 10, 10 0)",
            OverlayOp::Intersection,
        );
        assert_eq!(wkt::write(&result), "POINT (5 5)");
    }

    #[test]
    fn crossing_lines_union_stays_noded() {
        let result = run(
            "LINESTRING (0 0, 10 10)",
            "LINESTRING (0 10, 10 0)",
            OverlayOp::Union,
        );
        let Geometry::MultiLineString(lines) = &result else {
            panic!("expected a multilinestring, got {result:?}");
        };
        assert_eq!(lines.lines.len(), 4);
    }

    #[test]
    fn collinear_lines() {
        let a = "LINESTRING (0 0, 10 0)";
        let b = "LINESTRING (5 0, 15 0)";
        let result = run(a, b, OverlayOp::Intersection);
        assert_eq!(wkt::write(&result), "LINESTRING (5 0, 10 0)");
        let result = run(a, b, OverlayOp::Union);
        assert_eq!(wkt::write(&result), "LINESTRING (0 0, 5 0, 10 0, 15 0)");
        let result = run(a, b, OverlayOp::Difference);
        assert_eq!(wkt::write(&result), "LINESTRING (0 0, 5 0)");
    }

    #[test]
    fn line_clipped_by_polygon() {
        let line = "LINESTRING (-5 5, 15 5)";
        let result = run(line, SQUARE, OverlayOp::Intersection);
        assert_eq!(wkt::write(&result), "LINESTRING (0 5, 10 5)");
        let result = run(line, SQUARE, OverlayOp::Difference);
        assert_eq!(
            wkt::write(&result),
            "MULTILINESTRING ((-5 5, 0 5), (10 5, 15 5))"
        );
    }

    #[test]
    fn line_touching_polygon_intersects_in_a_point() {
        let result = run("LINESTRING (10 5, 15 5)", SQUARE, OverlayOp::Intersection);
        assert_eq!(wkt::write(&result), "POINT (10 5)");
    }

    #[test]
    fn polygon_minus_line_is_unchanged() {
        let result = run(SQUARE, "LINESTRING (-5 5, 15 5)", OverlayOp::Difference);
        assert_eq!(wkt::write(&result), wkt::write(&wkt::parse(SQUARE).unwrap()));
    }

    #[test]
    fn point_union_polygon_is_a_collection_only_when_outside() {
        let result = run("POINT (15 5)", SQUARE, OverlayOp::Union);
        let Geometry::GeometryCollection(collection) = &result else {
            panic!("expected a collection, got {result:?}");
        };
        assert_eq!(collection.geometries.len(), 2);
        assert!(matches!(collection.geometries[0], Geometry::Point(_)));

        let result = run("POINT (5 5)", SQUARE, OverlayOp::Union);
        assert!(matches!(result, Geometry::Polygon(_)));
    }

    #[test]
    fn closed_loop_difference_survives_chaining() {
        let loop_line = "LINESTRING (0 20, 10 20, 10 30, 0 30, 0 20)";
        let result = run(loop_line, SQUARE, OverlayOp::Difference);
        let Geometry::LineString(line) = &result else {
            panic!("expected a linestring, got {result:?}");
        };
        assert!(line.is_closed());
        assert_eq!(line.coords.len(), 5);
    }
}
