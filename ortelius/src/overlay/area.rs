//! Overlay of two areal operands.
//!
//! Both operands' rings are normalized to interior-on-the-left, noded
//! against each other, and every noded piece classified by where its
//! midpoint falls in the other operand. The operation selects pieces, the
//! selected pieces are stitched back into closed rings, and
//! counterclockwise rings become shells while clockwise rings become holes.

use std::f64::consts::PI;

use super::OverlayOp;
use crate::error::OrteliusError;
use crate::locate::locate_areal;
use crate::noding::{node_chain, push_unique, segments_of};
use crate::parts;
use ortelius_types::ring::{is_ccw, locate_point_in_ring, signed_area};
use ortelius_types::segment::Segment;
use ortelius_types::{Coord, Dimension, Geometry, LineString, LinearRing, Location, Polygon};

/// A noded directed boundary piece of one operand, classified against the
/// other operand.
#[derive(Debug, Clone, Copy)]
struct Piece {
    start: Coord,
    end: Coord,
    location: Location,
}

pub(super) fn overlay_areal(
    a: &Geometry,
    b: &Geometry,
    op: OverlayOp,
) -> Result<Geometry, OrteliusError> {
    let a_polygons = parts::areal_parts(a);
    let b_polygons = parts::areal_parts(b);
    let a_rings = oriented_rings(&a_polygons);
    let b_rings = oriented_rings(&b_polygons);
    let mut cutters: Vec<(Coord, Coord)> = Vec::new();
    for ring in a_rings.iter().chain(b_rings.iter()) {
        cutters.extend(segments_of(ring));
    }
    let a_pieces = classify(&a_rings, &cutters, &b_polygons);
    let b_pieces = classify(&b_rings, &cutters, &a_polygons);

    let mut selected: Vec<(Coord, Coord)> = Vec::new();
    for piece in &a_pieces {
        let keep = match (op, piece.location) {
            (OverlayOp::Intersection, Location::Interior) => true,
            (OverlayOp::Union | OverlayOp::Difference, Location::Exterior) => true,
            (_, Location::Boundary) => {
                // the first operand's copy stands for a shared stretch;
                // whether it participates depends on the relative direction
                match shared_direction(piece, &b_pieces) {
                    Some(same) => match op {
                        OverlayOp::Intersection | OverlayOp::Union => same,
                        OverlayOp::Difference => !same,
                        OverlayOp::SymDifference => false,
                    },
                    None => false,
                }
            }
            _ => false,
        };
        if keep {
            selected.push((piece.start, piece.end));
        }
    }
    for piece in &b_pieces {
        match (op, piece.location) {
            (OverlayOp::Intersection, Location::Interior) => {
                selected.push((piece.start, piece.end));
            }
            (OverlayOp::Union, Location::Exterior) => {
                selected.push((piece.start, piece.end));
            }
            (OverlayOp::Difference, Location::Interior) => {
                // subtracted content bounds the result with reversed
                // orientation, turning it into hole linework
                selected.push((piece.end, piece.start));
            }
            _ => {}
        }
    }

    let rings = stitch_rings(selected)?;
    let polygons = build_polygons(rings)?;

    let mut lines: Vec<LineString> = Vec::new();
    let mut points: Vec<Coord> = Vec::new();
    if op == OverlayOp::Intersection {
        collect_residue(&a_pieces, &b_polygons, &polygons, &mut lines, &mut points);
    }
    Ok(super::assemble(points, lines, polygons, Dimension::A))
}

/// Ring coordinate chains of the polygons with the operand interior on the
/// left of every directed segment: shells counterclockwise, holes clockwise.
fn oriented_rings(polygons: &[&Polygon]) -> Vec<Vec<Coord>> {
    let mut rings = Vec::new();
    for polygon in polygons {
        let mut shell = polygon.exterior.coords.clone();
        if !is_ccw(&shell) {
            shell.reverse();
        }
        rings.push(shell);
        for hole in &polygon.interiors {
            let mut coords = hole.coords.clone();
            if is_ccw(&coords) {
                coords.reverse();
            }
            rings.push(coords);
        }
    }
    rings
}

fn classify(rings: &[Vec<Coord>], cutters: &[(Coord, Coord)], other: &[&Polygon]) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for ring in rings {
        for (start, end) in node_chain(ring, cutters) {
            let location = locate_areal(&start.mid(&end), other);
            pieces.push(Piece {
                start,
                end,
                location,
            });
        }
    }
    pieces
}

/// For a piece on the other operand's boundary: `Some(true)` when the other
/// operand traverses the same stretch in the same direction, `Some(false)`
/// for the opposite direction.
fn shared_direction(piece: &Piece, others: &[Piece]) -> Option<bool> {
    for other in others {
        if other.location != Location::Boundary {
            continue;
        }
        if other.start.equals_2d(&piece.start) && other.end.equals_2d(&piece.end) {
            return Some(true);
        }
        if other.start.equals_2d(&piece.end) && other.end.equals_2d(&piece.start) {
            return Some(false);
        }
    }
    None
}

/// Stitches directed edges into closed rings.
///
/// At a node with several unused continuations the edge turning hardest
/// clockwise from the incoming direction is taken; rings that still touch
/// themselves at pinch vertices are split into simple rings afterwards.
fn stitch_rings(mut edges: Vec<(Coord, Coord)>) -> Result<Vec<Vec<Coord>>, OrteliusError> {
    edges.retain(|(start, end)| !start.equals_2d(end));
    let mut used = vec![false; edges.len()];
    let mut rings = Vec::new();
    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let (start, mut current) = edges[first];
        let mut chain = vec![start, current];
        let mut incoming = direction(&start, &current);
        while !current.equals_2d(&start) {
            let next = best_continuation(&edges, &used, &current, incoming).ok_or_else(|| {
                OrteliusError::Overlay("overlay produced an unclosed result ring".into())
            })?;
            used[next] = true;
            incoming = direction(&edges[next].0, &edges[next].1);
            current = edges[next].1;
            chain.push(current);
        }
        rings.extend(split_at_pinches(chain));
    }
    Ok(rings)
}

fn direction(from: &Coord, to: &Coord) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

fn best_continuation(
    edges: &[(Coord, Coord)],
    used: &[bool],
    at: &Coord,
    incoming: f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, (start, end)) in edges.iter().enumerate() {
        if used[index] || !start.equals_2d(at) {
            continue;
        }
        let turn = clockwise_turn(incoming, direction(start, end));
        if best.map(|(_, t)| turn < t).unwrap_or(true) {
            best = Some((index, turn));
        }
    }
    best.map(|(index, _)| index)
}

/// Angle swept clockwise from the reversal of `incoming` to `outgoing`,
/// normalized into `(0, 2*PI]`. A full sweep means doubling straight back,
/// which is the last resort.
fn clockwise_turn(incoming: f64, outgoing: f64) -> f64 {
    let mut turn = incoming + PI - outgoing;
    while turn <= 0.0 {
        turn += 2.0 * PI;
    }
    while turn > 2.0 * PI {
        turn -= 2.0 * PI;
    }
    turn
}

/// Splits a closed chain that revisits a vertex into simple closed rings,
/// dropping degenerate fragments.
fn split_at_pinches(chain: Vec<Coord>) -> Vec<Vec<Coord>> {
    let mut out = Vec::new();
    let mut stack = vec![chain];
    while let Some(ring) = stack.pop() {
        let open = ring.len() - 1;
        let mut pinch: Option<(usize, usize)> = None;
        'scan: for i in 0..open {
            for j in (i + 1)..open {
                if ring[i].equals_2d(&ring[j]) {
                    pinch = Some((i, j));
                    break 'scan;
                }
            }
        }
        match pinch {
            None => {
                if ring.len() >= 4 {
                    out.push(ring);
                }
            }
            Some((i, j)) => {
                let inner: Vec<Coord> = ring[i..=j].to_vec();
                let mut outer: Vec<Coord> = Vec::with_capacity(ring.len() + i - j);
                outer.extend_from_slice(&ring[..=i]);
                outer.extend_from_slice(&ring[j + 1..]);
                if inner.len() >= 3 {
                    stack.push(inner);
                }
                if outer.len() >= 3 {
                    stack.push(outer);
                }
            }
        }
    }
    out
}

/// Sorts stitched rings into polygons: counterclockwise rings are shells,
/// clockwise rings are holes of the smallest shell containing them. Output
/// rings follow the conventional orientation, shells clockwise and holes
/// counterclockwise.
fn build_polygons(rings: Vec<Vec<Coord>>) -> Result<Vec<Polygon>, OrteliusError> {
    let mut shells: Vec<(Vec<Coord>, Vec<Vec<Coord>>, f64)> = Vec::new();
    let mut holes: Vec<Vec<Coord>> = Vec::new();
    for ring in rings {
        if is_ccw(&ring) {
            let size = signed_area(&ring).abs();
            shells.push((ring, Vec::new(), size));
        } else {
            holes.push(ring);
        }
    }
    for hole in holes {
        let probe = hole[0];
        let mut owner: Option<usize> = None;
        for (index, (shell, _, size)) in shells.iter().enumerate() {
            if locate_point_in_ring(&probe, shell) == Location::Exterior {
                continue;
            }
            let better = match owner {
                Some(current) => *size < shells[current].2,
                None => true,
            };
            if better {
                owner = Some(index);
            }
        }
        let Some(owner) = owner else {
            return Err(OrteliusError::Overlay(
                "overlay produced a hole outside every shell".into(),
            ));
        };
        shells[owner].1.push(hole);
    }
    let mut polygons = Vec::with_capacity(shells.len());
    for (mut shell, shell_holes, _) in shells {
        shell.reverse();
        let exterior = LinearRing::new(shell)?;
        let mut interiors = Vec::with_capacity(shell_holes.len());
        for mut hole in shell_holes {
            hole.reverse();
            interiors.push(LinearRing::new(hole)?);
        }
        polygons.push(Polygon::new(exterior, interiors));
    }
    Ok(polygons)
}

/// Lower-dimensional leftovers of an areal intersection: shared boundary
/// stretches and isolated touch points not covered by the area result.
fn collect_residue(
    a_pieces: &[Piece],
    b_polygons: &[&Polygon],
    result: &[Polygon],
    lines: &mut Vec<LineString>,
    points: &mut Vec<Coord>,
) {
    let result_refs: Vec<&Polygon> = result.iter().collect();
    let mut residue_edges: Vec<(Coord, Coord)> = Vec::new();
    for piece in a_pieces {
        if piece.location != Location::Boundary {
            continue;
        }
        if locate_areal(&piece.start.mid(&piece.end), &result_refs) == Location::Exterior {
            residue_edges.push((piece.start, piece.end));
        }
    }
    let mut candidates: Vec<Coord> = Vec::new();
    for piece in a_pieces {
        push_unique(&mut candidates, piece.start);
        push_unique(&mut candidates, piece.end);
    }
    for vertex in candidates {
        if locate_areal(&vertex, b_polygons) != Location::Boundary {
            continue;
        }
        if locate_areal(&vertex, &result_refs) != Location::Exterior {
            continue;
        }
        let on_line = residue_edges
            .iter()
            .any(|(start, end)| Segment(start, end).contains_point(&vertex));
        if !on_line {
            points.push(vertex);
        }
    }
    lines.extend(super::linework::chain_edges(&residue_edges));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ortelius_io::wkt;

    const SQUARE: &str = "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))";
    const SHIFTED: &str = "POLYGON ((5 5, 5 15, 15 15, 15 5, 5 5))";

    fn run(a: &str, b: &str, op: OverlayOp) -> Geometry {
        let ga = wkt::parse(a).unwrap();
        let gb = wkt::parse(b).unwrap();
        crate::overlay::overlay(&ga, &gb, op).unwrap()
    }

    #[test]
    fn overlapping_squares_intersection() {
        let result = run(SQUARE, SHIFTED, OverlayOp::Intersection);
        assert_abs_diff_eq!(result.area(), 25.0, epsilon = 1e-9);
        let Geometry::Polygon(polygon) = &result else {
            panic!("expected a polygon, got {result:?}");
        };
        assert_eq!(polygon.interiors.len(), 0);
    }

    #[test]
    fn overlapping_squares_union() {
        let result = run(SQUARE, SHIFTED, OverlayOp::Union);
        assert_abs_diff_eq!(result.area(), 175.0, epsilon = 1e-9);
        assert!(matches!(result, Geometry::Polygon(_)));
    }

    #[test]
    fn overlapping_squares_difference() {
        let result = run(SQUARE, SHIFTED, OverlayOp::Difference);
        assert_abs_diff_eq!(result.area(), 75.0, epsilon = 1e-9);
    }

    #[test]
    fn identical_squares() {
        let result = run(SQUARE, SQUARE, OverlayOp::Intersection);
        assert_abs_diff_eq!(result.area(), 100.0, epsilon = 1e-9);
        let result = run(SQUARE, SQUARE, OverlayOp::Difference);
        assert_eq!(wkt::write(&result), "POLYGON EMPTY");
    }

    #[test]
    fn disjoint_squares_intersection_is_empty_polygon() {
        let result = run(
            SQUARE,
            "POLYGON ((20 0, 20 10, 30 10, 30 0, 20 0))",
            OverlayOp::Intersection,
        );
        assert_eq!(wkt::write(&result), "POLYGON EMPTY");
    }

    #[test]
    fn disjoint_squares_union_is_a_multipolygon() {
        let result = run(
            SQUARE,
            "POLYGON ((20 0, 20 10, 30 10, 30 0, 20 0))",
            OverlayOp::Union,
        );
        assert!(matches!(result, Geometry::MultiPolygon(_)));
        assert_abs_diff_eq!(result.area(), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn contained_square_difference_cuts_a_hole() {
        let result = run(
            SQUARE,
            "POLYGON ((4 4, 4 6, 6 6, 6 4, 4 4))",
            OverlayOp::Difference,
        );
        let Geometry::Polygon(polygon) = &result else {
            panic!("expected a polygon, got {result:?}");
        };
        assert_eq!(polygon.interiors.len(), 1);
        assert_abs_diff_eq!(result.area(), 96.0, epsilon = 1e-9);
    }

    #[test]
    fn union_fills_a_matching_hole() {
        let donut = "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0), (4 4, 6 4, 6 6, 4 6, 4 4))";
        let plug = "POLYGON ((4 4, 4 6, 6 6, 6 4, 4 4))";
        let result = run(donut, plug, OverlayOp::Union);
        let Geometry::Polygon(polygon) = &result else {
            panic!("expected a polygon, got {result:?}");
        };
        assert!(polygon.interiors.is_empty());
        assert_abs_diff_eq!(result.area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn edge_contact_intersection_is_a_line() {
        let result = run(
            SQUARE,
            "POLYGON ((10 0, 10 10, 20 10, 20 0, 10 0))",
            OverlayOp::Intersection,
        );
        let Geometry::LineString(line) = &result else {
            panic!("expected a line, got {result:?}");
        };
        assert_abs_diff_eq!(line.length(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn corner_contact_intersection_is_a_point() {
        let result = run(
            SQUARE,
            "POLYGON ((10 10, 10 20, 20 20, 20 10, 10 10))",
            OverlayOp::Intersection,
        );
        assert_eq!(wkt::write(&result), "POINT (10 10)");
    }

    #[test]
    fn difference_splits_into_two_parts() {
        let strip = "POLYGON ((4 -1, 4 11, 6 11, 6 -1, 4 -1))";
        let result = run(SQUARE, strip, OverlayOp::Difference);
        let Geometry::MultiPolygon(parts) = &result else {
            panic!("expected a multipolygon, got {result:?}");
        };
        assert_eq!(parts.polygons.len(), 2);
        assert_abs_diff_eq!(result.area(), 80.0, epsilon = 1e-9);
    }

    #[test]
    fn touching_holes_stay_separate() {
        let bites = "MULTIPOLYGON (((4 4, 4 5, 5 5, 5 4, 4 4)), ((5 5, 5 6, 6 6, 6 5, 5 5)))";
        let result = run(SQUARE, bites, OverlayOp::Difference);
        let Geometry::Polygon(polygon) = &result else {
            panic!("expected a polygon, got {result:?}");
        };
        assert_eq!(polygon.interiors.len(), 2);
        assert_abs_diff_eq!(result.area(), 98.0, epsilon = 1e-9);
    }

    #[test]
    fn output_shells_are_clockwise() {
        let result = run(SQUARE, SHIFTED, OverlayOp::Intersection);
        let Geometry::Polygon(polygon) = &result else {
            panic!("expected a polygon, got {result:?}");
        };
        assert!(!is_ccw(&polygon.exterior.coords));
    }
}
