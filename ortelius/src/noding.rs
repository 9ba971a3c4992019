//! Splitting segments at their mutual intersection points.
//!
//! Every pairwise algorithm in the engine starts by noding: after splitting,
//! an open sub-segment contains no point of any cutter, so classifying its
//! midpoint classifies the whole piece. Intersection points are computed by
//! [`Segment::intersection`], which preserves existing vertices exactly, so
//! the same crossing yields the same split coordinate on both operands.

use ortelius_types::segment::{Segment, SegmentIntersection};
use ortelius_types::{Coord, LineString, Polygon};

/// Consecutive-vertex segments of a coordinate chain, zero-length runs
/// dropped.
pub(crate) fn segments_of(coords: &[Coord]) -> Vec<(Coord, Coord)> {
    coords
        .windows(2)
        .filter(|pair| !pair[0].equals_2d(&pair[1]))
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Segments of a set of lines.
pub(crate) fn segments_of_lines(lines: &[LineString]) -> Vec<(Coord, Coord)> {
    lines
        .iter()
        .flat_map(|line| segments_of(&line.coords))
        .collect()
}

/// Segments of every ring of a set of polygons.
pub(crate) fn segments_of_polygons(polygons: &[&Polygon]) -> Vec<(Coord, Coord)> {
    let mut out = Vec::new();
    for polygon in polygons {
        for ring in polygon.rings() {
            out.extend(segments_of(&ring.coords));
        }
    }
    out
}

/// Splits one segment at every point where a cutter touches or crosses it.
///
/// Returns the ordered vertex chain from `start` to `end`, both endpoints
/// included and coincident split points merged.
pub(crate) fn split_segment(start: Coord, end: Coord, cutters: &[(Coord, Coord)]) -> Vec<Coord> {
    let segment = Segment(&start, &end);
    let mut cuts = vec![start, end];
    for (c0, c1) in cutters {
        if c0.equals_2d(c1) {
            continue;
        }
        match segment.intersection(&Segment(c0, c1)) {
            SegmentIntersection::None => {}
            SegmentIntersection::Point { at, .. } => cuts.push(at),
            SegmentIntersection::Collinear { start: s, end: e } => {
                cuts.push(s);
                cuts.push(e);
            }
        }
    }
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    cuts.sort_by(|a, b| {
        let ka = (a.x - start.x) * dx + (a.y - start.y) * dy;
        let kb = (b.x - start.x) * dx + (b.y - start.y) * dy;
        ka.total_cmp(&kb)
    });
    cuts.dedup_by(|a, b| a.equals_2d(b));
    cuts
}

/// Splits every segment of a chain, keeping direction.
pub(crate) fn node_chain(coords: &[Coord], cutters: &[(Coord, Coord)]) -> Vec<(Coord, Coord)> {
    let mut out = Vec::new();
    for pair in coords.windows(2) {
        if pair[0].equals_2d(&pair[1]) {
            continue;
        }
        for sub in split_segment(pair[0], pair[1], cutters).windows(2) {
            out.push((sub[0], sub[1]));
        }
    }
    out
}

/// Appends `coord` unless an equal coordinate is already present.
pub(crate) fn push_unique(list: &mut Vec<Coord>, coord: Coord) {
    if !list.iter().any(|c| c.equals_2d(&coord)) {
        list.push(coord);
    }
}
