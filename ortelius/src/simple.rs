//! Simplicity checking.

use ortelius_types::segment::{Segment, SegmentIntersection};
use ortelius_types::{Coord, Geometry, LineString};

use crate::parts;

/// Checks whether a geometry is simple, that is free of anomalous
/// self-intersections.
///
/// Polygonal geometries are always simple; their anomalies are validity
/// concerns. A multipoint is simple when no coordinate repeats. Lineal
/// geometries may self-intersect only where chain endpoints meet: chains
/// may share endpoints with each other, an open chain may return to its
/// own endpoint, and a ring closes on itself, but any crossing, overlap,
/// or contact through the middle of a chain breaks simplicity.
pub fn is_simple(geometry: &Geometry) -> bool {
    match geometry {
        Geometry::Point(_) => true,
        Geometry::MultiPoint(multi) => {
            let mut seen: Vec<Coord> = Vec::new();
            for point in &multi.points {
                if let Some(coord) = point.coord {
                    if seen.iter().any(|prior| prior.equals_2d(&coord)) {
                        return false;
                    }
                    seen.push(coord);
                }
            }
            true
        }
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => true,
        Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => {
            lineal_simple(&parts::lineal_parts(geometry))
        }
        Geometry::GeometryCollection(collection) => collection.geometries.iter().all(is_simple),
    }
}

/// True when the geometry is a closed, simple line.
///
/// Only the lineal atoms qualify: a closed simple [`LineString`] or a
/// non-empty simple ring. Everything else, the empty line included,
/// reports false.
pub fn is_ring(geometry: &Geometry) -> bool {
    match geometry {
        Geometry::LineString(line) => line.is_closed() && is_simple(geometry),
        Geometry::LinearRing(ring) => !ring.is_empty() && is_simple(geometry),
        _ => false,
    }
}

/// One segment of a flattened chain, remembering where it came from so
/// contacts can be judged against chain adjacency and chain endpoints.
struct ChainSegment {
    chain: usize,
    index: usize,
    start: Coord,
    end: Coord,
}

fn lineal_simple(lines: &[LineString]) -> bool {
    let chains: Vec<Vec<Coord>> = lines
        .iter()
        .map(|line| {
            let mut coords = line.coords.clone();
            coords.dedup_by(|a, b| a.equals_2d(b));
            coords
        })
        .collect();

    let mut segments: Vec<ChainSegment> = Vec::new();
    for (chain, coords) in chains.iter().enumerate() {
        for (index, pair) in coords.windows(2).enumerate() {
            segments.push(ChainSegment {
                chain,
                index,
                start: pair[0],
                end: pair[1],
            });
        }
    }

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            if !pair_permitted(&segments[i], &segments[j], &chains) {
                return false;
            }
        }
    }
    true
}

fn pair_permitted(a: &ChainSegment, b: &ChainSegment, chains: &[Vec<Coord>]) -> bool {
    let adjacent = a.chain == b.chain
        && (b.index == a.index + 1
            || (a.index == 0
                && b.index + 2 == chains[a.chain].len()
                && chain_closed(&chains[a.chain])));
    match Segment(&a.start, &a.end).intersection(&Segment(&b.start, &b.end)) {
        SegmentIntersection::None => true,
        SegmentIntersection::Collinear { .. } => false,
        SegmentIntersection::Point {
            is_proper: true, ..
        } => false,
        SegmentIntersection::Point { at, .. } => {
            // consecutive segments share exactly their common vertex
            if adjacent {
                return true;
            }
            endpoint_meeting(&at, a, chains) && endpoint_meeting(&at, b, chains)
        }
    }
}

/// A contact is tolerable for one side when it hits the segment at one of
/// its ends and that end is an endpoint of the whole open chain. Closed
/// chains keep no endpoints to meet at.
fn endpoint_meeting(at: &Coord, segment: &ChainSegment, chains: &[Vec<Coord>]) -> bool {
    if !at.equals_2d(&segment.start) && !at.equals_2d(&segment.end) {
        return false;
    }
    let chain = &chains[segment.chain];
    if chain_closed(chain) {
        return false;
    }
    at.equals_2d(&chain[0]) || at.equals_2d(&chain[chain.len() - 1])
}

fn chain_closed(chain: &[Coord]) -> bool {
    chain.len() > 2 && chain[0].equals_2d(&chain[chain.len() - 1])
}
