//! Topological validity checking.

use ortelius_types::ring::locate_point_in_ring;
use ortelius_types::segment::{Segment, SegmentIntersection};
use ortelius_types::{Coord, Geometry, LinearRing, Location, Polygon};

use crate::locate::locate_in_polygon;
use crate::noding::push_unique;

/// Checks a geometry against the structural validity rules.
///
/// Coordinates must be finite everywhere. A line is invalid only when it
/// consists of a single coordinate. Polygon rings must not self-intersect,
/// distinct rings may touch at single points only and must neither cross
/// nor share a collinear stretch, holes must lie inside the shell without
/// nesting, and the single-point contacts may not close a cycle that walls
/// off part of the interior. Polygons of a multipolygon must keep disjoint
/// interiors but may touch at finitely many points. A collection is valid
/// when all members are.
pub fn is_valid(geometry: &Geometry) -> bool {
    if !geometry.coords().iter().all(Coord::is_finite) {
        return false;
    }
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => true,
        Geometry::LineString(line) => line.coords.len() != 1,
        Geometry::LinearRing(ring) => ring_simple(&ring.coords),
        Geometry::MultiLineString(multi) => multi.lines.iter().all(|line| line.coords.len() != 1),
        Geometry::Polygon(polygon) => polygon_valid(polygon),
        Geometry::MultiPolygon(multi) => multi_polygon_valid(&multi.polygons),
        Geometry::GeometryCollection(collection) => collection.geometries.iter().all(is_valid),
    }
}

fn polygon_valid(polygon: &Polygon) -> bool {
    if polygon.exterior.is_empty() {
        return polygon.interiors.iter().all(LinearRing::is_empty);
    }
    let rings: Vec<&LinearRing> = polygon.rings().collect();
    if !rings.iter().all(|ring| ring_simple(&ring.coords)) {
        return false;
    }

    let mut links: Vec<(usize, usize)> = Vec::new();
    for i in 0..rings.len() {
        for j in (i + 1)..rings.len() {
            let Some(touches) = ring_contacts(&rings[i].coords, &rings[j].coords) else {
                return false;
            };
            if touches.len() > 1 {
                // two contacts between the same ring pair pinch the
                // interior apart
                return false;
            }
            if touches.len() == 1 {
                links.push((i, j));
            }
        }
    }
    if links_cycle(rings.len(), &links) {
        return false;
    }

    let shell = &polygon.exterior.coords;
    for hole in &polygon.interiors {
        if ring_side(&hole.coords, shell) != Some(Location::Interior) {
            return false;
        }
    }
    for i in 0..polygon.interiors.len() {
        for j in 0..polygon.interiors.len() {
            if i != j
                && ring_side(&polygon.interiors[i].coords, &polygon.interiors[j].coords)
                    != Some(Location::Exterior)
            {
                return false;
            }
        }
    }
    true
}

fn multi_polygon_valid(polygons: &[Polygon]) -> bool {
    if !polygons.iter().all(polygon_valid) {
        return false;
    }
    for i in 0..polygons.len() {
        for j in (i + 1)..polygons.len() {
            if !components_separate(&polygons[i], &polygons[j]) {
                return false;
            }
        }
    }
    true
}

/// True when two polygons of a multipolygon keep disjoint interiors: no
/// ring pair crosses or overlaps, and neither shell reaches into the
/// other's filled region.
fn components_separate(a: &Polygon, b: &Polygon) -> bool {
    for ring_a in a.rings() {
        for ring_b in b.rings() {
            if ring_contacts(&ring_a.coords, &ring_b.coords).is_none() {
                return false;
            }
        }
    }
    shell_stays_out(a, b) && shell_stays_out(b, a)
}

/// True when no probe of `inner`'s shell lands inside the filled region
/// of `outer`. Probes sit on shell vertices and edge midpoints; a shell
/// inside one of `outer`'s holes passes.
fn shell_stays_out(inner: &Polygon, outer: &Polygon) -> bool {
    for pair in inner.exterior.coords.windows(2) {
        if locate_in_polygon(&pair[0], outer) == Location::Interior {
            return false;
        }
        if !pair[0].equals_2d(&pair[1])
            && locate_in_polygon(&pair[0].mid(&pair[1]), outer) == Location::Interior
        {
            return false;
        }
    }
    true
}

/// True when a closed ring chain is free of self-intersections: adjacent
/// segments share exactly their common vertex and no other segment pair
/// meets at all, which also rejects rings revisiting a vertex.
fn ring_simple(coords: &[Coord]) -> bool {
    let mut chain = coords.to_vec();
    chain.dedup_by(|a, b| a.equals_2d(b));
    if chain.is_empty() {
        return true;
    }
    if chain.len() < 4 {
        // the ring collapsed onto a point or a line
        return false;
    }
    let last = chain.len() - 2;
    for i in 0..=last {
        for j in (i + 1)..=last {
            let adjacent = j == i + 1 || (i == 0 && j == last);
            let a = Segment(&chain[i], &chain[i + 1]);
            let b = Segment(&chain[j], &chain[j + 1]);
            match a.intersection(&b) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { .. } if adjacent => {}
                _ => return false,
            }
        }
    }
    true
}

/// Compares two rings segment by segment. `None` when they cross properly
/// or share a collinear stretch of positive length, otherwise the distinct
/// points where they touch.
fn ring_contacts(a: &[Coord], b: &[Coord]) -> Option<Vec<Coord>> {
    let mut touches: Vec<Coord> = Vec::new();
    for pa in a.windows(2) {
        if pa[0].equals_2d(&pa[1]) {
            continue;
        }
        for pb in b.windows(2) {
            if pb[0].equals_2d(&pb[1]) {
                continue;
            }
            match Segment(&pa[0], &pa[1]).intersection(&Segment(&pb[0], &pb[1])) {
                SegmentIntersection::None => {}
                SegmentIntersection::Collinear { .. } => return None,
                SegmentIntersection::Point { is_proper: true, .. } => return None,
                SegmentIntersection::Point { at, .. } => push_unique(&mut touches, at),
            }
        }
    }
    Some(touches)
}

/// The consistent side of ring `outer` on which ring `inner` lies, judged
/// from its vertices and edge midpoints. Boundary probes are inconclusive
/// and skipped. `None` means the evidence disagrees, so the rings cross
/// through a shared vertex, or that `inner` never leaves the boundary.
fn ring_side(inner: &[Coord], outer: &[Coord]) -> Option<Location> {
    let mut side: Option<Location> = None;
    let mut record = |location: Location| -> bool {
        match location {
            Location::Boundary => true,
            _ => match side {
                None => {
                    side = Some(location);
                    true
                }
                Some(existing) => existing == location,
            },
        }
    };
    for pair in inner.windows(2) {
        if !record(locate_point_in_ring(&pair[0], outer)) {
            return None;
        }
        if !pair[0].equals_2d(&pair[1])
            && !record(locate_point_in_ring(&pair[0].mid(&pair[1]), outer))
        {
            return None;
        }
    }
    side
}

/// True when the single-point contact graph over a polygon's rings
/// contains a cycle; the area the cycle encircles is cut off from the
/// rest of the interior.
fn links_cycle(ring_count: usize, links: &[(usize, usize)]) -> bool {
    let mut parent: Vec<usize> = (0..ring_count).collect();
    for &(a, b) in links {
        let root_a = root(&mut parent, a);
        let root_b = root(&mut parent, b);
        if root_a == root_b {
            return true;
        }
        parent[root_a] = root_b;
    }
    false
}

fn root(parent: &mut [usize], mut index: usize) -> usize {
    while parent[index] != index {
        parent[index] = parent[parent[index]];
        index = parent[index];
    }
    index
}
