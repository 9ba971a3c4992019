//! Algorithms over closed coordinate rings.
//!
//! Rings are slices whose first and last coordinates coincide; callers are
//! expected to pass well-formed rings (the constructors in this crate
//! enforce closure).

use crate::orient::Orientation;
use crate::{Coord, Location};

/// Signed area of a closed ring, positive when the ring winds clockwise.
///
/// Returns 0 for degenerate rings with fewer than 3 distinct segments.
pub fn signed_area(ring: &[Coord]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let x0 = ring[0].x;
    let mut sum = 0.0;
    for i in 1..ring.len() - 1 {
        let x = ring[i].x - x0;
        let y1 = ring[i + 1].y;
        let y2 = ring[i - 1].y;
        sum += x * (y2 - y1);
    }
    sum / 2.0
}

/// True when the ring winds counterclockwise.
///
/// Uses the orientation at the topmost vertex, which stays correct for
/// rings containing collinear runs where a naive area sign could cancel.
pub fn is_ccw(ring: &[Coord]) -> bool {
    if ring.len() < 4 {
        return false;
    }
    let n = ring.len() - 1;
    let mut hi_index = 0;
    for i in 1..=n {
        if ring[i].y > ring[hi_index].y {
            hi_index = i;
        }
    }
    let mut i_prev = hi_index;
    loop {
        i_prev = (i_prev + n - 1) % n;
        if !ring[i_prev].equals_2d(&ring[hi_index]) || i_prev == hi_index {
            break;
        }
    }
    let mut i_next = hi_index;
    loop {
        i_next = (i_next + 1) % n;
        if !ring[i_next].equals_2d(&ring[hi_index]) || i_next == hi_index {
            break;
        }
    }
    let prev = &ring[i_prev];
    let hi = &ring[hi_index];
    let next = &ring[i_next];
    // a ring that collapses to a point or line has no orientation
    if prev.equals_2d(hi) || next.equals_2d(hi) || prev.equals_2d(next) {
        return false;
    }
    match Orientation::triplet(prev, hi, next) {
        Orientation::Counterclockwise => true,
        Orientation::Clockwise => false,
        Orientation::Collinear => prev.x > next.x,
    }
}

/// Locates a point relative to a closed ring by counting ray crossings.
///
/// A horizontal ray extends from the point in the positive x direction;
/// an odd crossing count means the point is inside. Points exactly on a
/// ring segment report [`Location::Boundary`].
pub fn locate_point_in_ring(p: &Coord, ring: &[Coord]) -> Location {
    if ring.len() < 2 {
        return Location::Exterior;
    }
    let mut crossings = 0u32;
    for i in 1..ring.len() {
        let p1 = &ring[i];
        let p2 = &ring[i - 1];
        if count_segment(p, p1, p2, &mut crossings) {
            return Location::Boundary;
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Counts whether segment (p1, p2) crosses the rightward ray from `p`.
/// Returns true when `p` lies on the segment itself.
///
/// Shared-vertex double counting is avoided by including an upward edge's
/// start and excluding its end, and the reverse for downward edges.
fn count_segment(p: &Coord, p1: &Coord, p2: &Coord, crossings: &mut u32) -> bool {
    if p1.x < p.x && p2.x < p.x {
        return false;
    }
    if p.x == p2.x && p.y == p2.y {
        return true;
    }
    if p1.y == p.y && p2.y == p.y {
        let (min_x, max_x) = if p1.x < p2.x { (p1.x, p2.x) } else { (p2.x, p1.x) };
        return p.x >= min_x && p.x <= max_x;
    }
    if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
        let x1 = p1.x - p.x;
        let y1 = p1.y - p.y;
        let x2 = p2.x - p.x;
        let y2 = p2.y - p.y;
        let mut x_int_sign = x1 * y2 - y1 * x2;
        if x_int_sign == 0.0 {
            return true;
        }
        if y2 < y1 {
            x_int_sign = -x_int_sign;
        }
        if x_int_sign > 0.0 {
            *crossings += 1;
        }
    }
    false
}
