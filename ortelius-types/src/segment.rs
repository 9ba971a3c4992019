//! Straight line segments and their pairwise intersections.

use crate::envelope::Envelope;
use crate::orient::Orientation;
use crate::Coord;

/// A straight line segment between two borrowed points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a>(pub &'a Coord, pub &'a Coord);

/// Classified intersection of two segments.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentIntersection {
    /// The segments have no common point.
    None,
    /// The segments meet in exactly one point. `is_proper` is true when
    /// that point is interior to both segments.
    Point {
        /// The common point.
        at: Coord,
        /// Whether the point lies in both segments' interiors.
        is_proper: bool,
    },
    /// The segments are collinear and share a run of positive length.
    Collinear {
        /// One end of the shared run.
        start: Coord,
        /// The other end of the shared run.
        end: Coord,
    },
}

impl<'a> Segment<'a> {
    /// Bounding box of the segment.
    pub fn envelope(&self) -> Envelope {
        Envelope::of(self.0, self.1)
    }

    /// Midpoint of the segment.
    pub fn mid(&self) -> Coord {
        self.0.mid(self.1)
    }

    /// True when `p` lies on the segment, endpoints included.
    pub fn contains_point(&self, p: &Coord) -> bool {
        Orientation::triplet(self.0, self.1, p) == Orientation::Collinear
            && self.envelope().covers(p)
    }

    /// True when the segments share at least one point.
    pub fn intersects(&self, other: &Segment<'_>) -> bool {
        self.intersection(other) != SegmentIntersection::None
    }

    /// Computes the full intersection classification with `other`.
    ///
    /// Endpoints that lie exactly on the other segment are preserved
    /// bit-for-bit in the result rather than recomputed, so noding at an
    /// existing vertex never perturbs it.
    pub fn intersection(&self, other: &Segment<'_>) -> SegmentIntersection {
        let (p1, p2) = (self.0, self.1);
        let (q1, q2) = (other.0, other.1);

        if !self.envelope().intersects(&other.envelope()) {
            return SegmentIntersection::None;
        }

        let pq1 = Orientation::triplet(p1, p2, q1);
        let pq2 = Orientation::triplet(p1, p2, q2);
        if same_side(pq1, pq2) {
            return SegmentIntersection::None;
        }
        let qp1 = Orientation::triplet(q1, q2, p1);
        let qp2 = Orientation::triplet(q1, q2, p2);
        if same_side(qp1, qp2) {
            return SegmentIntersection::None;
        }

        let collinear = pq1 == Orientation::Collinear
            && pq2 == Orientation::Collinear
            && qp1 == Orientation::Collinear
            && qp2 == Orientation::Collinear;
        if collinear {
            return collinear_intersection(p1, p2, q1, q2);
        }

        if pq1 == Orientation::Collinear
            || pq2 == Orientation::Collinear
            || qp1 == Orientation::Collinear
            || qp2 == Orientation::Collinear
        {
            // the single intersection point is an existing endpoint
            let at = if p1.equals_2d(q1) || p1.equals_2d(q2) {
                *p1
            } else if p2.equals_2d(q1) || p2.equals_2d(q2) {
                *p2
            } else if pq1 == Orientation::Collinear {
                *q1
            } else if pq2 == Orientation::Collinear {
                *q2
            } else if qp1 == Orientation::Collinear {
                *p1
            } else {
                *p2
            };
            return SegmentIntersection::Point {
                at,
                is_proper: false,
            };
        }

        SegmentIntersection::Point {
            at: proper_intersection(p1, p2, q1, q2),
            is_proper: true,
        }
    }
}

fn same_side(a: Orientation, b: Orientation) -> bool {
    (a == Orientation::Clockwise && b == Orientation::Clockwise)
        || (a == Orientation::Counterclockwise && b == Orientation::Counterclockwise)
}

fn collinear_intersection(p1: &Coord, p2: &Coord, q1: &Coord, q2: &Coord) -> SegmentIntersection {
    let env_p = Envelope::of(p1, p2);
    let env_q = Envelope::of(q1, q2);
    let p1q1p2 = env_p.covers(q1);
    let p1q2p2 = env_p.covers(q2);
    let q1p1q2 = env_q.covers(p1);
    let q1p2q2 = env_q.covers(p2);

    let run = |start: &Coord, end: &Coord| SegmentIntersection::Collinear {
        start: *start,
        end: *end,
    };
    let single = |at: &Coord| SegmentIntersection::Point {
        at: *at,
        is_proper: false,
    };

    if p1q1p2 && p1q2p2 {
        return run(q1, q2);
    }
    if q1p1q2 && q1p2q2 {
        return run(p1, p2);
    }
    if p1q1p2 && q1p1q2 {
        if q1.equals_2d(p1) && !p1q2p2 && !q1p2q2 {
            return single(q1);
        }
        return run(q1, p1);
    }
    if p1q1p2 && q1p2q2 {
        if q1.equals_2d(p2) && !p1q2p2 && !q1p1q2 {
            return single(q1);
        }
        return run(q1, p2);
    }
    if p1q2p2 && q1p1q2 {
        if q2.equals_2d(p1) && !p1q1p2 && !q1p2q2 {
            return single(q2);
        }
        return run(q2, p1);
    }
    if p1q2p2 && q1p2q2 {
        if q2.equals_2d(p2) && !p1q1p2 && !q1p1q2 {
            return single(q2);
        }
        return run(q2, p2);
    }
    SegmentIntersection::None
}

/// Interior crossing point of two non-collinear segments, computed on
/// coordinates translated to the overlap envelope's center to limit
/// rounding error, then translated back.
fn proper_intersection(p1: &Coord, p2: &Coord, q1: &Coord, q2: &Coord) -> Coord {
    let norm_x = (p1.x.min(p2.x).max(q1.x.min(q2.x)) + p1.x.max(p2.x).min(q1.x.max(q2.x))) / 2.0;
    let norm_y = (p1.y.min(p2.y).max(q1.y.min(q2.y)) + p1.y.max(p2.y).min(q1.y.max(q2.y))) / 2.0;

    let (x1, y1) = (p1.x - norm_x, p1.y - norm_y);
    let (x2, y2) = (p2.x - norm_x, p2.y - norm_y);
    let (x3, y3) = (q1.x - norm_x, q1.y - norm_y);
    let (x4, y4) = (q2.x - norm_x, q2.y - norm_y);

    let px = y1 - y2;
    let py = x2 - x1;
    let pw = x1 * y2 - x2 * y1;
    let qx = y3 - y4;
    let qy = x4 - x3;
    let qw = x3 * y4 - x4 * y3;

    let x = py * qw - qy * pw;
    let y = qx * pw - px * qw;
    let w = px * qy - qx * py;
    let x_int = x / w;
    let y_int = y / w;

    if x_int.is_finite() && y_int.is_finite() {
        Coord::new(x_int + norm_x, y_int + norm_y)
    } else {
        // numerical blowup: fall back to the endpoint nearest the cluster
        nearest_endpoint(p1, p2, q1, q2)
    }
}

fn nearest_endpoint(p1: &Coord, p2: &Coord, q1: &Coord, q2: &Coord) -> Coord {
    let center = Coord::new(
        (p1.x + p2.x + q1.x + q2.x) / 4.0,
        (p1.y + p2.y + q1.y + q2.y) / 4.0,
    );
    let mut best = *p1;
    let mut best_dist = p1.distance(&center);
    for candidate in [p2, q1, q2] {
        let dist = candidate.distance(&center);
        if dist < best_dist {
            best_dist = dist;
            best = *candidate;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_segments() {
        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(1.0, 0.0));
        let (c, d) = (Coord::new(0.0, 1.0), Coord::new(1.0, 1.0));
        assert_eq!(
            Segment(&a, &b).intersection(&Segment(&c, &d)),
            SegmentIntersection::None
        );
    }

    #[test]
    fn proper_crossing() {
        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(10.0, 10.0));
        let (c, d) = (Coord::new(0.0, 10.0), Coord::new(10.0, 0.0));
        let SegmentIntersection::Point { at, is_proper } =
            Segment(&a, &b).intersection(&Segment(&c, &d))
        else {
            panic!("expected point intersection");
        };
        assert!(is_proper);
        assert_eq!(at, Coord::new(5.0, 5.0));
    }

    #[test]
    fn endpoint_touch_is_not_proper() {
        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(10.0, 0.0));
        let (c, d) = (Coord::new(5.0, 0.0), Coord::new(5.0, 7.0));
        let SegmentIntersection::Point { at, is_proper } =
            Segment(&a, &b).intersection(&Segment(&c, &d))
        else {
            panic!("expected point intersection");
        };
        assert!(!is_proper);
        assert_eq!(at, Coord::new(5.0, 0.0));
    }

    #[test]
    fn collinear_overlap() {
        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(10.0, 0.0));
        let (c, d) = (Coord::new(4.0, 0.0), Coord::new(14.0, 0.0));
        let SegmentIntersection::Collinear { start, end } =
            Segment(&a, &b).intersection(&Segment(&c, &d))
        else {
            panic!("expected collinear intersection");
        };
        assert_eq!(start, Coord::new(4.0, 0.0));
        assert_eq!(end, Coord::new(10.0, 0.0));
    }

    #[test]
    fn collinear_endpoint_touch() {
        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(10.0, 0.0));
        let (c, d) = (Coord::new(10.0, 0.0), Coord::new(20.0, 0.0));
        assert_eq!(
            Segment(&a, &b).intersection(&Segment(&c, &d)),
            SegmentIntersection::Point {
                at: Coord::new(10.0, 0.0),
                is_proper: false
            }
        );
    }

    #[test]
    fn contains_point() {
        let (a, b) = (Coord::new(0.0, 0.0), Coord::new(10.0, 10.0));
        assert!(Segment(&a, &b).contains_point(&Coord::new(5.0, 5.0)));
        assert!(Segment(&a, &b).contains_point(&Coord::new(0.0, 0.0)));
        assert!(!Segment(&a, &b).contains_point(&Coord::new(5.0, 6.0)));
        assert!(!Segment(&a, &b).contains_point(&Coord::new(11.0, 11.0)));
    }
}
