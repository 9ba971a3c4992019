//! Planar bounding boxes.

use crate::Coord;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding rectangle.
///
/// A freshly created envelope is empty (inverted bounds); expanding it with
/// coordinates grows it to cover them.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Smallest covered x ordinate.
    pub min_x: f64,
    /// Smallest covered y ordinate.
    pub min_y: f64,
    /// Largest covered x ordinate.
    pub max_x: f64,
    /// Largest covered y ordinate.
    pub max_y: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}

impl Envelope {
    /// Creates an empty envelope.
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Creates an envelope covering the two coordinates.
    pub fn of(a: &Coord, b: &Coord) -> Self {
        let mut envelope = Self::new();
        envelope.expand_to_include(a);
        envelope.expand_to_include(b);
        envelope
    }

    /// True when the envelope covers no points.
    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x
    }

    /// Grows the envelope to cover `coord`.
    pub fn expand_to_include(&mut self, coord: &Coord) {
        if coord.x < self.min_x {
            self.min_x = coord.x;
        }
        if coord.x > self.max_x {
            self.max_x = coord.x;
        }
        if coord.y < self.min_y {
            self.min_y = coord.y;
        }
        if coord.y > self.max_y {
            self.max_y = coord.y;
        }
    }

    /// Grows the envelope to cover `other` entirely.
    pub fn expand_to_include_envelope(&mut self, other: &Envelope) {
        if other.is_empty() {
            return;
        }
        self.expand_to_include(&Coord::new(other.min_x, other.min_y));
        self.expand_to_include(&Coord::new(other.max_x, other.max_y));
    }

    /// True when the envelopes share at least one point.
    pub fn intersects(&self, other: &Envelope) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    /// True when the coordinate lies inside or on the envelope.
    pub fn covers(&self, coord: &Coord) -> bool {
        coord.x >= self.min_x
            && coord.x <= self.max_x
            && coord.y >= self.min_y
            && coord.y <= self.max_y
    }

    /// Width of the envelope, 0 when empty.
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Height of the envelope, 0 when empty.
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_expands() {
        let mut envelope = Envelope::new();
        assert!(envelope.is_empty());
        envelope.expand_to_include(&Coord::new(1.0, 2.0));
        envelope.expand_to_include(&Coord::new(-1.0, 5.0));
        assert!(!envelope.is_empty());
        assert_eq!(envelope.min_x, -1.0);
        assert_eq!(envelope.max_y, 5.0);
        assert_eq!(envelope.width(), 2.0);
        assert_eq!(envelope.height(), 3.0);
    }

    #[test]
    fn intersection_tests() {
        let a = Envelope::of(&Coord::new(0.0, 0.0), &Coord::new(2.0, 2.0));
        let b = Envelope::of(&Coord::new(2.0, 2.0), &Coord::new(3.0, 3.0));
        let c = Envelope::of(&Coord::new(5.0, 5.0), &Coord::new(6.0, 6.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!Envelope::new().intersects(&a));
        assert!(a.covers(&Coord::new(1.0, 1.0)));
        assert!(!a.covers(&Coord::new(2.5, 1.0)));
    }
}
