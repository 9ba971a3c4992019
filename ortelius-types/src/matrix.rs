use crate::{Dimension, GeometryError, Location};
use std::fmt;

/// The DE-9IM intersection matrix.
///
/// A 3x3 grid indexed by [`Location`] of the first and second geometry,
/// each cell holding the maximum [`Dimension`] of the intersection of the
/// corresponding point sets. All named spatial predicates are fixed tests
/// over this matrix; the predicate methods below take operand dimensions
/// where the standard patterns depend on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionMatrix {
    /// Creates a matrix with every cell set to [`Dimension::Empty`].
    pub fn new() -> Self {
        Self {
            cells: [[Dimension::Empty; 3]; 3],
        }
    }

    /// Cell for the pair of locations.
    pub fn get(&self, a: Location, b: Location) -> Dimension {
        self.cells[a.index()][b.index()]
    }

    /// Sets the cell for the pair of locations.
    pub fn set(&mut self, a: Location, b: Location, dimension: Dimension) {
        self.cells[a.index()][b.index()] = dimension;
    }

    /// Raises the cell to `dimension` if it currently holds a lower value.
    pub fn set_at_least(&mut self, a: Location, b: Location, dimension: Dimension) {
        if self.cells[a.index()][b.index()] < dimension {
            self.cells[a.index()][b.index()] = dimension;
        }
    }

    /// The matrix with first and second geometry swapped.
    pub fn transposed(&self) -> Self {
        let mut out = Self::new();
        for row in 0..3 {
            for col in 0..3 {
                out.cells[col][row] = self.cells[row][col];
            }
        }
        out
    }

    /// Tests the matrix against a 9-character DE-9IM pattern.
    ///
    /// Pattern characters: `T` any non-empty intersection, `F` empty,
    /// `0`/`1`/`2` exact dimension, `*` don't care. Case-insensitive.
    pub fn matches(&self, pattern: &str) -> Result<bool, GeometryError> {
        let symbols: Vec<char> = pattern.chars().collect();
        if symbols.len() != 9 {
            return Err(GeometryError::InvalidPattern(pattern.to_string()));
        }
        for row in 0..3 {
            for col in 0..3 {
                let cell = self.cells[row][col];
                let matched = match symbols[row * 3 + col].to_ascii_uppercase() {
                    'T' => cell != Dimension::Empty,
                    'F' => cell == Dimension::Empty,
                    '0' => cell == Dimension::P,
                    '1' => cell == Dimension::L,
                    '2' => cell == Dimension::A,
                    '*' => true,
                    _ => return Err(GeometryError::InvalidPattern(pattern.to_string())),
                };
                if !matched {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn is_true(&self, a: Location, b: Location) -> bool {
        self.get(a, b) != Dimension::Empty
    }

    /// True when the geometries have no point in common.
    pub fn is_disjoint(&self) -> bool {
        use Location::*;
        !self.is_true(Interior, Interior)
            && !self.is_true(Interior, Boundary)
            && !self.is_true(Boundary, Interior)
            && !self.is_true(Boundary, Boundary)
    }

    /// Negation of [`IntersectionMatrix::is_disjoint`].
    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// True when only boundaries meet, or a boundary meets the other
    /// interior, with the interiors themselves disjoint. Never true for
    /// two points.
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        if dim_a > dim_b {
            return self.is_touches(dim_b, dim_a);
        }
        let applicable = matches!(
            (dim_a, dim_b),
            (Dimension::A, Dimension::A)
                | (Dimension::L, Dimension::L)
                | (Dimension::L, Dimension::A)
                | (Dimension::P, Dimension::A)
                | (Dimension::P, Dimension::L)
        );
        if !applicable {
            return false;
        }
        !self.is_true(Interior, Interior)
            && (self.is_true(Interior, Boundary)
                || self.is_true(Boundary, Interior)
                || self.is_true(Boundary, Boundary))
    }

    /// True when the geometries cross: interiors intersect, each extends
    /// beyond the other, and the standard dimension conditions hold.
    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        match (dim_a, dim_b) {
            (Dimension::P, Dimension::L)
            | (Dimension::P, Dimension::A)
            | (Dimension::L, Dimension::A) => {
                self.is_true(Interior, Interior) && self.is_true(Interior, Exterior)
            }
            (Dimension::L, Dimension::P)
            | (Dimension::A, Dimension::P)
            | (Dimension::A, Dimension::L) => {
                self.is_true(Interior, Interior) && self.is_true(Exterior, Interior)
            }
            (Dimension::L, Dimension::L) => self.get(Interior, Interior) == Dimension::P,
            _ => false,
        }
    }

    /// True when the first geometry lies inside the second.
    pub fn is_within(&self) -> bool {
        use Location::*;
        self.is_true(Interior, Interior)
            && !self.is_true(Interior, Exterior)
            && !self.is_true(Boundary, Exterior)
    }

    /// True when the first geometry contains the second.
    pub fn is_contains(&self) -> bool {
        use Location::*;
        self.is_true(Interior, Interior)
            && !self.is_true(Exterior, Interior)
            && !self.is_true(Exterior, Boundary)
    }

    /// True when the geometries overlap: same dimension, interiors
    /// intersect, and each has interior points outside the other.
    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        match (dim_a, dim_b) {
            (Dimension::P, Dimension::P) | (Dimension::A, Dimension::A) => {
                self.is_true(Interior, Interior)
                    && self.is_true(Interior, Exterior)
                    && self.is_true(Exterior, Interior)
            }
            (Dimension::L, Dimension::L) => {
                self.get(Interior, Interior) == Dimension::L
                    && self.is_true(Interior, Exterior)
                    && self.is_true(Exterior, Interior)
            }
            _ => false,
        }
    }

    /// True when the geometries cover exactly the same point set.
    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        dim_a == dim_b
            && self.is_true(Interior, Interior)
            && !self.is_true(Interior, Exterior)
            && !self.is_true(Boundary, Exterior)
            && !self.is_true(Exterior, Interior)
            && !self.is_true(Exterior, Boundary)
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.cells[row][col].symbol())?;
            }
        }
        Ok(())
    }
}
