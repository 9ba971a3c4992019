//! DE-9IM intersection matrix computation.
//!
//! The matrix of two geometries is assembled from the locations of noded
//! pieces of each operand relative to the other: open sub-segments are
//! classified by their midpoints, point contacts by the noded vertices.
//! Operands are dispatched on their dimension pair; the transposed pairs
//! reuse the same routines through [`IntersectionMatrix::transposed`].

mod areal;
mod lineal;
mod puntal;

use crate::OrteliusError;
use ortelius_types::{Dimension, Geometry, IntersectionMatrix, Location};

/// Computes the DE-9IM matrix of `a` against `b`.
///
/// Geometry collection operands are rejected: their members may overlap
/// each other, which has no consistent interior/boundary decomposition.
pub fn relate(a: &Geometry, b: &Geometry) -> Result<IntersectionMatrix, OrteliusError> {
    if matches!(a, Geometry::GeometryCollection(_))
        || matches!(b, Geometry::GeometryCollection(_))
    {
        return Err(OrteliusError::Relate(
            "geometry collection operands are not supported".to_string(),
        ));
    }
    if a.is_empty() || b.is_empty() {
        return Ok(disjoint_matrix(a, b));
    }
    let matrix = match (a.dimension(), b.dimension()) {
        (Dimension::P, Dimension::P) => puntal::puntal_puntal(a, b),
        (Dimension::P, Dimension::L) => puntal::puntal_lineal(a, b),
        (Dimension::P, Dimension::A) => puntal::puntal_areal(a, b),
        (Dimension::L, Dimension::P) => puntal::puntal_lineal(b, a).transposed(),
        (Dimension::L, Dimension::L) => lineal::lineal_lineal(a, b),
        (Dimension::L, Dimension::A) => lineal::lineal_areal(a, b),
        (Dimension::A, Dimension::P) => puntal::puntal_areal(b, a).transposed(),
        (Dimension::A, Dimension::L) => lineal::lineal_areal(b, a).transposed(),
        (Dimension::A, Dimension::A) => areal::areal_areal(a, b),
        // non-empty atoms always have a concrete dimension
        (Dimension::Empty, _) | (_, Dimension::Empty) => disjoint_matrix(a, b),
    };
    Ok(matrix)
}

/// Matrix of operands that cannot meet because at least one is empty. The
/// non-empty side still records its interior and boundary against the
/// other's exterior.
fn disjoint_matrix(a: &Geometry, b: &Geometry) -> IntersectionMatrix {
    let mut matrix = IntersectionMatrix::new();
    matrix.set(Location::Exterior, Location::Exterior, Dimension::A);
    if !a.is_empty() {
        matrix.set(Location::Interior, Location::Exterior, a.dimension());
        matrix.set(Location::Boundary, Location::Exterior, a.boundary_dimension());
    }
    if !b.is_empty() {
        matrix.set(Location::Exterior, Location::Interior, b.dimension());
        matrix.set(Location::Exterior, Location::Boundary, b.boundary_dimension());
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ortelius_io::wkt;

    fn matrix_of(a: &str, b: &str) -> String {
        let ga = wkt::parse(a).unwrap();
        let gb = wkt::parse(b).unwrap();
        relate(&ga, &gb).unwrap().to_string()
    }

    #[test]
    fn empty_operand_records_the_other_side() {
        assert_eq!(matrix_of("POINT EMPTY", "POINT EMPTY"), "FFFFFFFF2");
        assert_eq!(
            matrix_of("POINT EMPTY", "POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))"),
            "FFFFFF212"
        );
        assert_eq!(
            matrix_of("LINESTRING (0 0, 1 1)", "LINESTRING EMPTY"),
            "FF1FF0FF2"
        );
    }

    #[test]
    fn collection_operands_are_rejected() {
        let collection = wkt::parse("GEOMETRYCOLLECTION (POINT (1 1))").unwrap();
        let point = wkt::parse("POINT (1 1)").unwrap();
        assert_matches!(relate(&collection, &point), Err(OrteliusError::Relate(_)));
        assert_matches!(relate(&point, &collection), Err(OrteliusError::Relate(_)));
    }

    #[test]
    fn transposed_pairs_are_consistent() {
        let line = "LINESTRING (5 -1, 5 11)";
        let polygon = "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))";
        let forward = matrix_of(line, polygon);
        let backward = matrix_of(polygon, line);
        let ga = wkt::parse(line).unwrap();
        let gb = wkt::parse(polygon).unwrap();
        assert_eq!(
            relate(&ga, &gb).unwrap().transposed().to_string(),
            backward
        );
        assert_eq!(forward, "101FF0212");
    }
}
