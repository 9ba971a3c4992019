//! Cross-engine scenarios exercised through the [`Kernel`] surface.
//!
//! Single-engine behavior is covered next to each engine; the tests here
//! assert the properties that hold across codec, relate, overlay and
//! construction boundaries.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use ortelius_io::{wkt, WktError};
use ortelius_types::GeometryError;

use crate::{Geometry, Kernel, OrteliusError, OverlayOp};

const SQUARE: &str = "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))";

/// One geometry of every type, plus empties, in both accepted multipoint
/// spellings.
const ROUND_TRIP: &[&str] = &[
    "POINT (30 10)",
    "POINT EMPTY",
    "LINESTRING (30 10, 10 30, 40 40)",
    "LINESTRING EMPTY",
    "POLYGON ((30 10, 40 40, 20 40, 10 20, 30 10))",
    "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0), (2 2, 4 2, 4 4, 2 4, 2 2))",
    "POLYGON EMPTY",
    "MULTIPOINT (10 40, 40 30, 20 20, 30 10)",
    "MULTIPOINT ((10 40), (40 30))",
    "MULTIPOINT EMPTY",
    "MULTILINESTRING ((10 10, 20 20, 10 40), (40 40, 30 30, 40 20, 30 10))",
    "MULTIPOLYGON (((30 20, 45 40, 10 40, 30 20)), ((15 5, 40 10, 10 20, 5 10, 15 5)))",
    "MULTIPOLYGON EMPTY",
    "GEOMETRYCOLLECTION (POINT (4 6), LINESTRING (4 6, 7 10))",
    "GEOMETRYCOLLECTION EMPTY",
];

/// Operand pool for the pairwise predicate properties. No collections:
/// the relate engine rejects those.
const RELATE_GRID: &[&str] = &[
    "POINT (5 5)",
    "POINT (50 50)",
    "MULTIPOINT (0 0, 10 10)",
    "LINESTRING (0 0, 10 10)",
    "LINESTRING (0 10, 10 0)",
    "LINESTRING (0 0, 10 0, 10 10, 0 0)",
    "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))",
    "POLYGON ((5 5, 5 15, 15 15, 15 5, 5 5))",
    "POLYGON ((20 20, 20 30, 30 30, 30 20, 20 20))",
    "MULTIPOLYGON (((0 0, 0 2, 2 2, 2 0, 0 0)), ((8 8, 8 9, 9 9, 9 8, 8 8)))",
    "LINESTRING EMPTY",
    "POLYGON EMPTY",
];

fn grid() -> Vec<Geometry> {
    RELATE_GRID
        .iter()
        .map(|text| wkt::parse(text).unwrap())
        .collect()
}

#[test]
fn wkt_writing_is_idempotent() {
    let kernel = Kernel::new();
    for text in ROUND_TRIP {
        let first = kernel.geom_from_wkt(text).unwrap();
        let written = kernel.geom_to_wkt(&first).unwrap();
        let second = kernel.geom_from_wkt(&written).unwrap();
        assert_eq!(first, second, "reparse changed {text}");
        assert_eq!(written, kernel.geom_to_wkt(&second).unwrap());
    }
}

#[test]
fn wkb_round_trips_every_type() {
    let kernel = Kernel::new();
    for text in ROUND_TRIP {
        let geometry = kernel.geom_from_wkt(text).unwrap();
        let bytes = kernel.geom_to_wkb(&geometry).unwrap();
        let back = kernel.geom_from_wkb(&bytes).unwrap();
        assert_eq!(back, geometry, "round trip changed {text}");
    }
}

#[test]
fn truncated_wkb_never_yields_a_geometry() {
    let kernel = Kernel::new();
    for text in [
        "POINT (30 10)",
        "MULTIPOLYGON (((30 20, 45 40, 10 40, 30 20)))",
        "GEOMETRYCOLLECTION (POINT (4 6), LINESTRING (4 6, 7 10))",
    ] {
        let geometry = kernel.geom_from_wkt(text).unwrap();
        let bytes = kernel.geom_to_wkb(&geometry).unwrap();
        for length in 0..bytes.len() {
            assert!(
                kernel.geom_from_wkb(&bytes[..length]).is_none(),
                "a {length} byte prefix of {text} decoded"
            );
        }
    }
}

#[test]
fn intersects_is_the_negation_of_disjoint() {
    let kernel = Kernel::new();
    let pool = grid();
    for a in &pool {
        for b in &pool {
            let disjoint = kernel.disjoint(a, b).unwrap();
            assert_eq!(kernel.intersects(a, b), Some(!disjoint));
        }
    }
}

#[test]
fn every_matrix_satisfies_its_own_pattern() {
    let kernel = Kernel::new();
    let pool = grid();
    for a in &pool {
        for b in &pool {
            let code = kernel.relate(a, b).unwrap();
            assert_eq!(
                kernel.relate_pattern(a, b, &code),
                Some(true),
                "matrix {code} rejected itself"
            );
        }
    }
}

#[test]
fn topological_equality_follows_the_equals_pattern() {
    let kernel = Kernel::new();
    let pool = grid();
    for a in &pool {
        if !a.is_empty() {
            assert_eq!(kernel.equals(a, a), Some(true));
        }
        for b in &pool {
            assert_eq!(kernel.equals(a, b), kernel.relate_pattern(a, b, "T*F**FFF*"));
            assert_eq!(kernel.equals(a, b), kernel.equals(b, a));
        }
    }
}

#[test]
fn convex_hull_is_idempotent() {
    let kernel = Kernel::new();
    for text in [
        "POINT (3 4)",
        "MULTIPOINT (0 0, 3 3, 9 9)",
        "LINESTRING (0 0, 4 4, 10 0)",
        "POLYGON ((30 10, 40 40, 20 40, 10 20, 30 10))",
        "GEOMETRYCOLLECTION (POINT (0 0), LINESTRING (2 2, 8 2), POLYGON ((4 4, 4 6, 6 6, 6 4, 4 4)))",
        "POLYGON EMPTY",
    ] {
        let geometry = kernel.geom_from_wkt(text).unwrap();
        let once = kernel.convex_hull(&geometry).unwrap();
        let twice = kernel.convex_hull(&once).unwrap();
        assert_eq!(once, twice, "hull of {text} was not stable");
    }
}

#[test]
fn the_reference_square_scenario() {
    let kernel = Kernel::new();
    let square = kernel.geom_from_wkt(SQUARE).unwrap();

    let hull = kernel.convex_hull(&square).unwrap();
    assert_eq!(kernel.geom_to_wkt(&hull).unwrap(), SQUARE);

    let unmoved = kernel.buffer(&square, 0.0, 8).unwrap();
    assert_eq!(unmoved, square);

    assert_eq!(kernel.get_num_interior_rings(&square), 0);
}

#[test]
fn buffering_outward_contains_the_original() {
    let kernel = Kernel::new();
    let square = kernel.geom_from_wkt(SQUARE).unwrap();
    let fat = kernel.buffer(&square, 100.0, 30).unwrap();

    assert_eq!(kernel.intersection(&square, &fat), Some(square.clone()));
    assert_eq!(kernel.union(&square, &fat), Some(fat.clone()));
    assert_eq!(kernel.contains(&fat, &square), Some(true));
}

#[test]
fn overlay_areas_partition_the_operands() {
    let kernel = Kernel::new();
    let a = kernel.geom_from_wkt(SQUARE).unwrap();
    let b = kernel
        .geom_from_wkt("POLYGON ((5 5, 5 15, 15 15, 15 5, 5 5))")
        .unwrap();

    assert_eq!(kernel.relate(&a, &b).unwrap(), "212101212");
    assert_eq!(kernel.intersection(&a, &b).unwrap().area(), 25.0);
    assert_eq!(kernel.union(&a, &b).unwrap().area(), 175.0);
    assert_eq!(kernel.difference(&a, &b).unwrap().area(), 75.0);
    assert_eq!(kernel.sym_difference(&a, &b).unwrap().area(), 150.0);
}

#[test]
fn disjoint_squares_relate_as_ff2ff1212() {
    let kernel = Kernel::new();
    let a = kernel
        .geom_from_wkt("POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))")
        .unwrap();
    let b = kernel
        .geom_from_wkt("POLYGON ((100 100, 100 101, 101 101, 101 100, 100 100))")
        .unwrap();
    assert_eq!(kernel.relate(&a, &b).unwrap(), "FF2FF1212");
    assert_eq!(kernel.touches(&a, &b), Some(false));
    assert_eq!(kernel.disjoint(&a, &b), Some(true));
}

#[test]
fn crossing_lines_relate_as_0f1ff0102() {
    let kernel = Kernel::new();
    let a = kernel.geom_from_wkt("LINESTRING (0 0, 10 10)").unwrap();
    let b = kernel.geom_from_wkt("LINESTRING (0 10, 10 0)").unwrap();
    assert_eq!(kernel.relate(&a, &b).unwrap(), "0F1FF0102");
    assert_eq!(kernel.crosses(&a, &b), Some(true));
}

#[test]
fn representative_points_land_on_their_geometry() {
    let kernel = Kernel::new();
    let donut = kernel
        .geom_from_wkt("POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0), (2 2, 8 2, 8 8, 2 8, 2 2))")
        .unwrap();

    let inside = kernel.point_on_surface(&donut).unwrap();
    assert_eq!(kernel.within(&inside, &donut), Some(true));

    // the mass centroid of a centered hole falls in the hole
    let center = kernel.centroid(&donut).unwrap();
    assert_eq!(kernel.geom_to_wkt(&center).unwrap(), "POINT (5 5)");
    assert_eq!(kernel.within(&center, &donut), Some(false));

    let line = kernel.geom_from_wkt("LINESTRING (0 0, 4 4, 10 0)").unwrap();
    let on_line = kernel.point_on_surface(&line).unwrap();
    assert_eq!(kernel.intersects(&on_line, &line), Some(true));

    let empty = kernel.geom_from_wkt("POLYGON EMPTY").unwrap();
    assert_eq!(
        kernel.geom_to_wkt(&kernel.centroid(&empty).unwrap()).unwrap(),
        "POINT EMPTY"
    );
    assert_eq!(
        kernel
            .geom_to_wkt(&kernel.point_on_surface(&empty).unwrap())
            .unwrap(),
        "POINT EMPTY"
    );
}

#[test]
fn unclosed_rings_never_parse() {
    let kernel = Kernel::new();
    assert!(kernel.geom_from_wkt("POLYGON ((0 0, 0 10, 10 10))").is_none());
    assert_matches!(
        wkt::parse("POLYGON ((0 0, 0 10, 10 10))"),
        Err(WktError::Geometry(_))
    );
    assert_matches!(
        wkt::parse("POLYGON ((0 0, 0 10, 10 10, 5 5))"),
        Err(WktError::Geometry(GeometryError::RingNotClosed))
    );
}

#[test]
fn wkt_errors_carry_exact_offsets() {
    assert_matches!(
        wkt::parse("POINT (1 %)"),
        Err(WktError::UnexpectedCharacter { found: '%', at: 9 })
    );
}

#[test]
fn collection_operands_are_rejected_by_binary_engines() {
    let kernel = Kernel::new();
    let collection = kernel
        .geom_from_wkt("GEOMETRYCOLLECTION (POINT (1 1))")
        .unwrap();
    let point = kernel.geom_from_wkt("POINT (1 1)").unwrap();

    assert!(kernel.relate(&collection, &point).is_none());
    assert!(kernel.intersection(&collection, &point).is_none());
    assert_matches!(
        crate::relate::relate(&collection, &point),
        Err(OrteliusError::Relate(_))
    );
    assert_matches!(
        crate::overlay::overlay(&collection, &point, OverlayOp::Union),
        Err(OrteliusError::Overlay(_))
    );
}

#[test]
fn a_full_session_through_the_kernel() {
    let _ = env_logger::builder().is_test(true).try_init();

    let notices = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(AtomicUsize::new(0));
    let notice_count = Arc::clone(&notices);
    let error_count = Arc::clone(&errors);
    let kernel = Kernel::with_callbacks(
        Box::new(move |_| {
            notice_count.fetch_add(1, Ordering::Relaxed);
        }),
        Box::new(move |_| {
            error_count.fetch_add(1, Ordering::Relaxed);
        }),
    );

    let a = kernel.geom_from_wkt(SQUARE).unwrap();
    let b = kernel
        .geom_from_wkt("POLYGON ((5 5, 5 15, 15 15, 15 5, 5 5))")
        .unwrap();

    assert_eq!(kernel.relate(&a, &b).unwrap(), "212101212");
    assert_eq!(kernel.intersects(&a, &b), Some(true));

    let widened = kernel
        .buffer(&a, 1.0, crate::DEFAULT_QUADRANT_SEGMENTS)
        .unwrap();
    let merged = kernel.union(&widened, &b).unwrap();
    assert!(!merged.is_empty());
    assert!(merged.area() > a.area() + 25.0);

    let bytes = kernel.geom_to_wkb(&merged).unwrap();
    assert_eq!(kernel.geom_from_wkb(&bytes).unwrap(), merged);

    assert_eq!(errors.load(Ordering::Relaxed), 0);
    assert!(notices.load(Ordering::Relaxed) >= 4);
}
