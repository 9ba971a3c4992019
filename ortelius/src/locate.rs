//! Point location against homogeneous part sets.

use ortelius_types::ring::locate_point_in_ring;
use ortelius_types::segment::Segment;
use ortelius_types::{Coord, LineString, Location, Polygon};

/// Location of a point relative to one polygon under the even-odd rule,
/// with ring points reported as boundary.
pub(crate) fn locate_in_polygon(p: &Coord, polygon: &Polygon) -> Location {
    if polygon.is_empty() {
        return Location::Exterior;
    }
    match locate_point_in_ring(p, &polygon.exterior.coords) {
        Location::Exterior => Location::Exterior,
        Location::Boundary => Location::Boundary,
        Location::Interior => {
            for hole in &polygon.interiors {
                match locate_point_in_ring(p, &hole.coords) {
                    Location::Interior => return Location::Exterior,
                    Location::Boundary => return Location::Boundary,
                    Location::Exterior => {}
                }
            }
            Location::Interior
        }
    }
}

/// Location relative to a polygon set. Interior membership in any component
/// wins over boundary contact with another.
pub(crate) fn locate_areal(p: &Coord, polygons: &[&Polygon]) -> Location {
    let mut on_boundary = false;
    for polygon in polygons {
        match locate_in_polygon(p, polygon) {
            Location::Interior => return Location::Interior,
            Location::Boundary => on_boundary = true,
            Location::Exterior => {}
        }
    }
    if on_boundary {
        Location::Boundary
    } else {
        Location::Exterior
    }
}

/// Location relative to a line set whose boundary points are precomputed.
pub(crate) fn locate_lineal(p: &Coord, lines: &[LineString], boundary: &[Coord]) -> Location {
    if boundary.iter().any(|b| b.equals_2d(p)) {
        return Location::Boundary;
    }
    for line in lines {
        for pair in line.coords.windows(2) {
            if Segment(&pair[0], &pair[1]).contains_point(p) {
                return Location::Interior;
            }
        }
    }
    Location::Exterior
}

/// Location relative to a point set; a point set has no boundary.
pub(crate) fn locate_puntal(p: &Coord, points: &[Coord]) -> Location {
    if points.iter().any(|q| q.equals_2d(p)) {
        Location::Interior
    } else {
        Location::Exterior
    }
}
