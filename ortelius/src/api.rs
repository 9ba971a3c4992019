//! The host-facing call surface.
//!
//! [`Kernel`] bundles every operation of the library behind one context
//! value. Internal layers return `Result`; the kernel is the only place
//! errors are converted into sentinel returns, with the message forwarded
//! to the host through the registered error callback. Dropping the kernel
//! is the whole teardown.

use ortelius_io::{wkb, wkt};
use ortelius_types::{Geometry, Point};

use crate::error::OrteliusError;
use crate::overlay::OverlayOp;
use crate::{boundary, buffer, centroid, hull, interior_point, overlay, relate, simple, valid};

/// A host-registered message callback.
pub type MessageCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Arc approximation used by hosts that have no opinion on buffer
/// resolution: eight segments per quarter circle.
pub const DEFAULT_QUADRANT_SEGMENTS: i32 = 8;

/// The library's boundary context.
///
/// Owns the notice and error callbacks registered by the host. All
/// operations take `&self`, never panic on bad input, and signal failure
/// by their sentinel return after invoking the error callback.
///
/// ```
/// use ortelius::Kernel;
///
/// let kernel = Kernel::new();
/// let square = kernel
///     .geom_from_wkt("POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))")
///     .unwrap();
/// assert_eq!(kernel.get_num_coordinates(&square), 5);
/// ```
pub struct Kernel {
    notice: Option<MessageCallback>,
    error: Option<MessageCallback>,
}

impl Kernel {
    /// Creates a kernel that discards notices and error messages.
    pub fn new() -> Self {
        Self {
            notice: None,
            error: None,
        }
    }

    /// Creates a kernel that forwards notices and error messages to the
    /// given callbacks.
    pub fn with_callbacks(notice: MessageCallback, error: MessageCallback) -> Self {
        Self {
            notice: Some(notice),
            error: Some(error),
        }
    }

    fn notify(&self, message: &str) {
        if let Some(callback) = &self.notice {
            callback(message);
        }
    }

    fn report(&self, operation: &str, error: &OrteliusError) {
        log::debug!("{operation} failed: {error}");
        if let Some(callback) = &self.error {
            callback(&error.to_string());
        }
    }

    fn take<T>(&self, operation: &str, result: Result<T, OrteliusError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.report(operation, &error);
                None
            }
        }
    }

    /// Parses a geometry from its WKT text.
    pub fn geom_from_wkt(&self, text: &str) -> Option<Geometry> {
        log::trace!("geom_from_wkt");
        self.notify("reading geometry from WKT");
        self.take("geom_from_wkt", wkt::parse(text).map_err(OrteliusError::from))
    }

    /// Writes a geometry as WKT text.
    pub fn geom_to_wkt(&self, geometry: &Geometry) -> Option<String> {
        log::trace!("geom_to_wkt");
        self.notify("writing geometry to WKT");
        Some(wkt::write(geometry))
    }

    /// Parses a geometry from WKB bytes.
    pub fn geom_from_wkb(&self, bytes: &[u8]) -> Option<Geometry> {
        log::trace!("geom_from_wkb");
        self.notify("reading geometry from WKB");
        self.take("geom_from_wkb", wkb::parse(bytes).map_err(OrteliusError::from))
    }

    /// Writes a geometry as WKB bytes.
    pub fn geom_to_wkb(&self, geometry: &Geometry) -> Option<Vec<u8>> {
        log::trace!("geom_to_wkb");
        self.notify("writing geometry to WKB");
        Some(wkb::write(geometry))
    }

    /// Computes the DE-9IM intersection matrix of two geometries as its
    /// nine-character code.
    pub fn relate(&self, a: &Geometry, b: &Geometry) -> Option<String> {
        log::trace!("relate");
        self.take("relate", relate::relate(a, b).map(|matrix| matrix.to_string()))
    }

    /// Tests the DE-9IM matrix of two geometries against a pattern such as
    /// `"T*F**FFF*"`.
    pub fn relate_pattern(&self, a: &Geometry, b: &Geometry, pattern: &str) -> Option<bool> {
        log::trace!("relate_pattern");
        let result = relate::relate(a, b)
            .and_then(|matrix| matrix.matches(pattern).map_err(OrteliusError::from));
        self.take("relate_pattern", result)
    }

    /// True when the geometries share no point.
    pub fn disjoint(&self, a: &Geometry, b: &Geometry) -> Option<bool> {
        log::trace!("disjoint");
        self.take("disjoint", relate::relate(a, b).map(|matrix| matrix.is_disjoint()))
    }

    /// True when the geometries share at least one point.
    pub fn intersects(&self, a: &Geometry, b: &Geometry) -> Option<bool> {
        log::trace!("intersects");
        self.take(
            "intersects",
            relate::relate(a, b).map(|matrix| matrix.is_intersects()),
        )
    }

    /// True when the geometries touch on their boundaries without sharing
    /// interior points.
    pub fn touches(&self, a: &Geometry, b: &Geometry) -> Option<bool> {
        log::trace!("touches");
        self.take(
            "touches",
            relate::relate(a, b).map(|matrix| matrix.is_touches(a.dimension(), b.dimension())),
        )
    }

    /// True when the geometries cross: their interiors meet in a lower
    /// dimension than either operand fills.
    pub fn crosses(&self, a: &Geometry, b: &Geometry) -> Option<bool> {
        log::trace!("crosses");
        self.take(
            "crosses",
            relate::relate(a, b).map(|matrix| matrix.is_crosses(a.dimension(), b.dimension())),
        )
    }

    /// True when `a` lies within `b`.
    pub fn within(&self, a: &Geometry, b: &Geometry) -> Option<bool> {
        log::trace!("within");
        self.take("within", relate::relate(a, b).map(|matrix| matrix.is_within()))
    }

    /// True when `a` contains `b`.
    pub fn contains(&self, a: &Geometry, b: &Geometry) -> Option<bool> {
        log::trace!("contains");
        self.take(
            "contains",
            relate::relate(a, b).map(|matrix| matrix.is_contains()),
        )
    }

    /// True when the geometries overlap: same dimension, interiors meet,
    /// and each keeps points of its own.
    pub fn overlaps(&self, a: &Geometry, b: &Geometry) -> Option<bool> {
        log::trace!("overlaps");
        self.take(
            "overlaps",
            relate::relate(a, b).map(|matrix| matrix.is_overlaps(a.dimension(), b.dimension())),
        )
    }

    /// True when the geometries occupy exactly the same point set.
    pub fn equals(&self, a: &Geometry, b: &Geometry) -> Option<bool> {
        log::trace!("equals");
        self.take(
            "equals",
            relate::relate(a, b).map(|matrix| matrix.is_equals(a.dimension(), b.dimension())),
        )
    }

    /// True when the geometry has no points.
    pub fn is_empty(&self, geometry: &Geometry) -> Option<bool> {
        log::trace!("is_empty");
        Some(geometry.is_empty())
    }

    /// True when the geometry satisfies the structural validity rules.
    pub fn is_valid(&self, geometry: &Geometry) -> Option<bool> {
        log::trace!("is_valid");
        Some(valid::is_valid(geometry))
    }

    /// True when the geometry has no anomalous self-intersections.
    pub fn is_simple(&self, geometry: &Geometry) -> Option<bool> {
        log::trace!("is_simple");
        Some(simple::is_simple(geometry))
    }

    /// True when the geometry is a closed simple line.
    pub fn is_ring(&self, geometry: &Geometry) -> Option<bool> {
        log::trace!("is_ring");
        Some(simple::is_ring(geometry))
    }

    /// Computes the points common to both geometries.
    pub fn intersection(&self, a: &Geometry, b: &Geometry) -> Option<Geometry> {
        log::trace!("intersection");
        self.take(
            "intersection",
            overlay::overlay(a, b, OverlayOp::Intersection),
        )
    }

    /// Computes the points of either geometry.
    pub fn union(&self, a: &Geometry, b: &Geometry) -> Option<Geometry> {
        log::trace!("union");
        self.take("union", overlay::overlay(a, b, OverlayOp::Union))
    }

    /// Computes the points of `a` not in `b`.
    pub fn difference(&self, a: &Geometry, b: &Geometry) -> Option<Geometry> {
        log::trace!("difference");
        self.take("difference", overlay::overlay(a, b, OverlayOp::Difference))
    }

    /// Computes the points of exactly one of the geometries.
    pub fn sym_difference(&self, a: &Geometry, b: &Geometry) -> Option<Geometry> {
        log::trace!("sym_difference");
        self.take(
            "sym_difference",
            overlay::overlay(a, b, OverlayOp::SymDifference),
        )
    }

    /// Computes the combinatorial boundary of a geometry.
    pub fn boundary(&self, geometry: &Geometry) -> Option<Geometry> {
        log::trace!("boundary");
        self.take("boundary", boundary::boundary(geometry))
    }

    /// Computes the convex hull of a geometry.
    pub fn convex_hull(&self, geometry: &Geometry) -> Option<Geometry> {
        log::trace!("convex_hull");
        self.take("convex_hull", hull::convex_hull(geometry))
    }

    /// Computes the region within `distance` of a geometry, with
    /// `quadrant_segments` straight segments per quarter circle of arc.
    pub fn buffer(
        &self,
        geometry: &Geometry,
        distance: f64,
        quadrant_segments: i32,
    ) -> Option<Geometry> {
        log::trace!("buffer");
        self.take(
            "buffer",
            buffer::buffer(geometry, distance, quadrant_segments),
        )
    }

    /// Computes the weighted centroid of a geometry as a point, empty for
    /// empty input.
    pub fn centroid(&self, geometry: &Geometry) -> Option<Geometry> {
        log::trace!("centroid");
        let point = match centroid::centroid(geometry) {
            Some(coord) => Point::new(coord),
            None => Point::empty(),
        };
        Some(Geometry::Point(point))
    }

    /// Computes a point guaranteed to lie on the geometry, empty for empty
    /// input.
    pub fn point_on_surface(&self, geometry: &Geometry) -> Option<Geometry> {
        log::trace!("point_on_surface");
        let point = match interior_point::interior_point(geometry) {
            Some(coord) => Point::new(coord),
            None => Point::empty(),
        };
        Some(Geometry::Point(point))
    }

    /// The `n`th component of a collection, counted from zero, or the
    /// geometry itself at index zero for atomic input. The component is
    /// stamped with the parent's SRID.
    pub fn get_geometry_n(&self, geometry: &Geometry, n: i32) -> Option<Geometry> {
        log::trace!("get_geometry_n");
        let member = usize::try_from(n)
            .ok()
            .and_then(|index| component(geometry, index));
        match member {
            Some(mut member) => {
                member.set_srid(geometry.srid());
                Some(member)
            }
            None => {
                self.report(
                    "get_geometry_n",
                    &OrteliusError::InvalidArgument(format!("geometry index out of range: {n}")),
                );
                None
            }
        }
    }

    /// The exterior ring of a polygon, stamped with the polygon's SRID.
    pub fn get_exterior_ring(&self, geometry: &Geometry) -> Option<Geometry> {
        log::trace!("get_exterior_ring");
        let Geometry::Polygon(polygon) = geometry else {
            self.report(
                "get_exterior_ring",
                &OrteliusError::InvalidArgument(format!(
                    "exterior ring requested from a {}",
                    geometry.geometry_type().name()
                )),
            );
            return None;
        };
        let mut ring = Geometry::LinearRing(polygon.exterior.clone());
        ring.set_srid(geometry.srid());
        Some(ring)
    }

    /// The `n`th interior ring of a polygon, counted from zero, stamped
    /// with the polygon's SRID.
    pub fn get_interior_ring_n(&self, geometry: &Geometry, n: i32) -> Option<Geometry> {
        log::trace!("get_interior_ring_n");
        let Geometry::Polygon(polygon) = geometry else {
            self.report(
                "get_interior_ring_n",
                &OrteliusError::InvalidArgument(format!(
                    "interior ring requested from a {}",
                    geometry.geometry_type().name()
                )),
            );
            return None;
        };
        let member = usize::try_from(n)
            .ok()
            .and_then(|index| polygon.interiors.get(index));
        match member {
            Some(ring) => {
                let mut ring = Geometry::LinearRing(ring.clone());
                ring.set_srid(geometry.srid());
                Some(ring)
            }
            None => {
                self.report(
                    "get_interior_ring_n",
                    &OrteliusError::InvalidArgument(format!(
                        "interior ring index out of range: {n}"
                    )),
                );
                None
            }
        }
    }

    /// Total number of coordinates over all parts of the geometry.
    pub fn get_num_coordinates(&self, geometry: &Geometry) -> i32 {
        log::trace!("get_num_coordinates");
        geometry.num_points() as i32
    }

    /// Number of interior rings of a polygon; 0 with an error report for
    /// any other geometry.
    pub fn get_num_interior_rings(&self, geometry: &Geometry) -> i32 {
        log::trace!("get_num_interior_rings");
        match geometry {
            Geometry::Polygon(polygon) => polygon.interiors.len() as i32,
            _ => {
                self.report(
                    "get_num_interior_rings",
                    &OrteliusError::InvalidArgument(format!(
                        "interior ring count requested from a {}",
                        geometry.geometry_type().name()
                    )),
                );
                0
            }
        }
    }

    /// Number of components: the member count for collections, 1 for
    /// atomic geometries.
    pub fn get_num_geometries(&self, geometry: &Geometry) -> i32 {
        log::trace!("get_num_geometries");
        geometry.num_geometries() as i32
    }

    /// Numeric type code of the geometry, 1 through 7.
    pub fn geom_type_id(&self, geometry: &Geometry) -> i32 {
        log::trace!("geom_type_id");
        geometry.geometry_type().id()
    }

    /// Type name of the geometry, such as `"Polygon"`.
    pub fn geom_type_name(&self, geometry: &Geometry) -> &'static str {
        log::trace!("geom_type_name");
        geometry.geometry_type().name()
    }

    /// The geometry's spatial reference identifier, `-1` when unset.
    pub fn get_srid(&self, geometry: &Geometry) -> i32 {
        log::trace!("get_srid");
        geometry.srid()
    }

    /// Sets the geometry's spatial reference identifier.
    pub fn set_srid(&self, geometry: &mut Geometry, srid: i32) {
        log::trace!("set_srid");
        geometry.set_srid(srid);
    }

    /// Reassembles polygons from linework. Not available; every call
    /// reports failure and returns `None`.
    pub fn polygonize(&self, _geometries: &[Geometry]) -> Option<Geometry> {
        log::trace!("polygonize");
        self.report(
            "polygonize",
            &OrteliusError::Unsupported("polygonize unimplemented"),
        );
        None
    }

    /// The library version.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Collection member lookup with the call-surface convention that an
/// atomic geometry is its own component zero.
fn component(geometry: &Geometry, index: usize) -> Option<Geometry> {
    match geometry {
        Geometry::MultiPoint(_)
        | Geometry::MultiLineString(_)
        | Geometry::MultiPolygon(_)
        | Geometry::GeometryCollection(_) => geometry.geometry_n(index),
        _ => (index == 0).then(|| geometry.clone()),
    }
}
