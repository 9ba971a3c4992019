//! Ortelius is a planar computational geometry engine. It reads and writes
//! geometries as WKT and WKB, classifies the relationship of two geometries
//! through DE-9IM intersection matrices, computes boolean overlays,
//! buffers, convex hulls and representative points, and checks validity
//! and simplicity, all in pure Rust on exact floating-point coordinates.
//!
//! # Quick start
//!
//! Every operation is available as a method on [`Kernel`], the boundary
//! context that hosts construct once and drop for teardown:
//!
//! ```
//! use ortelius::Kernel;
//!
//! let kernel = Kernel::new();
//! let a = kernel
//!     .geom_from_wkt("POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))")
//!     .unwrap();
//! let b = kernel
//!     .geom_from_wkt("POLYGON ((5 5, 5 15, 15 15, 15 5, 5 5))")
//!     .unwrap();
//!
//! assert_eq!(kernel.relate(&a, &b).unwrap(), "212101212");
//! assert!(kernel.intersects(&a, &b).unwrap());
//!
//! let common = kernel.intersection(&a, &b).unwrap();
//! assert_eq!(common.area(), 25.0);
//! ```
//!
//! The kernel never panics on bad input: each operation reports failures
//! through the error callback registered with
//! [`Kernel::with_callbacks`] and returns its sentinel value instead.
//!
//! # Main components
//!
//! * [`ortelius_types`] holds the geometry model ([`Geometry`] and its
//!   variants), the coordinate and envelope primitives, and the robust
//!   orientation and segment intersection predicates everything else is
//!   built on.
//! * [`ortelius_io`] holds the WKT and WKB codecs.
//! * This crate adds the engines: [`relate`](mod@relate) for DE-9IM
//!   classification, [`overlay`](mod@overlay) for the boolean set
//!   operations, [`buffer`](mod@buffer) and [`hull`] for constructive
//!   geometry, [`valid`] and [`simple`] for the checkers, and [`Kernel`]
//!   as the single host-facing entry point.
//!
//! Engine functions can also be called directly when no callback plumbing
//! is needed; they return `Result` with [`OrteliusError`].

pub use ortelius_io;
pub use ortelius_types;
pub use ortelius_types::{Geometry, IntersectionMatrix};

mod api;
pub mod boundary;
pub mod buffer;
pub mod centroid;
mod error;
pub mod hull;
pub mod interior_point;
mod locate;
mod noding;
pub mod overlay;
mod parts;
pub mod relate;
pub mod simple;
pub mod valid;

pub use api::{Kernel, MessageCallback, DEFAULT_QUADRANT_SEGMENTS};
pub use boundary::boundary;
pub use buffer::buffer;
pub use centroid::centroid;
pub use error::OrteliusError;
pub use hull::convex_hull;
pub use interior_point::interior_point;
pub use overlay::{overlay, OverlayOp};
pub use relate::relate;
pub use simple::{is_ring, is_simple};
pub use valid::is_valid;

#[cfg(test)]
mod tests;
