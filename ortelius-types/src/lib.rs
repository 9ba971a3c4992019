//! Geometry model for a planar simple-feature kernel.
//!
//! The types in this crate are plain owned values: every geometry owns its
//! coordinate sequences outright, and no operation mutates a geometry in
//! place except [`Geometry::set_srid`]. Topological operations over these
//! types live in the `ortelius` crate; text and binary codecs live in
//! `ortelius-io`.

mod coord;
pub use coord::*;

mod point;
pub use point::*;

mod line_string;
pub use line_string::*;

mod polygon;
pub use polygon::*;

mod multi;
pub use multi::*;

mod collection;
pub use collection::*;

mod geometry;
pub use geometry::*;

mod dimension;
pub use dimension::*;

mod location;
pub use location::*;

mod matrix;
pub use matrix::*;

pub mod envelope;
pub use envelope::Envelope;

pub mod orient;
pub mod ring;
pub mod segment;

mod error;
pub use error::*;
