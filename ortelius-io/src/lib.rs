//! Text and binary codecs for the ortelius geometry model.
//!
//! [`wkt`] implements the Well-Known Text format; [`wkb`] implements
//! Well-Known Binary. Both are total inverses over valid geometries:
//! parsing what the writer produced yields a structurally equal geometry.

pub mod wkb;
pub mod wkt;

mod error;
pub use error::*;
