//! Error enum.

use ortelius_types::GeometryError;
use thiserror::Error;

/// Errors produced by the engine operations.
#[derive(Debug, Error)]
pub enum OrteliusError {
    /// A geometry value violated a structural rule.
    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),
    /// WKT input could not be parsed.
    #[error("WKT parse error: {0}")]
    Wkt(#[from] ortelius_io::WktError),
    /// WKB input could not be parsed.
    #[error("WKB parse error: {0}")]
    Wkb(#[from] ortelius_io::WkbError),
    /// The relate engine could not process its operands.
    #[error("relate error: {0}")]
    Relate(String),
    /// The overlay engine could not produce a consistent result.
    #[error("overlay error: {0}")]
    Overlay(String),
    /// An operation argument was out of its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The operation is not available in this build.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
