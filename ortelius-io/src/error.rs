//! Error types used by the codecs.

use ortelius_types::GeometryError;
use thiserror::Error;

/// Well-Known Text parse error. Every variant reports the byte offset of
/// the offending input.
#[derive(Debug, Error)]
pub enum WktError {
    /// A character that can never start a token.
    #[error("unexpected character {found:?} at byte {at}")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// Byte offset in the input.
        at: usize,
    },

    /// A structurally valid token in the wrong place.
    #[error("expected {expected} but found {found} at byte {at}")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: &'static str,
        /// Description of what it found instead.
        found: String,
        /// Byte offset in the input.
        at: usize,
    },

    /// A keyword that is not one of the eight geometry types.
    #[error("unknown geometry type {found:?} at byte {at}")]
    UnknownType {
        /// The unrecognized keyword.
        found: String,
        /// Byte offset in the input.
        at: usize,
    },

    /// A coordinate token that does not parse as a number.
    #[error("invalid number {text:?} at byte {at}")]
    InvalidNumber {
        /// The unparseable text.
        text: String,
        /// Byte offset in the input.
        at: usize,
    },

    /// Collections nested beyond the supported depth.
    #[error("geometry nesting deeper than {limit} levels at byte {at}")]
    NestingTooDeep {
        /// Maximum supported depth.
        limit: usize,
        /// Byte offset in the input.
        at: usize,
    },

    /// A parsed ring violated the geometry model's ring invariants.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Well-Known Binary decode error.
#[derive(Debug, Error)]
pub enum WkbError {
    /// The buffer ended before the announced content.
    #[error("unexpected end of buffer at byte {at}")]
    Truncated {
        /// Byte offset where more data was expected.
        at: usize,
    },

    /// A byte-order flag other than 0 (big-endian) or 1 (little-endian).
    #[error("invalid byte order flag {flag} at byte {at}")]
    BadByteOrder {
        /// The flag byte found.
        flag: u8,
        /// Byte offset of the flag.
        at: usize,
    },

    /// A geometry type code outside 1..=7.
    #[error("unknown geometry type code {code} at byte {at}")]
    UnknownTypeCode {
        /// The code found.
        code: u32,
        /// Byte offset of the code.
        at: usize,
    },

    /// A typed collection member of the wrong variant.
    #[error("expected {expected} member but found type code {found} at byte {at}")]
    UnexpectedMemberType {
        /// The member variant required by the container.
        expected: &'static str,
        /// The type code actually read.
        found: u32,
        /// Byte offset of the member's type code.
        at: usize,
    },

    /// Collections nested beyond the supported depth.
    #[error("geometry nesting deeper than {limit} levels at byte {at}")]
    NestingTooDeep {
        /// Maximum supported depth.
        limit: usize,
        /// Byte offset of the over-deep member.
        at: usize,
    },

    /// A decoded ring violated the geometry model's ring invariants.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
