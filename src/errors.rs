//! Parse error type and reason tags.
//!
//! Every structural violation surfaces as a single `ParseError` carrying
//! one machine-checkable reason tag plus human-readable context.  The tag
//! is what conformance vectors compare against; the message carries the
//! offending offset, count, or tag value.  There is no recovery and no
//! partial result — the first violation aborts the parse, and the caller
//! (which still owns the input bytes) decides whether to log and move on
//! to the next row.

use std::fmt;

// ── Reason tags (7 total) ────────────────────────────────────
// Names are shared across implementations for cross-language grep-ability.

/// A read or table extends past the end of the buffer.
pub const ERR_TRUNCATED: &str = "truncated";
/// The version byte at offset 4 is not 0x01.
pub const ERR_BAD_VERSION: &str = "bad_version";
/// A parent link violates the forest structure: the root shape's parent
/// is not 0xFFFFFFFF, or a later shape's parent does not precede it.
pub const ERR_BAD_ROOT_PARENT: &str = "bad_root_parent";
/// The point count is zero or has the sign bit set, or a figure spans
/// fewer points than its shape type requires.
pub const ERR_NEGATIVE_POINT_COUNT: &str = "negative_point_count";
/// The figure count is zero or has the sign bit set.
pub const ERR_NEGATIVE_FIGURE_COUNT: &str = "negative_figure_count";
/// The shape count is zero or has the sign bit set.
pub const ERR_NEGATIVE_SHAPE_COUNT: &str = "negative_shape_count";
/// A shape record carries an unknown type tag (0, or above 7).
pub const ERR_UNSUPPORTED_SHAPE_TYPE: &str = "unsupported_shape_type";

/// Every reason tag a `ParseError` can carry.
pub const REASONS: &[&str] = &[
    ERR_TRUNCATED,
    ERR_BAD_VERSION,
    ERR_BAD_ROOT_PARENT,
    ERR_NEGATIVE_POINT_COUNT,
    ERR_NEGATIVE_FIGURE_COUNT,
    ERR_NEGATIVE_SHAPE_COUNT,
    ERR_UNSUPPORTED_SHAPE_TYPE,
];

/// Malformed spatial input.
///
/// The `code` field is one of the reason tag constants; the `message`
/// field is human-readable context.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub code: &'static str,
    pub message: String,
}

impl ParseError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed spatial data ({}): {}", self.code, self.message)
    }
}

impl std::error::Error for ParseError {}
