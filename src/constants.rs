//! SqlGeometry v1 wire-format constants — serialization property bits,
//! shape type tags, figure attributes, and record sizes.
//!
//! The layout is the one SQL Server uses for the CLR `geometry` and
//! `geography` column types: a 6-byte prefix (SRID, version, properties)
//! followed either by a short-form point array or by three tables
//! (points, figures, shapes).

/// Version byte the v1 layout carries at offset 4.  Anything else is
/// rejected; the v2 format (curved primitives) is out of scope.
pub const FORMAT_VERSION: u8 = 0x01;

/// Shortest buffer any form can occupy: SRID + version + properties +
/// the 4-byte point count of the complex form.
pub const MIN_BUFFER_LEN: usize = 10;

/// Offset of the first byte after the fixed prefix.  Short-form point
/// data starts here; the complex form puts its point count here.
pub const PREFIX_LEN: usize = 6;

// ── Serialization properties (byte 5, bitmask) ───────────────

pub const SP_HAS_Z_VALUES: u8 = 0x01;
pub const SP_HAS_M_VALUES: u8 = 0x02;
/// Set when the database considers the value topologically valid.
/// Recognized, no decoding effect.
pub const SP_IS_VALID: u8 = 0x04;
/// Short form: exactly one point follows the prefix, no tables.
pub const SP_IS_SINGLE_POINT: u8 = 0x08;
/// Short form: exactly two points follow the prefix, no tables.
pub const SP_IS_SINGLE_LINE_SEGMENT: u8 = 0x10;
/// Geography-only full-globe marker.  Recognized, no decoding effect.
pub const SP_IS_WHOLE_GLOBE: u8 = 0x20;

// ── Shape type tags (1 byte per shape record) ────────────────

pub const ST_UNKNOWN: u8 = 0;
pub const ST_POINT: u8 = 1;
pub const ST_LINESTRING: u8 = 2;
pub const ST_POLYGON: u8 = 3;
pub const ST_MULTIPOINT: u8 = 4;
pub const ST_MULTILINESTRING: u8 = 5;
pub const ST_MULTIPOLYGON: u8 = 6;
pub const ST_GEOMETRYCOLLECTION: u8 = 7;

// ── Figure attributes (1 byte per figure record) ─────────────
// Ring semantics are conveyed by the shape type; the attribute byte is
// decoded but not used to validate ring role or orientation.

pub const FA_INTERIOR_RING: u8 = 0x00;
pub const FA_STROKE: u8 = 0x01;
pub const FA_EXTERIOR_RING: u8 = 0x02;

// ── Table record sizes ───────────────────────────────────────

/// Figure record: u8 attribute + u32 point offset.
pub const FIGURE_RECORD_LEN: usize = 5;

/// Shape record: u32 parent offset + u32 figure offset + u8 type.
pub const SHAPE_RECORD_LEN: usize = 9;

/// Parent offset carried by the root shape (and only the root shape).
pub const ROOT_PARENT: u32 = 0xFFFF_FFFF;
