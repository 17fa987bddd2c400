//! # sqlgeom1 — SQL Server spatial binary parser
//!
//! Decode the native binary serialization of SQL Server's `geometry` and
//! `geography` column types (the bytes a database driver hands back for
//! a spatial column) into an owned geometry tree plus the spatial
//! reference identifier.
//!
//! ```
//! use sqlgeom1::{parse_geometry, Geometry};
//!
//! // SRID 4326, version 1, IsValid|IsSinglePoint, X=1.0, Y=2.0
//! let bytes = [
//!     0xE6, 0x10, 0x00, 0x00, 0x01, 0x0C,
//!     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F,
//!     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40,
//! ];
//! let value = parse_geometry(&bytes).unwrap();
//! assert_eq!(value.srid, 4326);
//! assert_eq!(value.geometries.len(), 1);
//! assert!(matches!(value.geometries[0], Geometry::Point(_)));
//! ```
//!
//! The parser is pure: bytes in, tree out.  It borrows the input for the
//! duration of the call and returns output that does not reference it.
//! Parses on disjoint buffers may run in parallel without coordination.
//!
//! `geography` columns store (latitude, longitude) while callers expect
//! longitude-first; construct the parser with the matching
//! [`SpatialDataType`] and the swap is applied at every coordinate.

pub mod constants;
pub mod errors;
pub mod geometry;
pub mod json_adapter;
pub mod layout;
pub mod parser;
pub mod reader;

pub use errors::{ParseError, ERR_BAD_ROOT_PARENT, ERR_BAD_VERSION,
                 ERR_NEGATIVE_FIGURE_COUNT, ERR_NEGATIVE_POINT_COUNT,
                 ERR_NEGATIVE_SHAPE_COUNT, ERR_TRUNCATED,
                 ERR_UNSUPPORTED_SHAPE_TYPE, REASONS};
pub use geometry::{Coord, Geometry, Ring, SpatialValue};
pub use json_adapter::{to_geojson, to_geojson_string, GeoJsonGeometry};
pub use parser::{GeometryParser, SpatialDataType};

/// Parse the serialization of a `geometry` column value.
pub fn parse_geometry(data: &[u8]) -> Result<SpatialValue, ParseError> {
    GeometryParser::new(SpatialDataType::Geometry).parse(data)
}

/// Parse the serialization of a `geography` column value, swapping the
/// stored (latitude, longitude) into longitude-first coordinates.
pub fn parse_geography(data: &[u8]) -> Result<SpatialValue, ParseError> {
    GeometryParser::new(SpatialDataType::Geography).parse(data)
}
