//! Owned output model for parsed spatial values.
//!
//! The parser produces a self-contained tree that does not borrow from
//! the input buffer.  Z and M ordinates present in the serialization are
//! read past but never recorded — the model is strictly 2D.
//!
//! `Display` renders WKT, which is what the surrounding mapping stack
//! speaks at its edges.  Empty sequences render the `EMPTY` keyword.

use std::fmt;

use serde::Serialize;

/// A 2D coordinate.  For geography columns the axis swap has already been
/// applied by the parser: `x` is longitude, `y` is latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One ring of a polygon.  Closed by construction of the input (first
/// coordinate equals the last); the parser does not re-close.
pub type Ring = Vec<Coord>;

/// A node in the parsed geometry tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Geometry {
    Point(Coord),
    /// Ordered vertex sequence, always at least 2 coordinates.
    LineString(Vec<Coord>),
    /// Rings in figure order; the first is the exterior ring for
    /// well-formed input, but the parser does not enforce ring roles.
    Polygon(Vec<Ring>),
    MultiPoint(Vec<Coord>),
    MultiLineString(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Ring>>),
    /// Arbitrary children in shape order, including nested collections.
    GeometryCollection(Vec<Geometry>),
}

/// Result of one successful parse: the spatial reference identifier from
/// the buffer prefix plus the top-level geometry nodes in shape order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialValue {
    pub srid: u32,
    pub geometries: Vec<Geometry>,
}

// ── WKT rendering ────────────────────────────────────────────

fn write_coord(f: &mut fmt::Formatter<'_>, c: &Coord) -> fmt::Result {
    write!(f, "{} {}", c.x, c.y)
}

fn write_coord_seq(f: &mut fmt::Formatter<'_>, coords: &[Coord]) -> fmt::Result {
    write!(f, "(")?;
    for (i, c) in coords.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_coord(f, c)?;
    }
    write!(f, ")")
}

fn write_ring_seq(f: &mut fmt::Formatter<'_>, rings: &[Ring]) -> fmt::Result {
    write!(f, "(")?;
    for (i, ring) in rings.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_coord_seq(f, ring)?;
    }
    write!(f, ")")
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(c) => {
                write!(f, "POINT (")?;
                write_coord(f, c)?;
                write!(f, ")")
            }
            Geometry::LineString(coords) => {
                if coords.is_empty() {
                    return write!(f, "LINESTRING EMPTY");
                }
                write!(f, "LINESTRING ")?;
                write_coord_seq(f, coords)
            }
            Geometry::Polygon(rings) => {
                if rings.is_empty() {
                    return write!(f, "POLYGON EMPTY");
                }
                write!(f, "POLYGON ")?;
                write_ring_seq(f, rings)
            }
            Geometry::MultiPoint(coords) => {
                if coords.is_empty() {
                    return write!(f, "MULTIPOINT EMPTY");
                }
                write!(f, "MULTIPOINT ")?;
                write_coord_seq(f, coords)
            }
            Geometry::MultiLineString(lines) => {
                if lines.is_empty() {
                    return write!(f, "MULTILINESTRING EMPTY");
                }
                write!(f, "MULTILINESTRING ")?;
                write_ring_seq(f, lines)
            }
            Geometry::MultiPolygon(polys) => {
                if polys.is_empty() {
                    return write!(f, "MULTIPOLYGON EMPTY");
                }
                write!(f, "MULTIPOLYGON (")?;
                for (i, rings) in polys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_ring_seq(f, rings)?;
                }
                write!(f, ")")
            }
            Geometry::GeometryCollection(children) => {
                if children.is_empty() {
                    return write!(f, "GEOMETRYCOLLECTION EMPTY");
                }
                write!(f, "GEOMETRYCOLLECTION (")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
