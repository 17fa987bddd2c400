//! GeoJSON adapter — renders a parsed tree as RFC 7946 geometry objects.
//!
//! The parser itself has no I/O; this module is the bridge for callers
//! that hand parsed values to web clients or toolkits speaking GeoJSON.
//! Positions are emitted `[x, y]`, which for geography columns is
//! longitude-first — exactly what RFC 7946 mandates, because the parser
//! has already applied the axis swap.
//!
//! The SRID is not carried: RFC 7946 removed CRS negotiation and assumes
//! WGS 84.  Callers that need it read it off the [`SpatialValue`].

use serde::Serialize;

use crate::geometry::{Coord, Geometry, Ring, SpatialValue};

/// A GeoJSON position: `[x, y]`.
pub type Position = [f64; 2];

/// A GeoJSON geometry object, tagged by `"type"` per RFC 7946 §3.1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPoint { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<GeoJsonGeometry> },
}

fn position(c: &Coord) -> Position {
    [c.x, c.y]
}

fn positions(coords: &[Coord]) -> Vec<Position> {
    coords.iter().map(position).collect()
}

fn ring_positions(rings: &[Ring]) -> Vec<Vec<Position>> {
    rings.iter().map(|r| positions(r)).collect()
}

impl From<&Geometry> for GeoJsonGeometry {
    fn from(geom: &Geometry) -> Self {
        match geom {
            Geometry::Point(c) => GeoJsonGeometry::Point {
                coordinates: position(c),
            },
            Geometry::LineString(coords) => GeoJsonGeometry::LineString {
                coordinates: positions(coords),
            },
            Geometry::Polygon(rings) => GeoJsonGeometry::Polygon {
                coordinates: ring_positions(rings),
            },
            Geometry::MultiPoint(coords) => GeoJsonGeometry::MultiPoint {
                coordinates: positions(coords),
            },
            Geometry::MultiLineString(lines) => GeoJsonGeometry::MultiLineString {
                coordinates: lines.iter().map(|l| positions(l)).collect(),
            },
            Geometry::MultiPolygon(polys) => GeoJsonGeometry::MultiPolygon {
                coordinates: polys.iter().map(|p| ring_positions(p)).collect(),
            },
            Geometry::GeometryCollection(children) => GeoJsonGeometry::GeometryCollection {
                geometries: children.iter().map(GeoJsonGeometry::from).collect(),
            },
        }
    }
}

/// Convert a whole parse result.  A single root node becomes that
/// geometry; zero or several become a GeometryCollection.
pub fn to_geojson(value: &SpatialValue) -> GeoJsonGeometry {
    match value.geometries.as_slice() {
        [single] => GeoJsonGeometry::from(single),
        many => GeoJsonGeometry::GeometryCollection {
            geometries: many.iter().map(GeoJsonGeometry::from).collect(),
        },
    }
}

/// Serialize a parse result to a GeoJSON string.
pub fn to_geojson_string(value: &SpatialValue) -> Result<String, serde_json::Error> {
    serde_json::to_string(&to_geojson(value))
}
