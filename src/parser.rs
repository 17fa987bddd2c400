//! Tree builder and parser API.
//!
//! A parse walks the shapes table as a forest rooted at shape 0.  Instead
//! of re-scanning every later shape once per container (the quadratic
//! walk the format invites), a single linear scan groups child shapes by
//! parent and validates the parent links, then the tree is materialized
//! from the root.  Recursion while materializing is bounded by the shape
//! count, which the layout decoder has already bounded by the buffer
//! size.
//!
//! Geography columns store (latitude, longitude); callers expect
//! longitude-first.  The swap is applied at the single coordinate read
//! site, so every point, vertex, and ring vertex gets it uniformly.

use crate::constants::*;
use crate::errors::*;
use crate::geometry::{Coord, Geometry, Ring, SpatialValue};
use crate::layout::{decode_prefix, decode_tables, PointArray, Tables};
use crate::reader::ByteReader;

/// The two SQL column kinds.  Identical byte layout, swapped axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialDataType {
    Geometry,
    Geography,
}

/// Parser bound to a column kind.  Stateless across calls; the SRID and
/// the tree both travel in the returned [`SpatialValue`].
#[derive(Debug, Clone, Copy)]
pub struct GeometryParser {
    col_type: SpatialDataType,
}

impl GeometryParser {
    pub fn new(col_type: SpatialDataType) -> Self {
        Self { col_type }
    }

    pub fn column_kind(&self) -> SpatialDataType {
        self.col_type
    }

    /// Decode one serialized spatial value into an owned geometry tree.
    pub fn parse(&self, data: &[u8]) -> Result<SpatialValue, ParseError> {
        let rdr = ByteReader::new(data);
        let prefix = decode_prefix(rdr)?;
        let props = prefix.props;
        let point_size = props.point_size();

        // Short forms bypass the tables entirely.  When both bits are
        // set the single-point branch wins.
        if props.is_single_point() {
            rdr.require(PREFIX_LEN + point_size)?;
            let points = PointArray::new(rdr, PREFIX_LEN, 1);
            let geom = Geometry::Point(read_coord(&points, 0, self.col_type)?);
            return Ok(SpatialValue {
                srid: prefix.srid,
                geometries: vec![geom],
            });
        }
        if props.is_single_line_segment() {
            rdr.require(PREFIX_LEN + 2 * point_size)?;
            let points = PointArray::new(rdr, PREFIX_LEN, 2);
            let geom = Geometry::LineString(vec![
                read_coord(&points, 0, self.col_type)?,
                read_coord(&points, 1, self.col_type)?,
            ]);
            return Ok(SpatialValue {
                srid: prefix.srid,
                geometries: vec![geom],
            });
        }

        let tables = decode_tables(rdr, props)?;
        let builder = TreeBuilder::new(&tables, self.col_type)?;
        let geometries = builder.read_shape(0)?;
        Ok(SpatialValue {
            srid: prefix.srid,
            geometries,
        })
    }
}

/// Read point `i`, applying the geography axis swap.
fn read_coord(
    points: &PointArray<'_>,
    i: usize,
    col_type: SpatialDataType,
) -> Result<Coord, ParseError> {
    let first = points.first(i)?;
    let second = points.second(i)?;
    Ok(match col_type {
        SpatialDataType::Geometry => Coord::new(first, second),
        SpatialDataType::Geography => Coord::new(second, first),
    })
}

/// Walks the shapes table.  `children[i]` holds the indices of the shapes
/// whose parent is `i`, in shape order (which the format guarantees to be
/// a pre-order traversal).
struct TreeBuilder<'a, 'b> {
    tables: &'b Tables<'a>,
    col_type: SpatialDataType,
    children: Vec<Vec<usize>>,
}

impl<'a, 'b> TreeBuilder<'a, 'b> {
    /// One pass over the shapes table: validate parent links and group
    /// children by parent.
    fn new(tables: &'b Tables<'a>, col_type: SpatialDataType) -> Result<Self, ParseError> {
        let mut children = vec![Vec::new(); tables.num_shapes];
        for shape in 0..tables.num_shapes {
            let parent = tables.parent_offset(shape)?;
            if shape == 0 {
                if parent != ROOT_PARENT {
                    return Err(ParseError::new(
                        ERR_BAD_ROOT_PARENT,
                        format!("shape 0 parent {:#010x}, expected 0xffffffff", parent),
                    ));
                }
            } else if parent == ROOT_PARENT || parent as usize >= shape {
                return Err(ParseError::new(
                    ERR_BAD_ROOT_PARENT,
                    format!("shape {} parent {:#010x} does not precede it", shape, parent),
                ));
            } else {
                children[parent as usize].push(shape);
            }
        }
        Ok(Self {
            tables,
            col_type,
            children,
        })
    }

    /// Produce the geometry nodes for shape `i`.  A point shape with an
    /// out-of-range figure emits nothing, everything else emits exactly
    /// one node.
    fn read_shape(&self, i: usize) -> Result<Vec<Geometry>, ParseError> {
        match self.tables.shape_type(i)? {
            ST_POINT => Ok(self.read_point(i)?.map(Geometry::Point).into_iter().collect()),
            ST_LINESTRING => Ok(vec![Geometry::LineString(self.read_linestring(i)?)]),
            ST_POLYGON => Ok(vec![Geometry::Polygon(self.read_polygon(i)?)]),
            ST_MULTIPOINT => Ok(vec![Geometry::MultiPoint(self.read_multipoint(i)?)]),
            ST_MULTILINESTRING => Ok(vec![Geometry::MultiLineString(
                self.read_multilinestring(i)?,
            )]),
            ST_MULTIPOLYGON => Ok(vec![Geometry::MultiPolygon(self.read_multipolygon(i)?)]),
            ST_GEOMETRYCOLLECTION => Ok(vec![Geometry::GeometryCollection(
                self.read_collection(i)?,
            )]),
            other => Err(ParseError::new(
                ERR_UNSUPPORTED_SHAPE_TYPE,
                format!("shape {} has type {:#04x}", i, other),
            )),
        }
    }

    fn coord(&self, i: usize) -> Result<Coord, ParseError> {
        read_coord(&self.tables.points, i, self.col_type)
    }

    fn coord_range(&self, start: usize, end: usize) -> Result<Vec<Coord>, ParseError> {
        let mut coords = Vec::with_capacity(end.saturating_sub(start));
        for i in start..end {
            coords.push(self.coord(i)?);
        }
        Ok(coords)
    }

    /// The first point of the shape's first figure.  `None` when the
    /// figure or point offset is past its table, matching the original
    /// reader's defensive emptiness.
    fn read_point(&self, shape: usize) -> Result<Option<Coord>, ParseError> {
        let figure = self.tables.figure_offset(shape)?;
        if figure >= self.tables.num_figures {
            return Ok(None);
        }
        let point = self.tables.point_offset(figure)?;
        if point >= self.tables.points.count {
            return Ok(None);
        }
        Ok(Some(self.coord(point)?))
    }

    /// The point range of the shape's first figure; fewer than 2 points
    /// is malformed.
    fn read_linestring(&self, shape: usize) -> Result<Vec<Coord>, ParseError> {
        let figure = self.tables.figure_offset(shape)?;
        let (start, end) = if figure < self.tables.num_figures {
            (
                self.tables.point_offset(figure)?,
                self.tables.next_point_offset(figure)?,
            )
        } else {
            (0, 0)
        };
        if end - start < 2 {
            return Err(ParseError::new(
                ERR_NEGATIVE_POINT_COUNT,
                format!("line string shape {} spans {} points", shape, end - start),
            ));
        }
        self.coord_range(start, end)
    }

    /// One ring per figure of the shape, in figure order.  Rings are
    /// emitted as stored; closure is not re-checked or re-applied.
    fn read_polygon(&self, shape: usize) -> Result<Vec<Ring>, ParseError> {
        let first = self.tables.figure_offset(shape)?;
        let last = self.tables.next_figure_offset(shape)?;
        let mut rings = Vec::with_capacity(last.saturating_sub(first));
        for figure in first..last {
            let start = self.tables.point_offset(figure)?;
            let end = self.tables.next_point_offset(figure)?;
            rings.push(self.coord_range(start, end)?);
        }
        Ok(rings)
    }

    fn read_multipoint(&self, shape: usize) -> Result<Vec<Coord>, ParseError> {
        let mut coords = Vec::new();
        for &child in &self.children[shape] {
            if self.tables.shape_type(child)? == ST_POINT {
                if let Some(coord) = self.read_point(child)? {
                    coords.push(coord);
                }
            }
        }
        Ok(coords)
    }

    fn read_multilinestring(&self, shape: usize) -> Result<Vec<Vec<Coord>>, ParseError> {
        let mut lines = Vec::new();
        for &child in &self.children[shape] {
            if self.tables.shape_type(child)? == ST_LINESTRING {
                lines.push(self.read_linestring(child)?);
            }
        }
        Ok(lines)
    }

    fn read_multipolygon(&self, shape: usize) -> Result<Vec<Vec<Ring>>, ParseError> {
        let mut polygons = Vec::new();
        for &child in &self.children[shape] {
            if self.tables.shape_type(child)? == ST_POLYGON {
                polygons.push(self.read_polygon(child)?);
            }
        }
        Ok(polygons)
    }

    /// Children of every kind, dispatched by tag, in shape order.
    /// Nested collections recurse; parent links are strictly decreasing
    /// toward the root, so the recursion is bounded by the shape count.
    fn read_collection(&self, shape: usize) -> Result<Vec<Geometry>, ParseError> {
        let mut members = Vec::new();
        for &child in &self.children[shape] {
            members.extend(self.read_shape(child)?);
        }
        Ok(members)
    }
}
