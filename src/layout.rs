//! Layout decoder — the fixed prefix and the three parallel tables.
//!
//! Consumes the prefix (SRID, version, serialization properties) and, for
//! the complex form, locates the points, figures, and shapes tables,
//! verifying at each step that the next table fits the buffer in full.
//! Counts are unsigned on the wire but SQL Server's own reader treats
//! them as signed 32-bit, so a count of zero or with the sign bit set is
//! rejected as a negative count before any size check.
//!
//! Table layout of the complex form (all little-endian):
//!
//! ```text
//! 6            4     nNumPoints
//! 10           P·N   points: X[N],Y[N] interleaved pairs, then Z[N], then M[N]
//! after points 4     nNumFigures
//!              5·F   figures: {u8 attribute, u32 point_offset} ×F
//! after figs   4     nNumShapes
//!              9·S   shapes: {u32 parent_offset, u32 figure_offset, u8 type} ×S
//! ```

use crate::constants::*;
use crate::errors::*;
use crate::reader::ByteReader;

/// The serialization property bitmask at offset 5.
#[derive(Debug, Clone, Copy)]
pub struct SerializationProps(pub u8);

impl SerializationProps {
    pub fn has_z(self) -> bool {
        self.0 & SP_HAS_Z_VALUES != 0
    }

    pub fn has_m(self) -> bool {
        self.0 & SP_HAS_M_VALUES != 0
    }

    pub fn is_valid(self) -> bool {
        self.0 & SP_IS_VALID != 0
    }

    pub fn is_single_point(self) -> bool {
        self.0 & SP_IS_SINGLE_POINT != 0
    }

    pub fn is_single_line_segment(self) -> bool {
        self.0 & SP_IS_SINGLE_LINE_SEGMENT != 0
    }

    pub fn is_whole_globe(self) -> bool {
        self.0 & SP_IS_WHOLE_GLOBE != 0
    }

    /// Bytes one point record occupies: X and Y always, plus 8 bytes per
    /// present Z/M ordinate.
    pub fn point_size(self) -> usize {
        let mut size = 16;
        if self.has_z() {
            size += 8;
        }
        if self.has_m() {
            size += 8;
        }
        size
    }
}

/// The decoded fixed prefix.
#[derive(Debug, Clone, Copy)]
pub struct Prefix {
    pub srid: u32,
    pub props: SerializationProps,
}

/// Decode the 6-byte prefix.  The minimum-length check runs first, so any
/// buffer shorter than 10 bytes is `truncated` regardless of content.
pub fn decode_prefix(rdr: ByteReader<'_>) -> Result<Prefix, ParseError> {
    rdr.require(MIN_BUFFER_LEN)?;
    let srid = rdr.read_u32_le(0)?;
    let version = rdr.read_u8(4)?;
    if version != FORMAT_VERSION {
        return Err(ParseError::new(
            ERR_BAD_VERSION,
            format!("version byte {:#04x}, expected 0x01", version),
        ));
    }
    let props = SerializationProps(rdr.read_u8(5)?);
    Ok(Prefix { srid, props })
}

/// The X/Y plane of a point array.  Shared by the short forms (base 6,
/// one or two records) and the complex form (base 10).  Z and M planes
/// follow the X/Y pairs in the buffer; the parser reads past them but
/// never loads them.
#[derive(Clone, Copy)]
pub struct PointArray<'a> {
    rdr: ByteReader<'a>,
    pub pos: usize,
    pub count: usize,
}

impl<'a> PointArray<'a> {
    pub fn new(rdr: ByteReader<'a>, pos: usize, count: usize) -> Self {
        Self { rdr, pos, count }
    }

    /// First stored ordinate of point `i` (X for geometry, latitude for
    /// geography).
    pub fn first(&self, i: usize) -> Result<f64, ParseError> {
        self.rdr.read_f64_le(self.pos + 16 * i)
    }

    /// Second stored ordinate of point `i` (Y for geometry, longitude for
    /// geography).
    pub fn second(&self, i: usize) -> Result<f64, ParseError> {
        self.rdr.read_f64_le(self.pos + 16 * i + 8)
    }
}

/// The three located tables of the complex form.  Construction validates
/// that every table fits the buffer and that figure/shape offsets satisfy
/// the monotonicity invariant, so the record accessors below never read
/// outside their table.
pub struct Tables<'a> {
    rdr: ByteReader<'a>,
    pub points: PointArray<'a>,
    pub figure_pos: usize,
    pub num_figures: usize,
    pub shape_pos: usize,
    pub num_shapes: usize,
}

/// Validate a table count read as u32 against the original signed-read
/// semantics: zero and sign-bit values are "negative".
fn check_count(raw: u32, code: &'static str, what: &str) -> Result<usize, ParseError> {
    if raw == 0 || raw > i32::MAX as u32 {
        return Err(ParseError::new(
            code,
            format!("{} count {:#010x} not positive", what, raw),
        ));
    }
    Ok(raw as usize)
}

fn table_end(pos: usize, record: usize, count: usize) -> Result<usize, ParseError> {
    record
        .checked_mul(count)
        .and_then(|size| pos.checked_add(size))
        .ok_or_else(|| ParseError::new(ERR_TRUNCATED, "table size overflow"))
}

/// Locate and validate the complex-form tables.
pub fn decode_tables(
    rdr: ByteReader<'_>,
    props: SerializationProps,
) -> Result<Tables<'_>, ParseError> {
    let num_points = check_count(
        rdr.read_u32_le(PREFIX_LEN)?,
        ERR_NEGATIVE_POINT_COUNT,
        "point",
    )?;
    let point_pos = MIN_BUFFER_LEN;

    // Figure table position: point array plus the 4-byte figure count.
    let figure_pos = table_end(point_pos, props.point_size(), num_points)?
        .checked_add(4)
        .ok_or_else(|| ParseError::new(ERR_TRUNCATED, "table size overflow"))?;
    rdr.require(figure_pos)?;
    let num_figures = check_count(
        rdr.read_u32_le(figure_pos - 4)?,
        ERR_NEGATIVE_FIGURE_COUNT,
        "figure",
    )?;

    let shape_pos = table_end(figure_pos, FIGURE_RECORD_LEN, num_figures)?
        .checked_add(4)
        .ok_or_else(|| ParseError::new(ERR_TRUNCATED, "table size overflow"))?;
    rdr.require(shape_pos)?;
    let num_shapes = check_count(
        rdr.read_u32_le(shape_pos - 4)?,
        ERR_NEGATIVE_SHAPE_COUNT,
        "shape",
    )?;
    rdr.require(table_end(shape_pos, SHAPE_RECORD_LEN, num_shapes)?)?;

    let tables = Tables {
        rdr,
        points: PointArray::new(rdr, point_pos, num_points),
        figure_pos,
        num_figures,
        shape_pos,
        num_shapes,
    };
    tables.validate_offsets()?;
    Ok(tables)
}

impl<'a> Tables<'a> {
    // ── Figure records ───────────────────────────────────────

    pub fn figure_attribute(&self, figure: usize) -> Result<u8, ParseError> {
        self.rdr.read_u8(self.figure_pos + figure * FIGURE_RECORD_LEN)
    }

    /// Index of the figure's first point in the points table.
    pub fn point_offset(&self, figure: usize) -> Result<usize, ParseError> {
        let raw = self
            .rdr
            .read_u32_le(self.figure_pos + figure * FIGURE_RECORD_LEN + 1)?;
        Ok(raw as usize)
    }

    /// End of the figure's half-open point range.
    pub fn next_point_offset(&self, figure: usize) -> Result<usize, ParseError> {
        if figure + 1 < self.num_figures {
            self.point_offset(figure + 1)
        } else {
            Ok(self.points.count)
        }
    }

    // ── Shape records ────────────────────────────────────────

    pub fn parent_offset(&self, shape: usize) -> Result<u32, ParseError> {
        self.rdr.read_u32_le(self.shape_pos + shape * SHAPE_RECORD_LEN)
    }

    /// Index of the shape's first figure in the figures table.
    pub fn figure_offset(&self, shape: usize) -> Result<usize, ParseError> {
        let raw = self
            .rdr
            .read_u32_le(self.shape_pos + shape * SHAPE_RECORD_LEN + 4)?;
        Ok(raw as usize)
    }

    /// End of the shape's half-open figure range.
    pub fn next_figure_offset(&self, shape: usize) -> Result<usize, ParseError> {
        if shape + 1 < self.num_shapes {
            self.figure_offset(shape + 1)
        } else {
            Ok(self.num_figures)
        }
    }

    pub fn shape_type(&self, shape: usize) -> Result<u8, ParseError> {
        self.rdr
            .read_u8(self.shape_pos + shape * SHAPE_RECORD_LEN + 8)
    }

    // ── Offset invariants ────────────────────────────────────

    /// Point offsets must be non-decreasing in figure order and never
    /// exceed the point count; figure offsets likewise in shape order.
    /// An offset that violates this references data that is not there,
    /// so the violation reports as `truncated`.
    fn validate_offsets(&self) -> Result<(), ParseError> {
        let mut prev = 0usize;
        for figure in 0..self.num_figures {
            let off = self.point_offset(figure)?;
            if off < prev || off > self.points.count {
                return Err(ParseError::new(
                    ERR_TRUNCATED,
                    format!("figure {} point offset {} out of range", figure, off),
                ));
            }
            prev = off;
        }

        let mut prev = 0usize;
        for shape in 0..self.num_shapes {
            let off = self.figure_offset(shape)?;
            if off < prev || off > self.num_figures {
                return Err(ParseError::new(
                    ERR_TRUNCATED,
                    format!("shape {} figure offset {} out of range", shape, off),
                ));
            }
            prev = off;
        }
        Ok(())
    }
}
