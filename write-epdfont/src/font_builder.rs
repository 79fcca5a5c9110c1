//! Assembling a complete `.epdfont` binary.
//!
//! The file is a 32 byte header, a 12 byte per entry interval table, a 16
//! byte per entry glyph table and a raw bitmap blob, all little-endian,
//! laid out back to back. Offsets are absolute byte offsets into the file,
//! computed once when [`EpdFontBuilder::build`] runs and never revisited.

use crate::bitmap::BitDepth;
use crate::intervals::CodePointInterval;
use crate::metrics::FontMetrics;

/// "EPDF" interpreted as a little-endian u32.
pub const EPDFONT_MAGIC: u32 = 0x46445045;
/// Current format version.
pub const EPDFONT_VERSION: u16 = 1;

const HEADER_LEN: usize = 32;
const INTERVAL_RECORD_LEN: usize = 12;
const GLYPH_RECORD_LEN: usize = 16;

/// A finished glyph table entry.
///
/// `data_offset` and `data_length` index the glyph's packed bytes within
/// the bitmap blob; consecutive glyphs tile the blob with no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRecord {
    pub width: u8,
    pub height: u8,
    /// Adjusted horizontal advance. Only the low byte is persisted; the
    /// on-device glyph table has a single unsigned byte for it.
    pub advance_x: i16,
    pub left: i16,
    pub top: i16,
    pub data_length: u32,
    pub data_offset: u32,
}

/// Accumulates validated intervals, glyph records and packed bitmap bytes,
/// then serializes them as one `.epdfont` image.
///
/// Glyphs must be appended in code point order, interleaved with their
/// intervals: push an interval, then one glyph per code point it covers.
/// The builder owns the running bitmap offset, so appending out of order
/// would corrupt the positional interval-to-glyph mapping.
#[derive(Clone, Debug, Default)]
pub struct EpdFontBuilder {
    depth: BitDepth,
    metrics: FontMetrics,
    intervals: Vec<CodePointInterval>,
    glyphs: Vec<GlyphRecord>,
    bitmap_data: Vec<u8>,
}

impl EpdFontBuilder {
    pub fn new(depth: BitDepth, metrics: FontMetrics) -> Self {
        Self {
            depth,
            metrics,
            ..Default::default()
        }
    }

    /// Record a validated interval. The glyphs for its code points are
    /// expected to follow.
    pub fn push_interval(&mut self, interval: CodePointInterval) {
        self.intervals.push(interval);
    }

    /// Append a glyph and its packed bitmap, assigning the next running
    /// data offset.
    pub fn push_glyph(
        &mut self,
        width: u8,
        height: u8,
        advance_x: i16,
        left: i16,
        top: i16,
        packed: &[u8],
    ) {
        self.glyphs.push(GlyphRecord {
            width,
            height,
            advance_x,
            left,
            top,
            data_length: packed.len() as u32,
            data_offset: self.bitmap_data.len() as u32,
        });
        self.bitmap_data.extend_from_slice(packed);
    }

    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Bytes accumulated in the bitmap blob so far.
    pub fn bitmap_len(&self) -> usize {
        self.bitmap_data.len()
    }

    /// Lay out and serialize the complete file.
    pub fn build(self) -> Vec<u8> {
        let intervals_offset = HEADER_LEN;
        let glyphs_offset = intervals_offset + self.intervals.len() * INTERVAL_RECORD_LEN;
        let bitmap_offset = glyphs_offset + self.glyphs.len() * GLYPH_RECORD_LEN;

        let mut out = Vec::with_capacity(bitmap_offset + self.bitmap_data.len());

        out.extend_from_slice(&EPDFONT_MAGIC.to_le_bytes());
        out.extend_from_slice(&EPDFONT_VERSION.to_le_bytes());
        out.push(match self.depth {
            BitDepth::One => 0,
            BitDepth::Two => 1,
        });
        out.push(0); // reserved
        out.push(self.metrics.advance_y);
        out.push(self.metrics.ascender as u8);
        out.push(self.metrics.descender as u8);
        out.push(0); // reserved
        out.extend_from_slice(&(self.intervals.len() as u32).to_le_bytes());
        out.extend_from_slice(&(self.glyphs.len() as u32).to_le_bytes());
        out.extend_from_slice(&(intervals_offset as u32).to_le_bytes());
        out.extend_from_slice(&(glyphs_offset as u32).to_le_bytes());
        out.extend_from_slice(&(bitmap_offset as u32).to_le_bytes());
        debug_assert_eq!(out.len(), HEADER_LEN);

        // Each interval records the glyph table index of its first code
        // point: the cumulative count of all prior intervals.
        let mut glyph_index_offset = 0u32;
        for interval in &self.intervals {
            out.extend_from_slice(&interval.start.to_le_bytes());
            out.extend_from_slice(&interval.end.to_le_bytes());
            out.extend_from_slice(&glyph_index_offset.to_le_bytes());
            glyph_index_offset += interval.code_point_count();
        }
        debug_assert_eq!(out.len(), glyphs_offset);

        for glyph in &self.glyphs {
            out.push(glyph.width);
            out.push(glyph.height);
            // Low byte only; sign and high bits do not survive.
            out.push(glyph.advance_x as u8);
            out.push(0); // reserved
            out.extend_from_slice(&glyph.left.to_le_bytes());
            out.extend_from_slice(&glyph.top.to_le_bytes());
            out.extend_from_slice(&glyph.data_length.to_le_bytes());
            out.extend_from_slice(&glyph.data_offset.to_le_bytes());
        }
        debug_assert_eq!(out.len(), bitmap_offset);

        out.extend_from_slice(&self.bitmap_data);
        out
    }
}
