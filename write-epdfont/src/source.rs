//! The glyph source abstraction.
//!
//! The compiler never touches a rasterizer directly; it asks a
//! [`GlyphSource`] for coverage bitmaps and metrics. The command line tool
//! implements this over a priority-ordered stack of FreeType faces, but any
//! renderer works.

/// Face-level vertical metrics in 26.6 fixed point units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMetrics {
    /// Distance between consecutive baselines.
    pub height: i64,
    /// Distance from the baseline to the highest outline point.
    pub ascender: i64,
    /// Distance from the baseline to the lowest outline point; negative
    /// below the baseline.
    pub descender: i64,
}

/// A rasterized glyph: an 8-bit coverage bitmap plus its metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterGlyph {
    /// Coverage samples, row major, one byte per pixel, no row padding.
    /// 0 is fully transparent, 255 fully opaque.
    pub coverage: Vec<u8>,
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Horizontal advance in 26.6 fixed point.
    pub advance: i64,
    /// Left side bearing in whole pixels.
    pub left: i32,
    /// Top side bearing in whole pixels.
    pub top: i32,
}

/// Something that can rasterize glyphs for Unicode code points.
///
/// Implementations typically hold an ordered list of font faces and render
/// with the first face that covers the requested code point.
pub trait GlyphSource {
    /// Rasterize the glyph for `code_point`, or `None` if nothing covers it.
    fn resolve(&mut self, code_point: u32) -> Option<RasterGlyph>;

    /// Vertical metrics of the reference face.
    ///
    /// The reference face is the one that renders `'|'`, falling back to
    /// the primary face when no face covers it.
    fn line_metrics(&mut self) -> LineMetrics;
}
