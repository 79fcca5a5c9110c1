//! Writing `.epdfont` bitmap font files.
//!
//! An `.epdfont` file is a compact, offset-indexed bitmap font resource for
//! constrained display devices such as e-paper controllers. This crate turns
//! rasterized glyphs (supplied by a [`GlyphSource`]) into that format:
//!
//! - [`intervals`]: computing, merging and validating the Unicode code point
//!   intervals actually covered by a font,
//! - [`metrics`]: normalizing 26.6 fixed point metrics to whole pixels and
//!   applying line height / letter spacing / width scale / baseline
//!   adjustments,
//! - [`bitmap`]: requantizing 8-bit coverage bitmaps into tightly packed
//!   1-bit or 2-bit rasters,
//! - [`font_builder`]: laying out the header, interval table, glyph table
//!   and bitmap blob and serializing them little-endian,
//! - [`compile`]: the end to end pipeline.
//!
//! Rasterization itself is out of scope; anything that can produce a
//! coverage bitmap and metrics for a code point can implement
//! [`GlyphSource`].

pub mod bitmap;
pub mod compile;
pub mod font_builder;
pub mod intervals;
pub mod metrics;
pub mod source;

pub use bitmap::{pack_bitmap, BitDepth};
pub use compile::{compile, CompiledFont};
pub use font_builder::{EpdFontBuilder, GlyphRecord, EPDFONT_MAGIC, EPDFONT_VERSION};
pub use intervals::{
    default_intervals, merge_intervals, validate_intervals, CodePointInterval, ParseIntervalError,
};
pub use metrics::{ceil_px, floor_px, FontMetrics, MetricsTransform};
pub use source::{GlyphSource, LineMetrics, RasterGlyph};
