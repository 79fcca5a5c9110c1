//! The end to end compilation pipeline.

use crate::bitmap::{pack_bitmap, BitDepth};
use crate::font_builder::EpdFontBuilder;
use crate::intervals::{merge_intervals, validate_intervals, CodePointInterval};
use crate::metrics::{floor_px, MetricsTransform};
use crate::source::GlyphSource;

/// A finished `.epdfont` image plus summary statistics for reporting.
#[derive(Clone, Debug)]
pub struct CompiledFont {
    /// The complete file contents.
    pub data: Vec<u8>,
    pub interval_count: usize,
    pub glyph_count: usize,
    /// Bytes in the bitmap blob alone.
    pub bitmap_len: usize,
}

impl CompiledFont {
    /// Total file size in bytes.
    pub fn total_len(&self) -> usize {
        self.data.len()
    }

    /// Write the image to `path` in a single call.
    pub fn write(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        std::fs::write(path, &self.data)
    }
}

/// Compile candidate intervals against a glyph source into a complete
/// `.epdfont` image.
///
/// Candidates may be unsorted and overlapping; code points the source
/// cannot render are excluded rather than reported. Each surviving code
/// point is processed in ascending order end to end, since glyph data
/// offsets are a running sum over packed lengths.
pub fn compile(
    source: &mut dyn GlyphSource,
    candidates: Vec<CodePointInterval>,
    transform: &MetricsTransform,
    depth: BitDepth,
) -> CompiledFont {
    let validated = validate_intervals(&merge_intervals(candidates), source);
    log::info!("processing {} intervals", validated.len());

    let metrics = transform.font_metrics(source.line_metrics());
    log::debug!(
        "font metrics: advance_y={} ascender={} descender={}",
        metrics.advance_y,
        metrics.ascender,
        metrics.descender
    );

    let mut builder = EpdFontBuilder::new(depth, metrics);
    for interval in validated {
        builder.push_interval(interval);
        for code_point in interval.iter() {
            let Some(glyph) = source.resolve(code_point) else {
                // Validation guarantees coverage; only a source that
                // changes between passes can lose a glyph here.
                log::warn!("{code_point:#06x} vanished after validation, skipping");
                continue;
            };
            let packed = pack_bitmap(&glyph.coverage, glyph.width, glyph.height, depth);
            builder.push_glyph(
                glyph.width as u8,
                glyph.height as u8,
                transform.advance_x(floor_px(glyph.advance)) as i16,
                glyph.left as i16,
                transform.top(glyph.top) as i16,
                &packed,
            );
        }
    }

    let interval_count = builder.interval_count();
    let glyph_count = builder.glyph_count();
    let bitmap_len = builder.bitmap_len();
    log::info!("generated {glyph_count} glyphs, {bitmap_len} bitmap bytes");

    CompiledFont {
        data: builder.build(),
        interval_count,
        glyph_count,
        bitmap_len,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::source::{LineMetrics, RasterGlyph};

    /// Renders an opaque 4x2 block for code points below a cutoff.
    struct BlockSource {
        covered: std::ops::Range<u32>,
    }

    impl GlyphSource for BlockSource {
        fn resolve(&mut self, code_point: u32) -> Option<RasterGlyph> {
            self.covered.contains(&code_point).then(|| RasterGlyph {
                coverage: vec![0xFF; 8],
                width: 4,
                height: 2,
                advance: 10 << 6,
                left: 1,
                top: 2,
            })
        }

        fn line_metrics(&mut self) -> LineMetrics {
            LineMetrics {
                height: 20 << 6,
                ascender: 16 << 6,
                descender: -4 << 6,
            }
        }
    }

    fn read_u32(data: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(data[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn pipeline_produces_consistent_offsets() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut source = BlockSource { covered: 0x20..0x30 };
        let font = compile(
            &mut source,
            vec![CodePointInterval::new(0x20, 0x7F)],
            &MetricsTransform::default(),
            BitDepth::One,
        );

        assert_eq!(font.interval_count, 1);
        assert_eq!(font.glyph_count, 16);
        // 4x2 at 1 bit per pixel is one byte per glyph.
        assert_eq!(font.bitmap_len, 16);

        let bitmap_offset = read_u32(&font.data, 28) as usize;
        assert_eq!(font.total_len(), bitmap_offset + font.bitmap_len);
        assert_eq!(&font.data[bitmap_offset..], &[0xFF; 16]);

        // data_offset chain: starts at 0, each offset is the previous
        // offset plus the previous length.
        let glyphs_offset = read_u32(&font.data, 24) as usize;
        let mut expected_offset = 0;
        for i in 0..font.glyph_count {
            let at = glyphs_offset + i * 16;
            let length = read_u32(&font.data, at + 8);
            let offset = read_u32(&font.data, at + 12);
            assert_eq!(offset, expected_offset);
            expected_offset += length;
        }
    }

    #[test]
    fn transforms_flow_into_glyphs_and_header() {
        let mut source = BlockSource { covered: 0x41..0x42 };
        let transform = MetricsTransform {
            line_height: 1.2,
            letter_spacing: 2,
            width_scale: 0.5,
            baseline_offset: 3,
        };
        let font = compile(
            &mut source,
            vec![CodePointInterval::new(0x41, 0x41)],
            &transform,
            BitDepth::One,
        );

        // advance_y: ceil_px(20 << 6) = 20, times 1.2 = 24.
        assert_eq!(font.data[8], 24);
        assert_eq!(font.data[9] as i8, 16);
        assert_eq!(font.data[10] as i8, -4);

        let glyphs_offset = read_u32(&font.data, 24) as usize;
        // advance: floor_px(10 << 6) = 10, times 0.5 = 5, plus 2.
        assert_eq!(font.data[glyphs_offset + 2], 7);
        // top: 2 + baseline offset 3.
        let top = i16::from_le_bytes(
            font.data[glyphs_offset + 6..glyphs_offset + 8]
                .try_into()
                .unwrap(),
        );
        assert_eq!(top, 5);
    }

    #[test]
    fn empty_coverage_builds_an_empty_font() {
        let mut source = BlockSource { covered: 0..0 };
        let font = compile(
            &mut source,
            vec![CodePointInterval::new(0x20, 0x7F)],
            &MetricsTransform::default(),
            BitDepth::Two,
        );
        assert_eq!(font.interval_count, 0);
        assert_eq!(font.glyph_count, 0);
        assert_eq!(font.bitmap_len, 0);
        assert_eq!(font.total_len(), 32);
        assert_eq!(read_u32(&font.data, 28), 32);
    }

    #[test]
    fn zero_area_glyphs_are_recorded_without_data() {
        struct EmptyGlyphs;
        impl GlyphSource for EmptyGlyphs {
            fn resolve(&mut self, code_point: u32) -> Option<RasterGlyph> {
                (code_point == 0x20).then(|| RasterGlyph {
                    advance: 6 << 6,
                    ..Default::default()
                })
            }
            fn line_metrics(&mut self) -> LineMetrics {
                LineMetrics::default()
            }
        }
        let font = compile(
            &mut EmptyGlyphs,
            vec![CodePointInterval::new(0x20, 0x20)],
            &MetricsTransform::default(),
            BitDepth::One,
        );
        assert_eq!(font.glyph_count, 1);
        assert_eq!(font.bitmap_len, 0);
        let glyphs_offset = read_u32(&font.data, 24) as usize;
        assert_eq!(read_u32(&font.data, glyphs_offset + 8), 0); // length
        assert_eq!(font.data[glyphs_offset + 2], 6); // advance survives
    }
}
