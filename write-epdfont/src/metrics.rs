//! Normalizing and adjusting glyph and font metrics.
//!
//! Rasterizers report metrics in 26.6 fixed point. Horizontal advances and
//! the descender are floored to whole pixels so advances never overestimate
//! spacing; the line height and ascender are ceiled so vertical extents
//! never underestimate the space a line needs.

/// Convert a 26.6 fixed point value to whole pixels, rounding down.
#[inline]
pub fn floor_px(value: i64) -> i32 {
    (value >> 6) as i32
}

/// Convert a 26.6 fixed point value to whole pixels, rounding up.
#[inline]
pub fn ceil_px(value: i64) -> i32 {
    ((value + 63) >> 6) as i32
}

/// Font-wide scalar metrics as persisted in the file header.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FontMetrics {
    /// Vertical advance between baselines, in pixels.
    pub advance_y: u8,
    /// Pixels above the baseline.
    pub ascender: i8,
    /// Pixels below the baseline, negative or zero.
    pub descender: i8,
}

/// Adjustments applied to raw metrics during compilation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MetricsTransform {
    /// Multiplier for the font-wide line height.
    pub line_height: f32,
    /// Pixels added to every glyph advance.
    pub letter_spacing: i32,
    /// Multiplier for per-glyph horizontal advances.
    pub width_scale: f32,
    /// Pixels added to every glyph's top bearing.
    pub baseline_offset: i32,
}

impl Default for MetricsTransform {
    fn default() -> Self {
        Self {
            line_height: 1.0,
            letter_spacing: 0,
            width_scale: 1.0,
            baseline_offset: 0,
        }
    }
}

impl MetricsTransform {
    /// Adjusted horizontal advance for a glyph, given its raw advance in
    /// whole pixels. Scaling truncates toward zero; letter spacing is added
    /// after.
    pub fn advance_x(&self, advance_px: i32) -> i32 {
        (advance_px as f32 * self.width_scale) as i32 + self.letter_spacing
    }

    /// Adjusted top bearing for a glyph.
    pub fn top(&self, top_px: i32) -> i32 {
        top_px + self.baseline_offset
    }

    /// Adjusted vertical advance, given the raw line height in whole
    /// pixels. Rounds to nearest.
    pub fn advance_y(&self, height_px: i32) -> i32 {
        (height_px as f32 * self.line_height).round() as i32
    }

    /// Derive the persisted font-wide metrics from reference line metrics.
    ///
    /// Only the vertical advance is scaled; ascender and descender are
    /// normalized but otherwise untouched.
    pub fn font_metrics(&self, line: crate::source::LineMetrics) -> FontMetrics {
        FontMetrics {
            advance_y: self.advance_y(ceil_px(line.height)) as u8,
            ascender: ceil_px(line.ascender) as i8,
            descender: floor_px(line.descender) as i8,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::source::LineMetrics;

    #[test]
    fn fixed_point_normalization() {
        assert_eq!(floor_px(0), 0);
        assert_eq!(floor_px(64), 1);
        assert_eq!(floor_px(65), 1);
        assert_eq!(floor_px(127), 1);
        assert_eq!(ceil_px(64), 1);
        assert_eq!(ceil_px(65), 2);
        assert_eq!(ceil_px(128), 2);
    }

    #[test]
    fn fixed_point_normalization_is_asymmetric_for_negatives() {
        // Floor moves away from zero, ceil toward it.
        assert_eq!(floor_px(-1), -1);
        assert_eq!(floor_px(-64), -1);
        assert_eq!(floor_px(-65), -2);
        assert_eq!(ceil_px(-1), 0);
        assert_eq!(ceil_px(-64), -1);
        assert_eq!(ceil_px(-65), -1);
    }

    #[test]
    fn advance_x_truncates_before_spacing() {
        let transform = MetricsTransform {
            width_scale: 0.5,
            letter_spacing: 2,
            ..Default::default()
        };
        // 10 * 0.5 = 5, plus 2 pixels of spacing.
        assert_eq!(transform.advance_x(10), 7);
        // 15 * 0.5 = 7.5 truncates to 7.
        assert_eq!(transform.advance_x(15), 9);
    }

    #[test]
    fn advance_y_scales_line_height() {
        let transform = MetricsTransform {
            line_height: 1.2,
            ..Default::default()
        };
        assert_eq!(transform.advance_y(20), 24);
    }

    #[test]
    fn baseline_offset_shifts_top_bearing() {
        let transform = MetricsTransform {
            baseline_offset: -3,
            ..Default::default()
        };
        assert_eq!(transform.top(12), 9);
    }

    #[test]
    fn font_metrics_derivation() {
        // 20px line height, 16px ascender, -4px descender in 26.6.
        let line = LineMetrics {
            height: 20 << 6,
            ascender: 16 << 6,
            descender: -4 << 6,
        };
        let metrics = MetricsTransform {
            line_height: 1.2,
            ..Default::default()
        }
        .font_metrics(line);
        assert_eq!(
            metrics,
            FontMetrics {
                advance_y: 24,
                ascender: 16,
                descender: -4,
            }
        );
    }

    #[test]
    fn identity_transform_preserves_metrics() {
        let transform = MetricsTransform::default();
        assert_eq!(transform.advance_x(11), 11);
        assert_eq!(transform.top(-2), -2);
        assert_eq!(transform.advance_y(18), 18);
    }
}
