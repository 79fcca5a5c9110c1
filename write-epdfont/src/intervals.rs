//! Computing the Unicode code point intervals present in a font.
//!
//! Candidate intervals (built-in script coverage plus any caller supplied
//! extras) are merged into a minimal sorted set, then validated against a
//! [`GlyphSource`]: code points no face can render split their interval, so
//! the final set covers exactly the renderable code points.

use std::str::FromStr;

use crate::source::GlyphSource;

/// An inclusive range of Unicode code points.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePointInterval {
    /// First code point in the interval.
    pub start: u32,
    /// Last code point in the interval, inclusive.
    pub end: u32,
}

impl CodePointInterval {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The number of code points covered, counting both endpoints.
    pub fn code_point_count(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Iterate the covered code points in ascending order.
    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl std::fmt::Display for CodePointInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06X},{:#06X}", self.start, self.end)
    }
}

/// An interval string could not be parsed.
///
/// Interval strings have the form `MIN,MAX` where each bound is decimal or
/// `0x` hexadecimal and `MIN <= MAX`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseIntervalError(String);

impl std::fmt::Display for ParseIntervalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid interval '{}' (expected MIN,MAX in decimal or 0x hex)",
            self.0
        )
    }
}

impl std::error::Error for ParseIntervalError {}

impl FromStr for CodePointInterval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIntervalError(s.to_owned());
        let (start, end) = s.split_once(',').ok_or_else(err)?;
        let start = parse_code_point(start.trim()).ok_or_else(err)?;
        let end = parse_code_point(end.trim()).ok_or_else(err)?;
        if start > end {
            return Err(err());
        }
        Ok(CodePointInterval::new(start, end))
    }
}

fn parse_code_point(s: &str) -> Option<u32> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}

/// Script coverage requested for every font.
const DEFAULT_INTERVALS: &[CodePointInterval] = &[
    // Basic Latin
    CodePointInterval::new(0x0000, 0x007F),
    // Latin-1 Supplement
    CodePointInterval::new(0x0080, 0x00FF),
    // Latin Extended-A
    CodePointInterval::new(0x0100, 0x017F),
    // General Punctuation
    CodePointInterval::new(0x2000, 0x206F),
    // Basic symbols
    CodePointInterval::new(0x2010, 0x203A),
    CodePointInterval::new(0x2040, 0x205F),
    // Currency Symbols
    CodePointInterval::new(0x20A0, 0x20CF),
    // Combining Diacritical Marks
    CodePointInterval::new(0x0300, 0x036F),
    // Cyrillic
    CodePointInterval::new(0x0400, 0x04FF),
    // Mathematical Operators
    CodePointInterval::new(0x2200, 0x22FF),
    // Arrows
    CodePointInterval::new(0x2190, 0x21FF),
];

/// Hangul coverage, added when the font name suggests a Korean font.
const KOREAN_INTERVALS: &[CodePointInterval] = &[
    // Hangul Syllables
    CodePointInterval::new(0xAC00, 0xD7AF),
    // Hangul Jamo
    CodePointInterval::new(0x1100, 0x11FF),
    // Hangul Compatibility Jamo
    CodePointInterval::new(0x3130, 0x318F),
    // CJK Symbols and Punctuation
    CodePointInterval::new(0x3000, 0x303F),
];

/// The built-in candidate intervals for a font with the given name.
///
/// Korean coverage is included when the name contains a Hangul related tag.
pub fn default_intervals(font_name: &str) -> Vec<CodePointInterval> {
    let mut intervals = DEFAULT_INTERVALS.to_vec();
    let name = font_name.to_ascii_lowercase();
    if ["hangul", "korean", "hangeuljaemin"]
        .iter()
        .any(|tag| name.contains(tag))
    {
        intervals.extend_from_slice(KOREAN_INTERVALS);
    }
    intervals
}

/// Merge candidate intervals into a minimal sorted covering set.
///
/// Inputs may be unsorted and overlapping. Adjacent intervals (a gap of
/// zero code points between them) are coalesced, so the result is the
/// smallest set of sorted, non-overlapping intervals covering the same
/// code points. Merging an already merged set is a no-op.
pub fn merge_intervals(mut candidates: Vec<CodePointInterval>) -> Vec<CodePointInterval> {
    candidates.sort();
    let mut merged: Vec<CodePointInterval> = Vec::new();
    for next in candidates {
        match merged.last_mut() {
            Some(prev) if next.start <= prev.end.saturating_add(1) => {
                prev.end = prev.end.max(next.end);
            }
            _ => merged.push(next),
        }
    }
    merged
}

/// Drop the code points `source` cannot render, splitting intervals around
/// them.
///
/// Every code point in the returned intervals is guaranteed to resolve.
/// Unresolvable code points are excluded silently; an empty result is a
/// valid outcome, not an error.
pub fn validate_intervals(
    merged: &[CodePointInterval],
    source: &mut dyn GlyphSource,
) -> Vec<CodePointInterval> {
    let mut validated = Vec::new();
    for interval in merged {
        let mut start = interval.start;
        for code_point in interval.iter() {
            if source.resolve(code_point).is_none() {
                log::debug!("no face covers {code_point:#06x}, skipping");
                if start < code_point {
                    validated.push(CodePointInterval::new(start, code_point - 1));
                }
                start = code_point + 1;
            }
        }
        if start <= interval.end {
            validated.push(CodePointInterval::new(start, interval.end));
        }
    }
    validated
}
