//! Quantizing 8-bit coverage bitmaps into packed 1-bit or 2-bit rasters.
//!
//! Packing happens in two steps. The coverage buffer is first reduced to 4
//! bits per pixel, two pixels per byte: the even column's high 4 bits land
//! in the low nibble, its right neighbour's in the high nibble, with an odd
//! trailing column packed against a zero partner. The intermediate buffer
//! is then thresholded down to the final depth, emitting pixels MSB first
//! in raster order with no per-row realignment.
//!
//! The 1-bit on/off test masks the intermediate byte with `0x0E` for even
//! columns and `0xE0` for odd columns. The masks mirror the nibble order of
//! the first step and are part of the binding output format; readers expect
//! bit-identical data, so they are reproduced exactly rather than
//! simplified.

/// Output bit depth of the packed raster data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BitDepth {
    /// One bit per pixel, black and white.
    #[default]
    One,
    /// Two bits per pixel, four grey levels.
    Two,
}

impl BitDepth {
    /// The exact packed byte count for a `width x height` glyph.
    pub fn packed_len(self, width: u32, height: u32) -> usize {
        let pixels = width as usize * height as usize;
        match self {
            BitDepth::One => pixels.div_ceil(8),
            BitDepth::Two => pixels.div_ceil(4),
        }
    }
}

/// Pack a row major 8-bit coverage bitmap into its final raster format.
///
/// The result holds exactly [`BitDepth::packed_len`] bytes; the last
/// partial byte, if any, is left shifted so padding occupies the low bits.
/// Zero-area bitmaps pack to an empty vector.
pub fn pack_bitmap(coverage: &[u8], width: u32, height: u32, depth: BitDepth) -> Vec<u8> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    debug_assert_eq!(coverage.len(), width as usize * height as usize);
    let gray4 = to_gray4(coverage, width);
    match depth {
        BitDepth::One => pack_1bit(&gray4, width, height),
        BitDepth::Two => pack_2bit(&gray4, width, height),
    }
}

/// Reduce 8-bit coverage to 4 bits per pixel, two pixels per byte.
///
/// Row pitch of the result is `ceil(width / 2)` bytes.
fn to_gray4(coverage: &[u8], width: u32) -> Vec<u8> {
    let width = width as usize;
    let mut out = Vec::with_capacity(coverage.len().div_ceil(2));
    for row in coverage.chunks(width) {
        for pair in row.chunks(2) {
            let even = pair[0] >> 4;
            let odd = pair.get(1).copied().unwrap_or(0) & 0xF0;
            out.push(even | odd);
        }
    }
    out
}

fn pack_1bit(gray4: &[u8], width: u32, height: u32) -> Vec<u8> {
    let (width, height) = (width as usize, height as usize);
    let pitch = width.div_ceil(2);
    let mut out = Vec::with_capacity((width * height).div_ceil(8));
    let mut acc = 0u8;
    let mut filled = 0u32;
    for y in 0..height {
        for x in 0..width {
            let byte = gray4[y * pitch + x / 2];
            let on = if x % 2 == 0 {
                byte & 0x0E != 0
            } else {
                byte & 0xE0 != 0
            };
            acc = (acc << 1) | on as u8;
            filled += 1;
            if filled == 8 {
                out.push(acc);
                acc = 0;
                filled = 0;
            }
        }
    }
    if filled > 0 {
        out.push(acc << (8 - filled));
    }
    out
}

fn pack_2bit(gray4: &[u8], width: u32, height: u32) -> Vec<u8> {
    let (width, height) = (width as usize, height as usize);
    let pitch = width.div_ceil(2);
    let mut out = Vec::with_capacity((width * height).div_ceil(4));
    let mut acc = 0u8;
    let mut filled = 0u32;
    for y in 0..height {
        for x in 0..width {
            let value = (gray4[y * pitch + x / 2] >> ((x % 2) * 4)) & 0xF;
            let level = match value {
                12.. => 3,
                8.. => 2,
                4.. => 1,
                _ => 0,
            };
            acc = (acc << 2) | level;
            filled += 2;
            if filled == 8 {
                out.push(acc);
                acc = 0;
                filled = 0;
            }
        }
    }
    if filled > 0 {
        out.push(acc << (8 - filled));
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn gray4_packs_pairs_low_nibble_first() {
        // 0xAB and 0xCD reduce to nibbles 0xA and 0xC; the even column
        // takes the low nibble.
        assert_eq!(to_gray4(&[0xAB, 0xCD], 2), vec![0xCA]);
    }

    #[test]
    fn gray4_odd_width_pads_high_nibble() {
        assert_eq!(to_gray4(&[0xFF, 0xFF, 0xFF], 3), vec![0xFF, 0x0F]);
        // Two rows of width 3: pitch is 2, the pad nibble sits per row.
        assert_eq!(
            to_gray4(&[0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00], 3),
            vec![0x0F, 0x0F, 0xF0, 0x00]
        );
    }

    #[test]
    fn one_bit_full_coverage_sets_all_bits() {
        let coverage = [0xFF; 8];
        assert_eq!(pack_bitmap(&coverage, 4, 2, BitDepth::One), vec![0xFF]);
    }

    #[test]
    fn one_bit_pads_final_byte_with_low_zeros() {
        // 3x1 opaque: bits 111 shifted into the high end of the byte.
        assert_eq!(pack_bitmap(&[0xFF; 3], 3, 1, BitDepth::One), vec![0xE0]);
    }

    #[test]
    fn one_bit_threshold_matches_nibble_masks() {
        // Intermediate 4-bit values 0 and 1 are off, 2 and up are on,
        // regardless of column parity.
        let coverage = [0x00, 0x1F, 0x2F, 0xFF];
        assert_eq!(pack_bitmap(&coverage, 4, 1, BitDepth::One), vec![0x30]);
        let coverage = [0x2F, 0x1F, 0x00, 0xFF];
        assert_eq!(pack_bitmap(&coverage, 4, 1, BitDepth::One), vec![0x90]);
    }

    #[test]
    fn one_bit_rows_are_not_realigned() {
        // 3x3 opaque = 9 pixels: one full byte then a single bit.
        let packed = pack_bitmap(&[0xFF; 9], 3, 3, BitDepth::One);
        assert_eq!(packed, vec![0xFF, 0x80]);
    }

    #[test]
    fn two_bit_thresholds() {
        // Coverage high nibbles 0, 4, 8, 12 map to levels 0, 1, 2, 3.
        let coverage = [0x00, 0x40, 0x80, 0xC0];
        assert_eq!(pack_bitmap(&coverage, 4, 1, BitDepth::Two), vec![0x1B]);
        assert_eq!(pack_bitmap(&[0xFF; 4], 4, 1, BitDepth::Two), vec![0xFF]);
    }

    #[test]
    fn two_bit_pads_final_byte() {
        // 3 opaque pixels: levels 3,3,3 then 2 bits of padding.
        assert_eq!(pack_bitmap(&[0xFF; 3], 3, 1, BitDepth::Two), vec![0xFC]);
    }

    #[test]
    fn packed_lengths() {
        assert_eq!(BitDepth::One.packed_len(4, 2), 1);
        assert_eq!(BitDepth::One.packed_len(3, 3), 2);
        assert_eq!(BitDepth::One.packed_len(16, 16), 32);
        assert_eq!(BitDepth::Two.packed_len(4, 1), 1);
        assert_eq!(BitDepth::Two.packed_len(3, 3), 3);
        assert_eq!(BitDepth::Two.packed_len(16, 16), 64);
        for (w, h) in [(1u32, 1u32), (5, 7), (8, 8), (13, 2)] {
            let coverage = vec![0x80; (w * h) as usize];
            for depth in [BitDepth::One, BitDepth::Two] {
                let packed = pack_bitmap(&coverage, w, h, depth);
                assert_eq!(packed.len(), depth.packed_len(w, h), "{w}x{h} {depth:?}");
            }
        }
    }

    #[test]
    fn zero_area_packs_to_nothing() {
        assert_eq!(pack_bitmap(&[], 0, 5, BitDepth::One), Vec::<u8>::new());
        assert_eq!(pack_bitmap(&[], 5, 0, BitDepth::Two), Vec::<u8>::new());
        assert_eq!(BitDepth::One.packed_len(0, 5), 0);
    }
}
