//! AMD ATC (ATI texture compression).
//!
//! The colour block is BC1-shaped, but the first endpoint is RGB555 with its
//! top bit selecting the palette mode. Output is BGRA.

use crate::codec::bc::{explicit_alpha, interpolated_alpha};
use crate::codec::write_block;
use crate::format::TextureCompressionInfo;
use crate::surface::RowsMut;

fn color_block(block: &[u8]) -> [[u8; 4]; 16] {
    let c0 = u16::from_le_bytes([block[0], block[1]]);
    let c1 = u16::from_le_bytes([block[2], block[3]]);

    let r0 = (c0 >> 10) & 0x1f;
    let g0 = (c0 >> 5) & 0x1f;
    let b0 = c0 & 0x1f;
    let e0 = [(r0 << 3) | (r0 >> 2), (g0 << 3) | (g0 >> 2), (b0 << 3) | (b0 >> 2)];

    let r1 = (c1 >> 11) & 0x1f;
    let g1 = (c1 >> 5) & 0x3f;
    let b1 = c1 & 0x1f;
    let e1 = [(r1 << 3) | (r1 >> 2), (g1 << 2) | (g1 >> 4), (b1 << 3) | (b1 >> 2)];

    let mix = |f: fn(u16, u16) -> u16| -> [u8; 3] { core::array::from_fn(|c| f(e0[c], e1[c]) as u8) };
    let palette = if c0 & 0x8000 == 0 {
        [
            mix(|a, _| a),
            mix(|a, b| (2 * a + b) / 3),
            mix(|a, b| (a + 2 * b) / 3),
            mix(|_, b| b),
        ]
    } else {
        [
            [0; 3],
            mix(|a, b| a.saturating_sub(b / 4)),
            mix(|a, _| a),
            mix(|_, b| b),
        ]
    };

    let indices = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
    core::array::from_fn(|i| {
        let [r, g, b] = palette[((indices >> (2 * i)) & 3) as usize];
        [b, g, r, 255]
    })
}

pub(crate) fn decode_atc(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    write_block(output, &color_block(&input[..8]), 4);
}

pub(crate) fn decode_atc_explicit_alpha(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    let mut pixels = color_block(&input[8..16]);
    for (px, a) in pixels.iter_mut().zip(explicit_alpha(&input[..8])) {
        px[3] = a;
    }
    write_block(output, &pixels, 4);
}

pub(crate) fn decode_atc_interpolated_alpha(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    let mut pixels = color_block(&input[8..16]);
    for (px, a) in pixels.iter_mut().zip(interpolated_alpha(&input[..8])) {
        px[3] = a;
    }
    write_block(output, &pixels, 4);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolated_mode_writes_bgra() {
        // c0 = pure red (555), c1 = black, all indices 0
        let block = [0x00, 0x7c, 0x00, 0x00, 0, 0, 0, 0];
        let px = color_block(&block);
        assert_eq!(px[0], [0, 0, 255, 255]);
    }

    #[test]
    fn mode_bit_selects_black_first_entry() {
        // mode bit set, every index 0
        let block = [0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0];
        let px = color_block(&block);
        assert!(px.iter().all(|p| *p == [0, 0, 0, 255]));
    }
}
