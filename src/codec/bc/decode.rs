use super::{alpha_indices, alpha_palette, alpha_palette_signed, color_palette};
use crate::codec::write_block;
use crate::format::TextureCompressionInfo;
use crate::surface::RowsMut;

fn color_block(block: &[u8], three_color: bool) -> [[u8; 4]; 16] {
    let c0 = u16::from_le_bytes([block[0], block[1]]);
    let c1 = u16::from_le_bytes([block[2], block[3]]);
    let palette = color_palette(c0, c1, three_color);
    let indices = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
    core::array::from_fn(|i| palette[((indices >> (2 * i)) & 3) as usize])
}

/// Values of a BC3 alpha / BC4 red block.
pub(crate) fn interpolated_alpha(block: &[u8]) -> [u8; 16] {
    let palette = alpha_palette(block[0], block[1]);
    alpha_indices(block).map(|i| palette[i])
}

fn red_block_signed(block: &[u8]) -> [i8; 16] {
    let palette = alpha_palette_signed(block[0] as i8, block[1] as i8);
    alpha_indices(block).map(|i| palette[i])
}

/// BC1, including the 1-bit alpha mode.
pub(crate) fn decode_bc1(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    write_block(output, &color_block(&input[..8], true), 4);
}

/// Values of a BC2 alpha block: 4 bits per pixel, low nibble first.
pub(crate) fn explicit_alpha(block: &[u8]) -> [u8; 16] {
    core::array::from_fn(|i| ((block[i / 2] >> (4 * (i & 1))) & 0x0f) * 17)
}

pub(crate) fn decode_bc2(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    let mut pixels = color_block(&input[8..16], false);
    for (px, a) in pixels.iter_mut().zip(explicit_alpha(&input[..8])) {
        px[3] = a;
    }
    write_block(output, &pixels, 4);
}

/// BC3: interpolated alpha block followed by a colour block.
pub(crate) fn decode_bc3(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    let mut pixels = color_block(&input[8..16], false);
    let alpha = interpolated_alpha(&input[..8]);
    for (px, a) in pixels.iter_mut().zip(alpha) {
        px[3] = a;
    }
    write_block(output, &pixels, 4);
}

pub(crate) fn decode_bc4(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    let pixels = interpolated_alpha(&input[..8]).map(|r| [r]);
    write_block(output, &pixels, 4);
}

pub(crate) fn decode_bc4_signed(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    let pixels = red_block_signed(&input[..8]).map(|r| [r as u8]);
    write_block(output, &pixels, 4);
}

pub(crate) fn decode_bc5(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    let red = interpolated_alpha(&input[..8]);
    let green = interpolated_alpha(&input[8..16]);
    let pixels: [[u8; 2]; 16] = core::array::from_fn(|i| [red[i], green[i]]);
    write_block(output, &pixels, 4);
}

pub(crate) fn decode_bc5_signed(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    let red = red_block_signed(&input[..8]);
    let green = red_block_signed(&input[8..16]);
    let pixels: [[u8; 2]; 16] = core::array::from_fn(|i| [red[i] as u8, green[i] as u8]);
    write_block(output, &pixels, 4);
}
