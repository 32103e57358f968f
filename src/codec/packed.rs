//! Packed-pixel formats: shared-exponent and small-float RGB (1x1 blocks) and
//! 4:2:2 formats (2x1 blocks of 4 bytes).

use crate::codec::write_block;
use crate::format::TextureCompressionInfo;
use crate::surface::RowsMut;

fn word(input: &[u8]) -> u32 {
    u32::from_le_bytes([input[0], input[1], input[2], input[3]])
}

fn rgba_f32(rgb: [f32; 3]) -> [[u8; 16]; 1] {
    let mut px = [0u8; 16];
    for (i, v) in [rgb[0], rgb[1], rgb[2], 1.0].into_iter().enumerate() {
        px[i * 4..i * 4 + 4].copy_from_slice(&v.to_ne_bytes());
    }
    [px]
}

/// Unsigned float with a 5-bit exponent (bias 15) and `mantissa_bits` of mantissa.
fn small_float(bits: u32, mantissa_bits: u32) -> f32 {
    let mantissa = bits & ((1 << mantissa_bits) - 1);
    let exponent = (bits >> mantissa_bits) & 0x1f;
    let scale = (1u32 << mantissa_bits) as f32;
    match exponent {
        0 => mantissa as f32 / scale * 2f32.powi(-14),
        31 if mantissa == 0 => f32::INFINITY,
        31 => f32::NAN,
        e => (1.0 + mantissa as f32 / scale) * 2f32.powi(e as i32 - 15),
    }
}

pub(crate) fn decode_rgb9e5(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    let v = word(input);
    let scale = 2f32.powi((v >> 27) as i32 - 15 - 9);
    let channel = |shift: u32| ((v >> shift) & 0x1ff) as f32 * scale;
    write_block(output, &rgba_f32([channel(0), channel(9), channel(18)]), 1);
}

pub(crate) fn decode_r11f_g11f_b10f(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    let v = word(input);
    let rgb = [
        small_float(v & 0x7ff, 6),
        small_float((v >> 11) & 0x7ff, 6),
        small_float(v >> 22, 5),
    ];
    write_block(output, &rgba_f32(rgb), 1);
}

pub(crate) fn decode_r10f_g11f_b11f(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    let v = word(input);
    let rgb = [
        small_float(v & 0x3ff, 5),
        small_float((v >> 10) & 0x7ff, 6),
        small_float(v >> 21, 6),
    ];
    write_block(output, &rgba_f32(rgb), 1);
}

/// Two pixels sharing red and blue, each with its own green.
fn shared_rb(r: u8, g0: u8, g1: u8, b: u8) -> [[u8; 4]; 2] {
    [[r, g0, b, 255], [r, g1, b, 255]]
}

pub(crate) fn decode_grgb8(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    write_block(output, &shared_rb(input[1], input[0], input[2], input[3]), 2);
}

pub(crate) fn decode_rgbg8(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    write_block(output, &shared_rb(input[0], input[1], input[3], input[2]), 2);
}

/// BT.601 limited-range YUV to RGB.
fn yuv(y: u8, u: u8, v: u8) -> [u8; 4] {
    let c = 298 * (i32::from(y) - 16);
    let d = i32::from(u) - 128;
    let e = i32::from(v) - 128;
    let ch = |x: i32| ((x + 128) >> 8).clamp(0, 255) as u8;
    [ch(c + 409 * e), ch(c - 100 * d - 208 * e), ch(c + 516 * d), 255]
}

pub(crate) fn decode_uyvy(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    let (u, y0, v, y1) = (input[0], input[1], input[2], input[3]);
    write_block(output, &[yuv(y0, u, v), yuv(y1, u, v)], 2);
}

pub(crate) fn decode_yuy2(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    let (y0, u, y1, v) = (input[0], input[1], input[2], input[3]);
    write_block(output, &[yuv(y0, u, v), yuv(y1, u, v)], 2);
}
