//! Single-pass BCn encoders.
//!
//! Colour endpoints come from the principal axis of the block's RGB values;
//! alpha/red endpoints (signed or not) are the block minimum and maximum.

use super::{alpha_palette, alpha_palette_signed, color_palette, pack_565};
use crate::codec::read_block;
use crate::format::TextureCompressionInfo;

fn principal_endpoints(pixels: &[[u8; 4]; 16], mask: &[bool; 16]) -> ([u8; 3], [u8; 3]) {
    let selected = || pixels.iter().zip(mask).filter(|(_, m)| **m).map(|(px, _)| px);
    let count = selected().count();
    if count == 0 {
        return ([0; 3], [0; 3]);
    }

    let mut mean = [0f32; 3];
    let mut min = [255u8; 3];
    let mut max = [0u8; 3];
    for px in selected() {
        for c in 0..3 {
            mean[c] += f32::from(px[c]);
            min[c] = min[c].min(px[c]);
            max[c] = max[c].max(px[c]);
        }
    }
    mean = mean.map(|m| m / count as f32);

    // rr rg rb gg gb bb
    let mut cov = [0f32; 6];
    for px in selected() {
        let d: [f32; 3] = core::array::from_fn(|c| f32::from(px[c]) - mean[c]);
        cov[0] += d[0] * d[0];
        cov[1] += d[0] * d[1];
        cov[2] += d[0] * d[2];
        cov[3] += d[1] * d[1];
        cov[4] += d[1] * d[2];
        cov[5] += d[2] * d[2];
    }

    let mut axis: [f32; 3] = core::array::from_fn(|c| f32::from(max[c]) - f32::from(min[c]));
    for _ in 0..8 {
        let v = [
            cov[0] * axis[0] + cov[1] * axis[1] + cov[2] * axis[2],
            cov[1] * axis[0] + cov[3] * axis[1] + cov[4] * axis[2],
            cov[2] * axis[0] + cov[4] * axis[1] + cov[5] * axis[2],
        ];
        let norm = v.iter().fold(0f32, |m, x| m.max(x.abs()));
        if norm < 1e-6 {
            break;
        }
        axis = v.map(|x| x / norm);
    }

    let len2 = axis.iter().map(|a| a * a).sum::<f32>();
    if len2 < 1e-12 {
        let m = mean.map(|m| m.round() as u8);
        return (m, m);
    }
    let (mut lo, mut hi) = (f32::MAX, f32::MIN);
    for px in selected() {
        let t: f32 = (0..3).map(|c| (f32::from(px[c]) - mean[c]) * axis[c]).sum();
        lo = lo.min(t);
        hi = hi.max(t);
    }
    let endpoint = |t: f32| -> [u8; 3] {
        core::array::from_fn(|c| (mean[c] + axis[c] * t / len2).round().clamp(0.0, 255.0) as u8)
    };
    (endpoint(hi), endpoint(lo))
}

fn nearest(palette: &[[u8; 4]], px: &[u8; 4]) -> u32 {
    let dist = |p: &[u8; 4]| -> i32 {
        (0..3)
            .map(|c| {
                let d = i32::from(p[c]) - i32::from(px[c]);
                d * d
            })
            .sum()
    };
    let mut best = 0;
    for (i, p) in palette.iter().enumerate().skip(1) {
        if dist(p) < dist(&palette[best]) {
            best = i;
        }
    }
    best as u32
}

/// Encode the colour half of a block. With `alpha_mode`, pixels below half
/// alpha are coded as transparent black using the three-colour mode.
fn encode_color(pixels: &[[u8; 4]; 16], alpha_mode: bool, out: &mut [u8]) {
    let transparent = pixels.map(|px| alpha_mode && px[3] < 128);
    let three = transparent.iter().any(|&t| t);
    let (hi, lo) = principal_endpoints(pixels, &transparent.map(|t| !t));
    let (mut c0, mut c1) = (pack_565(hi), pack_565(lo));
    if (three && c0 > c1) || (!three && c0 < c1) {
        core::mem::swap(&mut c0, &mut c1);
    }

    let mut indices = 0u32;
    if c0 != c1 || three {
        let palette = color_palette(c0, c1, three);
        let usable = if three { &palette[..3] } else { &palette[..] };
        for (i, px) in pixels.iter().enumerate() {
            let idx = if transparent[i] { 3 } else { nearest(usable, px) };
            indices |= idx << (2 * i);
        }
    }

    out[0..2].copy_from_slice(&c0.to_le_bytes());
    out[2..4].copy_from_slice(&c1.to_le_bytes());
    out[4..8].copy_from_slice(&indices.to_le_bytes());
}

fn encode_alpha(values: &[u8; 16], out: &mut [u8]) {
    let hi = values.iter().copied().max().unwrap_or(0);
    let lo = values.iter().copied().min().unwrap_or(0);
    let mut bits = 0u64;
    if hi > lo {
        let palette = alpha_palette(hi, lo);
        for (i, &v) in values.iter().enumerate() {
            let idx = (0..8)
                .min_by_key(|&j| (i32::from(palette[j]) - i32::from(v)).abs())
                .unwrap_or(0);
            bits |= (idx as u64) << (3 * i);
        }
    }
    out[0] = hi;
    out[1] = lo;
    out[2..8].copy_from_slice(&bits.to_le_bytes()[..6]);
}

/// Signed red block. Endpoints stay at or above -127 and `hi > lo` selects
/// the eight-value palette.
fn encode_alpha_signed(values: &[i8; 16], out: &mut [u8]) {
    let hi = values.iter().copied().max().unwrap_or(0).max(-127);
    let lo = values.iter().copied().min().unwrap_or(0).max(-127);
    let mut bits = 0u64;
    if hi > lo {
        let palette = alpha_palette_signed(hi, lo);
        for (i, &v) in values.iter().enumerate() {
            let idx = (0..8)
                .min_by_key(|&j| (i32::from(palette[j]) - i32::from(v)).abs())
                .unwrap_or(0);
            bits |= (idx as u64) << (3 * i);
        }
    }
    out[0] = hi as u8;
    out[1] = lo as u8;
    out[2..8].copy_from_slice(&bits.to_le_bytes()[..6]);
}

pub(crate) fn encode_bc1(_info: &TextureCompressionInfo, output: &mut [u8], input: &[u8], stride: usize) {
    let pixels: [[u8; 4]; 16] = read_block(input, stride, 4);
    encode_color(&pixels, false, &mut output[..8]);
}

pub(crate) fn encode_bc1_alpha(
    _info: &TextureCompressionInfo,
    output: &mut [u8],
    input: &[u8],
    stride: usize,
) {
    let pixels: [[u8; 4]; 16] = read_block(input, stride, 4);
    encode_color(&pixels, true, &mut output[..8]);
}

pub(crate) fn encode_bc2(_info: &TextureCompressionInfo, output: &mut [u8], input: &[u8], stride: usize) {
    let pixels: [[u8; 4]; 16] = read_block(input, stride, 4);
    output[..8].fill(0);
    for (i, px) in pixels.iter().enumerate() {
        let nibble = ((u16::from(px[3]) * 15 + 127) / 255) as u8;
        output[i / 2] |= nibble << (4 * (i & 1));
    }
    encode_color(&pixels, false, &mut output[8..16]);
}

pub(crate) fn encode_bc3(_info: &TextureCompressionInfo, output: &mut [u8], input: &[u8], stride: usize) {
    let pixels: [[u8; 4]; 16] = read_block(input, stride, 4);
    encode_alpha(&pixels.map(|px| px[3]), &mut output[..8]);
    encode_color(&pixels, false, &mut output[8..16]);
}

pub(crate) fn encode_bc4(_info: &TextureCompressionInfo, output: &mut [u8], input: &[u8], stride: usize) {
    let pixels: [[u8; 1]; 16] = read_block(input, stride, 4);
    encode_alpha(&pixels.map(|px| px[0]), &mut output[..8]);
}

pub(crate) fn encode_bc5(_info: &TextureCompressionInfo, output: &mut [u8], input: &[u8], stride: usize) {
    let pixels: [[u8; 2]; 16] = read_block(input, stride, 4);
    encode_alpha(&pixels.map(|px| px[0]), &mut output[..8]);
    encode_alpha(&pixels.map(|px| px[1]), &mut output[8..16]);
}

pub(crate) fn encode_bc4_signed(
    _info: &TextureCompressionInfo,
    output: &mut [u8],
    input: &[u8],
    stride: usize,
) {
    let pixels: [[u8; 1]; 16] = read_block(input, stride, 4);
    encode_alpha_signed(&pixels.map(|px| px[0] as i8), &mut output[..8]);
}

pub(crate) fn encode_bc5_signed(
    _info: &TextureCompressionInfo,
    output: &mut [u8],
    input: &[u8],
    stride: usize,
) {
    let pixels: [[u8; 2]; 16] = read_block(input, stride, 4);
    encode_alpha_signed(&pixels.map(|px| px[0] as i8), &mut output[..8]);
    encode_alpha_signed(&pixels.map(|px| px[1] as i8), &mut output[8..16]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_block_uses_single_endpoint() {
        let pixels = [[40u8, 80, 120, 255]; 16];
        let mut out = [0u8; 8];
        encode_color(&pixels, false, &mut out);
        assert_eq!(out[0..2], out[2..4]);
        assert_eq!(&out[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn opaque_endpoints_are_ordered_for_four_color_mode() {
        let pixels: [[u8; 4]; 16] = core::array::from_fn(|i| {
            let v = (i * 16) as u8;
            [v, v, v, 255]
        });
        let mut out = [0u8; 8];
        encode_color(&pixels, false, &mut out);
        let c0 = u16::from_le_bytes([out[0], out[1]]);
        let c1 = u16::from_le_bytes([out[2], out[3]]);
        assert!(c0 > c1);
    }

    #[test]
    fn transparent_pixels_get_index_three() {
        let mut pixels = [[200u8, 10, 10, 255]; 16];
        pixels[5] = [0, 0, 0, 0];
        let mut out = [0u8; 8];
        encode_color(&pixels, true, &mut out);
        let c0 = u16::from_le_bytes([out[0], out[1]]);
        let c1 = u16::from_le_bytes([out[2], out[3]]);
        assert!(c0 <= c1);
        let indices = u32::from_le_bytes([out[4], out[5], out[6], out[7]]);
        assert_eq!((indices >> 10) & 3, 3);
        assert_ne!(indices & 3, 3);
    }

    #[test]
    fn alpha_block_hits_endpoints_exactly() {
        let mut values = [128u8; 16];
        values[0] = 0;
        values[15] = 255;
        let mut out = [0u8; 8];
        encode_alpha(&values, &mut out);
        assert_eq!((out[0], out[1]), (255, 0));
        let mut bits = [0u8; 8];
        bits[..6].copy_from_slice(&out[2..8]);
        let bits = u64::from_le_bytes(bits);
        assert_eq!(bits & 7, 1);
        assert_eq!((bits >> 45) & 7, 0);
    }

    #[test]
    fn signed_block_clamps_minus_128() {
        let mut values = [0i8; 16];
        values[0] = -128;
        values[1] = 100;
        let mut out = [0u8; 8];
        encode_alpha_signed(&values, &mut out);
        assert_eq!((out[0] as i8, out[1] as i8), (100, -127));
        let mut bits = [0u8; 8];
        bits[..6].copy_from_slice(&out[2..8]);
        let bits = u64::from_le_bytes(bits);
        assert_eq!(bits & 7, 1);
        assert_eq!((bits >> 3) & 7, 0);
    }
}
