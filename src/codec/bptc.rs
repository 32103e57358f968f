//! BPTC: BC6H (half-float RGB) and BC7 (RGBA).
//!
//! Decoding covers every mode and goes through `bcdec_rs`. The encoders emit a
//! single mode each: BC7 mode 6 (one subset, 7-bit endpoints plus a shared
//! p-bit per endpoint, 4-bit indices) and BC6H mode 11 (one region, 10-bit
//! endpoints stored without deltas, 4-bit indices). Both pick endpoints at the
//! extremes of the block's principal axis.

use super::{read_block, write_block};
use crate::format::TextureCompressionInfo;
use crate::surface::RowsMut;

/// Interpolation weights for 4-bit indices, in 64ths.
const WEIGHTS: [i32; 16] = [0, 4, 9, 13, 17, 21, 26, 30, 34, 38, 43, 47, 51, 55, 60, 64];

const MAX_HALF: i32 = 0x7bff;

// ── Decode ──────────────────────────────────────────────────────────

fn decode_bc6h_block(output: &mut RowsMut<'_>, input: &[u8], signed: bool) {
    let mut rgb = [0f32; 48];
    bcdec_rs::bc6h_float(&input[..16], &mut rgb, 12, signed);
    let pixels: [[u8; 12]; 16] = core::array::from_fn(|i| {
        let mut px = [0u8; 12];
        for (c, bytes) in px.chunks_exact_mut(4).enumerate() {
            bytes.copy_from_slice(&rgb[i * 3 + c].to_ne_bytes());
        }
        px
    });
    write_block(output, &pixels, 4);
}

pub(crate) fn decode_bc6h(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    decode_bc6h_block(output, input, false);
}

pub(crate) fn decode_bc6h_signed(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    decode_bc6h_block(output, input, true);
}

pub(crate) fn decode_bc7(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    let mut rgba = [0u8; 64];
    bcdec_rs::bc7(&input[..16], &mut rgba, 16);
    let pixels: [[u8; 4]; 16] = core::array::from_fn(|i| {
        let mut px = [0u8; 4];
        px.copy_from_slice(&rgba[i * 4..i * 4 + 4]);
        px
    });
    write_block(output, &pixels, 4);
}

// ── Encode ──────────────────────────────────────────────────────────

/// Little-endian bit packer for one 128-bit block.
struct BitWriter {
    bits: u128,
    pos: u32,
}

impl BitWriter {
    fn new() -> Self {
        Self { bits: 0, pos: 0 }
    }

    fn put(&mut self, value: u32, count: u32) {
        let mask = (1u128 << count) - 1;
        self.bits |= (u128::from(value) & mask) << self.pos;
        self.pos += count;
    }

    fn finish(self, out: &mut [u8]) {
        out[..16].copy_from_slice(&self.bits.to_le_bytes());
    }
}

/// The two pixels at the ends of the block's principal axis.
fn principal_extremes<const N: usize>(pixels: &[[f32; N]; 16]) -> ([f32; N], [f32; N]) {
    let mut mean = [0f32; N];
    for px in pixels {
        for c in 0..N {
            mean[c] += px[c] / 16.0;
        }
    }
    let mut cov = [[0f32; N]; N];
    for px in pixels {
        for i in 0..N {
            for j in 0..N {
                cov[i][j] += (px[i] - mean[i]) * (px[j] - mean[j]);
            }
        }
    }
    // start on the channel with the largest variance
    let widest = (0..N).fold(0, |best, c| if cov[c][c] > cov[best][best] { c } else { best });
    let mut axis = [0f32; N];
    axis[widest] = 1.0;
    for _ in 0..8 {
        let mut next = [0f32; N];
        for i in 0..N {
            for j in 0..N {
                next[i] += cov[i][j] * axis[j];
            }
        }
        let norm = next.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm <= f32::EPSILON {
            break;
        }
        axis = next.map(|v| v / norm);
    }

    let project = |px: &[f32; N]| -> f32 { (0..N).map(|c| (px[c] - mean[c]) * axis[c]).sum() };
    let mut lo = (f32::INFINITY, pixels[0]);
    let mut hi = (f32::NEG_INFINITY, pixels[0]);
    for px in pixels {
        let t = project(px);
        if t < lo.0 {
            lo = (t, *px);
        }
        if t > hi.0 {
            hi = (t, *px);
        }
    }
    (lo.1, hi.1)
}

/// Index of the palette entry closest to `px` (squared distance).
fn nearest<const N: usize>(palette: &[[i32; N]; 16], px: &[i32; N]) -> u32 {
    let mut best = (i64::MAX, 0);
    for (i, entry) in palette.iter().enumerate() {
        let dist: i64 = (0..N)
            .map(|c| {
                let d = i64::from(entry[c] - px[c]);
                d * d
            })
            .sum();
        if dist < best.0 {
            best = (dist, i as u32);
        }
    }
    best.1
}

/// Indices for every pixel, with the anchor (pixel 0) forced below 8.
///
/// Returns `true` when the endpoints must be swapped to keep the anchor's
/// high bit clear.
fn assign_indices<const N: usize>(
    palette: &[[i32; N]; 16],
    pixels: &[[i32; N]; 16],
) -> ([u32; 16], bool) {
    let mut indices = pixels.map(|px| nearest(palette, &px));
    let swap = indices[0] >= 8;
    if swap {
        for idx in &mut indices {
            *idx = 15 - *idx;
        }
    }
    (indices, swap)
}

fn put_indices(writer: &mut BitWriter, indices: &[u32; 16]) {
    writer.put(indices[0], 3);
    for &idx in &indices[1..] {
        writer.put(idx, 4);
    }
}

/// Mode 6 endpoint: seven bits per channel plus one shared p-bit.
///
/// Alpha error outweighs the other three channels combined, so opaque
/// endpoints stay at 255.
fn quantize_bc7(color: [f32; 4]) -> ([u32; 4], u32) {
    const CHANNEL_WEIGHT: [i32; 4] = [1, 1, 1, 4];
    let target = color.map(|v| v.round().clamp(0.0, 255.0) as i32);
    let mut best = ([0u32; 4], 0u32, i32::MAX);
    for p in 0..2 {
        let q = target.map(|v| ((v - p + 1) >> 1).clamp(0, 127));
        let err: i32 = (0..4)
            .map(|c| ((q[c] << 1 | p) - target[c]).abs() * CHANNEL_WEIGHT[c])
            .sum();
        if err < best.2 {
            best = (q.map(|v| v as u32), p as u32, err);
        }
    }
    (best.0, best.1)
}

fn encode_bc7_block(pixels: &[[u8; 4]; 16], out: &mut [u8]) {
    let (lo, hi) = principal_extremes(&pixels.map(|px| px.map(f32::from)));
    let (mut e0, mut p0) = quantize_bc7(lo);
    let (mut e1, mut p1) = quantize_bc7(hi);

    let expand = |e: [u32; 4], p: u32| e.map(|v| (v << 1 | p) as i32);
    let (a, b) = (expand(e0, p0), expand(e1, p1));
    let palette: [[i32; 4]; 16] = core::array::from_fn(|i| {
        let w = WEIGHTS[i];
        core::array::from_fn(|c| (a[c] * (64 - w) + b[c] * w + 32) >> 6)
    });
    let (indices, swap) = assign_indices(&palette, &pixels.map(|px| px.map(i32::from)));
    if swap {
        core::mem::swap(&mut e0, &mut e1);
        core::mem::swap(&mut p0, &mut p1);
    }

    let mut writer = BitWriter::new();
    writer.put(1 << 6, 7);
    for c in 0..4 {
        writer.put(e0[c], 7);
        writer.put(e1[c], 7);
    }
    writer.put(p0, 1);
    writer.put(p1, 1);
    put_indices(&mut writer, &indices);
    writer.finish(out);
}

pub(crate) fn encode_bc7(_info: &TextureCompressionInfo, output: &mut [u8], input: &[u8], stride: usize) {
    let pixels: [[u8; 4]; 16] = read_block(input, stride, 4);
    encode_bc7_block(&pixels, output);
}

/// IEEE half-precision bits for `v`, rounded to nearest. NaN maps to zero.
fn to_half(v: f32) -> u16 {
    if v.is_nan() {
        return 0;
    }
    let bits = v.to_bits();
    let sign = ((bits >> 16) & 0x8000) as u16;
    let abs = v.abs();
    if abs >= 65520.0 {
        return sign | 0x7c00;
    }
    if abs < 1.0 / 16384.0 {
        // subnormal: abs = m * 2^-24
        return sign | (abs * 16_777_216.0).round() as u16;
    }
    let exp = ((bits >> 23) & 0xff) + 15 - 127;
    let mant = bits & 0x7f_ffff;
    let mut h = (exp << 10) | (mant >> 13);
    if mant & 0x1000 != 0 {
        h += 1;
    }
    sign | h as u16
}

/// Half bits as a signed magnitude, clamped to the finite range.
fn half_value(v: f32, signed: bool) -> i32 {
    let h = to_half(v);
    let magnitude = i32::from(h & 0x7fff).min(MAX_HALF);
    if h & 0x8000 == 0 {
        magnitude
    } else if signed {
        -magnitude
    } else {
        0
    }
}

/// 10-bit endpoint expanded to the 16-bit interpolation domain.
fn unquantize(e: i32, signed: bool) -> i32 {
    if !signed {
        return match e {
            0 => 0,
            1023 => 0xffff,
            _ => ((e << 16) + 0x8000) >> 10,
        };
    }
    let magnitude = match e.abs() {
        0 => 0,
        m if m >= 511 => 0x7fff,
        m => ((m << 15) + 0x4000) >> 9,
    };
    if e < 0 { -magnitude } else { magnitude }
}

/// Interpolated value scaled back to half bits (as a signed magnitude).
fn finish(v: i32, signed: bool) -> i32 {
    if !signed {
        (v * 31) >> 6
    } else if v < 0 {
        -(((-v) * 31) >> 5)
    } else {
        (v * 31) >> 5
    }
}

/// Closest 10-bit endpoint for a half value.
fn quantize_bc6h(h: i32, signed: bool) -> i32 {
    let (scale, lo, hi) = if signed { (62, -511, 511) } else { (31, 0, 1023) };
    let guess = (h + scale / 2).div_euclid(scale);
    (guess - 1..=guess + 1)
        .map(|e| e.clamp(lo, hi))
        .min_by_key(|&e| (finish(unquantize(e, signed), signed) - h).abs())
        .unwrap_or(guess.clamp(lo, hi))
}

fn encode_bc6h_block(pixels: &[[u8; 12]; 16], signed: bool, out: &mut [u8]) {
    let values: [[i32; 3]; 16] = pixels.map(|px| {
        core::array::from_fn(|c| {
            let v = f32::from_ne_bytes([px[c * 4], px[c * 4 + 1], px[c * 4 + 2], px[c * 4 + 3]]);
            half_value(v, signed)
        })
    });
    let (lo, hi) = principal_extremes(&values.map(|px| px.map(|v| v as f32)));
    let mut e0 = lo.map(|v| quantize_bc6h(v as i32, signed));
    let mut e1 = hi.map(|v| quantize_bc6h(v as i32, signed));

    let (a, b) = (e0.map(|e| unquantize(e, signed)), e1.map(|e| unquantize(e, signed)));
    let palette: [[i32; 3]; 16] = core::array::from_fn(|i| {
        let w = WEIGHTS[i];
        core::array::from_fn(|c| finish((a[c] * (64 - w) + b[c] * w + 32) >> 6, signed))
    });
    let (indices, swap) = assign_indices(&palette, &values);
    if swap {
        core::mem::swap(&mut e0, &mut e1);
    }

    let mut writer = BitWriter::new();
    writer.put(0b00011, 5);
    for e in e0.iter().chain(&e1) {
        writer.put(*e as u32, 10);
    }
    put_indices(&mut writer, &indices);
    writer.finish(out);
}

pub(crate) fn encode_bc6h(_info: &TextureCompressionInfo, output: &mut [u8], input: &[u8], stride: usize) {
    let pixels: [[u8; 12]; 16] = read_block(input, stride, 4);
    encode_bc6h_block(&pixels, false, output);
}

pub(crate) fn encode_bc6h_signed(
    _info: &TextureCompressionInfo,
    output: &mut [u8],
    input: &[u8],
    stride: usize,
) {
    let pixels: [[u8; 12]; 16] = read_block(input, stride, 4);
    encode_bc6h_block(&pixels, true, output);
}
