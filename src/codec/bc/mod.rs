//! BC1-BC5 (DXT1/3/5, RGTC/3DC).
//!
//! Colour blocks are two RGB565 endpoints plus sixteen 2-bit indices; alpha and
//! single-channel blocks are two 8-bit endpoints plus sixteen 3-bit indices.
//! All multi-byte fields are little-endian.

mod decode;
mod encode;

pub(crate) use decode::{
    decode_bc1, decode_bc2, decode_bc3, decode_bc4, decode_bc4_signed, decode_bc5,
    decode_bc5_signed, explicit_alpha, interpolated_alpha,
};
pub(crate) use encode::{
    encode_bc1, encode_bc1_alpha, encode_bc2, encode_bc3, encode_bc4, encode_bc4_signed, encode_bc5,
    encode_bc5_signed,
};

/// Expand an RGB565 value to 8 bits per channel.
fn unpack_565(c: u16) -> [u8; 3] {
    let r = (c >> 11) & 0x1f;
    let g = (c >> 5) & 0x3f;
    let b = c & 0x1f;
    [
        ((r << 3) | (r >> 2)) as u8,
        ((g << 2) | (g >> 4)) as u8,
        ((b << 3) | (b >> 2)) as u8,
    ]
}

fn pack_565(c: [u8; 3]) -> u16 {
    let r = (u16::from(c[0]) * 31 + 127) / 255;
    let g = (u16::from(c[1]) * 63 + 127) / 255;
    let b = (u16::from(c[2]) * 31 + 127) / 255;
    (r << 11) | (g << 5) | b
}

/// Colour palette for a BC1 block.
///
/// With `c0 <= c1` and `three_color` allowed, entry 2 is the midpoint and
/// entry 3 is transparent black; otherwise entries 2 and 3 sit at 1/3 and 2/3.
fn color_palette(c0: u16, c1: u16, three_color: bool) -> [[u8; 4]; 4] {
    let p0 = unpack_565(c0);
    let p1 = unpack_565(c1);
    let mix = |w0: u16, w1: u16, d: u16| -> [u8; 4] {
        let ch = |i: usize| ((w0 * u16::from(p0[i]) + w1 * u16::from(p1[i])) / d) as u8;
        [ch(0), ch(1), ch(2), 255]
    };
    if c0 > c1 || !three_color {
        [
            [p0[0], p0[1], p0[2], 255],
            [p1[0], p1[1], p1[2], 255],
            mix(2, 1, 3),
            mix(1, 2, 3),
        ]
    } else {
        [
            [p0[0], p0[1], p0[2], 255],
            [p1[0], p1[1], p1[2], 255],
            mix(1, 1, 2),
            [0, 0, 0, 0],
        ]
    }
}

/// Eight-entry palette for an unsigned alpha/red block.
fn alpha_palette(a0: u8, a1: u8) -> [u8; 8] {
    let (e0, e1) = (u32::from(a0), u32::from(a1));
    let mut p = [a0, a1, 0, 0, 0, 0, 0, 255];
    if a0 > a1 {
        for i in 2..8u32 {
            p[i as usize] = (((8 - i) * e0 + (i - 1) * e1) / 7) as u8;
        }
    } else {
        for i in 2..6u32 {
            p[i as usize] = (((6 - i) * e0 + (i - 1) * e1) / 5) as u8;
        }
    }
    p
}

/// Eight-entry palette for a signed red block, endpoints clamped to -127.
fn alpha_palette_signed(a0: i8, a1: i8) -> [i8; 8] {
    let (e0, e1) = (i32::from(a0.max(-127)), i32::from(a1.max(-127)));
    let mut p = [e0 as i8, e1 as i8, 0, 0, 0, 0, -127, 127];
    if e0 > e1 {
        for i in 2..8i32 {
            p[i as usize] = (((8 - i) * e0 + (i - 1) * e1) / 7) as i8;
        }
    } else {
        for i in 2..6i32 {
            p[i as usize] = (((6 - i) * e0 + (i - 1) * e1) / 5) as i8;
        }
    }
    p
}

/// The sixteen 3-bit indices of an alpha block (bytes 2..8).
fn alpha_indices(block: &[u8]) -> [usize; 16] {
    let mut bits = [0u8; 8];
    bits[..6].copy_from_slice(&block[2..8]);
    let bits = u64::from_le_bytes(bits);
    core::array::from_fn(|i| ((bits >> (3 * i)) & 7) as usize)
}
