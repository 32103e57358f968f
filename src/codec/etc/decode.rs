use super::{DISTANCE, EAC_MODIFIERS, INTENSITY, block_bits, clamp8, delta3, extend4, extend5, modifier};
use crate::codec::write_block;
use crate::format::TextureCompressionInfo;
use crate::surface::RowsMut;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Etc1,
    Etc2,
    /// ETC2 with punch-through alpha: the diff bit becomes the opaque bit.
    Etc2Alpha1,
}

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

fn pixel_index(bits: u64, k: usize) -> usize {
    ((((bits >> (16 + k)) & 1) << 1) | ((bits >> k) & 1)) as usize
}

/// Decode a colour block into row-major RGBA.
fn color_block(bits: u64, mode: Mode) -> [[u8; 4]; 16] {
    let diff = (bits >> 33) & 1 == 1;
    let opaque = mode != Mode::Etc2Alpha1 || diff;
    let differential = diff || mode == Mode::Etc2Alpha1;

    if differential && mode != Mode::Etc1 {
        let r = ((bits >> 59) & 0x1f) as i32 + delta3(bits >> 56);
        let g = ((bits >> 51) & 0x1f) as i32 + delta3(bits >> 48);
        let b = ((bits >> 43) & 0x1f) as i32 + delta3(bits >> 40);
        if !(0..32).contains(&r) {
            return t_mode(bits, opaque);
        }
        if !(0..32).contains(&g) {
            return h_mode(bits, opaque);
        }
        if !(0..32).contains(&b) {
            return planar_mode(bits);
        }
    }

    let bases: [[i32; 3]; 2] = if differential {
        let r = (bits >> 59) & 0x1f;
        let g = (bits >> 51) & 0x1f;
        let b = (bits >> 43) & 0x1f;
        let shifted = |base: u64, delta: i32| extend5((base as i32 + delta) as u64);
        [
            [extend5(r), extend5(g), extend5(b)],
            [
                shifted(r, delta3(bits >> 56)),
                shifted(g, delta3(bits >> 48)),
                shifted(b, delta3(bits >> 40)),
            ],
        ]
    } else {
        [
            [extend4(bits >> 60), extend4(bits >> 52), extend4(bits >> 44)],
            [extend4(bits >> 56), extend4(bits >> 48), extend4(bits >> 40)],
        ]
    };
    let tables = [
        INTENSITY[((bits >> 37) & 7) as usize],
        INTENSITY[((bits >> 34) & 7) as usize],
    ];
    let flip = (bits >> 32) & 1 == 1;

    let mut out = [[0u8; 4]; 16];
    for k in 0..16 {
        let (x, y) = (k / 4, k % 4);
        let sub = usize::from(if flip { y >= 2 } else { x >= 2 });
        let index = pixel_index(bits, k);
        let px = &mut out[y * 4 + x];
        if !opaque && index == 2 {
            *px = TRANSPARENT;
            continue;
        }
        let m = if !opaque && index == 0 {
            0
        } else {
            modifier(tables[sub], index)
        };
        let base = bases[sub];
        *px = [clamp8(base[0] + m), clamp8(base[1] + m), clamp8(base[2] + m), 255];
    }
    out
}

fn paint(bits: u64, colors: [[i32; 3]; 4], opaque: bool) -> [[u8; 4]; 16] {
    let mut out = [[0u8; 4]; 16];
    for k in 0..16 {
        let index = pixel_index(bits, k);
        out[(k % 4) * 4 + k / 4] = if !opaque && index == 2 {
            TRANSPARENT
        } else {
            let c = colors[index];
            [clamp8(c[0]), clamp8(c[1]), clamp8(c[2]), 255]
        };
    }
    out
}

fn t_mode(bits: u64, opaque: bool) -> [[u8; 4]; 16] {
    let c1 = [
        extend4((((bits >> 59) & 3) << 2) | ((bits >> 56) & 3)),
        extend4(bits >> 52),
        extend4(bits >> 48),
    ];
    let c2 = [extend4(bits >> 44), extend4(bits >> 40), extend4(bits >> 36)];
    let d = DISTANCE[((((bits >> 34) & 3) << 1) | ((bits >> 32) & 1)) as usize];
    let add = |c: [i32; 3], v: i32| c.map(|x| x + v);
    paint(bits, [c1, add(c2, d), c2, add(c2, -d)], opaque)
}

fn h_mode(bits: u64, opaque: bool) -> [[u8; 4]; 16] {
    let r1 = (bits >> 59) & 0xf;
    let g1 = (((bits >> 56) & 7) << 1) | ((bits >> 52) & 1);
    let b1 = (((bits >> 51) & 1) << 3) | ((bits >> 47) & 7);
    let r2 = (bits >> 43) & 0xf;
    let g2 = (bits >> 39) & 0xf;
    let b2 = (bits >> 35) & 0xf;
    let v1 = (r1 << 8) | (g1 << 4) | b1;
    let v2 = (r2 << 8) | (g2 << 4) | b2;
    let index = (((bits >> 34) & 1) << 2) | (((bits >> 32) & 1) << 1) | u64::from(v1 >= v2);
    let d = DISTANCE[index as usize];

    let c1 = [extend4(r1), extend4(g1), extend4(b1)];
    let c2 = [extend4(r2), extend4(g2), extend4(b2)];
    let add = |c: [i32; 3], v: i32| c.map(|x| x + v);
    paint(bits, [add(c1, d), add(c1, -d), add(c2, d), add(c2, -d)], opaque)
}

fn planar_mode(bits: u64) -> [[u8; 4]; 16] {
    let ext6 = |v: u64| {
        let v = (v & 0x3f) as i32;
        (v << 2) | (v >> 4)
    };
    let ext7 = |v: u64| {
        let v = (v & 0x7f) as i32;
        (v << 1) | (v >> 6)
    };
    let o = [
        ext6(bits >> 57),
        ext7((((bits >> 56) & 1) << 6) | ((bits >> 49) & 0x3f)),
        ext6((((bits >> 48) & 1) << 5) | (((bits >> 43) & 3) << 3) | ((bits >> 39) & 7)),
    ];
    let h = [
        ext6((((bits >> 34) & 0x1f) << 1) | ((bits >> 32) & 1)),
        ext7(bits >> 25),
        ext6(bits >> 19),
    ];
    let v = [ext6(bits >> 13), ext7(bits >> 6), ext6(bits)];

    core::array::from_fn(|i| {
        let (x, y) = ((i % 4) as i32, (i / 4) as i32);
        let ch = |c: usize| clamp8((x * (h[c] - o[c]) + y * (v[c] - o[c]) + 4 * o[c] + 2) >> 2);
        [ch(0), ch(1), ch(2), 255]
    })
}

/// Raw EAC values: `base`, `multiplier`, modifier index, in row-major order.
fn eac_indices(block: &[u8]) -> (i32, i32, [i32; 16]) {
    let bits = block_bits(block);
    let table = EAC_MODIFIERS[((bits >> 48) & 0xf) as usize];
    let mut mods = [0i32; 16];
    for k in 0..16 {
        let index = ((bits >> (45 - 3 * k)) & 7) as usize;
        mods[(k % 4) * 4 + k / 4] = table[index];
    }
    (i32::from(block[0]), ((bits >> 52) & 0xf) as i32, mods)
}

/// 8-bit EAC alpha.
fn eac_alpha(block: &[u8]) -> [u8; 16] {
    let (base, mult, mods) = eac_indices(block);
    mods.map(|m| clamp8(base + m * mult))
}

/// 11-bit EAC channel widened to 16 bits.
fn eac_r11(block: &[u8]) -> [u16; 16] {
    let (base, mult, mods) = eac_indices(block);
    mods.map(|m| {
        let scaled = if mult == 0 { m } else { m * mult * 8 };
        let v = (base * 8 + 4 + scaled).clamp(0, 2047) as u16;
        (v << 5) | (v >> 6)
    })
}

/// Signed 11-bit EAC channel widened to 16 bits.
fn eac_r11_signed(block: &[u8]) -> [i16; 16] {
    let (_, mult, mods) = eac_indices(block);
    let base = i32::from(block[0] as i8).max(-127);
    mods.map(|m| {
        let scaled = if mult == 0 { m } else { m * mult * 8 };
        let v = (base * 8 + scaled).clamp(-1023, 1023);
        let magnitude = v.abs();
        let wide = ((magnitude << 5) | (magnitude >> 5)) as i16;
        if v < 0 { -wide } else { wide }
    })
}

pub(crate) fn decode_etc1(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    write_block(output, &color_block(block_bits(input), Mode::Etc1), 4);
}

pub(crate) fn decode_etc2(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    write_block(output, &color_block(block_bits(input), Mode::Etc2), 4);
}

pub(crate) fn decode_etc2_alpha1(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    write_block(output, &color_block(block_bits(input), Mode::Etc2Alpha1), 4);
}

/// ETC2 colour with an 8-bit EAC alpha block in front.
pub(crate) fn decode_etc2_eac(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    let mut pixels = color_block(block_bits(&input[8..16]), Mode::Etc2);
    for (px, a) in pixels.iter_mut().zip(eac_alpha(&input[..8])) {
        px[3] = a;
    }
    write_block(output, &pixels, 4);
}

pub(crate) fn decode_eac_r11(_info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    let pixels = eac_r11(&input[..8]).map(u16::to_ne_bytes);
    write_block(output, &pixels, 4);
}

pub(crate) fn decode_eac_r11_signed(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    let pixels = eac_r11_signed(&input[..8]).map(i16::to_ne_bytes);
    write_block(output, &pixels, 4);
}

pub(crate) fn decode_eac_rg11(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    let red = eac_r11(&input[..8]);
    let green = eac_r11(&input[8..16]);
    let pixels: [[u8; 4]; 16] = core::array::from_fn(|i| {
        let (r, g) = (red[i].to_ne_bytes(), green[i].to_ne_bytes());
        [r[0], r[1], g[0], g[1]]
    });
    write_block(output, &pixels, 4);
}

pub(crate) fn decode_eac_rg11_signed(
    _info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    let red = eac_r11_signed(&input[..8]);
    let green = eac_r11_signed(&input[8..16]);
    let pixels: [[u8; 4]; 16] = core::array::from_fn(|i| {
        let (r, g) = (red[i].to_ne_bytes(), green[i].to_ne_bytes());
        [r[0], r[1], g[0], g[1]]
    });
    write_block(output, &pixels, 4);
}
