//! PVRTC1, 2 and 4 bits per pixel.
//!
//! PVRTC blocks are not independent: every pixel blends the colours of the
//! four nearest blocks, so the codec is registered with the `SURFACE` flag and
//! decodes the whole image in one call. Blocks are stored in Morton order over
//! a power-of-two grid of at least 2x2 blocks; missing input reads as zero.

use alloc::vec;
use alloc::vec::Vec;

use crate::format::TextureCompressionInfo;
use crate::surface::RowsMut;

/// Modulation marker: transparent punch-through pixel.
const PUNCH: u8 = 0x10;
/// Modulation marker: interpolate from neighbours (2bpp only).
const UNSET: u8 = 0xff;

#[derive(Clone, Copy)]
struct Block {
    a: [i32; 4],
    b: [i32; 4],
    modulation: u32,
    mode: bool,
}

fn expand(v: u16, bits: u32) -> i32 {
    let v = i32::from(v & ((1 << bits) - 1));
    match bits {
        3 => (v << 5) | (v << 2) | (v >> 1),
        4 => v * 17,
        _ => (v << 3) | (v >> 2),
    }
}

fn color_a(c: u16) -> [i32; 4] {
    if c & 0x8000 != 0 {
        [expand(c >> 10, 5), expand(c >> 5, 5), expand(c >> 1, 4), 255]
    } else {
        [expand(c >> 8, 4), expand(c >> 4, 4), expand(c >> 1, 3), expand(c >> 12, 3)]
    }
}

fn color_b(c: u16) -> [i32; 4] {
    if c & 0x8000 != 0 {
        [expand(c >> 10, 5), expand(c >> 5, 5), expand(c, 5), 255]
    } else {
        [expand(c >> 8, 4), expand(c >> 4, 4), expand(c, 4), expand(c >> 12, 3)]
    }
}

fn read_block(input: &[u8], index: usize) -> Block {
    let mut raw = [0u8; 8];
    if let Some(src) = index.checked_mul(8).and_then(|at| input.get(at..at + 8)) {
        raw.copy_from_slice(src);
    }
    let modulation = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
    let color = u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]);
    Block {
        a: color_a(color as u16),
        b: color_b((color >> 16) as u16),
        modulation,
        mode: color & 1 == 1,
    }
}

/// Morton index of block (`x`, `y`) in a `width x height` block grid.
fn twiddle(width: usize, height: usize, x: usize, y: usize) -> usize {
    let (min_dim, mut rest) = if height < width { (height, x) } else { (width, y) };
    let mut out = 0;
    let mut src_bit = 1;
    let mut dst_bit = 1;
    let mut shift = 0;
    while src_bit < min_dim {
        if y & src_bit != 0 {
            out |= dst_bit;
        }
        if x & src_bit != 0 {
            out |= dst_bit << 1;
        }
        src_bit <<= 1;
        dst_bit <<= 2;
        shift += 1;
    }
    rest >>= shift;
    out | (rest << (2 * shift))
}

/// Power-of-two block grid, at least 2x2, covering `width x height`.
fn padded_grid(width: usize, height: usize, bw: usize, bh: usize) -> (usize, usize) {
    (
        width.div_ceil(bw).next_power_of_two().max(2),
        height.div_ceil(bh).next_power_of_two().max(2),
    )
}

/// Bytes the decoder allocates for a `width x height` image with
/// `block_width x block_height` blocks: one block state per grid cell plus one
/// modulation weight per padded pixel.
pub(crate) fn working_set(block_width: u32, block_height: u32, width: u32, height: u32) -> usize {
    if block_width == 0 || block_height == 0 || width == 0 || height == 0 {
        return 0;
    }
    let (bw, bh) = (block_width as usize, block_height as usize);
    let (xblocks, yblocks) = padded_grid(width as usize, height as usize, bw, bh);
    xblocks
        .saturating_mul(yblocks)
        .saturating_mul(core::mem::size_of::<Block>() + bw * bh)
}

fn decode(info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8], two_bpp: bool) {
    let width = info.width as usize;
    let height = info.height as usize;
    if width == 0 || height == 0 {
        return;
    }
    let (bw, bh) = if two_bpp { (8usize, 4usize) } else { (4, 4) };
    let (xblocks, yblocks) = padded_grid(width, height, bw, bh);

    let mut blocks = Vec::with_capacity(xblocks * yblocks);
    for by in 0..yblocks {
        for bx in 0..xblocks {
            blocks.push(read_block(input, twiddle(xblocks, yblocks, bx, by)));
        }
    }
    let block_at = |x: usize, y: usize| &blocks[(y / bh) * xblocks + x / bw];

    let full_w = xblocks * bw;
    let full_h = yblocks * bh;
    let mut weights = vec![0u8; full_w * full_h];
    for y in 0..full_h {
        for x in 0..full_w {
            let block = block_at(x, y);
            let (lx, ly) = (x % bw, y % bh);
            weights[y * full_w + x] = if !two_bpp {
                let m = (block.modulation >> (2 * (ly * 4 + lx))) & 3;
                match (block.mode, m) {
                    (false, m) => [0, 3, 5, 8][m as usize],
                    (true, 2) => PUNCH | 4,
                    (true, m) => [0, 4, 4, 8][m as usize],
                }
            } else if !block.mode {
                if (block.modulation >> (ly * 8 + lx)) & 1 == 1 { 8 } else { 0 }
            } else if (lx ^ ly) & 1 == 0 {
                let m = (block.modulation >> (2 * ((ly * 8 + lx) / 2))) & 3;
                [0, 3, 5, 8][m as usize]
            } else {
                UNSET
            };
        }
    }
    if two_bpp {
        for y in 0..full_h {
            for x in 0..full_w {
                if weights[y * full_w + x] != UNSET {
                    continue;
                }
                let neighbours = [
                    ((x + full_w - 1) % full_w, y),
                    ((x + 1) % full_w, y),
                    (x, (y + full_h - 1) % full_h),
                    (x, (y + 1) % full_h),
                ];
                let sum: u32 = neighbours
                    .iter()
                    .map(|&(nx, ny)| match weights[ny * full_w + nx] {
                        UNSET => 0,
                        w => u32::from(w & 0x0f),
                    })
                    .sum();
                weights[y * full_w + x] = ((sum + 2) / 4) as u8;
            }
        }
    }

    let (bw_i, bh_i) = (bw as i32, bh as i32);
    let grid = |bx: i32, by: i32| {
        let bx = bx.rem_euclid(xblocks as i32) as usize;
        let by = by.rem_euclid(yblocks as i32) as usize;
        &blocks[by * xblocks + bx]
    };
    for y in 0..height {
        let row = output.row(y);
        let fy = y as i32 - bh_i / 2;
        let (by, wy) = (fy.div_euclid(bh_i), fy.rem_euclid(bh_i));
        for x in 0..width {
            let fx = x as i32 - bw_i / 2;
            let (bx, wx) = (fx.div_euclid(bw_i), fx.rem_euclid(bw_i));
            let corners = [grid(bx, by), grid(bx + 1, by), grid(bx, by + 1), grid(bx + 1, by + 1)];
            let interp = |pick: fn(&Block) -> [i32; 4], c: usize| {
                let top = pick(corners[0])[c] * (bw_i - wx) + pick(corners[1])[c] * wx;
                let bottom = pick(corners[2])[c] * (bw_i - wx) + pick(corners[3])[c] * wx;
                (top * (bh_i - wy) + bottom * wy) / (bw_i * bh_i)
            };
            let weight = weights[y * full_w + x];
            let w = i32::from(weight & 0x0f);
            let px: [u8; 4] = core::array::from_fn(|c| {
                let a = interp(|b| b.a, c);
                let b = interp(|b| b.b, c);
                ((a * (8 - w) + b * w) / 8).clamp(0, 255) as u8
            });
            let dst = &mut row[x * 4..x * 4 + 4];
            dst.copy_from_slice(&px);
            if weight & PUNCH != 0 {
                dst[3] = 0;
            }
        }
    }
}

pub(crate) fn decode_pvrtc_4bpp(
    info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    decode(info, output, input, false);
}

pub(crate) fn decode_pvrtc_2bpp(
    info: &TextureCompressionInfo,
    output: &mut RowsMut<'_>,
    input: &[u8],
) {
    decode(info, output, input, true);
}
