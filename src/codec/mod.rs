//! Built-in codec bodies.
//!
//! Every function here matches [`DecodeFn`](crate::DecodeFn) or
//! [`EncodeFn`](crate::EncodeFn) and is referenced from the built-in format
//! table. Codecs never fail: the dispatcher hands block codecs exactly
//! `info.bytes` of input, and surface codecs treat missing bytes as zero.

pub(crate) mod atc;
pub(crate) mod bc;
pub(crate) mod bptc;
pub(crate) mod etc;
pub(crate) mod packed;
pub(crate) mod pvrtc;

use crate::surface::RowsMut;

/// Write a `width`-wide block of `N`-byte pixels, row by row.
pub(crate) fn write_block<const N: usize>(output: &mut RowsMut<'_>, pixels: &[[u8; N]], width: usize) {
    for (y, row) in pixels.chunks(width).enumerate() {
        let dst = output.row(y);
        for (x, px) in row.iter().enumerate() {
            dst[x * N..x * N + N].copy_from_slice(px);
        }
    }
}

/// Gather a `width x height` block of `N`-byte pixels, rows `stride` apart.
pub(crate) fn read_block<const N: usize, const P: usize>(
    input: &[u8],
    stride: usize,
    width: usize,
) -> [[u8; N]; P] {
    core::array::from_fn(|i| {
        let offset = (i / width) * stride + (i % width) * N;
        let mut px = [0u8; N];
        px.copy_from_slice(&input[offset..offset + N]);
        px
    })
}
