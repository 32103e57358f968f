//! ETC1, ETC2 and EAC.
//!
//! Blocks are big-endian 64-bit words. Per-pixel indices are stored column
//! major (pixel `k` is at `x = k / 4`, `y = k % 4`).

mod decode;
mod encode;

pub(crate) use decode::{
    decode_eac_r11, decode_eac_r11_signed, decode_eac_rg11, decode_eac_rg11_signed, decode_etc1,
    decode_etc2, decode_etc2_alpha1, decode_etc2_eac,
};
pub(crate) use encode::encode_etc1;

/// ETC1 intensity modifier pairs, selected by a sub-block's 3-bit codeword.
const INTENSITY: [[i32; 2]; 8] = [
    [2, 8],
    [5, 17],
    [9, 29],
    [13, 42],
    [18, 60],
    [24, 80],
    [33, 106],
    [47, 183],
];

/// ETC2 T/H mode distances.
const DISTANCE: [i32; 8] = [3, 6, 11, 16, 23, 32, 41, 64];

/// EAC modifier tables.
const EAC_MODIFIERS: [[i32; 8]; 16] = [
    [-3, -6, -9, -15, 2, 5, 8, 14],
    [-3, -7, -10, -13, 2, 6, 9, 12],
    [-2, -5, -8, -13, 1, 4, 7, 12],
    [-2, -4, -6, -13, 1, 3, 5, 12],
    [-3, -6, -8, -12, 2, 5, 7, 11],
    [-3, -7, -9, -11, 2, 6, 8, 10],
    [-4, -7, -8, -11, 3, 6, 7, 10],
    [-3, -5, -8, -11, 2, 4, 7, 10],
    [-2, -6, -8, -10, 1, 5, 7, 9],
    [-2, -5, -8, -10, 1, 4, 7, 9],
    [-2, -4, -8, -10, 1, 3, 7, 9],
    [-2, -5, -7, -10, 1, 4, 6, 9],
    [-3, -4, -7, -10, 2, 3, 6, 9],
    [-1, -2, -3, -10, 0, 1, 2, 9],
    [-4, -6, -8, -9, 3, 5, 7, 8],
    [-3, -5, -7, -9, 2, 4, 6, 8],
];

/// Modifier for a 2-bit pixel index: `[+a, +b, -a, -b]`.
fn modifier(table: [i32; 2], index: usize) -> i32 {
    match index {
        0 => table[0],
        1 => table[1],
        2 => -table[0],
        _ => -table[1],
    }
}

fn extend4(v: u64) -> i32 {
    (v as i32 & 0xf) * 17
}

fn extend5(v: u64) -> i32 {
    let v = v as i32 & 0x1f;
    (v << 3) | (v >> 2)
}

fn clamp8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// 3-bit two's complement delta.
fn delta3(v: u64) -> i32 {
    let v = (v & 7) as i32;
    if v >= 4 { v - 8 } else { v }
}

fn block_bits(block: &[u8]) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&block[..8]);
    u64::from_be_bytes(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_signed() {
        assert_eq!(delta3(0b011), 3);
        assert_eq!(delta3(0b100), -4);
        assert_eq!(delta3(0b111), -1);
    }

    #[test]
    fn extensions_fill_low_bits() {
        assert_eq!(extend4(0xf), 255);
        assert_eq!(extend5(0x1f), 255);
        assert_eq!(extend5(0x10), 132);
    }
}
