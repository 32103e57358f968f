/// Numeric representation of a layout's channels.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Numeric {
    /// Unsigned integer mapped to 0.0..=1.0.
    Unorm,
    /// Signed integer mapped to -1.0..=1.0.
    Snorm,
    /// IEEE float, stored as-is.
    Float,
}

/// Pixel memory layout.
///
/// This is both the destination format of a decode and the native format a
/// codec decodes into / encodes from. Multi-byte samples are native endian.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Single channel, 8-bit unsigned normalized.
    R8,
    /// Single channel, 8-bit signed normalized.
    R8Snorm,
    /// 2 channels, 8-bit unsigned normalized.
    Rg8,
    /// 2 channels, 8-bit signed normalized.
    Rg8Snorm,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 3 channels, 8-bit BGR.
    Bgr8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
    /// 4 channels, 8-bit BGRX (opaque; 4th byte is padding, not alpha).
    Bgrx8,
    /// Single channel, 16-bit unsigned normalized.
    R16,
    /// Single channel, 16-bit signed normalized.
    R16Snorm,
    /// 2 channels, 16-bit unsigned normalized.
    Rg16,
    /// 2 channels, 16-bit signed normalized.
    Rg16Snorm,
    /// 4 channels, 16-bit RGBA.
    Rgba16,
    /// Single channel, 32-bit float.
    RF32,
    /// 3 channels, 32-bit float RGB.
    RgbF32,
    /// 4 channels, 32-bit float RGBA.
    RgbaF32,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::R8 | Self::R8Snorm => 1,
            Self::Rg8 | Self::Rg8Snorm | Self::R16 | Self::R16Snorm => 2,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Bgrx8 => 4,
            Self::Rg16 | Self::Rg16Snorm | Self::RF32 => 4,
            Self::Rgba16 => 8,
            Self::RgbF32 => 12,
            Self::RgbaF32 => 16,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::R8 | Self::R8Snorm | Self::R16 | Self::R16Snorm | Self::RF32 => 1,
            Self::Rg8 | Self::Rg8Snorm | Self::Rg16 | Self::Rg16Snorm => 2,
            Self::Rgb8 | Self::Bgr8 | Self::RgbF32 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Bgrx8 | Self::Rgba16 | Self::RgbaF32 => 4,
        }
    }

    /// Bits per channel.
    pub fn channel_bits(&self) -> u32 {
        (self.bytes_per_pixel() / self.channels()) as u32 * 8
    }

    /// How channel values are represented.
    pub fn numeric(&self) -> Numeric {
        match self {
            Self::R8Snorm | Self::Rg8Snorm | Self::R16Snorm | Self::Rg16Snorm => Numeric::Snorm,
            Self::RF32 | Self::RgbF32 | Self::RgbaF32 => Numeric::Float,
            _ => Numeric::Unorm,
        }
    }

    /// Whether the layout carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(
            self,
            Self::Rgba8 | Self::Bgra8 | Self::Rgba16 | Self::RgbaF32
        )
    }

    /// Whether this layout has the same memory representation as `other`.
    ///
    /// For example, `Bgra8` and `Bgrx8` are compatible (same 4-byte B,G,R,X/A layout).
    pub fn is_memory_compatible(&self, other: PixelLayout) -> bool {
        if *self == other {
            return true;
        }
        matches!(
            (*self, other),
            (Self::Bgra8, Self::Bgrx8) | (Self::Bgrx8, Self::Bgra8)
        )
    }

    /// Read one pixel as normalized RGBA.
    ///
    /// Missing color channels read as 0, missing alpha as 1.
    pub(crate) fn load(&self, px: &[u8]) -> [f32; 4] {
        match self {
            Self::R8 => [unorm8(px[0]), 0.0, 0.0, 1.0],
            Self::R8Snorm => [snorm8(px[0]), 0.0, 0.0, 1.0],
            Self::Rg8 => [unorm8(px[0]), unorm8(px[1]), 0.0, 1.0],
            Self::Rg8Snorm => [snorm8(px[0]), snorm8(px[1]), 0.0, 1.0],
            Self::Rgb8 => [unorm8(px[0]), unorm8(px[1]), unorm8(px[2]), 1.0],
            Self::Bgr8 => [unorm8(px[2]), unorm8(px[1]), unorm8(px[0]), 1.0],
            Self::Rgba8 => [unorm8(px[0]), unorm8(px[1]), unorm8(px[2]), unorm8(px[3])],
            Self::Bgra8 => [unorm8(px[2]), unorm8(px[1]), unorm8(px[0]), unorm8(px[3])],
            Self::Bgrx8 => [unorm8(px[2]), unorm8(px[1]), unorm8(px[0]), 1.0],
            Self::R16 => [unorm16(&px[0..2]), 0.0, 0.0, 1.0],
            Self::R16Snorm => [snorm16(&px[0..2]), 0.0, 0.0, 1.0],
            Self::Rg16 => [unorm16(&px[0..2]), unorm16(&px[2..4]), 0.0, 1.0],
            Self::Rg16Snorm => [snorm16(&px[0..2]), snorm16(&px[2..4]), 0.0, 1.0],
            Self::Rgba16 => [
                unorm16(&px[0..2]),
                unorm16(&px[2..4]),
                unorm16(&px[4..6]),
                unorm16(&px[6..8]),
            ],
            Self::RF32 => [float32(&px[0..4]), 0.0, 0.0, 1.0],
            Self::RgbF32 => [float32(&px[0..4]), float32(&px[4..8]), float32(&px[8..12]), 1.0],
            Self::RgbaF32 => [
                float32(&px[0..4]),
                float32(&px[4..8]),
                float32(&px[8..12]),
                float32(&px[12..16]),
            ],
        }
    }

    /// Write one normalized RGBA pixel, dropping channels the layout lacks.
    pub(crate) fn store(&self, px: &mut [u8], c: [f32; 4]) {
        let [r, g, b, a] = c;
        match self {
            Self::R8 => px[0] = to_unorm8(r),
            Self::R8Snorm => px[0] = to_snorm8(r),
            Self::Rg8 => {
                px[0] = to_unorm8(r);
                px[1] = to_unorm8(g);
            }
            Self::Rg8Snorm => {
                px[0] = to_snorm8(r);
                px[1] = to_snorm8(g);
            }
            Self::Rgb8 => px[..3].copy_from_slice(&[to_unorm8(r), to_unorm8(g), to_unorm8(b)]),
            Self::Bgr8 => px[..3].copy_from_slice(&[to_unorm8(b), to_unorm8(g), to_unorm8(r)]),
            Self::Rgba8 => px[..4].copy_from_slice(&[
                to_unorm8(r),
                to_unorm8(g),
                to_unorm8(b),
                to_unorm8(a),
            ]),
            Self::Bgra8 => px[..4].copy_from_slice(&[
                to_unorm8(b),
                to_unorm8(g),
                to_unorm8(r),
                to_unorm8(a),
            ]),
            Self::Bgrx8 => px[..4].copy_from_slice(&[to_unorm8(b), to_unorm8(g), to_unorm8(r), 255]),
            Self::R16 => px[0..2].copy_from_slice(&to_unorm16(r)),
            Self::R16Snorm => px[0..2].copy_from_slice(&to_snorm16(r)),
            Self::Rg16 => {
                px[0..2].copy_from_slice(&to_unorm16(r));
                px[2..4].copy_from_slice(&to_unorm16(g));
            }
            Self::Rg16Snorm => {
                px[0..2].copy_from_slice(&to_snorm16(r));
                px[2..4].copy_from_slice(&to_snorm16(g));
            }
            Self::Rgba16 => {
                for (i, v) in [r, g, b, a].into_iter().enumerate() {
                    px[i * 2..i * 2 + 2].copy_from_slice(&to_unorm16(v));
                }
            }
            Self::RF32 => px[0..4].copy_from_slice(&r.to_ne_bytes()),
            Self::RgbF32 => {
                for (i, v) in [r, g, b].into_iter().enumerate() {
                    px[i * 4..i * 4 + 4].copy_from_slice(&v.to_ne_bytes());
                }
            }
            Self::RgbaF32 => {
                for (i, v) in [r, g, b, a].into_iter().enumerate() {
                    px[i * 4..i * 4 + 4].copy_from_slice(&v.to_ne_bytes());
                }
            }
        }
    }
}

// ── Sample conversions ──────────────────────────────────────────────

fn unorm8(v: u8) -> f32 {
    v as f32 / 255.0
}

fn snorm8(v: u8) -> f32 {
    (v as i8 as f32 / 127.0).max(-1.0)
}

fn unorm16(b: &[u8]) -> f32 {
    u16::from_ne_bytes([b[0], b[1]]) as f32 / 65535.0
}

fn snorm16(b: &[u8]) -> f32 {
    (i16::from_ne_bytes([b[0], b[1]]) as f32 / 32767.0).max(-1.0)
}

fn float32(b: &[u8]) -> f32 {
    f32::from_ne_bytes([b[0], b[1], b[2], b[3]])
}

fn to_unorm8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

fn to_snorm8(v: f32) -> u8 {
    (v.clamp(-1.0, 1.0) * 127.0).round() as i8 as u8
}

fn to_unorm16(v: f32) -> [u8; 2] {
    ((v.clamp(0.0, 1.0) * 65535.0 + 0.5) as u16).to_ne_bytes()
}

fn to_snorm16(v: f32) -> [u8; 2] {
    ((v.clamp(-1.0, 1.0) * 32767.0).round() as i16).to_ne_bytes()
}
