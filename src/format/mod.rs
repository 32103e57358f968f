//! Compression identifiers and format descriptors.
//!
//! A [`TextureCompressionInfo`] describes one compression variant: its block
//! footprint, the pixel layout its codec speaks, the three platform codes it
//! answers to, and the (optional) codec functions. Descriptors are plain
//! `Copy` data; the [`Registry`](crate::Registry) owns the built-in table.

mod platform;
pub(crate) mod table;

pub use platform::{dxgi, gl, vulkan};

use core::fmt;
use core::ops::BitOr;

use crate::decode::{CompressionStatus, DecompressRequest};
use crate::encode::CompressRequest;
use crate::error::CompressionError;
use crate::pixel::PixelLayout;
use crate::surface::{RowsMut, Surface, SurfaceMut};

/// Decode one compressed unit into `output`.
///
/// Block codecs see `info` as registered and write `info.width x info.height`
/// pixels in `info.format`. Surface codecs (flag [`CompressionFlags::SURFACE`])
/// receive a copy whose `width`/`height` are the image dimensions and decode
/// the whole image in one call.
pub type DecodeFn = fn(info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]);

/// Encode one unit of pixels (rows `stride` bytes apart, in `info.format`)
/// into `output`, which is exactly `info.bytes` long for block codecs.
pub type EncodeFn =
    fn(info: &TextureCompressionInfo, output: &mut [u8], input: &[u8], stride: usize);

// ── TextureCompression ──────────────────────────────────────────────

macro_rules! texture_compressions {
    ($($(#[$meta:meta])* $name:ident,)*) => {
        /// Every compression variant the engine knows about.
        ///
        /// Variants without a codec are still registered so platform codes
        /// resolve to them; see [`TextureCompressionInfo::can_decode`].
        #[non_exhaustive]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum TextureCompression {
            $($(#[$meta])* $name,)*
        }

        impl TextureCompression {
            /// All variants in declaration order, starting with [`TextureCompression::None`].
            pub const ALL: &'static [TextureCompression] = &[$(TextureCompression::$name,)*];
        }
    };
}

texture_compressions! {
    /// No compression; the lookup fallback.
    None,

    AtcRgb,
    AtcRgbaExplicitAlpha,
    AtcRgbaInterpolatedAlpha,

    Amd3dcX,
    Amd3dcXy,

    Latc1Luminance,
    Latc1SignedLuminance,
    Latc2LuminanceAlpha,
    Latc2SignedLuminanceAlpha,

    /// BC1, opaque.
    Dxt1,
    Dxt1Srgb,
    /// BC1 with 1-bit alpha.
    Dxt1Alpha1,
    Dxt1Alpha1Srgb,
    /// BC2.
    Dxt3,
    Dxt3Srgb,
    /// BC3.
    Dxt5,
    Dxt5Srgb,

    /// BC4.
    Rgtc1Red,
    Rgtc1SignedRed,
    /// BC5.
    Rgtc2Rg,
    Rgtc2SignedRg,

    /// BC6H unsigned.
    BptcRgbUnsignedFloat,
    /// BC6H signed.
    BptcRgbSignedFloat,
    /// BC7.
    BptcRgbaUnorm,
    BptcSrgbAlphaUnorm,

    PvrtcRgb2bpp,
    PvrtcRgb4bpp,
    PvrtcRgba2bpp,
    PvrtcRgba4bpp,
    Pvrtc2Rgba2bpp,
    Pvrtc2Rgba4bpp,
    PvrtcSrgb2bpp,
    PvrtcSrgb4bpp,
    PvrtcSrgbAlpha2bpp,
    PvrtcSrgbAlpha4bpp,

    Etc1Rgb,

    EacR11,
    EacSignedR11,
    EacRg11,
    EacSignedRg11,

    Etc2Rgb,
    Etc2Srgb,
    Etc2RgbAlpha1,
    Etc2SrgbAlpha1,
    Etc2Rgba,
    Etc2SrgbAlpha8,

    Astc4x4,
    Astc5x4,
    Astc5x5,
    Astc6x5,
    Astc6x6,
    Astc8x5,
    Astc8x6,
    Astc8x8,
    Astc10x5,
    Astc10x6,
    Astc10x8,
    Astc10x10,
    Astc12x10,
    Astc12x12,
    AstcSrgb4x4,
    AstcSrgb5x4,
    AstcSrgb5x5,
    AstcSrgb6x5,
    AstcSrgb6x6,
    AstcSrgb8x5,
    AstcSrgb8x6,
    AstcSrgb8x8,
    AstcSrgb10x5,
    AstcSrgb10x6,
    AstcSrgb10x8,
    AstcSrgb10x10,
    AstcSrgb12x10,
    AstcSrgb12x12,

    Astc3x3x3,
    Astc4x3x3,
    Astc4x4x3,
    Astc4x4x4,
    Astc5x4x4,
    Astc5x5x4,
    Astc5x5x5,
    Astc6x5x5,
    Astc6x6x5,
    Astc6x6x6,
    AstcSrgb3x3x3,
    AstcSrgb4x3x3,
    AstcSrgb4x4x3,
    AstcSrgb4x4x4,
    AstcSrgb5x4x4,
    AstcSrgb5x5x4,
    AstcSrgb5x5x5,
    AstcSrgb6x5x5,
    AstcSrgb6x6x5,
    AstcSrgb6x6x6,

    /// Shared-exponent RGB, 9 bits mantissa each.
    Rgb9E5,
    R11fG11fB10f,
    R10fG11fB11f,
    /// 4:2:2 packed, G R G B byte order.
    G8R8G8B8,
    /// 4:2:2 packed, R G B G byte order.
    R8G8B8G8,
    Uyvy,
    Yuy2,
}

/// 2D ASTC block footprints in variant order.
pub(crate) const ASTC_FOOTPRINTS: [(u32, u32); 14] = [
    (4, 4),
    (5, 4),
    (5, 5),
    (6, 5),
    (6, 6),
    (8, 5),
    (8, 6),
    (8, 8),
    (10, 5),
    (10, 6),
    (10, 8),
    (10, 10),
    (12, 10),
    (12, 12),
];

/// 3D ASTC block footprints in variant order.
pub(crate) const ASTC_3D_FOOTPRINTS: [(u32, u32, u32); 10] = [
    (3, 3, 3),
    (4, 3, 3),
    (4, 4, 3),
    (4, 4, 4),
    (5, 4, 4),
    (5, 5, 4),
    (5, 5, 5),
    (6, 5, 5),
    (6, 6, 5),
    (6, 6, 6),
];

const ASTC_LINEAR: [TextureCompression; 14] = [
    TextureCompression::Astc4x4,
    TextureCompression::Astc5x4,
    TextureCompression::Astc5x5,
    TextureCompression::Astc6x5,
    TextureCompression::Astc6x6,
    TextureCompression::Astc8x5,
    TextureCompression::Astc8x6,
    TextureCompression::Astc8x8,
    TextureCompression::Astc10x5,
    TextureCompression::Astc10x6,
    TextureCompression::Astc10x8,
    TextureCompression::Astc10x10,
    TextureCompression::Astc12x10,
    TextureCompression::Astc12x12,
];

const ASTC_SRGB: [TextureCompression; 14] = [
    TextureCompression::AstcSrgb4x4,
    TextureCompression::AstcSrgb5x4,
    TextureCompression::AstcSrgb5x5,
    TextureCompression::AstcSrgb6x5,
    TextureCompression::AstcSrgb6x6,
    TextureCompression::AstcSrgb8x5,
    TextureCompression::AstcSrgb8x6,
    TextureCompression::AstcSrgb8x8,
    TextureCompression::AstcSrgb10x5,
    TextureCompression::AstcSrgb10x6,
    TextureCompression::AstcSrgb10x8,
    TextureCompression::AstcSrgb10x10,
    TextureCompression::AstcSrgb12x10,
    TextureCompression::AstcSrgb12x12,
];

pub(crate) const ASTC_3D_LINEAR: [TextureCompression; 10] = [
    TextureCompression::Astc3x3x3,
    TextureCompression::Astc4x3x3,
    TextureCompression::Astc4x4x3,
    TextureCompression::Astc4x4x4,
    TextureCompression::Astc5x4x4,
    TextureCompression::Astc5x5x4,
    TextureCompression::Astc5x5x5,
    TextureCompression::Astc6x5x5,
    TextureCompression::Astc6x6x5,
    TextureCompression::Astc6x6x6,
];

pub(crate) const ASTC_3D_SRGB: [TextureCompression; 10] = [
    TextureCompression::AstcSrgb3x3x3,
    TextureCompression::AstcSrgb4x3x3,
    TextureCompression::AstcSrgb4x4x3,
    TextureCompression::AstcSrgb4x4x4,
    TextureCompression::AstcSrgb5x4x4,
    TextureCompression::AstcSrgb5x5x4,
    TextureCompression::AstcSrgb5x5x5,
    TextureCompression::AstcSrgb6x5x5,
    TextureCompression::AstcSrgb6x6x5,
    TextureCompression::AstcSrgb6x6x6,
];

impl TextureCompression {
    /// The 2D ASTC variant for a `block_width x block_height` footprint.
    ///
    /// Returns [`TextureCompression::None`] for footprints ASTC doesn't define,
    /// which is what an ASTC file header reader wants to hand to the registry.
    pub fn astc(block_width: u32, block_height: u32, srgb: bool) -> Self {
        let table = if srgb { &ASTC_SRGB } else { &ASTC_LINEAR };
        ASTC_FOOTPRINTS
            .iter()
            .position(|&fp| fp == (block_width, block_height))
            .map_or(Self::None, |i| table[i])
    }

    /// 2D ASTC variants in footprint order (`srgb` selects the sRGB half).
    pub(crate) fn astc_2d(srgb: bool) -> &'static [Self; 14] {
        if srgb { &ASTC_SRGB } else { &ASTC_LINEAR }
    }
}

impl fmt::Display for TextureCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ── CompressionFlags ────────────────────────────────────────────────

/// Descriptor flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompressionFlags(u32);

impl CompressionFlags {
    pub const NONE: Self = Self(0);
    /// Codec rows run bottom-up; block-row 0 lands at the bottom of the image.
    pub const ORIGIN: Self = Self(1 << 0);
    /// Codec handles the whole image in one call.
    pub const SURFACE: Self = Self(1 << 1);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for CompressionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

// ── TextureCompressionInfo ──────────────────────────────────────────

/// Format descriptor for one compression variant.
#[derive(Clone, Copy)]
pub struct TextureCompressionInfo {
    pub compression: TextureCompression,
    /// `DXGI_FORMAT` code, 0 if there is none.
    pub dxgi: u32,
    /// OpenGL internal format, 0 if there is none.
    pub gl: u32,
    /// `VkFormat` code, 0 if there is none.
    pub vulkan: u32,
    /// Block width in pixels.
    pub width: u32,
    /// Block height in pixels.
    pub height: u32,
    /// Compressed bytes per block.
    pub bytes: usize,
    /// Pixel layout the codec decodes into and encodes from.
    pub format: PixelLayout,
    pub decode: Option<DecodeFn>,
    pub encode: Option<EncodeFn>,
    pub flags: CompressionFlags,
}

impl fmt::Debug for TextureCompressionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureCompressionInfo")
            .field("compression", &self.compression)
            .field("dxgi", &self.dxgi)
            .field("gl", &format_args!("{:#x}", self.gl))
            .field("vulkan", &self.vulkan)
            .field("block", &format_args!("{}x{}", self.width, self.height))
            .field("bytes", &self.bytes)
            .field("format", &self.format)
            .field("decode", &self.decode.is_some())
            .field("encode", &self.encode.is_some())
            .field("flags", &self.flags)
            .finish()
    }
}

impl TextureCompressionInfo {
    /// The sentinel returned for unknown lookups: no codes, no codecs, 0 bytes.
    pub const NONE: Self = Self::new(TextureCompression::None, 0, 0, 0, PixelLayout::Rgba8);

    /// Descriptor with no platform codes and no codecs.
    pub const fn new(
        compression: TextureCompression,
        width: u32,
        height: u32,
        bytes: usize,
        format: PixelLayout,
    ) -> Self {
        Self {
            compression,
            dxgi: 0,
            gl: 0,
            vulkan: 0,
            width,
            height,
            bytes,
            format,
            decode: None,
            encode: None,
            flags: CompressionFlags::NONE,
        }
    }

    /// Set the DXGI, GL and Vulkan codes.
    pub const fn with_codes(mut self, dxgi: u32, gl: u32, vulkan: u32) -> Self {
        self.dxgi = dxgi;
        self.gl = gl;
        self.vulkan = vulkan;
        self
    }

    pub const fn with_decoder(mut self, decode: DecodeFn) -> Self {
        self.decode = Some(decode);
        self
    }

    pub const fn with_encoder(mut self, encode: EncodeFn) -> Self {
        self.encode = Some(encode);
        self
    }

    pub const fn with_flags(mut self, flags: CompressionFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn can_decode(&self) -> bool {
        self.decode.is_some()
    }

    pub fn can_encode(&self) -> bool {
        self.encode.is_some()
    }

    pub fn is_surface(&self) -> bool {
        self.flags.contains(CompressionFlags::SURFACE)
    }

    pub fn is_origin(&self) -> bool {
        self.flags.contains(CompressionFlags::ORIGIN)
    }

    /// Block grid covering a `width x height` image (ceiling division).
    ///
    /// The sentinel has a 0x0 footprint and always yields `(0, 0)`.
    pub fn blocks(&self, width: u32, height: u32) -> (u32, u32) {
        if self.width == 0 || self.height == 0 {
            return (0, 0);
        }
        (width.div_ceil(self.width), height.div_ceil(self.height))
    }

    /// Compressed size of a `width x height` image.
    pub fn compressed_size(&self, width: u32, height: u32) -> Result<usize, CompressionError> {
        let (xblocks, yblocks) = self.blocks(width, height);
        (xblocks as usize)
            .checked_mul(yblocks as usize)
            .and_then(|n| n.checked_mul(self.bytes))
            .ok_or(CompressionError::DimensionsTooLarge { width, height })
    }

    /// Decode `input` into `dest` on the global task queue.
    pub fn decompress(
        &self,
        dest: &mut SurfaceMut<'_>,
        input: &[u8],
    ) -> Result<CompressionStatus, CompressionError> {
        DecompressRequest::new(self, input).decompress(dest)
    }

    /// Encode `source` into `output` on the global task queue.
    pub fn compress(
        &self,
        output: &mut [u8],
        source: &Surface<'_>,
    ) -> Result<CompressionStatus, CompressionError> {
        CompressRequest::new(self, output).compress(source)
    }
}
