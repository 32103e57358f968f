//! # zenblocks
//!
//! Decode and encode dispatch for block-compressed GPU texture formats.
//!
//! Every supported format is described by a [`TextureCompressionInfo`]: its
//! block footprint and size, the DXGI, OpenGL and Vulkan codes that name it,
//! the pixel layout its codec produces, and the codec entry points. The
//! [`Registry`] maps any of those keys back to a descriptor.
//!
//! Decoding and encoding split the image into independent tasks and run them
//! on a [`TaskQueue`]. When the caller's surface already has the codec's pixel
//! layout, blocks are written straight into it; otherwise a per-task scratch
//! area is converted into place by a [`Blitter`].
//!
//! ## Supported Formats
//!
//! - **BCn / DXT**: BC1 (DXT1, DXT1A), BC2 (DXT3), BC3 (DXT5), BC4/RGTC1,
//!   BC5/RGTC2 (unsigned and signed), 3DC. Decode and encode.
//! - **BPTC**: BC6H (unsigned and signed half float) and BC7. Decode of every
//!   mode, single-mode encode.
//! - **ETC1 / ETC2 / EAC**: decode of every mode, ETC1-mode encode.
//! - **ATC**: RGB, explicit alpha, interpolated alpha. Decode.
//! - **PVRTC 1**: 2 and 4 bits per pixel. Decode (whole surface).
//! - **Packed**: RGB9E5, R11G11B10F, R10G11B11F, RGBG, GRGB, UYVY, YUY2. Decode.
//! - **LATC, PVRTC 2, ASTC**: registered with their codes so they can be
//!   identified, but carry no codec.
//!
//! ## Usage
//!
//! ```
//! use zenblocks::{PixelLayout, SurfaceMut, TextureCompression};
//!
//! // BC1, 16x16 pixels: 4x4 blocks of 8 bytes each.
//! let info = zenblocks::lookup(TextureCompression::Dxt1);
//! let blocks = vec![0u8; info.compressed_size(16, 16)?];
//!
//! let mut rgba = vec![0u8; 16 * 16 * 4];
//! let mut dest = SurfaceMut::packed(&mut rgba, 16, 16, PixelLayout::Rgba8)?;
//! info.decompress(&mut dest, &blocks)?;
//!
//! // Codes from DDS or KTX headers resolve to the same descriptor.
//! let by_gl = zenblocks::lookup(zenblocks::Lookup::Gl(info.gl));
//! assert_eq!(by_gl.compression, TextureCompression::Dxt1);
//! # Ok::<(), zenblocks::CompressionError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod blit;
mod codec;
mod decode;
mod encode;
mod error;
pub mod format;
mod limits;
mod pixel;
mod queue;
mod registry;
mod surface;

// Re-exports
pub use blit::Blitter;
pub use decode::{
    CompressionStatus, DecompressRequest, DispatchPath, RowBand, decompress, plan_bands,
};
pub use encode::{CompressRequest, compress};
pub use error::CompressionError;
pub use format::{
    CompressionFlags, DecodeFn, EncodeFn, TextureCompression, TextureCompressionInfo,
};
pub use limits::Limits;
pub use pixel::{Numeric, PixelLayout};
pub use queue::{Batch, QueueConfig, TaskQueue};
pub use registry::{Lookup, Registry, lookup, registry};
pub use surface::{Bitmap, RowsMut, Surface, SurfaceMut};

/// Typed pixels that can view a [`Bitmap`] of the matching layout.
#[cfg(feature = "rgb")]
pub trait TexelPixel: Copy {
    /// The byte layout this pixel type has in memory.
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl TexelPixel for rgb::Rgba<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}

#[cfg(feature = "rgb")]
impl TexelPixel for rgb::Rgb<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl TexelPixel for rgb::alt::BGRA<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Bgra8
    }
}

#[cfg(feature = "rgb")]
impl TexelPixel for rgb::alt::BGR<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Bgr8
    }
}
