//! Uncompressed image views.
//!
//! [`Surface`] and [`SurfaceMut`] borrow caller memory; [`Bitmap`] owns its
//! buffer and is what the dispatcher uses for scratch space. [`RowsMut`] is
//! the row-addressing view codecs write through: an origin row plus a signed
//! stride, so bottom-up writes stay bounds-checked.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::CompressionError;
use crate::pixel::PixelLayout;

/// Minimum buffer length for a strided image.
///
/// The last row only needs its visible bytes, not a full stride.
pub(crate) fn required_len(
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
) -> Result<usize, CompressionError> {
    if width == 0 || height == 0 {
        return Ok(0);
    }
    let row = (width as usize)
        .checked_mul(layout.bytes_per_pixel())
        .ok_or(CompressionError::DimensionsTooLarge { width, height })?;
    (height as usize - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(row))
        .ok_or(CompressionError::DimensionsTooLarge { width, height })
}

/// Check that `len` bytes can hold the image and that rows don't overlap.
pub(crate) fn validate(
    len: usize,
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
) -> Result<(), CompressionError> {
    let row = (width as usize).saturating_mul(layout.bytes_per_pixel());
    if stride < row {
        return Err(CompressionError::InvalidSurface(alloc::format!(
            "stride {stride} is smaller than a {width} pixel row of {row} bytes"
        )));
    }
    let needed = required_len(width, height, stride, layout)?;
    if len < needed {
        return Err(CompressionError::InvalidSurface(alloc::format!(
            "buffer holds {len} bytes, {width}x{height} with stride {stride} needs {needed}"
        )));
    }
    Ok(())
}

// ── Surface ─────────────────────────────────────────────────────────

/// Read-only view over an uncompressed image.
#[derive(Clone, Copy, Debug)]
pub struct Surface<'a> {
    data: &'a [u8],
    pub width: u32,
    pub height: u32,
    /// Distance in bytes between the starts of consecutive rows.
    pub stride: usize,
    pub format: PixelLayout,
}

impl<'a> Surface<'a> {
    /// Wrap `data`, checking that the stride and buffer length fit the dimensions.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelLayout,
    ) -> Result<Self, CompressionError> {
        validate(data.len(), width, height, stride, format)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Wrap a tightly packed buffer (`stride == width * bpp`).
    pub fn packed(
        data: &'a [u8],
        width: u32,
        height: u32,
        format: PixelLayout,
    ) -> Result<Self, CompressionError> {
        Self::new(data, width, height, width as usize * format.bytes_per_pixel(), format)
    }

    /// The underlying bytes, starting at the top-left pixel.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// A view of the rectangle at (`x`, `y`), clipped to this surface.
    ///
    /// The result may be smaller than requested, or empty.
    pub fn sub_surface(&self, x: u32, y: u32, width: u32, height: u32) -> Surface<'a> {
        let x = x.min(self.width);
        let y = y.min(self.height);
        let width = width.min(self.width - x);
        let height = height.min(self.height - y);
        let offset = if width == 0 || height == 0 {
            0
        } else {
            y as usize * self.stride + x as usize * self.format.bytes_per_pixel()
        };
        Surface {
            data: &self.data[offset..],
            width,
            height,
            stride: self.stride,
            format: self.format,
        }
    }
}

// ── SurfaceMut ──────────────────────────────────────────────────────

/// Writable view over an uncompressed image.
#[derive(Debug)]
pub struct SurfaceMut<'a> {
    data: &'a mut [u8],
    pub width: u32,
    pub height: u32,
    /// Distance in bytes between the starts of consecutive rows.
    pub stride: usize,
    pub format: PixelLayout,
}

impl<'a> SurfaceMut<'a> {
    /// Wrap `data`, checking that the stride and buffer length fit the dimensions.
    pub fn new(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelLayout,
    ) -> Result<Self, CompressionError> {
        validate(data.len(), width, height, stride, format)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Wrap a tightly packed buffer (`stride == width * bpp`).
    pub fn packed(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        format: PixelLayout,
    ) -> Result<Self, CompressionError> {
        let stride = width as usize * format.bytes_per_pixel();
        Self::new(data, width, height, stride, format)
    }

    pub fn data(&self) -> &[u8] {
        &*self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    pub fn as_surface(&self) -> Surface<'_> {
        Surface {
            data: &*self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
        }
    }

    /// Row view over the whole surface, top-down or (`flip`) bottom-up.
    pub fn rows_mut(&mut self, flip: bool) -> RowsMut<'_> {
        if flip {
            RowsMut::flipped(&mut *self.data, self.stride, self.height as usize)
        } else {
            RowsMut::new(&mut *self.data, self.stride)
        }
    }
}

// ── Bitmap ──────────────────────────────────────────────────────────

/// Owned, tightly packed image buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelLayout,
}

impl Bitmap {
    /// Zero-filled bitmap.
    pub fn new(width: u32, height: u32, format: PixelLayout) -> Result<Self, CompressionError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
            .ok_or(CompressionError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
            format,
        })
    }

    /// Take ownership of packed pixel data.
    pub fn from_vec(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelLayout,
    ) -> Result<Self, CompressionError> {
        validate(
            data.len(),
            width,
            height,
            width as usize * format.bytes_per_pixel(),
            format,
        )?;
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn as_surface(&self) -> Surface<'_> {
        Surface {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.stride(),
            format: self.format,
        }
    }

    pub fn as_surface_mut(&mut self) -> SurfaceMut<'_> {
        let stride = self.stride();
        SurfaceMut {
            data: &mut self.data,
            width: self.width,
            height: self.height,
            stride,
            format: self.format,
        }
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`CompressionError::InvalidSurface`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::TexelPixel>(&self) -> Result<&[P], CompressionError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        use rgb::AsPixels as _;
        if !self.format.is_memory_compatible(P::layout()) {
            return Err(CompressionError::InvalidSurface(alloc::format!(
                "pixel layout mismatch: expected {:?}, got {:?}",
                P::layout(),
                self.format
            )));
        }
        Ok(self.data.as_pixels())
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::TexelPixel>(&self) -> Result<imgref::ImgVec<P>, CompressionError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

// ── RowsMut ─────────────────────────────────────────────────────────

/// Mutable row addressing with a signed stride.
///
/// Row `y` starts at `origin + y * stride`. A negative stride walks upwards
/// from the origin, which is how bottom-up (`ORIGIN`) images are written.
/// Every access is bounds-checked against the borrowed slice.
#[derive(Debug)]
pub struct RowsMut<'a> {
    data: &'a mut [u8],
    origin: usize,
    stride: isize,
}

impl<'a> RowsMut<'a> {
    /// Top-down rows starting at byte 0.
    pub fn new(data: &'a mut [u8], stride: usize) -> Self {
        Self {
            data,
            origin: 0,
            stride: stride as isize,
        }
    }

    /// Bottom-up rows: row 0 is the last of `rows` rows in `data`.
    pub fn flipped(data: &'a mut [u8], stride: usize, rows: usize) -> Self {
        Self {
            data,
            origin: rows.saturating_sub(1) * stride,
            stride: -(stride as isize),
        }
    }

    /// Signed distance between consecutive rows.
    pub fn stride(&self) -> isize {
        self.stride
    }

    /// Bytes from the start of row `y` to the end of the view.
    pub fn row(&mut self, y: usize) -> &mut [u8] {
        let start = self.origin as isize + y as isize * self.stride;
        &mut self.data[start as usize..]
    }

    /// Reborrow with the origin moved `bytes` to the right (next block column).
    pub fn offset(&mut self, bytes: usize) -> RowsMut<'_> {
        RowsMut {
            data: &mut *self.data,
            origin: self.origin + bytes,
            stride: self.stride,
        }
    }
}
