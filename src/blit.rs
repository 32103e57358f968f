//! Pixel converter ("blitter").
//!
//! Copies a rectangle between two pixel layouts with clipping. Conversion is
//! chosen once at construction; `convert` is then safe to call from any number
//! of tasks at once as long as their destinations don't overlap.

use crate::pixel::PixelLayout;
use crate::surface::{RowsMut, Surface, SurfaceMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Path {
    /// Same memory representation: plain row copy.
    Copy,
    /// 4-byte RGBA <-> BGRA channel swap.
    SwapRedBlue,
    /// Per-pixel through normalized RGBA.
    Generic,
}

/// Converts pixel rows from one layout to another.
#[derive(Clone, Copy, Debug)]
pub struct Blitter {
    src: PixelLayout,
    dst: PixelLayout,
    path: Path,
}

impl Blitter {
    pub fn new(src: PixelLayout, dst: PixelLayout) -> Self {
        // Bgrx8 -> Bgra8 must force alpha, so it can't be a plain copy.
        let fills_alpha = src == PixelLayout::Bgrx8 && dst == PixelLayout::Bgra8;
        let path = if src.is_memory_compatible(dst) && !fills_alpha {
            Path::Copy
        } else if matches!(
            (src, dst),
            (PixelLayout::Rgba8, PixelLayout::Bgra8) | (PixelLayout::Bgra8, PixelLayout::Rgba8)
        ) {
            Path::SwapRedBlue
        } else {
            Path::Generic
        };
        Self { src, dst, path }
    }

    pub fn source(&self) -> PixelLayout {
        self.src
    }

    pub fn destination(&self) -> PixelLayout {
        self.dst
    }

    /// Copy `width` x `height` pixels from `src` (rows `src_stride` apart) into `dst`.
    ///
    /// The caller clips; zero-size regions are a no-op.
    pub fn convert(
        &self,
        dst: &mut RowsMut<'_>,
        src: &[u8],
        src_stride: usize,
        width: usize,
        height: usize,
    ) {
        if width == 0 || height == 0 {
            return;
        }
        let src_row_bytes = width * self.src.bytes_per_pixel();
        let dst_row_bytes = width * self.dst.bytes_per_pixel();
        for y in 0..height {
            let s = &src[y * src_stride..][..src_row_bytes];
            let d = &mut dst.row(y)[..dst_row_bytes];
            self.convert_row(d, s);
        }
    }

    /// Copy `src` into `dst` at (`x`, `y`), clipped to both surfaces.
    pub fn blit(&self, dst: &mut SurfaceMut<'_>, x: u32, y: u32, src: &Surface<'_>) {
        if x >= dst.width || y >= dst.height {
            return;
        }
        let width = src.width.min(dst.width - x) as usize;
        let height = src.height.min(dst.height - y) as usize;
        if width == 0 || height == 0 {
            return;
        }
        let offset = y as usize * dst.stride + x as usize * self.dst.bytes_per_pixel();
        let stride = dst.stride;
        let mut rows = RowsMut::new(&mut dst.data_mut()[offset..], stride);
        self.convert(&mut rows, src.data(), src.stride, width, height);
    }

    fn convert_row(&self, dst: &mut [u8], src: &[u8]) {
        match self.path {
            Path::Copy => dst.copy_from_slice(src),
            Path::SwapRedBlue => swap_red_blue(dst, src),
            Path::Generic => {
                let sb = self.src.bytes_per_pixel();
                let db = self.dst.bytes_per_pixel();
                for (d, s) in dst.chunks_exact_mut(db).zip(src.chunks_exact(sb)) {
                    self.dst.store(d, self.src.load(s));
                }
            }
        }
    }
}

#[cfg(feature = "simd")]
fn swap_red_blue(dst: &mut [u8], src: &[u8]) {
    if garb::bytes::rgba_to_bgra(src, dst).is_err() {
        swap_red_blue_scalar(dst, src);
    }
}

#[cfg(not(feature = "simd"))]
fn swap_red_blue(dst: &mut [u8], src: &[u8]) {
    swap_red_blue_scalar(dst, src);
}

fn swap_red_blue_scalar(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        d.copy_from_slice(&[s[2], s[1], s[0], s[3]]);
    }
}
