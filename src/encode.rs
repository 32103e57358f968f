//! Encode dispatcher.
//!
//! One task per block-row. Every block goes through a task-local scratch
//! bitmap in the codec's native layout, even when the source already matches
//! it; partial edge blocks are padded by repeating their last column and row.

use alloc::vec;

use crate::blit::Blitter;
use crate::decode::{CompressionStatus, DispatchPath};
use crate::error::CompressionError;
use crate::format::{EncodeFn, TextureCompressionInfo};
use crate::limits::Limits;
use crate::queue::TaskQueue;
use crate::surface::{Bitmap, RowsMut, Surface, validate};

const STATUS: CompressionStatus = CompressionStatus {
    direct: false,
    path: DispatchPath::Encode,
};

/// Encode request builder.
///
/// ```
/// use zenblocks::{CompressRequest, PixelLayout, Surface, TextureCompression};
///
/// let info = zenblocks::lookup(TextureCompression::Dxt5);
/// let pixels = vec![128u8; 16 * 16 * 4];
/// let source = Surface::packed(&pixels, 16, 16, PixelLayout::Rgba8)?;
/// let mut blocks = vec![0u8; info.compressed_size(16, 16)?];
/// CompressRequest::new(info, &mut blocks).compress(&source)?;
/// # Ok::<(), zenblocks::CompressionError>(())
/// ```
#[derive(Debug)]
pub struct CompressRequest<'a> {
    info: &'a TextureCompressionInfo,
    output: &'a mut [u8],
    queue: Option<&'a TaskQueue>,
    limits: Option<&'a Limits>,
}

impl<'a> CompressRequest<'a> {
    pub fn new(info: &'a TextureCompressionInfo, output: &'a mut [u8]) -> Self {
        Self {
            info,
            output,
            queue: None,
            limits: None,
        }
    }

    /// Run on `queue` instead of rayon's global pool.
    pub fn with_queue(mut self, queue: &'a TaskQueue) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Encode `source`, writing `info.compressed_size(width, height)` bytes.
    ///
    /// Every error is reported before any byte of the output is written.
    pub fn compress(self, source: &Surface<'_>) -> Result<CompressionStatus, CompressionError> {
        let info = self.info;
        let Some(encode) = info.encode else {
            log::debug!("compress rejected: no encoder for {:?}", info.compression);
            return Err(CompressionError::NoEncoder(info.compression));
        };
        if info.width == 0 || info.height == 0 || info.bytes == 0 {
            return Err(CompressionError::EmptyBlock(info.compression));
        }
        validate(
            source.data().len(),
            source.width,
            source.height,
            source.stride,
            source.format,
        )?;
        if let Some(limits) = self.limits {
            limits.check(source.width, source.height)?;
        }
        let needed = info.compressed_size(source.width, source.height)?;
        if self.output.len() < needed {
            return Err(CompressionError::OutputTooSmall {
                needed,
                actual: self.output.len(),
            });
        }
        if source.width == 0 || source.height == 0 {
            return Ok(STATUS);
        }

        log::debug!(
            "compress {:?} {}x{} from {:?}",
            info.compression,
            source.width,
            source.height,
            source.format
        );

        let global;
        let queue = match self.queue {
            Some(queue) => queue,
            None => {
                global = TaskQueue::global();
                &global
            }
        };
        let limits = self.limits;
        let output = &mut self.output[..needed];
        if info.is_surface() {
            encode_surface(info, encode, output, source, limits)?;
        } else {
            encode_blocks(info, encode, output, source, limits, queue)?;
        }
        Ok(STATUS)
    }
}

/// Encode `source` into `output` on rayon's global pool.
pub fn compress(
    info: &TextureCompressionInfo,
    output: &mut [u8],
    source: &Surface<'_>,
) -> Result<CompressionStatus, CompressionError> {
    CompressRequest::new(info, output).compress(source)
}

fn encode_surface(
    info: &TextureCompressionInfo,
    encode: EncodeFn,
    output: &mut [u8],
    source: &Surface<'_>,
    limits: Option<&Limits>,
) -> Result<(), CompressionError> {
    if let Some(limits) = limits {
        let len = (source.width as usize)
            .saturating_mul(source.height as usize)
            .saturating_mul(info.format.bytes_per_pixel());
        limits.check_memory(len)?;
    }
    let mut native = Bitmap::new(source.width, source.height, info.format)?;
    let stride = native.stride();
    Blitter::new(source.format, info.format).convert(
        &mut RowsMut::new(native.data_mut(), stride),
        source.data(),
        source.stride,
        source.width as usize,
        source.height as usize,
    );
    let mut whole = *info;
    whole.width = source.width;
    whole.height = source.height;
    encode(&whole, output, native.data(), stride);
    Ok(())
}

fn encode_blocks(
    info: &TextureCompressionInfo,
    encode: EncodeFn,
    output: &mut [u8],
    source: &Surface<'_>,
    limits: Option<&Limits>,
    queue: &TaskQueue,
) -> Result<(), CompressionError> {
    let (xblocks, yblocks) = info.blocks(source.width, source.height);
    let block_width = info.width as usize;
    let block_height = info.height as usize;
    let bpp = info.format.bytes_per_pixel();
    let scratch_stride = block_width * bpp;
    let scratch_len = scratch_stride * block_height;
    if let Some(limits) = limits {
        let tasks = queue.concurrency().min(yblocks as usize).max(1);
        limits.check_memory(scratch_len.saturating_mul(tasks))?;
    }

    let blitter = Blitter::new(source.format, info.format);
    let blitter = &blitter;
    let source = *source;
    let row_bytes = xblocks as usize * info.bytes;

    log::trace!("compress: {yblocks} block-row tasks");
    queue.batch(|batch| {
        for (block_row, out_row) in output.chunks_mut(row_bytes).enumerate() {
            batch.enqueue(move || {
                let mut scratch = vec![0u8; scratch_len];
                let y = (block_row * block_height) as u32;
                for (bx, out) in out_row.chunks_exact_mut(info.bytes).enumerate() {
                    let x = (bx * block_width) as u32;
                    let part = source.sub_surface(x, y, info.width, info.height);
                    blitter.convert(
                        &mut RowsMut::new(&mut scratch, scratch_stride),
                        part.data(),
                        part.stride,
                        part.width as usize,
                        part.height as usize,
                    );
                    pad_block(
                        &mut scratch,
                        scratch_stride,
                        bpp,
                        part.width as usize,
                        part.height as usize,
                    );
                    encode(info, out, &scratch, scratch_stride);
                }
            });
        }
    });
    Ok(())
}

/// Fill a block past its `width x height` valid region by repeating the last
/// valid column, then the last valid row.
fn pad_block(scratch: &mut [u8], stride: usize, bpp: usize, width: usize, height: usize) {
    if width == 0 || height == 0 {
        return;
    }
    let rows = scratch.len() / stride;
    for row in scratch.chunks_exact_mut(stride).take(height) {
        let (valid, rest) = row.split_at_mut(width * bpp);
        let last = &valid[(width - 1) * bpp..];
        for px in rest.chunks_exact_mut(bpp) {
            px.copy_from_slice(last);
        }
    }
    for y in height..rows {
        scratch.copy_within((height - 1) * stride..height * stride, y * stride);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_repeats_edges() {
        // 3x3 block, 1 byte per pixel, valid 2x2
        let mut block = [1, 2, 0, 3, 4, 0, 0, 0, 0];
        pad_block(&mut block, 3, 1, 2, 2);
        assert_eq!(block, [1, 2, 2, 3, 4, 4, 3, 4, 4]);
    }

    #[test]
    fn full_block_is_untouched() {
        let mut block = [1, 2, 3, 4];
        pad_block(&mut block, 2, 1, 2, 2);
        assert_eq!(block, [1, 2, 3, 4]);
    }
}
