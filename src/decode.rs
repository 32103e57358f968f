//! Decode dispatcher.
//!
//! Picks one of four strategies from the descriptor and destination:
//!
//! | codec granularity | destination matches block grid and native layout | otherwise |
//! |---|---|---|
//! | block | [`DispatchPath::DirectBlock`] | [`DispatchPath::ClipConvertBlock`] |
//! | whole surface | [`DispatchPath::DirectSurface`] | [`DispatchPath::ClipConvertSurface`] |
//!
//! Block codecs are parallelized per block-row. Each row's destination band is
//! split off the destination buffer with `split_at_mut` and moved into its own
//! task together with that row's compressed bytes, so no two tasks can touch
//! the same memory.

use alloc::vec;
use alloc::vec::Vec;

use crate::blit::Blitter;
use crate::codec::pvrtc;
use crate::error::CompressionError;
use crate::format::{DecodeFn, TextureCompressionInfo};
use crate::limits::Limits;
use crate::queue::TaskQueue;
use crate::surface::{Bitmap, RowsMut, SurfaceMut, validate};

/// Which strategy a dispatch call took.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchPath {
    /// Blocks decoded straight into the destination.
    DirectBlock,
    /// Blocks decoded into scratch, then clipped and converted.
    ClipConvertBlock,
    /// Whole image decoded straight into the destination.
    DirectSurface,
    /// Whole image decoded into a scratch bitmap, then converted.
    ClipConvertSurface,
    /// Blocks encoded through a per-task scratch bitmap.
    Encode,
}

/// Result of a successful dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressionStatus {
    /// No clipping and no pixel conversion were needed.
    pub direct: bool,
    pub path: DispatchPath,
}

// ── Band planning ───────────────────────────────────────────────────

/// Destination rows written by one block-row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowBand {
    /// Index of the block-row in the compressed data.
    pub block_row: u32,
    /// First destination row of the band.
    pub first_row: u32,
    /// Number of destination rows (less than the block height for a partial
    /// last block-row).
    pub rows: u32,
}

/// Split `height` destination rows into one band per block-row.
///
/// Bands are returned top to bottom and tile `0..height` exactly once. With
/// `origin`, block-row 0 is the bottom band and the partial block-row (if any)
/// is at the top.
pub fn plan_bands(height: u32, block_height: u32, origin: bool) -> Vec<RowBand> {
    if height == 0 || block_height == 0 {
        return Vec::new();
    }
    let count = height.div_ceil(block_height);
    let band = |block_row: u32| {
        let start = block_row * block_height;
        let rows = block_height.min(height - start);
        let first_row = if origin { height - start - rows } else { start };
        RowBand {
            block_row,
            first_row,
            rows,
        }
    };
    if origin {
        (0..count).rev().map(band).collect()
    } else {
        (0..count).map(band).collect()
    }
}

// ── Request ─────────────────────────────────────────────────────────

/// Decode request builder.
///
/// ```
/// use zenblocks::{DecompressRequest, PixelLayout, SurfaceMut, TaskQueue, TextureCompression};
///
/// let info = zenblocks::lookup(TextureCompression::Dxt1);
/// let blocks = vec![0u8; 16 * 16 * 8]; // 8 bytes per 4x4 block
/// let mut pixels = vec![0u8; 64 * 64 * 4];
/// let mut dest = SurfaceMut::packed(&mut pixels, 64, 64, PixelLayout::Rgba8)?;
/// let status = DecompressRequest::new(info, &blocks)
///     .with_queue(&TaskQueue::inline())
///     .decompress(&mut dest)?;
/// assert!(status.direct);
/// # Ok::<(), zenblocks::CompressionError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecompressRequest<'a> {
    info: &'a TextureCompressionInfo,
    input: &'a [u8],
    queue: Option<&'a TaskQueue>,
    limits: Option<&'a Limits>,
}

impl<'a> DecompressRequest<'a> {
    pub fn new(info: &'a TextureCompressionInfo, input: &'a [u8]) -> Self {
        Self {
            info,
            input,
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

    /// Decode into `dest`.
    ///
    /// Every error is reported before any byte of `dest` is written.
    pub fn decompress(
        self,
        dest: &mut SurfaceMut<'_>,
    ) -> Result<CompressionStatus, CompressionError> {
        let info = self.info;
        let Some(decode) = info.decode else {
            log::debug!("decompress rejected: no decoder for {:?}", info.compression);
            return Err(CompressionError::NoDecoder(info.compression));
        };
        if info.width == 0 || info.height == 0 {
            return Err(CompressionError::EmptyBlock(info.compression));
        }
        validate(
            dest.data().len(),
            dest.width,
            dest.height,
            dest.stride,
            dest.format,
        )?;
        if let Some(limits) = self.limits {
            limits.check(dest.width, dest.height)?;
        }

        let surface = info.is_surface();
        let no_clip = dest.width % info.width == 0 && dest.height % info.height == 0;
        let no_convert = dest.format == info.format;
        let direct = no_clip && no_convert;
        let path = match (surface, direct) {
            (false, true) => DispatchPath::DirectBlock,
            (false, false) => DispatchPath::ClipConvertBlock,
            (true, true) => DispatchPath::DirectSurface,
            (true, false) => DispatchPath::ClipConvertSurface,
        };
        let status = CompressionStatus { direct, path };

        if dest.width == 0 || dest.height == 0 {
            return Ok(status);
        }

        if !surface {
            if info.bytes == 0 {
                return Err(CompressionError::EmptyBlock(info.compression));
            }
            let needed = info.compressed_size(dest.width, dest.height)?;
            if self.input.len() < needed {
                log::debug!(
                    "decompress rejected: {:?} {}x{} needs {needed} bytes, got {}",
                    info.compression,
                    dest.width,
                    dest.height,
                    self.input.len()
                );
                return Err(CompressionError::InputTooSmall {
                    needed,
                    actual: self.input.len(),
                });
            }
        }

        log::debug!(
            "decompress {:?} {}x{} -> {:?} via {:?}",
            info.compression,
            dest.width,
            dest.height,
            dest.format,
            path
        );

        if surface {
            self.decode_surface(dest, decode, direct)?;
        } else {
            let global;
            let queue = match self.queue {
                Some(queue) => queue,
                None => {
                    global = TaskQueue::global();
                    &global
                }
            };
            self.decode_blocks(dest, decode, direct, queue)?;
        }
        Ok(status)
    }

    fn decode_surface(
        &self,
        dest: &mut SurfaceMut<'_>,
        decode: DecodeFn,
        direct: bool,
    ) -> Result<(), CompressionError> {
        let mut whole = *self.info;
        whole.width = dest.width;
        whole.height = dest.height;
        let origin = self.info.is_origin();

        let scratch_len = if direct {
            0
        } else {
            (dest.width as usize)
                .checked_mul(dest.height as usize)
                .and_then(|n| n.checked_mul(self.info.format.bytes_per_pixel()))
                .ok_or(CompressionError::DimensionsTooLarge {
                    width: dest.width,
                    height: dest.height,
                })?
        };
        if let Some(limits) = self.limits {
            let work = pvrtc::working_set(self.info.width, self.info.height, dest.width, dest.height);
            limits.check_memory(work.saturating_add(scratch_len))?;
        }

        if direct {
            decode(&whole, &mut dest.rows_mut(origin), self.input);
            return Ok(());
        }

        let mut scratch = Bitmap::new(dest.width, dest.height, self.info.format)?;
        let stride = scratch.stride();
        let rows = dest.height as usize;
        let mut view = if origin {
            RowsMut::flipped(scratch.data_mut(), stride, rows)
        } else {
            RowsMut::new(scratch.data_mut(), stride)
        };
        decode(&whole, &mut view, self.input);

        let width = dest.width as usize;
        let blitter = Blitter::new(self.info.format, dest.format);
        blitter.convert(&mut dest.rows_mut(false), scratch.data(), stride, width, rows);
        Ok(())
    }

    fn decode_blocks(
        &self,
        dest: &mut SurfaceMut<'_>,
        decode: DecodeFn,
        direct: bool,
        queue: &TaskQueue,
    ) -> Result<(), CompressionError> {
        let info = self.info;
        let (xblocks, _) = info.blocks(dest.width, dest.height);
        let bands = plan_bands(dest.height, info.height, info.is_origin());

        if !direct {
            let scratch = info.width as usize * info.height as usize * info.format.bytes_per_pixel();
            let tasks = queue.concurrency().min(bands.len()).max(1);
            if let Some(limits) = self.limits {
                limits.check_memory(scratch.saturating_mul(tasks))?;
            }
        }

        let plan = BlockPlan {
            info,
            decode,
            width: dest.width as usize,
            stride: dest.stride,
            blitter: Blitter::new(info.format, dest.format),
            direct,
        };
        let plan = &plan;
        let row_bytes = xblocks as usize * info.bytes;
        let input = self.input;
        let mut rest: &mut [u8] = dest.data_mut();

        log::trace!("decompress: {} block-row tasks", bands.len());
        queue.batch(|batch| {
            for band in bands {
                let len = (band.rows as usize * plan.stride).min(rest.len());
                let (band_dest, tail) = core::mem::take(&mut rest).split_at_mut(len);
                rest = tail;
                let start = band.block_row as usize * row_bytes;
                let job = BandJob {
                    band,
                    dest: band_dest,
                    blocks: &input[start..start + row_bytes],
                };
                batch.enqueue(move || plan.run(job));
            }
        });
        Ok(())
    }
}

/// Decode `input` into `dest` on rayon's global pool.
pub fn decompress(
    info: &TextureCompressionInfo,
    dest: &mut SurfaceMut<'_>,
    input: &[u8],
) -> Result<CompressionStatus, CompressionError> {
    DecompressRequest::new(info, input).decompress(dest)
}

// ── Block-row tasks ─────────────────────────────────────────────────

/// Read-only state shared by every block-row task of one call.
struct BlockPlan<'a> {
    info: &'a TextureCompressionInfo,
    decode: DecodeFn,
    width: usize,
    stride: usize,
    blitter: Blitter,
    direct: bool,
}

/// One unit of work: a block-row's destination band and compressed bytes.
struct BandJob<'a> {
    band: RowBand,
    dest: &'a mut [u8],
    blocks: &'a [u8],
}

impl BlockPlan<'_> {
    fn run(&self, job: BandJob<'_>) {
        let info = self.info;
        let rows = job.band.rows as usize;
        let mut view = if info.is_origin() {
            RowsMut::flipped(job.dest, self.stride, rows)
        } else {
            RowsMut::new(job.dest, self.stride)
        };
        let block_width = info.width as usize;
        let dst_bpp = self.blitter.destination().bytes_per_pixel();
        let blocks = job.blocks.chunks_exact(info.bytes);

        if self.direct {
            for (bx, block) in blocks.enumerate() {
                (self.decode)(info, &mut view.offset(bx * block_width * dst_bpp), block);
            }
            return;
        }

        let scratch_stride = block_width * info.format.bytes_per_pixel();
        let mut scratch = vec![0u8; scratch_stride * info.height as usize];
        for (bx, block) in blocks.enumerate() {
            let x = bx * block_width;
            let width = block_width.min(self.width - x);
            (self.decode)(info, &mut RowsMut::new(&mut scratch, scratch_stride), block);
            self.blitter.convert(
                &mut view.offset(x * dst_bpp),
                &scratch,
                scratch_stride,
                width,
                rows,
            );
        }
    }
}
