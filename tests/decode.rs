use std::sync::atomic::{AtomicU32, Ordering};

use zenblocks::*;

/// Fills its block with `tag * 10 + row`, one byte per pixel.
fn tag_rows(info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    for y in 0..info.height as usize {
        output.row(y)[..info.width as usize].fill(input[0] * 10 + y as u8);
    }
}

fn tagged(flags: CompressionFlags) -> TextureCompressionInfo {
    TextureCompressionInfo::new(TextureCompression::Dxt1, 4, 4, 1, PixelLayout::R8)
        .with_decoder(tag_rows)
        .with_flags(flags)
}

/// Deterministic pseudo-random bytes.
fn noise(len: usize) -> Vec<u8> {
    let mut state = 0x1234_5678u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

#[test]
fn clipped_blocks_land_in_place() {
    let info = tagged(CompressionFlags::NONE);
    let tags: Vec<u8> = (1..=9).collect();
    let mut pixels = vec![0u8; 10 * 10];
    let mut dest = SurfaceMut::packed(&mut pixels, 10, 10, PixelLayout::R8).unwrap();
    let status = DecompressRequest::new(&info, &tags)
        .decompress(&mut dest)
        .unwrap();
    assert_eq!(status.path, DispatchPath::ClipConvertBlock);
    assert!(!status.direct);

    for y in 0..10 {
        for x in 0..10 {
            let tag = 1 + (y / 4) * 3 + x / 4;
            let expected = tag as u8 * 10 + (y % 4) as u8;
            assert_eq!(pixels[y * 10 + x], expected, "pixel {x},{y}");
        }
    }
}

static DIRECT_CALLS: [AtomicU32; 16] = [const { AtomicU32::new(0) }; 16];
static CLIPPED_CALLS: [AtomicU32; 16] = [const { AtomicU32::new(0) }; 16];

/// Adds one to every byte of its block, so each destination byte ends up
/// holding its write count on top of the fill value.
fn count_writes(info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    DIRECT_CALLS[input[0] as usize].fetch_add(1, Ordering::Relaxed);
    for y in 0..info.height as usize {
        for b in &mut output.row(y)[..info.width as usize] {
            *b = b.wrapping_add(1);
        }
    }
}

fn count_tags(info: &TextureCompressionInfo, output: &mut RowsMut<'_>, input: &[u8]) {
    CLIPPED_CALLS[input[0] as usize].fetch_add(1, Ordering::Relaxed);
    tag_rows(info, output, input);
}

fn reset(calls: &[AtomicU32]) {
    for c in calls {
        c.store(0, Ordering::Relaxed);
    }
}

fn assert_each_tag_decoded_once(calls: &[AtomicU32], tags: usize) {
    for (tag, c) in calls.iter().enumerate() {
        let expected = u32::from((1..=tags).contains(&tag));
        assert_eq!(c.load(Ordering::Relaxed), expected, "tag {tag}");
    }
}

/// Value `tag_rows` leaves at (x, y) of a `width x height` destination.
fn tag_at(x: usize, y: usize, width: usize, height: usize, origin: bool) -> u8 {
    let y = if origin { height - 1 - y } else { y };
    let tag = 1 + (y / 4) * width.div_ceil(4) + x / 4;
    (tag * 10 + y % 4) as u8
}

#[test]
fn direct_path_writes_each_byte_once() {
    for (width, height) in [(12usize, 8usize), (16, 12)] {
        for origin in [false, true] {
            let flags = if origin { CompressionFlags::ORIGIN } else { CompressionFlags::NONE };
            let info = TextureCompressionInfo::new(TextureCompression::Dxt1, 4, 4, 1, PixelLayout::R8)
                .with_decoder(count_writes)
                .with_flags(flags);
            let blocks = (width / 4) * (height / 4);
            let tags: Vec<u8> = (1..=blocks as u8).collect();
            let stride = width + 3;
            let mut pixels = vec![0xAAu8; stride * height + 5];
            reset(&DIRECT_CALLS);

            let mut dest =
                SurfaceMut::new(&mut pixels, width as u32, height as u32, stride, PixelLayout::R8)
                    .unwrap();
            let status = info.decompress(&mut dest, &tags).unwrap();
            assert_eq!(status.path, DispatchPath::DirectBlock);
            assert_each_tag_decoded_once(&DIRECT_CALLS, blocks);

            for (i, &b) in pixels.iter().enumerate() {
                let (x, y) = (i % stride, i / stride);
                let expected = if x < width && y < height { 0xAB } else { 0xAA };
                assert_eq!(b, expected, "{width}x{height} origin={origin} byte {x},{y}");
            }
        }
    }
}

#[test]
fn clipped_path_writes_each_byte_once() {
    let cases = [
        (10usize, 10usize, PixelLayout::R8),
        (13, 7, PixelLayout::R8),
        (12, 8, PixelLayout::Rgba8),
    ];
    for (width, height, layout) in cases {
        for origin in [false, true] {
            let flags = if origin { CompressionFlags::ORIGIN } else { CompressionFlags::NONE };
            let info = TextureCompressionInfo::new(TextureCompression::Dxt1, 4, 4, 1, PixelLayout::R8)
                .with_decoder(count_tags)
                .with_flags(flags);
            let blocks = width.div_ceil(4) * height.div_ceil(4);
            let tags: Vec<u8> = (1..=blocks as u8).collect();
            let bpp = layout.bytes_per_pixel();
            let stride = width * bpp + 3;

            // A byte still holding the fill value after both runs was never written.
            for fill in [0x00u8, 0xFF] {
                let mut pixels = vec![fill; stride * height];
                reset(&CLIPPED_CALLS);
                let mut dest =
                    SurfaceMut::new(&mut pixels, width as u32, height as u32, stride, layout)
                        .unwrap();
                let status = info.decompress(&mut dest, &tags).unwrap();
                assert_eq!(status.path, DispatchPath::ClipConvertBlock);
                assert_each_tag_decoded_once(&CLIPPED_CALLS, blocks);

                for (y, row) in pixels.chunks(stride).enumerate() {
                    for x in 0..width {
                        let v = tag_at(x, y, width, height, origin);
                        let expected = if bpp == 1 { vec![v] } else { vec![v, 0, 0, 255] };
                        assert_eq!(
                            &row[x * bpp..(x + 1) * bpp],
                            &expected[..],
                            "{width}x{height} {layout:?} origin={origin} fill={fill} pixel {x},{y}"
                        );
                    }
                    assert!(
                        row[width * bpp..].iter().all(|&b| b == fill),
                        "{width}x{height} origin={origin} padding of row {y}"
                    );
                }
            }
        }
    }
}

/// Whole-image decoder: row `y` of its view gets `y + 1`.
fn number_rows(info: &TextureCompressionInfo, output: &mut RowsMut<'_>, _input: &[u8]) {
    for y in 0..info.height as usize {
        output.row(y)[..info.width as usize].fill(y as u8 + 1);
    }
}

#[test]
fn surface_codec_writes_bottom_up() {
    let info = TextureCompressionInfo::new(TextureCompression::PvrtcRgba4bpp, 4, 4, 8, PixelLayout::R8)
        .with_decoder(number_rows)
        .with_flags(CompressionFlags::SURFACE | CompressionFlags::ORIGIN);
    let cases = [
        (8usize, 8usize, DispatchPath::DirectSurface),
        (6, 6, DispatchPath::ClipConvertSurface),
    ];
    for (width, height, path) in cases {
        let stride = width + 3;
        let mut pixels = vec![0xAAu8; stride * height];
        let mut dest =
            SurfaceMut::new(&mut pixels, width as u32, height as u32, stride, PixelLayout::R8)
                .unwrap();
        let status = info.decompress(&mut dest, &[]).unwrap();
        assert_eq!(status.path, path);

        for (y, row) in pixels.chunks(stride).enumerate() {
            assert!(
                row[..width].iter().all(|&b| usize::from(b) == height - y),
                "{path:?} row {y}: {:?}",
                &row[..width]
            );
            assert!(row[width..].iter().all(|&b| b == 0xAA), "{path:?} padding of row {y}");
        }
    }
}

#[test]
fn aligned_native_destination_is_direct() {
    let info = tagged(CompressionFlags::NONE);
    let tags: Vec<u8> = (1..=6).collect();
    let mut pixels = vec![0u8; 12 * 8];
    let mut dest = SurfaceMut::packed(&mut pixels, 12, 8, PixelLayout::R8).unwrap();
    let status = info.decompress(&mut dest, &tags).unwrap();
    assert_eq!(status.path, DispatchPath::DirectBlock);
    assert!(status.direct);
    assert_eq!(pixels[0], 10);
    assert_eq!(pixels[12 * 7 + 11], 63);
}

#[test]
fn padded_stride_is_left_alone() {
    let info = tagged(CompressionFlags::NONE);
    let tags = [1u8, 2];
    let stride = 11;
    let mut pixels = vec![0xAAu8; stride * 4];
    let mut dest = SurfaceMut::new(&mut pixels, 8, 4, stride, PixelLayout::R8).unwrap();
    info.decompress(&mut dest, &tags).unwrap();
    for row in pixels.chunks(stride) {
        assert!(row[8..].iter().all(|&b| b == 0xAA));
    }
}

#[test]
fn origin_writes_bottom_up() {
    let info = tagged(CompressionFlags::ORIGIN);
    let tags = [1u8, 2];
    let mut pixels = vec![0u8; 4 * 8];
    let mut dest = SurfaceMut::packed(&mut pixels, 4, 8, PixelLayout::R8).unwrap();
    let status = info.decompress(&mut dest, &tags).unwrap();
    assert!(status.direct);
    let column: Vec<u8> = pixels.chunks(4).map(|row| row[0]).collect();
    assert_eq!(column, [23, 22, 21, 20, 13, 12, 11, 10]);
}

#[test]
fn origin_with_partial_block_row() {
    let info = tagged(CompressionFlags::ORIGIN);
    let tags = [1u8, 2];
    let mut pixels = vec![0u8; 4 * 6];
    let mut dest = SurfaceMut::packed(&mut pixels, 4, 6, PixelLayout::R8).unwrap();
    let status = info.decompress(&mut dest, &tags).unwrap();
    assert_eq!(status.path, DispatchPath::ClipConvertBlock);
    let column: Vec<u8> = pixels.chunks(4).map(|row| row[0]).collect();
    assert_eq!(column, [21, 20, 13, 12, 11, 10]);
}

#[test]
fn clipped_decode_matches_direct_decode() {
    let info = lookup(TextureCompression::Dxt1);
    let blocks = noise(info.compressed_size(16, 16).unwrap());

    let mut full = vec![0u8; 16 * 16 * 4];
    let mut dest = SurfaceMut::packed(&mut full, 16, 16, PixelLayout::Rgba8).unwrap();
    assert!(info.decompress(&mut dest, &blocks).unwrap().direct);

    // 13x11 covers the top three block-rows of the 16x16 grid.
    let clipped_blocks = &blocks[..info.compressed_size(13, 11).unwrap()];
    let mut clipped = vec![0u8; 13 * 11 * 4];
    let mut dest = SurfaceMut::packed(&mut clipped, 13, 11, PixelLayout::Rgba8).unwrap();
    let status = info.decompress(&mut dest, clipped_blocks).unwrap();
    assert_eq!(status.path, DispatchPath::ClipConvertBlock);

    for y in 0..11 {
        assert_eq!(
            clipped[y * 13 * 4..(y + 1) * 13 * 4],
            full[y * 16 * 4..y * 16 * 4 + 13 * 4],
            "row {y}"
        );
    }
}

#[test]
fn converted_decode_matches_native_decode() {
    let info = lookup(TextureCompression::Dxt5);
    let blocks = noise(info.compressed_size(8, 8).unwrap());

    let mut rgba = vec![0u8; 8 * 8 * 4];
    let mut dest = SurfaceMut::packed(&mut rgba, 8, 8, PixelLayout::Rgba8).unwrap();
    info.decompress(&mut dest, &blocks).unwrap();

    let mut bgra = vec![0u8; 8 * 8 * 4];
    let mut dest = SurfaceMut::packed(&mut bgra, 8, 8, PixelLayout::Bgra8).unwrap();
    let status = info.decompress(&mut dest, &blocks).unwrap();
    assert_eq!(status.path, DispatchPath::ClipConvertBlock);

    for (a, b) in rgba.chunks(4).zip(bgra.chunks(4)) {
        assert_eq!([a[2], a[1], a[0], a[3]], b);
    }
}

#[test]
fn queues_agree() {
    let info = lookup(TextureCompression::Etc2Rgba);
    let blocks = noise(info.compressed_size(64, 40).unwrap());
    let pool = TaskQueue::with_config(&QueueConfig {
        threads: Some(4),
        thread_name: None,
    })
    .unwrap();

    let mut results = Vec::new();
    for queue in [TaskQueue::inline(), TaskQueue::global(), pool] {
        let mut pixels = vec![0u8; 61 * 37 * 4];
        let mut dest = SurfaceMut::packed(&mut pixels, 61, 37, PixelLayout::Rgba8).unwrap();
        // 61x37 covers the same 16x10 block grid as 64x40.
        DecompressRequest::new(info, &blocks)
            .with_queue(&queue)
            .decompress(&mut dest)
            .unwrap();
        results.push(pixels);
    }
    assert_eq!(results[0], results[1]);
    assert_eq!(results[0], results[2]);
}

#[test]
fn missing_decoder_leaves_destination_untouched() {
    let info = lookup(TextureCompression::Latc1Luminance);
    let mut pixels = vec![7u8; 16];
    let mut dest = SurfaceMut::packed(&mut pixels, 4, 4, PixelLayout::R8).unwrap();
    let err = info.decompress(&mut dest, &[0u8; 8]).unwrap_err();
    assert!(matches!(err, CompressionError::NoDecoder(TextureCompression::Latc1Luminance)));
    assert!(pixels.iter().all(|&b| b == 7));
}

#[test]
fn short_input_is_rejected() {
    let info = lookup(TextureCompression::Dxt1);
    let mut pixels = vec![7u8; 16 * 16 * 4];
    let mut dest = SurfaceMut::packed(&mut pixels, 16, 16, PixelLayout::Rgba8).unwrap();
    let err = info.decompress(&mut dest, &[0u8; 100]).unwrap_err();
    assert!(matches!(
        err,
        CompressionError::InputTooSmall {
            needed: 128,
            actual: 100
        }
    ));
    assert!(pixels.iter().all(|&b| b == 7));
}

#[test]
fn empty_footprint_is_rejected() {
    let info = TextureCompressionInfo::new(TextureCompression::Dxt1, 0, 0, 8, PixelLayout::R8)
        .with_decoder(tag_rows);
    let mut pixels = vec![0u8; 16];
    let mut dest = SurfaceMut::packed(&mut pixels, 4, 4, PixelLayout::R8).unwrap();
    assert!(matches!(
        info.decompress(&mut dest, &[0u8; 8]),
        Err(CompressionError::EmptyBlock(_))
    ));
}

#[test]
fn zero_area_succeeds_without_input() {
    let info = lookup(TextureCompression::Dxt1);
    let mut dest = SurfaceMut::packed(&mut [], 0, 0, PixelLayout::Rgba8).unwrap();
    assert!(info.decompress(&mut dest, &[]).is_ok());
}

#[test]
fn limits_are_enforced() {
    let info = lookup(TextureCompression::Dxt1);
    let blocks = vec![0u8; info.compressed_size(16, 16).unwrap()];
    let mut pixels = vec![0u8; 16 * 16 * 4];
    let mut dest = SurfaceMut::packed(&mut pixels, 16, 16, PixelLayout::Rgba8).unwrap();

    let limits = Limits {
        max_width: Some(8),
        ..Default::default()
    };
    let err = DecompressRequest::new(info, &blocks)
        .with_limits(&limits)
        .decompress(&mut dest)
        .unwrap_err();
    assert!(matches!(err, CompressionError::LimitExceeded(_)));

    let limits = Limits {
        max_memory_bytes: Some(1),
        ..Default::default()
    };
    let mut bgra = vec![0u8; 16 * 16 * 4];
    let mut dest = SurfaceMut::packed(&mut bgra, 16, 16, PixelLayout::Bgra8).unwrap();
    let err = DecompressRequest::new(info, &blocks)
        .with_limits(&limits)
        .decompress(&mut dest)
        .unwrap_err();
    assert!(matches!(err, CompressionError::LimitExceeded(_)));
}

#[test]
fn surface_codec_paths() {
    let info = lookup(TextureCompression::PvrtcRgba4bpp);
    let blocks = noise(info.compressed_size(8, 8).unwrap());

    let mut rgba = vec![0u8; 8 * 8 * 4];
    let mut dest = SurfaceMut::packed(&mut rgba, 8, 8, PixelLayout::Rgba8).unwrap();
    let status = info.decompress(&mut dest, &blocks).unwrap();
    assert_eq!(status.path, DispatchPath::DirectSurface);

    let mut bgra = vec![0u8; 8 * 8 * 4];
    let mut dest = SurfaceMut::packed(&mut bgra, 8, 8, PixelLayout::Bgra8).unwrap();
    let status = info.decompress(&mut dest, &blocks).unwrap();
    assert_eq!(status.path, DispatchPath::ClipConvertSurface);

    for (a, b) in rgba.chunks(4).zip(bgra.chunks(4)) {
        assert_eq!([a[2], a[1], a[0], a[3]], b);
    }
}

#[test]
fn surface_codec_tolerates_short_input() {
    let info = lookup(TextureCompression::PvrtcRgb2bpp);
    let mut pixels = vec![0u8; 16 * 8 * 4];
    let mut dest = SurfaceMut::packed(&mut pixels, 16, 8, PixelLayout::Rgba8).unwrap();
    assert!(info.decompress(&mut dest, &[0u8; 3]).is_ok());
}

#[test]
fn packed_formats_decode() {
    let info = lookup(TextureCompression::Uyvy);
    // U=128 Y0=235 V=128 Y1=16: white then black
    let input = [128u8, 235, 128, 16];
    let mut pixels = vec![0u8; 2 * 4];
    let mut dest = SurfaceMut::packed(&mut pixels, 2, 1, PixelLayout::Rgba8).unwrap();
    info.decompress(&mut dest, &input).unwrap();
    assert!(pixels[..3].iter().all(|&c| c >= 250), "{pixels:?}");
    assert!(pixels[4..7].iter().all(|&c| c <= 5), "{pixels:?}");
    assert_eq!(pixels[3], 255);
}

#[test]
fn surface_codec_memory_is_limited() {
    let info = lookup(TextureCompression::PvrtcRgba4bpp);
    let blocks = noise(info.compressed_size(64, 64).unwrap());
    let mut pixels = vec![7u8; 64 * 64 * 4];
    let mut dest = SurfaceMut::packed(&mut pixels, 64, 64, PixelLayout::Rgba8).unwrap();

    let tight = Limits {
        max_memory_bytes: Some(1024),
        ..Default::default()
    };
    let err = DecompressRequest::new(info, &blocks)
        .with_limits(&tight)
        .decompress(&mut dest)
        .unwrap_err();
    assert!(matches!(err, CompressionError::LimitExceeded(_)));
    assert!(pixels.iter().all(|&b| b == 7));

    let roomy = Limits {
        max_memory_bytes: Some(1 << 20),
        ..Default::default()
    };
    let mut dest = SurfaceMut::packed(&mut pixels, 64, 64, PixelLayout::Rgba8).unwrap();
    let status = DecompressRequest::new(info, &blocks)
        .with_limits(&roomy)
        .decompress(&mut dest)
        .unwrap();
    assert_eq!(status.path, DispatchPath::DirectSurface);
}
