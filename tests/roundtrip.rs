use zenblocks::*;

fn encode(compression: TextureCompression, pixels: &[u8], w: u32, h: u32, layout: PixelLayout) -> Vec<u8> {
    let info = lookup(compression);
    let source = Surface::packed(pixels, w, h, layout).unwrap();
    let mut blocks = vec![0u8; info.compressed_size(w, h).unwrap()];
    let status = info.compress(&mut blocks, &source).unwrap();
    assert_eq!(status.path, DispatchPath::Encode);
    assert!(!status.direct);
    blocks
}

fn roundtrip(compression: TextureCompression, pixels: &[u8], w: u32, h: u32, layout: PixelLayout) -> Vec<u8> {
    let blocks = encode(compression, pixels, w, h, layout);
    let mut out = vec![0u8; pixels.len()];
    let mut dest = SurfaceMut::packed(&mut out, w, h, layout).unwrap();
    lookup(compression).decompress(&mut dest, &blocks).unwrap();
    out
}

fn max_error(a: &[u8], b: &[u8]) -> u8 {
    a.iter().zip(b).map(|(x, y)| x.abs_diff(*y)).max().unwrap_or(0)
}

/// RGBA image where every 4x4 block is one colour.
fn solid_blocks(w: u32, h: u32) -> Vec<u8> {
    let mut pixels = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let (bx, by) = (x / 4, y / 4);
            pixels.extend_from_slice(&[
                (bx * 60 + 10) as u8,
                (by * 70 + 20) as u8,
                ((bx + by) * 30 + 5) as u8,
                255,
            ]);
        }
    }
    pixels
}

#[test]
fn bc1_solid_blocks() {
    let pixels = solid_blocks(16, 16);
    let out = roundtrip(TextureCompression::Dxt1, &pixels, 16, 16, PixelLayout::Rgba8);
    assert!(max_error(&pixels, &out) <= 5, "max error {}", max_error(&pixels, &out));
}

#[test]
fn bc1_partial_edge_blocks() {
    let pixels = solid_blocks(10, 6);
    let blocks = encode(TextureCompression::Dxt1, &pixels, 10, 6, PixelLayout::Rgba8);
    assert_eq!(blocks.len(), 3 * 2 * 8);
    let out = roundtrip(TextureCompression::Dxt1, &pixels, 10, 6, PixelLayout::Rgba8);
    assert!(max_error(&pixels, &out) <= 5);
}

#[test]
fn bc1_punch_through_alpha() {
    let mut pixels = Vec::new();
    for _y in 0..8 {
        for x in 0..8 {
            let a = if x < 6 { 0 } else { 255 };
            pixels.extend_from_slice(&[255, 255, 255, a]);
        }
    }
    let out = roundtrip(TextureCompression::Dxt1Alpha1, &pixels, 8, 8, PixelLayout::Rgba8);
    for (i, px) in out.chunks(4).enumerate() {
        if i % 8 < 6 {
            assert_eq!(px[3], 0, "pixel {i}");
        } else {
            assert_eq!(px, [255, 255, 255, 255], "pixel {i}");
        }
    }
}

#[test]
fn bc2_explicit_alpha() {
    let mut pixels = Vec::new();
    for y in 0..8u32 {
        for x in 0..8u32 {
            pixels.extend_from_slice(&[100, 150, 200, (x * 30 + y * 2) as u8]);
        }
    }
    let out = roundtrip(TextureCompression::Dxt3, &pixels, 8, 8, PixelLayout::Rgba8);
    assert!(max_error(&pixels, &out) <= 9);
}

#[test]
fn bc3_interpolated_alpha() {
    let mut pixels = Vec::new();
    for y in 0..8u32 {
        for x in 0..8u32 {
            pixels.extend_from_slice(&[128, 128, 128, (x * 16 + y * 4) as u8]);
        }
    }
    let out = roundtrip(TextureCompression::Dxt5, &pixels, 8, 8, PixelLayout::Rgba8);
    for (a, b) in pixels.chunks(4).zip(out.chunks(4)) {
        assert!(a[3].abs_diff(b[3]) <= 6, "{a:?} {b:?}");
        assert!(max_error(&a[..3], &b[..3]) <= 5, "{a:?} {b:?}");
    }
}

#[test]
fn bc4_single_channel() {
    let pixels: Vec<u8> = (0..8u32 * 8).map(|i| ((i % 8) * 8 + (i / 8) * 2) as u8).collect();
    let out = roundtrip(TextureCompression::Rgtc1Red, &pixels, 8, 8, PixelLayout::R8);
    assert!(max_error(&pixels, &out) <= 4);
}

#[test]
fn bc5_two_channels() {
    let mut pixels = Vec::new();
    for y in 0..8u32 {
        for x in 0..8u32 {
            pixels.extend_from_slice(&[(x * 20) as u8, (255 - y * 20) as u8]);
        }
    }
    let out = roundtrip(TextureCompression::Rgtc2Rg, &pixels, 8, 8, PixelLayout::Rg8);
    assert!(max_error(&pixels, &out) <= 6);
}

#[test]
fn etc1_solid_blocks() {
    let pixels = solid_blocks(12, 8);
    let out = roundtrip(TextureCompression::Etc1Rgb, &pixels, 12, 8, PixelLayout::Rgba8);
    assert!(max_error(&pixels, &out) <= 12, "max error {}", max_error(&pixels, &out));
}

#[test]
fn bc4_bc5_signed() {
    let values: Vec<i8> = (0..8i32 * 8).map(|i| ((i % 8) * 16 + (i / 8) * 2 - 64) as i8).collect();
    let pixels: Vec<u8> = values.iter().map(|&v| v as u8).collect();
    let out = roundtrip(TextureCompression::Rgtc1SignedRed, &pixels, 8, 8, PixelLayout::R8Snorm);
    for (a, b) in values.iter().zip(&out) {
        assert!(a.abs_diff(*b as i8) <= 5, "{a} {}", *b as i8);
    }

    let pairs: Vec<u8> = values.iter().flat_map(|&v| [v as u8, v.saturating_neg() as u8]).collect();
    let out = roundtrip(TextureCompression::Rgtc2SignedRg, &pairs, 8, 8, PixelLayout::Rg8Snorm);
    for (a, b) in pairs.iter().zip(&out) {
        assert!((*a as i8).abs_diff(*b as i8) <= 5);
    }
}

#[test]
fn bc7_solid_blocks() {
    let pixels = solid_blocks(12, 8);
    let out = roundtrip(TextureCompression::BptcRgbaUnorm, &pixels, 12, 8, PixelLayout::Rgba8);
    assert!(max_error(&pixels, &out) <= 1, "max error {}", max_error(&pixels, &out));
}

#[test]
fn bc7_gradient_with_alpha() {
    let mut pixels = Vec::new();
    for _y in 0..8u32 {
        for x in 0..8u32 {
            let v = (x * 20) as u8;
            pixels.extend_from_slice(&[v, 255 - v, 90, 100 + (x * 10) as u8]);
        }
    }
    let out = roundtrip(TextureCompression::BptcSrgbAlphaUnorm, &pixels, 8, 8, PixelLayout::Rgba8);
    assert!(max_error(&pixels, &out) <= 5, "max error {}", max_error(&pixels, &out));
}

fn rgb_f32(values: &[[f32; 3]]) -> Vec<u8> {
    values.iter().flatten().flat_map(|v| v.to_ne_bytes()).collect()
}

fn assert_close_f32(expected: &[[f32; 3]], bytes: &[u8], tolerance: f32) {
    let got: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    for (e, g) in expected.iter().flatten().zip(got) {
        assert!((e - g).abs() <= e.abs() * tolerance, "{e} {g}");
    }
}

#[test]
fn bc6h_unsigned() {
    // Two values per block, alternating by column.
    let values: Vec<[f32; 3]> = (0..8 * 8)
        .map(|i| {
            let (x, y) = (i % 8, i / 8);
            let block = ((y / 4) * 2 + x / 4) as f32;
            if x % 2 == 0 {
                [0.5 + block, 2.0, 0.0]
            } else {
                [4.0 + block, 0.25, 100.0]
            }
        })
        .collect();
    let out = roundtrip(
        TextureCompression::BptcRgbUnsignedFloat,
        &rgb_f32(&values),
        8,
        8,
        PixelLayout::RgbF32,
    );
    assert_close_f32(&values, &out, 0.03);
}

#[test]
fn bc6h_signed() {
    let values: Vec<[f32; 3]> = (0..4 * 4)
        .map(|i| if i < 8 { [-3.0, 0.75, -0.5] } else { [1.5, -8.0, 0.125] })
        .collect();
    let out = roundtrip(
        TextureCompression::BptcRgbSignedFloat,
        &rgb_f32(&values),
        4,
        4,
        PixelLayout::RgbF32,
    );
    assert_close_f32(&values, &out, 0.04);
}

#[test]
fn source_layout_is_converted() {
    let rgba = solid_blocks(8, 8);
    let bgra: Vec<u8> = rgba
        .chunks(4)
        .flat_map(|px| [px[2], px[1], px[0], px[3]])
        .collect();
    let a = encode(TextureCompression::Dxt5, &rgba, 8, 8, PixelLayout::Rgba8);
    let b = encode(TextureCompression::Dxt5, &bgra, 8, 8, PixelLayout::Bgra8);
    assert_eq!(a, b);
}

#[test]
fn queues_agree() {
    let pixels = solid_blocks(40, 24);
    let info = lookup(TextureCompression::Dxt1);
    let source = Surface::packed(&pixels, 40, 24, PixelLayout::Rgba8).unwrap();
    let size = info.compressed_size(40, 24).unwrap();

    let mut inline = vec![0u8; size];
    CompressRequest::new(info, &mut inline)
        .with_queue(&TaskQueue::inline())
        .compress(&source)
        .unwrap();

    let pool = TaskQueue::with_config(&QueueConfig {
        threads: Some(3),
        thread_name: Some("encode".into()),
    })
    .unwrap();
    let mut pooled = vec![0u8; size];
    CompressRequest::new(info, &mut pooled)
        .with_queue(&pool)
        .compress(&source)
        .unwrap();
    assert_eq!(inline, pooled);
}

#[test]
fn missing_encoder_is_rejected() {
    let info = lookup(TextureCompression::AtcRgb);
    let pixels = vec![0u8; 4 * 4 * 4];
    let source = Surface::packed(&pixels, 4, 4, PixelLayout::Rgba8).unwrap();
    let mut out = vec![9u8; 8];
    assert!(matches!(
        info.compress(&mut out, &source),
        Err(CompressionError::NoEncoder(TextureCompression::AtcRgb))
    ));
    assert!(out.iter().all(|&b| b == 9));
}

#[test]
fn short_output_is_rejected() {
    let info = lookup(TextureCompression::Dxt5);
    let pixels = vec![0u8; 8 * 8 * 4];
    let source = Surface::packed(&pixels, 8, 8, PixelLayout::Rgba8).unwrap();
    let mut out = vec![9u8; 63];
    assert!(matches!(
        info.compress(&mut out, &source),
        Err(CompressionError::OutputTooSmall {
            needed: 64,
            actual: 63
        })
    ));
    assert!(out.iter().all(|&b| b == 9));
}

#[test]
fn zero_area_encodes_nothing() {
    let info = lookup(TextureCompression::Dxt1);
    let source = Surface::packed(&[], 0, 0, PixelLayout::Rgba8).unwrap();
    let mut out: [u8; 0] = [];
    assert!(info.compress(&mut out, &source).is_ok());
}

#[test]
fn encode_limits() {
    let info = lookup(TextureCompression::Dxt1);
    let pixels = vec![0u8; 16 * 16 * 4];
    let source = Surface::packed(&pixels, 16, 16, PixelLayout::Rgba8).unwrap();
    let mut out = vec![0u8; 128];
    let limits = Limits {
        max_pixels: Some(100),
        ..Default::default()
    };
    assert!(matches!(
        CompressRequest::new(info, &mut out)
            .with_limits(&limits)
            .compress(&source),
        Err(CompressionError::LimitExceeded(_))
    ));
}
