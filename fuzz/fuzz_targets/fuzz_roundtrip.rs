#![no_main]
use libfuzzer_sys::fuzz_target;
use zenblocks::*;

fuzz_target!(|data: &[u8]| {
    // Header: format index, width, height; the rest fills an RGBA source image.
    if data.len() < 3 {
        return;
    }
    let encodable: Vec<_> = registry()
        .entries()
        .iter()
        .filter(|e| e.can_encode() && e.can_decode())
        .collect();
    let info = encodable[data[0] as usize % encodable.len()];
    let width = u32::from(data[1] % 32);
    let height = u32::from(data[2] % 32);
    let body = &data[3..];

    let len = width as usize * height as usize * 4;
    let pixels: Vec<u8> = (0..len)
        .map(|i| body.get(i % body.len().max(1)).copied().unwrap_or(0))
        .collect();
    let source = Surface::packed(&pixels, width, height, PixelLayout::Rgba8).unwrap();

    let mut blocks = vec![0u8; info.compressed_size(width, height).unwrap()];
    info.compress(&mut blocks, &source).unwrap();

    // Encoded output must always be decodable at the same size.
    let mut out = vec![0u8; len];
    let mut dest = SurfaceMut::packed(&mut out, width, height, PixelLayout::Rgba8).unwrap();
    info.decompress(&mut dest, &blocks).unwrap();

    // Fully opaque sources stay opaque through every colour codec.
    if pixels.chunks(4).all(|px| px[3] == 255) && info.format == PixelLayout::Rgba8 {
        assert!(out.chunks(4).all(|px| px[3] == 255));
    }
});
