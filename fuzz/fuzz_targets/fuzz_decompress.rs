#![no_main]
use libfuzzer_sys::fuzz_target;
use zenblocks::*;

const LAYOUTS: [PixelLayout; 6] = [
    PixelLayout::Rgba8,
    PixelLayout::Bgra8,
    PixelLayout::Rgb8,
    PixelLayout::R8,
    PixelLayout::Rg16,
    PixelLayout::RgbaF32,
];

fuzz_target!(|data: &[u8]| {
    // Header: format index, width, height, destination layout; the rest is compressed input.
    if data.len() < 4 {
        return;
    }
    let entries = registry().entries();
    let info = &entries[data[0] as usize % entries.len()];
    let width = u32::from(data[1] % 64);
    let height = u32::from(data[2] % 64);
    let layout = LAYOUTS[data[3] as usize % LAYOUTS.len()];
    let input = &data[4..];

    let mut pixels = vec![0u8; width as usize * height as usize * layout.bytes_per_pixel()];
    let Ok(mut dest) = SurfaceMut::packed(&mut pixels, width, height, layout) else {
        return;
    };
    // Must never panic, whatever the input length.
    let _ = DecompressRequest::new(info, input)
        .with_queue(&TaskQueue::inline())
        .decompress(&mut dest);
});
