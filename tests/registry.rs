use zenblocks::*;

#[test]
fn every_variant_is_registered() {
    for &compression in TextureCompression::ALL {
        let info = lookup(compression);
        assert_eq!(info.compression, compression);
    }
    assert_eq!(registry().entries().len(), TextureCompression::ALL.len());
}

#[test]
fn sentinel_comes_first() {
    let entries = registry().entries();
    assert_eq!(entries[0].compression, TextureCompression::None);
    assert_eq!(entries[0].bytes, 0);
    assert!(!entries[0].can_decode());
    assert!(!entries[0].can_encode());
}

#[test]
fn code_zero_and_unknown_codes_fall_back_to_none() {
    assert_eq!(lookup(Lookup::Dxgi(0)).compression, TextureCompression::None);
    assert_eq!(lookup(Lookup::Gl(0)).compression, TextureCompression::None);
    assert_eq!(lookup(Lookup::Vulkan(0)).compression, TextureCompression::None);
    assert_eq!(
        lookup(Lookup::Gl(0xdead_beef)).compression,
        TextureCompression::None
    );
    assert_eq!(lookup(Lookup::Dxgi(9999)).compression, TextureCompression::None);
}

#[test]
fn compression_ids_are_unique() {
    let entries = registry().entries();
    for (i, a) in entries.iter().enumerate() {
        for b in &entries[i + 1..] {
            assert_ne!(a.compression, b.compression);
        }
    }
}

#[test]
fn shared_codes_resolve_to_the_first_entry() {
    // BC1 with and without one-bit alpha share DXGI 71.
    assert_eq!(lookup(TextureCompression::Dxt1Alpha1).dxgi, 71);
    assert_eq!(lookup(Lookup::Dxgi(71)).compression, TextureCompression::Dxt1);
}

#[test]
fn platform_codes_round_trip() {
    for info in &registry().entries()[1..] {
        if info.gl != 0 {
            let found = lookup(Lookup::Gl(info.gl));
            assert_eq!(found.gl, info.gl);
        }
        if info.dxgi != 0 {
            assert_eq!(lookup(Lookup::Dxgi(info.dxgi)).dxgi, info.dxgi);
        }
        if info.vulkan != 0 {
            assert_eq!(lookup(Lookup::Vulkan(info.vulkan)).vulkan, info.vulkan);
        }
    }
}

#[test]
fn well_known_codes() {
    assert_eq!(lookup(Lookup::Gl(0x83F0)).compression, TextureCompression::Dxt1);
    assert_eq!(lookup(Lookup::Gl(0x83F3)).compression, TextureCompression::Dxt5);
    assert_eq!(lookup(Lookup::Dxgi(77)).compression, TextureCompression::Dxt5);
    assert_eq!(lookup(Lookup::Gl(0x8D64)).compression, TextureCompression::Etc1Rgb);
    assert_eq!(lookup(Lookup::Vulkan(131)).compression, TextureCompression::Dxt1);
}

#[test]
fn block_geometry() {
    let dxt1 = lookup(TextureCompression::Dxt1);
    assert_eq!((dxt1.width, dxt1.height, dxt1.bytes), (4, 4, 8));
    assert_eq!(dxt1.blocks(10, 5), (3, 2));
    assert_eq!(dxt1.compressed_size(10, 5).unwrap(), 48);

    let dxt5 = lookup(TextureCompression::Dxt5);
    assert_eq!(dxt5.bytes, 16);

    let pvrtc = lookup(TextureCompression::PvrtcRgba2bpp);
    assert_eq!((pvrtc.width, pvrtc.height), (8, 4));
    assert!(pvrtc.is_surface());

    let astc = lookup(TextureCompression::Astc12x10);
    assert_eq!((astc.width, astc.height, astc.bytes), (12, 10, 16));
    assert!(!astc.can_decode());
}

#[test]
fn astc_constructor() {
    assert_eq!(TextureCompression::astc(4, 4, false), TextureCompression::Astc4x4);
    assert_eq!(TextureCompression::astc(8, 6, true), TextureCompression::AstcSrgb8x6);
    assert_eq!(TextureCompression::astc(7, 7, false), TextureCompression::None);
}

#[test]
fn custom_registry() {
    let only = *lookup(TextureCompression::Dxt3);
    let reg = Registry::new([only]).unwrap();
    assert_eq!(reg.entries().len(), 2);
    assert_eq!(reg.lookup(Lookup::Dxgi(only.dxgi)).compression, TextureCompression::Dxt3);
    assert_eq!(reg.lookup(TextureCompression::Dxt1).compression, TextureCompression::None);

    assert!(matches!(
        Registry::new([only, only]),
        Err(CompressionError::DuplicateEntry(TextureCompression::Dxt3))
    ));
    assert!(matches!(
        Registry::new([TextureCompressionInfo::NONE]),
        Err(CompressionError::DuplicateEntry(TextureCompression::None))
    ));
}
