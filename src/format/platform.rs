//! Platform format codes for the three consumer ecosystems.
//!
//! Only codes that some registry entry maps to are listed. A code of 0 means
//! "no equivalent" and always resolves to [`TextureCompression::None`](super::TextureCompression::None).

/// `DXGI_FORMAT` values.
pub mod dxgi {
    pub const FORMAT_R11G11B10_FLOAT: u32 = 26;
    pub const FORMAT_R9G9B9E5_SHAREDEXP: u32 = 67;
    pub const FORMAT_R8G8_B8G8_UNORM: u32 = 68;
    pub const FORMAT_G8R8_G8B8_UNORM: u32 = 69;
    pub const FORMAT_BC1_UNORM: u32 = 71;
    pub const FORMAT_BC1_UNORM_SRGB: u32 = 72;
    pub const FORMAT_BC2_UNORM: u32 = 74;
    pub const FORMAT_BC2_UNORM_SRGB: u32 = 75;
    pub const FORMAT_BC3_UNORM: u32 = 77;
    pub const FORMAT_BC3_UNORM_SRGB: u32 = 78;
    pub const FORMAT_BC4_UNORM: u32 = 80;
    pub const FORMAT_BC4_SNORM: u32 = 81;
    pub const FORMAT_BC5_UNORM: u32 = 83;
    pub const FORMAT_BC5_SNORM: u32 = 84;
    pub const FORMAT_BC6H_UF16: u32 = 95;
    pub const FORMAT_BC6H_SF16: u32 = 96;
    pub const FORMAT_BC7_UNORM: u32 = 98;
    pub const FORMAT_BC7_UNORM_SRGB: u32 = 99;
    pub const FORMAT_YUY2: u32 = 107;
}

/// OpenGL internal format enums.
pub mod gl {
    pub const COMPRESSED_RGB_S3TC_DXT1_EXT: u32 = 0x83F0;
    pub const COMPRESSED_RGBA_S3TC_DXT1_EXT: u32 = 0x83F1;
    pub const COMPRESSED_RGBA_S3TC_DXT3_EXT: u32 = 0x83F2;
    pub const COMPRESSED_RGBA_S3TC_DXT5_EXT: u32 = 0x83F3;
    pub const COMPRESSED_SRGB_S3TC_DXT1_EXT: u32 = 0x8C4C;
    pub const COMPRESSED_SRGB_ALPHA_S3TC_DXT1_EXT: u32 = 0x8C4D;
    pub const COMPRESSED_SRGB_ALPHA_S3TC_DXT3_EXT: u32 = 0x8C4E;
    pub const COMPRESSED_SRGB_ALPHA_S3TC_DXT5_EXT: u32 = 0x8C4F;

    pub const ATC_RGB_AMD: u32 = 0x8C92;
    pub const ATC_RGBA_EXPLICIT_ALPHA_AMD: u32 = 0x8C93;
    pub const ATC_RGBA_INTERPOLATED_ALPHA_AMD: u32 = 0x87EE;

    pub const AMD_3DC_X: u32 = 0x87F9;
    pub const AMD_3DC_XY: u32 = 0x87FA;

    pub const COMPRESSED_LUMINANCE_LATC1_EXT: u32 = 0x8C70;
    pub const COMPRESSED_SIGNED_LUMINANCE_LATC1_EXT: u32 = 0x8C71;
    pub const COMPRESSED_LUMINANCE_ALPHA_LATC2_EXT: u32 = 0x8C72;
    pub const COMPRESSED_SIGNED_LUMINANCE_ALPHA_LATC2_EXT: u32 = 0x8C73;

    pub const COMPRESSED_RED_RGTC1: u32 = 0x8DBB;
    pub const COMPRESSED_SIGNED_RED_RGTC1: u32 = 0x8DBC;
    pub const COMPRESSED_RG_RGTC2: u32 = 0x8DBD;
    pub const COMPRESSED_SIGNED_RG_RGTC2: u32 = 0x8DBE;

    pub const COMPRESSED_RGBA_BPTC_UNORM: u32 = 0x8E8C;
    pub const COMPRESSED_SRGB_ALPHA_BPTC_UNORM: u32 = 0x8E8D;
    pub const COMPRESSED_RGB_BPTC_SIGNED_FLOAT: u32 = 0x8E8E;
    pub const COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT: u32 = 0x8E8F;

    pub const COMPRESSED_RGB_PVRTC_4BPPV1_IMG: u32 = 0x8C00;
    pub const COMPRESSED_RGB_PVRTC_2BPPV1_IMG: u32 = 0x8C01;
    pub const COMPRESSED_RGBA_PVRTC_4BPPV1_IMG: u32 = 0x8C02;
    pub const COMPRESSED_RGBA_PVRTC_2BPPV1_IMG: u32 = 0x8C03;
    pub const COMPRESSED_RGBA_PVRTC_2BPPV2_IMG: u32 = 0x9137;
    pub const COMPRESSED_RGBA_PVRTC_4BPPV2_IMG: u32 = 0x9138;
    pub const COMPRESSED_SRGB_PVRTC_2BPPV1_EXT: u32 = 0x8A54;
    pub const COMPRESSED_SRGB_PVRTC_4BPPV1_EXT: u32 = 0x8A55;
    pub const COMPRESSED_SRGB_ALPHA_PVRTC_2BPPV1_EXT: u32 = 0x8A56;
    pub const COMPRESSED_SRGB_ALPHA_PVRTC_4BPPV1_EXT: u32 = 0x8A57;

    pub const ETC1_RGB8_OES: u32 = 0x8D64;

    pub const COMPRESSED_R11_EAC: u32 = 0x9270;
    pub const COMPRESSED_SIGNED_R11_EAC: u32 = 0x9271;
    pub const COMPRESSED_RG11_EAC: u32 = 0x9272;
    pub const COMPRESSED_SIGNED_RG11_EAC: u32 = 0x9273;
    pub const COMPRESSED_RGB8_ETC2: u32 = 0x9274;
    pub const COMPRESSED_SRGB8_ETC2: u32 = 0x9275;
    pub const COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2: u32 = 0x9276;
    pub const COMPRESSED_SRGB8_PUNCHTHROUGH_ALPHA1_ETC2: u32 = 0x9277;
    pub const COMPRESSED_RGBA8_ETC2_EAC: u32 = 0x9278;
    pub const COMPRESSED_SRGB8_ALPHA8_ETC2_EAC: u32 = 0x9279;

    /// First of the 14 `COMPRESSED_RGBA_ASTC_{w}x{h}_KHR` codes (4x4 .. 12x12).
    pub const COMPRESSED_RGBA_ASTC_4X4_KHR: u32 = 0x93B0;
    /// First of the 14 `COMPRESSED_SRGB8_ALPHA8_ASTC_{w}x{h}_KHR` codes.
    pub const COMPRESSED_SRGB8_ALPHA8_ASTC_4X4_KHR: u32 = 0x93D0;
    /// First of the 10 `COMPRESSED_RGBA_ASTC_{w}x{h}x{d}_OES` codes (3x3x3 .. 6x6x6).
    pub const COMPRESSED_RGBA_ASTC_3X3X3_OES: u32 = 0x93C0;
    /// First of the 10 `COMPRESSED_SRGB8_ALPHA8_ASTC_{w}x{h}x{d}_OES` codes.
    pub const COMPRESSED_SRGB8_ALPHA8_ASTC_3X3X3_OES: u32 = 0x93E0;

    pub const R11F_G11F_B10F: u32 = 0x8C3A;
    pub const RGB9_E5: u32 = 0x8C3D;
}

/// `VkFormat` values.
pub mod vulkan {
    pub const FORMAT_B10G11R11_UFLOAT_PACK32: u32 = 122;
    pub const FORMAT_E5B9G9R9_UFLOAT_PACK32: u32 = 123;
    pub const FORMAT_BC1_RGB_UNORM_BLOCK: u32 = 131;
    pub const FORMAT_BC1_RGB_SRGB_BLOCK: u32 = 132;
    pub const FORMAT_BC1_RGBA_UNORM_BLOCK: u32 = 133;
    pub const FORMAT_BC1_RGBA_SRGB_BLOCK: u32 = 134;
    pub const FORMAT_BC2_UNORM_BLOCK: u32 = 135;
    pub const FORMAT_BC2_SRGB_BLOCK: u32 = 136;
    pub const FORMAT_BC3_UNORM_BLOCK: u32 = 137;
    pub const FORMAT_BC3_SRGB_BLOCK: u32 = 138;
    pub const FORMAT_BC4_UNORM_BLOCK: u32 = 139;
    pub const FORMAT_BC4_SNORM_BLOCK: u32 = 140;
    pub const FORMAT_BC5_UNORM_BLOCK: u32 = 141;
    pub const FORMAT_BC5_SNORM_BLOCK: u32 = 142;
    pub const FORMAT_BC6H_UFLOAT_BLOCK: u32 = 143;
    pub const FORMAT_BC6H_SFLOAT_BLOCK: u32 = 144;
    pub const FORMAT_BC7_UNORM_BLOCK: u32 = 145;
    pub const FORMAT_BC7_SRGB_BLOCK: u32 = 146;
    pub const FORMAT_ETC2_R8G8B8_UNORM_BLOCK: u32 = 147;
    pub const FORMAT_ETC2_R8G8B8_SRGB_BLOCK: u32 = 148;
    pub const FORMAT_ETC2_R8G8B8A1_UNORM_BLOCK: u32 = 149;
    pub const FORMAT_ETC2_R8G8B8A1_SRGB_BLOCK: u32 = 150;
    pub const FORMAT_ETC2_R8G8B8A8_UNORM_BLOCK: u32 = 151;
    pub const FORMAT_ETC2_R8G8B8A8_SRGB_BLOCK: u32 = 152;
    pub const FORMAT_EAC_R11_UNORM_BLOCK: u32 = 153;
    pub const FORMAT_EAC_R11_SNORM_BLOCK: u32 = 154;
    pub const FORMAT_EAC_R11G11_UNORM_BLOCK: u32 = 155;
    pub const FORMAT_EAC_R11G11_SNORM_BLOCK: u32 = 156;
    /// ASTC 2D formats run from here in (unorm, srgb) pairs, 4x4 .. 12x12.
    pub const FORMAT_ASTC_4X4_UNORM_BLOCK: u32 = 157;
    pub const FORMAT_PVRTC1_2BPP_UNORM_BLOCK_IMG: u32 = 1_000_054_000;
    pub const FORMAT_PVRTC1_4BPP_UNORM_BLOCK_IMG: u32 = 1_000_054_001;
    pub const FORMAT_PVRTC2_2BPP_UNORM_BLOCK_IMG: u32 = 1_000_054_002;
    pub const FORMAT_PVRTC2_4BPP_UNORM_BLOCK_IMG: u32 = 1_000_054_003;
    pub const FORMAT_PVRTC1_2BPP_SRGB_BLOCK_IMG: u32 = 1_000_054_004;
    pub const FORMAT_PVRTC1_4BPP_SRGB_BLOCK_IMG: u32 = 1_000_054_005;
}
