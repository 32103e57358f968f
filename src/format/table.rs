//! The built-in format table.
//!
//! Order matters: lookups return the first match, so when two variants share
//! a platform code (BC1 with and without alpha, for instance) the earlier one
//! wins.

use alloc::vec::Vec;

use super::platform::{dxgi, gl, vulkan};
use super::{
    ASTC_3D_FOOTPRINTS, ASTC_3D_LINEAR, ASTC_3D_SRGB, ASTC_FOOTPRINTS, CompressionFlags,
    TextureCompression as C, TextureCompressionInfo as Info,
};
use crate::codec::{atc, bc, bptc, etc, packed, pvrtc};
use crate::pixel::PixelLayout as L;

/// Every built-in descriptor except the `None` sentinel.
pub(crate) fn builtin() -> Vec<Info> {
    let mut t = Vec::with_capacity(C::ALL.len());

    // ATC
    t.push(
        Info::new(C::AtcRgb, 4, 4, 8, L::Bgra8)
            .with_codes(0, gl::ATC_RGB_AMD, 0)
            .with_decoder(atc::decode_atc),
    );
    t.push(
        Info::new(C::AtcRgbaExplicitAlpha, 4, 4, 16, L::Bgra8)
            .with_codes(0, gl::ATC_RGBA_EXPLICIT_ALPHA_AMD, 0)
            .with_decoder(atc::decode_atc_explicit_alpha),
    );
    t.push(
        Info::new(C::AtcRgbaInterpolatedAlpha, 4, 4, 16, L::Bgra8)
            .with_codes(0, gl::ATC_RGBA_INTERPOLATED_ALPHA_AMD, 0)
            .with_decoder(atc::decode_atc_interpolated_alpha),
    );

    // 3Dc
    t.push(
        Info::new(C::Amd3dcX, 4, 4, 8, L::R8)
            .with_codes(0, gl::AMD_3DC_X, 0)
            .with_decoder(bc::decode_bc4)
            .with_encoder(bc::encode_bc4),
    );
    t.push(
        Info::new(C::Amd3dcXy, 4, 4, 16, L::Rg8)
            .with_codes(0, gl::AMD_3DC_XY, 0)
            .with_decoder(bc::decode_bc5)
            .with_encoder(bc::encode_bc5),
    );

    // LATC
    t.push(
        Info::new(C::Latc1Luminance, 4, 4, 8, L::R8)
            .with_codes(0, gl::COMPRESSED_LUMINANCE_LATC1_EXT, 0),
    );
    t.push(
        Info::new(C::Latc1SignedLuminance, 4, 4, 8, L::R8Snorm)
            .with_codes(0, gl::COMPRESSED_SIGNED_LUMINANCE_LATC1_EXT, 0),
    );
    t.push(
        Info::new(C::Latc2LuminanceAlpha, 4, 4, 16, L::Rg8)
            .with_codes(0, gl::COMPRESSED_LUMINANCE_ALPHA_LATC2_EXT, 0),
    );
    t.push(
        Info::new(C::Latc2SignedLuminanceAlpha, 4, 4, 16, L::Rg8Snorm)
            .with_codes(0, gl::COMPRESSED_SIGNED_LUMINANCE_ALPHA_LATC2_EXT, 0),
    );

    // DXT
    t.push(
        Info::new(C::Dxt1, 4, 4, 8, L::Rgba8)
            .with_codes(
                dxgi::FORMAT_BC1_UNORM,
                gl::COMPRESSED_RGB_S3TC_DXT1_EXT,
                vulkan::FORMAT_BC1_RGB_UNORM_BLOCK,
            )
            .with_decoder(bc::decode_bc1)
            .with_encoder(bc::encode_bc1),
    );
    t.push(
        Info::new(C::Dxt1Srgb, 4, 4, 8, L::Rgba8)
            .with_codes(
                dxgi::FORMAT_BC1_UNORM_SRGB,
                gl::COMPRESSED_SRGB_S3TC_DXT1_EXT,
                vulkan::FORMAT_BC1_RGB_SRGB_BLOCK,
            )
            .with_decoder(bc::decode_bc1)
            .with_encoder(bc::encode_bc1),
    );
    t.push(
        Info::new(C::Dxt1Alpha1, 4, 4, 8, L::Rgba8)
            .with_codes(
                dxgi::FORMAT_BC1_UNORM,
                gl::COMPRESSED_RGBA_S3TC_DXT1_EXT,
                vulkan::FORMAT_BC1_RGBA_UNORM_BLOCK,
            )
            .with_decoder(bc::decode_bc1)
            .with_encoder(bc::encode_bc1_alpha),
    );
    t.push(
        Info::new(C::Dxt1Alpha1Srgb, 4, 4, 8, L::Rgba8)
            .with_codes(
                dxgi::FORMAT_BC1_UNORM_SRGB,
                gl::COMPRESSED_SRGB_ALPHA_S3TC_DXT1_EXT,
                vulkan::FORMAT_BC1_RGBA_SRGB_BLOCK,
            )
            .with_decoder(bc::decode_bc1)
            .with_encoder(bc::encode_bc1_alpha),
    );
    t.push(
        Info::new(C::Dxt3, 4, 4, 16, L::Rgba8)
            .with_codes(
                dxgi::FORMAT_BC2_UNORM,
                gl::COMPRESSED_RGBA_S3TC_DXT3_EXT,
                vulkan::FORMAT_BC2_UNORM_BLOCK,
            )
            .with_decoder(bc::decode_bc2)
            .with_encoder(bc::encode_bc2),
    );
    t.push(
        Info::new(C::Dxt3Srgb, 4, 4, 16, L::Rgba8)
            .with_codes(
                dxgi::FORMAT_BC2_UNORM_SRGB,
                gl::COMPRESSED_SRGB_ALPHA_S3TC_DXT3_EXT,
                vulkan::FORMAT_BC2_SRGB_BLOCK,
            )
            .with_decoder(bc::decode_bc2)
            .with_encoder(bc::encode_bc2),
    );
    t.push(
        Info::new(C::Dxt5, 4, 4, 16, L::Rgba8)
            .with_codes(
                dxgi::FORMAT_BC3_UNORM,
                gl::COMPRESSED_RGBA_S3TC_DXT5_EXT,
                vulkan::FORMAT_BC3_UNORM_BLOCK,
            )
            .with_decoder(bc::decode_bc3)
            .with_encoder(bc::encode_bc3),
    );
    t.push(
        Info::new(C::Dxt5Srgb, 4, 4, 16, L::Rgba8)
            .with_codes(
                dxgi::FORMAT_BC3_UNORM_SRGB,
                gl::COMPRESSED_SRGB_ALPHA_S3TC_DXT5_EXT,
                vulkan::FORMAT_BC3_SRGB_BLOCK,
            )
            .with_decoder(bc::decode_bc3)
            .with_encoder(bc::encode_bc3),
    );

    // RGTC
    t.push(
        Info::new(C::Rgtc1Red, 4, 4, 8, L::R8)
            .with_codes(
                dxgi::FORMAT_BC4_UNORM,
                gl::COMPRESSED_RED_RGTC1,
                vulkan::FORMAT_BC4_UNORM_BLOCK,
            )
            .with_decoder(bc::decode_bc4)
            .with_encoder(bc::encode_bc4),
    );
    t.push(
        Info::new(C::Rgtc1SignedRed, 4, 4, 8, L::R8Snorm)
            .with_codes(
                dxgi::FORMAT_BC4_SNORM,
                gl::COMPRESSED_SIGNED_RED_RGTC1,
                vulkan::FORMAT_BC4_SNORM_BLOCK,
            )
            .with_decoder(bc::decode_bc4_signed)
            .with_encoder(bc::encode_bc4_signed),
    );
    t.push(
        Info::new(C::Rgtc2Rg, 4, 4, 16, L::Rg8)
            .with_codes(
                dxgi::FORMAT_BC5_UNORM,
                gl::COMPRESSED_RG_RGTC2,
                vulkan::FORMAT_BC5_UNORM_BLOCK,
            )
            .with_decoder(bc::decode_bc5)
            .with_encoder(bc::encode_bc5),
    );
    t.push(
        Info::new(C::Rgtc2SignedRg, 4, 4, 16, L::Rg8Snorm)
            .with_codes(
                dxgi::FORMAT_BC5_SNORM,
                gl::COMPRESSED_SIGNED_RG_RGTC2,
                vulkan::FORMAT_BC5_SNORM_BLOCK,
            )
            .with_decoder(bc::decode_bc5_signed)
            .with_encoder(bc::encode_bc5_signed),
    );

    // BPTC
    t.push(
        Info::new(C::BptcRgbUnsignedFloat, 4, 4, 16, L::RgbF32)
            .with_codes(
                dxgi::FORMAT_BC6H_UF16,
                gl::COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT,
                vulkan::FORMAT_BC6H_UFLOAT_BLOCK,
            )
            .with_decoder(bptc::decode_bc6h)
            .with_encoder(bptc::encode_bc6h),
    );
    t.push(
        Info::new(C::BptcRgbSignedFloat, 4, 4, 16, L::RgbF32)
            .with_codes(
                dxgi::FORMAT_BC6H_SF16,
                gl::COMPRESSED_RGB_BPTC_SIGNED_FLOAT,
                vulkan::FORMAT_BC6H_SFLOAT_BLOCK,
            )
            .with_decoder(bptc::decode_bc6h_signed)
            .with_encoder(bptc::encode_bc6h_signed),
    );
    t.push(
        Info::new(C::BptcRgbaUnorm, 4, 4, 16, L::Rgba8)
            .with_codes(
                dxgi::FORMAT_BC7_UNORM,
                gl::COMPRESSED_RGBA_BPTC_UNORM,
                vulkan::FORMAT_BC7_UNORM_BLOCK,
            )
            .with_decoder(bptc::decode_bc7)
            .with_encoder(bptc::encode_bc7),
    );
    t.push(
        Info::new(C::BptcSrgbAlphaUnorm, 4, 4, 16, L::Rgba8)
            .with_codes(
                dxgi::FORMAT_BC7_UNORM_SRGB,
                gl::COMPRESSED_SRGB_ALPHA_BPTC_UNORM,
                vulkan::FORMAT_BC7_SRGB_BLOCK,
            )
            .with_decoder(bptc::decode_bc7)
            .with_encoder(bptc::encode_bc7),
    );

    // PVRTC
    let pvrtc1 = |id, two_bpp: bool, gl_code: u32, vk_code: u32| {
        let (w, decode): (u32, crate::format::DecodeFn) = if two_bpp {
            (8, pvrtc::decode_pvrtc_2bpp)
        } else {
            (4, pvrtc::decode_pvrtc_4bpp)
        };
        Info::new(id, w, 4, 8, L::Rgba8)
            .with_codes(0, gl_code, vk_code)
            .with_decoder(decode)
            .with_flags(CompressionFlags::SURFACE)
    };
    t.push(pvrtc1(
        C::PvrtcRgb2bpp,
        true,
        gl::COMPRESSED_RGB_PVRTC_2BPPV1_IMG,
        vulkan::FORMAT_PVRTC1_2BPP_UNORM_BLOCK_IMG,
    ));
    t.push(pvrtc1(
        C::PvrtcRgb4bpp,
        false,
        gl::COMPRESSED_RGB_PVRTC_4BPPV1_IMG,
        vulkan::FORMAT_PVRTC1_4BPP_UNORM_BLOCK_IMG,
    ));
    t.push(pvrtc1(
        C::PvrtcRgba2bpp,
        true,
        gl::COMPRESSED_RGBA_PVRTC_2BPPV1_IMG,
        vulkan::FORMAT_PVRTC1_2BPP_UNORM_BLOCK_IMG,
    ));
    t.push(pvrtc1(
        C::PvrtcRgba4bpp,
        false,
        gl::COMPRESSED_RGBA_PVRTC_4BPPV1_IMG,
        vulkan::FORMAT_PVRTC1_4BPP_UNORM_BLOCK_IMG,
    ));
    t.push(Info::new(C::Pvrtc2Rgba2bpp, 8, 4, 8, L::Rgba8).with_codes(
        0,
        gl::COMPRESSED_RGBA_PVRTC_2BPPV2_IMG,
        vulkan::FORMAT_PVRTC2_2BPP_UNORM_BLOCK_IMG,
    ));
    t.push(Info::new(C::Pvrtc2Rgba4bpp, 4, 4, 8, L::Rgba8).with_codes(
        0,
        gl::COMPRESSED_RGBA_PVRTC_4BPPV2_IMG,
        vulkan::FORMAT_PVRTC2_4BPP_UNORM_BLOCK_IMG,
    ));
    t.push(pvrtc1(
        C::PvrtcSrgb2bpp,
        true,
        gl::COMPRESSED_SRGB_PVRTC_2BPPV1_EXT,
        vulkan::FORMAT_PVRTC1_2BPP_SRGB_BLOCK_IMG,
    ));
    t.push(pvrtc1(
        C::PvrtcSrgb4bpp,
        false,
        gl::COMPRESSED_SRGB_PVRTC_4BPPV1_EXT,
        vulkan::FORMAT_PVRTC1_4BPP_SRGB_BLOCK_IMG,
    ));
    t.push(pvrtc1(
        C::PvrtcSrgbAlpha2bpp,
        true,
        gl::COMPRESSED_SRGB_ALPHA_PVRTC_2BPPV1_EXT,
        vulkan::FORMAT_PVRTC1_2BPP_SRGB_BLOCK_IMG,
    ));
    t.push(pvrtc1(
        C::PvrtcSrgbAlpha4bpp,
        false,
        gl::COMPRESSED_SRGB_ALPHA_PVRTC_4BPPV1_EXT,
        vulkan::FORMAT_PVRTC1_4BPP_SRGB_BLOCK_IMG,
    ));

    // ETC1
    t.push(
        Info::new(C::Etc1Rgb, 4, 4, 8, L::Rgba8)
            .with_codes(0, gl::ETC1_RGB8_OES, 0)
            .with_decoder(etc::decode_etc1)
            .with_encoder(etc::encode_etc1),
    );

    // EAC
    t.push(
        Info::new(C::EacR11, 4, 4, 8, L::R16)
            .with_codes(0, gl::COMPRESSED_R11_EAC, vulkan::FORMAT_EAC_R11_UNORM_BLOCK)
            .with_decoder(etc::decode_eac_r11),
    );
    t.push(
        Info::new(C::EacSignedR11, 4, 4, 8, L::R16Snorm)
            .with_codes(0, gl::COMPRESSED_SIGNED_R11_EAC, vulkan::FORMAT_EAC_R11_SNORM_BLOCK)
            .with_decoder(etc::decode_eac_r11_signed),
    );
    t.push(
        Info::new(C::EacRg11, 4, 4, 16, L::Rg16)
            .with_codes(0, gl::COMPRESSED_RG11_EAC, vulkan::FORMAT_EAC_R11G11_UNORM_BLOCK)
            .with_decoder(etc::decode_eac_rg11),
    );
    t.push(
        Info::new(C::EacSignedRg11, 4, 4, 16, L::Rg16Snorm)
            .with_codes(
                0,
                gl::COMPRESSED_SIGNED_RG11_EAC,
                vulkan::FORMAT_EAC_R11G11_SNORM_BLOCK,
            )
            .with_decoder(etc::decode_eac_rg11_signed),
    );

    // ETC2; ETC1 blocks are valid ETC2 RGB blocks, so the ETC1 encoder serves both
    t.push(
        Info::new(C::Etc2Rgb, 4, 4, 8, L::Rgba8)
            .with_codes(0, gl::COMPRESSED_RGB8_ETC2, vulkan::FORMAT_ETC2_R8G8B8_UNORM_BLOCK)
            .with_decoder(etc::decode_etc2)
            .with_encoder(etc::encode_etc1),
    );
    t.push(
        Info::new(C::Etc2Srgb, 4, 4, 8, L::Rgba8)
            .with_codes(0, gl::COMPRESSED_SRGB8_ETC2, vulkan::FORMAT_ETC2_R8G8B8_SRGB_BLOCK)
            .with_decoder(etc::decode_etc2)
            .with_encoder(etc::encode_etc1),
    );
    t.push(
        Info::new(C::Etc2RgbAlpha1, 4, 4, 8, L::Rgba8)
            .with_codes(
                0,
                gl::COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2,
                vulkan::FORMAT_ETC2_R8G8B8A1_UNORM_BLOCK,
            )
            .with_decoder(etc::decode_etc2_alpha1),
    );
    t.push(
        Info::new(C::Etc2SrgbAlpha1, 4, 4, 8, L::Rgba8)
            .with_codes(
                0,
                gl::COMPRESSED_SRGB8_PUNCHTHROUGH_ALPHA1_ETC2,
                vulkan::FORMAT_ETC2_R8G8B8A1_SRGB_BLOCK,
            )
            .with_decoder(etc::decode_etc2_alpha1),
    );
    t.push(
        Info::new(C::Etc2Rgba, 4, 4, 16, L::Rgba8)
            .with_codes(
                0,
                gl::COMPRESSED_RGBA8_ETC2_EAC,
                vulkan::FORMAT_ETC2_R8G8B8A8_UNORM_BLOCK,
            )
            .with_decoder(etc::decode_etc2_eac),
    );
    t.push(
        Info::new(C::Etc2SrgbAlpha8, 4, 4, 16, L::Rgba8)
            .with_codes(
                0,
                gl::COMPRESSED_SRGB8_ALPHA8_ETC2_EAC,
                vulkan::FORMAT_ETC2_R8G8B8A8_SRGB_BLOCK,
            )
            .with_decoder(etc::decode_etc2_eac),
    );

    // ASTC 2D; Vulkan codes interleave unorm and srgb
    for srgb in [false, true] {
        let gl_base = if srgb {
            gl::COMPRESSED_SRGB8_ALPHA8_ASTC_4X4_KHR
        } else {
            gl::COMPRESSED_RGBA_ASTC_4X4_KHR
        };
        for (i, (&id, &(w, h))) in C::astc_2d(srgb).iter().zip(&ASTC_FOOTPRINTS).enumerate() {
            let i = i as u32;
            let vk = vulkan::FORMAT_ASTC_4X4_UNORM_BLOCK + 2 * i + u32::from(srgb);
            t.push(Info::new(id, w, h, 16, L::Rgba8).with_codes(0, gl_base + i, vk));
        }
    }

    // ASTC 3D; the depth of the footprint is not represented
    for (ids, gl_base) in [
        (&ASTC_3D_LINEAR, gl::COMPRESSED_RGBA_ASTC_3X3X3_OES),
        (&ASTC_3D_SRGB, gl::COMPRESSED_SRGB8_ALPHA8_ASTC_3X3X3_OES),
    ] {
        for (i, (&id, &(w, h, _))) in ids.iter().zip(&ASTC_3D_FOOTPRINTS).enumerate() {
            t.push(Info::new(id, w, h, 16, L::Rgba8).with_codes(0, gl_base + i as u32, 0));
        }
    }

    // Packed pixel
    t.push(
        Info::new(C::Rgb9E5, 1, 1, 4, L::RgbaF32)
            .with_codes(
                dxgi::FORMAT_R9G9B9E5_SHAREDEXP,
                gl::RGB9_E5,
                vulkan::FORMAT_E5B9G9R9_UFLOAT_PACK32,
            )
            .with_decoder(packed::decode_rgb9e5),
    );
    t.push(
        Info::new(C::R11fG11fB10f, 1, 1, 4, L::RgbaF32)
            .with_codes(
                dxgi::FORMAT_R11G11B10_FLOAT,
                gl::R11F_G11F_B10F,
                vulkan::FORMAT_B10G11R11_UFLOAT_PACK32,
            )
            .with_decoder(packed::decode_r11f_g11f_b10f),
    );
    t.push(
        Info::new(C::R10fG11fB11f, 1, 1, 4, L::RgbaF32)
            .with_decoder(packed::decode_r10f_g11f_b11f),
    );
    t.push(
        Info::new(C::G8R8G8B8, 2, 1, 4, L::Rgba8)
            .with_codes(dxgi::FORMAT_G8R8_G8B8_UNORM, 0, 0)
            .with_decoder(packed::decode_grgb8),
    );
    t.push(
        Info::new(C::R8G8B8G8, 2, 1, 4, L::Rgba8)
            .with_codes(dxgi::FORMAT_R8G8_B8G8_UNORM, 0, 0)
            .with_decoder(packed::decode_rgbg8),
    );
    t.push(Info::new(C::Uyvy, 2, 1, 4, L::Rgba8).with_decoder(packed::decode_uyvy));
    t.push(
        Info::new(C::Yuy2, 2, 1, 4, L::Rgba8)
            .with_codes(dxgi::FORMAT_YUY2, 0, 0)
            .with_decoder(packed::decode_yuy2),
    );

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_declaration_order() {
        let ids: Vec<C> = builtin().iter().map(|i| i.compression).collect();
        assert_eq!(ids, &C::ALL[1..]);
    }

    #[test]
    fn astc_codes_line_up_with_footprints() {
        let t = builtin();
        let find = |id| t.iter().find(|i| i.compression == id).copied().unwrap();
        let e = find(C::Astc12x12);
        assert_eq!((e.width, e.height, e.gl, e.vulkan), (12, 12, 0x93BD, 183));
        let e = find(C::AstcSrgb4x4);
        assert_eq!((e.gl, e.vulkan), (0x93D0, 158));
        let e = find(C::AstcSrgb6x6x6);
        assert_eq!((e.width, e.height, e.gl), (6, 6, 0x93E9));
    }
}
