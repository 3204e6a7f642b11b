//! Packing between float colors and ARGB8888 pixels.

use crate::math::Vec4;

/// Opaque black, the clear color of every frame.
pub const BACKGROUND: u32 = 0xFF00_0000;

#[inline]
fn to_byte(channel: f32) -> u32 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u32
}

/// Packs an RGBA color into `0xAARRGGBB`. Channels are saturated first.
#[inline]
pub fn pack_argb(color: Vec4) -> u32 {
    (to_byte(color.w) << 24) | (to_byte(color.x) << 16) | (to_byte(color.y) << 8) | to_byte(color.z)
}

/// Inverse of [`pack_argb`], up to 8-bit quantization.
#[inline]
pub fn unpack_argb(pixel: u32) -> Vec4 {
    let channel = |shift: u32| ((pixel >> shift) & 0xFF) as f32 / 255.0;
    Vec4::rgba(channel(16), channel(8), channel(0), channel(24))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_in_argb_order() {
        assert_eq!(pack_argb(Vec4::rgba(1.0, 0.0, 0.0, 1.0)), 0xFFFF_0000);
        assert_eq!(pack_argb(Vec4::rgba(0.0, 1.0, 0.0, 0.0)), 0x0000_FF00);
        assert_eq!(pack_argb(Vec4::rgba(0.0, 0.0, 1.0, 1.0)), 0xFF00_00FF);
    }

    #[test]
    fn out_of_range_channels_saturate() {
        assert_eq!(pack_argb(Vec4::rgba(1.5, -0.2, 0.5, 2.0)), 0xFFFF_0080);
    }

    #[test]
    fn unpack_recovers_channels() {
        let c = unpack_argb(0x80FF_4000);
        assert_eq!(c.x, 1.0);
        assert_eq!(c.z, 0.0);
        assert!((c.y - 64.0 / 255.0).abs() < 1e-6);
        assert!((c.w - 128.0 / 255.0).abs() < 1e-6);
    }
}
