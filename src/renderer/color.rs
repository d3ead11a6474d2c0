//! ARGB8888 packing helpers

/// Pack channels into `0xAARRGGBB`
#[inline]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split into `[a, r, g, b]`
#[inline]
pub const fn channels(color: u32) -> [u8; 4] {
    [
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    ]
}

/// Scale R/G/B by `factor` (clamped to 255); alpha becomes opaque
#[inline]
pub fn scale_rgb(color: u32, factor: f32) -> u32 {
    let [_, r, g, b] = channels(color);
    let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
    argb(0xFF, scale(r), scale(g), scale(b))
}

/// Named colors used by the scene
pub mod colors {
    use super::argb;

    pub const TRANSPARENT: u32 = 0x0000_0000;
    pub const WHITE: u32 = argb(0xFF, 0xFF, 0xFF, 0xFF);
    pub const RED: u32 = argb(0xFF, 0xFF, 0x00, 0x00);
}
