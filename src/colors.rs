//! Packed color helpers.
//!
//! Colors are `0x00RRGGBB`; alpha lives in its own plane of the framebuffer.

pub const BLACK: u32 = 0x000000;
pub const WHITE: u32 = 0xFFFFFF;
pub const RED: u32 = 0xFF0000;
pub const GREEN: u32 = 0x00FF00;
pub const BLUE: u32 = 0x0000FF;
pub const YELLOW: u32 = 0xFFFF00;

/// Scales each channel by `intensity` (clamped to [0, 1]), truncating.
#[inline]
pub fn modulate(color: u32, intensity: f32) -> u32 {
    let intensity = intensity.clamp(0.0, 1.0);
    let [_, r, g, b] = color.to_be_bytes();
    let scale = |c: u8| (c as f32 * intensity) as u32;
    (scale(r) << 16) | (scale(g) << 8) | scale(b)
}

/// Expands a packed color and separate alpha into RGBA bytes.
#[inline]
pub fn to_rgba(color: u32, alpha: u8) -> [u8; 4] {
    let [_, r, g, b] = color.to_be_bytes();
    [r, g, b, alpha]
}
