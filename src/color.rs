//! Color conversion utilities
//!
//! The UI speaks `iced::Color` (f32 channels, from the color picker) while the
//! pipeline paints `image::Rgb<u8>` pixels. This module converts between the
//! two and formats colors for the swatch labels.

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Default module color
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Default background color
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Convert a picker color to an 8-bit pixel color
///
/// Alpha is dropped: QR modules and backgrounds are always opaque.
pub fn from_iced(color: iced::Color) -> Rgb<u8> {
    let [r, g, b, _] = color.into_rgba8();
    Rgb([r, g, b])
}

/// Convert a pixel color back to a picker color
pub fn to_iced(color: Rgb<u8>) -> iced::Color {
    let Rgb([r, g, b]) = color;
    iced::Color::from_rgb8(r, g, b)
}

/// Fully opaque RGBA version of a color
pub fn opaque(color: Rgb<u8>) -> Rgba<u8> {
    let Rgb([r, g, b]) = color;
    Rgba([r, g, b, 255])
}

/// Format as `#RRGGBB`
pub fn to_hex(color: Rgb<u8>) -> String {
    let Rgb([r, g, b]) = color;
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Perceived brightness (0-255), used to pick a readable label color on a swatch
pub fn luminance(color: Rgb<u8>) -> u8 {
    let Rgb([r, g, b]) = color;
    // ITU-R BT.601 luma weights
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// Composite `image` over an opaque `background`, dropping the alpha channel
pub fn flatten(image: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        let blend = |over: u8, under: u8| {
            ((over as u32 * a as u32 + under as u32 * (255 - a as u32) + 127) / 255) as u8
        };
        Rgb([
            blend(r, background[0]),
            blend(g, background[1]),
            blend(b, background[2]),
        ])
    })
}
