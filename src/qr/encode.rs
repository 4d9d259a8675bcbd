//! QR symbol encoding and rasterisation
//!
//! The symbol itself comes from the `qrcode` crate. This module maps our
//! error-correction levels onto it, lets it pick the smallest version that
//! holds the payload, and paints the modules into an RGBA bitmap.

use image::{Rgb, RgbaImage};
use qrcode::{Color as Module, QrCode, Version};

use crate::color;
use crate::error::{QrError, QrResult};
use crate::state::settings::EcLevel;

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::Low => qrcode::EcLevel::L,
            EcLevel::Medium => qrcode::EcLevel::M,
            EcLevel::Quartile => qrcode::EcLevel::Q,
            EcLevel::High => qrcode::EcLevel::H,
        }
    }
}

/// An encoded symbol, before rasterisation
pub struct Symbol {
    code: QrCode,
}

impl Symbol {
    /// Encode `text` at `level`, using the minimum version that fits
    pub fn encode(text: &str, level: EcLevel) -> QrResult<Self> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), level.into())
            .map_err(|e| QrError::Encoding(e.to_string()))?;
        Ok(Self { code })
    }

    /// Modules per side
    pub fn width(&self) -> usize {
        self.code.width()
    }

    /// Symbol version (1-40)
    pub fn version(&self) -> i16 {
        match self.code.version() {
            Version::Normal(v) | Version::Micro(v) => v,
        }
    }

    /// Paint the symbol with `box_size` pixels per module and a `border`
    /// of background-colored modules on every side
    pub fn render(&self, box_size: u32, border: u32, fill: Rgb<u8>, background: Rgb<u8>) -> QrResult<RgbaImage> {
        if box_size == 0 {
            return Err(QrError::Encoding("module box size must be at least 1 pixel".to_string()));
        }

        let modules = self.width() as u32;
        let side = border
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(modules))
            .and_then(|span| span.checked_mul(box_size))
            .ok_or_else(|| QrError::Encoding(format!("image side overflows with box size {box_size} and border {border}")))?;
        let dark = color::opaque(fill);
        let mut img = RgbaImage::from_pixel(side, side, color::opaque(background));

        for (i, module) in self.code.to_colors().iter().enumerate() {
            if *module != Module::Dark {
                continue;
            }
            let x0 = (i as u32 % modules + border) * box_size;
            let y0 = (i as u32 / modules + border) * box_size;
            for dy in 0..box_size {
                for dx in 0..box_size {
                    img.put_pixel(x0 + dx, y0 + dy, dark);
                }
            }
        }

        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_version_for_short_text() {
        let symbol = Symbol::encode("hello", EcLevel::Low).unwrap();
        assert_eq!(symbol.version(), 1);
        assert_eq!(symbol.width(), 21);
    }

    #[test]
    fn test_higher_level_needs_larger_symbol() {
        let text = "https://example.com/some/longer/path?with=query";
        let low = Symbol::encode(text, EcLevel::Low).unwrap();
        let high = Symbol::encode(text, EcLevel::High).unwrap();

        assert!(high.version() > low.version());
        assert!(high.width() > low.width());
    }

    #[test]
    fn test_render_dimensions_include_border() {
        let symbol = Symbol::encode("hello", EcLevel::Low).unwrap();
        let img = symbol.render(8, 2, color::BLACK, color::WHITE).unwrap();

        assert_eq!(img.dimensions(), ((21 + 4) * 8, (21 + 4) * 8));
    }

    #[test]
    fn test_render_uses_requested_colors() {
        let fill = Rgb([10, 40, 160]);
        let background = Rgb([250, 240, 200]);
        let symbol = Symbol::encode("colors", EcLevel::Medium).unwrap();
        let img = symbol.render(4, 2, fill, background).unwrap();

        // Border is background; the finder pattern's top-left module is dark
        assert_eq!(*img.get_pixel(0, 0), color::opaque(background));
        assert_eq!(*img.get_pixel(2 * 4, 2 * 4), color::opaque(fill));
        assert!(img
            .pixels()
            .all(|p| *p == color::opaque(fill) || *p == color::opaque(background)));
    }

    #[test]
    fn test_zero_box_size_is_rejected() {
        let symbol = Symbol::encode("x", EcLevel::Low).unwrap();
        assert!(matches!(
            symbol.render(0, 2, color::BLACK, color::WHITE),
            Err(QrError::Encoding(_))
        ));
    }

    #[test]
    fn test_oversized_geometry_is_rejected() {
        let symbol = Symbol::encode("x", EcLevel::Low).unwrap();
        for (box_size, border) in [(u32::MAX, 2), (8, 3_000_000_000), (1 << 28, 1)] {
            assert!(matches!(
                symbol.render(box_size, border, color::BLACK, color::WHITE),
                Err(QrError::Encoding(_))
            ));
        }
    }

    #[test]
    fn test_payload_too_long_is_an_encoding_error() {
        let text = "x".repeat(4000);
        assert!(matches!(Symbol::encode(&text, EcLevel::High), Err(QrError::Encoding(_))));
    }
}
