//! Current generation settings
//!
//! `Settings` is the single mutable "current settings" record the UI edits.
//! Every regeneration takes an immutable `GenerationRequest` snapshot of it,
//! so a request can never observe a later edit.

use image::{Rgb, RgbaImage};
use std::fmt;
use std::sync::Arc;

use crate::color;

/// QR error-correction level
///
/// Four redundancy tiers, each trading symbol size for damage tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EcLevel {
    /// ~7% of codewords can be restored
    #[default]
    Low,
    /// ~15%
    Medium,
    /// ~25%
    Quartile,
    /// ~30%
    High,
}

impl EcLevel {
    /// All levels, in increasing redundancy order (pick list options)
    pub const ALL: [EcLevel; 4] = [
        EcLevel::Low,
        EcLevel::Medium,
        EcLevel::Quartile,
        EcLevel::High,
    ];

    /// Approximate share of damaged data the symbol can recover from
    pub fn recovery_percent(self) -> u8 {
        match self {
            EcLevel::Low => 7,
            EcLevel::Medium => 15,
            EcLevel::Quartile => 25,
            EcLevel::High => 30,
        }
    }

    /// Single-letter code (L, M, Q, H)
    pub fn letter(self) -> char {
        match self {
            EcLevel::Low => 'L',
            EcLevel::Medium => 'M',
            EcLevel::Quartile => 'Q',
            EcLevel::High => 'H',
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (~{}%)", self.letter(), self.recovery_percent())
    }
}

/// A decoded logo, shared between settings and in-flight requests
pub type Logo = Arc<RgbaImage>;

/// The editable generation settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Raw input text (trimmed only when a request is built)
    pub text: String,
    pub ec_level: EcLevel,
    /// Color of dark modules
    pub fill: Rgb<u8>,
    /// Color of light modules and the border
    pub background: Rgb<u8>,
    pub logo: Option<Logo>,
}

impl Default for Settings {
    /// Startup / reset values: black on white, level L, no logo
    fn default() -> Self {
        Self {
            text: String::new(),
            ec_level: EcLevel::Low,
            fill: color::BLACK,
            background: color::WHITE,
            logo: None,
        }
    }
}

impl Settings {
    /// Restore defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when the text contains something to encode
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Take an immutable snapshot for one regeneration
    pub fn request(&self) -> GenerationRequest {
        let request = GenerationRequest::new(self.text.trim(), self.ec_level)
            .with_colors(self.fill, self.background);
        match &self.logo {
            Some(logo) => request.with_logo(Arc::clone(logo)),
            None => request,
        }
    }
}

/// Snapshot of the settings at regeneration time
///
/// Never mutated after creation; dropped once the pipeline has produced (or
/// failed to produce) an artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Already trimmed; empty means "clear the preview"
    pub text: String,
    pub ec_level: EcLevel,
    pub fill: Rgb<u8>,
    pub background: Rgb<u8>,
    pub logo: Option<Logo>,
}

impl GenerationRequest {
    /// Build a request without a logo
    pub fn new(text: impl Into<String>, ec_level: EcLevel) -> Self {
        Self {
            text: text.into(),
            ec_level,
            fill: color::BLACK,
            background: color::WHITE,
            logo: None,
        }
    }

    pub fn with_colors(mut self, fill: Rgb<u8>, background: Rgb<u8>) -> Self {
        self.fill = fill;
        self.background = background;
        self
    }

    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Empty or whitespace-only payloads clear the preview
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ec_level, EcLevel::Low);
        assert_eq!(settings.fill, color::BLACK);
        assert_eq!(settings.background, color::WHITE);
        assert!(settings.logo.is_none());
        assert!(!settings.has_text());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut settings = Settings {
            text: "https://example.com".to_string(),
            ec_level: EcLevel::High,
            fill: Rgb([200, 0, 0]),
            background: Rgb([0, 0, 40]),
            logo: Some(Arc::new(RgbaImage::new(4, 4))),
        };

        settings.reset();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_request_is_a_snapshot() {
        let mut settings = Settings::default();
        settings.text = "  hello  ".to_string();
        settings.ec_level = EcLevel::Quartile;

        let request = settings.request();
        settings.text = "changed".to_string();
        settings.ec_level = EcLevel::High;

        assert_eq!(request.text, "hello");
        assert_eq!(request.ec_level, EcLevel::Quartile);
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        let mut settings = Settings::default();
        settings.text = " \t\n ".to_string();

        assert!(!settings.has_text());
        assert!(settings.request().is_blank());
    }

    #[test]
    fn test_levels_increase_redundancy() {
        let percents: Vec<u8> = EcLevel::ALL.iter().map(|l| l.recovery_percent()).collect();
        assert!(percents.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(EcLevel::High.to_string(), "H (~30%)");
    }
}
