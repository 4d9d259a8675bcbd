//! Startup configuration
//!
//! Read once from `<config_dir>/qr-studio/config.json` and never written back.
//! Only tunes the application (language, debounce delay, raster sizes); the
//! generation settings themselves always start from their defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::i18n::Language;
use crate::qr::{DEFAULT_BORDER, DEFAULT_BOX_SIZE, DEFAULT_PREVIEW_MAX};
use crate::state::debounce::DEFAULT_DELAY;

/// Largest accepted pixels per module; a version 40 symbol is then ~6700 px wide
const MAX_BOX_SIZE: u32 = 32;

/// Largest accepted quiet zone, in modules
const MAX_BORDER: u32 = 16;

/// Largest accepted preview side
const MAX_PREVIEW_MAX: u32 = 1024;

/// Longest accepted debounce delay
const MAX_DEBOUNCE_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// UI language at startup
    pub language: Language,
    /// Quiet period after the last keystroke, in milliseconds
    pub debounce_ms: u64,
    /// Pixels per QR module
    pub box_size: u32,
    /// Quiet zone, in modules
    pub border: u32,
    /// Longest side of the on-screen preview
    pub preview_max: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            debounce_ms: DEFAULT_DELAY.as_millis() as u64,
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            preview_max: DEFAULT_PREVIEW_MAX,
        }
    }
}

impl AppConfig {
    /// Load from the standard location, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`; a missing file is not an error
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config, using defaults");
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config.sanitized()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Location of the config file
    /// - Linux: ~/.config/qr-studio/config.json
    /// - macOS: ~/Library/Application Support/qr-studio/config.json
    /// - Windows: %APPDATA%\qr-studio\config.json
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("qr-studio");
        path.push("config.json");
        Some(path)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Replace zero sizes with defaults and clamp the rest to workable ranges
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.box_size == 0 {
            self.box_size = defaults.box_size;
        }
        if self.preview_max == 0 {
            self.preview_max = defaults.preview_max;
        }
        self.box_size = self.box_size.min(MAX_BOX_SIZE);
        self.border = self.border.min(MAX_BORDER);
        self.preview_max = self.preview_max.min(MAX_PREVIEW_MAX);
        self.debounce_ms = self.debounce_ms.min(MAX_DEBOUNCE_MS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behavior() {
        let config = AppConfig::default();
        assert_eq!(config.debounce_delay(), Duration::from_millis(300));
        assert_eq!(config.box_size, 8);
        assert_eq!(config.border, 2);
        assert_eq!(config.preview_max, 250);
        assert_eq!(config.language, Language::English);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = AppConfig::from_json(r#"{ "language": "ar", "debounce_ms": 150 }"#).unwrap();

        assert_eq!(config.language, Language::Arabic);
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.box_size, 8);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load_from(&dir.path().join("config.json")), AppConfig::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn test_zero_sizes_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "box_size": 0, "preview_max": 0, "border": 4 }"#).unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.box_size, 8);
        assert_eq!(config.preview_max, 250);
        assert_eq!(config.border, 4);
    }

    #[test]
    fn test_oversized_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "box_size": 100000, "border": 3000000000, "preview_max": 99999, "debounce_ms": 18446744073709551615 }"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.box_size, MAX_BOX_SIZE);
        assert_eq!(config.border, MAX_BORDER);
        assert_eq!(config.preview_max, MAX_PREVIEW_MAX);
        assert_eq!(config.debounce_delay(), Duration::from_millis(MAX_DEBOUNCE_MS));
    }

    #[test]
    fn test_clamped_config_still_renders() {
        use crate::qr::{generate, Generation, RenderOptions};
        use crate::state::settings::{EcLevel, GenerationRequest};

        let config = AppConfig::from_json(r#"{ "border": 3000000000, "box_size": 4000000000 }"#)
            .unwrap()
            .sanitized();
        let request = GenerationRequest::new("hello", EcLevel::Low);

        let generation = generate(&request, &RenderOptions::from(&config)).unwrap();
        match generation {
            Generation::Rendered(artifact) => {
                assert_eq!(artifact.full_image.width(), (21 + 2 * MAX_BORDER) * MAX_BOX_SIZE);
            }
            Generation::Cleared => panic!("expected a rendered artifact"),
        }
    }
}
