//! Preview pipeline
//!
//! Turns a `GenerationRequest` into a full-resolution bitmap (symbol plus
//! optional logo) and a bounded preview copy for display:
//! - `encode`: symbol encoding and rasterisation
//! - `logo`: logo loading and compositing
//! - `export`: writing the full image to disk

pub mod encode;
pub mod export;
pub mod logo;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbaImage};

use crate::config::AppConfig;
use crate::error::{QrError, QrResult};
use crate::state::settings::GenerationRequest;
use encode::Symbol;

/// Pixels per module
pub const DEFAULT_BOX_SIZE: u32 = 8;

/// Quiet zone width, in modules
pub const DEFAULT_BORDER: u32 = 2;

/// Longest side of the preview bitmap
pub const DEFAULT_PREVIEW_MAX: u32 = 250;

/// Resampling filter for the preview downscale
const PREVIEW_FILTER: FilterType = FilterType::Lanczos3;

/// Fixed rasterisation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub box_size: u32,
    pub border: u32,
    pub preview_max: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            preview_max: DEFAULT_PREVIEW_MAX,
        }
    }
}

impl From<&AppConfig> for RenderOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            box_size: config.box_size,
            border: config.border,
            preview_max: config.preview_max,
        }
    }
}

/// Output of one successful generation
#[derive(Debug)]
pub struct RenderedArtifact {
    /// Saved as-is by the export step
    pub full_image: RgbaImage,
    /// Independent downscaled copy for display
    pub preview_image: RgbaImage,
    /// Symbol version the encoder selected
    pub version: i16,
    /// Background the symbol was painted on; formats without alpha are
    /// flattened onto it
    pub background: Rgb<u8>,
    /// Set when the logo could not be embedded; `full_image` is then the
    /// plain symbol
    pub logo_warning: Option<QrError>,
}

/// Result of a regeneration
#[derive(Debug)]
pub enum Generation {
    /// Blank input: nothing to show, nothing to save
    Cleared,
    Rendered(RenderedArtifact),
}

/// Run the pipeline for one request
pub fn generate(request: &GenerationRequest, options: &RenderOptions) -> QrResult<Generation> {
    if request.is_blank() {
        tracing::debug!("blank input, clearing preview");
        return Ok(Generation::Cleared);
    }

    let symbol = Symbol::encode(request.text.trim(), request.ec_level)?;
    let base = symbol.render(options.box_size, options.border, request.fill, request.background)?;

    let (full_image, logo_warning) = match &request.logo {
        Some(logo_image) => match logo::embed(&base, logo_image) {
            Ok(composited) => (composited, None),
            Err(e) => {
                tracing::warn!(error = %e, "logo not embedded, keeping plain symbol");
                (base, Some(e))
            }
        },
        None => (base, None),
    };

    let preview_image = preview(&full_image, options.preview_max);

    tracing::debug!(
        version = symbol.version(),
        level = %request.ec_level,
        width = full_image.width(),
        "generated QR code"
    );

    Ok(Generation::Rendered(RenderedArtifact {
        full_image,
        preview_image,
        version: symbol.version(),
        background: request.background,
        logo_warning,
    }))
}

/// Aspect-preserving downscale so the longest side is at most `max`
///
/// Always returns a new buffer, even when no scaling is needed.
pub fn preview(full: &RgbaImage, max: u32) -> RgbaImage {
    let (width, height) = full.dimensions();
    let (w, h) = logo::fit_within(width, height, max.max(1));
    if (w, h) == (width, height) {
        full.clone()
    } else {
        imageops::resize(full, w, h, PREVIEW_FILTER)
    }
}
