//! Logo loading and compositing
//!
//! The logo is shrunk to fit a square box 20% as wide as the QR bitmap and
//! pasted at the center, using its own alpha channel as the mask. Placement
//! does not account for the symbol's error-correction capacity: a logo that
//! covers too many modules can make the code unreadable.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;

use crate::error::{QrError, QrResult};
use crate::state::settings::Logo;

/// Logo box side as a fraction of the QR bitmap width
pub const LOGO_RATIO: f32 = 0.2;

/// Resampling filter for logo thumbnails
const LOGO_FILTER: FilterType = FilterType::Lanczos3;

/// Decode a logo file (PNG, JPEG, BMP, GIF...) into RGBA
pub fn load_logo(path: &Path) -> QrResult<Logo> {
    let logo = image::open(path).map_err(|source| QrError::LogoLoad {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), width = logo.width(), height = logo.height(), "loaded logo");
    Ok(Arc::new(logo.to_rgba8()))
}

/// Side of the square box the logo must fit in
pub fn logo_box(base_width: u32) -> u32 {
    (base_width as f32 * LOGO_RATIO) as u32
}

/// Thumbnail dimensions: fit inside `max` x `max`, keep aspect ratio,
/// never enlarge
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let scale = max as f64 / width.max(height) as f64;
    let w = ((width as f64 * scale).round() as u32).clamp(1, max);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max);
    (w, h)
}

/// Composite `logo` onto the center of `base`
///
/// Returns a new image; `base` is left untouched so the caller can fall back
/// to it when this fails.
pub fn embed(base: &RgbaImage, logo: &RgbaImage) -> QrResult<RgbaImage> {
    let (width, height) = base.dimensions();
    let (logo_w, logo_h) = logo.dimensions();

    if logo_w == 0 || logo_h == 0 {
        return Err(QrError::LogoEmbed("logo image is empty".to_string()));
    }

    let max = logo_box(width);
    if max == 0 {
        return Err(QrError::LogoEmbed(format!(
            "QR image is too small ({}x{}) to hold a logo",
            width, height
        )));
    }

    let (lw, lh) = fit_within(logo_w, logo_h, max);
    let thumbnail = if (lw, lh) == (logo_w, logo_h) {
        logo.clone()
    } else {
        imageops::resize(logo, lw, lh, LOGO_FILTER)
    };

    let x = (width - lw) / 2;
    let y = (height - lh) / 2;

    let mut out = base.clone();
    // Alpha-blends each pixel: opaque logo pixels replace the module,
    // transparent ones leave it visible
    imageops::overlay(&mut out, &thumbnail, x as i64, y as i64);

    tracing::debug!(logo_w = lw, logo_h = lh, x, y, "embedded logo");
    Ok(out)
}
