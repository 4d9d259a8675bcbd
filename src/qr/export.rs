//! Saving the full-resolution QR image to disk

use image::{DynamicImage, ImageFormat, Rgb, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::color;
use crate::error::{QrError, QrResult};

/// Extension appended when the destination has none
pub const DEFAULT_EXTENSION: &str = "png";

/// Suggested file name for the save dialog
pub const DEFAULT_FILE_NAME: &str = "qrcode.png";

/// Give extension-less destinations a `.png` suffix
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// Write `image` in the format implied by the destination's extension
///
/// Returns the path actually written. JPEG and BMP receive a copy flattened
/// onto `background`. The file is only touched once encoding has succeeded,
/// so a rejected format leaves any existing file as it was.
pub fn save(image: &RgbaImage, destination: &Path, background: Rgb<u8>) -> QrResult<PathBuf> {
    let path = with_default_extension(destination);
    let save_error = |source| QrError::Save {
        path: path.clone(),
        source,
    };

    let format = ImageFormat::from_path(&path).map_err(save_error)?;
    let encoded = match format {
        ImageFormat::Jpeg | ImageFormat::Bmp => DynamicImage::ImageRgb8(color::flatten(image, background)),
        _ => DynamicImage::ImageRgba8(image.clone()),
    };

    let mut bytes = Cursor::new(Vec::new());
    encoded.write_to(&mut bytes, format).map_err(save_error)?;
    std::fs::write(&path, bytes.into_inner()).map_err(|e| save_error(e.into()))?;

    tracing::info!(path = %path.display(), ?format, "saved QR code");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(16, 16, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    #[test]
    fn test_default_extension() {
        assert_eq!(with_default_extension(Path::new("out/qr")), PathBuf::from("out/qr.png"));
        assert_eq!(with_default_extension(Path::new("qr.jpg")), PathBuf::from("qr.jpg"));
    }

    #[test]
    fn test_save_png_round_trips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let image = sample();

        let written = save(&image, &dir.path().join("code"), color::WHITE).unwrap();

        assert_eq!(written, dir.path().join("code.png"));
        let reloaded = image::open(&written).unwrap().to_rgba8();
        assert_eq!(reloaded, image);
    }

    #[test]
    fn test_save_jpeg_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let written = save(&sample(), &dir.path().join("code.jpg"), color::WHITE).unwrap();

        let reloaded = image::open(&written).unwrap();
        assert_eq!(reloaded.width(), 16);
        assert!(!reloaded.color().has_alpha());
    }

    #[test]
    fn test_save_bmp_flattens_onto_background() {
        let dir = tempfile::tempdir().unwrap();
        let mut image = sample();
        image.put_pixel(0, 0, Rgba([0, 0, 0, 0]));

        let written = save(&image, &dir.path().join("code.bmp"), Rgb([0, 200, 0])).unwrap();

        let reloaded = image::open(&written).unwrap();
        assert!(!reloaded.color().has_alpha());
        let reloaded = reloaded.to_rgb8();
        assert_eq!(*reloaded.get_pixel(0, 0), Rgb([0, 200, 0]));
        assert_eq!(*reloaded.get_pixel(1, 0), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_unknown_extension_is_a_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.nope");

        assert!(matches!(save(&sample(), &path, color::WHITE), Err(QrError::Save { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_rejected_encoding_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // ICO caps images at 256 px and HDR only takes float RGB
        let large = RgbaImage::from_pixel(300, 300, Rgba([0, 0, 0, 255]));

        for name in ["code.ico", "code.hdr"] {
            let path = dir.path().join(name);
            assert!(matches!(save(&large, &path, color::WHITE), Err(QrError::Save { .. })), "{}", name);
            assert!(!path.exists(), "{}", name);
        }
    }

    #[test]
    fn test_rejected_encoding_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("previous.ico");
        std::fs::write(&path, b"previous contents").unwrap();
        let large = RgbaImage::from_pixel(300, 300, Rgba([0, 0, 0, 255]));

        assert!(save(&large, &path, color::WHITE).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"previous contents");
    }

    #[test]
    fn test_missing_directory_is_a_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("code.png");

        assert!(matches!(save(&sample(), &path, color::WHITE), Err(QrError::Save { .. })));
    }
}
