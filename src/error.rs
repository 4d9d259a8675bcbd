//! Error types for the QR pipeline
//!
//! Every operation the UI can trigger (generate, load logo, embed, save)
//! reports failures through `QrError`. None of them are fatal: the caller
//! shows a dialog and falls back to a safe state.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrError {
    /// The encoder rejected the payload or parameters
    #[error("failed to encode QR code: {0}")]
    Encoding(String),

    /// The selected logo file could not be decoded as an image
    #[error("failed to load logo {}: {source}", .path.display())]
    LogoLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Compositing the logo onto the symbol failed
    #[error("failed to embed logo: {0}")]
    LogoEmbed(String),

    /// The destination could not be written
    #[error("failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Save was requested while no artifact exists
    #[error("there is no QR code to save")]
    NothingToSave,
}

pub type QrResult<T> = Result<T, QrError>;
