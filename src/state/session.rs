//! Editing session: current settings plus the last rendered artifact
//!
//! The UI adapter owns one `Session` and routes every event through it. The
//! session guarantees that a failed or blank generation never leaves a stale
//! artifact behind, and that saving is only possible while an artifact exists.

use std::path::{Path, PathBuf};

use super::settings::Settings;
use crate::error::{QrError, QrResult};
use crate::qr::{self, export, Generation, RenderOptions, RenderedArtifact};

/// What the display should do after a regeneration
#[derive(Debug)]
pub enum Outcome {
    /// Blank text: empty preview, Save disabled
    Cleared,
    /// New preview available; carries the logo warning, if any
    Rendered { logo_warning: Option<QrError> },
    /// Generation failed: cleared preview, Save disabled, report the error
    Failed(QrError),
}

#[derive(Debug, Default)]
pub struct Session {
    pub settings: Settings,
    options: RenderOptions,
    artifact: Option<RenderedArtifact>,
}

impl Session {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            settings: Settings::default(),
            options,
            artifact: None,
        }
    }

    /// Rebuild the artifact from the current settings
    ///
    /// The previous artifact is discarded whatever happens.
    pub fn regenerate(&mut self) -> Outcome {
        self.artifact = None;

        match qr::generate(&self.settings.request(), &self.options) {
            Ok(Generation::Cleared) => Outcome::Cleared,
            Ok(Generation::Rendered(mut artifact)) => {
                let logo_warning = artifact.logo_warning.take();
                self.artifact = Some(artifact);
                Outcome::Rendered { logo_warning }
            }
            Err(e) => {
                tracing::error!(error = %e, "QR generation failed");
                Outcome::Failed(e)
            }
        }
    }

    /// The current artifact, if the last generation succeeded
    pub fn artifact(&self) -> Option<&RenderedArtifact> {
        self.artifact.as_ref()
    }

    /// Save is only available while an artifact exists
    pub fn can_save(&self) -> bool {
        self.artifact.is_some()
    }

    /// Write the full-resolution image; the artifact is kept either way
    pub fn save(&self, destination: &Path) -> QrResult<PathBuf> {
        let artifact = self.artifact.as_ref().ok_or(QrError::NothingToSave)?;
        export::save(&artifact.full_image, destination, artifact.background)
    }

    /// Back to defaults with an empty preview
    pub fn reset(&mut self) {
        self.settings.reset();
        self.artifact = None;
    }
}
