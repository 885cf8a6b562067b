//! Photo intake: MIME validation, the drop zone and loading photos from disk

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::models::{FileCandidate, SelectedFile};

/// The only MIME types the prediction endpoint accepts
pub const ACCEPTED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/jpg", "image/webp"];

/// Checks a candidate and turns it into the selected photo
pub fn validate(candidate: FileCandidate, max_bytes: u64) -> Result<SelectedFile, ValidationError> {
    if !ACCEPTED_MIME_TYPES.contains(&candidate.mime_type.as_str()) {
        return Err(ValidationError::UnsupportedType {
            mime_type: candidate.mime_type,
        });
    }

    let size = candidate.bytes.len() as u64;
    if size > max_bytes {
        return Err(ValidationError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    Ok(SelectedFile {
        name: candidate.name,
        mime_type: candidate.mime_type,
        bytes: candidate.bytes,
    })
}

/// Guesses a MIME type from the file extension, the way a browser file picker does
pub fn mime_from_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg" | "jfif") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Reads a photo from disk into a candidate
pub async fn load_candidate(path: &Path) -> Result<FileCandidate> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read photo {}", path.display()))?;

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    info!("Loaded {} ({} bytes)", name, bytes.len());

    Ok(FileCandidate {
        name,
        mime_type: mime_from_extension(path).to_string(),
        bytes,
    })
}

/// Drag events delivered to the drop zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop(Vec<FileCandidate>),
}

/// What the host should do after the drop zone saw an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragOutcome {
    /// Always set: drops must never navigate away from the page
    pub prevent_default: bool,
    /// First file of a drop, still unvalidated
    pub dropped: Option<FileCandidate>,
}

/// Visual drag state of the drop zone. Never touches the selected file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropZone {
    highlighted: bool,
}

impl DropZone {
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn handle(&mut self, event: DragEvent) -> DragOutcome {
        let dropped = match event {
            DragEvent::Enter | DragEvent::Over => {
                self.highlighted = true;
                None
            }
            DragEvent::Leave => {
                self.highlighted = false;
                None
            }
            DragEvent::Drop(files) => {
                self.highlighted = false;
                files.into_iter().next()
            }
        };

        debug!("Drop zone highlighted: {}", self.highlighted);

        DragOutcome {
            prevent_default: true,
            dropped,
        }
    }
}
