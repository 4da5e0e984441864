//! In-memory file handles and preview lifecycle for the upload steps.
//!
//! Selected documents exist only as bytes plus a preview handle until the
//! upload succeeds; previews must be released when superseded or when the
//! owning step is torn down, mirroring object-URL create/revoke pairing.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Maximum RG images (front and back).
pub const MAX_RG_FILES: usize = 2;

/// An image picked by the user, held in memory until uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, inferring the content type from the
    /// extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo.jpg")
            .to_string();
        let content_type = match path.extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        };
        Ok(Self::new(file_name, content_type, bytes))
    }
}

/// Tracks live preview handles so leaks are observable.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashSet<Uuid>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new preview and hand back its owning handle.
    pub fn create(&self) -> PreviewHandle {
        let id = Uuid::new_v4();
        if let Ok(mut live) = self.live.lock() {
            live.insert(id);
        }
        PreviewHandle {
            id,
            live: Arc::clone(&self.live),
        }
    }

    /// Number of previews not yet released.
    pub fn active(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }
}

/// Owning handle for one preview. Released explicitly or on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    live: Arc<Mutex<HashSet<Uuid>>>,
}

impl PreviewHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Release now rather than waiting for drop.
    pub fn release(self) {}
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(&self.id);
        }
    }
}

/// The user's profile-photo pick: at most one image plus its preview.
#[derive(Debug, Default)]
pub struct PhotoSelection {
    attachment: Option<ImageAttachment>,
    preview: Option<PreviewHandle>,
}

impl PhotoSelection {
    /// Replace the current pick. The superseded preview is released.
    pub fn select(&mut self, attachment: ImageAttachment, registry: &PreviewRegistry) {
        self.preview = Some(registry.create());
        self.attachment = Some(attachment);
    }

    pub fn attachment(&self) -> Option<&ImageAttachment> {
        self.attachment.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.attachment.is_none()
    }
}

/// RG (identity document) pick: front and back, at most two images.
#[derive(Debug, Default)]
pub struct RgSelection {
    attachments: Vec<ImageAttachment>,
    previews: Vec<PreviewHandle>,
}

impl RgSelection {
    /// Replace the current pick, keeping at most [`MAX_RG_FILES`] files.
    /// All previously held previews are released.
    pub fn select(&mut self, files: Vec<ImageAttachment>, registry: &PreviewRegistry) {
        let mut files = files;
        files.truncate(MAX_RG_FILES);
        self.previews = files.iter().map(|_| registry.create()).collect();
        self.attachments = files;
    }

    pub fn attachments(&self) -> &[ImageAttachment] {
        &self.attachments
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }
}
