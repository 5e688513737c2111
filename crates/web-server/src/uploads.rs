use configuration::UploadSettings;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Extension used when the uploaded file name has none we can keep.
const DEFAULT_EXTENSION: &str = ".jpg";

/// An image the client attached to a submission, fully read into memory.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// An image written to the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub path: PathBuf,
    /// What the record stores, e.g. `/schoolImages/1718000000000_3f9c2a7d1e.png`.
    pub public_path: String,
}

/// The publicly served directory uploaded images are written into.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    public_prefix: String,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(settings: &UploadSettings) -> Self {
        Self {
            dir: settings.dir.clone(),
            public_prefix: settings.public_prefix.trim_end_matches('/').to_string(),
            max_bytes: settings.max_image_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Writes the image under a fresh `<millis>_<suffix><ext>` name.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> io::Result<StoredImage> {
        self.ensure_dir().await?;

        let file_name = format!(
            "{}_{}{}",
            chrono::Utc::now().timestamp_millis(),
            &Uuid::new_v4().simple().to_string()[..10],
            extension_of(original_name),
        );
        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored uploaded image.");
        Ok(StoredImage {
            path,
            public_path: format!("{}/{}", self.public_prefix, file_name),
        })
    }

    /// Removes an image whose record was never stored. Failure is only logged.
    pub async fn discard(&self, image: &StoredImage) {
        if let Err(e) = tokio::fs::remove_file(&image.path).await {
            tracing::warn!(error = %e, path = %image.path.display(), "Failed to remove orphaned image.");
        }
    }
}

/// Lowercased extension of the client's file name, with the leading dot.
fn extension_of(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}
