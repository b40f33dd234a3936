//! Upload storage for the content directory.
//!
//! Uploaded blobs live flat in the content directory under
//! `<unix_seconds>_<sanitized filename>` and are addressed by records as
//! `/static/uploads/<name>`. Two uploads of the same filename within the same
//! second map to the same name; the later write replaces the earlier file.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::models::FileKind;

/// URL prefix under which the content directory is served.
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads/";

/// Result of writing an upload to the content directory.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Public path recorded as the record's content.
    pub content: String,
    /// Sanitized client filename.
    pub original_filename: String,
    pub kind: FileKind,
    /// Where the blob was written.
    pub path: PathBuf,
}

/// Service writing and removing blobs in the content directory.
#[derive(Clone)]
pub struct UploadService {
    upload_dir: PathBuf,
}

impl UploadService {
    /// Create a new upload service rooted at `upload_dir`.
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Create the content directory if it doesn't exist.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        Ok(())
    }

    /// Sanitize the client filename, write the bytes under a timestamped
    /// name and classify the file.
    ///
    /// Fails with [`Error::EmptyFilename`] before touching the filesystem if
    /// nothing usable is left of the filename.
    pub async fn store(&self, filename: &str, data: &[u8]) -> Result<StoredUpload> {
        let sanitized = sanitize_filename(filename);
        if sanitized.is_empty() {
            return Err(Error::EmptyFilename);
        }

        let stored_name = unique_name(Utc::now().timestamp(), &sanitized);
        let path = self.upload_dir.join(&stored_name);

        tokio::fs::write(&path, data).await?;
        info!(path = %path.display(), size = data.len(), "Stored upload");

        Ok(StoredUpload {
            content: format!("{}{}", UPLOAD_URL_PREFIX, stored_name),
            kind: FileKind::from_filename(&sanitized),
            original_filename: sanitized,
            path,
        })
    }

    /// Map a record's content path back to a file in the content directory.
    ///
    /// Only the final path component is used, so content can never resolve
    /// outside the content directory.
    pub fn resolve(&self, content: &str) -> Option<PathBuf> {
        let name = content.strip_prefix(UPLOAD_URL_PREFIX).unwrap_or(content);
        let name = Path::new(name).file_name()?;
        Some(self.upload_dir.join(name))
    }

    /// Remove the blob behind a record's content path.
    ///
    /// Best effort: a missing file is skipped and a failed removal is only
    /// logged. Returns whether a file was removed.
    pub async fn remove(&self, content: &str) -> bool {
        let Some(path) = self.resolve(content) else {
            warn!(content, "Upload path could not be resolved, skipping removal");
            return false;
        };

        match tokio::fs::try_exists(&path).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(path = %path.display(), "Upload already gone");
                return false;
            }
            Err(e) => {
                warn!("Failed to check upload file {}: {}", path.display(), e);
                return false;
            }
        }

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "Removed upload");
                true
            }
            Err(e) => {
                warn!("Failed to delete upload file {}: {}", path.display(), e);
                false
            }
        }
    }
}

/// Reduce a client filename to a flat, filesystem-safe name.
///
/// The name is NFKD-decomposed and whatever is still non-ASCII is dropped
/// (so `é` keeps its `e`), path separators become word breaks,
/// whitespace runs become `_`, anything outside `[A-Za-z0-9_.-]` is removed
/// and leading/trailing dots and underscores are stripped. The result may
/// be empty.
pub fn sanitize_filename(filename: &str) -> String {
    let spaced: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let safe: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    safe.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Stored name for an upload: the Unix timestamp (seconds) prefixed to the
/// sanitized filename.
pub fn unique_name(timestamp: i64, sanitized: &str) -> String {
    format!("{}_{}", timestamp, sanitized)
}
