/// Uploaded media storage
///
/// Files land in a single configured directory under server-generated names;
/// post rows store only the filename. Absolute URLs are composed at read
/// time from the caller-visible base URL and the fixed public prefix.
/// Deletion is best-effort by contract: a failure is logged and never fails
/// the operation that requested it.
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use uuid::Uuid;

use crate::config::MediaConfig;
use crate::error::{AppError, Result};

/// Public path prefix uploads are served under
pub const PUBLIC_UPLOADS_PATH: &str = "/uploads";

const MAX_EXTENSION_LENGTH: usize = 10;

#[derive(Debug, Clone)]
pub struct MediaStore {
    upload_dir: PathBuf,
}

impl MediaStore {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            upload_dir: PathBuf::from(&config.upload_dir),
        }
    }

    /// Create the upload directory if missing; called once at startup
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)
    }

    /// Persist an uploaded part under a generated filename and return the name
    pub async fn store(&self, file: &TempFile) -> Result<String> {
        let filename = generate_filename(file.file_name.as_deref());
        let dest = self.upload_dir.join(&filename);

        tokio::fs::copy(file.file.path(), &dest)
            .await
            .map_err(|err| AppError::Internal(format!("Failed to store upload: {err}")))?;

        Ok(filename)
    }

    /// Best-effort removal of a stored file
    pub async fn remove(&self, filename: &str) {
        if !is_safe_filename(filename) {
            tracing::warn!(%filename, "Refusing to delete media file with unexpected name");
            return;
        }

        let path = self.upload_dir.join(filename);
        if let Err(err) = tokio::fs::remove_file(&path).await {
            tracing::warn!(%filename, "Failed to delete media file: {}", err);
        }
    }
}

/// Compose the absolute URL for a stored filename
pub fn media_url(base_url: &str, filename: &str) -> String {
    format!(
        "{}{}/{}",
        base_url.trim_end_matches('/'),
        PUBLIC_UPLOADS_PATH,
        filename
    )
}

/// Server-generated filename: a fresh UUID plus the sanitized extension of
/// the client-supplied name. The client name itself never reaches disk.
pub fn generate_filename(original: Option<&str>) -> String {
    let ext = original
        .map(Path::new)
        .and_then(Path::extension)
        .and_then(OsStr::to_str)
        .map(sanitize_extension)
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "bin".to_string());

    format!("{}.{}", Uuid::new_v4(), ext)
}

fn sanitize_extension(ext: &str) -> String {
    ext.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_EXTENSION_LENGTH)
        .collect::<String>()
        .to_lowercase()
}

/// Stored names are flat UUID-based filenames; anything with path syntax in
/// it did not come from this store.
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_filename_keeps_extension() {
        let name = generate_filename(Some("holiday.JPG"));
        assert!(name.ends_with(".jpg"));
        assert_eq!(name.len(), 36 + 4);
    }

    #[test]
    fn test_generate_filename_without_extension() {
        assert!(generate_filename(Some("README")).ends_with(".bin"));
        assert!(generate_filename(None).ends_with(".bin"));
    }

    #[test]
    fn test_generate_filename_strips_hostile_extension() {
        let name = generate_filename(Some("x.p/../g"));
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }

    #[test]
    fn test_generated_names_are_unique() {
        assert_ne!(
            generate_filename(Some("a.png")),
            generate_filename(Some("a.png"))
        );
    }

    #[test]
    fn test_media_url_composition() {
        assert_eq!(
            media_url("http://localhost:5000", "a.png"),
            "http://localhost:5000/uploads/a.png"
        );
        assert_eq!(
            media_url("http://localhost:5000/", "a.png"),
            "http://localhost:5000/uploads/a.png"
        );
    }

    #[test]
    fn test_safe_filename_guard() {
        assert!(is_safe_filename("abc123.png"));
        assert!(!is_safe_filename("../etc/passwd"));
        assert!(!is_safe_filename("a/b.png"));
        assert!(!is_safe_filename(""));
    }
}
