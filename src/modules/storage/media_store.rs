use std::path::PathBuf;

use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

/// Local-disk media store.
///
/// Files are addressed by `<uuid>.<extension>` names generated by the
/// service; client input never reaches the filesystem path directly.
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a new media store, ensuring the root directory exists.
    pub async fn new(config: StorageConfig) -> Result<Self, AppError> {
        let root = PathBuf::from(&config.media_root);

        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create media root '{}': {}",
                root.display(),
                e
            ))
        })?;

        info!("Media store initialized at {}", root.display());

        Ok(Self { root })
    }

    /// Write file bytes under the given store filename.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<(), AppError> {
        let path = self.root.join(filename);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write media file: {}", e)))?;

        debug!("Media file written: {}", path.display());

        Ok(())
    }

    /// Read file bytes for the given store filename.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, AppError> {
        let path = self.root.join(filename);

        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound("File not found".to_string())
            } else {
                AppError::Internal(format!("Failed to read media file: {}", e))
            }
        })
    }

    /// Remove a stored file. Missing files are treated as already deleted.
    pub async fn delete(&self, filename: &str) -> Result<(), AppError> {
        let path = self.root.join(filename);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Media file deleted: {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to delete media file: {}",
                e
            ))),
        }
    }
}

/// Parse a client-supplied media filename into its (uuid, extension) pair.
///
/// Anything that is not exactly `<uuid>.<alphanumeric extension>` is
/// rejected, which rules out path traversal through this endpoint.
pub fn parse_media_filename(filename: &str) -> Option<(Uuid, &str)> {
    let (stem, extension) = filename.rsplit_once('.')?;

    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let id = Uuid::parse_str(stem).ok()?;

    Some((id, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(dir: &tempfile::TempDir) -> MediaStore {
        MediaStore {
            root: dir.path().to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_save_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let filename = format!("{}.png", Uuid::new_v4());
        store.save(&filename, b"fake image bytes").await.unwrap();

        let data = store.read(&filename).await.unwrap();
        assert_eq!(data, b"fake image bytes");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let err = store
            .read(&format!("{}.png", Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let filename = format!("{}.jpg", Uuid::new_v4());
        store.save(&filename, b"bytes").await.unwrap();

        store.delete(&filename).await.unwrap();
        store.delete(&filename).await.unwrap();

        assert!(matches!(
            store.read(&filename).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_parse_media_filename_valid() {
        let id = Uuid::new_v4();

        let name = format!("{}.png", id);
        let (parsed, ext) = parse_media_filename(&name).unwrap();
        assert_eq!(parsed, id);
        assert_eq!(ext, "png");
    }

    #[test]
    fn test_parse_media_filename_rejects_traversal() {
        assert!(parse_media_filename("../../etc/passwd").is_none());
        assert!(parse_media_filename("..%2Fpasswd.png").is_none());

        let id = Uuid::new_v4();
        assert!(parse_media_filename(&format!("{}.p/ng", id)).is_none());
        assert!(parse_media_filename(&format!("{}.", id)).is_none());
    }

    #[test]
    fn test_parse_media_filename_rejects_non_uuid() {
        assert!(parse_media_filename("image.png").is_none());
        assert!(parse_media_filename("").is_none());
        assert!(parse_media_filename("noextension").is_none());
    }
}
