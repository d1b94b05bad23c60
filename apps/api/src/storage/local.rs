use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use super::{validate_filename, ResumeStore, StoreError};

/// Reads resumes from the upload folder, falling back to the screenings folder.
pub struct LocalResumeStore {
    upload_dir: PathBuf,
    screening_dir: PathBuf,
}

impl LocalResumeStore {
    pub fn new(upload_dir: impl Into<PathBuf>, screening_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            screening_dir: screening_dir.into(),
        }
    }
}

#[async_trait]
impl ResumeStore for LocalResumeStore {
    async fn fetch(&self, filename: &str) -> Result<Bytes, StoreError> {
        validate_filename(filename)?;

        for dir in [&self.upload_dir, &self.screening_dir] {
            let path = dir.join(filename);
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    debug!("Read resume from {}", path.display());
                    return Ok(Bytes::from(bytes));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::Io(e)),
            }
        }

        Err(StoreError::NotFound(filename.to_string()))
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_from_upload_dir() {
        let uploads = tempfile::tempdir().unwrap();
        let screenings = tempfile::tempdir().unwrap();
        std::fs::write(uploads.path().join("cv.pdf"), b"upload copy").unwrap();
        std::fs::write(screenings.path().join("cv.pdf"), b"screening copy").unwrap();

        let store = LocalResumeStore::new(uploads.path(), screenings.path());
        let bytes = store.fetch("cv.pdf").await.unwrap();
        assert_eq!(&bytes[..], b"upload copy");
    }

    #[tokio::test]
    async fn test_falls_back_to_screening_dir() {
        let uploads = tempfile::tempdir().unwrap();
        let screenings = tempfile::tempdir().unwrap();
        std::fs::write(screenings.path().join("old.pdf"), b"archived").unwrap();

        let store = LocalResumeStore::new(uploads.path(), screenings.path());
        let bytes = store.fetch("old.pdf").await.unwrap();
        assert_eq!(&bytes[..], b"archived");
    }

    #[tokio::test]
    async fn test_missing_everywhere_is_not_found() {
        let uploads = tempfile::tempdir().unwrap();
        let screenings = tempfile::tempdir().unwrap();

        let store = LocalResumeStore::new(uploads.path(), screenings.path());
        let err = store.fetch("ghost.pdf").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(name) if name == "ghost.pdf"));
    }

    #[tokio::test]
    async fn test_traversal_never_touches_disk() {
        let uploads = tempfile::tempdir().unwrap();
        let store = LocalResumeStore::new(uploads.path(), uploads.path());
        let err = store.fetch("../cv.pdf").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidName(_)));
    }

    #[tokio::test]
    async fn test_reads_name_with_inner_double_dots() {
        let uploads = tempfile::tempdir().unwrap();
        std::fs::write(uploads.path().join("jane..cv.pdf"), b"dotted").unwrap();

        let store = LocalResumeStore::new(uploads.path(), uploads.path());
        let bytes = store.fetch("jane..cv.pdf").await.unwrap();
        assert_eq!(&bytes[..], b"dotted");
    }
}
