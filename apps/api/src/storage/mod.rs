//! Resume file storage.
//!
//! Uploads are written by the surrounding job-board application; this service
//! only ever reads them back by stored filename.

mod local;
mod s3;

pub use local::LocalResumeStore;
pub use s3::S3ResumeStore;

use std::path::{Component, Path};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("invalid filename: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

/// Read access to stored resume documents.
///
/// Carried in `AppState` as `Arc<dyn ResumeStore>`.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Returns the raw bytes of `filename`, or `StoreError::NotFound`.
    async fn fetch(&self, filename: &str) -> Result<Bytes, StoreError>;

    /// Short backend label for logs.
    fn backend(&self) -> &'static str;
}

/// Accepts exactly one plain path component; backslashes and NUL are rejected too.
pub fn validate_filename(filename: &str) -> Result<(), StoreError> {
    let mut components = Path::new(filename).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    let bad = !single_normal
        || filename.trim().is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains('\0');
    if bad {
        return Err(StoreError::InvalidName(filename.to_string()));
    }
    Ok(())
}
