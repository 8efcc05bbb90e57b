use std::path::Path;

use thiserror::Error;

/// Stock photo substituted for every uploaded file. Real blob storage is an
/// external collaborator this crate only stubs.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://images.pexels.com/photos/1170986/pexels-photo-1170986.jpeg?auto=compress&cs=tinysrgb&w=800&h=400&fit=crop";

/// Errors surfaced by an image store.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image file not found: {0}")]
    Missing(String),
}

/// External collaborator contract for image acquisition: accept a local
/// selection, return the URL to store in the document.
pub trait ImageStore {
    fn upload(&self, file: &Path) -> Result<String, UploadError>;
}

/// Stub store: never reads or transmits the file content, always hands
/// back the fixed stock photo URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockPhotoStore;

impl ImageStore for StockPhotoStore {
    fn upload(&self, file: &Path) -> Result<String, UploadError> {
        if !file.is_file() {
            return Err(UploadError::Missing(file.display().to_string()));
        }
        Ok(PLACEHOLDER_IMAGE_URL.to_string())
    }
}
