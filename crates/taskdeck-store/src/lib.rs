mod bucket;
mod memory;

pub use bucket::BucketStore;
pub use memory::{MemoryStore, StoreOp};

use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Backend(String),
}

/// File operations against the backend's fixed storage bucket.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Create an object under `name`. Uploading over an existing name fails.
    async fn upload(&self, name: &str, data: Bytes, content_type: &str) -> Result<(), StoreError>;

    /// The stable, directly fetchable address of an uploaded object.
    /// Pure string construction, resolvable before or after the upload.
    fn public_url(&self, name: &str) -> String;

    /// Delete an object by name. Absent objects are a no-op.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;
}

// -- Name helpers --

/// Upload name derived from the upload instant and the original filename,
/// so repeated uploads of `photo.png` never collide.
pub fn upload_name(uploaded_at_millis: i64, original: &str) -> String {
    format!("{uploaded_at_millis}_{original}")
}

/// The stored object name embedded in a public URL: the path segment after
/// the last separator. `None` for empty input.
pub fn name_from_public_url(url: &str) -> Option<&str> {
    if url.is_empty() {
        return None;
    }
    url.rsplit('/').next().filter(|name| !name.is_empty())
}

pub fn content_type_for_name(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or_default();
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
