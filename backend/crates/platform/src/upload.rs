//! Upload Policy and Blob Storage
//!
//! The upload pipeline is split into a pure configuration struct
//! ([`UploadPolicy`]: what is accepted, how large, how stored files are
//! named and addressed) and a storage seam ([`BlobStore`]: store bytes,
//! return a reference). The local-directory implementation is one
//! deployment choice; the trait keeps it swappable.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default upload size cap: 5 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

// ============================================================================
// Upload Policy
// ============================================================================

/// Pure upload configuration: content-type predicate, size cap, public
/// base path, and filename generation
#[derive(Clone)]
pub struct UploadPolicy {
    accept: fn(&str) -> bool,
    /// Maximum accepted payload size in bytes
    pub max_bytes: usize,
    /// Public base path under which stored files are served
    pub public_base: String,
}

impl UploadPolicy {
    /// Policy accepting only `image/*` content types, capped at 5 MiB
    pub fn images() -> Self {
        Self {
            accept: is_image,
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            public_base: "/uploads".to_string(),
        }
    }

    /// Whether the given content type is accepted
    pub fn accepts(&self, content_type: &str) -> bool {
        (self.accept)(content_type)
    }

    /// Generate a stored filename: timestamp prefix plus the sanitized
    /// original name, so repeated uploads of the same file do not collide
    pub fn filename_for(&self, original: &str, now_ms: i64) -> String {
        format!("{}-{}", now_ms, sanitize_filename(original))
    }

    /// Public URL for a stored filename
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.public_base, filename)
    }
}

fn is_image(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// Reduce a client-supplied filename to a safe basename
fn sanitize_filename(original: &str) -> String {
    let name: String = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() {
        "upload".to_string()
    } else {
        name
    }
}

// ============================================================================
// Blob Store
// ============================================================================

/// Blob storage errors
#[derive(Debug, Error)]
pub enum BlobStoreError {
    /// Write to the backing store failed
    #[error("Blob write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// External blob storage collaborator: store bytes, return the size written
#[trait_variant::make(BlobStore: Send)]
pub trait LocalBlobStore {
    /// Store bytes under the given name
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<u64, BlobStoreError>;
}

/// Local-directory blob store
#[derive(Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BlobStore for FsBlobStore {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<u64, BlobStoreError> {
        let path = self.root.join(name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "blob stored");

        Ok(bytes.len() as u64)
    }
}

// ============================================================================
// Tests
// ============================================================================
