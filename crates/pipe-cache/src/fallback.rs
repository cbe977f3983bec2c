//! Content hash of the fallback icon image

use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

use crate::error::{CacheError, CacheResult};

/// SHA-256 digest of an image's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHash([u8; 32]);

impl ImageHash {
    /// Hash raw image content
    pub fn of(content: &[u8]) -> Self {
        Self(Sha256::digest(content).into())
    }

    /// Lowercase hex form, as sent in `icon_hash` fields
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ImageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Read the image at `path` and hash it
pub async fn hash_file(path: &Path) -> CacheResult<ImageHash> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|source| CacheError::FallbackImage {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(ImageHash::of(&content))
}
