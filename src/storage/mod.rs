//! Disk-backed store for uploaded images. Writes are append-only: every
//! upload gets a fresh capture-time name, and replaced or orphaned files
//! are never reclaimed (matching the API contract for updates/deletes).

use chrono::{DateTime, Utc};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Handle to the upload directory. Cheap to clone into AppState.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist uploaded bytes under a timestamped name that keeps the
    /// original extension. Returns the store-relative path recorded in
    /// `posts.image_url`, e.g. `uploads/1700000000000.png`.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<String> {
        let name = stored_name(original_name, Utc::now());
        tokio::fs::write(self.root.join(&name), bytes).await?;
        Ok(format!("uploads/{name}"))
    }

    /// Read a stored file by its name under the upload directory.
    /// Ok(None) when the file does not exist or the name tries to
    /// escape the directory.
    pub async fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        if !is_safe(name) {
            return Ok(None);
        }

        match tokio::fs::read(self.root.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Only plain relative names are served; anything with `..`, a root, or
/// a drive prefix is treated as missing.
fn is_safe(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

fn stored_name(original: &str, now: DateTime<Utc>) -> String {
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    format!("{}{}", now.timestamp_millis(), ext)
}
