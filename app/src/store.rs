//! Flat-file JSON persistence. Each document is one JSON file that is read
//! and rewritten wholesale on every operation. There is no locking: two
//! concurrent writers race read-modify-write and the last write wins.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Handle to the two documents backing the application.
#[derive(Debug, Clone)]
pub struct Store {
    users_path: PathBuf,
    donations_path: PathBuf,
}

impl Store {
    pub fn new(users_path: impl Into<PathBuf>, donations_path: impl Into<PathBuf>) -> Self {
        Self {
            users_path: users_path.into(),
            donations_path: donations_path.into(),
        }
    }

    pub(crate) fn users_path(&self) -> &Path {
        &self.users_path
    }

    pub(crate) fn donations_path(&self) -> &Path {
        &self.donations_path
    }
}

/// Reads a document, treating an absent file as the empty document.
pub(crate) fn read<T: Default + DeserializeOwned>(path: &Path) -> T {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            return T::default()
        }
        Err(e) => panic!("failed to read {}: {}", path.display(), e),
    };
    serde_json::from_slice(&bytes).unwrap()
}

/// Rewrites a document in place. Write failures are logged, not surfaced.
pub(crate) fn write<T: Serialize>(path: &Path, document: &T) {
    if let Err(e) = try_write(path, document) {
        log::error!("failed to save {}: {}", path.display(), e);
    }
}

fn try_write<T: Serialize>(path: &Path, document: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(document)?)?;
    Ok(())
}
