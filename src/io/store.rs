use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

/// Error type for the flat-file stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid data: {0}")]
    Schema(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// `<file>.backup` next to the store file.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// Load a whole-collection JSON array. A missing file is created holding
/// `[]` and read back as empty.
pub fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        atomic_write(path, b"[]").map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Overwrite the whole collection.
pub fn write_array<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(items).map_err(|e| StoreError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    atomic_write(path, json.as_bytes()).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Overwrite the whole collection, first copying the prior contents to the
/// `.backup` file. Backup failure never blocks the write itself.
pub fn write_array_with_backup<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    if let Ok(previous) = fs::read(path) {
        let _ = atomic_write(&backup_path(path), &previous);
    }
    write_array(path, items)
}
