//! Ledger snapshots on disk.
//!
//! Files are opened through `cap_std` with the parent directory as the only
//! capability, mirroring how the rest of the crate avoids `std::fs`.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::debug;

use super::LedgerSnapshot;

/// Errors raised while reading or writing a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotFileError {
    /// The file or its directory could not be accessed.
    #[error("failed to access snapshot at {path}: {source}")]
    Io {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file did not contain a valid snapshot.
    #[error("snapshot at {path} is not valid JSON: {source}")]
    Json {
        /// Snapshot path.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
}

fn open_parent(path: &Path) -> Result<(Dir, &Path), SnapshotFileError> {
    let io_error = |source| SnapshotFileError::Io {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "snapshot path must name a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    Ok((dir, Path::new(file_name)))
}

/// Read a snapshot from `path`; a missing file yields an empty snapshot.
///
/// # Errors
///
/// Returns [`SnapshotFileError`] when the file cannot be read or parsed.
pub fn load_snapshot(path: &Path) -> Result<LedgerSnapshot, SnapshotFileError> {
    let (dir, file_name) = open_parent(path)?;
    let payload = match dir.read(file_name) {
        Ok(payload) => payload,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot file; starting from empty ledger");
            return Ok(LedgerSnapshot::default());
        }
        Err(source) => {
            return Err(SnapshotFileError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_slice(&payload).map_err(|source| SnapshotFileError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `snapshot` to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SnapshotFileError`] when the file cannot be written.
pub fn save_snapshot(path: &Path, snapshot: &LedgerSnapshot) -> Result<(), SnapshotFileError> {
    let payload = serde_json::to_vec_pretty(snapshot).map_err(|source| SnapshotFileError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let (dir, file_name) = open_parent(path)?;
    dir.write(file_name, payload)
        .map_err(|source| SnapshotFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), entries = snapshot.entries.len(), "snapshot saved");
    Ok(())
}
