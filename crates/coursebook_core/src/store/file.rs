//! File load/save for the training document.
//!
//! # Invariants
//! - Saves rewrite the whole file; there is no partial update path.
//! - Parent directories are created before writing.

use super::{StoreError, StoreResult, TrainingDocument};
use log::{error, info};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

/// Loads the document at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
/// - `StoreError::Io` when the file exists but cannot be read.
/// - `StoreError::Deserialization` when its content is not a training document.
pub fn load_document(path: &Path) -> StoreResult<Option<TrainingDocument>> {
    let started_at = Instant::now();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(
                "event=store_load module=store status=ok found=false duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Ok(None);
        }
        Err(err) => {
            error!(
                "event=store_load module=store status=error duration_ms={} error_code=store_read_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    match TrainingDocument::from_slice(&bytes) {
        Ok(document) => {
            info!(
                "event=store_load module=store status=ok found=true courses={} participants={} sessions={} duration_ms={}",
                document.courses.len(),
                document.participants.len(),
                document.sessions.len(),
                started_at.elapsed().as_millis()
            );
            Ok(Some(document))
        }
        Err(err) => {
            error!(
                "event=store_load module=store status=error duration_ms={} error_code=store_malformed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(StoreError::Deserialization {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }
}

/// Rewrites the file at `path` with the pretty-printed document.
pub fn save_document(path: &Path, document: &TrainingDocument) -> StoreResult<()> {
    let started_at = Instant::now();

    match write_document(path, document) {
        Ok(()) => {
            info!(
                "event=store_save module=store status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=store_save module=store status=error duration_ms={} error_code=store_write_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(StoreError::Io {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }
}

fn write_document(path: &Path, document: &TrainingDocument) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut bytes = serde_json::to_vec_pretty(&document.to_value()).map_err(io::Error::from)?;
    bytes.push(b'\n');
    fs::write(path, bytes)
}
