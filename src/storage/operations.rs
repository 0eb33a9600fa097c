//! Storage operations
//!
//! Whole-file read, write, and remove against the local filesystem.
//! Used by copy for the local side of a transfer and by move for its
//! cleanup step.

use log::{debug, info};
use std::fs;

use crate::error::StorageError;

/// Reads the full contents of a local file.
pub fn read_file(path: &str) -> Result<Vec<u8>, StorageError> {
    debug!("Reading local file {}", path);
    let bytes = fs::read(path).map_err(|e| StorageError::ReadFailed(path.to_string(), e))?;
    info!("Read {} bytes from {}", bytes.len(), path);
    Ok(bytes)
}

/// Writes the full contents to a local file, replacing any existing file.
pub fn write_file(path: &str, bytes: &[u8]) -> Result<(), StorageError> {
    debug!("Writing local file {}", path);
    fs::write(path, bytes).map_err(|e| StorageError::WriteFailed(path.to_string(), e))?;
    info!("Wrote {} bytes to {}", bytes.len(), path);
    Ok(())
}

/// Removes a local file.
pub fn remove_file(path: &str) -> Result<(), StorageError> {
    fs::remove_file(path).map_err(|e| StorageError::RemoveFailed(path.to_string(), e))?;
    info!("Removed local file {}", path);
    Ok(())
}
