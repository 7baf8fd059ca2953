//! Checksum-verified file downloads.
//!
//! Files are fetched fully into memory, verified against their declared
//! hash, and only then written to disk through a temporary file in the
//! target directory so a crash never leaves a half-written artifact behind.

use digest::Digest;
use log::debug;
use sha1::Sha1;
use sha2::Sha256;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::client::ApiClient;
use crate::error::{Result, RinthError};
use crate::models::version::{FileHashes, VersionFile};

pub(crate) fn hex_digest<D: Digest>(data: &[u8]) -> String {
    let mut hasher = D::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Verify `data` against the declared hashes. `sha256` wins when both are
/// present; a file declaring neither cannot be verified and is rejected.
pub(crate) fn verify_hashes(data: &[u8], hashes: &FileHashes) -> Result<()> {
    if let Some(expected) = &hashes.sha256 {
        let calculated = hex_digest::<Sha256>(data);
        if !calculated.eq_ignore_ascii_case(expected) {
            return Err(RinthError::ChecksumMismatch);
        }
        return Ok(());
    }
    if let Some(expected) = &hashes.sha1 {
        let calculated = hex_digest::<Sha1>(data);
        if !calculated.eq_ignore_ascii_case(expected) {
            return Err(RinthError::ChecksumMismatch);
        }
        return Ok(());
    }
    Err(RinthError::InvalidArgument(
        "file declares no sha256 or sha1 hash to verify against".to_string(),
    ))
}

pub(crate) fn write_file(dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf> {
    // Declared filenames come from the server; never let one escape the
    // target directory.
    if filename.is_empty() || filename.contains('/') || filename.contains('\\') {
        return Err(RinthError::InvalidArgument(format!(
            "refusing to write file with unsafe name: {filename:?}"
        )));
    }

    fs::create_dir_all(dir)?;
    let destination = dir.join(filename);

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(data)?;
    temp.flush()?;
    temp.persist(&destination)
        .map_err(|e| RinthError::Io(e.error))?;

    Ok(destination)
}

/// Fetch one version file, verify its checksum, and write it into `dir`.
/// Returns the number of bytes written. A mismatch aborts before any
/// filesystem write happens.
pub fn download_file(client: &ApiClient, file: &VersionFile, dir: &Path) -> Result<u64> {
    debug!("Downloading {} into {}", file.filename, dir.display());
    let data = client.get_bytes(&file.url)?;
    verify_hashes(&data, &file.hashes)?;
    write_file(dir, &file.filename, &data)?;
    Ok(data.len() as u64)
}
