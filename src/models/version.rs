use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::client::ApiClient;
use crate::error::Result;

/// Release channel of a version. Strict: an unrecognized channel is a decode
/// failure, not a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    Release,
    Beta,
    Alpha,
}

impl VersionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionType::Release => "release",
            VersionType::Beta => "beta",
            VersionType::Alpha => "alpha",
        }
    }
}

impl std::fmt::Display for VersionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Listing status of a version. Unrecognized values decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Listed,
    Archived,
    Draft,
    Unlisted,
    Scheduled,
    #[serde(other)]
    Unknown,
}

impl Default for VersionStatus {
    fn default() -> Self {
        VersionStatus::Unknown
    }
}

/// How a dependency relates to the version declaring it. Strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    Required,
    Optional,
    Incompatible,
    Embedded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(default)]
    pub version_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    pub dependency_type: DependencyType,
}

/// Hashes declared for a downloadable file. At least one of the two is
/// normally present; `sha256` wins when both are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHashes {
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

/// One downloadable artifact of a version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionFile {
    pub hashes: FileHashes,
    pub url: String,
    pub filename: String,
    pub primary: bool,
    pub size: u64,
}

impl VersionFile {
    /// Fetch the file, verify its checksum, and write it into `dir` under its
    /// declared filename. Returns the number of bytes written. A checksum
    /// mismatch fails before anything touches the filesystem.
    pub fn download(&self, client: &ApiClient, dir: &Path) -> Result<u64> {
        crate::download::download_file(client, self, dir)
    }
}

/// A published version of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    pub project_id: String,
    pub author_id: String,
    pub name: String,
    pub version_number: String,
    #[serde(default)]
    pub changelog: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    pub game_versions: Vec<String>,
    pub version_type: VersionType,
    pub loaders: Vec<String>,
    pub featured: bool,
    #[serde(default)]
    pub status: VersionStatus,
    pub date_published: DateTime<Utc>,
    pub downloads: u64,
    pub files: Vec<VersionFile>,
}

impl Version {
    /// The file flagged as primary, if any.
    pub fn primary_file(&self) -> Option<&VersionFile> {
        self.files.iter().find(|file| file.primary)
    }

    /// Download every file of this version (or only primary files when
    /// `primary_only`) into `dir`. Policy: skip-and-continue — a file that
    /// fails to download or verify is logged and skipped, it never aborts the
    /// rest of the batch. Returns the number of files actually written.
    pub fn download_all(&self, client: &ApiClient, dir: &Path, primary_only: bool) -> usize {
        let mut written = 0;
        for file in &self.files {
            if primary_only && !file.primary {
                continue;
            }
            match file.download(client, dir) {
                Ok(bytes) => {
                    debug!("Wrote {} ({bytes} bytes)", file.filename);
                    written += 1;
                }
                Err(e) => warn!("Skipping {}: {e}", file.filename),
            }
        }
        written
    }
}
