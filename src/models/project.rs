use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// What kind of content a project publishes. Unrecognized values decode as
/// `Mod`, the platform's original project kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Modpack,
    Resourcepack,
    Shader,
    Plugin,
    Datapack,
    #[serde(other)]
    Mod,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Modpack => "modpack",
            ProjectType::Resourcepack => "resourcepack",
            ProjectType::Shader => "shader",
            ProjectType::Plugin => "plugin",
            ProjectType::Datapack => "datapack",
            ProjectType::Mod => "mod",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a project runs on the client or server side. Unrecognized values
/// decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    Required,
    Optional,
    Unsupported,
    #[serde(other)]
    Unknown,
}

/// Moderation status of a project. Unrecognized values decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Approved,
    Archived,
    Rejected,
    Draft,
    Unlisted,
    Processing,
    Withheld,
    Scheduled,
    Private,
    #[serde(other)]
    Unknown,
}

/// License attached to a project. Two licenses with the same SPDX id compare
/// equal regardless of display name or link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl PartialEq for License {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for License {}

impl Hash for License {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Donation destination listed on a project page. Identity is the platform id
/// plus the URL; the display name does not participate in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationLink {
    pub id: String,
    pub platform: String,
    pub url: String,
}

impl PartialEq for DonationLink {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.url == other.url
    }
}

impl Eq for DonationLink {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    pub featured: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub ordering: Option<i64>,
}

/// A full project record as returned by the project endpoints. Equality is
/// identity by project id, matching how the platform deduplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub additional_categories: Vec<String>,
    pub client_side: SupportLevel,
    pub server_side: SupportLevel,
    pub status: ProjectStatus,
    pub project_type: ProjectType,
    pub downloads: u64,
    pub followers: u64,
    #[serde(default)]
    pub icon_url: Option<String>,
    pub team: String,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub approved: Option<DateTime<Utc>>,
    pub license: License,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub loaders: Vec<String>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
    #[serde(default)]
    pub donation_urls: Vec<DonationLink>,
    #[serde(default)]
    pub issues_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub wiki_url: Option<String>,
    #[serde(default)]
    pub discord_url: Option<String>,
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Project {}

impl Hash for Project {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
