use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::project::{Project, ProjectType, SupportLevel};

/// A project's search-indexed snapshot as returned by the search endpoint.
/// The snapshot is flatter and staler than the full project record; equality
/// is identity by `project_id` so hits from different pages or queries
/// deduplicate naturally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub display_categories: Vec<String>,
    pub client_side: SupportLevel,
    pub server_side: SupportLevel,
    pub project_type: ProjectType,
    pub downloads: u64,
    pub follows: u64,
    #[serde(default)]
    pub icon_url: Option<String>,
    pub project_id: String,
    pub author: String,
    #[serde(default)]
    pub versions: Vec<String>,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    #[serde(default)]
    pub latest_version: Option<String>,
    pub license: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub featured_gallery: Option<String>,
}

impl SearchResult {
    /// Resolve the full parent project on demand. The snapshot only carries
    /// the id; this issues one project fetch through the client and returns
    /// `None` when the project has vanished since indexing.
    pub fn project(&self, client: &ApiClient) -> Result<Option<Project>> {
        client.project(&self.project_id)
    }
}

impl PartialEq for SearchResult {
    fn eq(&self, other: &Self) -> bool {
        self.project_id == other.project_id
    }
}

impl Eq for SearchResult {}

impl Hash for SearchResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.project_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Field shapes captured from: curl "https://api.modrinth.com/v2/search?query=sodium&limit=1"
    const HIT_JSON: &str = r#"{
        "slug": "sodium",
        "title": "Sodium",
        "description": "A modern rendering engine for Minecraft.",
        "categories": ["optimization", "fabric"],
        "display_categories": ["optimization"],
        "client_side": "required",
        "server_side": "unsupported",
        "project_type": "mod",
        "downloads": 54233069,
        "follows": 31251,
        "icon_url": "https://cdn.modrinth.com/data/AANobbMI/icon.png",
        "project_id": "AANobbMI",
        "author": "jellysquid3",
        "versions": ["1.20.1", "1.20.4"],
        "date_created": "2021-01-03T00:53:34+00:00",
        "date_modified": "2024-05-01T18:26:10+00:00",
        "latest_version": "mc1.20.4-0.5.8",
        "license": "LGPL-3.0-only",
        "gallery": ["https://cdn.modrinth.com/data/AANobbMI/images/shot.png"],
        "featured_gallery": null
    }"#;

    #[test]
    fn test_decode_search_result() {
        let hit: SearchResult = serde_json::from_str(HIT_JSON).unwrap();
        assert_eq!(hit.project_id, "AANobbMI");
        assert_eq!(hit.author, "jellysquid3");
        assert_eq!(hit.project_type, ProjectType::Mod);
        assert_eq!(hit.latest_version.as_deref(), Some("mc1.20.4-0.5.8"));
        assert_eq!(hit.gallery.len(), 1);
        assert_eq!(hit.license, "LGPL-3.0-only");
    }

    #[test]
    fn test_equality_is_by_project_id() {
        let a: SearchResult = serde_json::from_str(HIT_JSON).unwrap();
        let mut b = a.clone();
        b.title = "Sodium (Renamed)".to_string();
        assert_eq!(a, b);

        b.project_id = "other".to_string();
        assert_ne!(a, b);
    }

    #[test]
    fn test_nullable_latest_version() {
        let json = HIT_JSON.replace("\"mc1.20.4-0.5.8\"", "null");
        let hit: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(hit.latest_version, None);
    }
}
