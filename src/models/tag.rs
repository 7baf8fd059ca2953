//! Tag vocabularies served by the platform: categories, loaders, game
//! versions, licenses, and donation platforms. These change rarely; the
//! client memoizes them (see `client::tags`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Inline SVG for the category icon.
    pub icon: String,
    pub name: String,
    pub project_type: String,
    pub header: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loader {
    pub icon: String,
    pub name: String,
    pub supported_project_types: Vec<String>,
}

/// Release channel of a game version. Strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameVersionType {
    Release,
    Snapshot,
    Alpha,
    Beta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameVersion {
    pub version: String,
    pub version_type: GameVersionType,
    pub date: DateTime<Utc>,
    pub major: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseTag {
    pub short: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationPlatform {
    pub short: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_category() {
        let json = r#"{
            "icon": "<svg></svg>",
            "name": "optimization",
            "project_type": "mod",
            "header": "categories"
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.name, "optimization");
        assert_eq!(category.project_type, "mod");
    }

    #[test]
    fn test_decode_game_version() {
        let json = r#"{
            "version": "1.20.4",
            "version_type": "release",
            "date": "2023-12-07T12:56:20+00:00",
            "major": false
        }"#;
        let version: GameVersion = serde_json::from_str(json).unwrap();
        assert_eq!(version.version, "1.20.4");
        assert_eq!(version.version_type, GameVersionType::Release);
        assert!(!version.major);
    }

    #[test]
    fn test_unknown_game_version_type_is_a_decode_error() {
        let json = r#"{
            "version": "24w07a",
            "version_type": "experiment",
            "date": "2024-02-14T14:30:00+00:00",
            "major": false
        }"#;
        assert!(serde_json::from_str::<GameVersion>(json).is_err());
    }
}
