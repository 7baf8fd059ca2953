use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Site-wide role of a user account. Unrecognized roles decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Moderator,
    Developer,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Only present when fetching the authenticated user itself.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub created: DateTime<Utc>,
    pub role: UserRole,
}

/// Membership record tying a user to a project team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub team_id: String,
    pub user: User,
    /// Team roles are free-form strings chosen by the team owner.
    pub role: String,
    #[serde(default)]
    pub permissions: Option<u64>,
    pub accepted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_JSON: &str = r#"{
        "id": "TEZXhE2U",
        "username": "jellysquid3",
        "name": "Jelly",
        "email": null,
        "bio": "Rendering engine work.",
        "avatar_url": "https://cdn.modrinth.com/user/TEZXhE2U/icon.png",
        "created": "2021-01-01T08:12:00+00:00",
        "role": "developer"
    }"#;

    #[test]
    fn test_decode_user() {
        let user: User = serde_json::from_str(USER_JSON).unwrap();
        assert_eq!(user.id, "TEZXhE2U");
        assert_eq!(user.username, "jellysquid3");
        assert_eq!(user.role, UserRole::Developer);
        assert_eq!(user.email, None);
    }

    #[test]
    fn test_unknown_role_falls_back() {
        let json = USER_JSON.replace("\"developer\"", "\"superuser\"");
        let user: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user.role, UserRole::Unknown);
    }

    #[test]
    fn test_decode_team_member() {
        let json = format!(
            r#"{{
                "team_id": "4reLOAKe",
                "user": {USER_JSON},
                "role": "Lead developer",
                "permissions": 1023,
                "accepted": true
            }}"#
        );
        let member: TeamMember = serde_json::from_str(&json).unwrap();
        assert_eq!(member.team_id, "4reLOAKe");
        assert_eq!(member.user.username, "jellysquid3");
        assert_eq!(member.role, "Lead developer");
        assert_eq!(member.permissions, Some(1023));
        assert!(member.accepted);
    }
}
