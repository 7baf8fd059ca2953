//! User-Agent string constants and utilities for consistent HTTP client identification.
//!
//! Modrinth asks API consumers to identify themselves; all HTTP clients in the
//! rinth codebase should use these constants so the header stays uniform.

/// The rinth package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for the API client (labrinth API calls)
pub fn api_client() -> String {
    format!("rinth/api/{VERSION}")
}

/// User-Agent for the file download client
pub fn download_client() -> String {
    format!("rinth/download/{VERSION}")
}

/// User-Agent carrying a caller-supplied contact string, e.g. a repository URL
/// or email address, as recommended by the platform's usage guidelines
pub fn with_contact(contact: &str) -> String {
    format!("rinth/{VERSION} ({contact})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agents() {
        assert_eq!(api_client(), format!("rinth/api/{VERSION}"));
        assert_eq!(download_client(), format!("rinth/download/{VERSION}"));
        assert_eq!(
            with_contact("dev@example.com"),
            format!("rinth/{VERSION} (dev@example.com)")
        );
    }

    #[test]
    fn test_version_format() {
        // Version should follow semver format (e.g., "0.1.0")
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "Version should have 3 parts (major.minor.patch)"
        );

        for part in parts {
            assert!(
                part.parse::<u32>().is_ok(),
                "Version part should be a number"
            );
        }
    }
}
