// Version information for the kpopwire service

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-trending-cache-2025-08-05";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2025-08-05";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "article-rewrite",
    "article-scraping",
    "social-content",
    "session-history",
    "rate-limiting",
    "trending-cache",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("kpopwire {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(FEATURES.contains(&"article-rewrite"));
        assert!(FEATURES.contains(&"rate-limiting"));
        assert!(FEATURES.contains(&"trending-cache"));
    }

    #[test]
    fn test_version_string() {
        let version = get_version_string();
        assert!(version.contains("0.1.0"));
        assert!(version.contains("2025-08-05"));
    }
}
