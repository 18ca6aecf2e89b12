//! Release models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest release of a repository, with the tag reduced to a bare version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// Cleaned version, e.g. `14.2.3` for tag `v14.2.3`
    pub tag_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Reduce a release tag to its version.
///
/// Drops a package prefix (`astro@4.0.0`, `@sveltejs/kit@2.5.0`) and a leading `v`.
pub fn clean_version_tag(tag: &str) -> String {
    let version = tag.rsplit_once('@').map_or(tag, |(_, v)| v);
    version.strip_prefix('v').unwrap_or(version).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_version_tag() {
        assert_eq!(clean_version_tag("v14.2.3"), "14.2.3");
        assert_eq!(clean_version_tag("14.2.3"), "14.2.3");
        assert_eq!(clean_version_tag("astro@4.16.7"), "4.16.7");
        assert_eq!(clean_version_tag("@sveltejs/kit@2.8.0"), "2.8.0");
        assert_eq!(clean_version_tag("gatsby@v5.14.0"), "5.14.0");
    }
}
