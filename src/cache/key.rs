//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Generate a deterministic cache key from an accessor name and its arguments.
///
/// The key is a SHA-256 hash of the accessor name and the arguments sorted by
/// name, so `[("owner", "a"), ("repo", "b")]` and `[("repo", "b"), ("owner", "a")]`
/// share a key. Every part is length-prefixed, so values containing
/// separator characters cannot collide with a different argument set.
pub fn cache_key(accessor: &str, args: &[(&str, &str)]) -> String {
    let mut hasher = Sha256::new();

    update_field(&mut hasher, accessor);

    let mut sorted_args: Vec<_> = args.iter().collect();
    sorted_args.sort_by_key(|(k, _)| *k);

    for (k, v) in sorted_args {
        update_field(&mut hasher, k);
        update_field(&mut hasher, v);
    }

    format!("{:x}", hasher.finalize())
}

fn update_field(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_deterministic() {
        let key1 = cache_key("dependabot_alerts", &[("owner", "octocat"), ("repo", "hello")]);
        let key2 = cache_key("dependabot_alerts", &[("repo", "hello"), ("owner", "octocat")]);

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_cache_key_different_accessors() {
        let key1 = cache_key("user", &[("username", "octocat")]);
        let key2 = cache_key("repos", &[("username", "octocat")]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_different_args() {
        let key1 = cache_key("user", &[("username", "octocat")]);
        let key2 = cache_key("user", &[("username", "hubot")]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_no_args() {
        assert_eq!(cache_key("vercel_projects", &[]), cache_key("vercel_projects", &[]));
    }

    #[test]
    fn test_cache_key_separator_prevents_collisions() {
        let key1 = cache_key("release", &[("owner", "ab"), ("repo", "c")]);
        let key2 = cache_key("release", &[("owner", "a"), ("repo", "bc")]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_values_with_separators_do_not_collide() {
        let key1 = cache_key("latest_release", &[("owner", "x&repo=y"), ("repo", "z")]);
        let key2 = cache_key("latest_release", &[("owner", "x"), ("repo", "y&repo=z")]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_accessor_and_args_do_not_blend() {
        let key1 = cache_key("user|", &[]);
        let key2 = cache_key("user", &[("", "")]);

        assert_ne!(key1, key2);
    }
}
