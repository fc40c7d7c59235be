//! Cache key type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one cached transcript.
///
/// Both components compare by exact string equality. No trimming or case
/// folding is applied, so `("abc", "en")` and `("abc", "EN")` are distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Opaque upstream video identifier.
    pub video_id: String,
    /// Requested language code.
    pub lang: String,
}

impl CacheKey {
    /// Creates a key from a video id and language code, taken verbatim.
    pub fn new(video_id: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            lang: lang.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.video_id, self.lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_exact_match() {
        assert_eq!(CacheKey::new("v1", "en"), CacheKey::new("v1", "en"));
        assert_ne!(CacheKey::new("v1", "en"), CacheKey::new("v1", "EN"));
        assert_ne!(CacheKey::new("v1", "en"), CacheKey::new("V1", "en"));
        assert_ne!(CacheKey::new("v1", "en"), CacheKey::new(" v1", "en"));
    }

    #[test]
    fn test_key_hashing() {
        let mut set = HashSet::new();
        set.insert(CacheKey::new("v1", "en"));
        set.insert(CacheKey::new("v1", "en"));
        set.insert(CacheKey::new("v1", "fr"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(CacheKey::new("v1", "en").to_string(), "v1:en");
    }
}
