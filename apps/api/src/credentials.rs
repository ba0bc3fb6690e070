//! Round-robin rotation over the configured Gemini API keys.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A single API credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Last four characters, for log lines.
    pub fn suffix(&self) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.0[start..]
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(...{})", self.suffix())
    }
}

/// Splits a comma-separated key list, trimming whitespace and dropping blanks.
pub fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Fixed list of keys handed out in cyclic order, one per call to [`KeyRing::next`].
/// Shared across requests behind an `Arc`; the cursor is the only mutable state.
#[derive(Debug)]
pub struct KeyRing {
    keys: Vec<ApiKey>,
    cursor: AtomicUsize,
}

impl KeyRing {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(ApiKey::new).collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the next key in rotation, or `None` when no keys are configured.
    pub fn next(&self) -> Option<ApiKey> {
        if self.keys.is_empty() {
            return None;
        }
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        Some(self.keys[slot].clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApiKey> {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps_around() {
        let ring = KeyRing::new(["key-a", "key-b", "key-c"]);
        let picked: Vec<String> = (0..7)
            .map(|_| ring.next().unwrap().expose().to_string())
            .collect();
        assert_eq!(
            picked,
            vec!["key-a", "key-b", "key-c", "key-a", "key-b", "key-c", "key-a"]
        );
    }

    #[test]
    fn test_single_key_always_returned() {
        let ring = KeyRing::new(["only"]);
        assert_eq!(ring.next().unwrap().expose(), "only");
        assert_eq!(ring.next().unwrap().expose(), "only");
    }

    #[test]
    fn test_empty_ring_yields_none() {
        let ring = KeyRing::new(Vec::<String>::new());
        assert!(ring.is_empty());
        assert!(ring.next().is_none());
    }

    #[test]
    fn test_parse_key_list_trims_and_drops_blanks() {
        assert_eq!(
            parse_key_list(" AIzaOne , ,AIzaTwo,,"),
            vec!["AIzaOne".to_string(), "AIzaTwo".to_string()]
        );
        assert!(parse_key_list("   ").is_empty());
    }

    #[test]
    fn test_suffix_and_debug_hide_the_key() {
        let key = ApiKey::new("AIzaSyExample9876");
        assert_eq!(key.suffix(), "9876");
        assert_eq!(format!("{key:?}"), "ApiKey(...9876)");
    }

    #[test]
    fn test_suffix_of_short_key() {
        assert_eq!(ApiKey::new("ab").suffix(), "ab");
    }

    #[tokio::test]
    async fn test_concurrent_rotation_is_balanced() {
        let ring = std::sync::Arc::new(KeyRing::new(["a", "b"]));
        let mut handles = Vec::new();
        for _ in 0..10 {
            let ring = ring.clone();
            handles.push(tokio::spawn(async move { ring.next().unwrap() }));
        }
        let mut a = 0;
        for h in handles {
            if h.await.unwrap().expose() == "a" {
                a += 1;
            }
        }
        assert_eq!(a, 5);
    }
}
