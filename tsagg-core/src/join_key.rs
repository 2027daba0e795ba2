//! Join keys correlating grouped input series with their results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier pairing an input series with the value computed for it.
///
/// The content is never interpreted; callers typically derive it from the
/// attributes they grouped series by (e.g. `host=a,dc=west`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinKey(String);

impl JoinKey {
    /// Create a new join key
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key and return the owned string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JoinKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JoinKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for JoinKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for JoinKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for JoinKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_join_key_equality() {
        let key = JoinKey::new("host=server1");

        assert_eq!(key, "host=server1");
        assert_eq!(key, JoinKey::from(String::from("host=server1")));
        assert_eq!(key.as_str(), "host=server1");
        assert_eq!(key.to_string(), "host=server1");
    }

    #[test]
    fn test_join_key_is_opaque() {
        // Anything goes, including the empty string
        let empty = JoinKey::new("");
        assert_eq!(empty.as_str(), "");

        let odd = JoinKey::new("a b@c::d");
        assert_eq!(odd.into_inner(), "a b@c::d");
    }

    #[test]
    fn test_join_key_hashing() {
        let mut keys = HashSet::new();
        assert!(keys.insert(JoinKey::from("a")));
        assert!(keys.insert(JoinKey::from("b")));
        assert!(!keys.insert(JoinKey::from("a")));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_join_key_serializes_as_plain_string() {
        let key = JoinKey::new("host=a");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"host=a\"");

        let parsed: JoinKey = serde_json::from_str("\"host=b\"").unwrap();
        assert_eq!(parsed, "host=b");
    }
}
