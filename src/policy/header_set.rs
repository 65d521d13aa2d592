//! Case-insensitive set of HTTP header names.
//!
//! [`HeaderSet`] keys every entry by its ASCII-lowercase form, so
//! `Cookie` and `cookie` collapse into a single entry. The first
//! spelling inserted is kept for display and serialization. Iteration
//! order is sorted by the lowercase key, which keeps diagnostics output
//! stable across runs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Headers treated as sensitive unless security headers are disabled.
pub const SECURITY_HEADERS: [&str; 3] = ["Cookie", "Set-Cookie", "Authorization"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    names: BTreeMap<String, String>,
}

impl HeaderSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `{Cookie, Set-Cookie, Authorization}`.
    #[must_use]
    pub fn security_defaults() -> Self {
        SECURITY_HEADERS.iter().copied().collect()
    }

    /// Insert a header name. Returns `false` if an equal name (ignoring
    /// case) was already present; the original spelling is kept.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let key = name.to_ascii_lowercase();
        if self.names.contains_key(&key) {
            return false;
        }
        self.names.insert(key, name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(&name.to_ascii_lowercase()).is_some()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Header names as originally spelled, ordered by lowercase name.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    /// Lowercase names, suitable for `http::HeaderName` parsing.
    pub fn lowercase_names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.extend(other.iter().map(str::to_string));
        merged
    }

    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.names.keys().all(|k| self.names.contains_key(k))
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.names.values().cloned().collect()
    }
}

impl<S: Into<String>> Extend<S> for HeaderSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl fmt::Display for HeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl Serialize for HeaderSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for HeaderSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_compare_case_insensitively() {
        let mut set = HeaderSet::new();
        assert!(set.insert("Cookie"));
        assert!(!set.insert("cookie"));
        assert!(!set.insert("COOKIE"));
        assert_eq!(set.len(), 1);
        assert!(set.contains("cOOkie"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Cookie"]);
    }

    #[test]
    fn security_defaults_has_three_entries() {
        let set = HeaderSet::security_defaults();
        assert_eq!(set.len(), 3);
        assert!(set.contains("set-cookie"));
        assert!(set.contains("authorization"));
    }

    #[test]
    fn union_keeps_left_spelling() {
        let left: HeaderSet = ["X-Foo"].into_iter().collect();
        let right: HeaderSet = ["x-foo", "X-Bar"].into_iter().collect();
        let merged = left.union(&right);
        assert_eq!(merged.to_vec(), vec!["X-Bar".to_string(), "X-Foo".to_string()]);
    }

    #[test]
    fn remove_ignores_case() {
        let mut set = HeaderSet::security_defaults();
        assert!(set.remove("AUTHORIZATION"));
        assert!(!set.remove("authorization"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serializes_as_list() {
        let set: HeaderSet = ["X-B", "x-a"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["x-a","X-B"]"#);

        let back: HeaderSet = serde_json::from_str(r#"["Cookie","cookie"]"#).unwrap();
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn display_joins_names() {
        let set: HeaderSet = ["X-B", "X-A"].into_iter().collect();
        assert_eq!(set.to_string(), "X-A, X-B");
    }
}
