//! Ordered multimap of query parameters.
//!
//! Keys keep their insertion order and every key owns one ordered sequence
//! of values; both orders are observable downstream (the upstream URL is
//! re-rendered from map order), so a plain `HashMap` is not an option here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered mapping from parameter name to an ordered,
/// non-unique sequence of values.
///
/// Invariant: all values for a key live under one sequence; there are never
/// two separate slots for the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    inner: IndexMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// `true` if the map holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// All values for `key`, in insertion order.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    /// First value for `key`, if any.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.inner.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Replace the whole value sequence for `key` with a single value.
    ///
    /// An existing key keeps its position in key order; a new key is
    /// appended at the end.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    /// Append one value at the end of `key`'s sequence, creating the key
    /// (at the end of key order) if absent.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Delete `key` and all its values. No-op when the key is absent.
    ///
    /// Preserves the relative order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.inner.shift_remove(key)
    }

    /// Discard every entry.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Iterate `(key, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Parse a raw query string (`a=1&b=2&b=3`) into a parameter map.
    ///
    /// No percent-decoding is performed; names and values are opaque bytes
    /// owned by whoever encoded them. Duplicate keys group under the first
    /// occurrence's position, values in wire order. Bare keys (`flag`) map
    /// to an empty value. Empty pairs (`a=1&&b=2`) are skipped.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::new();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            match pair.split_once('=') {
                Some((key, value)) => params.append(key, value),
                None => params.append(pair, ""),
            }
        }
        params
    }

    /// Render the map back into a query string, keys and values in map
    /// order. Empty values render as a bare key.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.inner {
            for value in values {
                if !out.is_empty() {
                    out.push('&');
                }
                out.push_str(key);
                if !value.is_empty() {
                    out.push('=');
                    out.push_str(value);
                }
            }
        }
        out
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
