//! Core data types for fetched metadata and fetch failures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Flat mapping from metadata key to its raw value, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataMap(IndexMap<String, String>);

impl MetadataMap {
    /// Create a new empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. A key seen before keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Key/value pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// What to do when a single key's request comes back with a non-success status.
///
/// Transport failures on a key always abort; this only governs HTTP error
/// responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyFailurePolicy {
    /// Fail the whole fetch on the first non-2xx key response.
    #[default]
    Abort,
    /// Store whatever body the server returned, error pages included.
    Verbatim,
}

/// All errors that can occur while fetching or rendering metadata.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The key enumeration request failed outright.
    #[error("request to {url} failed: {source}")]
    Enumerate {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The key enumeration request returned a non-success status.
    #[error("request to {url} returned status {status}")]
    EnumerateStatus { url: String, status: u16 },

    #[error("request for key '{key}' failed: {source}")]
    Key {
        key: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for key '{key}' returned status {status}")]
    KeyStatus { key: String, status: u16 },

    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),
}

impl FetchError {
    /// True when the failure happened before any key was requested.
    pub fn is_enumeration(&self) -> bool {
        matches!(
            self,
            FetchError::Enumerate { .. } | FetchError::EnumerateStatus { .. }
        )
    }
}

/// Convenience result type.
pub type FetchResult<T> = Result<T, FetchError>;
