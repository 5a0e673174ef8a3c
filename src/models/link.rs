// src/models/link.rs

//! Resolution inputs and outputs.

use std::collections::HashMap;
use std::collections::hash_map;

use serde::{Deserialize, Serialize};

/// A URL submitted for resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    url: String,
    context: Option<String>,
}

impl LinkRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into().trim().to_string(),
            context: None,
        }
    }

    /// Attach an opaque origin identifier (channel, session, ...). It is
    /// carried unchanged onto requests discovered while resolving this one.
    pub fn with_context(url: impl Into<String>, context: Option<String>) -> Self {
        Self {
            context,
            ..Self::new(url)
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Derive a request for a URL found while resolving this one.
    pub fn follow(&self, url: impl Into<String>) -> Self {
        Self::with_context(url, self.context.clone())
    }
}

/// A single downloadable URL with its suggested filename.
///
/// An empty filename means the caller should derive one from the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub url: String,
    pub filename: String,
}

impl ResolvedLink {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }
}

/// Download URL to suggested filename, unique by URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkMap(HashMap<String, String>);

impl LinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding one link.
    pub fn single(url: impl Into<String>, filename: impl Into<String>) -> Self {
        let mut links = Self::new();
        links.insert(url, filename);
        links
    }

    /// Insert a link, replacing the filename of an existing entry.
    pub fn insert(&mut self, url: impl Into<String>, filename: impl Into<String>) {
        self.0.insert(url.into(), filename.into());
    }

    /// Merge another map into this one. Later entries win.
    pub fn extend(&mut self, other: LinkMap) {
        self.0.extend(other.0);
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.0.get(url).map(String::as_str)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.0.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Flatten into links sorted by URL.
    pub fn into_links(self) -> Vec<ResolvedLink> {
        let mut links: Vec<_> = self
            .0
            .into_iter()
            .map(|(url, filename)| ResolvedLink { url, filename })
            .collect();
        links.sort_by(|a, b| a.url.cmp(&b.url));
        links
    }
}

impl IntoIterator for LinkMap {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<ResolvedLink> for LinkMap {
    fn from_iter<I: IntoIterator<Item = ResolvedLink>>(iter: I) -> Self {
        Self(iter.into_iter().map(|l| (l.url, l.filename)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_urls_collapse() {
        let mut links = LinkMap::single("https://a.example/1.jpg", "");
        links.insert("https://a.example/1.jpg", "one.jpg");
        assert_eq!(links.len(), 1);
        assert_eq!(links.get("https://a.example/1.jpg"), Some("one.jpg"));
    }

    #[test]
    fn test_extend_last_write_wins() {
        let mut links = LinkMap::single("https://a.example/1.jpg", "first");
        links.extend(LinkMap::single("https://a.example/1.jpg", "second"));
        links.extend(LinkMap::single("https://a.example/2.jpg", ""));
        assert_eq!(links.len(), 2);
        assert_eq!(links.get("https://a.example/1.jpg"), Some("second"));
    }

    #[test]
    fn test_request_trims_and_follows_context() {
        let request = LinkRequest::with_context("  https://x.com/a/status/1 ", Some("chan".into()));
        assert_eq!(request.url(), "https://x.com/a/status/1");

        let child = request.follow("https://imgur.com/abc");
        assert_eq!(child.url(), "https://imgur.com/abc");
        assert_eq!(child.context(), Some("chan"));
    }

    #[test]
    fn test_into_links_sorted_by_url() {
        let mut links = LinkMap::single("https://b.example/2.jpg", "2.jpg");
        links.insert("https://a.example/1.jpg", "");
        links.insert("https://c.example/3.mp4", "3.mp4");

        let flat = links.into_links();
        assert_eq!(
            flat,
            vec![
                ResolvedLink::new("https://a.example/1.jpg", ""),
                ResolvedLink::new("https://b.example/2.jpg", "2.jpg"),
                ResolvedLink::new("https://c.example/3.mp4", "3.mp4"),
            ]
        );
        let json = serde_json::to_string(&flat[0]).unwrap();
        assert_eq!(json, r#"{"url":"https://a.example/1.jpg","filename":""}"#);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let links = LinkMap::single("https://a.example/1.jpg", "1.jpg");
        let json = serde_json::to_string(&links).unwrap();
        assert_eq!(json, r#"{"https://a.example/1.jpg":"1.jpg"}"#);
    }
}
