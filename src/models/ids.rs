//! Opaque upstream identifiers and playlist URL resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Canonical playlist page, used when only a raw ID is known.
pub const PLAYLIST_PAGE_URL: &str = "https://www.youtube.com/playlist";

/// A playlist identifier as issued by the upstream platform.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistId(String);

impl PlaylistId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Extract the playlist ID from the `list` query parameter of a URL.
    ///
    /// Returns `None` if the string is not a valid URL or the parameter is
    /// missing or empty.
    pub fn from_url(input: &str) -> Option<Self> {
        let url = Url::parse(input).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "list")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .map(Self)
    }

    /// Accept either a full playlist URL or a bare ID.
    pub fn from_input(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if Url::parse(input).is_ok() {
            return Self::from_url(input);
        }

        let is_raw_id = input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        is_raw_id.then(|| Self(input.to_string()))
    }

    /// Build the canonical playlist page URL for this ID.
    pub fn to_url(&self) -> String {
        let mut url = Url::parse(PLAYLIST_PAGE_URL).expect("playlist page URL is valid");
        url.query_pairs_mut().append_pair("list", &self.0);
        url.to_string()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaylistId({})", self.0)
    }
}

impl From<&str> for PlaylistId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single video in a playlist.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VideoId({})", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
