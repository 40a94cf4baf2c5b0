//! API resource models.
//!
//! Only the commonly used fields are modeled; unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Returns the last path segment of a resource URI (`/videos/123` → `123`).
fn uri_id(uri: &str) -> Option<&str> {
    uri.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
}

/// A Vimeo user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pictures: Option<Pictures>,
}

impl User {
    /// The numeric id taken from `uri`.
    pub fn id(&self) -> Option<&str> {
        uri_id(&self.uri)
    }
}

/// A set of rendered picture sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pictures {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub sizes: Vec<PictureSize>,
}

impl Pictures {
    /// The widest rendition, if any.
    pub fn largest(&self) -> Option<&PictureSize> {
        self.sizes.iter().max_by_key(|s| s.width)
    }
}

/// One rendition of a picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureSize {
    pub width: u32,
    pub height: u32,
    pub link: String,
}

/// Privacy settings of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Privacy {
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub embed: Option<String>,
    #[serde(default)]
    pub download: Option<bool>,
}

/// A video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub privacy: Option<Privacy>,
    #[serde(default)]
    pub pictures: Option<Pictures>,
    #[serde(default)]
    pub user: Option<User>,
}

impl Video {
    /// The numeric id taken from `uri`.
    pub fn id(&self) -> Option<&str> {
        uri_id(&self.uri)
    }
}

/// A category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub top_level: bool,
    #[serde(default)]
    pub pictures: Option<Pictures>,
}

impl Category {
    /// The category slug taken from `uri` (`/categories/animation` → `animation`).
    pub fn slug(&self) -> Option<&str> {
        uri_id(&self.uri)
    }
}

/// A channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<User>,
}

impl Channel {
    /// The numeric id taken from `uri`.
    pub fn id(&self) -> Option<&str> {
        uri_id(&self.uri)
    }
}
