//! Long-lived authenticated API clients.
//!
//! Clients are built once at startup and injected into the resolver. They
//! are shared across concurrent resolutions without locking.

pub mod drive;
pub mod twitter;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use drive::GoogleDriveClient;
pub use twitter::TwitterClient;

/// Files requested per listing page.
pub const DRIVE_PAGE_SIZE: u32 = 1000;

/// An encoding of a posted video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoVariant {
    pub bitrate: u64,
    pub url: String,
}

/// A media attachment of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostMedia {
    /// Still image URL (the poster frame for videos)
    pub image_url: String,
    /// Video encodings, empty for photos
    pub variants: Vec<VideoVariant>,
}

/// The parts of a social post the resolver cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub media: Vec<PostMedia>,
    /// Expanded external links from the post body
    pub links: Vec<String>,
}

/// Client for a social network's post API.
#[async_trait]
pub trait SocialClient: Send + Sync {
    async fn fetch_post(&self, id: u64) -> Result<Post>;
}

/// One page of a folder listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePage {
    pub file_ids: Vec<String>,
    pub next_page_token: Option<String>,
}

/// Client for a cloud storage API.
#[async_trait]
pub trait DriveClient: Send + Sync {
    /// List the files under a parent folder, one page at a time.
    async fn list_children(&self, parent_id: &str, page_token: Option<&str>) -> Result<FilePage>;
}
