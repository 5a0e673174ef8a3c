// src/models/platform.rs

//! Supported media platforms.

use std::fmt;

use serde::Serialize;

/// One variant per resolver adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    TwitterPhoto,
    TwitterStatus,
    Tistory,
    TistoryLegacy,
    TistoryCdn,
    Gfycat,
    Instagram,
    ImgurSingle,
    ImgurAlbum,
    GoogleDrive,
    FlickrPhoto,
    FlickrAlbum,
    FlickrAlbumShort,
    GoogleDriveFolder,
    Streamable,
    FacebookVideo,
    TistorySite,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::TwitterPhoto => "twitter-photo",
            Platform::TwitterStatus => "twitter-status",
            Platform::Tistory => "tistory",
            Platform::TistoryLegacy => "tistory-legacy",
            Platform::TistoryCdn => "tistory-cdn",
            Platform::Gfycat => "gfycat",
            Platform::Instagram => "instagram",
            Platform::ImgurSingle => "imgur-single",
            Platform::ImgurAlbum => "imgur-album",
            Platform::GoogleDrive => "google-drive",
            Platform::FlickrPhoto => "flickr-photo",
            Platform::FlickrAlbum => "flickr-album",
            Platform::FlickrAlbumShort => "flickr-album-short",
            Platform::GoogleDriveFolder => "google-drive-folder",
            Platform::Streamable => "streamable",
            Platform::FacebookVideo => "facebook-video",
            Platform::TistorySite => "tistory-site",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
