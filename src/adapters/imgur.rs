// src/adapters/imgur.rs

//! Imgur single images and albums.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::adapters::Context;
use crate::error::Result;
use crate::models::{LinkMap, Platform, ResolvedLink};
use crate::utils::{api_url, http};

static SUBREDDIT_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"r/[^/]+/").expect("valid regex"));
static TRAILING_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[A-Za-z0-9]+$").expect("valid regex"));

#[derive(Debug, Deserialize)]
struct AlbumImages {
    #[serde(default)]
    data: Vec<AlbumImage>,
}

#[derive(Debug, Deserialize)]
struct AlbumImage {
    #[serde(default)]
    link: String,
}

/// Rewrite an image page URL to its download URL.
pub fn single(url: &str) -> LinkMap {
    let mut link = SUBREDDIT_SEGMENT.replace_all(url, "").into_owned();
    if !link.contains("imgur.com/download/") {
        link = link.replace("imgur.com/", "imgur.com/download/");
    }
    LinkMap::single(link.replace(".gifv", ""), "")
}

/// Album or gallery images through the API, else the single-image rewrite.
pub async fn album(ctx: &Context<'_>) -> Result<LinkMap> {
    let url = TRAILING_ANCHOR.replace(ctx.url(), "");
    let album_id = url.rsplit('/').next().unwrap_or_default();
    let config = ctx.resolver.config();

    if !config.credentials.is_configured(Platform::ImgurAlbum) {
        log::debug!("Imgur client id not set, treating {} as a single image", url);
        return Ok(single(&url));
    }

    let api = api_url(
        &config.endpoints.imgur_api,
        &format!("3/album/{album_id}/images"),
        &[],
    )?;
    let auth = format!("Client-ID {}", config.credentials.imgur_client_id);
    let images: AlbumImages =
        match http::fetch_json(ctx.resolver.fetcher(), &api, &[("Authorization", auth.as_str())]).await {
            Ok(images) => images,
            Err(e) => {
                log::warn!("Imgur album lookup failed for {}: {}", url, e);
                return Ok(single(&url));
            }
        };

    let links: LinkMap = images
        .data
        .into_iter()
        .filter(|image| !image.link.is_empty())
        .map(|image| ResolvedLink::new(image.link, ""))
        .collect();

    if links.is_empty() {
        log::debug!("Imgur album {} is empty, treating it as a single image", album_id);
        return Ok(single(&url));
    }
    log::info!("Found imgur album with {} images (url: {})", links.len(), url);
    Ok(links)
}
