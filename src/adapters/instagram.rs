// src/adapters/instagram.rs

//! Instagram post scraping.
//!
//! Post pages embed their data as a `window._sharedData = {...};` script.
//! Scanning is done in two pure stages (locate the payload, then walk it) so
//! it can be exercised on stored pages.

use scraper::Html;
use serde_json::Value;

use crate::adapters::Context;
use crate::error::Result;
use crate::models::{LinkMap, ResolvedLink};
use crate::utils::html::{find_script_payload, meta_property};
use crate::utils::{extension_from_url, http};

const SHARED_DATA_PREFIX: &str = "window._sharedData = ";
const UNKNOWN: &str = "N/A";

/// What a post page tells about its media.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScan {
    pub username: Option<String>,
    pub shortcode: Option<String>,
    pub video_url: Option<String>,
    /// Display URLs of album children, in post order
    pub album: Vec<String>,
}

impl PageScan {
    /// `instagram <username> - <shortcode>`.
    pub fn filename_base(&self) -> String {
        format!(
            "instagram {} - {}",
            self.username.as_deref().unwrap_or(UNKNOWN),
            self.shortcode.as_deref().unwrap_or(UNKNOWN)
        )
    }
}

/// Scan a post page.
pub fn scan_page(body: &str) -> PageScan {
    let document = Html::parse_document(body);
    let mut scan = PageScan {
        video_url: meta_property(&document, &["og:video", "og:video:secure_url"])
            .filter(|v| !v.is_empty()),
        ..PageScan::default()
    };

    let Some(payload) = find_script_payload(&document, SHARED_DATA_PREFIX) else {
        return scan;
    };
    let data: Value = match serde_json::from_str(&payload) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Error parsing instagram shared data: {}", e);
            return scan;
        }
    };
    let Some(entries) = data.pointer("/entry_data/PostPage").and_then(Value::as_array) else {
        log::warn!("Instagram shared data has no post entries");
        return scan;
    };

    for entry in entries {
        let Some(media) = entry.pointer("/graphql/shortcode_media") else {
            continue;
        };
        if scan.shortcode.is_none() {
            scan.shortcode = media["shortcode"].as_str().map(str::to_string);
            scan.username = media
                .pointer("/owner/username")
                .and_then(Value::as_str)
                .map(str::to_string);
        }
        if let Some(edges) = media
            .pointer("/edge_sidecar_to_children/edges")
            .and_then(Value::as_array)
        {
            scan.album.extend(
                edges
                    .iter()
                    .filter_map(|edge| edge.pointer("/node/display_url").and_then(Value::as_str))
                    .map(str::to_string),
            );
        }
    }
    scan
}

/// Large-size image URL constructed from the post URL.
pub fn single_image_url(url: &str) -> String {
    match url.rfind('/') {
        Some(idx) => {
            let (head, tail) = url.split_at(idx);
            format!(
                "{head}{}",
                tail.replace('?', "&").replace('/', "/media/?size=l")
            )
        }
        None => url.to_string(),
    }
}

/// Pick the strategy: video, then album, then the constructed image URL.
pub fn build_links(url: &str, scan: &PageScan) -> LinkMap {
    let base = scan.filename_base();

    if let Some(video) = &scan.video_url {
        return LinkMap::single(video.clone(), format!("{base}{}", extension_from_url(video)));
    }

    if !scan.album.is_empty() {
        log::info!(
            "Found instagram album with {} images (url: {})",
            scan.album.len(),
            url
        );
        return scan
            .album
            .iter()
            .enumerate()
            .map(|(i, link)| {
                ResolvedLink::new(
                    link.clone(),
                    format!("{base} {}{}", i + 1, extension_from_url(link)),
                )
            })
            .collect();
    }

    LinkMap::single(single_image_url(url), format!("{base}.jpg"))
}

pub async fn resolve(ctx: &Context<'_>) -> Result<LinkMap> {
    let url = ctx.url();
    let scan = match http::fetch_text(ctx.resolver.fetcher(), url, &[]).await {
        Ok(body) => scan_page(&body),
        Err(e) => {
            log::warn!("Failed to fetch instagram page {}: {}", url, e);
            PageScan::default()
        }
    };
    Ok(build_links(url, &scan))
}
