// src/adapters/streamable.rs

//! Streamable videos.

use serde::Deserialize;

use crate::adapters::Context;
use crate::error::{AppError, Result};
use crate::models::LinkMap;
use crate::utils::{api_url, http};

/// Upload status of a video that finished processing.
const STATUS_READY: i64 = 2;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Video {
    status: i64,
    files: Files,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Files {
    mp4: VideoFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VideoFile {
    url: String,
}

pub async fn resolve(ctx: &Context<'_>) -> Result<LinkMap> {
    let shortcode = ctx.capture("shortcode", "shortcode")?;
    let api = api_url(
        &ctx.resolver.config().endpoints.streamable_api,
        &format!("videos/{shortcode}"),
        &[],
    )?;
    let video: Video = http::fetch_json(ctx.resolver.fetcher(), &api, &[]).await?;

    if video.status != STATUS_READY || video.files.mp4.url.is_empty() {
        return Err(AppError::extraction(ctx.url(), "no download candidate"));
    }
    let mut link = video.files.mp4.url;
    if !link.starts_with("http") {
        link = format!("https:{link}");
    }
    Ok(LinkMap::single(link, ""))
}
