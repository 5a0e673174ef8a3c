// src/adapters/facebook.rs

//! Facebook video pages.

use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::adapters::Context;
use crate::error::{AppError, Result};
use crate::models::LinkMap;
use crate::utils::html::unescape;
use crate::utils::http;

static HD_SOURCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"hd_src:"([^"]+)""#).expect("valid regex"));
static SD_SOURCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"sd_src:"([^"]+)""#).expect("valid regex"));

/// The HD source of a video page, else the SD source.
pub fn find_source(body: &[u8]) -> Option<String> {
    [&*HD_SOURCE, &*SD_SOURCE].iter().find_map(|re| {
        let found = re.captures(body)?.get(1)?;
        Some(unescape(&String::from_utf8_lossy(found.as_bytes())))
    })
}

pub async fn resolve(ctx: &Context<'_>) -> Result<LinkMap> {
    let body = http::fetch_raw(ctx.resolver.fetcher(), ctx.url()).await?;
    find_source(&body)
        .map(|source| LinkMap::single(source, ""))
        .ok_or_else(|| AppError::extraction(ctx.url(), "no source URL found"))
}
