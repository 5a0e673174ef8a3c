// src/adapters/gfycat.rs

use serde::Deserialize;

use crate::adapters::Context;
use crate::error::{AppError, Result};
use crate::models::LinkMap;
use crate::utils::{api_url, http};

#[derive(Debug, Deserialize)]
struct GfyResponse {
    #[serde(rename = "gfyItem", default)]
    item: GfyItem,
}

#[derive(Debug, Default, Deserialize)]
struct GfyItem {
    #[serde(rename = "mp4Url", default)]
    mp4_url: String,
}

pub async fn resolve(ctx: &Context<'_>) -> Result<LinkMap> {
    let id = ctx.capture("id", "gfycat id")?;
    let api = api_url(
        &ctx.resolver.config().endpoints.gfycat_api,
        &format!("v1/gfycats/{id}"),
        &[],
    )?;
    let response: GfyResponse = http::fetch_json(ctx.resolver.fetcher(), &api, &[]).await?;
    if response.item.mp4_url.is_empty() {
        return Err(AppError::extraction(ctx.url(), "response has no mp4 URL"));
    }
    Ok(LinkMap::single(response.item.mp4_url, ""))
}
