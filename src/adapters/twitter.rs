// src/adapters/twitter.rs

//! Twitter photo rewrite and status expansion.

use crate::adapters::Context;
use crate::clients::{Post, VideoVariant};
use crate::error::{AppError, ErrorKind, Result};
use crate::models::{LinkMap, LinkRequest};
use crate::services::MAX_DEPTH;
use crate::utils::filename_from_url;

/// Rewrite a `pbs.twimg.com` media URL to its original-size variant.
pub fn photo(url: &str) -> Result<LinkMap> {
    let parts: Vec<&str> = url.split(':').collect();
    if parts.len() < 2 {
        return Err(AppError::extraction(url, "unable to parse twitter photo URL"));
    }
    let link = format!("https:{}:orig", parts[1]);
    let filename = filename_from_url(parts[1]);
    Ok(LinkMap::single(link, filename))
}

/// Highest-bitrate variant. Ties go to the later variant. The winner may
/// have an empty URL, in which case the media contributes no link.
pub fn best_variant(variants: &[VideoVariant]) -> Option<&VideoVariant> {
    let mut best: Option<&VideoVariant> = None;
    for variant in variants {
        if best.is_none_or(|b| variant.bitrate >= b.bitrate) {
            best = Some(variant);
        }
    }
    best
}

/// Requests for the links embedded in a status. Each keeps the origin
/// context of the status request.
pub fn embedded_requests(request: &LinkRequest, post: &Post) -> Vec<LinkRequest> {
    post.links.iter().map(|link| request.follow(link.as_str())).collect()
}

/// Resolve a status: attached photos and videos plus its embedded links.
pub async fn status(ctx: &Context<'_>) -> Result<LinkMap> {
    let client = ctx
        .resolver
        .social()
        .ok_or_else(|| AppError::config("twitter bearer token is not configured"))?;
    let id: u64 = ctx
        .capture("id", "status id")?
        .parse()
        .map_err(|e| AppError::extraction(ctx.url(), format!("invalid status id: {e}")))?;

    let post = client.fetch_post(id).await?;
    let mut links = LinkMap::new();

    for media in &post.media {
        if media.variants.is_empty() {
            match photo(&media.image_url) {
                Ok(found) => links.extend(found),
                Err(e) => log::warn!("Skipping photo of status {}: {}", id, e),
            }
        } else if let Some(variant) = best_variant(&media.variants) {
            if variant.url.is_empty() {
                log::debug!("Best video variant of status {} has no URL", id);
            } else {
                links.insert(variant.url.clone(), "");
            }
        }
    }

    if ctx.depth >= MAX_DEPTH {
        if !post.links.is_empty() {
            log::debug!(
                "Not expanding {} embedded link(s) of status {} at depth {}",
                post.links.len(),
                id,
                ctx.depth
            );
        }
        return Ok(links);
    }

    for request in embedded_requests(ctx.request, &post) {
        let embedded = request.url();
        match ctx.resolver.resolve_at(&request, ctx.depth + 1).await {
            Ok(found) => links.extend(found),
            Err(e) if e.kind() == ErrorKind::UnsupportedUrl => {
                log::debug!("Ignoring unsupported link {} in status {}", embedded, id);
            }
            Err(e) => log::warn!("Failed to resolve {} in status {}: {}", embedded, id, e),
        }
    }

    Ok(links)
}
