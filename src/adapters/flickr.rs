// src/adapters/flickr.rs

//! Flickr photos, albums and short album links.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Deserializer, de};

use crate::adapters::Context;
use crate::error::{AppError, Result};
use crate::models::{LinkMap, Platform};
use crate::services::LinkResolver;
use crate::services::matcher;
use crate::utils::{api_url, http};

/// Photos requested per album page.
const ALBUM_PAGE_SIZE: &str = "500";

/// Flickr sends some integers as JSON strings.
fn flexible_u64<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(u64),
        Text(String),
    }

    match Number::deserialize(deserializer)? {
        Number::Int(n) => Ok(n),
        Number::Text(s) if s.trim().is_empty() => Ok(0),
        Number::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// One available rendition of a photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PhotoSize {
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "flexible_u64")]
    pub width: u64,
    #[serde(default, deserialize_with = "flexible_u64")]
    pub height: u64,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Deserialize)]
struct SizesResponse {
    #[serde(default)]
    stat: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    sizes: Sizes,
}

#[derive(Debug, Default, Deserialize)]
struct Sizes {
    #[serde(default)]
    size: Vec<PhotoSize>,
}

#[derive(Debug, Deserialize)]
struct PhotosetResponse {
    #[serde(default)]
    stat: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    photoset: Photoset,
}

#[derive(Debug, Default, Deserialize)]
struct Photoset {
    #[serde(default)]
    photo: Vec<PhotosetPhoto>,
    #[serde(default, deserialize_with = "flexible_u64")]
    page: u64,
    #[serde(default, deserialize_with = "flexible_u64")]
    pages: u64,
}

#[derive(Debug, Deserialize)]
struct PhotosetPhoto {
    id: String,
}

fn check_stat(stat: &str, message: Option<String>, context: &str) -> Result<()> {
    if stat == "ok" {
        return Ok(());
    }
    Err(AppError::extraction(
        context,
        format!(
            "flickr answered '{}': {}",
            stat,
            message.unwrap_or_else(|| "no message".to_string())
        ),
    ))
}

/// Largest size. The first candidate seeds the choice and is only replaced
/// by a strictly wider or strictly taller one.
pub fn best_size(sizes: &[PhotoSize]) -> Option<&PhotoSize> {
    let mut iter = sizes.iter();
    let mut best = iter.next()?;
    for size in iter {
        if size.width > best.width || size.height > best.height {
            best = size;
        }
    }
    Some(best)
}

fn api_key(resolver: &LinkResolver) -> Result<&str> {
    let credentials = &resolver.config().credentials;
    if !credentials.is_configured(Platform::FlickrPhoto) {
        return Err(AppError::config("flickr api key is not configured"));
    }
    Ok(&credentials.flickr_api_key)
}

fn rest_url(resolver: &LinkResolver, params: &[(&str, &str)]) -> Result<String> {
    let mut all = params.to_vec();
    all.extend([("format", "json"), ("nojsoncallback", "1")]);
    api_url(&resolver.config().endpoints.flickr_api, "", &all)
}

/// Source URL of the best size of a photo.
pub async fn photo_source(resolver: &LinkResolver, photo_id: &str) -> Result<String> {
    let key = api_key(resolver)?;
    let url = rest_url(
        resolver,
        &[
            ("method", "flickr.photos.getSizes"),
            ("api_key", key),
            ("photo_id", photo_id),
        ],
    )?;
    let response: SizesResponse = http::fetch_json(resolver.fetcher(), &url, &[]).await?;
    check_stat(&response.stat, response.message, photo_id)?;

    best_size(&response.sizes.size)
        .filter(|size| !size.source.is_empty())
        .map(|size| size.source.clone())
        .ok_or_else(|| AppError::extraction(photo_id, "photo has no sizes"))
}

pub async fn photo(ctx: &Context<'_>) -> Result<LinkMap> {
    api_key(ctx.resolver)?;
    let photo_id = ctx.capture("photo_id", "photo id")?;
    let source = photo_source(ctx.resolver, photo_id).await?;
    Ok(LinkMap::single(source, ""))
}

/// Every photo id of an album, across all pages.
async fn album_photo_ids(resolver: &LinkResolver, album_id: &str) -> Result<Vec<String>> {
    let key = api_key(resolver)?;
    let mut ids = Vec::new();
    let mut page: u64 = 1;

    loop {
        let page_param = page.to_string();
        let url = rest_url(
            resolver,
            &[
                ("method", "flickr.photosets.getPhotos"),
                ("api_key", key),
                ("photoset_id", album_id),
                ("per_page", ALBUM_PAGE_SIZE),
                ("page", page_param.as_str()),
            ],
        )?;
        let response: PhotosetResponse = http::fetch_json(resolver.fetcher(), &url, &[]).await?;
        check_stat(&response.stat, response.message, album_id)?;

        let photoset = response.photoset;
        ids.extend(photoset.photo.into_iter().map(|p| p.id));
        log::debug!(
            "Flickr album {} page {}/{}: {} photo(s) so far",
            album_id,
            photoset.page.max(page),
            photoset.pages,
            ids.len()
        );

        if page >= photoset.pages {
            break;
        }
        page += 1;
    }
    Ok(ids)
}

/// Resolve an album by id. Photos whose sizes cannot be fetched are skipped.
pub async fn album_links(resolver: &LinkResolver, album_id: &str) -> Result<LinkMap> {
    let ids = album_photo_ids(resolver, album_id).await?;
    let concurrency = resolver.config().resolver.max_concurrent.max(1);

    let results: Vec<_> = stream::iter(ids)
        .map(|id| async move {
            let source = photo_source(resolver, &id).await;
            (id, source)
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut links = LinkMap::new();
    for (id, source) in results {
        match source {
            Ok(source) => links.insert(source, ""),
            Err(e) => log::warn!("Skipping flickr photo {} of album {}: {}", id, album_id, e),
        }
    }
    log::info!(
        "Found flickr album with {} images (album: {})",
        links.len(),
        album_id
    );
    Ok(links)
}

pub async fn album(ctx: &Context<'_>) -> Result<LinkMap> {
    api_key(ctx.resolver)?;
    let album_id = ctx.capture("album_id", "album id")?;
    album_links(ctx.resolver, album_id).await
}

/// Follow a short album link and resolve the album it lands on.
pub async fn album_short(ctx: &Context<'_>) -> Result<LinkMap> {
    api_key(ctx.resolver)?;
    let page = ctx.resolver.fetcher().get(ctx.url(), &[]).await?;
    let final_url = page.final_url.trim();

    match matcher::signature(Platform::FlickrAlbum).capture(final_url, "album_id") {
        Some(album_id) => {
            log::debug!("Short link {} leads to album {}", ctx.url(), final_url);
            album_links(ctx.resolver, album_id).await
        }
        None => Err(AppError::AmbiguousRedirect {
            url: final_url.to_string(),
        }),
    }
}
