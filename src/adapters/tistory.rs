// src/adapters/tistory.rs

//! Tistory blog images.
//!
//! Blog images are served from three URL shapes: the current CDN, the legacy
//! `uf.tistory.com` hosts, and a resizing proxy that wraps a legacy URL in
//! its `fname` parameter. Each is rewritten to the original-size file.

use scraper::Html;

use crate::adapters::Context;
use crate::error::{AppError, Result};
use crate::models::{LinkMap, Platform};
use crate::services::matcher;
use crate::utils::html::parse_selector;
use crate::utils::{http, query_param};

const ORIGINAL_SUFFIX: &str = "?original";
const IMAGE_SELECTOR: &str = ".article img, #content img, div[role=main] img, .section_blogview img";

pub fn modern(url: &str) -> LinkMap {
    if url.ends_with(ORIGINAL_SUFFIX) {
        LinkMap::single(url, "")
    } else {
        LinkMap::single(format!("{url}{ORIGINAL_SUFFIX}"), "")
    }
}

pub fn legacy(url: &str) -> LinkMap {
    LinkMap::single(url.replace("/image/", "/original/"), "")
}

/// Unwrap the legacy URL carried by a CDN proxy URL and rewrite it.
pub fn from_cdn(url: &str) -> Result<LinkMap> {
    match query_param(url, "fname") {
        Some(inner) if matcher::is_match(Platform::TistoryLegacy, &inner) => Ok(legacy(&inner)),
        _ => Err(AppError::extraction(url, "no legacy image URL in fname")),
    }
}

/// Image source shapes found on blog pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    CdnLegacy,
    Legacy,
}

pub fn classify(src: &str) -> Option<ImageKind> {
    if matcher::is_match(Platform::TistoryCdn, src) {
        Some(ImageKind::CdnLegacy)
    } else if matcher::is_match(Platform::TistoryLegacy, src) {
        Some(ImageKind::Legacy)
    } else {
        None
    }
}

/// `(src, filename)` of every content image on a blog page, in page order.
pub fn extract_images(body: &str) -> Result<Vec<(String, String)>> {
    let selector = parse_selector(IMAGE_SELECTOR)?;
    let document = Html::parse_document(body);
    Ok(document
        .select(&selector)
        .filter_map(|img| {
            let src = img.value().attr("src")?;
            let filename = img.value().attr("filename").unwrap_or_default();
            Some((src.to_string(), filename.to_string()))
        })
        .collect())
}

/// Rewrite the images of a page, keeping their `filename` attributes.
pub fn page_links(images: &[(String, String)]) -> LinkMap {
    let mut links = LinkMap::new();
    for (src, filename) in images {
        let found = match classify(src) {
            Some(ImageKind::CdnLegacy) => match from_cdn(src) {
                Ok(found) => found,
                Err(e) => {
                    log::debug!("Skipping image {}: {}", src, e);
                    continue;
                }
            },
            Some(ImageKind::Legacy) => legacy(src),
            None => continue,
        };
        for (url, _) in found {
            links.insert(url, filename.as_str());
        }
    }
    links
}

/// Scrape a blog post page for its images.
///
/// Pages that are not HTML yield an empty map.
pub async fn site(ctx: &Context<'_>) -> Result<LinkMap> {
    let url = ctx.url();
    let user_agent = ctx.resolver.config().http.browser_user_agent.as_str();
    let headers = [("Accept-Encoding", "identity"), ("User-Agent", user_agent)];

    let head = ctx.resolver.fetcher().head(url, &headers).await?;
    let is_html = head
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("text/html"));
    if !is_html {
        log::debug!("Not an HTML page ({:?}): {}", head.content_type, url);
        return Ok(LinkMap::new());
    }

    let body = http::fetch_text(ctx.resolver.fetcher(), url, &headers).await?;
    let links = page_links(&extract_images(&body)?);
    if !links.is_empty() {
        log::info!("Found tistory album with {} images (url: {})", links.len(), url);
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{Config, LinkRequest};
    use crate::services::LinkResolver;
    use crate::testing::FakeFetcher;

    const LEGACY: &str = "http://cfile1.uf.tistory.com/image/2165A54C5436A9F92ABC1E";
    const CDN: &str = "https://i1.daumcdn.net/thumb/R1280x0/?scode=mtistory&fname=http%3A%2F%2Fcfile1.uf.tistory.com%2Fimage%2F2165A54C5436A9F92ABC1E";
    const ORIGINAL: &str = "http://cfile1.uf.tistory.com/original/2165A54C5436A9F92ABC1E";

    fn only(links: &LinkMap) -> String {
        assert_eq!(links.len(), 1);
        links.iter().next().map(|(url, _)| url.to_string()).unwrap()
    }

    #[test]
    fn test_modern_is_idempotent() {
        let once = modern("http://t1.daumcdn.net/cfile/tistory/2765A54C5436A9F92A");
        assert_eq!(
            only(&once),
            "http://t1.daumcdn.net/cfile/tistory/2765A54C5436A9F92A?original"
        );
        assert_eq!(modern(&only(&once)), once);
    }

    #[test]
    fn test_legacy_is_idempotent() {
        let once = legacy(LEGACY);
        assert_eq!(only(&once), ORIGINAL);
        assert_eq!(legacy(ORIGINAL), once);
    }

    #[test]
    fn test_cdn_rewrites_the_parameter_value() {
        let links = from_cdn(CDN).unwrap();
        assert_eq!(only(&links), ORIGINAL);
    }

    #[test]
    fn test_cdn_without_legacy_parameter() {
        let err = from_cdn("https://i1.daumcdn.net/thumb/R1280x0/?scode=mtistory&fname=https%3A%2F%2Fexample.com%2Fa.jpg")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExtractionMiss);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(CDN), Some(ImageKind::CdnLegacy));
        assert_eq!(classify(LEGACY), Some(ImageKind::Legacy));
        assert_eq!(classify("https://example.com/a.jpg"), None);
    }

    const BLOG_PAGE: &str = r#"<html><body>
        <div class="article">
            <img src="http://cfile1.uf.tistory.com/image/2165A54C5436A9F92ABC1E" filename="first.jpg">
            <img src="https://blog.example/emoticon.gif">
        </div>
        <div role="main">
            <img src="https://i1.daumcdn.net/thumb/R1280x0/?scode=mtistory&amp;fname=http%3A%2F%2Fcfile2.uf.tistory.com%2Fimage%2F99AA00BB11CC22DD33EE44">
        </div>
        <div class="sidebar"><img src="http://cfile3.uf.tistory.com/image/77FF"></div>
        </body></html>"#;

    #[test]
    fn test_extract_and_rewrite_page_images() {
        let images = extract_images(BLOG_PAGE).unwrap();
        assert_eq!(images.len(), 3);

        let links = page_links(&images);
        assert_eq!(links.len(), 2);
        assert_eq!(links.get(ORIGINAL), Some("first.jpg"));
        assert_eq!(
            links.get("http://cfile2.uf.tistory.com/original/99AA00BB11CC22DD33EE44"),
            Some("")
        );
    }

    fn site_resolver(fetcher: Arc<FakeFetcher>) -> LinkResolver {
        let mut config = Config::default();
        config.resolver.tistory_sites = true;
        LinkResolver::new(Arc::new(config), fetcher)
    }

    #[tokio::test]
    async fn test_site_scrapes_html_pages() {
        let url = "https://someblog.tistory.com/123";
        let fetcher = Arc::new(
            FakeFetcher::new()
                .head(url, "text/html;charset=UTF-8")
                .html(url, BLOG_PAGE),
        );
        let links = site_resolver(fetcher.clone())
            .resolve(&LinkRequest::new(url))
            .await
            .unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(fetcher.calls(), vec![format!("HEAD {url}"), format!("GET {url}")]);
    }

    #[tokio::test]
    async fn test_site_skips_non_html() {
        let url = "https://files.example.com/photo/42";
        let fetcher = Arc::new(FakeFetcher::new().head(url, "image/jpeg"));
        let links = site_resolver(fetcher.clone())
            .resolve(&LinkRequest::new(url))
            .await
            .unwrap();

        assert!(links.is_empty());
        assert_eq!(fetcher.calls(), vec![format!("HEAD {url}")]);
    }
}
