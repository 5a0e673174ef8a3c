// src/utils/http.rs

//! HTTP transport and JSON fetch helpers.
//!
//! Adapters talk to the network only through the [`Fetcher`] trait so the
//! resolver can run against a recorded fake in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, header};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Extra request headers as name/value pairs.
pub type Headers<'a> = &'a [(&'a str, &'a str)];

/// A fetched response body.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL after following redirects
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Response metadata from a HEAD request.
#[derive(Debug, Clone)]
pub struct Head {
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
}

/// GET/HEAD transport with redirects followed.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a GET request. Non-success statuses are returned, not raised.
    async fn get(&self, url: &str, headers: Headers<'_>) -> Result<Page>;

    /// Issue a HEAD request. Non-success statuses are returned, not raised.
    async fn head(&self, url: &str, headers: Headers<'_>) -> Result<Head>;
}

/// [`Fetcher`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher from the HTTP settings.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self { client })
    }

    fn request(&self, method: Method, url: &str, headers: Headers<'_>) -> RequestBuilder {
        headers
            .iter()
            .fold(self.client.request(method, url), |req, (name, value)| {
                req.header(*name, *value)
            })
    }

    fn content_type(headers: &header::HeaderMap) -> Option<String> {
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str, headers: Headers<'_>) -> Result<Page> {
        let response = self.request(Method::GET, url, headers).send().await?;
        let final_url = response.url().to_string();
        let status = response.status().as_u16();
        let content_type = Self::content_type(response.headers());
        let body = response.bytes().await?.to_vec();
        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(Page {
            final_url,
            status,
            content_type,
            body,
        })
    }

    async fn head(&self, url: &str, headers: Headers<'_>) -> Result<Head> {
        let response = self.request(Method::HEAD, url, headers).send().await?;
        log::debug!("HEAD {} -> {}", url, response.status());

        Ok(Head {
            final_url: response.url().to_string(),
            status: response.status().as_u16(),
            content_type: Self::content_type(response.headers()),
        })
    }
}

/// GET a URL and fail on non-success statuses.
pub async fn fetch_ok(fetcher: &dyn Fetcher, url: &str, headers: Headers<'_>) -> Result<Page> {
    let page = fetcher.get(url, headers).await?;
    if !page.is_success() {
        return Err(AppError::Status {
            url: url.to_string(),
            status: page.status,
        });
    }
    Ok(page)
}

/// GET a URL and deserialize its JSON body.
pub async fn fetch_json<T: DeserializeOwned>(
    fetcher: &dyn Fetcher,
    url: &str,
    headers: Headers<'_>,
) -> Result<T> {
    let page = fetch_ok(fetcher, url, headers).await?;
    Ok(serde_json::from_slice(&page.body)?)
}

/// GET a URL and return its body as text, for HTML scraping.
pub async fn fetch_text(fetcher: &dyn Fetcher, url: &str, headers: Headers<'_>) -> Result<String> {
    Ok(fetch_ok(fetcher, url, headers).await?.text())
}

/// GET a URL and return the raw body regardless of status.
pub async fn fetch_raw(fetcher: &dyn Fetcher, url: &str) -> Result<Vec<u8>> {
    Ok(fetcher.get(url, &[]).await?.body)
}
