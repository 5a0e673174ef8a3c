//! In-memory fakes for network-free tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::clients::{DriveClient, FilePage, Post, SocialClient};
use crate::error::{AppError, Result};
use crate::utils::http::{Fetcher, Head, Headers, Page};

/// A canned response selected by URL substring.
struct Route {
    fragment: String,
    page: Page,
}

/// [`Fetcher`] that serves canned responses and records every request.
///
/// Routes are matched by exact URL first, then by the first registered
/// fragment the URL contains. Unrouted GETs answer 404 with an empty body.
#[derive(Default)]
pub struct FakeFetcher {
    routes: Vec<Route>,
    heads: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(mut self, fragment: &str, final_url: &str, status: u16, content_type: &str, body: &str) -> Self {
        self.routes.push(Route {
            fragment: fragment.to_string(),
            page: Page {
                final_url: final_url.to_string(),
                status,
                content_type: Some(content_type.to_string()),
                body: body.as_bytes().to_vec(),
            },
        });
        self
    }

    /// Serve `body` as HTML.
    pub fn html(self, fragment: &str, body: &str) -> Self {
        self.route(fragment, fragment, 200, "text/html; charset=utf-8", body)
    }

    /// Serve `body` as JSON.
    pub fn json(self, fragment: &str, body: &str) -> Self {
        self.route(fragment, fragment, 200, "application/json", body)
    }

    /// Serve `body` after a redirect to `final_url`.
    pub fn redirect(self, fragment: &str, final_url: &str, body: &str) -> Self {
        self.route(fragment, final_url, 200, "text/html", body)
    }

    /// Answer with an error status.
    pub fn status(self, fragment: &str, status: u16) -> Self {
        self.route(fragment, fragment, status, "text/plain", "")
    }

    /// Answer HEAD requests for `url` with a content type.
    pub fn head(mut self, url: &str, content_type: &str) -> Self {
        self.heads.insert(url.to_string(), content_type.to_string());
        self
    }

    /// Requests issued so far, as `"METHOD url"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &str, url: &str) {
        self.calls.lock().unwrap().push(format!("{method} {url}"));
    }

    fn find(&self, url: &str) -> Option<&Page> {
        self.routes
            .iter()
            .find(|r| r.fragment == url)
            .or_else(|| self.routes.iter().find(|r| url.contains(&r.fragment)))
            .map(|r| &r.page)
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn get(&self, url: &str, _headers: Headers<'_>) -> Result<Page> {
        self.record("GET", url);
        Ok(self.find(url).cloned().unwrap_or_else(|| Page {
            final_url: url.to_string(),
            status: 404,
            content_type: None,
            body: Vec::new(),
        }))
    }

    async fn head(&self, url: &str, _headers: Headers<'_>) -> Result<Head> {
        self.record("HEAD", url);
        Ok(Head {
            final_url: url.to_string(),
            status: if self.heads.contains_key(url) { 200 } else { 404 },
            content_type: self.heads.get(url).cloned(),
        })
    }
}

/// [`SocialClient`] serving posts from a map.
#[derive(Default)]
pub struct FakeSocialClient {
    posts: HashMap<u64, Post>,
    requested: Mutex<Vec<u64>>,
}

impl FakeSocialClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(mut self, id: u64, post: Post) -> Self {
        self.posts.insert(id, post);
        self
    }

    pub fn requested(&self) -> Vec<u64> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl SocialClient for FakeSocialClient {
    async fn fetch_post(&self, id: u64) -> Result<Post> {
        self.requested.lock().unwrap().push(id);
        self.posts.get(&id).cloned().ok_or(AppError::Status {
            url: format!("post/{id}"),
            status: 404,
        })
    }
}

/// [`DriveClient`] serving a folder listing split into pages.
#[derive(Default)]
pub struct FakeDriveClient {
    pages: Vec<Vec<String>>,
    stuck_token: Option<String>,
    requests: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeDriveClient {
    /// Pages of the given sizes; every page but the last carries a token.
    pub fn with_page_sizes(sizes: &[usize]) -> Self {
        let mut next = 0;
        let pages = sizes
            .iter()
            .map(|&size| {
                let page = (next..next + size).map(|i| format!("file{i}")).collect();
                next += size;
                page
            })
            .collect();
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Answer every request with the first page and the same `token`.
    pub fn repeating_token(mut self, token: &str) -> Self {
        self.stuck_token = Some(token.to_string());
        self
    }

    pub fn requests(&self) -> Vec<(String, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DriveClient for FakeDriveClient {
    async fn list_children(&self, parent_id: &str, page_token: Option<&str>) -> Result<FilePage> {
        self.requests
            .lock()
            .unwrap()
            .push((parent_id.to_string(), page_token.map(str::to_string)));

        if let Some(token) = &self.stuck_token {
            return Ok(FilePage {
                file_ids: self.pages.first().cloned().unwrap_or_default(),
                next_page_token: Some(token.clone()),
            });
        }

        let index: usize = match page_token {
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| AppError::validation(format!("bad page token {token}")))?,
            None => 0,
        };
        let file_ids = self.pages.get(index).cloned().unwrap_or_default();
        let next_page_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));

        Ok(FilePage {
            file_ids,
            next_page_token,
        })
    }
}
