//! Resolution façade.
//!
//! Takes a raw URL, picks the adapter through the [`PatternMatcher`] and
//! returns the adapter's link map.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::adapters::{self, Context};
use crate::clients::{DriveClient, GoogleDriveClient, SocialClient, TwitterClient};
use crate::error::{AppError, Result};
use crate::models::{Config, LinkMap, LinkRequest, Platform};
use crate::services::PatternMatcher;
use crate::utils::http::{Fetcher, HttpFetcher};

/// Deepest recursion level whose embedded links are still expanded.
/// Links found at depth 1 are resolved, their own embedded links are not.
pub const MAX_DEPTH: u8 = 1;

/// Entry point of the link resolution engine.
pub struct LinkResolver {
    config: Arc<Config>,
    matcher: PatternMatcher,
    fetcher: Arc<dyn Fetcher>,
    social: Option<Arc<dyn SocialClient>>,
    drive: Option<Arc<dyn DriveClient>>,
}

impl LinkResolver {
    /// Create a resolver without any authenticated client handles.
    pub fn new(config: Arc<Config>, fetcher: Arc<dyn Fetcher>) -> Self {
        let matcher = PatternMatcher::new(config.resolver.tistory_sites);
        Self {
            config,
            matcher,
            fetcher,
            social: None,
            drive: None,
        }
    }

    /// Create a resolver with the HTTP transport and every client whose
    /// credentials are configured.
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.http)?);
        let credentials = &config.credentials;
        let endpoints = &config.endpoints;
        let mut resolver = Self::new(Arc::clone(&config), Arc::clone(&fetcher));

        if credentials.is_configured(Platform::TwitterStatus) {
            resolver = resolver.with_social_client(Arc::new(TwitterClient::new(
                Arc::clone(&fetcher),
                &endpoints.twitter_api,
                &credentials.twitter_bearer_token,
            )));
        } else {
            log::debug!("Twitter bearer token not set, status links will be rejected");
        }

        if credentials.is_configured(Platform::GoogleDriveFolder) {
            resolver = resolver.with_drive_client(Arc::new(GoogleDriveClient::new(
                Arc::clone(&fetcher),
                &endpoints.drive_api,
                &credentials.google_api_key,
            )));
        } else {
            log::debug!("Google API key not set, drive folders will be rejected");
        }

        Ok(resolver)
    }

    pub fn with_social_client(mut self, client: Arc<dyn SocialClient>) -> Self {
        self.social = Some(client);
        self
    }

    pub fn with_drive_client(mut self, client: Arc<dyn DriveClient>) -> Self {
        self.drive = Some(client);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetcher(&self) -> &dyn Fetcher {
        self.fetcher.as_ref()
    }

    pub fn social(&self) -> Option<&dyn SocialClient> {
        self.social.as_deref()
    }

    pub fn drive(&self) -> Option<&dyn DriveClient> {
        self.drive.as_deref()
    }

    /// Resolve a caller-submitted URL.
    ///
    /// Returns [`AppError::UnsupportedUrl`] without touching the network
    /// when no signature matches.
    pub async fn resolve(&self, request: &LinkRequest) -> Result<LinkMap> {
        self.resolve_at(request, 0).await
    }

    /// Resolve a URL at an explicit recursion depth.
    pub fn resolve_at<'a>(
        &'a self,
        request: &'a LinkRequest,
        depth: u8,
    ) -> BoxFuture<'a, Result<LinkMap>> {
        async move {
            let matched = self
                .matcher
                .match_url(request.url())
                .ok_or_else(|| AppError::unsupported(request.url()))?;

            let ctx = Context {
                resolver: self,
                request,
                matched: &matched,
                depth,
            };
            let links = adapters::dispatch(&ctx).await?;
            log::debug!(
                "Resolved {} via {} into {} link(s)",
                request.url(),
                matched.platform,
                links.len()
            );
            Ok(links)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::FakeFetcher;

    fn resolver(fetcher: Arc<FakeFetcher>) -> LinkResolver {
        LinkResolver::new(Arc::new(Config::default()), fetcher)
    }

    #[tokio::test]
    async fn test_unsupported_url_makes_no_request() {
        let fetcher = Arc::new(FakeFetcher::new());
        let resolver = resolver(fetcher.clone());

        for url in [
            "https://example.com/article.html",
            "ftp://imgur.com/abc",
            "hello",
            "",
        ] {
            let err = resolver.resolve(&LinkRequest::new(url)).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedUrl, "{url}");
        }
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_direct_rewrite_dispatch() {
        let fetcher = Arc::new(FakeFetcher::new());
        let resolver = resolver(fetcher.clone());

        let links = resolver
            .resolve(&LinkRequest::new("https://drive.google.com/file/d/1aBcD/view"))
            .await
            .unwrap();
        assert_eq!(
            links.get("https://drive.google.com/uc?export=download&id=1aBcD"),
            Some("")
        );
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_clients_fail_with_config_error() {
        let fetcher = Arc::new(FakeFetcher::new());
        let resolver = resolver(fetcher.clone());

        for url in [
            "https://twitter.com/someone/status/1",
            "https://drive.google.com/drive/folders/abc",
        ] {
            let err = resolver.resolve(&LinkRequest::new(url)).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "{url}");
        }
        assert!(fetcher.calls().is_empty());
    }

    #[test]
    fn test_from_config_wires_configured_clients() {
        let mut config = Config::default();
        config.credentials.google_api_key = "key".to_string();
        let resolver = LinkResolver::from_config(Arc::new(config)).unwrap();
        assert!(resolver.drive().is_some());
        assert!(resolver.social().is_none());
    }
}
