//! Twitter API client (v1.1 `statuses/show`, app-only bearer auth).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::clients::{Post, PostMedia, SocialClient, VideoVariant};
use crate::error::Result;
use crate::utils::api_url;
use crate::utils::http::{Fetcher, fetch_json};

/// [`SocialClient`] for Twitter.
pub struct TwitterClient {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    bearer_token: String,
}

impl TwitterClient {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
        }
    }
}

#[async_trait]
impl SocialClient for TwitterClient {
    async fn fetch_post(&self, id: u64) -> Result<Post> {
        let id = id.to_string();
        let url = api_url(
            &self.base_url,
            "1.1/statuses/show.json",
            &[("id", id.as_str()), ("tweet_mode", "extended")],
        )?;
        let auth = format!("Bearer {}", self.bearer_token);
        let tweet: Tweet =
            fetch_json(self.fetcher.as_ref(), &url, &[("Authorization", auth.as_str())]).await?;
        Ok(tweet.into())
    }
}

#[derive(Debug, Deserialize)]
struct Tweet {
    #[serde(default)]
    extended_entities: Option<ExtendedEntities>,
    #[serde(default)]
    entities: Entities,
}

#[derive(Debug, Deserialize)]
struct ExtendedEntities {
    #[serde(default)]
    media: Vec<MediaEntity>,
}

#[derive(Debug, Deserialize)]
struct MediaEntity {
    #[serde(default)]
    media_url_https: String,
    #[serde(default)]
    video_info: Option<VideoInfo>,
}

#[derive(Debug, Deserialize)]
struct VideoInfo {
    #[serde(default)]
    variants: Vec<Variant>,
}

#[derive(Debug, Deserialize)]
struct Variant {
    // HLS playlists carry no bitrate
    #[serde(default)]
    bitrate: u64,
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct Entities {
    #[serde(default)]
    urls: Vec<UrlEntity>,
}

#[derive(Debug, Deserialize)]
struct UrlEntity {
    #[serde(default)]
    expanded_url: Option<String>,
}

impl From<Tweet> for Post {
    fn from(tweet: Tweet) -> Self {
        let media = tweet
            .extended_entities
            .map(|e| e.media)
            .unwrap_or_default()
            .into_iter()
            .map(|m| PostMedia {
                image_url: m.media_url_https,
                variants: m
                    .video_info
                    .map(|v| v.variants)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|v| VideoVariant {
                        bitrate: v.bitrate,
                        url: v.url,
                    })
                    .collect(),
            })
            .collect();
        let links = tweet
            .entities
            .urls
            .into_iter()
            .filter_map(|u| u.expanded_url)
            .collect();

        Post { media, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeFetcher;

    const TWEET: &str = r#"{
        "id": 1,
        "entities": {"urls": [{"url": "https://t.co/x", "expanded_url": "https://imgur.com/AbC"}]},
        "extended_entities": {"media": [
            {"media_url_https": "https://pbs.twimg.com/media/A.jpg"},
            {"media_url_https": "https://pbs.twimg.com/ext_tw_video_thumb/1/pu/img/B.jpg",
             "video_info": {"variants": [
                {"content_type": "application/x-mpegURL", "url": "https://video.twimg.com/b.m3u8"},
                {"bitrate": 832000, "content_type": "video/mp4", "url": "https://video.twimg.com/b.mp4"}
             ]}}
        ]}
    }"#;

    #[tokio::test]
    async fn test_fetch_post_maps_media_and_links() {
        let fetcher = Arc::new(FakeFetcher::new().json("statuses/show.json?id=1&", TWEET));
        let client = TwitterClient::new(fetcher.clone(), "https://api.twitter.com", "token");

        let post = client.fetch_post(1).await.unwrap();

        assert_eq!(post.links, vec!["https://imgur.com/AbC".to_string()]);
        assert_eq!(post.media.len(), 2);
        assert!(post.media[0].variants.is_empty());
        assert_eq!(post.media[1].variants[0].bitrate, 0);
        assert_eq!(post.media[1].variants[1].bitrate, 832000);
        assert_eq!(
            fetcher.calls(),
            vec!["GET https://api.twitter.com/1.1/statuses/show.json?id=1&tweet_mode=extended"]
        );
    }

    #[test]
    fn test_tweet_without_media() {
        let tweet: Tweet = serde_json::from_str(r#"{"entities": {}}"#).unwrap();
        let post: Post = tweet.into();
        assert!(post.media.is_empty());
        assert!(post.links.is_empty());
    }
}
