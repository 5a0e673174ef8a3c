//! Google Drive v3 client (`files.list`, API key auth).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::clients::{DRIVE_PAGE_SIZE, DriveClient, FilePage};
use crate::error::Result;
use crate::utils::api_url;
use crate::utils::http::{Fetcher, fetch_json};

/// [`DriveClient`] for Google Drive.
pub struct GoogleDriveClient {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    api_key: String,
}

impl GoogleDriveClient {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[async_trait]
impl DriveClient for GoogleDriveClient {
    async fn list_children(&self, parent_id: &str, page_token: Option<&str>) -> Result<FilePage> {
        let query = format!("'{parent_id}' in parents");
        let page_size = DRIVE_PAGE_SIZE.to_string();
        let mut params = vec![
            ("q", query.as_str()),
            ("fields", "nextPageToken, files(id)"),
            ("pageSize", page_size.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let url = api_url(&self.base_url, "files", &params)?;
        let list: FileList = fetch_json(self.fetcher.as_ref(), &url, &[])
            .await
            .inspect_err(|e| log::warn!("Drive listing failed for {}: {}", parent_id, e))?;

        Ok(FilePage {
            file_ids: list.files.into_iter().map(|f| f.id).collect(),
            next_page_token: list.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}
