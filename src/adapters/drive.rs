// src/adapters/drive.rs

//! Google Drive files and folders.

use std::collections::HashSet;

use crate::adapters::Context;
use crate::error::{AppError, Result};
use crate::models::LinkMap;

const DOWNLOAD_URL: &str = "https://drive.google.com/uc?export=download&id=";

/// Direct download URL of a file id.
pub fn download_url(file_id: &str) -> String {
    format!("{DOWNLOAD_URL}{file_id}")
}

pub fn file(ctx: &Context<'_>) -> Result<LinkMap> {
    let id = ctx.capture("id", "file id")?;
    Ok(LinkMap::single(download_url(id), ""))
}

/// Every file of a folder, draining all listing pages.
pub async fn folder(ctx: &Context<'_>) -> Result<LinkMap> {
    let client = ctx
        .resolver
        .drive()
        .ok_or_else(|| AppError::config("google api key is not configured"))?;
    let folder_id = ctx.capture("id", "folder id")?;

    let mut links = LinkMap::new();
    let mut page_token: Option<String> = None;
    let mut seen_tokens: HashSet<String> = HashSet::new();
    let mut pages = 0usize;

    loop {
        let page = client
            .list_children(folder_id, page_token.as_deref())
            .await?;
        pages += 1;
        for file_id in &page.file_ids {
            links.insert(download_url(file_id), "");
        }

        match page.next_page_token {
            Some(token) if !token.is_empty() => {
                if !seen_tokens.insert(token.clone()) {
                    log::warn!(
                        "Drive listing of {} repeated page token {}, stopping after {} page(s)",
                        folder_id,
                        token,
                        pages
                    );
                    break;
                }
                page_token = Some(token);
            }
            _ => break,
        }
    }

    log::info!(
        "Found google drive folder with {} files in {} page(s) (folder: {})",
        links.len(),
        pages,
        folder_id
    );
    Ok(links)
}
