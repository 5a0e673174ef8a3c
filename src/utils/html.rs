// src/utils/html.rs

//! HTML scanning helpers shared by the scraping adapters.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Find the first `<script>` whose text starts with `prefix` and return the
/// remainder with the prefix and the trailing statement terminator removed.
pub fn find_script_payload(document: &Html, prefix: &str) -> Option<String> {
    let selector = parse_selector("script").ok()?;
    document.select(&selector).find_map(|script| {
        let text: String = script.text().collect();
        let payload = text.trim().strip_prefix(prefix)?;
        let payload = payload.trim_end();
        Some(payload.strip_suffix(';').unwrap_or(payload).to_string())
    })
}

/// `content` of the first `<meta property=...>` tag matching any of the
/// given properties, in document order.
pub fn meta_property(document: &Html, properties: &[&str]) -> Option<String> {
    let selector = parse_selector("meta[property]").ok()?;
    document
        .select(&selector)
        .filter(|meta| {
            meta.value()
                .attr("property")
                .is_some_and(|p| properties.contains(&p))
        })
        .find_map(|meta| meta.value().attr("content"))
        .map(str::to_string)
}

/// Decode HTML character references (`&amp;`, `&#x2F;`, ...).
pub fn unescape(text: &str) -> String {
    Html::parse_fragment(text).root_element().text().collect()
}
