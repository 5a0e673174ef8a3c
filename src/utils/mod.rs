//! Utility functions and helpers.

pub mod html;
pub mod http;

use url::Url;

use crate::error::Result;

/// Last path segment of a URL, without query or fragment.
pub fn filename_from_url(url_str: &str) -> String {
    let path = match Url::parse(url_str) {
        Ok(url) => url.path().to_string(),
        Err(_) => url_str
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    path.rsplit('/').next().unwrap_or_default().to_string()
}

/// Extension of the URL's last path segment including the dot, or empty.
pub fn extension_from_url(url_str: &str) -> String {
    let name = filename_from_url(url_str);
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => name[idx..].to_string(),
        _ => String::new(),
    }
}

/// Decoded value of a query parameter.
pub fn query_param(url_str: &str, name: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()?
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Join an API base URL with a path and encoded query parameters.
pub fn api_url(base: &str, path: &str, params: &[(&str, &str)]) -> Result<String> {
    let joined = if path.is_empty() {
        base.to_string()
    } else {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };
    let url = if params.is_empty() {
        Url::parse(&joined)?
    } else {
        Url::parse_with_params(&joined, params)?
    };
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://pbs.twimg.com/media/Abc_1.jpg"),
            "Abc_1.jpg"
        );
        assert_eq!(
            filename_from_url("https://cdn.example/v/clip.mp4?token=x#t=1"),
            "clip.mp4"
        );
        assert_eq!(filename_from_url("//pbs.twimg.com/media/x.png"), "x.png");
    }

    #[test]
    fn test_extension_from_url() {
        assert_eq!(extension_from_url("https://cdn.example/v/clip.mp4?x=1"), ".mp4");
        assert_eq!(extension_from_url("https://cdn.example/v/clip"), "");
        assert_eq!(extension_from_url("https://cdn.example/v/clip."), "");
    }

    #[test]
    fn test_query_param_decodes() {
        let url = "https://i1.daumcdn.net/thumb/R1280x0/?scode=mtistory&fname=http%3A%2F%2Fcfile1.uf.tistory.com%2Fimage%2FABC";
        assert_eq!(
            query_param(url, "fname"),
            Some("http://cfile1.uf.tistory.com/image/ABC".to_string())
        );
        assert_eq!(query_param(url, "missing"), None);
    }

    #[test]
    fn test_api_url() {
        assert_eq!(
            api_url("https://api.imgur.com/", "/3/album/xyz/images", &[]).unwrap(),
            "https://api.imgur.com/3/album/xyz/images"
        );
        assert_eq!(
            api_url(
                "https://www.flickr.com/services/rest/",
                "",
                &[("method", "flickr.photos.getSizes"), ("photo_id", "42")]
            )
            .unwrap(),
            "https://www.flickr.com/services/rest/?method=flickr.photos.getSizes&photo_id=42"
        );
    }
}
