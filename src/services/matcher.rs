//! Platform signature matching.
//!
//! Classifies a raw URL against an ordered table of platform signatures.
//! Some shapes overlap (the generic blog page shape accepts almost any
//! numeric path), so the table is evaluated top to bottom and the first
//! match wins.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::Platform;

/// A URL pattern bound to exactly one platform.
#[derive(Debug)]
pub struct Signature {
    pub platform: Platform,
    pub pattern: Regex,
}

impl Signature {
    fn new(platform: Platform, pattern: &str) -> Self {
        Self {
            platform,
            pattern: Regex::new(pattern).expect("signature pattern must compile"),
        }
    }

    pub fn is_match(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }

    /// Value of a named capture group when `url` matches.
    pub fn capture<'u>(&self, url: &'u str, name: &str) -> Option<&'u str> {
        self.pattern
            .captures(url)?
            .name(name)
            .map(|m| m.as_str())
    }
}

/// Signatures in priority order.
static SIGNATURES: LazyLock<Vec<Signature>> = LazyLock::new(|| {
    vec![
        Signature::new(
            Platform::TwitterPhoto,
            r"^https?://pbs(-[0-9]+)?\.twimg\.com/media/[^./]+\.(jpg|png)(:[a-z]+)?$",
        ),
        Signature::new(
            Platform::TwitterStatus,
            r"^https?://(www\.|mobile\.)?(twitter|x)\.com/([A-Za-z0-9_.-]+/status/|statuses/|i/web/status/)(?P<id>[0-9]+)/?(\?.*)?$",
        ),
        Signature::new(
            Platform::Tistory,
            r"^https?://t[0-9]+\.daumcdn\.net/cfile/tistory/[A-Z0-9]+(\?original)?$",
        ),
        Signature::new(
            Platform::TistoryLegacy,
            r"^https?://[a-z0-9]+\.uf\.tistory\.com/(image|original)/[A-Z0-9]+$",
        ),
        Signature::new(
            Platform::TistoryCdn,
            r"^https?://[0-9a-z]+\.daumcdn\.net/[a-z]+/[a-zA-Z0-9.]+/\?scode=mtistory&fname=https?%3A%2F%2F[a-z0-9]+\.uf\.tistory\.com%2F(image|original)%2F[A-Z0-9]+$",
        ),
        Signature::new(
            Platform::Gfycat,
            r"^https?://gfycat\.com/(gifs/detail/)?(?P<id>[A-Za-z]+)$",
        ),
        Signature::new(
            Platform::Instagram,
            r"^https?://(www\.)?instagram\.com/(p|reel|tv)/[^/]+/(\?[^/]+)?$",
        ),
        Signature::new(
            Platform::ImgurSingle,
            r"^https?://(i\.)?imgur\.com/[A-Za-z0-9]+(\.gifv)?$",
        ),
        Signature::new(
            Platform::ImgurAlbum,
            r"^https?://imgur\.com/(a/|gallery/|r/[^/]+/)[A-Za-z0-9]+(#[A-Za-z0-9]+)?$",
        ),
        Signature::new(
            Platform::GoogleDrive,
            r"^https?://drive\.google\.com/file/d/(?P<id>[^/]+)/view$",
        ),
        Signature::new(
            Platform::FlickrPhoto,
            r"^https?://(www\.)?flickr\.com/photos/([0-9]+@[A-Z0-9]+|[A-Za-z0-9_-]+)/(?P<photo_id>[0-9]+)(/in/album-[0-9]+)?/?$",
        ),
        Signature::new(
            Platform::FlickrAlbum,
            r"^https?://(www\.)?flickr\.com/photos/([0-9]+@[A-Z0-9]+|[A-Za-z0-9_-]+)/(albums/(with/)?|sets/)?(?P<album_id>[0-9]+)/?$",
        ),
        Signature::new(
            Platform::FlickrAlbumShort,
            r"^https?://((www\.)?flickr\.com/gp/[0-9]+@[A-Z0-9]+/[A-Za-z0-9]+|flic\.kr/s/[A-Za-z0-9]+)$",
        ),
        Signature::new(
            Platform::GoogleDriveFolder,
            r"^https?://drive\.google\.com/(drive/(u/[0-9]+/)?folders/|open\?id=)(?P<id>[A-Za-z0-9_-]+)/?([?&].*)?$",
        ),
        Signature::new(
            Platform::Streamable,
            r"^https?://(www\.)?streamable\.com/(?P<shortcode>[0-9a-z]+)$",
        ),
        Signature::new(
            Platform::FacebookVideo,
            r"^https?://(www\.|m\.)?facebook\.com/[^/]+/videos/([^/]+/)?[0-9]+/?$",
        ),
        Signature::new(
            Platform::TistorySite,
            r"^https?://[0-9a-zA-Z.-]+/(m/)?(photo/)?[0-9]+$",
        ),
    ]
});

/// The signature for a platform.
pub fn signature(platform: Platform) -> &'static Signature {
    SIGNATURES
        .iter()
        .find(|s| s.platform == platform)
        .expect("every platform has a signature")
}

/// Whether `url` has the shape of `platform`'s signature.
pub fn is_match(platform: Platform, url: &str) -> bool {
    signature(platform).is_match(url)
}

/// The winning signature for a URL and its named capture groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMatch {
    pub platform: Platform,
    captures: HashMap<String, String>,
}

impl SignatureMatch {
    /// Value of a named capture group.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures.get(name).map(String::as_str)
    }
}

/// Selects the adapter for a URL.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    tistory_sites: bool,
}

impl PatternMatcher {
    /// Create a matcher. The generic blog page signature is only consulted
    /// when `tistory_sites` is set.
    pub fn new(tistory_sites: bool) -> Self {
        Self { tistory_sites }
    }

    /// Active signatures in priority order.
    pub fn signatures(&self) -> impl Iterator<Item = &'static Signature> + '_ {
        SIGNATURES
            .iter()
            .filter(|s| self.tistory_sites || s.platform != Platform::TistorySite)
    }

    /// Find the first signature matching `url`.
    pub fn match_url(&self, url: &str) -> Option<SignatureMatch> {
        let url = url.trim();
        self.signatures().find_map(|signature| {
            let caps = signature.pattern.captures(url)?;
            let captures = signature
                .pattern
                .capture_names()
                .flatten()
                .filter_map(|name| {
                    caps.name(name)
                        .map(|m| (name.to_string(), m.as_str().to_string()))
                })
                .collect();
            log::debug!("Matched {} for URL: {}", signature.platform, url);
            Some(SignatureMatch {
                platform: signature.platform,
                captures,
            })
        })
    }
}
