//! Per-platform resolver adapters.
//!
//! Every adapter turns one matched URL into a [`LinkMap`]. Direct-rewrite
//! adapters are plain functions; the rest fetch through the resolver's
//! transport and client handles.

pub mod drive;
pub mod facebook;
pub mod flickr;
pub mod gfycat;
pub mod imgur;
pub mod instagram;
pub mod streamable;
pub mod tistory;
pub mod twitter;

use crate::error::{AppError, Result};
use crate::models::{LinkMap, LinkRequest, Platform};
use crate::services::LinkResolver;
use crate::services::matcher::SignatureMatch;

/// Everything an adapter may use while resolving one request.
pub struct Context<'a> {
    pub resolver: &'a LinkResolver,
    pub request: &'a LinkRequest,
    pub matched: &'a SignatureMatch,
    /// Recursion depth of this request, 0 for caller-submitted URLs
    pub depth: u8,
}

impl Context<'_> {
    pub fn url(&self) -> &str {
        self.request.url()
    }

    /// A non-empty named capture of the matched signature.
    pub fn capture(&self, name: &str, what: &str) -> Result<&str> {
        self.matched
            .get(name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::extraction(self.url(), format!("unable to get {what} from URL")))
    }
}

/// Run the adapter for the matched platform.
pub async fn dispatch(ctx: &Context<'_>) -> Result<LinkMap> {
    let url = ctx.url();
    match ctx.matched.platform {
        Platform::TwitterPhoto => twitter::photo(url),
        Platform::TwitterStatus => twitter::status(ctx).await,
        Platform::Tistory => Ok(tistory::modern(url)),
        Platform::TistoryLegacy => Ok(tistory::legacy(url)),
        Platform::TistoryCdn => tistory::from_cdn(url),
        Platform::Gfycat => gfycat::resolve(ctx).await,
        Platform::Instagram => instagram::resolve(ctx).await,
        Platform::ImgurSingle => Ok(imgur::single(url)),
        Platform::ImgurAlbum => imgur::album(ctx).await,
        Platform::GoogleDrive => drive::file(ctx),
        Platform::FlickrPhoto => flickr::photo(ctx).await,
        Platform::FlickrAlbum => flickr::album(ctx).await,
        Platform::FlickrAlbumShort => flickr::album_short(ctx).await,
        Platform::GoogleDriveFolder => drive::folder(ctx).await,
        Platform::Streamable => streamable::resolve(ctx).await,
        Platform::FacebookVideo => facebook::resolve(ctx).await,
        Platform::TistorySite => tistory::site(ctx).await,
    }
}
