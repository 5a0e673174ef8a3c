// src/lib.rs

//! Link resolver library
//!
//! Maps media post URLs (social posts, photo albums, video hosts, cloud
//! drive folders, blog CDNs) to direct downloadable URLs.

pub mod adapters;
pub mod clients;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod testing;

pub use error::{AppError, ErrorKind, Result};
pub use models::{Config, LinkMap, LinkRequest, Platform, ResolvedLink};
pub use services::LinkResolver;
