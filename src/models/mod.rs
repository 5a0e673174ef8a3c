// src/models/mod.rs

//! Domain models for the link resolver.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod link;
mod platform;

// Re-export all public types
pub use config::{Config, Credentials, Endpoints, HttpConfig, ResolverConfig};
pub use link::{LinkMap, LinkRequest, ResolvedLink};
pub use platform::Platform;
