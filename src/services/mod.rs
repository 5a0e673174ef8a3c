//! Service layer for the link resolver.
//!
//! This module contains:
//! - Platform signature matching (`PatternMatcher`)
//! - The resolution façade (`LinkResolver`)

pub mod matcher;
mod resolver;

pub use matcher::{PatternMatcher, SignatureMatch};
pub use resolver::{LinkResolver, MAX_DEPTH};
