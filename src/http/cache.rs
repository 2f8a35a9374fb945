//! HTTP cache control module
//!
//! `ETag` generation and `If-None-Match` handling for asset responses.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a size-and-hash `ETag` for the given content.
///
/// The size component makes collisions between truncated and complete reads
/// of the same file visible.
pub fn make_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}-{:x}\"", content.len(), hasher.finish())
}

/// Check whether the client's `If-None-Match` header matches the `ETag`.
///
/// Handles comma-separated lists and the `*` wildcard.
pub fn none_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let Some(client_etags) = if_none_match else {
        return false;
    };

    client_etags
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == etag || candidate == "*")
}
