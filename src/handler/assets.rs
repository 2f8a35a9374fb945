//! Static asset serving
//!
//! Serves files verbatim from the assets directory under the configured URL
//! prefix, with content-type inference, conditional GET, and single-range
//! requests.

use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::SiteConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range};
use crate::logger;

/// Serve a file from the assets mount.
pub async fn serve_asset(ctx: &RequestContext<'_>, site: &SiteConfig) -> Response<Full<Bytes>> {
    match load_asset(&site.assets_dir, &site.assets_route, ctx.path).await {
        Some((content, content_type)) => build_asset_response(&content, content_type, ctx),
        None => http::build_404_response(),
    }
}

/// Resolve an asset request path to a file under the assets directory.
///
/// The mount prefix is stripped from the request path and the remainder is
/// canonicalized; anything resolving outside the assets directory is logged
/// and treated as missing. The mount itself has no directory listing.
pub(crate) async fn load_asset(
    assets_dir: &str,
    assets_route: &str,
    path: &str,
) -> Option<(Vec<u8>, &'static str)> {
    let relative = path.strip_prefix(assets_route)?.trim_start_matches('/');
    if relative.is_empty() {
        return None;
    }

    let dir = match Path::new(assets_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Assets directory not found or inaccessible '{assets_dir}': {e}"
            ));
            return None;
        }
    };

    let Ok(canonical) = dir.join(relative).canonicalize() else {
        return None;
    };

    if !canonical.starts_with(&dir) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {path} -> {}",
            canonical.display()
        ));
        return None;
    }

    if !canonical.is_file() {
        return None;
    }

    let content = match fs::read(&canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read asset '{}': {e}",
                canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::content_type_for(canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

/// Build the asset response: 304 for a matching `ETag`, 206 for a valid
/// range, 200 otherwise.
fn build_asset_response(
    data: &[u8],
    content_type: &'static str,
    ctx: &RequestContext<'_>,
) -> Response<Full<Bytes>> {
    let etag = cache::make_etag(data);

    if cache::none_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    match range::parse_range_header(ctx.range_header.as_deref(), data.len()) {
        range::RangeOutcome::Partial { start, end } => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data[start..=end].to_vec())
            };
            http::response::build_partial_response(
                body,
                content_type,
                &etag,
                start,
                end,
                data.len(),
            )
        }
        range::RangeOutcome::Unsatisfiable => http::build_416_response(data.len()),
        range::RangeOutcome::Full => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data.to_owned())
            };
            http::response::build_asset_ok_response(body, data.len(), content_type, &etag)
        }
    }
}
