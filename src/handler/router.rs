//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! classification, dispatch, and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};

use crate::config::Config;
use crate::handler::{assets, pages};
use crate::http;
use crate::logger;
use crate::logger::AccessLogEntry;

/// Request context encapsulating the header state the serving paths need
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Where a request path lands.
///
/// The generic page route only matches with a trailing slash; the configured
/// aliases match without one. The asymmetry is load-bearing, keep it.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteKind<'a> {
    /// `/` - the root index page
    Root,
    /// Anything under the assets mount
    Asset,
    /// A directory index page, `dir` relative to the content root
    Page { dir: &'a str },
    /// No route matched
    NotFound,
}

/// Classify a request path against the site layout.
pub fn classify<'a>(path: &'a str, assets_route: &str, page_aliases: &[String]) -> RouteKind<'a> {
    if path == "/" {
        return RouteKind::Root;
    }

    // The assets mount wins over page resolution, trailing slash or not
    if let Some(rest) = path.strip_prefix(assets_route) {
        if rest.is_empty() || rest.starts_with('/') {
            return RouteKind::Asset;
        }
    }

    // Generic page route: requires a trailing slash, arbitrary depth
    if let Some(stripped) = path.strip_suffix('/') {
        return RouteKind::Page {
            dir: stripped.trim_start_matches('/'),
        };
    }

    // Named aliases resolve without the trailing slash
    let name = path.trim_start_matches('/');
    if page_aliases
        .iter()
        .any(|alias| alias.trim_start_matches('/') == name)
    {
        return RouteKind::Page { dir: name };
    }

    RouteKind::NotFound
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = std::time::Instant::now();

    let method = req.method().clone();
    let version = req.version();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);

    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };
    let referer = header("referer");
    let user_agent = header("user-agent");

    let response = match check_http_method(&method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path: &path,
                is_head: method == Method::HEAD,
                if_none_match: header("if-none-match"),
                range_header: header("range"),
            };
            route_request(&ctx, &config).await
        }
    };

    if config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: chrono::Local::now(),
            method: method.to_string(),
            path,
            query,
            http_version: version_label(version),
            status: response.status().as_u16(),
            body_bytes: content_length(&response),
            referer,
            user_agent,
            request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return an early response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Route request based on path and site configuration
async fn route_request(ctx: &RequestContext<'_>, config: &Arc<Config>) -> Response<Full<Bytes>> {
    let site = &config.site;

    match classify(ctx.path, &site.assets_route, &site.page_aliases) {
        RouteKind::Root => pages::serve_root(ctx, site).await,
        RouteKind::Asset => assets::serve_asset(ctx, site).await,
        RouteKind::Page { dir } => pages::serve_page(ctx, site, dir).await,
        RouteKind::NotFound => http::build_404_response(),
    }
}

fn version_label(version: Version) -> String {
    match version {
        Version::HTTP_10 => "1.0".to_string(),
        Version::HTTP_2 => "2".to_string(),
        Version::HTTP_3 => "3".to_string(),
        _ => "1.1".to_string(),
    }
}

/// Response body size as reported by the Content-Length header.
///
/// Every builder in this crate sets Content-Length, so this is exact for
/// access logging; responses without the header log as zero bytes.
fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> Vec<String> {
        ["projects", "publications", "resume", "contact"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn root_path() {
        assert_eq!(classify("/", "/assets", &aliases()), RouteKind::Root);
    }

    #[test]
    fn asset_paths() {
        assert_eq!(
            classify("/assets/style.css", "/assets", &aliases()),
            RouteKind::Asset
        );
        assert_eq!(classify("/assets", "/assets", &aliases()), RouteKind::Asset);
        // Trailing slash under the mount still belongs to the mount
        assert_eq!(
            classify("/assets/img/", "/assets", &aliases()),
            RouteKind::Asset
        );
        // A path merely sharing the prefix text is not an asset
        assert_eq!(
            classify("/assetsx", "/assets", &aliases()),
            RouteKind::NotFound
        );
    }

    #[test]
    fn generic_route_requires_trailing_slash() {
        assert_eq!(
            classify("/blog/", "/assets", &aliases()),
            RouteKind::Page { dir: "blog" }
        );
        assert_eq!(classify("/blog", "/assets", &aliases()), RouteKind::NotFound);
    }

    #[test]
    fn generic_route_matches_nested_paths() {
        assert_eq!(
            classify("/blog/2024/", "/assets", &aliases()),
            RouteKind::Page { dir: "blog/2024" }
        );
    }

    #[test]
    fn aliases_match_without_trailing_slash() {
        for name in ["projects", "publications", "resume", "contact"] {
            let path = format!("/{name}");
            assert_eq!(
                classify(&path, "/assets", &aliases()),
                RouteKind::Page { dir: name }
            );
        }
    }

    #[test]
    fn alias_with_trailing_slash_uses_generic_route() {
        assert_eq!(
            classify("/projects/", "/assets", &aliases()),
            RouteKind::Page { dir: "projects" }
        );
    }

    #[test]
    fn double_slash_resolves_to_content_root() {
        // "//" is the generic route with an empty directory, which lands on
        // the content root's own index file
        assert_eq!(
            classify("//", "/assets", &aliases()),
            RouteKind::Page { dir: "" }
        );
    }
}
