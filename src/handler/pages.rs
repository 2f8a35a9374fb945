//! Directory index page serving
//!
//! Maps a directory-style URL to `<dir>/index.html` under the content root
//! and returns its contents as HTML. Missing pages get the fixed
//! "Page not found" body; a missing root index surfaces as a server error.

use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::SiteConfig;
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;

/// Serve the root index page.
///
/// The root page has no 404 fallback: if the content root has no readable
/// `index.html`, the site is misconfigured and the response is a 500.
pub async fn serve_root(ctx: &RequestContext<'_>, site: &SiteConfig) -> Response<Full<Bytes>> {
    let index_path = Path::new(&site.content_root).join("index.html");
    match fs::read(&index_path).await {
        Ok(content) => http::response::build_html_response(Bytes::from(content), ctx.is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read root index '{}': {e}",
                index_path.display()
            ));
            http::build_500_response()
        }
    }
}

/// Serve a subdirectory index page.
pub async fn serve_page(
    ctx: &RequestContext<'_>,
    site: &SiteConfig,
    dir: &str,
) -> Response<Full<Bytes>> {
    match load_page_index(&site.content_root, dir).await {
        Some(content) => http::response::build_html_response(Bytes::from(content), ctx.is_head),
        None => http::response::build_page_not_found(ctx.is_head),
    }
}

/// Resolve `<content_root>/<dir>/index.html` and read it.
///
/// The resolved path is canonicalized and must stay inside the content root;
/// traversal attempts are logged and treated as missing.
pub(crate) async fn load_page_index(content_root: &str, dir: &str) -> Option<Vec<u8>> {
    let root = match Path::new(content_root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Content root not found or inaccessible '{content_root}': {e}"
            ));
            return None;
        }
    };

    let index_path = root.join(dir).join("index.html");

    // Missing index is the ordinary 404 case, no need to log
    let Ok(canonical) = index_path.canonicalize() else {
        return None;
    };

    if !canonical.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {dir} -> {}",
            canonical.display()
        ));
        return None;
    }

    if !canonical.is_file() {
        return None;
    }

    match fs::read(&canonical).await {
        Ok(content) => Some(content),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read page index '{}': {e}",
                canonical.display()
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::path::PathBuf;

    /// Fresh site directory under the system temp dir.
    fn site_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("homesite-pages-{}-{tag}", std::process::id()))
            .join("site");
        std_fs::create_dir_all(&dir).expect("create site dir");
        dir
    }

    fn write_page(root: &Path, dir: &str, body: &str) {
        let page_dir = root.join(dir);
        std_fs::create_dir_all(&page_dir).expect("create page dir");
        std_fs::write(page_dir.join("index.html"), body).expect("write index");
    }

    #[tokio::test]
    async fn resolves_existing_page_index() {
        let root = site_dir("existing");
        write_page(&root, "projects", "<h1>Projects</h1>");

        let content = load_page_index(root.to_str().unwrap(), "projects").await;
        assert_eq!(content, Some(b"<h1>Projects</h1>".to_vec()));
    }

    #[tokio::test]
    async fn missing_page_index_is_none() {
        let root = site_dir("missing");

        let content = load_page_index(root.to_str().unwrap(), "missing").await;
        assert_eq!(content, None);
    }

    #[tokio::test]
    async fn nested_page_index_resolves() {
        let root = site_dir("nested");
        write_page(&root, "blog/2024", "<h1>2024</h1>");

        let content = load_page_index(root.to_str().unwrap(), "blog/2024").await;
        assert_eq!(content, Some(b"<h1>2024</h1>".to_vec()));
    }

    #[tokio::test]
    async fn empty_dir_resolves_root_index() {
        let root = site_dir("empty-dir");
        std_fs::write(root.join("index.html"), "<h1>Home</h1>").expect("write index");

        let content = load_page_index(root.to_str().unwrap(), "").await;
        assert_eq!(content, Some(b"<h1>Home</h1>".to_vec()));
    }

    #[tokio::test]
    async fn traversal_outside_content_root_is_blocked() {
        let root = site_dir("traversal");
        // A sibling directory outside the content root with its own index
        let outside = root.parent().unwrap().join("outside");
        std_fs::create_dir_all(&outside).expect("create outside dir");
        std_fs::write(outside.join("index.html"), "secret").expect("write outside index");

        let content = load_page_index(root.to_str().unwrap(), "../outside").await;
        assert_eq!(content, None);
    }
}
