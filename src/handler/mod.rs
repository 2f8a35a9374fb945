//! Request handler module
//!
//! Routing dispatch plus the two serving paths: directory index pages and
//! verbatim assets.

pub mod assets;
pub mod pages;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
