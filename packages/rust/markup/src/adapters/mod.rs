//! Platform adapters turning raw article markup into a typed node stream.
//!
//! Each adapter knows one platform's heading/content/reference grammar and
//! emits [`ArticleNode`] events in document order for the tree builder.

mod grokipedia;
mod wikipedia;

use scraper::ElementRef;
use sourcelens_shared::{ArticleNode, Platform};

pub use grokipedia::GrokipediaAdapter;
pub use wikipedia::WikipediaAdapter;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Platform-specific node-stream extraction.
///
/// Extraction is total: markup with none of the expected structure yields an
/// empty stream, never an error.
pub trait ArticleAdapter: Send + Sync {
    /// The platform this adapter understands.
    fn platform(&self) -> Platform;

    /// Extract the document-ordered node stream from raw markup.
    fn extract(&self, html: &str) -> Vec<ArticleNode>;
}

/// Get the adapter for a platform.
pub fn adapter_for(platform: Platform) -> &'static dyn ArticleAdapter {
    match platform {
        Platform::Wikipedia => &WikipediaAdapter,
        Platform::Grokipedia => &GrokipediaAdapter,
    }
}

/// Extract the node stream for `platform` from raw markup.
pub fn extract_nodes(platform: Platform, html: &str) -> Vec<ArticleNode> {
    adapter_for(platform).extract(html)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Collect an element's text content, separating text nodes with spaces.
/// The tree builder's normalization collapses any excess afterward.
pub(crate) fn element_text(el: &ElementRef) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}
