//! Wikipedia article adapter.
//!
//! Structure:
//! - Main content in `<div class="mw-content-container">`
//! - Headings wrapped in `<div class="mw-heading mw-heading2|3|4">`
//! - Body text in `<p>` siblings between headings
//! - Citations in inline `<span class="reference-text">` entries whose
//!   external link is `<a class="external text" rel="nofollow">`

use scraper::{ElementRef, Html, Selector};
use sourcelens_shared::{ArticleNode, Platform};
use tracing::warn;

use super::{ArticleAdapter, element_text};

/// Extracts the node stream from Wikipedia article pages.
pub struct WikipediaAdapter;

impl ArticleAdapter for WikipediaAdapter {
    fn platform(&self) -> Platform {
        Platform::Wikipedia
    }

    fn extract(&self, html: &str) -> Vec<ArticleNode> {
        let doc = Html::parse_document(html);

        let container_sel = Selector::parse("div.mw-content-container").unwrap();
        let scope = match doc.select(&container_sel).next() {
            Some(container) => container,
            None => {
                warn!("mw-content-container not found, scanning full document");
                doc.root_element()
            }
        };

        let node_sel = Selector::parse("div.mw-heading, p, span.reference-text").unwrap();
        let mut nodes = Vec::new();

        for el in scope.select(&node_sel) {
            match el.value().name() {
                "div" => {
                    if let Some(node) = heading_from_wrapper(&el) {
                        nodes.push(node);
                    }
                }
                "p" => {
                    if in_excluded_context(&el) {
                        continue;
                    }
                    nodes.push(ArticleNode::Paragraph {
                        text: element_text(&el),
                    });
                }
                _ => nodes.push(reference_from_span(&el)),
            }
        }

        nodes
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read the heading level from a `mw-heading<N>` wrapper and the title text
/// from the heading element inside it.
fn heading_from_wrapper(wrapper: &ElementRef) -> Option<ArticleNode> {
    let level = wrapper.value().classes().find_map(|class| match class {
        "mw-heading2" => Some(2),
        "mw-heading3" => Some(3),
        "mw-heading4" => Some(4),
        _ => None,
    })?;

    let heading_sel = Selector::parse("h2, h3, h4").unwrap();
    let heading = wrapper.select(&heading_sel).next()?;

    Some(ArticleNode::Heading {
        level,
        text: element_text(&heading),
    })
}

/// True for paragraphs inside tables (infoboxes), reference lists, or
/// citation spans — none of which are article body text.
fn in_excluded_context(el: &ElementRef) -> bool {
    el.ancestors().filter_map(ElementRef::wrap).any(|ancestor| {
        let v = ancestor.value();
        match v.name() {
            "table" => true,
            "ol" => v.classes().any(|c| c == "references"),
            "span" => v.classes().any(|c| c == "reference-text"),
            _ => false,
        }
    })
}

/// Build a reference node from a `span.reference-text` citation entry.
fn reference_from_span(span: &ElementRef) -> ArticleNode {
    let link_sel = Selector::parse(r#"a.external.text[rel="nofollow"]"#).unwrap();
    let href = span
        .select(&link_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string);

    ArticleNode::Reference {
        href,
        text: element_text(span),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
