//! Grokipedia article adapter.
//!
//! Structure:
//! - `h2` headings define top-level sections, `h3` subsections
//! - Content spans (`span.mb-4`) appear between headings as siblings
//! - References reside in `<div id="references">` as a flat `<ol>` list

use scraper::{ElementRef, Html, Selector};
use sourcelens_shared::{ArticleNode, Platform};

use super::{ArticleAdapter, element_text};

/// Extracts the node stream from Grokipedia article pages.
pub struct GrokipediaAdapter;

impl ArticleAdapter for GrokipediaAdapter {
    fn platform(&self) -> Platform {
        Platform::Grokipedia
    }

    fn extract(&self, html: &str) -> Vec<ArticleNode> {
        let doc = Html::parse_document(html);

        let node_sel = Selector::parse("h2, h3, span.mb-4").unwrap();
        let mut nodes = Vec::new();

        for el in doc.select(&node_sel) {
            if in_reference_container(&el) {
                continue;
            }
            match el.value().name() {
                "h2" => nodes.push(ArticleNode::Heading {
                    level: 2,
                    text: element_text(&el),
                }),
                "h3" => nodes.push(ArticleNode::Heading {
                    level: 3,
                    text: element_text(&el),
                }),
                _ => nodes.push(ArticleNode::Paragraph {
                    text: element_text(&el),
                }),
            }
        }

        // References live in their own container, appended after the body
        // stream; the tree builder keeps them document-scoped anyway.
        let entry_sel = Selector::parse("div#references ol > li").unwrap();
        let link_sel = Selector::parse("a[href]").unwrap();

        for li in doc.select(&entry_sel) {
            let href = li
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string);

            nodes.push(ArticleNode::Reference {
                href,
                text: element_text(&li),
            });
        }

        nodes
    }
}

/// True for elements inside the reference container.
fn in_reference_container(el: &ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().id() == Some("references"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
