//! Document tree construction from a flat, document-ordered node stream.
//!
//! The builder keeps an explicit stack of open sections keyed by heading
//! level, so the tree shape is a direct function of the stream and trivially
//! serializable afterward.

use sourcelens_shared::{ArticleNode, Reference, Section};

use crate::normalize::normalize;

/// Build a section tree and a flat reference list from a node stream.
///
/// - A heading closes every open section at its level or deeper, then opens
///   a child of the nearest remaining ancestor. Level gaps attach to that
///   ancestor directly; no placeholder sections are synthesized.
/// - Paragraph text preceding any heading accumulates in an untitled
///   preamble section kept as the first root child.
/// - References are document-scoped and collected independently of nesting.
///
/// An empty or malformed stream yields an empty root and no references.
pub fn build_document<I>(nodes: I) -> (Section, Vec<Reference>)
where
    I: IntoIterator<Item = ArticleNode>,
{
    let mut builder = TreeBuilder::new();
    for node in nodes {
        builder.push(node);
    }
    builder.finish()
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// A section still accepting content, tagged with its heading level.
struct OpenSection {
    level: u8,
    section: Section,
}

struct TreeBuilder {
    root: Section,
    preamble: Option<Section>,
    stack: Vec<OpenSection>,
    references: Vec<Reference>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            root: Section::new("", 0),
            preamble: None,
            stack: Vec::new(),
            references: Vec::new(),
        }
    }

    fn push(&mut self, node: ArticleNode) {
        match node {
            ArticleNode::Heading { level, text } => self.open_section(level, &text),
            ArticleNode::Paragraph { text } => self.push_paragraph(&text),
            ArticleNode::Reference { href, text } => {
                self.references.push(Reference::new(href, normalize(&text)));
            }
        }
    }

    fn open_section(&mut self, level: u8, text: &str) {
        while self.stack.last().is_some_and(|open| open.level >= level) {
            self.close_top();
        }

        let depth = self.stack.len() as u8 + 1;
        self.stack.push(OpenSection {
            level,
            section: Section::new(normalize(text), depth),
        });
    }

    fn push_paragraph(&mut self, text: &str) {
        let text = normalize(text);
        if text.is_empty() {
            return;
        }

        match self.stack.last_mut() {
            Some(open) => open.section.paragraphs.push(text),
            // Text before the first heading goes to the preamble.
            None => self
                .preamble
                .get_or_insert_with(|| Section::new("", 1))
                .paragraphs
                .push(text),
        }
    }

    /// Close the topmost open section, attaching it to its parent.
    fn close_top(&mut self) {
        if let Some(open) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.section.children.push(open.section),
                None => self.root.children.push(open.section),
            }
        }
    }

    fn finish(mut self) -> (Section, Vec<Reference>) {
        while !self.stack.is_empty() {
            self.close_top();
        }
        if let Some(preamble) = self.preamble.take() {
            self.root.children.insert(0, preamble);
        }
        (self.root, self.references)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, text: &str) -> ArticleNode {
        ArticleNode::Heading {
            level,
            text: text.into(),
        }
    }

    fn paragraph(text: &str) -> ArticleNode {
        ArticleNode::Paragraph { text: text.into() }
    }

    fn reference(href: Option<&str>, text: &str) -> ArticleNode {
        ArticleNode::Reference {
            href: href.map(String::from),
            text: text.into(),
        }
    }

    #[test]
    fn nested_sections_from_heading_levels() {
        let (root, refs) = build_document(vec![
            heading(2, "Early life"),
            paragraph("x"),
            heading(3, "Childhood"),
            paragraph("y"),
        ]);

        assert!(refs.is_empty());
        assert_eq!(root.children.len(), 1);

        let early = &root.children[0];
        assert_eq!(early.title, "Early life");
        assert_eq!(early.depth, 1);
        assert_eq!(early.paragraphs, vec!["x"]);
        assert_eq!(early.children.len(), 1);

        let childhood = &early.children[0];
        assert_eq!(childhood.title, "Childhood");
        assert_eq!(childhood.depth, 2);
        assert_eq!(childhood.paragraphs, vec!["y"]);
        assert!(childhood.children.is_empty());
    }

    #[test]
    fn sibling_headings_close_previous_section() {
        let (root, _) = build_document(vec![
            heading(2, "Career"),
            paragraph("a"),
            heading(2, "Legacy"),
            paragraph("b"),
        ]);

        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].title, "Career");
        assert_eq!(root.children[1].title, "Legacy");
        assert_eq!(root.children[1].paragraphs, vec!["b"]);
    }

    #[test]
    fn level_gap_attaches_to_nearest_open_ancestor() {
        let (root, _) = build_document(vec![
            heading(2, "Business"),
            heading(4, "Licensing"),
            paragraph("deal"),
        ]);

        let business = &root.children[0];
        assert_eq!(business.children.len(), 1);
        let licensing = &business.children[0];
        assert_eq!(licensing.title, "Licensing");
        // No placeholder level-3 section in between.
        assert_eq!(licensing.depth, 2);
        assert_eq!(licensing.paragraphs, vec!["deal"]);
    }

    #[test]
    fn subsection_without_parent_becomes_root_child() {
        let (root, _) = build_document(vec![heading(3, "Orphan"), paragraph("p")]);

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].title, "Orphan");
        assert_eq!(root.children[0].depth, 1);
    }

    #[test]
    fn preamble_text_is_first_root_child() {
        let (root, _) = build_document(vec![
            paragraph("lead sentence"),
            heading(2, "History"),
            paragraph("body"),
        ]);

        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].title, "");
        assert_eq!(root.children[0].paragraphs, vec!["lead sentence"]);
        assert_eq!(root.children[1].title, "History");
    }

    #[test]
    fn no_preamble_section_without_leading_text() {
        let (root, _) = build_document(vec![heading(2, "Only"), paragraph("p")]);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].title, "Only");
    }

    #[test]
    fn references_are_document_scoped_and_ordered() {
        let (_, refs) = build_document(vec![
            heading(2, "Body"),
            reference(Some("https://cnn.com/a"), "First&nbsp;cite"),
            heading(3, "Sub"),
            reference(None, "Second cite"),
            reference(Some("https://cnn.com/a"), "First cite"),
        ]);

        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].url.as_deref(), Some("https://cnn.com/a"));
        assert_eq!(refs[0].text, "First cite");
        assert!(refs[1].url.is_none());
        // Repeated citations are kept, not deduplicated.
        assert_eq!(refs[2].url, refs[0].url);
    }

    #[test]
    fn titles_and_paragraphs_are_normalized() {
        let (root, _) = build_document(vec![
            heading(2, "Early&nbsp;life"),
            paragraph("Text with citation.[12]"),
        ]);

        assert_eq!(root.children[0].title, "Early life");
        assert_eq!(root.children[0].paragraphs, vec!["Text with citation."]);
    }

    #[test]
    fn paragraph_of_only_citation_markers_is_dropped() {
        let (root, _) = build_document(vec![heading(2, "S"), paragraph("[1][2]")]);
        assert!(root.children[0].paragraphs.is_empty());
    }

    #[test]
    fn empty_stream_yields_empty_document() {
        let (root, refs) = build_document(vec![]);
        assert!(root.children.is_empty());
        assert!(root.paragraphs.is_empty());
        assert!(refs.is_empty());
    }
}
