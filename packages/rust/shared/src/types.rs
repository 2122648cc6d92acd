//! Core domain types for the sourcelens pipeline.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// The two encyclopedia platforms a source row pairs up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Wikipedia,
    Grokipedia,
}

impl Platform {
    /// Lowercase name used in artifact file names and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Wikipedia => "wikipedia",
            Platform::Grokipedia => "grokipedia",
        }
    }

    /// Both platforms, in the order reports list them.
    pub fn all() -> [Platform; 2] {
        [Platform::Wikipedia, Platform::Grokipedia]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SourceRow
// ---------------------------------------------------------------------------

/// One requested article pair from the source list.
///
/// `index` is the 0-based row position and the stable join key linking every
/// per-platform artifact to the final aggregated table. It is never reused
/// or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRow {
    /// Stable 0-based join key.
    pub index: usize,
    /// Article name (e.g., a person or institution).
    pub name: String,
    /// Coarse category (e.g., Politician, Institution, Law).
    pub category: String,
    /// Finer subcategory, possibly empty.
    pub subcategory: String,
    /// Wikipedia article URL.
    pub wikipedia_url: String,
    /// Grokipedia article URL.
    pub grokipedia_url: String,
}

impl SourceRow {
    /// The article URL for the given platform side of this pair.
    pub fn url_for(&self, platform: Platform) -> &str {
        match platform {
            Platform::Wikipedia => &self.wikipedia_url,
            Platform::Grokipedia => &self.grokipedia_url,
        }
    }
}

// ---------------------------------------------------------------------------
// ArticleNode
// ---------------------------------------------------------------------------

/// One event in the document-ordered node stream an adapter extracts
/// from raw article markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ArticleNode {
    /// A section heading at the given level (2 = top-level section).
    Heading { level: u8, text: String },
    /// A block of body text under the currently open heading.
    Paragraph { text: String },
    /// One cited-source entry; `href` is absent when the citation carries
    /// no external link.
    Reference {
        href: Option<String>,
        text: String,
    },
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// A titled node in an article's heading-derived tree.
///
/// The tree is rooted at an implicit document root (`title` empty,
/// `depth` 0); ownership makes the nesting acyclic by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Normalized heading text; empty for the root and the preamble.
    pub title: String,
    /// Tree depth from the implicit root (root children are 1).
    pub depth: u8,
    /// Ordered body paragraphs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paragraphs: Vec<String>,
    /// Ordered child sections.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Section>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>, depth: u8) -> Self {
        Self {
            title: title.into(),
            depth,
            paragraphs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Total number of sections in this subtree, excluding `self`.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Bias categories and counts
// ---------------------------------------------------------------------------

/// Four-way political-bias classification assigned to every reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiasCategory {
    Left,
    Center,
    Right,
    /// Unknown code, missing domain, or lookup miss.
    #[default]
    Other,
}

impl std::fmt::Display for BiasCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BiasCategory::Left => "Left",
            BiasCategory::Center => "Center",
            BiasCategory::Right => "Right",
            BiasCategory::Other => "Other",
        };
        f.write_str(s)
    }
}

/// Per-category reference tallies for one platform side of a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasCounts {
    pub left: u32,
    pub center: u32,
    pub right: u32,
    pub other: u32,
}

impl BiasCounts {
    /// Record one reference with the given category.
    pub fn record(&mut self, category: BiasCategory) {
        match category {
            BiasCategory::Left => self.left += 1,
            BiasCategory::Center => self.center += 1,
            BiasCategory::Right => self.right += 1,
            BiasCategory::Other => self.other += 1,
        }
    }

    /// Sum of all four counts.
    pub fn total(&self) -> u32 {
        self.left + self.center + self.right + self.other
    }
}

// ---------------------------------------------------------------------------
// Reference
// ---------------------------------------------------------------------------

/// One cited source extracted from an article.
///
/// Built with `bias` defaulting to [`BiasCategory::Other`], so the category
/// is never unset; annotation overwrites `domain`, `bias`, and `factuality`
/// in place after the document is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Raw cited URL as it appeared in the markup, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Normalized citation text.
    pub text: String,
    /// Canonical domain root, absent when no network location is extractable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Bias classification of the domain.
    pub bias: BiasCategory,
    /// Factuality tier from the bias table, carried through unaggregated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factuality: Option<String>,
}

impl Reference {
    /// Create an unannotated reference.
    pub fn new(url: Option<String>, text: impl Into<String>) -> Self {
        Self {
            url,
            text: text.into(),
            domain: None,
            bias: BiasCategory::Other,
            factuality: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

/// A fully parsed article: section tree plus document-scoped references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Which platform the raw markup came from.
    pub platform: Platform,
    /// The article URL from the source list.
    pub url: String,
    /// Source-row join key.
    pub index: usize,
    /// Implicit document root of the section tree.
    pub root: Section,
    /// Flat reference list in order of first appearance, not deduplicated.
    pub references: Vec<Reference>,
}

// ---------------------------------------------------------------------------
// BiasDistribution
// ---------------------------------------------------------------------------

/// One aggregated output row: identity fields from the source row plus
/// per-platform bias tallies. Exactly one row exists per source index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasDistribution {
    pub index: usize,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub wikipedia: BiasCounts,
    pub grokipedia: BiasCounts,
}
