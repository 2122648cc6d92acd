//! Four-way bias classification of normalized domains.
//!
//! The classifier wraps an optional [`BiasTable`]: when the table fails to
//! load it degrades to a stub that classifies every domain `Other` and flags
//! itself unavailable, so a missing database is a warning, not a failure.

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use sourcelens_shared::{BiasCategory, Reference};

use crate::domain::normalize_domain;
use crate::table::BiasTable;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Result of classifying one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub category: BiasCategory,
    pub factuality: Option<String>,
}

/// Map a raw bias code to the four-way scheme. Unknown codes are `Other`.
pub fn category_from_code(code: &str) -> BiasCategory {
    match code.trim().to_ascii_lowercase().as_str() {
        "left" | "left-center" => BiasCategory::Left,
        "center" | "neutral" | "least-biased" => BiasCategory::Center,
        "right" | "right-center" => BiasCategory::Right,
        _ => BiasCategory::Other,
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Load-once domain classifier shared by a whole run.
#[derive(Debug, Default)]
pub struct BiasClassifier {
    table: Option<BiasTable>,
}

impl BiasClassifier {
    /// Wrap a loaded table.
    pub fn from_table(table: BiasTable) -> Self {
        Self { table: Some(table) }
    }

    /// The degraded stub: classifies everything `Other`.
    pub fn unavailable() -> Self {
        Self { table: None }
    }

    /// Load the table, degrading to the stub on any failure.
    pub fn load(path: &Path) -> Self {
        match BiasTable::load(path) {
            Ok(table) => {
                info!(domains = table.len(), path = %path.display(), "bias table loaded");
                Self::from_table(table)
            }
            Err(e) => {
                warn!(error = %e, "bias table unavailable, every domain will classify as Other");
                Self::unavailable()
            }
        }
    }

    /// False when the classifier degraded to the stub.
    pub fn is_available(&self) -> bool {
        self.table.is_some()
    }

    /// Classify one canonical domain root.
    pub fn classify(&self, domain: &str) -> Classification {
        self.classify_tracked(domain).0
    }

    /// Classify, also reporting whether the loaded table missed the domain.
    /// The stub never reports a miss — with no table, "unmapped" has no
    /// meaning.
    fn classify_tracked(&self, domain: &str) -> (Classification, bool) {
        let Some(table) = &self.table else {
            return (Classification::default(), false);
        };

        match table.lookup(domain) {
            Some(record) => (
                Classification {
                    category: category_from_code(&record.bias_code),
                    factuality: record.factuality.clone(),
                },
                false,
            ),
            None => (Classification::default(), true),
        }
    }
}

// ---------------------------------------------------------------------------
// Reference annotation
// ---------------------------------------------------------------------------

/// Annotate references in place with their normalized domain, bias category,
/// and factuality tier.
///
/// Returns the unmapped-domains list (first-seen order, deduplicated) as an
/// explicit value so callers can inspect or discard it. References with no
/// extractable domain classify `Other` and contribute nothing to the list.
pub fn annotate_references(
    classifier: &BiasClassifier,
    references: &mut [Reference],
) -> Vec<String> {
    let mut unmapped = Vec::new();
    let mut seen = HashSet::new();

    for reference in references.iter_mut() {
        let domain = reference
            .url
            .as_deref()
            .map(normalize_domain)
            .filter(|d| !d.is_empty());

        match &domain {
            Some(domain_str) => {
                let (classification, miss) = classifier.classify_tracked(domain_str);
                reference.bias = classification.category;
                reference.factuality = classification.factuality;
                if miss && seen.insert(domain_str.clone()) {
                    unmapped.push(domain_str.clone());
                }
            }
            None => {
                reference.bias = BiasCategory::Other;
                reference.factuality = None;
            }
        }

        reference.domain = domain;
    }

    unmapped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::BiasRecord;

    fn record(code: &str, factuality: Option<&str>) -> BiasRecord {
        BiasRecord {
            bias_code: code.into(),
            factuality: factuality.map(String::from),
        }
    }

    fn test_classifier() -> BiasClassifier {
        BiasClassifier::from_table(BiasTable::from_entries([
            ("cnn.com".to_string(), record("left-center", Some("high"))),
            ("foxnews.com".to_string(), record("right", Some("mixed"))),
            ("reuters.com".to_string(), record("least-biased", Some("very high"))),
            ("oddsite.example".to_string(), record("satire", None)),
        ]))
    }

    #[test]
    fn code_mapping_is_fixed() {
        assert_eq!(category_from_code("left"), BiasCategory::Left);
        assert_eq!(category_from_code("left-center"), BiasCategory::Left);
        assert_eq!(category_from_code("center"), BiasCategory::Center);
        assert_eq!(category_from_code("neutral"), BiasCategory::Center);
        assert_eq!(category_from_code("least-biased"), BiasCategory::Center);
        assert_eq!(category_from_code("right"), BiasCategory::Right);
        assert_eq!(category_from_code("right-center"), BiasCategory::Right);
        assert_eq!(category_from_code("satire"), BiasCategory::Other);
        assert_eq!(category_from_code(""), BiasCategory::Other);
        assert_eq!(category_from_code("  Left  "), BiasCategory::Left);
    }

    #[test]
    fn classify_known_domain() {
        let classifier = test_classifier();
        let result = classifier.classify("cnn.com");
        assert_eq!(result.category, BiasCategory::Left);
        assert_eq!(result.factuality.as_deref(), Some("high"));
    }

    #[test]
    fn classify_miss_yields_other() {
        let classifier = test_classifier();
        let result = classifier.classify("unknown-domain.example");
        assert_eq!(result.category, BiasCategory::Other);
        assert!(result.factuality.is_none());
    }

    #[test]
    fn stub_classifier_flags_unavailable() {
        let classifier = BiasClassifier::unavailable();
        assert!(!classifier.is_available());
        assert_eq!(classifier.classify("cnn.com").category, BiasCategory::Other);
    }

    #[test]
    fn load_missing_table_degrades_to_stub() {
        let classifier = BiasClassifier::load(std::path::Path::new("no/such/table.csv"));
        assert!(!classifier.is_available());
    }

    #[test]
    fn annotate_sets_domain_bias_and_factuality() {
        let classifier = test_classifier();
        let mut refs = vec![
            Reference::new(Some("https://www.cnn.com/2020/story".into()), "cite a"),
            Reference::new(Some("https://www.foxnews.com/us/report".into()), "cite b"),
            Reference::new(None, "offline book"),
        ];

        let unmapped = annotate_references(&classifier, &mut refs);

        assert!(unmapped.is_empty());
        assert_eq!(refs[0].domain.as_deref(), Some("cnn.com"));
        assert_eq!(refs[0].bias, BiasCategory::Left);
        assert_eq!(refs[0].factuality.as_deref(), Some("high"));
        assert_eq!(refs[1].bias, BiasCategory::Right);
        assert!(refs[2].domain.is_none());
        assert_eq!(refs[2].bias, BiasCategory::Other);
    }

    #[test]
    fn annotate_collects_unmapped_first_seen_once() {
        let classifier = test_classifier();
        let mut refs = vec![
            Reference::new(Some("https://unknown-domain.example/a".into()), "x"),
            Reference::new(Some("https://www.cnn.com/b".into()), "y"),
            Reference::new(Some("https://unknown-domain.example/c".into()), "z"),
            Reference::new(Some("https://second-unknown.example/d".into()), "w"),
        ];

        let unmapped = annotate_references(&classifier, &mut refs);

        assert_eq!(unmapped, vec!["unknown-domain.example", "second-unknown.example"]);
        assert_eq!(refs[0].bias, BiasCategory::Other);
        // Repeated citations still classify; only the list deduplicates.
        assert_eq!(refs[2].bias, BiasCategory::Other);
    }

    #[test]
    fn annotate_with_stub_leaves_unmapped_empty() {
        let classifier = BiasClassifier::unavailable();
        let mut refs = vec![Reference::new(Some("https://cnn.com/a".into()), "cite")];

        let unmapped = annotate_references(&classifier, &mut refs);

        assert!(unmapped.is_empty());
        assert_eq!(refs[0].domain.as_deref(), Some("cnn.com"));
        assert_eq!(refs[0].bias, BiasCategory::Other);
    }

    #[test]
    fn unknown_code_in_table_still_classifies_other_without_unmapped() {
        let classifier = test_classifier();
        let mut refs = vec![Reference::new(Some("https://oddsite.example/p".into()), "cite")];

        let unmapped = annotate_references(&classifier, &mut refs);

        // Mapped domain with an unrecognized code: Other, but not "unmapped".
        assert!(unmapped.is_empty());
        assert_eq!(refs[0].bias, BiasCategory::Other);
    }
}
