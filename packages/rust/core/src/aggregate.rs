//! Per-pair bias aggregation.
//!
//! Joins the two platforms' annotated reference lists against the source
//! rows into one distribution row per index. The join is index-stable:
//! every source row yields exactly one output row, in source order.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use sourcelens_shared::{BiasCounts, BiasDistribution, Platform, Reference, SourceRow};

/// Annotated references keyed by source-row index.
pub type RefsByIndex = BTreeMap<usize, Vec<Reference>>;

/// Aggregate both platforms' reference lists into distribution rows.
///
/// A missing index on either side contributes zero counts, never a dropped
/// row. Map entries whose index is absent from the source rows are dropped
/// with a warning. Counts are tallied without deduplication — repeated
/// citations of one domain count each time, reflecting citation frequency.
pub fn aggregate(
    rows: &[SourceRow],
    wikipedia_refs: &RefsByIndex,
    grokipedia_refs: &RefsByIndex,
) -> Vec<BiasDistribution> {
    warn_mismatched_indices(rows, wikipedia_refs, Platform::Wikipedia);
    warn_mismatched_indices(rows, grokipedia_refs, Platform::Grokipedia);

    rows.iter()
        .map(|row| BiasDistribution {
            index: row.index,
            name: row.name.clone(),
            category: row.category.clone(),
            subcategory: row.subcategory.clone(),
            wikipedia: tally(wikipedia_refs.get(&row.index)),
            grokipedia: tally(grokipedia_refs.get(&row.index)),
        })
        .collect()
}

/// Count one side's references by annotated category.
fn tally(references: Option<&Vec<Reference>>) -> BiasCounts {
    let mut counts = BiasCounts::default();
    for reference in references.into_iter().flatten() {
        counts.record(reference.bias);
    }
    counts
}

fn warn_mismatched_indices(rows: &[SourceRow], refs: &RefsByIndex, platform: Platform) {
    let known: BTreeSet<usize> = rows.iter().map(|r| r.index).collect();
    for index in refs.keys().filter(|i| !known.contains(i)) {
        warn!(
            platform = %platform,
            index,
            "reference list index has no source row, dropping its entries"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
