//! Source list loading.
//!
//! The source list is the one input whose absence is fatal to a run: every
//! downstream artifact is index-aligned to its rows.

use std::path::Path;

use serde::Deserialize;

use sourcelens_shared::{Result, SourceLensError, SourceRow};

/// CSV row shape of the source list.
#[derive(Debug, Deserialize)]
struct SourceRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Subcategory", default)]
    subcategory: String,
    #[serde(rename = "Wikipedia_URL")]
    wikipedia_url: String,
    #[serde(rename = "Grokipedia_URL")]
    grokipedia_url: String,
}

/// Load the requested article pairs. Row position becomes the stable
/// 0-based index joining all per-platform artifacts.
pub fn load_source_rows(path: &Path) -> Result<Vec<SourceRow>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| SourceLensError::Sources(format!("{}: {e}", path.display())))?;

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<SourceRecord>().enumerate() {
        let record =
            record.map_err(|e| SourceLensError::Sources(format!("{}: {e}", path.display())))?;

        rows.push(SourceRow {
            index,
            name: record.name,
            category: record.category,
            subcategory: record.subcategory,
            wikipedia_url: record.wikipedia_url,
            grokipedia_url: record.grokipedia_url,
        });
    }

    Ok(rows)
}
