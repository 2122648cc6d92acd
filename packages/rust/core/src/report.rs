//! Artifact writers.
//!
//! Every writer produces a plain file under the outputs directory:
//! parsed-article JSON, index-aligned reference-domain JSON, the aggregated
//! leaning CSV, and the unmapped-domains list.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use sourcelens_shared::{Article, BiasDistribution, Result, SourceLensError};

use crate::aggregate::RefsByIndex;

// ---------------------------------------------------------------------------
// Leaning CSV
// ---------------------------------------------------------------------------

/// Flat CSV row for the leaning report; the nested per-platform counts are
/// spelled out because the report's consumers expect fixed columns.
#[derive(Serialize)]
struct LeaningRecord<'a> {
    #[serde(rename = "Index")]
    index: usize,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Subcategory")]
    subcategory: &'a str,
    #[serde(rename = "Wikipedia_Left")]
    wikipedia_left: u32,
    #[serde(rename = "Wikipedia_Center")]
    wikipedia_center: u32,
    #[serde(rename = "Wikipedia_Right")]
    wikipedia_right: u32,
    #[serde(rename = "Wikipedia_Other")]
    wikipedia_other: u32,
    #[serde(rename = "Grokipedia_Left")]
    grokipedia_left: u32,
    #[serde(rename = "Grokipedia_Center")]
    grokipedia_center: u32,
    #[serde(rename = "Grokipedia_Right")]
    grokipedia_right: u32,
    #[serde(rename = "Grokipedia_Other")]
    grokipedia_other: u32,
}

impl<'a> From<&'a BiasDistribution> for LeaningRecord<'a> {
    fn from(dist: &'a BiasDistribution) -> Self {
        Self {
            index: dist.index,
            name: &dist.name,
            category: &dist.category,
            subcategory: &dist.subcategory,
            wikipedia_left: dist.wikipedia.left,
            wikipedia_center: dist.wikipedia.center,
            wikipedia_right: dist.wikipedia.right,
            wikipedia_other: dist.wikipedia.other,
            grokipedia_left: dist.grokipedia.left,
            grokipedia_center: dist.grokipedia.center,
            grokipedia_right: dist.grokipedia.right,
            grokipedia_other: dist.grokipedia.other,
        }
    }
}

/// Write the aggregated leaning table as CSV.
pub fn write_leaning_csv(path: &Path, rows: &[BiasDistribution]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| SourceLensError::Report(format!("{}: {e}", path.display())))?;

    for dist in rows {
        writer
            .serialize(LeaningRecord::from(dist))
            .map_err(|e| SourceLensError::Report(format!("{}: {e}", path.display())))?;
    }

    writer
        .flush()
        .map_err(|e| SourceLensError::io(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON artifacts
// ---------------------------------------------------------------------------

/// Write the parsed articles for one platform, ordered by index.
pub fn write_parsed_articles(path: &Path, articles: &BTreeMap<usize, Article>) -> Result<()> {
    let ordered: Vec<&Article> = articles.values().collect();
    write_json(path, &ordered)
}

/// Write the index-aligned normalized-domain lists for one platform:
/// one slot per source row, empty where that side has no references.
pub fn write_reference_domains(path: &Path, refs: &RefsByIndex, row_count: usize) -> Result<()> {
    let aligned: Vec<Vec<&str>> = (0..row_count)
        .map(|index| {
            refs.get(&index)
                .into_iter()
                .flatten()
                .filter_map(|r| r.domain.as_deref())
                .collect()
        })
        .collect();
    write_json(path, &aligned)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| SourceLensError::Report(format!("{}: {e}", path.display())))?;
    std::fs::write(path, json).map_err(|e| SourceLensError::io(path, e))
}

// ---------------------------------------------------------------------------
// Unmapped domains
// ---------------------------------------------------------------------------

/// Write the unmapped-domains list, one domain per line.
pub fn write_unmapped_domains(path: &Path, unmapped: &[String]) -> Result<()> {
    let mut content = unmapped.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    std::fs::write(path, content).map_err(|e| SourceLensError::io(path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
