//! The domain → bias/factuality lookup table.
//!
//! Loaded once per run from a CSV with `source,bias,factual_reporting`
//! columns. Keys are canonicalized through [`normalize_domain`] so the table
//! joins on the same domain-root key the pipeline produces for references.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use sourcelens_shared::{Result, SourceLensError};

use crate::domain::normalize_domain;

/// One table entry. `lookup` returning `Option<&BiasRecord>` keeps a miss
/// distinguishable from an entry with an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiasRecord {
    /// Raw bias code as published (trimmed, lowercased at load).
    pub bias_code: String,
    /// Factuality tier, absent when the column is empty.
    pub factuality: Option<String>,
}

/// CSV row shape of the bias database.
#[derive(Debug, Deserialize)]
struct TableRow {
    source: String,
    #[serde(default)]
    bias: String,
    #[serde(default)]
    factual_reporting: Option<String>,
}

/// Read-only domain → bias mapping shared by all classification calls.
#[derive(Debug, Default)]
pub struct BiasTable {
    entries: HashMap<String, BiasRecord>,
}

impl BiasTable {
    /// Load the table from a CSV file. Any read or row error fails the load;
    /// the caller decides whether to degrade (see `BiasClassifier::load`).
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| SourceLensError::Table(format!("{}: {e}", path.display())))?;

        let mut entries = HashMap::new();
        for row in reader.deserialize::<TableRow>() {
            let row =
                row.map_err(|e| SourceLensError::Table(format!("{}: {e}", path.display())))?;

            let key = normalize_domain(&row.source);
            if key.is_empty() {
                warn!(source = %row.source, "bias table row has no usable domain, skipping");
                continue;
            }

            entries.insert(
                key,
                BiasRecord {
                    bias_code: row.bias.trim().to_ascii_lowercase(),
                    factuality: row
                        .factual_reporting
                        .map(|f| f.trim().to_string())
                        .filter(|f| !f.is_empty()),
                },
            );
        }

        Ok(Self { entries })
    }

    /// Build a table from pre-normalized entries (test and tooling helper).
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, BiasRecord)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Look up a canonical domain root. `None` means the table has no entry.
    pub fn lookup(&self, domain: &str) -> Option<&BiasRecord> {
        self.entries.get(domain)
    }

    /// Number of mapped domains.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
