//! End-to-end run: source list → parse both platforms → annotate → aggregate
//! → artifacts.
//!
//! Per-article and per-reference failures degrade locally (warn and
//! continue); only a missing source list aborts the run. The output table is
//! always complete and index-aligned.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use sourcelens_bias::{BiasClassifier, annotate_references};
use sourcelens_markup::{build_document, extract_nodes};
use sourcelens_shared::{Article, Platform, Result, RunPaths, SourceLensError, SourceRow};

use crate::aggregate::{self, RefsByIndex};
use crate::report;
use crate::sources;

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for reporting run status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each article is parsed and annotated.
    fn article_parsed(&self, platform: Platform, index: usize, current: usize, total: usize);
    /// Called when the run completes.
    fn done(&self, summary: &RunSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn article_parsed(&self, _platform: Platform, _index: usize, _current: usize, _total: usize) {}
    fn done(&self, _summary: &RunSummary) {}
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Result of one pipeline run.
#[derive(Debug)]
pub struct RunSummary {
    /// Number of source rows (== number of output rows).
    pub rows: usize,
    /// Articles parsed per platform.
    pub wikipedia_articles: usize,
    pub grokipedia_articles: usize,
    /// Total references classified across both platforms.
    pub references_classified: usize,
    /// Domains the bias table had no entry for, first-seen order.
    pub unmapped_domains: Vec<String>,
    /// False when the run fell back to the stub classifier.
    pub classifier_available: bool,
    /// When the run finished.
    pub completed_at: DateTime<Utc>,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full pipeline.
///
/// 1. Load the source list (fatal when absent)
/// 2. Load the bias table (degrades to the stub classifier)
/// 3. Parse and annotate each platform's raw pages
/// 4. Aggregate into one distribution row per source index
/// 5. Write artifacts
#[instrument(skip_all, fields(sources = %paths.sources_file.display()))]
pub fn run(paths: &RunPaths, progress: &dyn ProgressReporter) -> Result<RunSummary> {
    let start = Instant::now();

    progress.phase("Loading source list");
    let rows = sources::load_source_rows(&paths.sources_file)?;
    info!(rows = rows.len(), "source list loaded");

    progress.phase("Loading bias table");
    let classifier = BiasClassifier::load(&paths.bias_table_file);

    let mut unmapped_domains: Vec<String> = Vec::new();
    let mut seen_unmapped: HashSet<String> = HashSet::new();
    let mut collect_unmapped = |domains: Vec<String>| {
        for domain in domains {
            if seen_unmapped.insert(domain.clone()) {
                unmapped_domains.push(domain);
            }
        }
    };

    progress.phase("Parsing Wikipedia articles");
    let (wikipedia_articles, unmapped) =
        process_platform(Platform::Wikipedia, &rows, &paths.raw_dir, &classifier, progress);
    collect_unmapped(unmapped);

    progress.phase("Parsing Grokipedia articles");
    let (grokipedia_articles, unmapped) =
        process_platform(Platform::Grokipedia, &rows, &paths.raw_dir, &classifier, progress);
    collect_unmapped(unmapped);

    progress.phase("Aggregating bias distributions");
    let wikipedia_refs = refs_by_index(&wikipedia_articles);
    let grokipedia_refs = refs_by_index(&grokipedia_articles);
    let distributions = aggregate::aggregate(&rows, &wikipedia_refs, &grokipedia_refs);

    progress.phase("Writing artifacts");
    std::fs::create_dir_all(&paths.outputs_dir)
        .map_err(|e| SourceLensError::io(&paths.outputs_dir, e))?;

    report::write_parsed_articles(
        &paths.outputs_dir.join("wikipedia_parsed.json"),
        &wikipedia_articles,
    )?;
    report::write_parsed_articles(
        &paths.outputs_dir.join("grokipedia_parsed.json"),
        &grokipedia_articles,
    )?;
    report::write_reference_domains(
        &paths.outputs_dir.join("wikipedia_references.json"),
        &wikipedia_refs,
        rows.len(),
    )?;
    report::write_reference_domains(
        &paths.outputs_dir.join("grokipedia_references.json"),
        &grokipedia_refs,
        rows.len(),
    )?;
    report::write_leaning_csv(
        &paths.outputs_dir.join("political_leaning.csv"),
        &distributions,
    )?;
    report::write_unmapped_domains(
        &paths.outputs_dir.join("unmapped_domains.txt"),
        &unmapped_domains,
    )?;

    let references_classified = wikipedia_refs.values().map(Vec::len).sum::<usize>()
        + grokipedia_refs.values().map(Vec::len).sum::<usize>();

    if !classifier.is_available() {
        warn!("classifier was unavailable for this run; all counts fell into Other");
    }

    let summary = RunSummary {
        rows: rows.len(),
        wikipedia_articles: wikipedia_articles.len(),
        grokipedia_articles: grokipedia_articles.len(),
        references_classified,
        unmapped_domains,
        classifier_available: classifier.is_available(),
        completed_at: Utc::now(),
        elapsed: start.elapsed(),
    };

    progress.done(&summary);

    info!(
        rows = summary.rows,
        wikipedia_articles = summary.wikipedia_articles,
        grokipedia_articles = summary.grokipedia_articles,
        references = summary.references_classified,
        unmapped = summary.unmapped_domains.len(),
        elapsed_ms = summary.elapsed.as_millis(),
        "run complete"
    );

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Per-platform processing
// ---------------------------------------------------------------------------

/// Parse and annotate every available raw page for one platform.
///
/// A missing or unreadable page is a warning; its index is simply absent
/// from the returned map and contributes zero counts downstream.
fn process_platform(
    platform: Platform,
    rows: &[SourceRow],
    raw_dir: &Path,
    classifier: &BiasClassifier,
    progress: &dyn ProgressReporter,
) -> (BTreeMap<usize, Article>, Vec<String>) {
    let mut articles = BTreeMap::new();
    let mut unmapped = Vec::new();
    let total = rows.len();

    for (position, row) in rows.iter().enumerate() {
        let raw_path = raw_dir.join(format!("{platform}_raw_{}.html", row.index));

        let html = match std::fs::read_to_string(&raw_path) {
            Ok(html) => html,
            Err(e) => {
                warn!(
                    %platform,
                    index = row.index,
                    path = %raw_path.display(),
                    error = %e,
                    "raw page not readable, skipping index"
                );
                continue;
            }
        };

        let nodes = extract_nodes(platform, &html);
        let (root, mut references) = build_document(nodes);
        unmapped.extend(annotate_references(classifier, &mut references));

        debug!(
            %platform,
            index = row.index,
            sections = root.descendant_count(),
            references = references.len(),
            "article parsed"
        );
        progress.article_parsed(platform, row.index, position + 1, total);

        articles.insert(
            row.index,
            Article {
                platform,
                url: row.url_for(platform).to_string(),
                index: row.index,
                root,
                references,
            },
        );
    }

    (articles, unmapped)
}

/// Clone each article's annotated references into an index-keyed map.
fn refs_by_index(articles: &BTreeMap<usize, Article>) -> RefsByIndex {
    articles
        .iter()
        .map(|(index, article)| (*index, article.references.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures").join(name)
    }

    /// Stage a run directory: three source rows, Wikipedia pages for rows
    /// 0 and 1, a Grokipedia page for row 0 only, nothing for row 2.
    fn stage_run(dir: &Path) -> RunPaths {
        let raw_dir = dir.join("raw");
        let outputs_dir = dir.join("outputs");
        std::fs::create_dir_all(&raw_dir).unwrap();

        let wiki_html = std::fs::read_to_string(fixture("html/wikipedia.html")).unwrap();
        let grok_html = std::fs::read_to_string(fixture("html/grokipedia.html")).unwrap();
        std::fs::write(raw_dir.join("wikipedia_raw_0.html"), &wiki_html).unwrap();
        std::fs::write(raw_dir.join("wikipedia_raw_1.html"), &wiki_html).unwrap();
        std::fs::write(raw_dir.join("grokipedia_raw_0.html"), &grok_html).unwrap();

        RunPaths {
            sources_file: fixture("csv/sources.csv"),
            bias_table_file: fixture("csv/bias_table.csv"),
            raw_dir,
            outputs_dir,
        }
    }

    #[test]
    fn run_produces_complete_index_aligned_outputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = stage_run(dir.path());

        let summary = run(&paths, &SilentProgress).expect("run");

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.wikipedia_articles, 2);
        assert_eq!(summary.grokipedia_articles, 1);
        assert!(summary.classifier_available);
        // 2 Wikipedia pages x 3 refs + 1 Grokipedia page x 3 refs.
        assert_eq!(summary.references_classified, 9);

        let leaning =
            std::fs::read_to_string(paths.outputs_dir.join("political_leaning.csv")).unwrap();
        let lines: Vec<_> = leaning.lines().collect();
        assert_eq!(lines.len(), 4, "header plus one row per source index");

        // Row 2 has no raw pages on either side: all-zero counts, still present.
        assert!(lines[3].starts_with("2,Test Law,Law,Statute,0,0,0,0,0,0,0,0"));

        // Row 0: Wikipedia fixture cites CNN (Left), Fox News (Right), and a
        // linkless book (Other).
        assert!(lines[1].starts_with("0,Example Subject,Politician,Senator,1,0,1,1"));
    }

    #[test]
    fn run_writes_index_aligned_domain_lists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = stage_run(dir.path());

        run(&paths, &SilentProgress).expect("run");

        let wiki_domains: Vec<Vec<String>> = serde_json::from_str(
            &std::fs::read_to_string(paths.outputs_dir.join("wikipedia_references.json"))
                .unwrap(),
        )
        .unwrap();

        assert_eq!(wiki_domains.len(), 3);
        assert_eq!(wiki_domains[0], vec!["cnn.com", "foxnews.com"]);
        assert!(wiki_domains[2].is_empty());

        let grok_domains: Vec<Vec<String>> = serde_json::from_str(
            &std::fs::read_to_string(paths.outputs_dir.join("grokipedia_references.json"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(grok_domains[0], vec!["reuters.com", "cnn.com"]);
        assert!(grok_domains[1].is_empty());
    }

    #[test]
    fn run_degrades_without_bias_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut paths = stage_run(dir.path());
        paths.bias_table_file = dir.path().join("missing.csv");

        let summary = run(&paths, &SilentProgress).expect("run");

        assert!(!summary.classifier_available);
        assert!(summary.unmapped_domains.is_empty());

        let leaning =
            std::fs::read_to_string(paths.outputs_dir.join("political_leaning.csv")).unwrap();
        // Every classified reference fell into the Other columns.
        assert!(leaning.lines().nth(1).unwrap().ends_with("0,0,0,3,0,0,0,3"));
    }

    #[test]
    fn run_without_source_list_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut paths = stage_run(dir.path());
        paths.sources_file = dir.path().join("missing_sources.csv");

        assert!(run(&paths, &SilentProgress).is_err());
    }
}
