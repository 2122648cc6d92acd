//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use sourcelens_core::pipeline::{ProgressReporter, RunSummary};
use sourcelens_shared::{Platform, RunPaths, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// sourcelens — compare cited-source bias across encyclopedia platforms.
#[derive(Parser)]
#[command(
    name = "sourcelens",
    version,
    about = "Parse article pairs and aggregate cited-source bias distributions.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Platform selector for single-article commands.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum PlatformArg {
    Wikipedia,
    Grokipedia,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Wikipedia => Platform::Wikipedia,
            PlatformArg::Grokipedia => Platform::Grokipedia,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the full pipeline: parse, classify, aggregate, write artifacts.
    Run {
        /// Source list CSV (overrides config).
        #[arg(long)]
        sources: Option<PathBuf>,

        /// Bias table CSV (overrides config).
        #[arg(long)]
        bias_table: Option<PathBuf>,

        /// Directory of downloaded raw article pages (overrides config).
        #[arg(long)]
        raw_dir: Option<PathBuf>,

        /// Artifact output directory (overrides config).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Parse one raw article page and print its document model as JSON.
    Parse {
        /// Which platform's markup grammar to use.
        #[arg(value_enum)]
        platform: PlatformArg,

        /// Path to the raw HTML file.
        file: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "sourcelens=info",
        1 => "sourcelens=debug",
        _ => "sourcelens=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            sources,
            bias_table,
            raw_dir,
            out,
        } => run_pipeline(sources, bias_table, raw_dir, out),
        Command::Parse { platform, file } => parse_single(platform.into(), &file),
        Command::Config { action } => match action {
            ConfigAction::Init => {
                let path = init_config()?;
                println!("Wrote default config to {}", path.display());
                Ok(())
            }
            ConfigAction::Show => {
                let config = load_config()?;
                println!("{}", render_config(&config)?);
                Ok(())
            }
        },
    }
}

fn render_config(config: &sourcelens_shared::AppConfig) -> Result<String> {
    serde_json::to_string_pretty(config).map_err(|e| eyre!("config serialization failed: {e}"))
}

// ---------------------------------------------------------------------------
// `run` command
// ---------------------------------------------------------------------------

fn run_pipeline(
    sources: Option<PathBuf>,
    bias_table: Option<PathBuf>,
    raw_dir: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let config = load_config()?;
    let mut paths = RunPaths::from(&config);

    if let Some(sources) = sources {
        paths.sources_file = sources;
    }
    if let Some(bias_table) = bias_table {
        paths.bias_table_file = bias_table;
    }
    if let Some(raw_dir) = raw_dir {
        paths.raw_dir = raw_dir;
    }
    if let Some(out) = out {
        paths.outputs_dir = out;
    }

    info!(
        sources = %paths.sources_file.display(),
        raw_dir = %paths.raw_dir.display(),
        "starting run"
    );

    let progress = BarProgress::new();
    let summary = sourcelens_core::run(&paths, &progress)?;
    progress.finish();

    println!();
    println!(
        "Aggregated {} article pairs ({} Wikipedia / {} Grokipedia pages parsed).",
        summary.rows, summary.wikipedia_articles, summary.grokipedia_articles
    );
    println!(
        "Classified {} references; {} domains were not in the bias table.",
        summary.references_classified,
        summary.unmapped_domains.len()
    );
    if !summary.classifier_available {
        println!("Warning: bias table unavailable — every reference was counted as Other.");
    }
    println!(
        "Artifacts written to {} in {:.1?}.",
        paths.outputs_dir.display(),
        summary.elapsed
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// `parse` command
// ---------------------------------------------------------------------------

fn parse_single(platform: Platform, file: &std::path::Path) -> Result<()> {
    let html = std::fs::read_to_string(file)
        .map_err(|e| eyre!("failed to read {}: {e}", file.display()))?;

    let nodes = sourcelens_markup::extract_nodes(platform, &html);
    let (root, references) = sourcelens_markup::build_document(nodes);

    let doc = serde_json::json!({
        "platform": platform,
        "sections": root.children,
        "references": references,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);

    Ok(())
}

// ---------------------------------------------------------------------------
// Progress bar
// ---------------------------------------------------------------------------

/// Progress reporter backed by an indicatif spinner.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}").expect("valid template"),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for BarProgress {
    fn phase(&self, name: &str) {
        self.bar.set_message(name.to_string());
        self.bar.tick();
    }

    fn article_parsed(&self, platform: Platform, index: usize, current: usize, total: usize) {
        self.bar
            .set_message(format!("[{current}/{total}] {platform} article {index}"));
        self.bar.tick();
    }

    fn done(&self, _summary: &RunSummary) {}
}
