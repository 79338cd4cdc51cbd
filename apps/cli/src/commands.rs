//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use regsum_core::{
    LoadConfig, LoadStats, ProgressReporter, Section, SectionIndex, SilentProgress, load_index,
};
use regsum_shared::{AppConfig, SectionNumber, SourceFormat, init_config, load_config, load_config_from};
use regsum_textrank::{RankOptions, extract_keywords, sentence_count, summarize};
use tokio::io::AsyncReadExt;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// regsum: section-level summaries and keywords for regulatory documents.
#[derive(Parser)]
#[command(
    name = "regsum",
    version,
    about = "Summarize regulatory documents section by section and look sections up by number or keyword.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.regsum/regsum.toml.
    #[arg(long, global = true, env = "REGSUM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Where the document comes from; overrides `[source]` in the config.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct SourceArgs {
    /// Source document (markup or page-extracted text).
    #[arg(short, long, env = "REGSUM_SOURCE")]
    pub source: Option<PathBuf>,

    /// Source format: auto, xml, or page-text.
    #[arg(short, long)]
    pub format: Option<SourceFormat>,

    /// Sections ranked concurrently.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// List every section number in the document.
    List {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show one section's text, summary, and keyword.
    Show {
        /// Section number, e.g. 101.
        number: u32,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Find sections whose keyword matches, ignoring case.
    Search {
        /// Keyword to look up.
        keyword: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Summarize free text from a file or stdin.
    Summarize {
        /// Text file to read; stdin when omitted.
        file: Option<PathBuf>,

        /// Share of sentences to keep, in (0, 1]. Defaults to the configured
        /// summary length.
        #[arg(short, long)]
        ratio: Option<f64>,

        /// Also print this many ranked keywords.
        #[arg(short, long, default_value = "0")]
        keywords: usize,
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
        0 => "regsum=info",
        1 => "regsum=debug",
        _ => "regsum=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::List { source } => cmd_list(config_path, &source).await,
        Command::Show { number, source } => cmd_show(config_path, number, &source).await,
        Command::Search { keyword, source } => cmd_search(config_path, &keyword, &source).await,
        Command::Summarize {
            file,
            ratio,
            keywords,
        } => cmd_summarize(config_path, file.as_deref(), ratio, keywords).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(config_path).await,
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Merge flags over the config file into a pipeline config.
fn load_config_for(config: &AppConfig, args: &SourceArgs) -> Result<LoadConfig> {
    let path = args
        .source
        .clone()
        .or_else(|| config.source.path.as_ref().map(PathBuf::from))
        .ok_or_else(|| eyre!("no source document: pass --source or set source.path in the config"))?;

    let mut load = LoadConfig::from_app(config, path);
    if let Some(format) = args.format {
        load.format = format;
    }
    if let Some(workers) = args.workers {
        load.workers = workers;
    }
    Ok(load)
}

async fn build(config_path: Option<&Path>, args: &SourceArgs) -> Result<SectionIndex> {
    let config = resolve_config(config_path)?;
    let load = load_config_for(&config, args)?;

    info!(path = %load.path.display(), format = ?load.format, "loading document");

    let index = if args.json {
        load_index(&load, &SilentProgress).await?
    } else {
        load_index(&load, &CliProgress::new()).await?
    };
    Ok(index)
}

// ---------------------------------------------------------------------------
// Section commands
// ---------------------------------------------------------------------------

async fn cmd_list(config_path: Option<&Path>, args: &SourceArgs) -> Result<()> {
    let index = build(config_path, args).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&index.numbers())?);
        return Ok(());
    }

    for section in &index {
        println!("§ {:<8} {}", section.number().0, section.keyword());
    }
    println!();
    println!("  {} sections", index.len());
    Ok(())
}

async fn cmd_show(config_path: Option<&Path>, number: u32, args: &SourceArgs) -> Result<()> {
    let index = build(config_path, args).await?;

    match index.find_by_number(SectionNumber(number)) {
        Some(section) if args.json => println!("{}", serde_json::to_string_pretty(section)?),
        Some(section) => print!("{}", render_section(section)),
        None if args.json => println!("null"),
        None => println!("no section found"),
    }
    Ok(())
}

async fn cmd_search(config_path: Option<&Path>, keyword: &str, args: &SourceArgs) -> Result<()> {
    let index = build(config_path, args).await?;
    let matches = index.find_by_keyword(keyword);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("no section found");
        return Ok(());
    }
    for section in matches {
        print!("{}", render_section(section));
        println!();
    }
    Ok(())
}

fn render_section(section: &Section) -> String {
    let keyword = if section.keyword().is_empty() {
        "(none)"
    } else {
        section.keyword()
    };
    format!(
        "§ {}\n  Keyword: {keyword}\n  Summary: {}\n  Text:    {}\n",
        section.number(),
        section.summary(),
        section.raw_text(),
    )
}

// ---------------------------------------------------------------------------
// Free-text summarization
// ---------------------------------------------------------------------------

async fn cmd_summarize(
    config_path: Option<&Path>,
    file: Option<&Path>,
    ratio: Option<f64>,
    keywords: usize,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let opts = RankOptions::from(&config.ranking);

    let text = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("cannot read '{}': {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let ratio = resolve_ratio(ratio, &text, &opts)?;
    info!(ratio, bytes = text.len(), "summarizing");

    println!("{}", summarize(&text, ratio, &opts));

    if keywords > 0 {
        println!();
        for ranked in extract_keywords(&text, &opts).into_iter().take(keywords) {
            println!("  {:.4}  {}", ranked.score, ranked.term);
        }
    }
    Ok(())
}

/// An explicit ratio must lie in (0, 1]; otherwise aim for the configured sentence count.
fn resolve_ratio(ratio: Option<f64>, text: &str, opts: &RankOptions) -> Result<f64> {
    match ratio {
        Some(r) if r > 0.0 && r <= 1.0 => Ok(r),
        Some(r) => Err(eyre!("invalid ratio {r}: expected a value in (0, 1]")),
        None => {
            let n = sentence_count(text);
            Ok(if n == 0 {
                1.0
            } else {
                (opts.summary_sentences as f64 / n as f64).min(1.0)
            })
        }
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn section_built(&self, number: SectionNumber, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Ranking [{current}/{total}] § {number}"));
    }

    fn done(&self, stats: &LoadStats) {
        self.spinner.finish_and_clear();
        info!(
            adapter = %stats.adapter,
            paragraphs = stats.paragraphs,
            sections = stats.sections,
            "loaded in {:.1}s",
            stats.elapsed.as_secs_f64()
        );
    }
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_source_flags() {
        let cli = Cli::try_parse_from([
            "regsum", "-v", "show", "101", "--source", "part.txt", "--format", "page-text", "--json",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Show { number, source } => {
                assert_eq!(number, 101);
                assert_eq!(source.source, Some(PathBuf::from("part.txt")));
                assert_eq!(source.format, Some(SourceFormat::PageText));
                assert!(source.json);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        let parsed = Cli::try_parse_from(["regsum", "list", "--format", "pdf"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn flags_override_config_source() {
        let mut config = AppConfig::default();
        config.source.path = Some("from-config.xml".to_string());

        let from_config = load_config_for(&config, &SourceArgs::default()).expect("config path");
        assert_eq!(from_config.path, PathBuf::from("from-config.xml"));

        let args = SourceArgs {
            source: Some(PathBuf::from("flag.txt")),
            workers: Some(1),
            ..SourceArgs::default()
        };
        let from_flag = load_config_for(&config, &args).expect("flag path");
        assert_eq!(from_flag.path, PathBuf::from("flag.txt"));
        assert_eq!(from_flag.workers, 1);
    }

    #[test]
    fn missing_source_is_an_error() {
        assert!(load_config_for(&AppConfig::default(), &SourceArgs::default()).is_err());
    }

    #[test]
    fn ratio_defaults_to_configured_sentences() {
        let opts = RankOptions::default();
        let text = "One rule. Two rule. Three rule. Four rule.";
        assert_eq!(resolve_ratio(None, text, &opts).expect("ratio"), 0.5);
        assert_eq!(resolve_ratio(Some(0.25), text, &opts).expect("ratio"), 0.25);
        assert!(resolve_ratio(Some(0.0), text, &opts).is_err());
        assert!(resolve_ratio(Some(1.5), text, &opts).is_err());
    }
}
