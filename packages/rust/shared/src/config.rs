//! Application configuration for regsum.
//!
//! User config lives at `~/.regsum/regsum.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RegSumError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "regsum.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".regsum";

// ---------------------------------------------------------------------------
// Config structs (matching regsum.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Source document settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Ranking parameters for summaries and keywords.
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Index build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Which document adapter reads the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// Sniff the content (markup if it opens with `<`).
    #[default]
    Auto,
    /// Tree-structured markup with `SECTION`/`SECTNO`/`P` elements.
    Xml,
    /// Page-extracted text, pages separated by form feeds.
    PageText,
}

impl std::str::FromStr for SourceFormat {
    type Err = RegSumError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "xml" => Ok(Self::Xml),
            "page-text" => Ok(Self::PageText),
            other => Err(RegSumError::config(format!(
                "unknown source format '{other}': expected 'auto', 'xml', or 'page-text'"
            ))),
        }
    }
}

/// `[source]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Default document to load when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Adapter selection.
    #[serde(default)]
    pub format: SourceFormat,
}

/// `[ranking]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// PageRank damping factor.
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Convergence tolerance on the largest per-node score change.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration cap for power iteration.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Target summary length per section, in sentences.
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,

    /// Co-occurrence window for the keyword graph, in tokens.
    #[serde(default = "default_keyword_window")]
    pub keyword_window: usize,

    /// Share of ranked terms kept as keyword candidates.
    #[serde(default = "default_keyword_ratio")]
    pub keyword_ratio: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            summary_sentences: default_summary_sentences(),
            keyword_window: default_keyword_window(),
            keyword_ratio: default_keyword_ratio(),
        }
    }
}

impl RankingConfig {
    /// Reject parameter combinations the rankers cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(RegSumError::config(format!(
                "ranking.damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if !(self.tolerance > 0.0) {
            return Err(RegSumError::config("ranking.tolerance must be positive"));
        }
        if self.max_iterations == 0 {
            return Err(RegSumError::config("ranking.max_iterations must be at least 1"));
        }
        if self.summary_sentences == 0 {
            return Err(RegSumError::config(
                "ranking.summary_sentences must be at least 1",
            ));
        }
        if !(2..=5).contains(&self.keyword_window) {
            return Err(RegSumError::config(format!(
                "ranking.keyword_window must be between 2 and 5, got {}",
                self.keyword_window
            )));
        }
        if !(self.keyword_ratio > 0.0 && self.keyword_ratio <= 1.0) {
            return Err(RegSumError::config(format!(
                "ranking.keyword_ratio must be in (0, 1], got {}",
                self.keyword_ratio
            )));
        }
        Ok(())
    }
}

fn default_damping() -> f64 {
    0.85
}
fn default_tolerance() -> f64 {
    1e-6
}
fn default_max_iterations() -> usize {
    100
}
fn default_summary_sentences() -> usize {
    2
}
fn default_keyword_window() -> usize {
    2
}
fn default_keyword_ratio() -> f64 {
    0.2
}

/// `[build]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Sections built concurrently during index construction.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Time budget for the whole build's convergence loops; 0 disables it.
    #[serde(default)]
    pub deadline_ms: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            deadline_ms: 0,
        }
    }
}

fn default_workers() -> usize {
    4
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.regsum/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| RegSumError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.regsum/regsum.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| RegSumError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| RegSumError::config(format!("failed to parse {}: {e}", path.display())))?;

    config.ranking.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    init_config_in(&dir)
}

/// Write a default config file into `dir`, creating it if needed.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| RegSumError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| RegSumError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| RegSumError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
