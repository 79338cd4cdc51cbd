//! End-to-end load pipeline: source file → adapter → grouped paragraphs → index.
//!
//! Sections are independent, so they are built on blocking worker threads
//! with a bounded number in flight, then reassembled in first-appearance order.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{info, instrument, warn};

use regsum_adapters::{DocumentAdapter, adapter_for, resolve_format};
use regsum_shared::{AppConfig, RegSumError, Result, SectionNumber, SourceFormat};
use regsum_textrank::RankOptions;

use crate::builder::{build_section, group_paragraphs};
use crate::index::SectionIndex;

/// Configuration for [`load_index`].
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Document to read.
    pub path: PathBuf,
    /// Source format; `Auto` sniffs the path and content.
    pub format: SourceFormat,
    /// Ranking parameters applied to every section.
    pub rank: RankOptions,
    /// Maximum sections built at once.
    pub workers: usize,
    /// Time budget for all convergence loops in this build.
    pub deadline: Option<Duration>,
}

impl LoadConfig {
    /// Take ranking and build settings from the app config.
    pub fn from_app(config: &AppConfig, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: config.source.format,
            rank: RankOptions::from(&config.ranking),
            workers: config.build.workers,
            deadline: (config.build.deadline_ms > 0)
                .then(|| Duration::from_millis(config.build.deadline_ms)),
        }
    }
}

/// Summary handed to [`ProgressReporter::done`].
#[derive(Debug, Clone)]
pub struct LoadStats {
    /// Adapter that read the document.
    pub adapter: String,
    /// Paragraphs the adapter produced.
    pub paragraphs: usize,
    /// Sections in the finished index.
    pub sections: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called as each section finishes, in index order.
    fn section_built(&self, number: SectionNumber, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, stats: &LoadStats);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn section_built(&self, _number: SectionNumber, _current: usize, _total: usize) {}
    fn done(&self, _stats: &LoadStats) {}
}

/// Read, segment and rank a document into a [`SectionIndex`].
///
/// 1. Read the source file
/// 2. Run the document adapter
/// 3. Parse labels and group paragraphs (fails on a malformed label)
/// 4. Build sections on the worker pool
#[instrument(skip_all, fields(path = %config.path.display(), workers = config.workers))]
pub async fn load_index(
    config: &LoadConfig,
    progress: &dyn ProgressReporter,
) -> Result<SectionIndex> {
    let start = Instant::now();

    // --- Phase 1: Read ---
    progress.phase("Reading document");
    let content = read_source(&config.path).await?;

    // --- Phase 2: Adapter ---
    progress.phase("Extracting sections");
    let format = resolve_format(config.format, Some(&config.path), &content);
    let adapter = adapter_for(format, Some(&config.path), &content);
    let paragraphs = adapter.paragraphs(&content)?;
    info!(adapter = adapter.name(), paragraphs = paragraphs.len(), "document parsed");

    let drafts = group_paragraphs(&paragraphs)?;
    if drafts.is_empty() {
        return Err(RegSumError::validation(format!(
            "no sections found in {}",
            config.path.display()
        )));
    }

    // --- Phase 3: Build ---
    progress.phase("Ranking sections");
    let mut rank = config.rank.clone();
    if let Some(budget) = config.deadline {
        rank = rank.with_deadline(Instant::now() + budget);
    }
    let rank = Arc::new(rank);
    let semaphore = Arc::new(Semaphore::new(config.workers.max(1)));

    let total = drafts.len();
    let mut handles = Vec::with_capacity(total);
    for draft in drafts {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|_| RegSumError::Cancelled)?;
        let rank = Arc::clone(&rank);
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            build_section(&draft, &rank)
        }));
    }

    let mut sections = Vec::with_capacity(total);
    for (i, handle) in handles.into_iter().enumerate() {
        let section = handle.await.map_err(worker_failure)?;
        progress.section_built(section.number(), i + 1, total);
        sections.push(section);
    }

    let index = SectionIndex::new(sections);
    let stats = LoadStats {
        adapter: adapter.name().to_string(),
        paragraphs: paragraphs.len(),
        sections: index.len(),
        elapsed: start.elapsed(),
    };
    info!(
        sections = stats.sections,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "index built"
    );
    progress.done(&stats);

    Ok(index)
}

/// A cancelled worker ends the load with `Cancelled`; a panicking one
/// re-raises its panic on the caller.
fn worker_failure(err: JoinError) -> RegSumError {
    if err.is_panic() {
        std::panic::resume_unwind(err.into_panic());
    }
    warn!(error = %err, "section worker cancelled");
    RegSumError::Cancelled
}

async fn read_source(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| RegSumError::io(path, e))?;
    String::from_utf8(bytes)
        .map_err(|e| RegSumError::parse(format!("{} is not valid UTF-8: {e}", path.display())))
}
