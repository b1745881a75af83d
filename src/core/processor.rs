//! The distribution pipeline: scan, group, partition, then move + classify +
//! tag each file, streaming progress to the UI and writing the report at the
//! end.
//!
//! Runs on a background thread with an mpsc progress channel and an atomic
//! cancel flag. Cancellation is honored at file granularity: the in-flight
//! file is finished, then the run stops without claiming completion.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::Sender,
    Arc,
};
use std::time::Instant;

use tracing::{info, warn};

use super::classifier::{classify_file, BackgroundPolicy};
use super::distribution::{distribute, PartitionStrategy, WorkerAssignment};
use super::operations::move_file;
use super::report::write_report;
use super::stats::RunStatistics;
use super::tagging::FileTagger;

/// Image extensions the scanner picks up (lowercased, with leading dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".bmp", ".gif", ".tiff"];

/// Prefix of the per-designer destination directories.
pub const DESIGNER_DIR_PREFIX: &str = "Designer_";

/// Configuration for one distribution run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_folder: PathBuf,
    pub num_designers: usize,
    pub background_policy: BackgroundPolicy,
    pub partition_strategy: PartitionStrategy,
    /// Scan subdirectories too (existing `Designer_*` folders are skipped so
    /// a re-run never redistributes already-assigned files).
    pub recursive_scan: bool,
}

/// Errors that prevent a run from starting. Raised before any directory is
/// created or file moved.
#[derive(Debug)]
pub enum RunError {
    NonPositiveDesignerCount,
    SourceNotADirectory(PathBuf),
    CreateDesignerDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::NonPositiveDesignerCount => {
                write!(f, "Designer count must be at least 1")
            }
            RunError::SourceNotADirectory(path) => {
                write!(f, "Source folder is not a directory: {:?}", path)
            }
            RunError::CreateDesignerDirFailed { path, source } => {
                write!(f, "Failed to create designer folder {:?}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for RunError {}

/// Progress messages streamed from the pipeline thread to the UI.
#[derive(Debug, Clone)]
pub enum RunProgressMessage {
    /// Scan phase: monotonically increasing count of files discovered plus
    /// a statistics snapshot (the extension histogram builds during the
    /// scan).
    Scanned { found: usize, stats: RunStatistics },
    /// Processing phase: files fully processed so far plus a statistics
    /// snapshot.
    Progress {
        processed: usize,
        total: usize,
        stats: RunStatistics,
    },
    Complete {
        stats: RunStatistics,
    },
    Cancelled {
        stats: RunStatistics,
    },
    Error(String),
}

/// Final result of a run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub stats: RunStatistics,
    /// Files actually moved, at their destination paths. Files whose move
    /// failed are excluded.
    pub assignment: WorkerAssignment,
    pub cancelled: bool,
}

/// Execute one distribution run.
///
/// Per-file failures (undecodable image, failed move, failed tag) are logged
/// and skipped; only an invalid configuration or an uncreatable designer
/// folder aborts the run, and both are detected before any file is moved.
pub fn run_split(
    config: &RunConfig,
    tagger: &dyn FileTagger,
    progress_tx: Option<Sender<RunProgressMessage>>,
    cancel_flag: Option<Arc<AtomicBool>>,
) -> Result<RunOutcome, RunError> {
    if let Err(e) = validate(config) {
        if let Some(ref tx) = progress_tx {
            let _ = tx.send(RunProgressMessage::Error(e.to_string()));
        }
        return Err(e);
    }

    let start = Instant::now();
    let mut stats = RunStatistics::new();

    info!(
        "Starting split of {:?} across {} designers ({}, {})",
        config.source_folder,
        config.num_designers,
        config.background_policy.as_str(),
        config.partition_strategy.as_str()
    );

    // Scan phase: discover image files and build the extension histogram.
    let files = scan_images(config, &mut stats, &progress_tx);
    stats.total_images = files.len();
    info!("Scan complete, {} images found", files.len());

    // Plan the whole distribution up front; moving starts only after the
    // designer folders exist.
    let planned = distribute(&files, config.num_designers, config.partition_strategy);
    let total = planned.total_files();

    let designer_dirs = create_designer_dirs(config).map_err(|e| {
        if let Some(ref tx) = progress_tx {
            let _ = tx.send(RunProgressMessage::Error(e.to_string()));
        }
        e
    })?;

    let mut assignment = WorkerAssignment::new(config.num_designers);
    let mut processed = 0usize;
    let mut cancelled = false;

    'workers: for (worker, worker_files) in planned.iter() {
        for src in worker_files {
            if let Some(ref cancel) = cancel_flag {
                if cancel.load(Ordering::Relaxed) {
                    warn!("Run cancelled at {}/{} files", processed, total);
                    stats.elapsed = start.elapsed();
                    if let Some(ref tx) = progress_tx {
                        let _ = tx.send(RunProgressMessage::Cancelled { stats: stats.clone() });
                    }
                    cancelled = true;
                    break 'workers;
                }
            }

            let filename = match src.file_name() {
                Some(name) => name.to_os_string(),
                None => continue,
            };
            let dest = designer_dirs[worker].join(&filename);

            // A single failed move never aborts the run; the file is simply
            // left out of that designer's final list.
            if let Err(e) = move_file(src, &dest) {
                warn!("Skipping {:?}: {}", src, e);
                continue;
            }

            let is_white = classify_file(&dest, config.background_policy);
            stats.record_classification(is_white);
            tagger.tag(&dest, is_white);

            assignment.push(worker, dest);
            processed += 1;
            stats.elapsed = start.elapsed();

            if let Some(ref tx) = progress_tx {
                if processed % 5 == 0 || processed == total {
                    let _ = tx.send(RunProgressMessage::Progress {
                        processed,
                        total,
                        stats: stats.clone(),
                    });
                }
            }
        }
    }

    stats.elapsed = start.elapsed();

    if cancelled {
        info!(
            "Run cancelled: {}/{} files processed in {}",
            processed,
            total,
            stats.elapsed_display()
        );
        return Ok(RunOutcome {
            stats,
            assignment,
            cancelled: true,
        });
    }

    // Report failures are surfaced as a warning only; moves are not rolled
    // back.
    if let Err(e) = write_report(&config.source_folder, &assignment, &stats) {
        warn!("Failed to write report: {}", e);
    }

    info!(
        "Run complete: {} files ({} white, {} non-white) in {}",
        processed,
        stats.white_background,
        stats.non_white_background,
        stats.elapsed_display()
    );

    if let Some(ref tx) = progress_tx {
        let _ = tx.send(RunProgressMessage::Complete { stats: stats.clone() });
    }

    Ok(RunOutcome {
        stats,
        assignment,
        cancelled: false,
    })
}

fn validate(config: &RunConfig) -> Result<(), RunError> {
    if config.num_designers == 0 {
        return Err(RunError::NonPositiveDesignerCount);
    }
    if !config.source_folder.is_dir() {
        return Err(RunError::SourceNotADirectory(config.source_folder.clone()));
    }
    Ok(())
}

/// Lowercased dotted extension, only for `SUPPORTED_EXTENSIONS` members.
fn supported_extension(path: &Path) -> Option<String> {
    let ext = format!(
        ".{}",
        path.extension()?.to_string_lossy().to_lowercase()
    );
    SUPPORTED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

fn scan_images(
    config: &RunConfig,
    stats: &mut RunStatistics,
    progress_tx: &Option<Sender<RunProgressMessage>>,
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![config.source_folder.clone()];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read directory {:?}: {}", dir, e);
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                if config.recursive_scan && !is_designer_dir(&path) {
                    pending.push(path);
                }
                continue;
            }

            if let Some(ext) = supported_extension(&path) {
                stats.record_extension(&ext);
                files.push(path);
                if let Some(tx) = progress_tx {
                    let _ = tx.send(RunProgressMessage::Scanned {
                        found: files.len(),
                        stats: stats.clone(),
                    });
                }
            }
        }
    }

    // Deterministic input order regardless of directory enumeration.
    files.sort();
    files
}

fn is_designer_dir(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with(DESIGNER_DIR_PREFIX))
        .unwrap_or(false)
}

fn create_designer_dirs(config: &RunConfig) -> Result<Vec<PathBuf>, RunError> {
    let mut dirs = Vec::with_capacity(config.num_designers);
    for n in 1..=config.num_designers {
        let path = config
            .source_folder
            .join(format!("{}{}", DESIGNER_DIR_PREFIX, n));
        fs::create_dir_all(&path).map_err(|e| RunError::CreateDesignerDirFailed {
            path: path.clone(),
            source: e,
        })?;
        dirs.push(path);
    }
    Ok(dirs)
}
