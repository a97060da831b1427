//! Directory walking, file deletion and empty-directory pruning.

use std::fs::{self, DirEntry};
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::ValidConfig;
use crate::error::{CleanError, Result};
use crate::matcher::{decide, Decision, Matcher};

/// Counters for a single run
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Files deleted. Directories are never counted here.
    pub deleted: u64,
    /// Directories removed because they were left empty
    pub pruned_dirs: u64,
    /// Sum of the sizes of deleted files, as seen just before each deletion
    pub bytes_freed: u64,
    started: Instant,
}

impl RunStats {
    fn start() -> Self {
        RunStats {
            deleted: 0,
            pruned_dirs: 0,
            bytes_freed: 0,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed().as_millis()
    }
}

/// Receives progress notifications from a run.
pub trait Reporter {
    /// Called after every successful file deletion with the updated counters.
    fn file_deleted(&mut self, path: &Path, stats: &RunStats);

    fn dir_pruned(&mut self, _path: &Path, _stats: &RunStats) {}

    fn finished(&mut self, _stats: &RunStats) {}
}

/// Reporter that ignores every notification.
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn file_deleted(&mut self, _path: &Path, _stats: &RunStats) {}
}

/// Deletes matching files below a validated root.
pub struct Cleaner {
    config: ValidConfig,
}

impl Cleaner {
    pub fn new(config: ValidConfig) -> Self {
        Cleaner { config }
    }

    pub fn config(&self) -> &ValidConfig {
        &self.config
    }

    /// Walk the tree once, deleting matched files and pruning empty directories.
    ///
    /// The root must be listable; a listing failure anywhere below it only
    /// skips that directory. The first failed deletion aborts the run, and
    /// files deleted before it stay deleted.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<RunStats> {
        let root = self.config.root();
        let entries = list_dir(root).map_err(|source| CleanError::io(root, source))?;

        let mut walk = Walk {
            config: &self.config,
            matcher: Matcher::from_config(&self.config),
            stats: RunStats::start(),
            reporter,
        };
        walk.process(root, entries)?;

        let stats = walk.stats;
        walk.reporter.finished(&stats);
        Ok(stats)
    }
}

/// State for one traversal. Dropped when the run ends.
struct Walk<'a> {
    config: &'a ValidConfig,
    matcher: Matcher,
    stats: RunStats,
    reporter: &'a mut dyn Reporter,
}

impl Walk<'_> {
    fn descend(&mut self, dir: &Path) -> Result<()> {
        let entries = match list_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Failed to read directory {}: {}", dir.display(), err);
                Vec::new()
            }
        };
        self.process(dir, entries)
    }

    /// Handle the children of `dir`, then remove `dir` if nothing is left in it.
    fn process(&mut self, dir: &Path, entries: Vec<DirEntry>) -> Result<()> {
        for entry in entries {
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    warn!("Could not get file type for {}: {}", path.display(), err);
                    continue;
                }
            };

            if file_type.is_dir() {
                if self.config.is_recursive() {
                    // On failure `dir` still holds the failing entry, so it is not pruned
                    self.descend(&path)?;
                }
                continue;
            }

            let file_name = entry.file_name();
            // Errors return before pruning; the unprocessed entry keeps `dir` non-empty
            let matched = self.matcher.matches(&file_name.to_string_lossy())?;
            let decision = decide(
                self.config.is_all(),
                self.config.is_exclude(),
                self.matcher.has_criteria(),
                matched,
            );
            if decision == Decision::Delete {
                // A failed deletion skips pruning of `dir` and its ancestors
                self.delete(&path)?;
            }
        }

        self.prune(dir);
        Ok(())
    }

    fn delete(&mut self, path: &Path) -> Result<()> {
        let size = fs::symlink_metadata(path).map(|m| m.len()).unwrap_or(0);
        fs::remove_file(path).map_err(|source| CleanError::io(path, source))?;

        self.stats.deleted += 1;
        self.stats.bytes_freed += size;
        debug!("Removed: {}", path.display());
        self.reporter.file_deleted(path, &self.stats);
        Ok(())
    }

    fn prune(&mut self, dir: &Path) {
        // An unreadable directory counts as empty; removal fails harmlessly if it is not
        let is_empty = match fs::read_dir(dir) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => true,
        };
        if !is_empty {
            return;
        }

        match fs::remove_dir(dir) {
            Ok(()) => {
                self.stats.pruned_dirs += 1;
                debug!("Removed empty directory: {}", dir.display());
                self.reporter.dir_pruned(dir, &self.stats);
            }
            Err(err) => debug!("Could not remove directory {}: {}", dir.display(), err),
        }
    }
}

/// List the immediate children of `dir`, closing the handle before returning.
/// Entries that fail to read are skipped.
fn list_dir(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(err) => warn!("Error reading entry in {}: {}", dir.display(), err),
        }
    }
    Ok(entries)
}
