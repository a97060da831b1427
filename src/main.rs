use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use fileclean::{CleanConfig, CleanError, Cleaner, Reporter, RunStats};
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "fileclean",
    author,
    version,
    about = "Delete files by exact name or regular expression, then remove directories left empty",
    long_about = None
)]
struct Args {
    /// Directory to clean
    #[arg(long, short, default_value = ".")]
    dir: PathBuf,

    /// Read the file names to delete from this file, one per line (replaces --name)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Descend into subdirectories
    #[arg(long, short)]
    recur: bool,

    /// Exact file name to delete (repeatable)
    #[arg(long)]
    name: Vec<String>,

    /// Regular expression searched for in file names (repeatable)
    #[arg(long)]
    reg: Vec<String>,

    /// With --all, keep the files matched by --name/--reg
    #[arg(long, short)]
    exclude: bool,

    /// Delete every file
    #[arg(long, short)]
    all: bool,

    /// Print every deleted file and removed directory
    #[arg(long, short)]
    verbose: bool,

    /// Don't show the progress line
    #[arg(long, short)]
    quiet: bool,
}

impl Args {
    fn to_config(&self) -> CleanConfig {
        let mut config = CleanConfig::new(&self.dir)
            .names(self.name.iter().cloned())
            .patterns(self.reg.iter().cloned())
            .recursive(self.recur)
            .exclude(self.exclude)
            .all(self.all);
        if let Some(list) = &self.file {
            config = config.name_list(list);
        }
        config
    }
}

/// Writes log records to stderr without tearing the progress line.
struct StderrLogger {
    level: LevelFilter,
    progress: ProgressBar,
}

impl StderrLogger {
    fn install(level: LevelFilter, progress: ProgressBar) -> Result<()> {
        log::set_boxed_logger(Box::new(StderrLogger { level, progress }))
            .context("Failed to install logger")?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let prefix = match record.level() {
            Level::Error => "Error:".red().bold(),
            Level::Warn => "Warning:".yellow(),
            _ => "DEBUG:".dimmed(),
        };
        self.progress
            .suspend(|| eprintln!("{} {}", prefix, record.args()));
    }

    fn flush(&self) {}
}

/// Shows a spinner with the elapsed time and running deletion count.
struct ProgressReporter {
    progress: ProgressBar,
}

impl ProgressReporter {
    fn new(hidden: bool) -> Self {
        if hidden {
            return ProgressReporter {
                progress: ProgressBar::hidden(),
            };
        }

        let progress = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        progress.set_style(style);
        progress.enable_steady_tick(Duration::from_millis(100));
        progress.set_message("Scanning...");
        ProgressReporter { progress }
    }
}

impl Reporter for ProgressReporter {
    fn file_deleted(&mut self, _path: &Path, stats: &RunStats) {
        self.progress.set_message(format!(
            "[...] elapsed: {}ms, files deleted: {}",
            stats.elapsed_ms(),
            stats.deleted
        ));
    }

    fn finished(&mut self, _stats: &RunStats) {
        self.progress.finish_and_clear();
    }
}

fn clean(args: &Args, reporter: &mut ProgressReporter) -> fileclean::Result<RunStats> {
    let config = args.to_config().validate()?;
    Cleaner::new(config).run(reporter)
}

fn print_summary(stats: &RunStats) {
    println!(
        "{}",
        format!(
            "[done] elapsed: {}ms, files deleted: {}, directories removed: {}, freed: {}",
            stats.elapsed_ms(),
            stats.deleted,
            stats.pruned_dirs,
            format_size(stats.bytes_freed, BINARY)
        )
        .green()
    );
}

fn report_error(err: &CleanError) -> Result<()> {
    if err.is_config_error() {
        Args::command()
            .print_help()
            .context("Failed to print usage")?;
        println!();
    }
    eprintln!("{} {}", "Error:".red().bold(), err);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut reporter = ProgressReporter::new(args.quiet);
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    StderrLogger::install(level, reporter.progress.clone())?;

    match clean(&args, &mut reporter) {
        Ok(stats) => print_summary(&stats),
        Err(err) => {
            // Keep the last progress message after a failed run
            if err.is_config_error() {
                reporter.progress.finish_and_clear();
            } else {
                reporter.progress.abandon();
            }
            report_error(&err)?;
            process::exit(if err.is_config_error() { 2 } else { 1 });
        }
    }

    Ok(())
}
