//! ascii-mapper: Rewrite source files into ASCII-only text.
//!
//! Subcommands:
//!   map  - Rewrite files into an output directory
//!   scan - Report non-ASCII lines and their rewrites to JSONL, writing nothing else

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use tracing::{error, info, warn, Level};

use ascii_mapper::config::{Job, JobSource, DEFAULT_EXTENSIONS};
use ascii_mapper::engine::{Transliterator, DEFAULT_COMMENT_MARKER};
use ascii_mapper::error::{ConfigError, MapperError};
use ascii_mapper::models::{FailedJob, FileReport, LineRecord, RunSummary};
use ascii_mapper::{driver, scanner};

#[derive(Parser)]
#[command(name = "ascii-mapper", about = "Replace Unicode in source files with ASCII equivalents")]
struct Cli {
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite files into an output directory
    Map {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory for rewritten files
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,

        /// Number of threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,

        /// Write a JSON summary of written and failed files
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Report every non-ASCII line with its rewrite (or failure) as JSONL
    Scan {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        engine: EngineArgs,

        /// Output JSONL file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Number of threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input source files
    #[arg(short, long, num_args = 1..)]
    input: Vec<PathBuf>,

    /// JSON manifest: [{"input": ..., "out_dir": ...}, ...]
    #[arg(long, conflicts_with_all = ["input", "input_dir"])]
    manifest: Option<PathBuf>,

    /// Rewrite every matching file under this directory
    #[arg(long, conflicts_with = "input")]
    input_dir: Option<PathBuf>,

    /// File extensions for --input-dir
    #[arg(long, default_value = DEFAULT_EXTENSIONS)]
    extensions: String,

    /// Max files to take from --input-dir (for testing)
    #[arg(long)]
    max_files: Option<usize>,
}

impl InputArgs {
    /// `out` is only consulted for --input and --input-dir.
    fn job_source(&self, out: Option<PathBuf>) -> Result<JobSource, ConfigError> {
        if let Some(manifest) = &self.manifest {
            if out.is_some() {
                return Err(ConfigError::OutWithManifest);
            }
            return Ok(JobSource::Manifest(manifest.clone()));
        }
        if let Some(root) = &self.input_dir {
            return Ok(JobSource::Directory {
                root: root.clone(),
                out_dir: out.ok_or(ConfigError::MissingOut("--input-dir"))?,
                extensions: self.extensions.clone(),
                max_files: self.max_files,
            });
        }
        if self.input.is_empty() {
            return Err(ConfigError::NoInput);
        }
        Ok(JobSource::Files {
            inputs: self.input.clone(),
            out_dir: out.ok_or(ConfigError::MissingOut("--input"))?,
        })
    }
}

#[derive(Args)]
struct EngineArgs {
    /// Lines starting with this marker (whitespace ignored) are left untouched
    #[arg(long, default_value = DEFAULT_COMMENT_MARKER)]
    comment_marker: String,

    /// Transliterate comment lines too
    #[arg(long)]
    transliterate_comments: bool,
}

impl EngineArgs {
    fn build(&self) -> Transliterator {
        Transliterator::new()
            .with_comment_marker(self.comment_marker.as_str())
            .skip_comments(!self.transliterate_comments)
    }
}

/// Thousands-separated count for progress lines: 1234567 -> "1,234,567".
fn format_num(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn configure_threads(threads: usize) {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

// ─── Map ──────────────────────────────────────────────────────────────────────

fn run_map(
    jobs: Vec<Job>,
    engine: &Transliterator,
    summary_path: Option<PathBuf>,
) -> anyhow::Result<bool> {
    let t0 = Instant::now();
    info!(
        "Mapping {} files using {} threads...",
        format_num(jobs.len() as u64),
        rayon::current_num_threads()
    );

    let results: Vec<(Job, Result<FileReport, MapperError>)> = jobs
        .into_par_iter()
        .map(|job| {
            let result = driver::process_file(engine, &job.input, &job.out_dir);
            (job, result)
        })
        .collect();

    let mut summary = RunSummary::default();
    for (job, result) in results {
        match result {
            Ok(report) => summary.written.push(report),
            Err(e) => {
                error!("{e}");
                summary.failed.push(FailedJob {
                    input: job.input,
                    error: e.to_string(),
                });
            }
        }
    }

    let lines: usize = summary.written.iter().map(|r| r.lines).sum();
    let changed: usize = summary.written.iter().map(|r| r.changed_lines).sum();
    info!(
        "Done in {:.1}s: {} files written ({} lines, {} changed), {} failed",
        t0.elapsed().as_secs_f64(),
        format_num(summary.written.len() as u64),
        format_num(lines as u64),
        format_num(changed as u64),
        format_num(summary.failed.len() as u64),
    );

    if let Some(path) = summary_path {
        let file = fs::File::create(&path)
            .with_context(|| format!("failed to create summary {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &summary)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
        writer.flush()?;
        info!("Written summary to {}", path.display());
    }

    Ok(summary.failed.is_empty())
}

// ─── Scan ─────────────────────────────────────────────────────────────────────

fn run_scan(
    jobs: Vec<Job>,
    engine: &Transliterator,
    output: Option<PathBuf>,
) -> anyhow::Result<bool> {
    let t0 = Instant::now();
    let unreadable = AtomicU64::new(0);
    let unmappable = AtomicU64::new(0);

    let per_file: Vec<Vec<LineRecord>> = jobs
        .par_iter()
        .map(|job| {
            let source = match driver::read_text(&job.input) {
                Ok(s) => s,
                Err(e) => {
                    error!("{e}");
                    unreadable.fetch_add(1, Ordering::Relaxed);
                    return Vec::new();
                }
            };
            let file_path = job.input.to_string_lossy();
            let records = scanner::scan_text(engine, &source, &file_path, &file_path);
            let bad = records.iter().filter(|r| r.error.is_some()).count() as u64;
            unmappable.fetch_add(bad, Ordering::Relaxed);
            records
        })
        .collect();

    let mut writer: BufWriter<Box<dyn Write>> = match &output {
        Some(path) => BufWriter::new(Box::new(
            fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => BufWriter::new(Box::new(io::stdout().lock())),
    };
    let mut n_records = 0u64;
    for record in per_file.iter().flatten() {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
        n_records += 1;
    }
    writer.flush()?;

    let n_unreadable = unreadable.load(Ordering::Relaxed);
    let n_unmappable = unmappable.load(Ordering::Relaxed);
    info!(
        "Scanned {} files in {:.1}s: {} non-ASCII lines, {} unmappable, {} unreadable files",
        format_num(jobs.len() as u64),
        t0.elapsed().as_secs_f64(),
        format_num(n_records),
        format_num(n_unmappable),
        format_num(n_unreadable),
    );

    Ok(n_unreadable == 0 && n_unmappable == 0)
}

// ─── Main ─────────────────────────────────────────────────────────────────────

/// Ok(false) when some file failed; the failures are already logged.
fn run(command: Commands) -> anyhow::Result<bool> {
    match command {
        Commands::Map {
            input,
            out,
            engine,
            threads,
            summary,
        } => {
            configure_threads(threads);
            let jobs = input.job_source(out)?.resolve()?;
            if jobs.is_empty() {
                warn!("No files found");
                return Ok(false);
            }
            run_map(jobs, &engine.build(), summary)
        }

        Commands::Scan {
            input,
            engine,
            output,
            threads,
        } => {
            configure_threads(threads);
            // Nothing is written, so the output directory is irrelevant
            let out = input.manifest.is_none().then(PathBuf::new);
            let jobs = input.job_source(out)?.resolve()?;
            if jobs.is_empty() {
                warn!("No files found");
                return Ok(false);
            }
            run_scan(jobs, &engine.build(), output)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            if e.is::<ConfigError>() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
