//! Turning command-line options into a list of (input file, output directory) jobs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::ConfigError;

pub const DEFAULT_EXTENSIONS: &str = "cpp,cc,cxx,c,h,hpp,hxx,cu,cuh,inl,ipp";

/// One file to rewrite into `out_dir/<file name>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Job {
    pub input: PathBuf,
    pub out_dir: PathBuf,
}

/// Where the jobs come from.
#[derive(Debug, Clone)]
pub enum JobSource {
    /// Explicit files, all written into one directory
    Files { inputs: Vec<PathBuf>, out_dir: PathBuf },
    /// JSON array of jobs
    Manifest(PathBuf),
    /// Every matching file under `root`, mirrored under `out_dir`
    Directory {
        root: PathBuf,
        out_dir: PathBuf,
        extensions: String,
        max_files: Option<usize>,
    },
}

impl JobSource {
    pub fn resolve(&self) -> Result<Vec<Job>, ConfigError> {
        match self {
            JobSource::Files { inputs, out_dir } => Ok(inputs
                .iter()
                .map(|input| Job {
                    input: input.clone(),
                    out_dir: out_dir.clone(),
                })
                .collect()),
            JobSource::Manifest(path) => load_manifest(path),
            JobSource::Directory {
                root,
                out_dir,
                extensions,
                max_files,
            } => directory_jobs(root, out_dir, extensions, *max_files),
        }
    }
}

/// Load a manifest such as
///
/// ```json
/// [
///   { "input": "include/lets_be_rational.h", "out_dir": "mapped/include" },
///   { "input": "src/lets_be_rational.cpp",   "out_dir": "mapped/src" }
/// ]
/// ```
///
/// Relative paths are resolved against the manifest's own directory.
pub fn load_manifest(path: &Path) -> Result<Vec<Job>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    let jobs: Vec<Job> = serde_json::from_str(&raw).map_err(|source| ConfigError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(jobs
        .into_iter()
        .map(|job| Job {
            input: base.join(job.input),
            out_dir: base.join(job.out_dir),
        })
        .collect())
}

/// Regular files under `dir` whose extension is in the comma-separated
/// `extensions` list (case-insensitive), sorted so job order is stable
/// across runs. Unreadable entries are skipped.
fn collect_source_files(dir: &Path, extensions: &str, max_files: Option<usize>) -> Vec<PathBuf> {
    let exts: Vec<&str> = extensions.split(',').map(str::trim).collect();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() {
            if let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) {
                if exts.iter().any(|&e2| e2.eq_ignore_ascii_case(ext)) {
                    files.push(entry.into_path());
                }
            }
        }
    }

    files.sort();
    if let Some(max) = max_files {
        files.truncate(max);
    }
    files
}

fn directory_jobs(
    root: &Path,
    out_dir: &Path,
    extensions: &str,
    max_files: Option<usize>,
) -> Result<Vec<Job>, ConfigError> {
    if !root.is_dir() {
        return Err(ConfigError::MissingInputDir(root.to_path_buf()));
    }
    Ok(collect_source_files(root, extensions, max_files)
        .into_iter()
        .map(|input| {
            let rel_dir = input
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(Path::to_path_buf)
                .unwrap_or_default();
            Job {
                out_dir: out_dir.join(rel_dir),
                input,
            }
        })
        .collect())
}
