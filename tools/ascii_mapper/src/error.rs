use std::io;
use std::path::PathBuf;

/// A character no rule could turn into ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert {ch:?} : U+{code_point:04X}")]
pub struct UnmappableChar {
    pub ch: char,
    pub code_point: u32,
}

impl UnmappableChar {
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            code_point: u32::from(ch),
        }
    }
}

/// Per-file failures surfaced by the driver.
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    /// A declared input path does not exist
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// A line contained a character that could not be transliterated
    #[error(
        "failed to transform {} at line {line_no}\nline content:\n{}\n{source}",
        .path.display(),
        .line.trim_end()
    )]
    Transform {
        path: PathBuf,
        /// 1-based
        line_no: usize,
        /// Raw line text, including its terminator
        line: String,
        source: UnmappableChar,
    },

    #[error("{} is not valid UTF-8", .0.display())]
    Decode(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

/// Problems with the job list itself (manifest, directory walk, CLI combination).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    ManifestRead { path: PathBuf, source: io::Error },

    #[error("malformed manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("input directory not found: {}", .0.display())]
    MissingInputDir(PathBuf),

    #[error("no input given: use --input, --manifest or --input-dir")]
    NoInput,

    #[error("--out is required with {0}")]
    MissingOut(&'static str),

    #[error("--out cannot be combined with --manifest; each manifest job names its own out_dir")]
    OutWithManifest,
}
