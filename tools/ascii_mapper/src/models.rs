use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One non-ASCII line found by `scan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    /// Unique ID: relative_path:line_no
    pub id: String,
    pub file_path: String,
    /// 1-based
    pub line_no: usize,
    /// Line text without its terminator
    pub original_text: String,
    /// Number of non-ASCII chars in the line
    pub non_ascii_chars: usize,
    /// Left unchanged because it is a comment line
    pub comment: bool,
    /// ASCII rewrite, when every character could be mapped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    /// Why the line cannot be mapped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of rewriting one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub lines: usize,
    pub changed_lines: usize,
}

/// Written by `map --summary`.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub written: Vec<FileReport>,
    pub failed: Vec<FailedJob>,
}

#[derive(Debug, Serialize)]
pub struct FailedJob {
    pub input: PathBuf,
    pub error: String,
}
