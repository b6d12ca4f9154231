use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::engine::Transliterator;
use crate::error::MapperError;
use crate::models::FileReport;

/// Result of running the engine over a whole file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
    pub lines: usize,
    pub changed_lines: usize,
}

/// Read `path` as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, MapperError> {
    if !path.exists() {
        return Err(MapperError::MissingInput(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| MapperError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| MapperError::Decode(path.to_path_buf()))
}

/// Split into numbered lines ending in `\n`, `\r\n` or a lone `\r`, each
/// line keeping its terminator. The last line may have none.
pub fn lines_with_endings(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let bytes = rest.as_bytes();
        let end = match bytes.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') => i + 2,
            Some(i) => i + 1,
            None => rest.len(),
        };
        let (line, tail) = rest.split_at(end);
        rest = tail;
        Some(line)
    })
    .enumerate()
    .map(|(i, line)| (i + 1, line))
}

/// Transliterate every line of `text`. The first failing line aborts the
/// whole file and is reported with its 1-based number and raw text.
pub fn transform_text(
    engine: &Transliterator,
    path: &Path,
    text: &str,
) -> Result<Transformed, MapperError> {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut lines = 0;
    let mut changed_lines = 0;

    for (line_no, line) in lines_with_endings(text) {
        let mapped = engine
            .transliterate(line)
            .map_err(|source| MapperError::Transform {
                path: path.to_path_buf(),
                line_no,
                line: line.to_string(),
                source,
            })?;
        if mapped != line {
            changed_lines += 1;
            debug!("{}:{}: {}", path.display(), line_no, mapped.trim_end());
        }
        out.push_str(&mapped);
        lines += 1;
    }

    Ok(Transformed {
        text: out,
        lines,
        changed_lines,
    })
}

/// Rewrite `input` into `out_dir/<file name>`.
///
/// `out_dir` is created if needed. The output is staged in a temporary file
/// next to the target and renamed into place, so a failure never leaves a
/// partial file behind.
pub fn process_file(
    engine: &Transliterator,
    input: &Path,
    out_dir: &Path,
) -> Result<FileReport, MapperError> {
    let text = read_text(input)?;
    let transformed = transform_text(engine, input, &text)?;

    let Some(file_name) = input.file_name() else {
        return Err(MapperError::MissingInput(input.to_path_buf()));
    };
    let output = out_dir.join(file_name);
    write_atomic(&output, transformed.text.as_bytes())?;

    info!(
        "Wrote: {} ({} lines, {} changed)",
        output.display(),
        transformed.lines,
        transformed.changed_lines
    );
    Ok(FileReport {
        input: input.to_path_buf(),
        output,
        lines: transformed.lines,
        changed_lines: transformed.changed_lines,
    })
}

fn write_atomic(target: &Path, contents: &[u8]) -> Result<(), MapperError> {
    let write_err = |source: std::io::Error| MapperError::Write {
        path: target.to_path_buf(),
        source,
    };
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&dir).map_err(write_err)?;
    let mut staged = NamedTempFile::new_in(&dir).map_err(write_err)?;
    staged.write_all(contents).map_err(write_err)?;
    staged.flush().map_err(write_err)?;
    staged.persist(target).map_err(|e| write_err(e.error))?;
    Ok(())
}
