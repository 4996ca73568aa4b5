//! Source list construction with recursive directory expansion.
//!
//! Given a mixed list of file and directory paths, [`create_file_list`] returns
//! the files to crunch. Directories are walked recursively with [`walkdir`] and
//! contribute only their `.prg` files, in file-name order so that runs are
//! reproducible. Symlinks are not followed.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::PRG_EXTENSION;

/// `true` when `path` ends in `.prg` (any case).
pub fn is_prg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(PRG_EXTENSION))
}

/// Expand `inputs` into a flat list of source files.
///
/// - Non-directory inputs are forwarded unchanged, whatever their extension.
/// - Directories are walked recursively; regular files with a `.prg`
///   extension are included.
/// - An unreadable directory entry aborts the walk with its `io::Error`.
pub fn create_file_list(inputs: &[&Path]) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            result.push(input.to_path_buf());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                e.io_error()
                    .map(|io| io::Error::new(io.kind(), io.to_string()))
                    .unwrap_or_else(|| io::Error::other(e.to_string()))
            })?;
            if entry.file_type().is_file() && is_prg(entry.path()) {
                result.push(entry.into_path());
            }
        }
    }
    Ok(result)
}
