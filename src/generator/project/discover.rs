use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::{DirEntry, WalkDir};

use crate::directive::is_directive_line;

/// Whether any line of the file at `path` is a `newc` directive.
///
/// This is a cheap pre-filter run before parsing.
pub fn contains_directive(path: &Path) -> io::Result<bool> {
    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        if is_directive_line(&line?) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Go files of the package in `dir` that carry a directive, in name order.
///
/// Test files and the generator's own output file are never candidates.
pub fn discover_package_files(dir: &Path, output_file: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".go") || name.ends_with("_test.go") || name == output_file {
            continue;
        }
        let path = entry.into_path();
        if contains_directive(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
        {
            files.push(path);
        }
    }
    Ok(files)
}

/// Package directories to process under `root`.
///
/// Without `recursive` this is just `root`. Otherwise every directory below
/// it, skipping hidden ones, `vendor` and `testdata` as the go tool does.
pub fn package_dirs(root: &Path, recursive: bool) -> anyhow::Result<Vec<PathBuf>> {
    if !recursive {
        return Ok(vec![root.to_path_buf()]);
    }
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored_dir(e))
    {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_') || name == "vendor" || name == "testdata"
}
