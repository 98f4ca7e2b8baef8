//! # Source Set
//!
//! Position-tracking context shared by every parsing call of one analysis unit.
//!
//! A [`SourceSet`] owns the text of each registered file and maps byte offsets
//! back to `line:column` positions for diagnostics. It is append-only: files are
//! registered once and never removed, so a [`FileId`] stays valid for the whole
//! lifetime of the set.
//!
//! The set is passed explicitly by reference instead of living in a global.
//! Callers that analyze files in parallel create one set per file (or per
//! package) and never share a set across threads.
//!
//! ```rust
//! use newc::source::SourceSet;
//!
//! let mut sources = SourceSet::new();
//! let id = sources.add("foo.go", "package foo\n\ntype Foo struct{}\n");
//! let pos = sources.position(id, 13);
//! assert_eq!((pos.line, pos.column), (3, 1));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Handle to a file registered in a [`SourceSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(usize);

/// A 1-based line/column position inside a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number, starting at 1
    pub line: usize,
    /// Column in bytes, starting at 1
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug)]
struct SourceFile {
    path: PathBuf,
    text: String,
    /// Byte offset at which each line starts
    line_starts: Vec<usize>,
}

impl SourceFile {
    fn new(path: PathBuf, text: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            path,
            text,
            line_starts,
        }
    }
}

/// Append-only registry of source files and their line tables
#[derive(Debug, Default)]
pub struct SourceSet {
    files: Vec<SourceFile>,
}

impl SourceSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and return its handle
    pub fn add(&mut self, path: impl AsRef<Path>, text: impl Into<String>) -> FileId {
        let id = FileId(self.files.len());
        self.files
            .push(SourceFile::new(path.as_ref().to_path_buf(), text.into()));
        id
    }

    /// Number of registered files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file has been registered yet
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Path the file was registered under
    pub fn path(&self, id: FileId) -> &Path {
        &self.files[id.0].path
    }

    /// Full text of the file
    pub fn text(&self, id: FileId) -> &str {
        &self.files[id.0].text
    }

    /// Translate a byte offset into a 1-based position.
    ///
    /// Offsets past the end of the file clamp to the last line.
    pub fn position(&self, id: FileId, offset: usize) -> Position {
        let file = &self.files[id.0];
        let line_index = match file.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        Position {
            line: line_index + 1,
            column: offset - file.line_starts[line_index] + 1,
        }
    }

    /// Render `path:line:column` for diagnostics
    pub fn describe(&self, id: FileId, offset: usize) -> String {
        format!("{}:{}", self.path(id).display(), self.position(id, offset))
    }
}
