//! # Declaration Parser
//!
//! Turns one Go source file into a comment-preserving syntax tree.
//!
//! Parsing is purely syntactic: no name resolution or type checking happens
//! here. The tree keeps every comment as a `comment` node, which is what lets
//! [`doc_comments`] recover the documentation block attached to a declaration.
//!
//! tree-sitter recovers from malformed input instead of failing, so a tree
//! that contains any `ERROR` or `MISSING` node is rejected with
//! [`AnalysisError::Syntax`], pointing at the first offending node.

use std::cell::RefCell;
use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::AnalysisError;
use crate::source::{FileId, SourceSet};

thread_local! {
    static PARSER: RefCell<Parser> = RefCell::new(go_parser());
}

#[allow(clippy::expect_used)]
fn go_parser() -> Parser {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .expect("Go grammar");
    parser
}

/// A parsed source file: its handle in the [`SourceSet`] plus the syntax tree
#[derive(Debug)]
pub struct ParsedFile {
    /// Handle of the file inside the source set it was parsed into
    pub file: FileId,
    tree: Tree,
}

impl ParsedFile {
    /// Root `source_file` node
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Name from the `package` clause, if the file has one
    pub fn package_name(&self, source: &str) -> Option<String> {
        let root = self.root();
        let mut cursor = root.walk();
        let clause = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_clause")?;
        let name = clause.named_child(0)?;
        Some(node_text(&name, source).to_string())
    }
}

/// Read `path` from disk, register it in `sources` and parse it
pub fn parse_file(sources: &mut SourceSet, path: &Path) -> Result<ParsedFile, AnalysisError> {
    let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(sources, path, text)
}

/// Register in-memory `text` under `path` and parse it
pub fn parse_source(
    sources: &mut SourceSet,
    path: &Path,
    text: impl Into<String>,
) -> Result<ParsedFile, AnalysisError> {
    let file = sources.add(path, text);
    let text = sources.text(file);

    let tree = PARSER
        .with(|parser| parser.borrow_mut().parse(text, None))
        .ok_or_else(|| AnalysisError::Syntax {
            path: path.to_path_buf(),
            message: "parser produced no tree".to_string(),
        })?;

    if let Some(bad) = first_error(tree.root_node()) {
        let location = sources.describe(file, bad.start_byte());
        let message = if bad.is_missing() {
            format!("{location}: missing `{}`", bad.kind())
        } else {
            let snippet = node_text(&bad, text)
                .lines()
                .next()
                .unwrap_or_default()
                .chars()
                .take(40)
                .collect::<String>();
            format!("{location}: unexpected `{snippet}`")
        };
        return Err(AnalysisError::Syntax {
            path: path.to_path_buf(),
            message,
        });
    }

    Ok(ParsedFile { file, tree })
}

/// Source text covered by `node`
pub fn node_text<'s>(node: &Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Comment nodes forming the documentation block of `decl`.
///
/// The block is the run of comments directly above the declaration: the last
/// one ends on the line before `decl` starts and no blank line separates two
/// comments of the run. A comment trailing code on the same line belongs to
/// that code and ends the run.
pub fn doc_comments<'t>(decl: Node<'t>) -> Vec<Node<'t>> {
    let mut group = Vec::new();
    let mut next_row = decl.start_position().row;
    let mut current = decl.prev_named_sibling();

    while let Some(prev) = current {
        if prev.kind() != "comment" || prev.end_position().row + 1 < next_row {
            break;
        }
        let before = prev.prev_named_sibling();
        if let Some(code) = before {
            if code.kind() != "comment" && code.end_position().row == prev.start_position().row {
                break;
            }
        }
        group.push(prev);
        next_row = prev.start_position().row;
        current = before;
    }

    group.reverse();
    group
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn parse(text: &str) -> (SourceSet, Result<ParsedFile, AnalysisError>) {
        let mut sources = SourceSet::new();
        let parsed = parse_source(&mut sources, Path::new("test.go"), text);
        (sources, parsed)
    }

    #[test]
    fn test_parse_valid_file() {
        let src = "package demo\n\ntype Foo struct {\n\tA int\n}\n";
        let (sources, parsed) = parse(src);
        let parsed = parsed.unwrap();
        assert_eq!(parsed.root().kind(), "source_file");
        assert_eq!(
            parsed.package_name(sources.text(parsed.file)).as_deref(),
            Some("demo")
        );
    }

    #[test]
    fn test_parse_reports_file_and_position() {
        let src = "package demo\n\ntype Foo struct {\n\tA int\n";
        let (_, parsed) = parse(src);
        match parsed {
            Err(AnalysisError::Syntax { path, message }) => {
                assert_eq!(path, Path::new("test.go"));
                assert!(message.starts_with("test.go:"), "{message}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_file_is_io_error() {
        let mut sources = SourceSet::new();
        let err = parse_file(&mut sources, Path::new("/definitely/not/here.go")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
        assert!(sources.is_empty());
    }

    #[test]
    fn test_doc_comments_attach_to_following_declaration() {
        let src = "package demo\n\n// unrelated\n\n// Foo docs\n//go:generate newc\ntype Foo struct{}\n";
        let (sources, parsed) = parse(src);
        let parsed = parsed.unwrap();
        let text = sources.text(parsed.file);
        let root = parsed.root();
        let mut cursor = root.walk();
        let decl = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "type_declaration")
            .unwrap();
        let docs: Vec<&str> = doc_comments(decl)
            .iter()
            .map(|c| node_text(c, text))
            .collect();
        assert_eq!(docs, vec!["// Foo docs", "//go:generate newc"]);
    }

    #[test]
    fn test_doc_comments_stop_at_trailing_comment() {
        let src = "package demo\n\nvar x = 1 // trailing\ntype Foo struct{}\n";
        let (_, parsed) = parse(src);
        let parsed = parsed.unwrap();
        let root = parsed.root();
        let mut cursor = root.walk();
        let decl = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "type_declaration")
            .unwrap();
        assert!(doc_comments(decl).is_empty());
    }
}
