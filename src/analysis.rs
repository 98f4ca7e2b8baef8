//! # Struct Metadata Assembler
//!
//! Entry point of the analysis core. One call analyzes one Go file:
//!
//! ```text
//! source → parser → InitializerTable (full scan)
//!                 → for each `type` declaration:
//!                       directive gate → field extraction → StructDescriptor
//!                 → imports (collected independently)
//! ```
//!
//! The initializer table is complete before the first descriptor is built,
//! so an `init` method may appear anywhere in the file. The result is
//! all-or-nothing: any error aborts the file and no descriptor escapes.
//!
//! ```rust
//! use newc::analysis::analyze_source;
//! use newc::directive::FlagMatching;
//! use newc::source::SourceSet;
//! use std::path::Path;
//!
//! let src = "package demo\n\n//go:generate newc\ntype Foo struct {\n\tDebug bool\n}\n";
//! let mut sources = SourceSet::new();
//! let analysis = analyze_source(&mut sources, Path::new("foo.go"), src, FlagMatching::Substring)?;
//! assert_eq!(analysis.structs[0].name, "Foo");
//! # Ok::<(), newc::AnalysisError>(())
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::{debug, trace};
use tree_sitter::Node;

use crate::directive::{recognize, FlagMatching};
use crate::error::AnalysisError;
use crate::fields::{extract_fields, FieldDescriptor};
use crate::initializer::InitializerTable;
use crate::parser::{doc_comments, node_text, parse_file, parse_source, ParsedFile};
use crate::source::SourceSet;

/// One import clause, passed through untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportDescriptor {
    /// Explicit local name (`alias`, `.` or `_`), if any
    pub alias: Option<String>,
    /// Import path without quotes
    pub path: String,
}

/// Everything the emitter needs to write one constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDescriptor {
    /// Struct type name
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
    /// Return the struct by value
    pub value_mode: bool,
    /// Call `init()` after construction
    pub init_mode: bool,
    /// `init_mode` is on and the type's `init()` returns `error`
    pub init_failable: bool,
    /// The type declares an `init` method at all
    pub has_init_method: bool,
    /// Type parameter list as written (`[K comparable, V any]`), empty if none
    pub type_parameters: String,
    /// The same parameters as type arguments (`[K, V]`), empty if none
    pub type_arguments: String,
}

/// Output of analyzing one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileAnalysis {
    /// Name from the `package` clause
    pub package: Option<String>,
    /// One descriptor per struct carrying a `newc` directive, in file order
    pub structs: Vec<StructDescriptor>,
    /// Every import clause of the file, in order
    pub imports: Vec<ImportDescriptor>,
}

/// Read and analyze the Go file at `path`
pub fn analyze_file(
    sources: &mut SourceSet,
    path: &Path,
    matching: FlagMatching,
) -> Result<FileAnalysis, AnalysisError> {
    let parsed = parse_file(sources, path)?;
    assemble(&parsed, sources.text(parsed.file), matching)
}

/// Analyze in-memory Go source registered under `path`
pub fn analyze_source(
    sources: &mut SourceSet,
    path: &Path,
    text: impl Into<String>,
    matching: FlagMatching,
) -> Result<FileAnalysis, AnalysisError> {
    let parsed = parse_source(sources, path, text)?;
    assemble(&parsed, sources.text(parsed.file), matching)
}

fn assemble(
    parsed: &ParsedFile,
    source: &str,
    matching: FlagMatching,
) -> Result<FileAnalysis, AnalysisError> {
    let root = parsed.root();
    let initializers = InitializerTable::build(root, source)?;

    let mut analysis = FileAnalysis {
        package: parsed.package_name(source),
        ..FileAnalysis::default()
    };

    let mut cursor = root.walk();
    for decl in root.named_children(&mut cursor) {
        match decl.kind() {
            "import_declaration" => collect_imports(decl, source, &mut analysis.imports),
            "type_declaration" => {
                let doc = doc_comments(decl)
                    .iter()
                    .map(|c| node_text(c, source))
                    .collect::<Vec<_>>();
                let Some(directive) = recognize(&doc, matching) else {
                    trace!(line = decl.start_position().row + 1, "type without directive");
                    continue;
                };

                let mut specs = decl.walk();
                for spec in decl.named_children(&mut specs) {
                    if spec.kind() != "type_spec" {
                        continue;
                    }
                    let (Some(name), Some(ty)) = (
                        spec.child_by_field_name("name"),
                        spec.child_by_field_name("type"),
                    ) else {
                        continue;
                    };
                    if ty.kind() != "struct_type" {
                        continue;
                    }

                    let name = node_text(&name, source).to_string();
                    let init = initializers.lookup(&name);
                    let generics = spec.child_by_field_name("type_parameters");
                    let descriptor = StructDescriptor {
                        fields: extract_fields(ty, source),
                        value_mode: directive.value_mode,
                        init_mode: directive.init_mode,
                        init_failable: directive.init_mode && init.failable,
                        has_init_method: init.exists,
                        type_parameters: generics
                            .map(|g| node_text(&g, source).to_string())
                            .unwrap_or_default(),
                        type_arguments: generics
                            .map(|g| type_arguments(g, source))
                            .unwrap_or_default(),
                        name,
                    };
                    debug!(
                        name = %descriptor.name,
                        fields = descriptor.fields.len(),
                        value_mode = descriptor.value_mode,
                        init_mode = descriptor.init_mode,
                        init_failable = descriptor.init_failable,
                        "assembled struct descriptor"
                    );
                    push_descriptor(&mut analysis.structs, descriptor);
                }
            }
            _ => {}
        }
    }

    Ok(analysis)
}

/// `[K comparable, V any]` → `[K, V]`
fn type_arguments(params: Node<'_>, source: &str) -> String {
    let mut names = Vec::new();
    let mut cursor = params.walk();
    for decl in params.named_children(&mut cursor) {
        if decl.kind() != "type_parameter_declaration" {
            continue;
        }
        let mut names_cursor = decl.walk();
        names.extend(
            decl.children_by_field_name("name", &mut names_cursor)
                .map(|n| node_text(&n, source)),
        );
    }
    format!("[{}]", names.join(", "))
}

/// Append `descriptor`, replacing an earlier one of the same name in place
fn push_descriptor(structs: &mut Vec<StructDescriptor>, descriptor: StructDescriptor) {
    match structs.iter_mut().find(|s| s.name == descriptor.name) {
        Some(existing) => *existing = descriptor,
        None => structs.push(descriptor),
    }
}

fn collect_imports(decl: Node<'_>, source: &str, imports: &mut Vec<ImportDescriptor>) {
    let mut cursor = decl.walk();
    for child in decl.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => imports.extend(import_descriptor(child, source)),
            "import_spec_list" => {
                let mut specs = child.walk();
                imports.extend(
                    child
                        .named_children(&mut specs)
                        .filter(|n| n.kind() == "import_spec")
                        .filter_map(|spec| import_descriptor(spec, source)),
                );
            }
            _ => {}
        }
    }
}

fn import_descriptor(spec: Node<'_>, source: &str) -> Option<ImportDescriptor> {
    let path = spec.child_by_field_name("path")?;
    let path = node_text(&path, source)
        .trim_matches(|c| c == '"' || c == '`')
        .to_string();
    let alias = spec
        .child_by_field_name("name")
        .map(|n| node_text(&n, source).to_string());
    Some(ImportDescriptor { alias, path })
}

#[cfg(test)]
mod tests;
