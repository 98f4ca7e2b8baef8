//! # Initializer Method Resolver
//!
//! Finds the `init` methods declared in a file and records, per receiver type,
//! whether one exists and whether it can fail.
//!
//! The whole file is scanned before any struct is assembled, so an `init`
//! declared below its type is still found. Pointer and value receivers map to
//! the same type name.
//!
//! An `init` method may return nothing or a single `error`. Declaring more
//! than one result is rejected with
//! [`AnalysisError::InvalidInitializerSignature`]; a generated constructor
//! would have no way to forward the extra values.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;
use tree_sitter::Node;

use crate::error::AnalysisError;
use crate::parser::node_text;

/// Name of the post-construction hook
pub const INIT_METHOD: &str = "init";

/// Built-in failure type an `init` method may return
pub const FAILURE_TYPE: &str = "error";

/// What is known about a type's `init` method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InitializerInfo {
    /// The type declares an `init` method
    pub exists: bool,
    /// That method returns `error`
    pub failable: bool,
}

/// Lookup table from receiver type name to [`InitializerInfo`]
#[derive(Debug, Default, Clone)]
pub struct InitializerTable {
    entries: HashMap<String, InitializerInfo>,
}

impl InitializerTable {
    /// Scan every top-level method declaration under `root`.
    ///
    /// When a type has several `init` methods the last one wins.
    pub fn build(root: Node<'_>, source: &str) -> Result<Self, AnalysisError> {
        let mut table = Self::default();
        let mut cursor = root.walk();

        for decl in root.named_children(&mut cursor) {
            if decl.kind() != "method_declaration" {
                continue;
            }
            let is_init = decl
                .child_by_field_name("name")
                .is_some_and(|name| node_text(&name, source) == INIT_METHOD);
            if !is_init {
                continue;
            }
            let Some(type_name) = decl
                .child_by_field_name("receiver")
                .and_then(|receiver| receiver_type_name(receiver, source))
            else {
                continue;
            };

            let (results, sole_type) = declared_results(decl.child_by_field_name("result"), source);
            if results > 1 {
                return Err(AnalysisError::InvalidInitializerSignature {
                    type_name: type_name.to_string(),
                    results,
                });
            }

            let info = InitializerInfo {
                exists: true,
                failable: sole_type == Some(FAILURE_TYPE),
            };
            debug!(type_name, failable = info.failable, "found init method");
            table.entries.insert(type_name.to_string(), info);
        }

        Ok(table)
    }

    /// Info for `type_name`; types without an `init` method get the default
    pub fn lookup(&self, type_name: &str) -> InitializerInfo {
        self.entries.get(type_name).copied().unwrap_or_default()
    }

    /// Number of types with an `init` method
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no `init` method was found
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Type name bound by a receiver list such as `(s *Foo)` or `(Foo[T])`
fn receiver_type_name<'s>(receiver: Node<'_>, source: &'s str) -> Option<&'s str> {
    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|n| n.kind() == "parameter_declaration")?;
    base_type_name(param.child_by_field_name("type")?, source)
}

fn base_type_name<'s>(ty: Node<'_>, source: &'s str) -> Option<&'s str> {
    match ty.kind() {
        "type_identifier" => Some(node_text(&ty, source)),
        "pointer_type" | "parenthesized_type" => base_type_name(ty.named_child(0)?, source),
        "generic_type" => base_type_name(ty.child_by_field_name("type")?, source),
        _ => None,
    }
}

/// Count the declared results and, for a single one, return its type text.
///
/// Every name counts: `(a, b error)` declares two results.
fn declared_results<'s>(result: Option<Node<'_>>, source: &'s str) -> (usize, Option<&'s str>) {
    let Some(result) = result else {
        return (0, None);
    };
    if result.kind() != "parameter_list" {
        return (1, Some(node_text(&result, source)));
    }

    let mut count = 0;
    let mut sole_type = None;
    let mut cursor = result.walk();
    for decl in result.named_children(&mut cursor) {
        if !matches!(
            decl.kind(),
            "parameter_declaration" | "variadic_parameter_declaration"
        ) {
            continue;
        }
        let mut names = decl.walk();
        let named = decl.children_by_field_name("name", &mut names).count();
        count += named.max(1);
        sole_type = decl
            .child_by_field_name("type")
            .map(|ty| node_text(&ty, source));
    }

    (count, if count == 1 { sole_type } else { None })
}
