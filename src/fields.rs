//! # Field Extractor
//!
//! Walks the field list of a struct type and produces one [`FieldDescriptor`]
//! per field declaration, in declaration order.

use serde::Serialize;
use tree_sitter::Node;

use crate::parser::node_text;

/// Tag marker that excludes a field from the constructor
pub const SKIP_TAG: &str = r#"newc:"-""#;

/// One struct field as seen by the constructor generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field identifier, or the type's base name for an embedded field
    pub name: String,
    /// Field type exactly as written in the source
    pub declared_type: String,
    /// The field is tagged `newc:"-"` and gets no constructor parameter
    pub skipped: bool,
}

/// Extract the fields of a `struct_type` node.
///
/// A declaration naming several fields (`a, b int`) yields a single
/// descriptor named after its first identifier.
pub fn extract_fields(struct_type: Node<'_>, source: &str) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();
    let mut cursor = struct_type.walk();
    let Some(list) = struct_type
        .named_children(&mut cursor)
        .find(|n| n.kind() == "field_declaration_list")
    else {
        return fields;
    };

    let mut cursor = list.walk();
    for decl in list.named_children(&mut cursor) {
        if decl.kind() != "field_declaration" {
            continue;
        }
        if let Some(field) = field_descriptor(decl, source) {
            fields.push(field);
        }
    }
    fields
}

fn field_descriptor(decl: Node<'_>, source: &str) -> Option<FieldDescriptor> {
    let ty = decl.child_by_field_name("type")?;
    let mut cursor = decl.walk();
    let first_name = decl
        .children_by_field_name("name", &mut cursor)
        .next()
        .map(|n| node_text(&n, source).to_string());

    let (name, declared_type) = match first_name {
        Some(name) => (name, node_text(&ty, source).to_string()),
        None => {
            let mut cursor = decl.walk();
            let pointer = decl.children(&mut cursor).any(|c| c.kind() == "*");
            let text = node_text(&ty, source);
            let declared_type = if pointer {
                format!("*{text}")
            } else {
                text.to_string()
            };
            (embedded_field_name(&declared_type), declared_type)
        }
    };

    let skipped = decl
        .child_by_field_name("tag")
        .is_some_and(|tag| node_text(&tag, source).contains(SKIP_TAG));

    Some(FieldDescriptor {
        name,
        declared_type,
        skipped,
    })
}

/// Implicit name of an embedded field: `*pkg.Widget` is named `Widget`.
///
/// Type arguments are dropped before taking the last segment, so
/// `pkg.Box[other.T]` is named `Box`, as Go itself names it.
pub fn embedded_field_name(declared_type: &str) -> String {
    let base = declared_type
        .split('[')
        .next()
        .unwrap_or(declared_type)
        .trim_end();
    let last = base.rsplit('.').next().unwrap_or(base);
    last.strip_prefix('*').unwrap_or(last).to_string()
}
