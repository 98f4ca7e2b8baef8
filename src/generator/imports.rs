use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::ImportDescriptor;

/// `pkg.` qualifier inside a Go type expression
static QUALIFIER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\.[A-Za-z_]").expect("qualifier regex should be valid")
});

/// Major-version path suffix such as `v2`
static VERSION_SEGMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^v[0-9]+$").expect("version regex should be valid"));

/// Package qualifiers referenced by a set of type expressions
pub fn referenced_packages<'a>(types: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    types
        .into_iter()
        .flat_map(|ty| {
            QUALIFIER_REGEX
                .captures_iter(ty)
                .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Name an import is referenced by in code.
///
/// `_` and `.` imports have none. Without an alias the last path segment is
/// used, skipping a trailing major-version segment (`gopkg.in/x/v2` → `x`).
pub fn local_name(import: &ImportDescriptor) -> Option<String> {
    match import.alias.as_deref() {
        Some("_") | Some(".") => None,
        Some(alias) => Some(alias.to_string()),
        None => {
            let mut segments = import.path.rsplit('/');
            let last = segments.next()?;
            let name = if VERSION_SEGMENT_REGEX.is_match(last) {
                segments.next().unwrap_or(last)
            } else {
                last
            };
            Some(name.to_string())
        }
    }
}

/// Keep the imports whose local name qualifies one of `types`.
///
/// Duplicates collapse to their first occurrence.
pub fn select_imports<'a>(
    imports: &[ImportDescriptor],
    types: impl IntoIterator<Item = &'a str>,
) -> Vec<ImportDescriptor> {
    let used = referenced_packages(types);
    let mut selected: Vec<ImportDescriptor> = Vec::new();
    for import in imports {
        let Some(name) = local_name(import) else {
            continue;
        };
        if used.contains(&name) && !selected.contains(import) {
            selected.push(import.clone());
        }
    }
    selected
}

/// One line of an `import ( ... )` block
pub fn import_line(import: &ImportDescriptor) -> String {
    match &import.alias {
        Some(alias) => format!("{alias} \"{}\"", import.path),
        None => format!("\"{}\"", import.path),
    }
}
