use askama::Template;
use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use super::plan::ConstructorPlan;

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// Code generated by newc; DO NOT EDIT.";

/// Template data for one generated constructor file
#[derive(Template)]
#[template(path = "constructor_gen.go.txt", escape = "none")]
pub struct ConstructorFileTemplate {
    /// Go package clause name
    pub package_name: String,
    /// Rendered import lines (`"fmt"`, `repo "github.com/x/repo"`)
    pub imports: Vec<String>,
    /// Constructors in emission order
    pub constructors: Vec<ConstructorPlan>,
}

/// Render the file body for a package
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_constructor_file(
    package_name: &str,
    imports: Vec<String>,
    constructors: Vec<ConstructorPlan>,
) -> anyhow::Result<String> {
    let mut rendered = ConstructorFileTemplate {
        package_name: package_name.to_string(),
        imports,
        constructors,
    }
    .render()
    .context("failed to render constructor template")?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Write a rendered constructor file, or only report it on a dry run
///
/// # Errors
///
/// Returns an error if file writing fails
pub fn write_constructor_file(path: &Path, rendered: &str, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        info!(path = %path.display(), bytes = rendered.len(), "dry run: would write constructors");
        return Ok(());
    }
    fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "generated constructors");
    Ok(())
}

/// Whether `path` holds a file previously written by this generator
pub fn is_generated_file(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|text| text.starts_with(GENERATED_HEADER))
        .unwrap_or(false)
}
