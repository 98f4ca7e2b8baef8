use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};

use super::discover::{discover_package_files, package_dirs};
use super::format::format_go_file;
use crate::analysis::{analyze_file, ImportDescriptor, StructDescriptor};
use crate::config::GeneratorConfig;
use crate::generator::imports::{import_line, select_imports};
use crate::generator::plan::ConstructorPlan;
use crate::generator::templates::{
    is_generated_file, render_constructor_file, write_constructor_file,
};
use crate::source::SourceSet;

/// Result of generating one package directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    /// Package directory
    pub dir: PathBuf,
    /// Path of the generated file
    pub output: PathBuf,
    /// Number of constructors emitted
    pub constructors: usize,
    /// Rendered file contents
    pub rendered: String,
}

/// Merged analysis of every directive-carrying file of a package
#[derive(Debug, Default)]
struct PackageAnalysis {
    package: Option<String>,
    structs: Vec<StructDescriptor>,
    imports: Vec<ImportDescriptor>,
}

/// Generate the constructor file for the package in `dir`.
///
/// Each file is analyzed on its own (fresh [`SourceSet`], own initializer
/// table). Any analysis error aborts the package before anything is written.
/// A package without directives gets no file, and a stale generated file is
/// removed.
///
/// # Errors
///
/// Returns an error if discovery, analysis, rendering, writing or
/// formatting fails.
pub fn generate_package(
    dir: &Path,
    config: &GeneratorConfig,
) -> anyhow::Result<Option<PackageOutcome>> {
    let output = dir.join(&config.output_file);
    let files = discover_package_files(dir, &config.output_file)?;
    debug!(dir = %dir.display(), files = files.len(), "discovered directive files");

    let merged = analyze_package(&files, config)?;
    if merged.structs.is_empty() {
        remove_stale_output(&output, config.dry_run)?;
        return Ok(None);
    }

    let package = merged
        .package
        .with_context(|| format!("no package clause found in {}", dir.display()))?;

    let plans: Vec<ConstructorPlan> = merged
        .structs
        .iter()
        .map(ConstructorPlan::from_descriptor)
        .collect();
    for plan in plans.iter().filter(|p| p.missing_init) {
        warn!(
            name = %plan.struct_name,
            "init mode requested but the type declares no init method"
        );
    }

    let param_types = plans
        .iter()
        .flat_map(|p| p.params.iter().map(|param| param.ty.as_str()));
    let imports = select_imports(&merged.imports, param_types)
        .iter()
        .map(import_line)
        .collect();

    let constructors = plans.len();
    let rendered = render_constructor_file(&package, imports, plans)?;
    write_constructor_file(&output, &rendered, config.dry_run)?;
    if config.format && !config.dry_run {
        format_go_file(&output)?;
    }

    Ok(Some(PackageOutcome {
        dir: dir.to_path_buf(),
        output,
        constructors,
        rendered,
    }))
}

/// Generate every package under `root` (only `root` unless `config.recursive`).
///
/// A failing package does not stop the others; each gets its own result.
///
/// # Errors
///
/// Returns an error only if the package directories cannot be listed.
pub fn generate_all(
    root: &Path,
    config: &GeneratorConfig,
) -> anyhow::Result<Vec<(PathBuf, anyhow::Result<Option<PackageOutcome>>)>> {
    let dirs = package_dirs(root, config.recursive)?;
    Ok(dirs
        .into_iter()
        .map(|dir| {
            let result = generate_package(&dir, config);
            (dir, result)
        })
        .collect())
}

fn analyze_package(files: &[PathBuf], config: &GeneratorConfig) -> anyhow::Result<PackageAnalysis> {
    let mut merged = PackageAnalysis::default();
    for file in files {
        let mut sources = SourceSet::new();
        let analysis = analyze_file(&mut sources, file, config.flag_matching)
            .with_context(|| format!("failed to analyze {}", file.display()))?;

        if let Some(found) = analysis.package {
            if let Some(existing) = &merged.package {
                if *existing != found {
                    anyhow::bail!(
                        "{} declares package {found}, expected {existing}",
                        file.display()
                    );
                }
            } else {
                merged.package = Some(found);
            }
        }
        info!(
            file = %file.display(),
            structs = analysis.structs.len(),
            "analyzed"
        );
        merged.structs.extend(analysis.structs);
        merged.imports.extend(analysis.imports);
    }
    Ok(merged)
}

fn remove_stale_output(output: &Path, dry_run: bool) -> anyhow::Result<()> {
    if !is_generated_file(output) {
        return Ok(());
    }
    if dry_run {
        info!(path = %output.display(), "dry run: would remove stale generated file");
        return Ok(());
    }
    fs::remove_file(output)
        .with_context(|| format!("failed to remove stale {}", output.display()))?;
    info!(path = %output.display(), "removed stale generated file");
    Ok(())
}
