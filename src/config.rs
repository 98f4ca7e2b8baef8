//! # Generator Configuration
//!
//! Settings for a generation run, loaded from an optional `newc.toml` and
//! overridden by command-line flags.
//!
//! ## Lookup
//!
//! 1. An explicit `--config <FILE>` (must exist)
//! 2. `newc.toml` in the package directory
//! 3. Built-in defaults
//!
//! ## Example
//!
//! ```toml
//! output_file = "new_gen.go"
//! flag_matching = "strict"
//! format = false
//! recursive = true
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::directive::FlagMatching;

/// File name looked up next to the Go sources
pub const CONFIG_FILE_NAME: &str = "newc.toml";

/// Default name of the generated file in each package directory
pub const DEFAULT_OUTPUT_FILE: &str = "constructor_gen.go";

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Name of the generated file written into each package directory
    pub output_file: String,
    /// How `init` / `value` modes are read from doc comments
    pub flag_matching: FlagMatching,
    /// Run `gofmt` on the generated file
    pub format: bool,
    /// Also process sub-directories, each as its own package
    pub recursive: bool,
    /// Report what would be written without touching the filesystem
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            flag_matching: FlagMatching::Substring,
            format: true,
            recursive: false,
            dry_run: false,
        }
    }
}

/// Load a configuration file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`GeneratorConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<GeneratorConfig> {
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))
}

/// Resolve which configuration file applies to `dir`
///
/// Priority:
/// 1. Explicitly provided path (via CLI), whether or not it exists
/// 2. `newc.toml` inside `dir`
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.exists().then_some(candidate)
}

/// Load the configuration for `dir`, falling back to defaults
///
/// # Errors
///
/// Returns an error if the resolved file cannot be loaded.
pub fn load_for_dir(explicit_path: Option<&Path>, dir: &Path) -> anyhow::Result<GeneratorConfig> {
    match resolve_config_path(explicit_path, dir) {
        Some(path) => load_config(&path),
        None => Ok(GeneratorConfig::default()),
    }
}
