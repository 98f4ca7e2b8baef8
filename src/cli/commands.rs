use crate::analysis::analyze_file;
use crate::config::{load_for_dir, GeneratorConfig};
use crate::directive::FlagMatching;
use crate::generator::generate_all;
use crate::source::SourceSet;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::error;

/// Command-line interface for newc
///
/// Without a subcommand, behaves like `generate` so that
/// `//go:generate newc` works as-is.
#[derive(Parser, Debug)]
#[command(name = "newc", version)]
#[command(
    about = "Generate constructors for Go structs marked with //go:generate newc",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments used when no subcommand is given
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Available newc commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate constructors for a Go package
    Generate(GenerateArgs),
    /// Print struct descriptors and imports of Go files as JSON
    Inspect {
        /// Go source files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Read `--init` / `--value` from the directive line only
        #[arg(long, default_value_t = false)]
        strict_flags: bool,
    },
}

/// Options of the `generate` command
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Package directory (default: current directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Also process sub-directories, one package each
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Name of the generated file
    #[arg(short, long)]
    pub output_file: Option<String>,

    /// Show what would be written without touching files
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Do not run gofmt on the generated file
    #[arg(long, default_value_t = false)]
    pub no_format: bool,

    /// Read `--init` / `--value` from the directive line only
    #[arg(long, default_value_t = false)]
    pub strict_flags: bool,

    /// Configuration file (default: newc.toml in the package directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Copied from the directive line by `go generate`; ignored
    #[arg(long, hide = true, default_value_t = false)]
    pub init: bool,

    /// Copied from the directive line by `go generate`; ignored
    #[arg(long, hide = true, default_value_t = false)]
    pub value: bool,
}

impl GenerateArgs {
    /// Load the configuration for `dir` and apply the command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit or auto-detected config file is invalid.
    pub fn resolve_config(&self, dir: &Path) -> anyhow::Result<GeneratorConfig> {
        let mut config = load_for_dir(self.config.as_deref(), dir)?;
        if let Some(output_file) = &self.output_file {
            config.output_file = output_file.clone();
        }
        if self.recursive {
            config.recursive = true;
        }
        if self.no_format {
            config.format = false;
        }
        if self.strict_flags {
            config.flag_matching = FlagMatching::Strict;
        }
        config.dry_run = self.dry_run;
        Ok(config)
    }
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The configuration cannot be loaded
/// - Any package fails to analyze or generate
/// - An inspected file fails to analyze
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Generate(args)) => run_generate(&args),
        Some(Commands::Inspect {
            files,
            strict_flags,
        }) => run_inspect(&files, strict_flags),
        None => run_generate(&cli.generate),
    }
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let config = args.resolve_config(&dir)?;

    let mut failures = 0usize;
    for (package_dir, result) in generate_all(&dir, &config)? {
        match result {
            Ok(Some(outcome)) => {
                let verb = if config.dry_run { "Would generate" } else { "Generated" };
                println!(
                    "✅ {verb} {} constructor(s): {}",
                    outcome.constructors,
                    outcome.output.display()
                );
                if config.dry_run {
                    print!("{}", outcome.rendered);
                }
            }
            Ok(None) => {}
            Err(e) => {
                failures += 1;
                error!(dir = %package_dir.display(), "generation failed");
                eprintln!("❌ {}: {e:#}", package_dir.display());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} package(s) failed");
    }
    Ok(())
}

fn run_inspect(files: &[PathBuf], strict_flags: bool) -> anyhow::Result<()> {
    let matching = if strict_flags {
        FlagMatching::Strict
    } else {
        FlagMatching::Substring
    };

    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        let mut sources = SourceSet::new();
        let analysis = analyze_file(&mut sources, file, matching)
            .with_context(|| format!("failed to analyze {}", file.display()))?;
        reports.push(json!({
            "file": file.display().to_string(),
            "analysis": analysis,
        }));
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
