//! # CLI Module
//!
//! Command-line interface of the `newc` binary.
//!
//! ## Commands
//!
//! ### `generate` (default)
//!
//! Generate constructors for the Go package in a directory. This is what runs
//! when `go generate` executes a directive, so it is also the behavior when no
//! subcommand is given:
//!
//! ```bash
//! newc                      # package in the current directory
//! newc generate --dir ./internal/services --dry-run
//! newc --recursive --no-format
//! ```
//!
//! Options:
//! - `--dir <DIR>` - Package directory (default: current directory)
//! - `--recursive` - Process every sub-package as well
//! - `--output-file <NAME>` - Generated file name (default: `constructor_gen.go`)
//! - `--dry-run` - Report what would be written
//! - `--no-format` - Skip `gofmt`
//! - `--strict-flags` - Read `--init`/`--value` from the directive line only
//! - `--config <FILE>` - Configuration file (default: `newc.toml` in the directory)
//!
//! `--init` and `--value` are accepted and ignored: they are copied from the
//! directive line by `go generate`, and the modes are read from the doc
//! comment itself.
//!
//! ### `inspect`
//!
//! Print the struct descriptors and imports of Go files as JSON:
//!
//! ```bash
//! newc inspect models.go services.go
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands, GenerateArgs};
