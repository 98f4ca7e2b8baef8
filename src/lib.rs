//! # newc
//!
//! **newc** generates constructor functions for Go structs. A struct opts in
//! with a `//go:generate newc` line in its documentation comment:
//!
//! ```go
//! // UserService is a domain service
//! //go:generate newc
//! type UserService struct {
//!     baseService
//!     userRepository *repositories.UserRepository
//!     proRepository  *repositories.ProRepository
//! }
//! ```
//!
//! and `go generate` (or running `newc` in the package directory) writes
//! `constructor_gen.go` containing `NewUserService(...)`.
//!
//! ## Architecture
//!
//! - **[`source`]** - Registry of loaded files, offset to line:column mapping
//! - **[`parser`]** - tree-sitter Go parsing and documentation comment lookup
//! - **[`directive`]** - Recognition of the generation directive and its modes
//! - **[`initializer`]** - Per-file table of `init` methods and their failability
//! - **[`fields`]** - Struct field extraction with skip tags and embedding
//! - **[`analysis`]** - Assembles [`analysis::StructDescriptor`]s for a file
//! - **[`generator`]** - Plans, renders, writes and formats constructor files
//! - **[`config`]** - `newc.toml` loading
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - Command-line interface
//!
//! ### Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as newc
//!     participant Gen as generator::generate_package
//!     participant Ana as analysis::analyze_file
//!     participant Tpl as generator::templates
//!     participant FS as File System
//!
//!     CLI->>Gen: package dir + GeneratorConfig
//!     Gen->>FS: list *.go carrying //go:generate newc
//!     loop every file
//!         Gen->>Ana: analyze_file(path)
//!         Ana->>Ana: parse, build init table, read directives
//!         Ana-->>Gen: FileAnalysis
//!     end
//!     Gen->>Tpl: render_constructor_file(plans)
//!     Tpl-->>Gen: Go source
//!     Gen->>FS: write constructor_gen.go, gofmt -w
//! ```
//!
//! ## Analysis only
//!
//! ```rust
//! use newc::analysis::analyze_source;
//! use newc::directive::FlagMatching;
//! use newc::source::SourceSet;
//!
//! let mut sources = SourceSet::new();
//! let analysis = analyze_source(
//!     &mut sources,
//!     std::path::Path::new("user.go"),
//!     "package app\n\n//go:generate newc\ntype User struct {\n\tName string\n}\n",
//!     FlagMatching::Substring,
//! )?;
//! assert_eq!(analysis.structs[0].name, "User");
//! # Ok::<(), newc::AnalysisError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod fields;
pub mod generator;
pub mod initializer;
pub mod logging;
pub mod parser;
pub mod source;

pub use analysis::{analyze_file, analyze_source, FileAnalysis, ImportDescriptor, StructDescriptor};
pub use config::GeneratorConfig;
pub use directive::FlagMatching;
pub use error::AnalysisError;
pub use generator::{generate_all, generate_package, PackageOutcome};
pub use source::SourceSet;
