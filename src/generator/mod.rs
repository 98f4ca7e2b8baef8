//! # Generator Module
//!
//! Turns struct descriptors into Go constructor source.
//!
//! ## Overview
//!
//! For every package directory the generator:
//!
//! 1. **Discovers** the `.go` files carrying a `//go:generate newc` line
//! 2. **Analyzes** each file into [`StructDescriptor`](crate::analysis::StructDescriptor)s
//! 3. **Plans** one [`ConstructorPlan`] per descriptor
//! 4. **Selects** the imports the constructor parameters reference
//! 5. **Renders** the Askama template `constructor_gen.go.txt`
//! 6. **Writes** the result and runs `gofmt -w` on it
//!
//! ## Generated Code
//!
//! ```go
//! // Code generated by newc; DO NOT EDIT.
//!
//! package services
//!
//! import (
//!     "log"
//! )
//!
//! // NewEmailService Create a new EmailService
//! func NewEmailService(baseService baseService, logger *log.Logger) *EmailService {
//!     return &EmailService{
//!         baseService: baseService,
//!         logger:      logger,
//!     }
//! }
//! ```
//!
//! With `--init` the value is bound to a local, `init()` is called on it and,
//! when `init()` returns `error`, the constructor returns `(*T, error)`.
//! With `--value` the struct is returned by value.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use newc::config::GeneratorConfig;
//! use newc::generator::generate_package;
//!
//! let outcome = generate_package(std::path::Path::new("."), &GeneratorConfig::default())?;
//! ```

mod imports;
mod plan;
mod project;
mod templates;

pub use imports::*;
pub use plan::*;
pub use project::*;
pub use templates::*;
