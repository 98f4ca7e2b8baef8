mod discover;
mod format;
mod generate;

pub use discover::{contains_directive, discover_package_files, package_dirs};
pub use format::{format_go_file, GOFMT_BIN_ENV};
pub use generate::{generate_all, generate_package, PackageOutcome};
