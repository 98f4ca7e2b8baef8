use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

/// Environment variable overriding the `gofmt` binary
pub const GOFMT_BIN_ENV: &str = "NEWC_GOFMT_BIN";

/// Format a generated Go file in place with `gofmt -w`.
///
/// A missing `gofmt` only logs a warning: the generated code is valid
/// without formatting.
pub fn format_go_file(path: &Path) -> anyhow::Result<()> {
    // Allow tests to override the gofmt binary path without mutating PATH
    let gofmt_bin = std::env::var(GOFMT_BIN_ENV).unwrap_or_else(|_| "gofmt".to_string());

    let status = match Command::new(&gofmt_bin).arg("-w").arg(path).status() {
        Ok(status) => status,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(binary = %gofmt_bin, "gofmt not found, leaving generated file unformatted");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if !status.success() {
        anyhow::bail!("gofmt failed on {}", path.display());
    }
    debug!(path = %path.display(), "formatted");
    Ok(())
}
