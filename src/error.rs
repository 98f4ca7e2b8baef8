use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fatal error raised while analyzing one Go source file
///
/// Every variant aborts the containing file: no descriptor of that file is
/// handed to the emitter. Other files of a batch are unaffected.
#[derive(Debug)]
pub enum AnalysisError {
    /// The file could not be read
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },
    /// The file does not parse as Go source
    Syntax {
        /// File containing the syntax error
        path: PathBuf,
        /// Parse diagnostic, prefixed with `path:line:column`
        message: String,
    },
    /// An `init` method declares more than one result
    InvalidInitializerSignature {
        /// Receiver type of the offending `init` method
        type_name: String,
        /// Number of declared results
        results: usize,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            AnalysisError::Syntax { path, message } => {
                write!(
                    f,
                    "failed to build syntax tree from file({}): {}",
                    path.display(),
                    message
                )
            }
            AnalysisError::InvalidInitializerSignature { type_name, results } => {
                write!(
                    f,
                    "init method may only return error or nothing, but struct \"{}\" declares {} results",
                    type_name, results
                )
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
