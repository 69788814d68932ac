use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for xcconfig operations (boxed to reduce size on stack).
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("xcconfig file not found at '{path}'")]
    #[diagnostic(code(pbxkit::xcconfig::not_found))]
    NotFound { path: PathBuf },

    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised only when parsing with `strict_includes`.
    #[error("failed to resolve include '{path}'")]
    #[diagnostic(code(pbxkit::xcconfig::include))]
    Include {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}
