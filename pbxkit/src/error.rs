use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for bundle-level operations (boxed to reduce size on stack).
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("xcodeproj bundle not found at '{path}'")]
    #[diagnostic(code(pbxkit::not_found))]
    NotFound { path: PathBuf },

    #[error("no pbxproj file inside '{path}'")]
    #[diagnostic(
        code(pbxkit::pbxproj_not_found),
        help("a .xcodeproj bundle normally contains a project.pbxproj file")
    )]
    PbxprojNotFound { path: PathBuf },

    #[error("failed to access '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Proj(#[from] pbxkit_proj::Error),
}

impl From<Box<pbxkit_proj::Error>> for Box<Error> {
    fn from(source: Box<pbxkit_proj::Error>) -> Self {
        Box::new(Error::Proj(*source))
    }
}
