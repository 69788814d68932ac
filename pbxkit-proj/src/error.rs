use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for pbxproj operations (boxed to reduce size on stack).
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pbxproj document")]
    #[diagnostic(code(pbxkit::proj::parse_error))]
    Parse {
        #[source]
        #[diagnostic_source]
        source: pbxkit_plist::Error,
    },

    #[error("'{isa}' is missing required field '{field}'")]
    #[diagnostic(code(pbxkit::proj::missing_field))]
    MissingField { isa: String, field: String },

    #[error("'{isa}' field '{field}' is not {expected}")]
    #[diagnostic(code(pbxkit::proj::malformed_value))]
    MalformedValue {
        isa: String,
        field: String,
        expected: &'static str,
    },

    #[error("unknown object kind '{isa}'")]
    #[diagnostic(
        code(pbxkit::proj::unknown_object_kind),
        help("the document declares an isa tag this crate does not model")
    )]
    UnknownObjectKind { isa: String },
}

impl Error {
    /// A required key was absent during a kind-specific decode.
    pub fn missing_field(isa: impl Into<String>, field: impl Into<String>) -> Box<Self> {
        Box::new(Error::MissingField {
            isa: isa.into(),
            field: field.into(),
        })
    }

    /// A key was present but its value failed type coercion.
    pub fn malformed_value(
        isa: impl Into<String>,
        field: impl Into<String>,
        expected: &'static str,
    ) -> Box<Self> {
        Box::new(Error::MalformedValue {
            isa: isa.into(),
            field: field.into(),
            expected,
        })
    }

    /// The `isa` tag did not match any known object kind.
    pub fn unknown_object_kind(isa: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnknownObjectKind { isa: isa.into() })
    }
}

impl From<Box<pbxkit_plist::Error>> for Box<Error> {
    fn from(source: Box<pbxkit_plist::Error>) -> Self {
        Box::new(Error::Parse { source: *source })
    }
}
