use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for plist operations (boxed to reduce size on stack).
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("unexpected end of input")]
    #[diagnostic(code(pbxkit::plist::unexpected_eof))]
    UnexpectedEof {
        #[source_code]
        src: NamedSource<String>,
        #[label("input ends here")]
        span: SourceSpan,
    },

    #[error("expected {expected}")]
    #[diagnostic(code(pbxkit::plist::unexpected_token))]
    UnexpectedToken {
        #[source_code]
        src: NamedSource<String>,
        #[label("found '{found}'")]
        span: SourceSpan,
        expected: String,
        found: char,
    },

    #[error("unterminated string literal")]
    #[diagnostic(
        code(pbxkit::plist::unterminated_string),
        help("string literals must close their opening '\"' on the same document")
    )]
    UnterminatedString {
        #[source_code]
        src: NamedSource<String>,
        #[label("string starts here")]
        span: SourceSpan,
    },

    #[error("unterminated comment")]
    #[diagnostic(code(pbxkit::plist::unterminated_comment))]
    UnterminatedComment {
        #[source_code]
        src: NamedSource<String>,
        #[label("comment starts here")]
        span: SourceSpan,
    },
}
