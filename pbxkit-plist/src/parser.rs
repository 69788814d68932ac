//! Recursive-descent parser for the pbxproj dialect.
//!
//! The grammar is the OpenStep-style plist subset the writer emits: `{ }`
//! dictionaries with `key = value;` entries, `( )` arrays with `,`
//! separators, quoted and unquoted string scalars, and `/* */` or `//`
//! comments. Inline comments are cosmetic and dropped while parsing.

use miette::NamedSource;

use crate::error::{Error, Result};
use crate::value::{CommentedString, PlistValue};

/// Parse a dialect document into a [`PlistValue`].
///
/// `filename` is used for error reporting only.
pub fn parse(src: &str, filename: &str) -> Result<PlistValue> {
    let mut parser = Parser {
        src,
        bytes: src.as_bytes(),
        pos: 0,
        filename,
    };
    parser.skip_trivia()?;
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.pos < parser.bytes.len() {
        return Err(parser.unexpected_token("end of input"));
    }
    Ok(value)
}

/// Parse a dialect document using a default filename.
pub fn parse_str(src: &str) -> Result<PlistValue> {
    parse(src, "project.pbxproj")
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    filename: &'a str,
}

impl Parser<'_> {
    fn parse_value(&mut self) -> Result<PlistValue> {
        match self.peek() {
            None => Err(self.unexpected_eof()),
            Some(b'{') => self.parse_dictionary(),
            Some(b'(') => self.parse_array(),
            Some(b'"') => Ok(PlistValue::String(CommentedString::new(
                self.parse_quoted_string()?,
            ))),
            Some(b')' | b'}' | b';' | b',' | b'=') => Err(self.unexpected_token("a value")),
            Some(_) => Ok(PlistValue::String(CommentedString::new(
                self.parse_unquoted_string()?,
            ))),
        }
    }

    fn parse_dictionary(&mut self) -> Result<PlistValue> {
        self.pos += 1; // consume '{'
        let mut entries = indexmap::IndexMap::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.unexpected_eof()),
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(PlistValue::Dictionary(entries));
                }
                Some(_) => {
                    let key = self.parse_string_token()?;
                    self.skip_trivia()?;
                    self.expect(b'=', "'='")?;
                    self.skip_trivia()?;
                    let value = self.parse_value()?;
                    self.skip_trivia()?;
                    self.expect(b';', "';'")?;
                    entries.insert(key, value);
                }
            }
        }
    }

    fn parse_array(&mut self) -> Result<PlistValue> {
        self.pos += 1; // consume '('
        let mut values = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.unexpected_eof()),
                Some(b')') => {
                    self.pos += 1;
                    return Ok(PlistValue::Array(values));
                }
                Some(_) => {
                    values.push(self.parse_value()?);
                    self.skip_trivia()?;
                    match self.peek() {
                        Some(b',') => self.pos += 1,
                        Some(b')') | None => {}
                        Some(_) => return Err(self.unexpected_token("',' or ')'")),
                    }
                }
            }
        }
    }

    /// A string in key position: quoted or unquoted.
    fn parse_string_token(&mut self) -> Result<String> {
        if self.peek() == Some(b'"') {
            self.parse_quoted_string()
        } else {
            self.parse_unquoted_string()
        }
    }

    fn parse_quoted_string(&mut self) -> Result<String> {
        let start = self.pos;
        self.pos += 1; // opening quote
        let mut out = String::new();
        let mut chars = self.src[self.pos..].char_indices();
        while let Some((offset, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += offset + 1;
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, escaped)) => out.push(escaped),
                    None => break,
                },
                other => out.push(other),
            }
        }
        Err(Box::new(Error::UnterminatedString {
            src: self.named_source(),
            span: (start, 1).into(),
        }))
    }

    fn parse_unquoted_string(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace()
                || matches!(byte, b';' | b',' | b'=' | b'(' | b')' | b'{' | b'}' | b'"')
            {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unexpected_token("a value"));
        }
        Ok(self.src[start..self.pos].to_string())
    }

    /// Skip whitespace and `/* */` / `//` comments between tokens.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                self.pos += 1;
            }
            if self.lookahead(b"//") {
                while self.peek().is_some_and(|b| b != b'\n') {
                    self.pos += 1;
                }
            } else if self.lookahead(b"/*") {
                let start = self.pos;
                match self.src[self.pos + 2..].find("*/") {
                    Some(end) => self.pos += 2 + end + 2,
                    None => {
                        return Err(Box::new(Error::UnterminatedComment {
                            src: self.named_source(),
                            span: (start, 2).into(),
                        }));
                    }
                }
            } else {
                return Ok(());
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn lookahead(&self, token: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(token)
    }

    fn expect(&mut self, byte: u8, expected: &str) -> Result<()> {
        match self.peek() {
            Some(found) if found == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(self.unexpected_token(expected)),
            None => Err(self.unexpected_eof()),
        }
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    fn unexpected_eof(&self) -> Box<Error> {
        let span = if self.src.is_empty() {
            (0, 0)
        } else {
            (self.src.len() - 1, 1)
        };
        Box::new(Error::UnexpectedEof {
            src: self.named_source(),
            span: span.into(),
        })
    }

    fn unexpected_token(&self, expected: &str) -> Box<Error> {
        let found = self.src[self.pos..].chars().next().unwrap_or('\0');
        Box::new(Error::UnexpectedToken {
            src: self.named_source(),
            span: (self.pos, found.len_utf8().max(1)).into(),
            expected: expected.to_string(),
            found,
        })
    }
}
