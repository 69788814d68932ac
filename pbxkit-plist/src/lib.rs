//! Plist value model and pbxproj dialect reader/writer.
//!
//! The pbxproj format is an OpenStep-style property list with inline
//! `/* comment */` annotations and strict ordering and quoting rules.
//! This crate owns the three pieces every other pbxkit crate builds on:
//!
//! - [`PlistValue`] / [`CommentedString`] - the recursive value model,
//! - [`PlistWriter`] - the byte-stable dialect writer,
//! - [`parse`] / [`parse_str`] - the dialect parser.

mod error;
mod parser;
mod value;
mod writer;

pub use error::{Error, Result};
pub use parser::{parse, parse_str};
pub use value::{CommentedString, PlistValue};
pub use writer::PlistWriter;
