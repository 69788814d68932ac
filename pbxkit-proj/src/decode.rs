//! Field-level decoding over a plist dictionary.
//!
//! Every object kind decodes through [`Fields`], which turns absent keys into
//! `MissingField` and type mismatches into `MalformedValue`, both carrying the
//! kind and field name.

use indexmap::IndexMap;
use pbxkit_plist::PlistValue;

use crate::error::{Error, Result};

/// A typed view over one object's dictionary.
pub(crate) struct Fields<'a> {
    isa: &'a str,
    entries: &'a IndexMap<String, PlistValue>,
}

impl<'a> Fields<'a> {
    /// Wrap a dictionary value. Fails if the value is not a dictionary.
    pub(crate) fn new(isa: &'a str, value: &'a PlistValue) -> Result<Self> {
        let entries = value
            .as_dictionary()
            .ok_or_else(|| Error::malformed_value(isa, "(object)", "a dictionary"))?;
        Ok(Self { isa, entries })
    }

    fn get(&self, field: &str) -> Result<&'a PlistValue> {
        self.entries
            .get(field)
            .ok_or_else(|| Error::missing_field(self.isa, field))
    }

    /// A required string scalar.
    pub(crate) fn string(&self, field: &str) -> Result<String> {
        self.get(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::malformed_value(self.isa, field, "a string"))
    }

    /// An optional string scalar. Present-but-mistyped is still an error.
    pub(crate) fn optional_string(&self, field: &str) -> Result<Option<String>> {
        match self.entries.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| Error::malformed_value(self.isa, field, "a string")),
        }
    }

    /// A required unsigned integer, stored in the dialect as a string scalar.
    pub(crate) fn u32(&self, field: &str) -> Result<u32> {
        self.string(field)?
            .parse()
            .map_err(|_| Error::malformed_value(self.isa, field, "an unsigned integer"))
    }

    /// A required array of string scalars (reference lists).
    pub(crate) fn string_array(&self, field: &str) -> Result<Vec<String>> {
        let values = self
            .get(field)?
            .as_array()
            .ok_or_else(|| Error::malformed_value(self.isa, field, "an array"))?;
        values
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::malformed_value(self.isa, field, "an array of strings"))
            })
            .collect()
    }

    /// An optional array of string scalars; absent decodes as empty.
    pub(crate) fn optional_string_array(&self, field: &str) -> Result<Vec<String>> {
        if self.entries.contains_key(field) {
            self.string_array(field)
        } else {
            Ok(Vec::new())
        }
    }

    /// A required dictionary, cloned out of the document.
    pub(crate) fn dictionary(&self, field: &str) -> Result<IndexMap<String, PlistValue>> {
        self.get(field)?
            .as_dictionary()
            .cloned()
            .ok_or_else(|| Error::malformed_value(self.isa, field, "a dictionary"))
    }
}
