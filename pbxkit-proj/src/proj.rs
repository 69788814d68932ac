//! The pbxproj document type.

use std::path::Path;

use pbxkit_plist::PlistValue;
use serde::Serialize;

use crate::decode::Fields;
use crate::error::{Error, Result};
use crate::objects::{PBXObject, PBXObjects};
use crate::writer;

/// A parsed `project.pbxproj` document.
///
/// Immutable once constructed; rendering the same value twice yields
/// byte-identical text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXProj {
    pub archive_version: u32,
    pub object_version: u32,
    /// Reference to the root [`PBXProject`](crate::objects::PBXProject).
    pub root_object: String,
    pub objects: PBXObjects,
}

impl PBXProj {
    pub fn new(
        archive_version: u32,
        object_version: u32,
        root_object: impl Into<String>,
        objects: PBXObjects,
    ) -> Self {
        Self {
            archive_version,
            object_version,
            root_object: root_object.into(),
            objects,
        }
    }

    /// Read and parse a document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse a document from a string; `filename` is used for error reporting.
    pub fn parse(src: &str, filename: &str) -> Result<Self> {
        let document = pbxkit_plist::parse(src, filename)?;
        Self::decode(&document)
    }

    /// Parse a document from a string using a default filename.
    pub fn parse_str(src: &str) -> Result<Self> {
        Self::parse(src, "project.pbxproj")
    }

    fn decode(document: &PlistValue) -> Result<Self> {
        let fields = Fields::new("PBXProj", document)?;
        let archive_version = fields.u32("archiveVersion")?;
        let object_version = fields.u32("objectVersion")?;
        let root_object = fields.string("rootObject")?;
        let entries = fields.dictionary("objects")?;

        let mut objects = PBXObjects::new();
        for (reference, value) in &entries {
            let isa = value
                .get("isa")
                .and_then(PlistValue::as_str)
                .ok_or_else(|| Error::missing_field("(object)", "isa"))?;
            objects.insert(PBXObject::decode(isa, reference.clone(), value)?);
        }

        Ok(Self {
            archive_version,
            object_version,
            root_object,
            objects,
        })
    }

    /// Render the document in the dialect. Total and deterministic.
    pub fn render(&self) -> String {
        writer::render(self)
    }

    /// Render and write the document to disk.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render()).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_missing_root_key() {
        let err = PBXProj::parse_str("{ archiveVersion = 1; }").unwrap_err();
        assert!(
            matches!(*err, Error::MissingField { ref field, .. } if field == "objectVersion")
        );
    }

    #[test]
    fn test_parse_error_propagates() {
        let err = PBXProj::parse_str("{ archiveVersion = ").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_no_partial_graph_on_bad_object() {
        let err = PBXProj::parse_str(
            "{ archiveVersion = 1; objectVersion = 46; rootObject = P; objects = { BF = { isa = PBXBuildFile; }; }; }",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::MissingField { ref field, .. } if field == "fileRef"));
    }
}
