//! File-tree object kinds: references, groups, and build files.

use indexmap::IndexMap;
use pbxkit_plist::{CommentedString, PlistValue};
use serde::Serialize;

use super::{PBXObjects, ProjectObject, commented, reference_array};
use crate::decode::Fields;
use crate::error::Result;

/// A file in a build phase, pointing at a file element by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXBuildFile {
    pub reference: String,
    /// Reference to the file element this build file wraps.
    pub file_ref: String,
}

impl PBXBuildFile {
    pub fn new(reference: impl Into<String>, file_ref: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            file_ref: file_ref.into(),
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            file_ref: fields.string("fileRef")?,
        })
    }
}

impl ProjectObject for PBXBuildFile {
    const ISA: &'static str = "PBXBuildFile";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let name = objects.file_element_name(&self.file_ref);
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string(Self::ISA));
        entries.insert(
            "fileRef".to_string(),
            PlistValue::String(commented(self.file_ref.clone(), name.clone())),
        );
        (
            commented(self.reference.clone(), name),
            PlistValue::Dictionary(entries),
        )
    }

    fn multiline(&self) -> bool {
        false
    }
}

/// A reference to a file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXFileReference {
    pub reference: String,
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: String,
    pub last_known_file_type: Option<String>,
    pub explicit_file_type: Option<String>,
}

impl PBXFileReference {
    pub fn new(
        reference: impl Into<String>,
        name: Option<String>,
        path: Option<String>,
        source_tree: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            name,
            path,
            source_tree: source_tree.into(),
            last_known_file_type: None,
            explicit_file_type: None,
        }
    }

    /// Display name: explicit name falling back to the path.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.path.as_deref())
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            name: fields.optional_string("name")?,
            path: fields.optional_string("path")?,
            source_tree: fields.string("sourceTree")?,
            last_known_file_type: fields.optional_string("lastKnownFileType")?,
            explicit_file_type: fields.optional_string("explicitFileType")?,
        })
    }
}

impl ProjectObject for PBXFileReference {
    const ISA: &'static str = "PBXFileReference";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, _objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string(Self::ISA));
        if let Some(explicit) = &self.explicit_file_type {
            entries.insert("explicitFileType".to_string(), PlistValue::string(explicit));
        }
        if let Some(known) = &self.last_known_file_type {
            entries.insert("lastKnownFileType".to_string(), PlistValue::string(known));
        }
        if let Some(name) = &self.name {
            entries.insert("name".to_string(), PlistValue::string(name));
        }
        if let Some(path) = &self.path {
            entries.insert("path".to_string(), PlistValue::string(path));
        }
        entries.insert("sourceTree".to_string(), PlistValue::string(&self.source_tree));
        (
            commented(
                self.reference.clone(),
                self.display_name().map(str::to_string),
            ),
            PlistValue::Dictionary(entries),
        )
    }

    fn multiline(&self) -> bool {
        false
    }
}

/// An abstract file element; all fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PBXFileElement {
    pub reference: String,
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: Option<String>,
}

impl PBXFileElement {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            ..Default::default()
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            name: fields.optional_string("name")?,
            path: fields.optional_string("path")?,
            source_tree: fields.optional_string("sourceTree")?,
        })
    }
}

impl ProjectObject for PBXFileElement {
    const ISA: &'static str = "PBXFileElement";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, _objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string(Self::ISA));
        if let Some(name) = &self.name {
            entries.insert("name".to_string(), PlistValue::string(name));
        }
        if let Some(path) = &self.path {
            entries.insert("path".to_string(), PlistValue::string(path));
        }
        if let Some(source_tree) = &self.source_tree {
            entries.insert("sourceTree".to_string(), PlistValue::string(source_tree));
        }
        (
            commented(
                self.reference.clone(),
                self.name.clone().or_else(|| self.path.clone()),
            ),
            PlistValue::Dictionary(entries),
        )
    }
}

/// A group of file elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXGroup {
    pub reference: String,
    /// References to the group's children, in declared order.
    pub children: Vec<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: String,
}

impl PBXGroup {
    pub fn new(
        reference: impl Into<String>,
        children: Vec<String>,
        source_tree: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            children,
            name: None,
            path: None,
            source_tree: source_tree.into(),
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            children: fields.string_array("children")?,
            name: fields.optional_string("name")?,
            path: fields.optional_string("path")?,
            source_tree: fields.string("sourceTree")?,
        })
    }
}

impl ProjectObject for PBXGroup {
    const ISA: &'static str = "PBXGroup";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string(Self::ISA));
        entries.insert(
            "children".to_string(),
            reference_array(&self.children, |child| objects.file_element_name(child)),
        );
        if let Some(name) = &self.name {
            entries.insert("name".to_string(), PlistValue::string(name));
        }
        if let Some(path) = &self.path {
            entries.insert("path".to_string(), PlistValue::string(path));
        }
        entries.insert("sourceTree".to_string(), PlistValue::string(&self.source_tree));
        (
            commented(
                self.reference.clone(),
                self.name.clone().or_else(|| self.path.clone()),
            ),
            PlistValue::Dictionary(entries),
        )
    }
}

/// A localized variant group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXVariantGroup {
    pub reference: String,
    pub children: Vec<String>,
    pub name: String,
    pub source_tree: String,
}

impl PBXVariantGroup {
    pub fn new(
        reference: impl Into<String>,
        children: Vec<String>,
        name: impl Into<String>,
        source_tree: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            children,
            name: name.into(),
            source_tree: source_tree.into(),
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            children: fields.string_array("children")?,
            name: fields.string("name")?,
            source_tree: fields.string("sourceTree")?,
        })
    }
}

impl ProjectObject for PBXVariantGroup {
    const ISA: &'static str = "PBXVariantGroup";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string(Self::ISA));
        entries.insert(
            "children".to_string(),
            reference_array(&self.children, |child| objects.file_element_name(child)),
        );
        entries.insert("name".to_string(), PlistValue::string(&self.name));
        entries.insert("sourceTree".to_string(), PlistValue::string(&self.source_tree));
        (
            commented(self.reference.clone(), Some(self.name.clone())),
            PlistValue::Dictionary(entries),
        )
    }
}

#[cfg(test)]
mod tests {
    use pbxkit_plist::parse_str;

    use super::*;
    use crate::error::Error;

    #[test]
    fn test_build_file_requires_file_ref() {
        let value = parse_str("{ isa = PBXBuildFile; }").unwrap();
        let err = PBXBuildFile::decode("BF".to_string(), &value).unwrap_err();
        assert!(
            matches!(*err, Error::MissingField { ref field, .. } if field == "fileRef")
        );
    }

    #[test]
    fn test_file_reference_decode() {
        let value = parse_str(
            "{ isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = main.swift; sourceTree = \"<group>\"; }",
        )
        .unwrap();
        let file = PBXFileReference::decode("FREF".to_string(), &value).unwrap();
        assert_eq!(file.display_name(), Some("main.swift"));
        assert_eq!(file.source_tree, "<group>");
        assert_eq!(file.last_known_file_type.as_deref(), Some("sourcecode.swift"));
    }

    #[test]
    fn test_group_children_preserve_order() {
        let value =
            parse_str("{ isa = PBXGroup; children = (B, A,); sourceTree = \"<group>\"; }").unwrap();
        let group = PBXGroup::decode("G".to_string(), &value).unwrap();
        assert_eq!(group.children, vec!["B".to_string(), "A".to_string()]);
    }
}
