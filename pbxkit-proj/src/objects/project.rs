//! The root project object.

use indexmap::IndexMap;
use pbxkit_plist::{CommentedString, PlistValue};
use serde::Serialize;

use super::{PBXObjects, ProjectObject, commented, reference_array};
use crate::decode::Fields;
use crate::error::Result;

/// The project object every document's `rootObject` points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXProject {
    pub reference: String,
    /// Reference to the project-level configuration list.
    pub build_configuration_list: String,
    pub compatibility_version: String,
    pub development_region: Option<String>,
    pub has_scanned_for_encodings: u32,
    pub known_regions: Vec<String>,
    /// Reference to the root group of the file tree.
    pub main_group: String,
    pub product_ref_group: Option<String>,
    pub project_dir_path: Option<String>,
    pub project_root: Option<String>,
    pub targets: Vec<String>,
}

impl PBXProject {
    pub fn new(
        reference: impl Into<String>,
        build_configuration_list: impl Into<String>,
        compatibility_version: impl Into<String>,
        main_group: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            build_configuration_list: build_configuration_list.into(),
            compatibility_version: compatibility_version.into(),
            development_region: None,
            has_scanned_for_encodings: 0,
            known_regions: Vec::new(),
            main_group: main_group.into(),
            product_ref_group: None,
            project_dir_path: None,
            project_root: None,
            targets: Vec::new(),
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            build_configuration_list: fields.string("buildConfigurationList")?,
            compatibility_version: fields.string("compatibilityVersion")?,
            development_region: fields.optional_string("developmentRegion")?,
            has_scanned_for_encodings: fields.u32("hasScannedForEncodings")?,
            known_regions: fields.optional_string_array("knownRegions")?,
            main_group: fields.string("mainGroup")?,
            product_ref_group: fields.optional_string("productRefGroup")?,
            project_dir_path: fields.optional_string("projectDirPath")?,
            project_root: fields.optional_string("projectRoot")?,
            targets: fields.optional_string_array("targets")?,
        })
    }
}

impl ProjectObject for PBXProject {
    const ISA: &'static str = "PBXProject";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string(Self::ISA));
        entries.insert(
            "buildConfigurationList".to_string(),
            PlistValue::String(commented(
                self.build_configuration_list.clone(),
                objects.configuration_list_comment(&self.build_configuration_list),
            )),
        );
        entries.insert(
            "compatibilityVersion".to_string(),
            PlistValue::string(&self.compatibility_version),
        );
        if let Some(region) = &self.development_region {
            entries.insert("developmentRegion".to_string(), PlistValue::string(region));
        }
        entries.insert(
            "hasScannedForEncodings".to_string(),
            PlistValue::string(self.has_scanned_for_encodings.to_string()),
        );
        entries.insert(
            "knownRegions".to_string(),
            reference_array(&self.known_regions, |_| None),
        );
        entries.insert(
            "mainGroup".to_string(),
            PlistValue::String(commented(
                self.main_group.clone(),
                objects.file_element_name(&self.main_group),
            )),
        );
        if let Some(group) = &self.product_ref_group {
            entries.insert(
                "productRefGroup".to_string(),
                PlistValue::String(commented(group.clone(), objects.file_element_name(group))),
            );
        }
        if let Some(dir_path) = &self.project_dir_path {
            entries.insert("projectDirPath".to_string(), PlistValue::string(dir_path));
        }
        if let Some(root) = &self.project_root {
            entries.insert("projectRoot".to_string(), PlistValue::string(root));
        }
        entries.insert(
            "targets".to_string(),
            reference_array(&self.targets, |target| objects.target_name(target)),
        );
        (
            commented(self.reference.clone(), Some("Project object".to_string())),
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
    fn test_project_decode() {
        let value = parse_str(
            "{ isa = PBXProject; buildConfigurationList = CL; compatibilityVersion = \"Xcode 8.0\"; hasScannedForEncodings = 0; knownRegions = (en, Base,); mainGroup = MG; targets = (T,); }",
        )
        .unwrap();
        let project = PBXProject::decode("P".to_string(), &value).unwrap();
        assert_eq!(project.compatibility_version, "Xcode 8.0");
        assert_eq!(project.known_regions, vec!["en".to_string(), "Base".to_string()]);
        assert_eq!(project.targets, vec!["T".to_string()]);
    }

    #[test]
    fn test_project_requires_main_group() {
        let value = parse_str(
            "{ isa = PBXProject; buildConfigurationList = CL; compatibilityVersion = \"Xcode 8.0\"; hasScannedForEncodings = 0; }",
        )
        .unwrap();
        let err = PBXProject::decode("P".to_string(), &value).unwrap_err();
        assert!(matches!(*err, Error::MissingField { ref field, .. } if field == "mainGroup"));
    }
}
