//! Build configuration object kinds.

use indexmap::IndexMap;
use pbxkit_plist::{CommentedString, PlistValue};
use serde::Serialize;

use super::{PBXObjects, ProjectObject, commented, reference_array};
use crate::decode::Fields;
use crate::error::Result;

/// A named set of build settings.
///
/// Setting values keep their plist shape: most are scalars, but values such
/// as `OTHER_LDFLAGS` are arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XCBuildConfiguration {
    pub reference: String,
    pub name: String,
    /// Reference to a file element holding an .xcconfig base, if any.
    pub base_configuration_reference: Option<String>,
    pub build_settings: IndexMap<String, PlistValue>,
}

impl XCBuildConfiguration {
    pub fn new(reference: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            name: name.into(),
            base_configuration_reference: None,
            build_settings: IndexMap::new(),
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            name: fields.string("name")?,
            base_configuration_reference: fields.optional_string("baseConfigurationReference")?,
            build_settings: fields.dictionary("buildSettings")?,
        })
    }
}

impl ProjectObject for XCBuildConfiguration {
    const ISA: &'static str = "XCBuildConfiguration";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string(Self::ISA));
        if let Some(base) = &self.base_configuration_reference {
            entries.insert(
                "baseConfigurationReference".to_string(),
                PlistValue::String(commented(base.clone(), objects.file_element_name(base))),
            );
        }
        entries.insert(
            "buildSettings".to_string(),
            PlistValue::Dictionary(self.build_settings.clone()),
        );
        entries.insert("name".to_string(), PlistValue::string(&self.name));
        (
            commented(self.reference.clone(), Some(self.name.clone())),
            PlistValue::Dictionary(entries),
        )
    }
}

/// An ordered list of build configurations with a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XCConfigurationList {
    pub reference: String,
    /// References to the list's configurations, in declared order.
    pub build_configurations: Vec<String>,
    pub default_configuration_is_visible: u32,
    pub default_configuration_name: String,
}

impl XCConfigurationList {
    pub fn new(
        reference: impl Into<String>,
        build_configurations: Vec<String>,
        default_configuration_name: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            build_configurations,
            default_configuration_is_visible: 0,
            default_configuration_name: default_configuration_name.into(),
        }
    }

    /// Returns a new list with the configuration appended, if not present.
    pub fn adding_configuration(&self, configuration: impl Into<String>) -> Self {
        let configuration = configuration.into();
        let mut next = self.clone();
        if !next.build_configurations.contains(&configuration) {
            next.build_configurations.push(configuration);
        }
        next
    }

    /// Returns a new list with the configuration removed.
    pub fn removing_configuration(&self, configuration: &str) -> Self {
        let mut next = self.clone();
        next.build_configurations.retain(|c| c != configuration);
        next
    }

    /// Returns a new list with the given default configuration name.
    pub fn with_default_configuration_name(&self, name: impl Into<String>) -> Self {
        Self {
            default_configuration_name: name.into(),
            ..self.clone()
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            build_configurations: fields.string_array("buildConfigurations")?,
            default_configuration_is_visible: fields.u32("defaultConfigurationIsVisible")?,
            default_configuration_name: fields.string("defaultConfigurationName")?,
        })
    }
}

impl ProjectObject for XCConfigurationList {
    const ISA: &'static str = "XCConfigurationList";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string(Self::ISA));
        entries.insert(
            "buildConfigurations".to_string(),
            reference_array(&self.build_configurations, |config| {
                objects.config_name(config)
            }),
        );
        entries.insert(
            "defaultConfigurationIsVisible".to_string(),
            PlistValue::string(self.default_configuration_is_visible.to_string()),
        );
        entries.insert(
            "defaultConfigurationName".to_string(),
            PlistValue::string(&self.default_configuration_name),
        );
        (
            commented(
                self.reference.clone(),
                objects.configuration_list_comment(&self.reference),
            ),
            PlistValue::Dictionary(entries),
        )
    }
}

#[cfg(test)]
mod tests {
    use pbxkit_plist::parse_str;

    use super::*;
    use crate::objects::{PBXNativeTarget, PBXObject, PBXProject};

    #[test]
    fn test_build_configuration_keeps_setting_shape() {
        let value = parse_str(
            "{ isa = XCBuildConfiguration; buildSettings = { PRODUCT_NAME = \"$(TARGET_NAME)\"; OTHER_LDFLAGS = (\"-ObjC\",); }; name = Debug; }",
        )
        .unwrap();
        let config = XCBuildConfiguration::decode("C".to_string(), &value).unwrap();
        assert_eq!(config.name, "Debug");
        assert!(config.build_settings.get("OTHER_LDFLAGS").unwrap().as_array().is_some());
    }

    #[test]
    fn test_adding_configuration_is_pure() {
        let list = XCConfigurationList::new("CL", vec!["DEBUG".to_string()], "Debug");
        let bigger = list.adding_configuration("RELEASE");
        assert_eq!(list.build_configurations.len(), 1);
        assert_eq!(bigger.build_configurations.len(), 2);
        // adding an existing configuration is a no-op
        assert_eq!(bigger.adding_configuration("RELEASE").build_configurations.len(), 2);
    }

    #[test]
    fn test_removing_configuration_is_pure() {
        let list = XCConfigurationList::new(
            "CL",
            vec!["DEBUG".to_string(), "RELEASE".to_string()],
            "Debug",
        );
        let smaller = list.removing_configuration("DEBUG");
        assert_eq!(list.build_configurations.len(), 2);
        assert_eq!(smaller.build_configurations, vec!["RELEASE".to_string()]);
    }

    #[test]
    fn test_project_owned_list_comment() {
        let objects = crate::objects::PBXObjects::new()
            .adding(PBXObject::Project(PBXProject::new("P", "CL", "Xcode 8.0", "MG")));
        assert_eq!(
            objects.configuration_list_comment("CL").as_deref(),
            Some("Build configuration list for PBXProject"),
        );
    }

    #[test]
    fn test_target_owned_list_comment() {
        let objects = crate::objects::PBXObjects::new()
            .adding(PBXObject::NativeTarget(PBXNativeTarget::new("T", "App", "CL")));
        assert_eq!(
            objects.configuration_list_comment("CL").as_deref(),
            Some("Build configuration list for PBXNativeTarget \"App\""),
        );
    }

    #[test]
    fn test_unowned_list_has_no_comment() {
        let objects = crate::objects::PBXObjects::new();
        assert_eq!(objects.configuration_list_comment("CL"), None);
    }
}
