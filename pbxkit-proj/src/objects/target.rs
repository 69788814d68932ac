//! Target object kinds and cross-project proxies.

use indexmap::IndexMap;
use pbxkit_plist::{CommentedString, PlistValue};
use serde::Serialize;

use super::{PBXObjects, ProjectObject, commented, reference_array};
use crate::decode::Fields;
use crate::error::Result;

/// A target that produces a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXNativeTarget {
    pub reference: String,
    pub name: String,
    /// Reference to the target's configuration list.
    pub build_configuration_list: String,
    pub build_phases: Vec<String>,
    pub build_rules: Vec<String>,
    pub dependencies: Vec<String>,
    pub product_name: Option<String>,
    pub product_reference: Option<String>,
    pub product_type: Option<String>,
}

impl PBXNativeTarget {
    pub fn new(
        reference: impl Into<String>,
        name: impl Into<String>,
        build_configuration_list: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            name: name.into(),
            build_configuration_list: build_configuration_list.into(),
            build_phases: Vec::new(),
            build_rules: Vec::new(),
            dependencies: Vec::new(),
            product_name: None,
            product_reference: None,
            product_type: None,
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            name: fields.string("name")?,
            build_configuration_list: fields.string("buildConfigurationList")?,
            build_phases: fields.optional_string_array("buildPhases")?,
            build_rules: fields.optional_string_array("buildRules")?,
            dependencies: fields.optional_string_array("dependencies")?,
            product_name: fields.optional_string("productName")?,
            product_reference: fields.optional_string("productReference")?,
            product_type: fields.optional_string("productType")?,
        })
    }
}

impl ProjectObject for PBXNativeTarget {
    const ISA: &'static str = "PBXNativeTarget";

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
            "buildPhases".to_string(),
            reference_array(&self.build_phases, |phase| {
                objects.build_phase_name(phase).map(str::to_string)
            }),
        );
        entries.insert(
            "buildRules".to_string(),
            reference_array(&self.build_rules, |_| None),
        );
        entries.insert(
            "dependencies".to_string(),
            reference_array(&self.dependencies, |_| {
                Some(PBXTargetDependency::ISA.to_string())
            }),
        );
        entries.insert("name".to_string(), PlistValue::string(&self.name));
        if let Some(product_name) = &self.product_name {
            entries.insert("productName".to_string(), PlistValue::string(product_name));
        }
        if let Some(product_reference) = &self.product_reference {
            entries.insert(
                "productReference".to_string(),
                PlistValue::String(commented(
                    product_reference.clone(),
                    objects.file_element_name(product_reference),
                )),
            );
        }
        if let Some(product_type) = &self.product_type {
            entries.insert("productType".to_string(), PlistValue::string(product_type));
        }
        (
            commented(self.reference.clone(), Some(self.name.clone())),
            PlistValue::Dictionary(entries),
        )
    }
}

/// A target that only aggregates other targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXAggregateTarget {
    pub reference: String,
    pub name: String,
    pub build_configuration_list: String,
    pub build_phases: Vec<String>,
    pub dependencies: Vec<String>,
    pub product_name: Option<String>,
}

impl PBXAggregateTarget {
    pub fn new(
        reference: impl Into<String>,
        name: impl Into<String>,
        build_configuration_list: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            name: name.into(),
            build_configuration_list: build_configuration_list.into(),
            build_phases: Vec::new(),
            dependencies: Vec::new(),
            product_name: None,
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            name: fields.string("name")?,
            build_configuration_list: fields.string("buildConfigurationList")?,
            build_phases: fields.optional_string_array("buildPhases")?,
            dependencies: fields.optional_string_array("dependencies")?,
            product_name: fields.optional_string("productName")?,
        })
    }
}

impl ProjectObject for PBXAggregateTarget {
    const ISA: &'static str = "PBXAggregateTarget";

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
            "buildPhases".to_string(),
            reference_array(&self.build_phases, |phase| {
                objects.build_phase_name(phase).map(str::to_string)
            }),
        );
        entries.insert(
            "dependencies".to_string(),
            reference_array(&self.dependencies, |_| {
                Some(PBXTargetDependency::ISA.to_string())
            }),
        );
        entries.insert("name".to_string(), PlistValue::string(&self.name));
        if let Some(product_name) = &self.product_name {
            entries.insert("productName".to_string(), PlistValue::string(product_name));
        }
        (
            commented(self.reference.clone(), Some(self.name.clone())),
            PlistValue::Dictionary(entries),
        )
    }
}

/// A dependency on another target, resolved through a container proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXTargetDependency {
    pub reference: String,
    /// Reference to the depended-upon target.
    pub target: String,
    /// Reference to the container item proxy.
    pub target_proxy: String,
}

impl PBXTargetDependency {
    pub fn new(
        reference: impl Into<String>,
        target: impl Into<String>,
        target_proxy: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            target: target.into(),
            target_proxy: target_proxy.into(),
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            target: fields.string("target")?,
            target_proxy: fields.string("targetProxy")?,
        })
    }
}

impl ProjectObject for PBXTargetDependency {
    const ISA: &'static str = "PBXTargetDependency";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string(Self::ISA));
        entries.insert(
            "target".to_string(),
            PlistValue::String(commented(
                self.target.clone(),
                objects.target_name(&self.target),
            )),
        );
        entries.insert(
            "targetProxy".to_string(),
            PlistValue::String(commented(
                self.target_proxy.clone(),
                Some(PBXContainerItemProxy::ISA.to_string()),
            )),
        );
        (
            commented(self.reference.clone(), Some(Self::ISA.to_string())),
            PlistValue::Dictionary(entries),
        )
    }
}

/// A proxy standing in for an object in another container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXContainerItemProxy {
    pub reference: String,
    /// Reference to the containing project object.
    pub container_portal: String,
    pub proxy_type: u32,
    pub remote_global_id_string: String,
    pub remote_info: String,
}

impl PBXContainerItemProxy {
    pub fn new(
        reference: impl Into<String>,
        container_portal: impl Into<String>,
        remote_global_id_string: impl Into<String>,
        remote_info: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            container_portal: container_portal.into(),
            proxy_type: 1,
            remote_global_id_string: remote_global_id_string.into(),
            remote_info: remote_info.into(),
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            container_portal: fields.string("containerPortal")?,
            proxy_type: fields.u32("proxyType")?,
            remote_global_id_string: fields.string("remoteGlobalIDString")?,
            remote_info: fields.string("remoteInfo")?,
        })
    }
}

impl ProjectObject for PBXContainerItemProxy {
    const ISA: &'static str = "PBXContainerItemProxy";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, _objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string(Self::ISA));
        entries.insert(
            "containerPortal".to_string(),
            PlistValue::String(commented(
                self.container_portal.clone(),
                Some("Project object".to_string()),
            )),
        );
        entries.insert(
            "proxyType".to_string(),
            PlistValue::string(self.proxy_type.to_string()),
        );
        entries.insert(
            "remoteGlobalIDString".to_string(),
            PlistValue::string(&self.remote_global_id_string),
        );
        entries.insert("remoteInfo".to_string(), PlistValue::string(&self.remote_info));
        (
            commented(self.reference.clone(), Some(Self::ISA.to_string())),
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
    fn test_native_target_decode() {
        let value = parse_str(
            "{ isa = PBXNativeTarget; buildConfigurationList = CL; buildPhases = (SP, FP,); name = App; productType = \"com.apple.product-type.application\"; }",
        )
        .unwrap();
        let target = PBXNativeTarget::decode("T".to_string(), &value).unwrap();
        assert_eq!(target.name, "App");
        assert_eq!(target.build_phases.len(), 2);
        assert!(target.product_reference.is_none());
    }

    #[test]
    fn test_target_dependency_requires_proxy() {
        let value = parse_str("{ isa = PBXTargetDependency; target = T; }").unwrap();
        let err = PBXTargetDependency::decode("D".to_string(), &value).unwrap_err();
        assert!(
            matches!(*err, Error::MissingField { ref field, .. } if field == "targetProxy")
        );
    }

    #[test]
    fn test_container_item_proxy_type_coercion() {
        let value = parse_str(
            "{ isa = PBXContainerItemProxy; containerPortal = P; proxyType = notANumber; remoteGlobalIDString = R; remoteInfo = App; }",
        )
        .unwrap();
        let err = PBXContainerItemProxy::decode("X".to_string(), &value).unwrap_err();
        assert!(matches!(*err, Error::MalformedValue { ref field, .. } if field == "proxyType"));
    }
}
