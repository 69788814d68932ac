//! The object graph store.
//!
//! All project objects live here, partitioned by kind and keyed by their
//! reference string. Objects point at each other only through reference
//! strings; the store resolves them lazily at query time, so no object ever
//! owns another and the graph is trivially serializable.

mod config;
mod file;
mod phase;
mod project;
mod target;

use indexmap::IndexMap;
use pbxkit_plist::{CommentedString, PlistValue};
use serde::Serialize;

pub use config::{XCBuildConfiguration, XCConfigurationList};
pub use file::{PBXBuildFile, PBXFileElement, PBXFileReference, PBXGroup, PBXVariantGroup};
pub use phase::{
    DEFAULT_BUILD_ACTION_MASK, PBXCopyFilesBuildPhase, PBXFrameworksBuildPhase,
    PBXHeadersBuildPhase, PBXResourcesBuildPhase, PBXShellScriptBuildPhase, PBXSourcesBuildPhase,
};
pub use project::PBXProject;
pub use target::{
    PBXAggregateTarget, PBXContainerItemProxy, PBXNativeTarget, PBXTargetDependency,
};

use crate::error::{Error, Result};

/// An object that can render itself as a section entry.
pub trait ProjectObject {
    /// The `isa` tag for this kind, also the section name.
    const ISA: &'static str;

    /// The object's reference string.
    fn reference(&self) -> &str;

    /// The section entry: the reference key (with its derived comment) and
    /// the object's dictionary value.
    fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue);

    /// Preferred layout for the entry's subtree.
    fn multiline(&self) -> bool {
        true
    }
}

/// A scalar with an optional derived comment.
pub(crate) fn commented(string: impl Into<String>, comment: Option<String>) -> CommentedString {
    CommentedString {
        string: string.into(),
        comment,
    }
}

/// An array of reference scalars, each commented through `comment`.
pub(crate) fn reference_array<'a, F>(references: &'a [String], comment: F) -> PlistValue
where
    F: Fn(&'a str) -> Option<String>,
{
    PlistValue::Array(
        references
            .iter()
            .map(|reference| PlistValue::String(commented(reference.clone(), comment(reference))))
            .collect(),
    )
}

/// Any project object, tagged by kind.
///
/// Decoding dispatches on the `isa` tag through [`PBXObject::decode`];
/// unknown tags are a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PBXObject {
    AggregateTarget(PBXAggregateTarget),
    BuildFile(PBXBuildFile),
    ContainerItemProxy(PBXContainerItemProxy),
    CopyFilesBuildPhase(PBXCopyFilesBuildPhase),
    FileElement(PBXFileElement),
    FileReference(PBXFileReference),
    FrameworksBuildPhase(PBXFrameworksBuildPhase),
    Group(PBXGroup),
    HeadersBuildPhase(PBXHeadersBuildPhase),
    NativeTarget(PBXNativeTarget),
    Project(PBXProject),
    ResourcesBuildPhase(PBXResourcesBuildPhase),
    ShellScriptBuildPhase(PBXShellScriptBuildPhase),
    SourcesBuildPhase(PBXSourcesBuildPhase),
    TargetDependency(PBXTargetDependency),
    VariantGroup(PBXVariantGroup),
    BuildConfiguration(XCBuildConfiguration),
    ConfigurationList(XCConfigurationList),
}

impl PBXObject {
    /// Decode one object from its dictionary value, dispatching on `isa`.
    pub fn decode(isa: &str, reference: String, value: &PlistValue) -> Result<Self> {
        match isa {
            PBXAggregateTarget::ISA => {
                PBXAggregateTarget::decode(reference, value).map(Self::AggregateTarget)
            }
            PBXBuildFile::ISA => PBXBuildFile::decode(reference, value).map(Self::BuildFile),
            PBXContainerItemProxy::ISA => {
                PBXContainerItemProxy::decode(reference, value).map(Self::ContainerItemProxy)
            }
            PBXCopyFilesBuildPhase::ISA => {
                PBXCopyFilesBuildPhase::decode(reference, value).map(Self::CopyFilesBuildPhase)
            }
            PBXFileElement::ISA => PBXFileElement::decode(reference, value).map(Self::FileElement),
            PBXFileReference::ISA => {
                PBXFileReference::decode(reference, value).map(Self::FileReference)
            }
            PBXFrameworksBuildPhase::ISA => {
                PBXFrameworksBuildPhase::decode(reference, value).map(Self::FrameworksBuildPhase)
            }
            PBXGroup::ISA => PBXGroup::decode(reference, value).map(Self::Group),
            PBXHeadersBuildPhase::ISA => {
                PBXHeadersBuildPhase::decode(reference, value).map(Self::HeadersBuildPhase)
            }
            PBXNativeTarget::ISA => {
                PBXNativeTarget::decode(reference, value).map(Self::NativeTarget)
            }
            PBXProject::ISA => PBXProject::decode(reference, value).map(Self::Project),
            PBXResourcesBuildPhase::ISA => {
                PBXResourcesBuildPhase::decode(reference, value).map(Self::ResourcesBuildPhase)
            }
            PBXShellScriptBuildPhase::ISA => {
                PBXShellScriptBuildPhase::decode(reference, value).map(Self::ShellScriptBuildPhase)
            }
            PBXSourcesBuildPhase::ISA => {
                PBXSourcesBuildPhase::decode(reference, value).map(Self::SourcesBuildPhase)
            }
            PBXTargetDependency::ISA => {
                PBXTargetDependency::decode(reference, value).map(Self::TargetDependency)
            }
            PBXVariantGroup::ISA => {
                PBXVariantGroup::decode(reference, value).map(Self::VariantGroup)
            }
            XCBuildConfiguration::ISA => {
                XCBuildConfiguration::decode(reference, value).map(Self::BuildConfiguration)
            }
            XCConfigurationList::ISA => {
                XCConfigurationList::decode(reference, value).map(Self::ConfigurationList)
            }
            other => Err(Error::unknown_object_kind(other)),
        }
    }

    /// The `isa` tag of the wrapped object.
    pub fn isa(&self) -> &'static str {
        match self {
            PBXObject::AggregateTarget(_) => PBXAggregateTarget::ISA,
            PBXObject::BuildFile(_) => PBXBuildFile::ISA,
            PBXObject::ContainerItemProxy(_) => PBXContainerItemProxy::ISA,
            PBXObject::CopyFilesBuildPhase(_) => PBXCopyFilesBuildPhase::ISA,
            PBXObject::FileElement(_) => PBXFileElement::ISA,
            PBXObject::FileReference(_) => PBXFileReference::ISA,
            PBXObject::FrameworksBuildPhase(_) => PBXFrameworksBuildPhase::ISA,
            PBXObject::Group(_) => PBXGroup::ISA,
            PBXObject::HeadersBuildPhase(_) => PBXHeadersBuildPhase::ISA,
            PBXObject::NativeTarget(_) => PBXNativeTarget::ISA,
            PBXObject::Project(_) => PBXProject::ISA,
            PBXObject::ResourcesBuildPhase(_) => PBXResourcesBuildPhase::ISA,
            PBXObject::ShellScriptBuildPhase(_) => PBXShellScriptBuildPhase::ISA,
            PBXObject::SourcesBuildPhase(_) => PBXSourcesBuildPhase::ISA,
            PBXObject::TargetDependency(_) => PBXTargetDependency::ISA,
            PBXObject::VariantGroup(_) => PBXVariantGroup::ISA,
            PBXObject::BuildConfiguration(_) => XCBuildConfiguration::ISA,
            PBXObject::ConfigurationList(_) => XCConfigurationList::ISA,
        }
    }

    /// The wrapped object's reference string.
    pub fn reference(&self) -> &str {
        match self {
            PBXObject::AggregateTarget(o) => &o.reference,
            PBXObject::BuildFile(o) => &o.reference,
            PBXObject::ContainerItemProxy(o) => &o.reference,
            PBXObject::CopyFilesBuildPhase(o) => &o.reference,
            PBXObject::FileElement(o) => &o.reference,
            PBXObject::FileReference(o) => &o.reference,
            PBXObject::FrameworksBuildPhase(o) => &o.reference,
            PBXObject::Group(o) => &o.reference,
            PBXObject::HeadersBuildPhase(o) => &o.reference,
            PBXObject::NativeTarget(o) => &o.reference,
            PBXObject::Project(o) => &o.reference,
            PBXObject::ResourcesBuildPhase(o) => &o.reference,
            PBXObject::ShellScriptBuildPhase(o) => &o.reference,
            PBXObject::SourcesBuildPhase(o) => &o.reference,
            PBXObject::TargetDependency(o) => &o.reference,
            PBXObject::VariantGroup(o) => &o.reference,
            PBXObject::BuildConfiguration(o) => &o.reference,
            PBXObject::ConfigurationList(o) => &o.reference,
        }
    }
}

/// All project objects, partitioned by kind and keyed by reference.
///
/// The store is immutable once constructed: [`PBXObjects::adding`] and
/// [`PBXObjects::removing`] return a new store and leave the original intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PBXObjects {
    pub aggregate_targets: IndexMap<String, PBXAggregateTarget>,
    pub build_files: IndexMap<String, PBXBuildFile>,
    pub container_item_proxies: IndexMap<String, PBXContainerItemProxy>,
    pub copy_files_build_phases: IndexMap<String, PBXCopyFilesBuildPhase>,
    pub file_elements: IndexMap<String, PBXFileElement>,
    pub file_references: IndexMap<String, PBXFileReference>,
    pub frameworks_build_phases: IndexMap<String, PBXFrameworksBuildPhase>,
    pub groups: IndexMap<String, PBXGroup>,
    pub headers_build_phases: IndexMap<String, PBXHeadersBuildPhase>,
    pub native_targets: IndexMap<String, PBXNativeTarget>,
    pub projects: IndexMap<String, PBXProject>,
    pub resources_build_phases: IndexMap<String, PBXResourcesBuildPhase>,
    pub shell_script_build_phases: IndexMap<String, PBXShellScriptBuildPhase>,
    pub sources_build_phases: IndexMap<String, PBXSourcesBuildPhase>,
    pub target_dependencies: IndexMap<String, PBXTargetDependency>,
    pub variant_groups: IndexMap<String, PBXVariantGroup>,
    pub build_configurations: IndexMap<String, XCBuildConfiguration>,
    pub configuration_lists: IndexMap<String, XCConfigurationList>,
}

impl PBXObjects {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of objects across all kinds.
    pub fn len(&self) -> usize {
        self.aggregate_targets.len()
            + self.build_files.len()
            + self.container_item_proxies.len()
            + self.copy_files_build_phases.len()
            + self.file_elements.len()
            + self.file_references.len()
            + self.frameworks_build_phases.len()
            + self.groups.len()
            + self.headers_build_phases.len()
            + self.native_targets.len()
            + self.projects.len()
            + self.resources_build_phases.len()
            + self.shell_script_build_phases.len()
            + self.sources_build_phases.len()
            + self.target_dependencies.len()
            + self.variant_groups.len()
            + self.build_configurations.len()
            + self.configuration_lists.len()
    }

    /// Returns true if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up an object by reference across all kinds.
    pub fn get(&self, reference: &str) -> Option<PBXObject> {
        None.or_else(|| self.aggregate_targets.get(reference).cloned().map(PBXObject::AggregateTarget))
            .or_else(|| self.build_files.get(reference).cloned().map(PBXObject::BuildFile))
            .or_else(|| self.container_item_proxies.get(reference).cloned().map(PBXObject::ContainerItemProxy))
            .or_else(|| self.copy_files_build_phases.get(reference).cloned().map(PBXObject::CopyFilesBuildPhase))
            .or_else(|| self.file_elements.get(reference).cloned().map(PBXObject::FileElement))
            .or_else(|| self.file_references.get(reference).cloned().map(PBXObject::FileReference))
            .or_else(|| self.frameworks_build_phases.get(reference).cloned().map(PBXObject::FrameworksBuildPhase))
            .or_else(|| self.groups.get(reference).cloned().map(PBXObject::Group))
            .or_else(|| self.headers_build_phases.get(reference).cloned().map(PBXObject::HeadersBuildPhase))
            .or_else(|| self.native_targets.get(reference).cloned().map(PBXObject::NativeTarget))
            .or_else(|| self.projects.get(reference).cloned().map(PBXObject::Project))
            .or_else(|| self.resources_build_phases.get(reference).cloned().map(PBXObject::ResourcesBuildPhase))
            .or_else(|| self.shell_script_build_phases.get(reference).cloned().map(PBXObject::ShellScriptBuildPhase))
            .or_else(|| self.sources_build_phases.get(reference).cloned().map(PBXObject::SourcesBuildPhase))
            .or_else(|| self.target_dependencies.get(reference).cloned().map(PBXObject::TargetDependency))
            .or_else(|| self.variant_groups.get(reference).cloned().map(PBXObject::VariantGroup))
            .or_else(|| self.build_configurations.get(reference).cloned().map(PBXObject::BuildConfiguration))
            .or_else(|| self.configuration_lists.get(reference).cloned().map(PBXObject::ConfigurationList))
    }

    /// Returns a new store with the object added, keyed by its reference.
    pub fn adding(&self, object: PBXObject) -> Self {
        let mut next = self.clone();
        next.insert(object);
        next
    }

    /// Returns a new store with the referenced object removed, if present.
    pub fn removing(&self, reference: &str) -> Self {
        let mut next = self.clone();
        next.aggregate_targets.shift_remove(reference);
        next.build_files.shift_remove(reference);
        next.container_item_proxies.shift_remove(reference);
        next.copy_files_build_phases.shift_remove(reference);
        next.file_elements.shift_remove(reference);
        next.file_references.shift_remove(reference);
        next.frameworks_build_phases.shift_remove(reference);
        next.groups.shift_remove(reference);
        next.headers_build_phases.shift_remove(reference);
        next.native_targets.shift_remove(reference);
        next.projects.shift_remove(reference);
        next.resources_build_phases.shift_remove(reference);
        next.shell_script_build_phases.shift_remove(reference);
        next.sources_build_phases.shift_remove(reference);
        next.target_dependencies.shift_remove(reference);
        next.variant_groups.shift_remove(reference);
        next.build_configurations.shift_remove(reference);
        next.configuration_lists.shift_remove(reference);
        next
    }

    pub(crate) fn insert(&mut self, object: PBXObject) {
        match object {
            PBXObject::AggregateTarget(o) => {
                self.aggregate_targets.insert(o.reference.clone(), o);
            }
            PBXObject::BuildFile(o) => {
                self.build_files.insert(o.reference.clone(), o);
            }
            PBXObject::ContainerItemProxy(o) => {
                self.container_item_proxies.insert(o.reference.clone(), o);
            }
            PBXObject::CopyFilesBuildPhase(o) => {
                self.copy_files_build_phases.insert(o.reference.clone(), o);
            }
            PBXObject::FileElement(o) => {
                self.file_elements.insert(o.reference.clone(), o);
            }
            PBXObject::FileReference(o) => {
                self.file_references.insert(o.reference.clone(), o);
            }
            PBXObject::FrameworksBuildPhase(o) => {
                self.frameworks_build_phases.insert(o.reference.clone(), o);
            }
            PBXObject::Group(o) => {
                self.groups.insert(o.reference.clone(), o);
            }
            PBXObject::HeadersBuildPhase(o) => {
                self.headers_build_phases.insert(o.reference.clone(), o);
            }
            PBXObject::NativeTarget(o) => {
                self.native_targets.insert(o.reference.clone(), o);
            }
            PBXObject::Project(o) => {
                self.projects.insert(o.reference.clone(), o);
            }
            PBXObject::ResourcesBuildPhase(o) => {
                self.resources_build_phases.insert(o.reference.clone(), o);
            }
            PBXObject::ShellScriptBuildPhase(o) => {
                self.shell_script_build_phases.insert(o.reference.clone(), o);
            }
            PBXObject::SourcesBuildPhase(o) => {
                self.sources_build_phases.insert(o.reference.clone(), o);
            }
            PBXObject::TargetDependency(o) => {
                self.target_dependencies.insert(o.reference.clone(), o);
            }
            PBXObject::VariantGroup(o) => {
                self.variant_groups.insert(o.reference.clone(), o);
            }
            PBXObject::BuildConfiguration(o) => {
                self.build_configurations.insert(o.reference.clone(), o);
            }
            PBXObject::ConfigurationList(o) => {
                self.configuration_lists.insert(o.reference.clone(), o);
            }
        }
    }

    // Comment resolution. All lookups degrade to `None` for dangling
    // references; comments are cosmetic, never correctness-bearing.

    /// The comment for a configuration-list reference.
    ///
    /// Projects win over native targets. With multiple owners the first one
    /// in stable store order is used.
    pub fn configuration_list_comment(&self, reference: &str) -> Option<String> {
        if self
            .projects
            .values()
            .any(|project| project.build_configuration_list == reference)
        {
            return Some("Build configuration list for PBXProject".to_string());
        }
        self.native_targets
            .values()
            .find(|target| target.build_configuration_list == reference)
            .map(|target| {
                format!("Build configuration list for PBXNativeTarget \"{}\"", target.name)
            })
    }

    /// The name of a build configuration.
    pub fn config_name(&self, reference: &str) -> Option<String> {
        self.build_configurations
            .get(reference)
            .map(|config| config.name.clone())
    }

    /// The display name of a file element (name falling back to path).
    pub fn file_element_name(&self, reference: &str) -> Option<String> {
        if let Some(file) = self.file_references.get(reference) {
            return file.display_name().map(str::to_string);
        }
        if let Some(group) = self.groups.get(reference) {
            return group.name.clone().or_else(|| group.path.clone());
        }
        if let Some(group) = self.variant_groups.get(reference) {
            return Some(group.name.clone());
        }
        if let Some(element) = self.file_elements.get(reference) {
            return element.name.clone().or_else(|| element.path.clone());
        }
        None
    }

    /// The name of a native or aggregate target.
    pub fn target_name(&self, reference: &str) -> Option<String> {
        if let Some(target) = self.native_targets.get(reference) {
            return Some(target.name.clone());
        }
        self.aggregate_targets
            .get(reference)
            .map(|target| target.name.clone())
    }

    /// The display name of a build phase ("Sources", "Frameworks", ...).
    pub fn build_phase_name(&self, reference: &str) -> Option<&'static str> {
        if self.sources_build_phases.contains_key(reference) {
            Some("Sources")
        } else if self.frameworks_build_phases.contains_key(reference) {
            Some("Frameworks")
        } else if self.resources_build_phases.contains_key(reference) {
            Some("Resources")
        } else if self.headers_build_phases.contains_key(reference) {
            Some("Headers")
        } else if self.copy_files_build_phases.contains_key(reference) {
            Some("CopyFiles")
        } else if self.shell_script_build_phases.contains_key(reference) {
            Some("ShellScript")
        } else {
            None
        }
    }

    /// The comment for a build-file reference inside a phase's `files` list,
    /// e.g. `main.swift in Sources`.
    pub fn build_file_comment(&self, reference: &str, phase_name: &str) -> Option<String> {
        let build_file = self.build_files.get(reference)?;
        let file_name = self.file_element_name(&build_file.file_ref)?;
        Some(format!("{file_name} in {phase_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> PBXObjects {
        let mut objects = PBXObjects::new();
        objects.insert(PBXObject::FileReference(PBXFileReference::new(
            "FREF",
            Some("main.swift".to_string()),
            None,
            "<group>",
        )));
        objects.insert(PBXObject::BuildFile(PBXBuildFile::new("BF", "FREF")));
        objects
    }

    #[test]
    fn test_get_probes_all_kinds() {
        let objects = sample_store();
        assert!(matches!(objects.get("FREF"), Some(PBXObject::FileReference(_))));
        assert!(matches!(objects.get("BF"), Some(PBXObject::BuildFile(_))));
        assert!(objects.get("MISSING").is_none());
    }

    #[test]
    fn test_adding_leaves_original_intact() {
        let objects = sample_store();
        let bigger = objects.adding(PBXObject::BuildFile(PBXBuildFile::new("BF2", "FREF")));
        assert_eq!(objects.len(), 2);
        assert_eq!(bigger.len(), 3);
        assert!(objects.get("BF2").is_none());
    }

    #[test]
    fn test_removing_leaves_original_intact() {
        let objects = sample_store();
        let smaller = objects.removing("BF");
        assert_eq!(objects.len(), 2);
        assert_eq!(smaller.len(), 1);
        assert!(smaller.get("BF").is_none());
    }

    #[test]
    fn test_build_file_comment() {
        let objects = sample_store();
        assert_eq!(
            objects.build_file_comment("BF", "Sources").as_deref(),
            Some("main.swift in Sources"),
        );
        assert_eq!(objects.build_file_comment("MISSING", "Sources"), None);
    }

    #[test]
    fn test_unknown_isa_fails_decode() {
        let value = pbxkit_plist::parse_str("{ isa = PBXFancyNewKind; }").unwrap();
        let err = PBXObject::decode("PBXFancyNewKind", "REF".to_string(), &value).unwrap_err();
        assert!(matches!(*err, Error::UnknownObjectKind { .. }));
    }
}
