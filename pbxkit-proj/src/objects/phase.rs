//! Build phase object kinds.
//!
//! Four phases carry only the common fields; copy-files and shell-script
//! phases extend them.

use indexmap::IndexMap;
use pbxkit_plist::{CommentedString, PlistValue};
use serde::Serialize;

use super::{PBXObjects, ProjectObject, commented, reference_array};
use crate::decode::Fields;
use crate::error::Result;

/// The mask Xcode writes for phases that run in every build action.
pub const DEFAULT_BUILD_ACTION_MASK: u32 = 2147483647;

/// The dictionary entries every phase kind shares.
fn phase_entries(
    isa: &str,
    objects: &PBXObjects,
    phase_name: &str,
    build_action_mask: u32,
    files: &[String],
    run_only: u32,
) -> IndexMap<String, PlistValue> {
    let mut entries = IndexMap::new();
    entries.insert("isa".to_string(), PlistValue::string(isa));
    entries.insert(
        "buildActionMask".to_string(),
        PlistValue::string(build_action_mask.to_string()),
    );
    entries.insert(
        "files".to_string(),
        reference_array(files, |file| objects.build_file_comment(file, phase_name)),
    );
    entries.insert(
        "runOnlyForDeploymentPostprocessing".to_string(),
        PlistValue::string(run_only.to_string()),
    );
    entries
}

macro_rules! plain_build_phase {
    ($(#[$meta:meta])* $name:ident, $isa:literal, $display:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        pub struct $name {
            pub reference: String,
            pub build_action_mask: u32,
            /// References to the phase's build files, in declared order.
            pub files: Vec<String>,
            pub run_only_for_deployment_postprocessing: u32,
        }

        impl $name {
            pub fn new(reference: impl Into<String>, files: Vec<String>) -> Self {
                Self {
                    reference: reference.into(),
                    build_action_mask: DEFAULT_BUILD_ACTION_MASK,
                    files,
                    run_only_for_deployment_postprocessing: 0,
                }
            }

            pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
                let fields = Fields::new($isa, value)?;
                Ok(Self {
                    reference,
                    build_action_mask: fields.u32("buildActionMask")?,
                    files: fields.optional_string_array("files")?,
                    run_only_for_deployment_postprocessing: fields
                        .u32("runOnlyForDeploymentPostprocessing")?,
                })
            }
        }

        impl ProjectObject for $name {
            const ISA: &'static str = $isa;

            fn reference(&self) -> &str {
                &self.reference
            }

            fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue) {
                let entries = phase_entries(
                    $isa,
                    objects,
                    $display,
                    self.build_action_mask,
                    &self.files,
                    self.run_only_for_deployment_postprocessing,
                );
                (
                    commented(self.reference.clone(), Some($display.to_string())),
                    PlistValue::Dictionary(entries),
                )
            }
        }
    };
}

plain_build_phase!(
    /// The compile-sources phase.
    PBXSourcesBuildPhase,
    "PBXSourcesBuildPhase",
    "Sources"
);
plain_build_phase!(
    /// The link-with-frameworks phase.
    PBXFrameworksBuildPhase,
    "PBXFrameworksBuildPhase",
    "Frameworks"
);
plain_build_phase!(
    /// The copy-resources phase.
    PBXResourcesBuildPhase,
    "PBXResourcesBuildPhase",
    "Resources"
);
plain_build_phase!(
    /// The copy-headers phase.
    PBXHeadersBuildPhase,
    "PBXHeadersBuildPhase",
    "Headers"
);

/// A copy-files phase with a destination inside the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXCopyFilesBuildPhase {
    pub reference: String,
    pub build_action_mask: u32,
    pub files: Vec<String>,
    pub run_only_for_deployment_postprocessing: u32,
    pub dst_path: String,
    pub dst_subfolder_spec: u32,
}

impl PBXCopyFilesBuildPhase {
    pub fn new(
        reference: impl Into<String>,
        files: Vec<String>,
        dst_path: impl Into<String>,
        dst_subfolder_spec: u32,
    ) -> Self {
        Self {
            reference: reference.into(),
            build_action_mask: DEFAULT_BUILD_ACTION_MASK,
            files,
            run_only_for_deployment_postprocessing: 0,
            dst_path: dst_path.into(),
            dst_subfolder_spec,
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            build_action_mask: fields.u32("buildActionMask")?,
            files: fields.optional_string_array("files")?,
            run_only_for_deployment_postprocessing: fields
                .u32("runOnlyForDeploymentPostprocessing")?,
            dst_path: fields.string("dstPath")?,
            dst_subfolder_spec: fields.u32("dstSubfolderSpec")?,
        })
    }
}

impl ProjectObject for PBXCopyFilesBuildPhase {
    const ISA: &'static str = "PBXCopyFilesBuildPhase";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = phase_entries(
            Self::ISA,
            objects,
            "CopyFiles",
            self.build_action_mask,
            &self.files,
            self.run_only_for_deployment_postprocessing,
        );
        entries.insert("dstPath".to_string(), PlistValue::string(&self.dst_path));
        entries.insert(
            "dstSubfolderSpec".to_string(),
            PlistValue::string(self.dst_subfolder_spec.to_string()),
        );
        (
            commented(self.reference.clone(), Some("CopyFiles".to_string())),
            PlistValue::Dictionary(entries),
        )
    }
}

/// A run-script phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PBXShellScriptBuildPhase {
    pub reference: String,
    pub build_action_mask: u32,
    pub files: Vec<String>,
    pub run_only_for_deployment_postprocessing: u32,
    pub input_paths: Vec<String>,
    pub output_paths: Vec<String>,
    pub shell_path: String,
    pub shell_script: String,
}

impl PBXShellScriptBuildPhase {
    pub fn new(reference: impl Into<String>, shell_script: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            build_action_mask: DEFAULT_BUILD_ACTION_MASK,
            files: Vec::new(),
            run_only_for_deployment_postprocessing: 0,
            input_paths: Vec::new(),
            output_paths: Vec::new(),
            shell_path: "/bin/sh".to_string(),
            shell_script: shell_script.into(),
        }
    }

    pub(crate) fn decode(reference: String, value: &PlistValue) -> Result<Self> {
        let fields = Fields::new(Self::ISA, value)?;
        Ok(Self {
            reference,
            build_action_mask: fields.u32("buildActionMask")?,
            files: fields.optional_string_array("files")?,
            run_only_for_deployment_postprocessing: fields
                .u32("runOnlyForDeploymentPostprocessing")?,
            input_paths: fields.optional_string_array("inputPaths")?,
            output_paths: fields.optional_string_array("outputPaths")?,
            shell_path: fields.string("shellPath")?,
            shell_script: fields.string("shellScript")?,
        })
    }
}

impl ProjectObject for PBXShellScriptBuildPhase {
    const ISA: &'static str = "PBXShellScriptBuildPhase";

    fn reference(&self) -> &str {
        &self.reference
    }

    fn plist_entry(&self, objects: &PBXObjects) -> (CommentedString, PlistValue) {
        let mut entries = phase_entries(
            Self::ISA,
            objects,
            "ShellScript",
            self.build_action_mask,
            &self.files,
            self.run_only_for_deployment_postprocessing,
        );
        entries.insert(
            "inputPaths".to_string(),
            reference_array(&self.input_paths, |_| None),
        );
        entries.insert(
            "outputPaths".to_string(),
            reference_array(&self.output_paths, |_| None),
        );
        entries.insert("shellPath".to_string(), PlistValue::string(&self.shell_path));
        entries.insert("shellScript".to_string(), PlistValue::string(&self.shell_script));
        (
            commented(self.reference.clone(), Some("ShellScript".to_string())),
            PlistValue::Dictionary(entries),
        )
    }
}

#[cfg(test)]
mod tests {
    use pbxkit_plist::parse_str;

    use super::*;

    #[test]
    fn test_plain_phase_decode() {
        let value = parse_str(
            "{ isa = PBXSourcesBuildPhase; buildActionMask = 2147483647; files = (BF,); runOnlyForDeploymentPostprocessing = 0; }",
        )
        .unwrap();
        let phase = PBXSourcesBuildPhase::decode("SP".to_string(), &value).unwrap();
        assert_eq!(phase.build_action_mask, DEFAULT_BUILD_ACTION_MASK);
        assert_eq!(phase.files, vec!["BF".to_string()]);
    }

    #[test]
    fn test_missing_files_decodes_empty() {
        let value = parse_str(
            "{ isa = PBXFrameworksBuildPhase; buildActionMask = 0; runOnlyForDeploymentPostprocessing = 1; }",
        )
        .unwrap();
        let phase = PBXFrameworksBuildPhase::decode("FP".to_string(), &value).unwrap();
        assert!(phase.files.is_empty());
        assert_eq!(phase.run_only_for_deployment_postprocessing, 1);
    }

    #[test]
    fn test_copy_files_requires_destination() {
        let value = parse_str(
            "{ isa = PBXCopyFilesBuildPhase; buildActionMask = 0; runOnlyForDeploymentPostprocessing = 0; }",
        )
        .unwrap();
        assert!(PBXCopyFilesBuildPhase::decode("CP".to_string(), &value).is_err());
    }

    #[test]
    fn test_shell_script_defaults() {
        let phase = PBXShellScriptBuildPhase::new("SS", "echo done");
        assert_eq!(phase.shell_path, "/bin/sh");
        assert!(phase.files.is_empty());
    }
}
