//! Rendering and round-trip tests over a small but representative graph.
//!
//! The snapshot pins the exact byte layout of the document; run
//! `cargo insta review` to update it when making intentional changes.

use pbxkit_proj::{
    PBXBuildFile, PBXFileReference, PBXGroup, PBXNativeTarget, PBXObject, PBXObjects, PBXProj,
    PBXProject, PBXSourcesBuildPhase, XCBuildConfiguration, XCConfigurationList,
};

/// One application target with a source file, a project-owned configuration
/// list, and a target-owned configuration list.
fn sample_proj() -> PBXProj {
    let mut file_ref = PBXFileReference::new("FREF", None, Some("main.swift".to_string()), "<group>");
    file_ref.last_known_file_type = Some("sourcecode.swift".to_string());

    let mut debug = XCBuildConfiguration::new("DBG", "Debug");
    debug
        .build_settings
        .insert("PRODUCT_NAME".to_string(), pbxkit_plist::PlistValue::string("App"));

    let mut target = PBXNativeTarget::new("T", "App", "TCL");
    target.build_phases = vec!["SP".to_string()];

    let mut project = PBXProject::new("P", "CL", "Xcode 8.0", "MG");
    project.known_regions = vec!["en".to_string()];
    project.targets = vec!["T".to_string()];

    let objects = PBXObjects::new()
        .adding(PBXObject::FileReference(file_ref))
        .adding(PBXObject::BuildFile(PBXBuildFile::new("BF", "FREF")))
        .adding(PBXObject::Group(PBXGroup::new(
            "MG",
            vec!["FREF".to_string()],
            "<group>",
        )))
        .adding(PBXObject::SourcesBuildPhase(PBXSourcesBuildPhase::new(
            "SP",
            vec!["BF".to_string()],
        )))
        .adding(PBXObject::BuildConfiguration(debug))
        .adding(PBXObject::ConfigurationList(XCConfigurationList::new(
            "CL",
            vec!["DBG".to_string()],
            "Debug",
        )))
        .adding(PBXObject::ConfigurationList(XCConfigurationList::new(
            "TCL",
            vec!["DBG".to_string()],
            "Debug",
        )))
        .adding(PBXObject::NativeTarget(target))
        .adding(PBXObject::Project(project));

    PBXProj::new(1, 46, "P", objects)
}

#[test]
fn test_document_snapshot() {
    let output = sample_proj().render();
    insta::assert_snapshot!("pbxproj_document", output);
}

#[test]
fn test_render_is_deterministic() {
    let proj = sample_proj();
    assert_eq!(proj.render(), proj.render());
}

#[test]
fn test_round_trip_preserves_graph() {
    let proj = sample_proj();
    let parsed = PBXProj::parse_str(&proj.render()).unwrap();
    assert_eq!(parsed, proj);
}

#[test]
fn test_empty_kinds_emit_no_section() {
    let text = sample_proj().render();
    assert!(!text.contains("PBXVariantGroup section"));
    assert!(!text.contains("PBXShellScriptBuildPhase section"));
    assert!(text.contains("/* Begin PBXBuildFile section */"));
    assert!(text.contains("/* End XCConfigurationList section */"));
}

#[test]
fn test_document_ends_with_newline() {
    let text = sample_proj().render();
    assert!(text.ends_with("}\n"));
}

#[test]
fn test_dangling_reference_renders_without_comment() {
    let objects = PBXObjects::new().adding(PBXObject::BuildFile(PBXBuildFile::new(
        "BF", "MISSING",
    )));
    let text = PBXProj::new(1, 46, "P", objects).render();
    assert!(text.contains("BF = {isa = PBXBuildFile; fileRef = MISSING; };"));
}

#[test]
fn test_write_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.pbxproj");
    let proj = sample_proj();
    proj.write(&path).unwrap();
    assert_eq!(PBXProj::from_path(&path).unwrap(), proj);
}

#[test]
fn test_graph_serializes_to_json() {
    let json = serde_json::to_value(sample_proj()).unwrap();
    assert_eq!(json["archive_version"], 1);
    assert_eq!(json["objects"]["native_targets"]["T"]["name"], "App");
}
