//! Document rendering.
//!
//! The document shape is fixed: header marker, archive and object versions,
//! an always-empty `classes` sequence, one section per non-empty object kind
//! in a fixed order, and the trailing root-object scalar.

use indexmap::IndexMap;
use pbxkit_plist::{CommentedString, PlistValue, PlistWriter};

use crate::objects::{PBXObjects, ProjectObject};
use crate::proj::PBXProj;

pub(crate) fn render(proj: &PBXProj) -> String {
    let mut writer = PlistWriter::new();
    writer.raw("// !$*UTF8*$!");
    writer.newline();
    writer.write_dictionary_start();
    writer.write_key_value(
        &CommentedString::new("archiveVersion"),
        &PlistValue::string(proj.archive_version.to_string()),
        true,
    );
    writer.write_key_value(
        &CommentedString::new("classes"),
        &PlistValue::Array(Vec::new()),
        true,
    );
    writer.write_key_value(
        &CommentedString::new("objectVersion"),
        &PlistValue::string(proj.object_version.to_string()),
        true,
    );

    writer.write_indent();
    writer.raw("objects = {");
    writer.increase_indent();
    writer.newline();

    let objects = &proj.objects;
    write_section(&mut writer, objects, &objects.aggregate_targets);
    write_section(&mut writer, objects, &objects.build_files);
    write_section(&mut writer, objects, &objects.container_item_proxies);
    write_section(&mut writer, objects, &objects.copy_files_build_phases);
    write_section(&mut writer, objects, &objects.file_elements);
    write_section(&mut writer, objects, &objects.file_references);
    write_section(&mut writer, objects, &objects.frameworks_build_phases);
    write_section(&mut writer, objects, &objects.groups);
    write_section(&mut writer, objects, &objects.headers_build_phases);
    write_section(&mut writer, objects, &objects.native_targets);
    write_section(&mut writer, objects, &objects.projects);
    write_section(&mut writer, objects, &objects.resources_build_phases);
    write_section(&mut writer, objects, &objects.shell_script_build_phases);
    write_section(&mut writer, objects, &objects.sources_build_phases);
    write_section(&mut writer, objects, &objects.target_dependencies);
    write_section(&mut writer, objects, &objects.variant_groups);
    write_section(&mut writer, objects, &objects.build_configurations);
    write_section(&mut writer, objects, &objects.configuration_lists);

    writer.decrease_indent();
    writer.write_indent();
    writer.raw("};");
    writer.newline();

    writer.write_key_value(
        &CommentedString::new("rootObject"),
        &PlistValue::String(CommentedString::with_comment(
            proj.root_object.clone(),
            "Project object",
        )),
        true,
    );
    writer.write_dictionary_end();
    writer.newline();
    writer.finish()
}

/// Write one kind's section: begin/end markers around the kind's entries,
/// sorted by reference. Empty kinds produce no output at all.
fn write_section<T: ProjectObject>(
    writer: &mut PlistWriter,
    objects: &PBXObjects,
    collection: &IndexMap<String, T>,
) {
    if collection.is_empty() {
        return;
    }
    writer.newline();
    writer.raw(&format!("/* Begin {} section */", T::ISA));
    writer.newline();

    let mut sorted: Vec<&T> = collection.values().collect();
    sorted.sort_by(|left, right| left.reference().cmp(right.reference()));
    for object in sorted {
        let (key, value) = object.plist_entry(objects);
        writer.write_key_value(&key, &value, object.multiline());
    }

    writer.raw(&format!("/* End {} section */", T::ISA));
    writer.newline();
}
