//! The dialect writer.
//!
//! Rendering is total and deterministic: the same value always produces
//! byte-identical text. Downstream tooling diffs these files, so the exact
//! quoting, ordering, and indentation rules here are load-bearing.

use std::borrow::Cow;

use crate::value::{CommentedString, PlistValue};

/// Characters that force a scalar into quoted form.
const QUOTE_TRIGGERS: &[char] = &[
    '<', '>', ';', '&', '$', '{', '}', '+', '-', '=', ',', ' ', '"',
];

/// Writes plist values in the pbxproj dialect.
///
/// The writer keeps a single multiline flag. Each key/value write scopes the
/// flag to its subtree and restores the previous mode afterwards; in
/// single-line mode newlines degrade to single spaces and indentation is
/// suppressed.
#[derive(Debug, Clone)]
pub struct PlistWriter {
    indent: usize,
    multiline: bool,
    buffer: String,
}

impl PlistWriter {
    /// Create a writer in multi-line mode with no indentation.
    pub fn new() -> Self {
        Self {
            indent: 0,
            multiline: true,
            buffer: String::new(),
        }
    }

    /// Append raw text without indentation or newline handling.
    pub fn raw(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Append a line break: `\n` in multi-line mode, a space otherwise.
    pub fn newline(&mut self) {
        if self.multiline {
            self.buffer.push('\n');
        } else {
            self.buffer.push(' ');
        }
    }

    /// Append one tab per indentation level. No-op in single-line mode.
    pub fn write_indent(&mut self) {
        if self.multiline {
            for _ in 0..self.indent {
                self.buffer.push('\t');
            }
        }
    }

    /// Increase the indentation level.
    pub fn increase_indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease the indentation level.
    pub fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write any plist value at the current position.
    pub fn write_value(&mut self, value: &PlistValue) {
        match value {
            PlistValue::String(cs) => self.write_commented_string(cs),
            PlistValue::Array(values) => self.write_array(values),
            PlistValue::Dictionary(_) => self.write_dictionary(value),
        }
    }

    /// Write a scalar, applying the quoting rule, boolean normalization, and
    /// the trailing inline comment.
    pub fn write_commented_string(&mut self, cs: &CommentedString) {
        let mut string: Cow<'_, str> = Cow::Borrowed(&cs.string);

        if !is_quoted(&string) && needs_quoting(&string) {
            string = Cow::Owned(quoted(&string));
        }

        if string == "false" {
            string = Cow::Borrowed("NO");
        } else if string == "true" {
            string = Cow::Borrowed("YES");
        }

        self.buffer.push_str(&string);
        if let Some(comment) = &cs.comment {
            self.buffer.push(' ');
            self.write_comment(comment);
        }
    }

    /// Write an inline `/* comment */`.
    pub fn write_comment(&mut self, comment: &str) {
        self.buffer.push_str("/* ");
        self.buffer.push_str(comment);
        self.buffer.push_str(" */");
    }

    /// Write a `key = value;` entry followed by a line break.
    ///
    /// `multiline` is the layout the value prefers; it applies to the whole
    /// subtree and the previous mode is restored before the trailing break.
    pub fn write_key_value(&mut self, key: &CommentedString, value: &PlistValue, multiline: bool) {
        self.write_indent();
        let before = self.multiline;
        self.multiline = multiline;
        self.write_commented_string(key);
        self.raw(" = ");
        self.write_value(value);
        self.raw(";");
        self.multiline = before;
        self.newline();
    }

    fn write_dictionary(&mut self, dict: &PlistValue) {
        let entries = dict.as_dictionary().expect("dictionary value");
        self.write_dictionary_start();
        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort_by(|left, right| compare_keys(left, right));
        for key in keys {
            let value = &entries[key.as_str()];
            self.write_key_value(&CommentedString::new(key.as_str()), value, self.multiline);
        }
        self.write_dictionary_end();
    }

    /// Open a dictionary: `{` plus a line break and one indent level.
    pub fn write_dictionary_start(&mut self) {
        self.buffer.push('{');
        if self.multiline {
            self.newline();
        }
        self.increase_indent();
    }

    /// Close a dictionary: dedent, indent to level, `}`.
    pub fn write_dictionary_end(&mut self) {
        self.decrease_indent();
        self.write_indent();
        self.buffer.push('}');
    }

    fn write_array(&mut self, values: &[PlistValue]) {
        self.buffer.push('(');
        if self.multiline {
            self.newline();
        }
        self.increase_indent();
        for value in values {
            self.write_indent();
            self.write_value(value);
            self.buffer.push(',');
            self.newline();
        }
        self.decrease_indent();
        self.write_indent();
        self.buffer.push(')');
    }

    /// Consume the writer and return the rendered text.
    pub fn finish(self) -> String {
        self.buffer
    }

    /// The text rendered so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Default for PlistWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Dictionary key order: `isa` first, the rest lexicographically.
pub(crate) fn compare_keys(left: &str, right: &str) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    match (left == "isa", right == "isa") {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => left.cmp(right),
    }
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty() || s.contains(QUOTE_TRIGGERS)
}

fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    fn render(value: &PlistValue) -> String {
        let mut writer = PlistWriter::new();
        writer.write_value(value);
        writer.finish()
    }

    #[test]
    fn test_plain_scalar_unquoted() {
        assert_eq!(render(&PlistValue::string("plain")), "plain");
    }

    #[test]
    fn test_empty_scalar_quoted() {
        assert_eq!(render(&PlistValue::string("")), "\"\"");
    }

    #[test]
    fn test_space_and_comma_quoted() {
        assert_eq!(render(&PlistValue::string("a b")), "\"a b\"");
        assert_eq!(render(&PlistValue::string("a,b")), "\"a,b\"");
    }

    #[test]
    fn test_embedded_quote_escaped() {
        assert_eq!(render(&PlistValue::string("say \"hi\"")), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_already_quoted_untouched() {
        assert_eq!(render(&PlistValue::string("\"$(SRCROOT)\"")), "\"$(SRCROOT)\"");
    }

    #[test]
    fn test_boolean_normalization() {
        assert_eq!(render(&PlistValue::string("true")), "YES");
        assert_eq!(render(&PlistValue::string("false")), "NO");
        assert_eq!(render(&PlistValue::string("truthy")), "truthy");
    }

    #[test]
    fn test_scalar_comment() {
        let value = PlistValue::String(CommentedString::with_comment("REF", "main.swift"));
        assert_eq!(render(&value), "REF /* main.swift */");
    }

    #[test]
    fn test_isa_sorts_first() {
        let mut entries = IndexMap::new();
        entries.insert("name".to_string(), PlistValue::string("App"));
        entries.insert("isa".to_string(), PlistValue::string("PBXGroup"));
        entries.insert("age".to_string(), PlistValue::string("1"));

        let text = render(&PlistValue::Dictionary(entries));
        assert_eq!(text, "{\n\tisa = PBXGroup;\n\tage = 1;\n\tname = App;\n}");
    }

    #[test]
    fn test_array_layout() {
        let value = PlistValue::Array(vec![PlistValue::string("a"), PlistValue::string("b")]);
        assert_eq!(render(&value), "(\n\ta,\n\tb,\n)");
    }

    #[test]
    fn test_single_line_entry() {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string("PBXBuildFile"));
        entries.insert("fileRef".to_string(), PlistValue::string("REF"));

        let mut writer = PlistWriter::new();
        writer.write_key_value(
            &CommentedString::new("KEY"),
            &PlistValue::Dictionary(entries),
            false,
        );
        // Single-line mode collapses breaks to spaces; the trailing break is
        // emitted in the restored multi-line mode.
        assert_eq!(writer.finish(), "KEY = {isa = PBXBuildFile; fileRef = REF; };\n");
    }

    #[test]
    fn test_determinism() {
        let mut entries = IndexMap::new();
        entries.insert("b".to_string(), PlistValue::string("2"));
        entries.insert("a".to_string(), PlistValue::string("1"));
        let value = PlistValue::Dictionary(entries);
        assert_eq!(render(&value), render(&value));
    }
}
