//! The recursive value model shared by the graph encoder and the text decoder.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::Serialize;

/// A string scalar with an optional inline `/* comment */` annotation.
///
/// Comments are cosmetic: they are derived from the owning graph when
/// rendering and dropped when parsing, and they never participate in
/// graph equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentedString {
    /// The scalar content, unquoted.
    pub string: String,
    /// Inline comment rendered after the scalar, if any.
    pub comment: Option<String>,
}

impl CommentedString {
    /// Create a scalar without a comment.
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            comment: None,
        }
    }

    /// Create a scalar with an inline comment.
    pub fn with_comment(string: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            comment: Some(comment.into()),
        }
    }
}

// Hash over the content only so that lookups ignore the comment. Equal
// values have equal strings, so this stays consistent with Eq.
impl Hash for CommentedString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string.hash(state);
    }
}

impl From<&str> for CommentedString {
    fn from(string: &str) -> Self {
        Self::new(string)
    }
}

impl From<String> for CommentedString {
    fn from(string: String) -> Self {
        Self::new(string)
    }
}

/// A node in the plist tree.
///
/// Dictionary keys are plain strings; the only keys that carry comments in
/// the dialect are the per-object section entries, and those are written by
/// the document writer directly from [`CommentedString`] keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlistValue {
    /// A scalar with an optional inline comment.
    String(CommentedString),
    /// An ordered sequence.
    Array(Vec<PlistValue>),
    /// A mapping from string keys to values.
    Dictionary(IndexMap<String, PlistValue>),
}

impl PlistValue {
    /// Create a comment-less string scalar.
    pub fn string(s: impl Into<String>) -> Self {
        PlistValue::String(CommentedString::new(s))
    }

    /// The scalar content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(cs) => Some(&cs.string),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(values) => Some(values),
            _ => None,
        }
    }

    /// The entries, if this is a dictionary.
    pub fn as_dictionary(&self) -> Option<&IndexMap<String, PlistValue>> {
        match self {
            PlistValue::Dictionary(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a dictionary entry by key. Returns `None` for non-dictionaries.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.as_dictionary().and_then(|entries| entries.get(key))
    }
}

impl From<CommentedString> for PlistValue {
    fn from(cs: CommentedString) -> Self {
        PlistValue::String(cs)
    }
}

impl From<&str> for PlistValue {
    fn from(s: &str) -> Self {
        PlistValue::string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let value = PlistValue::string("hello");
        assert_eq!(value.as_str(), Some("hello"));
        assert!(value.as_array().is_none());
        assert!(value.as_dictionary().is_none());

        let array = PlistValue::Array(vec![PlistValue::string("a")]);
        assert_eq!(array.as_array().map(<[_]>::len), Some(1));
        assert!(array.as_str().is_none());
    }

    #[test]
    fn test_dictionary_get() {
        let mut entries = IndexMap::new();
        entries.insert("isa".to_string(), PlistValue::string("PBXGroup"));
        let dict = PlistValue::Dictionary(entries);

        assert_eq!(dict.get("isa").and_then(PlistValue::as_str), Some("PBXGroup"));
        assert!(dict.get("name").is_none());
        assert!(PlistValue::string("x").get("isa").is_none());
    }

    #[test]
    fn test_serializes_untagged() {
        let mut entries = IndexMap::new();
        entries.insert("name".to_string(), PlistValue::string("App"));
        entries.insert(
            "files".to_string(),
            PlistValue::Array(vec![PlistValue::string("A")]),
        );
        let json = serde_json::to_value(PlistValue::Dictionary(entries)).unwrap();
        assert_eq!(json["name"]["string"], "App");
        assert_eq!(json["files"][0]["string"], "A");
    }

    #[test]
    fn test_comment_ignored_by_hash() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |cs: &CommentedString| {
            let mut hasher = DefaultHasher::new();
            cs.hash(&mut hasher);
            hasher.finish()
        };

        let plain = CommentedString::new("ref");
        let commented = CommentedString::with_comment("ref", "App");
        assert_eq!(hash(&plain), hash(&commented));
        assert_ne!(plain, commented);
    }
}
