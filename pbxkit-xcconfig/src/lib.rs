//! Parser, include flattener, and writer for xcconfig build-settings files.
//!
//! An xcconfig file is a flat list of `KEY = value` lines plus `#include`
//! directives pulling in other xcconfig files. [`XCConfig`] holds the file's
//! own settings together with its resolved include tree, and
//! [`XCConfig::flattened_build_settings`] collapses the tree into the
//! effective settings: a file's own definition always wins over anything it
//! includes, and among includes the first definition encountered wins.

mod error;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

pub use error::{Error, Result};

static INCLUDE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)#include\s+"(.+\.xcconfig)""#).unwrap());

static SETTING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^=\s][^=]*?)\s*=\s*(.*?)\s*$").unwrap());

/// Ordered mapping of setting key to raw string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSettings(pub IndexMap<String, String>);

impl BuildSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Controls how include directives that fail to resolve are handled.
///
/// The default is permissive: a missing or unreadable include is dropped
/// from the tree and parsing continues. With `strict_includes` the failure
/// propagates and fails the including file's parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub strict_includes: bool,
}

/// A parsed xcconfig file: its source path, resolved include tree, and own
/// build settings. Immutable once constructed.
///
/// Each include edge keeps the path as written in the directive alongside
/// the parsed file it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XCConfig {
    pub path: PathBuf,
    pub includes: Vec<(PathBuf, XCConfig)>,
    pub build_settings: BuildSettings,
}

impl XCConfig {
    pub fn new(
        path: impl Into<PathBuf>,
        includes: Vec<(PathBuf, XCConfig)>,
        build_settings: BuildSettings,
    ) -> Self {
        Self {
            path: path.into(),
            includes,
            build_settings,
        }
    }

    /// Read and parse the file at `path`, dropping includes that fail.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with(path, ParseOptions::default())
    }

    /// Read and parse the file at `path` with explicit include handling.
    ///
    /// Relative include paths resolve against the including file's
    /// directory; absolute paths are used as written. Lines that match
    /// neither the include grammar nor the setting grammar are ignored.
    pub fn from_path_with(path: impl AsRef<Path>, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Box::new(Error::NotFound {
                path: path.to_path_buf(),
            }));
        }
        let content = std::fs::read_to_string(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;

        let mut includes = Vec::new();
        let mut build_settings = BuildSettings::new();
        for line in content.lines() {
            let line = strip_comment(line);
            if let Some(captures) = INCLUDE_LINE.captures(line) {
                let include_path = PathBuf::from(&captures[1]);
                let resolved = if include_path.is_absolute() {
                    include_path.clone()
                } else {
                    match path.parent() {
                        Some(parent) => parent.join(&include_path),
                        None => include_path.clone(),
                    }
                };
                match Self::from_path_with(&resolved, options) {
                    Ok(config) => includes.push((include_path, config)),
                    Err(source) if options.strict_includes => {
                        return Err(Box::new(Error::Include {
                            path: resolved,
                            source,
                        }));
                    }
                    Err(_) => {}
                }
            } else if let Some((key, value)) = parse_setting(line) {
                build_settings.0.insert(key, value);
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            includes,
            build_settings,
        })
    }

    /// Collapse the include tree into the effective settings.
    ///
    /// The file's own settings take precedence; includes are walked in
    /// declared order, depth-first, and a key already resolved is never
    /// overwritten.
    pub fn flattened_build_settings(&self) -> BuildSettings {
        let mut flattened = BuildSettings::new();
        self.flatten_into(&mut flattened);
        flattened
    }

    fn flatten_into(&self, settings: &mut BuildSettings) {
        for (key, value) in &self.build_settings.0 {
            if !settings.0.contains_key(key) {
                settings.0.insert(key.clone(), value.clone());
            }
        }
        for (_, config) in &self.includes {
            config.flatten_into(settings);
        }
    }

    /// Write the file back out: include directives, a blank line, then the
    /// setting lines in insertion order.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut content = String::new();
        for (include, _) in &self.includes {
            content.push_str(&format!("#include \"{}\"\n", include.display()));
        }
        content.push('\n');
        for (key, value) in &self.build_settings.0 {
            content.push_str(&format!("{key} = {value}\n"));
        }
        std::fs::write(path, content).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(index) => &line[..index],
        None => line,
    }
}

fn parse_setting(line: &str) -> Option<(String, String)> {
    let captures = SETTING_LINE.captures(line)?;
    let key = captures[1].to_string();
    let raw = &captures[2];
    let value = if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw[1..raw.len() - 1].to_string()
    } else {
        raw.to_string()
    };
    Some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> BuildSettings {
        let mut settings = BuildSettings::new();
        for (key, value) in pairs {
            settings.insert(*key, *value);
        }
        settings
    }

    #[test]
    fn test_parse_settings_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.xcconfig");
        std::fs::write(
            &path,
            "// release settings\nSWIFT_VERSION = 5.0\nOTHER_LDFLAGS = \"-ObjC -lz\"\n\nnot a setting line\n",
        )
        .unwrap();

        let config = XCConfig::from_path(&path).unwrap();
        assert_eq!(config.build_settings.get("SWIFT_VERSION"), Some("5.0"));
        assert_eq!(config.build_settings.get("OTHER_LDFLAGS"), Some("-ObjC -lz"));
        assert_eq!(config.build_settings.len(), 2);
        assert!(config.includes.is_empty());
    }

    #[test]
    fn test_include_resolves_relative_to_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.xcconfig"), "SWIFT_VERSION = 5.0\n").unwrap();
        let path = dir.path().join("app.xcconfig");
        std::fs::write(&path, "#include \"base.xcconfig\"\nPRODUCT_NAME = App\n").unwrap();

        let config = XCConfig::from_path(&path).unwrap();
        assert_eq!(config.includes.len(), 1);
        assert_eq!(config.includes[0].0, PathBuf::from("base.xcconfig"));
        assert_eq!(
            config.includes[0].1.build_settings.get("SWIFT_VERSION"),
            Some("5.0")
        );
    }

    #[test]
    fn test_missing_include_dropped_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.xcconfig");
        std::fs::write(&path, "#include \"gone.xcconfig\"\nPRODUCT_NAME = App\n").unwrap();

        let config = XCConfig::from_path(&path).unwrap();
        assert!(config.includes.is_empty());
        assert_eq!(config.build_settings.get("PRODUCT_NAME"), Some("App"));
    }

    #[test]
    fn test_missing_include_fails_in_strict_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.xcconfig");
        std::fs::write(&path, "#include \"gone.xcconfig\"\n").unwrap();

        let options = ParseOptions {
            strict_includes: true,
        };
        let err = XCConfig::from_path_with(&path, options).unwrap_err();
        assert!(matches!(*err, Error::Include { .. }));
    }

    #[test]
    fn test_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = XCConfig::from_path(dir.path().join("gone.xcconfig")).unwrap_err();
        assert!(matches!(*err, Error::NotFound { .. }));
    }

    #[test]
    fn test_flattening_own_setting_wins() {
        let b = XCConfig::new("b.xcconfig", Vec::new(), settings(&[("X", "2")]));
        let c = XCConfig::new("c.xcconfig", Vec::new(), settings(&[("X", "3")]));
        let f = XCConfig::new(
            "f.xcconfig",
            vec![
                (PathBuf::from("b.xcconfig"), b),
                (PathBuf::from("c.xcconfig"), c),
            ],
            settings(&[("X", "1")]),
        );
        assert_eq!(f.flattened_build_settings().get("X"), Some("1"));
    }

    #[test]
    fn test_flattening_first_include_wins() {
        let b = XCConfig::new("b.xcconfig", Vec::new(), settings(&[("X", "2")]));
        let c = XCConfig::new("c.xcconfig", Vec::new(), settings(&[("X", "3")]));
        let f = XCConfig::new(
            "f.xcconfig",
            vec![
                (PathBuf::from("b.xcconfig"), b),
                (PathBuf::from("c.xcconfig"), c),
            ],
            BuildSettings::new(),
        );
        assert_eq!(f.flattened_build_settings().get("X"), Some("2"));
    }

    #[test]
    fn test_flattening_is_depth_first() {
        let deep = XCConfig::new("deep.xcconfig", Vec::new(), settings(&[("Y", "deep")]));
        let b = XCConfig::new(
            "b.xcconfig",
            vec![(PathBuf::from("deep.xcconfig"), deep)],
            settings(&[("X", "2")]),
        );
        let c = XCConfig::new("c.xcconfig", Vec::new(), settings(&[("Y", "late")]));
        let f = XCConfig::new(
            "f.xcconfig",
            vec![
                (PathBuf::from("b.xcconfig"), b),
                (PathBuf::from("c.xcconfig"), c),
            ],
            BuildSettings::new(),
        );
        let flattened = f.flattened_build_settings();
        assert_eq!(flattened.get("X"), Some("2"));
        assert_eq!(flattened.get("Y"), Some("deep"));
    }

    #[test]
    fn test_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.xcconfig"), "SWIFT_VERSION = 5.0\n").unwrap();
        let path = dir.path().join("app.xcconfig");
        std::fs::write(
            &path,
            "#include \"base.xcconfig\"\nPRODUCT_NAME = App\nSWIFT_VERSION = 4.2\n",
        )
        .unwrap();

        let config = XCConfig::from_path(&path).unwrap();
        let out = dir.path().join("out.xcconfig");
        config.write(&out).unwrap();
        let reparsed = XCConfig::from_path(&out).unwrap();
        assert_eq!(reparsed.build_settings, config.build_settings);
        assert_eq!(reparsed.includes.len(), 1);
        assert_eq!(
            reparsed.flattened_build_settings().get("SWIFT_VERSION"),
            Some("4.2")
        );
    }
}
