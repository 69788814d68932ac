//! Read and write Xcode project files.
//!
//! The heavy lifting lives in the member crates, re-exported here:
//! [`pbxkit_plist`] for the plist value model and dialect reader/writer,
//! [`pbxkit_proj`] for the typed object graph, and [`pbxkit_xcconfig`] for
//! build-settings override files. [`XcodeProj`] adds the `.xcodeproj` bundle
//! directory layer on top.

mod error;

use std::path::{Path, PathBuf};

pub use error::{Error, Result};
pub use pbxkit_plist::{CommentedString, PlistValue, PlistWriter};
pub use pbxkit_proj::{PBXObject, PBXObjects, PBXProj};
pub use pbxkit_xcconfig::{BuildSettings, ParseOptions, XCConfig};

pub use pbxkit_plist as plist;
pub use pbxkit_proj as proj;
pub use pbxkit_xcconfig as xcconfig;

/// A `.xcodeproj` bundle directory.
///
/// The bundle's workspace data and shared schemes are not modeled; only the
/// pbxproj document is read and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XcodeProj {
    pub pbxproj: PBXProj,
}

impl XcodeProj {
    pub fn new(pbxproj: PBXProj) -> Self {
        Self { pbxproj }
    }

    /// Open the bundle at `path` and parse the pbxproj file inside it.
    ///
    /// The bundle is scanned for any file with a `pbxproj` extension; when
    /// several are present the lexicographically first is used.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(Box::new(Error::NotFound {
                path: path.to_path_buf(),
            }));
        }
        let entries = std::fs::read_dir(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|entry| entry.extension().is_some_and(|ext| ext == "pbxproj"))
            .collect();
        candidates.sort();
        let pbxproj_path = candidates.first().ok_or_else(|| {
            Box::new(Error::PbxprojNotFound {
                path: path.to_path_buf(),
            })
        })?;
        Ok(Self {
            pbxproj: PBXProj::from_path(pbxproj_path)?,
        })
    }

    /// Write the bundle to `path`, creating the directory if needed.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::create_dir_all(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        self.pbxproj.write(path.join("project.pbxproj"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_proj() -> PBXProj {
        PBXProj::new(1, 46, "ROOT", PBXObjects::new())
    }

    #[test]
    fn test_missing_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let err = XcodeProj::from_path(dir.path().join("App.xcodeproj")).unwrap_err();
        assert!(matches!(*err, Error::NotFound { .. }));
    }

    #[test]
    fn test_bundle_without_pbxproj() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("App.xcodeproj");
        std::fs::create_dir(&bundle).unwrap();
        let err = XcodeProj::from_path(&bundle).unwrap_err();
        assert!(matches!(*err, Error::PbxprojNotFound { .. }));
    }

    #[test]
    fn test_write_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("App.xcodeproj");
        let project = XcodeProj::new(minimal_proj());
        project.write(&bundle).unwrap();

        let reopened = XcodeProj::from_path(&bundle).unwrap();
        assert_eq!(reopened, project);
    }

    #[test]
    fn test_parse_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("App.xcodeproj");
        std::fs::create_dir(&bundle).unwrap();
        std::fs::write(bundle.join("project.pbxproj"), "{ archiveVersion = ").unwrap();
        let err = XcodeProj::from_path(&bundle).unwrap_err();
        assert!(matches!(*err, Error::Proj(_)));
    }
}
