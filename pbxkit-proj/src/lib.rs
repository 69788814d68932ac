//! Typed pbxproj object graph, decoder, and document writer.
//!
//! The graph is a store of ~18 object kinds keyed by opaque reference
//! strings. Objects never hold direct links to each other; every
//! relationship is a reference string resolved through [`PBXObjects`] at
//! query time. [`PBXProj`] ties a store to the document-level versions and
//! root reference and renders byte-stable dialect text.
//!
//! ```
//! use pbxkit_proj::{PBXObjects, PBXProj};
//!
//! let proj = PBXProj::new(1, 46, "ROOT", PBXObjects::new());
//! assert!(proj.render().starts_with("// !$*UTF8*$!"));
//! ```

mod decode;
mod error;
mod objects;
mod proj;
mod writer;

pub use error::{Error, Result};
pub use objects::{
    DEFAULT_BUILD_ACTION_MASK, PBXAggregateTarget, PBXBuildFile, PBXContainerItemProxy,
    PBXCopyFilesBuildPhase,
    PBXFileElement, PBXFileReference, PBXFrameworksBuildPhase, PBXGroup, PBXHeadersBuildPhase,
    PBXNativeTarget, PBXObject, PBXObjects, PBXProject, PBXResourcesBuildPhase,
    PBXShellScriptBuildPhase, PBXSourcesBuildPhase, PBXTargetDependency, PBXVariantGroup,
    ProjectObject, XCBuildConfiguration, XCConfigurationList,
};
pub use proj::PBXProj;
