//! Core data structures for Stevedore.
//!
//! This module contains the foundational types used throughout Stevedore:
//! - Build parameters (`stevedore.json`)
//! - Package descriptors and the derived deploy manifest

pub mod build_params;
pub mod package_json;

pub use build_params::BuildParams;
pub use package_json::{DeployManifest, PackageJson};
