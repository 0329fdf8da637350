//! Stevedore - A deployment packager for Next.js projects
//!
//! This crate provides the core library functionality for Stevedore:
//! loading build parameters, running the Next.js build, and assembling
//! a self-contained deploy directory with a pruned package manifest.

pub mod core;
pub mod ops;
pub mod util;

pub use core::{
    build_params::BuildParams,
    package_json::{DeployManifest, PackageJson},
};

pub use ops::package::{package, PackageOutcome, PackageWarning};
pub use util::context::ProjectContext;
