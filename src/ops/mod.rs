//! High-level operations.
//!
//! This module contains the implementation of Stevedore commands.

pub mod clean;
pub mod package;

pub use clean::{clean, CleanOutcome};
pub use package::{package, PackageOutcome, PackageWarning};
