//! Project context for Stevedore operations.
//!
//! Provides centralized access to the canonical project paths. Every path
//! the pipeline touches is derived here, so the layout is defined in exactly
//! one place.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Name of the build parameters file.
pub const PARAMS_FILE: &str = "stevedore.json";

/// Name of the canonical package descriptor.
pub const PACKAGE_JSON: &str = "package.json";

/// Name of the assembled deploy directory.
pub const OUTPUT_DIR: &str = "build";

/// Name of the intermediate build-output directory written by Next.js.
pub const BUILD_OUTPUT_DIR: &str = ".next";

/// Context containing the project root and derived paths.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Project root directory
    root: PathBuf,
}

impl ProjectContext {
    /// Create a context rooted at the current working directory.
    pub fn new() -> Result<Self> {
        let root = std::env::current_dir().context("failed to get current directory")?;
        Ok(ProjectContext { root })
    }

    /// Create a context rooted at a specific directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        ProjectContext { root: root.into() }
    }

    /// Get the project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the build parameters file path.
    pub fn params_path(&self) -> PathBuf {
        self.root.join(PARAMS_FILE)
    }

    /// Get the canonical package descriptor path.
    pub fn package_json_path(&self) -> PathBuf {
        self.root.join(PACKAGE_JSON)
    }

    /// Get the deploy directory path.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    /// Get the intermediate build-output directory path.
    pub fn build_output_dir(&self) -> PathBuf {
        self.root.join(BUILD_OUTPUT_DIR)
    }

    /// Get the path the build output is relocated to inside the deploy
    /// directory.
    pub fn relocated_build_output(&self) -> PathBuf {
        self.output_dir().join(BUILD_OUTPUT_DIR)
    }

    /// Get the deploy manifest path inside the deploy directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir().join(PACKAGE_JSON)
    }
}
