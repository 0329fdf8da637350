//! Build parameters (`stevedore.json`).
//!
//! The parameters file declares which scripts, extra files and folders, and
//! runtime dependencies end up in the deploy directory. A missing file is
//! created with empty defaults; a malformed file is left untouched on disk
//! and the defaults are substituted in memory, so loading never fails.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::context::BUILD_OUTPUT_DIR;

/// Package that must always survive dependency pruning, since the deploy
/// directory is launched through it.
pub const BUILD_TOOL_PACKAGE: &str = "next";

/// Launch command injected when the parameters declare no `start` script.
pub const DEFAULT_START_SCRIPT: &str = "next start";

/// Declarative description of the deploy artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildParams {
    /// Scripts merged into the deploy manifest.
    pub scripts: BTreeMap<String, String>,

    /// Folders copied into the deploy directory, in order.
    pub folders: Vec<String>,

    /// Files copied into the deploy directory, in order.
    pub files: Vec<String>,

    /// Names of dependencies kept in the deploy manifest.
    pub dependencies: Vec<String>,
}

impl BuildParams {
    /// Load build parameters from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read build parameters: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse build parameters: {}", path.display()))
    }

    /// Load build parameters, creating the file with defaults if absent.
    ///
    /// A malformed file is not overwritten; the defaults are used for this
    /// run only, so the user can fix the file by hand.
    pub fn load_or_init(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("{} not found, creating with default values", path.display());
            if let Err(e) = Self::default().save(path) {
                tracing::warn!("failed to write default build parameters: {:#}", e);
                return Self::default();
            }
        }

        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("{:#}; using default values", e);
            Self::default()
        })
    }

    /// Save build parameters to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(self).context("failed to serialize build parameters")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write build parameters: {}", path.display()))?;

        Ok(())
    }

    /// Normalize loaded parameters into the form the pipeline relies on:
    ///
    /// - `dependencies` lists the build tool package exactly once
    /// - `scripts` has a `start` entry (the file's own entry wins)
    /// - the intermediate build-output directory is dropped from `folders`,
    ///   since it is relocated wholesale rather than copied as an extra
    pub fn normalize(mut self) -> Self {
        self.dependencies.retain(|dep| dep != BUILD_TOOL_PACKAGE);
        self.dependencies.push(BUILD_TOOL_PACKAGE.to_string());

        self.scripts
            .entry("start".to_string())
            .or_insert_with(|| DEFAULT_START_SCRIPT.to_string());

        self.folders.retain(|folder| folder != BUILD_OUTPUT_DIR);

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let params: BuildParams = serde_json::from_str("{}").unwrap();

        assert!(params.scripts.is_empty());
        assert!(params.folders.is_empty());
        assert!(params.files.is_empty());
        assert!(params.dependencies.is_empty());
    }

    #[test]
    fn test_partial_fields_keep_declared_values() {
        let params: BuildParams =
            serde_json::from_str(r#"{"files": ["next.config.js"]}"#).unwrap();

        assert_eq!(params.files, vec!["next.config.js"]);
        assert!(params.folders.is_empty());
        assert!(params.dependencies.is_empty());
    }

    #[test]
    fn test_normalize_adds_build_tool_dependency() {
        let params = BuildParams::default().normalize();
        assert_eq!(params.dependencies, vec![BUILD_TOOL_PACKAGE]);
    }

    #[test]
    fn test_normalize_keeps_build_tool_dependency_unique() {
        let params = BuildParams {
            dependencies: vec![
                "next".to_string(),
                "react".to_string(),
                "next".to_string(),
            ],
            ..Default::default()
        }
        .normalize();

        let count = params.dependencies.iter().filter(|d| *d == "next").count();
        assert_eq!(count, 1);
        assert!(params.dependencies.contains(&"react".to_string()));
    }

    #[test]
    fn test_normalize_injects_default_start_script() {
        let params = BuildParams::default().normalize();
        assert_eq!(params.scripts.get("start").unwrap(), DEFAULT_START_SCRIPT);
    }

    #[test]
    fn test_normalize_preserves_custom_start_script() {
        let mut params = BuildParams::default();
        params
            .scripts
            .insert("start".to_string(), "node server.js".to_string());

        let params = params.normalize();
        assert_eq!(params.scripts.get("start").unwrap(), "node server.js");
    }

    #[test]
    fn test_normalize_filters_build_output_dir_from_folders() {
        let params = BuildParams {
            folders: vec![".next".to_string(), "public".to_string()],
            ..Default::default()
        }
        .normalize();

        assert_eq!(params.folders, vec!["public"]);
    }

    #[test]
    fn test_load_or_init_creates_default_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stevedore.json");

        let params = BuildParams::load_or_init(&path);

        assert!(path.exists());
        assert_eq!(params, BuildParams::default());

        // The freshly written file round-trips to the same defaults.
        assert_eq!(BuildParams::load(&path).unwrap(), BuildParams::default());
    }

    #[test]
    fn test_load_or_init_malformed_falls_back_without_rewriting() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stevedore.json");
        std::fs::write(&path, "{ not json").unwrap();

        let params = BuildParams::load_or_init(&path);

        assert_eq!(params, BuildParams::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
