//! Package descriptors.
//!
//! [`PackageJson`] is the project's canonical `package.json`, the read-only
//! source of truth for identity fields and dependency versions.
//! [`DeployManifest`] is the pruned descriptor written into the deploy
//! directory so a production install pulls runtime dependencies only.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::build_params::BuildParams;

/// The project's canonical package descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageJson {
    pub name: String,
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub main: Option<String>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

impl PackageJson {
    /// Load the package descriptor.
    ///
    /// Unlike build parameters, a missing or malformed descriptor is an
    /// error: without it there is nothing to derive the deploy manifest from.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read package descriptor: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse package descriptor: {}", path.display()))
    }
}

/// The derived descriptor written into the deploy directory.
///
/// Optional identity fields absent from the source descriptor are omitted
/// from the output rather than serialized as null.
#[derive(Debug, Clone, Serialize)]
pub struct DeployManifest {
    pub name: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    pub scripts: BTreeMap<String, String>,
    pub dependencies: BTreeMap<String, String>,
}

impl DeployManifest {
    /// Derive the deploy manifest from the package descriptor and the
    /// normalized build parameters.
    ///
    /// Dependencies are the intersection of the descriptor's dependency map
    /// with the configured names, keeping the descriptor's version strings.
    /// Configured names the descriptor does not know are dropped silently.
    pub fn derive(pkg: &PackageJson, params: &BuildParams) -> Self {
        let dependencies = params
            .dependencies
            .iter()
            .filter_map(|name| {
                pkg.dependencies
                    .get(name)
                    .map(|version| (name.clone(), version.clone()))
            })
            .collect();

        DeployManifest {
            name: pkg.name.clone(),
            version: pkg.version.clone(),
            description: pkg.description.clone(),
            main: pkg.main.clone(),
            scripts: params.scripts.clone(),
            dependencies,
        }
    }

    /// Write the manifest, overwriting any previous file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(self).context("failed to serialize deploy manifest")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write deploy manifest: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> PackageJson {
        serde_json::from_str(
            r#"{
                "name": "webapp",
                "version": "1.2.3",
                "description": "a web app",
                "main": "index.js",
                "dependencies": { "a": "1.0", "b": "2.0", "c": "3.0" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_dependencies_are_intersected_with_descriptor_versions() {
        let params = BuildParams {
            dependencies: vec!["a".to_string(), "c".to_string(), "next".to_string()],
            ..Default::default()
        };

        let manifest = DeployManifest::derive(&descriptor(), &params);

        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(manifest.dependencies.get("a").unwrap(), "1.0");
        assert_eq!(manifest.dependencies.get("c").unwrap(), "3.0");
        // "next" is absent from the descriptor, so it is dropped, not an error
        assert!(!manifest.dependencies.contains_key("next"));
        assert!(!manifest.dependencies.contains_key("b"));
    }

    #[test]
    fn test_identity_fields_copied_verbatim() {
        let manifest = DeployManifest::derive(&descriptor(), &BuildParams::default());

        assert_eq!(manifest.name, "webapp");
        assert_eq!(manifest.version, "1.2.3");
        assert_eq!(manifest.description.as_deref(), Some("a web app"));
        assert_eq!(manifest.main.as_deref(), Some("index.js"));
    }

    #[test]
    fn test_scripts_come_from_build_params() {
        let mut params = BuildParams::default();
        params
            .scripts
            .insert("start".to_string(), "next start".to_string());

        let manifest = DeployManifest::derive(&descriptor(), &params);
        assert_eq!(manifest.scripts.get("start").unwrap(), "next start");
    }

    #[test]
    fn test_absent_optional_fields_are_omitted_from_output() {
        let pkg: PackageJson =
            serde_json::from_str(r#"{ "name": "bare", "version": "0.1.0" }"#).unwrap();

        let manifest = DeployManifest::derive(&pkg, &BuildParams::default());
        let json = serde_json::to_string(&manifest).unwrap();

        assert!(!json.contains("description"));
        assert!(!json.contains("main"));
    }

    #[test]
    fn test_missing_descriptor_is_an_error() {
        let err = PackageJson::load(Path::new("/nonexistent/package.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read package descriptor"));
    }
}
