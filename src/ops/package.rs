//! Implementation of `stevedore package`.
//!
//! The pipeline is a strict sequence: load parameters, clean previous
//! outputs, run the build, assemble the deploy directory. Only a build
//! failure or a manifest write failure aborts the run; everything else
//! degrades to a warning carried on the outcome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::build_params::BuildParams;
use crate::core::package_json::{DeployManifest, PackageJson};
use crate::util::context::ProjectContext;
use crate::util::fs::{copy_dir_all, copy_file, dir_size, ensure_dir, move_dir, remove_dir_all_if_exists};
use crate::util::process::{find_npm, ProcessBuilder};

/// Non-fatal degradation recorded while packaging.
///
/// These mirror the tolerance policy of the pipeline: the run keeps going,
/// the problem is logged where it happens, and the outcome carries the full
/// list for the command layer to summarize.
#[derive(Debug, Error)]
pub enum PackageWarning {
    #[error("failed to remove `{path}`: {message}")]
    CleanFailed { path: PathBuf, message: String },

    #[error("build wrote to stderr")]
    BuildStderr,

    #[error("build produced no `{0}` directory")]
    NoBuildOutput(String),

    #[error("failed to relocate build output: {0}")]
    RelocateFailed(String),

    #[error("folder not found: {0}")]
    MissingFolder(String),

    #[error("file not found: {0}")]
    MissingFile(String),
}

/// Summary of a completed packaging run.
#[derive(Debug)]
pub struct PackageOutcome {
    /// Path of the assembled deploy directory
    pub output_dir: PathBuf,

    /// Whether the intermediate build output was relocated into it
    pub relocated_build_output: bool,

    /// Number of configured folders copied
    pub folders_copied: usize,

    /// Number of configured files copied
    pub files_copied: usize,

    /// Total size of the deploy directory in bytes
    pub total_size: u64,

    /// Non-fatal problems encountered along the way
    pub warnings: Vec<PackageWarning>,
}

/// Run the full packaging pipeline in the given project.
pub fn package(ctx: &ProjectContext) -> Result<PackageOutcome> {
    let params = BuildParams::load_or_init(&ctx.params_path()).normalize();

    let mut warnings = Vec::new();
    clean_outputs(ctx, &mut warnings);
    run_build(ctx, &mut warnings)?;
    assemble(ctx, &params, warnings)
}

/// Remove previous outputs so the run starts from a clean slate.
///
/// The deploy directory is handled strictly before the intermediate build
/// output. A deletion failure is recorded and the run continues as if the
/// directory were gone.
fn clean_outputs(ctx: &ProjectContext, warnings: &mut Vec<PackageWarning>) {
    for dir in [ctx.output_dir(), ctx.build_output_dir()] {
        match remove_dir_all_if_exists(&dir) {
            Ok(true) => tracing::info!("removed {}", dir.display()),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("failed to remove {}: {:#}", dir.display(), e);
                warnings.push(PackageWarning::CleanFailed {
                    path: dir,
                    message: format!("{:#}", e),
                });
            }
        }
    }
}

/// Invoke `npm run build` in the project root.
///
/// This is the single fatal stage: a spawn error or a non-zero exit aborts
/// the pipeline before any assembly happens. Build output on stderr is a
/// warning, not a failure.
fn run_build(ctx: &ProjectContext, warnings: &mut Vec<PackageWarning>) -> Result<()> {
    let npm = find_npm().context("npm not found in PATH")?;
    let cmd = ProcessBuilder::new(npm).args(["run", "build"]).cwd(ctx.root());

    tracing::info!("running `{}`", cmd.display_command());
    let output = cmd.exec_and_check()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        tracing::info!("build output:\n{}", stdout.trim_end());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        tracing::warn!("build stderr:\n{}", stderr.trim_end());
        warnings.push(PackageWarning::BuildStderr);
    }

    Ok(())
}

/// Assemble the deploy directory: relocate the build output, copy the
/// configured folders and files in order, and write the pruned manifest
/// last so a best-effort artifact exists even after partial copy failures.
fn assemble(
    ctx: &ProjectContext,
    params: &BuildParams,
    mut warnings: Vec<PackageWarning>,
) -> Result<PackageOutcome> {
    let output_dir = ctx.output_dir();
    ensure_dir(&output_dir)?;

    // Some setups produce no intermediate output (export-only projects),
    // so absence is a tolerated no-op rather than an error.
    let build_output = ctx.build_output_dir();
    let mut relocated = false;
    if build_output.exists() {
        match move_dir(&build_output, &ctx.relocated_build_output()) {
            Ok(()) => {
                tracing::info!(
                    "relocated {} -> {}",
                    build_output.display(),
                    ctx.relocated_build_output().display()
                );
                relocated = true;
            }
            Err(e) => {
                tracing::error!("failed to relocate build output: {:#}", e);
                warnings.push(PackageWarning::RelocateFailed(format!("{:#}", e)));
            }
        }
    } else {
        tracing::warn!("no {} directory to relocate", build_output.display());
        warnings.push(PackageWarning::NoBuildOutput(
            build_output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ));
    }

    let mut folders_copied = 0;
    for folder in &params.folders {
        let src = ctx.root().join(folder);
        if src.exists() {
            copy_dir_all(&src, &output_dir.join(folder))?;
            tracing::info!("copied folder {}", folder);
            folders_copied += 1;
        } else {
            tracing::error!("folder not found: {}", folder);
            warnings.push(PackageWarning::MissingFolder(folder.clone()));
        }
    }

    let mut files_copied = 0;
    for file in &params.files {
        let src = ctx.root().join(file);
        if src.exists() {
            copy_file(&src, &output_dir.join(file))?;
            tracing::info!("copied {}", file);
            files_copied += 1;
        } else {
            tracing::error!("file not found: {}", file);
            warnings.push(PackageWarning::MissingFile(file.clone()));
        }
    }

    // A manifest that cannot be written is fatal: the artifact is not
    // deployable without it.
    let pkg = PackageJson::load(&ctx.package_json_path())?;
    let manifest = DeployManifest::derive(&pkg, params);
    manifest.write(&ctx.manifest_path())?;
    tracing::info!("wrote {}", ctx.manifest_path().display());

    Ok(PackageOutcome {
        total_size: dir_size(&output_dir),
        output_dir,
        relocated_build_output: relocated,
        folders_copied,
        files_copied,
        warnings,
    })
}
