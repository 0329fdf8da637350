//! Command implementations

pub mod clean;
pub mod completions;
pub mod package;

use anyhow::{bail, Result};
use stevedore::util::context::ProjectContext;

use crate::cli::Cli;

/// Build the project context from the global CLI flags.
pub fn project_context(cli: &Cli) -> Result<ProjectContext> {
    match &cli.project_dir {
        Some(dir) => {
            if !dir.is_dir() {
                bail!("project directory not found: {}", dir.display());
            }
            Ok(ProjectContext::with_root(dir.clone()))
        }
        None => ProjectContext::new(),
    }
}
