//! Implementation of `stevedore clean`.

use std::path::PathBuf;

use anyhow::Result;

use crate::util::context::ProjectContext;
use crate::util::fs::remove_dir_all_if_exists;

/// Outcome of a clean operation.
#[derive(Debug, Default)]
pub struct CleanOutcome {
    /// Directories that existed and were removed
    pub removed: Vec<PathBuf>,
}

/// Remove the deploy directory and any intermediate build output.
///
/// Unlike the pre-build clean inside the packaging pipeline, an explicit
/// clean reports deletion failures to the caller.
pub fn clean(ctx: &ProjectContext) -> Result<CleanOutcome> {
    let mut outcome = CleanOutcome::default();

    for dir in [ctx.output_dir(), ctx.build_output_dir()] {
        if remove_dir_all_if_exists(&dir)? {
            tracing::debug!("removed {}", dir.display());
            outcome.removed.push(dir);
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_existing_outputs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("build/.next")).unwrap();
        fs::create_dir_all(tmp.path().join(".next/static")).unwrap();

        let ctx = ProjectContext::with_root(tmp.path());
        let outcome = clean(&ctx).unwrap();

        assert_eq!(outcome.removed.len(), 2);
        assert!(!tmp.path().join("build").exists());
        assert!(!tmp.path().join(".next").exists());
    }

    #[test]
    fn test_clean_is_a_noop_when_nothing_exists() {
        let tmp = TempDir::new().unwrap();

        let ctx = ProjectContext::with_root(tmp.path());
        let outcome = clean(&ctx).unwrap();

        assert!(outcome.removed.is_empty());
    }
}
