//! `stevedore package` command

use anyhow::Result;

use crate::cli::Cli;
use stevedore::ops::package::package;

pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = super::project_context(cli)?;

    let outcome = package(&ctx)?;

    for warning in &outcome.warnings {
        eprintln!("     warning: {}", warning);
    }

    eprintln!(
        "    Packaged {} ({} folders, {} files, {} bytes)",
        outcome.output_dir.display(),
        outcome.folders_copied,
        outcome.files_copied,
        outcome.total_size
    );

    Ok(())
}
