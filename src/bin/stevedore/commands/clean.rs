//! `stevedore clean` command

use anyhow::Result;

use crate::cli::Cli;
use stevedore::ops::clean::clean;

pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = super::project_context(cli)?;

    let outcome = clean(&ctx)?;
    for dir in &outcome.removed {
        eprintln!("     Removed {}", dir.display());
    }

    Ok(())
}
