//! Config command implementation.

use super::{CliError, SearchArgs};
use exprga::config::{save_config, to_toml};
use std::path::Path;

/// Execute the config command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or cannot be written.
pub(crate) fn execute(search: &SearchArgs, output: Option<&Path>) -> Result<(), CliError> {
    let config = search.build_config()?;

    match output {
        Some(path) => {
            save_config(&config, path)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", to_toml(&config)?),
    }

    Ok(())
}
