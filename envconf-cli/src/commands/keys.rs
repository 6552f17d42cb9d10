//! Command to list top-level configuration keys.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;

/// List top-level keys, one per line, sorted.
#[derive(Args)]
pub struct KeysCommand {}

impl KeysCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        for key in config.keys() {
            println!("{key}");
        }
        Ok(())
    }
}
