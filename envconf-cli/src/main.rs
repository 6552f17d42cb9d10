//! Main entry point for the envconf CLI.
//!
//! Resolves a layered configuration directory and prints the result:
//! - `show`: Print the merged configuration in several formats
//! - `get`: Print one value by dotted key path
//! - `keys`: List top-level keys
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = envconf::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        dir: cli.dir,
        env: cli.env,
        default_env: cli.default_env,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Keys(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
