//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary
const BIN_NAME: &str = "envconf";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            print_instructions(self.shell);
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}

fn print_instructions(shell: Shell) {
    eprintln!("# Generating {shell} completion script");
    eprintln!("# Run the following command to enable completions:");

    match shell {
        Shell::Bash => {
            eprintln!(
                "#   envconf completions bash > ~/.local/share/bash-completion/completions/envconf"
            );
            eprintln!("# Or source it directly in ~/.bashrc:");
            eprintln!("#   eval \"$(envconf completions bash)\"");
        }
        Shell::Zsh => {
            eprintln!("#   envconf completions zsh > ~/.zsh/completions/_envconf");
            eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
        }
        Shell::Fish => {
            eprintln!("#   envconf completions fish > ~/.config/fish/completions/envconf.fish");
            eprintln!("# Or add to config.fish:");
            eprintln!("#   envconf completions fish | source");
        }
        Shell::PowerShell => {
            eprintln!("#   envconf completions powershell | Out-String | Invoke-Expression");
        }
        _ => {}
    }

    eprintln!();
}
