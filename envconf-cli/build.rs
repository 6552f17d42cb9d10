//! Build script for envconf-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("envconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve layered, environment-specific configuration")
        .long_about(
            "Merge a configuration directory's default environment with the selected \
             environment and print the result",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .help("Configuration directory (defaults to ./configs)")
                .value_name("PATH")
                .global(true)
                .env("ENVCONF_CONFIG_DIR"),
        )
        .arg(
            Arg::new("env")
                .long("env")
                .help("Environment to overlay on top of the default one")
                .value_name("NAME")
                .global(true)
                .env("ENVCONF_ENV"),
        )
        .arg(
            Arg::new("default-env")
                .long("default-env")
                .help("Name of the default environment")
                .value_name("NAME")
                .global(true)
                .env("ENVCONF_DEFAULT_ENV"),
        )
        .subcommands(vec![
            Command::new("show")
                .about("Resolve the configuration and print it")
                .long_about("Print the merged configuration as JSON, YAML, dotenv, or exports"),
            Command::new("get")
                .about("Print a single value by dotted key path")
                .long_about("Print one value; exits with status 1 when the key is absent"),
            Command::new("keys")
                .about("List top-level keys")
                .long_about("List the top-level keys of the merged configuration"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("envconf.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
