//! canconfctl - CAN motor controller configuration CLI
//!
//! Inspect profile presets and profile files, print the capability table of
//! each controller family, and dry-run a robot manifest against a simulated
//! CAN bus before it reaches the robot.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::ProfileCommands;

#[derive(Parser)]
#[command(name = "canconfctl")]
#[command(about = "CAN motor controller configuration CLI - inspect profiles and dry-run robot manifests")]
#[command(version)]
#[command(long_about = "
canconfctl works with the configuration profiles applied to CAN motor
controllers at robot startup. It lists and validates profiles, shows which
settings each controller family accepts, and configures a robot manifest on
a simulated bus so failures can be inspected without hardware.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile preset and profile file commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Show the settings a controller family accepts, in application order
    Capabilities {
        /// Controller family: brushless-smart, integrated-sensor or external-sensor
        family: String,
    },

    /// Configure every device in a robot manifest on a simulated bus
    Apply {
        /// Manifest file (.yaml, .yml or .json)
        manifest: PathBuf,

        /// Fail a capability call: [<id>:]<operation>=<status>
        #[arg(long = "fail", value_name = "FAULT")]
        faults: Vec<String>,

        /// Exit with an error when any capability call fails
        #[arg(long)]
        strict: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("canconfctl={log_level},canconf={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                if !error::already_reported(&e) {
                    output::print_error_json(&e);
                }
            } else {
                output::print_error_human(&e);
            }

            std::process::exit(error::exit_code(&e));
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Profile(cmd) => commands::profile::execute(cmd, cli.json),
        Commands::Capabilities { family } => commands::capabilities::execute(family, cli.json),
        Commands::Apply {
            manifest,
            faults,
            strict,
        } => commands::apply::execute(manifest, faults, *strict, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}
