//! Command implementations for canconfctl

pub mod apply;
pub mod capabilities;
pub mod profile;

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List the built-in presets
    List,

    /// Show a preset or a profile file
    Show {
        /// Preset name or profile file path
        profile: String,
    },

    /// Validate a profile file
    Validate {
        /// Profile file (.yaml, .yml or .json)
        path: PathBuf,

        /// Also check the profile against one controller family
        #[arg(long)]
        family: Option<String>,
    },
}
