// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Manage the HackAfterDark settings stored by the host application
#[derive(Parser, Debug)]
#[command(name = "afterdark-settings")]
#[command(version, about = "Manage the HackAfterDark API key and presets path")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the host application (overrides config and AFTERDARK_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the settings panel and print its fields (default)
    Show(ShowArgs),

    /// Edit one or both fields and save them to the backend
    Set(SetArgs),

    /// Client configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Print the API key unmasked
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("fields")
        .required(true)
        .multiple(true)
        .args(["api_key", "presets_path"]),
))]
pub struct SetArgs {
    /// New Gemini API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// New prompt template directory
    #[arg(long)]
    pub presets_path: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
