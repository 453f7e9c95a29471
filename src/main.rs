// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! afterdark-settings - terminal host for the HackAfterDark settings panel
//!
//! Entry point for the CLI application.

use clap::Parser;

use afterdark_settings::cli::{Cli, Commands, ShowArgs};
use afterdark_settings::error::Result;
use afterdark_settings::utils;

#[path = "main/cli_commands.rs"]
mod cli_commands;

use cli_commands::{load_config, run_config_command, run_set, run_show};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on this crate's diagnostics; `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        let level = if cli.verbose > 1 { "trace" } else { "debug" };
        if let Ok(parsed) = format!("afterdark_settings={}", level).parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{}", utils::format_error(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        None => run_show(ShowArgs::default(), config, cli.base_url).await,
        Some(Commands::Show(args)) => run_show(args, config, cli.base_url).await,
        Some(Commands::Set(args)) => run_set(args, config, cli.base_url).await,
        Some(Commands::Config(args)) => {
            run_config_command(args, config, cli.config.as_deref(), cli.base_url)
        }
    }
}
