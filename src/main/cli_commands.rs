// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use afterdark_settings::backend::HttpBackend;
use afterdark_settings::cli::{ConfigArgs, ConfigCommands, SetArgs, ShowArgs};
use afterdark_settings::config::ClientConfig;
use afterdark_settings::error::{Result, SettingsError};
use afterdark_settings::panel::FieldStore;
use afterdark_settings::sync::{SettingsField, SettingsSync};
use afterdark_settings::utils;

pub(super) fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    match path {
        Some(path) => ClientConfig::load_from(path),
        None => ClientConfig::load(),
    }
}

fn config_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(ClientConfig::default_path)
}

/// Build the panel against the configured backend and run its startup load.
async fn open_panel(config: ClientConfig, base_url: Option<String>) -> Result<SettingsSync> {
    let config = config.resolve(base_url)?;
    let backend = HttpBackend::from_config(&config.backend)?;
    let sync = SettingsSync::new(Arc::new(backend), FieldStore::new());
    sync.initialize().await?;
    Ok(sync)
}

pub(super) async fn run_show(
    args: ShowArgs,
    config: ClientConfig,
    base_url: Option<String>,
) -> Result<()> {
    let sync = open_panel(config, base_url).await?;
    for line in render_fields(sync.fields(), args.reveal) {
        println!("{}", line);
    }
    Ok(())
}

pub(super) async fn run_set(
    args: SetArgs,
    config: ClientConfig,
    base_url: Option<String>,
) -> Result<()> {
    let edits: Vec<(SettingsField, String)> = [
        (SettingsField::ApiKey, args.api_key),
        (SettingsField::PresetsPath, args.presets_path),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, v)))
    .collect();

    if edits.is_empty() {
        return Err(SettingsError::InvalidInput(
            "nothing to set; pass --api-key and/or --presets-path".to_string(),
        ));
    }

    let sync = open_panel(config, base_url).await?;
    for (field, value) in edits {
        sync.fields().edit(field.id(), value)?.await;
        println!("Submitted {}.", field.display_name());
    }
    Ok(())
}

pub(super) fn run_config_command(
    args: ConfigArgs,
    config: ClientConfig,
    path: Option<&Path>,
    base_url: Option<String>,
) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let effective = config.resolve(base_url)?;
            println!("{}", serde_json::to_string_pretty(&effective)?);
        }
        ConfigCommands::Path => {
            println!("{}", config_path(path).display());
        }
        ConfigCommands::Init { force } => {
            let target = config_path(path);
            if target.exists() && !force {
                return Err(SettingsError::Config(format!(
                    "'{}' already exists (use --force to overwrite)",
                    target.display()
                )));
            }
            ClientConfig::default().save_to(&target)?;
            println!("Wrote {}", target.display());
        }
    }
    Ok(())
}

/// One line per registered field, masking the API key unless `reveal`.
fn render_fields(fields: &FieldStore, reveal: bool) -> Vec<String> {
    fields
        .definitions()
        .into_iter()
        .map(|def| {
            let value = fields.value(&def.id).unwrap_or_default();
            let shown = if !reveal && SettingsField::from_id(&def.id) == Some(SettingsField::ApiKey)
            {
                utils::mask_secret(&value)
            } else {
                value
            };
            format!("{}: {}", def.name, utils::display_value(&shown))
        })
        .collect()
}
