// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Wire types exchanged with the settings backend

use serde::{Deserialize, Deserializer, Serialize};

/// The full settings pair sent on every save.
///
/// Always carries both fields so the backend never sees a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    #[serde(rename = "gemini_api_key", default)]
    pub api_key: String,

    #[serde(default)]
    pub presets_path: String,
}

impl SettingsRecord {
    pub fn new(api_key: impl Into<String>, presets_path: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            presets_path: presets_path.into(),
        }
    }
}

/// Settings as returned by the backend on load.
///
/// Either field may be missing; unknown keys are ignored. Each field is read
/// on its own, so a non-string value only drops that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub gemini_api_key: Option<String>,

    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub presets_path: Option<String>,
}

impl StoredSettings {
    /// The API key, if present and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        non_empty(self.gemini_api_key.as_deref())
    }

    /// The presets path, if present and non-empty.
    pub fn presets_path(&self) -> Option<&str> {
        non_empty(self.presets_path.as_deref())
    }
}

impl From<SettingsRecord> for StoredSettings {
    fn from(record: SettingsRecord) -> Self {
        Self {
            gemini_api_key: Some(record.api_key),
            presets_path: Some(record.presets_path),
        }
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
