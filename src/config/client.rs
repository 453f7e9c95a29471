// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Client configuration
//!
//! Handles loading and saving the client configuration from
//! ~/.afterdark/config.json

use serde::{Deserialize, Serialize};

mod io;
mod validation;

/// Environment variable overriding the configuration directory
pub const HOME_ENV: &str = "AFTERDARK_HOME";

/// Environment variable overriding the stored backend base URL
pub const BASE_URL_ENV: &str = "AFTERDARK_BASE_URL";

/// Main configuration structure, stored in ~/.afterdark/config.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Settings backend connection
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Where the settings backend lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the host application's HTTP server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Unset means the transport's own behaviour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8188".to_string()
}
