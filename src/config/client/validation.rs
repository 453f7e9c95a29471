// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::{Result, SettingsError};

use super::{ClientConfig, BASE_URL_ENV};

impl ClientConfig {
    /// Get the backend base URL, checking env var first.
    pub fn effective_base_url(&self) -> String {
        self.base_url_with_env(std::env::var(BASE_URL_ENV).ok())
    }

    /// Base URL given the value of `AFTERDARK_BASE_URL`, if any.
    pub fn base_url_with_env(&self, env_value: Option<String>) -> String {
        // Priority: env var > config file. A blank env var is ignored.
        env_value
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.backend.base_url.clone())
    }

    /// Resolve the base URL (env var, then an explicit override) into the
    /// config and validate the result.
    pub fn resolve(self, base_url_override: Option<String>) -> Result<Self> {
        let env_value = std::env::var(BASE_URL_ENV).ok();
        self.resolve_with_env(base_url_override, env_value)
    }

    /// `resolve` with the env var value passed in rather than read.
    pub fn resolve_with_env(
        mut self,
        base_url_override: Option<String>,
        env_value: Option<String>,
    ) -> Result<Self> {
        let base_url = base_url_override.unwrap_or_else(|| self.base_url_with_env(env_value));
        self.backend.base_url = base_url;
        self.validate()?;
        Ok(self)
    }

    /// Reject configurations the HTTP backend cannot use.
    pub fn validate(&self) -> Result<()> {
        let url = self.backend.base_url.trim();
        if url.is_empty() {
            return Err(SettingsError::Config(
                "backend.base_url must not be empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingsError::Config(format!(
                "backend.base_url must start with http:// or https://, got '{}'",
                url
            )));
        }
        if self.backend.timeout_secs == Some(0) {
            return Err(SettingsError::Config(
                "backend.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
