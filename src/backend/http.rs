// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! HTTP settings backend
//!
//! Implements `SettingsBackend` against the host application's
//! `/hackafterdark/settings` route. Only a 200 counts as success.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use crate::config::BackendConfig;
use crate::error::{BackendError, Result};
use crate::record::{SettingsRecord, StoredSettings};

use super::SettingsBackend;

/// Route served by the host for both load and save
pub const SETTINGS_ROUTE: &str = "/hackafterdark/settings";

/// Settings backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend for the given base URL with a default client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create with a preconfigured client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build from configuration. A timeout is applied only if one is set.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the settings route
    pub fn settings_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SETTINGS_ROUTE)
    }
}

#[async_trait]
impl SettingsBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<StoredSettings> {
        let url = self.settings_url();
        tracing::debug!(%url, "fetching settings");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(BackendError::from)?;
        let response = require_ok(response)?;

        let stored = response
            .json::<StoredSettings>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        Ok(stored)
    }

    async fn save(&self, record: &SettingsRecord) -> Result<()> {
        let url = self.settings_url();
        tracing::debug!(%url, "saving settings");

        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(BackendError::from)?;
        require_ok(response)?;
        Ok(())
    }
}

fn require_ok(response: Response) -> std::result::Result<Response, BackendError> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(BackendError::Rejected {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("unknown status").to_string(),
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SettingsError;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_settings_url_joins_route() {
        let backend = HttpBackend::new("http://127.0.0.1:8188");
        assert_eq!(
            backend.settings_url(),
            "http://127.0.0.1:8188/hackafterdark/settings"
        );
    }

    #[test]
    fn test_settings_url_trailing_slash() {
        let backend = HttpBackend::new("http://127.0.0.1:8188/");
        assert_eq!(
            backend.settings_url(),
            "http://127.0.0.1:8188/hackafterdark/settings"
        );
    }

    #[test]
    fn test_from_config_keeps_base_url() {
        let config = BackendConfig {
            base_url: "http://localhost:9000".to_string(),
            timeout_secs: Some(5),
        };
        let backend = HttpBackend::from_config(&config).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:9000");
        assert_eq!(backend.name(), "http");
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SETTINGS_ROUTE))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "gemini_api_key": "K",
                "presets_path": "P"
            })))
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(mock_server.uri());
        let stored = backend.fetch().await.unwrap();
        assert_eq!(stored.api_key(), Some("K"));
        assert_eq!(stored.presets_path(), Some("P"));
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_rejection() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SETTINGS_ROUTE))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(mock_server.uri());
        let err = backend.fetch().await.unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Backend(BackendError::Rejected { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_other_2xx_is_rejection() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SETTINGS_ROUTE))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(mock_server.uri());
        let err = backend.fetch().await.unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Backend(BackendError::Rejected { status: 204, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SETTINGS_ROUTE))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(mock_server.uri());
        let err = backend.fetch().await.unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Backend(BackendError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport() {
        // Bind then drop a listener so the port is very likely closed.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let backend = HttpBackend::new(format!("http://127.0.0.1:{}", port));
        let err = backend.fetch().await.unwrap_err();
        match err {
            SettingsError::Backend(e) => assert!(e.is_transport()),
            other => panic!("Expected backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_posts_full_pair() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SETTINGS_ROUTE))
            .and(body_json(serde_json::json!({
                "gemini_api_key": "X",
                "presets_path": "P"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(mock_server.uri());
        backend
            .save(&SettingsRecord::new("X", "P"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_save_non_200_is_rejection() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SETTINGS_ROUTE))
            .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
            .mount(&mock_server)
            .await;

        let backend = HttpBackend::new(mock_server.uri());
        let err = backend
            .save(&SettingsRecord::new("X", "P"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
