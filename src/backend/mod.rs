// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings backend abstraction
//!
//! The backend persists the settings pair. `HttpBackend` talks to the host
//! application's HTTP server; `MockBackend` keeps everything in memory for
//! tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::{SettingsRecord, StoredSettings};

pub mod http;
pub mod mock;

pub use http::{HttpBackend, SETTINGS_ROUTE};
pub use mock::{MockBackend, MockReply};

/// Remote store for the settings pair
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Retrieve the currently stored settings.
    async fn fetch(&self) -> Result<StoredSettings>;

    /// Persist a complete settings pair.
    async fn save(&self, record: &SettingsRecord) -> Result<()>;
}
