// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings synchronization
//!
//! `SettingsSync` registers the API key and presets path fields with the host
//! panel, pulls their stored values from the backend once at startup, and
//! pushes the full pair back every time the user edits either field.
//!
//! Backend failures are logged and swallowed: nothing is retried, edited
//! values are never rolled back, and a failed load leaves the defaults.
//!
//! Saves are independent requests. When two edits happen close together the
//! backend keeps whichever request it processes last, which is not
//! necessarily the last edit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::FutureExt;

use crate::backend::SettingsBackend;
use crate::error::{Result, SettingsError};
use crate::panel::{ChangeHandler, FieldDefinition, FieldStore};
use crate::record::{SettingsRecord, StoredSettings};

/// Name the extension registers under
pub const EXTENSION_NAME: &str = "HackAfterDark.Settings";

/// Panel id of the API key field
pub const GEMINI_API_KEY_ID: &str = "HackAfterDark.GeminiApiKey";

/// Panel id of the presets path field
pub const PRESETS_PATH_ID: &str = "HackAfterDark.PresetsPath";

/// The two fields this extension owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    ApiKey,
    PresetsPath,
}

impl SettingsField {
    pub const ALL: [SettingsField; 2] = [SettingsField::ApiKey, SettingsField::PresetsPath];

    /// Stable panel id
    pub fn id(&self) -> &'static str {
        match self {
            SettingsField::ApiKey => GEMINI_API_KEY_ID,
            SettingsField::PresetsPath => PRESETS_PATH_ID,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SettingsField::ApiKey => "Gemini API Key",
            SettingsField::PresetsPath => "Prompt Template Directory",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Definition registered with the host panel
    pub fn definition(&self) -> FieldDefinition {
        FieldDefinition::text(self.id(), self.display_name()).with_default("")
    }

    /// The field's non-empty value in a backend response
    fn stored_value<'a>(&self, stored: &'a StoredSettings) -> Option<&'a str> {
        match self {
            SettingsField::ApiKey => stored.api_key(),
            SettingsField::PresetsPath => stored.presets_path(),
        }
    }
}

/// Mirrors the two settings fields between the host panel and the backend
pub struct SettingsSync {
    backend: Arc<dyn SettingsBackend>,
    fields: FieldStore,
    initialized: AtomicBool,
}

impl SettingsSync {
    /// Create a sync component bound to a backend and a host panel handle.
    pub fn new(backend: Arc<dyn SettingsBackend>, fields: FieldStore) -> Self {
        Self {
            backend,
            fields,
            initialized: AtomicBool::new(false),
        }
    }

    /// The host panel this component registered into
    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Register both fields, then load their stored values.
    ///
    /// A failed load is logged and leaves the defaults in place; it does not
    /// fail initialization. A second call is an error, as is a panel that
    /// already holds one of the ids; in that case nothing is registered and
    /// the component stays uninitialized.
    pub async fn initialize(&self) -> Result<()> {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SettingsError::AlreadyInitialized);
        }

        if let Err(e) = self.register_fields() {
            self.initialized.store(false, Ordering::SeqCst);
            return Err(e);
        }

        self.load().await;
        tracing::info!(
            extension = EXTENSION_NAME,
            backend = self.backend.name(),
            "settings panel initialized"
        );
        Ok(())
    }

    /// Push the full settings pair after `field` changed to `new_value`.
    ///
    /// The other field contributes its current value. Failures are logged.
    pub async fn on_field_change(&self, field: SettingsField, new_value: &str) {
        let record = record_with(&self.fields, field, new_value);
        save_record(self.backend.as_ref(), &record).await;
    }

    /// Snapshot of both fields as they currently stand
    pub fn current_record(&self) -> SettingsRecord {
        SettingsRecord::new(
            self.fields.value(GEMINI_API_KEY_ID).unwrap_or_default(),
            self.fields.value(PRESETS_PATH_ID).unwrap_or_default(),
        )
    }

    /// Register both fields, or neither if either id is already taken.
    fn register_fields(&self) -> Result<()> {
        if let Some(taken) = SettingsField::ALL
            .into_iter()
            .find(|f| self.fields.is_registered(f.id()))
        {
            return Err(SettingsError::DuplicateField(taken.id().to_string()));
        }

        for field in SettingsField::ALL {
            self.fields
                .register(field.definition(), Some(self.change_handler(field)))?;
        }
        Ok(())
    }

    async fn load(&self) {
        let stored = match self.backend.fetch().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Failed to load HackAfterDark settings: {}", e);
                return;
            }
        };

        for field in SettingsField::ALL {
            if let Some(value) = field.stored_value(&stored) {
                if let Err(e) = self.fields.set_value(field.id(), value) {
                    tracing::error!(field = field.id(), "could not apply loaded value: {}", e);
                }
            }
        }
    }

    fn change_handler(&self, field: SettingsField) -> ChangeHandler {
        let backend = Arc::clone(&self.backend);
        Arc::new(move |store: &FieldStore, value: &str| {
            // Snapshot now; the save may run after later edits.
            let record = record_with(store, field, value);
            let backend = Arc::clone(&backend);
            async move { save_record(backend.as_ref(), &record).await }.boxed()
        })
    }
}

/// Full pair with `field` set to `value` and the other field as stored.
fn record_with(store: &FieldStore, field: SettingsField, value: &str) -> SettingsRecord {
    let current = |id: &str| store.value(id).unwrap_or_default();
    match field {
        SettingsField::ApiKey => SettingsRecord::new(value, current(PRESETS_PATH_ID)),
        SettingsField::PresetsPath => SettingsRecord::new(current(GEMINI_API_KEY_ID), value),
    }
}

async fn save_record(backend: &dyn SettingsBackend, record: &SettingsRecord) {
    match backend.save(record).await {
        Ok(()) => tracing::debug!(backend = backend.name(), "settings saved"),
        Err(SettingsError::Backend(e)) if !e.is_transport() => {
            tracing::error!("Failed to save HackAfterDark settings: {}", e);
        }
        Err(e) => tracing::error!("Error saving HackAfterDark settings: {}", e),
    }
}
