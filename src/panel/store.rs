// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Field storage with per-field change notification

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt};

use crate::error::{Result, SettingsError};

use super::field::FieldDefinition;

/// Work started by a change handler. The host awaits or spawns it.
pub type ChangeFuture = BoxFuture<'static, ()>;

/// Called with the store and the new value right after a user edit.
///
/// The synchronous part runs before `edit` returns, so anything it reads from
/// the store reflects the moment the change fired.
pub type ChangeHandler = Arc<dyn Fn(&FieldStore, &str) -> ChangeFuture + Send + Sync>;

struct FieldEntry {
    definition: FieldDefinition,
    value: String,
    on_change: Option<ChangeHandler>,
}

/// Handle to the host panel's fields.
///
/// Cloning shares the same underlying fields.
#[derive(Clone, Default)]
pub struct FieldStore {
    entries: Arc<Mutex<Vec<FieldEntry>>>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field. Its value starts at the definition's default.
    pub fn register(
        &self,
        definition: FieldDefinition,
        on_change: Option<ChangeHandler>,
    ) -> Result<()> {
        let mut entries = self.lock();
        if entries.iter().any(|e| e.definition.id == definition.id) {
            return Err(SettingsError::DuplicateField(definition.id));
        }

        tracing::debug!(field = %definition.id, "registered settings field");
        entries.push(FieldEntry {
            value: definition.default_value.clone(),
            definition,
            on_change,
        });
        Ok(())
    }

    /// Current value of a field, `None` if it was never registered.
    pub fn value(&self, id: &str) -> Option<String> {
        self.lock()
            .iter()
            .find(|e| e.definition.id == id)
            .map(|e| e.value.clone())
    }

    /// Overwrite a field's value without notifying its change handler.
    pub fn set_value(&self, id: &str, value: impl Into<String>) -> Result<()> {
        let mut entries = self.lock();
        let entry = find_mut(&mut entries, id)?;
        entry.value = value.into();
        Ok(())
    }

    /// Apply a user edit and fire the field's change handler.
    ///
    /// The value is stored before the handler runs and stays in place no
    /// matter what the returned future does.
    pub fn edit(&self, id: &str, value: impl Into<String>) -> Result<ChangeFuture> {
        let value = value.into();
        let handler = {
            let mut entries = self.lock();
            let entry = find_mut(&mut entries, id)?;
            entry.value = value.clone();
            entry.on_change.clone()
        };

        // Lock released: the handler is free to read other fields.
        Ok(match handler {
            Some(handler) => handler(self, &value),
            None => futures::future::ready(()).boxed(),
        })
    }

    /// Registered definitions, in registration order.
    pub fn definitions(&self) -> Vec<FieldDefinition> {
        self.lock().iter().map(|e| e.definition.clone()).collect()
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.lock().iter().any(|e| e.definition.id == id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FieldEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for FieldStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.lock();
        f.debug_list()
            .entries(entries.iter().map(|e| (&e.definition.id, &e.value)))
            .finish()
    }
}

fn find_mut<'a>(entries: &'a mut [FieldEntry], id: &str) -> Result<&'a mut FieldEntry> {
    entries
        .iter_mut()
        .find(|e| e.definition.id == id)
        .ok_or_else(|| SettingsError::UnknownField(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recording_handler(seen: Arc<Mutex<Vec<(String, Option<String>)>>>) -> ChangeHandler {
        Arc::new(move |store: &FieldStore, value: &str| {
            seen.lock()
                .unwrap()
                .push((value.to_string(), store.value("other")));
            futures::future::ready(()).boxed()
        })
    }

    #[test]
    fn test_register_starts_at_default() {
        let store = FieldStore::new();
        store
            .register(FieldDefinition::text("a", "A").with_default("d"), None)
            .unwrap();
        assert_eq!(store.value("a"), Some("d".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_register_duplicate_rejected() {
        let store = FieldStore::new();
        store.register(FieldDefinition::text("a", "A"), None).unwrap();
        let err = store
            .register(FieldDefinition::text("a", "Again"), None)
            .unwrap_err();
        assert!(matches!(err, SettingsError::DuplicateField(id) if id == "a"));
    }

    #[test]
    fn test_value_unknown_field() {
        let store = FieldStore::new();
        assert!(store.value("missing").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_value_does_not_notify() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handler: ChangeHandler = Arc::new(move |_: &FieldStore, _: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            futures::future::ready(()).boxed()
        });

        let store = FieldStore::new();
        store
            .register(FieldDefinition::text("a", "A"), Some(handler))
            .unwrap();
        store.set_value("a", "loaded").unwrap();

        assert_eq!(store.value("a"), Some("loaded".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_set_value_unknown_field() {
        let store = FieldStore::new();
        assert!(matches!(
            store.set_value("nope", "x"),
            Err(SettingsError::UnknownField(_))
        ));
    }

    #[tokio::test]
    async fn test_edit_stores_value_then_notifies() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let store = FieldStore::new();
        store
            .register(
                FieldDefinition::text("a", "A"),
                Some(recording_handler(Arc::clone(&seen))),
            )
            .unwrap();
        store
            .register(FieldDefinition::text("other", "Other").with_default("o"), None)
            .unwrap();

        store.edit("a", "new").unwrap().await;

        assert_eq!(store.value("a"), Some("new".to_string()));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("new".to_string(), Some("o".to_string()))]
        );
    }

    #[test]
    fn test_edit_runs_handler_before_returning() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let store = FieldStore::new();
        store
            .register(
                FieldDefinition::text("a", "A"),
                Some(recording_handler(Arc::clone(&seen))),
            )
            .unwrap();

        // Future dropped without polling; the synchronous part already ran.
        let _ = store.edit("a", "v").unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_without_handler() {
        let store = FieldStore::new();
        store.register(FieldDefinition::text("a", "A"), None).unwrap();
        store.edit("a", "v").unwrap().await;
        assert_eq!(store.value("a"), Some("v".to_string()));
    }

    #[test]
    fn test_edit_unknown_field() {
        let store = FieldStore::new();
        assert!(matches!(
            store.edit("missing", "v"),
            Err(SettingsError::UnknownField(id)) if id == "missing"
        ));
    }

    #[test]
    fn test_definitions_in_registration_order() {
        let store = FieldStore::new();
        store.register(FieldDefinition::text("b", "B"), None).unwrap();
        store.register(FieldDefinition::text("a", "A"), None).unwrap();
        let ids: Vec<_> = store.definitions().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(store.is_registered("a"));
        assert!(!store.is_registered("c"));
    }

    #[test]
    fn test_clones_share_fields() {
        let store = FieldStore::new();
        let other = store.clone();
        store.register(FieldDefinition::text("a", "A"), None).unwrap();
        other.set_value("a", "shared").unwrap();
        assert_eq!(store.value("a"), Some("shared".to_string()));
    }
}
