// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock settings backend for testing
//!
//! Records every save and answers fetches from configurable state, without
//! any network access.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{BackendError, Result};
use crate::record::{SettingsRecord, StoredSettings};

use super::SettingsBackend;

/// How the mock answers a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Behave like a 200
    Ok,
    /// Behave like a non-200 status
    Status(u16),
    /// Behave like a network failure
    Unreachable,
}

impl MockReply {
    fn into_result(self) -> std::result::Result<(), BackendError> {
        match self {
            MockReply::Ok => Ok(()),
            MockReply::Status(status) => Err(BackendError::Rejected {
                status,
                message: "mock rejection".to_string(),
            }),
            MockReply::Unreachable => {
                Err(BackendError::Transport("mock backend unreachable".to_string()))
            }
        }
    }
}

/// In-memory backend that records saves
#[derive(Clone)]
pub struct MockBackend {
    stored: Arc<Mutex<StoredSettings>>,
    fetch_reply: Arc<Mutex<MockReply>>,
    save_reply: Arc<Mutex<MockReply>>,
    fetch_count: Arc<AtomicUsize>,
    saved: Arc<Mutex<Vec<SettingsRecord>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            stored: Arc::new(Mutex::new(StoredSettings::default())),
            fetch_reply: Arc::new(Mutex::new(MockReply::Ok)),
            save_reply: Arc::new(Mutex::new(MockReply::Ok)),
            fetch_count: Arc::new(AtomicUsize::new(0)),
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given stored settings
    pub fn with_stored(stored: StoredSettings) -> Self {
        let backend = Self::default();
        *lock(&backend.stored) = stored;
        backend
    }

    pub fn set_fetch_reply(&self, reply: MockReply) {
        *lock(&self.fetch_reply) = reply;
    }

    pub fn set_save_reply(&self, reply: MockReply) {
        *lock(&self.save_reply) = reply;
    }

    /// Every record passed to `save`, in call order, including rejected ones
    pub fn saved(&self) -> Vec<SettingsRecord> {
        lock(&self.saved).clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// What a subsequent fetch would return
    pub fn stored(&self) -> StoredSettings {
        lock(&self.stored).clone()
    }
}

#[async_trait]
impl SettingsBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self) -> Result<StoredSettings> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let reply = lock(&self.fetch_reply).clone();
        reply.into_result()?;
        Ok(self.stored())
    }

    async fn save(&self, record: &SettingsRecord) -> Result<()> {
        lock(&self.saved).push(record.clone());
        let reply = lock(&self.save_reply).clone();
        reply.into_result()?;
        *lock(&self.stored) = record.clone().into();
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
