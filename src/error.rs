// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for the settings panel
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Main error type for settings panel operations
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Backend-related errors
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field id that was never registered with the panel
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A field id registered twice
    #[error("Field already registered: {0}")]
    DuplicateField(String),

    /// `initialize` called on a panel that is already set up
    #[error("Settings panel already initialized")]
    AlreadyInitialized,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failures talking to the settings backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced a response (connection refused, DNS, reset)
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-200 status
    #[error("Backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// True for failures where no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Transport(_))
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::InvalidResponse(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

impl From<reqwest::Error> for SettingsError {
    fn from(err: reqwest::Error) -> Self {
        SettingsError::Backend(err.into())
    }
}

/// Result type alias for settings panel operations
pub type Result<T> = std::result::Result<T, SettingsError>;
