// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! afterdark-settings - the HackAfterDark settings panel.
//!
//! Registers two text fields (the Gemini API key and the prompt template
//! directory) into a host settings panel, loads their stored values from the
//! host's HTTP backend at startup, and saves the full pair whenever the user
//! edits either one.
//!
//! Architecture highlights:
//! - `sync`: `SettingsSync`, the load-on-init / save-on-change component
//! - `panel`: `FieldStore`, the host panel handle with per-field change handlers
//! - `backend`: the `SettingsBackend` trait, its HTTP implementation and a mock
//! - `record`: wire types exchanged with the backend
//! - `config`, `cli`: configuration and the command-line front end

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod panel;
pub mod record;
pub mod sync;
pub mod utils;

pub use error::{Result, SettingsError};
