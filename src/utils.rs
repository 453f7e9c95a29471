// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Utility functions
//!
//! Pure helpers used by the command-line front end, kept here for testability.

use crate::error::{BackendError, SettingsError};

/// Mask a secret for display, keeping only the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        return String::new();
    }
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

/// Render a field value for the terminal, showing `(not set)` when empty.
pub fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// Format an error for display to the user
pub fn format_error(error: &SettingsError) -> String {
    match error {
        SettingsError::Backend(BackendError::Transport(_)) => format!(
            "Error: {}\nIs the host application running and reachable at the configured base URL?",
            error
        ),
        _ => format!("Error: {}", error),
    }
}
