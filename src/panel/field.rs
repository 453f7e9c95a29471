// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde::{Deserialize, Serialize};

/// Input widget the host renders for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
}

/// Description of a settings entry as registered with the host panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Stable identifier, e.g. `HackAfterDark.GeminiApiKey`
    pub id: String,

    /// Name shown next to the input
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: FieldKind,

    /// Value the field holds until something overwrites it
    #[serde(default)]
    pub default_value: String,
}

impl FieldDefinition {
    /// A text field with an empty default.
    pub fn text(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: FieldKind::Text,
            default_value: String::new(),
        }
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }
}
