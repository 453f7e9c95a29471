// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Host settings panel
//!
//! The panel the settings fields are registered into. It owns the current
//! value of every field and calls a field's change handler whenever the user
//! edits it. Values written programmatically (for example by the initial
//! load) do not notify.

pub mod field;
pub mod store;

pub use field::{FieldDefinition, FieldKind};
pub use store::{ChangeFuture, ChangeHandler, FieldStore};
