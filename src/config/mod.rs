// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module
//!
//! Handles loading, saving, and resolving the client configuration.

pub mod client;

pub use client::*;
