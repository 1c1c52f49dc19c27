// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Spikecomm Neural Types
//!
//! Plain value types shared by every layer of the spike-exchange core:
//! cell identities, spikes, connections, delivery events, and the error
//! enum. No I/O, no threading, just data.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod types;

pub use types::*;
