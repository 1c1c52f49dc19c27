// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Core type definitions

pub mod connection;
pub mod error;
pub mod event;
pub mod ids;
pub mod spike;

pub use connection::{CellConnection, Connection, Weight};
pub use error::{CommError, Result};
pub use event::{EventQueue, SpikeEvent};
pub use ids::{CellGid, CellLid, CellMember};
pub use spike::{Spike, Time};
