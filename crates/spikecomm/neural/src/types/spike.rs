// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spike records announcing a firing site and time

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ids::CellMember;

/// Simulation time in milliseconds
pub type Time = f64;

/// A point-in-time firing event produced by one site of one cell.
///
/// Spikes compare by `source`; the exchange sorts them on it before the
/// collective gather.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub source: CellMember,
    pub time: Time,
}

impl Spike {
    pub fn new(source: CellMember, time: Time) -> Self {
        Self { source, time }
    }
}

impl fmt::Display for Spike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.source, self.time)
    }
}
