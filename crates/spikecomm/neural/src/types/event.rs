// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Delivery events and per-cell event queues

use serde::{Deserialize, Serialize};

use super::connection::Weight;
use super::ids::CellMember;
use super::spike::Time;

/// A time-stamped, weighted delivery to a local target site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeEvent {
    pub target: CellMember,
    pub time: Time,
    pub weight: Weight,
}

/// Per-local-cell buffer of pending delivery events.
///
/// The event-queue builder only appends; consumers sort and drain a queue
/// before delivering it to the cell group.
pub type EventQueue = Vec<SpikeEvent>;
