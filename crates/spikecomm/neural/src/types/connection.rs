// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Delayed, weighted links from a presynaptic site to a local target

use serde::{Deserialize, Serialize};

use super::event::SpikeEvent;
use super::ids::CellMember;
use super::spike::{Spike, Time};

/// Synaptic weight
pub type Weight = f32;

/// A connection as the recipe describes it: any global source site feeding a
/// target site inside the queried cell. Placement onto a domain happens
/// later, during communicator construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellConnection {
    /// Presynaptic site (any cell in the global network)
    pub source: CellMember,
    /// Target site inside the locally-owned cell
    pub dest: CellMember,
    pub weight: Weight,
    /// Propagation delay; must be > 0
    pub delay: Time,
}

/// A connection placed into the per-domain table.
///
/// `index_on_domain` is the position of the postsynaptic cell in the flat
/// per-domain cell list; it selects the event queue that receives generated
/// events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: CellMember,
    pub dest: CellMember,
    pub weight: Weight,
    pub delay: Time,
    pub index_on_domain: u32,
}

impl Connection {
    pub fn new(con: CellConnection, index_on_domain: u32) -> Self {
        Self {
            source: con.source,
            dest: con.dest,
            weight: con.weight,
            delay: con.delay,
            index_on_domain,
        }
    }

    /// Table ordering key, `source` dominant so a sorted slice can be
    /// equal-ranged on spike sources.
    #[inline]
    pub fn sort_key(&self) -> (CellMember, CellMember) {
        (self.source, self.dest)
    }

    /// Build the delivery event for a spike whose source matches this
    /// connection. The event time is `spike.time + delay`, computed in f64
    /// with no rounding beyond the single addition.
    #[inline]
    pub fn make_event(&self, spike: &Spike) -> SpikeEvent {
        SpikeEvent {
            target: self.dest,
            time: spike.time + self.delay,
            weight: self.weight,
        }
    }
}
