// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Recipe capability trait

use spikecomm_neural::{CellConnection, CellGid};

/// Describes the network being simulated: how many cells exist, and for each
/// cell the set of incoming connections terminating on it.
///
/// Queries must be side-effect-free and reentrant: construction fans
/// `connections_on` calls across the worker pool with no ordering between
/// them.
pub trait Recipe: Send + Sync {
    /// Total number of cells in the global network.
    fn num_cells(&self) -> CellGid;

    /// All connections terminating at `gid`.
    fn connections_on(&self, gid: CellGid) -> Vec<CellConnection>;
}
