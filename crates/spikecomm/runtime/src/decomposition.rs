// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Domain decomposition consumed by the communicator
//!
//! The decomposition algorithm itself lives elsewhere; the communicator only
//! consumes its output: the groups of locally-owned cells and the global
//! gid → domain mapping.

use spikecomm_neural::CellGid;

/// One cell group: the gids of the cells that are simulated together and
/// share a contiguous range of event queues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDescription {
    pub gids: Vec<CellGid>,
}

impl GroupDescription {
    pub fn new(gids: Vec<CellGid>) -> Self {
        Self { gids }
    }
}

/// Output of the domain decomposition, as consumed here.
///
/// `gid_domain` must map every gid in `[0, num_cells)` to a domain in
/// `[0, num_domains)`; construction verifies the range for every connection
/// source it encounters and rejects the decomposition otherwise.
pub struct DomainDecomposition {
    pub num_domains: usize,
    pub domain_id: usize,
    pub num_local_cells: usize,
    pub groups: Vec<GroupDescription>,
    gid_map: Box<dyn Fn(CellGid) -> usize + Send + Sync>,
}

impl DomainDecomposition {
    pub fn new(
        num_domains: usize,
        domain_id: usize,
        groups: Vec<GroupDescription>,
        gid_map: impl Fn(CellGid) -> usize + Send + Sync + 'static,
    ) -> Self {
        let num_local_cells = groups.iter().map(|g| g.gids.len()).sum();
        Self {
            num_domains,
            domain_id,
            num_local_cells,
            groups,
            gid_map: Box::new(gid_map),
        }
    }

    /// The domain owning `gid`.
    pub fn gid_domain(&self, gid: CellGid) -> usize {
        (self.gid_map)(gid)
    }
}
