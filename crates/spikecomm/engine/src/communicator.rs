// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spike-exchange communicator
//!
//! Owns the per-domain connection table built at construction and, per
//! communication epoch, exchanges spike sets between domains and turns the
//! gathered global set into per-cell delivery events.
//!
//! The table, partitions and counts are immutable once built; the running
//! spike counter is the only mutable state the communicator keeps.

use std::ops::Range;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, trace};

use spikecomm_neural::{CellConnection, Connection, EventQueue, Result, Spike, Time};
use spikecomm_runtime::{
    DistributedContext, DomainDecomposition, ExecutionContext, GatheredVector, Recipe,
};

use crate::partition::GroupPartition;
use crate::table::ConnectionTable;

pub struct Communicator {
    num_local_cells: usize,
    num_domains: usize,
    table: ConnectionTable,
    index_part: GroupPartition,
    distributed: Arc<dyn DistributedContext>,
    num_spikes: u64,
}

impl std::fmt::Debug for Communicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Communicator")
            .field("num_local_cells", &self.num_local_cells)
            .field("num_domains", &self.num_domains)
            .field("table", &self.table)
            .field("index_part", &self.index_part)
            .field("num_spikes", &self.num_spikes)
            .finish()
    }
}

impl Communicator {
    /// Build the communicator from the recipe and domain decomposition.
    ///
    /// Construction queries the recipe once per local cell across the worker
    /// pool, places the resulting connections grouped by source domain, and
    /// sorts each domain slice. It is all-or-nothing: the first invalid
    /// connection or decomposition inconsistency aborts with the matching
    /// error and no communicator is produced.
    pub fn new(
        rec: &dyn Recipe,
        dom_dec: &DomainDecomposition,
        ctx: &ExecutionContext,
    ) -> Result<Self> {
        let distributed = Arc::clone(&ctx.distributed);
        let num_domains = distributed.size();

        // Record all local gids in one flat vector. This fixes the
        // local-index ↔ gid mapping used by the rest of construction.
        let mut gids = Vec::with_capacity(dom_dec.num_local_cells);
        for group in &dom_dec.groups {
            gids.extend_from_slice(&group.gids);
        }

        // Query the recipe for every local cell across the worker pool.
        // Iterations are independent and order-free; collect writes each
        // result back to its cell's position.
        let staged: Vec<Vec<CellConnection>> = ctx.thread_pool.install(|| {
            gids.par_iter()
                .map(|&gid| rec.connections_on(gid))
                .collect()
        });

        let table = ConnectionTable::build(
            &staged,
            rec.num_cells(),
            num_domains,
            |gid| dom_dec.gid_domain(gid),
            &ctx.thread_pool,
        )?;
        let index_part = GroupPartition::from_sizes(dom_dec.groups.iter().map(|g| g.gids.len()));

        debug!(
            num_local_cells = gids.len(),
            num_domains,
            num_connections = table.len(),
            "built spike-exchange communicator"
        );

        Ok(Self {
            num_local_cells: dom_dec.num_local_cells,
            num_domains,
            table,
            index_part,
            distributed,
            num_spikes: 0,
        })
    }

    /// The range of event queues that belong to the cells in group `i`.
    pub fn group_queue_range(&self, i: usize) -> Range<usize> {
        assert!(
            i < self.index_part.num_groups(),
            "group index {i} out of range"
        );
        self.index_part.range(i)
    }

    /// The minimum delay of all connections in the global network.
    ///
    /// An empty local table contributes `+∞`, so the reduction is
    /// well-defined on domains that own no connections.
    pub fn min_delay(&self) -> Result<Time> {
        self.distributed.min(self.table.min_delay())
    }

    /// Perform the collective exchange of spikes.
    ///
    /// Sorts `local_spikes` in ascending source order (the merge-join in
    /// [`make_event_queues`](Self::make_event_queues) relies on every domain
    /// slice being sorted) and gathers the full global spike set onto every
    /// domain. This is a synchronization point: all domains must call it in
    /// the same sequence.
    pub fn exchange(&mut self, mut local_spikes: Vec<Spike>) -> Result<GatheredVector<Spike>> {
        local_spikes.sort_unstable_by_key(|spike| spike.source);

        let global_spikes = self.distributed.gather_spikes(local_spikes)?;
        self.num_spikes += global_spikes.len() as u64;
        trace!(
            global_spikes = global_spikes.len(),
            "spike exchange complete"
        );

        Ok(global_spikes)
    }

    /// Check each global spike against the local connection table and append
    /// the generated events to the queue of the postsynaptic cell.
    ///
    /// `queues` holds one queue per local cell. Existing entries are
    /// preserved; nothing is cleared, sorted or deduplicated here. Per-queue
    /// ordering before delivery is the consumer's job.
    pub fn make_event_queues(
        &self,
        global_spikes: &GatheredVector<Spike>,
        queues: &mut [EventQueue],
    ) {
        assert_eq!(
            queues.len(),
            self.num_local_cells,
            "one event queue per local cell required"
        );

        for domain in 0..self.num_domains {
            let cons = self.table.slice(domain);
            let spks = global_spikes.slice(domain);

            // Both sides are sorted by source. Walk the smaller one and
            // equal-range into the remaining suffix of the other, so the
            // cost is min(|C|,|S|)·log max(|C|,|S|) plus the matches. Every
            // (connection, spike) pair with equal sources emits exactly one
            // event; neither side is deduplicated.
            if cons.len() < spks.len() {
                let mut sp = 0;
                for con in cons {
                    let rest = &spks[sp..];
                    if rest.is_empty() {
                        break;
                    }
                    let lo = rest.partition_point(|s| s.source < con.source);
                    let hi = rest.partition_point(|s| s.source <= con.source);
                    for spike in &rest[lo..hi] {
                        queues[con.index_on_domain as usize].push(con.make_event(spike));
                    }
                    sp += lo;
                }
            } else {
                let mut cn = 0;
                for spike in spks {
                    let rest = &cons[cn..];
                    if rest.is_empty() {
                        break;
                    }
                    let lo = rest.partition_point(|c| c.source < spike.source);
                    let hi = rest.partition_point(|c| c.source <= spike.source);
                    for con in &rest[lo..hi] {
                        queues[con.index_on_domain as usize].push(con.make_event(spike));
                    }
                    cn += lo;
                }
            }
        }
    }

    /// Total number of global spikes observed across all exchanges since the
    /// last [`reset`](Self::reset).
    pub fn num_spikes(&self) -> u64 {
        self.num_spikes
    }

    /// Zero the spike counter. The connection table is untouched.
    pub fn reset(&mut self) {
        self.num_spikes = 0;
    }

    pub fn num_local_cells(&self) -> usize {
        self.num_local_cells
    }

    pub fn num_domains(&self) -> usize {
        self.num_domains
    }

    /// The local connection table, grouped by source domain (diagnostic).
    pub fn connections(&self) -> &[Connection] {
        self.table.connections()
    }

    /// Partition of [`connections`](Self::connections) by source domain
    /// (diagnostic).
    pub fn connection_partition(&self) -> &[usize] {
        self.table.partition()
    }
}
