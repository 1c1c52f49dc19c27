// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-domain-partitioned connection table
//!
//! A single flat, immutable array of connections, split into one contiguous
//! slice per source domain. Slice `d` holds exactly the connections whose
//! presynaptic gid lives in domain `d`, sorted by `(source, dest)`. This is the
//! layout the per-epoch merge-join depends on.

use rayon::prelude::*;

use spikecomm_neural::{CellConnection, CellGid, CommError, Connection, Result, Time};

use crate::partition::make_index;

#[derive(Debug, Clone)]
pub struct ConnectionTable {
    connections: Vec<Connection>,
    connection_part: Vec<usize>,
}

impl Default for ConnectionTable {
    fn default() -> Self {
        Self {
            connections: Vec::new(),
            connection_part: vec![0],
        }
    }
}

impl ConnectionTable {
    /// Build the table from per-cell staged connection lists.
    ///
    /// `staged[i]` holds the connections terminating on local cell `i`; that
    /// position becomes `index_on_domain` of every placed copy. Placement is
    /// count → prefix-sum → grouped in-place fill, then one independent sort
    /// per domain slice across the worker pool.
    ///
    /// The count pass validates every connection (`delay > 0`, source gid in
    /// `[0, num_cells)`, source domain in `[0, num_domains)`); the first
    /// violation aborts the build.
    pub fn build<F>(
        staged: &[Vec<CellConnection>],
        num_cells: CellGid,
        num_domains: usize,
        gid_domain: F,
        pool: &rayon::ThreadPool,
    ) -> Result<Self>
    where
        F: Fn(CellGid) -> usize,
    {
        let n_cons: usize = staged.iter().map(Vec::len).sum();

        // Count connections per source domain while the staging order is
        // still per-cell, recording each connection's source domain for the
        // placement walk below.
        let mut src_domains = Vec::with_capacity(n_cons);
        let mut src_counts = vec![0usize; num_domains];
        for cons in staged {
            for con in cons {
                if !(con.delay > 0.0) {
                    return Err(CommError::InvalidDelay {
                        src: con.source,
                        delay: con.delay,
                    });
                }
                if con.source.gid >= num_cells {
                    return Err(CommError::SourceGidOutOfRange {
                        gid: con.source.gid,
                        num_cells,
                    });
                }
                let domain = gid_domain(con.source.gid);
                if domain >= num_domains {
                    return Err(CommError::InconsistentDecomposition {
                        gid: con.source.gid,
                        domain,
                        num_domains,
                    });
                }
                src_domains.push(domain);
                src_counts[domain] += 1;
            }
        }

        // Grouped in-place placement: each connection takes the next free
        // slot inside its source-domain slice. Every slot is written exactly
        // once because the offsets start from the per-domain counts.
        let connection_part = make_index(&src_counts);
        let mut offsets = connection_part.clone();
        let mut connections = vec![Connection::default(); n_cons];
        let mut pos = 0;
        for (index_on_domain, cons) in staged.iter().enumerate() {
            for con in cons {
                let slot = offsets[src_domains[pos]];
                offsets[src_domains[pos]] += 1;
                connections[slot] = Connection::new(*con, index_on_domain as u32);
                pos += 1;
            }
        }

        // The per-domain sorts touch disjoint slices and are independent;
        // run them across the worker pool.
        let mut slices: Vec<&mut [Connection]> = Vec::with_capacity(num_domains);
        let mut rest = connections.as_mut_slice();
        for domain in 0..num_domains {
            let len = connection_part[domain + 1] - connection_part[domain];
            let (slice, tail) = rest.split_at_mut(len);
            slices.push(slice);
            rest = tail;
        }
        pool.install(|| {
            slices
                .into_par_iter()
                .for_each(|slice| slice.sort_unstable_by_key(Connection::sort_key));
        });

        Ok(Self {
            connections,
            connection_part,
        })
    }

    /// The full table, grouped by source domain.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Partition of the table by source domain: slice `d` is
    /// `connections()[partition()[d]..partition()[d + 1]]`.
    pub fn partition(&self) -> &[usize] {
        &self.connection_part
    }

    pub fn num_domains(&self) -> usize {
        self.connection_part.len() - 1
    }

    /// Connections whose presynaptic gid lives in domain `d`.
    pub fn slice(&self, d: usize) -> &[Connection] {
        &self.connections[self.connection_part[d]..self.connection_part[d + 1]]
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Minimum delay over the local table; `+∞` when the table is empty so
    /// the distributed reduction stays well-defined.
    pub fn min_delay(&self) -> Time {
        self.connections
            .iter()
            .fold(f64::INFINITY, |acc, con| acc.min(con.delay))
    }
}
