// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Spikecomm: distributed spike exchange for neural simulations
//!
//! Cells are partitioned across the domains of a parallel job; every spike a
//! cell fires must reach each downstream connection, at the correct simulated
//! time, on whichever domain owns the target. Spikecomm is the communication
//! core that makes this happen, split into three layers:
//!
//! - `spikecomm-neural`: the value types: spikes, connections, delivery
//!   events, the shared error enum.
//! - `spikecomm-runtime`: the capability traits the core consumes
//!   (`Recipe`, `DistributedContext`), the gathered-vector container, the
//!   domain decomposition, and the execution context.
//! - `spikecomm-engine`: the `Communicator` itself: the per-domain-sorted
//!   connection table built in parallel at construction, the collective spike
//!   exchange, and the merge-join that turns gathered spikes into per-cell
//!   delivery events.
//!
//! ## Quick start
//!
//! ```rust
//! use spikecomm::prelude::*;
//!
//! // A four-cell ring: each cell listens to its predecessor.
//! struct Ring {
//!     n: u32,
//! }
//!
//! impl Recipe for Ring {
//!     fn num_cells(&self) -> u32 {
//!         self.n
//!     }
//!
//!     fn connections_on(&self, gid: u32) -> Vec<CellConnection> {
//!         let prev = (gid + self.n - 1) % self.n;
//!         vec![CellConnection {
//!             source: CellMember::new(prev, 0),
//!             dest: CellMember::new(gid, 0),
//!             weight: 0.1,
//!             delay: 1.0,
//!         }]
//!     }
//! }
//!
//! let ctx = ExecutionContext::local();
//! let decomp = DomainDecomposition::new(
//!     1,
//!     0,
//!     vec![GroupDescription::new((0..4).collect())],
//!     |_gid| 0,
//! );
//! let mut comm = Communicator::new(&Ring { n: 4 }, &decomp, &ctx)?;
//!
//! let global = comm.exchange(vec![Spike::new(CellMember::new(0, 0), 1.0)])?;
//! let mut queues = vec![EventQueue::new(); comm.num_local_cells()];
//! comm.make_event_queues(&global, &mut queues);
//!
//! // Cell 1 listens to cell 0, so its queue received the delayed event.
//! assert_eq!(queues[1].len(), 1);
//! assert_eq!(queues[1][0].time, 2.0);
//! # Ok::<(), spikecomm::neural::CommError>(())
//! ```

pub use spikecomm_engine as engine;
pub use spikecomm_neural as neural;
pub use spikecomm_runtime as runtime;

pub mod prelude {
    pub use spikecomm_engine::Communicator;
    pub use spikecomm_neural::{
        CellConnection, CellMember, CommError, Connection, EventQueue, Spike, SpikeEvent,
    };
    pub use spikecomm_runtime::{
        DistributedContext, DomainDecomposition, ExecutionContext, GatheredVector,
        GroupDescription, LocalContext, Recipe,
    };
}
