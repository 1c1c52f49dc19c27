// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Spikecomm Engine
//!
//! The spike-exchange communicator at the heart of a distributed neural
//! simulation. Per communication epoch:
//!
//! ```text
//! local spikes → sort by source → distributed gather
//!     → global spikes (partitioned by source domain)
//!     → merge-join against the connection slice of the same domain
//!     → delivery events appended to per-group event queues
//! ```
//!
//! The per-domain-sorted connection table is built once, in parallel, at
//! construction; after that the only mutable state is the global spike
//! counter and whatever queues the caller hands in.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod communicator;
pub mod partition;
pub mod table;

pub use communicator::Communicator;
pub use partition::{make_index, GroupPartition};
pub use table::ConnectionTable;
