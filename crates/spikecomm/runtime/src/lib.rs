// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Spikecomm Runtime
//!
//! The capability surface the spike-exchange core consumes, and the handles
//! it stores at construction:
//!
//! - **Traits**: [`Recipe`] (network description) and [`DistributedContext`]
//!   (inter-domain collectives). Variants are resolved at construction and
//!   held by handle; the core never sees a concrete transport.
//! - **Data**: [`GatheredVector`] (all-gather result with per-contributor
//!   partition), [`DomainDecomposition`] and [`GroupDescription`].
//! - **Std implementation**: [`LocalContext`], the single-process collective
//!   used when a job runs on one domain.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod context;
pub mod decomposition;
pub mod gathered;
pub mod std_impl;
pub mod traits;

pub use context::ExecutionContext;
pub use decomposition::{DomainDecomposition, GroupDescription};
pub use gathered::GatheredVector;
pub use std_impl::LocalContext;
pub use traits::{DistributedContext, Recipe};
