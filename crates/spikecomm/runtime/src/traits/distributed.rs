// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Distributed collective surface

use spikecomm_neural::{Result, Spike, Time};

use crate::gathered::GatheredVector;

/// Abstract collective surface over the inter-domain transport.
///
/// Collectives are epoch-synchronous barriers: every domain must enter them
/// in the same sequence or the job deadlocks. Transport failures propagate
/// unchanged; there is no retry here, and the epoch is undefined after one.
pub trait DistributedContext: Send + Sync {
    /// Number of domains in the job.
    fn size(&self) -> usize;

    /// Id of the calling domain, in `[0, size)`.
    fn id(&self) -> usize;

    /// Global minimum of `value` across all domains.
    fn min(&self, value: Time) -> Result<Time>;

    /// All-gather of variable-length spike vectors.
    ///
    /// Every domain receives the same gathered vector, partitioned in
    /// contributor order. Callers are responsible for sorting `local` by
    /// source before the gather.
    fn gather_spikes(&self, local: Vec<Spike>) -> Result<GatheredVector<Spike>>;
}
