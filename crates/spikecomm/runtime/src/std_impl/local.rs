// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Single-process distributed context

use spikecomm_neural::{Result, Spike, Time};

use crate::gathered::GatheredVector;
use crate::traits::DistributedContext;

/// Collective surface for a job with exactly one domain.
///
/// Gathers wrap the local vector unchanged and reductions return their
/// argument; nothing can fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalContext;

impl DistributedContext for LocalContext {
    fn size(&self) -> usize {
        1
    }

    fn id(&self) -> usize {
        0
    }

    fn min(&self, value: Time) -> Result<Time> {
        Ok(value)
    }

    fn gather_spikes(&self, local: Vec<Spike>) -> Result<GatheredVector<Spike>> {
        Ok(GatheredVector::from_single(local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spikecomm_neural::CellMember;

    #[test]
    fn test_gather_wraps_local_spikes() {
        let ctx = LocalContext;
        let spikes = vec![
            Spike::new(CellMember::new(0, 0), 1.0),
            Spike::new(CellMember::new(3, 0), 2.5),
        ];

        let gathered = ctx.gather_spikes(spikes.clone()).unwrap();
        assert_eq!(gathered.num_contributors(), 1);
        assert_eq!(gathered.partition(), &[0, 2]);
        assert_eq!(gathered.values(), spikes.as_slice());
    }

    #[test]
    fn test_min_is_identity() {
        assert_eq!(LocalContext.min(0.25).unwrap(), 0.25);
    }
}
