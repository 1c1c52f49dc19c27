// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Integration Tests: Two-Domain Exchange Workflow
//!
//! End-to-end tests for the full communication pipeline on one domain of a
//! simulated two-domain job:
//! - Local spikes → exchange → gathered global set → per-cell event queues
//! - Fan-out, fan-in, unmatched spikes, multiplicity
//! - Spike accounting across epochs
//! - Global minimum-delay reduction
//!
//! Domain 0 owns cells {0, 1}, domain 1 owns cells {2, 3}. The peer's
//! contributions are scripted into the mock distributed context.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use ahash::AHashMap;

use spikecomm_engine::Communicator;
use spikecomm_neural::{
    CellConnection, CellGid, CellLid, CellMember, CommError, EventQueue, Result as CommResult,
    Spike, Time,
};
use spikecomm_runtime::{
    DistributedContext, DomainDecomposition, ExecutionContext, GatheredVector, GroupDescription,
    Recipe,
};

const WEIGHT: f32 = 0.5;

/// Recipe backed by an explicit wiring map.
struct TableRecipe {
    num_cells: CellGid,
    wiring: AHashMap<CellGid, Vec<CellConnection>>,
}

impl TableRecipe {
    fn new(num_cells: CellGid) -> Self {
        Self {
            num_cells,
            wiring: AHashMap::new(),
        }
    }

    fn connect(mut self, dest_gid: CellGid, source: (CellGid, CellLid), delay: Time) -> Self {
        self.wiring
            .entry(dest_gid)
            .or_default()
            .push(CellConnection {
                source: CellMember::new(source.0, source.1),
                dest: CellMember::new(dest_gid, 0),
                weight: WEIGHT,
                delay,
            });
        self
    }
}

impl Recipe for TableRecipe {
    fn num_cells(&self) -> CellGid {
        self.num_cells
    }

    fn connections_on(&self, gid: CellGid) -> Vec<CellConnection> {
        self.wiring.get(&gid).cloned().unwrap_or_default()
    }
}

/// One domain of a simulated two-domain job.
///
/// The peer's per-epoch spike contributions are scripted up front; every
/// gather pops the next batch and splices it in at the peer's slot, sorted
/// the way the peer's own exchange would have sorted it.
struct TwoDomainContext {
    id: usize,
    peer_min: Time,
    peer_epochs: Mutex<VecDeque<Vec<Spike>>>,
}

impl TwoDomainContext {
    fn new(id: usize, peer_min: Time, peer_epochs: Vec<Vec<Spike>>) -> Arc<Self> {
        Arc::new(Self {
            id,
            peer_min,
            peer_epochs: Mutex::new(peer_epochs.into()),
        })
    }
}

impl DistributedContext for TwoDomainContext {
    fn size(&self) -> usize {
        2
    }

    fn id(&self) -> usize {
        self.id
    }

    fn min(&self, value: Time) -> CommResult<Time> {
        Ok(value.min(self.peer_min))
    }

    fn gather_spikes(&self, local: Vec<Spike>) -> CommResult<GatheredVector<Spike>> {
        let mut peer = self
            .peer_epochs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        peer.sort_unstable_by_key(|spike| spike.source);

        let (first, second) = if self.id == 0 { (local, peer) } else { (peer, local) };
        let partition = vec![0, first.len(), first.len() + second.len()];
        let mut values = first;
        values.extend(second);
        Ok(GatheredVector::new(values, partition))
    }
}

fn spike(gid: CellGid, index: CellLid, time: Time) -> Spike {
    Spike::new(CellMember::new(gid, index), time)
}

fn two_domain_decomposition() -> DomainDecomposition {
    DomainDecomposition::new(
        2,
        0,
        vec![GroupDescription::new(vec![0, 1])],
        |gid| (gid / 2) as usize,
    )
}

fn domain0_with_min(
    recipe: &TableRecipe,
    peer_min: Time,
    peer_epochs: Vec<Vec<Spike>>,
) -> Communicator {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(2)
        .build()
        .unwrap();
    let ctx = ExecutionContext::new(
        TwoDomainContext::new(0, peer_min, peer_epochs),
        Arc::new(pool),
    );
    Communicator::new(recipe, &two_domain_decomposition(), &ctx).unwrap()
}

fn domain0(recipe: &TableRecipe, peer_epochs: Vec<Vec<Spike>>) -> Communicator {
    domain0_with_min(recipe, f64::INFINITY, peer_epochs)
}

/// Exchange one epoch and build the queues in one go.
fn run_epoch(comm: &mut Communicator, local: Vec<Spike>) -> Vec<EventQueue> {
    let global = comm.exchange(local).unwrap();
    let mut queues = vec![EventQueue::new(); comm.num_local_cells()];
    comm.make_event_queues(&global, &mut queues);
    queues
}

#[test]
fn test_single_spike_single_connection() {
    let recipe = TableRecipe::new(4).connect(0, (2, 0), 1.0);
    let mut comm = domain0(&recipe, vec![vec![spike(2, 0, 5.0)]]);

    let queues = run_epoch(&mut comm, Vec::new());

    assert_eq!(queues[0].len(), 1);
    let event = queues[0][0];
    assert_eq!(event.target, CellMember::new(0, 0));
    assert_eq!(event.weight, WEIGHT);
    assert_eq!(event.time, 6.0);
    assert!(queues[1].is_empty());
}

#[test]
fn test_fan_out() {
    let recipe = TableRecipe::new(4)
        .connect(0, (2, 0), 1.0)
        .connect(1, (2, 0), 1.0);
    let mut comm = domain0(&recipe, vec![vec![spike(2, 0, 5.0)]]);

    let queues = run_epoch(&mut comm, Vec::new());

    assert_eq!(queues[0].len(), 1);
    assert_eq!(queues[1].len(), 1);
    assert_eq!(queues[0][0].time, 6.0);
    assert_eq!(queues[1][0].time, 6.0);
}

#[test]
fn test_fan_in() {
    let recipe = TableRecipe::new(4)
        .connect(0, (2, 0), 1.0)
        .connect(0, (3, 0), 1.0);
    let mut comm = domain0(&recipe, vec![vec![spike(2, 0, 5.0), spike(3, 0, 7.0)]]);

    let queues = run_epoch(&mut comm, Vec::new());

    let times: Vec<Time> = queues[0].iter().map(|e| e.time).collect();
    assert_eq!(times, vec![6.0, 8.0]);
    assert!(queues[1].is_empty());
}

#[test]
fn test_unmatched_spike_generates_nothing() {
    let recipe = TableRecipe::new(4).connect(0, (2, 0), 1.0);
    let mut comm = domain0(&recipe, vec![vec![spike(99, 0, 5.0)]]);

    let queues = run_epoch(&mut comm, Vec::new());
    assert!(queues.iter().all(|q| q.is_empty()));
}

#[test]
fn test_mixed_local_and_remote_sources() {
    let recipe = TableRecipe::new(4)
        .connect(0, (1, 0), 1.0)
        .connect(0, (2, 0), 2.0);
    let mut comm = domain0(&recipe, vec![vec![spike(2, 0, 1.0)]]);

    let global = comm.exchange(vec![spike(1, 0, 1.0)]).unwrap();
    assert_eq!(global.num_contributors(), 2);
    assert_eq!(global.count(0), 1);
    assert_eq!(global.count(1), 1);

    let mut queues = vec![EventQueue::new(); comm.num_local_cells()];
    comm.make_event_queues(&global, &mut queues);

    let mut times: Vec<Time> = queues[0].iter().map(|e| e.time).collect();
    times.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(times, vec![2.0, 3.0]);
}

#[test]
fn test_multiplicity_is_spikes_times_connections() {
    // Source (2, 0) fires twice and feeds three connections on this domain:
    // exactly 2 × 3 events, no deduplication on either side.
    let recipe = TableRecipe::new(4)
        .connect(0, (2, 0), 1.0)
        .connect(0, (2, 0), 2.0)
        .connect(1, (2, 0), 1.0);
    let mut comm = domain0(&recipe, vec![vec![spike(2, 0, 5.0), spike(2, 0, 7.0)]]);

    let queues = run_epoch(&mut comm, Vec::new());

    assert_eq!(queues[0].len(), 4);
    assert_eq!(queues[1].len(), 2);
}

#[test]
fn test_empty_exchange_on_every_domain() {
    let recipe = TableRecipe::new(4).connect(0, (2, 0), 1.0);
    let mut comm = domain0(&recipe, vec![Vec::new()]);

    let global = comm.exchange(Vec::new()).unwrap();
    assert!(global.is_empty());

    let mut queues = vec![EventQueue::new(); comm.num_local_cells()];
    comm.make_event_queues(&global, &mut queues);
    assert!(queues.iter().all(|q| q.is_empty()));
    assert_eq!(comm.num_spikes(), 0);
}

#[test]
fn test_spike_counter_accumulates_across_epochs() {
    let recipe = TableRecipe::new(4);
    let peer_epochs = vec![
        vec![spike(2, 0, 1.0); 6], //
        vec![spike(3, 0, 2.0); 4],
    ];
    let mut comm = domain0(&recipe, peer_epochs);

    comm.exchange(vec![spike(0, 0, 1.0); 4]).unwrap();
    assert_eq!(comm.num_spikes(), 10);

    comm.exchange(vec![spike(1, 0, 2.0); 3]).unwrap();
    assert_eq!(comm.num_spikes(), 17);

    comm.reset();
    assert_eq!(comm.num_spikes(), 0);
}

#[test]
fn test_min_delay_reduces_across_domains() {
    let recipe = TableRecipe::new(4)
        .connect(0, (1, 0), 1.0)
        .connect(1, (3, 0), 2.5);

    // The peer holds the global minimum.
    let comm = domain0_with_min(&recipe, 0.5, Vec::new());
    assert_eq!(comm.min_delay().unwrap(), 0.5);

    // The local table holds it.
    let comm = domain0_with_min(&recipe, f64::INFINITY, Vec::new());
    assert_eq!(comm.min_delay().unwrap(), 1.0);
}

#[test]
fn test_queue_output_invariant_under_input_permutation() {
    let recipe = TableRecipe::new(4)
        .connect(0, (1, 0), 1.0)
        .connect(0, (2, 0), 1.0)
        .connect(1, (3, 0), 1.0);

    let peer_forward = vec![vec![spike(2, 0, 5.0), spike(3, 0, 6.0)]];
    let peer_reversed = vec![vec![spike(3, 0, 6.0), spike(2, 0, 5.0)]];
    let local_forward = vec![spike(0, 0, 4.0), spike(1, 0, 4.5)];
    let local_reversed = vec![spike(1, 0, 4.5), spike(0, 0, 4.0)];

    let mut comm_a = domain0(&recipe, peer_forward);
    let mut comm_b = domain0(&recipe, peer_reversed);

    let queues_a = run_epoch(&mut comm_a, local_forward);
    let queues_b = run_epoch(&mut comm_b, local_reversed);

    assert_eq!(queues_a, queues_b);
}

#[test]
fn test_event_time_is_bit_exact() {
    let recipe = TableRecipe::new(4).connect(0, (1, 0), 0.2);
    let mut comm = domain0(&recipe, Vec::new());

    let queues = run_epoch(&mut comm, vec![spike(1, 0, 0.1)]);

    assert_eq!(queues[0].len(), 1);
    // Exactly spike.time + delay, down to the last bit.
    assert_eq!(queues[0][0].time.to_bits(), (0.1f64 + 0.2).to_bits());
}

#[test]
fn test_construction_rejects_invalid_recipe() {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(2)
        .build()
        .unwrap();
    let ctx = ExecutionContext::new(
        TwoDomainContext::new(0, f64::INFINITY, Vec::new()),
        Arc::new(pool),
    );

    let recipe = TableRecipe::new(4).connect(0, (2, 0), -1.0);
    let err = Communicator::new(&recipe, &two_domain_decomposition(), &ctx).unwrap_err();
    assert!(matches!(err, CommError::InvalidDelay { .. }));

    let recipe = TableRecipe::new(4).connect(0, (7, 0), 1.0);
    let err = Communicator::new(&recipe, &two_domain_decomposition(), &ctx).unwrap_err();
    assert!(matches!(err, CommError::SourceGidOutOfRange { .. }));
}
