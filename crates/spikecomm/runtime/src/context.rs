// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Execution resources handed to the communicator

use std::sync::Arc;

use crate::std_impl::LocalContext;
use crate::traits::DistributedContext;

/// The pair of handles the communicator stores at construction: the
/// inter-domain collective surface and the intra-domain worker pool.
#[derive(Clone)]
pub struct ExecutionContext {
    pub distributed: Arc<dyn DistributedContext>,
    pub thread_pool: Arc<rayon::ThreadPool>,
}

impl ExecutionContext {
    pub fn new(
        distributed: Arc<dyn DistributedContext>,
        thread_pool: Arc<rayon::ThreadPool>,
    ) -> Self {
        Self {
            distributed,
            thread_pool,
        }
    }

    /// Single-process context: the local collective plus a default-sized
    /// worker pool.
    pub fn local() -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .build()
            .expect("failed to build worker pool");
        Self {
            distributed: Arc::new(LocalContext),
            thread_pool: Arc::new(pool),
        }
    }
}
