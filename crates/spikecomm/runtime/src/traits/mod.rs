// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Capability traits consumed by the communicator

pub mod distributed;
pub mod recipe;

pub use distributed::DistributedContext;
pub use recipe::Recipe;
