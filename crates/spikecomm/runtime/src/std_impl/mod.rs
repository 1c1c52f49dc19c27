// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Standard (single-process) implementations of the runtime traits

pub mod local;

pub use local::LocalContext;
