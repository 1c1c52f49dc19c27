// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity types for cells and their spike-producing sites

use core::fmt;

use serde::{Deserialize, Serialize};

/// Global cell id (unique across the entire simulated network)
pub type CellGid = u32;

/// Cell-local index of an item within one cell
pub type CellLid = u32;

/// A specific site within a cell, identified by the owning cell's gid and the
/// cell-local index of the item.
///
/// Ordering is lexicographic on `(gid, index)`; the connection table and the
/// exchange both sort on it, which is what makes the per-epoch merge-join
/// correct.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CellMember {
    /// Global identifier of the cell
    pub gid: CellGid,
    /// Cell-local index of the item
    pub index: CellLid,
}

impl CellMember {
    pub fn new(gid: CellGid, index: CellLid) -> Self {
        Self { gid, index }
    }
}

impl fmt::Display for CellMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({}:{})", self.gid, self.index)
    }
}
