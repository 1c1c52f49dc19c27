// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for communicator construction and exchange
//!
//! Construction is all-or-nothing: the first invalid connection or
//! decomposition inconsistency aborts it. Transport failures propagate
//! unchanged; the epoch is undefined after one.

use thiserror::Error;

use super::ids::{CellGid, CellMember};
use super::spike::Time;

#[derive(Debug, Clone, Error)]
pub enum CommError {
    // `src` rather than `source`: thiserror reserves a field of that name
    // for the error-source chain.
    #[error("connection from {src} has non-positive delay {delay}")]
    InvalidDelay { src: CellMember, delay: Time },

    #[error("connection source gid {gid} outside [0, {num_cells})")]
    SourceGidOutOfRange { gid: CellGid, num_cells: CellGid },

    #[error("gid {gid} mapped to domain {domain}, but only {num_domains} domains exist")]
    InconsistentDecomposition {
        gid: CellGid,
        domain: usize,
        num_domains: usize,
    },

    #[error("distributed transport failure: {0}")]
    Transport(String),
}

/// Result type for communicator operations
pub type Result<T> = core::result::Result<T, CommError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = CommError::InvalidDelay {
            src: CellMember::new(7, 1),
            delay: -0.5,
        };
        assert_eq!(
            err.to_string(),
            "connection from Cell(7:1) has non-positive delay -0.5"
        );

        let err = CommError::SourceGidOutOfRange {
            gid: 12,
            num_cells: 10,
        };
        assert_eq!(err.to_string(), "connection source gid 12 outside [0, 10)");
    }
}
