//! Core error type.
//!
//! `vs-sim` wraps `VsError` as one variant of its own `SimError` and lifts
//! the common cases into dedicated variants.

use thiserror::Error;

use crate::MemberId;

/// The top-level error type for `vs-core` and a common base for sub-crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{member} is outside the population of {group_size} members")]
    MemberOutOfRange {
        member:     MemberId,
        group_size: usize,
    },
}

/// Shorthand result type for all `vs-*` crates.
pub type VsResult<T> = Result<T, VsError>;
