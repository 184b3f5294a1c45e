//! # Domain Errors
//!
//! Two layers of failure:
//!
//! - `ChainError`: the chain index could not answer (missing tipset, malformed
//!   tipset, backend failure). Surfaced verbatim, never retried here.
//! - `ReorgError`: the search or head switch itself failed. Exhaustion is its
//!   own variant so callers can tell "no shared ancestor within the indexed
//!   history" apart from "the store broke".

use super::{Cid, TipSetKey};

/// Chain index / data integrity errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("Tipset not found: {0}")]
    TipSetNotFound(TipSetKey),

    #[error("Empty tipset has no height")]
    EmptyTipSet,

    #[error("Duplicate block in tipset: {0:?}")]
    DuplicateBlock(Cid),

    #[error("Mismatched heights in tipset: expected {expected}, got {actual}")]
    MismatchedHeight { expected: u64, actual: u64 },

    #[error("Mismatched parents in tipset: expected {expected}, got {actual}")]
    MismatchedParents {
        expected: TipSetKey,
        actual: TipSetKey,
    },

    #[error("Ancestor at height {ancestor} is above head at height {head}")]
    InvalidAncestor { ancestor: u64, head: u64 },

    #[error("Chain store error: {0}")]
    Backend(String),
}

/// Reorg detection errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorgError {
    /// A cursor reached its indexing boundary before the two paths converged.
    #[error("Unexpected complete iterator: no common ancestor within indexed history")]
    IteratorExhausted,

    #[error("Reorg too deep: {dropped} tipsets dropped, limit is {limit}")]
    ReorgTooDeep { dropped: u64, limit: u64 },

    #[error("Chain store has no head")]
    NoHead,

    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl ReorgError {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, ReorgError::IteratorExhausted)
    }
}

/// Result type for chain index operations
pub type ChainResult<T> = Result<T, ChainError>;

/// Result type for reorg operations
pub type ReorgResult<T> = Result<T, ReorgError>;
