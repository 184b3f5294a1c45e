//! Driven ports (Outbound dependencies)
//!
//! The reorg core never owns chain data. It reads tipsets through
//! `TipSetProvider`; the service additionally needs the head pointer and
//! tipset insertion from `ChainStore`.

use crate::domain::{ChainResult, StateRoot, TipSet, TipSetAndState, TipSetKey};

/// Read-only tipset lookup.
///
/// Implementations must be safe for concurrent reads; the ancestor search
/// holds only shared references to the provider.
pub trait TipSetProvider: Send + Sync {
    /// Resolve a tipset by key.
    ///
    /// Returns `ChainError::TipSetNotFound` when the key is not indexed.
    fn get_tipset(&self, key: &TipSetKey) -> ChainResult<TipSet>;
}

/// Chain index with a head pointer.
pub trait ChainStore: TipSetProvider {
    /// Index a tipset and the state root it produces.
    fn put_tipset(&self, tsas: TipSetAndState) -> ChainResult<()>;

    /// State root produced by the tipset named by `key`.
    fn state_root(&self, key: &TipSetKey) -> ChainResult<StateRoot>;

    /// Current head, if one was ever set.
    fn head(&self) -> Option<TipSet>;

    /// Move the head pointer. The tipset must already be indexed.
    ///
    /// When a `ReorgService` owns the store, it is the only head writer.
    fn set_head(&self, tipset: &TipSet) -> ChainResult<()>;
}
