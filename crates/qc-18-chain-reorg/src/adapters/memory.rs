use crate::domain::{ChainError, ChainResult, StateRoot, TipSet, TipSetAndState, TipSetKey};
use crate::ports::{ChainStore, TipSetProvider};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory chain index.
///
/// Readers never block each other, so several ancestor searches can run
/// against one store concurrently.
#[derive(Default)]
pub struct InMemoryChainStore {
    tipsets: RwLock<HashMap<TipSetKey, TipSetAndState>>,
    head: RwLock<Option<TipSet>>,
}

impl InMemoryChainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed tipsets.
    pub fn len(&self) -> usize {
        self.tipsets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tipsets.read().is_empty()
    }

    pub fn contains(&self, key: &TipSetKey) -> bool {
        self.tipsets.read().contains_key(key)
    }
}

impl TipSetProvider for InMemoryChainStore {
    fn get_tipset(&self, key: &TipSetKey) -> ChainResult<TipSet> {
        self.tipsets
            .read()
            .get(key)
            .map(|tsas| tsas.tipset.clone())
            .ok_or_else(|| ChainError::TipSetNotFound(key.clone()))
    }
}

impl ChainStore for InMemoryChainStore {
    fn put_tipset(&self, tsas: TipSetAndState) -> ChainResult<()> {
        if !tsas.tipset.is_defined() {
            return Err(ChainError::EmptyTipSet);
        }
        let key = tsas.tipset.key().clone();
        self.tipsets.write().insert(key, tsas);
        Ok(())
    }

    fn state_root(&self, key: &TipSetKey) -> ChainResult<StateRoot> {
        self.tipsets
            .read()
            .get(key)
            .map(|tsas| tsas.state_root)
            .ok_or_else(|| ChainError::TipSetNotFound(key.clone()))
    }

    fn head(&self) -> Option<TipSet> {
        self.head.read().clone()
    }

    fn set_head(&self, tipset: &TipSet) -> ChainResult<()> {
        if !self.contains(tipset.key()) {
            return Err(ChainError::TipSetNotFound(tipset.key().clone()));
        }
        *self.head.write() = Some(tipset.clone());
        Ok(())
    }
}
