//! Chain fixtures for tests.
//!
//! `ChainBuilder` owns an `InMemoryChainStore` seeded with a genesis tipset
//! and grows chains, forks and null rounds on top of it. Every block gets a
//! fresh nonce, so two calls growing from the same parent always fork.

use crate::adapters::InMemoryChainStore;
use crate::domain::{Block, Cid, TipSet, TipSetAndState, TipSetKey};
use crate::ports::ChainStore;

pub struct ChainBuilder {
    store: InMemoryChainStore,
    genesis: TipSet,
    nonce: u64,
}

impl ChainBuilder {
    /// New store holding only genesis, with genesis as head.
    pub fn new() -> Self {
        let mut builder = Self {
            store: InMemoryChainStore::new(),
            genesis: TipSet::undefined(),
            nonce: 0,
        };
        let genesis = builder.new_root();
        builder.store.set_head(&genesis).expect("genesis is indexed");
        builder.genesis = genesis;
        builder
    }

    pub fn genesis(&self) -> TipSet {
        self.genesis.clone()
    }

    pub fn store(&self) -> &InMemoryChainStore {
        &self.store
    }

    pub fn into_store(self) -> InMemoryChainStore {
        self.store
    }

    /// Another height-0 tipset, sharing no history with genesis.
    pub fn new_root(&mut self) -> TipSet {
        let block = self.make_block(TipSetKey::new(), 0);
        self.insert(vec![block])
    }

    /// Append `count` single-block tipsets on top of `parent`, one per height.
    /// Returns the last one (or `parent` when `count` is 0).
    pub fn grow(&mut self, parent: &TipSet, count: u64) -> TipSet {
        let mut head = parent.clone();
        for _ in 0..count {
            head = self.child(&head, 0);
        }
        head
    }

    /// A single tipset on top of `parent`, after `null_rounds` empty heights.
    pub fn grow_after_null_rounds(&mut self, parent: &TipSet, null_rounds: u64) -> TipSet {
        self.child(parent, null_rounds)
    }

    /// A tipset of `width` blocks directly on top of `parent`.
    pub fn grow_wide(&mut self, parent: &TipSet, width: usize) -> TipSet {
        let height = parent.height().expect("parent has a height") + 1;
        let blocks = (0..width)
            .map(|_| self.make_block(parent.key().clone(), height))
            .collect();
        self.insert(blocks)
    }

    /// `tipset` plus one extra sibling block at the same height and parents.
    pub fn superset(&mut self, tipset: &TipSet) -> TipSet {
        let height = tipset.height().expect("tipset has a height");
        let parents = tipset.parents().expect("tipset has parents").clone();
        let mut blocks = tipset.blocks().to_vec();
        blocks.push(self.make_block(parents, height));
        self.insert(blocks)
    }

    /// A tipset at `height` whose parent was never indexed.
    pub fn detached(&mut self, height: u64) -> TipSet {
        let missing: TipSetKey = [Cid::new([0xEE; 32])].into_iter().collect();
        let block = self.make_block(missing, height);
        self.insert(vec![block])
    }

    /// Move the store's head.
    pub fn set_head(&self, tipset: &TipSet) {
        self.store.set_head(tipset).expect("tipset is indexed");
    }

    fn child(&mut self, parent: &TipSet, null_rounds: u64) -> TipSet {
        let height = parent.height().expect("parent has a height") + null_rounds + 1;
        let block = self.make_block(parent.key().clone(), height);
        self.insert(vec![block])
    }

    fn make_block(&mut self, parents: TipSetKey, height: u64) -> Block {
        self.nonce += 1;
        Block {
            parents,
            height,
            miner: [0xAA; 20],
            nonce: self.nonce,
            state_root: [height as u8; 32],
            timestamp: 1000 + height * 30,
        }
    }

    fn insert(&mut self, blocks: Vec<Block>) -> TipSet {
        let state_root = blocks[0].state_root;
        let tipset = TipSet::new(blocks).expect("fixture blocks form a tipset");
        self.store
            .put_tipset(TipSetAndState {
                tipset: tipset.clone(),
                state_root,
            })
            .expect("fixture tipset is defined");
        tipset
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
