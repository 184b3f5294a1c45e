//! # Reorg Service
//!
//! Application service wrapping the reorg core for the syncer.
//!
//! ## Flow
//!
//! 1. Read the current head from the chain store
//! 2. Position one cursor at the old head and one at the candidate, both
//!    bounded by the configured lookback floor
//! 3. Find the common ancestor, classify and size the switch
//! 4. (`switch_head` only) enforce the reorg depth limit and move the head


use crate::domain::{
    find_common_ancestor, is_reorg, reorg_diff, HeadEvaluation, ReorgConfig, ReorgError,
    ReorgResult, TipSet, TipSetIterator,
};
use crate::metrics;
use crate::ports::{ChainStore, ReorgApi};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The Reorg Service.
pub struct ReorgService<S: ChainStore> {
    store: Arc<S>,
    config: ReorgConfig,
    /// Serializes head switches so evaluate-then-set is not interleaved with
    /// another `switch_head`.
    switch_lock: Mutex<()>,
}

impl<S: ChainStore> ReorgService<S> {
    pub fn new(store: Arc<S>, config: ReorgConfig) -> Self {
        Self {
            store,
            config,
            switch_lock: Mutex::new(()),
        }
    }

    /// The backing store, for reads.
    ///
    /// Head moves must go through `switch_head`: a `set_head` issued directly
    /// on the store is not covered by the switch lock and can land between a
    /// switch's evaluation and its write.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &ReorgConfig {
        &self.config
    }

    /// Compare two arbitrary heads. Does not read or move the store's head.
    pub fn evaluate_between(
        &self,
        old_head: &TipSet,
        new_head: &TipSet,
    ) -> ReorgResult<HeadEvaluation> {
        let floor = self
            .config
            .search_floor(old_head.height()?, new_head.height()?);
        let store = self.store.as_ref();
        let mut old_iter = TipSetIterator::new(store, old_head.clone()).with_floor(floor);
        let mut new_iter = TipSetIterator::new(store, new_head.clone()).with_floor(floor);

        let common_ancestor = match find_common_ancestor(&mut old_iter, &mut new_iter) {
            Ok(ts) => ts,
            Err(ReorgError::IteratorExhausted) => {
                warn!(
                    old_head = %old_head.key(),
                    new_head = %new_head.key(),
                    floor,
                    "No common ancestor within searchable history"
                );
                metrics::record_search_exhausted();
                return Err(ReorgError::IteratorExhausted);
            }
            Err(e) => return Err(e),
        };

        let diff = reorg_diff(old_head, new_head, &common_ancestor)?;
        let is_reorg = is_reorg(old_head, new_head, &common_ancestor);

        debug!(
            is_reorg,
            dropped = diff.dropped,
            added = diff.added,
            common = %common_ancestor.key(),
            "Evaluated candidate head"
        );

        Ok(HeadEvaluation {
            old_head: old_head.clone(),
            new_head: new_head.clone(),
            common_ancestor,
            is_reorg,
            diff,
        })
    }

    fn current_head(&self) -> ReorgResult<TipSet> {
        self.store.head().ok_or(ReorgError::NoHead)
    }

    fn record_switch(&self, evaluation: &HeadEvaluation, height: u64) {
        if evaluation.is_reorg {
            if evaluation.diff.dropped >= self.config.warn_depth {
                warn!(
                    dropped = evaluation.diff.dropped,
                    added = evaluation.diff.added,
                    height,
                    "Deep chain reorganization"
                );
            } else {
                info!(
                    dropped = evaluation.diff.dropped,
                    added = evaluation.diff.added,
                    height,
                    "Chain reorganization"
                );
            }
            metrics::record_reorg(evaluation.diff.dropped);
        } else {
            info!(added = evaluation.diff.added, height, "Extended chain head");
            metrics::record_head_extension();
        }
    }
}

impl<S: ChainStore> ReorgApi for ReorgService<S> {
    fn evaluate(&self, new_head: &TipSet) -> ReorgResult<HeadEvaluation> {
        let old_head = self.current_head()?;
        self.evaluate_between(&old_head, new_head)
    }

    fn switch_head(&self, new_head: &TipSet) -> ReorgResult<HeadEvaluation> {
        let _guard = self.switch_lock.lock();
        let evaluation = self.evaluate(new_head)?;
        let height = evaluation.new_head.height()?;

        if evaluation.is_reorg && evaluation.diff.dropped > self.config.max_reorg_depth {
            warn!(
                dropped = evaluation.diff.dropped,
                limit = self.config.max_reorg_depth,
                "Refusing reorg beyond depth limit"
            );
            return Err(ReorgError::ReorgTooDeep {
                dropped: evaluation.diff.dropped,
                limit: self.config.max_reorg_depth,
            });
        }

        self.store.set_head(new_head)?;
        self.record_switch(&evaluation, height);
        Ok(evaluation)
    }
}
