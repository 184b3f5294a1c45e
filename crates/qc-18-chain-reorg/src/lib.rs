//! # qc-18-chain-reorg
//!
//! Chain reorganization detection for Quantum-Chain.
//!
//! ## Architecture
//!
//! Given the current head and a candidate head, this subsystem answers two
//! questions for the syncer: *is switching a reorg*, and *how big is it*.
//! It does not decide which fork wins; that is consensus weight.
//!
//! ```text
//!   old head ──TipSetIterator──┐
//!                              ├──→ find_common_ancestor ──→ common
//!   new head ──TipSetIterator──┘                               │
//!                                            ┌─────────────────┴──────────┐
//!                                            ↓                            ↓
//!                                  is_reorg(old, new, common)   reorg_diff(old, new, common)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Strict Height Order | A tipset's height exceeds every ancestor's height |
//! | 2 | Null Round Tolerance | Backward walks skip empty heights without overshooting |
//! | 3 | Distinct Exhaustion | "No common ancestor" is never reported as a store error |
//! | 4 | Read-Only Search | Ancestor search and classification never write |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Tipsets, backward cursor, ancestor search, reorg rules
//! - `ports/` - Inbound `ReorgApi`, outbound `TipSetProvider` / `ChainStore`
//! - `adapters/` - In-memory chain store
//! - `service/` - `ReorgService` tying the store, config and core together
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qc_18_chain_reorg::{InMemoryChainStore, ReorgApi, ReorgConfig, ReorgService};
//!
//! let service = ReorgService::new(store, ReorgConfig::from_env());
//!
//! let eval = service.switch_head(&candidate)?;
//! if eval.is_reorg {
//!     // roll back eval.diff.dropped tipsets, apply eval.diff.added
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main types
pub use adapters::InMemoryChainStore;
pub use domain::{
    find_common_ancestor, is_reorg, reorg_diff, skip_to_height_or_lower, Block, ChainError,
    ChainResult, Cid, HeadEvaluation, ReorgConfig, ReorgDiff, ReorgError, ReorgResult,
    SortedCidSet, TipSet, TipSetAndState, TipSetIterator, TipSetKey,
};
pub use ports::{ChainStore, ReorgApi, TipSetProvider};
pub use service::ReorgService;
