//! # Reorg Metrics
//!
//! Prometheus metrics for head switches.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-chain-reorg = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `chain_reorgs_total` - Counter of head switches that were reorgs
//! - `chain_head_extensions_total` - Counter of head switches that extended the head
//! - `chain_ancestor_search_exhausted_total` - Counter of searches with no common ancestor
//! - `chain_reorg_depth` - Histogram of tipsets dropped per reorg

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_histogram, register_int_counter, Histogram, IntCounter};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Head switches that abandoned blocks of the old head
    pub static ref REORGS: IntCounter = register_int_counter!(
        "chain_reorgs_total",
        "Total number of chain reorganizations"
    )
    .expect("Failed to create REORGS metric");

    /// Head switches that built on the old head
    pub static ref HEAD_EXTENSIONS: IntCounter = register_int_counter!(
        "chain_head_extensions_total",
        "Total number of head switches that extended the current head"
    )
    .expect("Failed to create HEAD_EXTENSIONS metric");

    /// Ancestor searches that hit the indexing boundary
    pub static ref SEARCH_EXHAUSTED: IntCounter = register_int_counter!(
        "chain_ancestor_search_exhausted_total",
        "Total number of ancestor searches that found no common ancestor"
    )
    .expect("Failed to create SEARCH_EXHAUSTED metric");

    /// Tipsets dropped per reorg
    pub static ref REORG_DEPTH: Histogram = register_histogram!(
        "chain_reorg_depth",
        "Number of tipsets dropped by a reorg",
        vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 250.0, 500.0, 900.0]
    )
    .expect("Failed to create REORG_DEPTH metric");
}

/// Record a reorg dropping `depth` tipsets
#[cfg(feature = "metrics")]
pub fn record_reorg(depth: u64) {
    REORGS.inc();
    REORG_DEPTH.observe(depth as f64);
}

/// Record a head extension
#[cfg(feature = "metrics")]
pub fn record_head_extension() {
    HEAD_EXTENSIONS.inc();
}

/// Record an exhausted ancestor search
#[cfg(feature = "metrics")]
pub fn record_search_exhausted() {
    SEARCH_EXHAUSTED.inc();
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_reorg(_depth: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_head_extension() {}

#[cfg(not(feature = "metrics"))]
pub fn record_search_exhausted() {}
