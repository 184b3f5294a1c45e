//! # Reorg Configuration
//!
//! Limits applied by the reorg service around the core search. The search
//! itself has no bound other than cursor completion, so these are how a node
//! keeps a head switch from walking arbitrarily deep history.

use std::env;

/// Default finality depth: reorgs dropping more tipsets than this are refused.
pub const DEFAULT_MAX_REORG_DEPTH: u64 = 900;

/// Default depth at which a reorg is logged as a warning.
pub const DEFAULT_WARN_DEPTH: u64 = 10;

/// Configuration for the reorg service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorgConfig {
    /// Maximum number of heights the ancestor search may walk below the lower
    /// of the two heads (default: unbounded).
    pub max_lookback: Option<u64>,

    /// Maximum tipsets a head switch may drop (default: 900).
    pub max_reorg_depth: u64,

    /// Reorgs dropping at least this many tipsets log at warn (default: 10).
    pub warn_depth: u64,
}

impl Default for ReorgConfig {
    fn default() -> Self {
        Self {
            max_lookback: None,
            max_reorg_depth: DEFAULT_MAX_REORG_DEPTH,
            warn_depth: DEFAULT_WARN_DEPTH,
        }
    }
}

impl ReorgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_REORG_MAX_LOOKBACK`: Search depth below the lower head (default: unbounded)
    /// - `QC_REORG_MAX_DEPTH`: Maximum tipsets dropped by a head switch (default: 900)
    /// - `QC_REORG_WARN_DEPTH`: Warn threshold (default: 10)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_lookback: parse_var("QC_REORG_MAX_LOOKBACK").or(defaults.max_lookback),
            max_reorg_depth: parse_var("QC_REORG_MAX_DEPTH").unwrap_or(defaults.max_reorg_depth),
            warn_depth: parse_var("QC_REORG_WARN_DEPTH").unwrap_or(defaults.warn_depth),
        }
    }

    /// Bound the ancestor search.
    pub fn with_max_lookback(mut self, depth: u64) -> Self {
        self.max_lookback = Some(depth);
        self
    }

    /// Set the maximum reorg depth.
    pub fn with_max_reorg_depth(mut self, depth: u64) -> Self {
        self.max_reorg_depth = depth;
        self
    }

    /// Set the warn threshold.
    pub fn with_warn_depth(mut self, depth: u64) -> Self {
        self.warn_depth = depth;
        self
    }

    /// Lowest height the search may visit when the heads are at `old_height`
    /// and `new_height`.
    pub fn search_floor(&self, old_height: u64, new_height: u64) -> u64 {
        match self.max_lookback {
            Some(depth) => old_height.min(new_height).saturating_sub(depth),
            None => 0,
        }
    }
}

fn parse_var(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
