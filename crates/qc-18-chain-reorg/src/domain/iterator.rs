//! Backward chain cursor
//!
//! `TipSetIterator` walks from a starting tipset towards genesis, one parent
//! link per `advance()`. It completes when the current tipset has no parent
//! (genesis) or when the parent lies below the configured floor height.

use super::{ChainResult, ReorgError, ReorgResult, TipSet};
use crate::ports::TipSetProvider;

/// Backward-only cursor over the ancestors of a tipset.
pub struct TipSetIterator<'a, P: TipSetProvider + ?Sized> {
    provider: &'a P,
    current: Option<TipSet>,
    /// Lowest height the cursor may visit.
    floor: u64,
}

impl<'a, P: TipSetProvider + ?Sized> TipSetIterator<'a, P> {
    /// Create a cursor positioned at `start`.
    pub fn new(provider: &'a P, start: TipSet) -> Self {
        Self {
            provider,
            current: Some(start),
            floor: 0,
        }
    }

    /// Stop the walk at `floor`: advancing to a parent below this height
    /// completes the cursor instead.
    pub fn with_floor(mut self, floor: u64) -> Self {
        self.floor = floor;
        self
    }

    /// Current tipset, `None` once complete.
    pub fn value(&self) -> Option<&TipSet> {
        self.current.as_ref()
    }

    /// Height of the current tipset.
    pub fn height(&self) -> ReorgResult<u64> {
        match &self.current {
            Some(ts) => Ok(ts.height()?),
            None => Err(ReorgError::IteratorExhausted),
        }
    }

    pub fn complete(&self) -> bool {
        self.current.is_none()
    }

    /// Move to the parent tipset.
    ///
    /// Calling this on a complete cursor fails with `IteratorExhausted`.
    pub fn advance(&mut self) -> ReorgResult<()> {
        let current = self.current.as_ref().ok_or(ReorgError::IteratorExhausted)?;
        let parents = current.parents()?;
        if parents.is_empty() {
            self.current = None;
            return Ok(());
        }

        let parent = self.provider.get_tipset(parents)?;
        if parent.height()? < self.floor {
            tracing::trace!(floor = self.floor, "Cursor reached lookback floor");
            self.current = None;
        } else {
            self.current = Some(parent);
        }
        Ok(())
    }
}

/// Yields the tipsets from the cursor position back to its boundary.
///
/// Store errors end the iteration after being yielded once.
impl<P: TipSetProvider + ?Sized> Iterator for TipSetIterator<'_, P> {
    type Item = ChainResult<TipSet>;

    fn next(&mut self) -> Option<Self::Item> {
        let ts = self.current.clone()?;
        match self.advance() {
            Ok(()) => Some(Ok(ts)),
            Err(ReorgError::Chain(e)) => {
                self.current = None;
                Some(Err(e))
            }
            // advance() on a live cursor only fails with a chain error
            Err(_) => None,
        }
    }
}
