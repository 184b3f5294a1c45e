//! # Common Ancestor Search
//!
//! Walks two backward cursors down the chain until they point at the same
//! tipset.
//!
//! ## Algorithm
//!
//! Each round compares the two current tipsets:
//!
//! 1. Equal → that tipset is the common ancestor.
//! 2. Different heights → move the higher cursor to the lower cursor's
//!    height, or to the first tipset below it if that height is a null round
//!    on the higher cursor's chain.
//! 3. Same height, different tipsets → a fork at this height; move both
//!    cursors below it.
//!
//! The larger of the two heights strictly decreases every round, so the loop
//! ends either on a match or when a cursor hits its boundary.

use super::{ReorgError, ReorgResult, TipSet, TipSetIterator};
use crate::ports::TipSetProvider;

/// Find the highest tipset present on both backward paths.
///
/// Fails with `ReorgError::IteratorExhausted` if either cursor reaches its
/// boundary before the paths meet. Store errors are returned as they are.
pub fn find_common_ancestor<P: TipSetProvider + ?Sized>(
    old_iter: &mut TipSetIterator<'_, P>,
    new_iter: &mut TipSetIterator<'_, P>,
) -> ReorgResult<TipSet> {
    loop {
        let old = old_iter.value().ok_or(ReorgError::IteratorExhausted)?;
        let new = new_iter.value().ok_or(ReorgError::IteratorExhausted)?;

        let old_height = old.height()?;
        let new_height = new.height()?;

        if old == new {
            tracing::debug!(height = old_height, tipset = %old.key(), "Found common ancestor");
            return Ok(old.clone());
        }

        tracing::trace!(old_height, new_height, "Ancestor search step");

        if old_height < new_height {
            skip_to_height_or_lower(new_iter, old_height)?;
        } else if new_height < old_height {
            skip_to_height_or_lower(old_iter, new_height)?;
        } else {
            // Fork at this height. Genesis mismatch means nothing below to share.
            let below = old_height
                .checked_sub(1)
                .ok_or(ReorgError::IteratorExhausted)?;
            skip_to_height_or_lower(old_iter, below)?;
            skip_to_height_or_lower(new_iter, below)?;
        }
    }
}

/// Move `iter` back until it points at the first tipset with height at most
/// `end_height`.
///
/// Null rounds are skipped, never overshot: the cursor stops on the highest
/// tipset not above `end_height`. Fails with `IteratorExhausted` if the
/// cursor completes first.
pub fn skip_to_height_or_lower<P: TipSetProvider + ?Sized>(
    iter: &mut TipSetIterator<'_, P>,
    end_height: u64,
) -> ReorgResult<()> {
    loop {
        if iter.complete() {
            return Err(ReorgError::IteratorExhausted);
        }
        if iter.height()? <= end_height {
            return Ok(());
        }
        iter.advance()?;
    }
}
