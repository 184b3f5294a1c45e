//! Reorg classification and sizing
//!
//! Both functions take the old head, the new head and the common ancestor
//! returned by [`find_common_ancestor`](super::find_common_ancestor) for that
//! same pair. Passing an unrelated ancestor is a caller bug and is not
//! detected by `is_reorg`.

use super::{ChainError, ReorgResult, TipSet};
use serde::{Deserialize, Serialize};

/// Size of a head switch, measured as height distances from the common
/// ancestor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorgDiff {
    /// Height distance from the common ancestor to the old head.
    pub dropped: u64,
    /// Height distance from the common ancestor to the new head.
    pub added: u64,
}

/// Outcome of comparing a candidate head against the current one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadEvaluation {
    pub old_head: TipSet,
    pub new_head: TipSet,
    pub common_ancestor: TipSet,
    pub is_reorg: bool,
    pub diff: ReorgDiff,
}

impl HeadEvaluation {
    /// True when the new head simply builds on the old one.
    pub fn is_extension(&self) -> bool {
        !self.is_reorg
    }
}

/// Whether switching from `old` to `new` abandons blocks of the old head.
///
/// Not a reorg when the new head contains every block of the old head (same
/// height, more blocks) or when the old head is itself the common ancestor
/// (plain extension).
pub fn is_reorg(old: &TipSet, new: &TipSet, common_ancestor: &TipSet) -> bool {
    !new.contains(old) && common_ancestor != old
}

/// Heights dropped from the old chain and added from the new chain.
pub fn reorg_diff(old: &TipSet, new: &TipSet, common_ancestor: &TipSet) -> ReorgResult<ReorgDiff> {
    let old_height = old.height()?;
    let new_height = new.height()?;
    let common_height = common_ancestor.height()?;

    Ok(ReorgDiff {
        dropped: distance(old_height, common_height)?,
        added: distance(new_height, common_height)?,
    })
}

fn distance(head: u64, ancestor: u64) -> Result<u64, ChainError> {
    head.checked_sub(ancestor)
        .ok_or(ChainError::InvalidAncestor { ancestor, head })
}
