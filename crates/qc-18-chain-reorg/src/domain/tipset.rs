//! Tipset entity
//!
//! A tipset is the set of blocks at one height that share the same parent
//! tipset. It is the unit of chain progress: heads, ancestors and reorg
//! sizes are all measured in tipsets.

use super::{Block, ChainError, ChainResult, SortedCidSet, StateRoot, TipSetKey};
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct TipSetInner {
    /// Blocks ordered by cid, matching `key` iteration order.
    blocks: Vec<Block>,
    key: TipSetKey,
}

/// An immutable set of blocks sharing a parent and height.
///
/// Cloning is cheap: the block data is shared. Equality is identity
/// equality, i.e. equality of the cid sets.
#[derive(Clone)]
pub struct TipSet {
    inner: Arc<TipSetInner>,
}

impl TipSet {
    /// Build a tipset from blocks.
    ///
    /// Fails if `blocks` is empty, if two blocks have the same cid, or if the
    /// blocks disagree on height or parents.
    pub fn new(blocks: Vec<Block>) -> ChainResult<Self> {
        let first = blocks.first().ok_or(ChainError::EmptyTipSet)?;
        let height = first.height;
        let parents = first.parents.clone();

        let mut keyed = Vec::with_capacity(blocks.len());
        let mut key = SortedCidSet::new();
        for block in blocks {
            if block.height != height {
                return Err(ChainError::MismatchedHeight {
                    expected: height,
                    actual: block.height,
                });
            }
            if block.parents != parents {
                return Err(ChainError::MismatchedParents {
                    expected: parents,
                    actual: block.parents,
                });
            }
            let cid = block.cid();
            if !key.add(cid) {
                return Err(ChainError::DuplicateBlock(cid));
            }
            keyed.push((cid, block));
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self {
            inner: Arc::new(TipSetInner {
                blocks: keyed.into_iter().map(|(_, block)| block).collect(),
                key,
            }),
        })
    }

    /// The empty tipset. Its height and parents cannot be resolved.
    pub fn undefined() -> Self {
        Self {
            inner: Arc::new(TipSetInner {
                blocks: Vec::new(),
                key: TipSetKey::new(),
            }),
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.inner.blocks.is_empty()
    }

    /// Height shared by all blocks in the tipset.
    pub fn height(&self) -> ChainResult<u64> {
        self.inner
            .blocks
            .first()
            .map(|b| b.height)
            .ok_or(ChainError::EmptyTipSet)
    }

    /// Key of the parent tipset. Empty for genesis.
    pub fn parents(&self) -> ChainResult<&TipSetKey> {
        self.inner
            .blocks
            .first()
            .map(|b| &b.parents)
            .ok_or(ChainError::EmptyTipSet)
    }

    /// The cid set identifying this tipset.
    pub fn key(&self) -> &TipSetKey {
        &self.inner.key
    }

    pub fn blocks(&self) -> &[Block] {
        &self.inner.blocks
    }

    pub fn len(&self) -> usize {
        self.inner.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.blocks.is_empty()
    }

    /// True if every block of `other` is also in `self`.
    pub fn contains(&self, other: &TipSet) -> bool {
        self.key().contains(other.key())
    }

    /// Whether this tipset sits directly on top of `ancestor`.
    pub fn is_child_of(&self, ancestor: &TipSet) -> bool {
        matches!(self.parents(), Ok(parents) if parents == ancestor.key())
    }
}

impl PartialEq for TipSet {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.key == other.inner.key
    }
}

impl Eq for TipSet {}

impl std::hash::Hash for TipSet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&self.inner.key, state);
    }
}

impl fmt::Debug for TipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.height() {
            Ok(h) => write!(f, "TipSet(h={} {})", h, self.key()),
            Err(_) => write!(f, "TipSet(undefined)"),
        }
    }
}

impl Default for TipSet {
    fn default() -> Self {
        Self::undefined()
    }
}

/// A tipset together with the state root produced by applying it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TipSetAndState {
    pub tipset: TipSet,
    pub state_root: StateRoot,
}
