//! Content identifiers and sorted cid sets.
//!
//! A tipset is identified by the set of its block cids. `SortedCidSet` keeps
//! that set ordered so equality and containment are deterministic and cheap.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Content identifier of a block (Keccak-256 of its header fields).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Cid([u8; 32]);

impl Cid {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Cid {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell blocks apart in logs
        write!(f, "Cid({}..)", hex::encode(&self.0[..4]))
    }
}

/// Ordered set of block cids.
///
/// Used both as a tipset's identity and as the parent link of a block
/// (`TipSetKey`). An empty set is the parent key of genesis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortedCidSet {
    cids: BTreeSet<Cid>,
}

impl SortedCidSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cid. Returns `false` if it was already present.
    pub fn add(&mut self, cid: Cid) -> bool {
        self.cids.insert(cid)
    }

    pub fn has(&self, cid: &Cid) -> bool {
        self.cids.contains(cid)
    }

    /// True if every cid in `other` is also in `self`.
    pub fn contains(&self, other: &SortedCidSet) -> bool {
        other.cids.is_subset(&self.cids)
    }

    pub fn len(&self) -> usize {
        self.cids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cid> {
        self.cids.iter()
    }
}

impl FromIterator<Cid> for SortedCidSet {
    fn from_iter<I: IntoIterator<Item = Cid>>(iter: I) -> Self {
        Self {
            cids: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for SortedCidSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, cid) in self.cids.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", &cid.to_string()[..8])?;
        }
        write!(f, "}}")
    }
}

/// Key naming a tipset by the cids of its blocks.
pub type TipSetKey = SortedCidSet;
