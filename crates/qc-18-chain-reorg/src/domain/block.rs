//! Block header entity
//!
//! Only the fields needed to place a block in the chain and give it a stable
//! identity. Validation and signing live elsewhere.

use super::{Cid, TipSetKey};
use serde::{Deserialize, Serialize};

/// State root committed by a block (and by the tipset it belongs to).
pub type StateRoot = [u8; 32];

/// A block header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Key of the parent tipset. Empty for genesis.
    pub parents: TipSetKey,
    /// Chain height. Null rounds leave gaps between a block and its parents.
    pub height: u64,
    /// Miner that produced the block.
    pub miner: [u8; 20],
    /// Disambiguates sibling blocks from the same miner.
    pub nonce: u64,
    pub state_root: StateRoot,
    pub timestamp: u64,
}

impl Block {
    /// Compute the content id of this block
    pub fn cid(&self) -> Cid {
        use sha3::{Digest, Keccak256};
        let mut hasher = Keccak256::new();
        hasher.update((self.parents.len() as u64).to_le_bytes());
        for parent in self.parents.iter() {
            hasher.update(parent.as_bytes());
        }
        hasher.update(self.height.to_le_bytes());
        hasher.update(self.miner);
        hasher.update(self.nonce.to_le_bytes());
        hasher.update(self.state_root);
        hasher.update(self.timestamp.to_le_bytes());
        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        Cid::new(hash)
    }

    /// Check if this is a genesis block
    pub fn is_genesis(&self) -> bool {
        self.height == 0 && self.parents.is_empty()
    }
}
