//! Domain layer for the chain reorg subsystem
//!
//! - cid / block / tipset: chain entities
//! - iterator: backward chain cursor
//! - ancestor: common ancestor search
//! - reorg: reorg classification and sizing

mod ancestor;
mod block;
mod cid;
mod config;
mod errors;
mod iterator;
mod reorg;
mod tipset;

pub use ancestor::*;
pub use block::*;
pub use cid::*;
pub use config::*;
pub use errors::*;
pub use iterator::*;
pub use reorg::*;
pub use tipset::*;
