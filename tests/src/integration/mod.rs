//! Cross-crate integration flows.

pub mod reorg_flows;
