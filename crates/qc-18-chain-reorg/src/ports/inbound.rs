//! Driving ports (Inbound API)

use crate::domain::{HeadEvaluation, ReorgResult, TipSet};

/// Primary reorg API, used by the syncer when it has a candidate head.
pub trait ReorgApi: Send + Sync {
    /// Compare `new_head` against the current head without changing anything.
    fn evaluate(&self, new_head: &TipSet) -> ReorgResult<HeadEvaluation>;

    /// Adopt `new_head` as the chain head.
    ///
    /// Refuses reorgs deeper than the configured limit; the head is left
    /// untouched on any error. Concurrent calls are serialized, so each
    /// evaluation is made against the head it replaces.
    fn switch_head(&self, new_head: &TipSet) -> ReorgResult<HeadEvaluation>;
}
