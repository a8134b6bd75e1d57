// Path: crates/jam-reports/src/pvm.rs

//! The external `Ψ_A` execution interface: the pure, side-effect-free
//! function that turns a `WorkItem` plus the current `GlobalState` into a
//! `StateDelta`. The real PVM semantics are an off-chain collaborator this
//! crate never implements; it only defines the seam the accumulation
//! processor calls through.

use jam_types::error::PvmExecutionError;
use jam_types::{GlobalState, StateDelta, WorkItem};

/// A `Ψ_A` execution engine.
///
/// Implementations are expected to be pure with respect to `state`: the same
/// `(item, state)` pair always produces the same `StateDelta` or the same
/// error, since the accumulation processor relies on this to make execution
/// order (within the bound set by dependency resolution) an implementation
/// detail rather than an observable one.
pub trait PvmExecutor {
    /// Executes `item` against `state`, producing the delta to apply on
    /// success or a typed execution failure.
    fn execute(&self, item: &WorkItem, state: &GlobalState) -> Result<StateDelta, PvmExecutionError>;
}

/// A deterministic stand-in `Ψ_A` used by tests and by callers who have not
/// wired in a real execution engine: it accepts every item whose gas limit
/// fits the item's own declared ceiling and appends a log line recording the
/// execution, producing no account or data changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPvmExecutor;

impl PvmExecutor for NoopPvmExecutor {
    fn execute(&self, item: &WorkItem, _state: &GlobalState) -> Result<StateDelta, PvmExecutionError> {
        Ok(StateDelta {
            accounts: None,
            data: None,
            log: Some(format!("executed:{}", item.id)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_executor_always_succeeds() {
        let executor = NoopPvmExecutor;
        let item = WorkItem::new("w1", "deadbeef", "payload", 10).expect("valid item");
        let delta = executor
            .execute(&item, &GlobalState::default())
            .expect("execution");
        assert_eq!(delta.log.as_deref(), Some("executed:w1"));
    }
}
