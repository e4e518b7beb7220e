use std::collections::TryReserveError;

/// Failures surfaced by the stack-emulated registry. The scope-bound path cannot fail.
#[derive(thiserror::Error, Debug)]
pub enum DeferError {
    #[error("deferred call stack is full, limit {limit}")]
    CapacityExceeded { limit: usize },
    #[error("failed to grow deferred call stack to {requested} entries")]
    AllocationFailed {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("process exit stack lock poisoned")]
    Poisoned,
    #[error("failed to install process exit hook")]
    ExitHookUnavailable,
}
