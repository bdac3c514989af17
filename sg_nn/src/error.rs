use thiserror::Error;

/// Errors raised by the network layers and losses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NnError {
    #[error("{operation}: expected {expected} inputs, got {actual}")]
    ArityMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
}
