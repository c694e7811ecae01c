//!
//! Defines the error type shared by every clock in the crate.

/// Represents errors raised when a clock operation violates its contract.
///
/// Validation always happens before mutation, so a clock that returned one of
/// these errors is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// A counter was constructed from a negative integer.
    #[error("The value of a {kind} must be >= 0, got {value}")]
    InvalidValue { kind: &'static str, value: i64 },
    /// A counter is already at `u64::MAX` and cannot advance.
    #[error("The {kind} counter cannot advance past {max}", max = u64::MAX)]
    CounterOverflow { kind: &'static str },
    /// The node name looks like a number.
    #[error("Numeric value as node name is not supported: {0:?}")]
    NumericNodeName(String),
    /// The node name is empty.
    #[error("A node name must be a non-empty string")]
    InvalidNodeName,
    /// A serialized timestamp map carried something that is not a timestamp.
    #[error("The initial state requires a non-negative integer timestamp for node {node:?}")]
    InvalidVectorClockState { node: String },
    /// The referenced node is not tracked by this clock.
    #[error("{0} is not in the vector")]
    UnknownNode(String),
    /// `apply_receive_event` was handed the receiving instance itself.
    #[error("The receiver and the received clocks are the same object instance")]
    CannotReceiveSelf,
    /// A strict predicate was asked about two clocks that cannot be compared.
    #[error("These clocks are not comparable")]
    Incomparable,
    /// A synchronous clock is waiting for the answer of `peer`.
    #[error("The clock is in communication with {peer}")]
    NotIdle { peer: String },
    /// A synchronous clock received from someone other than its pending peer.
    #[error("Expected a receive event from {expected}, got one from {got}")]
    UnexpectedReceiveEvent { expected: String, got: String },
    /// A snapshot could not be parsed.
    #[error("Snapshot decoding failed: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ClockError {
    fn from(err: serde_json::Error) -> Self {
        ClockError::Decode(err.to_string())
    }
}
