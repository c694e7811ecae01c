//! Logical-time utilities (Lamport timestamps, vector clocks).
//!
//! `logical` holds the per-node counter, `lamport` the scalar clock and
//! `vector` the asynchronous and synchronous vector clocks.

pub mod lamport;
pub mod logical;
pub mod vector;

pub use lamport::LamportTimestamp;
pub use logical::LogicalTimestamp;
pub use vector::{rendezvous, AsyncVectorClock, CausalClock, SyncVectorClock, VectorClockCore};

use crate::error::ClockError;

/// Creates an asynchronous clock that only tracks `node`.
pub fn create_async_clock(node: &str) -> Result<AsyncVectorClock, ClockError> {
    AsyncVectorClock::new(node)
}

/// Creates an idle synchronous clock that only tracks `node`.
pub fn create_sync_clock(node: &str) -> Result<SyncVectorClock, ClockError> {
    SyncVectorClock::new(node)
}
