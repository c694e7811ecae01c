#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Logical clocks for causal ordering without wall-clock time.
//!
//! Three independent clocks are provided:
//!
//! * [`LamportTimestamp`], a scalar, totally ordered clock;
//! * [`AsyncVectorClock`], a classic vector clock for fire-and-forget messages;
//! * [`SyncVectorClock`], a vector clock for rendezvous communication with a
//!   small idle/communicating state machine.
//!
//! Clocks are plain values. The caller owns the transport and calls
//! `apply_local_event`, `apply_send_event` and `apply_receive_event` at the
//! matching points of its own protocol. Sharing a clock between threads needs
//! external synchronization.

// Shared enums and validated node identifiers.
pub mod types;

// Clock error type.
pub mod error;

// Lamport timestamps and vector clocks.
pub mod time;

// Wire shape of vector clocks.
pub mod snapshot;

#[cfg(feature = "test-utils")]
pub mod testing;

pub use error::ClockError;
pub use snapshot::VectorClockSnapshot;
pub use time::{
    create_async_clock, create_sync_clock, rendezvous, AsyncVectorClock, CausalClock, LamportTimestamp,
    LogicalTimestamp, SyncVectorClock, VectorClockCore,
};
pub use types::{ClockOrder, NodeId, SyncClockState};
