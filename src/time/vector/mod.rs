//! Vector clocks.
//!
//! Both variants share `VectorClockCore` for node bookkeeping and differ in how
//! they apply events and in their happened-before rule:
//!
//! * `AsyncVectorClock` tracks fire-and-forget messages (Fidge/Mattern).
//! * `SyncVectorClock` models rendezvous communication, where a send must be
//!   answered by the peer before the sender may do anything else.

pub mod async_clock;
pub mod core;
pub mod sync_clock;


pub use async_clock::AsyncVectorClock;
pub use self::core::VectorClockCore;
pub use sync_clock::{rendezvous, SyncVectorClock};

use crate::error::ClockError;
use crate::types::ClockOrder;

/// Partial-order queries shared by vector clocks.
///
/// The strict predicates fail with `ClockError::Incomparable` when the two
/// clocks track different node sets (or are an invalid same-process pair).
pub trait CausalClock {
    fn compare(&self, other: &Self) -> ClockOrder;

    fn can_be_compared_with(&self, other: &Self) -> bool;

    fn is_identical_to(&self, other: &Self) -> Result<bool, ClockError> {
        strict(self.compare(other), ClockOrder::Identical)
    }

    fn happen_before(&self, other: &Self) -> Result<bool, ClockError> {
        strict(self.compare(other), ClockOrder::HappenBefore)
    }

    fn happen_after(&self, other: &Self) -> Result<bool, ClockError> {
        strict(self.compare(other), ClockOrder::HappenAfter)
    }

    fn is_concurrent_with(&self, other: &Self) -> Result<bool, ClockError> {
        strict(self.compare(other), ClockOrder::Concurrent)
    }
}

fn strict(order: ClockOrder, expected: ClockOrder) -> Result<bool, ClockError> {
    if order == ClockOrder::NotComparable {
        return Err(ClockError::Incomparable);
    }
    Ok(order == expected)
}
