//! Immutable per-node counter stored inside vector clocks.

use crate::error::ClockError;

/// A non-negative logical counter. Never mutated in place: `increment`
/// returns a fresh value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LogicalTimestamp(u64);

impl LogicalTimestamp {
    pub const fn new(counter: u64) -> Self {
        LogicalTimestamp(counter)
    }

    /// The zero timestamp every tracked node starts from.
    pub const fn init() -> Self {
        LogicalTimestamp(0)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The next counter value, or `CounterOverflow` at `u64::MAX`.
    pub fn increment(&self) -> Result<Self, ClockError> {
        self.0
            .checked_add(1)
            .map(LogicalTimestamp)
            .ok_or(ClockError::CounterOverflow { kind: "LogicalTimestamp" })
    }

    pub fn is_equal_to(&self, other: &LogicalTimestamp) -> bool {
        self.0 == other.0
    }
}

impl From<u64> for LogicalTimestamp {
    fn from(counter: u64) -> Self {
        LogicalTimestamp(counter)
    }
}

impl TryFrom<i64> for LogicalTimestamp {
    type Error = ClockError;

    fn try_from(counter: i64) -> Result<Self, Self::Error> {
        u64::try_from(counter)
            .map(LogicalTimestamp)
            .map_err(|_| ClockError::InvalidValue { kind: "LogicalTimestamp", value: counter })
    }
}
