//! Scalar Lamport clock.
//!
//! Lamport timestamps are totally ordered: two values are either identical or
//! one happened before the other. Local and send events both advance the
//! clock by one; a receive jumps past the received value.

use crate::error::ClockError;
use crate::types::ClockOrder;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LamportTimestamp {
    value: u64,
}

impl LamportTimestamp {
    pub const fn new(value: u64) -> Self {
        LamportTimestamp { value }
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    pub fn compare(&self, other: &LamportTimestamp) -> ClockOrder {
        if self.value == other.value {
            ClockOrder::Identical
        } else if self.value < other.value {
            ClockOrder::HappenBefore
        } else {
            ClockOrder::HappenAfter
        }
    }

    pub fn is_identical_to(&self, other: &LamportTimestamp) -> bool {
        self.compare(other) == ClockOrder::Identical
    }

    pub fn happen_before(&self, other: &LamportTimestamp) -> bool {
        self.compare(other) == ClockOrder::HappenBefore
    }

    pub fn happen_after(&self, other: &LamportTimestamp) -> bool {
        self.compare(other) == ClockOrder::HappenAfter
    }

    pub fn apply_local_event(&mut self) -> Result<&mut Self, ClockError> {
        self.value = next_value(self.value)?;
        tracing::trace!(value = self.value, "lamport local event");
        Ok(self)
    }

    pub fn apply_send_event(&mut self) -> Result<&mut Self, ClockError> {
        self.value = next_value(self.value)?;
        tracing::trace!(value = self.value, "lamport send event");
        Ok(self)
    }

    /// Merges a received timestamp: `value = max(value, other) + 1`.
    ///
    /// `other` must be a distinct instance; a copy carrying the same value is fine.
    pub fn apply_receive_event(&mut self, other: &LamportTimestamp) -> Result<&mut Self, ClockError> {
        if std::ptr::eq(&*self, other) {
            return Err(ClockError::CannotReceiveSelf);
        }

        self.value = next_value(self.value.max(other.value))?;
        tracing::trace!(value = self.value, received = other.value, "lamport receive event");
        Ok(self)
    }
}

fn next_value(value: u64) -> Result<u64, ClockError> {
    value
        .checked_add(1)
        .ok_or(ClockError::CounterOverflow { kind: "LamportTimestamp" })
}

impl From<u64> for LamportTimestamp {
    fn from(value: u64) -> Self {
        LamportTimestamp::new(value)
    }
}

impl TryFrom<i64> for LamportTimestamp {
    type Error = ClockError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(LamportTimestamp::new)
            .map_err(|_| ClockError::InvalidValue { kind: "LamportTimestamp", value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_starts_at_zero() {
        assert_eq!(LamportTimestamp::default().value(), 0);
    }

    #[test]
    fn test_negative_value_rejected() {
        assert_eq!(
            LamportTimestamp::try_from(-1i64),
            Err(ClockError::InvalidValue { kind: "LamportTimestamp", value: -1 })
        );
        assert_eq!(LamportTimestamp::try_from(12i64).map(|lt| lt.value()), Ok(12));
    }

    #[test]
    fn test_compare() {
        let cases = [
            (0, 0, ClockOrder::Identical),
            (5, 5, ClockOrder::Identical),
            (0, 1, ClockOrder::HappenBefore),
            (3, 10, ClockOrder::HappenBefore),
            (1, 0, ClockOrder::HappenAfter),
            (10, 3, ClockOrder::HappenAfter),
        ];
        for (a, b, expected) in cases {
            let lt1 = LamportTimestamp::new(a);
            let lt2 = LamportTimestamp::new(b);
            assert_eq!(lt1.compare(&lt2), expected, "{a} vs {b}");
            assert_eq!(lt2.compare(&lt1), expected.reverse(), "{b} vs {a}");
        }
    }

    #[test]
    fn test_predicates_follow_compare() {
        let early = LamportTimestamp::new(2);
        let late = LamportTimestamp::new(7);
        assert!(early.happen_before(&late));
        assert!(!early.happen_after(&late));
        assert!(!early.is_identical_to(&late));
        assert!(late.happen_after(&early));
        assert!(early.is_identical_to(&early.clone()));
    }

    #[test]
    fn test_local_and_send_events_increment() {
        let mut lt = LamportTimestamp::new(4);
        lt.apply_local_event().unwrap();
        assert_eq!(lt.value(), 5);
        lt.apply_send_event().unwrap().apply_send_event().unwrap();
        assert_eq!(lt.value(), 7);
    }

    #[test]
    fn test_receive_event() {
        let cases = [(0, 0, 1), (0, 5, 6), (5, 0, 6), (9, 9, 10), (76, 78, 79), (62, 56, 63)];
        for (local, received, expected) in cases {
            let mut lt = LamportTimestamp::new(local);
            let other = LamportTimestamp::new(received);
            lt.apply_receive_event(&other).unwrap();
            assert_eq!(lt.value(), expected, "{local} <- {received}");
            assert_eq!(other.value(), received);
        }
    }

    #[test]
    fn test_receive_from_equal_copy_is_allowed() {
        let mut lt = LamportTimestamp::new(3);
        let copy = lt.clone();
        assert!(lt.apply_receive_event(&copy).is_ok());
        assert_eq!(lt.value(), 4);
    }
}
