//! Asynchronous vector clock.
//!
//! Messages are fire-and-forget: a send is just a local tick, and the receiver
//! merges whatever clock travelled with the message.

use std::collections::HashMap;

use super::core::VectorClockCore;
use super::CausalClock;
use crate::error::ClockError;
use crate::snapshot::VectorClockSnapshot;
use crate::time::logical::LogicalTimestamp;
use crate::types::{ClockOrder, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncVectorClock {
    core: VectorClockCore,
}

impl AsyncVectorClock {
    pub fn new(node: &str) -> Result<Self, ClockError> {
        Ok(AsyncVectorClock { core: VectorClockCore::new(node)? })
    }

    pub fn with_timestamps<I, K>(node: &str, initial: I) -> Result<Self, ClockError>
    where
        I: IntoIterator<Item = (K, LogicalTimestamp)>,
        K: AsRef<str>,
    {
        Ok(AsyncVectorClock { core: VectorClockCore::with_timestamps(node, initial)? })
    }

    /// Rebuilds a clock from a snapshot carried in a message.
    pub fn from_snapshot(snapshot: &VectorClockSnapshot) -> Result<Self, ClockError> {
        Ok(AsyncVectorClock { core: snapshot.decode()? })
    }

    pub fn snapshot(&self) -> VectorClockSnapshot {
        VectorClockSnapshot::from(&self.core)
    }

    pub fn core(&self) -> &VectorClockCore {
        &self.core
    }

    pub fn node(&self) -> &NodeId {
        self.core.node()
    }

    pub fn timestamps(&self) -> &HashMap<NodeId, LogicalTimestamp> {
        self.core.timestamps()
    }

    pub fn value_of(&self, node: &str) -> Option<u64> {
        self.core.value_of(node)
    }

    pub fn has_node(&self, node: &str) -> bool {
        self.core.has_node(node)
    }

    pub fn has_same_node(&self, other: &AsyncVectorClock) -> bool {
        self.core.has_same_node(&other.core)
    }

    pub fn add_node(&mut self, node: &str) -> Result<bool, ClockError> {
        self.core.add_node(node)
    }

    pub fn remove_node(&mut self, node: &str) -> bool {
        self.core.remove_node(node)
    }

    /// Compares this clock with `other`.
    ///
    /// `HappenBefore` when `other` has seen more of this clock's own node than
    /// this clock has, `HappenAfter` when this clock has seen more of
    /// `other`'s node, and otherwise `Identical` or `Concurrent`.
    pub fn compare(&self, other: &AsyncVectorClock) -> ClockOrder {
        if !self.core.can_be_compared(&other.core) {
            return ClockOrder::NotComparable;
        }

        let own = self.node().as_str();
        let theirs = other.node().as_str();

        if self.core.counter(own) < other.core.counter(own) {
            return ClockOrder::HappenBefore;
        }
        if other.core.counter(theirs) < self.core.counter(theirs) {
            return ClockOrder::HappenAfter;
        }
        if self.core.all_entries_equal(&other.core) {
            ClockOrder::Identical
        } else {
            ClockOrder::Concurrent
        }
    }

    pub fn can_be_compared_with(&self, other: &AsyncVectorClock) -> bool {
        self.core.can_be_compared(&other.core)
    }

    pub fn apply_local_event(&mut self) -> Result<&mut Self, ClockError> {
        self.core.tick()?;
        tracing::trace!(node = %self.node(), value = self.core.counter(self.node()), "async local event");
        Ok(self)
    }

    pub fn apply_send_event(&mut self) -> Result<&mut Self, ClockError> {
        self.core.tick()?;
        tracing::trace!(node = %self.node(), value = self.core.counter(self.node()), "async send event");
        Ok(self)
    }

    /// Merges the clock attached to a received message.
    ///
    /// The sender must already be tracked. After the local tick, the sender's
    /// entry is pushed strictly past the sender's own counter, then every
    /// other shared entry takes the maximum of both sides.
    pub fn apply_receive_event(&mut self, other: &AsyncVectorClock) -> Result<&mut Self, ClockError> {
        if std::ptr::eq(&*self, other) {
            return Err(ClockError::CannotReceiveSelf);
        }

        let sender = other.node().as_str();
        self.core.ensure_node_known(sender)?;

        let sender_value = other.core.counter(sender);
        let advanced = sender_value
            .checked_add(1)
            .ok_or(ClockError::CounterOverflow { kind: "LogicalTimestamp" })?;
        self.core.tick()?;

        if self.core.counter(sender) <= sender_value {
            self.core.set_node_value(sender, advanced);
        }
        self.core.merge_max(&other.core);

        tracing::trace!(node = %self.node(), from = sender, value = self.core.counter(self.node()), "async receive event");
        Ok(self)
    }
}

impl CausalClock for AsyncVectorClock {
    fn compare(&self, other: &Self) -> ClockOrder {
        AsyncVectorClock::compare(self, other)
    }

    fn can_be_compared_with(&self, other: &Self) -> bool {
        AsyncVectorClock::can_be_compared_with(self, other)
    }
}
