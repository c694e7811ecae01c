//! Synchronous (rendezvous) vector clock.
//!
//! A send puts the clock in the `Communicating` state until the addressed
//! peer answers. While communicating, the clock refuses local events, new
//! sends and membership changes.
//!
//! ```text
//!  Idle --send(peer)--> Communicating(peer) --receive(from peer)--> Idle
//!  Idle --receive(any known)--> Idle
//! ```
//!
//! Receiving the peer's answer does not tick: the send already accounted for
//! the single logical step the pair shares. An unsolicited receive while idle
//! does tick.

use std::collections::HashMap;

use super::core::VectorClockCore;
use super::CausalClock;
use crate::error::ClockError;
use crate::snapshot::VectorClockSnapshot;
use crate::time::logical::LogicalTimestamp;
use crate::types::{ClockOrder, NodeId, SyncClockState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncVectorClock {
    core: VectorClockCore,
    communicating_node: Option<NodeId>,
}

impl SyncVectorClock {
    pub fn new(node: &str) -> Result<Self, ClockError> {
        Ok(SyncVectorClock { core: VectorClockCore::new(node)?, communicating_node: None })
    }

    pub fn with_timestamps<I, K>(node: &str, initial: I) -> Result<Self, ClockError>
    where
        I: IntoIterator<Item = (K, LogicalTimestamp)>,
        K: AsRef<str>,
    {
        Ok(SyncVectorClock {
            core: VectorClockCore::with_timestamps(node, initial)?,
            communicating_node: None,
        })
    }

    /// Rebuilds an idle clock from a snapshot carried in a message.
    pub fn from_snapshot(snapshot: &VectorClockSnapshot) -> Result<Self, ClockError> {
        Ok(SyncVectorClock { core: snapshot.decode()?, communicating_node: None })
    }

    /// Snapshot of the timestamps. The communication state is not part of it.
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

    pub fn has_same_node(&self, other: &SyncVectorClock) -> bool {
        self.core.has_same_node(&other.core)
    }

    /// Like `VectorClockCore::add_node`, but a communicating clock returns
    /// `false` without looking at the name.
    pub fn add_node(&mut self, node: &str) -> Result<bool, ClockError> {
        if self.is_communicating() {
            return Ok(false);
        }
        self.core.add_node(node)
    }

    pub fn remove_node(&mut self, node: &str) -> bool {
        if self.is_communicating() {
            return false;
        }
        self.core.remove_node(node)
    }

    pub fn communication_state(&self) -> SyncClockState {
        match self.communicating_node {
            Some(_) => SyncClockState::Communicating,
            None => SyncClockState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.communication_state() == SyncClockState::Idle
    }

    pub fn is_communicating(&self) -> bool {
        self.communication_state() == SyncClockState::Communicating
    }

    /// Peer whose answer this clock is waiting for.
    pub fn communicating_node(&self) -> Option<&NodeId> {
        self.communicating_node.as_ref()
    }

    /// Compares this clock with `other` under rendezvous semantics.
    ///
    /// `HappenBefore` requires this clock's own entry to be at most `other`'s
    /// view of it and `other`'s own entry to be strictly ahead of this clock's
    /// view of it. `HappenAfter` is the mirror image.
    pub fn compare(&self, other: &SyncVectorClock) -> ClockOrder {
        if !self.core.can_be_compared(&other.core) {
            return ClockOrder::NotComparable;
        }

        let own = self.node().as_str();
        let theirs = other.node().as_str();
        let mine = &self.core;
        let their = &other.core;

        if mine.counter(own) <= their.counter(own) && mine.counter(theirs) < their.counter(theirs) {
            return ClockOrder::HappenBefore;
        }
        if their.counter(theirs) <= mine.counter(theirs) && their.counter(own) < mine.counter(own) {
            return ClockOrder::HappenAfter;
        }
        if mine.all_entries_equal(their) {
            ClockOrder::Identical
        } else {
            ClockOrder::Concurrent
        }
    }

    pub fn can_be_compared_with(&self, other: &SyncVectorClock) -> bool {
        self.core.can_be_compared(&other.core)
    }

    pub fn apply_local_event(&mut self) -> Result<&mut Self, ClockError> {
        self.ensure_idle()?;
        self.core.tick()?;
        tracing::trace!(node = %self.node(), value = self.core.counter(self.node()), "sync local event");
        Ok(self)
    }

    /// Sends to `peer` and waits for its answer.
    pub fn apply_send_event(&mut self, peer: &str) -> Result<&mut Self, ClockError> {
        self.ensure_idle()?;
        let peer = self.core.known_node(peer)?.clone();
        self.core.tick()?;

        tracing::debug!(node = %self.node(), peer = %peer, "sync clock now communicating");
        self.communicating_node = Some(peer);
        Ok(self)
    }

    /// Merges a received clock.
    ///
    /// While communicating, only the pending peer may be received from; doing
    /// so ends the exchange without ticking. While idle, any tracked node may
    /// be received from and the clock ticks first.
    pub fn apply_receive_event(&mut self, other: &SyncVectorClock) -> Result<&mut Self, ClockError> {
        if std::ptr::eq(&*self, other) {
            return Err(ClockError::CannotReceiveSelf);
        }

        let sender = other.node().as_str();
        if let Some(expected) = &self.communicating_node {
            if expected.as_str() != sender {
                tracing::debug!(node = %self.node(), expected = %expected, got = sender, "unexpected receive rejected");
                return Err(ClockError::UnexpectedReceiveEvent {
                    expected: expected.to_string(),
                    got: sender.to_string(),
                });
            }
        }

        self.core.ensure_node_known(sender)?;

        if self.communicating_node.take().is_some() {
            tracing::debug!(node = %self.node(), peer = sender, "sync exchange completed");
        } else {
            self.core.tick()?;
        }
        self.core.merge_max(&other.core);

        tracing::trace!(node = %self.node(), from = sender, value = self.core.counter(self.node()), "sync receive event");
        Ok(self)
    }

    fn ensure_idle(&self) -> Result<(), ClockError> {
        match &self.communicating_node {
            Some(peer) => Err(ClockError::NotIdle { peer: peer.to_string() }),
            None => Ok(()),
        }
    }
}

impl CausalClock for SyncVectorClock {
    fn compare(&self, other: &Self) -> ClockOrder {
        SyncVectorClock::compare(self, other)
    }

    fn can_be_compared_with(&self, other: &Self) -> bool {
        SyncVectorClock::can_be_compared_with(self, other)
    }
}

/// Runs a complete exchange: `sender` sends to `receiver`, `receiver` takes
/// the message, and `sender` takes the answer.
///
/// Every precondition is checked up front, so on error neither clock has
/// been touched.
pub fn rendezvous(sender: &mut SyncVectorClock, receiver: &mut SyncVectorClock) -> Result<(), ClockError> {
    sender.ensure_idle()?;
    sender.core.ensure_node_known(receiver.node())?;
    receiver.core.ensure_node_known(sender.node())?;
    if let Some(expected) = &receiver.communicating_node {
        if expected != sender.node() {
            return Err(ClockError::UnexpectedReceiveEvent {
                expected: expected.to_string(),
                got: sender.node().to_string(),
            });
        }
    }
    sender.core.ensure_can_tick()?;
    if receiver.is_idle() {
        receiver.core.ensure_can_tick()?;
    }

    let peer = receiver.node().as_str().to_owned();
    sender.apply_send_event(&peer)?;
    receiver.apply_receive_event(sender)?;
    sender.apply_receive_event(receiver)?;
    Ok(())
}
