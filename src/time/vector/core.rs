//! State and primitives shared by the asynchronous and synchronous vector clocks.
//!
//! A `VectorClockCore` owns the clock's own node identifier and the map from
//! every tracked node to its `LogicalTimestamp`. The own node is inserted at
//! construction and can never be removed.

use std::collections::HashMap;

use crate::error::ClockError;
use crate::time::logical::LogicalTimestamp;
use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorClockCore {
    node: NodeId,
    timestamps: HashMap<NodeId, LogicalTimestamp>,
}

impl VectorClockCore {
    /// Creates a core tracking only `node`, at zero.
    pub fn new(node: &str) -> Result<Self, ClockError> {
        Self::with_timestamps(node, std::iter::empty::<(&str, LogicalTimestamp)>())
    }

    /// Creates a core from an initial node → timestamp mapping.
    ///
    /// Every key must satisfy the node-name rule. When the mapping has no entry
    /// for `node`, one is added at zero. Later duplicates overwrite earlier ones.
    pub fn with_timestamps<I, K>(node: &str, initial: I) -> Result<Self, ClockError>
    where
        I: IntoIterator<Item = (K, LogicalTimestamp)>,
        K: AsRef<str>,
    {
        let node = NodeId::new(node)?;
        let mut timestamps = HashMap::new();
        for (name, timestamp) in initial {
            timestamps.insert(NodeId::new(name.as_ref())?, timestamp);
        }
        Ok(Self::from_validated(node, timestamps))
    }

    /// Assembles a core from already validated parts, filling in the own node.
    pub(crate) fn from_validated(node: NodeId, mut timestamps: HashMap<NodeId, LogicalTimestamp>) -> Self {
        timestamps.entry(node.clone()).or_insert_with(LogicalTimestamp::init);
        VectorClockCore { node, timestamps }
    }

    pub fn node(&self) -> &NodeId {
        &self.node
    }

    pub fn timestamps(&self) -> &HashMap<NodeId, LogicalTimestamp> {
        &self.timestamps
    }

    pub fn has_node(&self, node: &str) -> bool {
        self.timestamps.contains_key(node)
    }

    /// Counter currently stored for `node`, if tracked.
    pub fn value_of(&self, node: &str) -> Option<u64> {
        self.timestamps.get(node).map(LogicalTimestamp::value)
    }

    pub fn has_same_node(&self, other: &VectorClockCore) -> bool {
        self.node == other.node
    }

    /// Starts tracking `node` at zero. Returns `false` if it is already tracked.
    pub fn add_node(&mut self, node: &str) -> Result<bool, ClockError> {
        let node = NodeId::new(node)?;
        if self.timestamps.contains_key(&node) {
            return Ok(false);
        }
        tracing::debug!(clock = %self.node, added = %node, "node added to vector");
        self.timestamps.insert(node, LogicalTimestamp::init());
        Ok(true)
    }

    /// Stops tracking `node`. The own node and unknown nodes are left alone
    /// and yield `false`.
    pub fn remove_node(&mut self, node: &str) -> bool {
        if node == self.node.as_str() {
            return false;
        }
        let removed = self.timestamps.remove(node).is_some();
        if removed {
            tracing::debug!(clock = %self.node, removed = node, "node removed from vector");
        }
        removed
    }

    /// Two cores are comparable when they track exactly the same nodes.
    ///
    /// Two snapshots of the same process taken at the same own-counter must
    /// agree on every entry; a pair that does not is treated as not comparable.
    pub fn can_be_compared(&self, other: &VectorClockCore) -> bool {
        if self.timestamps.len() != other.timestamps.len() {
            return false;
        }
        if !self.timestamps.keys().all(|node| other.timestamps.contains_key(node)) {
            return false;
        }
        if self.has_same_node(other) && self.counter(&self.node) == other.counter(&self.node) {
            return self.all_entries_equal(other);
        }
        true
    }

    pub(crate) fn all_entries_equal(&self, other: &VectorClockCore) -> bool {
        self.timestamps
            .iter()
            .all(|(node, ts)| other.timestamps.get(node) == Some(ts))
    }

    /// Counter for `node`, zero when untracked.
    pub(crate) fn counter(&self, node: &str) -> u64 {
        self.value_of(node).unwrap_or_default()
    }

    /// Returns the tracked identifier equal to `node`.
    pub(crate) fn known_node(&self, node: &str) -> Result<&NodeId, ClockError> {
        self.timestamps
            .get_key_value(node)
            .map(|(id, _)| id)
            .ok_or_else(|| ClockError::UnknownNode(node.to_string()))
    }

    pub(crate) fn ensure_node_known(&self, node: &str) -> Result<(), ClockError> {
        self.known_node(node).map(|_| ())
    }

    /// Fails with `CounterOverflow` if the own entry cannot be incremented.
    pub(crate) fn ensure_can_tick(&self) -> Result<(), ClockError> {
        match self.timestamps.get(self.node.as_str()) {
            Some(ts) => ts.increment().map(|_| ()),
            None => Ok(()),
        }
    }

    /// Increments the own node's entry. Leaves the core untouched on overflow.
    pub(crate) fn tick(&mut self) -> Result<(), ClockError> {
        if let Some(ts) = self.timestamps.get_mut(self.node.as_str()) {
            *ts = ts.increment()?;
        }
        Ok(())
    }

    /// Replaces the entry of a tracked node with a fresh timestamp.
    pub(crate) fn set_node_value(&mut self, node: &str, value: u64) {
        if let Some(ts) = self.timestamps.get_mut(node) {
            *ts = LogicalTimestamp::new(value);
        }
    }

    /// Component-wise maximum over the nodes both cores track. Nodes known to
    /// only one side are left untouched.
    pub(crate) fn merge_max(&mut self, other: &VectorClockCore) {
        for (node, ts) in self.timestamps.iter_mut() {
            if let Some(theirs) = other.timestamps.get(node) {
                if theirs.value() > ts.value() {
                    *ts = *theirs;
                }
            }
        }
    }
}
