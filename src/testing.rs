//! Fixtures for tests and benches. Only compiled with the `test-utils` feature.

use crate::error::ClockError;
use crate::time::logical::LogicalTimestamp;
use crate::time::vector::{AsyncVectorClock, SyncVectorClock};
use crate::types::NodeId;
use std::collections::HashMap;

fn entries<'a>(values: &'a [(&'a str, u64)]) -> impl Iterator<Item = (&'a str, LogicalTimestamp)> + 'a {
    values.iter().map(|(node, v)| (*node, LogicalTimestamp::new(*v)))
}

/// Async clock owned by `node` with the given `(node, counter)` entries.
pub fn async_clock(node: &str, values: &[(&str, u64)]) -> Result<AsyncVectorClock, ClockError> {
    AsyncVectorClock::with_timestamps(node, entries(values))
}

/// Sync clock owned by `node` with the given `(node, counter)` entries.
pub fn sync_clock(node: &str, values: &[(&str, u64)]) -> Result<SyncVectorClock, ClockError> {
    SyncVectorClock::with_timestamps(node, entries(values))
}

/// One async clock per name, each tracking every name at zero.
pub fn connected_async_clocks(nodes: &[&str]) -> Result<Vec<AsyncVectorClock>, ClockError> {
    nodes
        .iter()
        .map(|owner| {
            let mut clock = AsyncVectorClock::new(owner)?;
            for peer in nodes {
                clock.add_node(peer)?;
            }
            Ok(clock)
        })
        .collect()
}

/// One sync clock per name, each tracking every name at zero.
pub fn connected_sync_clocks(nodes: &[&str]) -> Result<Vec<SyncVectorClock>, ClockError> {
    nodes
        .iter()
        .map(|owner| {
            let mut clock = SyncVectorClock::new(owner)?;
            for peer in nodes {
                clock.add_node(peer)?;
            }
            Ok(clock)
        })
        .collect()
}

/// Counters of `timestamps` in the order of `nodes`, zero for untracked nodes.
pub fn counters(timestamps: &HashMap<NodeId, LogicalTimestamp>, nodes: &[&str]) -> Vec<u64> {
    nodes
        .iter()
        .map(|node| timestamps.get(*node).map_or(0, LogicalTimestamp::value))
        .collect()
}
