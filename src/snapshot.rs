//! Serializable view of a vector clock, for embedding in message payloads.
//!
//! Entries are kept as raw `serde_json::Value`s and only checked by
//! `decode`, which reports the offending node.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::error::ClockError;
use crate::time::logical::LogicalTimestamp;
use crate::time::vector::VectorClockCore;
use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VectorClockSnapshot {
    pub node: String,
    pub timestamps: BTreeMap<String, Value>,
}

impl VectorClockSnapshot {
    pub fn to_json(&self) -> Result<String, ClockError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ClockError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the snapshot and turns it into clock state.
    ///
    /// * non-negative integers become timestamps,
    /// * negative integers fail with `InvalidValue`,
    /// * `null` is accepted only for the own node and means zero,
    /// * anything else fails with `InvalidVectorClockState`.
    pub(crate) fn decode(&self) -> Result<VectorClockCore, ClockError> {
        let node = NodeId::new(self.node.as_str())?;
        let mut timestamps = HashMap::with_capacity(self.timestamps.len());

        for (name, raw) in &self.timestamps {
            let id = NodeId::new(name.as_str())?;
            let timestamp = decode_timestamp(&id, &node, raw)?;
            timestamps.insert(id, timestamp);
        }

        Ok(VectorClockCore::from_validated(node, timestamps))
    }
}

fn decode_timestamp(id: &NodeId, own: &NodeId, raw: &Value) -> Result<LogicalTimestamp, ClockError> {
    if raw.is_null() && id == own {
        return Ok(LogicalTimestamp::init());
    }
    if let Some(counter) = raw.as_u64() {
        return Ok(LogicalTimestamp::new(counter));
    }
    if let Some(counter) = raw.as_i64() {
        return LogicalTimestamp::try_from(counter);
    }
    tracing::debug!(node = %id, value = %raw, "malformed timestamp in snapshot");
    Err(ClockError::InvalidVectorClockState { node: id.to_string() })
}

impl From<&VectorClockCore> for VectorClockSnapshot {
    fn from(core: &VectorClockCore) -> Self {
        VectorClockSnapshot {
            node: core.node().to_string(),
            timestamps: core
                .timestamps()
                .iter()
                .map(|(node, ts)| (node.to_string(), Value::from(ts.value())))
                .collect(),
        }
    }
}
