//! Shared types used by every clock: comparison outcomes, the synchronous
//! communication state, and validated node identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use crate::error::ClockError;

/// Outcome of comparing two clocks.
///
/// Lamport timestamps only ever yield `Identical`, `HappenBefore` or
/// `HappenAfter`. Vector clocks may yield any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ClockOrder {
    #[serde(rename = "not-comparable")]
    NotComparable,
    #[serde(rename = "identical")]
    Identical,
    #[serde(rename = "before")]
    HappenBefore,
    #[serde(rename = "after")]
    HappenAfter,
    #[serde(rename = "concurrent")]
    Concurrent,
}

impl ClockOrder {
    /// Maps the outcome onto `std::cmp::Ordering`.
    ///
    /// `Concurrent` and `NotComparable` have no total-order counterpart and map to `None`.
    pub fn as_ordering(self) -> Option<std::cmp::Ordering> {
        match self {
            ClockOrder::Identical => Some(std::cmp::Ordering::Equal),
            ClockOrder::HappenBefore => Some(std::cmp::Ordering::Less),
            ClockOrder::HappenAfter => Some(std::cmp::Ordering::Greater),
            ClockOrder::Concurrent | ClockOrder::NotComparable => None,
        }
    }

    /// The outcome seen from the other clock's side.
    pub fn reverse(self) -> Self {
        match self {
            ClockOrder::HappenBefore => ClockOrder::HappenAfter,
            ClockOrder::HappenAfter => ClockOrder::HappenBefore,
            other => other,
        }
    }
}

/// Communication state of a `SyncVectorClock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncClockState {
    Idle,
    Communicating,
}

/// A validated node identifier.
///
/// Node names must be non-empty and must not look like a number, so that they
/// can never be confused with positional indices once a clock is flattened
/// into a message payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Validates `name` and wraps it.
    pub fn new(name: impl Into<String>) -> Result<Self, ClockError> {
        let name = name.into();
        validate_node_name(&name)?;
        Ok(NodeId(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NodeId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for NodeId {
    type Error = ClockError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        NodeId::new(value)
    }
}

impl TryFrom<String> for NodeId {
    type Error = ClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NodeId::new(value)
    }
}

impl<'de> serde::Deserialize<'de> for NodeId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NodeId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Checks the node-name rule without allocating.
pub fn validate_node_name(name: &str) -> Result<(), ClockError> {
    if looks_numeric(name) {
        return Err(ClockError::NumericNodeName(name.to_string()));
    }
    if name.is_empty() {
        return Err(ClockError::InvalidNodeName);
    }
    Ok(())
}

/// Returns true for strings such as `"42"`, `"-1.5"`, `" 7 "`, `".5"` or `"1e3"`.
///
/// Accepted shape: surrounding whitespace, an optional sign, a decimal number
/// with at least one digit, and an optional exponent.
pub fn looks_numeric(s: &str) -> bool {
    let bytes = s
        .trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'))
        .as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
