use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a participant in the trade loop engine.
///
/// Globally unique across all periods of a run. Convention: ids
/// admitted by the built-in generator follow `U{period:03}_{index:05}`.
///
/// # Examples
///
/// ```
/// use trade_loop_engine::core::ids::ParticipantId;
///
/// let a = ParticipantId::new("U001_00001");
/// let b = ParticipantId::new("U001_00002");
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier for a single collectible item. Each active participant
/// holds exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_id_equality() {
        let a = ParticipantId::new("U001_00001");
        let b = ParticipantId::new("U001_00001");
        let c = ParticipantId::new("U001_00002");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_participant_id_ordering() {
        let a = ParticipantId::new("U001_00001");
        let b = ParticipantId::new("U001_00002");
        assert!(a < b);
    }

    #[test]
    fn test_item_id_display() {
        let item = ItemId::new("W00042");
        assert_eq!(format!("{}", item), "W00042");
    }
}
