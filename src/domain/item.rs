//! Item entity, id primitive and listing filter.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Store-assigned item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Create an ItemId from a raw integer.
    pub fn new(id: i64) -> Self {
        ItemId(id)
    }

    /// Get the underlying integer value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid item id: {0:?}")]
pub struct ItemIdParseError(pub String);

impl FromStr for ItemId {
    type Err = ItemIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(ItemId)
            .map_err(|_| ItemIdParseError(s.to_string()))
    }
}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub description: String,
    pub completed: bool,
}

/// Completion-state filter for listing items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFilter {
    All,
    Completed,
    Incomplete,
}

impl ItemFilter {
    /// The `completed` column value to match, or `None` for no predicate.
    pub fn completed(&self) -> Option<bool> {
        match self {
            ItemFilter::All => None,
            ItemFilter::Completed => Some(true),
            ItemFilter::Incomplete => Some(false),
        }
    }
}

impl std::fmt::Display for ItemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemFilter::All => write!(f, "all"),
            ItemFilter::Completed => write!(f, "completed"),
            ItemFilter::Incomplete => write!(f, "incomplete"),
        }
    }
}
