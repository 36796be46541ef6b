//! Coaching memory type definitions.
//!
//! Defines [`MemoryKind`] (what sort of thing the coach remembered) and
//! [`MemoryEntry`] (a full record).

use serde::{Deserialize, Serialize};

/// Category of a remembered item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// Something true about the user: injuries, equipment, schedule.
    Fact,
    /// Likes and dislikes: exercise types, session length, tone.
    Preference,
    /// What the user is training towards.
    Goal,
    /// Conversation context worth carrying into later sessions.
    Context,
}

impl MemoryKind {
    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fact => "fact",
            Self::Preference => "preference",
            Self::Goal => "goal",
            Self::Context => "context",
        }
    }
}

impl std::fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fact" => Ok(Self::Fact),
            "preference" => Ok(Self::Preference),
            "goal" => Ok(Self::Goal),
            "context" => Ok(Self::Context),
            _ => Err(format!("unknown memory kind: {s}")),
        }
    }
}

/// A memory record, matching the `memories` table schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEntry {
    /// UUID v7 (time-sortable) primary key.
    pub id: String,
    pub kind: MemoryKind,
    pub content: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}
