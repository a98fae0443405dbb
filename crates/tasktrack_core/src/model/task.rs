use serde::{Deserialize, Serialize};

/// Urgency of a task, 1 (highest) through 5 (lowest).
///
/// Every way of building a `Priority` clamps into range, including
/// deserialization, so an out-of-range value never survives a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const HIGHEST: Priority = Priority(1);
    pub const LOWEST: Priority = Priority(5);

    pub fn clamped(value: i64) -> Self {
        Priority(value.clamp(Self::HIGHEST.0 as i64, Self::LOWEST.0 as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority(3)
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Priority::clamped(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub created_at: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// First `-`-separated segment of the id, used wherever the id is shown.
    pub fn short_id(&self) -> &str {
        self.id.split('-').next().unwrap_or(&self.id)
    }
}
