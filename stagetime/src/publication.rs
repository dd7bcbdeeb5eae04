//! Publish-visibility classification for publishable entities.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The loosely-boolean published flag as stored by the legacy data layer.
///
/// Storage never guaranteed a strict boolean here: booleans, integers and
/// strings all occur in the wild. The whole truth table lives in
/// [`PublishFlag::is_set`]; no call site reimplements it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PublishFlag {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl PublishFlag {
    /// The one place the legacy truthiness rule is spelled out:
    /// `false`, `0` and the strings `""` / `"0"` are unset, everything
    /// else counts as set.
    pub fn is_set(&self) -> bool {
        match self {
            PublishFlag::Bool(b) => *b,
            PublishFlag::Int(i) => *i != 0,
            PublishFlag::Text(s) => !s.is_empty() && s != "0",
        }
    }
}

impl Default for PublishFlag {
    fn default() -> Self {
        PublishFlag::Bool(false)
    }
}

/// Publish visibility of an entity at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicationStatus {
    /// The published flag is not set.
    Draft,
    /// The flag is set but no publish instant exists. A storable data
    /// anomaly, reported as-is; deliberately distinct from `Draft`.
    Unknown,
    /// Published and visible.
    Live,
    /// Published with a publish instant still in the future.
    Scheduled,
}

/// Whether the entity is visible at `now`.
///
/// Visible from the exact publish instant onward, not one tick later.
pub fn is_published(flag: &PublishFlag, publish_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match publish_at {
        Some(publish_at) => flag.is_set() && publish_at <= now,
        None => false,
    }
}

/// Classifies publish visibility at `now`.
pub fn publication_state(
    flag: &PublishFlag,
    publish_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> PublicationStatus {
    if !flag.is_set() {
        return PublicationStatus::Draft;
    }
    match publish_at {
        None => PublicationStatus::Unknown,
        Some(publish_at) if publish_at <= now => PublicationStatus::Live,
        Some(_) => PublicationStatus::Scheduled,
    }
}
