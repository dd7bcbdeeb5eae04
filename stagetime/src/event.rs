//! The read-only temporal projection of a caller-owned event entity.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::publication::PublishFlag;
use crate::window::Window;

/// Every temporal field the engine reads from an event.
///
/// The caller owns the entity; this is a snapshot of its current field
/// values, typically deserialized from a persisted record or built by the
/// calling layer. The engine only ever reads it and recomputes every answer
/// on demand.
#[derive(Debug, Clone, Deserialize)]
pub struct EventTemporalContext {
    /// When the event starts.
    pub start: DateTime<Utc>,

    /// When the event ends. Absent for instantaneous events, which changes
    /// the phase rules (see [`crate::phase::compute_phase`]).
    pub end: Option<DateTime<Utc>>,

    /// The loosely-boolean published flag, as stored.
    #[serde(default)]
    pub published: PublishFlag,

    /// When the event becomes visible. Absent means never visible.
    pub publish_at: Option<DateTime<Utc>>,

    /// Event category; only the literal `"announcement"` is special-cased.
    #[serde(default)]
    pub category: String,

    /// Artist-signup window configuration.
    #[serde(default)]
    pub signup: Window,

    /// Ticket-presale window configuration.
    #[serde(default)]
    pub presale: Window,
}
