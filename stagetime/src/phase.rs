//! Lifecycle-phase classification: where an event sits relative to "now".

use chrono::{DateTime, Duration, Utc};

/// An event's position relative to the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The event has not started yet.
    Before,
    /// The event is running right now. Only interval events (those with an
    /// end instant) ever report this phase.
    Now,
    /// The event is over.
    After,
}

/// Classifies an event's phase at `now`.
///
/// Interval events (`end` present) are `Now` from `start` through `end` plus
/// a one-second tolerance on the upper bound only. Instantaneous events
/// (`end` absent) have no `Now` phase: they flip from `Before` to `After` at
/// exactly `start`. The asymmetry is a product decision, not an oversight.
pub fn compute_phase(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Phase {
    match end {
        Some(end) => {
            let cutoff = end + Duration::seconds(1);
            if now >= start && now <= cutoff {
                Phase::Now
            } else if now > cutoff {
                Phase::After
            } else {
                Phase::Before
            }
        }
        None => {
            if now >= start {
                Phase::After
            } else {
                Phase::Before
            }
        }
    }
}

/// Whether the event is over at `now`.
pub fn is_in_past(start: DateTime<Utc>, end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    compute_phase(start, end, now) == Phase::After
}

/// Translation key for the badge shown on an event teaser.
///
/// Announcements carry one constant badge in every phase; everything else is
/// badged by where it sits in its lifecycle.
pub fn badge_key(category: &str, phase: Phase) -> &'static str {
    if category == "announcement" {
        return "announcement-badge";
    }
    match phase {
        Phase::Now => "live-badge",
        Phase::After => "past-badge",
        Phase::Before => "future-badge",
    }
}
