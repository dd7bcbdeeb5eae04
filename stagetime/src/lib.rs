//! # Stagetime
//!
//! A clock-abstracted temporal decision engine for event-driven sites.
//!
//! Stagetime answers, for a given "now", the questions an event page keeps
//! asking: is this event published yet, is it upcoming / running / over, are
//! artist signups open and to whom, is the ticket presale running. Every
//! answer is a pure function of the event's current field values and one
//! clock reading, so the whole engine runs deterministically against
//! simulated instants in tests.
//!
//! ## Core Concepts
//!
//! - **Clock**: the single source of "now". [`clock::SystemClock`] for
//!   production, [`clock::FixedClock`] for frozen instants,
//!   [`clock::MutableClock`] for steering a simulated timeline.
//! - **Window**: a flag-gated, access-restricted interval ([`window::Window`])
//!   gating a UI affordance; artist signup and ticket presale are the two
//!   concrete uses.
//! - **Phase**: before / now / after classification
//!   ([`phase::compute_phase`]), with deliberately different boundary rules
//!   for interval and instantaneous events.
//! - **Publication**: draft / unknown / live / scheduled
//!   ([`publication::publication_state`]) plus the legacy loose publish flag.
//! - **TemporalStateService**: the orchestrator ([`engine`]), holding only an
//!   injected clock.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use stagetime::prelude::*;
//!
//! let clock = FixedClock::parse("2025-03-01T12:00:00Z")?;
//! let service = TemporalStateService::new(Arc::new(clock));
//!
//! let event = EventTemporalContext {
//!     start: stagetime::clock::parse_instant("2025-03-01T20:00:00Z")?,
//!     end: None,
//!     published: PublishFlag::Bool(true),
//!     publish_at: Some(stagetime::clock::parse_instant("2025-02-01T00:00:00Z")?),
//!     category: "concert".to_string(),
//!     signup: Window::default(),
//!     presale: Window::default(),
//! };
//!
//! assert!(service.is_published(&event));
//! assert_eq!(service.phase(&event), Phase::Before);
//! # Ok::<(), stagetime::clock::ClockError>(())
//! ```

pub const ENGINE_NAME: &str = "Stagetime Engine";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Declare all the modules in the crate.
pub mod clock;
pub mod engine;
pub mod event;
pub mod phase;
pub mod publication;
pub mod window;

/// A prelude module for easy importing of the most common Stagetime types.
pub mod prelude {
    pub use crate::clock::{Clock, ClockError, FixedClock, MutableClock, SystemClock};
    pub use crate::engine::TemporalStateService;
    pub use crate::event::EventTemporalContext;
    pub use crate::phase::Phase;
    pub use crate::publication::{PublicationStatus, PublishFlag};
    pub use crate::window::{PresaleWindow, SignupWindow, Window};
}
