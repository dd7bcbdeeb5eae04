//! The orchestration service that answers every temporal question per event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::clock::{Clock, SystemClock};
use crate::event::EventTemporalContext;
use crate::phase::{self, Phase};
use crate::publication::{self, PublicationStatus};
use crate::window::{PresaleWindow, SignupWindow};

/// The temporal decision engine.
///
/// Holds exactly one injected [`Clock`] and no other state; every method is a
/// pure function of the event snapshot and a fresh clock reading, so the
/// service can be built once at wiring time and shared across request
/// handlers. Sharing is safe as long as the clock tolerates concurrent reads,
/// which is true of [`SystemClock`] and [`crate::clock::FixedClock`] but not
/// guaranteed for [`crate::clock::MutableClock`].
#[derive(Clone)]
pub struct TemporalStateService {
    clock: Arc<dyn Clock>,
}

impl TemporalStateService {
    /// Creates a service over the given clock.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Creates a service over the real system clock, the production wiring.
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Whether the event is visible at the current instant.
    pub fn is_published(&self, event: &EventTemporalContext) -> bool {
        publication::is_published(&event.published, event.publish_at, self.clock.now())
    }

    /// Draft / unknown / live / scheduled classification of the event.
    pub fn publication_state(&self, event: &EventTemporalContext) -> PublicationStatus {
        let state = publication::publication_state(
            &event.published,
            event.publish_at,
            self.clock.now(),
        );
        trace!(?state, start = %event.start, "classified publication");
        state
    }

    /// The event's lifecycle phase at the current instant.
    pub fn phase(&self, event: &EventTemporalContext) -> Phase {
        phase::compute_phase(event.start, event.end, self.clock.now())
    }

    /// Whether the event is over.
    pub fn is_in_past(&self, event: &EventTemporalContext) -> bool {
        self.phase(event) == Phase::After
    }

    /// Translation key for the event's teaser badge.
    pub fn badge_key(&self, event: &EventTemporalContext) -> &'static str {
        phase::badge_key(&event.category, self.phase(event))
    }

    /// A fresh signup window built from the event's current field values.
    /// Never cached: edits to the entity take effect on the next call.
    pub fn signup_window(&self, event: &EventTemporalContext) -> SignupWindow {
        SignupWindow(event.signup.clone())
    }

    /// A fresh presale window built from the event's current field values.
    pub fn presale_window(&self, event: &EventTemporalContext) -> PresaleWindow {
        PresaleWindow(event.presale.clone())
    }

    /// Whether artist signups are open right now.
    ///
    /// An event that is already over never has open signups, even while the
    /// signup window's own end date still covers the current instant.
    pub fn is_signup_open(&self, event: &EventTemporalContext) -> bool {
        !self.is_in_past(event) && self.signup_window(event).is_open(self.clock.as_ref())
    }

    /// Whether the signup link may be shown to `actor`.
    ///
    /// Open window, event not over, and the window's access rule admits the
    /// actor. All three conjuncts are checked even though the first two equal
    /// [`Self::is_signup_open`].
    pub fn can_show_signup_link<A>(
        &self,
        event: &EventTemporalContext,
        actor: Option<&A>,
    ) -> bool {
        let window = self.signup_window(event);
        window.is_open(self.clock.as_ref())
            && !self.is_in_past(event)
            && window.can_member_access(actor)
    }

    /// Localized informational text for the signup window.
    pub fn artist_signup_info<'e>(
        &self,
        event: &'e EventTemporalContext,
        locale: &str,
    ) -> Option<&'e str> {
        event.signup.info(locale)
    }

    /// Localized informational text for the presale window.
    pub fn ticket_info<'e>(
        &self,
        event: &'e EventTemporalContext,
        locale: &str,
    ) -> Option<&'e str> {
        event.presale.info(locale)
    }

    /// Whether the ticket presale is open right now.
    ///
    /// Deliberately not gated on the event being over: a presale may stay
    /// open for a past event if its window says so.
    pub fn is_presale_open(&self, event: &EventTemporalContext) -> bool {
        self.presale_window(event).is_open(self.clock.as_ref())
    }

    /// The instant at which the event would be unpublished again.
    ///
    /// No unpublish-after-date feature exists; this is the explicit
    /// placeholder for it.
    pub fn unpublish_at(&self, _event: &EventTemporalContext) -> Option<DateTime<Utc>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{parse_instant, MutableClock};
    use crate::publication::PublishFlag;
    use crate::window::Window;

    struct Member;

    fn instant(s: &str) -> DateTime<Utc> {
        parse_instant(s).unwrap()
    }

    fn service_at(s: &str) -> (TemporalStateService, MutableClock) {
        let clock = MutableClock::new(instant(s));
        (TemporalStateService::new(Arc::new(clock.clone())), clock)
    }

    fn concert() -> EventTemporalContext {
        EventTemporalContext {
            start: instant("2025-03-01T20:00:00Z"),
            end: Some(instant("2025-03-01T23:00:00Z")),
            published: PublishFlag::Bool(true),
            publish_at: Some(instant("2025-02-01T00:00:00Z")),
            category: "concert".to_string(),
            signup: Window {
                enabled: true,
                start: Some(instant("2025-02-10T00:00:00Z")),
                end: Some(instant("2025-02-28T23:59:59Z")),
                members_only: true,
                info_primary: Some("Anmeldung offen".to_string()),
                info_secondary: Some("Signups open".to_string()),
            },
            presale: Window {
                enabled: true,
                start: Some(instant("2025-02-15T00:00:00Z")),
                end: Some(instant("2025-03-01T20:00:00Z")),
                members_only: false,
                info_primary: Some("VVK läuft".to_string()),
                info_secondary: None,
            },
        }
    }

    #[test]
    fn delegated_queries_agree_with_the_leaf_modules() {
        let (service, _clock) = service_at("2025-02-20T12:00:00Z");
        let event = concert();

        assert!(service.is_published(&event));
        assert_eq!(service.publication_state(&event), PublicationStatus::Live);
        assert_eq!(service.phase(&event), Phase::Before);
        assert!(!service.is_in_past(&event));
        assert_eq!(service.badge_key(&event), "future-badge");
        assert_eq!(service.unpublish_at(&event), None);
    }

    #[test]
    fn announcement_badge_ignores_phase() {
        let (service, clock) = service_at("2025-02-20T12:00:00Z");
        let mut event = concert();
        event.category = "announcement".to_string();

        assert_eq!(service.badge_key(&event), "announcement-badge");
        clock.set_now(instant("2025-04-01T00:00:00Z"));
        assert_eq!(service.badge_key(&event), "announcement-badge");
    }

    #[test]
    fn signup_closes_when_the_event_is_over() {
        let (service, clock) = service_at("2025-02-20T12:00:00Z");
        let mut event = concert();
        // Stretch the signup window far past the event itself.
        event.signup.end = Some(instant("2025-04-01T00:00:00Z"));

        assert!(service.is_signup_open(&event));
        clock.set_now(instant("2025-03-05T12:00:00Z"));
        assert!(service.signup_window(&event).is_open(&clock));
        assert!(!service.is_signup_open(&event));
    }

    #[test]
    fn signup_link_needs_window_phase_and_access() {
        let (service, clock) = service_at("2025-02-20T12:00:00Z");
        let event = concert();

        assert!(service.can_show_signup_link(&event, Some(&Member)));
        // Members-only window rejects an absent actor even while open.
        assert!(!service.can_show_signup_link::<Member>(&event, None));
        assert!(service.is_signup_open(&event));

        clock.set_now(instant("2025-03-02T12:00:00Z"));
        assert!(!service.can_show_signup_link(&event, Some(&Member)));
    }

    #[test]
    fn presale_stays_open_for_past_events() {
        let (service, clock) = service_at("2025-02-20T12:00:00Z");
        let mut event = concert();
        event.presale.end = Some(instant("2025-04-01T00:00:00Z"));

        clock.set_now(instant("2025-03-10T12:00:00Z"));
        assert!(service.is_in_past(&event));
        assert!(service.is_presale_open(&event));
        assert!(!service.is_signup_open(&event));
    }

    #[test]
    fn info_texts_delegate_to_the_windows() {
        let (service, _clock) = service_at("2025-02-20T12:00:00Z");
        let event = concert();

        assert_eq!(service.artist_signup_info(&event, "en"), Some("Signups open"));
        assert_eq!(service.artist_signup_info(&event, "de"), Some("Anmeldung offen"));
        // Presale has no English text, so the primary language wins.
        assert_eq!(service.ticket_info(&event, "en"), Some("VVK läuft"));
    }

    #[test]
    fn windows_are_rebuilt_from_current_fields_on_every_call() {
        let (service, _clock) = service_at("2025-02-20T12:00:00Z");
        let mut event = concert();

        assert!(service.signup_window(&event).is_enabled());
        event.signup.enabled = false;
        assert!(!service.signup_window(&event).is_enabled());
    }
}
