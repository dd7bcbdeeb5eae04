//! Flag-gated, access-restricted time intervals.
//!
//! A [`Window`] gates a UI affordance: artist signups and ticket presales are
//! both windows with the same shape. "Is it open right now" and "may this
//! actor use it" are deliberately separate questions; callers combine them.

use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::clock::Clock;

/// A configurable time interval with an enabled flag, an optional
/// members-only restriction, and bilingual informational text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Window {
    /// Master switch. A disabled window is closed and inaccessible no matter
    /// what its other fields say.
    #[serde(default)]
    pub enabled: bool,

    /// Opening instant. A window missing either bound is permanently closed.
    pub start: Option<DateTime<Utc>>,

    /// Closing instant, inclusive.
    pub end: Option<DateTime<Utc>>,

    /// When set, only authenticated members may use the window.
    #[serde(default)]
    pub members_only: bool,

    /// Informational text in the primary site language.
    pub info_primary: Option<String>,

    /// English informational text, shown only to `"en"` locales.
    pub info_secondary: Option<String>,
}

impl Window {
    /// Whether the window is open at the clock's current instant.
    ///
    /// Both bounds are inclusive, so an instant landing exactly on a
    /// configured boundary is never excluded. Disabled windows and windows
    /// with a missing bound are closed.
    pub fn is_open(&self, clock: &dyn Clock) -> bool {
        if !self.enabled {
            return false;
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                let now = clock.now();
                start <= now && now <= end
            }
            _ => false,
        }
    }

    /// Whether `actor` may use the window, independent of time.
    ///
    /// Only the actor's presence matters; no field of it is read. A missing
    /// actor is rejected exactly when the window is members-only.
    pub fn can_member_access<A>(&self, actor: Option<&A>) -> bool {
        if !self.enabled {
            return false;
        }
        if self.members_only {
            actor.is_some()
        } else {
            true
        }
    }

    /// Informational text for `locale`.
    ///
    /// The English secondary text is returned only for `"en"` when it is
    /// actually present; the primary language is the unconditional fallback.
    pub fn info(&self, locale: &str) -> Option<&str> {
        if locale == "en" {
            if let Some(secondary) = self.info_secondary.as_deref() {
                return Some(secondary);
            }
        }
        self.info_primary.as_deref()
    }
}

/// The window during which performers may register for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupWindow(pub Window);

impl SignupWindow {
    /// Whether artist signups are switched on for the event at all.
    pub fn is_enabled(&self) -> bool {
        self.0.enabled
    }

    /// Whether signing up requires an authenticated member.
    pub fn requires_authentication(&self) -> bool {
        self.0.members_only
    }
}

impl Deref for SignupWindow {
    type Target = Window;

    fn deref(&self) -> &Window {
        &self.0
    }
}

/// The window during which tickets may be purchased ahead of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresaleWindow(pub Window);

impl Deref for PresaleWindow {
    type Target = Window;

    fn deref(&self) -> &Window {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::clock::{parse_instant, FixedClock};

    struct Member;

    fn open_window(start: &str, end: &str) -> Window {
        Window {
            enabled: true,
            start: Some(parse_instant(start).unwrap()),
            end: Some(parse_instant(end).unwrap()),
            ..Window::default()
        }
    }

    #[test]
    fn open_exactly_on_the_inclusive_bounds() {
        let window = open_window("2025-03-01T10:00:00Z", "2025-03-01T14:00:00Z");
        let at_start = FixedClock::parse("2025-03-01T10:00:00Z").unwrap();
        let at_end = at_start.at(parse_instant("2025-03-01T14:00:00Z").unwrap());

        assert!(window.is_open(&at_start));
        assert!(window.is_open(&at_end));
        assert!(window.is_open(&at_start.advanced(Duration::hours(2))));
        assert!(!window.is_open(&at_start.advanced(Duration::seconds(-1))));
        assert!(!window.is_open(&at_end.advanced(Duration::seconds(1))));
    }

    #[test]
    fn disabled_or_unbounded_windows_are_closed() {
        let clock = FixedClock::parse("2025-03-01T12:00:00Z").unwrap();

        let mut window = open_window("2025-03-01T10:00:00Z", "2025-03-01T14:00:00Z");
        window.enabled = false;
        assert!(!window.is_open(&clock));

        let mut no_end = open_window("2025-03-01T10:00:00Z", "2025-03-01T14:00:00Z");
        no_end.end = None;
        assert!(!no_end.is_open(&clock));

        let mut no_start = open_window("2025-03-01T10:00:00Z", "2025-03-01T14:00:00Z");
        no_start.start = None;
        assert!(!no_start.is_open(&clock));
    }

    #[test]
    fn access_depends_on_flags_not_time() {
        let mut window = Window {
            enabled: true,
            ..Window::default()
        };
        assert!(window.can_member_access(Some(&Member)));
        assert!(window.can_member_access::<Member>(None));

        window.members_only = true;
        assert!(window.can_member_access(Some(&Member)));
        assert!(!window.can_member_access::<Member>(None));

        window.enabled = false;
        assert!(!window.can_member_access(Some(&Member)));
    }

    #[test]
    fn info_prefers_english_secondary_only_when_present() {
        let mut window = Window {
            info_primary: Some("Einlass ab 19 Uhr".to_string()),
            info_secondary: Some("Doors open at 7pm".to_string()),
            ..Window::default()
        };
        assert_eq!(window.info("en"), Some("Doors open at 7pm"));
        assert_eq!(window.info("de"), Some("Einlass ab 19 Uhr"));
        assert_eq!(window.info("fr"), Some("Einlass ab 19 Uhr"));

        window.info_secondary = None;
        assert_eq!(window.info("en"), Some("Einlass ab 19 Uhr"));

        window.info_primary = None;
        assert_eq!(window.info("en"), None);
        assert_eq!(window.info("de"), None);
    }

    #[test]
    fn signup_wrapper_exposes_its_flags() {
        let signup = SignupWindow(Window {
            enabled: true,
            members_only: true,
            ..Window::default()
        });
        assert!(signup.is_enabled());
        assert!(signup.requires_authentication());
        // Deref keeps the plain window queries available.
        assert!(!signup.is_open(&FixedClock::default()));
    }
}
