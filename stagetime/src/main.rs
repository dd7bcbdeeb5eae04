use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use stagetime::prelude::*;
use stagetime::{ENGINE_NAME, VERSION};
use tracing::info;

/// Stands in for an authenticated member; the engine only checks presence.
struct Member;

fn main() -> Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    // 2. Load an event fixture from a TOML file, or fall back to a sample.
    let event = match std::env::args().nth(1) {
        Some(path) => load_event(&path)?,
        None => sample_event(),
    };

    // 3. Wire the service against the real clock and walk every decision.
    let service = TemporalStateService::with_system_clock();
    info!("{} v{} — event starting at {}", ENGINE_NAME, VERSION, event.start);

    info!("[PUBLICATION] state: {:?}", service.publication_state(&event));
    info!("[PUBLICATION] visible now: {}", service.is_published(&event));

    info!("[PHASE] {:?} (badge key: {})", service.phase(&event), service.badge_key(&event));
    info!("[PHASE] in the past: {}", service.is_in_past(&event));

    info!("[SIGNUP] open: {}", service.is_signup_open(&event));
    info!(
        "[SIGNUP] link for a member: {}",
        service.can_show_signup_link(&event, Some(&Member))
    );
    info!(
        "[SIGNUP] link for a guest: {}",
        service.can_show_signup_link::<Member>(&event, None)
    );
    if let Some(text) = service.artist_signup_info(&event, "en") {
        info!("[SIGNUP] info (en): {}", text);
    }

    info!("[PRESALE] open: {}", service.is_presale_open(&event));
    if let Some(text) = service.ticket_info(&event, "en") {
        info!("[PRESALE] info (en): {}", text);
    }

    Ok(())
}

/// Loads an `EventTemporalContext` fixture from a TOML file.
fn load_event(path: &str) -> Result<EventTemporalContext> {
    let settings = config::Config::builder()
        .add_source(config::File::from(Path::new(path)))
        .build()
        .with_context(|| format!("failed to read event fixture {path}"))?;
    settings
        .try_deserialize()
        .with_context(|| format!("invalid event fixture {path}"))
}

/// A built-in demo event: starts in two hours, signups and presale running.
fn sample_event() -> EventTemporalContext {
    let now = Utc::now();
    EventTemporalContext {
        start: now + Duration::hours(2),
        end: Some(now + Duration::hours(5)),
        published: PublishFlag::Bool(true),
        publish_at: Some(now - Duration::days(7)),
        category: "concert".to_string(),
        signup: Window {
            enabled: true,
            start: Some(now - Duration::days(14)),
            end: Some(now + Duration::hours(1)),
            members_only: true,
            info_primary: Some("Anmeldung für Künstler offen".to_string()),
            info_secondary: Some("Artist signups are open".to_string()),
        },
        presale: Window {
            enabled: true,
            start: Some(now - Duration::days(7)),
            end: Some(now + Duration::hours(2)),
            members_only: false,
            info_primary: Some("Vorverkauf läuft".to_string()),
            info_secondary: Some("Presale is running".to_string()),
        },
    }
}
