use super::*;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::playlist::Track;

fn missing_track() -> Track {
    Track {
        id: 1,
        title: "Missing".into(),
        artist: None,
        source: PathBuf::from("/nonexistent/rondo-test/missing.mp3"),
        artwork: None,
        duration: None,
        display: "Missing".into(),
    }
}

#[test]
fn unbound_session_reports_defaults() {
    let session = PlaybackSession::new();

    assert!(!session.is_bound());
    assert_eq!(session.position(), Duration::ZERO);
    assert_eq!(session.duration(), Duration::ZERO);
    assert!(!session.is_playing());
}

#[test]
fn commands_are_noops_while_unbound() {
    let mut session = PlaybackSession::new();

    session.play();
    session.pause();
    assert!(session.seek(Duration::from_secs(30)).is_ok());
    session.release();

    assert_eq!(session.position(), Duration::ZERO);
    assert_eq!(session.duration(), Duration::ZERO);
    assert!(!session.is_playing());
}

#[test]
fn release_is_idempotent() {
    let mut session = PlaybackSession::new();
    session.release();
    session.release();
    assert!(!session.is_bound());
}

#[test]
fn failed_load_leaves_session_unbound() {
    let mut session = PlaybackSession::new();

    let err = session.load(&missing_track());
    assert!(err.is_err());
    assert!(!session.is_bound());
    assert_eq!(session.position(), Duration::ZERO);
    assert_eq!(session.duration(), Duration::ZERO);
    assert!(!session.is_playing());
}

#[test]
fn status_default_is_all_zeroes() {
    let status = PlaybackStatus::default();
    assert_eq!(status.position, Duration::ZERO);
    assert_eq!(status.duration, Duration::ZERO);
    assert!(!status.playing);
}

#[test]
fn idle_poller_never_writes() {
    let session = PlaybackSession::new();
    let mut poller = Poller::default();
    let mut status = PlaybackStatus {
        position: Duration::from_secs(42),
        duration: Duration::from_secs(99),
        playing: true,
    };

    assert!(!poller.is_polling());
    assert!(!poller.tick(&session, &mut status));
    assert_eq!(status.position, Duration::from_secs(42));
}

#[test]
fn started_poller_republishes_immediately_then_respects_cadence() {
    let session = PlaybackSession::new();
    let mut poller = Poller::default();
    let mut status = PlaybackStatus {
        position: Duration::from_secs(42),
        duration: Duration::from_secs(99),
        playing: true,
    };

    poller.start();
    assert!(poller.is_polling());

    // First tick overwrites the stale status with the (unbound) telemetry.
    assert!(poller.tick(&session, &mut status));
    assert_eq!(status, PlaybackStatus::default());

    // A tick inside the cadence window is a no-op.
    assert!(!poller.tick(&session, &mut status));

    thread::sleep(POLL_INTERVAL + Duration::from_millis(10));
    assert!(poller.tick(&session, &mut status));
}

#[test]
fn stop_returns_the_poller_to_idle() {
    let session = PlaybackSession::new();
    let mut poller = Poller::default();
    let mut status = PlaybackStatus::default();

    poller.start();
    assert!(poller.tick(&session, &mut status));

    poller.stop();
    assert!(!poller.is_polling());
    status.playing = true;
    assert!(!poller.tick(&session, &mut status));
    assert!(status.playing);
}
