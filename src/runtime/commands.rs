//! Command handlers shared by key bindings and MPRIS controls.
//!
//! Handlers write intent state (current track, screen, history) and drive
//! the session; telemetry stays the poller's job. Engine failures are
//! logged and otherwise ignored, so a track that cannot start leaves the
//! player page showing defaults.

use std::time::Duration;

use crate::app::{App, Screen};
use crate::playback::PlaybackSession;
use crate::playlist::Track;

/// Start the track highlighted on the songs page and show the player page.
pub fn play_selected(app: &mut App, session: &mut PlaybackSession, autoplay: bool) {
    let Some(track) = app.highlighted_track().cloned() else {
        return;
    };
    start_track(app, session, track, autoplay);
}

/// Advance to the track after the current one, wrapping at the end.
pub fn play_next(app: &mut App, session: &mut PlaybackSession) {
    let Some(current) = app.cursor.current_id() else {
        return;
    };
    let Some(next) = app.cursor.next_from(current).cloned() else {
        return;
    };
    start_track(app, session, next, true);
}

/// Go back to the track before the current one, wrapping at the start.
pub fn play_prev(app: &mut App, session: &mut PlaybackSession) {
    let Some(current) = app.cursor.current_id() else {
        return;
    };
    let Some(prev) = app.cursor.prev_from(current).cloned() else {
        return;
    };
    start_track(app, session, prev, true);
}

fn start_track(app: &mut App, session: &mut PlaybackSession, track: Track, autoplay: bool) {
    app.cursor.set_current(track.id, &mut app.recently);
    app.set_now_playing(Some(track.clone()));
    app.screen = Screen::Player;

    match session.load(&track) {
        Ok(()) => {
            if autoplay {
                session.play();
            }
        }
        Err(e) => {
            tracing::error!("failed to start {}: {e}", track.source.display());
        }
    }
}

pub fn toggle_play(session: &mut PlaybackSession) {
    if !session.is_bound() {
        return;
    }
    if session.is_playing() {
        session.pause();
    } else {
        session.play();
    }
}

pub fn resume(session: &mut PlaybackSession) {
    session.play();
}

pub fn pause(session: &mut PlaybackSession) {
    session.pause();
}

/// Scrub relative to the last published position. `offset_micros` follows
/// the MPRIS convention and may be negative.
pub fn seek_by(app: &App, session: &mut PlaybackSession, offset_micros: i64) {
    let position = app.status.position;
    let target = if offset_micros >= 0 {
        position.saturating_add(Duration::from_micros(offset_micros as u64))
    } else {
        position.saturating_sub(Duration::from_micros(offset_micros.unsigned_abs()))
    };
    seek_to(session, target);
}

pub fn seek_to(session: &mut PlaybackSession, position: Duration) {
    if let Err(e) = session.seek(position) {
        tracing::warn!("seek failed: {e}");
    }
}

/// Release the engine and clear the now-playing intent.
pub fn stop_playback(app: &mut App, session: &mut PlaybackSession) {
    session.release();
    app.set_now_playing(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::Playlist;
    use std::path::PathBuf;

    fn track(id: u32, title: &str) -> Track {
        Track {
            id,
            title: title.into(),
            artist: None,
            source: PathBuf::from(format!("/nonexistent/rondo-test/{title}.mp3")),
            artwork: None,
            duration: None,
            display: title.into(),
        }
    }

    fn app_with_open_playlist() -> App {
        let mut app = App::new(vec![Playlist {
            id: 1,
            name: "Test".into(),
            tracks: vec![track(1, "A"), track(2, "B"), track(3, "C")],
        }]);
        app.open_selected_playlist();
        app
    }

    #[test]
    fn play_selected_advances_intent_even_when_the_engine_fails() {
        let mut app = app_with_open_playlist();
        let mut session = PlaybackSession::new();
        app.selected_track = 1;

        play_selected(&mut app, &mut session, true);

        // Sources do not exist, so the load failed and the session stayed
        // unbound; intent state still moved to the picked track.
        assert_eq!(app.screen, Screen::Player);
        assert_eq!(app.now_playing.as_ref().map(|t| t.id), Some(2));
        assert_eq!(app.cursor.current_id(), Some(2));
        assert_eq!(app.recently.len(), 1);
        assert!(!session.is_bound());
        assert!(!session.is_playing());
    }

    #[test]
    fn play_next_wraps_and_records_history() {
        let mut app = app_with_open_playlist();
        let mut session = PlaybackSession::new();
        app.cursor.set_current(3, &mut app.recently);

        play_next(&mut app, &mut session);

        assert_eq!(app.cursor.current_id(), Some(1));
        assert_eq!(app.screen, Screen::Player);
        let ids: Vec<u32> = app.recently.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn play_prev_wraps_from_the_first_track() {
        let mut app = app_with_open_playlist();
        let mut session = PlaybackSession::new();
        app.cursor.set_current(1, &mut app.recently);

        play_prev(&mut app, &mut session);

        assert_eq!(app.cursor.current_id(), Some(3));
    }

    #[test]
    fn next_and_prev_need_a_current_track() {
        let mut app = app_with_open_playlist();
        let mut session = PlaybackSession::new();

        play_next(&mut app, &mut session);
        play_prev(&mut app, &mut session);

        assert!(app.cursor.current_id().is_none());
        assert!(app.now_playing.is_none());
        assert_eq!(app.screen, Screen::Songs);
    }

    #[test]
    fn transport_commands_are_safe_without_an_engine() {
        let mut app = app_with_open_playlist();
        let mut session = PlaybackSession::new();

        toggle_play(&mut session);
        resume(&mut session);
        pause(&mut session);
        seek_by(&app, &mut session, -5_000_000);
        seek_to(&mut session, Duration::from_secs(10));
        stop_playback(&mut app, &mut session);

        assert!(app.now_playing.is_none());
        assert!(!session.is_bound());
    }

    #[test]
    fn stop_clears_now_playing_but_keeps_the_cursor() {
        let mut app = app_with_open_playlist();
        let mut session = PlaybackSession::new();
        play_selected(&mut app, &mut session, true);

        stop_playback(&mut app, &mut session);

        assert!(app.now_playing.is_none());
        assert_eq!(app.cursor.current_id(), Some(1));
    }
}
