use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Screen};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle, MprisPlayback};
use crate::playback::{PlaybackSession, Poller};
use crate::runtime::commands;
use crate::runtime::status_sync::{mpris_playback, update_mpris};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Telemetry poll, active while the player page is open.
    pub poller: Poller,
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last now-playing source as emitted to MPRIS.
    pub last_mpris_track: Option<PathBuf>,
    /// Last playback state as emitted to MPRIS.
    pub last_mpris_playback: MprisPlayback,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            poller: Poller::default(),
            pending_gg: false,
            last_mpris_track: None,
            last_mpris_playback: MprisPlayback::Stopped,
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, telemetry
/// republication and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &mut PlaybackSession,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // The poll runs exactly as long as the player page is open; the
        // transition is observed here, at the iteration boundary.
        match (app.screen, state.poller.is_polling()) {
            (Screen::Player, false) => state.poller.start(),
            (Screen::Playlists | Screen::Songs, true) => state.poller.stop(),
            _ => {}
        }

        // Republish engine telemetry; the poller is the only writer of
        // `app.status`.
        state.poller.tick(session, &mut app.status);

        sync_mpris(mpris, app, state);

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, session, state) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, session, control_tx, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn sync_mpris(mpris: &MprisHandle, app: &App, state: &mut EventLoopState) {
    mpris.set_position(app.status.position);

    let track = app.now_playing.as_ref().map(|t| t.source.clone());
    let playback = mpris_playback(app);
    if track != state.last_mpris_track || playback != state.last_mpris_playback {
        update_mpris(mpris, app);
        state.last_mpris_track = track;
        state.last_mpris_playback = playback;
    }
}

fn shutdown(app: &mut App, session: &mut PlaybackSession, state: &mut EventLoopState) {
    state.poller.stop();
    commands::stop_playback(app, session);
}

/// Handle one MPRIS control command; returns `true` on quit.
fn handle_control_cmd(
    cmd: ControlCmd,
    app: &mut App,
    session: &mut PlaybackSession,
    state: &mut EventLoopState,
) -> bool {
    match cmd {
        ControlCmd::Quit => {
            shutdown(app, session, state);
            return true;
        }
        ControlCmd::Play => commands::resume(session),
        ControlCmd::Pause => commands::pause(session),
        ControlCmd::PlayPause => commands::toggle_play(session),
        ControlCmd::Stop => commands::stop_playback(app, session),
        ControlCmd::Next => commands::play_next(app, session),
        ControlCmd::Prev => commands::play_prev(app, session),
        ControlCmd::SeekBy(offset) => commands::seek_by(app, session, offset),
        ControlCmd::SeekTo(micros) => {
            commands::seek_to(session, Duration::from_micros(micros.max(0) as u64));
        }
    }

    false
}

/// Handle one key press; returns `true` on quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &mut PlaybackSession,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            shutdown(app, session, state);
            return true;
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Esc | KeyCode::Backspace => {
            state.pending_gg = false;
            app.back();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            match app.screen {
                Screen::Playlists => app.select_next_playlist(),
                Screen::Songs => app.select_next_track(),
                Screen::Player => {}
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            match app.screen {
                Screen::Playlists => app.select_prev_playlist(),
                Screen::Songs => app.select_prev_track(),
                Screen::Player => {}
            }
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                match app.screen {
                    Screen::Playlists => app.select_first_playlist(),
                    Screen::Songs => app.select_first_track(),
                    Screen::Player => {}
                }
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            match app.screen {
                Screen::Playlists => app.select_last_playlist(),
                Screen::Songs => app.select_last_track(),
                Screen::Player => {}
            }
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            match app.screen {
                Screen::Playlists => {
                    if app.has_playlists() {
                        app.open_selected_playlist();
                    }
                }
                Screen::Songs | Screen::Player => {
                    commands::play_selected(app, session, settings.playback.autoplay);
                }
            }
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            match app.screen {
                Screen::Playlists => {
                    if app.has_playlists() {
                        app.open_selected_playlist();
                    }
                }
                Screen::Songs => {}
                Screen::Player => {
                    let _ = control_tx.send(ControlCmd::Next);
                }
            }
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            match app.screen {
                Screen::Player => {
                    let _ = control_tx.send(ControlCmd::Prev);
                }
                Screen::Songs => {
                    app.back();
                }
                Screen::Playlists => {}
            }
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            if app.screen == Screen::Player {
                let micros = settings.controls.seek_seconds.saturating_mul(1_000_000);
                let _ = control_tx.send(ControlCmd::SeekBy(micros.min(i64::MAX as u64) as i64));
            }
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            if app.screen == Screen::Player {
                let micros = settings.controls.seek_seconds.saturating_mul(1_000_000);
                let _ = control_tx.send(ControlCmd::SeekBy(-(micros.min(i64::MAX as u64) as i64)));
            }
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}
