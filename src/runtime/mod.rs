use std::env;
use std::path::Path;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::library::scan_playlists;
use crate::mpris::ControlCmd;
use crate::playback::PlaybackSession;

mod commands;
mod event_loop;
mod logging;
mod settings;
mod status_sync;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let settings = settings::load_settings();

    let root = env::args()
        .nth(1)
        .or_else(|| settings.library.root.clone())
        .unwrap_or_else(|| {
            std::env::current_dir()
                .ok()
                .and_then(|p| p.to_str().map(|s| s.to_string()))
                .unwrap_or_else(|| "Music".to_string())
        });

    let playlists = scan_playlists(Path::new(&root), &settings.library);
    tracing::info!("scanned {} playlists under {root}", playlists.len());

    let mut session = PlaybackSession::new();
    let mut app = App::new(playlists);
    app.set_library_root(root);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    status_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut session,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        )
    })();

    // The session is unbound on the quit path already; make sure the engine
    // is gone even when the loop exits with an error.
    session.release();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
