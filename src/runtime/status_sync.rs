use crate::app::App;
use crate::mpris::{MprisHandle, MprisPlayback};

/// MPRIS playback state derived from intent + telemetry.
pub fn mpris_playback(app: &App) -> MprisPlayback {
    match (&app.now_playing, app.status.playing) {
        (None, _) => MprisPlayback::Stopped,
        (Some(_), true) => MprisPlayback::Playing,
        (Some(_), false) => MprisPlayback::Paused,
    }
}

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    mpris.set_track_metadata(
        app.now_playing.as_ref().map(|t| t.id),
        app.now_playing.as_ref(),
    );
    mpris.set_playback(mpris_playback(app));
}
