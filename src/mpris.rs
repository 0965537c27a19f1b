//! MPRIS (org.mpris.MediaPlayer2) integration over D-Bus.
//!
//! Exposes the player to desktop media controls: metadata and playback
//! status flow out through a shared state block, commands come back over a
//! channel the runtime drains each iteration.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_io::block_on;
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::playlist::Track;

#[cfg(test)]
mod tests;

/// Commands a media controller can issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
    /// Relative seek, microseconds (MPRIS convention; may be negative).
    SeekBy(i64),
    /// Absolute seek, microseconds.
    SeekTo(i64),
}

/// Playback state as MPRIS models it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MprisPlayback {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: MprisPlayback,
    position_micros: i64,
    title: Option<String>,
    artist: Vec<String>,
    url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<OwnedObjectPath>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
    notify: Sender<()>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: MprisPlayback) {
        let changed = match self.state.lock() {
            Ok(mut s) => {
                let changed = s.playback != playback;
                s.playback = playback;
                changed
            }
            Err(_) => false,
        };
        if changed {
            let _ = self.notify.send(());
        }
    }

    /// Publish the now-playing track (or clear it with `None`).
    pub fn set_track_metadata(&self, track_id: Option<u32>, track: Option<&Track>) {
        if let Ok(mut s) = self.state.lock() {
            s.title = track.map(|t| t.title.clone());
            s.artist = track
                .and_then(|t| t.artist.clone())
                .map(|a| vec![a])
                .unwrap_or_default();
            s.url = track.map(|t| format!("file://{}", t.source.display()));
            s.length_micros = track
                .and_then(|t| t.duration)
                .map(|d| d.as_micros() as i64);
            s.track_id = track_id.and_then(|id| {
                ObjectPath::try_from(format!("/org/mpris/MediaPlayer2/track/{id}"))
                    .ok()
                    .map(Into::into)
            });
        }
        let _ = self.notify.send(());
    }

    /// Position updates are frequent and MPRIS does not signal them, so
    /// this only refreshes the shared value.
    pub fn set_position(&self, position: Duration) {
        if let Ok(mut s) = self.state.lock() {
            s.position_micros = position.as_micros() as i64;
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "rondo"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    fn seek(&self, offset: i64) {
        let _ = self.tx.send(ControlCmd::SeekBy(offset));
    }

    fn set_position(&self, _track_id: ObjectPath<'_>, position: i64) {
        let _ = self.tx.send(ControlCmd::SeekTo(position));
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            MprisPlayback::Stopped => "Stopped",
            MprisPlayback::Playing => "Playing",
            MprisPlayback::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn position(&self) -> i64 {
        self.state.lock().map(|s| s.position_micros).unwrap_or(0)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(id) = &s.track_id {
            if let Ok(v) = OwnedValue::try_from(Value::from(id.clone().into_inner())) {
                map.insert("mpris:trackid".to_string(), v);
            }
        }
        if let Some(len) = s.length_micros {
            if let Ok(v) = OwnedValue::try_from(Value::from(len)) {
                map.insert("mpris:length".to_string(), v);
            }
        }
        if let Some(title) = &s.title {
            if let Ok(v) = OwnedValue::try_from(Value::from(title.clone())) {
                map.insert("xesam:title".to_string(), v);
            }
        }
        if !s.artist.is_empty() {
            if let Ok(v) = OwnedValue::try_from(Value::from(s.artist.clone())) {
                map.insert("xesam:artist".to_string(), v);
            }
        }
        if let Some(url) = &s.url {
            if let Ok(v) = OwnedValue::try_from(Value::from(url.clone())) {
                map.insert("xesam:url".to_string(), v);
            }
        }
        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = channel::<()>();

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        serve(tx, state_for_thread, notify_rx);
    });

    MprisHandle {
        state,
        notify: notify_tx,
    }
}

fn serve(tx: Sender<ControlCmd>, state: Arc<Mutex<SharedState>>, notify_rx: Receiver<()>) {
    let path = "/org/mpris/MediaPlayer2";

    let setup = block_on(async {
        let connection = match Connection::session().await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("mpris: failed to connect to session bus: {e}");
                return None;
            }
        };

        if let Err(e) = connection.request_name("org.mpris.MediaPlayer2.rondo").await {
            tracing::warn!("mpris: failed to acquire name: {e}");
            return None;
        }

        let object_server = connection.object_server();

        if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
            tracing::warn!("mpris: failed to register root iface: {e}");
            return None;
        }

        if let Err(e) = object_server
            .at(
                path,
                PlayerIface {
                    tx,
                    state: state.clone(),
                },
            )
            .await
        {
            tracing::warn!("mpris: failed to register player iface: {e}");
            return None;
        }

        match object_server.interface::<_, PlayerIface>(path).await {
            Ok(iface_ref) => Some((connection, iface_ref)),
            Err(e) => {
                tracing::warn!("mpris: failed to look up player iface: {e}");
                None
            }
        }
    });

    let Some((_connection, iface_ref)) = setup else {
        return;
    };

    // Forward state changes to the bus as PropertiesChanged signals. The
    // handle side nudges us through `notify`; position changes are polled by
    // clients and need no signal.
    loop {
        match notify_rx.recv_timeout(Duration::from_secs(1)) {
            Ok(()) => {
                // Coalesce a burst of updates into one emission.
                while notify_rx.try_recv().is_ok() {}
                block_on(async {
                    let iface = iface_ref.get().await;
                    let _ = iface.playback_status_changed(iface_ref.signal_emitter()).await;
                    let _ = iface.metadata_changed(iface_ref.signal_emitter()).await;
                });
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
