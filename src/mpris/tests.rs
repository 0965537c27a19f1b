use super::*;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

fn make_track() -> Track {
    Track {
        id: 7,
        title: "Test Title".to_string(),
        artist: Some("Test Artist".to_string()),
        source: PathBuf::from("/tmp/music/test.mp3"),
        artwork: None,
        duration: Some(Duration::from_micros(1_234_567)),
        display: "Test Artist - Test Title".to_string(),
    }
}

fn make_handle() -> (MprisHandle, Arc<Mutex<SharedState>>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    // The notify receiver is dropped; handles ignore send failures.
    let (notify_tx, _) = mpsc::channel::<()>();
    (
        MprisHandle {
            state: state.clone(),
            notify: notify_tx,
        },
        state,
    )
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let (handle, state) = make_handle();

    let track = make_track();
    handle.set_track_metadata(Some(7), Some(&track));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.artist, vec!["Test Artist".to_string()]);
        assert!(s.url.as_deref().unwrap().contains("/tmp/music/test.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_track_metadata(None, None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn set_position_updates_the_shared_micros() {
    let (handle, state) = make_handle();
    handle.set_position(Duration::from_millis(1500));
    assert_eq!(state.lock().unwrap().position_micros, 1_500_000);
}

#[test]
fn playback_status_maps_state_to_spec_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");
    state.lock().unwrap().playback = MprisPlayback::Playing;
    assert_eq!(iface.playback_status(), "Playing");
    state.lock().unwrap().playback = MprisPlayback::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn position_property_reflects_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.position(), 0);
    state.lock().unwrap().position_micros = 42;
    assert_eq!(iface.position(), 42);
}

#[test]
fn player_methods_dispatch_control_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play_pause();
    iface.next();
    iface.previous();
    iface.seek(-5_000_000);
    let track_id = ObjectPath::try_from("/org/mpris/MediaPlayer2/track/1").unwrap();
    iface.set_position(track_id, 30_000_000);
    iface.stop();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::SeekBy(-5_000_000),
            ControlCmd::SeekTo(30_000_000),
            ControlCmd::Stop,
        ]
    );
}

#[test]
fn metadata_map_carries_track_fields() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, _notify_rx) = mpsc::channel::<()>();
    let handle = MprisHandle {
        state: state.clone(),
        notify: notify_tx,
    };
    handle.set_track_metadata(Some(7), Some(&make_track()));

    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };
    let map = iface.metadata();

    assert!(map.contains_key("mpris:trackid"));
    assert!(map.contains_key("mpris:length"));
    assert!(map.contains_key("xesam:title"));
    assert!(map.contains_key("xesam:artist"));
    assert!(map.contains_key("xesam:url"));
}
