use super::*;
use crate::playlist::{Playlist, Track};
use std::path::PathBuf;

fn t(id: u32, title: &str) -> Track {
    Track {
        id,
        title: title.into(),
        artist: None,
        source: PathBuf::from(format!("/music/{title}.mp3")),
        artwork: None,
        duration: None,
        display: title.into(),
    }
}

fn p(id: u32, name: &str, titles: &[&str]) -> Playlist {
    Playlist {
        id,
        name: name.into(),
        tracks: titles
            .iter()
            .enumerate()
            .map(|(i, title)| t(i as u32 + 1, title))
            .collect(),
    }
}

fn sample_app() -> App {
    App::new(vec![
        p(1, "Favorites", &["Alpha", "Beta", "Gamma"]),
        p(2, "Road Trip", &["Delta"]),
    ])
}

#[test]
fn starts_on_the_playlists_screen() {
    let app = sample_app();
    assert_eq!(app.screen, Screen::Playlists);
    assert!(app.now_playing.is_none());
    assert!(app.cursor.is_empty());
}

#[test]
fn opening_a_playlist_snapshots_its_tracks() {
    let mut app = sample_app();
    app.open_selected_playlist();

    assert_eq!(app.screen, Screen::Songs);
    assert_eq!(app.cursor.len(), 3);
    assert_eq!(app.selected_track, 0);
}

#[test]
fn back_walks_up_one_screen_at_a_time() {
    let mut app = sample_app();
    app.open_selected_playlist();
    app.screen = Screen::Player;

    assert_eq!(app.back(), Screen::Player);
    assert_eq!(app.screen, Screen::Songs);
    assert_eq!(app.back(), Screen::Songs);
    assert_eq!(app.screen, Screen::Playlists);
    assert_eq!(app.back(), Screen::Playlists);
    assert_eq!(app.screen, Screen::Playlists);
}

#[test]
fn playlist_selection_wraps_both_ways() {
    let mut app = sample_app();

    app.select_next_playlist();
    assert_eq!(app.selected_playlist, 1);
    app.select_next_playlist();
    assert_eq!(app.selected_playlist, 0);
    app.select_prev_playlist();
    assert_eq!(app.selected_playlist, 1);
}

#[test]
fn track_selection_wraps_both_ways() {
    let mut app = sample_app();
    app.open_selected_playlist();

    app.select_prev_track();
    assert_eq!(app.selected_track, 2);
    app.select_next_track();
    assert_eq!(app.selected_track, 0);
}

#[test]
fn selection_is_a_noop_without_entries() {
    let mut app = App::new(Vec::new());
    app.select_next_playlist();
    app.select_prev_playlist();
    app.select_next_track();
    app.select_prev_track();
    assert_eq!(app.selected_playlist, 0);
    assert_eq!(app.selected_track, 0);
}

#[test]
fn first_last_selection_helpers() {
    let mut app = sample_app();
    app.select_last_playlist();
    assert_eq!(app.selected_playlist, 1);
    app.select_first_playlist();
    assert_eq!(app.selected_playlist, 0);

    app.open_selected_playlist();
    app.select_last_track();
    assert_eq!(app.selected_track, 2);
    app.select_first_track();
    assert_eq!(app.selected_track, 0);
}

#[test]
fn set_now_playing_aligns_the_songs_selection() {
    let mut app = sample_app();
    app.open_selected_playlist();

    let beta = app.cursor.track_at(1).cloned().unwrap();
    app.set_now_playing(Some(beta));

    assert_eq!(app.selected_track, 1);
    assert_eq!(app.now_playing.as_ref().map(|t| t.id), Some(2));
}

#[test]
fn playing_position_is_one_based() {
    let mut app = sample_app();
    app.open_selected_playlist();
    assert_eq!(app.playing_position(), None);

    let gamma = app.cursor.track_at(2).cloned().unwrap();
    app.set_now_playing(Some(gamma));
    assert_eq!(app.playing_position(), Some((3, 3)));
}

#[test]
fn history_survives_switching_playlists() {
    let mut app = sample_app();
    app.open_selected_playlist();
    let alpha_id = app.cursor.track_at(0).unwrap().id;
    app.cursor.set_current(alpha_id, &mut app.recently);

    app.back();
    app.select_next_playlist();
    app.open_selected_playlist();

    assert_eq!(app.recently.len(), 1);
    assert!(app.cursor.current_id().is_none());
}
