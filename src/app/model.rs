//! Application model types: `App` and `Screen`.
//!
//! The `App` struct holds the loaded playlists, the page the user is on,
//! list selections and the playback state shared with the UI.

use crate::playback::PlaybackStatus;
use crate::playlist::{Playlist, PlaylistCursor, RecentlyPlayed, Track};

/// The page currently shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Playlists,
    Songs,
    Player,
}

/// The main application model.
///
/// `status` holds engine telemetry and is written only by the telemetry
/// poll; `now_playing` is intent state written only by command handlers.
pub struct App {
    pub playlists: Vec<Playlist>,
    pub screen: Screen,
    pub selected_playlist: usize,
    pub selected_track: usize,

    pub cursor: PlaylistCursor,
    pub recently: RecentlyPlayed,

    pub status: PlaybackStatus,
    pub now_playing: Option<Track>,

    pub library_root: Option<String>,
}

impl App {
    /// Create a new `App` with the provided `playlists`.
    pub fn new(playlists: Vec<Playlist>) -> Self {
        Self {
            playlists,
            screen: Screen::Playlists,
            selected_playlist: 0,
            selected_track: 0,
            cursor: PlaylistCursor::default(),
            recently: RecentlyPlayed::default(),
            status: PlaybackStatus::default(),
            now_playing: None,
            library_root: None,
        }
    }

    /// Record the scanned library root in the app state.
    pub fn set_library_root(&mut self, root: String) {
        self.library_root = Some(root);
    }

    pub fn has_playlists(&self) -> bool {
        !self.playlists.is_empty()
    }

    /// The playlist the songs page was opened from (or is about to open).
    pub fn current_playlist(&self) -> Option<&Playlist> {
        self.playlists.get(self.selected_playlist)
    }

    /// The track highlighted on the songs page.
    pub fn highlighted_track(&self) -> Option<&Track> {
        self.cursor.track_at(self.selected_track)
    }

    /// Open the highlighted playlist: snapshot its tracks into a fresh
    /// cursor and show the songs page. The shared history carries over.
    pub fn open_selected_playlist(&mut self) {
        let Some(playlist) = self.playlists.get(self.selected_playlist) else {
            return;
        };
        self.cursor = PlaylistCursor::new(playlist);
        self.selected_track = 0;
        self.screen = Screen::Songs;
    }

    /// Go up one page. Returns the screen that was left.
    pub fn back(&mut self) -> Screen {
        let left = self.screen;
        self.screen = match self.screen {
            Screen::Player => Screen::Songs,
            Screen::Songs | Screen::Playlists => Screen::Playlists,
        };
        left
    }

    /// Move the playlist selection down, wrapping past the end.
    pub fn select_next_playlist(&mut self) {
        if !self.playlists.is_empty() {
            self.selected_playlist = (self.selected_playlist + 1) % self.playlists.len();
        }
    }

    /// Move the playlist selection up, wrapping past the start.
    pub fn select_prev_playlist(&mut self) {
        let len = self.playlists.len();
        if len > 0 {
            self.selected_playlist = (self.selected_playlist + len - 1) % len;
        }
    }

    /// Move the track selection down, wrapping past the end.
    pub fn select_next_track(&mut self) {
        if !self.cursor.is_empty() {
            self.selected_track = (self.selected_track + 1) % self.cursor.len();
        }
    }

    /// Move the track selection up, wrapping past the start.
    pub fn select_prev_track(&mut self) {
        let len = self.cursor.len();
        if len > 0 {
            self.selected_track = (self.selected_track + len - 1) % len;
        }
    }

    pub fn select_first_playlist(&mut self) {
        self.selected_playlist = 0;
    }

    pub fn select_last_playlist(&mut self) {
        self.selected_playlist = self.playlists.len().saturating_sub(1);
    }

    pub fn select_first_track(&mut self) {
        self.selected_track = 0;
    }

    pub fn select_last_track(&mut self) {
        self.selected_track = self.cursor.len().saturating_sub(1);
    }

    /// Record the track the command layer just started (or `None` after an
    /// explicit stop) and align the songs-page selection with it.
    pub fn set_now_playing(&mut self, track: Option<Track>) {
        if let Some(t) = &track {
            if let Some(pos) = self.cursor.position_of(t.id) {
                self.selected_track = pos;
            }
        }
        self.now_playing = track;
    }

    /// Position of the playing track within the open playlist, 1-based,
    /// together with the playlist length ("Song X of N").
    pub fn playing_position(&self) -> Option<(usize, usize)> {
        let playing = self.now_playing.as_ref()?;
        let pos = self.cursor.position_of(playing.id)?;
        Some((pos + 1, self.cursor.len()))
    }
}
