use super::history::RecentlyPlayed;
use super::model::{Playlist, Track};

/// Cursor over one playlist's tracks: tracks the current entry and computes
/// wrap-around next/previous positions.
#[derive(Debug, Default)]
pub struct PlaylistCursor {
    tracks: Vec<Track>,
    current: Option<u32>,
}

impl PlaylistCursor {
    /// Build a cursor over a snapshot of `playlist`'s tracks. The current
    /// track starts unset.
    pub fn new(playlist: &Playlist) -> Self {
        Self {
            tracks: playlist.tracks.clone(),
            current: None,
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_id(&self) -> Option<u32> {
        self.current
    }

    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// The track after `id`, wrapping past the end. Returns `None` on an
    /// empty cursor; an unknown id resolves to the first track.
    pub fn next_from(&self, id: u32) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        match self.position_of(id) {
            Some(p) => self.tracks.get((p + 1) % self.tracks.len()),
            None => self.tracks.first(),
        }
    }

    /// The track before `id`, wrapping past the start. Returns `None` on an
    /// empty cursor; an unknown id resolves to the last track.
    pub fn prev_from(&self, id: u32) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let len = self.tracks.len();
        match self.position_of(id) {
            Some(p) => self.tracks.get((p + len - 1) % len),
            None => self.tracks.last(),
        }
    }

    /// Make `id` the current track and push it onto the shared history.
    /// Returns the track, or `None` when the id is not in this cursor (the
    /// history is left untouched in that case).
    pub fn set_current(&mut self, id: u32, history: &mut RecentlyPlayed) -> Option<&Track> {
        let pos = self.position_of(id)?;
        self.current = Some(id);
        history.push(&self.tracks[pos]);
        Some(&self.tracks[pos])
    }
}
