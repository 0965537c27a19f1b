use super::model::Track;

/// Upper bound on the recently-played history.
pub const RECENT_CAPACITY: usize = 10;

/// Most-recent-first history of played tracks.
///
/// A track appears at most once: replaying an entry moves it back to the
/// front instead of duplicating it. Identity is the source path, so the
/// same file reached through two playlists counts as one entry.
#[derive(Debug, Default)]
pub struct RecentlyPlayed {
    entries: Vec<Track>,
}

impl RecentlyPlayed {
    pub fn push(&mut self, track: &Track) {
        if let Some(pos) = self.entries.iter().position(|t| t.source == track.source) {
            self.entries.remove(pos);
        }
        self.entries.insert(0, track.clone());
        self.entries.truncate(RECENT_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
