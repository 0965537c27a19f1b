//! Playlist domain types: tracks, playlists, the playlist cursor and the
//! recently-played history.

mod cursor;
mod history;
mod model;

pub use cursor::*;
pub use history::*;
pub use model::*;
