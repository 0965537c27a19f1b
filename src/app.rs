//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the loaded playlists,
//! the current screen, selections and playback state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
