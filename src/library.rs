//! Music library scanning: turns a directory tree into playlists.

mod display;
mod scan;

pub use display::display_from_fields;
pub use scan::scan_playlists;
