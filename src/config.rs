//! Configuration loader and schema types.
//!
//! The schema covers the library scan, UI layout, controls and playback
//! defaults; loading merges the config file, environment overrides and
//! struct defaults.

mod load;
mod schema;

pub use schema::*;
