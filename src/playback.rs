//! Playback subsystem: the session wrapping the audio engine, the published
//! status snapshot and the telemetry poll.

mod poller;
mod session;
mod sink;
mod types;

pub use poller::*;
pub use session::*;
pub use types::*;

#[cfg(test)]
mod tests;
