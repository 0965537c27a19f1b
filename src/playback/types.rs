//! Small shared types for the playback subsystem.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Telemetry republished by the polling loop for the UI to render.
///
/// Only the poller writes these fields; everything else takes read-only
/// snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    /// Engine-reported position within the current track.
    pub position: Duration,
    /// Total length of the current track, zero until known.
    pub duration: Duration,
    /// Whether audio is actively coming out of the engine.
    pub playing: bool,
}

/// Failures raised while driving the audio engine.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device available: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("seek failed: {0}")]
    Seek(#[from] rodio::source::SeekError),
}
