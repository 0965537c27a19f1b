use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::playlist::Track;

use super::sink::create_sink;
use super::types::PlaybackError;

/// Engine resource state: either no engine is held at all, or a stream and
/// sink are bound to one source.
enum EngineState {
    Unbound,
    Bound(BoundEngine),
}

struct BoundEngine {
    // The stream must outlive the sink; dropping it tears the output down.
    _stream: OutputStream,
    sink: Sink,
    duration: Duration,
}

/// Command/telemetry wrapper around the audio engine.
///
/// `load` is the bind transition and `release` the unbind transition; every
/// other method is a no-op while unbound. The engine (output stream, decoder,
/// sink) is constructed lazily on each `load`, so a released session costs
/// nothing and a fresh `load` always starts from a clean engine.
pub struct PlaybackSession {
    engine: EngineState,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self {
            engine: EngineState::Unbound,
        }
    }

    /// Bind `track`'s source and prepare it for playback. Decoding starts
    /// here; playback does not until `play` is called. Replaces any
    /// previously bound source. On error the session is left unbound.
    pub fn load(&mut self, track: &Track) -> Result<(), PlaybackError> {
        self.release();

        let stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let (sink, total) = create_sink(&stream, &track.source)?;
        let duration = total.or(track.duration).unwrap_or(Duration::ZERO);

        self.engine = EngineState::Bound(BoundEngine {
            _stream: stream,
            sink,
            duration,
        });
        Ok(())
    }

    pub fn play(&mut self) {
        if let EngineState::Bound(e) = &self.engine {
            e.sink.play();
        }
    }

    pub fn pause(&mut self) {
        if let EngineState::Bound(e) = &self.engine {
            e.sink.pause();
        }
    }

    /// Hand `position` to the engine unchanged; the engine decides how to
    /// clamp or reject it. A no-op while unbound.
    pub fn seek(&mut self, position: Duration) -> Result<(), PlaybackError> {
        if let EngineState::Bound(e) = &self.engine {
            e.sink.try_seek(position)?;
        }
        Ok(())
    }

    /// Stop playback and drop the engine. Subsequent calls are no-ops until
    /// the next `load` reconstructs it.
    pub fn release(&mut self) {
        if let EngineState::Bound(e) = &self.engine {
            e.sink.stop();
        }
        self.engine = EngineState::Unbound;
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.engine, EngineState::Bound(_))
    }

    pub fn position(&self) -> Duration {
        match &self.engine {
            EngineState::Unbound => Duration::ZERO,
            EngineState::Bound(e) => {
                let pos = e.sink.get_pos();
                if e.duration > Duration::ZERO {
                    pos.min(e.duration)
                } else {
                    pos
                }
            }
        }
    }

    pub fn duration(&self) -> Duration {
        match &self.engine {
            EngineState::Unbound => Duration::ZERO,
            EngineState::Bound(e) => e.duration,
        }
    }

    pub fn is_playing(&self) -> bool {
        match &self.engine {
            EngineState::Unbound => false,
            EngineState::Bound(e) => !e.sink.is_paused() && !e.sink.empty(),
        }
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}
