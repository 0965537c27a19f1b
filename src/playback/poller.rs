use std::time::{Duration, Instant};

use super::session::PlaybackSession;
use super::types::PlaybackStatus;

/// Fixed cadence at which engine telemetry is republished.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Cooperative telemetry poll.
///
/// Idle until the player page opens, then `tick` (called every event-loop
/// iteration) republishes position/duration/is-playing off the session into
/// the shared status, at most once per [`POLL_INTERVAL`]. While polling it
/// is the only writer of the status; command handlers never touch telemetry.
/// `stop` is the explicit teardown on leaving the page, observed at the next
/// iteration boundary; the engine's own output threads are untouched.
#[derive(Debug, Default)]
pub enum Poller {
    #[default]
    Idle,
    Polling {
        /// Time of the last republish; `None` right after `start` so the
        /// first tick polls immediately.
        last: Option<Instant>,
    },
}

impl Poller {
    pub fn start(&mut self) {
        if matches!(self, Poller::Idle) {
            *self = Poller::Polling { last: None };
        }
    }

    pub fn stop(&mut self) {
        *self = Poller::Idle;
    }

    pub fn is_polling(&self) -> bool {
        matches!(self, Poller::Polling { .. })
    }

    /// Republish telemetry when polling and the cadence has elapsed.
    /// Returns whether the status was written.
    pub fn tick(&mut self, session: &PlaybackSession, status: &mut PlaybackStatus) -> bool {
        let Poller::Polling { last } = self else {
            return false;
        };
        if let Some(at) = last {
            if at.elapsed() < POLL_INTERVAL {
                return false;
            }
        }

        *status = PlaybackStatus {
            position: session.position(),
            duration: session.duration(),
            playing: session.is_playing(),
        };
        *last = Some(Instant::now());
        true
    }
}
