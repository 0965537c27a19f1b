//! Helper for binding a source file to a fresh `rodio` sink.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::PlaybackError;

/// Decode `path` and append it to a new paused `Sink` on `stream`.
///
/// Returns the sink together with the decoder-reported total duration, when
/// the container exposes one.
pub(super) fn create_sink(
    stream: &OutputStream,
    path: &Path,
) -> Result<(Sink, Option<Duration>), PlaybackError> {
    let file = File::open(path).map_err(|source| PlaybackError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder =
        Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.append(decoder);
    sink.pause();
    Ok((sink, total))
}
