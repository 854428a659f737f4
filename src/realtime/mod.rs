pub mod tail;

pub use tail::*;

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{AnnotatedUtterance, TranscriptFormat};
use crate::pipeline::{Pipeline, TranscriptAccumulator};

/// Configuration for the polling driver
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Time between polls
    pub poll_interval: Duration,
    /// Layout of the appended text
    pub format: TranscriptFormat,
    /// Stop after this many polls (None = until cancelled)
    pub max_polls: Option<usize>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            format: TranscriptFormat::Timestamped,
            max_polls: None,
        }
    }
}

/// Counters reported when the driver stops
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchSummary {
    pub polls: usize,
    pub chunks: usize,
    pub failed_chunks: usize,
    pub utterances: usize,
}

/// Poll `tailer` at a fixed interval and feed each new chunk through the pipeline
///
/// Each chunk is processed atomically and appended to `accumulator`; the new
/// rows are then handed to `on_batch` (e.g. a CSV sink). A chunk that fails
/// to parse is logged and skipped. When `max_polls` is reached the unread
/// tail of the file, including a last line without a newline, is processed
/// as a final chunk. Dropping the returned future between polls leaves
/// everything emitted so far intact; call [`flush`] afterwards to pick up
/// the unterminated tail.
pub async fn watch<F>(
    tailer: &mut FileTailer,
    pipeline: &Pipeline,
    accumulator: &mut TranscriptAccumulator,
    config: &WatchConfig,
    mut on_batch: F,
) -> Result<WatchSummary>
where
    F: FnMut(&[AnnotatedUtterance]) -> Result<()>,
{
    let mut ticker = interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut summary = WatchSummary::default();

    loop {
        if config.max_polls.is_some_and(|max| summary.polls >= max) {
            break;
        }
        ticker.tick().await;
        summary.polls += 1;

        let chunk = tailer.fetch_new_data()?;
        if chunk.trim().is_empty() {
            debug!(poll = summary.polls, "no new data");
            continue;
        }
        feed_chunk(&chunk, pipeline, accumulator, config.format, &mut summary, &mut on_batch)?;
    }

    let rest = tailer.fetch_remaining()?;
    if !rest.trim().is_empty() {
        feed_chunk(&rest, pipeline, accumulator, config.format, &mut summary, &mut on_batch)?;
    }

    Ok(summary)
}

/// Process everything left unread in `tailer`, including a last line
/// without a newline; returns the number of utterances added
pub fn flush<F>(
    tailer: &mut FileTailer,
    pipeline: &Pipeline,
    accumulator: &mut TranscriptAccumulator,
    format: TranscriptFormat,
    mut on_batch: F,
) -> Result<usize>
where
    F: FnMut(&[AnnotatedUtterance]) -> Result<()>,
{
    let rest = tailer.fetch_remaining()?;
    if rest.trim().is_empty() {
        return Ok(0);
    }
    let mut summary = WatchSummary::default();
    feed_chunk(&rest, pipeline, accumulator, format, &mut summary, &mut on_batch)?;
    Ok(summary.utterances)
}

fn feed_chunk<F>(
    chunk: &str,
    pipeline: &Pipeline,
    accumulator: &mut TranscriptAccumulator,
    format: TranscriptFormat,
    summary: &mut WatchSummary,
    on_batch: &mut F,
) -> Result<()>
where
    F: FnMut(&[AnnotatedUtterance]) -> Result<()>,
{
    let start = accumulator.len();
    match pipeline.process_chunk(chunk, format, accumulator) {
        Ok(added) => {
            summary.chunks += 1;
            summary.utterances += added;
            if added > 0 {
                info!("Processed {} new utterances ({} total)", added, accumulator.len());
                on_batch(accumulator.since(start))?;
            }
        }
        Err(e) => {
            summary.failed_chunks += 1;
            warn!("Skipping chunk of {} bytes: {}", chunk.len(), e);
        }
    }
    Ok(())
}
