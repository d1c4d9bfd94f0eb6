use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use tokio::time::sleep;

use crate::{
    error::Result,
    types::{BatchReport, ChunkOutcome, ChunkStatus, ScrobbleCounts, ScrobbleEvent, SubmissionResult},
    utils,
};

/// Anything that can send one chunk of scrobbles in a single request.
#[async_trait]
pub trait BatchSubmitter: Send {
    async fn submit_batch(&mut self, events: &[ScrobbleEvent]) -> Result<SubmissionResult>;
}

/// Synthesizes a play history for one track and submits it in chunks.
///
/// Plays are spaced [`utils::TRACK_DURATION_SECS`] apart and end at the start
/// time. Chunks are sent one after another with a fixed pause in between; a
/// failed chunk is logged and skipped, never retried.
pub struct BatchPlanner {
    chunk_size: usize,
    spacing: i64,
    pause: Duration,
    progress: Option<ProgressBar>,
}

impl Default for BatchPlanner {
    fn default() -> Self {
        Self {
            chunk_size: utils::MAX_BATCH_SIZE,
            spacing: utils::TRACK_DURATION_SECS,
            pause: Duration::from_secs(1),
            progress: None,
        }
    }
}

impl BatchPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk size, capped to the API limit of 50.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.clamp(1, utils::MAX_BATCH_SIZE);
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Advances `progress` by the size of each chunk as it completes.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Builds `count` plays of the track in ascending time order, the last one
    /// at `start_time` (or now).
    pub fn plan(
        &self,
        artist: &str,
        title: &str,
        count: usize,
        start_time: Option<DateTime<Utc>>,
    ) -> Vec<ScrobbleEvent> {
        let base = start_time.unwrap_or_else(Utc::now).timestamp();
        let timestamps = utils::plan_timestamps(base, count, self.spacing);
        utils::build_events(artist, title, &timestamps)
    }

    /// Runs a batch and returns the total number of accepted scrobbles.
    pub async fn run_batch<S: BatchSubmitter + ?Sized>(
        &self,
        submitter: &mut S,
        artist: &str,
        title: &str,
        count: usize,
        start_time: Option<DateTime<Utc>>,
    ) -> u32 {
        self.run(submitter, artist, title, count, start_time)
            .await
            .accepted
    }

    /// Runs a batch and reports the outcome of every chunk.
    pub async fn run<S: BatchSubmitter + ?Sized>(
        &self,
        submitter: &mut S,
        artist: &str,
        title: &str,
        count: usize,
        start_time: Option<DateTime<Utc>>,
    ) -> BatchReport {
        let events = self.plan(artist, title, count, start_time);
        let mut report = BatchReport {
            requested: events.len(),
            ..Default::default()
        };

        let chunks: Vec<&[ScrobbleEvent]> = events.chunks(self.chunk_size).collect();
        let last = chunks.len().saturating_sub(1);

        for (index, chunk) in chunks.into_iter().enumerate() {
            let status = match submitter.submit_batch(chunk).await {
                Ok(result) => {
                    let counts = utils::scrobble_counts(&result).unwrap_or_else(|| {
                        log::warn!(
                            "Batch {} response has no accepted count, counting it as 0",
                            index + 1
                        );
                        ScrobbleCounts::default()
                    });
                    report.accepted = report.accepted.saturating_add(counts.accepted);
                    report.ignored = report.ignored.saturating_add(counts.ignored);
                    log::info!("Scrobbled {}/{} tracks", report.accepted, report.requested);
                    ChunkStatus::Submitted(counts)
                }
                Err(e) => {
                    log::error!("Batch {} failed: {e}", index + 1);
                    ChunkStatus::Failed(e.to_string())
                }
            };

            report.chunks.push(ChunkOutcome {
                index,
                size: chunk.len(),
                first_timestamp: chunk.first().map_or(0, |e| e.timestamp),
                last_timestamp: chunk.last().map_or(0, |e| e.timestamp),
                status,
            });

            if let Some(pb) = &self.progress {
                pb.inc(chunk.len() as u64);
            }

            if index < last && !self.pause.is_zero() {
                sleep(self.pause).await;
            }
        }

        report
    }
}
