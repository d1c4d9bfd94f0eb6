use std::time::Duration;

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error::Result,
    info,
    lastfm::Scrobbler,
    management::{BatchPlanner, BatchSubmitter},
    success,
    types::{BatchReport, ChunkStatus, ChunkTableRow},
    utils, warning,
};

/// What the user asked for in one round of the prompt loop or one
/// `scrobble` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub artist: String,
    pub title: String,
    pub count: u32,
    pub start_time: Option<DateTime<Utc>>,
}

/// One-shot `scrobble` command.
pub async fn scrobble(
    scrobbler: &mut Scrobbler,
    artist: String,
    title: String,
    count: u32,
    days_ago: Option<u32>,
) -> Result<BatchReport> {
    scrobbler.ensure_authenticated().await?;

    let request = BatchRequest {
        artist,
        title,
        count: utils::clamp_count(count as i64),
        start_time: days_ago
            .map(|days| utils::backdate(Utc::now(), days))
            .transpose()?,
    };

    Ok(execute_batch(scrobbler, &request, Duration::from_secs(1)).await)
}

/// Runs one batch with a progress bar and prints the per-chunk outcome.
pub async fn execute_batch<S: BatchSubmitter + ?Sized>(
    submitter: &mut S,
    request: &BatchRequest,
    pause: Duration,
) -> BatchReport {
    info!("Scrobbling {} times...", request.count);

    let pb = ProgressBar::new(request.count as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.blue}] {pos}/{len} scrobbles")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let planner = BatchPlanner::new().with_pause(pause).with_progress(pb.clone());
    let report = planner
        .run(
            submitter,
            &request.artist,
            &request.title,
            request.count as usize,
            request.start_time,
        )
        .await;
    pb.finish_and_clear();

    print_report(&report);
    report
}

fn print_report(report: &BatchReport) {
    let rows: Vec<ChunkTableRow> = report
        .chunks
        .iter()
        .map(|chunk| {
            let (accepted, ignored, status) = match &chunk.status {
                ChunkStatus::Submitted(counts) => (
                    counts.accepted.to_string(),
                    counts.ignored.to_string(),
                    "ok".to_string(),
                ),
                ChunkStatus::Failed(e) => ("-".to_string(), "-".to_string(), e.clone()),
            };
            ChunkTableRow {
                chunk: chunk.index + 1,
                size: chunk.size,
                from: utils::format_timestamp(chunk.first_timestamp),
                to: utils::format_timestamp(chunk.last_timestamp),
                accepted,
                ignored,
                status,
            }
        })
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }

    let failed = report.failed_chunks();
    if failed > 0 {
        warning!(
            "{} of {} batches failed, their scrobbles were dropped.",
            failed,
            report.chunks.len()
        );
    }
    if report.ignored > 0 {
        warning!("{} scrobbles were ignored by Last.fm.", report.ignored);
    }

    success!("Successfully scrobbled {} times!", report.accepted);
}
