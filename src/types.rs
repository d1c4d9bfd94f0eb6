use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Parsed JSON body of an API call, returned to callers unchanged.
pub type SubmissionResult = serde_json::Value;

/// One play of a track at a given unix timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrobbleEvent {
    pub artist: String,
    pub track: String,
    pub timestamp: i64,
}

impl ScrobbleEvent {
    pub fn new(artist: impl Into<String>, track: impl Into<String>, timestamp: i64) -> Self {
        Self {
            artist: artist.into(),
            track: track.into(),
            timestamp,
        }
    }
}

/// On-disk shape of the credential file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub session_key: String,
}

/// Accepted and ignored counts reported by `track.scrobble`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrobbleCounts {
    pub accepted: u32,
    pub ignored: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkStatus {
    Submitted(ScrobbleCounts),
    Failed(String),
}

/// Result of submitting a single chunk of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOutcome {
    pub index: usize,
    pub size: usize,
    pub first_timestamp: i64,
    pub last_timestamp: i64,
    pub status: ChunkStatus,
}

impl ChunkOutcome {
    pub fn accepted(&self) -> u32 {
        match &self.status {
            ChunkStatus::Submitted(counts) => counts.accepted,
            ChunkStatus::Failed(_) => 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, ChunkStatus::Failed(_))
    }
}

/// Summary of a whole batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub requested: usize,
    pub accepted: u32,
    pub ignored: u32,
    pub chunks: Vec<ChunkOutcome>,
}

impl BatchReport {
    pub fn failed_chunks(&self) -> usize {
        self.chunks.iter().filter(|c| c.is_failed()).count()
    }
}

#[derive(Tabled)]
pub struct ChunkTableRow {
    pub chunk: usize,
    pub size: usize,
    pub from: String,
    pub to: String,
    pub accepted: String,
    pub ignored: String,
    pub status: String,
}
