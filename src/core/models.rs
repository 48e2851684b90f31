//! Core data models for the transcript collector

use serde::{Deserialize, Serialize};

/// Reference to a single video in a channel's uploads playlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRef {
    pub video_id: String,

    pub url: String,
}

impl VideoRef {
    /// Build a reference from a bare video id, deriving the watch URL.
    pub fn from_id(video_id: impl Into<String>) -> Self {
        let video_id = video_id.into();
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        Self { video_id, url }
    }
}

/// One page of a paginated playlist listing
#[derive(Debug, Clone, Default)]
pub struct PlaylistPage {
    pub items: Vec<VideoRef>,

    /// Continuation token for the next page, `None` on the last page.
    pub next_page_token: Option<String>,
}

/// A single timed text segment of a caption track
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionSegment {
    pub text: String,

    /// Segment start offset in seconds.
    pub start: f64,

    /// Segment duration in seconds.
    pub duration: f64,
}

/// In-memory transcript before it is persisted to disk
#[derive(Debug, Clone)]
pub struct TranscriptRecord {
    pub video_id: String,

    pub title: String,

    pub body: String,
}

/// Summary of one transcript fetch run.
///
/// Expected per-video failures are collected here as values rather than
/// aborting the batch; the caller decides how to report them.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Number of transcript files written.
    pub saved: usize,

    /// Failed video ids together with the failure message.
    pub failures: Vec<(String, String)>,
}

impl FetchReport {
    pub fn total(&self) -> usize {
        self.saved + self.failures.len()
    }
}

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("channel {0} has no uploads playlist")]
    ChannelEmpty(String),

    #[error("no caption track for video {video_id} in languages [{languages}]")]
    TranscriptUnavailable { video_id: String, languages: String },
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
