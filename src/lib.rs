//! Transcript Collector - Core Library
//!
//! Downloads the video list of a YouTube channel, retrieves per-video
//! caption tracks, and aggregates the resulting text into combined output
//! files. Driven by an interactive menu; see `menu::run`.

pub mod core;
pub mod menu;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    aggregator::TranscriptAggregator,
    channel::{ChannelLister, VideoListingApi, YoutubeDataApi},
    config::AppConfig,
    links::{extract_video_id, read_links, write_links},
    models::{AppError, AppResult, CaptionSegment, FetchReport, TranscriptRecord, VideoRef},
    transcript::{CaptionSource, InnertubeCaptionSource, TranscriptFetcher},
};

pub use crate::utils::sanitize::sanitize_filename;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
