//! Core business logic module
//!
//! Channel listing, link persistence, transcript fetching and aggregation.

pub mod aggregator;
pub mod channel;
pub mod config;
pub mod links;
pub mod models;
pub mod transcript;



// Re-export commonly used types
pub use aggregator::TranscriptAggregator;
pub use channel::{ChannelLister, YoutubeDataApi};
pub use config::AppConfig;
pub use transcript::{InnertubeCaptionSource, TranscriptFetcher};
