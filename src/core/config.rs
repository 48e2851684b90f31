//! Application configuration management
//!
//! Operator-entered values (API key, channel id, language preference) plus
//! the output paths and batching threshold. Built once at startup and passed
//! into each component explicitly, so tests can inject fixed values without
//! interactive prompts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::models::{AppError, AppResult};

/// Main application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// YouTube Data API key.
    pub api_key: String,

    /// Channel whose uploads playlist is processed.
    pub channel_id: String,

    /// Caption language preference, first match wins.
    pub languages: Vec<String>,

    /// File receiving one watch URL per line.
    pub links_file: PathBuf,

    /// Directory receiving one transcript file per video.
    pub transcript_dir: PathBuf,

    /// Combined output file for the group-all step.
    pub combined_file: PathBuf,

    /// Base name for numbered batch output files.
    pub batch_base_name: String,

    /// Number of transcripts per batch file.
    pub max_per_batch: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            channel_id: String::new(),
            languages: vec!["de".to_string(), "en".to_string()],
            links_file: PathBuf::from("youtube_videos.txt"),
            transcript_dir: PathBuf::from("transcripts"),
            combined_file: PathBuf::from("gesammelte_transkripte.txt"),
            batch_base_name: "gesammelte_transkripte".to_string(),
            max_per_batch: 500,
        }
    }
}

impl AppConfig {
    /// Build a configuration from the operator-entered values, keeping the
    /// default paths and batching threshold.
    pub fn new(api_key: String, channel_id: String, languages: Vec<String>) -> Self {
        Self {
            api_key,
            channel_id,
            languages,
            ..Self::default()
        }
    }

    /// Parse a comma-separated language list, e.g. `"de,en"`.
    pub fn parse_languages(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config("API key must not be empty".to_string()));
        }

        if self.channel_id.trim().is_empty() {
            return Err(AppError::Config("channel id must not be empty".to_string()));
        }

        if self.languages.is_empty() {
            return Err(AppError::Config(
                "at least one preferred language is required".to_string(),
            ));
        }

        if self.max_per_batch == 0 {
            return Err(AppError::Config(
                "max_per_batch must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_config() -> AppConfig {
        AppConfig::new(
            "test-key".to_string(),
            "UC-test".to_string(),
            vec!["de".to_string(), "en".to_string()],
        )
    }

    #[test]
    fn test_valid_config() {
        assert!(filled_config().validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut config = filled_config();
        config.api_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_language_list_rejected() {
        let mut config = filled_config();
        config.languages.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut config = filled_config();
        config.max_per_batch = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_languages() {
        assert_eq!(AppConfig::parse_languages("de,en"), vec!["de", "en"]);
        assert_eq!(AppConfig::parse_languages(" de , en "), vec!["de", "en"]);
        assert_eq!(AppConfig::parse_languages("de,,en,"), vec!["de", "en"]);
        assert!(AppConfig::parse_languages("").is_empty());
    }

    #[test]
    fn test_default_paths() {
        let config = AppConfig::default();
        assert_eq!(config.links_file, PathBuf::from("youtube_videos.txt"));
        assert_eq!(config.transcript_dir, PathBuf::from("transcripts"));
        assert_eq!(config.max_per_batch, 500);
    }
}
