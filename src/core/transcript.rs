//! Caption retrieval and per-video transcript persistence
//!
//! The caption collaborator is the `youtubei` player endpoint: the watch
//! page yields an `INNERTUBE_API_KEY`, the player response lists the
//! available caption tracks, and the selected track's `baseUrl` serves the
//! timed segments in `json3` format. The whole exchange sits behind the
//! [`CaptionSource`] trait so the fetch loop can be tested with canned
//! tracks.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use super::channel::{ChannelLister, VideoListingApi};
use super::links;
use super::models::{AppError, AppResult, CaptionSegment, FetchReport, TranscriptRecord};
use crate::utils::sanitize::sanitize_filename;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player?key=";

/// Remote caption collaborator, keyed by video id and language preference.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Retrieve the caption track in the first preferred language for which
    /// a track exists. No track in any preferred language yields
    /// [`AppError::TranscriptUnavailable`].
    async fn fetch_captions(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> AppResult<Vec<CaptionSegment>>;
}

/// One selectable caption track of a video.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub base_url: String,
    /// `true` for auto-generated (ASR) tracks.
    pub is_generated: bool,
}

/// Flatten a caption track into plain text: segment texts joined by
/// newlines, timing metadata discarded.
pub fn flatten_captions(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pick the track for the first preferred language that has one, preferring
/// manually created tracks over auto-generated ones within a language.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Option<&'a CaptionTrack> {
    for language in languages {
        if let Some(track) = tracks
            .iter()
            .find(|t| &t.language_code == language && !t.is_generated)
        {
            return Some(track);
        }
        if let Some(track) = tracks.iter().find(|t| &t.language_code == language) {
            return Some(track);
        }
    }
    None
}

#[derive(Debug, Deserialize)]
struct Json3Transcript {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    t_start_ms: Option<u64>,
    d_duration_ms: Option<u64>,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    utf8: Option<String>,
}

/// Parse a `json3` caption payload into ordered segments. Events without
/// text (style/window markers) are dropped.
pub fn parse_json3(payload: &str) -> AppResult<Vec<CaptionSegment>> {
    let transcript: Json3Transcript = serde_json::from_str(payload)
        .map_err(|e| AppError::Parse(format!("invalid json3 caption payload: {}", e)))?;

    let segments = transcript
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event
                .segs?
                .into_iter()
                .filter_map(|seg| seg.utf8)
                .collect();
            let text = text.trim_matches('\n').to_string();
            if text.is_empty() {
                return None;
            }
            Some(CaptionSegment {
                text,
                start: event.t_start_ms.unwrap_or(0) as f64 / 1000.0,
                duration: event.d_duration_ms.unwrap_or(0) as f64 / 1000.0,
            })
        })
        .collect();

    Ok(segments)
}

/// Production [`CaptionSource`] backed by the watch page and the
/// `youtubei/v1/player` endpoint.
pub struct InnertubeCaptionSource {
    client: Client,
    api_key_re: Regex,
}

impl Default for InnertubeCaptionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InnertubeCaptionSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            api_key_re: Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
                .expect("invalid API key regex"),
        }
    }

    async fn fetch_watch_html(&self, video_id: &str) -> AppResult<String> {
        let html = self
            .client
            .get(format!("{}{}", WATCH_URL, video_id))
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }

    fn extract_api_key(&self, html: &str, video_id: &str) -> AppResult<String> {
        self.api_key_re
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                AppError::Parse(format!(
                    "no INNERTUBE_API_KEY in watch page for video {}",
                    video_id
                ))
            })
    }

    async fn fetch_player_data(
        &self,
        video_id: &str,
        api_key: &str,
    ) -> AppResult<serde_json::Value> {
        let context = serde_json::json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": "20.10.38"
                }
            },
            "videoId": video_id
        });

        let data = self
            .client
            .post(format!("{}{}", PLAYER_URL, api_key))
            .json(&context)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(data)
    }

    fn unavailable(&self, video_id: &str, languages: &[String]) -> AppError {
        AppError::TranscriptUnavailable {
            video_id: video_id.to_string(),
            languages: languages.join(", "),
        }
    }
}

/// Extract the caption track list from a player response. A video with
/// captions disabled or an unplayable status has no tracks.
pub fn parse_caption_tracks(player_data: &serde_json::Value) -> Vec<CaptionTrack> {
    let status = player_data
        .pointer("/playabilityStatus/status")
        .and_then(|s| s.as_str())
        .unwrap_or("OK");
    if status != "OK" {
        return Vec::new();
    }

    player_data
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .and_then(|tracks| tracks.as_array())
        .map(|tracks| {
            tracks
                .iter()
                .filter_map(|track| {
                    let language_code = track.get("languageCode")?.as_str()?.to_string();
                    let base_url = track.get("baseUrl")?.as_str()?.replace("&fmt=srv3", "");
                    let is_generated = track
                        .get("kind")
                        .and_then(|k| k.as_str())
                        .map(|k| k == "asr")
                        .unwrap_or(false);
                    Some(CaptionTrack {
                        language_code,
                        base_url,
                        is_generated,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl CaptionSource for InnertubeCaptionSource {
    async fn fetch_captions(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> AppResult<Vec<CaptionSegment>> {
        let html = self.fetch_watch_html(video_id).await?;
        let api_key = self.extract_api_key(&html, video_id)?;
        let player_data = self.fetch_player_data(video_id, &api_key).await?;

        let tracks = parse_caption_tracks(&player_data);
        let track =
            select_track(&tracks, languages).ok_or_else(|| self.unavailable(video_id, languages))?;
        debug!(
            "Selected {} caption track for video {}",
            track.language_code, video_id
        );

        let payload = self
            .client
            .get(format!("{}&fmt=json3", track.base_url))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_json3(&payload)
    }
}

/// Sequential per-video transcript fetcher.
///
/// Reads the link file line by line and processes each video in isolation:
/// a failed video is logged and recorded, the batch continues.
pub struct TranscriptFetcher<L: VideoListingApi, C: CaptionSource> {
    lister: ChannelLister<L>,
    captions: C,
    languages: Vec<String>,
    transcript_dir: PathBuf,
}

impl<L: VideoListingApi, C: CaptionSource> TranscriptFetcher<L, C> {
    pub fn new(
        lister: ChannelLister<L>,
        captions: C,
        languages: Vec<String>,
        transcript_dir: PathBuf,
    ) -> Self {
        Self {
            lister,
            captions,
            languages,
            transcript_dir,
        }
    }

    /// Fetch and persist a transcript for every line of the link file.
    ///
    /// Only the link file itself and the transcript directory are hard
    /// failures; everything per-video is caught, logged with the video id,
    /// and collected into the report.
    pub async fn fetch_all(&self, links_path: &Path) -> AppResult<FetchReport> {
        let lines = links::read_links(links_path)?;
        fs::create_dir_all(&self.transcript_dir)?;

        let mut report = FetchReport::default();
        for line in &lines {
            let video_id = links::extract_video_id(line);
            match self.fetch_one(video_id).await {
                Ok(path) => {
                    debug!("Saved transcript for video {} to {:?}", video_id, path);
                    report.saved += 1;
                }
                Err(err) => {
                    error!("Error fetching transcript for video {}: {}", video_id, err);
                    report.failures.push((video_id.to_string(), err.to_string()));
                }
            }
        }

        info!(
            "Fetched {} of {} transcripts ({} failed)",
            report.saved,
            report.total(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Fetch, flatten and persist a single video's transcript.
    async fn fetch_one(&self, video_id: &str) -> AppResult<PathBuf> {
        let segments = self.captions.fetch_captions(video_id, &self.languages).await?;
        let body = flatten_captions(&segments);
        let title = self.lister.resolve_title(video_id).await?;

        self.persist(&TranscriptRecord {
            video_id: video_id.to_string(),
            title,
            body,
        })
    }

    /// Write one transcript file: sanitized title plus video id as the
    /// name, unsanitized title in the header line.
    fn persist(&self, record: &TranscriptRecord) -> AppResult<PathBuf> {
        let filename = format!(
            "{}_{}.txt",
            sanitize_filename(&record.title),
            record.video_id
        );
        let path = self.transcript_dir.join(filename);

        fs::write(&path, format!("Title: {}\n\n{}", record.title, record.body))?;
        Ok(path)
    }
}
