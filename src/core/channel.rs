//! Channel listing via the YouTube Data API v3
//!
//! Resolves a channel's uploads playlist and paginates through it to
//! produce the ordered video list. The remote API sits behind the
//! [`VideoListingApi`] trait so tests can drive the pagination loop
//! without network access.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::models::{AppError, AppResult, PlaylistPage, VideoRef};

/// Placeholder title used when the video lookup returns no items
/// (deleted or private videos).
pub const UNKNOWN_TITLE: &str = "unknown title";

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Items returned per playlist page, the API maximum.
const PAGE_SIZE: usize = 50;

/// Remote listing collaborator: channel lookup, playlist pagination and
/// per-video title resolution.
#[async_trait]
pub trait VideoListingApi: Send + Sync {
    /// Resolve the id of the channel's uploads playlist.
    async fn uploads_playlist_id(&self, channel_id: &str) -> AppResult<String>;

    /// Fetch one page of up to 50 playlist items.
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> AppResult<PlaylistPage>;

    /// Look up a video's title; `None` when the API reports no items.
    async fn video_title(&self, video_id: &str) -> AppResult<Option<String>>;
}

/// Production [`VideoListingApi`] backed by the YouTube Data API v3.
pub struct YoutubeDataApi {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelItem {
    content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
}

impl YoutubeDataApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl VideoListingApi for YoutubeDataApi {
    async fn uploads_playlist_id(&self, channel_id: &str) -> AppResult<String> {
        let response: ChannelListResponse = self
            .client
            .get(format!("{}/channels", API_BASE))
            .query(&[
                ("part", "contentDetails"),
                ("id", channel_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| item.content_details.related_playlists.uploads)
            .ok_or_else(|| AppError::ChannelEmpty(channel_id.to_string()))
    }

    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> AppResult<PlaylistPage> {
        let max_results = PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response: PlaylistItemsResponse = self
            .client
            .get(format!("{}/playlistItems", API_BASE))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(PlaylistPage {
            items: response
                .items
                .into_iter()
                .map(|item| VideoRef::from_id(item.snippet.resource_id.video_id))
                .collect(),
            next_page_token: response.next_page_token,
        })
    }

    async fn video_title(&self, video_id: &str) -> AppResult<Option<String>> {
        let response: VideoListResponse = self
            .client
            .get(format!("{}/videos", API_BASE))
            .query(&[
                ("part", "snippet"),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.items.into_iter().next().map(|item| item.snippet.title))
    }
}

/// Paginates a channel's uploads playlist into an ordered video list.
pub struct ChannelLister<A: VideoListingApi> {
    api: A,
}

impl<A: VideoListingApi> ChannelLister<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// List every video of the channel's uploads playlist, in the API's
    /// native page order. A channel without an uploads playlist yields
    /// [`AppError::ChannelEmpty`] rather than an empty list.
    pub async fn list_videos(&self, channel_id: &str) -> AppResult<Vec<VideoRef>> {
        let playlist_id = self.api.uploads_playlist_id(channel_id).await?;
        debug!("Resolved uploads playlist {} for channel {}", playlist_id, channel_id);

        let mut videos = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .api
                .playlist_page(&playlist_id, page_token.as_deref())
                .await?;
            videos.extend(page.items);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!("Listed {} videos for channel {}", videos.len(), channel_id);
        Ok(videos)
    }

    /// Resolve a video's title, falling back to [`UNKNOWN_TITLE`] when the
    /// API reports no matching items. A missing video never fails the
    /// caller; transport errors still propagate.
    ///
    /// TODO: the videos endpoint accepts comma-separated id lists, one
    /// batched call per link file would cut the request count by 50x.
    pub async fn resolve_title(&self, video_id: &str) -> AppResult<String> {
        Ok(self
            .api
            .video_title(video_id)
            .await?
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mocked listing collaborator serving fixed pages keyed by token.
    struct FakeListingApi {
        uploads: Option<String>,
        pages: Vec<PlaylistPage>,
        titles: HashMap<String, String>,
        calls: Mutex<usize>,
    }

    impl FakeListingApi {
        fn with_pages(pages: Vec<PlaylistPage>) -> Self {
            Self {
                uploads: Some("UU123".to_string()),
                pages,
                titles: HashMap::new(),
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl VideoListingApi for FakeListingApi {
        async fn uploads_playlist_id(&self, channel_id: &str) -> AppResult<String> {
            self.uploads
                .clone()
                .ok_or_else(|| AppError::ChannelEmpty(channel_id.to_string()))
        }

        async fn playlist_page(
            &self,
            _playlist_id: &str,
            page_token: Option<&str>,
        ) -> AppResult<PlaylistPage> {
            let mut calls = self.calls.lock().unwrap();
            let index = match page_token {
                None => 0,
                Some(token) => token
                    .parse::<usize>()
                    .map_err(|_| AppError::Api(format!("unknown page token: {}", token)))?,
            };
            *calls += 1;
            Ok(self.pages[index].clone())
        }

        async fn video_title(&self, video_id: &str) -> AppResult<Option<String>> {
            Ok(self.titles.get(video_id).cloned())
        }
    }

    fn page_of(prefix: &str, count: usize, next: Option<&str>) -> PlaylistPage {
        PlaylistPage {
            items: (0..count)
                .map(|i| VideoRef::from_id(format!("{}{:03}", prefix, i)))
                .collect(),
            next_page_token: next.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_pagination_collects_all_pages_in_order() {
        let api = FakeListingApi::with_pages(vec![
            page_of("a", 50, Some("1")),
            page_of("b", 50, Some("2")),
            page_of("c", 7, None),
        ]);
        let lister = ChannelLister::new(api);

        let videos = lister.list_videos("UC-test").await.unwrap();

        assert_eq!(videos.len(), 107);
        assert_eq!(videos[0].video_id, "a000");
        assert_eq!(videos[50].video_id, "b000");
        assert_eq!(videos[106].video_id, "c006");
        assert_eq!(*lister.api.calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_single_page_channel() {
        let api = FakeListingApi::with_pages(vec![page_of("a", 3, None)]);
        let lister = ChannelLister::new(api);

        let videos = lister.list_videos("UC-test").await.unwrap();
        assert_eq!(videos.len(), 3);
    }

    #[tokio::test]
    async fn test_channel_without_uploads_playlist_is_typed_error() {
        let mut api = FakeListingApi::with_pages(vec![]);
        api.uploads = None;
        let lister = ChannelLister::new(api);

        let err = lister.list_videos("UC-empty").await.unwrap_err();
        assert!(matches!(err, AppError::ChannelEmpty(ref id) if id == "UC-empty"));
    }

    #[tokio::test]
    async fn test_resolve_title_returns_known_title() {
        let mut api = FakeListingApi::with_pages(vec![]);
        api.titles
            .insert("abc".to_string(), "A Video".to_string());
        let lister = ChannelLister::new(api);

        assert_eq!(lister.resolve_title("abc").await.unwrap(), "A Video");
    }

    #[tokio::test]
    async fn test_resolve_title_falls_back_to_placeholder() {
        let api = FakeListingApi::with_pages(vec![]);
        let lister = ChannelLister::new(api);

        assert_eq!(lister.resolve_title("gone").await.unwrap(), UNKNOWN_TITLE);
    }
}
