//! Scripted [`YouTubeApi`] for testing the extractor and the collection loop.
//!
//! The mock answers from canned responses and records every call it receives,
//! so tests can check both what was collected and which requests were made
//! (and in what order).
//!
//! - search pages are served first-in first-out; once the script runs dry
//!   every further search is rejected with an API error
//! - video ids without a scripted answer are "not found"
//! - channel ids without a scripted answer are rejected like a deleted channel

use crate::error::{Error, Result};
use crate::quota::Endpoint;
use crate::youtube_api::{
    Categories, ChannelStats, Languages, SearchHit, SearchPage, SearchQuery, VideoDetail,
    VideoStatistics, YouTubeApi,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One request observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    VideoCategories { region: String, language: String },
    I18nLanguages,
    Search {
        region: String,
        category: String,
        page_token: Option<String>,
    },
    Video(String),
    Channel(String),
}

impl Call {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Call::VideoCategories { .. } => Endpoint::VideoCategories,
            Call::I18nLanguages => Endpoint::I18nLanguages,
            Call::Search { .. } => Endpoint::Search,
            Call::Video(_) => Endpoint::Videos,
            Call::Channel(_) => Endpoint::Channels,
        }
    }
}

/// How a scripted call should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The API answered without the requested payload.
    Api(String),
    /// The request never got an answer.
    Transport,
}

impl Failure {
    fn into_error(self, endpoint: Endpoint) -> Error {
        match self {
            Failure::Api(message) => Error::api(endpoint, message),
            Failure::Transport => Error::Transport {
                endpoint,
                source: transport_error(),
            },
        }
    }
}

/// `reqwest` offers no public constructor for its error type, so we produce a
/// real one by building a request for a URL that cannot be parsed.
fn transport_error() -> reqwest::Error {
    match reqwest::Client::new().get("not a url").build() {
        Err(e) => e,
        Ok(_) => unreachable!("`not a url` parsed as a URL"),
    }
}

type Scripted<T> = std::result::Result<T, Failure>;

#[derive(Debug, Default)]
pub struct MockApi {
    categories: Categories,
    languages: Languages,
    pages: Mutex<VecDeque<Scripted<SearchPage>>>,
    videos: HashMap<String, Scripted<Option<VideoDetail>>>,
    channels: HashMap<String, Scripted<ChannelStats>>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, id: &str, title: &str) -> Self {
        self.categories.insert(id.to_string(), title.to_string());
        self
    }

    pub fn with_language(mut self, code: &str, name: &str) -> Self {
        self.languages.insert(code.to_string(), name.to_string());
        self
    }

    /// Queues a successful search page.
    pub fn with_page(self, hits: Vec<SearchHit>, next_page_token: Option<&str>) -> Self {
        self.pages.lock().unwrap().push_back(Ok(SearchPage {
            hits,
            next_page_token: next_page_token.map(str::to_string),
        }));
        self
    }

    /// Queues a failing search.
    pub fn with_search_failure(self, failure: Failure) -> Self {
        self.pages.lock().unwrap().push_back(Err(failure));
        self
    }

    pub fn with_video(mut self, video_id: &str, detail: VideoDetail) -> Self {
        self.videos.insert(video_id.to_string(), Ok(Some(detail)));
        self
    }

    pub fn with_video_failure(mut self, video_id: &str, failure: Failure) -> Self {
        self.videos.insert(video_id.to_string(), Err(failure));
        self
    }

    pub fn with_channel(mut self, channel_id: &str, subscribers: &str) -> Self {
        self.channels.insert(
            channel_id.to_string(),
            Ok(ChannelStats {
                subscriber_count: Some(subscribers.to_string()),
            }),
        );
        self
    }

    pub fn with_channel_failure(mut self, channel_id: &str, failure: Failure) -> Self {
        self.channels.insert(channel_id.to_string(), Err(failure));
        self
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .count()
    }

    fn record(&self, call: Call) {
        tracing::debug!(?call, "mock YouTube API call");
        self.calls.lock().unwrap().push(call);
    }
}

impl YouTubeApi for MockApi {
    async fn video_categories(&self, region: &str, language: &str) -> Result<Categories> {
        self.record(Call::VideoCategories {
            region: region.to_string(),
            language: language.to_string(),
        });
        Ok(self.categories.clone())
    }

    async fn i18n_languages(&self) -> Result<Languages> {
        self.record(Call::I18nLanguages);
        Ok(self.languages.clone())
    }

    async fn search(&self, query: &SearchQuery<'_>) -> Result<SearchPage> {
        self.record(Call::Search {
            region: query.region.to_string(),
            category: query.category.to_string(),
            page_token: query.page_token.map(str::to_string),
        });
        match self.pages.lock().unwrap().pop_front() {
            Some(Ok(page)) => Ok(page),
            Some(Err(failure)) => Err(failure.into_error(Endpoint::Search)),
            None => Err(Error::api(Endpoint::Search, "no scripted search page left")),
        }
    }

    async fn video_detail(&self, video_id: &str) -> Result<Option<VideoDetail>> {
        self.record(Call::Video(video_id.to_string()));
        match self.videos.get(video_id).cloned() {
            Some(Ok(detail)) => Ok(detail),
            Some(Err(failure)) => Err(failure.into_error(Endpoint::Videos)),
            None => Ok(None),
        }
    }

    async fn channel_stats(&self, channel_id: &str) -> Result<ChannelStats> {
        self.record(Call::Channel(channel_id.to_string()));
        match self.channels.get(channel_id).cloned() {
            Some(Ok(stats)) => Ok(stats),
            Some(Err(failure)) => Err(failure.into_error(Endpoint::Channels)),
            None => Err(Error::api(
                Endpoint::Channels,
                format!("channel not found: {channel_id}"),
            )),
        }
    }
}

/// A search hit with every field populated.
pub fn hit(video_id: &str, channel_id: &str) -> SearchHit {
    SearchHit {
        video_id: Some(video_id.to_string()),
        channel_id: Some(channel_id.to_string()),
        title: Some(format!("title of {video_id}")),
        channel_title: Some(format!("channel {channel_id}")),
    }
}

/// A video detail with a full statistics section.
pub fn detail(views: &str) -> VideoDetail {
    VideoDetail {
        tags: Some(vec!["tag".to_string()]),
        duration: Some("PT1M".to_string()),
        statistics: Some(VideoStatistics {
            view_count: Some(views.to_string()),
            like_count: Some("10".to_string()),
            dislike_count: None,
            comment_count: Some("2".to_string()),
        }),
    }
}
