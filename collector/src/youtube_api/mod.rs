//! YouTube Data API v3 client library.
//!
//! Only the five read-only `*.list` endpoints the collector needs are covered:
//!
//! | method                            | endpoint              | quota |
//! |-----------------------------------|-----------------------|-------|
//! | [`YouTubeApi::video_categories`]  | `videoCategories.list`| 3     |
//! | [`YouTubeApi::i18n_languages`]    | `i18nLanguages.list`  | 3     |
//! | [`YouTubeApi::search`]            | `search.list`         | 100   |
//! | [`YouTubeApi::video_detail`]      | `videos.list`         | 7     |
//! | [`YouTubeApi::channel_stats`]     | `channels.list`       | 3     |
//!
//! The [`YouTubeApi`] trait is what the extractor and the collection loop are
//! written against; [`YouTubeClient`] implements it over HTTP.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use yt_category_collector::key::ApiKey;
//! use yt_category_collector::youtube_api::{SearchQuery, YouTubeApi, YouTubeClient};
//!
//! # async fn example() -> yt_category_collector::Result<()> {
//! let yt = YouTubeClient::new(ApiKey::new("AIza..."), reqwest::Client::new());
//! let page = yt.search(&SearchQuery::first_page("GR", "10")).await?;
//! for hit in &page.hits {
//!     println!("{:?}: {:?}", hit.video_id, hit.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod categories;
pub mod channels;
pub mod client;
pub mod languages;
pub mod search;
pub mod types;
pub mod videos;

pub use categories::Categories;
pub use channels::ChannelStats;
pub use client::{DEFAULT_BASE_URL, YouTubeClient};
pub use languages::Languages;
pub use search::{SearchHit, SearchPage, SearchQuery};
pub use videos::{VideoDetail, VideoStatistics};

use crate::error::Result;

/// The read-only YouTube operations the collector relies on.
///
/// Implementations perform exactly one request per call and never touch a
/// quota counter; charging is the caller's job.
#[allow(async_fn_in_trait)]
pub trait YouTubeApi {
    async fn video_categories(&self, region: &str, language: &str) -> Result<Categories>;

    async fn i18n_languages(&self) -> Result<Languages>;

    /// Fails with [`crate::Error::Api`] when the response has no `items`.
    async fn search(&self, query: &SearchQuery<'_>) -> Result<SearchPage>;

    /// `Ok(None)` when the video no longer exists.
    async fn video_detail(&self, video_id: &str) -> Result<Option<VideoDetail>>;

    /// Fails with [`crate::Error::Api`] when the channel cannot be found.
    async fn channel_stats(&self, channel_id: &str) -> Result<ChannelStats>;
}
