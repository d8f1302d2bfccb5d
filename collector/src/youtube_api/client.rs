//! HTTP client for the read-only YouTube Data API v3 endpoints.

use crate::error::{Error, Result};
use crate::key::ApiKey;
use crate::quota::Endpoint;
use crate::youtube_api::YouTubeApi;
use crate::youtube_api::categories::{self, Categories, VideoCategory};
use crate::youtube_api::channels::{self, Channel, ChannelStats};
use crate::youtube_api::languages::{self, I18nLanguage, Languages};
use crate::youtube_api::search::{self, SearchPage, SearchQuery, SearchResult};
use crate::youtube_api::types::{ListResponse, parse_list};
use crate::youtube_api::videos::{self, Video, VideoDetail};
use serde::de::DeserializeOwned;
use tracing::instrument;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Client for the YouTube Data API v3, authenticated with a plain API key.
///
/// Every call is a single GET; nothing is retried. Quota is not tracked here,
/// callers charge their own [`crate::quota::Quota`] per call.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    key: ApiKey,
    base_url: String,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl YouTubeClient {
    pub fn new(key: ApiKey, client: reqwest::Client) -> Self {
        Self {
            key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    /// Points the client at a different API root, e.g. a local stand-in.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// Issues a GET against `endpoint` and parses the `*.list` envelope.
    ///
    /// Non-2xx statuses are not treated as failures on their own: the API puts
    /// its error object in the body, and [`ListResponse::into_items`] turns a
    /// body without `items` into [`Error::Api`]. Only failing to get a body at
    /// all is a [`Error::Transport`].
    ///
    /// The key travels as a query parameter, so transport errors have their URL
    /// stripped before they leave this function.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query_params: &[(&str, &str)],
    ) -> Result<ListResponse<T>> {
        let url = self.endpoint_url(endpoint);
        let response = self
            .client
            .get(&url)
            .query(query_params)
            .query(&[("key", self.key.expose())])
            .send()
            .await
            .map_err(|source| Error::Transport {
                endpoint,
                source: source.without_url(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| Error::Transport {
                endpoint,
                source: source.without_url(),
            })?;

        if !status.is_success() {
            tracing::debug!(%endpoint, %status, "YouTube API returned an error status");
        }

        parse_list(endpoint, &body).map_err(|e| match e {
            Error::Api { endpoint, message } if !status.is_success() => Error::Api {
                endpoint,
                message: format!("HTTP {status}: {message}"),
            },
            e => e,
        })
    }
}

impl YouTubeApi for YouTubeClient {
    /// Lists the video categories available in `region`, titled in `language`.
    ///
    /// <https://developers.google.com/youtube/v3/docs/videoCategories/list>
    #[instrument(skip(self))]
    async fn video_categories(&self, region: &str, language: &str) -> Result<Categories> {
        let query_params = [
            ("part", "snippet"),
            ("fields", categories::FIELDS),
            ("hl", language),
            ("regionCode", region),
        ];
        let response: ListResponse<VideoCategory> = self
            .get_list(Endpoint::VideoCategories, &query_params)
            .await?;
        let categories = categories::from_response(response)?;

        tracing::debug!(region, returned_items = categories.len(), "fetched video categories");
        Ok(categories)
    }

    /// Lists the application languages the API supports.
    ///
    /// <https://developers.google.com/youtube/v3/docs/i18nLanguages/list>
    #[instrument(skip(self))]
    async fn i18n_languages(&self) -> Result<Languages> {
        let query_params = [("part", "snippet")];
        let response: ListResponse<I18nLanguage> = self
            .get_list(Endpoint::I18nLanguages, &query_params)
            .await?;
        let languages = languages::from_response(response)?;

        tracing::debug!(returned_items = languages.len(), "fetched i18n languages");
        Ok(languages)
    }

    /// Fetches one page of `type=video` search results.
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    async fn search(&self, query: &SearchQuery<'_>) -> Result<SearchPage> {
        let max_results = search::MAX_RESULTS.to_string();
        let query_params = query.query_params(&max_results);
        let response: ListResponse<SearchResult> =
            self.get_list(Endpoint::Search, &query_params).await?;
        let page = search::from_response(response)?;

        tracing::debug!(
            returned_items = page.hits.len(),
            has_next_page = page.next_page_token.is_some(),
            "fetched search page"
        );
        Ok(page)
    }

    /// Fetches tags, duration and statistics for a single video.
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self))]
    async fn video_detail(&self, video_id: &str) -> Result<Option<VideoDetail>> {
        let query_params = [
            ("part", videos::PART),
            ("fields", videos::FIELDS),
            ("id", video_id),
        ];
        let response: ListResponse<Video> = self.get_list(Endpoint::Videos, &query_params).await?;
        let detail = videos::from_response(response)?;

        tracing::debug!(video_id, found = detail.is_some(), "fetched video detail");
        Ok(detail)
    }

    /// Fetches the subscriber count of a single channel.
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    async fn channel_stats(&self, channel_id: &str) -> Result<ChannelStats> {
        let query_params = [
            ("part", "statistics"),
            ("fields", channels::FIELDS),
            ("id", channel_id),
        ];
        let response: ListResponse<Channel> =
            self.get_list(Endpoint::Channels, &query_params).await?;
        let stats = channels::from_response(channel_id, response)?;

        tracing::debug!(channel_id, subscribers = ?stats.subscriber_count, "fetched channel statistics");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client() -> YouTubeClient {
        YouTubeClient::new(ApiKey::new("k"), reqwest::Client::new())
    }

    /// Serves one canned HTTP response on a loopback port and hands back the
    /// request head it received.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{status_line}\r\ncontent-type: text/html\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });
        (base_url, server)
    }

    #[test]
    fn endpoint_urls() {
        let yt = client();
        assert_eq!(
            yt.endpoint_url(Endpoint::Search),
            "https://www.googleapis.com/youtube/v3/search"
        );
        let yt = yt.with_base_url("http://127.0.0.1:9000/v3/");
        assert_eq!(
            yt.endpoint_url(Endpoint::I18nLanguages),
            "http://127.0.0.1:9000/v3/i18nLanguages"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        // nothing listens on port 9 (discard) on the loopback interface in CI
        let yt = client().with_base_url("http://127.0.0.1:9");
        let err = yt.video_detail("dQw4w9WgXcQ").await.unwrap_err();
        assert!(
            matches!(err, Error::Transport { endpoint: Endpoint::Videos, .. }),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn transport_error_does_not_reveal_key() {
        let yt = YouTubeClient::new(ApiKey::new("AIzaSECRET123"), reqwest::Client::new())
            .with_base_url("http://127.0.0.1:9");
        let err = yt.video_detail("vid").await.unwrap_err();
        assert!(matches!(err, Error::Transport { .. }), "{err:?}");

        let report = eyre::Report::new(err).wrap_err("collection aborted");
        for shown in [format!("{report:?}"), format!("{report:#}")] {
            assert!(!shown.contains("AIzaSECRET123"), "{shown}");
        }
    }

    #[tokio::test]
    async fn error_status_with_html_body_is_api_error() {
        let (base_url, server) =
            serve_once("HTTP/1.1 502 Bad Gateway", "<html><body>upstream down</body></html>").await;
        let yt = YouTubeClient::new(ApiKey::new("AIzaTEST"), reqwest::Client::new())
            .with_base_url(base_url);

        let err = yt.channel_stats("UC123").await.unwrap_err();
        let request = server.await.unwrap();

        let request_line = request.lines().next().unwrap_or_default();
        assert!(request_line.starts_with("GET /channels?"), "{request_line}");
        assert!(request_line.contains("id=UC123"), "{request_line}");
        assert!(request_line.contains("key=AIzaTEST"), "{request_line}");

        match err {
            Error::Api { endpoint, message } => {
                assert_eq!(endpoint, Endpoint::Channels);
                assert!(message.starts_with("HTTP 502 Bad Gateway: "), "{message}");
                assert!(message.contains("malformed response body"), "{message}");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }
}
