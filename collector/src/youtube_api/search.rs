//! YouTube Search API types and query construction.

use crate::error::Result;
use crate::quota::Endpoint;
use crate::youtube_api::types::ListResponse;
use serde::Deserialize;

/// Largest page the search endpoint will return.
pub const MAX_RESULTS: u32 = 50;

pub(crate) const FIELDS: &str =
    "nextPageToken,items(id(videoId),snippet(channelId,title,channelTitle))";

/// One request against `search.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    /// ISO 3166-1 alpha-2 region code.
    pub region: &'a str,
    /// Video category id; empty means "any category".
    pub category: &'a str,
    /// Continuation token from the previous page, `None` for the first page.
    pub page_token: Option<&'a str>,
}

impl<'a> SearchQuery<'a> {
    pub fn first_page(region: &'a str, category: &'a str) -> Self {
        Self {
            region,
            category,
            page_token: None,
        }
    }

    pub fn with_page_token(self, page_token: Option<&'a str>) -> Self {
        Self { page_token, ..self }
    }

    /// Query parameters for this request, minus the API key.
    pub(crate) fn query_params(&self, max_results: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![
            ("part", "snippet"),
            ("fields", FIELDS),
            ("maxResults", max_results),
            ("type", "video"),
            ("regionCode", self.region),
        ];
        if !self.category.is_empty() {
            params.push(("videoCategoryId", self.category));
        }
        if let Some(token) = self.page_token {
            params.push(("pageToken", token));
        }
        params
    }
}

/// A `searchResult` resource, reduced to the fields we request.
///
/// Both sub-objects default to empty so that a partially populated hit still
/// deserializes; the extractor decides what to do with the gaps.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: SearchResultId,
    #[serde(default)]
    pub snippet: SearchResultSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultSnippet {
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub channel_title: Option<String>,
}

/// Minimal identity of one video found by a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHit {
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub channel_title: Option<String>,
}

impl From<SearchResult> for SearchHit {
    fn from(result: SearchResult) -> Self {
        Self {
            video_id: result.id.video_id,
            channel_id: result.snippet.channel_id,
            title: result.snippet.title,
            channel_title: result.snippet.channel_title,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    /// Present when there is another page to fetch.
    pub next_page_token: Option<String>,
}

pub(crate) fn from_response(response: ListResponse<SearchResult>) -> Result<SearchPage> {
    let (items, next_page_token) = response.into_items(Endpoint::Search)?;
    Ok(SearchPage {
        hits: items.into_iter().map(SearchHit::from).collect(),
        next_page_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube_api::types::parse_list;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_only_sent_when_chosen() {
        let all = SearchQuery::first_page("GR", "");
        let params = all.query_params("50");
        assert!(params.iter().all(|(k, _)| *k != "videoCategoryId"));
        assert!(params.iter().all(|(k, _)| *k != "pageToken"));

        let music = SearchQuery::first_page("GR", "10").with_page_token(Some("CDIQAA"));
        let params = music.query_params("50");
        assert!(params.contains(&("videoCategoryId", "10")));
        assert!(params.contains(&("pageToken", "CDIQAA")));
        assert!(params.contains(&("regionCode", "GR")));
        assert!(params.contains(&("type", "video")));
    }

    #[test]
    fn page_with_token() {
        let body = r#"{
            "nextPageToken": "CDIQAA",
            "items": [
                {"id": {"videoId": "dQw4w9WgXcQ"},
                 "snippet": {"channelId": "UCuAXFkgsw1L7xaCfnd5JJOw", "title": "Never Gonna Give You Up", "channelTitle": "Rick Astley"}},
                {"id": {}, "snippet": {"title": "orphan"}}
            ]
        }"#;
        let page = from_response(parse_list(Endpoint::Search, body).unwrap()).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("CDIQAA"));
        assert_eq!(
            page.hits,
            vec![
                SearchHit {
                    video_id: Some("dQw4w9WgXcQ".into()),
                    channel_id: Some("UCuAXFkgsw1L7xaCfnd5JJOw".into()),
                    title: Some("Never Gonna Give You Up".into()),
                    channel_title: Some("Rick Astley".into()),
                },
                SearchHit {
                    title: Some("orphan".into()),
                    ..SearchHit::default()
                },
            ]
        );
    }

    #[test]
    fn last_page_has_no_token() {
        let body = r#"{"items": [{"id": {"videoId": "x"}}]}"#;
        let page = from_response(parse_list(Endpoint::Search, body).unwrap()).unwrap();
        assert_eq!(page.next_page_token, None);
        assert_eq!(page.hits.len(), 1);
    }
}
