//! YouTube Videos API types and functionality.

use crate::error::Result;
use crate::quota::Endpoint;
use crate::youtube_api::types::ListResponse;
use serde::{Deserialize, Serialize};

pub(crate) const PART: &str = "snippet,contentDetails,statistics";
pub(crate) const FIELDS: &str = "items(snippet(tags),contentDetails(duration),statistics)";

/// A `video` resource, reduced to the sections we request.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub snippet: Option<VideoSnippet>,
    pub content_details: Option<VideoContentDetails>,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    /// Keyword tags associated with the video.
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct VideoContentDetails {
    /// The length of the video as an ISO 8601 duration, e.g. `PT4M13S`.
    pub duration: Option<String>,
}

/// Statistics about the video.
///
/// The API reports every counter as a decimal string.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    /// The number of users who have indicated that they disliked the video.
    /// Note: This is only visible to the video owner.
    #[serde(rename = "dislikeCount")]
    pub dislike_count: Option<String>,
    /// The number of comments for the video.
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

/// Everything the collector wants to know about a video beyond what search returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDetail {
    pub tags: Option<Vec<String>>,
    pub duration: Option<String>,
    /// `None` when the API omitted the statistics section entirely.
    pub statistics: Option<VideoStatistics>,
}

impl From<Video> for VideoDetail {
    fn from(video: Video) -> Self {
        Self {
            tags: video.snippet.and_then(|s| s.tags),
            duration: video.content_details.and_then(|c| c.duration),
            statistics: video.statistics,
        }
    }
}

/// `None` means the video is gone: the response had no `items`, or an empty list.
pub(crate) fn from_response(response: ListResponse<Video>) -> Result<Option<VideoDetail>> {
    let Some(items) = response.items else {
        tracing::debug!(error = ?response.error, "videos.list returned no items");
        return Ok(None);
    };
    Ok(items.into_iter().next().map(VideoDetail::from))
}
