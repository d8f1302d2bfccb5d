//! YouTube VideoCategories API types.

use crate::error::Result;
use crate::quota::Endpoint;
use crate::youtube_api::types::ListResponse;
use indexmap::IndexMap;
use serde::Deserialize;

/// Category id -> display title, in the order the API returned them.
pub type Categories = IndexMap<String, String>;

pub(crate) const FIELDS: &str = "items(id,snippet(title))";

/// A `videoCategory` resource.
///
/// See: <https://developers.google.com/youtube/v3/docs/videoCategories#resource>
#[derive(Debug, Deserialize)]
pub struct VideoCategory {
    /// The ID that YouTube uses to uniquely identify the video category.
    pub id: String,
    pub snippet: Option<VideoCategorySnippet>,
}

#[derive(Debug, Deserialize)]
pub struct VideoCategorySnippet {
    /// The video category's title, localized to the requested `hl`.
    pub title: Option<String>,
}

pub(crate) fn from_response(response: ListResponse<VideoCategory>) -> Result<Categories> {
    let (items, _) = response.into_items(Endpoint::VideoCategories)?;
    Ok(items
        .into_iter()
        .filter_map(|category| {
            let title = category.snippet.and_then(|s| s.title)?;
            Some((category.id, title))
        })
        .collect())
}
