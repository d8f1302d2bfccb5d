//! Turning one page of search hits into flat, persistable video records.

use crate::error::Result;
use crate::quota::{Endpoint, Quota};
use crate::youtube_api::{ChannelStats, SearchHit, VideoDetail, YouTubeApi};

/// Column names of the output CSV, in record order.
pub const CSV_HEADER: [&str; 11] = [
    "video_id",
    "channel_Id",
    "title",
    "channel_title",
    "tags",
    "duration",
    "views",
    "likes",
    "dislikes",
    "comments",
    "subscribers",
];

/// One row of the output: a search hit joined with its video details and the
/// subscriber count of its channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub video_id: String,
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub channel_title: Option<String>,
    pub tags: Option<Vec<String>>,
    /// ISO 8601 duration, e.g. `PT4M13S`.
    pub duration: Option<String>,
    pub views: Option<String>,
    pub likes: Option<String>,
    pub dislikes: Option<String>,
    pub comments: Option<String>,
    pub subscribers: Option<String>,
}

impl VideoRecord {
    /// Joins the three sources. `None` if the hit carries no video id.
    pub fn from_parts(hit: &SearchHit, detail: &VideoDetail, channel: &ChannelStats) -> Option<Self> {
        let video_id = hit.video_id.as_deref().filter(|id| !id.is_empty())?;
        let stats = detail.statistics.clone().unwrap_or_default();
        Some(Self {
            video_id: video_id.to_string(),
            channel_id: hit.channel_id.clone(),
            title: hit.title.clone(),
            channel_title: hit.channel_title.clone(),
            tags: detail.tags.clone(),
            duration: detail.duration.clone(),
            views: stats.view_count,
            likes: stats.like_count,
            dislikes: stats.dislike_count,
            comments: stats.comment_count,
            subscribers: channel.subscriber_count.clone(),
        })
    }

    /// Fields in [`CSV_HEADER`] order. Absent values become empty strings and
    /// tags are written as a JSON array.
    pub fn to_row(&self) -> [String; 11] {
        let opt = |value: &Option<String>| value.clone().unwrap_or_default();
        let tags = match &self.tags {
            Some(tags) => serde_json::to_string(tags).unwrap_or_default(),
            None => String::new(),
        };
        [
            self.video_id.clone(),
            opt(&self.channel_id),
            opt(&self.title),
            opt(&self.channel_title),
            tags,
            opt(&self.duration),
            opt(&self.views),
            opt(&self.likes),
            opt(&self.dislikes),
            opt(&self.comments),
            opt(&self.subscribers),
        ]
    }
}

/// Enriches every hit of a page, in order, and returns the records that survived.
///
/// A hit is dropped (with a warning) when it has no video id, when the video
/// is gone or has no statistics, or when the API rejects the video or channel
/// lookup. Anything else, a transport failure in particular, aborts the whole
/// page. Every lookup is charged to `quota` before it is made.
pub async fn extract<A: YouTubeApi>(
    api: &A,
    quota: &mut Quota,
    hits: &[SearchHit],
) -> Result<Vec<VideoRecord>> {
    let mut records = Vec::with_capacity(hits.len());

    for hit in hits {
        let Some(video_id) = hit.video_id.as_deref().filter(|id| !id.is_empty()) else {
            tracing::warn!(title = ?hit.title, "search hit without a video id, skipping");
            continue;
        };

        quota.charge(Endpoint::Videos);
        let detail = match api.video_detail(video_id).await {
            Ok(Some(detail)) if detail.statistics.is_some() => detail,
            Ok(Some(_)) => {
                tracing::warn!(video_id, "video has no statistics, skipping");
                continue;
            }
            Ok(None) => {
                tracing::warn!(video_id, "no content details for video, skipping");
                continue;
            }
            Err(e) if e.is_api() => {
                tracing::warn!(video_id, error = %e, "video lookup rejected, skipping");
                continue;
            }
            Err(e) => return Err(e),
        };

        let channel = match hit.channel_id.as_deref().filter(|id| !id.is_empty()) {
            Some(channel_id) => {
                quota.charge(Endpoint::Channels);
                match api.channel_stats(channel_id).await {
                    Ok(stats) => stats,
                    Err(e) if e.is_api() => {
                        tracing::warn!(video_id, channel_id, error = %e, "channel lookup rejected, skipping");
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
            None => {
                tracing::debug!(video_id, "search hit without a channel id");
                ChannelStats::default()
            }
        };

        if let Some(record) = VideoRecord::from_parts(hit, &detail, &channel) {
            records.push(record);
        }
    }

    Ok(records)
}
