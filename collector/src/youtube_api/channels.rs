//! YouTube Channels API types and functionality.

use crate::error::{Error, Result};
use crate::quota::Endpoint;
use crate::youtube_api::types::ListResponse;
use serde::Deserialize;

pub(crate) const FIELDS: &str = "items(statistics(subscriberCount))";

/// A `channel` resource, reduced to its statistics.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Deserialize)]
pub struct Channel {
    pub statistics: Option<ChannelStatistics>,
}

/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    /// The number of subscribers that the channel has, as a decimal string.
    ///
    /// Omitted when the channel hides its subscriber count.
    pub subscriber_count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelStats {
    pub subscriber_count: Option<String>,
}

/// An empty `items` list means the channel was deleted or made private
/// between the search and this call.
pub(crate) fn from_response(
    channel_id: &str,
    response: ListResponse<Channel>,
) -> Result<ChannelStats> {
    let (items, _) = response.into_items(Endpoint::Channels)?;
    let channel = items
        .into_iter()
        .next()
        .ok_or_else(|| Error::api(Endpoint::Channels, format!("channel not found: {channel_id}")))?;
    Ok(ChannelStats {
        subscriber_count: channel.statistics.and_then(|s| s.subscriber_count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube_api::types::parse_list;
    use pretty_assertions::assert_eq;

    fn parse(body: &str) -> Result<ChannelStats> {
        from_response("UCx", parse_list(Endpoint::Channels, body).unwrap())
    }

    #[test]
    fn subscriber_count() {
        let stats = parse(r#"{"items":[{"statistics":{"subscriberCount":"1000"}}]}"#).unwrap();
        assert_eq!(stats.subscriber_count.as_deref(), Some("1000"));
    }

    #[test]
    fn hidden_subscriber_count_is_none() {
        let stats =
            parse(r#"{"items":[{"statistics":{"hiddenSubscriberCount":true}}]}"#).unwrap();
        assert_eq!(stats, ChannelStats::default());
    }

    #[test]
    fn deleted_channel_is_api_error() {
        let err = parse(r#"{"items":[]}"#).unwrap_err();
        match err {
            Error::Api { endpoint, message } => {
                assert_eq!(endpoint, Endpoint::Channels);
                assert_eq!(message, "channel not found: UCx");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
