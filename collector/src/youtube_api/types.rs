//! Shared response envelope for the YouTube `*.list` endpoints.

use crate::error::{Error, Result};
use crate::quota::Endpoint;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// The parts of a `*.list` response that every endpoint shares.
///
/// `items` is optional on purpose: when the API rejects a request (quota
/// exhausted, invalid key, ...) it still answers with a JSON document, just one
/// that carries an `error` object instead of `items`.
///
/// See: <https://developers.google.com/youtube/v3/docs/core_errors>
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    /// The resources that matched the request.
    pub items: Option<Vec<T>>,
    /// Token for the `pageToken` parameter of the next request, if there is a next page.
    pub next_page_token: Option<String>,
    /// Present instead of `items` when the request failed.
    pub error: Option<ApiErrorBody>,
}

/// The `error` object of a failed request.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<u16>,
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub reason: Option<String>,
}

impl ApiErrorBody {
    fn describe(&self) -> String {
        let mut out = String::new();
        if let Some(code) = self.code {
            out.push_str(&code.to_string());
        }
        if let Some(message) = &self.message {
            if !out.is_empty() {
                out.push_str(": ");
            }
            out.push_str(message);
        }
        let reasons: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|e| e.reason.as_deref())
            .collect();
        if !reasons.is_empty() {
            out.push_str(&format!(" ({})", reasons.join(", ")));
        }
        if out.is_empty() {
            out.push_str("unspecified API error");
        }
        out
    }
}

impl<T> ListResponse<T> {
    /// Splits the response into its items and continuation token, or turns it
    /// into [`Error::Api`] if the API did not return any `items` at all.
    pub fn into_items(self, endpoint: Endpoint) -> Result<(Vec<T>, Option<String>)> {
        match self.items {
            Some(items) => Ok((items, self.next_page_token)),
            None => {
                let message = match &self.error {
                    Some(error) => error.describe(),
                    None => "response has no `items` field".to_string(),
                };
                Err(Error::api(endpoint, message))
            }
        }
    }
}

/// Parses a raw response body for `endpoint`.
///
/// A body that is not the JSON we expect is reported the same way as an API
/// error: the server answered, just not with anything usable.
pub(crate) fn parse_list<T: DeserializeOwned>(
    endpoint: Endpoint,
    body: &str,
) -> Result<ListResponse<T>> {
    serde_json::from_str(body)
        .map_err(|e| Error::api(endpoint, format!("malformed response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn items_and_token_are_returned() {
        let response: ListResponse<Item> = parse_list(
            Endpoint::Search,
            r#"{"nextPageToken":"CDIQAA","items":[{"id":"a"},{"id":"b"}]}"#,
        )
        .unwrap();
        let (items, token) = response.into_items(Endpoint::Search).unwrap();
        assert_eq!(
            items,
            vec![Item { id: "a".into() }, Item { id: "b".into() }]
        );
        assert_eq!(token.as_deref(), Some("CDIQAA"));
    }

    #[test]
    fn error_body_becomes_api_error() {
        let body = r#"{
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [{"reason": "quotaExceeded", "domain": "youtube.quota"}]
            }
        }"#;
        let response: ListResponse<Item> = parse_list(Endpoint::Search, body).unwrap();
        let err = response.into_items(Endpoint::Search).unwrap_err();
        match err {
            Error::Api { endpoint, message } => {
                assert_eq!(endpoint, Endpoint::Search);
                assert!(message.starts_with("403: The request cannot"), "{message}");
                assert!(message.ends_with("(quotaExceeded)"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_items_without_error_object() {
        let response: ListResponse<Item> = parse_list(Endpoint::Videos, "{}").unwrap();
        let err = response.into_items(Endpoint::Videos).unwrap_err();
        assert!(err.is_api());
    }

    #[test]
    fn non_json_body_is_api_error() {
        let err = parse_list::<Item>(Endpoint::Channels, "<html>502</html>").unwrap_err();
        assert!(err.is_api());
    }
}
