//! YouTube I18nLanguages API types.

use crate::error::Result;
use crate::quota::Endpoint;
use crate::youtube_api::types::ListResponse;
use indexmap::IndexMap;
use serde::Deserialize;

/// Language code -> display name.
pub type Languages = IndexMap<String, String>;

/// An `i18nLanguage` resource.
///
/// See: <https://developers.google.com/youtube/v3/docs/i18nLanguages#resource>
#[derive(Debug, Deserialize)]
pub struct I18nLanguage {
    /// The BCP-47 code of the language, e.g. `el` or `zh-TW`.
    pub id: String,
    pub snippet: Option<I18nLanguageSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct I18nLanguageSnippet {
    pub name: Option<String>,
}

pub(crate) fn from_response(response: ListResponse<I18nLanguage>) -> Result<Languages> {
    let (items, _) = response.into_items(Endpoint::I18nLanguages)?;
    Ok(items
        .into_iter()
        .filter_map(|language| {
            let name = language.snippet.and_then(|s| s.name)?;
            Some((language.id, name))
        })
        .collect())
}
