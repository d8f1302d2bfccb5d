//! The page-by-page search, enrich and persist loop.

use crate::error::Error;
use crate::extract::{VideoRecord, extract};
use crate::output::RecordSink;
use crate::quota::{Endpoint, Quota};
use crate::youtube_api::{SearchPage, SearchQuery, YouTubeApi};
use std::fmt;
use std::io::Write;

/// What to collect.
#[derive(Debug, Clone, Copy)]
pub struct CollectRequest<'a> {
    /// ISO 3166-1 alpha-2 region code.
    pub region: &'a str,
    /// Video category id, or empty for all categories.
    pub category: &'a str,
}

/// Why the loop ended.
#[derive(Debug)]
pub enum StopReason {
    /// The last search response carried no next-page token.
    Exhausted,
    /// A page produced no usable records.
    EmptyPage,
    /// Another search would have taken the quota past its ceiling.
    QuotaCeiling,
    /// The search endpoint answered without results (quota exceeded, bad key, ...).
    SearchRejected(String),
    /// A network or persistence failure ended the run early.
    Aborted(Error),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => f.write_str("no more result pages"),
            StopReason::EmptyPage => f.write_str("page yielded no videos"),
            StopReason::QuotaCeiling => f.write_str("quota ceiling reached"),
            StopReason::SearchRejected(message) => write!(f, "search rejected: {message}"),
            StopReason::Aborted(e) => write!(f, "aborted: {e}"),
        }
    }
}

/// Outcome of one run.
#[derive(Debug)]
pub struct Summary {
    /// Search pages successfully fetched.
    pub pages: usize,
    /// Rows written to the sink.
    pub records: usize,
    pub quota_used: u64,
    pub stop: StopReason,
}

impl Summary {
    /// True when the run ended because something went wrong rather than
    /// because there was nothing (or no budget) left.
    pub fn is_failure(&self) -> bool {
        matches!(
            self.stop,
            StopReason::SearchRejected(_) | StopReason::Aborted(_)
        )
    }
}

enum State {
    FetchingPage {
        page_token: Option<String>,
    },
    Extracting(SearchPage),
    Persisting {
        records: Vec<VideoRecord>,
        next_page_token: Option<String>,
    },
    Stop(StopReason),
}

/// Runs the collection loop until the results, the budget or the API give out.
///
/// Before each search the quota is checked: the search is only issued if its
/// cost keeps `quota` at or below its ceiling. Records of a page are persisted
/// (and flushed) before the next page is requested, so whatever stops the
/// loop, the rows written so far stay intact.
#[tracing::instrument(skip(api, quota, sink))]
pub async fn collect<A, W>(
    api: &A,
    request: CollectRequest<'_>,
    quota: &mut Quota,
    sink: &mut RecordSink<W>,
) -> Summary
where
    A: YouTubeApi,
    W: Write,
{
    let mut pages = 0;
    let mut written = 0;
    let mut state = State::FetchingPage { page_token: None };

    let stop = loop {
        state = match state {
            State::FetchingPage { page_token } => {
                if !quota.can_afford(Endpoint::Search) {
                    tracing::info!(
                        used = quota.used(),
                        ceiling = quota.ceiling(),
                        "not enough quota left for another search"
                    );
                    State::Stop(StopReason::QuotaCeiling)
                } else {
                    quota.charge(Endpoint::Search);
                    let query = SearchQuery::first_page(request.region, request.category)
                        .with_page_token(page_token.as_deref());
                    match api.search(&query).await {
                        Ok(page) => {
                            pages += 1;
                            State::Extracting(page)
                        }
                        Err(Error::Api { message, .. }) => {
                            tracing::error!(%message, "search returned no results");
                            State::Stop(StopReason::SearchRejected(message))
                        }
                        Err(e) => State::Stop(StopReason::Aborted(e)),
                    }
                }
            }

            State::Extracting(page) => {
                let extracted = extract(api, quota, &page.hits).await;
                match extracted {
                    Ok(records) if records.is_empty() => {
                        tracing::info!(hits = page.hits.len(), "no usable videos on this page");
                        State::Stop(StopReason::EmptyPage)
                    }
                    Ok(records) => State::Persisting {
                        records,
                        next_page_token: page.next_page_token,
                    },
                    Err(e) => State::Stop(StopReason::Aborted(e)),
                }
            }

            State::Persisting {
                records,
                next_page_token,
            } => {
                let mut failure = None;
                for record in &records {
                    if let Err(e) = sink.append(record) {
                        failure = Some(e);
                        break;
                    }
                    written += 1;
                }

                match failure {
                    Some(e) => State::Stop(StopReason::Aborted(e)),
                    None => {
                        tracing::info!(
                            added = records.len(),
                            total = written,
                            quota_used = quota.used(),
                            "{} new videos added",
                            records.len()
                        );
                        match next_page_token {
                            Some(page_token) => State::FetchingPage {
                                page_token: Some(page_token),
                            },
                            None => State::Stop(StopReason::Exhausted),
                        }
                    }
                }
            }

            State::Stop(reason) => break reason,
        };
    };

    tracing::info!(pages, records = written, quota_used = quota.used(), stop = %stop, "collection finished");

    Summary {
        pages,
        records: written,
        quota_used: quota.used(),
        stop,
    }
}
