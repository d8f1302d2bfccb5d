//! API quota accounting.
//!
//! Every YouTube Data API call is billed against a daily budget of "units".
//! The collector keeps its own running total so that it can stop before the
//! budget is blown; the numbers below are what the collector charges itself,
//! one fixed cost per endpoint regardless of how many items come back.
//!
//! See: <https://developers.google.com/youtube/v3/determine_quota_cost>

use std::fmt;

/// The read-only endpoints the collector talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    VideoCategories,
    I18nLanguages,
    Search,
    Videos,
    Channels,
}

impl Endpoint {
    /// Units charged for a single call, as requested by the collector
    /// (`part=snippet` for search, `snippet,contentDetails,statistics` for
    /// videos, and so on).
    pub const fn cost(self) -> u64 {
        match self {
            Endpoint::VideoCategories => 3,
            // not billed separately by the API, charged like categories so
            // that the running total stays conservative
            Endpoint::I18nLanguages => 3,
            Endpoint::Search => 100,
            Endpoint::Videos => 7,
            Endpoint::Channels => 3,
        }
    }

    /// Path segment below the API base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::VideoCategories => "videoCategories",
            Endpoint::I18nLanguages => "i18nLanguages",
            Endpoint::Search => "search",
            Endpoint::Videos => "videos",
            Endpoint::Channels => "channels",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.list", self.path())
    }
}

/// Running total of units spent during one run, together with the ceiling
/// the run must not cross.
///
/// The counter only ever grows. It is owned by whoever drives the run and
/// lent to the extractor, so two runs never share a total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quota {
    used: u64,
    ceiling: u64,
}

impl Quota {
    pub fn new(ceiling: u64) -> Self {
        Self { used: 0, ceiling }
    }

    /// Records one call to `endpoint`.
    pub fn charge(&mut self, endpoint: Endpoint) {
        self.used = self.used.saturating_add(endpoint.cost());
        tracing::trace!(%endpoint, used = self.used, "charged quota");
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    pub fn remaining(&self) -> u64 {
        self.ceiling.saturating_sub(self.used)
    }

    /// Whether one more call to `endpoint` keeps the total at or below the ceiling.
    pub fn can_afford(&self, endpoint: Endpoint) -> bool {
        self.used.saturating_add(endpoint.cost()) <= self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn total_is_sum_of_fixed_costs() {
        let mut quota = Quota::new(u64::MAX);
        let (searches, videos, channels) = (3, 41, 38);
        for _ in 0..searches {
            quota.charge(Endpoint::Search);
        }
        for _ in 0..videos {
            quota.charge(Endpoint::Videos);
        }
        for _ in 0..channels {
            quota.charge(Endpoint::Channels);
        }
        quota.charge(Endpoint::VideoCategories);
        quota.charge(Endpoint::I18nLanguages);

        assert_eq!(quota.used(), 100 * searches + 7 * videos + 3 * channels + 3 + 3);
    }

    #[test]
    fn cannot_afford_search_within_fifty_of_ceiling() {
        let mut quota = Quota::new(1000);
        for _ in 0..9 {
            quota.charge(Endpoint::Search);
        }
        for _ in 0..10 {
            quota.charge(Endpoint::Videos);
        }
        assert_eq!(quota.used(), 970);
        assert_eq!(quota.remaining(), 30);
        assert!(!quota.can_afford(Endpoint::Search));
        assert!(quota.can_afford(Endpoint::Videos));
    }

    #[test]
    fn exact_fit_is_affordable() {
        let mut quota = Quota::new(200);
        quota.charge(Endpoint::Search);
        assert!(quota.can_afford(Endpoint::Search));
        quota.charge(Endpoint::Search);
        assert!(!quota.can_afford(Endpoint::Channels));
        assert_eq!(quota.remaining(), 0);
    }

    #[test]
    fn endpoints_display_as_api_methods() {
        assert_eq!(Endpoint::I18nLanguages.to_string(), "i18nLanguages.list");
        assert_eq!(Endpoint::Videos.to_string(), "videos.list");
    }
}
