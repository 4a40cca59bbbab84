//! Recognition and enumeration of the CC-NEWS periodic feed.
//!
//! News listings are published monthly under
//! `crawl-data/CC-NEWS/{year}/{month}/warc.paths.gz` and never appear in the
//! collection index, so they get their own id scheme and validation.

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;

use ccget_common::{NEWS_FEED_START_MONTH, NEWS_FEED_START_YEAR};

/// Family id selecting every published news period.
pub const NEWS_FAMILY_ID: &str = "CC-NEWS";

/// One monthly period of the news feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsPeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl NewsPeriod {
    /// Shard id for this period, e.g. `CC-NEWS/2016/08`.
    pub fn shard_id(&self) -> String {
        format!("{}/{}/{:02}", NEWS_FAMILY_ID, self.year, self.month)
    }
}

/// Whether a shard id names the news family or one of its periods.
pub fn is_news_shard(shard_id: &str) -> bool {
    let pattern: Regex = Regex::new(r"^CC-NEWS(/\d{4}/\d{2})?$").expect("valid regex");
    pattern.is_match(shard_id)
}

/// Enumerate all complete news periods as of `now`.
///
/// Runs from the first published month (2016-08) through the month before
/// `now`. The current month is still being written and is excluded.
pub fn news_periods(now: DateTime<Utc>) -> Vec<NewsPeriod> {
    let mut periods: Vec<NewsPeriod> = Vec::new();

    let mut year: i32 = NEWS_FEED_START_YEAR;
    let mut month: u32 = NEWS_FEED_START_MONTH;
    while year < now.year() || (year == now.year() && month < now.month()) {
        periods.push(NewsPeriod { year, month });
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }

    periods
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn test_is_news_shard() {
        assert!(is_news_shard("CC-NEWS"));
        assert!(is_news_shard("CC-NEWS/2016/08"));
        assert!(is_news_shard("CC-NEWS/2023/12"));

        assert!(!is_news_shard("CC-MAIN-2023-06"));
        assert!(!is_news_shard("CC-NEWS/2016"));
        assert!(!is_news_shard("CC-NEWS/2016/8"));
        assert!(!is_news_shard("CC-NEWS/2016/08/extra"));
    }

    #[test]
    fn test_news_periods_start_and_current_month_excluded() {
        let now = Utc.with_ymd_and_hms(2016, 10, 15, 0, 0, 0).unwrap();

        let periods: Vec<NewsPeriod> = news_periods(now);
        assert_eq!(
            periods,
            vec![
                NewsPeriod { year: 2016, month: 8 },
                NewsPeriod { year: 2016, month: 9 },
            ]
        );
    }

    #[test]
    fn test_news_periods_cross_year_boundary() {
        let now = Utc.with_ymd_and_hms(2017, 2, 1, 0, 0, 0).unwrap();

        let periods: Vec<NewsPeriod> = news_periods(now);
        assert_eq!(periods.first(), Some(&NewsPeriod { year: 2016, month: 8 }));
        assert_eq!(periods.last(), Some(&NewsPeriod { year: 2017, month: 1 }));
        assert_eq!(periods.len(), 6);
    }

    #[test]
    fn test_news_periods_empty_before_feed_start() {
        let now = Utc.with_ymd_and_hms(2016, 8, 1, 0, 0, 0).unwrap();

        assert!(news_periods(now).is_empty());
    }

    #[test]
    fn test_news_period_shard_id_is_zero_padded() {
        let period = NewsPeriod { year: 2016, month: 8 };
        assert_eq!(period.shard_id(), "CC-NEWS/2016/08");
    }
}
