use chrono::{DateTime, Datelike, TimeZone};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::screenshot::OutputFormat;

/// Top-level prefix for every uploaded screenshot
pub const KEY_PREFIX: &str = "screenshots";

/// `<YYYY>/<MM>` partition for a point in time
pub fn year_month<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!("{:04}/{:02}", now.year(), now.month())
}

/// Builds date-partitioned object keys with millisecond file tokens
///
/// Tokens are epoch milliseconds, bumped by one whenever the clock has not
/// advanced past the last token issued, so a builder never hands out the
/// same key twice.
#[derive(Debug, Default)]
pub struct StorageKeyBuilder {
    last_token: AtomicI64,
}

impl StorageKeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next file token for `now`
    pub fn next_token<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let millis = now.timestamp_millis();
        let mut last = self.last_token.load(Ordering::Acquire);
        loop {
            let next = millis.max(last + 1);
            match self.last_token.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }

    /// Full object key: `screenshots/<YYYY>/<MM>/<token>.<ext>`
    pub fn build<Tz: TimeZone>(&self, now: &DateTime<Tz>, format: OutputFormat) -> String {
        let token = self.next_token(now);
        format!("{}/{}/{}.{}", KEY_PREFIX, year_month(now), token, format.extension())
    }
}

/// Public URL for an uploaded object
pub fn public_url(domain: &str, key: &str) -> String {
    format!("{}/{}", domain.trim_end_matches('/'), key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, Utc};

    #[test]
    fn test_year_month_is_zero_padded() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(year_month(&date), "2024/03");
        let date = Utc.with_ymd_and_hms(2025, 11, 30, 23, 59, 59).unwrap();
        assert_eq!(year_month(&date), "2025/11");
    }

    #[test]
    fn test_key_layout() {
        let builder = StorageKeyBuilder::new();
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 8, 30, 0).unwrap();
        let key = builder.build(&now, OutputFormat::Jpg);
        assert_eq!(key, format!("screenshots/2024/07/{}.jpg", now.timestamp_millis()));
    }

    #[test]
    fn test_same_millisecond_yields_distinct_keys() {
        let builder = StorageKeyBuilder::new();
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 8, 30, 0).unwrap();
        let first = builder.build(&now, OutputFormat::Png);
        let second = builder.build(&now, OutputFormat::Png);
        assert_ne!(first, second);
        assert!(first.starts_with("screenshots/2024/07/"));
        assert!(second.starts_with("screenshots/2024/07/"));
        assert_eq!(builder.next_token(&now), now.timestamp_millis() + 2);
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let builder = StorageKeyBuilder::new();
        let later = Utc.with_ymd_and_hms(2024, 7, 1, 8, 30, 1).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 7, 1, 8, 30, 0).unwrap();
        let a = builder.next_token(&later);
        let b = builder.next_token(&earlier);
        assert!(b > a);
    }

    #[test]
    fn test_consecutive_calls_share_month_prefix() {
        let builder = StorageKeyBuilder::new();
        let a = builder.build(&Local::now(), OutputFormat::WebP);
        let b = builder.build(&Local::now(), OutputFormat::WebP);
        assert_ne!(a, b);
        assert_eq!(a.rsplit_once('/').unwrap().0, b.rsplit_once('/').unwrap().0);
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url("https://cdn.example.com", "screenshots/2024/07/1.png"),
            "https://cdn.example.com/screenshots/2024/07/1.png"
        );
        assert_eq!(
            public_url("https://cdn.example.com/", "screenshots/2024/07/1.png"),
            "https://cdn.example.com/screenshots/2024/07/1.png"
        );
    }
}
