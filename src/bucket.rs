//! Time bucket derivation for ledger records and aggregates.
//!
//! Buckets are epoch-second timestamps truncated to the start of their
//! period: calendar UTC days for records, fixed 30-day windows for
//! aggregates. The 30-day window is not a calendar month.

pub const DAY_SECONDS: i64 = 86_400;
pub const MONTH_SECONDS: i64 = 30 * DAY_SECONDS;

/// Truncate a timestamp to the start of its UTC day.
pub fn day_bucket(ts: i64) -> i64 {
    ts - ts % DAY_SECONDS
}

/// Truncate a timestamp to the start of its 30-day aggregation window.
pub fn month_bucket(ts: i64) -> i64 {
    ts - ts % MONTH_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bucket_truncates_to_midnight() {
        // 2024-01-15 13:45:10 UTC
        let ts = 1_705_326_310;
        let bucket = day_bucket(ts);
        assert_eq!(bucket % DAY_SECONDS, 0);
        assert!(bucket <= ts);
        assert!(ts - bucket < DAY_SECONDS);
        // 2024-01-15 00:00:00 UTC
        assert_eq!(bucket, 1_705_276_800);
    }

    #[test]
    fn test_day_bucket_is_idempotent() {
        let ts = 1_705_326_310;
        assert_eq!(day_bucket(day_bucket(ts)), day_bucket(ts));
    }

    #[test]
    fn test_day_bucket_at_exact_midnight() {
        let midnight = 1_705_276_800;
        assert_eq!(day_bucket(midnight), midnight);
    }

    #[test]
    fn test_same_day_maps_to_same_bucket() {
        let morning = 1_705_280_400; // 01:00
        let evening = 1_705_363_199; // 23:59:59
        assert_eq!(day_bucket(morning), day_bucket(evening));
    }

    #[test]
    fn test_month_bucket_truncates_to_window_start() {
        let ts = 1_705_326_310;
        let bucket = month_bucket(ts);
        assert_eq!(bucket % MONTH_SECONDS, 0);
        assert!(bucket <= ts);
        assert!(ts - bucket < MONTH_SECONDS);
    }

    #[test]
    fn test_month_bucket_contains_day_bucket() {
        // A record's day bucket always falls in its month bucket window
        let ts = 1_705_326_310;
        let day = day_bucket(ts);
        let month = month_bucket(day);
        assert!(day >= month);
        assert!(day < month + MONTH_SECONDS);
        assert_eq!(month_bucket(ts), month);
    }

    #[test]
    fn test_adjacent_windows_do_not_overlap() {
        let bucket = month_bucket(1_705_326_310);
        assert_eq!(month_bucket(bucket + MONTH_SECONDS - 1), bucket);
        assert_eq!(month_bucket(bucket + MONTH_SECONDS), bucket + MONTH_SECONDS);
    }
}
