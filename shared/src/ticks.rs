//! Conversion between wall-clock time and the server's 100ns tick timestamps.
//!
//! Chat timestamps count 100-nanosecond ticks since 0001-01-01T00:00:00 UTC.

use chrono::{DateTime, TimeZone, Utc};

pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const NANOS_PER_TICK: i64 = 100;
/// Seconds between 0001-01-01 and the Unix epoch
pub const EPOCH_OFFSET_SECONDS: i64 = 62_135_596_800;

/// Converts a tick count to UTC, or `None` when it falls outside chrono's range.
pub fn time_from_ticks(ticks: i64) -> Option<DateTime<Utc>> {
    let seconds = ticks.div_euclid(TICKS_PER_SECOND) - EPOCH_OFFSET_SECONDS;
    let nanos = ticks.rem_euclid(TICKS_PER_SECOND) * NANOS_PER_TICK;
    Utc.timestamp_opt(seconds, nanos as u32).single()
}

/// Converts a UTC time to ticks, truncating below tick resolution.
pub fn ticks_from_time(time: DateTime<Utc>) -> i64 {
    let seconds = time.timestamp() + EPOCH_OFFSET_SECONDS;
    let sub_ticks = i64::from(time.timestamp_subsec_nanos()) / NANOS_PER_TICK;
    seconds * TICKS_PER_SECOND + sub_ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_unix_epoch_in_ticks() {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(ticks_from_time(epoch), 621_355_968_000_000_000);
        assert_eq!(time_from_ticks(621_355_968_000_000_000), Some(epoch));
    }

    #[test]
    fn test_round_trip_within_tick_resolution() {
        let original = Utc.with_ymd_and_hms(2021, 10, 5, 18, 30, 15).unwrap()
            + Duration::nanoseconds(123_456_789);

        let ticks = ticks_from_time(original);
        let decoded = time_from_ticks(ticks).unwrap();

        let drift = original - decoded;
        assert!(drift >= Duration::zero());
        assert!(drift < Duration::nanoseconds(NANOS_PER_TICK));
    }

    #[test]
    fn test_exact_round_trip_on_tick_boundary() {
        let original = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap()
            + Duration::nanoseconds(500);
        assert_eq!(time_from_ticks(ticks_from_time(original)), Some(original));
    }

    #[test]
    fn test_sub_second_ticks_become_nanoseconds() {
        let ticks = 621_355_968_000_000_000 + 1;
        let decoded = time_from_ticks(ticks).unwrap();
        assert_eq!(decoded.timestamp(), 0);
        assert_eq!(decoded.timestamp_subsec_nanos(), 100);
    }

    #[test]
    fn test_year_one() {
        let decoded = time_from_ticks(0).unwrap();
        assert_eq!(decoded, Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap());
    }
}
