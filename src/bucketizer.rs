//! Click-history bucketing.
//!
//! Turns an unordered set of click instants into a fixed-length histogram for
//! one [`Period`]. Window boundaries are calendar-aligned in the time zone of
//! the reference instant `now`, so the caller picks the zone by picking `Tz`.

use crate::labels::LabelFormatter;
use crate::models::Bucket;
use crate::period::Period;
use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike, Utc,
};
use std::fmt;

// `%#z` also takes `Z` and offsets with or without a colon.
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
];
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// One instant at which a short link was followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClickEvent {
    at: DateTime<Utc>,
}

impl ClickEvent {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// Parses an ISO-8601 timestamp. Date-times without an offset are
    /// wall-clock times in `tz`; a bare date is midnight UTC. Returns `None`
    /// for anything unreadable.
    pub fn parse<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<Self> {
        let raw = raw.trim();
        let with_offset = DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        });
        if let Some(at) = with_offset {
            return Some(Self::new(at.with_timezone(&Utc)));
        }

        if let Some(naive) = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return Some(Self::new(resolve_local(tz, naive).with_timezone(&Utc)));
        }

        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        Some(Self::new(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))))
    }
}

/// Half-open interval `[start, end)` in the observer's time zone.
#[derive(Debug, Clone)]
pub struct Window<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> Window<Tz> {
    pub fn contains(&self, event: &ClickEvent) -> bool {
        self.start <= event.at && event.at < self.end
    }
}

/// The `period.bucket_count()` windows ending with the one that holds `now`,
/// oldest first. Adjacent windows share their boundary.
pub fn windows<Tz: TimeZone>(period: Period, now: &DateTime<Tz>) -> Vec<Window<Tz>> {
    let boundaries = boundaries(period, now);
    boundaries
        .windows(2)
        .map(|pair| Window {
            start: pair[0].clone(),
            end: pair[1].clone(),
        })
        .collect()
}

/// Counts `events` into the windows of `period` ending at `now` and labels
/// each window with `labels`.
pub fn bucketize<Tz>(
    events: &[ClickEvent],
    period: Period,
    now: &DateTime<Tz>,
    labels: &LabelFormatter,
) -> Vec<Bucket>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    windows(period, now)
        .into_iter()
        .map(|window| Bucket {
            label: labels.label(period, &window.start),
            count: events.iter().filter(|event| window.contains(event)).count() as u64,
        })
        .collect()
}

// N + 1 ascending boundaries; the last one is the end of the window holding `now`.
fn boundaries<Tz: TimeZone>(period: Period, now: &DateTime<Tz>) -> Vec<DateTime<Tz>> {
    let count = period.bucket_count() as i64;
    let tz = now.timezone();
    let local = now.naive_local();
    let today = local.date();
    let into_hour = Duration::seconds(i64::from(local.minute() * 60 + local.second()))
        + Duration::nanoseconds(i64::from(local.nanosecond()));
    let hour_start = now.clone() - into_hour;
    let month_start = today - Duration::days(i64::from(today.day0()));

    (0..=count)
        .map(|index| {
            let offset = index - (count - 1);
            match period {
                Period::Hour => hour_start.clone() + Duration::hours(offset),
                Period::Day | Period::DayOfMonth => {
                    start_of_day(&tz, today + Duration::days(offset))
                }
                Period::Month => {
                    let shifted = if offset < 0 {
                        month_start.checked_sub_months(Months::new(offset.unsigned_abs() as u32))
                    } else {
                        month_start.checked_add_months(Months::new(offset as u32))
                    };
                    // only fails at the edge of chrono's representable range
                    start_of_day(&tz, shifted.unwrap_or(month_start))
                }
            }
        })
        .collect()
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

// Ambiguous wall times take the earlier instant; times inside a gap move
// forward to the first wall time that exists.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    for step in 0..=8 {
        match tz.from_local_datetime(&(naive + Duration::minutes(15 * step))) {
            LocalResult::Single(at) => return at,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => continue,
        }
    }
    tz.from_utc_datetime(&naive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Locale};
    use chrono_tz::America::{Havana, New_York, Sao_Paulo};

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    fn events(raw: &[&str]) -> Vec<ClickEvent> {
        raw.iter().map(|value| ClickEvent::new(utc(value))).collect()
    }

    fn english() -> LabelFormatter {
        LabelFormatter::new(Locale::en_US)
    }

    fn bangkok() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn wall(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn lengths<Tz: TimeZone>(windows: &[Window<Tz>]) -> Vec<i64> {
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        windows
            .iter()
            .map(|window| (window.end.clone() - window.start.clone()).num_hours())
            .collect()
    }

    #[test]
    fn every_period_has_fixed_length() {
        let now = utc("2025-01-10T15:30:00Z");
        for period in Period::ALL {
            let buckets = bucketize(&[], period, &now, &english());
            assert_eq!(buckets.len(), period.bucket_count(), "{period}");
            assert!(buckets.iter().all(|bucket| bucket.count == 0));
        }
    }

    #[test]
    fn windows_are_contiguous_and_end_after_now() {
        let instants = [
            utc("2025-01-10T15:30:00Z"),
            utc("2024-03-01T00:00:00Z"),
            utc("2023-12-31T23:59:59Z"),
        ];
        for now in instants {
            let local = now.with_timezone(&bangkok());
            for period in Period::ALL {
                let windows = windows(period, &local);
                for pair in windows.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start, "{period} at {now}");
                    assert!(pair[0].start < pair[0].end);
                }
                let newest = windows.last().unwrap();
                assert!(newest.start <= local && local < newest.end, "{period} at {now}");
            }
        }
    }

    #[test]
    fn hour_scenario_counts_recent_hours() {
        let now = utc("2025-01-10T15:30:00Z");
        let clicks = events(&[
            "2025-01-10T15:05:00Z",
            "2025-01-10T14:50:00Z",
            "2025-01-09T15:10:00Z",
            "2025-01-09T16:05:00Z",
        ]);

        let buckets = bucketize(&clicks, Period::Hour, &now, &english());
        let windows = windows(Period::Hour, &now);

        assert_eq!(windows[0].start, utc("2025-01-09T16:00:00Z"));
        assert_eq!(windows[23].start, utc("2025-01-10T15:00:00Z"));
        assert_eq!(buckets[23].count, 1);
        assert_eq!(buckets[22].count, 1);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[0].label, "16:00");
        assert_eq!(buckets[23].label, "15:00");
        // 2025-01-09T15:10 is one hour older than the oldest window
        assert_eq!(buckets.iter().map(|bucket| bucket.count).sum::<u64>(), 3);
    }

    #[test]
    fn event_on_boundary_counts_in_later_window() {
        let now = utc("2025-01-10T16:30:00Z");
        let clicks = events(&["2025-01-10T16:00:00Z", "2025-01-10T15:59:59.999Z"]);

        let buckets = bucketize(&clicks, Period::Hour, &now, &english());
        assert_eq!(buckets[23].count, 1);
        assert_eq!(buckets[22].count, 1);
    }

    #[test]
    fn month_windows_follow_calendar_months() {
        let now = utc("2024-03-10T08:00:00Z");
        let clicks = events(&["2024-02-15T12:00:00Z", "2024-02-29T23:59:59Z", "2024-03-01T00:00:00Z"]);

        let windows = windows(Period::Month, &now);
        assert_eq!(windows[10].start, utc("2024-02-01T00:00:00Z"));
        assert_eq!(windows[10].end, utc("2024-03-01T00:00:00Z"));
        assert_eq!(windows[0].start, utc("2023-04-01T00:00:00Z"));

        let buckets = bucketize(&clicks, Period::Month, &now, &english());
        assert_eq!(buckets[10].label, "Feb");
        assert_eq!(buckets[10].count, 2);
        assert_eq!(buckets[11].label, "Mar");
        assert_eq!(buckets[11].count, 1);
    }

    #[test]
    fn day_windows_truncate_to_local_midnight() {
        let now = utc("2025-01-10T20:00:00Z").with_timezone(&bangkok());
        // 2025-01-10T18:00Z is already 01:00 on the 11th in +07:00
        let clicks = events(&["2025-01-10T18:00:00Z", "2025-01-10T16:59:59Z"]);

        let windows = windows(Period::Day, &now);
        assert_eq!(windows[6].start, utc("2025-01-10T17:00:00Z"));

        let buckets = bucketize(&clicks, Period::Day, &now, &english());
        assert_eq!(buckets[6].label, "Sat");
        assert_eq!(buckets[6].count, 1);
        assert_eq!(buckets[5].label, "Fri");
        assert_eq!(buckets[5].count, 1);
    }

    #[test]
    fn spring_forward_midnight_starts_at_first_valid_time() {
        // Sao Paulo skipped 2018-11-04 00:00..01:00
        let now = utc("2018-11-05T14:00:00Z").with_timezone(&Sao_Paulo);
        let windows = windows(Period::Day, &now);

        assert_eq!(windows[5].start, utc("2018-11-04T03:00:00Z"));
        assert_eq!(windows[5].start.naive_local(), wall("2018-11-04T01:00"));
        assert_eq!(windows[6].start, utc("2018-11-05T02:00:00Z"));
        assert_eq!(&lengths(&windows)[4..], &[24, 23, 24]);
    }

    #[test]
    fn fall_back_midnight_takes_earlier_instant() {
        // Havana repeated 2024-11-03 00:00..01:00
        let now = utc("2024-11-04T17:00:00Z").with_timezone(&Havana);
        let windows = windows(Period::Day, &now);

        assert_eq!(windows[5].start, utc("2024-11-03T04:00:00Z"));
        assert_eq!(windows[5].start.naive_local(), wall("2024-11-03T00:00"));
        assert_eq!(windows[6].start, utc("2024-11-04T05:00:00Z"));
        assert_eq!(&lengths(&windows)[4..], &[24, 25, 24]);

        let clicks = events(&["2024-11-03T04:30:00Z", "2024-11-03T05:30:00Z"]);
        let buckets = bucketize(&clicks, Period::Day, &now, &english());
        assert_eq!(buckets[5].label, "Sun");
        assert_eq!(buckets[5].count, 2);
    }

    #[test]
    fn hour_windows_cross_fall_back_in_absolute_hours() {
        // New York repeated 01:00..02:00 on 2024-11-03
        let now = utc("2024-11-03T07:30:00Z").with_timezone(&New_York);
        let windows = windows(Period::Hour, &now);

        assert!(lengths(&windows).iter().all(|hours| *hours == 1));
        assert_eq!(windows[23].start, utc("2024-11-03T07:00:00Z"));
        assert_eq!(windows[21].start, utc("2024-11-03T05:00:00Z"));

        // 01:30 EDT and 01:30 EST are an hour apart
        let clicks = events(&["2024-11-03T05:30:00Z", "2024-11-03T06:30:00Z"]);
        let buckets = bucketize(&clicks, Period::Hour, &now, &english());
        let labels: Vec<&str> = buckets[20..].iter().map(|bucket| bucket.label.as_str()).collect();
        assert_eq!(labels, vec!["0:00", "1:00", "1:00", "2:00"]);
        assert_eq!(buckets[21].count, 1);
        assert_eq!(buckets[22].count, 1);

        let repeated = ClickEvent::parse("2024-11-03T01:30:00", &New_York).unwrap();
        assert_eq!(repeated.at(), utc("2024-11-03T05:30:00Z"));
    }

    #[test]
    fn day_of_month_labels_cross_month_end() {
        let now = utc("2025-03-02T10:00:00Z");
        let buckets = bucketize(&[], Period::DayOfMonth, &now, &english());
        let labels: Vec<&str> = buckets[26..].iter().map(|bucket| bucket.label.as_str()).collect();
        assert_eq!(labels, vec!["27", "28", "1", "2"]);
    }

    #[test]
    fn sum_matches_events_inside_span() {
        let now = utc("2025-06-15T12:00:00Z");
        let clicks: Vec<ClickEvent> = (0..500)
            .map(|step| ClickEvent::new(now - Duration::minutes(step * 97)))
            .chain(std::iter::once(ClickEvent::new(now + Duration::days(2))))
            .collect();

        for period in Period::ALL {
            let windows = windows(period, &now);
            let (start, end) = (&windows[0].start, &windows[windows.len() - 1].end);
            let expected = clicks
                .iter()
                .filter(|event| *start <= event.at() && event.at() < *end)
                .count() as u64;
            let total: u64 = bucketize(&clicks, period, &now, &english())
                .iter()
                .map(|bucket| bucket.count)
                .sum();
            assert_eq!(total, expected, "{period}");
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let now = utc("2025-01-10T15:30:00Z");
        let clicks = events(&["2025-01-10T15:05:00Z", "2024-11-02T09:00:00Z"]);
        for period in Period::ALL {
            let first = bucketize(&clicks, period, &now, &english());
            let second = bucketize(&clicks, period, &now, &english());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn parse_accepts_iso_variants() {
        let parsed = ClickEvent::parse("2025-01-10T15:05:00.000Z", &Utc).unwrap();
        assert_eq!(parsed.at(), utc("2025-01-10T15:05:00Z"));

        let naive = ClickEvent::parse("2025-01-10T15:05:00", &bangkok()).unwrap();
        assert_eq!(naive.at(), utc("2025-01-10T08:05:00Z"));

        let short = ClickEvent::parse("2025-01-10T15:05Z", &bangkok()).unwrap();
        assert_eq!(short.at(), utc("2025-01-10T15:05:00Z"));

        let compact = ClickEvent::parse("2025-01-10T15:05:00+0700", &Utc).unwrap();
        assert_eq!(compact.at(), utc("2025-01-10T08:05:00Z"));

        let spaced = ClickEvent::parse("2025-01-10 15:05:00.250+07:00", &Utc).unwrap();
        assert_eq!(spaced.at(), utc("2025-01-10T08:05:00.250Z"));
    }

    #[test]
    fn bare_date_is_utc_midnight_in_any_zone() {
        let date = ClickEvent::parse("2025-01-10", &bangkok()).unwrap();
        assert_eq!(date.at(), utc("2025-01-10T00:00:00Z"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(ClickEvent::parse("not a timestamp", &Utc).is_none());
        assert!(ClickEvent::parse("", &Utc).is_none());
        assert!(ClickEvent::parse("2025-13-40T99:00:00Z", &Utc).is_none());
    }
}
