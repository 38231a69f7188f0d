use chrono::{DateTime, FixedOffset};

/// Layout for absolute timestamps shown to the user.
pub const DISPLAY_LAYOUT: &str = "%Y-%m-%d %H:%M";

/// Formats `instant` in `zone` using [`DISPLAY_LAYOUT`].
pub fn format_absolute(instant: DateTime<FixedOffset>, zone: FixedOffset) -> String {
    instant.with_timezone(&zone).format(DISPLAY_LAYOUT).to_string()
}

/// Phrase describing how long before `now` the `instant` was.
///
/// | age                  | phrase            |
/// |----------------------|-------------------|
/// | at least one day     | `N day(s) ago`    |
/// | over 3600 seconds    | `N hour(s) ago`   |
/// | over 60 seconds      | `N minute(s) ago` |
/// | anything else        | `just now`        |
///
/// Counts are truncated, so 1 day 23 hours is "1 day ago" and exactly one
/// hour is still "60 minutes ago". Instants after `now` read "just now".
pub fn relative_time(now: DateTime<FixedOffset>, instant: DateTime<FixedOffset>) -> String {
    let delta = now.signed_duration_since(instant);
    let days = delta.num_days();
    let seconds = delta.num_seconds();

    if days >= 1 {
        plural(days, "day")
    } else if seconds > 3600 {
        plural(seconds / 3600, "hour")
    } else if seconds > 60 {
        plural(seconds / 60, "minute")
    } else {
        "just now".to_string()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::korea_standard_time;
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<FixedOffset> {
        korea_standard_time()
            .with_ymd_and_hms(2025, 7, 29, 16, 30, 0)
            .unwrap()
    }

    fn ago(delta: TimeDelta) -> String {
        relative_time(now(), now() - delta)
    }

    #[test]
    fn test_days() {
        assert_eq!(ago(TimeDelta::days(1)), "1 day ago");
        assert_eq!(ago(TimeDelta::days(10)), "10 days ago");
        assert_eq!(ago(TimeDelta::hours(47)), "1 day ago");
    }

    #[test]
    fn test_hours() {
        assert_eq!(ago(TimeDelta::hours(2)), "2 hours ago");
        assert_eq!(ago(TimeDelta::seconds(3601)), "1 hour ago");
        assert_eq!(ago(TimeDelta::hours(23) + TimeDelta::minutes(59)), "23 hours ago");
    }

    #[test]
    fn test_exactly_one_hour_is_minutes() {
        assert_eq!(ago(TimeDelta::seconds(3600)), "60 minutes ago");
    }

    #[test]
    fn test_minutes() {
        assert_eq!(ago(TimeDelta::seconds(61)), "1 minute ago");
        assert_eq!(ago(TimeDelta::minutes(45)), "45 minutes ago");
    }

    #[test]
    fn test_just_now() {
        assert_eq!(ago(TimeDelta::seconds(60)), "just now");
        assert_eq!(ago(TimeDelta::zero()), "just now");
        assert_eq!(ago(TimeDelta::hours(-3)), "just now");
    }

    #[test]
    fn test_format_absolute_converts_to_reference_zone() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let instant = utc.with_ymd_and_hms(2025, 7, 29, 5, 30, 0).unwrap();
        assert_eq!(
            format_absolute(instant, korea_standard_time()),
            "2025-07-29 14:30"
        );
    }
}
