use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// `10/18/2026, 3:04:05 PM ET`: US civil-time layout in `tz`, with `label`
/// appended as literal text.
pub fn format_updated_at(now: DateTime<Utc>, tz: Tz, label: &str) -> String {
    let local = now.with_timezone(&tz);
    let stamp = local.format("%-m/%-d/%Y, %-I:%M:%S %p");
    if label.is_empty() {
        stamp.to_string()
    } else {
        format!("{stamp} {label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    #[test]
    fn daylight_time_is_utc_minus_four() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 19, 4, 5).unwrap();
        assert_eq!(
            format_updated_at(now, New_York, "ET"),
            "10/18/2026, 3:04:05 PM ET"
        );
    }

    #[test]
    fn standard_time_midnight_renders_as_twelve_am() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 5, 0, 0).unwrap();
        assert_eq!(
            format_updated_at(now, New_York, "ET"),
            "1/5/2026, 12:00:00 AM ET"
        );
    }

    #[test]
    fn other_zones_and_empty_label() {
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 12, 30, 0).unwrap();
        assert_eq!(
            format_updated_at(now, chrono_tz::UTC, ""),
            "7/1/2026, 12:30:00 PM"
        );
    }
}
