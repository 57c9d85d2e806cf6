use chrono::{DateTime, SubsecRound, Utc};

pub type UtcTimestamp = DateTime<Utc>;

/// Format of the human readable timestamp attached to each ground track point,
/// e.g. `May 27 '20, 6:00:00 am (UTC)`
pub const TRACK_TIMESTAMP_FORMAT: &str = "%b %-d '%y, %-I:%M:%S %P (UTC)";

/// Drops the sub-second part, positions are only ever computed on whole seconds
pub fn truncate_to_seconds(t: UtcTimestamp) -> UtcTimestamp {
    t.trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn truncation() {
        let t = Utc
            .with_ymd_and_hms(2020, 5, 27, 6, 0, 12)
            .unwrap()
            .with_nanosecond(987_000_000)
            .unwrap();
        let tr = truncate_to_seconds(t);
        assert_eq!(tr.nanosecond(), 0);
        assert_eq!(tr.second(), 12);
    }

    #[test]
    fn track_timestamp_format() {
        let t = Utc.with_ymd_and_hms(2020, 5, 27, 6, 0, 0).unwrap();
        assert_eq!(
            t.format(TRACK_TIMESTAMP_FORMAT).to_string(),
            "May 27 '20, 6:00:00 am (UTC)"
        );
        let t = Utc.with_ymd_and_hms(2023, 12, 3, 18, 4, 9).unwrap();
        assert_eq!(
            t.format(TRACK_TIMESTAMP_FORMAT).to_string(),
            "Dec 3 '23, 6:04:09 pm (UTC)"
        );
    }
}
