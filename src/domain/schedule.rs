use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}

/// Computes the exit instant: arrival instant plus the stay duration.
///
/// `stay_time` is a time-of-day-shaped value used as a duration (hours,
/// minutes and seconds to add to the arrival moment). When the sum crosses
/// midnight the exit date rolls over to the next calendar day.
#[must_use]
pub fn exit_instant(
    coming_date: NaiveDate,
    coming_time: NaiveTime,
    stay_time: NaiveTime,
) -> (NaiveDate, NaiveTime) {
    let stay_seconds = i64::from(stay_time.num_seconds_from_midnight());
    let exit = coming_date.and_time(coming_time) + Duration::seconds(stay_seconds);
    (exit.date(), exit.time())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        parse_time(s).unwrap()
    }

    #[test]
    fn test_exit_same_day() {
        let (exit_date, exit_time) =
            exit_instant(date("2024-03-10"), time("10:00:00"), time("01:30:00"));
        assert_eq!(exit_date, date("2024-03-10"));
        assert_eq!(exit_time, time("11:30:00"));
    }

    #[test]
    fn test_exit_rolls_over_midnight() {
        let (exit_date, exit_time) =
            exit_instant(date("2024-03-10"), time("23:00:00"), time("02:30:00"));
        assert_eq!(exit_date, date("2024-03-11"));
        assert_eq!(exit_time, time("01:30:00"));
    }

    #[test]
    fn test_exit_rolls_over_month_boundary() {
        let (exit_date, exit_time) =
            exit_instant(date("2024-02-29"), time("23:59:59"), time("00:00:01"));
        assert_eq!(exit_date, date("2024-03-01"));
        assert_eq!(exit_time, time("00:00:00"));
    }

    #[test]
    fn test_zero_stay_keeps_arrival_instant() {
        let (exit_date, exit_time) =
            exit_instant(date("2024-03-10"), time("08:15:00"), time("00:00:00"));
        assert_eq!(exit_date, date("2024-03-10"));
        assert_eq!(exit_time, time("08:15:00"));
    }

    #[test]
    fn test_parse_rejects_bad_formats() {
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("10.03.2024").is_none());
        assert!(parse_date("not-a-date").is_none());
        assert!(parse_time("25:00:00").is_none());
        assert!(parse_time("10:00").is_none());
    }
}
