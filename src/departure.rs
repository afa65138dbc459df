use crate::error::{ExposureError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// parse an RFC 3339 departure; a timestamp without an offset is refused
pub fn parse_departure(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text.trim()).map_err(|err| {
        if NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%dT%H:%M:%S").is_ok() {
            ExposureError::ClockSkew(format!("'{}' carries no UTC offset", text))
        } else {
            ExposureError::ClockSkew(format!("'{}': {}", text, err))
        }
    })
}

/// combine a local `YYYY-MM-DD` date and `HH:MM` time with a fixed UTC offset
pub fn local_departure(
    date: &str,
    time: &str,
    offset_minutes: i32,
) -> Result<DateTime<FixedOffset>> {
    let offset = offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            ExposureError::ClockSkew(format!(
                "offset of {} minutes is out of range",
                offset_minutes
            ))
        })?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|err| ExposureError::ClockSkew(format!("date '{}': {}", date, err)))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|err| ExposureError::ClockSkew(format!("time '{}': {}", time, err)))?;

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| ExposureError::ClockSkew(format!("{} {} is ambiguous", date, time)))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;

    #[test]
    fn rfc3339_keeps_offset() {
        let departure = parse_departure("2024-12-21T12:00:00+05:30").unwrap();
        assert_eq!(departure.offset().local_minus_utc(), 19800);
        assert_eq!(
            departure.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 12, 21, 6, 30, 0).unwrap()
        );
    }

    #[test]
    fn naive_timestamp_is_clock_skew() {
        assert!(matches!(
            parse_departure("2024-12-21T12:00:00"),
            Err(ExposureError::ClockSkew(message)) if message.contains("no UTC offset")
        ));
        assert!(matches!(
            parse_departure("noon"),
            Err(ExposureError::ClockSkew(_))
        ));
    }

    #[test]
    fn local_date_and_time() {
        let departure = local_departure("2024-06-21", "06:30", 330).unwrap();
        assert_eq!(
            departure.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 6, 21, 1, 0, 0).unwrap()
        );
    }

    #[test]
    fn local_departure_rejects_garbage() {
        assert!(local_departure("2024-13-01", "06:30", 330).is_err());
        assert!(local_departure("2024-06-21", "25:00", 330).is_err());
        assert!(local_departure("2024-06-21", "06:30", 24 * 60).is_err());
    }

    #[test]
    fn oversized_offset_is_clock_skew() {
        // 71582789 * 60 wraps to 44 seconds in 32 bits
        for minutes in [i32::MAX, i32::MIN, 71_582_789, -71_582_789] {
            assert!(matches!(
                local_departure("2024-06-21", "06:30", minutes),
                Err(ExposureError::ClockSkew(message)) if message.contains("out of range")
            ));
        }
    }
}
