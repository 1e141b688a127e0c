//! Local civil time to Julian Day (UT).

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::input::BirthInput;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT, used here as UT).
pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// A birth instant expressed as a Julian Day in UT.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDay(f64);

impl JulianDay {
    pub const J2000: JulianDay = JulianDay(J2000_JD);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn days_since_j2000(self) -> f64 {
        self.0 - J2000_JD
    }

    /// Julian centuries since J2000.0, the `T` of every polynomial below.
    pub fn centuries_since_j2000(self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }

    pub fn offset_days(self, days: f64) -> Self {
        Self(self.0 + days)
    }
}

/// Convert a validated birth record to a Julian Day in UT.
///
/// The civil time is read in the record's IANA zone using that zone's
/// historical offset and DST rules. Ambiguous local times (autumn fold)
/// resolve to the earlier instant; local times that do not exist (spring
/// gap) are pushed forward by one hour.
pub fn to_julian_day(input: &BirthInput) -> Result<JulianDay, EngineError> {
    let utc = local_to_utc(input)?;
    Ok(julian_day_from_utc(&utc))
}

/// Resolve the record's local civil time to a UTC instant.
pub fn local_to_utc(input: &BirthInput) -> Result<DateTime<Utc>, EngineError> {
    input.validate()?;

    let tz: Tz = input.timezone.parse().map_err(|_| {
        EngineError::invalid(
            "timezone",
            format!("unknown IANA timezone '{}'", input.timezone),
        )
    })?;

    let naive = NaiveDate::from_ymd_opt(input.year, input.month, input.day)
        .and_then(|date| date.and_hms_opt(input.hour, input.minute, 0))
        .ok_or_else(|| EngineError::invalid("date", "not a valid calendar instant"))?;

    let mapped = tz.from_local_datetime(&naive);
    let local = match mapped.single() {
        Some(dt) => dt,
        None => match mapped.earliest() {
            Some(dt) => {
                log::warn!(
                    "local time {naive} is ambiguous in {tz}; using the earlier instant"
                );
                dt
            }
            None => {
                log::warn!("local time {naive} falls in a DST gap in {tz}; shifting forward 1h");
                tz.from_local_datetime(&(naive + Duration::hours(1)))
                    .earliest()
                    .ok_or_else(|| {
                        EngineError::invalid(
                            "timezone",
                            format!("local time {naive} does not exist in {tz}"),
                        )
                    })?
            }
        },
    };

    Ok(local.with_timezone(&Utc))
}

/// Julian Day for a UTC instant.
pub fn julian_day_from_utc(dt: &DateTime<Utc>) -> JulianDay {
    let hour_decimal =
        dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;
    JulianDay(gregorian_julian_day(
        dt.year(),
        dt.month(),
        dt.day(),
        hour_decimal,
    ))
}

/// Gregorian-calendar Julian Day (Meeus, Astronomical Algorithms, eq. 7.1).
pub fn gregorian_julian_day(year: i32, month: u32, day: u32, hour_decimal: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + hour_decimal / 24.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(tz: &str, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> BirthInput {
        BirthInput {
            year,
            month,
            day,
            hour,
            minute,
            latitude: 0.0,
            longitude: 0.0,
            timezone: tz.to_string(),
            name: None,
        }
    }

    #[test]
    fn j2000_noon_utc() {
        let jd = to_julian_day(&input("UTC", 2000, 1, 1, 12, 0)).unwrap();
        assert!((jd.value() - J2000_JD).abs() < 1e-9);
        assert_eq!(jd.centuries_since_j2000(), 0.0);
    }

    #[test]
    fn meeus_reference_dates() {
        // Meeus example 7.a: 1957 Oct 4.81
        let jd = gregorian_julian_day(1957, 10, 4, 0.81 * 24.0);
        assert!((jd - 2_436_116.31).abs() < 1e-6);
        // January exercises the month shift.
        let jd = gregorian_julian_day(1987, 1, 27, 0.0);
        assert!((jd - 2_446_822.5).abs() < 1e-9);
    }

    #[test]
    fn applies_zone_offset() {
        // 08:00 in New York in winter is 13:00 UTC.
        let ny = to_julian_day(&input("America/New_York", 2021, 1, 15, 8, 0)).unwrap();
        let utc = to_julian_day(&input("UTC", 2021, 1, 15, 13, 0)).unwrap();
        assert!((ny.value() - utc.value()).abs() < 1e-9);
    }

    #[test]
    fn applies_historical_dst() {
        // Summer time in London: 12:00 BST is 11:00 UTC.
        let london = to_julian_day(&input("Europe/London", 1985, 7, 1, 12, 0)).unwrap();
        let utc = to_julian_day(&input("UTC", 1985, 7, 1, 11, 0)).unwrap();
        assert!((london.value() - utc.value()).abs() < 1e-9);
    }

    #[test]
    fn spring_gap_shifts_forward() {
        // 02:30 on 2021-03-14 does not exist in New York; 03:30 EDT is 07:30 UTC.
        let gap = local_to_utc(&input("America/New_York", 2021, 3, 14, 2, 30)).unwrap();
        assert_eq!(gap.hour(), 7);
        assert_eq!(gap.minute(), 30);
    }

    #[test]
    fn autumn_fold_takes_earlier_instant() {
        // 01:30 on 2021-11-07 happens twice in New York; EDT comes first.
        let fold = local_to_utc(&input("America/New_York", 2021, 11, 7, 1, 30)).unwrap();
        assert_eq!(fold.hour(), 5);
    }

    #[test]
    fn unknown_timezone_is_invalid_input() {
        let err = to_julian_day(&input("Mars/Olympus_Mons", 2000, 1, 1, 0, 0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { field: "timezone", .. }));
    }

    #[test]
    fn out_of_range_date_is_invalid_input() {
        let err = to_julian_day(&input("UTC", 2001, 4, 31, 0, 0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { field: "day", .. }));
    }
}
