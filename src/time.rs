//! # Calendar dates, anchors and sidereal time
//!
//! Nights are requested by **local calendar date** at the observatory. This module provides
//! the explicit [`LocalDate`] value type used at the API boundary, the conversion from a local
//! wall-clock hour to a UTC [`Epoch`] (used for the nightly search anchor), and the Greenwich
//! mean sidereal time needed by the topocentric transforms.
//!
//! Local time at the MMT is a fixed offset from UTC (MST, no daylight saving), so a plain
//! hour offset is enough; no time-zone database is involved.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use hifitime::{Epoch, Unit};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_CENTURY, DPI, MJD, SIDEREAL_RATE, T2000};
use crate::ephem_errors::EphemError;

/// `YYYY/MM/DD` or `YYYY-MM-DD`, optionally followed by whitespace and a time that is ignored.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})([/-])(\d{1,2})([/-])(\d{1,2})(?:\s+\S.*)?$")
        .expect("date pattern is a valid regex")
});

/// A local calendar date at the observatory.
///
/// The value is always a valid Gregorian date that [`Epoch`] can represent: the constructors
/// are [`LocalDate::new`], [`FromStr`] and deserialization, all of which validate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawLocalDate")]
pub struct LocalDate {
    year: i32,
    month: u8,
    day: u8,
}

/// Unchecked serde form of [`LocalDate`].
#[derive(Deserialize)]
struct RawLocalDate {
    year: i32,
    month: u8,
    day: u8,
}

impl TryFrom<RawLocalDate> for LocalDate {
    type Error = EphemError;

    fn try_from(raw: RawLocalDate) -> Result<Self, Self::Error> {
        LocalDate::new(raw.year, raw.month, raw.day)
    }
}

impl LocalDate {
    /// Build a validated local date.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::InvalidDate`] if the month or day does not exist, or if the year is
    ///   outside the range of [`Epoch`].
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, EphemError> {
        Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0).map_err(|err| {
            EphemError::InvalidDate(format!("{year:04}/{month:02}/{day:02}: {err}"))
        })?;
        Ok(LocalDate { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Convert a local wall-clock hour on this date into a UTC epoch.
    ///
    /// Arguments
    /// ---------
    /// * `hour`: local hour of the day (0–23).
    /// * `utc_offset_hours`: offset of local time from UTC (−7 for MST).
    ///
    /// Return
    /// ------
    /// * The UTC [`Epoch`] of `hour:00` local time. With `hour = 12` and an offset of −7 this
    ///   is 19:00 UTC on the same date.
    pub fn local_hour_to_utc(&self, hour: u8, utc_offset_hours: i32) -> Result<Epoch, EphemError> {
        let midnight_utc =
            Epoch::maybe_from_gregorian_utc(self.year, self.month, self.day, 0, 0, 0, 0)?;
        Ok(midnight_utc + Unit::Hour * (i64::from(hour) - i64::from(utc_offset_hours)))
    }
}

impl FromStr for LocalDate {
    type Err = EphemError;

    /// Parse `YYYY/MM/DD` or `YYYY-MM-DD`.
    ///
    /// Anything after the date and a whitespace is ignored, so `"2016/02/09 19:00"` reads as
    /// 2016/02/09. Mixed separators and any other layout are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EphemError::InvalidDate(s.to_string());

        let caps = DATE_PATTERN.captures(s.trim()).ok_or_else(invalid)?;
        if caps[2] != caps[4] {
            return Err(invalid());
        }

        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u8 = caps[3].parse().map_err(|_| invalid())?;
        let day: u8 = caps[5].parse().map_err(|_| invalid())?;

        LocalDate::new(year, month, day)
    }
}

impl TryFrom<&str> for LocalDate {
    type Error = EphemError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Format an epoch as local wall-clock time, `YYYY/MM/DD HH:MM:SS`.
pub fn format_local(epoch: &Epoch, utc_offset_hours: i32) -> String {
    let local = *epoch + Unit::Hour * i64::from(utc_offset_hours);
    let (y, m, d, hh, mm, ss, _) = local.to_gregorian_utc();
    format!("{y:04}/{m:02}/{d:02} {hh:02}:{mm:02}:{ss:02}")
}

/// Julian centuries of TT elapsed since J2000.0.
pub fn centuries_since_j2000(epoch: &Epoch) -> f64 {
    (epoch.to_mjd_tt_days() - T2000) / DAYS_PER_CENTURY
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # Details
/// The GMST is computed in two steps:
/// 1. Use a cubic polynomial (coefficients C0–C3) to get GMST at 0h UT1
///    in seconds for the given date.
/// 2. Add the contribution of Earth's rotation during the fractional day
///    using [`SIDEREAL_RATE`], which converts solar days to sidereal days.
///
/// UT1 is taken equal to UTC across the crate; the |UT1 − UTC| < 0.9 s difference moves
/// the sky by less than 15″.
pub fn gmst(tjm: MJD) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / DAYS_PER_CENTURY;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / 86400.0;

    let h = (tjm - itjm) * DPI;
    (gmst0 + h * SIDEREAL_RATE).rem_euclid(DPI)
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_parse_local_date() {
        let date: LocalDate = "2016/02/09".parse().unwrap();
        assert_eq!(date, LocalDate::new(2016, 2, 9).unwrap());

        let date: LocalDate = "2016-02-09".parse().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2016, 2, 9));

        // trailing time is discarded
        let date: LocalDate = "2016/02/09 19:00".parse().unwrap();
        assert_eq!(date.to_string(), "2016/02/09");

        let date = LocalDate::try_from("  2024/2/29 ").unwrap();
        assert_eq!(date.to_string(), "2024/02/29");
    }

    #[test]
    fn test_reject_invalid_dates() {
        for bad in [
            "2016/13/01",
            "2016/02/30",
            "2015/02/29",
            "2016/00/10",
            "2016/02/00",
            "2016-02/09",
            "09/02/2016",
            "tomorrow",
            "",
            "2016/02/09T19:00",
        ] {
            assert!(
                matches!(bad.parse::<LocalDate>(), Err(EphemError::InvalidDate(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_reject_unrepresentable_years() {
        assert!(matches!(
            LocalDate::new(i32::MAX, 1, 1),
            Err(EphemError::InvalidDate(_))
        ));
        assert!(matches!(
            LocalDate::new(i32::MIN, 6, 15),
            Err(EphemError::InvalidDate(_))
        ));
        assert!(LocalDate::new(1900, 2, 28).is_ok());
        assert!(LocalDate::new(1900, 2, 29).is_err());
        assert!(LocalDate::new(2000, 2, 29).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        use serde::de::value::{Error as ValueError, SeqDeserializer};

        let fields =
            |day: i32| SeqDeserializer::<_, ValueError>::new([2016, 2, day].into_iter());
        let date = LocalDate::deserialize(fields(9)).unwrap();
        assert_eq!(date, LocalDate::new(2016, 2, 9).unwrap());

        let err = LocalDate::deserialize(fields(30)).unwrap_err();
        assert!(err.to_string().starts_with("Invalid date: 2016/02/30"), "{err}");
    }

    #[test]
    fn test_local_noon_anchor() {
        let date = LocalDate::new(2016, 2, 9).unwrap();
        let anchor = date.local_hour_to_utc(12, -7).unwrap();
        assert_eq!(anchor, Epoch::from_gregorian_utc_hms(2016, 2, 9, 19, 0, 0));

        let late = date.local_hour_to_utc(20, -7).unwrap();
        assert_eq!(late, Epoch::from_gregorian_utc_hms(2016, 2, 10, 3, 0, 0));
    }

    #[test]
    fn test_format_local() {
        let epoch = Epoch::from_gregorian_utc_hms(2016, 2, 10, 1, 5, 30);
        assert_eq!(format_local(&epoch, -7), "2016/02/09 18:05:30");
    }

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        approx::assert_relative_eq!(gmst(tut), 4.851925725092499, epsilon = 1e-9);

        approx::assert_relative_eq!(gmst(T2000), 4.894961212789145, epsilon = 1e-9);
    }
}
