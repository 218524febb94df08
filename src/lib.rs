#[macro_use]
mod macros;

mod consts;
mod convert;
mod error;
mod format;
pub mod locale;
mod parse;
mod prelude;
mod types;

pub use consts::*;
pub use convert::ToDate;
pub use error::DateError;
pub use format::StandardFormat;
pub use locale::{DE_DE, EN_GB, EN_US, INVARIANT, Locale, LocaleData, LocaleScope};
pub use types::{Day, Month, Year, days_in_month, days_in_year, is_leap_year};

pub use chrono::{TimeDelta, Weekday};

use crate::prelude::*;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use types::{days_from_civil, month_and_day, year_and_ordinal};

/// A calendar day with no time of day and no time zone.
///
/// Stored as the number of days elapsed since 0001-01-01, so ordering and
/// equality are plain integer comparisons. The default value is
/// [`Date::MIN`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Into)]
pub struct Date(i32);

impl Date {
    /// 0001-01-01
    pub const MIN: Self = Self(0);
    /// 9999-12-31
    pub const MAX: Self = Self(MAX_DAY_COUNT);

    /// Creates a date from calendar fields.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the year is outside 1..=9999,
    /// the month outside 1..=12, or the day does not exist in that month.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let invalid = |_| DateError::invalid_date(year, month, day);
        let year_typed = Year::new(year).map_err(invalid)?;
        let month_typed = Month::new(month).map_err(invalid)?;
        let day_typed = Day::new(day, year_typed, month_typed)?;
        Ok(Self::from_components(year_typed, month_typed, day_typed))
    }

    /// Creates a date from already validated components.
    pub const fn from_components(year: Year, month: Month, day: Day) -> Self {
        Self(days_from_civil(year.get(), month.get(), day.get()))
    }

    /// Creates a date from a year and a 1-based day of the year.
    ///
    /// # Errors
    /// Returns `DateError::InvalidOrdinal` if the year is out of range or
    /// the ordinal is 0 or exceeds the length of that year.
    pub fn from_ordinal(year: u16, day_of_year: u16) -> Result<Self, DateError> {
        let invalid = || DateError::InvalidOrdinal {
            year:    i64::from(year),
            ordinal: i64::from(day_of_year),
        };
        let year_typed = Year::new(year).map_err(|_| invalid())?;
        if day_of_year == 0 || day_of_year > days_in_year(year_typed.get()) {
            return Err(invalid());
        }
        Ok(Self(days_from_civil(year, JANUARY, MIN_DAY) + i32::from(day_of_year) - 1))
    }

    /// Creates a date from a count of days since 0001-01-01.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` if the count is outside
    /// `0..=MAX_DAY_COUNT`.
    pub const fn from_days(days: i32) -> Result<Self, DateError> {
        if days < 0 || days > MAX_DAY_COUNT {
            return Err(DateError::Overflow);
        }
        Ok(Self(days))
    }

    fn from_day_count(days: i64) -> Result<Self, DateError> {
        i32::try_from(days)
            .map_err(|_| DateError::Overflow)
            .and_then(Self::from_days)
    }

    /// Days elapsed since 0001-01-01.
    #[inline]
    pub const fn days(self) -> i32 {
        self.0
    }

    pub(crate) const fn ymd(self) -> (u16, u8, u8) {
        let (year, ordinal) = year_and_ordinal(self.0);
        let (month, day) = month_and_day(year, ordinal);
        (year, month, day)
    }

    /// Calendar year, 1..=9999.
    pub const fn year(self) -> u16 {
        year_and_ordinal(self.0).0
    }

    /// Month of the year, 1..=12.
    pub const fn month(self) -> u8 {
        self.ymd().1
    }

    /// Day of the month, starting at 1.
    pub const fn day(self) -> u8 {
        self.ymd().2
    }

    /// Day of the year, 1 for January 1st.
    pub const fn day_of_year(self) -> u16 {
        year_and_ordinal(self.0).1
    }

    /// Day of the week, counted from Sunday = 0.
    pub const fn day_of_week(self) -> u8 {
        ((self.0 + EPOCH_WEEKDAY_OFFSET) % DAYS_PER_WEEK) as u8
    }

    /// Day of the week as a chrono `Weekday`.
    pub const fn weekday(self) -> Weekday {
        parse::weekday_from_sunday(self.day_of_week())
    }

    /// The validated calendar fields of this date.
    pub const fn components(self) -> (Year, Month, Day) {
        let (year, month, day) = self.ymd();
        (Year::from_civil(year), Month::from_civil(month), Day::from_civil(day))
    }

    /// Whether this date falls in a Gregorian leap year.
    pub const fn is_leap_year(self) -> bool {
        is_leap_year(self.year())
    }

    /// Length of this date's month in days.
    pub const fn days_in_month(self) -> u8 {
        let (year, month, _) = self.ymd();
        days_in_month(year, month)
    }

    /// Shifts the date by whole days.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` if the result is outside
    /// [`Date::MIN`]..=[`Date::MAX`].
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        let target = i64::from(self.0)
            .checked_add(days)
            .ok_or(DateError::Overflow)?;
        Self::from_day_count(target)
    }

    /// Shifts the date by calendar months, clamping the day to the end of
    /// the target month: Jan 31 + 1 month is Feb 28 (or 29).
    ///
    /// # Errors
    /// Returns `DateError::Overflow` if the target year is outside 1..=9999.
    pub fn add_months(self, months: i64) -> Result<Self, DateError> {
        let (year, month, day) = self.ymd();
        let index = (i64::from(year) * i64::from(MAX_MONTH) + i64::from(month - 1))
            .checked_add(months)
            .ok_or(DateError::Overflow)?;
        let target_year = index.div_euclid(i64::from(MAX_MONTH));
        let target_month = index.rem_euclid(i64::from(MAX_MONTH)) + 1;
        Self::clamped(target_year, target_month as u8, day)
    }

    /// Shifts the date by calendar years; Feb 29 becomes Feb 28 when the
    /// target year is not a leap year.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` if the target year is outside 1..=9999.
    pub fn add_years(self, years: i64) -> Result<Self, DateError> {
        let (year, month, day) = self.ymd();
        let target_year = i64::from(year)
            .checked_add(years)
            .ok_or(DateError::Overflow)?;
        Self::clamped(target_year, month, day)
    }

    fn clamped(year: i64, month: u8, day: u8) -> Result<Self, DateError> {
        let year = u16::try_from(year)
            .ok()
            .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
            .ok_or(DateError::Overflow)?;
        let day = day.min(days_in_month(year, month));
        Ok(Self(days_from_civil(year, month, day)))
    }

    /// The next day.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` on [`Date::MAX`].
    pub fn succ(self) -> Result<Self, DateError> {
        self.add_days(1)
    }

    /// The previous day.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` on [`Date::MIN`].
    pub fn pred(self) -> Result<Self, DateError> {
        self.add_days(-1)
    }

    /// Adds a signed duration.
    ///
    /// The sum is taken at full precision from midnight of this date and the
    /// instant reached is truncated to its date, so `+1d23h` moves one day
    /// while `-1ns` moves to the previous day.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` if the result is out of range.
    pub fn checked_add(self, duration: TimeDelta) -> Result<Self, DateError> {
        self.to_timestamp()
            .checked_add_signed(duration)
            .ok_or(DateError::Overflow)
            .and_then(|instant| Self::from_timestamp(&instant))
    }

    /// Subtracts a signed duration; see [`Date::checked_add`].
    ///
    /// # Errors
    /// Returns `DateError::Overflow` if the result is out of range.
    pub fn checked_sub(self, duration: TimeDelta) -> Result<Self, DateError> {
        self.to_timestamp()
            .checked_sub_signed(duration)
            .ok_or(DateError::Overflow)
            .and_then(|instant| Self::from_timestamp(&instant))
    }

    /// Whole days from `earlier` to `self`, with no sub-day part.
    pub fn duration_since(self, earlier: Self) -> TimeDelta {
        TimeDelta::days(i64::from(self.0) - i64::from(earlier.0))
    }

    /// Parses a date under the current thread's locale. A time of day may
    /// follow the date; it is parsed and discarded.
    ///
    /// # Errors
    /// Returns `DateError::Format` if the text is not a recognisable date.
    pub fn parse(text: &str) -> Result<Self, DateError> {
        Self::parse_with(text, locale::current())
    }

    /// Parses a date under `locale`.
    ///
    /// # Errors
    /// Returns `DateError::Format` if the text is not a recognisable date.
    pub fn parse_with<L: Locale + ?Sized>(text: &str, locale: &L) -> Result<Self, DateError> {
        let result = locale.parse_timestamp(text).and_then(|timestamp| {
            Self::from_timestamp(&timestamp)
                .map_err(|_| DateError::format(format!("Date out of range: {text}")))
        });
        if let Err(ref _err) = result {
            _debug!(text, locale = locale.name(), error = %_err, "date parse failed");
        }
        result
    }

    /// Like [`Date::parse`], returning `None` instead of an error.
    pub fn try_parse(text: &str) -> Option<Self> {
        Self::parse(text).ok()
    }

    /// Like [`Date::parse_with`], returning `None` instead of an error.
    pub fn try_parse_with<L: Locale + ?Sized>(text: &str, locale: &L) -> Option<Self> {
        Self::parse_with(text, locale).ok()
    }

    /// Parses text that must match a format specifier or custom pattern
    /// exactly.
    ///
    /// # Errors
    /// Returns `DateError::Format` if the text does not match or the
    /// pattern is malformed.
    pub fn parse_exact<L: Locale + ?Sized>(
        text: &str,
        format: &str,
        locale: &L,
    ) -> Result<Self, DateError> {
        parse::parse_exact(locale, text, format)
    }

    /// Formats under the current thread's locale.
    ///
    /// # Errors
    /// Returns `DateError::Format` for an unknown specifier or malformed
    /// custom pattern.
    pub fn format(self, spec: &str) -> Result<String, DateError> {
        self.format_with(spec, locale::current())
    }

    /// Formats under `locale`.
    ///
    /// | Specifier | Output |
    /// |---|---|
    /// | `""`, `d` | short date pattern |
    /// | `D` | long date pattern |
    /// | `O`, `o`, `s` | `YYYY-MM-DD` in every locale |
    /// | `M`, `m` | month/day pattern |
    /// | `Y`, `y` | year/month pattern |
    /// | two or more characters | custom pattern |
    ///
    /// # Errors
    /// Returns `DateError::Format` for an unknown specifier or malformed
    /// custom pattern.
    pub fn format_with<L: Locale + ?Sized>(
        self,
        spec: &str,
        locale: &L,
    ) -> Result<String, DateError> {
        format::format_date(self, spec, locale)
    }

    /// The short date form under the current locale; same as `to_string()`.
    ///
    /// # Errors
    /// Returns `DateError::Format` if the locale's pattern is malformed.
    pub fn to_short_string(self) -> Result<String, DateError> {
        self.format(&StandardFormat::ShortDate.to_string())
    }

    /// The long date form under the current locale.
    ///
    /// # Errors
    /// Returns `DateError::Format` if the locale's pattern is malformed.
    pub fn to_long_string(self) -> Result<String, DateError> {
        self.format(&StandardFormat::LongDate.to_string())
    }
}

/// Writes the short date form under the current locale, or `YYYY-MM-DD`
/// when that locale's short pattern is malformed.
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_short_string() {
            Ok(rendered) => f.write_str(&rendered),
            Err(_err) => {
                _debug!(error = %_err, "short date pattern rejected, writing ISO form");
                format::write_iso(*self, f)
            }
        }
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add<TimeDelta> for Date {
    type Output = Self;

    /// # Panics
    /// Panics if the result is out of range; use [`Date::checked_add`] to
    /// handle that case.
    fn add(self, rhs: TimeDelta) -> Self {
        match self.checked_add(rhs) {
            Ok(date) => date,
            Err(_) => panic!("`Date + TimeDelta` overflowed"),
        }
    }
}

impl Sub<TimeDelta> for Date {
    type Output = Self;

    /// # Panics
    /// Panics if the result is out of range; use [`Date::checked_sub`] to
    /// handle that case.
    fn sub(self, rhs: TimeDelta) -> Self {
        match self.checked_sub(rhs) {
            Ok(date) => date,
            Err(_) => panic!("`Date - TimeDelta` overflowed"),
        }
    }
}

impl AddAssign<TimeDelta> for Date {
    fn add_assign(&mut self, rhs: TimeDelta) {
        *self = *self + rhs;
    }
}

impl SubAssign<TimeDelta> for Date {
    fn sub_assign(&mut self, rhs: TimeDelta) {
        *self = *self - rhs;
    }
}

impl Sub for Date {
    type Output = TimeDelta;

    fn sub(self, rhs: Self) -> TimeDelta {
        self.duration_since(rhs)
    }
}

impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let text = self
            .format_with(&StandardFormat::RoundTrip.to_string(), &INVARIANT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_with(&s, &INVARIANT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: u16, month: u8, day: u8) -> Date {
        Date::new(year, month, day).unwrap()
    }

    fn fields(d: Date) -> (u16, u8, u8) {
        (d.year(), d.month(), d.day())
    }

    #[test]
    fn test_default_is_min_value() {
        let d = Date::default();
        assert_eq!(d, Date::MIN);
        assert_eq!(fields(d), (1, 1, 1));
        assert_eq!(d.weekday(), Weekday::Mon);
        assert_eq!(d.day_of_year(), 1);
        assert_eq!(d.days(), 0);
    }

    #[test]
    fn test_max_value() {
        assert_eq!(fields(Date::MAX), (9999, 12, 31));
        assert_eq!(Date::MAX.day_of_year(), 365);
        assert_eq!(Date::MAX.weekday(), Weekday::Fri);
    }

    #[test]
    fn test_construct() {
        let d = date(2013, 4, 5);
        assert_eq!(fields(d), (2013, 4, 5));
        assert_eq!(d.weekday(), Weekday::Fri);
        assert_eq!(d.day_of_week(), 5);
        assert_eq!(d.day_of_year(), 31 + 28 + 31 + 5);
    }

    #[test]
    fn test_fields_round_trip_for_every_day() {
        for year in [1_u16, 4, 100, 1600, 1900, 2000, 2012, 2013, 9999] {
            for month in 1..=12 {
                for day in 1..=days_in_month(year, month) {
                    assert_eq!(fields(date(year, month, day)), (year, month, day));
                }
            }
        }
    }

    #[test]
    fn test_consecutive_days_are_consecutive_counts() {
        let mut previous = Date::MIN;
        for days in 1..=800 {
            let d = Date::from_days(days).unwrap();
            assert!(previous < d);
            assert_eq!(d.day_of_week(), (previous.day_of_week() + 1) % 7);
            previous = d;
        }
    }

    #[test]
    fn test_invalid_dates() {
        struct TestCase {
            year:  u16,
            month: u8,
            day:   u8,
        }

        let cases = [
            TestCase { year: 2013, month: 2, day: 30 },
            TestCase { year: 2013, month: 2, day: 29 },
            TestCase { year: 2013, month: 4, day: 31 },
            TestCase { year: 2013, month: 13, day: 1 },
            TestCase { year: 2013, month: 0, day: 1 },
            TestCase { year: 2013, month: 1, day: 0 },
            TestCase { year: 0, month: 1, day: 1 },
            TestCase { year: 10000, month: 1, day: 1 },
        ];

        for case in &cases {
            assert_eq!(
                Date::new(case.year, case.month, case.day),
                Err(DateError::InvalidDate {
                    year:  i64::from(case.year),
                    month: i64::from(case.month),
                    day:   i64::from(case.day),
                }),
            );
        }
    }

    #[test]
    fn test_from_ordinal() {
        assert_eq!(Date::from_ordinal(2013, 95).unwrap(), date(2013, 4, 5));
        assert_eq!(Date::from_ordinal(2012, 366).unwrap(), date(2012, 12, 31));
        assert_eq!(
            Date::from_ordinal(2013, 366),
            Err(DateError::InvalidOrdinal {
                year:    2013,
                ordinal: 366,
            })
        );
        assert_eq!(
            Date::from_ordinal(2013, 0),
            Err(DateError::InvalidOrdinal {
                year:    2013,
                ordinal: 0,
            })
        );
        assert!(matches!(Date::from_ordinal(0, 1), Err(DateError::InvalidOrdinal { .. })));
        assert_eq!(
            Date::from_ordinal(2013, 366).unwrap_err().to_string(),
            "Invalid day of year: 2013-366"
        );
    }

    #[test]
    fn test_from_days_bounds() {
        assert_eq!(Date::from_days(0), Ok(Date::MIN));
        assert_eq!(Date::from_days(MAX_DAY_COUNT), Ok(Date::MAX));
        assert_eq!(Date::from_days(-1), Err(DateError::Overflow));
        assert_eq!(Date::from_days(MAX_DAY_COUNT + 1), Err(DateError::Overflow));
        let days: i32 = date(2013, 4, 5).into();
        assert_eq!(days, 734_962);
    }

    #[test]
    fn test_components() {
        let (year, month, day) = date(2012, 2, 29).components();
        assert_eq!((year.get(), month.get(), day.get()), (2012, 2, 29));
        assert_eq!(Date::from_components(year, month, day), date(2012, 2, 29));
    }

    #[test]
    fn test_add_years() {
        assert_eq!(date(2013, 1, 30).add_years(3).unwrap(), date(2016, 1, 30));
        assert_eq!(date(2012, 2, 29).add_years(1).unwrap(), date(2013, 2, 28));
        assert_eq!(date(2012, 2, 29).add_years(4).unwrap(), date(2016, 2, 29));
        assert_eq!(date(2013, 4, 5).add_years(-5).unwrap(), date(2008, 4, 5));
    }

    #[test]
    fn test_add_months() {
        assert_eq!(date(2013, 2, 12).add_months(4).unwrap(), date(2013, 6, 12));
        assert_eq!(date(2013, 1, 30).add_months(1).unwrap(), date(2013, 2, 28));
        assert_eq!(date(2012, 1, 31).add_months(1).unwrap(), date(2012, 2, 29));
        assert_eq!(date(2013, 3, 31).add_months(-1).unwrap(), date(2013, 2, 28));
        assert_eq!(date(2013, 11, 15).add_months(3).unwrap(), date(2014, 2, 15));
        assert_eq!(date(2013, 1, 15).add_months(-13).unwrap(), date(2011, 12, 15));
        assert_eq!(date(2013, 5, 31).add_months(-12).unwrap(), date(2012, 5, 31));
    }

    #[test]
    fn test_add_days() {
        assert_eq!(date(2012, 2, 29).add_days(1).unwrap(), date(2012, 3, 1));
        assert_eq!(date(2013, 1, 1).add_days(-1).unwrap(), date(2012, 12, 31));
        assert_eq!(date(2013, 4, 5).add_days(0).unwrap(), date(2013, 4, 5));
        assert_eq!(date(2013, 4, 5).succ().unwrap(), date(2013, 4, 6));
        assert_eq!(date(2013, 4, 5).pred().unwrap(), date(2013, 4, 4));
    }

    #[test]
    fn test_arithmetic_overflow() {
        assert_eq!(Date::MAX.add_days(1), Err(DateError::Overflow));
        assert_eq!(Date::MIN.add_days(-1), Err(DateError::Overflow));
        assert_eq!(Date::MIN.add_days(i64::MIN), Err(DateError::Overflow));
        assert_eq!(Date::MAX.add_months(1), Err(DateError::Overflow));
        assert_eq!(Date::MIN.add_months(-1), Err(DateError::Overflow));
        assert_eq!(Date::MAX.add_years(1), Err(DateError::Overflow));
        assert_eq!(Date::MIN.add_years(-1), Err(DateError::Overflow));
        assert_eq!(Date::MIN.add_months(i64::MAX), Err(DateError::Overflow));
        assert_eq!(Date::MAX.succ(), Err(DateError::Overflow));
        assert_eq!(Date::MIN.pred(), Err(DateError::Overflow));
        assert_eq!(Date::MAX.checked_add(TimeDelta::days(1)), Err(DateError::Overflow));
        assert_eq!(Date::MIN.checked_sub(TimeDelta::nanoseconds(1)), Err(DateError::Overflow));
    }

    #[test]
    fn test_add_duration_without_time() {
        assert_eq!(date(2013, 4, 5) + TimeDelta::days(3), date(2013, 4, 8));
        assert_eq!(date(2013, 4, 5) - TimeDelta::days(3), date(2013, 4, 2));
    }

    #[test]
    fn test_add_duration_with_time() {
        let span = TimeDelta::days(3)
            + TimeDelta::hours(4)
            + TimeDelta::minutes(5)
            + TimeDelta::seconds(6);
        assert_eq!(date(2013, 4, 5) + span, date(2013, 4, 8));
        // 3d4h5m6s before midnight is the evening of the 1st
        assert_eq!(date(2013, 4, 5) - span, date(2013, 4, 1));
    }

    #[test]
    fn test_duration_day_boundary() {
        let d = date(2013, 4, 5);
        assert_eq!(d.checked_add(TimeDelta::hours(23)).unwrap(), d);
        assert_eq!(
            d.checked_add(TimeDelta::hours(24) - TimeDelta::nanoseconds(1)).unwrap(),
            d
        );
        assert_eq!(d.checked_add(TimeDelta::hours(24)).unwrap(), date(2013, 4, 6));
        assert_eq!(d.checked_sub(TimeDelta::nanoseconds(1)).unwrap(), date(2013, 4, 4));
        assert_eq!(d.checked_add(TimeDelta::hours(-23)).unwrap(), date(2013, 4, 4));
        assert_eq!(d.checked_sub(TimeDelta::hours(-47)).unwrap(), date(2013, 4, 6));
    }

    #[test]
    fn test_assign_operators() {
        let mut d = date(2013, 4, 5);
        d += TimeDelta::days(30);
        assert_eq!(d, date(2013, 5, 5));
        d -= TimeDelta::days(35);
        assert_eq!(d, date(2013, 3, 31));
    }

    #[test]
    #[should_panic(expected = "overflowed")]
    fn test_add_operator_panics_on_overflow() {
        let _ = Date::MAX + TimeDelta::days(1);
    }

    #[test]
    fn test_subtract_dates() {
        let ts = date(2013, 4, 7) - date(2013, 4, 5);
        assert_eq!(ts, TimeDelta::days(2));
        assert_eq!(ts.num_days(), 2);
        assert_eq!(ts.num_hours() % 24, 0);
        assert_eq!(ts.num_seconds() % 60, 0);
        assert_eq!(ts.subsec_nanos(), 0);
        assert_eq!(date(2013, 4, 5) - date(2013, 4, 7), TimeDelta::days(-2));
        assert_eq!((Date::MAX - Date::MIN).num_days(), i64::from(MAX_DAY_COUNT));
    }

    #[test]
    fn test_compare() {
        let d1 = date(2013, 4, 5);
        let d2 = date(2013, 4, 5);
        let d3 = date(2014, 4, 8);

        assert!(d1 == d2);
        assert!(d1 != d3);
        assert!(d1 <= d2);
        assert!(d1 >= d2);
        assert!(d1 < d1.add_days(3).unwrap());
        assert!(d1 < d1.add_months(4).unwrap());
        assert!(d1 < d1.add_years(5).unwrap());
        assert!(d1 <= d1.add_days(3).unwrap());
        assert!(d1 <= d1.add_months(4).unwrap());
        assert!(d1 <= d1.add_years(5).unwrap());
        assert!(d1 > d1.add_days(-3).unwrap());
        assert!(d1 > d1.add_months(-4).unwrap());
        assert!(d1 > d1.add_years(-5).unwrap());
        assert!(d1 >= d1.add_days(-3).unwrap());
        assert!(d1 >= d1.add_months(-4).unwrap());
        assert!(d1 >= d1.add_years(-5).unwrap());
    }

    #[test]
    fn test_ordering_matches_day_counts_and_fields() {
        let samples = [
            Date::MIN,
            date(1, 12, 31),
            date(1999, 12, 31),
            date(2000, 1, 1),
            date(2012, 2, 29),
            date(2013, 4, 5),
            Date::MAX,
        ];
        for a in samples {
            for b in samples {
                assert_eq!(a.cmp(&b), a.days().cmp(&b.days()));
                assert_eq!(a.cmp(&b), fields(a).cmp(&fields(b)));
                assert_eq!(a == b, fields(a) == fields(b));
            }
        }
    }

    #[test]
    fn test_display_and_short_long_strings() {
        let _scope = LocaleScope::enter(&INVARIANT);
        let d = date(2013, 4, 5);
        assert_eq!(d.to_string(), "04/05/2013");
        assert_eq!(d.to_short_string().unwrap(), "04/05/2013");
        assert_eq!(d.to_long_string().unwrap(), "Friday, 05 April 2013");
    }

    #[test]
    fn test_display_follows_scoped_locale() {
        let d = date(2013, 4, 5);
        {
            let _scope = LocaleScope::enter(&DE_DE);
            assert_eq!(d.to_string(), "05.04.2013");
            assert_eq!(d.to_long_string().unwrap(), "Freitag, 5. April 2013");
        }
        assert_eq!(d.to_string(), "04/05/2013");
    }

    #[test]
    fn test_display_survives_malformed_locale_pattern() {
        let broken: &'static LocaleData = Box::leak(Box::new(LocaleData {
            name:               "xx-broken",
            short_date_pattern: "dd 'MM",
            ..INVARIANT
        }));
        let _scope = LocaleScope::enter(broken);
        let d = date(2013, 4, 5);
        assert!(matches!(d.to_short_string(), Err(DateError::Format(_))));
        assert_eq!(d.to_string(), "2013-04-05");
        assert_eq!(Date::MIN.to_string(), "0001-01-01");
        assert_eq!(format!("{d}"), "2013-04-05");
    }

    #[test]
    fn test_round_trip_and_sortable() {
        let d = date(2013, 4, 5);
        let s1 = d.format("O").unwrap();
        let s2 = d.format("o").unwrap();
        assert_eq!(s1, s2);
        assert_eq!(s1, "2013-04-05");
        assert_eq!(d.format("s").unwrap(), "2013-04-05");
        assert!(matches!(d.format("Q"), Err(DateError::Format(_))));
    }

    #[test]
    fn test_round_trip_parses_back_in_every_locale() {
        for locale in [&INVARIANT, &EN_US, &EN_GB, &DE_DE] {
            let _scope = LocaleScope::enter(locale);
            let mut days = 0;
            while days <= MAX_DAY_COUNT {
                let d = Date::from_days(days).unwrap();
                assert_eq!(Date::parse(&d.format("O").unwrap()), Ok(d));
                days += 7919;
            }
            assert_eq!(Date::parse(&Date::MAX.format("o").unwrap()), Ok(Date::MAX));
        }
    }

    #[test]
    fn test_short_and_long_forms_parse_back() {
        let d = date(2013, 4, 5);
        for locale in [&INVARIANT, &EN_US, &EN_GB, &DE_DE] {
            let short = d.format_with("d", locale).unwrap();
            let long = d.format_with("D", locale).unwrap();
            assert_eq!(Date::parse_with(&short, locale), Ok(d), "{short}");
            assert_eq!(Date::parse_with(&long, locale), Ok(d), "{long}");
        }
    }

    #[test]
    fn test_parse() {
        let d = Date::parse("2013-04-05").unwrap();
        assert_eq!(fields(d), (2013, 4, 5));
        assert_eq!(d.weekday(), Weekday::Fri);
        assert_eq!(d.day_of_year(), 95);
    }

    #[test]
    fn test_parse_with_time() {
        let d = Date::parse("2013-04-05 6:07:08 PM").unwrap();
        assert_eq!(fields(d), (2013, 4, 5));
        assert_eq!(d.weekday(), Weekday::Fri);
        assert_eq!(d.day_of_year(), 95);
        assert_eq!("2013-04-05 6:07:08 PM".parse::<Date>(), Ok(d));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(Date::parse("abc"), Err(DateError::Format(_))));
        assert!(matches!(Date::parse("10000-01-01"), Err(DateError::Format(_))));
        assert!(matches!(Date::parse("2013-02-30"), Err(DateError::Format(_))));
        for text in ["-2013-04-05", "2013-04-05-", "2013--04--05", "04/05/2013/"] {
            assert!(matches!(Date::parse(text), Err(DateError::Format(_))), "{text}");
        }
    }

    #[test]
    fn test_try_parse() {
        assert_eq!(Date::try_parse("2013-04-05"), Some(date(2013, 4, 5)));
        assert_eq!(Date::try_parse("abc"), None);
        assert_eq!(Date::try_parse_with("05.04.2013", &DE_DE), Some(date(2013, 4, 5)));
        assert_eq!(Date::try_parse_with("05.04.2013 18:07", &DE_DE), Some(date(2013, 4, 5)));
    }

    #[test]
    fn test_parse_exact() {
        assert_eq!(Date::parse_exact("2013-04-05", "O", &INVARIANT), Ok(date(2013, 4, 5)));
        assert!(Date::parse_exact("04/05/2013", "O", &INVARIANT).is_err());
    }

    #[test]
    fn test_serde() {
        let d = date(2013, 4, 5);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2013-04-05\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);
        assert!(serde_json::from_str::<Date>("\"2013-02-30\"").is_err());
    }

    #[test]
    fn test_serde_ignores_scoped_locale() {
        let _scope = LocaleScope::enter(&EN_GB);
        let d = date(2013, 4, 5);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2013-04-05\"");
        assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), d);
    }
}
