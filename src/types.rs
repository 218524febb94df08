use crate::DateError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_BEFORE_MONTH, DAYS_IN_MONTH, DAYS_PER_4_YEARS, DAYS_PER_100_YEARS,
    DAYS_PER_400_YEARS, DAYS_PER_YEAR, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, JANUARY,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_DAY,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` (month and day reported as 1) if the
    /// value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, DateError> {
        let invalid = || DateError::invalid_date(value, JANUARY, MIN_DAY);
        let non_zero = NonZeroU16::new(value).ok_or_else(invalid)?;
        if value > MAX_YEAR {
            return Err(invalid());
        }
        Ok(Self(non_zero))
    }

    /// Wraps a year computed from a stored day count, which is never 0.
    pub(crate) const fn from_civil(value: u16) -> Self {
        match NonZeroU16::new(value) {
            Some(non_zero) => Self(non_zero),
            None => Self(NonZeroU16::MIN),
        }
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Whether this is a Gregorian leap year
    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` (year and day reported as 1) if the
    /// value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        let invalid = || DateError::invalid_date(1_u16, value, MIN_DAY);
        let non_zero = NonZeroU8::new(value).ok_or_else(invalid)?;
        if value > MAX_MONTH {
            return Err(invalid());
        }
        Ok(Self(non_zero))
    }

    /// Wraps a month computed from a stored day count, which is never 0.
    pub(crate) const fn from_civil(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(non_zero) => Self(non_zero),
            None => Self(NonZeroU8::MIN),
        }
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the value is 0 or invalid for the given year and month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, DateError> {
        let invalid = || DateError::invalid_date(year.get(), month.get(), value);
        let non_zero = NonZeroU8::new(value).ok_or_else(invalid)?;

        if value > days_in_month(year.get(), month.get()) {
            return Err(invalid());
        }

        Ok(Self(non_zero))
    }

    /// Wraps a day computed from a stored day count, which is never 0.
    pub(crate) const fn from_civil(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(non_zero) => Self(non_zero),
            None => Self(NonZeroU8::MIN),
        }
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate against a month here, so only the 1..=31 envelope
        let invalid = || DateError::invalid_date(1_u16, JANUARY, value);
        let non_zero = NonZeroU8::new(value).ok_or_else(invalid)?;
        if value > DAYS_IN_MONTH[JANUARY as usize] {
            return Err(invalid());
        }
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

/// Whether `year` is a Gregorian leap year.
pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`; February follows the leap rule.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// 366 for leap years, 365 otherwise.
pub const fn days_in_year(year: u16) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Day count (0001-01-01 = 0) of an already validated date.
pub(crate) const fn days_from_civil(year: u16, month: u8, day: u8) -> i32 {
    let y = year as i32 - 1;
    let mut days = y * DAYS_PER_YEAR + y / 4 - y / 100 + y / 400;
    days += DAYS_BEFORE_MONTH[month as usize] as i32;
    if month > FEBRUARY && is_leap_year(year) {
        days += 1;
    }
    days + day as i32 - MIN_DAY as i32
}

/// Splits a day count into (year, day-of-year), both 1-based.
pub(crate) const fn year_and_ordinal(days: i32) -> (u16, u16) {
    debug_assert!(days >= 0);

    let n400 = days / DAYS_PER_400_YEARS;
    let mut rem = days % DAYS_PER_400_YEARS;

    // The last day of a 400-year cycle would otherwise land in a fifth century
    let mut n100 = rem / DAYS_PER_100_YEARS;
    if n100 == 4 {
        n100 = 3;
    }
    rem -= n100 * DAYS_PER_100_YEARS;

    let n4 = rem / DAYS_PER_4_YEARS;
    rem -= n4 * DAYS_PER_4_YEARS;

    // Same for Dec 31 of a leap year within a 4-year block
    let mut n1 = rem / DAYS_PER_YEAR;
    if n1 == 4 {
        n1 = 3;
    }
    rem -= n1 * DAYS_PER_YEAR;

    let year = n400 * 400 + n100 * 100 + n4 * 4 + n1 + 1;
    (year as u16, rem as u16 + 1)
}

/// Month and day for a 1-based day-of-year.
pub(crate) const fn month_and_day(year: u16, ordinal: u16) -> (u8, u8) {
    let leap = is_leap_year(year);
    let mut month = MAX_MONTH;
    loop {
        let mut before = DAYS_BEFORE_MONTH[month as usize];
        if leap && month > FEBRUARY {
            before += 1;
        }
        if ordinal > before {
            return (month, (ordinal - before) as u8);
        }
        month -= 1;
    }
}
