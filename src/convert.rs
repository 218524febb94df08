//! Conversions across the timestamp boundary.
//!
//! `Date -> timestamp` widens and never fails. `timestamp -> Date` narrows:
//! everything below day resolution is dropped, and chrono's wider year range
//! means it can fail with [`DateError::Overflow`].

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::{Date, DateError};

impl Date {
    /// Truncates a timestamp to its date.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` if the timestamp's year is outside
    /// 1..=9999.
    pub fn from_timestamp(timestamp: &NaiveDateTime) -> Result<Self, DateError> {
        Self::from_naive_date(timestamp.date())
    }

    /// # Errors
    /// Returns `DateError::Overflow` if the year is outside 1..=9999.
    pub fn from_naive_date(date: NaiveDate) -> Result<Self, DateError> {
        // chrono counts 0001-01-01 as day 1
        Self::from_days(date.num_days_from_ce() - 1)
    }

    /// Midnight at the start of this day.
    pub fn to_timestamp(self) -> NaiveDateTime {
        self.to_naive_date().and_time(NaiveTime::MIN)
    }

    /// The same calendar day as a chrono date.
    pub fn to_naive_date(self) -> NaiveDate {
        // Years 1..=9999 lie inside chrono's range
        NaiveDate::from_num_days_from_ce_opt(self.days() + 1).unwrap_or_default()
    }

    /// The current date in the local time zone.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` if the system clock reports a year
    /// outside 1..=9999.
    pub fn today() -> Result<Self, DateError> {
        Local::now().to_date()
    }
}

/// Explicit, lossy narrowing of a timestamp to a [`Date`].
pub trait ToDate {
    /// # Errors
    /// Returns `DateError::Overflow` if the year is outside 1..=9999.
    fn to_date(&self) -> Result<Date, DateError>;
}

impl ToDate for NaiveDateTime {
    fn to_date(&self) -> Result<Date, DateError> {
        Date::from_timestamp(self)
    }
}

impl ToDate for NaiveDate {
    fn to_date(&self) -> Result<Date, DateError> {
        Date::from_naive_date(*self)
    }
}

/// Uses the calendar date as seen in the timestamp's own time zone.
impl<Tz: TimeZone> ToDate for DateTime<Tz> {
    fn to_date(&self) -> Result<Date, DateError> {
        Date::from_naive_date(self.date_naive())
    }
}

impl TryFrom<NaiveDateTime> for Date {
    type Error = DateError;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::from_timestamp(&value)
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = DateError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_naive_date(value)
    }
}

impl From<Date> for NaiveDateTime {
    fn from(date: Date) -> Self {
        date.to_timestamp()
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.to_naive_date()
    }
}
