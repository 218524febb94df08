/// Error type for date construction, arithmetic, parsing and formatting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// The (year, month, day) combination does not exist in the calendar.
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i64, month: i64, day: i64 },

    /// The year has no such day of the year (e.g. day 366 of a common year).
    #[error("Invalid day of year: {year:04}-{ordinal:03}")]
    InvalidOrdinal { year: i64, ordinal: i64 },

    /// The result falls outside `Date::MIN..=Date::MAX`.
    #[error("Date arithmetic overflowed the range 0001-01-01..=9999-12-31")]
    Overflow,

    /// Unparseable input or an invalid format specifier.
    #[error("Invalid format: {0}")]
    Format(String),
}

impl DateError {
    pub(crate) fn invalid_date(
        year: impl Into<i64>,
        month: impl Into<i64>,
        day: impl Into<i64>,
    ) -> Self {
        Self::InvalidDate {
            year:  year.into(),
            month: month.into(),
            day:   day.into(),
        }
    }

    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}
