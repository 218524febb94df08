//! Locale service: name tables, pattern strings and the general timestamp
//! parser that `Date` consults when parsing and formatting.
//!
//! The active locale is scoped per thread. [`LocaleScope`] swaps it in and
//! puts the previous one back when dropped, so concurrent callers on other
//! threads never observe the change.

use std::cell::Cell;
use std::marker::PhantomData;

use chrono::NaiveDateTime;

use crate::{DateError, parse};

/// Supplies culture-specific names and patterns.
///
/// Day-name tables start at Sunday; month-name tables start at January.
pub trait Locale {
    /// Culture name, e.g. `en-US`. Empty for the invariant locale.
    fn name(&self) -> &str;
    /// Full month names, January first.
    fn month_names(&self) -> &[&str; 12];
    /// Abbreviated month names, January first.
    fn abbreviated_month_names(&self) -> &[&str; 12];
    /// Full day names, Sunday first.
    fn day_names(&self) -> &[&str; 7];
    /// Abbreviated day names, Sunday first.
    fn abbreviated_day_names(&self) -> &[&str; 7];
    /// Custom pattern behind the `d` specifier.
    fn short_date_pattern(&self) -> &str;
    /// Custom pattern behind the `D` specifier.
    fn long_date_pattern(&self) -> &str;
    /// Custom pattern behind the `M` specifier.
    fn month_day_pattern(&self) -> &str;
    /// Custom pattern behind the `Y` specifier.
    fn year_month_pattern(&self) -> &str;
    /// Substituted for `/` in patterns.
    fn date_separator(&self) -> &str;
    /// Morning designator; empty when the locale uses a 24-hour clock.
    fn am_designator(&self) -> &str;
    /// Afternoon designator; empty when the locale uses a 24-hour clock.
    fn pm_designator(&self) -> &str;

    /// Parses a date with an optional time of day into a timestamp.
    ///
    /// # Errors
    /// Returns `DateError::Format` if the text is not recognised.
    fn parse_timestamp(&self, text: &str) -> Result<NaiveDateTime, DateError> {
        parse::parse_timestamp(self, text)
    }
}

/// A static table of locale data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleData {
    pub name:                    &'static str,
    pub month_names:             [&'static str; 12],
    pub abbreviated_month_names: [&'static str; 12],
    pub day_names:               [&'static str; 7],
    pub abbreviated_day_names:   [&'static str; 7],
    pub short_date_pattern:      &'static str,
    pub long_date_pattern:       &'static str,
    pub month_day_pattern:       &'static str,
    pub year_month_pattern:      &'static str,
    pub date_separator:          &'static str,
    pub am_designator:           &'static str,
    pub pm_designator:           &'static str,
}

impl Locale for LocaleData {
    fn name(&self) -> &str {
        self.name
    }

    fn month_names(&self) -> &[&str; 12] {
        &self.month_names
    }

    fn abbreviated_month_names(&self) -> &[&str; 12] {
        &self.abbreviated_month_names
    }

    fn day_names(&self) -> &[&str; 7] {
        &self.day_names
    }

    fn abbreviated_day_names(&self) -> &[&str; 7] {
        &self.abbreviated_day_names
    }

    fn short_date_pattern(&self) -> &str {
        self.short_date_pattern
    }

    fn long_date_pattern(&self) -> &str {
        self.long_date_pattern
    }

    fn month_day_pattern(&self) -> &str {
        self.month_day_pattern
    }

    fn year_month_pattern(&self) -> &str {
        self.year_month_pattern
    }

    fn date_separator(&self) -> &str {
        self.date_separator
    }

    fn am_designator(&self) -> &str {
        self.am_designator
    }

    fn pm_designator(&self) -> &str {
        self.pm_designator
    }
}

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const ENGLISH_MONTHS_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const ENGLISH_DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const ENGLISH_DAYS_ABBR: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Culture-independent locale; the default for every thread.
pub static INVARIANT: LocaleData = LocaleData {
    name:                    "",
    month_names:             ENGLISH_MONTHS,
    abbreviated_month_names: ENGLISH_MONTHS_ABBR,
    day_names:               ENGLISH_DAYS,
    abbreviated_day_names:   ENGLISH_DAYS_ABBR,
    short_date_pattern:      "MM/dd/yyyy",
    long_date_pattern:       "dddd, dd MMMM yyyy",
    month_day_pattern:       "MMMM dd",
    year_month_pattern:      "yyyy MMMM",
    date_separator:          "/",
    am_designator:           "AM",
    pm_designator:           "PM",
};

/// English (United States).
pub static EN_US: LocaleData = LocaleData {
    name:                    "en-US",
    month_names:             ENGLISH_MONTHS,
    abbreviated_month_names: ENGLISH_MONTHS_ABBR,
    day_names:               ENGLISH_DAYS,
    abbreviated_day_names:   ENGLISH_DAYS_ABBR,
    short_date_pattern:      "M/d/yyyy",
    long_date_pattern:       "dddd, MMMM d, yyyy",
    month_day_pattern:       "MMMM d",
    year_month_pattern:      "MMMM yyyy",
    date_separator:          "/",
    am_designator:           "AM",
    pm_designator:           "PM",
};

/// English (United Kingdom).
pub static EN_GB: LocaleData = LocaleData {
    name:                    "en-GB",
    month_names:             ENGLISH_MONTHS,
    abbreviated_month_names: ENGLISH_MONTHS_ABBR,
    day_names:               ENGLISH_DAYS,
    abbreviated_day_names:   ENGLISH_DAYS_ABBR,
    short_date_pattern:      "dd/MM/yyyy",
    long_date_pattern:       "dddd, d MMMM yyyy",
    month_day_pattern:       "d MMMM",
    year_month_pattern:      "MMMM yyyy",
    date_separator:          "/",
    am_designator:           "am",
    pm_designator:           "pm",
};

/// German (Germany).
pub static DE_DE: LocaleData = LocaleData {
    name:                    "de-DE",
    month_names:             [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    abbreviated_month_names: [
        "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ],
    day_names:               [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    abbreviated_day_names:   ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
    short_date_pattern:      "dd.MM.yyyy",
    long_date_pattern:       "dddd, d. MMMM yyyy",
    month_day_pattern:       "d. MMMM",
    year_month_pattern:      "MMMM yyyy",
    date_separator:          ".",
    am_designator:           "",
    pm_designator:           "",
};

static BUILTIN: [&LocaleData; 4] = [&INVARIANT, &EN_US, &EN_GB, &DE_DE];

impl LocaleData {
    /// Looks up a built-in locale by culture name, ignoring ASCII case.
    /// `""` and `"invariant"` both name [`INVARIANT`].
    pub fn by_name(name: &str) -> Option<&'static Self> {
        if name.eq_ignore_ascii_case("invariant") {
            return Some(&INVARIANT);
        }
        BUILTIN
            .iter()
            .copied()
            .find(|locale| locale.name.eq_ignore_ascii_case(name))
    }
}

thread_local! {
    static CURRENT: Cell<&'static dyn Locale> = Cell::new(&INVARIANT as &'static dyn Locale);
}

/// The locale active on the current thread.
pub fn current() -> &'static dyn Locale {
    CURRENT.with(Cell::get)
}

/// Makes a locale current for this thread until the guard is dropped.
///
/// Scopes nest; dropping a guard restores whatever was active when it was
/// entered, including during unwinding.
#[must_use = "the previous locale is restored as soon as the scope is dropped"]
pub struct LocaleScope {
    previous: &'static dyn Locale,
    // Restoration must happen on the thread that entered the scope.
    _not_send: PhantomData<*const ()>,
}

impl LocaleScope {
    /// Makes `locale` current for this thread and returns the guard.
    pub fn enter(locale: &'static dyn Locale) -> Self {
        _trace!(locale = locale.name(), "entering locale scope");
        let previous = CURRENT.with(|current| current.replace(locale));
        Self {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for LocaleScope {
    fn drop(&mut self) {
        _trace!(locale = self.previous.name(), "restoring locale");
        CURRENT.with(|current| current.set(self.previous));
    }
}

/// Runs `f` with `locale` as the current locale.
pub fn with_locale<R>(locale: &'static dyn Locale, f: impl FnOnce() -> R) -> R {
    let _scope = LocaleScope::enter(locale);
    f()
}
