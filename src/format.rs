//! Format specifiers and the custom pattern engine.
//!
//! A specifier is either empty (short date), a single standard character,
//! or a custom pattern of two or more characters.

use std::fmt::{self, Write};

use crate::prelude::*;
use crate::{DATE_SEPARATOR, Date, DateError, Locale};

/// Locale-independent `YYYY-MM-DD`.
pub(crate) const ISO_PATTERN: &str = "yyyy'-'MM'-'dd";

const MAX_FRACTION_DIGITS: usize = 7;

/// The single-character format specifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StandardFormat {
    /// Locale short date pattern
    #[display(fmt = "d")]
    ShortDate,
    /// Locale long date pattern, with weekday and month names
    #[display(fmt = "D")]
    LongDate,
    /// ISO 8601 date, parseable back into an equal value
    #[display(fmt = "O")]
    RoundTrip,
    /// ISO 8601 date whose text order matches chronological order
    #[display(fmt = "s")]
    Sortable,
    #[display(fmt = "M")]
    MonthDay,
    #[display(fmt = "Y")]
    YearMonth,
}

impl StandardFormat {
    /// Resolves a format string.
    ///
    /// Returns `Ok(None)` for custom patterns (two or more characters).
    ///
    /// # Errors
    /// Returns `DateError::Format` for an unknown single-character specifier.
    pub fn from_specifier(spec: &str) -> Result<Option<Self>, DateError> {
        let mut chars = spec.chars();
        let (Some(first), None) = (chars.next(), chars.next()) else {
            return Ok(spec.is_empty().then_some(Self::ShortDate));
        };
        let format = match first {
            'd' => Self::ShortDate,
            'D' => Self::LongDate,
            'O' | 'o' => Self::RoundTrip,
            's' => Self::Sortable,
            'M' | 'm' => Self::MonthDay,
            'Y' | 'y' => Self::YearMonth,
            other => {
                _debug!(specifier = %other, "rejecting unknown format specifier");
                return Err(DateError::format(format!("Unknown format specifier '{other}'")));
            }
        };
        Ok(Some(format))
    }

    /// The custom pattern this specifier expands to under `locale`.
    pub fn pattern<L: Locale + ?Sized>(self, locale: &L) -> &str {
        match self {
            Self::ShortDate => locale.short_date_pattern(),
            Self::LongDate => locale.long_date_pattern(),
            Self::RoundTrip | Self::Sortable => ISO_PATTERN,
            Self::MonthDay => locale.month_day_pattern(),
            Self::YearMonth => locale.year_month_pattern(),
        }
    }
}

/// Expands a format string to the custom pattern it stands for.
pub(crate) fn resolve<'a, L: Locale + ?Sized>(
    spec: &'a str,
    locale: &'a L,
) -> Result<&'a str, DateError> {
    Ok(match StandardFormat::from_specifier(spec)? {
        Some(standard) => standard.pattern(locale),
        None => spec,
    })
}

/// One element of a tokenized custom pattern. Counts are the number of
/// repeated pattern letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PatternItem {
    Day(usize),
    Month(usize),
    Year(usize),
    Hour12(usize),
    Hour24(usize),
    Minute(usize),
    Second(usize),
    /// `f` (fixed width) or `F` (trailing zeros trimmed)
    Fraction { digits: usize, trim: bool },
    AmPm(usize),
    DateSeparator,
    TimeSeparator,
    Literal(String),
}

/// Splits a custom pattern into items.
///
/// # Errors
/// Returns `DateError::Format` for an unterminated quote, a dangling `\` or
/// `%`, or more than seven fraction digits.
pub(crate) fn tokenize(pattern: &str) -> Result<Vec<PatternItem>, DateError> {
    let mut items = Vec::new();
    let mut chars = pattern.chars().peekable();

    let push_literal = |items: &mut Vec<PatternItem>, c: char| {
        if let Some(PatternItem::Literal(text)) = items.last_mut() {
            text.push(c);
        } else {
            items.push(PatternItem::Literal(c.to_string()));
        }
    };

    while let Some(c) = chars.next() {
        match c {
            'd' | 'M' | 'y' | 'h' | 'H' | 'm' | 's' | 'f' | 'F' | 't' => {
                let mut count = 1;
                while chars.next_if_eq(&c).is_some() {
                    count += 1;
                }
                items.push(field(c, count, pattern)?);
            }
            '%' => match chars.next() {
                Some(next @ ('d' | 'M' | 'y' | 'h' | 'H' | 'm' | 's' | 'f' | 'F' | 't')) => {
                    items.push(field(next, 1, pattern)?);
                }
                _ => {
                    return Err(DateError::format(format!(
                        "'%' must precede a single pattern letter: {pattern}"
                    )));
                }
            },
            '\'' | '"' => {
                let quote = c;
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    if inner == quote {
                        closed = true;
                        break;
                    }
                    let literal = if inner == '\\' { chars.next() } else { Some(inner) };
                    match literal {
                        Some(ch) => push_literal(&mut items, ch),
                        None => break,
                    }
                }
                if !closed {
                    return Err(DateError::format(format!(
                        "Unterminated quote in pattern: {pattern}"
                    )));
                }
            }
            '\\' => match chars.next() {
                Some(escaped) => push_literal(&mut items, escaped),
                None => {
                    return Err(DateError::format(format!("Trailing escape in pattern: {pattern}")));
                }
            },
            '/' => items.push(PatternItem::DateSeparator),
            ':' => items.push(PatternItem::TimeSeparator),
            other => push_literal(&mut items, other),
        }
    }

    Ok(items)
}

fn field(letter: char, count: usize, pattern: &str) -> Result<PatternItem, DateError> {
    let item = match letter {
        'd' => PatternItem::Day(count.min(4)),
        'M' => PatternItem::Month(count.min(4)),
        'y' => PatternItem::Year(count),
        'h' => PatternItem::Hour12(count.min(2)),
        'H' => PatternItem::Hour24(count.min(2)),
        'm' => PatternItem::Minute(count.min(2)),
        's' => PatternItem::Second(count.min(2)),
        'f' | 'F' => {
            if count > MAX_FRACTION_DIGITS {
                return Err(DateError::format(format!(
                    "Too many fraction digits in pattern: {pattern}"
                )));
            }
            PatternItem::Fraction {
                digits: count,
                trim:   letter == 'F',
            }
        }
        _ => PatternItem::AmPm(count.min(2)),
    };
    Ok(item)
}

/// Writes `date` as zero-padded `YYYY-MM-DD`, whatever the locale.
pub(crate) fn write_iso(date: Date, out: &mut impl Write) -> fmt::Result {
    let (year, month, day) = date.ymd();
    write!(out, "{year:04}{DATE_SEPARATOR}{month:02}{DATE_SEPARATOR}{day:02}")
}

/// Renders `date` through a format string. Time fields render midnight.
pub(crate) fn format_date<L: Locale + ?Sized>(
    date: Date,
    spec: &str,
    locale: &L,
) -> Result<String, DateError> {
    let pattern = match StandardFormat::from_specifier(spec)? {
        Some(StandardFormat::RoundTrip | StandardFormat::Sortable) => {
            let mut out = String::with_capacity(10);
            // Writing into a String cannot fail
            let _ = write_iso(date, &mut out);
            return Ok(out);
        }
        Some(standard) => standard.pattern(locale),
        None => spec,
    };
    let items = tokenize(pattern)?;
    let (year, month, day) = date.ymd();
    let weekday = usize::from(date.day_of_week());
    let month_index = usize::from(month) - 1;

    let mut out = String::with_capacity(pattern.len() + 8);
    for item in &items {
        // Writing into a String cannot fail
        let _ = match *item {
            PatternItem::Day(1) => write!(out, "{day}"),
            PatternItem::Day(2) => write!(out, "{day:02}"),
            PatternItem::Day(3) => out.write_str(locale.abbreviated_day_names()[weekday]),
            PatternItem::Day(_) => out.write_str(locale.day_names()[weekday]),
            PatternItem::Month(1) => write!(out, "{month}"),
            PatternItem::Month(2) => write!(out, "{month:02}"),
            PatternItem::Month(3) => out.write_str(locale.abbreviated_month_names()[month_index]),
            PatternItem::Month(_) => out.write_str(locale.month_names()[month_index]),
            PatternItem::Year(1) => write!(out, "{}", year % 100),
            PatternItem::Year(2) => write!(out, "{:02}", year % 100),
            PatternItem::Year(width) => write!(out, "{year:0width$}"),
            PatternItem::Hour12(width) => write!(out, "{:0width$}", 12),
            PatternItem::Hour24(width)
            | PatternItem::Minute(width)
            | PatternItem::Second(width) => write!(out, "{:0width$}", 0),
            PatternItem::Fraction { digits, trim: false } => write!(out, "{:0digits$}", 0),
            PatternItem::Fraction { trim: true, .. } => Ok(()),
            PatternItem::AmPm(1) => {
                out.extend(locale.am_designator().chars().next());
                Ok(())
            }
            PatternItem::AmPm(_) => out.write_str(locale.am_designator()),
            PatternItem::DateSeparator => out.write_str(locale.date_separator()),
            PatternItem::TimeSeparator => out.write_char(crate::TIME_SEPARATOR),
            PatternItem::Literal(ref text) => out.write_str(text),
        };
    }

    Ok(out)
}
