//! Text to timestamp recognition.
//!
//! [`parse_timestamp`] is the lenient general parser behind
//! [`Locale::parse_timestamp`]; [`parse_exact`] matches text against a
//! format specifier or custom pattern.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::format::{self, PatternItem};
use crate::{
    DATE_TIME_SEPARATOR, Date, DateError, FRACTION_SEPARATOR, Locale, TIME_SEPARATOR,
    TWO_DIGIT_YEAR_MAX,
};

const NANOS_DIGITS: usize = 9;
const MAX_NUMBER_DIGITS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number { value: u32, digits: usize },
    Word(String),
    Separator(char),
}

fn tokenize(text: &str) -> Result<Vec<Token>, DateError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_ascii_digit() {
            let mut end = start + 1;
            while let Some((i, _)) = chars.next_if(|(_, next)| next.is_ascii_digit()) {
                end = i + 1;
            }
            let digits = &text[start..end];
            if digits.len() > MAX_NUMBER_DIGITS {
                return Err(DateError::format(format!("Number too long: {digits}")));
            }
            let value = digits
                .parse::<u32>()
                .map_err(|_| DateError::format(digits.to_owned()))?;
            tokens.push(Token::Number {
                value,
                digits: digits.len(),
            });
        } else if c.is_alphabetic() {
            let mut word = c.to_string();
            while let Some((_, next)) = chars.next_if(|(_, next)| next.is_alphabetic()) {
                word.push(next);
            }
            tokens.push(Token::Word(word));
        } else if c.is_whitespace() || c == ',' {
            // Only delimits
        } else {
            tokens.push(Token::Separator(c));
        }
    }

    Ok(tokens)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct TimeOfDay {
    hour:   u32,
    minute: u32,
    second: u32,
    nanos:  u32,
}

impl TimeOfDay {
    fn to_naive(self) -> Result<NaiveTime, DateError> {
        NaiveTime::from_hms_nano_opt(self.hour, self.minute, self.second, self.nanos)
            .ok_or_else(|| {
                DateError::format(format!(
                    "Invalid time of day {}:{:02}:{:02}",
                    self.hour, self.minute, self.second
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

fn meridiem<L: Locale + ?Sized>(locale: &L, word: &str) -> Option<Meridiem> {
    let matches =
        |designator: &str| !designator.is_empty() && designator.eq_ignore_ascii_case(word);
    // English designators are always understood, whatever the locale
    if matches(locale.am_designator()) || word.eq_ignore_ascii_case("AM") {
        Some(Meridiem::Am)
    } else if matches(locale.pm_designator()) || word.eq_ignore_ascii_case("PM") {
        Some(Meridiem::Pm)
    } else {
        None
    }
}

fn apply_meridiem(hour: u32, meridiem: Option<Meridiem>) -> Result<u32, DateError> {
    match meridiem {
        None => Ok(hour),
        Some(_) if hour == 0 || hour > 12 => Err(DateError::format(format!(
            "Hour {hour} cannot carry an AM/PM designator"
        ))),
        Some(Meridiem::Am) => Ok(hour % 12),
        Some(Meridiem::Pm) => Ok(hour % 12 + 12),
    }
}

fn number_at(tokens: &[Token], index: usize) -> Option<(u32, usize)> {
    match tokens.get(index) {
        Some(&Token::Number { value, digits }) => Some((value, digits)),
        _ => None,
    }
}

fn separator_at(tokens: &[Token], index: usize, expected: char) -> bool {
    tokens.get(index) == Some(&Token::Separator(expected))
}

fn fraction_nanos(value: u32, digits: usize) -> u32 {
    if digits >= NANOS_DIGITS {
        return value;
    }
    value * 10_u32.pow((NANOS_DIGITS - digits) as u32)
}

/// Finds `H:mm[:ss[.f]] [AM|PM]` and removes it (plus a leading `T` or a
/// trailing `Z`) from `tokens`.
fn extract_time<L: Locale + ?Sized>(
    locale: &L,
    tokens: &mut Vec<Token>,
) -> Result<Option<TimeOfDay>, DateError> {
    let Some(start) = (0..tokens.len())
        .find(|&i| number_at(tokens, i).is_some() && separator_at(tokens, i + 1, TIME_SEPARATOR))
    else {
        return Ok(None);
    };

    let mut time = TimeOfDay::default();
    let mut end = start;
    let (hour, _) = number_at(tokens, end).ok_or_else(|| DateError::format("Missing hour"))?;
    let (minute, _) =
        number_at(tokens, end + 2).ok_or_else(|| DateError::format("Missing minutes"))?;
    time.minute = minute;
    end += 3;

    if separator_at(tokens, end, TIME_SEPARATOR) {
        let (second, _) =
            number_at(tokens, end + 1).ok_or_else(|| DateError::format("Missing seconds"))?;
        time.second = second;
        end += 2;

        if separator_at(tokens, end, FRACTION_SEPARATOR) {
            if let Some((value, digits)) = number_at(tokens, end + 1) {
                time.nanos = fraction_nanos(value, digits);
                end += 2;
            }
        }
    }

    let mut designator = None;
    if let Some(Token::Word(word)) = tokens.get(end) {
        designator = meridiem(locale, word);
        if designator.is_some() || word == "Z" {
            end += 1;
        }
    }
    time.hour = apply_meridiem(hour, designator)?;

    let begin = match start.checked_sub(1).and_then(|i| tokens.get(i)) {
        Some(Token::Word(word)) if word.len() == 1 && word.starts_with(DATE_TIME_SEPARATOR) => {
            start - 1
        }
        _ => start,
    };
    tokens.drain(begin..end);

    Ok(Some(time))
}

fn lookup_name<'a>(word: &str, names: impl IntoIterator<Item = &'a str>) -> Option<usize> {
    names
        .into_iter()
        .position(|name| !name.is_empty() && name.to_lowercase() == word.to_lowercase())
}

fn month_from_word<L: Locale + ?Sized>(locale: &L, word: &str) -> Option<u32> {
    lookup_name(word, locale.month_names().iter().copied())
        .or_else(|| lookup_name(word, locale.abbreviated_month_names().iter().copied()))
        .map(|index| index as u32 + 1)
}

fn weekday_from_word<L: Locale + ?Sized>(locale: &L, word: &str) -> Option<Weekday> {
    lookup_name(word, locale.day_names().iter().copied())
        .or_else(|| lookup_name(word, locale.abbreviated_day_names().iter().copied()))
        .map(|index| weekday_from_sunday(index as u8))
}

pub(crate) const fn weekday_from_sunday(days_from_sunday: u8) -> Weekday {
    match days_from_sunday % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

const fn expand_year(value: u32, digits: usize) -> u32 {
    if digits > 2 {
        return value;
    }
    let century_base = (TWO_DIGIT_YEAR_MAX as u32 / 100) * 100;
    let candidate = century_base + value;
    if candidate > TWO_DIGIT_YEAR_MAX as u32 {
        candidate - 100
    } else {
        candidate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
}

/// Order of year, month and day in the locale's short date pattern.
fn field_order<L: Locale + ?Sized>(locale: &L) -> [Field; 3] {
    let pattern = locale.short_date_pattern();
    let position = |letter: char| pattern.find(letter).unwrap_or(usize::MAX);
    let mut order = [
        (position('y'), Field::Year),
        (position('M'), Field::Month),
        (position('d'), Field::Day),
    ];
    order.sort_by_key(|&(pos, _)| pos);
    order.map(|(_, field)| field)
}

fn build_date(year: u32, month: u32, day: u32) -> Result<NaiveDate, DateError> {
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| DateError::format(format!("Invalid date {year:04}-{month:02}-{day:02}")))
}

fn is_date_field<L: Locale + ?Sized>(locale: &L, token: Option<&Token>) -> bool {
    match token {
        Some(Token::Number { .. }) => true,
        Some(Token::Word(word)) => month_from_word(locale, word).is_some(),
        _ => false,
    }
}

fn date_from_tokens<L: Locale + ?Sized>(
    locale: &L,
    tokens: &[Token],
) -> Result<NaiveDate, DateError> {
    let mut numbers = Vec::with_capacity(3);
    let mut month_name = None;
    let mut weekday = None;
    let mut separators = Vec::new();

    for token in tokens {
        match token {
            &Token::Number { value, digits } => numbers.push((value, digits)),
            Token::Word(word) => {
                if let Some(month) = month_from_word(locale, word) {
                    if month_name.replace(month).is_some() {
                        return Err(DateError::format(format!("Repeated month name: {word}")));
                    }
                } else if let Some(day) = weekday_from_word(locale, word) {
                    if weekday.replace(day).is_some() {
                        return Err(DateError::format(format!("Repeated day name: {word}")));
                    }
                } else {
                    return Err(DateError::format(format!("Unrecognized word: {word}")));
                }
            }
            &Token::Separator(c) => {
                if c == TIME_SEPARATOR {
                    return Err(DateError::format("Misplaced time separator"));
                }
                separators.push(c);
            }
        }
    }

    // A separator always sits between two date fields
    for (index, token) in tokens.iter().enumerate() {
        if let &Token::Separator(c) = token {
            let before = index.checked_sub(1).and_then(|i| tokens.get(i));
            if !is_date_field(locale, before) || !is_date_field(locale, tokens.get(index + 1)) {
                return Err(DateError::format(format!("Misplaced date separator '{c}'")));
            }
        }
    }

    // With a month name present, punctuation such as "5. April" or
    // "05-Apr-2013" does not delimit fields
    if month_name.is_none() {
        if let Some(&first) = separators.first() {
            if let Some(&other) = separators.iter().find(|&&c| c != first) {
                return Err(DateError::format(format!(
                    "Mixed date separators ({first} and {other})"
                )));
            }
        }
        let adjacent =
            |pair: &[Token]| matches!(pair, [Token::Number { .. }, Token::Number { .. }]);
        if tokens.windows(2).any(adjacent) {
            return Err(DateError::format("Missing date separator"));
        }
    }

    let (year, month, day) = match (month_name, numbers.as_slice()) {
        (Some(month), &[(first, first_digits), (second, second_digits)]) => {
            if first_digits > 2 {
                (expand_year(first, first_digits), month, second)
            } else {
                (expand_year(second, second_digits), month, first)
            }
        }
        (Some(month), &[(year, digits)]) if digits > 2 => (year, month, 1),
        (None, &[(first, first_digits), (second, second_digits), (third, third_digits)]) => {
            if first_digits > 2 {
                (first, second, third)
            } else {
                let values = [
                    (first, first_digits),
                    (second, second_digits),
                    (third, third_digits),
                ];
                let mut year = 0;
                let mut month = 0;
                let mut day = 0;
                for (field, (value, digits)) in field_order(locale).into_iter().zip(values) {
                    match field {
                        Field::Year => year = expand_year(value, digits),
                        Field::Month => month = value,
                        Field::Day => day = value,
                    }
                }
                (year, month, day)
            }
        }
        _ => {
            return Err(DateError::format("Expected a day, a month and a year"));
        }
    };

    let date = build_date(year, month, day)?;
    match weekday {
        Some(expected) if date.weekday() != expected => Err(DateError::format(format!(
            "{date} is a {}, not a {expected}",
            date.weekday()
        ))),
        _ => Ok(date),
    }
}

/// Lenient date-and-time recognition driven by `locale`'s name tables and
/// short date field order. ISO `YYYY-MM-DD` is always accepted.
pub(crate) fn parse_timestamp<L: Locale + ?Sized>(
    locale: &L,
    text: &str,
) -> Result<NaiveDateTime, DateError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DateError::format("Empty date string"));
    }

    let mut tokens = tokenize(trimmed)?;
    let time = extract_time(locale, &mut tokens)?.unwrap_or_default();
    let date = date_from_tokens(locale, &tokens)?;

    Ok(NaiveDateTime::new(date, time.to_naive()?))
}

/// Incrementally consumes `text` while walking a tokenized pattern.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn digits(&mut self, min: usize, max: usize) -> Result<(u32, usize), DateError> {
        let count = self
            .rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if count < min {
            return Err(DateError::format(format!("Expected {min} digit(s) at '{}'", self.rest)));
        }
        let (digits, rest) = self.rest.split_at(count);
        self.rest = rest;
        let value = digits
            .parse::<u32>()
            .map_err(|_| DateError::format(digits.to_owned()))?;
        Ok((value, count))
    }

    fn literal(&mut self, expected: &str) -> Result<(), DateError> {
        match self.rest.strip_prefix(expected) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(DateError::format(format!("Expected '{expected}' at '{}'", self.rest))),
        }
    }

    /// Longest case-insensitive match among `names`, returning its index.
    fn name<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) -> Result<usize, DateError> {
        let best = names
            .into_iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .filter(|(_, name)| {
                self.rest
                    .get(..name.len())
                    .is_some_and(|prefix| prefix.to_lowercase() == name.to_lowercase())
            })
            .max_by_key(|(_, name)| name.len());
        match best {
            Some((index, name)) => {
                self.rest = &self.rest[name.len()..];
                Ok(index)
            }
            None => Err(DateError::format(format!("Expected a name at '{}'", self.rest))),
        }
    }
}

/// Parses text that must match `spec` (a standard specifier or custom
/// pattern) exactly. Fields the pattern omits default to 1.
pub(crate) fn parse_exact<L: Locale + ?Sized>(
    locale: &L,
    text: &str,
    spec: &str,
) -> Result<Date, DateError> {
    let pattern = format::resolve(spec, locale)?;
    let items = format::tokenize(pattern)?;

    let mut cursor = Cursor { rest: text };
    let mut year = 1;
    let mut month = 1;
    let mut day = 1;
    let mut weekday = None;
    let mut time = TimeOfDay::default();
    let mut hour12 = None;
    let mut designator = None;

    for item in &items {
        match *item {
            PatternItem::Day(count @ (1 | 2)) => day = cursor.digits(count, 2)?.0,
            PatternItem::Day(3) => {
                weekday = Some(cursor.name(locale.abbreviated_day_names().iter().copied())?);
            }
            PatternItem::Day(_) => weekday = Some(cursor.name(locale.day_names().iter().copied())?),
            PatternItem::Month(count @ (1 | 2)) => month = cursor.digits(count, 2)?.0,
            PatternItem::Month(3) => {
                month = cursor.name(locale.abbreviated_month_names().iter().copied())? as u32 + 1;
            }
            PatternItem::Month(_) => {
                month = cursor.name(locale.month_names().iter().copied())? as u32 + 1;
            }
            PatternItem::Year(count @ (1 | 2)) => {
                let (value, digits) = cursor.digits(count, 2)?;
                year = expand_year(value, digits);
            }
            PatternItem::Year(count) => year = cursor.digits(count.min(4), count.max(4))?.0,
            PatternItem::Hour12(count) => hour12 = Some(cursor.digits(count, 2)?.0),
            PatternItem::Hour24(count) => time.hour = cursor.digits(count, 2)?.0,
            PatternItem::Minute(count) => time.minute = cursor.digits(count, 2)?.0,
            PatternItem::Second(count) => time.second = cursor.digits(count, 2)?.0,
            PatternItem::Fraction { digits, trim } => {
                let min = if trim { 0 } else { digits };
                let (value, read) = cursor.digits(min, digits)?;
                if read > 0 {
                    time.nanos = fraction_nanos(value, read);
                }
            }
            PatternItem::AmPm(count) => {
                let am = locale.am_designator();
                let pm = locale.pm_designator();
                let (am, pm) = if count == 1 {
                    (am.get(..1).unwrap_or(am), pm.get(..1).unwrap_or(pm))
                } else {
                    (am, pm)
                };
                designator = Some(if cursor.name([am, pm])? == 0 {
                    Meridiem::Am
                } else {
                    Meridiem::Pm
                });
            }
            PatternItem::DateSeparator => cursor.literal(locale.date_separator())?,
            PatternItem::TimeSeparator => cursor.literal(":")?,
            PatternItem::Literal(ref text) => cursor.literal(text)?,
        }
    }

    if !cursor.rest.is_empty() {
        return Err(DateError::format(format!("Unexpected trailing text '{}'", cursor.rest)));
    }

    if let Some(hour) = hour12 {
        time.hour = apply_meridiem(hour, designator.or(Some(Meridiem::Am)))?;
    } else if designator == Some(Meridiem::Pm) && time.hour < 12 {
        time.hour += 12;
    }
    time.to_naive()?;

    let date = build_date(year, month, day)?;
    if weekday.is_some_and(|index| date.weekday() != weekday_from_sunday(index as u8)) {
        return Err(DateError::format(format!("{date} does not fall on the named weekday")));
    }

    Date::from_naive_date(date).map_err(|_| DateError::format(format!("{date} is out of range")))
}
