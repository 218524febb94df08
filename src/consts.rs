/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days elapsed before the first of each month in a non-leap year
/// (index 0 unused)
pub(crate) const DAYS_BEFORE_MONTH: [u16; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

pub(crate) const DAYS_PER_YEAR: i32 = 365;
pub(crate) const DAYS_PER_4_YEARS: i32 = DAYS_PER_YEAR * 4 + 1;
pub(crate) const DAYS_PER_100_YEARS: i32 = DAYS_PER_4_YEARS * 25 - 1;
pub(crate) const DAYS_PER_400_YEARS: i32 = DAYS_PER_100_YEARS * 4 + 1;
pub(crate) const DAYS_PER_WEEK: i32 = 7;

/// Days from 0001-01-01 to 10000-01-01 (25 Gregorian cycles less the
/// 366-day year 0)
pub(crate) const DAYS_TO_10000: i32 = DAYS_PER_400_YEARS * 25 - 366;

/// Day count of 9999-12-31, counted from 0001-01-01 as day 0
pub const MAX_DAY_COUNT: i32 = DAYS_TO_10000 - 1;

/// 0001-01-01 is a Monday; Sunday-based weekday numbers are offset by one
pub(crate) const EPOCH_WEEKDAY_OFFSET: i32 = 1;

/// Two-digit years up to this value are read as 20xx, later ones as 19xx
pub const TWO_DIGIT_YEAR_MAX: u16 = 2049;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';
/// Date/time separator in ISO 8601 combined forms
pub const DATE_TIME_SEPARATOR: char = 'T';
/// Fractional seconds separator
pub const FRACTION_SEPARATOR: char = '.';
