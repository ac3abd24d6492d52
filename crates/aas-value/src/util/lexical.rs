//! XML Schema lexical-space checks for the `xs:` value types used by AAS.
//!
//! Dates and times use the same calendar arithmetic as RFC 3339 but accept
//! the XSD extensions: signed and five-digit years, optional timezones and
//! the partial Gregorian types (`gYear`, `gMonthDay`, ...).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Largest timezone offset XSD allows (14:00).
const MAX_OFFSET_MINUTES: i16 = 14 * 60;

/// Number of decimal digits that always fit in an `i128`.
const I128_SAFE_DIGITS: usize = 38;

/// Error type for lexical check failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    pub message: String,
}

impl std::fmt::Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LexicalError {}

fn invalid(what: &str, raw: &str) -> LexicalError {
    LexicalError {
        message: format!("Invalid {}: {}", what, raw),
    }
}

/// Returns true if `s` is a non-empty run of ASCII digits.
fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses exactly `len` ASCII digits.
fn fixed_digits(s: &str, len: usize) -> Option<u32> {
    if s.len() != len || !all_digits(s) {
        return None;
    }
    s.parse().ok()
}

// =====================
// Calendar helpers
// =====================

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Splits a trailing timezone (`Z`, `+HH:MM`, `-HH:MM`) off a lexical value.
fn split_timezone(s: &str) -> (&str, Option<&str>) {
    if let Some(body) = s.strip_suffix('Z') {
        return (body, Some("Z"));
    }
    let bytes = s.as_bytes();
    if bytes.len() >= 6 {
        let start = bytes.len() - 6;
        if (bytes[start] == b'+' || bytes[start] == b'-') && bytes[start + 3] == b':' {
            return (&s[..start], Some(&s[start..]));
        }
    }
    (s, None)
}

/// Parses a timezone offset string and returns the offset in minutes.
fn parse_timezone_offset(offset: &str) -> Result<i16, LexicalError> {
    if offset == "Z" {
        return Ok(0);
    }

    let sign = match offset.as_bytes().first() {
        Some(b'+') => 1i16,
        Some(b'-') => -1i16,
        _ => return Err(invalid("timezone offset", offset)),
    };

    if offset.len() != 6 || !offset.is_ascii() || offset.as_bytes()[3] != b':' {
        return Err(invalid("timezone offset", offset));
    }

    let hours = fixed_digits(&offset[1..3], 2).ok_or_else(|| invalid("timezone offset", offset))?;
    let minutes =
        fixed_digits(&offset[4..6], 2).ok_or_else(|| invalid("timezone offset", offset))?;

    if minutes > 59 {
        return Err(invalid("timezone offset", offset));
    }

    let total = sign * (hours as i16 * 60 + minutes as i16);
    if total.abs() > MAX_OFFSET_MINUTES {
        return Err(LexicalError {
            message: format!("Timezone offset out of range [-14:00, +14:00]: {}", offset),
        });
    }

    Ok(total)
}

fn check_timezone(tz: Option<&str>) -> Result<(), LexicalError> {
    match tz {
        Some(s) => parse_timezone_offset(s).map(|_| ()),
        None => Ok(()),
    }
}

/// Parses an XSD year: optional `-`, at least four digits, and no leading
/// zero when more than four digits are used.
fn parse_year(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if digits.len() < 4 || !all_digits(digits) {
        return None;
    }
    if digits.len() > 4 && digits.starts_with('0') {
        return None;
    }
    let year: i64 = digits.parse().ok()?;
    Some(if negative { -year } else { year })
}

/// Splits the leading year off a date-like value, returning the remainder.
fn split_year(s: &str) -> Option<(i64, &str)> {
    let skip = usize::from(s.starts_with('-'));
    let end = s[skip..].find('-').map(|i| i + skip).unwrap_or(s.len());
    let year = parse_year(&s[..end])?;
    Some((year, &s[end..]))
}

/// Checks `YYYY-MM-DD` without timezone.
fn check_date_body(body: &str) -> bool {
    let Some((year, rest)) = split_year(body) else {
        return false;
    };
    if rest.len() != 6 || !rest.is_ascii() || !rest.starts_with('-') || rest.as_bytes()[3] != b'-' {
        return false;
    }
    let (Some(month), Some(day)) = (fixed_digits(&rest[1..3], 2), fixed_digits(&rest[4..6], 2))
    else {
        return false;
    };
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

/// Checks `HH:MM:SS[.s+]` without timezone.
fn check_time_body(body: &str) -> bool {
    if body.len() < 8 || !body.is_ascii() || body.as_bytes()[2] != b':' || body.as_bytes()[5] != b':'
    {
        return false;
    }
    let (Some(hours), Some(minutes), Some(seconds)) = (
        fixed_digits(&body[..2], 2),
        fixed_digits(&body[3..5], 2),
        fixed_digits(&body[6..8], 2),
    ) else {
        return false;
    };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return false;
    }
    let rest = &body[8..];
    rest.is_empty() || rest.strip_prefix('.').is_some_and(all_digits)
}

// =====================
// Date and time
// =====================

/// Checks an `xs:date` value (`-?YYYY-MM-DD` with optional timezone).
pub fn check_date(raw: &str) -> Result<(), LexicalError> {
    let (body, tz) = split_timezone(raw);
    if !check_date_body(body) {
        return Err(invalid("date", raw));
    }
    check_timezone(tz)
}

/// Checks an `xs:time` value (`HH:MM:SS[.s+]` with optional timezone).
pub fn check_time(raw: &str) -> Result<(), LexicalError> {
    let (body, tz) = split_timezone(raw);
    if !check_time_body(body) {
        return Err(invalid("time", raw));
    }
    check_timezone(tz)
}

/// Checks an `xs:dateTime` value (`date 'T' time` with optional timezone).
pub fn check_date_time(raw: &str) -> Result<(), LexicalError> {
    let (body, tz) = split_timezone(raw);
    let Some((date, time)) = body.split_once('T') else {
        return Err(invalid("dateTime", raw));
    };
    if !check_date_body(date) || !check_time_body(time) {
        return Err(invalid("dateTime", raw));
    }
    check_timezone(tz)
}

/// Checks an `xs:duration` value such as `P1Y2M3DT4H5M6.5S` or `-PT15M`.
pub fn check_duration(raw: &str) -> Result<(), LexicalError> {
    let unsigned = raw.strip_prefix('-').unwrap_or(raw);
    let body = unsigned
        .strip_prefix('P')
        .ok_or_else(|| invalid("duration", raw))?;

    let (date_part, time_part) = match body.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (body, None),
    };

    let mut components =
        scan_duration_components(date_part, &['Y', 'M', 'D']).ok_or_else(|| invalid("duration", raw))?;
    if let Some(time) = time_part {
        let count =
            scan_duration_components(time, &['H', 'M', 'S']).ok_or_else(|| invalid("duration", raw))?;
        // `T` must introduce at least one time component
        if count == 0 {
            return Err(invalid("duration", raw));
        }
        components += count;
    }

    if components == 0 {
        return Err(invalid("duration", raw));
    }
    Ok(())
}

/// Scans `nX` components in designator order; only seconds may be fractional.
fn scan_duration_components(s: &str, designators: &[char]) -> Option<usize> {
    let mut rest = s;
    let mut next = 0;
    let mut count = 0;

    while !rest.is_empty() {
        let end = rest.find(|c: char| !(c.is_ascii_digit() || c == '.'))?;
        let (number, tail) = rest.split_at(end);
        let designator = tail.chars().next()?;
        let position = designators[next..].iter().position(|d| *d == designator)? + next;

        let valid_number = match number.split_once('.') {
            None => all_digits(number),
            Some((whole, frac)) => designator == 'S' && all_digits(whole) && all_digits(frac),
        };
        if !valid_number {
            return None;
        }

        next = position + 1;
        count += 1;
        rest = &tail[designator.len_utf8()..];
    }

    Some(count)
}

// =====================
// Partial Gregorian types
// =====================

/// Checks an `xs:gYear` value.
pub fn check_g_year(raw: &str) -> Result<(), LexicalError> {
    let (body, tz) = split_timezone(raw);
    parse_year(body).ok_or_else(|| invalid("gYear", raw))?;
    check_timezone(tz)
}

/// Checks an `xs:gYearMonth` value.
pub fn check_g_year_month(raw: &str) -> Result<(), LexicalError> {
    let (body, tz) = split_timezone(raw);
    let valid = split_year(body).is_some_and(|(_, rest)| {
        rest.strip_prefix('-')
            .and_then(|month| fixed_digits(month, 2))
            .is_some_and(|month| (1..=12).contains(&month))
    });
    if !valid {
        return Err(invalid("gYearMonth", raw));
    }
    check_timezone(tz)
}

/// Checks an `xs:gMonth` value (`--MM`).
pub fn check_g_month(raw: &str) -> Result<(), LexicalError> {
    let (body, tz) = split_timezone(raw);
    let valid = body
        .strip_prefix("--")
        .and_then(|month| fixed_digits(month, 2))
        .is_some_and(|month| (1..=12).contains(&month));
    if !valid {
        return Err(invalid("gMonth", raw));
    }
    check_timezone(tz)
}

/// Checks an `xs:gMonthDay` value (`--MM-DD`); February 29 is accepted.
pub fn check_g_month_day(raw: &str) -> Result<(), LexicalError> {
    let (body, tz) = split_timezone(raw);
    let valid = body
        .strip_prefix("--")
        .and_then(|rest| rest.split_once('-'))
        .and_then(|(month, day)| Some((fixed_digits(month, 2)?, fixed_digits(day, 2)?)))
        .is_some_and(|(month, day)| {
            (1..=12).contains(&month) && day >= 1 && day <= days_in_month(2000, month)
        });
    if !valid {
        return Err(invalid("gMonthDay", raw));
    }
    check_timezone(tz)
}

/// Checks an `xs:gDay` value (`---DD`).
pub fn check_g_day(raw: &str) -> Result<(), LexicalError> {
    let (body, tz) = split_timezone(raw);
    let valid = body
        .strip_prefix("---")
        .and_then(|day| fixed_digits(day, 2))
        .is_some_and(|day| (1..=31).contains(&day));
    if !valid {
        return Err(invalid("gDay", raw));
    }
    check_timezone(tz)
}

// =====================
// Numbers
// =====================

/// Checks `xs:boolean` (`true`, `false`, `1`, `0`).
pub fn check_boolean(raw: &str) -> Result<(), LexicalError> {
    match raw {
        "true" | "false" | "1" | "0" => Ok(()),
        _ => Err(invalid("boolean", raw)),
    }
}

/// Splits an optionally signed integer into (negative, digits).
fn integer_parts(raw: &str) -> Option<(bool, &str)> {
    let (negative, digits) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    all_digits(digits).then_some((negative, digits))
}

/// Checks an integer literal against optional inclusive bounds.
///
/// Unbounded directions accept arbitrarily many digits.
pub fn check_integer(raw: &str, min: Option<i128>, max: Option<i128>) -> Result<(), LexicalError> {
    let (negative, digits) = integer_parts(raw).ok_or_else(|| invalid("integer", raw))?;
    let magnitude = digits.trim_start_matches('0');

    let out_of_range = || LexicalError {
        message: format!("Integer out of range: {}", raw),
    };

    if magnitude.len() > I128_SAFE_DIGITS {
        let unbounded = if negative { min.is_none() } else { max.is_none() };
        return if unbounded { Ok(()) } else { Err(out_of_range()) };
    }

    let value: i128 = if magnitude.is_empty() {
        0
    } else {
        magnitude.parse().map_err(|_| out_of_range())?
    };
    let value = if negative { -value } else { value };

    if min.is_some_and(|m| value < m) || max.is_some_and(|m| value > m) {
        return Err(out_of_range());
    }
    Ok(())
}

/// Returns true for `[+-]?(d+(.d*)?|.d+)`.
fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    match unsigned.split_once('.') {
        None => all_digits(unsigned),
        Some((whole, frac)) => {
            (whole.is_empty() || all_digits(whole))
                && (frac.is_empty() || all_digits(frac))
                && !(whole.is_empty() && frac.is_empty())
        }
    }
}

/// Checks `xs:decimal`.
pub fn check_decimal(raw: &str) -> Result<(), LexicalError> {
    if is_decimal_literal(raw) {
        Ok(())
    } else {
        Err(invalid("decimal", raw))
    }
}

/// Checks `xs:double` and `xs:float`, including `INF`, `-INF` and `NaN`.
pub fn check_double(raw: &str) -> Result<(), LexicalError> {
    if matches!(raw, "INF" | "+INF" | "-INF" | "NaN") {
        return Ok(());
    }
    let (mantissa, exponent) = match raw.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (raw, None),
    };
    let exponent_ok = exponent.is_none_or(|e| integer_parts(e).is_some());
    if is_decimal_literal(mantissa) && exponent_ok {
        Ok(())
    } else {
        Err(invalid("double", raw))
    }
}

// =====================
// Binary
// =====================

/// Checks `xs:hexBinary`.
pub fn check_hex_binary(raw: &str) -> Result<(), LexicalError> {
    if raw.len() % 2 == 0 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(invalid("hexBinary", raw))
    }
}

/// Checks `xs:base64Binary`; embedded whitespace is ignored.
pub fn check_base64_binary(raw: &str) -> Result<(), LexicalError> {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map(|_| ())
        .map_err(|_| invalid("base64Binary", raw))
}
