//! Letter-run date-time patterns.
//!
//! A run of the same pattern letter is cut greedily into the longest known
//! tokens, so `YYYYY` is `YYYY` followed by `Y`. A backslash makes the next
//! character literal; characters that are not pattern letters are literal
//! as they are.

use crate::core::datetime::Datetime;
use crate::utils::error::{GnssError, Result};
use chrono::{NaiveDate, NaiveTime};

pub const MONTH_NAMES: [&str; 12] = [
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

/// Indexed by Sunday-zero day of week.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year4,
    Year,
    Year2,
    Year1,
    MonthName,
    MonthAbbr,
    Month2,
    Month,
    DayOfYear3,
    DayOfYear,
    Day2,
    Day,
    Hour2,
    Hour,
    Hour12Padded,
    Hour12,
    MarkerUpperDotted,
    MarkerUpper,
    MarkerLowerDotted,
    MarkerLower,
    Minute2,
    Minute,
    Second2,
    Second,
    Millis3,
    Centis2,
    Decis1,
    Millis,
    WeekdayName,
    WeekdayAbbr,
    OffsetSign,
    OffsetHours2,
    OffsetHours,
    OffsetMinutes2,
    OffsetMinutes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    Field(Field),
}

/// Known token widths per letter, longest first.
fn widths(letter: char) -> Option<&'static [(usize, Field)]> {
    use Field::*;
    let table: &'static [(usize, Field)] = match letter {
        'Y' => &[(4, Year4), (3, Year), (2, Year2), (1, Year1)],
        'M' => &[(4, MonthName), (3, MonthAbbr), (2, Month2), (1, Month)],
        'D' => &[(4, DayOfYear3), (3, DayOfYear), (2, Day2), (1, Day)],
        'H' => &[(2, Hour2), (1, Hour)],
        'h' => &[(2, Hour12Padded), (1, Hour12)],
        'P' => &[(2, MarkerUpperDotted), (1, MarkerUpper)],
        'p' => &[(2, MarkerLowerDotted), (1, MarkerLower)],
        'm' => &[(2, Minute2), (1, Minute)],
        's' => &[(2, Second2), (1, Second)],
        'c' => &[(3, Millis3), (2, Centis2), (1, Decis1)],
        'C' => &[(1, Millis)],
        'W' => &[(2, WeekdayName), (1, WeekdayAbbr)],
        'z' => &[(1, OffsetSign)],
        'U' => &[(2, OffsetHours2), (1, OffsetHours)],
        'u' => &[(2, OffsetMinutes2), (1, OffsetMinutes)],
        _ => return None,
    };
    Some(table)
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            // A trailing backslash stands for itself.
            tokens.push(Token::Literal(chars.get(i + 1).copied().unwrap_or('\\')));
            i += 2;
            continue;
        }
        let Some(table) = widths(c) else {
            tokens.push(Token::Literal(c));
            i += 1;
            continue;
        };
        let mut run = chars[i..].iter().take_while(|x| **x == c).count();
        i += run;
        while run > 0 {
            let (width, field) = table
                .iter()
                .copied()
                .find(|(w, _)| *w <= run)
                .unwrap_or(table[table.len() - 1]);
            tokens.push(Token::Field(field));
            run -= width;
        }
    }
    tokens
}

fn rounded_fraction(millis: u32, divisor: u32, max: u32) -> u32 {
    ((millis + divisor / 2) / divisor).min(max)
}

/// `dt` is already shifted to the wall clock of `offset_minutes`.
pub(crate) fn format(pattern: &str, dt: &Datetime, offset_minutes: i64) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    for token in tokenize(pattern) {
        let field = match token {
            Token::Literal(c) => {
                out.push(c);
                continue;
            }
            Token::Field(field) => field,
        };
        let month_name = MONTH_NAMES[(dt.month() - 1) as usize];
        let weekday_name = WEEKDAY_NAMES[dt.day_of_week_sz() as usize];
        let offset = offset_minutes.unsigned_abs();
        let piece = match field {
            Field::Year4 => format!("{:04}", dt.year()),
            Field::Year => dt.year().to_string(),
            Field::Year2 => format!("{:02}", dt.year().rem_euclid(100)),
            Field::Year1 => dt.year().rem_euclid(10).to_string(),
            Field::MonthName => month_name.to_string(),
            Field::MonthAbbr => month_name[..3].to_string(),
            Field::Month2 => format!("{:02}", dt.month()),
            Field::Month => dt.month().to_string(),
            Field::DayOfYear3 => format!("{:03}", dt.day_of_year()),
            Field::DayOfYear => dt.day_of_year().to_string(),
            Field::Day2 => format!("{:02}", dt.day()),
            Field::Day => dt.day().to_string(),
            Field::Hour2 => format!("{:02}", dt.hour()),
            Field::Hour => dt.hour().to_string(),
            Field::Hour12Padded => format!("{:02}", dt.hour12()),
            Field::Hour12 => dt.hour12().to_string(),
            Field::MarkerUpperDotted => (if dt.is_am() { "A.M." } else { "P.M." }).to_string(),
            Field::MarkerUpper => (if dt.is_am() { "AM" } else { "PM" }).to_string(),
            Field::MarkerLowerDotted => (if dt.is_am() { "a.m." } else { "p.m." }).to_string(),
            Field::MarkerLower => (if dt.is_am() { "am" } else { "pm" }).to_string(),
            Field::Minute2 => format!("{:02}", dt.minute()),
            Field::Minute => dt.minute().to_string(),
            Field::Second2 => format!("{:02}", dt.second()),
            Field::Second => dt.second().to_string(),
            Field::Millis3 => format!("{:03}", dt.millisecond()),
            Field::Centis2 => format!("{:02}", rounded_fraction(dt.millisecond(), 10, 99)),
            Field::Decis1 => rounded_fraction(dt.millisecond(), 100, 9).to_string(),
            Field::Millis => dt.millisecond().to_string(),
            Field::WeekdayName => weekday_name.to_string(),
            Field::WeekdayAbbr => weekday_name[..3].to_string(),
            Field::OffsetSign => (if offset_minutes < 0 { "-" } else { "+" }).to_string(),
            Field::OffsetHours2 => format!("{:02}", offset / 60),
            Field::OffsetHours => (offset / 60).to_string(),
            Field::OffsetMinutes2 => format!("{:02}", offset % 60),
            Field::OffsetMinutes => (offset % 60).to_string(),
        };
        out.push_str(&piece);
    }
    out
}

#[derive(Debug, Default)]
struct Parsed {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    day_of_year: Option<u32>,
    hour: Option<u32>,
    hour12: Option<u32>,
    pm: Option<bool>,
    minute: Option<u32>,
    second: Option<u32>,
    millis: Option<u32>,
    offset_negative: bool,
    offset_hours: u32,
    offset_minutes: u32,
}

struct Cursor<'a> {
    pattern: &'a str,
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn error(&self, reason: impl Into<String>) -> GnssError {
        GnssError::PatternParseError {
            pattern: self.pattern.to_string(),
            input: self.input.to_string(),
            position: self.pos,
            reason: reason.into(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn digits(&mut self, min: usize, max: usize) -> Result<u32> {
        let len = self
            .rest()
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return Err(self.error(format!("expected at least {} digit(s)", min)));
        }
        let value = self.rest()[..len]
            .parse::<u32>()
            .map_err(|e| self.error(e.to_string()))?;
        self.pos += len;
        Ok(value)
    }

    fn literal(&mut self, expected: char) -> Result<()> {
        match self.rest().chars().next() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            _ => Err(self.error(format!("expected '{}'", expected))),
        }
    }

    /// Case-insensitive match of one of `options`; returns its index.
    fn one_of(&mut self, options: &[&str], what: &str) -> Result<usize> {
        let rest = self.rest();
        let found = options.iter().position(|opt| {
            rest.get(..opt.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(opt))
        });
        match found {
            Some(i) => {
                self.pos += options[i].len();
                Ok(i)
            }
            None => Err(self.error(format!("expected {}", what))),
        }
    }
}

fn abbreviations(names: &[&'static str]) -> Vec<&'static str> {
    names.iter().map(|n| &n[..3]).collect()
}

pub(crate) fn parse(pattern: &str, text: &str) -> Result<Datetime> {
    let mut cur = Cursor {
        pattern,
        input: text,
        pos: 0,
    };
    let mut p = Parsed::default();

    for token in tokenize(pattern) {
        let field = match token {
            Token::Literal(c) => {
                cur.literal(c)?;
                continue;
            }
            Token::Field(field) => field,
        };
        match field {
            Field::Year4 => p.year = Some(cur.digits(4, 4)? as i32),
            Field::Year => p.year = Some(cur.digits(1, 9)? as i32),
            Field::Year2 => {
                let yy = cur.digits(2, 2)? as i32;
                p.year = Some(if yy < 70 { 2000 + yy } else { 1900 + yy });
            }
            Field::Year1 => p.year = Some(2000 + cur.digits(1, 1)? as i32),
            Field::MonthName => p.month = Some(cur.one_of(&MONTH_NAMES, "month name")? as u32 + 1),
            Field::MonthAbbr => {
                let abbr = abbreviations(&MONTH_NAMES);
                p.month = Some(cur.one_of(&abbr, "month abbreviation")? as u32 + 1);
            }
            Field::Month2 => p.month = Some(cur.digits(2, 2)?),
            Field::Month => p.month = Some(cur.digits(1, 2)?),
            Field::DayOfYear3 => p.day_of_year = Some(cur.digits(3, 3)?),
            Field::DayOfYear => p.day_of_year = Some(cur.digits(1, 3)?),
            Field::Day2 => p.day = Some(cur.digits(2, 2)?),
            Field::Day => p.day = Some(cur.digits(1, 2)?),
            Field::Hour2 => p.hour = Some(cur.digits(2, 2)?),
            Field::Hour => p.hour = Some(cur.digits(1, 2)?),
            Field::Hour12Padded => p.hour12 = Some(cur.digits(2, 2)?),
            Field::Hour12 => p.hour12 = Some(cur.digits(1, 2)?),
            Field::MarkerUpperDotted | Field::MarkerLowerDotted => {
                p.pm = Some(cur.one_of(&["a.m.", "p.m."], "a.m./p.m.")? == 1)
            }
            Field::MarkerUpper | Field::MarkerLower => {
                p.pm = Some(cur.one_of(&["am", "pm"], "am/pm")? == 1)
            }
            Field::Minute2 => p.minute = Some(cur.digits(2, 2)?),
            Field::Minute => p.minute = Some(cur.digits(1, 2)?),
            Field::Second2 => p.second = Some(cur.digits(2, 2)?),
            Field::Second => p.second = Some(cur.digits(1, 2)?),
            Field::Millis3 => p.millis = Some(cur.digits(3, 3)?),
            Field::Centis2 => p.millis = Some(cur.digits(2, 2)? * 10),
            Field::Decis1 => p.millis = Some(cur.digits(1, 1)? * 100),
            Field::Millis => p.millis = Some(cur.digits(1, 3)?),
            Field::WeekdayName => {
                cur.one_of(&WEEKDAY_NAMES, "weekday name")?;
            }
            Field::WeekdayAbbr => {
                let abbr = abbreviations(&WEEKDAY_NAMES);
                cur.one_of(&abbr, "weekday abbreviation")?;
            }
            Field::OffsetSign => p.offset_negative = cur.one_of(&["+", "-"], "'+' or '-'")? == 1,
            Field::OffsetHours2 => p.offset_hours = cur.digits(2, 2)?,
            Field::OffsetHours => p.offset_hours = cur.digits(1, 2)?,
            Field::OffsetMinutes2 => p.offset_minutes = cur.digits(2, 2)?,
            Field::OffsetMinutes => p.offset_minutes = cur.digits(1, 2)?,
        }
    }

    if !cur.rest().is_empty() {
        return Err(cur.error("unexpected trailing text"));
    }

    let year = p.year.unwrap_or(1970);
    let date = match p.day_of_year {
        Some(doy) => NaiveDate::from_yo_opt(year, doy),
        None => NaiveDate::from_ymd_opt(year, p.month.unwrap_or(1), p.day.unwrap_or(1)),
    }
    .ok_or_else(|| cur.error("date does not exist"))?;

    if p.hour12.is_some_and(|h12| !(1..=12).contains(&h12)) {
        return Err(cur.error("12-hour clock out of range"));
    }
    let hour = match (p.hour, p.hour12) {
        (Some(h), _) => h,
        (None, Some(h12)) => h12 % 12 + if p.pm.unwrap_or(false) { 12 } else { 0 },
        (None, None) => 0,
    };
    let time = NaiveTime::from_hms_milli_opt(
        hour,
        p.minute.unwrap_or(0),
        p.second.unwrap_or(0),
        p.millis.unwrap_or(0),
    )
    .ok_or_else(|| cur.error("time of day out of range"))?;

    let local = Datetime::from_naive(date.and_time(time));
    let offset = (p.offset_hours * 60 + p.offset_minutes) as i64;
    let offset = if p.offset_negative { -offset } else { offset };
    local.add_millis(-offset * 60_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_runs_greedily() {
        use Field::*;
        assert_eq!(
            tokenize("YYYYY"),
            vec![Token::Field(Year4), Token::Field(Year1)]
        );
        assert_eq!(tokenize("CC"), vec![Token::Field(Millis), Token::Field(Millis)]);
        assert_eq!(
            tokenize(r"\Y-T"),
            vec![Token::Literal('Y'), Token::Literal('-'), Token::Literal('T')]
        );
        assert_eq!(tokenize("\\"), vec![Token::Literal('\\')]);
    }

    #[test]
    fn test_rounded_fraction_clamps() {
        assert_eq!(rounded_fraction(78, 10, 99), 8);
        assert_eq!(rounded_fraction(78, 100, 9), 1);
        assert_eq!(rounded_fraction(999, 10, 99), 99);
        assert_eq!(rounded_fraction(960, 100, 9), 9);
    }

    #[test]
    fn test_parse_rejects_trailing_text() {
        let err = parse("YYYY", "2001x").unwrap_err();
        match err {
            GnssError::PatternParseError { position, .. } => assert_eq!(position, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_impossible_date() {
        assert!(parse("YYYY-MM-DD", "2001-02-30").is_err());
        assert!(parse("YYYY DDD", "2001 366").is_err());
        assert!(parse("HH:mm", "24:00").is_err());
        assert!(parse("hh:mm p", "99:00 pm").is_err());
        assert!(parse("h:mm p", "13:00 am").is_err());
        assert!(parse("h:mm p", "0:00 pm").is_err());
    }

    #[test]
    fn test_twelve_hour_edges() {
        assert_eq!(parse("h:mm p", "12:00 am").unwrap().hour(), 0);
        assert_eq!(parse("h:mm p", "12:00 pm").unwrap().hour(), 12);
        assert_eq!(parse("hh:mm PP", "01:30 P.M.").unwrap().hour(), 13);
    }

    #[test]
    fn test_parse_defaults_to_epoch() {
        let dt = parse("HH:mm", "01:30").unwrap();
        assert_eq!(dt.unix_millis(), 90 * 60_000);
    }
}
