use crate::errors::{AppError, AppResult};
use crate::models::date_range::DateRange;
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Like [`parse_date`], failing with `InvalidDate`.
pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

pub fn month_range(year: i32, month: u32) -> AppResult<DateRange> {
    let invalid = || AppError::InvalidDate(format!("{:04}-{:02}", year, month));

    let last = month_last_day(year, month).ok_or_else(invalid)?;
    let from = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let to = NaiveDate::from_ymd_opt(year, month, last).ok_or_else(invalid)?;
    DateRange::new(from, to)
}

pub fn current_month() -> AppResult<DateRange> {
    let t = today();
    month_range(t.year(), t.month())
}

/// First and last day of a single period token: `YYYY`, `YYYY-MM` or
/// `YYYY-MM-DD`.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(format!("unsupported period: {}", p));

    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let from = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let to = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((from, to))
        }
        7 => {
            let (y, m) = p.split_once('-').ok_or_else(invalid)?;
            let y: i32 = y.parse().map_err(|_| invalid())?;
            let m: u32 = m.parse().map_err(|_| invalid())?;
            let r = month_range(y, m)?;
            Ok((r.from, r.to))
        }
        10 => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

/// Parse a period expression into an inclusive date range.
///
/// Accepted forms:
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `A:B` where both sides use the same one of the forms above
pub fn parse_period(p: &str) -> AppResult<DateRange> {
    let p = p.trim();

    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "start and end of '{}' must have the same format",
                p
            )));
        }

        let (from, _) = period_bounds(start)?;
        let (_, to) = period_bounds(end)?;
        return DateRange::new(from, to);
    }

    let (from, to) = period_bounds(p)?;
    DateRange::new(from, to)
}

/// `day_of_week` index of a date: 0 = Sunday … 6 = Saturday.
pub fn weekday_index(d: NaiveDate) -> u8 {
    d.weekday().num_days_from_sunday() as u8
}

/// Accepts `0`..`6` or an English weekday name (full or three letters).
pub fn parse_weekday(s: &str) -> AppResult<u8> {
    let t = s.trim().to_ascii_lowercase();

    if let Ok(n) = t.parse::<u8>() {
        return if n <= 6 {
            Ok(n)
        } else {
            Err(AppError::InvalidSchedule(format!(
                "day of week must be between 0 and 6, got {}",
                n
            )))
        };
    }

    let idx = match t.get(..3) {
        Some("sun") => 0,
        Some("mon") => 1,
        Some("tue") => 2,
        Some("wed") => 3,
        Some("thu") => 4,
        Some("fri") => 5,
        Some("sat") => 6,
        _ => {
            return Err(AppError::InvalidSchedule(format!(
                "unknown day of week: {}",
                s
            )));
        }
    };

    Ok(idx)
}
