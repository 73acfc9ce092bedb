//! Shift interval accounting: overnight-aware durations and cross-employee
//! overlap detection.
//!
//! Everything here is a pure function of its inputs. Storage access (fetching
//! the intervals to compare against) belongs to the caller.

use crate::errors::{AppError, AppResult};
use crate::models::interval::{Candidate, Conflict, Interval, NewInterval};
use chrono::{NaiveDateTime, TimeDelta};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Difference `end - start`, with a negative difference read as a shift that
/// continues past midnight (+24h). An end a full day or more before the start
/// cannot be repaired that way and is rejected.
fn adjusted_delta(start: NaiveDateTime, end: NaiveDateTime) -> AppResult<TimeDelta> {
    let raw = end - start;
    if raw >= TimeDelta::zero() {
        return Ok(raw);
    }

    let day = TimeDelta::hours(24);
    if raw <= -day {
        return Err(AppError::InvalidInterval(format!(
            "end {} is at least a day before start {}",
            end.format("%Y-%m-%d %H:%M"),
            start.format("%Y-%m-%d %H:%M")
        )));
    }

    Ok(raw + day)
}

/// Duration of a shift in fractional hours (full precision).
///
/// 09:00 → 17:00 gives 8.0, 23:00 → 02:00 on the same date gives 3.0.
pub fn compute_duration(start: NaiveDateTime, end: NaiveDateTime) -> AppResult<f64> {
    let delta = adjusted_delta(start, end)?;
    Ok(delta.num_seconds() as f64 / SECONDS_PER_HOUR)
}

/// Hours rounded to one decimal place, for display only.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

/// True iff the stored calendar dates of start and end differ.
///
/// Looks at the date components only, never at the duration sign.
pub fn classify_crosses_day(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    start.date() != end.date()
}

/// Absolute half-open span `[start, start + duration)` after the overnight
/// adjustment.
pub fn span(start: NaiveDateTime, end: NaiveDateTime) -> AppResult<(NaiveDateTime, NaiveDateTime)> {
    let delta = adjusted_delta(start, end)?;
    Ok((start, start + delta))
}

/// Existing intervals of *other* employees that overlap the candidate.
///
/// `[s1,e1)` and `[s2,e2)` overlap iff `s1 < e2 && s2 < e1`. Zero-length
/// intervals never overlap anything, on either side. Stored intervals that
/// cannot be spanned are skipped.
pub fn find_overlaps(candidate: &NewInterval, existing: &[Interval]) -> Vec<Conflict> {
    let Ok((s1, e1)) = span(candidate.start, candidate.end) else {
        return Vec::new();
    };

    if s1 == e1 {
        return Vec::new();
    }

    existing
        .iter()
        .filter(|iv| iv.owner_id != candidate.owner_id)
        .filter_map(|iv| {
            let (s2, e2) = span(iv.start, iv.end).ok()?;

            if s2 == e2 || !(s1 < e2 && s2 < e1) {
                return None;
            }

            let overlap = e1.min(e2) - s1.max(s2);

            Some(Conflict {
                other: iv.clone(),
                overlap_minutes: overlap.num_minutes(),
            })
        })
        .collect()
}

/// Check a candidate and turn it into a storable interval.
///
/// Overlaps are not checked here: they are advisory, see [`find_overlaps`].
pub fn validate(candidate: &Candidate) -> AppResult<NewInterval> {
    let owner_id = candidate
        .owner_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InvalidInterval("missing employee id".into()))?;

    let start = candidate
        .start
        .ok_or_else(|| AppError::InvalidInterval("missing start".into()))?;

    let end = candidate
        .end
        .ok_or_else(|| AppError::InvalidInterval("missing end".into()))?;

    let duration_hours = compute_duration(start, end)?;

    Ok(NewInterval {
        owner_id: owner_id.to_string(),
        start,
        end,
        notes: candidate.notes.clone().unwrap_or_default(),
        duration_hours,
    })
}
