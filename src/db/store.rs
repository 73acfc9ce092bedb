//! Interval storage.
//!
//! [`IntervalStore`] is the contract the submission workflow needs from the
//! storage collaborator; [`DbPool`] implements it on top of SQLite. The free
//! functions take a bare `Connection` so migrations can use them inside a
//! transaction.

use crate::core::accountant;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::date_range::DateRange;
use crate::models::interval::{Interval, IntervalPatch, NewInterval};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M:%S";

pub trait IntervalStore {
    /// Intervals whose start date lies in `range`, optionally for one owner,
    /// ordered by start.
    fn fetch_intervals(&self, owner: Option<&str>, range: &DateRange) -> AppResult<Vec<Interval>>;

    /// Intervals of every owner whose stored `[start_date, end_date]` span
    /// touches `range`, ordered by start.
    fn fetch_spanning(&self, range: &DateRange) -> AppResult<Vec<Interval>>;

    fn get_interval(&self, id: i64) -> AppResult<Option<Interval>>;

    fn insert_interval(&self, new: &NewInterval) -> AppResult<Interval>;

    fn update_interval(&self, id: i64, patch: &IntervalPatch) -> AppResult<Interval>;

    /// `false` when no row had that id.
    fn delete_interval(&self, id: i64) -> AppResult<bool>;
}

impl IntervalStore for DbPool {
    fn fetch_intervals(&self, owner: Option<&str>, range: &DateRange) -> AppResult<Vec<Interval>> {
        fetch_intervals(&self.conn, owner, range)
    }

    fn fetch_spanning(&self, range: &DateRange) -> AppResult<Vec<Interval>> {
        fetch_spanning(&self.conn, range)
    }

    fn get_interval(&self, id: i64) -> AppResult<Option<Interval>> {
        get_interval(&self.conn, id)
    }

    fn insert_interval(&self, new: &NewInterval) -> AppResult<Interval> {
        insert_interval(&self.conn, new)
    }

    fn update_interval(&self, id: i64, patch: &IntervalPatch) -> AppResult<Interval> {
        update_interval(&self.conn, id, patch)
    }

    fn delete_interval(&self, id: i64) -> AppResult<bool> {
        delete_interval(&self.conn, id)
    }
}

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

fn read_datetime(row: &Row, date_col: &str, time_col: &str) -> rusqlite::Result<NaiveDateTime> {
    let date_str: String = row.get(date_col)?;
    let time_str: String = row.get(time_col)?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT)
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;
    let time = NaiveTime::parse_from_str(&time_str, TIME_FMT)
        .map_err(|_| conversion_error(0, AppError::InvalidTime(time_str.clone())))?;

    Ok(date.and_time(time))
}

/// Row → Interval. The duration is recomputed, never trusted from the column.
pub fn map_row(row: &Row) -> rusqlite::Result<Interval> {
    let start = read_datetime(row, "start_date", "start_time")?;
    let end = read_datetime(row, "end_date", "end_time")?;
    let duration_hours =
        accountant::compute_duration(start, end).map_err(|e| conversion_error(0, e))?;

    Ok(Interval {
        id: row.get("id")?,
        owner_id: row.get("employee_id")?,
        start,
        end,
        duration_hours,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

pub fn fetch_intervals(
    conn: &Connection,
    owner: Option<&str>,
    range: &DateRange,
) -> AppResult<Vec<Interval>> {
    let from = range.from.format(DATE_FMT).to_string();
    let to = range.to.format(DATE_FMT).to_string();

    let mut sql = String::from("SELECT * FROM intervals WHERE start_date BETWEEN ?1 AND ?2");
    let mut args: Vec<&dyn ToSql> = vec![&from, &to];

    if let Some(o) = &owner {
        sql.push_str(" AND employee_id = ?3");
        args.push(o);
    }
    sql.push_str(" ORDER BY start_date ASC, start_time ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(args.as_slice(), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn fetch_spanning(conn: &Connection, range: &DateRange) -> AppResult<Vec<Interval>> {
    let from = range.from.format(DATE_FMT).to_string();
    let to = range.to.format(DATE_FMT).to_string();

    let mut stmt = conn.prepare(
        "SELECT * FROM intervals
         WHERE start_date <= ?2 AND end_date >= ?1
         ORDER BY start_date ASC, start_time ASC, id ASC",
    )?;
    let rows = stmt.query_map([&from, &to], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_interval(conn: &Connection, id: i64) -> AppResult<Option<Interval>> {
    let mut stmt = conn.prepare("SELECT * FROM intervals WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn insert_interval(conn: &Connection, new: &NewInterval) -> AppResult<Interval> {
    let duration = accountant::compute_duration(new.start, new.end)?;

    conn.execute(
        "INSERT INTO intervals (employee_id, start_date, start_time, end_date, end_time, total_hours, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            new.owner_id,
            new.start.format(DATE_FMT).to_string(),
            new.start.format(TIME_FMT).to_string(),
            new.end.format(DATE_FMT).to_string(),
            new.end.format(TIME_FMT).to_string(),
            duration,
            new.notes,
            Local::now().to_rfc3339(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    get_interval(conn, id)?.ok_or(AppError::IntervalNotFound(id))
}

/// Replace start/end/notes of a stored interval and recompute its duration.
pub fn update_interval(conn: &Connection, id: i64, patch: &IntervalPatch) -> AppResult<Interval> {
    let current = get_interval(conn, id)?.ok_or(AppError::IntervalNotFound(id))?;

    let start = patch.start.unwrap_or(current.start);
    let end = patch.end.unwrap_or(current.end);
    let notes = patch.notes.clone().unwrap_or(current.notes);
    let duration = accountant::compute_duration(start, end)?;

    conn.execute(
        "UPDATE intervals
         SET start_date = ?1, start_time = ?2,
             end_date = ?3, end_time = ?4,
             total_hours = ?5, notes = ?6
         WHERE id = ?7",
        params![
            start.format(DATE_FMT).to_string(),
            start.format(TIME_FMT).to_string(),
            end.format(DATE_FMT).to_string(),
            end.format(TIME_FMT).to_string(),
            duration,
            notes,
            id,
        ],
    )?;

    get_interval(conn, id)?.ok_or(AppError::IntervalNotFound(id))
}

pub fn delete_interval(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM intervals WHERE id = ?1", [id])?;
    Ok(n > 0)
}

/// Every interval, oldest first (used by `db --info` and full exports).
pub fn all_intervals(conn: &Connection) -> AppResult<Vec<Interval>> {
    let mut stmt =
        conn.prepare("SELECT * FROM intervals ORDER BY start_date ASC, start_time ASC, id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
