use crate::errors::{AppError, AppResult};
use crate::models::schedule::DefaultSchedule;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_row(row: &Row) -> rusqlite::Result<DefaultSchedule> {
    Ok(DefaultSchedule {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        day_of_week: row.get("day_of_week")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        created_at: row.get("created_at")?,
    })
}

pub fn find_schedule(conn: &Connection, id: i64) -> AppResult<Option<DefaultSchedule>> {
    let mut stmt = conn.prepare("SELECT * FROM default_schedules WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn list_schedules(conn: &Connection, employee: Option<&str>) -> AppResult<Vec<DefaultSchedule>> {
    let mut out = Vec::new();

    match employee {
        Some(e) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM default_schedules
                 WHERE employee_id = ?1
                 ORDER BY day_of_week ASC, start_time ASC",
            )?;
            for r in stmt.query_map([e], map_row)? {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT * FROM default_schedules
                 ORDER BY employee_id ASC, day_of_week ASC, start_time ASC",
            )?;
            for r in stmt.query_map([], map_row)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// First schedule of the employee for the given weekday (0 = Sunday).
pub fn schedule_for_weekday(
    conn: &Connection,
    employee: &str,
    day_of_week: u8,
) -> AppResult<Option<DefaultSchedule>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM default_schedules
         WHERE employee_id = ?1 AND day_of_week = ?2
         ORDER BY start_time ASC
         LIMIT 1",
    )?;
    Ok(stmt
        .query_row(params![employee, day_of_week], map_row)
        .optional()?)
}

pub fn insert_schedule(
    conn: &Connection,
    employee: &str,
    day_of_week: u8,
    start: &str,
    end: &str,
) -> AppResult<DefaultSchedule> {
    conn.execute(
        "INSERT INTO default_schedules (employee_id, day_of_week, start_time, end_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![employee, day_of_week, start, end, Local::now().to_rfc3339()],
    )?;

    let id = conn.last_insert_rowid();
    find_schedule(conn, id)?.ok_or(AppError::ScheduleNotFound(id))
}

pub fn update_schedule(conn: &Connection, s: &DefaultSchedule) -> AppResult<()> {
    conn.execute(
        "UPDATE default_schedules
         SET day_of_week = ?1, start_time = ?2, end_time = ?3
         WHERE id = ?4",
        params![s.day_of_week, s.start_time, s.end_time, s.id],
    )?;
    Ok(())
}

pub fn delete_schedule(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM default_schedules WHERE id = ?1", [id])?;
    Ok(n > 0)
}
