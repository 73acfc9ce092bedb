use crate::core::accountant;
use crate::db::log::audit;
use crate::db::store;
use crate::errors::AppResult;
use crate::models::interval::Candidate;
use crate::ui::messages::{success, warning};
use crate::utils::time::parse_datetime;
use rusqlite::{Connection, OptionalExtension, Result};

const FOLD_LEGACY_VERSION: &str = "20250310_0002_fold_legacy_attendance_tables";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_employees_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            role        TEXT NOT NULL DEFAULT 'employee' CHECK(role IN ('employee','admin')),
            created_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// One row per shift. `total_hours` is recomputed on every write.
fn create_intervals_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS intervals (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  TEXT NOT NULL,
            start_date   TEXT NOT NULL,
            start_time   TEXT NOT NULL,
            end_date     TEXT NOT NULL,
            end_time     TEXT NOT NULL,
            total_hours  REAL NOT NULL DEFAULT 0,
            notes        TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_intervals_start ON intervals(start_date, start_time);
        CREATE INDEX IF NOT EXISTS idx_intervals_employee ON intervals(employee_id, start_date);
        "#,
    )?;
    Ok(())
}

fn create_schedules_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS default_schedules (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  TEXT NOT NULL,
            day_of_week  INTEGER NOT NULL CHECK(day_of_week BETWEEN 0 AND 6),
            start_time   TEXT NOT NULL,
            end_time     TEXT NOT NULL,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_schedules_employee ON default_schedules(employee_id, day_of_week);
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Legacy row as read from one of the old tables: owner, start, end, notes.
/// Any column may be NULL there.
type LegacyRow = (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

fn read_legacy_rows(conn: &Connection, sql: &str) -> Result<Vec<LegacyRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Copy legacy rows into `intervals`. Rows the accountant rejects are
/// reported and skipped.
fn fold_rows(conn: &Connection, table: &str, rows: Vec<LegacyRow>) -> AppResult<usize> {
    let mut folded = 0;

    for (owner, start_raw, end_raw, notes) in rows {
        let candidate = Candidate {
            owner_id: owner,
            start: start_raw.as_deref().and_then(parse_datetime),
            end: end_raw.as_deref().and_then(parse_datetime),
            notes: Some(notes.unwrap_or_default()),
        };

        match accountant::validate(&candidate) {
            Ok(new) => {
                store::insert_interval(conn, &new)?;
                folded += 1;
            }
            Err(e) => warning(format!(
                "Skipping {} row ({} → {}): {}",
                table,
                start_raw.as_deref().unwrap_or("NULL"),
                end_raw.as_deref().unwrap_or("NULL"),
                e
            )),
        }
    }

    Ok(folded)
}

/// The old layout kept shifts in two tables (`attendances` with a single
/// date column, `attendance_records` with full datetimes). Both are folded
/// into `intervals` once and dropped.
fn fold_legacy_tables(conn: &Connection) -> AppResult<usize> {
    let mut folded = 0;

    if table_exists(conn, "attendance_records")? {
        warning("Folding legacy table 'attendance_records' into intervals...");
        let rows = read_legacy_rows(
            conn,
            "SELECT COALESCE(employee_id, ''), start_date_time, end_date_time, COALESCE(notes, '')
             FROM attendance_records",
        )?;
        folded += fold_rows(conn, "attendance_records", rows)?;
        conn.execute_batch("DROP TABLE attendance_records;")?;
    }

    if table_exists(conn, "attendances")? {
        warning("Folding legacy table 'attendances' into intervals...");
        // A single `date` column: both ends share the nominal date, the
        // accountant rolls a smaller end time over midnight.
        let rows = read_legacy_rows(
            conn,
            "SELECT COALESCE(employee_id, ''), date || ' ' || start_time, date || ' ' || end_time,
                    COALESCE(notes, '')
             FROM attendances",
        )?;
        folded += fold_rows(conn, "attendances", rows)?;
        conn.execute_batch("DROP TABLE attendances;")?;
    }

    Ok(folded)
}

pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Base tables
    ensure_log_table(conn)?;
    create_employees_table(conn)?;
    create_intervals_table(conn)?;
    create_schedules_table(conn)?;

    // 2) Versioned migrations
    if !is_applied(conn, FOLD_LEGACY_VERSION)? {
        let tx = conn.unchecked_transaction()?;
        let folded = fold_legacy_tables(&tx)?;
        audit(
            &tx,
            "migration_applied",
            FOLD_LEGACY_VERSION,
            &format!("{} legacy rows folded into intervals", folded),
        )?;
        tx.commit()?;

        if folded > 0 {
            success(format!(
                "Migration applied: {}: {} legacy rows folded into intervals.",
                FOLD_LEGACY_VERSION, folded
            ));
        }
    }

    Ok(())
}
