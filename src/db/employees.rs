use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, Role};
use chrono::Local;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_row(row: &Row) -> rusqlite::Result<Employee> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::Config(format!("Invalid role: {}", role_str))),
        )
    })?;

    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        role,
        created_at: row.get("created_at")?,
    })
}

pub fn find_employee(conn: &Connection, id: &str) -> AppResult<Option<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn list_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_employee(conn: &Connection, id: &str, name: &str, role: Role) -> AppResult<Employee> {
    conn.execute(
        "INSERT INTO employees (id, name, role, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, role.to_db_str(), Local::now().to_rfc3339()],
    )?;

    find_employee(conn, id)?.ok_or_else(|| AppError::UnknownEmployee(id.to_string()))
}

pub fn set_role(conn: &Connection, id: &str, role: Role) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE employees SET role = ?1 WHERE id = ?2",
        params![role.to_db_str(), id],
    )?;
    Ok(n > 0)
}

pub fn count_admins(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM employees WHERE role = 'admin'",
        [],
        |row| row.get(0),
    )?)
}

/// Remove an employee together with their shifts and default schedules.
pub fn delete_employee(conn: &Connection, id: &str) -> AppResult<bool> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM intervals WHERE employee_id = ?1", [id])?;
    tx.execute("DELETE FROM default_schedules WHERE employee_id = ?1", [id])?;
    let n = tx.execute("DELETE FROM employees WHERE id = ?1", [id])?;
    tx.commit()?;
    Ok(n > 0)
}
