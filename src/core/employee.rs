use crate::db::employees;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, Role};
use crate::models::session::Session;

pub struct EmployeeLogic;

impl EmployeeLogic {
    /// Register a new employee.
    ///
    /// Anybody may register an ordinary employee. Registering an admin needs
    /// an admin session, except for the very first admin.
    pub fn register(
        pool: &DbPool,
        session: Option<&Session>,
        id: &str,
        name: &str,
        role: Role,
    ) -> AppResult<Employee> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::InvalidEmployee("empty employee id".into()));
        }

        if employees::find_employee(&pool.conn, id)?.is_some() {
            return Err(AppError::EmployeeExists(id.to_string()));
        }

        if role == Role::Admin && employees::count_admins(&pool.conn)? > 0 {
            match session {
                Some(s) => s.require_admin("register administrators")?,
                None => return Err(AppError::NoSession),
            }
        }

        let name = if name.trim().is_empty() { id } else { name.trim() };
        let emp = employees::insert_employee(&pool.conn, id, name, role)?;

        audit(
            &pool.conn,
            "employee_add",
            &emp.id,
            &format!("{} ({})", emp.name, emp.role.to_db_str()),
        )?;

        Ok(emp)
    }

    pub fn promote(pool: &DbPool, session: &Session, id: &str) -> AppResult<Employee> {
        session.require_admin("promote employees")?;

        if !employees::set_role(&pool.conn, id, Role::Admin)? {
            return Err(AppError::UnknownEmployee(id.to_string()));
        }

        audit(
            &pool.conn,
            "employee_promote",
            id,
            &format!("promoted to admin by {}", session.actor_id()),
        )?;

        employees::find_employee(&pool.conn, id)?
            .ok_or_else(|| AppError::UnknownEmployee(id.to_string()))
    }

    /// Remove an employee with all their shifts and default schedules.
    pub fn remove(pool: &DbPool, session: &Session, id: &str) -> AppResult<()> {
        session.require_admin("remove employees")?;

        if !employees::delete_employee(&pool.conn, id)? {
            return Err(AppError::UnknownEmployee(id.to_string()));
        }

        audit(
            &pool.conn,
            "employee_del",
            id,
            &format!("removed by {}", session.actor_id()),
        )?;

        Ok(())
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Employee>> {
        employees::list_employees(&pool.conn)
    }
}
