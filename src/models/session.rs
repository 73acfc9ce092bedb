use crate::db::employees::find_employee;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;

/// The employee acting in the current invocation.
///
/// Created once from `--as` (or `default_user`) and handed to the logic that
/// needs identity; nothing reads the actor from global state.
#[derive(Debug, Clone)]
pub struct Session {
    pub actor: Employee,
}

impl Session {
    /// Resolve the acting employee against the `employees` table.
    pub fn open(pool: &DbPool, actor_id: &str) -> AppResult<Self> {
        let actor = find_employee(&pool.conn, actor_id)?
            .ok_or_else(|| AppError::UnknownEmployee(actor_id.to_string()))?;
        Ok(Self { actor })
    }

    /// Like `open`, but fails with `NoSession` when no actor was given.
    pub fn require(pool: &DbPool, actor_id: Option<&str>) -> AppResult<Self> {
        match actor_id {
            Some(id) => Self::open(pool, id),
            None => Err(AppError::NoSession),
        }
    }

    pub fn optional(pool: &DbPool, actor_id: Option<&str>) -> AppResult<Option<Self>> {
        actor_id.map(|id| Self::open(pool, id)).transpose()
    }

    pub fn actor_id(&self) -> &str {
        &self.actor.id
    }

    pub fn is_admin(&self) -> bool {
        self.actor.is_admin()
    }

    /// Owners may touch their own records, admins anybody's.
    pub fn authorize_owner(&self, owner_id: &str, action: &str) -> AppResult<()> {
        if self.is_admin() || self.actor.id == owner_id {
            return Ok(());
        }
        Err(AppError::PermissionDenied(format!(
            "{} cannot {} {}",
            self.actor.id, action, owner_id
        )))
    }

    pub fn require_admin(&self, action: &str) -> AppResult<()> {
        if self.is_admin() {
            return Ok(());
        }
        Err(AppError::PermissionDenied(format!(
            "only administrators can {} ({} is not an admin)",
            action, self.actor.id
        )))
    }
}
