use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::store::IntervalStore;
use crate::errors::{AppError, AppResult};
use crate::models::interval::Interval;
use crate::models::session::Session;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete one shift. Returns the deleted shift, or `None` when `confirm`
    /// declined.
    pub fn apply<F>(pool: &DbPool, session: &Session, id: i64, confirm: F) -> AppResult<Option<Interval>>
    where
        F: FnOnce(&Interval) -> bool,
    {
        let interval = pool
            .get_interval(id)?
            .ok_or(AppError::IntervalNotFound(id))?;

        session.authorize_owner(&interval.owner_id, "delete shifts of")?;

        if !confirm(&interval) {
            return Ok(None);
        }

        if !pool.delete_interval(id)? {
            return Err(AppError::IntervalNotFound(id));
        }

        audit(
            &pool.conn,
            "del",
            &format!("#{}", id),
            &format!(
                "{} {} → {} (by {})",
                interval.owner_id,
                interval.start_str(),
                interval.end_str(),
                session.actor_id()
            ),
        )?;

        Ok(Some(interval))
    }
}
