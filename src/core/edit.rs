use crate::config::Config;
use crate::core::accountant;
use crate::core::add::{Submission, detect_conflicts, infer_end_date, resolve_conflicts};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::store::IntervalStore;
use crate::errors::{AppError, AppResult};
use crate::models::interval::{Candidate, Conflict, IntervalPatch};
use crate::models::session::Session;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Input of the `edit` command. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub clear_notes: bool,
    pub force: bool,
}

pub struct EditLogic;

impl EditLogic {
    pub fn apply<F>(
        pool: &DbPool,
        cfg: &Config,
        session: &Session,
        req: &EditRequest,
        confirm: F,
    ) -> AppResult<Submission>
    where
        F: FnOnce(&[Conflict]) -> bool,
    {
        let current = pool
            .get_interval(req.id)?
            .ok_or(AppError::IntervalNotFound(req.id))?;

        session.authorize_owner(&current.owner_id, "edit shifts of")?;

        //
        // New start / end
        //
        let start_date = req.date.unwrap_or(current.start.date());
        let start_t = req.start.unwrap_or(current.start.time());
        let end_t = req.end.unwrap_or(current.end.time());

        let end_date = match (req.end_date, req.end) {
            (Some(d), _) => d,
            // new end time: infer the day from the times
            (None, Some(_)) => infer_end_date(start_date, start_t, end_t),
            // keep the stored day offset between start and end
            (None, None) => {
                let offset = (current.end.date() - current.start.date()).num_days();
                if offset >= 0 {
                    start_date
                        .checked_add_days(Days::new(offset as u64))
                        .unwrap_or(start_date)
                } else {
                    start_date
                        .checked_sub_days(Days::new(offset.unsigned_abs()))
                        .unwrap_or(start_date)
                }
            }
        };

        let notes = if req.clear_notes {
            String::new()
        } else {
            req.notes.clone().unwrap_or_else(|| current.notes.clone())
        };

        let candidate = Candidate {
            owner_id: Some(current.owner_id.clone()),
            start: Some(NaiveDateTime::new(start_date, start_t)),
            end: Some(NaiveDateTime::new(end_date, end_t)),
            notes: Some(notes),
        };

        let new = accountant::validate(&candidate)?;

        //
        // Overlaps (the shift's own owner is excluded, so it never
        // conflicts with itself)
        //
        let conflicts = detect_conflicts(pool, &new)?;

        if !resolve_conflicts(cfg.overlap_policy, req.force, &conflicts, confirm)? {
            return Ok(Submission::Cancelled { conflicts });
        }

        let interval = pool.update_interval(req.id, &IntervalPatch::from(&new))?;

        audit(
            &pool.conn,
            "edit",
            &format!("#{}", interval.id),
            &format!(
                "{} {} → {} was {} → {} (by {})",
                interval.owner_id,
                interval.start_str(),
                interval.end_str(),
                current.start_str(),
                current.end_str(),
                session.actor_id()
            ),
        )?;

        Ok(Submission::Saved {
            interval,
            conflicts,
        })
    }
}
