use crate::config::{Config, OverlapPolicy};
use crate::core::accountant;
use crate::core::schedule::ScheduleLogic;
use crate::db::employees::find_employee;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::store::IntervalStore;
use crate::errors::{AppError, AppResult};
use crate::models::date_range::DateRange;
use crate::models::interval::{Candidate, Conflict, Interval, NewInterval};
use crate::models::session::Session;
use crate::utils::time::parse_time;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Input of the `add` command, already parsed.
#[derive(Debug, Clone)]
pub struct AddRequest {
    /// Employee the shift belongs to; the acting employee when `None`.
    pub owner: Option<String>,
    pub date: NaiveDate,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    /// Explicit end date, for shifts ending on another day.
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub force: bool,
    pub dry_run: bool,
}

/// Outcome of a submission.
#[derive(Debug)]
pub enum Submission {
    Saved {
        interval: Interval,
        conflicts: Vec<Conflict>,
    },
    DryRun {
        interval: NewInterval,
        conflicts: Vec<Conflict>,
    },
    /// Conflicts were found and the user declined to save.
    Cancelled { conflicts: Vec<Conflict> },
}

/// End date of a shift given only times of day: the next day when the end
/// time is earlier than the start time.
pub fn infer_end_date(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> NaiveDate {
    if end < start {
        date.checked_add_days(Days::new(1)).unwrap_or(date)
    } else {
        date
    }
}

/// Stored intervals that may overlap `new`: every interval whose stored date
/// span reaches from the day before `new` starts to the day `new` really
/// ends. Shifts started days earlier and still running are included; the
/// extra day covers a stored end time that rolls past midnight on its start
/// date.
pub fn detect_conflicts<S: IntervalStore + ?Sized>(
    store: &S,
    new: &NewInterval,
) -> AppResult<Vec<Conflict>> {
    let (abs_start, abs_end) = accountant::span(new.start, new.end)?;

    let from = abs_start
        .date()
        .checked_sub_days(Days::new(1))
        .unwrap_or(abs_start.date());
    let range = DateRange::new(from, abs_end.date())?;

    let neighbours = store.fetch_spanning(&range)?;
    Ok(accountant::find_overlaps(new, &neighbours))
}

/// Decide whether a submission with `conflicts` may be saved.
///
/// `force` always wins. Otherwise `block` rejects and `warn` defers to
/// `confirm`.
pub fn resolve_conflicts<F>(
    policy: OverlapPolicy,
    force: bool,
    conflicts: &[Conflict],
    confirm: F,
) -> AppResult<bool>
where
    F: FnOnce(&[Conflict]) -> bool,
{
    if conflicts.is_empty() || force {
        return Ok(true);
    }

    match policy {
        OverlapPolicy::Block => Err(AppError::OverlapRejected(conflicts.len())),
        OverlapPolicy::Warn => Ok(confirm(conflicts)),
    }
}

/// Start and end times for a shift: explicit values first, then the owner's
/// default schedule for that weekday, then the configured defaults.
fn resolve_times(
    pool: &DbPool,
    cfg: &Config,
    owner: &str,
    date: NaiveDate,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> AppResult<(NaiveTime, NaiveTime)> {
    if let (Some(s), Some(e)) = (start, end) {
        return Ok((s, e));
    }

    let (sched_start, sched_end) = match ScheduleLogic::lookup(&pool.conn, owner, date)? {
        Some((s, e)) => (Some(s), Some(e)),
        None => (None, None),
    };

    let cfg_time = |raw: &str| parse_time(raw).ok_or_else(|| AppError::InvalidTime(raw.to_string()));

    let s = match start.or(sched_start) {
        Some(s) => s,
        None => cfg_time(&cfg.default_start)?,
    };
    let e = match end.or(sched_end) {
        Some(e) => e,
        None => cfg_time(&cfg.default_end)?,
    };

    Ok((s, e))
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    pub fn apply<F>(
        pool: &DbPool,
        cfg: &Config,
        session: &Session,
        req: &AddRequest,
        confirm: F,
    ) -> AppResult<Submission>
    where
        F: FnOnce(&[Conflict]) -> bool,
    {
        //
        // 1️⃣ OWNER + AUTHORIZATION
        //
        let owner = req
            .owner
            .clone()
            .unwrap_or_else(|| session.actor_id().to_string());

        session.authorize_owner(&owner, "add shifts for")?;

        if find_employee(&pool.conn, &owner)?.is_none() {
            return Err(AppError::UnknownEmployee(owner));
        }

        //
        // 2️⃣ CANDIDATE
        //
        let (start_t, end_t) = resolve_times(pool, cfg, &owner, req.date, req.start, req.end)?;
        let end_date = req
            .end_date
            .unwrap_or_else(|| infer_end_date(req.date, start_t, end_t));

        let candidate = Candidate {
            owner_id: Some(owner),
            start: Some(NaiveDateTime::new(req.date, start_t)),
            end: Some(NaiveDateTime::new(end_date, end_t)),
            notes: req.notes.clone(),
        };

        let new = accountant::validate(&candidate)?;

        //
        // 3️⃣ OVERLAPS
        //
        let conflicts = detect_conflicts(pool, &new)?;

        if req.dry_run {
            return Ok(Submission::DryRun {
                interval: new,
                conflicts,
            });
        }

        if !resolve_conflicts(cfg.overlap_policy, req.force, &conflicts, confirm)? {
            return Ok(Submission::Cancelled { conflicts });
        }

        //
        // 4️⃣ PERSIST + AUDIT
        //
        let interval = pool.insert_interval(&new)?;

        audit(
            &pool.conn,
            "add",
            &format!("#{}", interval.id),
            &format!(
                "{} {} → {} ({:.2}h, by {})",
                interval.owner_id,
                interval.start_str(),
                interval.end_str(),
                interval.duration_hours,
                session.actor_id()
            ),
        )?;

        Ok(Submission::Saved {
            interval,
            conflicts,
        })
    }
}
