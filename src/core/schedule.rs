use crate::db::employees::find_employee;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::schedules;
use crate::errors::{AppError, AppResult};
use crate::models::schedule::DefaultSchedule;
use crate::models::session::Session;
use crate::utils::date::weekday_index;
use crate::utils::time::{is_hhmm, parse_time};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

fn check_day(day: u8) -> AppResult<()> {
    if day > 6 {
        return Err(AppError::InvalidSchedule(format!(
            "day of week must be between 0 and 6, got {}",
            day
        )));
    }
    Ok(())
}

fn check_time(label: &str, t: &str) -> AppResult<()> {
    if !is_hhmm(t) {
        return Err(AppError::InvalidSchedule(format!(
            "{} time must be HH:MM, got '{}'",
            label, t
        )));
    }
    Ok(())
}

/// Per-employee default working hours, one entry per weekday.
pub struct ScheduleLogic;

impl ScheduleLogic {
    pub fn add(
        pool: &DbPool,
        session: &Session,
        employee: &str,
        day: u8,
        start: &str,
        end: &str,
    ) -> AppResult<DefaultSchedule> {
        session.authorize_owner(employee, "manage schedules of")?;

        if find_employee(&pool.conn, employee)?.is_none() {
            return Err(AppError::UnknownEmployee(employee.to_string()));
        }

        check_day(day)?;
        check_time("start", start)?;
        check_time("end", end)?;

        let s = schedules::insert_schedule(&pool.conn, employee, day, start, end)?;

        audit(
            &pool.conn,
            "schedule_add",
            &format!("#{}", s.id),
            &format!("{} {} {}-{}", s.employee_id, s.day_name(), s.start_time, s.end_time),
        )?;

        Ok(s)
    }

    /// Partial update: `None` keeps the stored value.
    pub fn update(
        pool: &DbPool,
        session: &Session,
        id: i64,
        day: Option<u8>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> AppResult<DefaultSchedule> {
        let mut s = schedules::find_schedule(&pool.conn, id)?.ok_or(AppError::ScheduleNotFound(id))?;

        session.authorize_owner(&s.employee_id, "manage schedules of")?;

        if let Some(d) = day {
            check_day(d)?;
            s.day_of_week = d;
        }
        if let Some(t) = start {
            check_time("start", t)?;
            s.start_time = t.to_string();
        }
        if let Some(t) = end {
            check_time("end", t)?;
            s.end_time = t.to_string();
        }

        schedules::update_schedule(&pool.conn, &s)?;

        audit(
            &pool.conn,
            "schedule_edit",
            &format!("#{}", s.id),
            &format!("{} {} {}-{}", s.employee_id, s.day_name(), s.start_time, s.end_time),
        )?;

        Ok(s)
    }

    pub fn remove(pool: &DbPool, session: &Session, id: i64) -> AppResult<DefaultSchedule> {
        let s = schedules::find_schedule(&pool.conn, id)?.ok_or(AppError::ScheduleNotFound(id))?;

        session.authorize_owner(&s.employee_id, "manage schedules of")?;

        schedules::delete_schedule(&pool.conn, id)?;
        audit(
            &pool.conn,
            "schedule_del",
            &format!("#{}", id),
            &format!("{} {}", s.employee_id, s.day_name()),
        )?;

        Ok(s)
    }

    pub fn list(pool: &DbPool, employee: Option<&str>) -> AppResult<Vec<DefaultSchedule>> {
        schedules::list_schedules(&pool.conn, employee)
    }

    /// Default start/end for `employee` on the weekday of `date`.
    pub fn lookup(
        conn: &Connection,
        employee: &str,
        date: NaiveDate,
    ) -> AppResult<Option<(NaiveTime, NaiveTime)>> {
        let Some(s) = schedules::schedule_for_weekday(conn, employee, weekday_index(date))? else {
            return Ok(None);
        };

        match (parse_time(&s.start_time), parse_time(&s.end_time)) {
            (Some(start), Some(end)) => Ok(Some((start, end))),
            _ => Err(AppError::InvalidSchedule(format!(
                "schedule #{} has unreadable times",
                s.id
            ))),
        }
    }
}
