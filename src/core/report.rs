//! Per-employee attendance report over a date range.

use crate::config::Config;
use crate::db::employees::list_employees;
use crate::db::pool::DbPool;
use crate::db::store::IntervalStore;
use crate::errors::AppResult;
use crate::models::date_range::DateRange;
use crate::models::employee::Employee;
use crate::models::interval::Interval;
use crate::models::session::Session;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeReport {
    pub employee_id: String,
    pub name: String,
    /// Distinct start dates with at least one shift.
    pub work_days: usize,
    pub total_hours: f64,
    /// Weekdays of the range without any shift (never negative).
    pub absence_days: usize,
    /// Worked hours against `work_days` standard days, in percent.
    pub efficiency: f64,
}

/// Hours worked by one employee on each date of the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub employee_id: String,
    pub name: String,
    /// `YYYY-MM-DD` → hours; dates without shifts are absent.
    pub hours: BTreeMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub range: DateRange,
    pub rows: Vec<EmployeeReport>,
    pub grid: Vec<GridRow>,
}

pub fn efficiency(total_hours: f64, work_days: usize, standard_daily_hours: f64) -> f64 {
    let expected = work_days as f64 * standard_daily_hours;
    if work_days == 0 || expected <= 0.0 {
        return 0.0;
    }
    ((total_hours / expected) * 100.0 * 10.0).round() / 10.0
}

#[derive(Default)]
struct Acc {
    days: BTreeSet<chrono::NaiveDate>,
    total: f64,
    per_day: BTreeMap<String, f64>,
}

/// Aggregate `intervals` (already restricted to `range`) per owner.
///
/// Every registered non-admin employee gets a row even without shifts;
/// admins and unregistered owners appear only when they have shifts.
pub fn build_report(
    range: DateRange,
    employees: &[Employee],
    intervals: &[Interval],
    standard_daily_hours: f64,
) -> MonthlyReport {
    let mut acc: BTreeMap<String, Acc> = BTreeMap::new();

    for e in employees.iter().filter(|e| !e.is_admin()) {
        acc.entry(e.id.clone()).or_default();
    }

    for iv in intervals.iter().filter(|iv| range.contains(iv.start.date())) {
        let a = acc.entry(iv.owner_id.clone()).or_default();
        a.days.insert(iv.start.date());
        a.total += iv.duration_hours;
        *a.per_day
            .entry(iv.start.date().format("%Y-%m-%d").to_string())
            .or_insert(0.0) += iv.duration_hours;
    }

    let names: BTreeMap<&str, &str> = employees
        .iter()
        .map(|e| (e.id.as_str(), e.name.as_str()))
        .collect();
    let weekdays = range.weekdays();

    let mut rows = Vec::new();
    let mut grid = Vec::new();

    for (id, a) in acc {
        let name = names.get(id.as_str()).copied().unwrap_or(id.as_str()).to_string();
        let work_days = a.days.len();

        rows.push(EmployeeReport {
            employee_id: id.clone(),
            name: name.clone(),
            work_days,
            total_hours: a.total,
            absence_days: weekdays.saturating_sub(work_days),
            efficiency: efficiency(a.total, work_days, standard_daily_hours),
        });

        grid.push(GridRow {
            employee_id: id,
            name,
            hours: a.per_day,
        });
    }

    MonthlyReport { range, rows, grid }
}

pub struct ReportLogic;

impl ReportLogic {
    /// Build the report for `range`. Non-admin sessions only see their own row.
    pub fn generate(
        pool: &DbPool,
        cfg: &Config,
        session: &Session,
        range: DateRange,
    ) -> AppResult<MonthlyReport> {
        let (owner, employees) = if session.is_admin() {
            (None, list_employees(&pool.conn)?)
        } else {
            (Some(session.actor_id()), vec![session.actor.clone()])
        };

        let intervals = pool.fetch_intervals(owner, &range)?;
        Ok(build_report(
            range,
            &employees,
            &intervals,
            cfg.standard_daily_hours,
        ))
    }
}
