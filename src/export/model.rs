use crate::core::report::{EmployeeReport, MonthlyReport};
use crate::models::interval::Interval;
use serde::Serialize;

/// Flat shift record for CSV / JSON / XLSX.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct IntervalExport {
    pub id: i64,
    pub employee_id: String,
    pub start: String,
    pub end: String,
    pub duration_hours: f64,
    pub crosses_day: bool,
    pub notes: String,
}

impl From<&Interval> for IntervalExport {
    fn from(iv: &Interval) -> Self {
        Self {
            id: iv.id,
            employee_id: iv.owner_id.clone(),
            start: iv.start_str(),
            end: iv.end_str(),
            duration_hours: (iv.duration_hours * 100.0).round() / 100.0,
            crosses_day: iv.crosses_day(),
            notes: iv.notes.clone(),
        }
    }
}

/// Plain table: header line plus string cells.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Records that can be laid out as spreadsheet rows.
pub(crate) trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn to_row(&self) -> Vec<String>;
}

impl Tabular for IntervalExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "id",
            "employee_id",
            "start",
            "end",
            "duration_hours",
            "crosses_day",
            "notes",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.employee_id.clone(),
            self.start.clone(),
            self.end.clone(),
            format!("{:.2}", self.duration_hours),
            self.crosses_day.to_string(),
            self.notes.clone(),
        ]
    }
}

impl Tabular for EmployeeReport {
    fn headers() -> Vec<&'static str> {
        vec![
            "employee_id",
            "name",
            "work_days",
            "total_hours",
            "absence_days",
            "efficiency",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.employee_id.clone(),
            self.name.clone(),
            self.work_days.to_string(),
            format!("{:.1}", self.total_hours),
            self.absence_days.to_string(),
            format!("{:.1}", self.efficiency),
        ]
    }
}

pub(crate) fn sheet_of<T: Tabular>(items: &[T]) -> Sheet {
    Sheet {
        headers: T::headers().into_iter().map(String::from).collect(),
        rows: items.iter().map(Tabular::to_row).collect(),
    }
}

/// One row per employee, one column per date of the report range.
pub(crate) fn grid_sheet(report: &MonthlyReport) -> Sheet {
    let dates: Vec<String> = report
        .range
        .days()
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    let mut headers = vec!["employee_id".to_string(), "name".to_string()];
    headers.extend(dates.iter().cloned());

    let rows = report
        .grid
        .iter()
        .map(|g| {
            let mut row = vec![g.employee_id.clone(), g.name.clone()];
            row.extend(dates.iter().map(|d| {
                g.hours
                    .get(d)
                    .map(|h| format!("{:.1}", h))
                    .unwrap_or_default()
            }));
            row
        })
        .collect();

    Sheet { headers, rows }
}
