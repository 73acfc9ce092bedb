use crate::core::report::MonthlyReport;
use crate::db::pool::DbPool;
use crate::db::store::{self, IntervalStore};
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_csv_sheet, export_json};
use crate::export::model::{IntervalExport, grid_sheet, sheet_of};
use crate::export::xlsx::export_xlsx;
use crate::models::interval::Interval;
use crate::models::session::Session;
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use crate::utils::path::require_absolute;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export raw shifts.
    ///
    /// - `range`: `None`, `"all"` or a period expression (`YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD`, `A:B`)
    /// - `owner`: restrict to one employee; non-admins always export their own
    ///
    /// Returns the number of exported shifts (nothing is written when 0).
    pub fn export_intervals(
        pool: &DbPool,
        session: &Session,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        owner: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = require_absolute(file)?;

        let owner = match owner {
            Some(o) => {
                session.authorize_owner(o, "export shifts of")?;
                Some(o)
            }
            None if session.is_admin() => None,
            None => Some(session.actor_id()),
        };

        let intervals: Vec<Interval> = match range {
            None => store::all_intervals(&pool.conn)?,
            Some(r) if r.eq_ignore_ascii_case("all") => store::all_intervals(&pool.conn)?,
            Some(r) => pool.fetch_intervals(owner, &parse_period(r)?)?,
        }
        .into_iter()
        .filter(|iv| owner.is_none_or(|o| iv.owner_id == o))
        .collect();

        if intervals.is_empty() {
            warning("No shifts found for the selected range.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        let records: Vec<IntervalExport> = intervals.iter().map(IntervalExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&records, &path)?,
            ExportFormat::Json => export_json(&records, &path)?,
            ExportFormat::Xlsx => export_xlsx(&sheet_of(&records), "Shifts", &path)?,
        }

        Ok(records.len())
    }

    /// Export a report: the summary rows, or the daily-hours grid.
    pub fn export_report(
        report: &MonthlyReport,
        format: ExportFormat,
        file: &str,
        grid: bool,
        force: bool,
    ) -> AppResult<()> {
        let path = require_absolute(file)?;
        ensure_writable(&path, force)?;

        match (format, grid) {
            (ExportFormat::Csv, false) => export_csv(&report.rows, &path),
            (ExportFormat::Csv, true) => export_csv_sheet(&grid_sheet(report), &path),
            (ExportFormat::Json, false) => export_json(&report.rows, &path),
            (ExportFormat::Json, true) => export_json(&report.grid, &path),
            (ExportFormat::Xlsx, false) => export_xlsx(&sheet_of(&report.rows), "Report", &path),
            (ExportFormat::Xlsx, true) => export_xlsx(&grid_sheet(report), "Daily hours", &path),
        }
    }
}
