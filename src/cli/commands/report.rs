use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{MonthlyReport, ReportLogic};
use crate::errors::{AppError, AppResult};
use crate::export::ExportLogic;
use crate::models::session::Session;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_efficiency};
use crate::utils::date;
use crate::utils::formatting::{hours, percent};
use crate::utils::table::Table;

fn print_summary(report: &MonthlyReport, sep: &str) {
    let mut table = Table::new(["EMPLOYEE", "NAME", "WORK DAYS", "HOURS", "ABSENCES", "EFFICIENCY"]);

    for r in &report.rows {
        table.add_row(vec![
            r.employee_id.clone(),
            r.name.clone(),
            r.work_days.to_string(),
            hours(r.total_hours),
            r.absence_days.to_string(),
            format!(
                "{}{}{}",
                color_for_efficiency(r.efficiency),
                percent(r.efficiency),
                RESET
            ),
        ]);
    }

    print!("{}", table.render(sep));
}

fn print_grid(report: &MonthlyReport, sep: &str) {
    let days = report.range.days();

    let mut headers = vec!["EMPLOYEE".to_string()];
    headers.extend(days.iter().map(|d| d.format("%d").to_string()));
    headers.push("TOTAL".to_string());

    let mut table = Table::new(headers);

    for g in &report.grid {
        let mut row = vec![g.employee_id.clone()];
        row.extend(days.iter().map(|d| {
            g.hours
                .get(&d.format("%Y-%m-%d").to_string())
                .map(|h| hours(*h))
                .unwrap_or_default()
        }));
        row.push(hours(g.hours.values().sum::<f64>()));
        table.add_row(row);
    }

    print!("{}", table.render(sep));
}

pub fn handle(cmd: &Commands, cfg: &Config, actor: Option<&str>) -> AppResult<()> {
    if let Commands::Report {
        period,
        format,
        file,
        grid,
        force,
    } = cmd
    {
        let range = match period {
            Some(p) => date::parse_period(p)?,
            None => date::current_month()?,
        };

        let pool = open_pool(cfg)?;
        let session = Session::require(&pool, actor)?;

        let report = ReportLogic::generate(&pool, cfg, &session, range)?;

        if let Some(fmt) = format {
            let file = file.as_deref().ok_or_else(|| {
                AppError::Export(format!("--file is required to write a {} report", fmt.as_str()))
            })?;
            return ExportLogic::export_report(&report, *fmt, file, *grid, *force);
        }

        header(format!("Report {} → {}", range.from, range.to));

        if report.rows.is_empty() {
            info("No employees to report on.");
            return Ok(());
        }

        if *grid {
            print_grid(&report, &cfg.separator_char);
        } else {
            print_summary(&report, &cfg.separator_char);
        }
    }

    Ok(())
}
