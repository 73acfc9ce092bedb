use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::IntervalStore;
use crate::errors::AppResult;
use crate::models::date_range::DateRange;
use crate::models::session::Session;
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_optional;
use crate::utils::date;
use crate::utils::formatting::{hours, yes_no};
use crate::utils::table::Table;

fn resolve_period(period: Option<&str>) -> AppResult<DateRange> {
    match period {
        Some(p) => date::parse_period(p),
        None => date::current_month(),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, actor: Option<&str>) -> AppResult<()> {
    if let Commands::List { period, owner, all } = cmd {
        let range = resolve_period(period.as_deref())?;

        let pool = open_pool(cfg)?;
        let session = Session::require(&pool, actor)?;

        let owner: Option<&str> = if *all {
            session.require_admin("list every employee's shifts")?;
            None
        } else {
            let o = owner.as_deref().unwrap_or(session.actor_id());
            session.authorize_owner(o, "list shifts of")?;
            Some(o)
        };

        let intervals = pool.fetch_intervals(owner, &range)?;

        header(format!(
            "Shifts {} → {}{}",
            range.from,
            range.to,
            owner.map(|o| format!(" ({})", o)).unwrap_or_default()
        ));

        if intervals.is_empty() {
            info("No shifts in this period.");
            return Ok(());
        }

        let mut table = Table::new(["ID", "EMPLOYEE", "START", "END", "HOURS", "OVERNIGHT", "NOTES"]);
        let mut total = 0.0;

        for iv in &intervals {
            total += iv.duration_hours;
            table.add_row(vec![
                iv.id.to_string(),
                iv.owner_id.clone(),
                iv.start_str(),
                iv.end_str(),
                hours(iv.duration_hours),
                yes_no(iv.crosses_day()).to_string(),
                colorize_optional(if iv.notes.is_empty() { "--" } else { iv.notes.as_str() }),
            ]);
        }

        print!("{}", table.render(&cfg.separator_char));
        println!();
        println!("Shifts: {}   Total hours: {}", intervals.len(), hours(total));
    }

    Ok(())
}
