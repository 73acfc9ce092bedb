use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, ScheduleAction};
use crate::config::Config;
use crate::core::schedule::ScheduleLogic;
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::ui::messages::{info, success};
use crate::utils::date::parse_weekday;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, actor: Option<&str>) -> AppResult<()> {
    let Commands::Schedule { action } = cmd else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;
    let session = Session::require(&pool, actor)?;

    match action {
        ScheduleAction::Add {
            owner,
            day,
            start,
            end,
        } => {
            let employee = owner.as_deref().unwrap_or(session.actor_id());
            let s = ScheduleLogic::add(&pool, &session, employee, parse_weekday(day)?, start, end)?;

            success(format!(
                "Schedule #{} added for {}: {} {}-{}.",
                s.id,
                s.employee_id,
                s.day_name(),
                s.start_time,
                s.end_time
            ));
        }

        ScheduleAction::List { owner } => {
            let employee = match owner {
                Some(o) => {
                    session.authorize_owner(o, "view schedules of")?;
                    Some(o.as_str())
                }
                None if session.is_admin() => None,
                None => Some(session.actor_id()),
            };

            let schedules = ScheduleLogic::list(&pool, employee)?;
            if schedules.is_empty() {
                info("No default schedules.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "EMPLOYEE", "DAY", "IN", "OUT"]);
            for s in &schedules {
                table.add_row(vec![
                    s.id.to_string(),
                    s.employee_id.clone(),
                    s.day_name().to_string(),
                    s.start_time.clone(),
                    s.end_time.clone(),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
        }

        ScheduleAction::Edit {
            id,
            day,
            start,
            end,
        } => {
            let day = day.as_deref().map(parse_weekday).transpose()?;
            let s = ScheduleLogic::update(
                &pool,
                &session,
                *id,
                day,
                start.as_deref(),
                end.as_deref(),
            )?;

            success(format!(
                "Schedule #{} updated: {} {}-{}.",
                s.id,
                s.day_name(),
                s.start_time,
                s.end_time
            ));
        }

        ScheduleAction::Del { id } => {
            let s = ScheduleLogic::remove(&pool, &session, *id)?;
            success(format!(
                "Schedule #{} ({} {}) removed.",
                s.id,
                s.employee_id,
                s.day_name()
            ));
        }
    }

    Ok(())
}
