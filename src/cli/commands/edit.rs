use crate::cli::commands::{open_pool, print_conflicts};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::Submission;
use crate::core::edit::{EditLogic, EditRequest};
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::utils::date;
use crate::utils::formatting::hours;
use crate::utils::time::parse_optional_time;

pub fn handle(cmd: &Commands, cfg: &Config, actor: Option<&str>) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date: start_date,
        start,
        end,
        end_date,
        notes,
        clear_notes,
        force,
    } = cmd
    {
        let req = EditRequest {
            id: *id,
            date: start_date.as_deref().map(date::require_date).transpose()?,
            start: parse_optional_time(start.as_ref())?,
            end: parse_optional_time(end.as_ref())?,
            end_date: end_date.as_deref().map(date::require_date).transpose()?,
            notes: notes.clone(),
            clear_notes: *clear_notes,
            force: *force,
        };

        let pool = open_pool(cfg)?;
        let session = Session::require(&pool, actor)?;

        let outcome = EditLogic::apply(&pool, cfg, &session, &req, |conflicts| {
            print_conflicts(conflicts);
            confirm("Save the changes anyway?")
        })?;

        match outcome {
            Submission::Saved { interval, .. } => success(format!(
                "Shift #{} updated: {} → {} ({}h).",
                interval.id,
                interval.start_str(),
                interval.end_str(),
                hours(interval.duration_hours)
            )),
            _ => info("Operation cancelled: shift not changed."),
        }
    }

    Ok(())
}
