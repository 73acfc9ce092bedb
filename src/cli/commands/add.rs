use crate::cli::commands::{open_pool, print_conflicts};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, AddRequest, Submission};
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::utils::date;
use crate::utils::formatting::{hours, yes_no};
use crate::utils::time::parse_optional_time;

/// Record a shift.
pub fn handle(cmd: &Commands, cfg: &Config, actor: Option<&str>) -> AppResult<()> {
    if let Commands::Add {
        date,
        start,
        end,
        end_date,
        owner,
        notes,
        force,
        dry_run,
    } = cmd
    {
        //
        // 1. Parse arguments
        //
        let req = AddRequest {
            owner: owner.clone(),
            date: date::require_date(date)?,
            start: parse_optional_time(start.as_ref())?,
            end: parse_optional_time(end.as_ref())?,
            end_date: end_date.as_deref().map(date::require_date).transpose()?,
            notes: notes.clone(),
            force: *force,
            dry_run: *dry_run,
        };

        //
        // 2. Open DB + session
        //
        let pool = open_pool(cfg)?;
        let session = Session::require(&pool, actor)?;

        //
        // 3. Execute logic
        //
        let outcome = AddLogic::apply(&pool, cfg, &session, &req, |conflicts| {
            print_conflicts(conflicts);
            confirm("Save the shift anyway?")
        })?;

        match outcome {
            Submission::Saved {
                interval,
                conflicts,
            } => {
                if !conflicts.is_empty() && *force {
                    print_conflicts(&conflicts);
                }
                success(format!(
                    "Shift #{} saved for {}: {} → {} ({}h{}).",
                    interval.id,
                    interval.owner_id,
                    interval.start_str(),
                    interval.end_str(),
                    hours(interval.duration_hours),
                    if interval.crosses_day() { ", overnight" } else { "" }
                ));
            }
            Submission::DryRun {
                interval,
                conflicts,
            } => {
                info(format!(
                    "Dry run for {}: {} → {}",
                    interval.owner_id,
                    interval.start.format("%Y-%m-%d %H:%M"),
                    interval.end.format("%Y-%m-%d %H:%M")
                ));
                println!("   duration    : {}h", hours(interval.duration_hours));
                println!("   crosses day : {}", yes_no(interval.crosses_day()));

                if conflicts.is_empty() {
                    println!("   overlaps    : none");
                } else {
                    print_conflicts(&conflicts);
                }
                info("Nothing was saved.");
            }
            Submission::Cancelled { .. } => {
                info("Operation cancelled: shift not saved.");
            }
        }
    }

    Ok(())
}
