pub mod add;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod employee;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod report;
pub mod schedule;

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::interval::Conflict;
use crate::ui::messages::warning;
use crate::utils::formatting::{hours, mins2readable};

/// Open the configured database, creating or upgrading the schema.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    DbPool::open_initialized(&cfg.database)
}

/// Print the cross-employee overlaps of a submission.
pub(crate) fn print_conflicts(conflicts: &[Conflict]) {
    warning(format!(
        "This shift overlaps {} shift(s) of other employees:",
        conflicts.len()
    ));

    for c in conflicts {
        println!(
            "   #{} {} {} → {} ({}h), overlap {}",
            c.other.id,
            c.other.owner_id,
            c.other.start_str(),
            c.other.end_str(),
            hours(c.other.duration_hours),
            mins2readable(c.overlap_minutes)
        );
    }
}
