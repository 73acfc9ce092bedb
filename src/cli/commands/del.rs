use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;

pub fn handle(cmd: &Commands, cfg: &Config, actor: Option<&str>) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let pool = open_pool(cfg)?;
        let session = Session::require(&pool, actor)?;

        let deleted = DeleteLogic::apply(&pool, &session, *id, |iv| {
            *yes
                || confirm(&format!(
                    "Delete shift #{} of {} ({} → {})? This action is irreversible.",
                    iv.id,
                    iv.owner_id,
                    iv.start_str(),
                    iv.end_str()
                ))
        })?;

        match deleted {
            Some(iv) => success(format!("Shift #{} of {} has been deleted.", iv.id, iv.owner_id)),
            None => info("Operation cancelled."),
        }
    }

    Ok(())
}
