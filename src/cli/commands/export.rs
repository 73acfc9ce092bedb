use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::session::Session;

pub fn handle(cmd: &Commands, cfg: &Config, actor: Option<&str>) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        owner,
        force,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        let session = Session::require(&pool, actor)?;

        ExportLogic::export_intervals(
            &pool,
            &session,
            *format,
            file,
            range.as_deref(),
            owner.as_deref(),
            *force,
        )?;
    }

    Ok(())
}
