use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::path::{Path, PathBuf};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let config_path: PathBuf = cli
        .config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_file);

    let new_cfg = Config::init_all(
        cli.db.as_deref(),
        cli.config.as_deref().map(Path::new),
        cli.test,
    )?;

    // keep the preferences of an existing configuration file
    let db_path = if cli.db.is_some() {
        new_cfg.database.clone()
    } else {
        cfg.database.clone()
    };

    println!("⚙️  Initializing shiftkeeper…");
    if !cli.test {
        println!("📄 Config file : {}", config_path.display());
    }
    println!("🗄️  Database   : {}", db_path);

    let pool = DbPool::open_initialized(&db_path)?;

    if let Err(e) = audit(
        &pool.conn,
        "init",
        "",
        &format!("Database initialized at {}", db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success(format!("Database initialized at {}", db_path));
    Ok(())
}
