//! shiftkeeper library root.
//! Exposes the CLI parser, the high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let actor = cli.actor.as_deref().or(cfg.default_user.as_deref());

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => {
            cli::commands::config::handle(&cli.command, cfg, cli.config.as_deref())
        }
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Employee { .. } => cli::commands::employee::handle(&cli.command, cfg, actor),
        Commands::Schedule { .. } => cli::commands::schedule::handle(&cli.command, cfg, actor),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg, actor),
        Commands::Edit { .. } => cli::commands::edit::handle(&cli.command, cfg, actor),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg, actor),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg, actor),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg, actor),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, actor),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load the configuration once (explicit --config wins over the default location)
    let mut cfg = match &cli.config {
        Some(path) => Config::load_from(std::path::Path::new(path))?,
        None => Config::load()?,
    };

    // 3️⃣ apply the database override from the command line
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
