use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, EmployeeAction};
use crate::config::Config;
use crate::core::employee::EmployeeLogic;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Role;
use crate::models::session::Session;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, actor: Option<&str>) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;

    match action {
        EmployeeAction::Add { id, name, admin } => {
            // self sign-up: an acting id that is not registered yet is no session
            let session = match Session::optional(&pool, actor) {
                Err(AppError::UnknownEmployee(_)) => None,
                other => other?,
            };
            let role = if *admin { Role::Admin } else { Role::Employee };

            let emp = EmployeeLogic::register(
                &pool,
                session.as_ref(),
                id,
                name.as_deref().unwrap_or(""),
                role,
            )?;

            success(format!(
                "Employee '{}' ({}) registered as {}.",
                emp.id,
                emp.name,
                emp.role.to_db_str()
            ));
        }

        EmployeeAction::List => {
            let employees = EmployeeLogic::list(&pool)?;

            if employees.is_empty() {
                info("No employees registered yet.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "NAME", "ROLE", "SINCE"]);
            for e in employees {
                let since = e.created_at.get(..10).unwrap_or(&e.created_at).to_string();
                table.add_row(vec![e.id, e.name, e.role.to_db_str().to_string(), since]);
            }
            print!("{}", table.render(&cfg.separator_char));
        }

        EmployeeAction::Promote { id } => {
            let session = Session::require(&pool, actor)?;
            let emp = EmployeeLogic::promote(&pool, &session, id)?;
            success(format!("Employee '{}' is now an administrator.", emp.id));
        }

        EmployeeAction::Del { id, yes } => {
            let session = Session::require(&pool, actor)?;

            if !*yes
                && !confirm(&format!(
                    "Remove employee '{}' with all their shifts and schedules? This action is irreversible.",
                    id
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            EmployeeLogic::remove(&pool, &session, id)?;
            success(format!("Employee '{}' has been removed.", id));
        }
    }

    Ok(())
}
