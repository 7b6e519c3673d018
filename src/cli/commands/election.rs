use crate::cli::parser::Commands;
use crate::core::election::ElectionLogic;
use crate::core::reports::election::ElectionOverview;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use std::io::{Write, stdin, stdout};

/// Election lifecycle: create, list, show, update, delete.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::Election {
        create,
        list,
        show,
        update,
        delete,
        name,
        election_type,
        status,
        date,
        yes,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1. CREATE
        //
        if *create {
            let name = name
                .as_deref()
                .ok_or_else(|| AppError::Validation("Election name is required.".into()))?;
            let type_str = election_type
                .as_deref()
                .ok_or_else(|| AppError::Validation("Election type is required (--type).".into()))?;
            let date_str = date
                .as_deref()
                .ok_or_else(|| AppError::Validation("Election date is required (--date).".into()))?;

            let election =
                ElectionLogic::create(&mut pool, name, type_str, status.as_deref(), date_str)?;

            success(format!(
                "Election created (id {}). Governorates seeded: {}.",
                election.id,
                election.election_type.default_governorates().len()
            ));
            return Ok(());
        }

        //
        // 2. LIST
        //
        if *list {
            let elections = crate::db::queries::list_elections(&pool.conn)?;
            if elections.is_empty() {
                info("No elections found.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "Name", "Type", "Status", "Date"]);
            for e in elections {
                table.add_row(vec![
                    e.id.to_string(),
                    e.name.clone(),
                    e.election_type.to_db_str().to_string(),
                    e.status.to_db_str().to_string(),
                    e.election_date.format("%Y-%m-%d").to_string(),
                ]);
            }
            print!("{}", table.render());
            return Ok(());
        }

        //
        // 3. SHOW (overview with per-governorate totals)
        //
        if let Some(id) = show {
            let overview = ElectionOverview::build(&pool.conn, *id)?;

            println!(
                "🗳️  {} [{}] {} ({})\n",
                overview.election.name,
                overview.election.election_type.to_db_str(),
                overview.election.election_date.format("%Y-%m-%d"),
                overview.election.status.to_db_str()
            );

            let mut table = Table::new(&["Governorate", "Public", "Special", "Total"]);
            for row in &overview.rows {
                table.add_row(vec![
                    row.governorate.clone(),
                    row.public_total.to_string(),
                    row.special_total.to_string(),
                    row.total_votes.to_string(),
                ]);
            }
            print!("{}", table.render());
            return Ok(());
        }

        //
        // 4. UPDATE
        //
        if let Some(id) = update {
            let election = ElectionLogic::update(
                &mut pool,
                *id,
                name.as_deref(),
                election_type.as_deref(),
                status.as_deref(),
                date.as_deref(),
            )?;
            success(format!("Election '{}' updated successfully.", election.name));
            return Ok(());
        }

        //
        // 5. DELETE (confirmation unless --yes)
        //
        if let Some(id) = delete {
            if !*yes {
                print!("Delete election {} with ALL its data? [y/N]: ", id);
                stdout().flush().ok();

                let mut answer = String::new();
                stdin().read_line(&mut answer)?;
                let answer = answer.trim().to_lowercase();
                if !(answer == "y" || answer == "yes") {
                    info("Deletion cancelled.");
                    return Ok(());
                }
            }

            let election = ElectionLogic::delete(&mut pool, *id)?;
            success(format!("Election '{}' deleted successfully.", election.name));
            return Ok(());
        }

        info("Use `election --create`, `--list`, `--show ID`, `--update ID` or `--delete ID`.");
    }

    Ok(())
}
