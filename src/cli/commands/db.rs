use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::db_utils;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

/// Database maintenance: migrations, integrity check, vacuum, info.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            run_pending_migrations(&pool.conn)?;
            success("Migrations are up to date.");
        }

        if *check {
            if db_utils::integrity_check(&mut pool)? {
                success("Database integrity: ok");
            } else {
                error("Database integrity check FAILED");
            }
        }

        if *vacuum {
            db_utils::vacuum(&mut pool)?;
            success("VACUUM completed.");
        }

        if *show_info {
            db_utils::print_db_info(&mut pool, &cfg.database)?;
        }

        if !(*migrate || *check || *vacuum || *show_info) {
            info("Use `db --migrate`, `db --check`, `db --vacuum` or `db --info`.");
        }
    }

    Ok(())
}
