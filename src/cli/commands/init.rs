use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Initialize the configuration and the database schema.
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let db_path = match &cli.db {
        Some(p) => p.clone(),
        None => Config::database_file().to_string_lossy().to_string(),
    };

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;
    ttlog(&pool.conn, "init", &db_path, "Database initialized")?;

    success("Initialization complete.");
    Ok(())
}
