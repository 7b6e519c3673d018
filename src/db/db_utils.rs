use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

/// Run PRAGMA integrity_check and report the result.
pub fn integrity_check(pool: &mut DbPool) -> rusqlite::Result<bool> {
    let verdict: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    Ok(verdict == "ok")
}

/// Reclaim free pages. Cheap on the small databases this tool produces.
pub fn vacuum(pool: &mut DbPool) -> rusqlite::Result<()> {
    pool.conn.execute_batch("VACUUM;")?;
    Ok(())
}

fn table_count(pool: &mut DbPool, table: &str) -> rusqlite::Result<i64> {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS PER TABLE
    //
    for table in [
        "elections",
        "governorates",
        "districts",
        "subdistricts",
        "election_units",
        "vote_records",
        "upload_log",
    ] {
        let count = table_count(pool, table)?;
        println!(
            "{}• {}:{} {}{}{}",
            CYAN, table, RESET, GREEN, count, RESET
        );
    }

    //
    // 3) LAST UPLOAD
    //
    let last_upload: Option<(String, String)> = pool
        .conn
        .query_row(
            "SELECT filename, uploaded_at FROM upload_log ORDER BY id DESC LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    match last_upload {
        Some((filename, uploaded_at)) => {
            println!("{}• Last upload:{} {} ({})", CYAN, RESET, filename, uploaded_at);
        }
        None => println!("{}• Last upload:{} {}--{}", CYAN, RESET, GREY, RESET),
    }

    println!();
    Ok(())
}
