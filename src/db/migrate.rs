use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `elections` table exists.
fn elections_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='elections'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `election_units` table has a `stations_count` column.
fn units_has_stations_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('election_units')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "stations_count" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the full result-entry schema.
///
/// Ownership rules are expressed in the schema itself:
/// - the owning chain election → governorate → district → subdistrict
///   cascades deletes downward;
/// - units and vote records cascade with the election, but only lose their
///   district/subdistrict attribution (SET NULL) when that parent goes away.
fn create_core_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS elections (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            election_type TEXT NOT NULL CHECK(election_type IN ('IRAQ','KRG')),
            status        TEXT NOT NULL DEFAULT 'ACTIVE' CHECK(status IN ('ACTIVE','FINISHED')),
            election_date TEXT NOT NULL,
            created_at    TEXT NOT NULL,
            UNIQUE(election_date, election_type)
        );

        CREATE TABLE IF NOT EXISTS governorates (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            election_id INTEGER NOT NULL REFERENCES elections(id) ON DELETE CASCADE,
            name        TEXT NOT NULL,
            UNIQUE(election_id, name)
        );

        CREATE TABLE IF NOT EXISTS districts (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            governorate_id INTEGER NOT NULL REFERENCES governorates(id) ON DELETE CASCADE,
            name           TEXT NOT NULL,
            UNIQUE(governorate_id, name)
        );

        CREATE TABLE IF NOT EXISTS subdistricts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            district_id INTEGER NOT NULL REFERENCES districts(id) ON DELETE CASCADE,
            name        TEXT NOT NULL,
            UNIQUE(district_id, name)
        );

        CREATE TABLE IF NOT EXISTS election_units (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            election_id         INTEGER NOT NULL REFERENCES elections(id) ON DELETE CASCADE,
            governorate_id      INTEGER NOT NULL REFERENCES governorates(id) ON DELETE CASCADE,
            district_id         INTEGER REFERENCES districts(id) ON DELETE SET NULL,
            subdistrict_id      INTEGER REFERENCES subdistricts(id) ON DELETE SET NULL,
            unit_number         TEXT NOT NULL,
            unit_name           TEXT NOT NULL DEFAULT '',
            unit_address        TEXT NOT NULL DEFAULT '',
            stations_count      INTEGER NOT NULL DEFAULT 0,
            total_allowed_votes INTEGER NOT NULL DEFAULT 0 CHECK(total_allowed_votes >= 0),
            UNIQUE(election_id, unit_number)
        );

        CREATE INDEX IF NOT EXISTS idx_units_election_number ON election_units(election_id, unit_number);
        CREATE INDEX IF NOT EXISTS idx_units_governorate ON election_units(governorate_id);
        CREATE INDEX IF NOT EXISTS idx_units_district ON election_units(district_id);
        CREATE INDEX IF NOT EXISTS idx_units_subdistrict ON election_units(subdistrict_id);

        CREATE TABLE IF NOT EXISTS vote_records (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            election_id        INTEGER NOT NULL REFERENCES elections(id) ON DELETE CASCADE,
            governorate_id     INTEGER NOT NULL REFERENCES governorates(id) ON DELETE CASCADE,
            election_unit_id   INTEGER NOT NULL REFERENCES election_units(id) ON DELETE CASCADE,
            candidate_number   TEXT NOT NULL,
            candidate_name     TEXT NOT NULL,
            list_name          TEXT NOT NULL,
            list_number        TEXT NOT NULL,
            gender             TEXT NOT NULL DEFAULT '',
            voting_type        TEXT NOT NULL CHECK(voting_type IN ('Public','Special')),
            voting_governorate TEXT NOT NULL DEFAULT '',
            station_number     TEXT NOT NULL DEFAULT '',
            number_of_votes    INTEGER NOT NULL DEFAULT 0 CHECK(number_of_votes >= 0),
            created_at         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_votes_election_gov ON vote_records(election_id, governorate_id);
        CREATE INDEX IF NOT EXISTS idx_votes_unit ON vote_records(election_unit_id);
        CREATE INDEX IF NOT EXISTS idx_votes_list ON vote_records(list_number);
        CREATE INDEX IF NOT EXISTS idx_votes_type ON vote_records(voting_type);

        CREATE TABLE IF NOT EXISTS upload_log (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            election_id    INTEGER NOT NULL REFERENCES elections(id) ON DELETE CASCADE,
            governorate_id INTEGER NOT NULL REFERENCES governorates(id) ON DELETE CASCADE,
            kind           TEXT NOT NULL CHECK(kind IN ('geo','votes')),
            filename       TEXT NOT NULL,
            inserted_count INTEGER NOT NULL DEFAULT 0,
            updated_count  INTEGER NOT NULL DEFAULT 0,
            skipped_count  INTEGER NOT NULL DEFAULT 0,
            uploaded_at    TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Add `stations_count` to election_units created before 0.3.0.
fn migrate_add_stations_count(conn: &Connection) -> Result<()> {
    let version = "20250601_0007_add_stations_count";

    // 1) Verify whether already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if units_has_stations_column(conn)? {
        // Fresh schema already carries the column; just record the marker.
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'stations_count present')",
            [version],
        )?;
        return Ok(());
    }

    conn.execute(
        "ALTER TABLE election_units ADD COLUMN stations_count INTEGER NOT NULL DEFAULT 0;",
        [],
    )?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added stations_count to election_units')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'stations_count' to election_units",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create the core schema when missing
    let fresh = !elections_table_exists(conn)?;
    create_core_tables(conn)?;
    if fresh {
        success("Created election result tables (modern schema).");
    }

    // 3) Column-level upgrades for pre-0.3.0 databases
    migrate_add_stations_count(conn)?;

    Ok(())
}
