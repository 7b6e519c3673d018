#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rvt() -> Command {
    cargo_bin_cmd!("rvotetally")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rvotetally.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary file path inside tempdir and ensure it's removed
pub fn temp_file(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rvt.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and create one IRAQ election (id 1) with its seeded
/// governorates. Most tests import under governorate "Slemani".
pub fn init_with_election(db_path: &str) {
    rvt()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rvt()
        .args([
            "--db",
            db_path,
            "--test",
            "election",
            "--create",
            "--name",
            "Parliament 2021",
            "--type",
            "IRAQ",
            "--date",
            "2021-10-10",
        ])
        .assert()
        .success();
}

/// Write a geography CSV with the required header.
/// Rows: (district, subdistrict, unit_number, unit_name, unit_address, allowed)
pub fn write_geo_csv(path: &str, rows: &[(&str, &str, &str, &str, &str, &str)]) {
    let mut out = String::from(
        "Governorate,District,Subdistrict,Election Unit Number,Election Unit Name,Election Unit Address,Total Allowed Votes\n",
    );
    for (district, subdistrict, number, name, address, allowed) in rows {
        out.push_str(&format!(
            "Slemani,{district},{subdistrict},{number},{name},{address},{allowed}\n"
        ));
    }
    fs::write(path, out).expect("write geo csv");
}

/// Write a votes CSV with the required header.
/// Rows: (unit_number, votes, candidate_number, candidate_name, list_name, list_number)
pub fn write_votes_csv(path: &str, rows: &[(&str, &str, &str, &str, &str, &str)]) {
    let mut out = String::from(
        "Election Unit Number,Number of Votes,Candidate number,Candidate name,List Name,List Number\n",
    );
    for (number, votes, cand_no, cand_name, list_name, list_no) in rows {
        out.push_str(&format!(
            "{number},{votes},{cand_no},{cand_name},{list_name},{list_no}\n"
        ));
    }
    fs::write(path, out).expect("write votes csv");
}

/// Shortcut: import a geography file for election 1 / Slemani.
pub fn import_geo(db_path: &str, file: &str) {
    rvt()
        .args([
            "--db",
            db_path,
            "--test",
            "import-geo",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--file",
            file,
        ])
        .assert()
        .success();
}

/// Shortcut: import a votes file for election 1 / Slemani on a channel.
pub fn import_votes(db_path: &str, channel: &str, file: &str) {
    rvt()
        .args([
            "--db",
            db_path,
            "--test",
            "import-votes",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--channel",
            channel,
            "--file",
            file,
        ])
        .assert()
        .success();
}

pub fn open_db(db_path: &str) -> rusqlite::Connection {
    rusqlite::Connection::open(db_path).expect("open test db")
}

pub fn count(conn: &rusqlite::Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).expect("count query")
}
