use predicates::str::contains;

mod common;
use common::{
    count, import_geo, import_votes, init_with_election, open_db, rvt, setup_test_db, temp_file,
    write_geo_csv, write_votes_csv,
};

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("admin_db_check");
    init_with_election(&db_path);

    rvt()
        .args(["--db", &db_path, "--test", "db", "--check"])
        .assert()
        .success()
        .stdout(contains("integrity: ok"));

    rvt()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("elections"))
        .stdout(contains("vote_records"));
}

#[test]
fn test_db_migrate_is_idempotent() {
    let db_path = setup_test_db("admin_db_migrate");
    init_with_election(&db_path);

    // running migrations twice must not fail or duplicate anything
    rvt()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("up to date"));

    let conn = open_db(&db_path);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM elections"), 1);
}

#[test]
fn test_audit_log_records_operations() {
    let db_path = setup_test_db("admin_log");
    init_with_election(&db_path);

    let geo = temp_file("admin_log_geo", "csv");
    write_geo_csv(&geo, &[("A", "B", "1", "Hall 1", "Main St", "500")]);
    import_geo(&db_path, &geo);

    rvt()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("election-create"))
        .stdout(contains("import-geo"));
}

#[test]
fn test_upload_log_is_append_only_audit() {
    let db_path = setup_test_db("admin_upload_log");
    init_with_election(&db_path);

    let geo = temp_file("admin_upload_log_geo", "csv");
    write_geo_csv(&geo, &[("A", "B", "1", "Hall 1", "Main St", "500")]);
    import_geo(&db_path, &geo);

    let votes = temp_file("admin_upload_log_votes", "csv");
    write_votes_csv(&votes, &[("1", "10", "101", "Candidate X", "List A", "5")]);
    import_votes(&db_path, "public", &votes);

    // re-import: a NEW audit row is appended, nothing rewritten
    import_votes(&db_path, "public", &votes);

    let conn = open_db(&db_path);
    assert_eq!(
        count(&conn, "SELECT COUNT(*) FROM upload_log WHERE kind = 'geo'"),
        1
    );
    assert_eq!(
        count(&conn, "SELECT COUNT(*) FROM upload_log WHERE kind = 'votes'"),
        2
    );

    let (inserted, skipped): (i64, i64) = conn
        .query_row(
            "SELECT inserted_count, skipped_count FROM upload_log
             WHERE kind = 'votes' ORDER BY id DESC LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("upload log row");
    assert_eq!(inserted, 1);
    assert_eq!(skipped, 0);
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("admin_backup");
    init_with_election(&db_path);

    let dest = temp_file("admin_backup_copy", "sqlite");
    rvt()
        .args(["--db", &db_path, "--test", "backup", "--file", &dest])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(std::path::Path::new(&dest).exists());

    let dest2 = temp_file("admin_backup_zip", "sqlite");
    let zip_path = std::path::Path::new(&dest2).with_extension("zip");
    std::fs::remove_file(&zip_path).ok();

    rvt()
        .args([
            "--db", &db_path, "--test", "backup", "--file", &dest2, "--compress",
        ])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(zip_path.exists());
}

#[test]
fn test_party_preference_roundtrip() {
    let db_path = setup_test_db("admin_party_pref");
    init_with_election(&db_path);

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "party",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--set",
            "5",
        ])
        .assert()
        .success()
        .stdout(contains("Remembered party 5"));

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "party",
            "--election",
            "1",
            "--governorate",
            "Slemani",
        ])
        .assert()
        .success()
        .stdout(contains("Remembered party for Slemani: 5"));

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "party",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--clear",
        ])
        .assert()
        .success()
        .stdout(contains("Cleared"));

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "party",
            "--election",
            "1",
            "--governorate",
            "Slemani",
        ])
        .assert()
        .success()
        .stdout(contains("No remembered party"));
}

#[test]
fn test_party_preference_unknown_governorate_rejected() {
    let db_path = setup_test_db("admin_party_unknown");
    init_with_election(&db_path);

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "party",
            "--election",
            "1",
            "--governorate",
            "Atlantis",
            "--set",
            "5",
        ])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_unit_nullified_when_district_deleted() {
    let db_path = setup_test_db("admin_nullify");
    init_with_election(&db_path);

    let geo = temp_file("admin_nullify_geo", "csv");
    write_geo_csv(&geo, &[("A", "B", "1", "Hall 1", "Main St", "500")]);
    import_geo(&db_path, &geo);

    let conn = open_db(&db_path);
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .expect("fk pragma");

    // deleting the district nullifies the unit's attribution but the unit
    // (and its subdistrict link removal) survive
    conn.execute("DELETE FROM districts WHERE name = 'A'", [])
        .expect("delete district");

    assert_eq!(count(&conn, "SELECT COUNT(*) FROM election_units"), 1);
    let (district_id, subdistrict_id): (Option<i64>, Option<i64>) = conn
        .query_row(
            "SELECT district_id, subdistrict_id FROM election_units",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("unit links");
    assert!(district_id.is_none());
    assert!(subdistrict_id.is_none());
}
