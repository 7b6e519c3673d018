use predicates::str::contains;

mod common;
use common::{
    import_geo, import_votes, init_with_election, rvt, setup_test_db, temp_file, write_geo_csv,
    write_votes_csv,
};

fn seed_votes(db_path: &str, tag: &str) {
    let geo = temp_file(&format!("export_{tag}_geo"), "csv");
    write_geo_csv(&geo, &[("A", "B", "1", "Hall 1", "Main St", "500")]);
    import_geo(db_path, &geo);

    let votes = temp_file(&format!("export_{tag}_votes"), "csv");
    write_votes_csv(
        &votes,
        &[
            ("1", "30", "101", "Candidate X", "List Five", "5"),
            ("1", "15", "102", "Candidate Y", "List Six", "6"),
        ],
    );
    import_votes(db_path, "public", &votes);
}

#[test]
fn test_export_csv_ranking_order_and_header() {
    let db_path = setup_test_db("export_csv");
    init_with_election(&db_path);
    seed_votes(&db_path, "csv");

    let out = temp_file("export_csv_out", "csv");
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "export",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--by",
            "list",
            "--format",
            "csv",
            "--file",
            &out,
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = std::fs::read_to_string(&out).expect("read export");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("rank,number,name,list_name,total_votes")
    );
    assert_eq!(lines.next(), Some("1,5,List Five,,30"));
    assert_eq!(lines.next(), Some("2,6,List Six,,15"));
}

#[test]
fn test_export_json_candidate_ranking() {
    let db_path = setup_test_db("export_json");
    init_with_election(&db_path);
    seed_votes(&db_path, "json");

    let out = temp_file("export_json_out", "json");
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "export",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--by",
            "candidate",
            "--format",
            "json",
            "--file",
            &out,
        ])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).expect("read json"))
            .expect("parse json");
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["number"], "101");
    assert_eq!(rows[0]["list_name"], "List Five");
    assert_eq!(rows[0]["total_votes"], 30);
}

#[test]
fn test_export_xlsx_creates_file() {
    let db_path = setup_test_db("export_xlsx");
    init_with_election(&db_path);
    seed_votes(&db_path, "xlsx");

    let out = temp_file("export_xlsx_out", "xlsx");
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "export",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--format",
            "xlsx",
            "--file",
            &out,
        ])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    let meta = std::fs::metadata(&out).expect("exported file");
    assert!(meta.len() > 0);
}

#[test]
fn test_export_party_filter() {
    let db_path = setup_test_db("export_party");
    init_with_election(&db_path);
    seed_votes(&db_path, "party");

    let out = temp_file("export_party_out", "csv");
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "export",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--by",
            "list",
            "--party",
            "6",
            "--format",
            "csv",
            "--file",
            &out,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("read export");
    assert!(content.contains("List Six"));
    assert!(!content.contains("List Five"));
}

#[test]
fn test_export_force_overwrites_existing_file() {
    let db_path = setup_test_db("export_force");
    init_with_election(&db_path);
    seed_votes(&db_path, "force");

    let out = temp_file("export_force_out", "csv");
    std::fs::write(&out, "old content").expect("pre-existing file");

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "export",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--format",
            "csv",
            "--file",
            &out,
            "--force",
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("read export");
    assert!(content.starts_with("rank,number,name"));
}

#[test]
fn test_export_empty_scope_warns_but_succeeds() {
    let db_path = setup_test_db("export_empty");
    init_with_election(&db_path);

    let out = temp_file("export_empty_out", "csv");
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "export",
            "--election",
            "1",
            "--governorate",
            "Erbil",
            "--format",
            "csv",
            "--file",
            &out,
        ])
        .assert()
        .success()
        .stdout(contains("No vote records found"));

    let content = std::fs::read_to_string(&out).expect("read export");
    assert_eq!(content.lines().count(), 1); // header only
}
