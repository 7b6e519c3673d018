use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{
    import_geo, import_votes, init_with_election, rvt, setup_test_db, temp_file, write_geo_csv,
    write_votes_csv,
};

/// Standard fixture: one unit (500 allowed) and three public vote rows:
/// 10 + 20 for list "5", 15 for list "6".
fn seed_party_votes(db_path: &str) {
    let geo = temp_file(&format!("{}_geo", db_path.replace('/', "_")), "csv");
    write_geo_csv(&geo, &[("A", "B", "1", "Hall 1", "Main St", "500")]);
    import_geo(db_path, &geo);

    let votes = temp_file(&format!("{}_votes", db_path.replace('/', "_")), "csv");
    write_votes_csv(
        &votes,
        &[
            ("1", "10", "101", "Candidate X", "List Five", "5"),
            ("1", "20", "102", "Candidate Y", "List Five", "5"),
            ("1", "15", "103", "Candidate Z", "List Six", "6"),
        ],
    );
    import_votes(db_path, "public", &votes);
}

#[test]
fn test_party_totals_aggregate_at_governorate_scope() {
    let db_path = setup_test_db("report_party_totals");
    init_with_election(&db_path);
    seed_party_votes(&db_path);

    // {"5": 30, "6": 15}, overall total 45
    let out = temp_file("report_party_totals", "json");
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
            "--channel",
            "public",
            "--by",
            "list",
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

    assert_eq!(rows[0]["number"], "5");
    assert_eq!(rows[0]["total_votes"], 30);
    assert_eq!(rows[0]["rank"], 1);

    assert_eq!(rows[1]["number"], "6");
    assert_eq!(rows[1]["total_votes"], 15);

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--governorate",
            "Slemani",
        ])
        .assert()
        .success()
        .stdout(contains("45"));
}

#[test]
fn test_governorate_summary_percentage() {
    let db_path = setup_test_db("report_summary_pct");
    init_with_election(&db_path);
    seed_party_votes(&db_path);

    // 45 public votes over 500 allowed = 9.00%
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--governorate",
            "Slemani",
        ])
        .assert()
        .success()
        .stdout(contains("500"))
        .stdout(contains("9.00%"));
}

#[test]
fn test_zero_allowed_votes_never_divides() {
    let db_path = setup_test_db("report_zero_allowed");
    init_with_election(&db_path);

    // special-only data: the auto-created unit carries no allowed votes
    let votes = temp_file("report_zero_allowed", "csv");
    write_votes_csv(&votes, &[("42", "10", "101", "Candidate X", "List A", "5")]);
    import_votes(&db_path, "special", &votes);

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--governorate",
            "Slemani",
        ])
        .assert()
        .success()
        .stdout(contains("0.00%"));
}

#[test]
fn test_empty_scope_returns_zero_totals() {
    let db_path = setup_test_db("report_empty_scope");
    init_with_election(&db_path);

    // no geography, no votes: the report still renders with zeros
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--governorate",
            "Erbil",
        ])
        .assert()
        .success()
        .stdout(contains("Public votes:   0"))
        .stdout(contains("0.00%"));

    // and the district breakdown is just empty, not an error
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--governorate",
            "Erbil",
            "--by-district",
        ])
        .assert()
        .success()
        .stdout(contains("Totals: 0 votes / 0 allowed"));
}

#[test]
fn test_governorate_breakdown_by_district() {
    let db_path = setup_test_db("report_by_district");
    init_with_election(&db_path);

    let geo = temp_file("report_by_district_geo", "csv");
    write_geo_csv(
        &geo,
        &[
            ("North", "N1", "1", "Hall 1", "Main St", "100"),
            ("South", "S1", "2", "Hall 2", "Side St", "300"),
        ],
    );
    import_geo(&db_path, &geo);

    let votes = temp_file("report_by_district_votes", "csv");
    write_votes_csv(
        &votes,
        &[
            ("1", "50", "101", "Candidate X", "List A", "5"),
            ("2", "75", "102", "Candidate Y", "List B", "6"),
        ],
    );
    import_votes(&db_path, "public", &votes);

    // North: 50/100 = 50.00%, South: 75/300 = 25.00%, overall 125/400
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--by-district",
        ])
        .assert()
        .success()
        .stdout(contains("North"))
        .stdout(contains("South"))
        .stdout(contains("50.00%"))
        .stdout(contains("25.00%"))
        .stdout(contains("Totals: 125 votes / 400 allowed"));

    // search narrows the district list
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--by-district",
            "--search",
            "North",
        ])
        .assert()
        .success()
        .stdout(contains("North"))
        .stdout(contains("South").not());
}

#[test]
fn test_party_filter_restricts_vote_sums() {
    let db_path = setup_test_db("report_party_filter");
    init_with_election(&db_path);
    seed_party_votes(&db_path);

    // only list "5": 30 of the 45 votes
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--by-district",
            "--party",
            "5",
        ])
        .assert()
        .success()
        .stdout(contains("Totals: 30 votes / 500 allowed"));
}

#[test]
fn test_district_breakdown_by_subdistrict() {
    let db_path = setup_test_db("report_district");
    init_with_election(&db_path);

    let geo = temp_file("report_district_geo", "csv");
    write_geo_csv(
        &geo,
        &[
            ("North", "Alpha", "1", "Hall 1", "Main St", "100"),
            ("North", "Beta", "2", "Hall 2", "Side St", "200"),
        ],
    );
    import_geo(&db_path, &geo);

    let votes = temp_file("report_district_votes", "csv");
    write_votes_csv(
        &votes,
        &[
            ("1", "25", "101", "Candidate X", "List A", "5"),
            ("2", "100", "102", "Candidate Y", "List B", "6"),
        ],
    );
    import_votes(&db_path, "public", &votes);

    rvt()
        .args([
            "--db", &db_path, "--test", "report", "--district", "1",
        ])
        .assert()
        .success()
        .stdout(contains("Alpha"))
        .stdout(contains("Beta"))
        .stdout(contains("25.00%"))
        .stdout(contains("50.00%"))
        .stdout(contains("Totals: 125 votes / 300 allowed"));
}

#[test]
fn test_subdistrict_breakdown_by_unit_with_search() {
    let db_path = setup_test_db("report_subdistrict");
    init_with_election(&db_path);

    let geo = temp_file("report_subdistrict_geo", "csv");
    write_geo_csv(
        &geo,
        &[
            ("North", "Alpha", "1", "Hall One", "Main St", "100"),
            ("North", "Alpha", "2", "Hall Two", "Side St", "50"),
        ],
    );
    import_geo(&db_path, &geo);

    let votes = temp_file("report_subdistrict_votes", "csv");
    write_votes_csv(
        &votes,
        &[
            ("1", "60", "101", "Candidate X", "List A", "5"),
            ("2", "10", "102", "Candidate Y", "List B", "6"),
        ],
    );
    import_votes(&db_path, "public", &votes);

    rvt()
        .args([
            "--db", &db_path, "--test", "report", "--subdistrict", "1",
        ])
        .assert()
        .success()
        .stdout(contains("Hall One"))
        .stdout(contains("Hall Two"))
        .stdout(contains("60.00%"))
        .stdout(contains("20.00%"))
        .stdout(contains("Totals: 70 votes / 150 allowed"));

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--subdistrict",
            "1",
            "--search",
            "Two",
        ])
        .assert()
        .success()
        .stdout(contains("Hall Two"))
        .stdout(contains("Hall One").not());
}

#[test]
fn test_unit_detail_rankings_sorted_descending() {
    let db_path = setup_test_db("report_unit_detail");
    init_with_election(&db_path);
    seed_party_votes(&db_path);

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--unit",
            "1",
        ])
        .assert()
        .success()
        .stdout(contains("Total votes: 45"))
        .stdout(contains("List Five"))
        .stdout(contains("List Six"))
        .stdout(contains("Candidate Y"));

    // candidate ranking order: Y (20) > Z (15) > X (10)
    let out = temp_file("report_unit_detail", "json");
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
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["name"], "Candidate Y");
    assert_eq!(rows[0]["total_votes"], 20);
    assert_eq!(rows[1]["name"], "Candidate Z");
    assert_eq!(rows[2]["name"], "Candidate X");
}

#[test]
fn test_special_units_report() {
    let db_path = setup_test_db("report_special");
    init_with_election(&db_path);

    // special votes land on auto-created units outside the geography
    let votes = temp_file("report_special_votes", "csv");
    write_votes_csv(
        &votes,
        &[
            ("901", "5", "101", "Candidate X", "List A", "5"),
            ("902", "25", "102", "Candidate Y", "List B", "6"),
        ],
    );
    import_votes(&db_path, "special", &votes);

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--special",
        ])
        .assert()
        .success()
        .stdout(contains("901"))
        .stdout(contains("902"))
        .stdout(contains("Total special votes: 30"));

    // drill into one special unit
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--unit",
            "902",
            "--special",
        ])
        .assert()
        .success()
        .stdout(contains("Candidate Y"))
        .stdout(contains("Total votes: 25"));
}

#[test]
fn test_report_channel_match_is_case_insensitive() {
    let db_path = setup_test_db("report_channel_case");
    init_with_election(&db_path);
    seed_party_votes(&db_path);

    // records are stored as "Public"; an uppercase flag still matches
    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "report",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--by-district",
            "--channel",
            "PUBLIC",
        ])
        .assert()
        .success()
        .stdout(contains("Totals: 45 votes / 500 allowed"));
}
