use predicates::str::contains;

mod common;
use common::{
    count, import_geo, import_votes, init_with_election, open_db, rvt, setup_test_db, temp_file,
    write_geo_csv, write_votes_csv,
};

#[test]
fn test_public_vote_with_unknown_unit_is_skipped() {
    let db_path = setup_test_db("votes_public_skip");
    init_with_election(&db_path);

    // no geography imported, unit 999 cannot resolve
    let file = temp_file("votes_public_skip", "csv");
    write_votes_csv(&file, &[("999", "10", "101", "Candidate X", "List A", "5")]);

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "import-votes",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--channel",
            "public",
            "--file",
            &file,
        ])
        .assert()
        .success()
        .stdout(contains("Public votes imported: 0 rows. Skipped: 1."));

    let conn = open_db(&db_path);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM vote_records"), 0);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM election_units"), 0);
}

#[test]
fn test_special_vote_with_unknown_unit_autocreates_it() {
    let db_path = setup_test_db("votes_special_autocreate");
    init_with_election(&db_path);

    let file = temp_file("votes_special_autocreate", "csv");
    write_votes_csv(&file, &[("999", "10", "101", "Candidate X", "List A", "5")]);

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "import-votes",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--channel",
            "special",
            "--file",
            &file,
        ])
        .assert()
        .success()
        .stdout(contains("Special votes imported: 1 rows. Skipped: 0."));

    let conn = open_db(&db_path);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM vote_records"), 1);

    // minimal unit: no geography links, no allowed votes
    let (number, allowed): (String, i64) = conn
        .query_row(
            "SELECT unit_number, total_allowed_votes FROM election_units",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("unit");
    assert_eq!(number, "999");
    assert_eq!(allowed, 0);

    let district_id: Option<i64> = conn
        .query_row("SELECT district_id FROM election_units", [], |row| {
            row.get(0)
        })
        .expect("district_id");
    assert!(district_id.is_none());
}

#[test]
fn test_reimport_fully_replaces_channel_and_leaves_other_channel_alone() {
    let db_path = setup_test_db("votes_full_replace");
    init_with_election(&db_path);

    let geo = temp_file("votes_full_replace_geo", "csv");
    write_geo_csv(&geo, &[("A", "B", "1", "Hall 1", "Main St", "500")]);
    import_geo(&db_path, &geo);

    // first public upload: two rows
    let public_a = temp_file("votes_full_replace_pub_a", "csv");
    write_votes_csv(
        &public_a,
        &[
            ("1", "10", "101", "Candidate X", "List A", "5"),
            ("1", "20", "102", "Candidate Y", "List A", "5"),
        ],
    );
    import_votes(&db_path, "public", &public_a);

    // one special row for the same governorate
    let special = temp_file("votes_full_replace_special", "csv");
    write_votes_csv(&special, &[("1", "7", "103", "Candidate Z", "List B", "6")]);
    import_votes(&db_path, "special", &special);

    // second public upload: ONE row, must fully replace the first two
    let public_b = temp_file("votes_full_replace_pub_b", "csv");
    write_votes_csv(&public_b, &[("1", "99", "104", "Candidate W", "List C", "7")]);
    import_votes(&db_path, "public", &public_b);

    let conn = open_db(&db_path);
    assert_eq!(
        count(
            &conn,
            "SELECT COUNT(*) FROM vote_records WHERE voting_type = 'Public'"
        ),
        1
    );
    let votes: i64 = conn
        .query_row(
            "SELECT number_of_votes FROM vote_records WHERE voting_type = 'Public'",
            [],
            |row| row.get(0),
        )
        .expect("public votes");
    assert_eq!(votes, 99);

    // the special channel was untouched
    assert_eq!(
        count(
            &conn,
            "SELECT COUNT(*) FROM vote_records WHERE voting_type = 'Special'"
        ),
        1
    );
}

#[test]
fn test_vote_unit_number_canonicalization_matches_geo() {
    let db_path = setup_test_db("votes_canonical_number");
    init_with_election(&db_path);

    // geography carries "123.0" (float-formatted export)
    let geo = temp_file("votes_canonical_geo", "csv");
    write_geo_csv(&geo, &[("A", "B", "123.0", "Hall 123", "Main St", "500")]);
    import_geo(&db_path, &geo);

    // votes reference "123", same unit
    let votes = temp_file("votes_canonical_votes", "csv");
    write_votes_csv(&votes, &[("123", "42", "101", "Candidate X", "List A", "5")]);

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "import-votes",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--channel",
            "public",
            "--file",
            &votes,
        ])
        .assert()
        .success()
        .stdout(contains("Public votes imported: 1 rows. Skipped: 0."));

    let conn = open_db(&db_path);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM election_units"), 1);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM vote_records"), 1);
}

#[test]
fn test_unparseable_vote_count_defaults_to_zero() {
    let db_path = setup_test_db("votes_bad_count");
    init_with_election(&db_path);

    let geo = temp_file("votes_bad_count_geo", "csv");
    write_geo_csv(&geo, &[("A", "B", "1", "Hall 1", "Main St", "500")]);
    import_geo(&db_path, &geo);

    let votes = temp_file("votes_bad_count", "csv");
    write_votes_csv(&votes, &[("1", "n/a", "101", "Candidate X", "List A", "5")]);
    import_votes(&db_path, "public", &votes);

    let conn = open_db(&db_path);
    let n: i64 = conn
        .query_row("SELECT number_of_votes FROM vote_records", [], |row| {
            row.get(0)
        })
        .expect("votes");
    assert_eq!(n, 0);
}

#[test]
fn test_votes_missing_columns_rejected_wholesale() {
    let db_path = setup_test_db("votes_missing_cols");
    init_with_election(&db_path);

    let file = temp_file("votes_missing_cols", "csv");
    std::fs::write(&file, "Election Unit Number,Number of Votes\n1,10\n").expect("write csv");

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "import-votes",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--channel",
            "public",
            "--file",
            &file,
        ])
        .assert()
        .failure()
        .stderr(contains("missing columns"))
        .stderr(contains("Candidate number"))
        .stderr(contains("List Name"));

    let conn = open_db(&db_path);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM vote_records"), 0);
}

#[test]
fn test_vote_text_attributes_are_trimmed() {
    let db_path = setup_test_db("votes_trimmed");
    init_with_election(&db_path);

    let geo = temp_file("votes_trimmed_geo", "csv");
    write_geo_csv(&geo, &[("A", "B", "1", "Hall 1", "Main St", "500")]);
    import_geo(&db_path, &geo);

    let votes = temp_file("votes_trimmed", "csv");
    write_votes_csv(
        &votes,
        &[("1", "10", "  101  ", "  Candidate X  ", " List A ", " 5 ")],
    );
    import_votes(&db_path, "public", &votes);

    let conn = open_db(&db_path);
    let (cand_no, cand_name, list_name, list_no): (String, String, String, String) = conn
        .query_row(
            "SELECT candidate_number, candidate_name, list_name, list_number FROM vote_records",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .expect("record");
    assert_eq!(cand_no, "101");
    assert_eq!(cand_name, "Candidate X");
    assert_eq!(list_name, "List A");
    assert_eq!(list_no, "5");
}

#[test]
fn test_negative_vote_count_aborts_whole_import() {
    let db_path = setup_test_db("votes_negative");
    init_with_election(&db_path);

    let geo = temp_file("votes_negative_geo", "csv");
    write_geo_csv(&geo, &[("A", "B", "1", "Hall 1", "Main St", "500")]);
    import_geo(&db_path, &geo);

    // a valid first upload
    let good = temp_file("votes_negative_good", "csv");
    write_votes_csv(&good, &[("1", "10", "101", "Candidate X", "List A", "5")]);
    import_votes(&db_path, "public", &good);

    // negative count violates the persisted-record invariant and rolls the
    // whole transaction back, including the full-refresh delete
    let bad = temp_file("votes_negative_bad", "csv");
    write_votes_csv(
        &bad,
        &[
            ("1", "30", "102", "Candidate Y", "List A", "5"),
            ("1", "-5", "103", "Candidate Z", "List B", "6"),
        ],
    );

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "import-votes",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--channel",
            "public",
            "--file",
            &bad,
        ])
        .assert()
        .failure();

    let conn = open_db(&db_path);
    // the first upload survived intact
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM vote_records"), 1);
    let votes: i64 = conn
        .query_row("SELECT number_of_votes FROM vote_records", [], |row| {
            row.get(0)
        })
        .expect("votes");
    assert_eq!(votes, 10);
}

#[test]
fn test_channel_tag_parsed_case_insensitively_and_stored_canonical() {
    let db_path = setup_test_db("votes_channel_case");
    init_with_election(&db_path);

    let geo = temp_file("votes_channel_case_geo", "csv");
    write_geo_csv(&geo, &[("A", "B", "1", "Hall 1", "Main St", "500")]);
    import_geo(&db_path, &geo);

    let votes = temp_file("votes_channel_case", "csv");
    write_votes_csv(&votes, &[("1", "10", "101", "Candidate X", "List A", "5")]);

    rvt()
        .args([
            "--db",
            &db_path,
            "--test",
            "import-votes",
            "--election",
            "1",
            "--governorate",
            "Slemani",
            "--channel",
            "PUBLIC",
            "--file",
            &votes,
        ])
        .assert()
        .success();

    let conn = open_db(&db_path);
    let voting_type: String = conn
        .query_row("SELECT voting_type FROM vote_records", [], |row| row.get(0))
        .expect("voting_type");
    assert_eq!(voting_type, "Public");
}
