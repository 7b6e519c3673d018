use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::prefs::PartyPrefs;
use crate::core::reports::district::SubdistrictBreakdown;
use crate::core::reports::governorate::{DistrictBreakdown, GovernorateSummary};
use crate::core::reports::special::{SpecialUnitDetail, SpecialUnits};
use crate::core::reports::subdistrict::UnitBreakdown;
use crate::core::reports::unit::UnitDetail;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::channel::VotingChannel;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_turnout};
use crate::utils::fmt_percent;
use crate::utils::table::Table;

/// Turnout and ranking reports. The deepest scope flag provided wins:
/// unit > subdistrict > district > governorate.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        election,
        governorate,
        by_district,
        district,
        subdistrict,
        unit,
        special,
        channel,
        party,
        search,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        let channel = resolve_channel(channel.as_deref(), cfg)?;

        // --party wins; otherwise fall back to the remembered preference
        // for the governorate.
        let election_id = election.or(cfg.default_election);
        let stored_party = match (election_id, governorate.as_deref()) {
            (Some(e), Some(g)) if party.is_none() => {
                PartyPrefs::load().get(e, g).map(str::to_string)
            }
            _ => None,
        };
        let party = party.clone().or(stored_party);
        let party = party.as_deref();

        //
        // Unit scope
        //
        if let Some(unit_number) = unit {
            let election_id = require_election(election_id)?;

            if *special {
                let detail =
                    SpecialUnitDetail::build(&pool.conn, election_id, unit_number)?;
                header(format!(
                    "Special votes, unit {} {}",
                    detail.unit.unit_number, detail.unit.unit_name
                ));
                print_ranking("Candidate", &detail.rows);
                println!("Total votes: {}", detail.total_votes);
                return Ok(());
            }

            let detail = UnitDetail::build(&pool.conn, election_id, unit_number, channel, party)?;
            header(format!(
                "Unit {} {}: {} votes",
                detail.unit.unit_number,
                detail.unit.unit_name,
                channel.to_db_str()
            ));
            println!("Total votes: {}\n", detail.total_votes);

            println!("By list:");
            print_ranking("List", &detail.per_list);

            println!("\nTop candidates:");
            print_ranking("Candidate", &detail.top_candidates);
            return Ok(());
        }

        //
        // Subdistrict scope
        //
        if let Some(subdistrict_id) = subdistrict {
            let report = UnitBreakdown::build(
                &pool.conn,
                *subdistrict_id,
                channel,
                party,
                search.as_deref(),
            )?;

            header(format!(
                "Subdistrict {}: {} votes by unit",
                report.subdistrict.name,
                channel.to_db_str()
            ));

            let mut table = Table::new(&["Unit", "Name", "Votes", "Allowed", "Turnout"]);
            for row in &report.rows {
                table.add_row(vec![
                    row.unit_number.clone(),
                    row.unit_name.clone(),
                    row.votes.to_string(),
                    row.allowed.to_string(),
                    colorize_percent(row.percentage),
                ]);
            }
            print!("{}", table.render());
            print_totals(report.total_votes, report.total_allowed_votes, report.overall_percentage);
            return Ok(());
        }

        //
        // District scope
        //
        if let Some(district_id) = district {
            let report =
                SubdistrictBreakdown::build(&pool.conn, *district_id, channel, party)?;

            header(format!(
                "District {}: {} votes by subdistrict",
                report.district.name,
                channel.to_db_str()
            ));

            let mut table = Table::new(&["Subdistrict", "Votes", "Allowed", "Turnout"]);
            for row in &report.rows {
                table.add_row(vec![
                    row.name.clone(),
                    row.votes.to_string(),
                    row.allowed.to_string(),
                    colorize_percent(row.percentage),
                ]);
            }
            print!("{}", table.render());
            print_totals(report.total_votes, report.total_allowed_votes, report.overall_percentage);
            return Ok(());
        }

        //
        // Governorate scope
        //
        if let Some(gov) = governorate {
            let election_id = require_election(election_id)?;

            if *special {
                let report =
                    SpecialUnits::build(&pool.conn, election_id, gov, search.as_deref())?;

                header(format!("Special votes, governorate {}", report.governorate.name));

                let mut table = Table::new(&["Unit", "Name", "Origin", "Votes"]);
                for row in &report.rows {
                    table.add_row(vec![
                        row.unit_number.clone(),
                        row.unit_name.clone(),
                        row.voting_governorate.clone(),
                        row.total_votes.to_string(),
                    ]);
                }
                print!("{}", table.render());
                println!("Total special votes: {}", report.total_votes);
                return Ok(());
            }

            if *by_district {
                let report = DistrictBreakdown::build(
                    &pool.conn,
                    election_id,
                    gov,
                    channel,
                    party,
                    search.as_deref(),
                )?;

                header(format!(
                    "Governorate {}: {} votes by district",
                    report.governorate.name,
                    channel.to_db_str()
                ));

                let mut table = Table::new(&["District", "Votes", "Allowed", "Turnout"]);
                for row in &report.rows {
                    table.add_row(vec![
                        row.name.clone(),
                        row.votes.to_string(),
                        row.allowed.to_string(),
                        colorize_percent(row.percentage),
                    ]);
                }
                print!("{}", table.render());
                print_totals(report.total_votes, report.total_allowed_votes, report.overall_percentage);
                return Ok(());
            }

            let summary = GovernorateSummary::build(&pool.conn, election_id, gov, party)?;

            header(format!("Governorate {}", summary.governorate.name));
            println!("Public votes:   {}", summary.public_total);
            println!("Special votes:  {}", summary.special_total);
            println!("Total votes:    {}", summary.total_votes);
            println!("Allowed votes:  {}", summary.total_allowed_votes);
            println!(
                "Public turnout: {}",
                colorize_percent(summary.public_percentage)
            );
            return Ok(());
        }

        info(
            "Provide a scope: --governorate NAME [--by-district | --special], \
             --district ID, --subdistrict ID or --unit NUMBER.",
        );
    }

    Ok(())
}

fn resolve_channel(flag: Option<&str>, cfg: &Config) -> AppResult<VotingChannel> {
    let raw = flag.unwrap_or(cfg.default_channel.as_str());
    VotingChannel::parse(raw).ok_or_else(|| AppError::InvalidChannel(raw.to_string()))
}

fn require_election(election: Option<i64>) -> AppResult<i64> {
    election.ok_or_else(|| {
        AppError::Validation(
            "Missing --election (or set default_election in the config file).".into(),
        )
    })
}

fn colorize_percent(p: f64) -> String {
    format!("{}{}{}", color_for_turnout(p), fmt_percent(p), RESET)
}

fn print_totals(votes: i64, allowed: i64, percentage: f64) {
    println!(
        "Totals: {} votes / {} allowed ({})",
        votes,
        allowed,
        colorize_percent(percentage)
    );
}

fn print_ranking(label: &str, rows: &[crate::db::stats::RankingRow]) {
    if rows.is_empty() {
        println!("  (no vote records)");
        return;
    }

    let mut table = Table::new(&["#", label, "Name", "List", "Votes"]);
    for (i, row) in rows.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            row.number.clone(),
            row.name.clone(),
            row.list_name.clone().unwrap_or_default(),
            row.total_votes.to_string(),
        ]);
    }
    print!("{}", table.render());
}
