// src/export/model.rs

use crate::db::stats::RankingRow;
use serde::Serialize;

/// Flat row shape shared by the csv/json/xlsx ranking exports.
#[derive(Serialize, Clone, Debug)]
pub struct RankingExport {
    pub rank: usize,
    pub number: String,
    pub name: String,
    pub list_name: String,
    pub total_votes: i64,
}

impl RankingExport {
    /// Ranking rows arrive pre-sorted (heaviest first); rank is 1-based.
    pub fn from_ranking(rows: &[RankingRow]) -> Vec<Self> {
        rows.iter()
            .enumerate()
            .map(|(i, r)| RankingExport {
                rank: i + 1,
                number: r.number.clone(),
                name: r.name.clone(),
                list_name: r.list_name.clone().unwrap_or_default(),
                total_votes: r.total_votes,
            })
            .collect()
    }
}

/// Header for CSV / JSON / XLSX
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["rank", "number", "name", "list_name", "total_votes"]
}

pub(crate) fn ranking_to_row(r: &RankingExport) -> Vec<String> {
    vec![
        r.rank.to_string(),
        r.number.clone(),
        r.name.clone(),
        r.list_name.clone(),
        r.total_votes.to_string(),
    ]
}
