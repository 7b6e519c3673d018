pub mod backup;
pub mod election;
pub mod geo_import;
pub mod log;
pub mod reports;
pub mod vote_import;
