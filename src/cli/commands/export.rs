use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportLogic;
use crate::models::channel::VotingChannel;

/// Export a governorate ranking report to csv/json/xlsx.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        election,
        governorate,
        channel,
        by,
        format,
        file,
        party,
        force,
    } = cmd
    {
        let raw_channel = channel.as_deref().unwrap_or(cfg.default_channel.as_str());
        let channel = VotingChannel::parse(raw_channel)
            .ok_or_else(|| AppError::InvalidChannel(raw_channel.to_string()))?;

        let mut pool = DbPool::new(&cfg.database)?;

        ExportLogic::export(
            &mut pool,
            *election,
            governorate,
            channel,
            by.clone(),
            party.as_deref(),
            format.clone(),
            file,
            *force,
        )?;
    }

    Ok(())
}
