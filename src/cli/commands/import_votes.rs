use crate::cli::parser::Commands;
use crate::core::vote_import::VoteImportLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::channel::VotingChannel;
use crate::ui::messages::success;

/// Import a vote spreadsheet for one governorate and channel.
pub fn handle(cmd: &Commands, cfg: &crate::config::Config) -> AppResult<()> {
    if let Commands::ImportVotes {
        election,
        governorate,
        channel,
        file,
    } = cmd
    {
        let channel = VotingChannel::parse(channel)
            .ok_or_else(|| AppError::InvalidChannel(channel.clone()))?;

        let mut pool = DbPool::new(&cfg.database)?;

        let summary =
            VoteImportLogic::apply(&mut pool, *election, governorate, channel, file)?;

        success(format!(
            "{} votes imported: {} rows. Skipped: {}.",
            channel.to_db_str(),
            summary.inserted,
            summary.skipped
        ));
    }

    Ok(())
}
