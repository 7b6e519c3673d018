use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::prefs::PartyPrefs;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Selected-party preference per (election, governorate). The preference
/// only supplies the default for `report --party`; reports always accept an
/// explicit flag.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Party {
        election,
        governorate,
        set,
        clear,
    } = cmd
    {
        // Validate the scope against the database before touching the store.
        let pool = DbPool::new(&cfg.database)?;
        let gov = queries::find_governorate_by_name(&pool.conn, *election, governorate)?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "governorate '{}' in election {}",
                    governorate, election
                ))
            })?;

        let mut prefs = PartyPrefs::load();

        if let Some(party) = set {
            let party = party.trim();
            if party.is_empty() {
                return Err(AppError::Validation("Party list number is empty.".into()));
            }
            prefs.set(*election, &gov.name, party);
            prefs.save()?;
            success(format!(
                "Remembered party {} for governorate {}.",
                party, gov.name
            ));
            return Ok(());
        }

        if *clear {
            if prefs.clear(*election, &gov.name) {
                prefs.save()?;
                success(format!("Cleared remembered party for {}.", gov.name));
            } else {
                info(format!("No remembered party for {}.", gov.name));
            }
            return Ok(());
        }

        match prefs.get(*election, &gov.name) {
            Some(party) => info(format!(
                "Remembered party for {}: {}",
                gov.name, party
            )),
            None => info(format!("No remembered party for {}.", gov.name)),
        }
    }

    Ok(())
}
