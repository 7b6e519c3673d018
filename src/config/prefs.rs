//! Selected-party preference store.
//!
//! The report commands take an explicit `--party` parameter; this small
//! key-value file only supplies the default when the flag is omitted. One
//! entry per (election, governorate), persisted as YAML next to the config
//! file. The reporting core never touches this store directly; the CLI
//! layer resolves the preference and threads the value through as a plain
//! parameter.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartyPref {
    pub election_id: i64,
    pub governorate: String,
    pub party: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PartyPrefs {
    #[serde(default)]
    pub entries: Vec<PartyPref>,
}

impl PartyPrefs {
    pub fn prefs_file() -> PathBuf {
        Config::config_dir().join("party_prefs.yaml")
    }

    pub fn load() -> Self {
        let path = Self::prefs_file();
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let dir = Config::config_dir();
        fs::create_dir_all(&dir)?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("cannot serialize party prefs: {e}")))?;
        fs::write(Self::prefs_file(), yaml)?;
        Ok(())
    }

    pub fn get(&self, election_id: i64, governorate: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.election_id == election_id && e.governorate.eq_ignore_ascii_case(governorate))
            .map(|e| e.party.as_str())
    }

    pub fn set(&mut self, election_id: i64, governorate: &str, party: &str) {
        self.clear(election_id, governorate);
        self.entries.push(PartyPref {
            election_id,
            governorate: governorate.to_string(),
            party: party.to_string(),
        });
    }

    /// Returns true when an entry was removed.
    pub fn clear(&mut self, election_id: i64, governorate: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| {
            !(e.election_id == election_id && e.governorate.eq_ignore_ascii_case(governorate))
        });
        self.entries.len() != before
    }
}
