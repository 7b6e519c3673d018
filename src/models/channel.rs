use serde::Serialize;

/// Vote-reporting channel. Two independent channels with different
/// validation rules during import: Public rows must resolve against
/// previously imported geography, Special rows may create their unit.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum VotingChannel {
    Public,
    Special,
}

impl VotingChannel {
    /// Parse user input or a spreadsheet tag, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "public" => Some(Self::Public),
            "special" => Some(Self::Special),
            _ => None,
        }
    }

    /// Canonical capitalized form, as persisted in vote_records.voting_type.
    pub fn to_db_str(&self) -> &'static str {
        match self {
            VotingChannel::Public => "Public",
            VotingChannel::Special => "Special",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Public" => Some(VotingChannel::Public),
            "Special" => Some(VotingChannel::Special),
            _ => None,
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, VotingChannel::Special)
    }
}
