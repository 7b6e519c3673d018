use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ElectionStatus {
    Active,
    Finished,
}

impl ElectionStatus {
    /// Parse user input (CLI flag), case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Some(Self::Active),
            "FINISHED" => Some(Self::Finished),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ElectionStatus::Active => "ACTIVE",
            ElectionStatus::Finished => "FINISHED",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(ElectionStatus::Active),
            "FINISHED" => Some(ElectionStatus::Finished),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ElectionStatus::Finished)
    }
}
