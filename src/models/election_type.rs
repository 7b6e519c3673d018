use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ElectionType {
    Iraq,
    Krg,
}

impl ElectionType {
    /// Parse user input (CLI flag), case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "IRAQ" => Some(Self::Iraq),
            "KRG" => Some(Self::Krg),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ElectionType::Iraq => "IRAQ",
            ElectionType::Krg => "KRG",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "IRAQ" => Some(ElectionType::Iraq),
            "KRG" => Some(ElectionType::Krg),
            _ => None,
        }
    }

    /// Governorates seeded under a fresh election of this type.
    pub fn default_governorates(&self) -> &'static [&'static str] {
        match self {
            ElectionType::Iraq => &["Slemani", "Erbil", "Duhok", "Kirkuk", "Diyala", "Ninewa"],
            ElectionType::Krg => &["Erbil", "Slemani", "Duhok"],
        }
    }
}
