use serde::{Deserialize, Serialize};

/// Marketplace an affiliate link points at.
///
/// Derived once from the input URL at the start of an extraction and never
/// changed afterwards. `Unknown` is an ordinary outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Amazon,
    Shein,
    Temu,
    Unknown,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Amazon => write!(f, "Amazon"),
            Provider::Shein => write!(f, "Shein"),
            Provider::Temu => write!(f, "Temu"),
            Provider::Unknown => write!(f, "Unknown"),
        }
    }
}
