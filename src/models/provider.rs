//! Provider identity.
//!
//! The engine simulates a fixed set of EOR providers. Iteration order is
//! stable and is what reconciliation tie-breaks rely on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A simulated Employer-of-Record provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// The primary provider. Its rate table is the base dataset and its
    /// quotes always carry the caller's salary.
    Deel,
    /// Secondary provider with camelCase responses.
    Remote,
    /// Secondary provider with line-item responses.
    Oyster,
}

impl Provider {
    /// All providers in iteration order.
    pub const ALL: [Provider; 3] = [Provider::Deel, Provider::Remote, Provider::Oyster];

    /// The authoritative provider.
    pub const PRIMARY: Provider = Provider::Deel;

    /// Returns the wire identifier for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Deel => "deel",
            Provider::Remote => "remote",
            Provider::Oyster => "oyster",
        }
    }

    /// Returns true for the authoritative provider.
    pub fn is_primary(&self) -> bool {
        *self == Self::PRIMARY
    }

    /// Providers whose tables are derived from the primary table.
    pub fn secondaries() -> impl Iterator<Item = Provider> {
        Self::ALL.into_iter().filter(|p| !p.is_primary())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deel" => Ok(Provider::Deel),
            "remote" => Ok(Provider::Remote),
            "oyster" => Ok(Provider::Oyster),
            other => Err(EngineError::InvalidInput {
                field: "provider".to_string(),
                message: format!("unknown provider '{}'", other),
            }),
        }
    }
}
