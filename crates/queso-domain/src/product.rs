//! Catalog domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Milk a cheese is made from. Wire format: lowercase Spanish name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilkType {
    Vaca,
    Cabra,
    Oveja,
}

impl MilkType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vaca => "vaca",
            Self::Cabra => "cabra",
            Self::Oveja => "oveja",
        }
    }
}

impl fmt::Display for MilkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown milk type: {0}")]
pub struct UnknownMilkType(pub String);

impl FromStr for MilkType {
    type Err = UnknownMilkType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vaca" => Ok(Self::Vaca),
            "cabra" => Ok(Self::Cabra),
            "oveja" => Ok(Self::Oveja),
            other => Err(UnknownMilkType(other.to_owned())),
        }
    }
}
