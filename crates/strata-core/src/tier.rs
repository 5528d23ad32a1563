//! Storage tiers and their backend-native storage classes
//!
//! Tiers are ordered by decreasing access speed and increasing retention cost:
//! `Hot < Warm < Cold < Archive`. Each tier maps to exactly one native storage
//! class through [`STORAGE_CLASS_TABLE`]; nothing else in the workspace should
//! spell out a native class name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Access-speed / cost class of a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Frequently read data, most expensive to keep.
    Hot,
    /// Infrequent access, still online.
    Warm,
    /// Rarely read, retrieval is slow.
    Cold,
    /// Long-term retention, cheapest to keep.
    Archive,
}

/// The fixed tier ↔ native class bijection.
pub const STORAGE_CLASS_TABLE: [(Tier, &str); 4] = [
    (Tier::Hot, "STANDARD"),
    (Tier::Warm, "STANDARD_IA"),
    (Tier::Cold, "GLACIER"),
    (Tier::Archive, "DEEP_ARCHIVE"),
];

impl Tier {
    /// All tiers, hottest first.
    pub const ALL: [Tier; 4] = [Tier::Hot, Tier::Warm, Tier::Cold, Tier::Archive];

    /// Native storage class for this tier.
    #[must_use]
    pub fn storage_class(self) -> &'static str {
        STORAGE_CLASS_TABLE
            .iter()
            .find(|(tier, _)| *tier == self)
            .map(|(_, class)| *class)
            .unwrap_or(STORAGE_CLASS_TABLE[0].1)
    }

    /// Resolve a backend-reported class, if it is one we know.
    #[must_use]
    pub fn try_from_storage_class(class: &str) -> Option<Tier> {
        STORAGE_CLASS_TABLE
            .iter()
            .find(|(_, native)| *native == class)
            .map(|(tier, _)| *tier)
    }

    /// Resolve a backend-reported class; absent or unrecognized classes are Hot.
    #[must_use]
    pub fn from_storage_class(class: Option<&str>) -> Tier {
        class
            .and_then(Self::try_from_storage_class)
            .unwrap_or(Tier::Hot)
    }

    /// Lowercase name used in configuration and reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cold => "cold",
            Self::Archive => "archive",
        }
    }

    /// Cold and Archive are the cost-optimized tiers.
    #[must_use]
    pub fn is_cost_optimized(self) -> bool {
        self >= Tier::Cold
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self::Hot
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::ValidationError(format!("unknown tier `{s}`")))
    }
}
