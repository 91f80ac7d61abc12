use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::StockError;

/// Availability claim carried by an observation and derived into aggregates.
///
/// The variant order is load-bearing: consensus scans buckets in this order
/// and resolves ties to the earliest variant, so enumeration order is part of
/// the engine's determinism contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    Low,
    Out,
    Unknown,
}

impl StockStatus {
    /// All variants in the deterministic tie-break scan order.
    pub const ALL: [StockStatus; 4] = [
        StockStatus::InStock,
        StockStatus::Low,
        StockStatus::Out,
        StockStatus::Unknown,
    ];

    /// Wire/database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::InStock => "IN_STOCK",
            StockStatus::Low => "LOW",
            StockStatus::Out => "OUT",
            StockStatus::Unknown => "UNKNOWN",
        }
    }
}

impl FromStr for StockStatus {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_STOCK" => Ok(StockStatus::InStock),
            "LOW" => Ok(StockStatus::Low),
            "OUT" => Ok(StockStatus::Out),
            "UNKNOWN" => Ok(StockStatus::Unknown),
            other => Err(StockError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who produced an observation. Determines its trust weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObservationSource {
    Public,
    Staff,
    Import,
}

impl ObservationSource {
    /// Fixed trust weight per source. Staff reports are trusted 3x public
    /// ones; imports sit in between.
    pub fn weight(self) -> f64 {
        match self {
            ObservationSource::Public => 1.0,
            ObservationSource::Staff => 3.0,
            ObservationSource::Import => 2.0,
        }
    }

    /// Wire/database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ObservationSource::Public => "PUBLIC",
            ObservationSource::Staff => "STAFF",
            ObservationSource::Import => "IMPORT",
        }
    }
}

impl FromStr for ObservationSource {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PUBLIC" => Ok(ObservationSource::Public),
            "STAFF" => Ok(ObservationSource::Staff),
            "IMPORT" => Ok(ObservationSource::Import),
            other => Err(StockError::InvalidSource {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ObservationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
