use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub const MIN_PARTY_LEVEL: u8 = 1;
pub const MAX_PARTY_LEVEL: u8 = 20;
pub const MIN_PARTY_SIZE: u8 = 1;
pub const MAX_PARTY_SIZE: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Deadly,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Deadly,
    ];

    /// Column in the threshold table.
    pub(crate) fn column(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Deadly => "deadly",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "deadly" => Ok(Difficulty::Deadly),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// A validated party: level 1..=20, size 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PartyProfile {
    level: u8,
    size: u8,
}

impl PartyProfile {
    /// Out-of-range values are rejected, never clamped.
    pub fn new(level: i64, size: i64) -> EngineResult<Self> {
        Ok(Self {
            level: validate_level(level)?,
            size: validate_size(size)?,
        })
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn size(&self) -> u8 {
        self.size
    }
}

pub fn validate_level(level: i64) -> EngineResult<u8> {
    if (MIN_PARTY_LEVEL as i64..=MAX_PARTY_LEVEL as i64).contains(&level) {
        Ok(level as u8)
    } else {
        Err(EngineError::InvalidPartyLevel(level))
    }
}

pub fn validate_size(size: i64) -> EngineResult<u8> {
    if (MIN_PARTY_SIZE as i64..=MAX_PARTY_SIZE as i64).contains(&size) {
        Ok(size as u8)
    } else {
        Err(EngineError::InvalidPartySize(size))
    }
}
