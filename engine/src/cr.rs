use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::tables::CR_XP;

/// A challenge rating from the closed set "0", "1/8", "1/4", "1/2", "1".."30".
///
/// Stored as an index into [`CR_XP`], so ordering follows increasing CR and
/// an invalid label can only show up at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLabel", into = "String")]
pub struct ChallengeRating(u8);

impl ChallengeRating {
    pub const ZERO: ChallengeRating = ChallengeRating(0);
    pub const EIGHTH: ChallengeRating = ChallengeRating(1);
    pub const QUARTER: ChallengeRating = ChallengeRating(2);
    pub const HALF: ChallengeRating = ChallengeRating(3);

    /// Offset between a whole CR and its table index ("1" sits at index 4).
    const WHOLE_OFFSET: u8 = 3;

    /// Whole CR 1..=30 in const context; out of range fails to compile.
    pub const fn cr(n: u8) -> Self {
        assert!(n >= 1 && n <= 30, "challenge rating out of range");
        ChallengeRating(n + Self::WHOLE_OFFSET)
    }

    pub fn from_label(label: &str) -> EngineResult<Self> {
        let label = label.trim();
        CR_XP
            .iter()
            .position(|(l, _)| *l == label)
            .map(|idx| ChallengeRating(idx as u8))
            .ok_or_else(|| EngineError::UnknownChallengeRating(label.to_string()))
    }

    /// Whole-number rating; `None` past CR 30.
    pub fn whole(n: u32) -> Option<Self> {
        match n {
            0 => Some(Self::ZERO),
            1..=30 => Some(ChallengeRating(n as u8 + Self::WHOLE_OFFSET)),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        CR_XP[self.0 as usize].0
    }

    pub fn xp(self) -> u32 {
        CR_XP[self.0 as usize].1
    }

    pub fn all() -> impl Iterator<Item = ChallengeRating> {
        (0..CR_XP.len() as u8).map(ChallengeRating)
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ChallengeRating {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

/// Catalog files may write whole ratings as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Whole(u32),
}

impl TryFrom<RawLabel> for ChallengeRating {
    type Error = EngineError;

    fn try_from(raw: RawLabel) -> Result<Self, Self::Error> {
        match raw {
            RawLabel::Text(label) => Self::from_label(&label),
            RawLabel::Whole(n) => {
                Self::whole(n).ok_or_else(|| EngineError::UnknownChallengeRating(n.to_string()))
            }
        }
    }
}

impl From<ChallengeRating> for String {
    fn from(cr: ChallengeRating) -> Self {
        cr.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_labels_stay_distinct() {
        let eighth: ChallengeRating = "1/8".parse().unwrap();
        let quarter: ChallengeRating = "1/4".parse().unwrap();
        assert_eq!(eighth, ChallengeRating::EIGHTH);
        assert_eq!(quarter.xp(), 50);
        assert!(eighth < quarter);
        assert!(quarter < ChallengeRating::HALF);
    }

    #[test]
    fn whole_numbers_map_onto_labels() {
        assert_eq!(ChallengeRating::whole(0), Some(ChallengeRating::ZERO));
        assert_eq!(ChallengeRating::whole(1).unwrap().label(), "1");
        assert_eq!(ChallengeRating::whole(4).unwrap().xp(), 1100);
        assert_eq!(ChallengeRating::whole(30).unwrap().xp(), 155000);
        assert_eq!(ChallengeRating::whole(31), None);
    }

    #[test]
    fn rejects_unknown_labels() {
        assert_eq!(
            "1/3".parse::<ChallengeRating>(),
            Err(EngineError::UnknownChallengeRating("1/3".into()))
        );
        assert!(ChallengeRating::from_label("31").is_err());
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&ChallengeRating::HALF).unwrap();
        assert_eq!(json, "\"1/2\"");
        let back: ChallengeRating = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(back.xp(), 18000);
        assert!(serde_json::from_str::<ChallengeRating>("\"forty\"").is_err());
        let bare: ChallengeRating = serde_json::from_str("5").unwrap();
        assert_eq!(bare.label(), "5");
        assert!(serde_json::from_str::<ChallengeRating>("31").is_err());
    }

    #[test]
    fn every_label_round_trips() {
        assert_eq!(ChallengeRating::all().count(), 34);
        for cr in ChallengeRating::all() {
            assert_eq!(ChallengeRating::from_label(cr.label()), Ok(cr));
        }
    }
}
