//! XP budget, encounter multiplier, adjusted XP and difficulty classification.

use serde::{Deserialize, Serialize};

use crate::cr::ChallengeRating;
use crate::error::{EngineError, EngineResult};
use crate::party::{validate_size, Difficulty, PartyProfile};
use crate::tables::{xp_for_label, XP_THRESHOLDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetThresholds {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub deadly: u32,
}

impl BudgetThresholds {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Deadly => self.deadly,
        }
    }
}

/// Per-character threshold at `level` for `difficulty`, times party size.
pub fn calculate_xp_budget(party_level: i64, party_size: i64, difficulty: Difficulty) -> EngineResult<u32> {
    let party = PartyProfile::new(party_level, party_size)?;
    Ok(party_budget(&party, difficulty))
}

pub fn budget_thresholds(party_level: i64, party_size: i64) -> EngineResult<BudgetThresholds> {
    let party = PartyProfile::new(party_level, party_size)?;
    Ok(party_thresholds(&party))
}

pub fn party_budget(party: &PartyProfile, difficulty: Difficulty) -> u32 {
    XP_THRESHOLDS[party.level() as usize - 1][difficulty.column()] * party.size() as u32
}

pub fn party_thresholds(party: &PartyProfile) -> BudgetThresholds {
    BudgetThresholds {
        easy: party_budget(party, Difficulty::Easy),
        medium: party_budget(party, Difficulty::Medium),
        hard: party_budget(party, Difficulty::Hard),
        deadly: party_budget(party, Difficulty::Deadly),
    }
}

/// DMG action-economy multiplier. Columns are small (< 3), normal (3..=5)
/// and large (> 5) parties. A count of 0 falls in the single-monster band.
pub fn encounter_multiplier(monster_count: u32, party_size: u8) -> f64 {
    let row: [f64; 3] = match monster_count {
        0 | 1 => [1.5, 1.0, 0.5],
        2 => [2.0, 1.5, 1.0],
        3..=6 => [2.5, 2.0, 1.5],
        7..=10 => [3.0, 2.5, 1.5],
        11..=14 => [4.0, 3.0, 2.5],
        _ => [5.0, 4.0, 3.0],
    };
    let column = if party_size < 3 {
        0
    } else if party_size > 5 {
        2
    } else {
        1
    };
    row[column]
}

/// One line of a monster composition. `cr` is kept as the caller's raw label;
/// labels missing from the XP table are worth 0 XP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionEntry {
    pub cr: String,
    pub count: u32,
}

impl CompositionEntry {
    pub fn new(cr: ChallengeRating, count: u32) -> Self {
        Self {
            cr: cr.label().to_string(),
            count,
        }
    }

    pub fn from_label(cr: impl Into<String>, count: u32) -> Self {
        Self {
            cr: cr.into(),
            count,
        }
    }

    /// Widened so large caller-supplied counts cannot overflow.
    pub fn xp(&self) -> u64 {
        xp_for_label(&self.cr) as u64 * self.count as u64
    }
}

/// Raw XP of a composition with no multiplier applied.
pub fn composition_base_xp(composition: &[CompositionEntry]) -> u64 {
    composition
        .iter()
        .fold(0u64, |acc, e| acc.saturating_add(e.xp()))
}

pub fn composition_monster_count(composition: &[CompositionEntry]) -> u64 {
    composition
        .iter()
        .fold(0u64, |acc, e| acc.saturating_add(e.count as u64))
}

/// Every entry must hold at least one monster.
pub fn validate_composition(composition: &[CompositionEntry]) -> EngineResult<()> {
    match composition.iter().find(|e| e.count == 0) {
        Some(e) => Err(EngineError::InvalidMonsterCount(e.cr.clone())),
        None => Ok(()),
    }
}

pub fn calculate_adjusted_xp(composition: &[CompositionEntry], party_size: i64) -> EngineResult<u32> {
    let size = validate_size(party_size)?;
    validate_composition(composition)?;
    let total = composition_monster_count(composition);
    if total == 0 {
        return Ok(0);
    }
    Ok(apply_multiplier(composition_base_xp(composition), total, size))
}

/// Saturates at `u32::MAX`.
pub(crate) fn apply_multiplier(base_xp: u64, monster_count: u64, party_size: u8) -> u32 {
    let count = u32::try_from(monster_count).unwrap_or(u32::MAX);
    let adjusted = (base_xp as f64 * encounter_multiplier(count, party_size)).round();
    adjusted.min(u32::MAX as f64) as u32
}

/// `1 - |adjusted - target| / target`. A zero target never scores.
pub fn match_score(adjusted_xp: u32, target_xp: u32) -> f64 {
    if target_xp == 0 {
        return 0.0;
    }
    let diff = (adjusted_xp as f64 - target_xp as f64).abs();
    1.0 - diff / target_xp as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyRating {
    pub difficulty: Difficulty,
    pub percentage: f64,
}

pub fn determine_difficulty(adjusted_xp: u32, party_level: i64, party_size: i64) -> EngineResult<DifficultyRating> {
    let party = PartyProfile::new(party_level, party_size)?;
    Ok(classify(adjusted_xp, &party_thresholds(&party)))
}

/// Band membership against the party thresholds. The `[easy, medium)` band
/// reports easy at 100%.
pub fn classify(adjusted_xp: u32, t: &BudgetThresholds) -> DifficultyRating {
    let xp = adjusted_xp as f64;
    let within = |lo: u32, hi: u32| (xp - lo as f64) / (hi as f64 - lo as f64) * 100.0;
    let (difficulty, percentage) = if adjusted_xp < t.easy {
        (Difficulty::Easy, xp / t.easy as f64 * 100.0)
    } else if adjusted_xp < t.medium {
        (Difficulty::Easy, 100.0)
    } else if adjusted_xp < t.hard {
        (Difficulty::Medium, within(t.medium, t.hard))
    } else if adjusted_xp < t.deadly {
        (Difficulty::Hard, within(t.hard, t.deadly))
    } else {
        (Difficulty::Deadly, 100.0)
    };
    DifficultyRating {
        difficulty,
        percentage: percentage.clamp(0.0, 100.0),
    }
}

/// Numbers for a hand-built composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionReport {
    pub monster_count: u64,
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    pub multiplier: f64,
    #[serde(rename = "adjustedXP")]
    pub adjusted_xp: u32,
    pub rating: DifficultyRating,
    pub match_score: f64,
}

pub fn evaluate_composition(
    composition: &[CompositionEntry],
    party: &PartyProfile,
    target_xp: u32,
) -> EngineResult<CompositionReport> {
    validate_composition(composition)?;
    let monster_count = composition_monster_count(composition);
    let total_xp = composition_base_xp(composition);
    let adjusted_xp = apply_multiplier(total_xp, monster_count, party.size());
    Ok(CompositionReport {
        monster_count,
        total_xp,
        multiplier: encounter_multiplier(
            u32::try_from(monster_count).unwrap_or(u32::MAX),
            party.size(),
        ),
        adjusted_xp,
        rating: classify(adjusted_xp, &party_thresholds(party)),
        match_score: match_score(adjusted_xp, target_xp),
    })
}
