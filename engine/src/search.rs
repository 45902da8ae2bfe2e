//! Composition search: four greedy strategies that each stop at the first
//! candidate whose match score clears the acceptance bound, then a ranking
//! pass over whatever they found.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::budget::{apply_multiplier, classify, match_score, party_thresholds, BudgetThresholds};
use crate::catalog::MonsterEntry;
use crate::cr::ChallengeRating;
use crate::error::{EngineError, EngineResult};
use crate::party::{Difficulty, PartyProfile};

pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MAX_VARIANTS: usize = 5;

const UNIFORM_COUNTS: std::ops::RangeInclusive<u32> = 2..=10;
const MINION_COUNTS: std::ops::RangeInclusive<u32> = 2..=6;
const MEDIUM_GROUP_COUNTS: std::ops::RangeInclusive<u32> = 3..=5;
const BOSS_CANDIDATES: usize = 5;
/// A boss may take at most this share of the target on its own.
const BOSS_MAX_SHARE: f64 = 0.7;
/// Per-monster XP band for the medium-group strategy, as shares of target.
const MEDIUM_GROUP_BAND: (f64, f64) = (0.15, 0.40);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    /// Candidates must score strictly above this.
    pub acceptance_threshold: f64,
    pub max_variants: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            max_variants: DEFAULT_MAX_VARIANTS,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if !(0.0..1.0).contains(&self.acceptance_threshold) {
            return Err(EngineError::InvalidSearchConfig(format!(
                "acceptance_threshold {} must be in [0, 1)",
                self.acceptance_threshold
            )));
        }
        if self.max_variants == 0 {
            return Err(EngineError::InvalidSearchConfig(
                "max_variants must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    SingleMonster,
    UniformGroup,
    BossWithMinions,
    MediumGroup,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::SingleMonster,
        Strategy::UniformGroup,
        Strategy::BossWithMinions,
        Strategy::MediumGroup,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::SingleMonster => "single_monster",
            Strategy::UniformGroup => "uniform_group",
            Strategy::BossWithMinions => "boss_with_minions",
            Strategy::MediumGroup => "medium_group",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantMonster {
    pub name: String,
    pub cr: ChallengeRating,
    pub count: u32,
    #[serde(rename = "type")]
    pub creature_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterVariant {
    pub strategy: Strategy,
    pub monsters: Vec<VariantMonster>,
    #[serde(rename = "totalXP")]
    pub total_xp: u32,
    #[serde(rename = "adjustedXP")]
    pub adjusted_xp: u32,
    pub actual_difficulty: Difficulty,
    pub match_score: f64,
}

impl EncounterVariant {
    pub fn monster_count(&self) -> u32 {
        self.monsters.iter().map(|m| m.count).sum()
    }

    /// "1× Ogre, 4× Goblin"
    pub fn summary(&self) -> String {
        self.monsters
            .iter()
            .map(|m| format!("{}× {}", m.count, m.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Ranked variants using the default acceptance bound and cap.
pub fn generate_encounter_variants(
    monsters: &[MonsterEntry],
    target_xp: u32,
    party: &PartyProfile,
    difficulty: Difficulty,
) -> Vec<EncounterVariant> {
    generate_encounter_variants_with(
        monsters,
        target_xp,
        party,
        difficulty,
        &SearchConfig::default(),
        |_| {},
    )
}

/// Runs every strategy in order, drops the ones that found nothing, sorts the
/// rest by descending match score (ties keep strategy order) and truncates.
pub fn generate_encounter_variants_with(
    monsters: &[MonsterEntry],
    target_xp: u32,
    party: &PartyProfile,
    difficulty: Difficulty,
    config: &SearchConfig,
    mut log: impl FnMut(String),
) -> Vec<EncounterVariant> {
    if target_xp == 0 || monsters.is_empty() {
        log(format!(
            "[SEARCH] nothing to search (target={} monsters={})",
            target_xp,
            monsters.len()
        ));
        return Vec::new();
    }

    let scorer = Scorer {
        target_xp,
        party,
        thresholds: party_thresholds(party),
        acceptance: config.acceptance_threshold,
    };

    let mut variants = Vec::new();
    for strategy in Strategy::ALL {
        let found = match strategy {
            Strategy::SingleMonster => single_monster(&scorer, monsters),
            Strategy::UniformGroup => uniform_group(&scorer, monsters),
            Strategy::BossWithMinions => boss_with_minions(&scorer, monsters),
            Strategy::MediumGroup => medium_group(&scorer, monsters),
        };
        match found {
            Some(v) => {
                log(format!(
                    "[SEARCH] {} → {} adjusted={} score={:.3}",
                    strategy,
                    v.summary(),
                    v.adjusted_xp,
                    v.match_score
                ));
                variants.push(v);
            }
            None => log(format!("[SEARCH] {} → no acceptable composition", strategy)),
        }
    }

    variants.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    variants.truncate(config.max_variants);
    debug!(
        target_xp,
        level = party.level(),
        size = party.size(),
        %difficulty,
        found = variants.len(),
        "encounter search finished"
    );
    variants
}

struct Scorer<'a> {
    target_xp: u32,
    party: &'a PartyProfile,
    thresholds: BudgetThresholds,
    acceptance: f64,
}

impl Scorer<'_> {
    fn evaluate(&self, strategy: Strategy, picks: &[(&MonsterEntry, u32)]) -> EncounterVariant {
        let count: u32 = picks.iter().map(|(_, n)| n).sum();
        let total_xp: u32 = picks.iter().map(|(m, n)| m.xp() * n).sum();
        let adjusted_xp = apply_multiplier(u64::from(total_xp), u64::from(count), self.party.size());
        EncounterVariant {
            strategy,
            monsters: picks
                .iter()
                .map(|(m, n)| VariantMonster {
                    name: m.name.clone(),
                    cr: m.challenge_rating,
                    count: *n,
                    creature_type: m.creature_type.clone(),
                })
                .collect(),
            total_xp,
            adjusted_xp,
            actual_difficulty: classify(adjusted_xp, &self.thresholds).difficulty,
            match_score: match_score(adjusted_xp, self.target_xp),
        }
    }

    fn accept(&self, strategy: Strategy, picks: &[(&MonsterEntry, u32)]) -> Option<EncounterVariant> {
        let v = self.evaluate(strategy, picks);
        trace!(%strategy, combo = %v.summary(), score = v.match_score, "candidate");
        (v.match_score > self.acceptance).then_some(v)
    }

    fn share_of_target(&self, share: f64) -> f64 {
        self.target_xp as f64 * share
    }
}

fn single_monster(s: &Scorer<'_>, monsters: &[MonsterEntry]) -> Option<EncounterVariant> {
    monsters
        .iter()
        .find_map(|m| s.accept(Strategy::SingleMonster, &[(m, 1)]))
}

fn uniform_group(s: &Scorer<'_>, monsters: &[MonsterEntry]) -> Option<EncounterVariant> {
    monsters.iter().find_map(|m| {
        UNIFORM_COUNTS
            .clone()
            .find_map(|n| s.accept(Strategy::UniformGroup, &[(m, n)]))
    })
}

fn boss_with_minions(s: &Scorer<'_>, monsters: &[MonsterEntry]) -> Option<EncounterVariant> {
    let mut sorted: Vec<&MonsterEntry> = monsters.iter().collect();
    sorted.sort_by(|a, b| b.xp().cmp(&a.xp()));

    for boss in sorted.iter().take(BOSS_CANDIDATES) {
        let boss_xp = boss.xp();
        if boss_xp as f64 > s.share_of_target(BOSS_MAX_SHARE) {
            continue;
        }
        let remaining = s.target_xp.saturating_sub(boss_xp);
        // weakest first; once a minion is too strong, so is everything after it.
        // The boss fails the half-XP bound, so it never pairs with itself.
        for minion in sorted.iter().rev() {
            let minion_xp = minion.xp();
            if minion_xp * 2 > boss_xp || minion_xp > remaining {
                break;
            }
            let hit = MINION_COUNTS
                .clone()
                .find_map(|n| s.accept(Strategy::BossWithMinions, &[(*boss, 1), (*minion, n)]));
            if hit.is_some() {
                return hit;
            }
        }
    }
    None
}

fn medium_group(s: &Scorer<'_>, monsters: &[MonsterEntry]) -> Option<EncounterVariant> {
    let (lo, hi) = (
        s.share_of_target(MEDIUM_GROUP_BAND.0),
        s.share_of_target(MEDIUM_GROUP_BAND.1),
    );
    monsters
        .iter()
        .filter(|m| (lo..=hi).contains(&(m.xp() as f64)))
        .find_map(|m| {
            MEDIUM_GROUP_COUNTS
                .clone()
                .find_map(|n| s.accept(Strategy::MediumGroup, &[(m, n)]))
        })
}
