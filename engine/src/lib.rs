//! D&D 5e encounter balancing: XP budgets, the DMG encounter multiplier,
//! difficulty classification, monster suitability and composition search.
//!
//! Everything here is a pure function over the compiled-in tables and a
//! monster catalog; nothing does I/O except the file loaders in [`content`].

pub mod api;
pub mod budget;
pub mod catalog;
pub mod content;
pub mod cr;
pub mod error;
pub mod narrative;
pub mod party;
pub mod search;
pub mod tables;

pub use budget::{
    budget_thresholds, calculate_adjusted_xp, calculate_xp_budget, classify, determine_difficulty,
    encounter_multiplier, evaluate_composition, match_score, party_budget, party_thresholds,
    validate_composition, BudgetThresholds, CompositionEntry, CompositionReport, DifficultyRating,
};
pub use catalog::{get_suitable_monsters, Catalog, CrWindow, MonsterEntry};
pub use cr::ChallengeRating;
pub use error::{EngineError, EngineResult};
pub use party::{Difficulty, PartyProfile};
pub use search::{
    generate_encounter_variants, generate_encounter_variants_with, EncounterVariant, SearchConfig,
    Strategy, VariantMonster,
};
