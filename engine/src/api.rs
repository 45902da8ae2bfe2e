use serde::{Deserialize, Serialize};
use tracing::info;

use crate::budget::{party_budget, party_thresholds, BudgetThresholds};
use crate::catalog::{Catalog, CrWindow};
use crate::error::EngineResult;
use crate::narrative::{elaborate, ElaboratedVariant, NarrativeService};
use crate::party::{Difficulty, PartyProfile};
use crate::search::{generate_encounter_variants_with, EncounterVariant, SearchConfig};

/// Caller parameters, as deserialized from the request layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterRequest {
    #[serde(alias = "party_level")]
    pub party_level: i64,
    #[serde(alias = "party_size")]
    pub party_size: i64,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub config: Option<SearchConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignOutcome {
    VariantsFound,
    /// Nothing in the catalog fits the CR window.
    NoSuitableMonsters,
    /// Candidates existed but none cleared the acceptance bound.
    NoAcceptableComposition,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterDesign {
    pub party: PartyProfile,
    pub difficulty: Difficulty,
    #[serde(rename = "targetXP")]
    pub target_xp: u32,
    pub thresholds: BudgetThresholds,
    pub cr_window: CrWindow,
    pub suitable_count: usize,
    pub variants: Vec<EncounterVariant>,
    pub outcome: DesignOutcome,
    pub environment: Option<String>,
    pub context: Option<String>,
    pub log: Vec<String>,
}

impl EncounterDesign {
    pub fn top(&self) -> Option<&EncounterVariant> {
        self.variants.first()
    }

    /// Flavor text for the best variant, if there is one.
    pub fn elaborate_top(&self, service: &dyn NarrativeService) -> Option<ElaboratedVariant> {
        self.top().cloned().map(|v| {
            elaborate(
                v,
                &self.party,
                self.environment.as_deref(),
                self.context.as_deref(),
                service,
            )
        })
    }
}

pub fn design_encounter(req: EncounterRequest) -> EngineResult<EncounterDesign> {
    design_encounter_with_catalog(req, Catalog::builtin())
}

/// Validate, budget, filter, search. Search exhaustion is reported through
/// `outcome`, never as an error.
pub fn design_encounter_with_catalog(req: EncounterRequest, catalog: &Catalog) -> EngineResult<EncounterDesign> {
    let party = PartyProfile::new(req.party_level, req.party_size)?;
    let config = req.config.unwrap_or_default();
    config.validate()?;

    let mut logs = Vec::new();
    let target_xp = party_budget(&party, req.difficulty);
    let thresholds = party_thresholds(&party);
    logs.push(format!(
        "[BUDGET] level {} × {} party, {} → {} XP",
        party.level(),
        party.size(),
        req.difficulty,
        target_xp
    ));

    let cr_window = CrWindow::for_party(party.level(), req.difficulty);
    let suitable = catalog.suitable(party.level(), req.difficulty);
    logs.push(format!(
        "[FILTER] CR {}..{} (XP {}..{}) → {} of {} monsters",
        cr_window.min_cr,
        cr_window.max_cr,
        cr_window.min_xp,
        if cr_window.max_xp == u32::MAX {
            "∞".to_string()
        } else {
            cr_window.max_xp.to_string()
        },
        suitable.len(),
        catalog.len()
    ));

    let variants = generate_encounter_variants_with(
        &suitable,
        target_xp,
        &party,
        req.difficulty,
        &config,
        |msg| logs.push(msg),
    );
    for (rank, v) in variants.iter().enumerate() {
        logs.push(format!(
            "[VARIANT] #{} {} ({}) adjusted={} score={:.3} {}",
            rank + 1,
            v.summary(),
            v.strategy,
            v.adjusted_xp,
            v.match_score,
            v.actual_difficulty
        ));
    }

    let outcome = if suitable.is_empty() {
        DesignOutcome::NoSuitableMonsters
    } else if variants.is_empty() {
        DesignOutcome::NoAcceptableComposition
    } else {
        DesignOutcome::VariantsFound
    };
    logs.push(format!("[OUTCOME] {:?}", outcome));
    info!(
        target_xp,
        suitable = suitable.len(),
        variants = variants.len(),
        ?outcome,
        "encounter designed"
    );

    Ok(EncounterDesign {
        party,
        difficulty: req.difficulty,
        target_xp,
        thresholds,
        cr_window,
        suitable_count: suitable.len(),
        variants,
        outcome,
        environment: req.environment,
        context: req.context,
        log: logs,
    })
}
