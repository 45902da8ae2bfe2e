//! Hand-off to an external text service for flavor text. The balancing math
//! never calls into this; callers do, after a variant has been chosen.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::party::PartyProfile;
use crate::search::EncounterVariant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NarrativePrompt {
    pub party_level: u8,
    pub party_size: u8,
    pub difficulty: String,
    pub monsters: Vec<String>,
    pub environment: Option<String>,
    pub context: Option<String>,
}

impl NarrativePrompt {
    pub fn for_variant(
        variant: &EncounterVariant,
        party: &PartyProfile,
        environment: Option<&str>,
        context: Option<&str>,
    ) -> Self {
        Self {
            party_level: party.level(),
            party_size: party.size(),
            difficulty: variant.actual_difficulty.to_string(),
            monsters: variant
                .monsters
                .iter()
                .map(|m| format!("{}× {} (CR {}, {})", m.count, m.name, m.cr, m.creature_type))
                .collect(),
            environment: non_blank(environment),
            context: non_blank(context),
        }
    }

    /// Plain-text rendering handed to the text service.
    pub fn render(&self) -> String {
        let mut out = format!(
            "Describe a {} encounter for {} adventurers of level {}.\nMonsters:\n",
            self.difficulty, self.party_size, self.party_level
        );
        for m in &self.monsters {
            out.push_str("- ");
            out.push_str(m);
            out.push('\n');
        }
        if let Some(env) = &self.environment {
            out.push_str(&format!("Environment: {}\n", env));
        }
        if let Some(ctx) = &self.context {
            out.push_str(&format!("Context: {}\n", ctx));
        }
        out
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Narrative {
    pub text: String,
    #[serde(default)]
    pub token_usage: u32,
}

/// Opaque text-completion collaborator.
pub trait NarrativeService {
    fn describe(&self, prompt: &NarrativePrompt) -> anyhow::Result<Narrative>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElaboratedVariant {
    #[serde(flatten)]
    pub variant: EncounterVariant,
    pub narrative: Option<Narrative>,
}

/// Attach flavor text to a variant. A failing service leaves `narrative`
/// empty; the numbers are never touched.
pub fn elaborate(
    variant: EncounterVariant,
    party: &PartyProfile,
    environment: Option<&str>,
    context: Option<&str>,
    service: &dyn NarrativeService,
) -> ElaboratedVariant {
    let prompt = NarrativePrompt::for_variant(&variant, party, environment, context);
    let narrative = match service.describe(&prompt) {
        Ok(n) => Some(n),
        Err(e) => {
            warn!(error = %e, "narrative service failed; returning variant without text");
            None
        }
    };
    ElaboratedVariant { variant, narrative }
}
