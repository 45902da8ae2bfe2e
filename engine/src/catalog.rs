use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cr::ChallengeRating;
use crate::error::EngineResult;
use crate::party::{validate_level, Difficulty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonsterEntry {
    pub name: String,
    #[serde(alias = "cr")]
    pub challenge_rating: ChallengeRating,
    #[serde(alias = "type")]
    pub creature_type: String,
}

impl MonsterEntry {
    pub fn new(name: impl Into<String>, challenge_rating: ChallengeRating, creature_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            challenge_rating,
            creature_type: creature_type.into(),
        }
    }

    pub fn xp(&self) -> u32 {
        self.challenge_rating.xp()
    }
}

/// Read-only monster list keyed by lowercased name, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: IndexMap<String, MonsterEntry>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_entries(
        BUILTIN_MONSTERS
            .iter()
            .map(|&(name, cr, kind)| MonsterEntry::new(name, cr, kind)),
    )
});

impl Catalog {
    /// The compiled-in catalog, spanning CR 0 to CR 30.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Duplicate names keep the first entry.
    pub fn from_entries(entries: impl IntoIterator<Item = MonsterEntry>) -> Self {
        let mut map = IndexMap::new();
        for entry in entries {
            let key = entry.name.trim().to_lowercase();
            if map.contains_key(&key) {
                warn!(name = %entry.name, "duplicate monster in catalog; keeping first");
                continue;
            }
            map.insert(key, entry);
        }
        Self { entries: map }
    }

    pub fn get(&self, name: &str) -> Option<&MonsterEntry> {
        self.entries.get(&name.trim().to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonsterEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<MonsterEntry> {
        self.iter().cloned().collect()
    }

    /// Entries whose XP lies inside the CR window for this level and difficulty.
    pub fn suitable(&self, party_level: u8, difficulty: Difficulty) -> Vec<MonsterEntry> {
        let window = CrWindow::for_party(party_level, difficulty);
        let found: Vec<MonsterEntry> = self
            .iter()
            .filter(|m| window.contains_xp(m.xp()))
            .cloned()
            .collect();
        debug!(
            level = party_level,
            %difficulty,
            min_cr = window.min_cr,
            max_cr = window.max_cr,
            count = found.len(),
            "suitable monsters"
        );
        found
    }
}

/// Whole-number CR bounds and the XP range they resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrWindow {
    pub min_cr: u32,
    pub max_cr: u32,
    pub min_xp: u32,
    /// `u32::MAX` when `max_cr` is past the table.
    pub max_xp: u32,
}

impl CrWindow {
    pub fn for_party(party_level: u8, difficulty: Difficulty) -> Self {
        let level = party_level as u32;
        let (min_cr, max_cr) = match difficulty {
            Difficulty::Easy => {
                let min = if level <= 4 { 0 } else { level.saturating_sub(4).max(1) };
                (min, level.saturating_sub(1).max(1))
            }
            Difficulty::Medium => (level.saturating_sub(2).max(1), level + 1),
            Difficulty::Hard => (level.saturating_sub(1).max(1), level + 3),
            Difficulty::Deadly => (level, level + 5),
        };
        Self {
            min_cr,
            max_cr,
            min_xp: ChallengeRating::whole(min_cr).map_or(0, ChallengeRating::xp),
            max_xp: ChallengeRating::whole(max_cr).map_or(u32::MAX, ChallengeRating::xp),
        }
    }

    pub fn contains_xp(&self, xp: u32) -> bool {
        (self.min_xp..=self.max_xp).contains(&xp)
    }
}

/// Suitable monsters from the built-in catalog.
pub fn get_suitable_monsters(party_level: i64, difficulty: Difficulty) -> EngineResult<Vec<MonsterEntry>> {
    let level = validate_level(party_level)?;
    Ok(Catalog::builtin().suitable(level, difficulty))
}

const BUILTIN_MONSTERS: &[(&str, ChallengeRating, &str)] = &[
    ("Commoner", ChallengeRating::ZERO, "humanoid"),
    ("Rat", ChallengeRating::ZERO, "beast"),
    ("Crab", ChallengeRating::ZERO, "beast"),
    ("Shrieker", ChallengeRating::ZERO, "plant"),
    ("Awakened Shrub", ChallengeRating::ZERO, "plant"),
    ("Lemure", ChallengeRating::ZERO, "fiend"),
    ("Bandit", ChallengeRating::EIGHTH, "humanoid"),
    ("Kobold", ChallengeRating::EIGHTH, "humanoid"),
    ("Cultist", ChallengeRating::EIGHTH, "humanoid"),
    ("Giant Rat", ChallengeRating::EIGHTH, "beast"),
    ("Stirge", ChallengeRating::EIGHTH, "beast"),
    ("Merfolk", ChallengeRating::EIGHTH, "humanoid"),
    ("Goblin", ChallengeRating::QUARTER, "humanoid"),
    ("Skeleton", ChallengeRating::QUARTER, "undead"),
    ("Zombie", ChallengeRating::QUARTER, "undead"),
    ("Wolf", ChallengeRating::QUARTER, "beast"),
    ("Giant Wolf Spider", ChallengeRating::QUARTER, "beast"),
    ("Pseudodragon", ChallengeRating::QUARTER, "dragon"),
    ("Sprite", ChallengeRating::QUARTER, "fey"),
    ("Orc", ChallengeRating::HALF, "humanoid"),
    ("Hobgoblin", ChallengeRating::HALF, "humanoid"),
    ("Gnoll", ChallengeRating::HALF, "humanoid"),
    ("Shadow", ChallengeRating::HALF, "undead"),
    ("Black Bear", ChallengeRating::HALF, "beast"),
    ("Satyr", ChallengeRating::HALF, "fey"),
    ("Gray Ooze", ChallengeRating::HALF, "ooze"),
    ("Bugbear", ChallengeRating::cr(1), "humanoid"),
    ("Ghoul", ChallengeRating::cr(1), "undead"),
    ("Dire Wolf", ChallengeRating::cr(1), "beast"),
    ("Giant Spider", ChallengeRating::cr(1), "beast"),
    ("Harpy", ChallengeRating::cr(1), "monstrosity"),
    ("Imp", ChallengeRating::cr(1), "fiend"),
    ("Ogre", ChallengeRating::cr(2), "giant"),
    ("Gargoyle", ChallengeRating::cr(2), "elemental"),
    ("Ghast", ChallengeRating::cr(2), "undead"),
    ("Gibbering Mouther", ChallengeRating::cr(2), "aberration"),
    ("Centaur", ChallengeRating::cr(2), "monstrosity"),
    ("Will-o'-Wisp", ChallengeRating::cr(2), "undead"),
    ("Mimic", ChallengeRating::cr(2), "monstrosity"),
    ("Owlbear", ChallengeRating::cr(3), "monstrosity"),
    ("Basilisk", ChallengeRating::cr(3), "monstrosity"),
    ("Wight", ChallengeRating::cr(3), "undead"),
    ("Hell Hound", ChallengeRating::cr(3), "fiend"),
    ("Manticore", ChallengeRating::cr(3), "monstrosity"),
    ("Minotaur", ChallengeRating::cr(3), "monstrosity"),
    ("Ettin", ChallengeRating::cr(4), "giant"),
    ("Ghost", ChallengeRating::cr(4), "undead"),
    ("Banshee", ChallengeRating::cr(4), "undead"),
    ("Couatl", ChallengeRating::cr(4), "celestial"),
    ("Black Pudding", ChallengeRating::cr(4), "ooze"),
    ("Troll", ChallengeRating::cr(5), "giant"),
    ("Hill Giant", ChallengeRating::cr(5), "giant"),
    ("Air Elemental", ChallengeRating::cr(5), "elemental"),
    ("Gorgon", ChallengeRating::cr(5), "monstrosity"),
    ("Otyugh", ChallengeRating::cr(5), "aberration"),
    ("Vampire Spawn", ChallengeRating::cr(5), "undead"),
    ("Chimera", ChallengeRating::cr(6), "monstrosity"),
    ("Medusa", ChallengeRating::cr(6), "monstrosity"),
    ("Wyvern", ChallengeRating::cr(6), "dragon"),
    ("Young White Dragon", ChallengeRating::cr(6), "dragon"),
    ("Mage", ChallengeRating::cr(6), "humanoid"),
    ("Stone Giant", ChallengeRating::cr(7), "giant"),
    ("Young Black Dragon", ChallengeRating::cr(7), "dragon"),
    ("Oni", ChallengeRating::cr(7), "giant"),
    ("Frost Giant", ChallengeRating::cr(8), "giant"),
    ("Hydra", ChallengeRating::cr(8), "monstrosity"),
    ("Young Green Dragon", ChallengeRating::cr(8), "dragon"),
    ("Assassin", ChallengeRating::cr(8), "humanoid"),
    ("Fire Giant", ChallengeRating::cr(9), "giant"),
    ("Cloud Giant", ChallengeRating::cr(9), "giant"),
    ("Bone Devil", ChallengeRating::cr(9), "fiend"),
    ("Young Blue Dragon", ChallengeRating::cr(9), "dragon"),
    ("Stone Golem", ChallengeRating::cr(10), "construct"),
    ("Young Red Dragon", ChallengeRating::cr(10), "dragon"),
    ("Aboleth", ChallengeRating::cr(10), "aberration"),
    ("Deva", ChallengeRating::cr(10), "celestial"),
    ("Behir", ChallengeRating::cr(11), "monstrosity"),
    ("Remorhaz", ChallengeRating::cr(11), "monstrosity"),
    ("Horned Devil", ChallengeRating::cr(11), "fiend"),
    ("Archmage", ChallengeRating::cr(12), "humanoid"),
    ("Erinyes", ChallengeRating::cr(12), "fiend"),
    ("Adult White Dragon", ChallengeRating::cr(13), "dragon"),
    ("Nalfeshnee", ChallengeRating::cr(13), "fiend"),
    ("Rakshasa", ChallengeRating::cr(13), "fiend"),
    ("Storm Giant", ChallengeRating::cr(13), "giant"),
    ("Vampire", ChallengeRating::cr(13), "undead"),
    ("Adult Black Dragon", ChallengeRating::cr(14), "dragon"),
    ("Ice Devil", ChallengeRating::cr(14), "fiend"),
    ("Adult Green Dragon", ChallengeRating::cr(15), "dragon"),
    ("Purple Worm", ChallengeRating::cr(15), "monstrosity"),
    ("Mummy Lord", ChallengeRating::cr(15), "undead"),
    ("Adult Blue Dragon", ChallengeRating::cr(16), "dragon"),
    ("Iron Golem", ChallengeRating::cr(16), "construct"),
    ("Marilith", ChallengeRating::cr(16), "fiend"),
    ("Planetar", ChallengeRating::cr(16), "celestial"),
    ("Adult Red Dragon", ChallengeRating::cr(17), "dragon"),
    ("Dragon Turtle", ChallengeRating::cr(17), "dragon"),
    ("Adult Gold Dragon", ChallengeRating::cr(17), "dragon"),
    ("Demilich", ChallengeRating::cr(18), "undead"),
    ("Balor", ChallengeRating::cr(19), "fiend"),
    ("Ancient White Dragon", ChallengeRating::cr(20), "dragon"),
    ("Pit Fiend", ChallengeRating::cr(20), "fiend"),
    ("Ancient Black Dragon", ChallengeRating::cr(21), "dragon"),
    ("Lich", ChallengeRating::cr(21), "undead"),
    ("Solar", ChallengeRating::cr(21), "celestial"),
    ("Ancient Green Dragon", ChallengeRating::cr(22), "dragon"),
    ("Ancient Blue Dragon", ChallengeRating::cr(23), "dragon"),
    ("Kraken", ChallengeRating::cr(23), "monstrosity"),
    ("Ancient Red Dragon", ChallengeRating::cr(24), "dragon"),
    ("Tarrasque", ChallengeRating::cr(30), "monstrosity"),
];
