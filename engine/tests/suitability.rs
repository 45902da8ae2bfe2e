use encounter_engine::{
    get_suitable_monsters, Catalog, ChallengeRating, CrWindow, Difficulty, EngineError, MonsterEntry,
};

#[test]
fn level_three_medium_window() {
    let w = CrWindow::for_party(3, Difficulty::Medium);
    assert_eq!((w.min_cr, w.max_cr), (1, 4));
    assert_eq!((w.min_xp, w.max_xp), (200, 1100));

    let monsters = get_suitable_monsters(3, Difficulty::Medium).unwrap();
    assert!(!monsters.is_empty());
    assert!(monsters.iter().all(|m| (200..=1100).contains(&m.xp())));
    assert!(monsters.iter().all(|m| m.challenge_rating >= ChallengeRating::whole(1).unwrap()));
    assert_eq!(monsters[0].name, "Bugbear");
}

#[test]
fn low_level_easy_starts_at_cr_zero() {
    let w = CrWindow::for_party(2, Difficulty::Easy);
    assert_eq!((w.min_cr, w.max_cr), (0, 1));
    let monsters = get_suitable_monsters(2, Difficulty::Easy).unwrap();
    assert!(monsters.iter().any(|m| m.challenge_rating == ChallengeRating::ZERO));
    assert!(monsters.iter().any(|m| m.name == "Goblin"));
}

#[test]
fn fractional_crs_drop_out_once_min_is_whole() {
    let monsters = get_suitable_monsters(5, Difficulty::Easy).unwrap();
    assert!(monsters.iter().all(|m| m.challenge_rating > ChallengeRating::HALF));
}

#[test]
fn window_rules_per_difficulty() {
    let cases = [
        (1, Difficulty::Easy, (0, 1)),
        (8, Difficulty::Easy, (4, 7)),
        (1, Difficulty::Medium, (1, 2)),
        (10, Difficulty::Medium, (8, 11)),
        (1, Difficulty::Hard, (1, 4)),
        (10, Difficulty::Hard, (9, 13)),
        (7, Difficulty::Deadly, (7, 12)),
        (20, Difficulty::Deadly, (20, 25)),
    ];
    for (level, difficulty, expected) in cases {
        let w = CrWindow::for_party(level, difficulty);
        assert_eq!((w.min_cr, w.max_cr), expected, "level {} {}", level, difficulty);
    }
}

#[test]
fn every_valid_level_and_difficulty_succeeds() {
    for level in 1..=20 {
        for d in Difficulty::ALL {
            assert!(get_suitable_monsters(level, d).is_ok());
        }
    }
}

#[test]
fn invalid_level_is_an_error() {
    assert_eq!(
        get_suitable_monsters(0, Difficulty::Easy),
        Err(EngineError::InvalidPartyLevel(0))
    );
}

#[test]
fn builtin_catalog_spans_cr_zero_to_thirty() {
    let catalog = Catalog::builtin();
    assert!(catalog.len() >= 90);
    let crs: Vec<ChallengeRating> = catalog.iter().map(|m| m.challenge_rating).collect();
    assert_eq!(crs.iter().min(), Some(&ChallengeRating::ZERO));
    assert_eq!(crs.iter().max(), ChallengeRating::whole(30).as_ref());
    assert_eq!(catalog.get("goblin").map(|m| m.challenge_rating), Some(ChallengeRating::QUARTER));
    assert_eq!(catalog.get("GOBLIN").map(|m| m.creature_type.as_str()), Some("humanoid"));
}

#[test]
fn custom_catalog_keeps_order_and_first_duplicate() {
    let catalog = Catalog::from_entries([
        MonsterEntry::new("Ogre", ChallengeRating::whole(2).unwrap(), "giant"),
        MonsterEntry::new("Goblin", ChallengeRating::QUARTER, "humanoid"),
        MonsterEntry::new("ogre", ChallengeRating::whole(9).unwrap(), "giant"),
    ]);
    assert_eq!(catalog.len(), 2);
    let names: Vec<&str> = catalog.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Ogre", "Goblin"]);
    assert_eq!(catalog.get("OGRE").unwrap().xp(), 450);
}
