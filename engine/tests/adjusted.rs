use encounter_engine::{
    calculate_adjusted_xp, evaluate_composition, match_score, ChallengeRating, CompositionEntry,
    Difficulty, EngineError, PartyProfile,
};

#[test]
fn four_goblins_fall_short_of_a_medium_budget() {
    let goblins = [CompositionEntry::new(ChallengeRating::QUARTER, 4)];
    let adjusted = calculate_adjusted_xp(&goblins, 4).unwrap();
    assert_eq!(adjusted, 400);
    let score = match_score(adjusted, 600);
    assert!((score - 2.0 / 3.0).abs() < 1e-9);
    assert!(score < 0.7);
}

#[test]
fn six_goblins_use_the_three_to_six_band() {
    let goblins = [CompositionEntry::from_label("1/4", 6)];
    let adjusted = calculate_adjusted_xp(&goblins, 4).unwrap();
    assert_eq!(adjusted, 600);
    assert!(match_score(adjusted, 600) > 0.7);
}

#[test]
fn unknown_labels_contribute_nothing() {
    let mixed = [
        CompositionEntry::from_label("2", 1),
        CompositionEntry::from_label("1/3", 5),
    ];
    // six monsters in the 3-6 band for a party of four: 450 × 2
    assert_eq!(calculate_adjusted_xp(&mixed, 4).unwrap(), 900);
    assert_eq!(
        calculate_adjusted_xp(&[CompositionEntry::from_label("dragon", 1)], 4).unwrap(),
        0
    );
}

#[test]
fn empty_composition_is_zero() {
    assert_eq!(calculate_adjusted_xp(&[], 4).unwrap(), 0);
}

#[test]
fn rounds_to_nearest() {
    // 7 bandits (175 XP) for a party of 6: 175 × 1.5 = 262.5
    let bandits = [CompositionEntry::new(ChallengeRating::EIGHTH, 7)];
    assert_eq!(calculate_adjusted_xp(&bandits, 6).unwrap(), 263);
}

#[test]
fn evaluation_report_for_a_manual_encounter() {
    let party = PartyProfile::new(3, 4).unwrap();
    let entries = [
        CompositionEntry::new(ChallengeRating::whole(2).unwrap(), 1),
        CompositionEntry::new(ChallengeRating::QUARTER, 3),
    ];
    let report = evaluate_composition(&entries, &party, 600).unwrap();
    assert_eq!(report.monster_count, 4);
    assert_eq!(report.total_xp, 600);
    assert_eq!(report.multiplier, 2.0);
    assert_eq!(report.adjusted_xp, 1200);
    assert_eq!(report.rating.difficulty, Difficulty::Hard);
    assert_eq!(report.match_score, 0.0);
}

#[test]
fn zero_target_never_scores() {
    assert_eq!(match_score(0, 0), 0.0);
    assert_eq!(match_score(500, 0), 0.0);
}

#[test]
fn huge_counts_saturate_instead_of_overflowing() {
    let tarrasques = [CompositionEntry::from_label("30", 30_000)];
    assert_eq!(calculate_adjusted_xp(&tarrasques, 4).unwrap(), u32::MAX);

    let party = PartyProfile::new(20, 4).unwrap();
    let report = evaluate_composition(&tarrasques, &party, 60_000).unwrap();
    assert_eq!(report.total_xp, 4_650_000_000);
    assert_eq!(report.adjusted_xp, u32::MAX);
    assert_eq!(report.rating.difficulty, Difficulty::Deadly);

    let max = vec![CompositionEntry::from_label("30", u32::MAX); 3];
    assert_eq!(calculate_adjusted_xp(&max, 10).unwrap(), u32::MAX);
}

#[test]
fn party_size_is_validated() {
    let goblins = [CompositionEntry::new(ChallengeRating::QUARTER, 6)];
    assert_eq!(
        calculate_adjusted_xp(&goblins, 0),
        Err(EngineError::InvalidPartySize(0))
    );
    assert_eq!(
        calculate_adjusted_xp(&goblins, 11),
        Err(EngineError::InvalidPartySize(11))
    );
}

#[test]
fn zero_counts_are_rejected() {
    let entries = [
        CompositionEntry::new(ChallengeRating::whole(2).unwrap(), 1),
        CompositionEntry::new(ChallengeRating::QUARTER, 0),
    ];
    assert_eq!(
        calculate_adjusted_xp(&entries, 4),
        Err(EngineError::InvalidMonsterCount("1/4".into()))
    );
    let party = PartyProfile::new(3, 4).unwrap();
    assert!(matches!(
        evaluate_composition(&entries, &party, 600),
        Err(EngineError::InvalidMonsterCount(_))
    ));
}
