use encounter_engine::{budget_thresholds, determine_difficulty, Difficulty, EngineError};

fn rate(xp: u32) -> (Difficulty, f64) {
    let r = determine_difficulty(xp, 3, 4).unwrap();
    (r.difficulty, r.percentage)
}

#[test]
fn below_easy_is_a_fraction_of_easy() {
    assert_eq!(rate(0), (Difficulty::Easy, 0.0));
    assert_eq!(rate(150), (Difficulty::Easy, 50.0));
}

#[test]
fn just_under_easy_threshold() {
    let t = budget_thresholds(3, 4).unwrap();
    assert_eq!(rate(t.easy - 1).0, Difficulty::Easy);
}

#[test]
fn easy_to_medium_band_reports_easy_maxed_out() {
    assert_eq!(rate(300), (Difficulty::Easy, 100.0));
    assert_eq!(rate(450), (Difficulty::Easy, 100.0));
    assert_eq!(rate(599), (Difficulty::Easy, 100.0));
}

#[test]
fn medium_and_hard_report_position_in_band() {
    assert_eq!(rate(600), (Difficulty::Medium, 0.0));
    assert_eq!(rate(750), (Difficulty::Medium, 50.0));
    assert_eq!(rate(900), (Difficulty::Hard, 0.0));
    assert_eq!(rate(1250), (Difficulty::Hard, 50.0));
}

#[test]
fn deadly_threshold_and_beyond() {
    let t = budget_thresholds(3, 4).unwrap();
    assert_eq!(rate(t.deadly), (Difficulty::Deadly, 100.0));
    assert_eq!(rate(1_000_000), (Difficulty::Deadly, 100.0));
}

#[test]
fn invalid_party_is_rejected() {
    assert_eq!(
        determine_difficulty(100, 21, 4),
        Err(EngineError::InvalidPartyLevel(21))
    );
    assert_eq!(
        determine_difficulty(100, 3, 12),
        Err(EngineError::InvalidPartySize(12))
    );
}
