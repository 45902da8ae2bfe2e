use encounter_engine::encounter_multiplier;

#[test]
fn spot_checks() {
    assert_eq!(encounter_multiplier(1, 4), 1.0);
    assert_eq!(encounter_multiplier(4, 2), 2.5);
    assert_eq!(encounter_multiplier(12, 6), 2.5);
}

#[test]
fn every_band_and_party_category() {
    // (monster count, [small, normal, large])
    let table: [(u32, [f64; 3]); 6] = [
        (1, [1.5, 1.0, 0.5]),
        (2, [2.0, 1.5, 1.0]),
        (3, [2.5, 2.0, 1.5]),
        (7, [3.0, 2.5, 1.5]),
        (11, [4.0, 3.0, 2.5]),
        (15, [5.0, 4.0, 3.0]),
    ];
    for (count, [small, normal, large]) in table {
        assert_eq!(encounter_multiplier(count, 2), small, "{} vs small", count);
        assert_eq!(encounter_multiplier(count, 4), normal, "{} vs normal", count);
        assert_eq!(encounter_multiplier(count, 6), large, "{} vs large", count);
    }
}

#[test]
fn band_edges() {
    assert_eq!(encounter_multiplier(6, 4), 2.0);
    assert_eq!(encounter_multiplier(7, 4), 2.5);
    assert_eq!(encounter_multiplier(10, 4), 2.5);
    assert_eq!(encounter_multiplier(14, 4), 3.0);
    assert_eq!(encounter_multiplier(40, 4), 4.0);
}

#[test]
fn party_size_category_edges() {
    assert_eq!(encounter_multiplier(2, 1), 2.0);
    assert_eq!(encounter_multiplier(2, 3), 1.5);
    assert_eq!(encounter_multiplier(2, 5), 1.5);
    assert_eq!(encounter_multiplier(2, 10), 1.0);
}
