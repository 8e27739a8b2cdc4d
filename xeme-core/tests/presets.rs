use xeme_core::{
    Base, Calculator, Configuration, DEFAULT_BASE, DEFAULT_BOUND, Preset, PresetStatus, TierOrder,
    Variant, XemeError, build_house_order, build_player_order, compute_ev, rank_of,
};

fn base() -> Base {
    Base::new(DEFAULT_BASE).unwrap()
}

/// Straight double sum with a linear rank scan per pair.
fn brute_force_ev(player: &TierOrder, house: &TierOrder, variant: Variant, bound: u32) -> f64 {
    let mut total = 0.0;
    for house_value in 0..bound {
        for player_value in 0..bound {
            let player_rank = rank_of(player, player_value).unwrap();
            let house_rank = rank_of(house, house_value).unwrap();
            if player_rank >= house_rank {
                total += variant.weight(player_value, base());
            }
        }
    }
    total / f64::from(bound * bound)
}

#[test]
fn reme_ev_matches_brute_force_reference() {
    let player = build_player_order(Variant::Reme, 37, base()).unwrap();
    let house = build_house_order(Variant::Reme, 37, base()).unwrap();
    let ev = compute_ev(&player, &house, |raw| Variant::Reme.weight(raw, base()), 37).unwrap();

    let reference = brute_force_ev(&player, &house, Variant::Reme, 37);
    assert!((ev - reference).abs() < 1e-12, "{ev} vs {reference}");
    // 1332 weighted wins out of 1369 pairs.
    assert!((ev - 1332.0 / 1369.0).abs() < 1e-12);
}

#[test]
fn every_preset_matches_its_exact_fraction() {
    let expected = [
        (Variant::Reme, 1332.0),
        (Variant::Jeme, 1509.0),
        (Variant::Leme, 1275.0),
    ];
    for (variant, numerator) in expected {
        let calc = Calculator::with_preset(variant, DEFAULT_BOUND, base()).unwrap();
        let ev = calc.expected_value().unwrap();
        let reference =
            brute_force_ev(calc.player_order(), calc.house_order(), variant, DEFAULT_BOUND);
        assert!((ev - reference).abs() < 1e-12, "{variant}");
        assert!((ev - numerator / 1369.0).abs() < 1e-12, "{variant}: {ev}");
    }
}

#[test]
fn edge_report_for_reme_over_two_rounds() {
    let calc = Calculator::with_preset(Variant::Reme, DEFAULT_BOUND, base()).unwrap();
    let report = calc.evaluate(2).unwrap();
    let ev = 36.0_f64 / 37.0;
    assert!((report.rtp - ev * ev).abs() < 1e-12);
    assert!((report.edge - (1.0 - ev * ev)).abs() < 1e-12);
    assert!((report.win_mass - 615.0 / 1369.0).abs() < 1e-12);
}

#[test]
fn presets_survive_a_configuration_round_trip() {
    for variant in Variant::ALL {
        let source = Calculator::with_preset(variant, DEFAULT_BOUND, base()).unwrap();
        let json = source.configuration().to_json().unwrap();

        let mut restored = Calculator::with_preset(Variant::Reme, DEFAULT_BOUND, base()).unwrap();
        restored.load_configuration_json(&json).unwrap();

        assert!(restored.player_order().is_equivalent(source.player_order()));
        assert!(restored.house_order().is_equivalent(source.house_order()));
        assert_eq!(restored.weights(), source.weights());
        assert_eq!(restored.preset_status(), PresetStatus::Preset(variant));
        assert_eq!(
            restored.expected_value().unwrap(),
            source.expected_value().unwrap()
        );
    }
}

#[test]
fn configuration_json_is_the_transferable_shape() {
    let preset = Preset::canonical(Variant::Jeme).unwrap();
    let config = Configuration::capture(
        Default::default(),
        &preset.weights,
        &preset.player,
        &preset.house,
    );
    let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
    assert_eq!(value["mode"], "Modulo");
    assert_eq!(value["weights"]["defaultWeight"], 2.0);
    assert_eq!(value["weights"]["weights"]["1"], 4.0);
    assert_eq!(value["orders"]["host"][0], serde_json::json!([]));
    assert_eq!(value["orders"]["player"].as_array().unwrap().len(), 6);
}

#[test]
fn a_missing_value_fails_instead_of_returning_a_number() {
    let mut player = build_player_order(Variant::Leme, 37, base()).unwrap();
    let tier = player.tiers().iter().position(|t| t.contains(&5)).unwrap();
    player.tier_mut(tier).unwrap().remove(&5);
    let house = build_house_order(Variant::Leme, 37, base()).unwrap();

    assert_eq!(rank_of(&player, 5), Err(XemeError::ValueNotRanked { value: 5 }));
    assert_eq!(
        compute_ev(&player, &house, |raw| Variant::Leme.weight(raw, base()), 37),
        Err(XemeError::ValueNotRanked { value: 5 })
    );
}

#[test]
fn parameter_errors_are_not_clamped() {
    let player = build_player_order(Variant::Reme, 37, base()).unwrap();
    assert!(matches!(
        compute_ev(&player, &player, |_| 1.0, 0),
        Err(XemeError::InvalidParameter { name: "bound", .. })
    ));
    assert!(build_player_order(Variant::Reme, 0, base()).is_err());
    assert!(Base::new(0).is_err());
    let calc = Calculator::with_preset(Variant::Reme, DEFAULT_BOUND, base()).unwrap();
    assert!(calc.evaluate(0).is_err());
}
