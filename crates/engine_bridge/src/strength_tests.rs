use super::*;

#[test]
fn test_target_ratings() {
    assert_eq!(Strength::Easy.target_elo(), 400);
    assert_eq!(Strength::Medium.target_elo(), 1200);
    assert_eq!(Strength::Hard.target_elo(), 2000);
}

#[test]
fn test_parse_names() {
    assert_eq!("Hard".parse::<Strength>(), Ok(Strength::Hard));
    assert_eq!("easy".parse::<Strength>(), Ok(Strength::Easy));
    assert!("grandmaster".parse::<Strength>().is_err());
    for s in Strength::ALL {
        assert_eq!(s.to_string().parse::<Strength>(), Ok(s));
    }
}

#[test]
fn test_builtin_profiles_grow_stronger() {
    let table = StrengthTable::default();
    let depths: Vec<u32> = Strength::ALL
        .iter()
        .map(|&s| table.profile(s).depth.unwrap())
        .collect();
    assert!(depths.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(table.profile(Strength::Medium).options["UCI_Elo"], "1200");
}

#[test]
fn test_partial_toml_override() {
    let table: StrengthTable = toml::from_str(
        r#"
        [hard]
        elo = 2400
        movetime_ms = 2500

        [hard.options]
        "Skill Level" = "20"
        "#,
    )
    .unwrap();
    assert_eq!(table.hard.elo, 2400);
    assert_eq!(table.hard.depth, None);
    assert_eq!(table.hard.movetime_ms, Some(2500));
    assert_eq!(table.hard.options.len(), 1);
    assert_eq!(table.easy, StrengthProfile::builtin(Strength::Easy));
}
