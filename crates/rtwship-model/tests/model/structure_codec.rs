use proptest::prelude::*;
use rtwship_model::geometry::{cartesian_to_polar, polar_to_cartesian, PolarPoint, STRUCTURE_TO_FUNNEL};
use rtwship_model::{Point, Section, Structure, STRUCTURE_POINTS_MAX};

fn section(pairs: &[(&str, &str)]) -> Section {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn polar_points(structure: &Structure) -> Vec<PolarPoint> {
    structure
        .points()
        .iter()
        .map(|p| cartesian_to_polar(*p))
        .collect()
}

#[test]
fn test_consecutive_duplicates_collapse() {
    let structure = Structure::from_section(
        "Superstructure1",
        &section(&[
            ("Point0Angle", "100"),
            ("Point0Distance", "450"),
            ("Point1Angle", "100"),
            ("Point1Distance", "450"),
            ("IsLine", "0"),
        ]),
    )
    .unwrap();
    assert_eq!(structure.points().len(), 1);
    assert!(structure.fill());
}

#[test]
fn test_gap_in_indices_leaves_no_filler() {
    let structure = Structure::from_section(
        "Superstructure1",
        &section(&[
            ("Point0Angle", "0"),
            ("Point0Distance", "90"),
            ("Point2Angle", "0"),
            ("Point2Distance", "45"),
            ("IsLine", "1"),
        ]),
    )
    .unwrap();
    assert_eq!(
        polar_points(&structure),
        vec![PolarPoint::new(0, 90), PolarPoint::new(0, 45)]
    );
    assert!(!structure.fill());
}

#[test]
fn test_keys_in_any_order() {
    let structure = Structure::from_section(
        "Superstructure1",
        &section(&[
            ("Point1Distance", "45"),
            ("IsLine", "1"),
            ("Point0Distance", "90"),
            ("Point1Angle", "1000"),
            ("Point0Angle", "0"),
        ]),
    )
    .unwrap();
    assert_eq!(
        polar_points(&structure),
        vec![PolarPoint::new(0, 90), PolarPoint::new(1000, 45)]
    );
}

#[test]
fn test_padding_zeros_are_dropped() {
    let mut pairs = vec![
        ("Point0Angle".to_string(), "0".to_string()),
        ("Point0Distance".to_string(), "45".to_string()),
    ];
    for i in 1..STRUCTURE_POINTS_MAX {
        pairs.push((format!("Point{}Angle", i), "0".to_string()));
        pairs.push((format!("Point{}Distance", i), "0".to_string()));
    }
    let options: Section = pairs.into_iter().collect();
    let structure = Structure::from_section("Superstructure1", &options).unwrap();
    assert_eq!(structure.points(), &[Point::new(-0.0, -1.0)]);
}

#[test]
fn test_bad_values_are_schema_errors() {
    assert!(Structure::from_section("S", &section(&[("Point0Angle", "north")])).is_err());
    assert!(Structure::from_section("S", &section(&[("IsLine", "maybe")])).is_err());
}

#[test]
fn test_unknown_options_are_ignored() {
    let structure = Structure::from_section(
        "S",
        &section(&[("Point0Angle", "0"), ("Point0Distance", "45"), ("Height", "3")]),
    )
    .unwrap();
    assert_eq!(structure.points().len(), 1);
    assert!(!structure.to_section().contains_key("Height"));
}

#[test]
fn test_written_section_layout() {
    let structure = Structure::new("S", vec![Point::new(0.0, -100.0 * STRUCTURE_TO_FUNNEL)], false);
    let written = structure.to_section();
    let keys: Vec<&str> = written.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), STRUCTURE_POINTS_MAX * 2 + 1);
    assert_eq!(keys[0], "Point0Angle");
    assert_eq!(keys[1], "Point0Distance");
    assert_eq!(keys[41], "Point20Distance");
    assert_eq!(keys[42], "IsLine");
    assert_eq!(written["Point0Distance"], "100");
    assert_eq!(written["IsLine"], "1");
}

#[test]
fn test_extra_points_dropped_on_save() {
    let points: Vec<Point> = (1..=25).map(|i| Point::new(0.0, -(i as f64))).collect();
    let structure = Structure::new("S", points, true);
    let reloaded = Structure::from_section("S", &structure.to_section()).unwrap();
    assert_eq!(reloaded.points().len(), STRUCTURE_POINTS_MAX);
}

fn distinct_neighbours() -> impl Strategy<Value = Vec<PolarPoint>> {
    prop::collection::vec(
        (-900_000_000i64..900_000_000, 1i64..100_000).prop_map(|(a, d)| PolarPoint::new(a, d)),
        0..=STRUCTURE_POINTS_MAX,
    )
    .prop_map(|mut points| {
        points.dedup();
        points
    })
}

proptest! {
    #[test]
    fn prop_save_then_load_keeps_polar_points(raw in distinct_neighbours(), fill in any::<bool>()) {
        let points: Vec<Point> = raw.iter().map(|p| polar_to_cartesian(*p)).collect();
        let structure = Structure::new("S", points, fill);

        let reloaded = Structure::from_section("S", &structure.to_section()).unwrap();

        prop_assert_eq!(polar_points(&reloaded), raw);
        prop_assert_eq!(reloaded.fill(), fill);
    }
}
