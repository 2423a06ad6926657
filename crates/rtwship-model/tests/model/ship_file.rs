use rtwship_model::geometry::STRUCTURE_TO_FUNNEL;
use rtwship_model::{
    Document, IniDocument, Point, SchemaError, Session, ShipCommand, ShipData, ShipFileError,
    TextEncoding,
};
use rtwship_settings::Parameters;
use std::fs;
use tempfile::TempDir;

use crate::fixtures::{snapshot, SHIP};

const BATTLECRUISER: &str = "\
[Data]
PictureName=
ShipType=BC
Displacement=26000

[Guns]
Main=15
TurretStyle=1

[Superstructure1]
Point0Angle=0
Point0Distance=100
IsLine=1

[Funnels]
Funnel1Pos=50
Funnel1Oval=1
";

fn expected_battlecruiser_output() -> String {
    let mut text = String::from(
        "[Data]\nPictureName=\nShipType=BC\nDisplacement=26000\n\n[Guns]\nMain=15\nTurretStyle=1\n\n[Superstructure1]\n",
    );
    text.push_str("Point0Angle=0\nPoint0Distance=100\n");
    for i in 1..=20 {
        text.push_str(&format!("Point{}Angle=0\nPoint{}Distance=0\n", i, i));
    }
    text.push_str("IsLine=1\n\n[Funnels]\nFunnel1Pos=50\nFunnel1Oval=1\n\n");
    text
}

#[test]
fn test_battlecruiser_scenario() {
    let ship = ShipData::parse(BATTLECRUISER, "bc.shd", &Parameters::default()).unwrap();

    assert_eq!(ship.structures().len(), 1);
    let structure = &ship.structures()[0];
    assert_eq!(structure.name(), "Superstructure1");
    assert_eq!(structure.points(), &[Point::new(0.0, -100.0 * STRUCTURE_TO_FUNNEL)]);
    assert!(!structure.fill());

    assert_eq!(ship.funnels().len(), 1);
    let funnel = &ship.funnels()["Funnel1"];
    assert_eq!(funnel.position(), 50.0);
    assert!(funnel.oval());

    let mut written = Vec::new();
    ship.write_to(&mut written).unwrap();
    assert_eq!(String::from_utf8(written).unwrap(), expected_battlecruiser_output());
}

#[test]
fn test_unrelated_sections_survive_save() {
    let text = format!("{}\n[Armour]\nBelt=12\nDeck=3\n\n[Turret9]\nPos=B\nGuns=3\nExtra=yes\n", SHIP);
    let ship = ShipData::parse(&text, "x.shd", &Parameters::default()).unwrap();
    let written = ship.to_document();

    assert_eq!(written.get("Armour", "Belt"), Some("12"));
    assert_eq!(written.get("Turret9", "Extra"), Some("yes"));
    assert_eq!(written.get("Guns", "TurretStyle"), Some("1"));
    let names: Vec<&str> = written.sections().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec!["Data", "Guns", "Turret1", "Superstructure1", "Superstructure2", "Funnels", "Armour", "Turret9"]
    );
}

#[test]
fn test_edits_survive_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("Hood.shd");
    fs::write(&source, SHIP).unwrap();
    let params = Parameters::default();

    let mut doc = Document::open(&source, &params).unwrap();
    doc.execute(ShipCommand::move_funnel("Funnel2", -35.0));
    doc.execute(ShipCommand::set_fill(1, true));
    doc.execute(ShipCommand::apply_symmetry(0));
    let target = dir.path().join("Hood2.shd");
    doc.save_as(&target).unwrap();
    assert_eq!(doc.path(), target.as_path());

    let reloaded = ShipData::load(&target, &params).unwrap();
    assert_eq!(reloaded.funnels()["Funnel2"].position(), -35.0);
    assert!(reloaded.structures()[1].fill());
    assert_eq!(reloaded.structures()[0].points().len(), 5);
    assert_eq!(reloaded.mounts().len(), 1);

    // Saving an unedited file gives back the same model.
    let again = dir.path().join("Hood3.shd");
    reloaded.save(&again).unwrap();
    let third = ShipData::load(&again, &params).unwrap();
    assert_eq!(snapshot(&third), snapshot(&reloaded));
}

#[test]
fn test_save_overwrites_source() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("Hood.shd");
    fs::write(&source, SHIP).unwrap();

    let mut doc = Document::open(&source, &Parameters::default()).unwrap();
    doc.execute(ShipCommand::set_funnel_oval("Funnel1", true));
    doc.save().unwrap();

    let text = fs::read_to_string(&source).unwrap();
    let parsed = IniDocument::parse(&text).unwrap();
    assert_eq!(parsed.get("Funnels", "Funnel1Oval"), Some("1"));
}

#[test]
fn test_picture_is_next_to_ship_file() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("Hood.shd");
    fs::write(&source, SHIP).unwrap();
    let ship = ShipData::load(&source, &Parameters::default()).unwrap();
    assert_eq!(ship.picture_path(), Some(dir.path().join("Hood.png")));
}

#[test]
fn test_latin1_file_loads_and_saves_in_latin1() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("Gloire.shd");
    let bytes: Vec<u8> = SHIP
        .replace("PictureName=Hood.png", "PictureName=Gloire\u{e9}.png")
        .chars()
        .map(|c| c as u8)
        .collect();
    fs::write(&source, &bytes).unwrap();

    let params = Parameters::default();
    let mut doc = Document::open(&source, &params).unwrap();
    assert_eq!(doc.ship().encoding(), TextEncoding::Latin1);
    assert_eq!(doc.ship().picture_name(), Some("Gloire\u{e9}.png"));

    doc.execute(ShipCommand::set_funnel_oval("Funnel1", true));
    doc.save().unwrap();
    let saved = fs::read(&source).unwrap();
    assert!(saved.windows(11).any(|w| w == b"Gloire\xe9.png"));
    assert!(std::str::from_utf8(&saved).is_err());
}

#[test]
fn test_syntax_error_is_format_error() {
    let err = ShipData::parse("[Data]\nShipType=BC\nShipType=BB\n", "bad.shd", &Parameters::default())
        .unwrap_err();
    assert!(err.is_format_error());
    assert_eq!(err.path().to_str(), Some("bad.shd"));
    assert!(err.to_string().starts_with("Could not parse as INI the file bad.shd"));
}

#[test]
fn test_missing_funnels_section() {
    let text = SHIP.split("[Funnels]").next().unwrap();
    let err = ShipData::parse(text, "x.shd", &Parameters::default()).unwrap_err();
    match err {
        ShipFileError::Schema { source, .. } => assert_eq!(
            source,
            SchemaError::MissingSection {
                section: "Funnels".to_string()
            }
        ),
        other => panic!("unexpected error {}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ShipData::load(dir.path().join("none.shd"), &Parameters::default()).unwrap_err();
    assert!(matches!(err, ShipFileError::Io { .. }));
}

#[test]
fn test_failed_load_keeps_current_document() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("Hood.shd");
    let bad = dir.path().join("Broken.shd");
    fs::write(&good, SHIP).unwrap();
    fs::write(&bad, "[Data]\nShipType=BC\n").unwrap();
    let params = Parameters::default();

    let mut session = Session::new();
    session.load(&good, &params).unwrap();
    session
        .document_mut()
        .unwrap()
        .execute(ShipCommand::move_funnel("Funnel1", 5.0));

    assert!(session.load(&bad, &params).is_err());
    let doc = session.document().unwrap();
    assert_eq!(doc.path(), good.as_path());
    assert_eq!(doc.ship().funnels()["Funnel1"].position(), 5.0);
    assert_eq!(doc.commands().undo_depth(), 1);

    let reopened = session.load(&good, &params).unwrap();
    assert_eq!(reopened.commands().undo_depth(), 0);
    assert_eq!(reopened.ship().funnels()["Funnel1"].position(), 20.0);
}
