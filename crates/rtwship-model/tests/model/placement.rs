use rtwship_model::mounts::{resolve_candidate, OFF_FRAME_POSITION};
use rtwship_model::{Mount, MountSet, Point, ShipData};
use rtwship_settings::{Parameters, TurretPosition};

/// Candidate `i` of every letter sits at `x = i`, so the chosen candidate
/// can be read off the placed outline.
fn params() -> Parameters {
    let mut params = Parameters::default();
    for letter in ["A", "B", "C", "Y", "X"] {
        params.turrets_positions.insert(
            letter.to_string(),
            TurretPosition {
                positions: vec![(0.0, -0.5), (-0.01, -0.5), (-0.02, -0.5), (-0.03, -0.5)],
                to_bow: true,
            },
        );
    }
    for outline in params.turrets_outlines.iter_mut() {
        *outline = vec![(0.0, 0.0)];
    }
    for outline in params.torpedo_outlines.iter_mut() {
        *outline = vec![(0.0, 0.0)];
    }
    params
}

fn ship_with(mounts: &str) -> ShipData {
    let text = format!(
        "[Data]\nPictureName=\nShipType=BC\nDisplacement=26000\n\n[Guns]\nMain=12\nTurretStyle=1\n\n{}\n[Funnels]\n",
        mounts
    );
    ShipData::parse(&text, "x.shd", &params()).unwrap()
}

fn candidate(mount: &Mount) -> usize {
    (-mount.outline()[0].x / 2.0).round() as usize
}

#[test]
fn test_table_without_conflicts() {
    let present: MountSet = ["A", "Y"].into_iter().collect();
    assert_eq!(resolve_candidate("A", &present), 0);
    assert_eq!(resolve_candidate("Y", &present), 0);
}

#[test]
fn test_table_abc_moves_y() {
    let present: MountSet = ["A", "B", "C"].into_iter().collect();
    assert_eq!(resolve_candidate("Y", &present), 2);
}

#[test]
fn test_table_ignores_order() {
    let forward: MountSet = ["A", "B", "R", "X"].into_iter().collect();
    let backward: MountSet = ["X", "R", "B", "A"].into_iter().collect();
    for letter in ["A", "B", "W", "X", "Y"] {
        assert_eq!(resolve_candidate(letter, &forward), resolve_candidate(letter, &backward));
    }
}

#[test]
fn test_turrets_placed_from_file() {
    let ship = ship_with("[Turret1]\nPos=A\nGuns=2\n\n[Turret2]\nPos=Y\nGuns=2\n");
    let letters: Vec<&str> = ship.mounts().iter().map(Mount::letter).collect();
    assert_eq!(letters, vec!["A", "Y"]);
    assert!(ship.mounts().iter().all(|m| candidate(m) == 0));
    assert_eq!(ship.mounts()[0].outline(), &[Point::new(0.0, -100.0)]);
}

#[test]
fn test_torpedo_sees_every_turret_letter() {
    let ship = ship_with(
        "[TorpedoMount1]\nPos=Y\nTubes=2\n\n[Turret1]\nPos=A\nGuns=2\n\n[Turret2]\nPos=B\nGuns=2\n\n[Turret3]\nPos=C\nGuns=3\n",
    );
    let letters: Vec<&str> = ship.mounts().iter().map(Mount::letter).collect();
    assert_eq!(letters, vec!["A", "B", "C", "Y"]);
    assert!(!ship.mounts()[3].is_turret());
    assert_eq!(candidate(&ship.mounts()[3]), 2);
    assert_eq!(candidate(&ship.mounts()[0]), 1);
}

#[test]
fn test_torpedo_with_unknown_letter_is_off_frame() {
    let ship = ship_with("[TorpedoMount1]\nPos=port\nTubes=3\n");
    assert_eq!(
        ship.mounts()[0].outline(),
        &[Point::new(OFF_FRAME_POSITION.0 * 200.0, OFF_FRAME_POSITION.1 * 200.0)]
    );
}

#[test]
fn test_repeated_turret_letter_keeps_one_mount() {
    let ship = ship_with("[Turret1]\nPos=X\nGuns=2\n\n[Turret2]\nPos=X\nGuns=3\n");
    assert_eq!(ship.mounts().len(), 1);
    match &ship.mounts()[0] {
        Mount::Turret(turret) => assert_eq!(turret.guns(), 3),
        other => panic!("unexpected mount {:?}", other),
    }
}
