use rtwship_model::{Point, ShipData};
use rtwship_settings::Parameters;

/// Three-point structure on the port side plus a two-point line, two
/// funnels and one turret.
pub const SHIP: &str = "\
[Data]
PictureName=Hood.png
ShipType=BC
Displacement=26000

[Guns]
Main=15
TurretStyle=1

[Turret1]
Pos=A
Guns=2

[Superstructure1]
Point0Angle=0
Point0Distance=900
Point1Angle=243000000
Point1Distance=900
Point2Angle=486000000
Point2Distance=450
IsLine=0

[Superstructure2]
Point0Angle=0
Point0Distance=450
Point1Angle=972000000
Point1Distance=450
IsLine=1

[Funnels]
Funnel1Pos=20
Funnel1Oval=0
Funnel2Pos=-10
Funnel2Oval=1
";

pub fn ship() -> ShipData {
    ShipData::parse(SHIP, "Hood.shd", &Parameters::default()).unwrap()
}

/// Every editable field of the ship.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub structures: Vec<(Vec<Point>, bool)>,
    pub funnels: Vec<(String, f64, bool)>,
}

pub fn snapshot(ship: &ShipData) -> Snapshot {
    Snapshot {
        structures: ship
            .structures()
            .iter()
            .map(|s| (s.points().to_vec(), s.fill()))
            .collect(),
        funnels: ship
            .funnels()
            .iter()
            .map(|(name, f)| (name.clone(), f.position(), f.oval()))
            .collect(),
    }
}
