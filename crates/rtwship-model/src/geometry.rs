//! Coordinate systems and vertex transforms.
//!
//! Everything the editor manipulates lives in funnel coordinates: X is
//! lateral (positive to starboard), Y is longitudinal (negative to the bow),
//! origin near midship. Superstructure points are stored in the ship file as
//! integer polar pairs `(angle, distance)` in the game's own units and are
//! converted on load and save.

use std::f64::consts::PI;

/// Superstructure distance unit -> funnel coordinate unit.
pub const STRUCTURE_TO_FUNNEL: f64 = 1.0 / 45.0;

/// Superstructure angle unit -> radians.
pub const ANGLE_TO_RADS: f64 = PI / 972_000_000.0;

/// A quarter turn in superstructure angle units.
pub const QUARTER_TURN: i64 = 486_000_000;

/// Slack allowed when truncating to integers so that values computed as
/// `n - epsilon` still land on `n`.
const TRUNCATION_TOLERANCE: f64 = 1e-6;

/// A point in funnel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point from funnel coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A superstructure point as stored in the ship file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PolarPoint {
    pub angle: i64,
    pub distance: i64,
}

impl PolarPoint {
    /// Create a polar pair as stored in the file.
    pub fn new(angle: i64, distance: i64) -> Self {
        Self { angle, distance }
    }

    /// The file uses `(0, 0)` for unused slots.
    pub fn is_empty(&self) -> bool {
        self.angle == 0 && self.distance == 0
    }
}

/// File polar pair -> funnel coordinates.
pub fn polar_to_cartesian(polar: PolarPoint) -> Point {
    let angle = polar.angle as f64 * ANGLE_TO_RADS;
    let distance = polar.distance as f64;
    Point {
        x: -distance * angle.sin() * STRUCTURE_TO_FUNNEL,
        y: -distance * angle.cos() * STRUCTURE_TO_FUNNEL,
    }
}

/// Funnel coordinates -> file polar pair, truncated toward zero.
///
/// Points on the beam line (`y == 0`) get a quarter turn, signed so that
/// converting back lands on the same side.
pub fn cartesian_to_polar(point: Point) -> PolarPoint {
    let angle = if point.y != 0.0 {
        truncate((-point.x).atan2(-point.y) / ANGLE_TO_RADS)
    } else if point.x > 0.0 {
        -QUARTER_TURN
    } else {
        QUARTER_TURN
    };
    let distance = truncate(point.x.hypot(point.y) / STRUCTURE_TO_FUNNEL);
    PolarPoint { angle, distance }
}

/// Truncate toward zero after nudging the value away from zero by
/// [`TRUNCATION_TOLERANCE`].
///
/// File values are integers. Converting one to funnel coordinates and back
/// can land a hair below it (`10.9999995` for `11`), and plain truncation
/// would then lose a unit on every save. The same holds for the signed
/// quarter turn in [`cartesian_to_polar`]: a fixed one would flip port
/// beam points to starboard on reload.
fn truncate(value: f64) -> i64 {
    (value + value.signum() * TRUNCATION_TOLERANCE).trunc() as i64
}

/// Flip fore and aft.
pub fn mirror_vertical(points: &[Point]) -> Vec<Point> {
    points.iter().map(|p| Point::new(p.x, -p.y)).collect()
}

/// Flip port and starboard.
pub fn mirror_horizontal(points: &[Point]) -> Vec<Point> {
    points.iter().map(|p| Point::new(-p.x, p.y)).collect()
}

/// Multiply every coordinate by `factor`.
pub fn scale(points: &[Point], factor: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x * factor, p.y * factor))
        .collect()
}

/// Shift every point by `offset`.
pub fn translate(points: &[Point], offset: Point) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x + offset.x, p.y + offset.y))
        .collect()
}

/// Hull silhouette lines, given relative to the half length, in funnel
/// coordinates.
pub fn hull_lines(lines: &[Vec<(f64, f64)>], half_length: f64) -> Vec<Vec<Point>> {
    lines
        .iter()
        .map(|line| {
            let line: Vec<Point> = line.iter().copied().map(Point::from).collect();
            scale(&line, half_length)
        })
        .collect()
}
