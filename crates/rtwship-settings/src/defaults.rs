//! Built-in values used when a parameter file is missing or incomplete.

use crate::parameters::{HalfLengthTable, Outline, TurretPosition};

/// Ship type codes used by the game.
pub const SHIP_TYPES: [&str; 8] = ["BB", "BC", "B", "CA", "CL", "DD", "MS", "AMC"];

/// Every mount position code the game knows.
pub const TURRET_POSITIONS: [&str; 24] = [
    "1", "2", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "Q", "R", "S", "T", "V",
    "W", "X", "Y", "3", "4",
];

/// The turret scale table must cover calibers `0..=MIN_MAX_GUN_CALIBER`.
pub const MIN_MAX_GUN_CALIBER: usize = 18;

/// Turret outlines are indexed by gun count, `0..=MAX_GUNS_PER_TURRET`.
pub const MAX_GUNS_PER_TURRET: usize = 4;

/// Torpedo mount outlines are indexed by tube count, `0..=MAX_TUBES_PER_MOUNT`.
pub const MAX_TUBES_PER_MOUNT: usize = 4;

/// Scale by caliber in inches; 1.0 is a 16" turret.
pub const DEFAULT_TURRETS_SCALE: [f64; MIN_MAX_GUN_CALIBER + 1] = [
    0.22, 0.26, 0.306, 0.347, 0.387, 0.422, 0.458, 0.536, 0.615, 0.657, 0.700, 0.746, 0.793,
    0.867, 0.942, 0.971, 1.000, 1.091, 1.091,
];

const DEFAULT_TURRET_OUTLINE: [(f64, f64); 10] = [
    (-7.4, 12.9),
    (-10.0, -0.1),
    (-6.5, -7.4),
    (-1.2, -9.6),
    (-0.7, -30.0),
    (0.7, -30.0),
    (1.2, -9.6),
    (6.5, -7.4),
    (10.0, 0.0),
    (7.4, 12.9),
];

/// Parked far outside the hull so an undefined letter stays invisible.
const DEFAULT_CANDIDATE: (f64, f64) = (1000.0, 1000.0);

const DEFAULT_HALF_LENGTH_THRESHOLD: u32 = 2_000_000;
const DEFAULT_HALF_LENGTH: f64 = 200.0;

/// Outline of a single gun turret.
pub fn turret_outline() -> Outline {
    DEFAULT_TURRET_OUTLINE.to_vec()
}

/// Turret outlines indexed by gun count.
pub fn turrets_outlines() -> Vec<Outline> {
    (0..=MAX_GUNS_PER_TURRET).map(|_| turret_outline()).collect()
}

/// A launcher box that widens with the tube count.
pub fn torpedo_outline(tubes: usize) -> Outline {
    let half_width = 1.5 * tubes.max(1) as f64;
    vec![
        (-half_width, 4.0),
        (-half_width, -4.0),
        (0.0, -6.0),
        (half_width, -4.0),
        (half_width, 4.0),
    ]
}

/// Torpedo mount outlines indexed by tube count.
pub fn torpedo_outlines() -> Vec<Outline> {
    (0..=MAX_TUBES_PER_MOUNT).map(torpedo_outline).collect()
}

/// Fallback position for a mount letter.
pub fn turret_position() -> TurretPosition {
    TurretPosition {
        positions: vec![DEFAULT_CANDIDATE; 4],
        to_bow: true,
    }
}

/// Fallback half length for any displacement.
pub fn half_length_table() -> HalfLengthTable {
    HalfLengthTable::from([(DEFAULT_HALF_LENGTH_THRESHOLD, DEFAULT_HALF_LENGTH)])
}

/// No hull lines; a ship type without a shape draws nothing.
pub fn hull_shape() -> Vec<Outline> {
    Vec::new()
}
