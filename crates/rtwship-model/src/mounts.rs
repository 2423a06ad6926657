//! Turret and torpedo mount placement.
//!
//! Mounts are derived data: the ship file only names a position letter and
//! a gun or tube count, and the game decides where the mount sits from the
//! letter and the other letters used on the same hull.

use rtwship_settings::{Parameters, Vertex};
use std::collections::BTreeSet;

use crate::error::MountError;
use crate::geometry::{mirror_horizontal, mirror_vertical, scale, translate, Point};

/// Where a torpedo mount with no known position letter is drawn: past the
/// stern, outside the visible drawing.
pub const OFF_FRAME_POSITION: Vertex = (0.0, 1.5);

/// The turret letters present on a hull.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountSet {
    letters: BTreeSet<String>,
}

impl MountSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mount letter
    pub fn insert(&mut self, letter: impl Into<String>) {
        self.letters.insert(letter.into());
    }

    /// Check if a mount letter is present
    pub fn contains(&self, letter: &str) -> bool {
        self.letters.contains(letter)
    }

    fn any(&self, letters: &[&str]) -> bool {
        letters.iter().any(|l| self.contains(l))
    }

    fn all(&self, letters: &[&str]) -> bool {
        letters.iter().all(|l| self.contains(l))
    }

    /// Number of letters
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Check if the set has no letters
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MountSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            letters: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Which candidate position the game picks for `letter` given the turret
/// letters present on the hull.
///
/// Only `X`, `W`, `A`, `B` and `Y` move; every other letter always takes
/// candidate 0.
pub fn resolve_candidate(letter: &str, present: &MountSet) -> usize {
    let has = |l: &str| present.contains(l);
    match letter {
        "X" => usize::from(present.any(&["W", "V", "R", "C"])),
        "W" => usize::from(present.any(&["X", "V", "B"])),
        "A" => {
            if has("V")
                || present.all(&["W", "X", "Y"])
                || (has("C") && has("X"))
                || (has("B") && has("R") && present.any(&["W", "X", "Y"]))
            {
                2
            } else if has("X") || has("W") || (has("B") && present.any(&["C", "R", "W"])) {
                1
            } else {
                0
            }
        }
        "B" => {
            if has("V")
                || has("W")
                || (has("C") && present.any(&["X", "Y"]))
                || (has("A") && has("R") && present.any(&["X", "Y"]))
            {
                2
            } else if present.any(&["X", "Y", "C", "R"]) {
                1
            } else {
                0
            }
        }
        "Y" => {
            if (has("X") && has("W")) || (has("V") && has("W")) {
                3
            } else if has("V")
                || has("W")
                || present.all(&["A", "B", "C"])
                || present.all(&["A", "B", "R"])
            {
                2
            } else if present.any(&["B", "C", "R", "X"]) {
                1
            } else {
                0
            }
        }
        _ => 0,
    }
}

/// Resolved relative position and facing of a known letter.
fn resolve_position(
    letter: &str,
    present: &MountSet,
    params: &Parameters,
) -> Result<(Vertex, bool), MountError> {
    let position = params
        .turrets_positions
        .get(letter)
        .ok_or_else(|| MountError::UnknownPosition {
            letter: letter.to_string(),
        })?;
    let index = resolve_candidate(letter, present);
    let relative = position
        .positions
        .get(index)
        .copied()
        .ok_or_else(|| MountError::MissingCandidate {
            letter: letter.to_string(),
            index,
        })?;
    Ok((relative, position.to_bow))
}

/// Base outline turned to face aft if needed, mirrored when to starboard,
/// scaled, then moved to its place on the hull.
fn place_outline(
    raw: &[Vertex],
    relative: Vertex,
    to_bow: bool,
    factor: f64,
    half_length: f64,
) -> Vec<Point> {
    let mut outline: Vec<Point> = raw.iter().copied().map(Point::from).collect();
    if !to_bow {
        outline = mirror_vertical(&outline);
    }
    if relative.0 > 0.0 {
        outline = mirror_horizontal(&outline);
    }
    let outline = scale(&outline, factor);
    translate(
        &outline,
        Point::new(relative.0 * half_length, relative.1 * half_length),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Turret {
    letter: String,
    guns: usize,
    caliber: usize,
    outline: Vec<Point>,
}

impl Turret {
    /// Place a turret of `guns` guns on `letter`.
    pub fn new(
        letter: &str,
        guns: usize,
        caliber: usize,
        half_length: f64,
        present: &MountSet,
        params: &Parameters,
    ) -> Result<Self, MountError> {
        let (relative, to_bow) = resolve_position(letter, present, params)?;
        let factor = *params
            .turrets_scale
            .get(caliber)
            .ok_or(MountError::UnknownCaliber { caliber })?;
        let raw = params
            .turrets_outlines
            .get(guns)
            .ok_or(MountError::UnknownGunCount { guns })?;

        Ok(Self {
            letter: letter.to_string(),
            guns,
            caliber,
            outline: place_outline(raw, relative, to_bow, factor, half_length),
        })
    }

    /// Position letter from the file.
    pub fn letter(&self) -> &str {
        &self.letter
    }

    /// Number of guns.
    pub fn guns(&self) -> usize {
        self.guns
    }

    /// Main gun caliber in inches.
    pub fn caliber(&self) -> usize {
        self.caliber
    }

    /// Placed outline, in funnel coordinates.
    pub fn outline(&self) -> &[Point] {
        &self.outline
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Torpedo {
    letter: String,
    tubes: usize,
    outline: Vec<Point>,
}

impl Torpedo {
    /// Torpedo mounts are not scaled. A letter with no known position puts
    /// the mount at [`OFF_FRAME_POSITION`].
    pub fn new(
        letter: &str,
        tubes: usize,
        half_length: f64,
        present: &MountSet,
        params: &Parameters,
    ) -> Result<Self, MountError> {
        let (relative, to_bow) = if params.turrets_positions.contains_key(letter) {
            resolve_position(letter, present, params)?
        } else {
            tracing::debug!("Torpedo mount {} has no position, drawn off frame", letter);
            (OFF_FRAME_POSITION, true)
        };
        let raw = params
            .torpedo_outlines
            .get(tubes)
            .ok_or(MountError::UnknownTubeCount { tubes })?;

        Ok(Self {
            letter: letter.to_string(),
            tubes,
            outline: place_outline(raw, relative, to_bow, 1.0, half_length),
        })
    }

    /// Position letter from the file.
    pub fn letter(&self) -> &str {
        &self.letter
    }

    /// Number of tubes.
    pub fn tubes(&self) -> usize {
        self.tubes
    }

    /// Placed outline, in funnel coordinates.
    pub fn outline(&self) -> &[Point] {
        &self.outline
    }
}

/// A placed mount of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Mount {
    Turret(Turret),
    Torpedo(Torpedo),
}

impl Mount {
    /// Position letter of either mount kind.
    pub fn letter(&self) -> &str {
        match self {
            Mount::Turret(turret) => turret.letter(),
            Mount::Torpedo(torpedo) => torpedo.letter(),
        }
    }

    /// Placed outline of either mount kind.
    pub fn outline(&self) -> &[Point] {
        match self {
            Mount::Turret(turret) => turret.outline(),
            Mount::Torpedo(torpedo) => torpedo.outline(),
        }
    }

    /// Check if this is a gun turret
    pub fn is_turret(&self) -> bool {
        matches!(self, Mount::Turret(_))
    }
}
